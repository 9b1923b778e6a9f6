//! Adapter implementations for session ports.

pub mod memory;
