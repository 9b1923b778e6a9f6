//! Adapter implementations for chat ports.

pub mod memory;
