//! Step definitions for chat messaging scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
