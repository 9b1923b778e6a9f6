//! User sessions and the login flow.
//!
//! Authentication itself is delegated to an external provider reached
//! through the [`ports::SessionProvider`] port. This module owns the typed
//! values that cross that boundary and the [`services::LoginService`] that
//! turns provider failures into a single user-facing message.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
