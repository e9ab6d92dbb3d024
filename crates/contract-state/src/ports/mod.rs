//! # Ports Layer (Middle Hexagon)
//!
//! Trait seams between the domain and the outside world.
//!
//! - **Driving (inbound)**: [`inbound::ContractLifecycle`]
//! - **Driven (outbound)**: [`outbound::StateStore`], [`outbound::RemoteClient`]
//!
//! No concrete implementations in this module.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
