//! # Adapters Layer (Outer Hexagon)
//!
//! Reference implementations of the outbound ports: an in-memory
//! reducer-backed store and a scriptable remote-client double.

pub mod memory_store;
pub mod scripted_client;

pub use memory_store::*;
pub use scripted_client::*;
