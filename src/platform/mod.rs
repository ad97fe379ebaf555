//! Platform abstraction layer
//!
//! Turns host input into the logical `TickInput` the simulation consumes.
//! Raw event capture stays with the host; it only reports which logical keys
//! are held.

pub mod input;

pub use input::{InputLatch, Key, KeyboardState, MovementInput};
