//! Window model engine for porthole.
//!
//! Owns the window state, advances it once per animation frame, and
//! applies user actions. Headless and seeded, so runs are reproducible.

pub mod engine;
pub mod interaction;
pub mod systems;

pub use engine::{ModelConfig, WindowModel};
pub use porthole_core as core;

#[cfg(test)]
mod tests;
