//! Core types and definitions for the porthole window model.
//!
//! This crate defines the vocabulary shared across the other crates:
//! state, commands, events, the location catalog, and constants.
//! It has no randomness and no clock of its own.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod locations;
pub mod persist;
pub mod state;
pub mod types;
