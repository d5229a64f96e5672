//! Infrastructure adapters. Implement ports.
//!
//! Schedule storage and the terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod ui;
