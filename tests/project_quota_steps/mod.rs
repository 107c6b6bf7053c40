//! Step definitions for project quota behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
