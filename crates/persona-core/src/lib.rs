//! Business logic and port definitions for Persona.
//!
//! This crate owns the conversation session controller and the pure view
//! projections the shell renders. It defines the `PersonaService` port that
//! the infrastructure layer implements, and depends only on `persona-types`
//! -- never on `persona-infra` or any HTTP crate.

pub mod comparison;
pub mod memory;
pub mod personality;
pub mod service;
pub mod session;
