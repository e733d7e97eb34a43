//! Infrastructure layer for Persona.
//!
//! Contains the HTTP implementation of the `PersonaService` port defined in
//! `persona-core`, plus the on-disk configuration loader.

pub mod client;
pub mod config;
