//! Shared domain types for Persona.
//!
//! This crate contains the types exchanged between the session controller,
//! the persona service client, and the terminal shell: messages, extracted
//! memory, chat wire payloads, client configuration, and error enums.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod memory;
pub mod message;
