//! Memory presentation for Persona.
//!
//! Extraction itself happens in the remote service; this module only projects
//! the controller's extracted memory into display-ready sections.

pub mod view;
