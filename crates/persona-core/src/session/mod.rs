//! Conversation session controller and its state record.
//!
//! `SessionController` serializes every mutation of `SessionState` and gates
//! remote calls so that at most one is outstanding at a time.

pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::SessionState;
