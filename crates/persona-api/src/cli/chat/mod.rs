//! Interactive CLI chat with a persona service.
//!
//! Implements the chat loop: welcome banner, slash commands, busy spinner,
//! markdown rendering of replies, memory and comparison panels. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
