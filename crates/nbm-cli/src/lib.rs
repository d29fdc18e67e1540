//! nbm library - expose command handlers for testing

pub mod commands;
pub mod common;

pub use common::GlobalOpts;
