//! # CLI Layer
//!
//! One client of the contactor library. This is the only place that parses
//! arguments, prompts, writes to stdout/stderr or configures logging.
//!
//! - `setup`: clap definitions
//! - `commands`: per-command handlers calling `ContactsApi`
//! - `render`: turning `CmdResult`s into terminal text

mod commands;
mod render;
mod setup;

pub use commands::run;
