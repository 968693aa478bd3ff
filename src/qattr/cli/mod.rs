//! # CLI Behavior
//!
//! One client for the resolver. It is the only place that knows about
//! terminal I/O, exit codes and output formatting.
//!
//! ## Commands
//!
//! - `qattr resolve <BUNDLE> --question <ID>`: resolve one question from a
//!   bundle and print the attribute map as JSON. `--grouped` prints a
//!   category listing instead.
//! - `qattr plugins <BUNDLE> --type <TYPE>`: the plugin attributes that apply
//!   to a question type.
//! - `qattr sanitize <FILE>`: canonicalize a raw definitions file.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `render`: JSON and grouped listing output
//! - `setup`: argument parsing via clap, tracing subscriber

mod commands;
mod render;
pub mod setup;

pub use commands::run;
