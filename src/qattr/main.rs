//! # Qattr CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! Question data comes from a *bundle*: a JSON file holding question type
//! definitions, theme definitions, plugin definitions, stored values, survey
//! languages and questions (see [`qattr::MemorySource`]). That makes the
//! binary a way to inspect how a given set of layers resolves, with no host
//! storage involved.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/qattr/cli/)                                 │
//! │  - clap argument parsing, tracing setup (setup.rs)          │
//! │  - Bundle loading + dispatch (commands.rs)                  │
//! │  - JSON and grouped terminal output (render.rs)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (AttributeResolver, definitions, MemorySource)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are printed as `Error: <message>` and the process exits with 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
