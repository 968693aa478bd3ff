//! # Qattr Architecture
//!
//! Qattr assembles the attribute set of a survey question. A question type
//! defines a base set of attributes, the question's theme extends or
//! suppresses them, and plugins contribute more. Qattr merges those layers,
//! orders them by category and attaches stored values (per locale where the
//! attribute is localized).
//!
//! It is a library first. The `qattr` binary is a thin client that drives it
//! from JSON fixtures.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, prints JSON or grouped listings        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resolver (resolver.rs)                                     │
//! │  - Picks the theme, fetches every layer once                │
//! │  - Chains the definition pipeline, returns Result types     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Definition pipeline (definitions/)                         │
//! │  - Sanitize, filter, backfill, merge, order, group, fill    │
//! │  - Pure functions over owned sets                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (source/)                                          │
//! │  - Abstract AttributeSource trait                           │
//! │  - MemorySource (tests, JSON bundles)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! From `resolver.rs` inward, code never prints, never exits and never reads
//! files. Everything external arrives through [`source::AttributeSource`].
//! Diagnostics go out as `tracing` events; installing a subscriber is the
//! caller's business.
//!
//! ## Module Overview
//!
//! - [`resolver`]: [`AttributeResolver`], the entry point
//! - [`definitions`]: the individual pipeline steps
//! - [`source`]: collaborator trait and the in-memory implementation
//! - [`model`]: definitions, value sets, resolved attributes
//! - [`config`]: host constants (fallback theme, category order)
//! - [`error`]: Error types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod config;
pub mod definitions;
pub mod error;
pub mod model;
pub mod resolver;
pub mod source;

pub use config::ResolverConfig;
pub use error::{QattrError, Result};
pub use model::{
    AttributeDefinition, AttributeDefinitionSet, AttributeValueSet, Question, RawDefinitions,
    ResolvedAttribute, ResolvedAttributes, ResolvedValue,
};
pub use resolver::{AttributeResolver, ResolveRequest};
pub use source::memory::MemorySource;
pub use source::AttributeSource;
