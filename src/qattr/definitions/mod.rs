//! # Definition Pipeline
//!
//! The building blocks the resolver chains together. Each is usable on its
//! own for callers that only need part of the pipeline (listing plugin
//! attributes, say).
//!
//! | Step | Function | Input → Output |
//! |------|----------|----------------|
//! | Sanitize | [`sanitize`] | raw records → keyed set |
//! | Filter | [`filter_by_type`] | set → set applying to one question type |
//! | Backfill | [`fill_missing_category`] | set → set where every entry has a category |
//! | Merge | [`Merger::merge`] | base + layer → set |
//! | Order | [`sort_by_category`] | set → set in category rank order |
//! | Group | [`group_by_category`] | items → category buckets |
//! | Fill | [`fill_values`] | set + stored values → resolved attributes |
//!
//! ## Layering
//!
//! ```text
//!   question type ──┐
//!                   ├─ merge ──┐
//!   question theme ─┘          ├─ merge ── sort ── fill values
//!   plugins (filtered) ────────┘
//! ```
//!
//! Later layers always win. Merging is not commutative.

mod filter;
mod group;
mod merge;
mod sanitize;
mod values;

pub use filter::{
    attribute_applies_to_type, fill_missing_category, filter_by_type, DefinitionRecords,
};
pub use group::{group_by_category, sort_by_category, CategoryPrecedence, CategoryRank};
pub use merge::{DefaultTemplate, Merger};
pub use sanitize::{sanitize, sanitize_value};
pub use values::fill_values;
