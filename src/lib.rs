//! The library code for the `arglebargle` blog pipeline. The architecture
//! can be generally broken down into two distinct phases:
//!
//! 1. Per-record processing: each raw record is cleaned up
//!    ([`crate::normalize`]) and rendered to an HTML fragment by its
//!    content-type's renderer ([`crate::render`]), via the
//!    [`crate::pipeline::process`] entry point. Records are independent
//!    here; a failure skips one record, never the batch.
//! 2. Batch aggregation: the rendered records are collected into a
//!    chronological index and per-category lists ([`crate::index`]), then
//!    every record is annotated with navigation links and formatted dates
//!    ([`crate::link`]).
//!
//! Of the two, the second phase is the more involved: cross-linking needs
//! random access to the whole collection (first/last of arbitrary lists,
//! neighbor lookup by position), so the batch is fully materialized in
//! memory before linking starts. The index is reversed for
//! most-recent-first presentation only after all links are computed, which
//! keeps `previous`/`next` chronological.
//!
//! The [`crate::build`] module wires the phases to the file system: YAML
//! records in, linked JSON records out, ready for a downstream template
//! stage.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod date;
pub mod index;
pub mod link;
pub mod markdown;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod render;
