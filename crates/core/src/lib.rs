//! Progressive-disclosure family tree engine.
//!
//! The crate takes a flat snapshot of family member records and turns it into
//! a renderable hierarchical tree, one click at a time:
//!
//! - [`data`]: the member record, ingestion (CSV/JSON), and the
//!   [`data::MemberRegistry`] that indexes a snapshot.
//! - [`lineage`]: relationship lookups (spouses, children, father
//!   resolution) and the recursive lineage color resolver with its
//!   data-quality diagnostics.
//! - [`view`]: the disclosure state (what has been revealed so far), the
//!   pure click reducer, and the tree assembler that produces display nodes
//!   for a generic tree-rendering surface.
//!
//! Everything here is synchronous and free of I/O except the loaders in
//! [`data::io`]; fetching the snapshot and painting the tree belong to the
//! caller.

pub mod data;
pub mod error;
pub mod lineage;
pub mod view;

pub use error::{Result, TreeError};
