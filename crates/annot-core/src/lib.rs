//! # annot-core
//!
//! Core types and change-detection rules for annot-sync.
//!
//! This crate provides the pieces shared by the database layer and the CLI:
//! - Object type codes and the per-category table/column descriptors
//! - Annotation records, authoritative objects, and joined pairs
//! - The NULL-safe equality rule used to re-verify candidate rows
//! - Per-category change tallies and the run summary
//! - Cross-cutting error types
//!
//! Nothing here performs I/O.

pub mod category;
pub mod compare;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod stats;
