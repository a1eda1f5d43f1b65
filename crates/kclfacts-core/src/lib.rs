//! Core infrastructure for kclfacts.
//!
//! This crate provides the language-agnostic half of the extractor:
//! - Labels and the identity manager (stable and fresh allocation)
//! - The immutable traversal [`Context`](context::Context)
//! - Fact relations and the append-only [`FactStore`](facts::FactStore)
//! - Error types and exit codes
//! - Source text utilities (line index, spans, one-line rendering)
//! - TRAP and JSON writers for emitted facts

pub mod context;
pub mod error;
pub mod facts;
pub mod hash;
pub mod label;
pub mod text;
pub mod writer;
