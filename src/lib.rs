//! kclfacts: relational fact extraction for KCL programs.
//!
//! Walks the syntax trees of a parsed KCL program and emits a relational
//! database of facts: one tuple per node, with stable labels, source
//! locations, and links from identifiers to the schemas they denote.

// Core infrastructure - re-exported from kclfacts-core
pub use kclfacts_core::context;
pub use kclfacts_core::error;
pub use kclfacts_core::facts;
pub use kclfacts_core::hash;
pub use kclfacts_core::label;
pub use kclfacts_core::text;
pub use kclfacts_core::writer;

pub mod config;
pub mod extractor;
pub mod location;
pub mod program;
pub mod xref;

// Front door
pub mod cli;
pub mod output;
