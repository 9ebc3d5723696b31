//! # digest2graph
//!
//! Turns a source digest (many files concatenated behind `FILE: <path>`
//! markers) into a code graph ready for Neo4j.
//!
//! Every block becomes a `File` node. Python blocks are parsed with
//! tree-sitter and contribute `Class` and `Function` nodes keyed by qualified
//! name, plus `CONTAINS`, `INHERITS` and `CALLS` relationships.
//!
//! ## Output Formats
//!
//! - **Neo4j**: `nodes.csv`, one CSV per relationship type and an `import.cypher` script
//! - **JSON-Compact**: a single `graph.json` document

pub mod core;
pub mod formatters;
pub mod parsers;
