pub mod analyzer;
pub mod digest;
pub mod graph;
pub mod scanner;

pub use analyzer::{ConversionStats, DigestConverter};
pub use digest::{DigestChunks, FileChunk};
pub use graph::{CodeGraph, GraphAccumulator, NodeLabel, NodeRecord, Relationship, RelationshipKind};
pub use scanner::{FileScanner, SourceLanguage};
