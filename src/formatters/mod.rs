pub mod csv;
pub mod cypher;
pub mod json_compact;
pub mod neo4j;

pub use json_compact::JsonCompactFormatter;
pub use neo4j::Neo4jFormatter;
