use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

use crate::core::{GraphAccumulator, RelationshipKind};

pub const JSON_FILE: &str = "graph.json";

/// Single-document JSON export of the accumulated graph
pub struct JsonCompactFormatter {
    pretty: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, graph: &GraphAccumulator, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
        }

        let json_content = self.format_graph(graph)?;
        fs::write(output_path, json_content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_graph(&self, graph: &GraphAccumulator) -> Result<String> {
        let mut relationships = Map::new();
        let mut exported = 0usize;
        let mut dangling = 0usize;

        for kind in RelationshipKind::EXPORTED.iter() {
            let pairs: Vec<Value> = graph
                .relationships(kind)
                .iter()
                .map(|rel| json!([rel.start_id, rel.end_id]))
                .collect();
            exported += pairs.len();
            dangling += graph.dangling_relationships(kind).count();
            relationships.insert(kind.cypher_type().to_string(), Value::Array(pairs));
        }

        let output = json!({
            "meta": {
                "nodes": graph.node_count(),
                "relationships": exported,
                "dangling": dangling,
                "format": "compact"
            },
            "nodes": graph.nodes(),
            "relationships": relationships
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(rendered)
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
