use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use super::csv::CsvWriter;
use super::cypher::render_import_script;
use crate::core::{GraphAccumulator, RelationshipKind};

pub const NODES_FILE: &str = "nodes.csv";
pub const IMPORT_SCRIPT: &str = "import.cypher";
pub const DEFAULT_ENTITY_LABEL: &str = "Entity";

/// Writes the node table, one edge table per exported relationship kind and
/// an `import.cypher` script into an output directory.
pub struct Neo4jFormatter {
    entity_label: String,
}

impl Neo4jFormatter {
    pub fn new() -> Self {
        Self {
            entity_label: DEFAULT_ENTITY_LABEL.to_string(),
        }
    }

    pub fn with_entity_label(mut self, label: impl Into<String>) -> Self {
        self.entity_label = label.into();
        self
    }

    pub fn format_to_dir(&self, graph: &GraphAccumulator, output_dir: &Path) -> Result<()> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("failed to create output directory {}", output_dir.display())
        })?;

        self.write_nodes(graph, &output_dir.join(NODES_FILE))?;

        for kind in RelationshipKind::EXPORTED.iter() {
            if let Some(file_name) = kind.file_name() {
                self.write_relationships(graph, kind, &output_dir.join(file_name))?;
            }
        }

        let skipped: usize = graph
            .relationship_kinds()
            .filter(|kind| kind.file_name().is_none())
            .map(|kind| graph.relationships(kind).len())
            .sum();
        if skipped > 0 {
            tracing::warn!("{} relationships of unexported kinds were not written", skipped);
        }

        let script_path = output_dir.join(IMPORT_SCRIPT);
        fs::write(&script_path, render_import_script(&self.entity_label, NODES_FILE))
            .with_context(|| format!("failed to write {}", script_path.display()))?;

        Ok(())
    }

    fn write_nodes(&self, graph: &GraphAccumulator, path: &Path) -> Result<()> {
        let columns = graph.node_columns();
        let mut writer = CsvWriter::new(BufWriter::new(create(path)?));

        writer.write_record(&columns)?;
        for node in graph.nodes() {
            writer.write_record(
                columns
                    .iter()
                    .map(|column| node.field(column).unwrap_or("")),
            )?;
        }
        writer.into_inner()?;

        tracing::debug!("Wrote {} nodes to {}", graph.node_count(), path.display());
        Ok(())
    }

    fn write_relationships(
        &self,
        graph: &GraphAccumulator,
        kind: &RelationshipKind,
        path: &Path,
    ) -> Result<()> {
        let relationships = graph.relationships(kind);
        let mut writer = CsvWriter::new(BufWriter::new(create(path)?));

        writer.write_record(["start_id", "end_id"])?;
        for rel in relationships {
            writer.write_record([rel.start_id.as_str(), rel.end_id.as_str()])?;
        }
        writer.into_inner()?;

        tracing::debug!(
            "Wrote {} {} relationships to {}",
            relationships.len(),
            kind,
            path.display()
        );
        Ok(())
    }
}

impl Default for Neo4jFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}
