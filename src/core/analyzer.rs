use anyhow::{Context, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{
    DigestChunks, FileChunk, FileScanner, GraphAccumulator, NodeLabel, NodeRecord, SourceLanguage,
};
use crate::parsers::{LanguageParser, ParserFactory};

/// Per-run counters reported once the digest has been consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub files: usize,
    pub parsed: usize,
    pub rejected: usize,
}

/// Drives a digest through chunking, parsing and graph accumulation.
pub struct DigestConverter {
    file_scanner: FileScanner,
    parser_factory: ParserFactory,
    parsers: HashMap<SourceLanguage, Box<dyn LanguageParser>>,
    stats: ConversionStats,
}

impl DigestConverter {
    pub fn new() -> Self {
        Self::with_scanner(FileScanner::new())
    }

    pub fn with_scanner(file_scanner: FileScanner) -> Self {
        Self {
            file_scanner,
            parser_factory: ParserFactory::new(),
            parsers: HashMap::new(),
            stats: ConversionStats::default(),
        }
    }

    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    pub fn convert_path(&mut self, digest_path: &Path) -> Result<GraphAccumulator> {
        let file = File::open(digest_path)
            .with_context(|| format!("failed to open digest {}", digest_path.display()))?;
        tracing::info!("Converting digest {}", digest_path.display());
        self.convert_reader(BufReader::new(file))
    }

    pub fn convert_reader<R: BufRead>(&mut self, reader: R) -> Result<GraphAccumulator> {
        self.stats = ConversionStats::default();
        let mut graph = GraphAccumulator::new();

        for chunk in DigestChunks::new(reader) {
            let chunk = chunk.context("failed to read digest")?;
            self.process_chunk(&chunk, &mut graph)?;
        }

        let resolved = graph.to_graph();
        tracing::info!(
            "Processed {} files ({} parsed, {} rejected): {} nodes, {} relationships, {} dangling",
            self.stats.files,
            self.stats.parsed,
            self.stats.rejected,
            graph.node_count(),
            graph.relationship_count(),
            graph.relationship_count() - resolved.edge_count()
        );

        Ok(graph)
    }

    /// Add the chunk's file node and, for supported languages, its internals
    pub fn process_chunk(&mut self, chunk: &FileChunk, graph: &mut GraphAccumulator) -> Result<()> {
        self.stats.files += 1;

        let file_name = Path::new(&chunk.path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let inserted = graph.add_node(
            NodeRecord::new(chunk.path.as_str(), NodeLabel::File)
                .with_attribute("name", file_name)
                .with_path(chunk.path.as_str()),
        );
        if !inserted {
            tracing::debug!("Duplicate file block {}", chunk.path);
        }

        let Some(language) = self.file_scanner.detect_language(&chunk.path) else {
            return Ok(());
        };

        let parser = match self.parsers.entry(language) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let parser = self
                    .parser_factory
                    .get_parser(language)
                    .with_context(|| format!("failed to initialize {} parser", language.name()))?;
                entry.insert(parser)
            }
        };

        match parser.extract(&chunk.path, &chunk.content, graph) {
            Ok(()) => self.stats.parsed += 1,
            Err(err) if err.is_recoverable() => {
                self.stats.rejected += 1;
                tracing::debug!(
                    "Skipping {} internals of {}: {}",
                    parser.language_name(),
                    chunk.path,
                    err
                );
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to parse {}", chunk.path));
            }
        }

        Ok(())
    }
}

impl Default for DigestConverter {
    fn default() -> Self {
        Self::new()
    }
}
