pub mod common;
pub mod python;
pub mod scope;

use thiserror::Error;

use crate::core::{GraphAccumulator, SourceLanguage};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("parser produced no syntax tree")]
    NoTree,
    #[error("syntax error near line {line}")]
    Syntax { line: usize },
}

impl ParseError {
    /// Errors confined to one file's text; the run carries on without it
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::NoTree | ParseError::Syntax { .. })
    }
}

pub trait LanguageParser {
    /// Parse `source` and record its classes, functions and relationships.
    ///
    /// Nothing is recorded when the source does not parse.
    fn extract(
        &mut self,
        file_id: &str,
        source: &str,
        graph: &mut GraphAccumulator,
    ) -> Result<(), ParseError>;

    fn language_name(&self) -> &str;
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_parser(
        &self,
        language: SourceLanguage,
    ) -> Result<Box<dyn LanguageParser>, ParseError> {
        match language {
            SourceLanguage::Python => Ok(Box::new(python::PythonParser::new()?)),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
