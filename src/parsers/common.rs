use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use super::ParseError;

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting trees that contain error or missing nodes
    pub fn parse_source(&mut self, source: &str) -> Result<Tree, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            let line = first_syntax_error(&root).unwrap_or(root.start_position().row + 1);
            return Err(ParseError::Syntax { line });
        }
        Ok(tree)
    }
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// 1-based line of the first `ERROR` or `MISSING` node under `node`
pub fn first_syntax_error(node: &TSNode) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode> = node.children(&mut cursor).collect();
    children.iter().find_map(first_syntax_error)
}

/// First node, in pre-order, whose kind is one of `kinds`
pub fn find_first_of_kinds<'a>(node: &TSNode<'a>, kinds: &[&str]) -> Option<TSNode<'a>> {
    if kinds.contains(&node.kind()) {
        return Some(*node);
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode<'a>> = node.named_children(&mut cursor).collect();
    children
        .iter()
        .find_map(|child| find_first_of_kinds(child, kinds))
}

pub fn find_children_by_kind<'a>(node: &TSNode<'a>, kind: &str) -> Vec<TSNode<'a>> {
    let mut results = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == kind {
            results.push(child);
        }
    }
    results
}
