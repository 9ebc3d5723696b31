use tree_sitter::Node as TSNode;

use super::common::{extract_text, find_children_by_kind, find_first_of_kinds, TreeSitterParser};
use super::scope::Scope;
use super::{LanguageParser, ParseError};
use crate::core::{GraphAccumulator, NodeLabel, NodeRecord, RelationshipKind};

/// Statements the grammar still accepts but Python 3 rejects
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

pub struct PythonParser {
    parser: TreeSitterParser,
}

impl PythonParser {
    pub fn new() -> Result<Self, ParseError> {
        let language = tree_sitter_python::language();
        let parser = TreeSitterParser::new(language)?;
        Ok(Self { parser })
    }
}

impl LanguageParser for PythonParser {
    fn extract(
        &mut self,
        file_id: &str,
        source: &str,
        graph: &mut GraphAccumulator,
    ) -> Result<(), ParseError> {
        let tree = self.parser.parse_source(source)?;
        if let Some(legacy) = find_first_of_kinds(&tree.root_node(), PYTHON2_STATEMENTS) {
            return Err(ParseError::Syntax {
                line: legacy.start_position().row + 1,
            });
        }

        let mut walker = ScopeWalker {
            file_id,
            source: source.as_bytes(),
            graph,
        };
        walker.visit(tree.root_node(), &Scope::new());

        Ok(())
    }

    fn language_name(&self) -> &str {
        "python"
    }
}

/// Depth-first, pre-order walk that records definitions and simple calls
/// relative to the enclosing scope.
struct ScopeWalker<'a> {
    file_id: &'a str,
    source: &'a [u8],
    graph: &'a mut GraphAccumulator,
}

impl ScopeWalker<'_> {
    fn visit(&mut self, node: TSNode, scope: &Scope) {
        match node.kind() {
            "class_definition" | "function_definition" => {
                if self.visit_definition(node, &[], scope) {
                    return;
                }
            }
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    let decorators = find_children_by_kind(&node, "decorator");
                    if self.visit_definition(definition, &decorators, scope) {
                        return;
                    }
                }
            }
            "call" => self.record_call(node, scope),
            _ => {}
        }

        self.visit_children(node, scope);
    }

    fn visit_children(&mut self, node: TSNode, scope: &Scope) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, scope);
        }
    }

    /// Record a class or function and walk its body in a nested scope.
    /// Returns false when the node has no name to record.
    fn visit_definition(&mut self, node: TSNode, decorators: &[TSNode], scope: &Scope) -> bool {
        let Some(name_node) = node.child_by_field_name("name") else {
            return false;
        };
        let name = extract_text(&name_node, self.source);
        if name.is_empty() {
            return false;
        }

        let label = if node.kind() == "class_definition" {
            NodeLabel::Class
        } else {
            NodeLabel::Function
        };
        let qualified = scope.qualify(name);

        self.graph.add_node(
            NodeRecord::new(qualified.clone(), label)
                .with_name(name)
                .with_path(self.file_id)
                .with_line(node.start_position().row + 1),
        );
        self.graph.add_relationship(
            scope.owner(self.file_id),
            qualified.clone(),
            RelationshipKind::Contains,
        );

        if label == NodeLabel::Class {
            self.record_bases(node, &qualified);
        }

        // Parameters and body first, then decorators, then the return annotation
        let body_scope = scope.enter(name);
        let return_type = node.child_by_field_name("return_type");
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if return_type.map_or(true, |annotation| annotation.id() != child.id()) {
                self.visit(child, &body_scope);
            }
        }
        for decorator in decorators {
            self.visit(*decorator, &body_scope);
        }
        if let Some(annotation) = return_type {
            self.visit(annotation, &body_scope);
        }

        true
    }

    fn record_bases(&mut self, class_node: TSNode, qualified: &str) {
        let Some(superclasses) = class_node.child_by_field_name("superclasses") else {
            return;
        };

        let mut cursor = superclasses.walk();
        for base in superclasses.named_children(&mut cursor) {
            // Dotted bases, calls and keyword arguments are not followed
            if base.kind() == "identifier" {
                let base_name = extract_text(&base, self.source);
                self.graph
                    .add_relationship(qualified, base_name, RelationshipKind::Inherits);
            }
        }
    }

    fn record_call(&mut self, call_node: TSNode, scope: &Scope) {
        let Some(callee) = call_node.child_by_field_name("function") else {
            return;
        };
        if callee.kind() != "identifier" {
            return;
        }

        let called = extract_text(&callee, self.source);
        self.graph
            .add_relationship(scope.owner(self.file_id), called, RelationshipKind::Calls);
    }
}
