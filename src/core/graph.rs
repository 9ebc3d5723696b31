use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub enum NodeLabel {
    File,
    Class,
    Function,
}

impl NodeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeLabel::File => "File",
            NodeLabel::Class => "Class",
            NodeLabel::Function => "Function",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship kinds. Only the first three are exported; anything else is
/// accepted and kept in memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Contains,
    Inherits,
    Calls,
    Other(String),
}

impl RelationshipKind {
    pub const EXPORTED: [RelationshipKind; 3] = [
        RelationshipKind::Contains,
        RelationshipKind::Inherits,
        RelationshipKind::Calls,
    ];

    /// Relationship type name used in Cypher and JSON output
    pub fn cypher_type(&self) -> &str {
        match self {
            RelationshipKind::Contains => "CONTAINS",
            RelationshipKind::Inherits => "INHERITS",
            RelationshipKind::Calls => "CALLS",
            RelationshipKind::Other(name) => name,
        }
    }

    pub fn file_name(&self) -> Option<&'static str> {
        match self {
            RelationshipKind::Contains => Some("contains.csv"),
            RelationshipKind::Inherits => Some("inherits.csv"),
            RelationshipKind::Calls => Some("calls.csv"),
            RelationshipKind::Other(_) => None,
        }
    }
}

impl From<&str> for RelationshipKind {
    fn from(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "CONTAINS" => RelationshipKind::Contains,
            "INHERITS" => RelationshipKind::Inherits,
            "CALLS" => RelationshipKind::Calls,
            _ => RelationshipKind::Other(value.to_string()),
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cypher_type())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: String,
    pub label: NodeLabel,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, label: NodeLabel) -> Self {
        Self {
            id: id.into(),
            label,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an attribute. `None` values are dropped, and the reserved
    /// `id`/`label` keys are ignored.
    pub fn with_attribute<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if key == "id" || key == "label" {
            return self;
        }
        if let Some(value) = value {
            self.attributes.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        self.with_attribute("name", Some(name))
    }

    pub fn with_path(self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        self.with_attribute("path", Some(path))
    }

    pub fn with_line(self, line: usize) -> Self {
        self.with_attribute("line", Some(line))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Value of a node table column, including the `id` and `label` columns
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "id" => Some(&self.id),
            "label" => Some(self.label.as_str()),
            _ => self.attribute(column),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relationship {
    pub start_id: String,
    pub end_id: String,
}

impl Relationship {
    pub fn new(start_id: impl Into<String>, end_id: impl Into<String>) -> Self {
        Self {
            start_id: start_id.into(),
            end_id: end_id.into(),
        }
    }
}

/// Graph view holding only the relationships whose endpoints both resolve.
pub type CodeGraph = Graph<NodeRecord, RelationshipKind, Directed>;

/// Collects nodes and per-kind relationships for one conversion run.
///
/// Nodes are deduplicated by id (first insertion wins) and keep insertion
/// order. Relationships are never deduplicated and may point at ids that were
/// never added as nodes.
#[derive(Debug, Clone, Default)]
pub struct GraphAccumulator {
    nodes: Vec<NodeRecord>,
    node_index: HashMap<String, usize>,
    relationships: HashMap<RelationshipKind, Vec<Relationship>>,
}

impl GraphAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` unless its id is already known. Returns whether it was inserted.
    pub fn add_node(&mut self, node: NodeRecord) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn add_relationship(
        &mut self,
        start_id: impl Into<String>,
        end_id: impl Into<String>,
        kind: RelationshipKind,
    ) {
        self.relationships
            .entry(kind)
            .or_default()
            .push(Relationship::new(start_id, end_id));
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationships(&self, kind: &RelationshipKind) -> &[Relationship] {
        self.relationships
            .get(kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn relationship_kinds(&self) -> impl Iterator<Item = &RelationshipKind> {
        self.relationships.keys()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.values().map(Vec::len).sum()
    }

    /// Sorted union of `id`, `label` and every attribute key seen on any node
    pub fn node_columns(&self) -> Vec<String> {
        let mut columns: BTreeSet<&str> = ["id", "label"].into_iter().collect();
        for node in &self.nodes {
            columns.extend(node.attributes.keys().map(String::as_str));
        }
        columns.into_iter().map(str::to_string).collect()
    }

    /// Relationships of `kind` with at least one endpoint that is not a node
    pub fn dangling_relationships<'a>(
        &'a self,
        kind: &RelationshipKind,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships(kind).iter().filter(move |rel| {
            !self.contains_node(&rel.start_id) || !self.contains_node(&rel.end_id)
        })
    }

    pub fn to_graph(&self) -> CodeGraph {
        let mut graph = CodeGraph::with_capacity(self.nodes.len(), self.relationship_count());
        let indices: Vec<NodeIndex> = self
            .nodes
            .iter()
            .map(|node| graph.add_node(node.clone()))
            .collect();

        let mut kinds: Vec<&RelationshipKind> = self.relationships.keys().collect();
        kinds.sort_by(|a, b| a.cypher_type().cmp(b.cypher_type()));

        for kind in kinds {
            for rel in self.relationships(kind) {
                let source = self.node_index.get(&rel.start_id);
                let target = self.node_index.get(&rel.end_id);
                if let (Some(&source), Some(&target)) = (source, target) {
                    graph.add_edge(indices[source], indices[target], kind.clone());
                }
            }
        }

        graph
    }
}
