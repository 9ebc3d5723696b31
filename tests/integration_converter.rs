use digest2graph::core::{DigestConverter, FileScanner, GraphAccumulator, NodeLabel, RelationshipKind};
use digest2graph::formatters::Neo4jFormatter;
use std::fs;
use std::io::Cursor;

const DIGEST: &str = "\
Directory structure:
└── demo/

================================================
FILE: demo/models.py
================================================
class Base:
    pass

class Child(Base):
    def m(self):
        helper()

def helper():
    pass

================================================
FILE: demo/broken.py
================================================
def oops(:
    return 1

================================================
FILE: demo/README.md
================================================
# Demo
";

fn convert(digest: &str) -> GraphAccumulator {
    DigestConverter::new()
        .convert_reader(Cursor::new(digest))
        .unwrap()
}

fn pairs(graph: &GraphAccumulator, kind: RelationshipKind) -> Vec<(&str, &str)> {
    graph
        .relationships(&kind)
        .iter()
        .map(|rel| (rel.start_id.as_str(), rel.end_id.as_str()))
        .collect()
}

#[test]
fn converter_builds_graph_for_mixed_digest() {
    let mut converter = DigestConverter::new();
    let graph = converter.convert_reader(Cursor::new(DIGEST)).unwrap();

    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "demo/models.py",
            "Base",
            "Child",
            "Child.m",
            "helper",
            "demo/broken.py",
            "demo/README.md",
        ]
    );

    let file = graph.node("demo/models.py").unwrap();
    assert_eq!(file.label, NodeLabel::File);
    assert_eq!(file.attribute("name"), Some("models.py"));
    assert_eq!(file.attribute("path"), Some("demo/models.py"));
    assert_eq!(file.attribute("line"), None);

    assert_eq!(
        pairs(&graph, RelationshipKind::Contains),
        vec![
            ("demo/models.py", "Base"),
            ("demo/models.py", "Child"),
            ("Child", "Child.m"),
            ("demo/models.py", "helper"),
        ]
    );
    assert_eq!(pairs(&graph, RelationshipKind::Inherits), vec![("Child", "Base")]);
    assert_eq!(pairs(&graph, RelationshipKind::Calls), vec![("Child.m", "helper")]);

    let stats = converter.stats();
    assert_eq!(stats.files, 3);
    assert_eq!(stats.parsed, 1);
    assert_eq!(stats.rejected, 1);
}

#[test]
fn unparsable_file_contributes_only_its_file_node() {
    let graph = convert("FILE: bad.py\ndef broken(:\n    helper()\n");

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.nodes()[0].id, "bad.py");
    assert_eq!(graph.relationship_count(), 0);
}

#[test]
fn non_python_files_are_not_parsed() {
    let graph = convert("FILE: lib.rs\nfn main() { helper(); }\nFILE: notes.pyc\ndef f(): pass\n");

    assert_eq!(graph.node_count(), 2);
    assert!(graph.nodes().iter().all(|n| n.label == NodeLabel::File));
    assert_eq!(graph.relationship_count(), 0);
}

#[test]
fn extra_python_extensions_can_be_enabled() {
    let scanner = FileScanner::new().with_python_extensions(&["py", "pyi"]);
    let graph = DigestConverter::with_scanner(scanner)
        .convert_reader(Cursor::new("FILE: stubs.pyi\ndef f(): ...\n"))
        .unwrap();

    assert!(graph.contains_node("f"));
}

#[test]
fn repeated_path_yields_one_file_node() {
    let graph = convert("FILE: a.py\ndef f():\n    pass\nFILE: a.py\ndef g():\n    pass\n");

    let file_nodes: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|n| n.label == NodeLabel::File)
        .collect();
    assert_eq!(file_nodes.len(), 1);
    assert_eq!(file_nodes[0].id, "a.py");
    assert!(graph.contains_node("f"));
    assert!(graph.contains_node("g"));
}

#[test]
fn containment_targets_always_resolve() {
    let graph = convert(DIGEST);

    for rel in graph.relationships(&RelationshipKind::Contains) {
        assert!(graph.contains_node(&rel.end_id), "unresolved {}", rel.end_id);
    }
    assert_eq!(
        graph
            .dangling_relationships(&RelationshipKind::Calls)
            .count(),
        0
    );
}

#[test]
fn calls_and_bases_may_dangle() {
    let graph = convert("FILE: app.py\nclass View(BaseView):\n    def get(self):\n        render()\n");

    assert_eq!(
        graph
            .dangling_relationships(&RelationshipKind::Inherits)
            .count(),
        1
    );
    assert_eq!(
        graph
            .dangling_relationships(&RelationshipKind::Calls)
            .count(),
        1
    );
}

#[test]
fn identical_input_gives_identical_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let digest_path = dir.path().join("digest.txt");
    fs::write(&digest_path, DIGEST).unwrap();

    let first = dir.path().join("first");
    let second = dir.path().join("second");
    for out in [&first, &second] {
        let graph = DigestConverter::new().convert_path(&digest_path).unwrap();
        Neo4jFormatter::new().format_to_dir(&graph, out).unwrap();
    }

    for name in ["nodes.csv", "contains.csv", "inherits.csv", "calls.csv", "import.cypher"] {
        let a = fs::read(first.join(name)).unwrap();
        let b = fs::read(second.join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn missing_digest_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = DigestConverter::new().convert_path(&dir.path().join("absent.txt"));
    assert!(result.is_err());
}
