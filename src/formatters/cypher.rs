use crate::core::RelationshipKind;

/// Render the `LOAD CSV` script that imports `node_file` and every exported
/// relationship file into Neo4j.
pub fn render_import_script(entity_label: &str, node_file: &str) -> String {
    let mut script = String::new();

    script.push_str("// Run this in cypher-shell or Browser (adjust user/password as needed)\n");
    script.push_str(&format!(
        "LOAD CSV WITH HEADERS FROM 'file:///{node_file}' AS row\n"
    ));
    script.push_str(&format!(
        "MERGE (n:{entity_label} {{id: row.id}}) SET n += row;\n\n"
    ));

    for kind in RelationshipKind::EXPORTED.iter() {
        let Some(file_name) = kind.file_name() else {
            continue;
        };
        script.push_str(&format!(
            "LOAD CSV WITH HEADERS FROM 'file:///{file_name}' AS row\n"
        ));
        script.push_str(&format!(
            "MATCH (a:{entity_label} {{id: row.start_id}})\n"
        ));
        script.push_str(&format!("MATCH (b:{entity_label} {{id: row.end_id}})\n"));
        script.push_str(&format!("MERGE (a)-[:{}]->(b);\n\n", kind.cypher_type()));
    }

    script
}

/// Labels are spliced into Cypher unquoted, so only plain identifiers pass
pub fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
