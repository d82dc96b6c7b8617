//! Command implementations for dmn-cli

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use dmn_editor_core::models::drg::DRGElement;
use dmn_editor_core::models::graph::{DiagramGraph, EdgeContent, NodeContent};
use dmn_editor_core::validation::validate_dmn_xml;
use dmn_editor_core::{DMNMarshaller, EditorConfig, GraphValidator, Metadata, TableValidator};

use crate::error::CliError;

/// Load input content from file or stdin
fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Load the editor configuration from `dir`, or defaults plus environment
/// overrides when no directory was given
pub fn load_config(dir: Option<&Path>) -> Result<EditorConfig, CliError> {
    match dir {
        Some(dir) => Ok(EditorConfig::load(dir)?),
        None => {
            let mut config = EditorConfig::new();
            config.apply_env_overrides();
            Ok(config)
        }
    }
}

#[derive(Debug, Serialize)]
struct ElementSummary {
    id: String,
    kind: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    expression: Option<String>,
}

#[derive(Debug, Serialize)]
struct DiagramSummary {
    name: String,
    namespace: String,
    elements: Vec<ElementSummary>,
    text_annotations: usize,
    requirements: usize,
    associations: usize,
}

fn summarize(graph: &DiagramGraph) -> DiagramSummary {
    let mut elements = Vec::new();
    let mut text_annotations = 0;
    for (_, node) in graph.nodes() {
        match node {
            NodeContent::DrgElement(element) => {
                let expression = match element {
                    DRGElement::Decision(d) => {
                        d.expression.as_ref().map(|e| e.kind().to_string())
                    }
                    DRGElement::BusinessKnowledgeModel(b) => b
                        .encapsulated_logic
                        .as_ref()
                        .map(|f| format!("functionDefinition ({})", f.kind)),
                    _ => None,
                };
                elements.push(ElementSummary {
                    id: element.id().to_string(),
                    kind: element.kind_name(),
                    name: element.name().value().to_string(),
                    expression,
                });
            }
            NodeContent::TextAnnotation(_) => text_annotations += 1,
            NodeContent::DiagramRoot(_) | NodeContent::Foreign { .. } => {}
        }
    }

    let requirements = graph.edges().filter(|(_, _, e)| e.is_requirement()).count();
    let associations = graph
        .edges()
        .filter(|(_, _, e)| matches!(e, EdgeContent::Association { .. }))
        .count();

    DiagramSummary {
        name: graph.metadata().name.clone(),
        namespace: graph.metadata().namespace.clone(),
        elements,
        text_annotations,
        requirements,
        associations,
    }
}

/// Handle the inspect command: print a JSON summary of the diagram
pub fn handle_inspect(input: &str, config: &EditorConfig) -> Result<(), CliError> {
    let content = load_input(input)?;
    let marshaller = DMNMarshaller::new(config.marshaller.clone());
    let graph = marshaller.unmarshal(Metadata::default(), &content)?;
    let summary = summarize(&graph);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Handle the roundtrip command: unmarshal and marshal again
pub fn handle_roundtrip(
    input: &str,
    output: Option<&Path>,
    config: &EditorConfig,
) -> Result<(), CliError> {
    let content = load_input(input)?;
    let marshaller = DMNMarshaller::new(config.marshaller.clone());
    let graph = marshaller.unmarshal(Metadata::default(), &content)?;
    debug!(
        "Read {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    let xml = marshaller.marshal(&graph)?;

    match output {
        Some(path) => {
            std::fs::write(path, &xml)
                .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", xml),
    }
    Ok(())
}

/// Handle the validate command
///
/// Checks the document's XML structure, then unmarshals it and checks the
/// resulting graph and every decision table and relation in it.
pub fn handle_validate(input: &str, config: &EditorConfig) -> Result<(), CliError> {
    let content = load_input(input)?;
    validate_dmn_xml(&content).map_err(|e| CliError::ValidationError(e.to_string()))?;

    let marshaller = DMNMarshaller::new(config.marshaller.clone());
    let graph = marshaller.unmarshal(Metadata::default(), &content)?;

    let mut problems: Vec<String> = Vec::new();
    let structure = GraphValidator::new().validate(&graph);
    problems.extend(structure.issues.iter().map(|i| i.to_string()));
    if let Some(element) = &structure.requirement_cycle {
        eprintln!("Warning: element '{}' is on a requirement cycle", element);
    }

    let tables = TableValidator::new().validate_graph(&graph);
    problems.extend(
        tables
            .violations
            .iter()
            .map(|v| format!("{} row {}: {}", v.table_id, v.row + 1, v.message)),
    );

    if !problems.is_empty() {
        return Err(CliError::ValidationError(problems.join("; ")));
    }

    println!("Validation successful");
    Ok(())
}
