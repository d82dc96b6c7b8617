//! DMN marshaller
//!
//! Converts between DMN XML and the diagram graph. Unmarshalling runs in two
//! passes: every element becomes a node first, then requirement and
//! association references are resolved against the complete id map, so
//! forward references work. Marshalling walks the graph and rebuilds the
//! requirement lists of each element from its incoming edges.

use petgraph::graph::NodeIndex;
use std::collections::HashMap;
use std::io::{Read, Write};
use tracing::{debug, info, warn};

use crate::config::MarshallerSection;
use crate::convert::property::{id_from_href, id_to_dmn, text_from_dmn, text_to_dmn};
use crate::convert::{ConversionError, ExpressionConverter, item_definition, nodes};
use crate::export::{DMNExporter, ExportError};
use crate::import::{DMNImporter, ImportError};
use crate::models::common::Id;
use crate::models::dmn::{
    TArtifact, TAssociation, TAuthorityRequirement, TDMNElementReference, TDRGElement,
    TDefinitions, TInformationRequirement, TKnowledgeRequirement,
};
use crate::models::drg::{DMNDiagram, DRGElement};
use crate::models::graph::{
    AssociationDirection, DefaultGraphFactory, DiagramGraph, EdgeContent, GraphFactory, Metadata,
    NodeContent,
};
use crate::validation::graph::GraphValidator;

/// Error during marshalling or unmarshalling
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    #[error("Import error: {0}")]
    Import(#[from] ImportError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Conversion error: {0}")]
    Conversion(ConversionError),
    #[error("Element '{element}' references unknown element '{href}'")]
    UnresolvedReference { element: String, href: String },
    #[error("Duplicate element id '{0}'")]
    DuplicateId(String),
    #[error("Diagram root node is missing")]
    MissingDiagramRoot,
    #[error("Unsupported element: {0}")]
    UnsupportedElement(String),
    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),
    #[error("Missing metadata: {0} must not be empty")]
    MissingMetadata(&'static str),
    #[error("Invalid diagram structure: {0}")]
    InvalidStructure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConversionError> for MarshalError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnsupportedElement { kind, id } => {
                MarshalError::UnsupportedElement(format!("<{}> (id '{}')", kind, id))
            }
            other => MarshalError::Conversion(other),
        }
    }
}

/// Graph to XML marshaller for DMN documents
#[derive(Debug, Clone, Default)]
pub struct DMNMarshaller<F: GraphFactory = DefaultGraphFactory> {
    config: MarshallerSection,
    factory: F,
}

impl DMNMarshaller<DefaultGraphFactory> {
    /// Create a marshaller using the default graph factory
    pub fn new(config: MarshallerSection) -> Self {
        Self {
            config,
            factory: DefaultGraphFactory,
        }
    }
}

impl<F: GraphFactory> DMNMarshaller<F> {
    /// Create a marshaller that builds graphs with `factory`
    pub fn with_factory(config: MarshallerSection, factory: F) -> Self {
        Self { config, factory }
    }

    fn expressions(&self) -> ExpressionConverter {
        ExpressionConverter::new(self.config.strict_expressions)
    }

    /// Read a DMN document into a new diagram graph
    ///
    /// # Arguments
    ///
    /// * `metadata` - Document name and namespace; empty fields are filled
    ///   from the document's `definitions` element.
    /// * `xml_content` - The DMN XML document.
    ///
    /// # Returns
    ///
    /// The populated graph, or a `MarshalError` when the document cannot be
    /// parsed, holds an unsupported DRG element, repeats an id, references an
    /// unknown element, or the graph factory produced no diagram root.
    pub fn unmarshal(
        &self,
        metadata: Metadata,
        xml_content: &str,
    ) -> Result<DiagramGraph, MarshalError> {
        let mut importer = DMNImporter::new();
        let definitions = importer.import(xml_content)?;
        for issue in &importer.errors {
            warn!("{}", issue);
        }
        self.unmarshal_definitions(metadata, &definitions)
    }

    /// Build a diagram graph from an already parsed document
    pub fn unmarshal_definitions(
        &self,
        mut metadata: Metadata,
        definitions: &TDefinitions,
    ) -> Result<DiagramGraph, MarshalError> {
        let expressions = self.expressions();

        let mut elements = Vec::with_capacity(definitions.drg_element.len());
        for dmn in &definitions.drg_element {
            elements.push(nodes::drg_element_from_dmn(dmn, &expressions)?);
        }
        let annotations: Vec<_> = definitions
            .artifact
            .iter()
            .filter_map(|a| match a {
                TArtifact::TextAnnotation(t) => Some(nodes::text_annotation_from_dmn(t)),
                TArtifact::Association(_) => None,
            })
            .collect();

        if metadata.name.is_empty() {
            metadata.name = definitions.name.clone().unwrap_or_default();
        }
        if metadata.namespace.is_empty() {
            metadata.namespace = definitions.namespace.clone().unwrap_or_default();
        }
        let mut graph = self.factory.build(metadata);

        let mut ids: HashMap<String, NodeIndex> = HashMap::new();
        let mut element_nodes = Vec::with_capacity(elements.len());
        for element in elements {
            let id = element.id().value().to_string();
            let index = graph.add_node(NodeContent::DrgElement(element));
            register_id(&mut ids, id, index)?;
            element_nodes.push(index);
        }
        let mut annotation_nodes = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            let id = annotation.id.value().to_string();
            let index = graph.add_node(NodeContent::TextAnnotation(annotation));
            register_id(&mut ids, id, index)?;
            annotation_nodes.push(index);
        }

        // Second pass: every node exists, so references can be resolved.
        for (dmn, &dependent) in definitions.drg_element.iter().zip(&element_nodes) {
            connect_requirements(&mut graph, &ids, dmn, dependent)?;
        }
        for artifact in &definitions.artifact {
            if let TArtifact::Association(association) = artifact {
                connect_association(&mut graph, &ids, association)?;
            }
        }

        let root = graph.find_root().ok_or(MarshalError::MissingDiagramRoot)?;
        for &index in element_nodes.iter().chain(&annotation_nodes) {
            graph.connect(root, index, EdgeContent::Child);
        }

        if let Some(NodeContent::DiagramRoot(diagram)) = graph.node_mut(root) {
            *diagram = DMNDiagram {
                id: Id::new(definitions.id.clone().unwrap_or_default()),
                expression_language: text_from_dmn(&definitions.expression_language),
                type_language: text_from_dmn(&definitions.type_language),
                namespaces: definitions
                    .namespaces
                    .iter()
                    .filter(|(prefix, _)| !prefix.is_empty())
                    .cloned()
                    .collect(),
                item_definitions: definitions
                    .item_definition
                    .iter()
                    .map(item_definition::wb_from_dmn)
                    .collect(),
            };
        }

        info!(
            "Unmarshalled {} DRG elements and {} text annotations into diagram '{}'",
            element_nodes.len(),
            annotation_nodes.len(),
            graph.metadata().name
        );
        Ok(graph)
    }

    /// Unmarshal a document read from `reader`
    pub fn unmarshal_from_reader<R: Read>(
        &self,
        metadata: Metadata,
        mut reader: R,
    ) -> Result<DiagramGraph, MarshalError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.unmarshal(metadata, &content)
    }

    /// Write a diagram graph as a DMN document
    ///
    /// # Arguments
    ///
    /// * `graph` - The diagram graph; its metadata must carry a non-empty
    ///   name and namespace.
    ///
    /// # Returns
    ///
    /// The XML document, or a `MarshalError` for missing metadata, foreign
    /// nodes, requirement edges between incompatible elements, or (when
    /// structure validation is enabled) a malformed graph.
    pub fn marshal(&self, graph: &DiagramGraph) -> Result<String, MarshalError> {
        let definitions = self.marshal_definitions(graph)?;
        let exporter = DMNExporter::with_namespace(self.config.schema_namespace.clone());
        Ok(exporter.export(&definitions)?)
    }

    /// Convert a diagram graph into the interchange model
    pub fn marshal_definitions(&self, graph: &DiagramGraph) -> Result<TDefinitions, MarshalError> {
        let metadata = graph.metadata();
        if metadata.name.is_empty() {
            return Err(MarshalError::MissingMetadata("name"));
        }
        if metadata.namespace.is_empty() {
            return Err(MarshalError::MissingMetadata("namespace"));
        }

        if self.config.validate_structure {
            let result = GraphValidator::new().validate(graph);
            if !result.is_valid() {
                let issues: Vec<String> = result.issues.iter().map(|i| i.to_string()).collect();
                return Err(MarshalError::InvalidStructure(issues.join("; ")));
            }
        }

        let expressions = self.expressions();
        let mut definitions = TDefinitions {
            name: Some(metadata.name.clone()),
            namespace: Some(metadata.namespace.clone()),
            ..Default::default()
        };
        let mut associations = Vec::new();

        for (index, node) in graph.nodes() {
            match node {
                NodeContent::DiagramRoot(diagram) => {
                    definitions.id = id_to_dmn(&diagram.id);
                    definitions.expression_language = text_to_dmn(&diagram.expression_language);
                    definitions.type_language = text_to_dmn(&diagram.type_language);
                    definitions.namespaces = diagram.namespaces.clone();
                    definitions.item_definition = diagram
                        .item_definitions
                        .iter()
                        .map(item_definition::dmn_from_wb)
                        .collect();
                }
                NodeContent::DrgElement(element) => {
                    let mut dmn = nodes::drg_element_to_dmn(element, &expressions);
                    add_requirements(graph, index, element, &mut dmn)?;
                    definitions.drg_element.push(dmn);
                }
                NodeContent::TextAnnotation(annotation) => {
                    definitions
                        .artifact
                        .push(TArtifact::TextAnnotation(nodes::text_annotation_to_dmn(
                            annotation,
                        )));
                }
                NodeContent::Foreign { definition_set, id } => {
                    return Err(MarshalError::UnsupportedElement(format!(
                        "node '{}' belongs to definition set '{}'",
                        id, definition_set
                    )));
                }
            }
        }

        for (source, target, edge) in graph.edges() {
            if let EdgeContent::Association { id, direction } = edge {
                associations.push(TArtifact::Association(TAssociation {
                    id: id_to_dmn(id),
                    description: None,
                    source_ref: TDMNElementReference::local(&node_id(graph, source)?),
                    target_ref: TDMNElementReference::local(&node_id(graph, target)?),
                    association_direction: match direction {
                        AssociationDirection::None => None,
                        other => Some(other.to_string()),
                    },
                }));
            }
        }
        definitions.artifact.extend(associations);

        info!(
            "Marshalled {} DRG elements and {} artifacts for diagram '{}'",
            definitions.drg_element.len(),
            definitions.artifact.len(),
            metadata.name
        );
        Ok(definitions)
    }

    /// Marshal `graph` and write the document to `writer`
    pub fn marshal_to_writer<W: Write>(
        &self,
        graph: &DiagramGraph,
        mut writer: W,
    ) -> Result<(), MarshalError> {
        let xml = self.marshal(graph)?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}

fn register_id(
    ids: &mut HashMap<String, NodeIndex>,
    id: String,
    index: NodeIndex,
) -> Result<(), MarshalError> {
    if id.is_empty() {
        debug!("Element without id cannot be referenced");
        return Ok(());
    }
    if ids.contains_key(&id) {
        return Err(MarshalError::DuplicateId(id));
    }
    ids.insert(id, index);
    Ok(())
}

fn resolve(
    ids: &HashMap<String, NodeIndex>,
    element: &str,
    reference: &TDMNElementReference,
) -> Result<NodeIndex, MarshalError> {
    ids.get(id_from_href(&reference.href))
        .copied()
        .ok_or_else(|| MarshalError::UnresolvedReference {
            element: element.to_string(),
            href: reference.href.clone(),
        })
}

fn connect_requirements(
    graph: &mut DiagramGraph,
    ids: &HashMap<String, NodeIndex>,
    dmn: &TDRGElement,
    dependent: NodeIndex,
) -> Result<(), MarshalError> {
    let element = dmn.id().unwrap_or_default();
    let (information, knowledge, authority): (
        &[TInformationRequirement],
        &[TKnowledgeRequirement],
        &[TAuthorityRequirement],
    ) = match dmn {
        TDRGElement::Decision(d) => (
            d.information_requirement.as_slice(),
            d.knowledge_requirement.as_slice(),
            d.authority_requirement.as_slice(),
        ),
        TDRGElement::BusinessKnowledgeModel(b) => (
            Default::default(),
            b.knowledge_requirement.as_slice(),
            b.authority_requirement.as_slice(),
        ),
        TDRGElement::KnowledgeSource(k) => (
            Default::default(),
            Default::default(),
            k.authority_requirement.as_slice(),
        ),
        TDRGElement::InputData(_) | TDRGElement::Unsupported { .. } => Default::default(),
    };

    for requirement in information {
        let reference = requirement
            .required_decision
            .as_ref()
            .or(requirement.required_input.as_ref())
            .ok_or_else(|| {
                MarshalError::InvalidRequirement(format!(
                    "information requirement of '{}' has no reference",
                    element
                ))
            })?;
        let required = resolve(ids, element, reference)?;
        graph.connect(required, dependent, EdgeContent::InformationRequirement);
    }
    for requirement in knowledge {
        let reference = requirement.required_knowledge.as_ref().ok_or_else(|| {
            MarshalError::InvalidRequirement(format!(
                "knowledge requirement of '{}' has no reference",
                element
            ))
        })?;
        let required = resolve(ids, element, reference)?;
        graph.connect(required, dependent, EdgeContent::KnowledgeRequirement);
    }
    for requirement in authority {
        let reference = requirement
            .required_decision
            .as_ref()
            .or(requirement.required_input.as_ref())
            .or(requirement.required_authority.as_ref())
            .ok_or_else(|| {
                MarshalError::InvalidRequirement(format!(
                    "authority requirement of '{}' has no reference",
                    element
                ))
            })?;
        let required = resolve(ids, element, reference)?;
        graph.connect(required, dependent, EdgeContent::AuthorityRequirement);
    }
    Ok(())
}

fn connect_association(
    graph: &mut DiagramGraph,
    ids: &HashMap<String, NodeIndex>,
    association: &TAssociation,
) -> Result<(), MarshalError> {
    let element = association.id.clone().unwrap_or_default();
    let source = resolve(ids, &element, &association.source_ref)?;
    let target = resolve(ids, &element, &association.target_ref)?;
    let direction = match association.association_direction.as_deref() {
        None | Some("") => AssociationDirection::None,
        Some(value) => value.parse::<AssociationDirection>().map_err(|reason| {
            MarshalError::from(ConversionError::invalid("associationDirection", value, reason))
        })?,
    };
    graph.connect(
        source,
        target,
        EdgeContent::Association {
            id: Id::new(element),
            direction,
        },
    );
    Ok(())
}

fn node_id(graph: &DiagramGraph, index: NodeIndex) -> Result<String, MarshalError> {
    graph
        .node(index)
        .and_then(|n| n.element_id())
        .filter(|id| !id.is_empty())
        .map(|id| id.value().to_string())
        .ok_or_else(|| {
            MarshalError::InvalidRequirement(format!(
                "edge endpoint {} has no element id",
                index.index()
            ))
        })
}

fn requirement_source(graph: &DiagramGraph, index: NodeIndex) -> Result<&DRGElement, MarshalError> {
    match graph.node(index) {
        Some(NodeContent::DrgElement(element)) => Ok(element),
        _ => Err(MarshalError::InvalidRequirement(format!(
            "requirement source {} is not a DRG element",
            index.index()
        ))),
    }
}

/// Rebuild the requirement lists of `dmn` from the incoming edges of `index`
fn add_requirements(
    graph: &DiagramGraph,
    index: NodeIndex,
    element: &DRGElement,
    dmn: &mut TDRGElement,
) -> Result<(), MarshalError> {
    let dependent = element.id().value();
    for (source, edge) in graph.in_edges(index) {
        if !edge.is_requirement() {
            continue;
        }
        let required = requirement_source(graph, source)?;
        let reference = TDMNElementReference::local(&node_id(graph, source)?);
        let mismatch = || {
            MarshalError::InvalidRequirement(format!(
                "{:?} from {} '{}' to {} '{}' is not allowed",
                edge,
                required.kind_name(),
                required.id(),
                element.kind_name(),
                dependent
            ))
        };

        match (edge, &mut *dmn) {
            (EdgeContent::InformationRequirement, TDRGElement::Decision(d)) => {
                let requirement = match required {
                    DRGElement::Decision(_) => TInformationRequirement {
                        required_decision: Some(reference),
                        required_input: None,
                    },
                    DRGElement::InputData(_) => TInformationRequirement {
                        required_decision: None,
                        required_input: Some(reference),
                    },
                    _ => return Err(mismatch()),
                };
                d.information_requirement.push(requirement);
            }
            (EdgeContent::KnowledgeRequirement, target) => {
                if !matches!(required, DRGElement::BusinessKnowledgeModel(_)) {
                    return Err(mismatch());
                }
                let requirement = TKnowledgeRequirement {
                    required_knowledge: Some(reference),
                };
                match target {
                    TDRGElement::Decision(d) => d.knowledge_requirement.push(requirement),
                    TDRGElement::BusinessKnowledgeModel(b) => {
                        b.knowledge_requirement.push(requirement)
                    }
                    _ => return Err(mismatch()),
                }
            }
            (EdgeContent::AuthorityRequirement, target) => {
                let mut requirement = TAuthorityRequirement::default();
                match required {
                    DRGElement::Decision(_) => requirement.required_decision = Some(reference),
                    DRGElement::InputData(_) => requirement.required_input = Some(reference),
                    DRGElement::KnowledgeSource(_) => {
                        requirement.required_authority = Some(reference)
                    }
                    DRGElement::BusinessKnowledgeModel(_) => return Err(mismatch()),
                }
                match target {
                    TDRGElement::Decision(d) => d.authority_requirement.push(requirement),
                    TDRGElement::BusinessKnowledgeModel(b) => {
                        b.authority_requirement.push(requirement)
                    }
                    TDRGElement::KnowledgeSource(k) => k.authority_requirement.push(requirement),
                    _ => return Err(mismatch()),
                }
            }
            _ => return Err(mismatch()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_INPUTS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<definitions xmlns="http://www.omg.org/spec/DMN/20151101/dmn.xsd" id="defs" name="loan" namespace="urn:loan">
  <decision id="d" name="Decide">
    <informationRequirement><requiredInput href="#a"/></informationRequirement>
    <informationRequirement><requiredInput href="#b"/></informationRequirement>
  </decision>
  <inputData id="a" name="A"/>
  <inputData id="b" name="B"/>
</definitions>"##;

    #[test]
    fn forward_references_resolve() {
        let marshaller = DMNMarshaller::new(MarshallerSection::default());
        let graph = marshaller.unmarshal(Metadata::default(), TWO_INPUTS).unwrap();
        let d = graph.node_by_element_id("d").unwrap();
        let requirements: Vec<_> = graph
            .in_edges(d)
            .into_iter()
            .filter(|(_, e)| e.is_requirement())
            .collect();
        assert_eq!(requirements.len(), 2);
        assert_eq!(graph.metadata().name, "loan");
        assert_eq!(graph.metadata().namespace, "urn:loan");
    }

    #[test]
    fn caller_metadata_wins() {
        let marshaller = DMNMarshaller::new(MarshallerSection::default());
        let graph = marshaller
            .unmarshal(Metadata::new("mine", ""), TWO_INPUTS)
            .unwrap();
        assert_eq!(graph.metadata().name, "mine");
        assert_eq!(graph.metadata().namespace, "urn:loan");
    }

    #[test]
    fn duplicate_ids_are_corrupt_input() {
        let xml = r#"<definitions><inputData id="a"/><decision id="a"/></definitions>"#;
        let err = DMNMarshaller::new(MarshallerSection::default())
            .unmarshal(Metadata::default(), xml)
            .unwrap_err();
        assert!(matches!(err, MarshalError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn empty_requirement_is_invalid() {
        let xml = r#"<definitions><decision id="d"><informationRequirement/></decision></definitions>"#;
        let err = DMNMarshaller::new(MarshallerSection::default())
            .unmarshal(Metadata::default(), xml)
            .unwrap_err();
        assert!(matches!(err, MarshalError::InvalidRequirement(_)));
    }
}
