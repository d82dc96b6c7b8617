//! Decision requirements graph elements
//!
//! Node contents of a diagram: the DRG elements, text annotations and the
//! diagram root that carries definitions-level data.

use serde::{Deserialize, Serialize};

use super::common::{Description, Id, InformationItem, Name, QName};
use super::decision_table::UnaryTests;
use super::expression::{Expression, FunctionDefinition};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    pub id: Id,
    pub description: Description,
    pub name: Name,
    pub variable: InformationItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: Id,
    pub description: Description,
    pub name: Name,
    pub question: String,
    pub allowed_answers: String,
    pub variable: InformationItem,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessKnowledgeModel {
    pub id: Id,
    pub description: Description,
    pub name: Name,
    pub variable: InformationItem,
    pub encapsulated_logic: Option<FunctionDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSource {
    pub id: Id,
    pub description: Description,
    pub name: Name,
    pub source_type: String,
    pub location_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub id: Id,
    pub description: Description,
    pub text: String,
    pub text_format: String,
}

/// Definitions-level type declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: Id,
    pub description: Description,
    pub name: Name,
    pub type_ref: QName,
    pub type_language: String,
    pub is_collection: bool,
    pub allowed_values: Option<UnaryTests>,
    pub item_component: Vec<ItemDefinition>,
}

/// Structural root of a diagram
///
/// Holds what the `definitions` element carries besides its DRG elements
/// and artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DMNDiagram {
    pub id: Id,
    pub expression_language: String,
    pub type_language: String,
    /// Prefixed namespace declarations (prefix, uri), excluding the default namespace
    pub namespaces: Vec<(String, String)>,
    pub item_definitions: Vec<ItemDefinition>,
}

/// A decision requirements graph element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DRGElement {
    InputData(InputData),
    Decision(Decision),
    BusinessKnowledgeModel(BusinessKnowledgeModel),
    KnowledgeSource(KnowledgeSource),
}

impl DRGElement {
    pub fn id(&self) -> &Id {
        match self {
            DRGElement::InputData(e) => &e.id,
            DRGElement::Decision(e) => &e.id,
            DRGElement::BusinessKnowledgeModel(e) => &e.id,
            DRGElement::KnowledgeSource(e) => &e.id,
        }
    }

    pub fn name(&self) -> &Name {
        match self {
            DRGElement::InputData(e) => &e.name,
            DRGElement::Decision(e) => &e.name,
            DRGElement::BusinessKnowledgeModel(e) => &e.name,
            DRGElement::KnowledgeSource(e) => &e.name,
        }
    }

    /// XML tag name of this element kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            DRGElement::InputData(_) => "inputData",
            DRGElement::Decision(_) => "decision",
            DRGElement::BusinessKnowledgeModel(_) => "businessKnowledgeModel",
            DRGElement::KnowledgeSource(_) => "knowledgeSource",
        }
    }
}
