//! DMN interchange model structures
//!
//! Mirrors the DMN 1.1 XML schema element by element. Optional XML content
//! is `Option`, repeated content is `Vec`, and enumerated attributes are kept
//! as raw strings so the converters decide how to interpret them. Element
//! kinds the importer does not know are kept as `Unsupported` variants.

use serde::{Deserialize, Serialize};

/// `href` reference to another element, e.g. `#decision-1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TDMNElementReference {
    pub href: String,
}

impl TDMNElementReference {
    pub fn local(id: &str) -> Self {
        Self {
            href: format!("#{}", id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TInformationItem {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub type_ref: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TUnaryTests {
    pub id: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
    pub expression_language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TLiteralExpression {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub text: Option<String>,
    pub expression_language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TContextEntry {
    pub variable: Option<TInformationItem>,
    pub expression: Option<TExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TContext {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub context_entry: Vec<TContextEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TList {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub expression: Vec<TExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TRelation {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub column: Vec<TInformationItem>,
    pub row: Vec<TList>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TBinding {
    pub parameter: TInformationItem,
    pub expression: Option<TExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TInvocation {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub expression: Option<Box<TExpression>>,
    pub binding: Vec<TBinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TFunctionDefinition {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub formal_parameter: Vec<TInformationItem>,
    pub expression: Option<Box<TExpression>>,
    /// Raw `kind` attribute (`FEEL`, `Java`, `PMML` or their initials)
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TInputClause {
    pub id: Option<String>,
    pub description: Option<String>,
    pub input_expression: Option<TLiteralExpression>,
    pub input_values: Option<TUnaryTests>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TOutputClause {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub type_ref: Option<String>,
    pub output_values: Option<TUnaryTests>,
    pub default_output_entry: Option<TLiteralExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TDecisionRule {
    pub id: Option<String>,
    pub description: Option<String>,
    pub input_entry: Vec<TUnaryTests>,
    pub output_entry: Vec<TLiteralExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TDecisionTable {
    pub id: Option<String>,
    pub description: Option<String>,
    pub type_ref: Option<String>,
    pub input: Vec<TInputClause>,
    pub output: Vec<TOutputClause>,
    pub rule: Vec<TDecisionRule>,
    pub hit_policy: Option<String>,
    pub aggregation: Option<String>,
    pub preferred_orientation: Option<String>,
    pub output_label: Option<String>,
}

/// Any expression element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TExpression {
    LiteralExpression(TLiteralExpression),
    Context(TContext),
    Relation(TRelation),
    List(TList),
    Invocation(TInvocation),
    DecisionTable(TDecisionTable),
    FunctionDefinition(TFunctionDefinition),
    /// Expression element of a kind this crate does not model
    Unsupported { kind: String, id: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TInformationRequirement {
    pub required_decision: Option<TDMNElementReference>,
    pub required_input: Option<TDMNElementReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TKnowledgeRequirement {
    pub required_knowledge: Option<TDMNElementReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TAuthorityRequirement {
    pub required_decision: Option<TDMNElementReference>,
    pub required_input: Option<TDMNElementReference>,
    pub required_authority: Option<TDMNElementReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TInputData {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub variable: Option<TInformationItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TDecision {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub question: Option<String>,
    pub allowed_answers: Option<String>,
    pub variable: Option<TInformationItem>,
    pub information_requirement: Vec<TInformationRequirement>,
    pub knowledge_requirement: Vec<TKnowledgeRequirement>,
    pub authority_requirement: Vec<TAuthorityRequirement>,
    pub expression: Option<TExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TBusinessKnowledgeModel {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub variable: Option<TInformationItem>,
    pub encapsulated_logic: Option<TFunctionDefinition>,
    pub knowledge_requirement: Vec<TKnowledgeRequirement>,
    pub authority_requirement: Vec<TAuthorityRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TKnowledgeSource {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub source_type: Option<String>,
    pub location_uri: Option<String>,
    pub authority_requirement: Vec<TAuthorityRequirement>,
}

/// Any DRG element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TDRGElement {
    InputData(TInputData),
    Decision(TDecision),
    BusinessKnowledgeModel(TBusinessKnowledgeModel),
    KnowledgeSource(TKnowledgeSource),
    /// DRG element of a kind this crate does not model (e.g. decisionService)
    Unsupported { kind: String, id: Option<String> },
}

impl TDRGElement {
    pub fn id(&self) -> Option<&str> {
        match self {
            TDRGElement::InputData(e) => e.id.as_deref(),
            TDRGElement::Decision(e) => e.id.as_deref(),
            TDRGElement::BusinessKnowledgeModel(e) => e.id.as_deref(),
            TDRGElement::KnowledgeSource(e) => e.id.as_deref(),
            TDRGElement::Unsupported { id, .. } => id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TTextAnnotation {
    pub id: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
    pub text_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TAssociation {
    pub id: Option<String>,
    pub description: Option<String>,
    pub source_ref: TDMNElementReference,
    pub target_ref: TDMNElementReference,
    pub association_direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TArtifact {
    TextAnnotation(TTextAnnotation),
    Association(TAssociation),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TItemDefinition {
    pub id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub type_ref: Option<String>,
    pub type_language: Option<String>,
    pub is_collection: Option<bool>,
    pub allowed_values: Option<TUnaryTests>,
    pub item_component: Vec<TItemDefinition>,
}

/// Root `definitions` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TDefinitions {
    pub id: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub expression_language: Option<String>,
    pub type_language: Option<String>,
    /// Namespace declarations (prefix, uri); the default namespace has an empty prefix
    pub namespaces: Vec<(String, String)>,
    pub item_definition: Vec<TItemDefinition>,
    pub drg_element: Vec<TDRGElement>,
    pub artifact: Vec<TArtifact>,
}
