//! DMN importer
//!
//! Reads DMN 1.1 XML into the `T*` interchange model. Elements are matched by
//! local name, so prefixed and default-namespace documents read the same.

use tracing::debug;

use crate::import::ImportError;
use crate::models::dmn::{
    TArtifact, TAssociation, TAuthorityRequirement, TBinding, TBusinessKnowledgeModel, TContext,
    TContextEntry, TDMNElementReference, TDRGElement, TDecision, TDecisionRule, TDecisionTable,
    TDefinitions, TExpression, TFunctionDefinition, TInformationItem, TInformationRequirement,
    TInputClause, TInputData, TInvocation, TItemDefinition, TKnowledgeRequirement,
    TKnowledgeSource, TList, TLiteralExpression, TOutputClause, TRelation, TTextAnnotation,
    TUnaryTests,
};
use crate::xml::{self, XmlElement};

/// Children of `definitions` that are neither DRG elements nor artifacts
const IGNORED_DEFINITIONS_CHILDREN: &[&str] = &[
    "description",
    "extensionElements",
    "import",
    "elementCollection",
    "businessContextElement",
    "performanceIndicator",
    "organizationUnit",
    "DMNDI",
];

/// DRG element tags that are recognised as DRG elements but not modelled
const UNSUPPORTED_DRG_ELEMENTS: &[&str] = &["decisionService"];

/// Non-expression children of elements that may hold one expression
const STRUCTURAL_CHILDREN: &[&str] = &[
    "description",
    "extensionElements",
    "variable",
    "question",
    "allowedAnswers",
    "informationRequirement",
    "knowledgeRequirement",
    "authorityRequirement",
    "supportedObjective",
    "impactedPerformanceIndicator",
    "decisionMaker",
    "decisionOwner",
    "usingProcess",
    "usingTask",
    "formalParameter",
    "binding",
    "parameter",
];

/// DMN Importer
///
/// Imports DMN XML content into the `TDefinitions` interchange model.
#[derive(Debug, Default)]
pub struct DMNImporter {
    /// Non-fatal issues encountered during parsing (ignored elements)
    pub errors: Vec<String>,
}

impl DMNImporter {
    /// Create a new DMNImporter
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Import DMN XML content.
    ///
    /// # Arguments
    ///
    /// * `xml_content` - The DMN XML content as a string.
    ///
    /// # Returns
    ///
    /// The parsed `TDefinitions`, or an `ImportError` if the document is not
    /// well-formed or its root is not `definitions`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dmn_editor_core::import::dmn::DMNImporter;
    ///
    /// let mut importer = DMNImporter::new();
    /// let definitions = importer
    ///     .import(r#"<definitions id="x" name="n"><inputData id="a" name="A"/></definitions>"#)
    ///     .unwrap();
    /// assert_eq!(definitions.drg_element.len(), 1);
    /// ```
    pub fn import(&mut self, xml_content: &str) -> Result<TDefinitions, ImportError> {
        let root = xml::parse_document(xml_content)?;
        if root.name != "definitions" {
            return Err(ImportError::DMNValidationError(format!(
                "Expected <definitions> root element, found <{}>",
                root.name
            )));
        }
        Ok(self.read_definitions(&root))
    }

    fn read_definitions(&mut self, el: &XmlElement) -> TDefinitions {
        let mut definitions = TDefinitions {
            id: opt_attr(el, "id"),
            name: opt_attr(el, "name"),
            namespace: opt_attr(el, "namespace"),
            expression_language: opt_attr(el, "expressionLanguage"),
            type_language: opt_attr(el, "typeLanguage"),
            namespaces: el.namespaces.clone(),
            ..Default::default()
        };

        for child in &el.children {
            match child.name.as_str() {
                "itemDefinition" => definitions.item_definition.push(read_item_definition(child)),
                "inputData" => definitions
                    .drg_element
                    .push(TDRGElement::InputData(read_input_data(child))),
                "decision" => definitions
                    .drg_element
                    .push(TDRGElement::Decision(read_decision(child))),
                "businessKnowledgeModel" => definitions
                    .drg_element
                    .push(TDRGElement::BusinessKnowledgeModel(read_bkm(child))),
                "knowledgeSource" => definitions
                    .drg_element
                    .push(TDRGElement::KnowledgeSource(read_knowledge_source(child))),
                "textAnnotation" => definitions
                    .artifact
                    .push(TArtifact::TextAnnotation(read_text_annotation(child))),
                "association" => definitions
                    .artifact
                    .push(TArtifact::Association(read_association(child))),
                name if UNSUPPORTED_DRG_ELEMENTS.contains(&name) => {
                    definitions.drg_element.push(TDRGElement::Unsupported {
                        kind: name.to_string(),
                        id: opt_attr(child, "id"),
                    })
                }
                name if IGNORED_DEFINITIONS_CHILDREN.contains(&name) => {
                    debug!("Skipping <{}> in definitions", name);
                }
                name => {
                    self.errors
                        .push(format!("Ignored unknown element <{}> in definitions", name));
                }
            }
        }
        definitions
    }
}

fn opt_attr(el: &XmlElement, name: &str) -> Option<String> {
    el.attr(name).map(|s| s.to_string())
}

fn description(el: &XmlElement) -> Option<String> {
    el.child_text("description")
}

fn reference(el: &XmlElement, name: &str) -> Option<TDMNElementReference> {
    el.child(name).map(|r| TDMNElementReference {
        href: r.attr("href").unwrap_or_default().to_string(),
    })
}

/// First child that is not structural, i.e. the element's expression
fn expression_child(el: &XmlElement) -> Option<&XmlElement> {
    el.children
        .iter()
        .find(|c| !STRUCTURAL_CHILDREN.contains(&c.name.as_str()))
}

fn read_information_item(el: &XmlElement) -> TInformationItem {
    TInformationItem {
        id: opt_attr(el, "id"),
        description: description(el),
        name: opt_attr(el, "name"),
        type_ref: opt_attr(el, "typeRef").or_else(|| el.child_text("typeRef")),
    }
}

fn read_unary_tests(el: &XmlElement) -> TUnaryTests {
    TUnaryTests {
        id: opt_attr(el, "id"),
        description: description(el),
        text: el.child_text("text"),
        expression_language: opt_attr(el, "expressionLanguage"),
    }
}

fn read_literal(el: &XmlElement) -> TLiteralExpression {
    TLiteralExpression {
        id: opt_attr(el, "id"),
        description: description(el),
        type_ref: opt_attr(el, "typeRef"),
        text: el.child_text("text"),
        expression_language: opt_attr(el, "expressionLanguage"),
    }
}

fn read_list(el: &XmlElement) -> TList {
    TList {
        id: opt_attr(el, "id"),
        description: description(el),
        type_ref: opt_attr(el, "typeRef"),
        expression: el
            .children
            .iter()
            .filter(|c| !STRUCTURAL_CHILDREN.contains(&c.name.as_str()))
            .map(read_expression)
            .collect(),
    }
}

fn read_function_definition(el: &XmlElement) -> TFunctionDefinition {
    TFunctionDefinition {
        id: opt_attr(el, "id"),
        description: description(el),
        type_ref: opt_attr(el, "typeRef"),
        formal_parameter: el
            .children_named("formalParameter")
            .map(read_information_item)
            .collect(),
        expression: expression_child(el).map(|e| Box::new(read_expression(e))),
        kind: opt_attr(el, "kind"),
    }
}

fn read_decision_table(el: &XmlElement) -> TDecisionTable {
    TDecisionTable {
        id: opt_attr(el, "id"),
        description: description(el),
        type_ref: opt_attr(el, "typeRef"),
        input: el
            .children_named("input")
            .map(|i| TInputClause {
                id: opt_attr(i, "id"),
                description: description(i),
                input_expression: i.child("inputExpression").map(read_literal),
                input_values: i.child("inputValues").map(read_unary_tests),
            })
            .collect(),
        output: el
            .children_named("output")
            .map(|o| TOutputClause {
                id: opt_attr(o, "id"),
                description: description(o),
                name: opt_attr(o, "name"),
                type_ref: opt_attr(o, "typeRef"),
                output_values: o.child("outputValues").map(read_unary_tests),
                default_output_entry: o.child("defaultOutputEntry").map(read_literal),
            })
            .collect(),
        rule: el
            .children_named("rule")
            .map(|r| TDecisionRule {
                id: opt_attr(r, "id"),
                description: description(r),
                input_entry: r.children_named("inputEntry").map(read_unary_tests).collect(),
                output_entry: r.children_named("outputEntry").map(read_literal).collect(),
            })
            .collect(),
        hit_policy: opt_attr(el, "hitPolicy"),
        aggregation: opt_attr(el, "aggregation"),
        preferred_orientation: opt_attr(el, "preferredOrientation"),
        output_label: opt_attr(el, "outputLabel"),
    }
}

/// Read any expression element; unknown tags become `TExpression::Unsupported`
fn read_expression(el: &XmlElement) -> TExpression {
    match el.name.as_str() {
        "literalExpression" => TExpression::LiteralExpression(read_literal(el)),
        "context" => TExpression::Context(TContext {
            id: opt_attr(el, "id"),
            description: description(el),
            type_ref: opt_attr(el, "typeRef"),
            context_entry: el
                .children_named("contextEntry")
                .map(|entry| TContextEntry {
                    variable: entry.child("variable").map(read_information_item),
                    expression: expression_child(entry).map(read_expression),
                })
                .collect(),
        }),
        "list" => TExpression::List(read_list(el)),
        "relation" => TExpression::Relation(TRelation {
            id: opt_attr(el, "id"),
            description: description(el),
            type_ref: opt_attr(el, "typeRef"),
            column: el
                .children_named("column")
                .map(read_information_item)
                .collect(),
            row: el.children_named("row").map(read_list).collect(),
        }),
        "invocation" => TExpression::Invocation(TInvocation {
            id: opt_attr(el, "id"),
            description: description(el),
            type_ref: opt_attr(el, "typeRef"),
            expression: expression_child(el).map(|e| Box::new(read_expression(e))),
            binding: el
                .children_named("binding")
                .map(|b| TBinding {
                    parameter: b
                        .child("parameter")
                        .map(read_information_item)
                        .unwrap_or_default(),
                    expression: expression_child(b).map(read_expression),
                })
                .collect(),
        }),
        "decisionTable" => TExpression::DecisionTable(read_decision_table(el)),
        "functionDefinition" => TExpression::FunctionDefinition(read_function_definition(el)),
        other => TExpression::Unsupported {
            kind: other.to_string(),
            id: opt_attr(el, "id"),
        },
    }
}

fn read_information_requirements(el: &XmlElement) -> Vec<TInformationRequirement> {
    el.children_named("informationRequirement")
        .map(|r| TInformationRequirement {
            required_decision: reference(r, "requiredDecision"),
            required_input: reference(r, "requiredInput"),
        })
        .collect()
}

fn read_knowledge_requirements(el: &XmlElement) -> Vec<TKnowledgeRequirement> {
    el.children_named("knowledgeRequirement")
        .map(|r| TKnowledgeRequirement {
            required_knowledge: reference(r, "requiredKnowledge"),
        })
        .collect()
}

fn read_authority_requirements(el: &XmlElement) -> Vec<TAuthorityRequirement> {
    el.children_named("authorityRequirement")
        .map(|r| TAuthorityRequirement {
            required_decision: reference(r, "requiredDecision"),
            required_input: reference(r, "requiredInput"),
            required_authority: reference(r, "requiredAuthority"),
        })
        .collect()
}

fn read_input_data(el: &XmlElement) -> TInputData {
    TInputData {
        id: opt_attr(el, "id"),
        description: description(el),
        name: opt_attr(el, "name"),
        variable: el.child("variable").map(read_information_item),
    }
}

fn read_decision(el: &XmlElement) -> TDecision {
    TDecision {
        id: opt_attr(el, "id"),
        description: description(el),
        name: opt_attr(el, "name"),
        question: el.child_text("question"),
        allowed_answers: el.child_text("allowedAnswers"),
        variable: el.child("variable").map(read_information_item),
        information_requirement: read_information_requirements(el),
        knowledge_requirement: read_knowledge_requirements(el),
        authority_requirement: read_authority_requirements(el),
        expression: expression_child(el).map(read_expression),
    }
}

fn read_bkm(el: &XmlElement) -> TBusinessKnowledgeModel {
    TBusinessKnowledgeModel {
        id: opt_attr(el, "id"),
        description: description(el),
        name: opt_attr(el, "name"),
        variable: el.child("variable").map(read_information_item),
        encapsulated_logic: el.child("encapsulatedLogic").map(read_function_definition),
        knowledge_requirement: read_knowledge_requirements(el),
        authority_requirement: read_authority_requirements(el),
    }
}

fn read_knowledge_source(el: &XmlElement) -> TKnowledgeSource {
    TKnowledgeSource {
        id: opt_attr(el, "id"),
        description: description(el),
        name: opt_attr(el, "name"),
        source_type: el.child_text("type"),
        location_uri: opt_attr(el, "locationURI"),
        authority_requirement: read_authority_requirements(el),
    }
}

fn read_text_annotation(el: &XmlElement) -> TTextAnnotation {
    TTextAnnotation {
        id: opt_attr(el, "id"),
        description: description(el),
        text: el.child_text("text"),
        text_format: opt_attr(el, "textFormat"),
    }
}

fn read_association(el: &XmlElement) -> TAssociation {
    TAssociation {
        id: opt_attr(el, "id"),
        description: description(el),
        source_ref: reference(el, "sourceRef").unwrap_or_default(),
        target_ref: reference(el, "targetRef").unwrap_or_default(),
        association_direction: opt_attr(el, "associationDirection"),
    }
}

fn read_item_definition(el: &XmlElement) -> TItemDefinition {
    TItemDefinition {
        id: opt_attr(el, "id"),
        description: description(el),
        name: opt_attr(el, "name"),
        type_ref: el.child_text("typeRef").or_else(|| opt_attr(el, "typeRef")),
        type_language: opt_attr(el, "typeLanguage"),
        is_collection: el.attr("isCollection").map(|v| v == "true"),
        allowed_values: el.child("allowedValues").map(read_unary_tests),
        item_component: el
            .children_named("itemComponent")
            .map(read_item_definition)
            .collect(),
    }
}
