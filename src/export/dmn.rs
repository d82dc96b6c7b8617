//! DMN exporter
//!
//! Writes the `T*` interchange model as DMN 1.1 XML. Elements are written
//! unprefixed under a configurable default namespace, children in schema
//! order.

use crate::export::ExportError;
use crate::models::dmn::{
    TArtifact, TAuthorityRequirement, TBusinessKnowledgeModel, TDMNElementReference, TDRGElement,
    TDecision, TDecisionTable, TDefinitions, TExpression, TFunctionDefinition, TInformationItem,
    TInformationRequirement, TInputData, TItemDefinition, TKnowledgeRequirement, TKnowledgeSource,
    TList, TLiteralExpression, TUnaryTests,
};
use crate::xml::{self, XmlElement};

/// DMN 1.1 model namespace
pub const DMN_11_NAMESPACE: &str = "http://www.omg.org/spec/DMN/20151101/dmn.xsd";

/// DMN Exporter
///
/// Exports `TDefinitions` as DMN XML.
#[derive(Debug, Clone)]
pub struct DMNExporter {
    schema_namespace: String,
}

impl Default for DMNExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DMNExporter {
    /// Create a new DMNExporter writing the DMN 1.1 namespace
    pub fn new() -> Self {
        Self {
            schema_namespace: DMN_11_NAMESPACE.to_string(),
        }
    }

    /// Create an exporter writing `namespace` as the default namespace
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            schema_namespace: namespace.into(),
        }
    }

    /// Export definitions as an XML document
    ///
    /// # Arguments
    ///
    /// * `definitions` - The interchange model to write.
    ///
    /// # Returns
    ///
    /// The XML document, or `ExportError::ValidationError` when the model
    /// still holds an unsupported element or expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dmn_editor_core::export::dmn::DMNExporter;
    /// use dmn_editor_core::models::dmn::TDefinitions;
    ///
    /// let definitions = TDefinitions {
    ///     name: Some("loan".to_string()),
    ///     ..Default::default()
    /// };
    /// let xml = DMNExporter::new().export(&definitions).unwrap();
    /// assert!(xml.contains("name=\"loan\""));
    /// ```
    pub fn export(&self, definitions: &TDefinitions) -> Result<String, ExportError> {
        let root = self.write_definitions(definitions)?;
        xml::write_document(&root)
    }

    fn write_definitions(&self, defs: &TDefinitions) -> Result<XmlElement, ExportError> {
        let mut el = XmlElement::new("definitions");
        el.namespaces
            .push((String::new(), self.schema_namespace.clone()));
        el.namespaces.extend(
            defs.namespaces
                .iter()
                .filter(|(prefix, _)| !prefix.is_empty())
                .cloned(),
        );
        set_opt(&mut el, "id", &defs.id);
        set_opt(&mut el, "name", &defs.name);
        set_opt(&mut el, "namespace", &defs.namespace);
        set_opt(&mut el, "expressionLanguage", &defs.expression_language);
        set_opt(&mut el, "typeLanguage", &defs.type_language);

        for item in &defs.item_definition {
            el.push(write_item_definition("itemDefinition", item));
        }
        for drg in &defs.drg_element {
            el.push(write_drg_element(drg)?);
        }
        for artifact in &defs.artifact {
            el.push(write_artifact(artifact));
        }
        Ok(el)
    }
}

fn set_opt(el: &mut XmlElement, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        el.set_attr(name, value.as_str());
    }
}

fn push_description(el: &mut XmlElement, description: &Option<String>) {
    if let Some(d) = description {
        el.push_text_child("description", d);
    }
}

fn write_reference(name: &str, reference: &TDMNElementReference) -> XmlElement {
    XmlElement::new(name).with_attr("href", reference.href.as_str())
}

fn write_information_item(name: &str, item: &TInformationItem) -> XmlElement {
    let mut el = XmlElement::new(name);
    set_opt(&mut el, "id", &item.id);
    set_opt(&mut el, "name", &item.name);
    set_opt(&mut el, "typeRef", &item.type_ref);
    push_description(&mut el, &item.description);
    el
}

fn write_unary_tests(name: &str, tests: &TUnaryTests) -> XmlElement {
    let mut el = XmlElement::new(name);
    set_opt(&mut el, "id", &tests.id);
    set_opt(&mut el, "expressionLanguage", &tests.expression_language);
    push_description(&mut el, &tests.description);
    if let Some(text) = &tests.text {
        el.push_text_child("text", text);
    }
    el
}

fn write_literal(name: &str, literal: &TLiteralExpression) -> XmlElement {
    let mut el = XmlElement::new(name);
    set_opt(&mut el, "id", &literal.id);
    set_opt(&mut el, "typeRef", &literal.type_ref);
    set_opt(&mut el, "expressionLanguage", &literal.expression_language);
    push_description(&mut el, &literal.description);
    if let Some(text) = &literal.text {
        el.push_text_child("text", text);
    }
    el
}

fn write_list(name: &str, list: &TList) -> Result<XmlElement, ExportError> {
    let mut el = XmlElement::new(name);
    set_opt(&mut el, "id", &list.id);
    set_opt(&mut el, "typeRef", &list.type_ref);
    push_description(&mut el, &list.description);
    for item in &list.expression {
        el.push(write_expression(item)?);
    }
    Ok(el)
}

fn write_function_definition(
    name: &str,
    function: &TFunctionDefinition,
) -> Result<XmlElement, ExportError> {
    let mut el = XmlElement::new(name);
    set_opt(&mut el, "id", &function.id);
    set_opt(&mut el, "typeRef", &function.type_ref);
    set_opt(&mut el, "kind", &function.kind);
    push_description(&mut el, &function.description);
    for parameter in &function.formal_parameter {
        el.push(write_information_item("formalParameter", parameter));
    }
    if let Some(body) = &function.expression {
        el.push(write_expression(body)?);
    }
    Ok(el)
}

fn write_decision_table(table: &TDecisionTable) -> XmlElement {
    let mut el = XmlElement::new("decisionTable");
    set_opt(&mut el, "id", &table.id);
    set_opt(&mut el, "typeRef", &table.type_ref);
    set_opt(&mut el, "hitPolicy", &table.hit_policy);
    set_opt(&mut el, "aggregation", &table.aggregation);
    set_opt(&mut el, "preferredOrientation", &table.preferred_orientation);
    set_opt(&mut el, "outputLabel", &table.output_label);
    push_description(&mut el, &table.description);

    for input in &table.input {
        let mut clause = XmlElement::new("input");
        set_opt(&mut clause, "id", &input.id);
        push_description(&mut clause, &input.description);
        if let Some(expression) = &input.input_expression {
            clause.push(write_literal("inputExpression", expression));
        }
        if let Some(values) = &input.input_values {
            clause.push(write_unary_tests("inputValues", values));
        }
        el.push(clause);
    }
    for output in &table.output {
        let mut clause = XmlElement::new("output");
        set_opt(&mut clause, "id", &output.id);
        set_opt(&mut clause, "name", &output.name);
        set_opt(&mut clause, "typeRef", &output.type_ref);
        push_description(&mut clause, &output.description);
        if let Some(values) = &output.output_values {
            clause.push(write_unary_tests("outputValues", values));
        }
        if let Some(entry) = &output.default_output_entry {
            clause.push(write_literal("defaultOutputEntry", entry));
        }
        el.push(clause);
    }
    for rule in &table.rule {
        let mut r = XmlElement::new("rule");
        set_opt(&mut r, "id", &rule.id);
        push_description(&mut r, &rule.description);
        for entry in &rule.input_entry {
            r.push(write_unary_tests("inputEntry", entry));
        }
        for entry in &rule.output_entry {
            r.push(write_literal("outputEntry", entry));
        }
        el.push(r);
    }
    el
}

fn write_expression(expression: &TExpression) -> Result<XmlElement, ExportError> {
    let el = match expression {
        TExpression::LiteralExpression(e) => write_literal("literalExpression", e),
        TExpression::Context(context) => {
            let mut el = XmlElement::new("context");
            set_opt(&mut el, "id", &context.id);
            set_opt(&mut el, "typeRef", &context.type_ref);
            push_description(&mut el, &context.description);
            for entry in &context.context_entry {
                let mut e = XmlElement::new("contextEntry");
                if let Some(variable) = &entry.variable {
                    e.push(write_information_item("variable", variable));
                }
                if let Some(value) = &entry.expression {
                    e.push(write_expression(value)?);
                }
                el.push(e);
            }
            el
        }
        TExpression::List(list) => write_list("list", list)?,
        TExpression::Relation(relation) => {
            let mut el = XmlElement::new("relation");
            set_opt(&mut el, "id", &relation.id);
            set_opt(&mut el, "typeRef", &relation.type_ref);
            push_description(&mut el, &relation.description);
            for column in &relation.column {
                el.push(write_information_item("column", column));
            }
            for row in &relation.row {
                el.push(write_list("row", row)?);
            }
            el
        }
        TExpression::Invocation(invocation) => {
            let mut el = XmlElement::new("invocation");
            set_opt(&mut el, "id", &invocation.id);
            set_opt(&mut el, "typeRef", &invocation.type_ref);
            push_description(&mut el, &invocation.description);
            if let Some(callee) = &invocation.expression {
                el.push(write_expression(callee)?);
            }
            for binding in &invocation.binding {
                let mut b = XmlElement::new("binding");
                b.push(write_information_item("parameter", &binding.parameter));
                if let Some(value) = &binding.expression {
                    b.push(write_expression(value)?);
                }
                el.push(b);
            }
            el
        }
        TExpression::DecisionTable(table) => write_decision_table(table),
        TExpression::FunctionDefinition(f) => write_function_definition("functionDefinition", f)?,
        TExpression::Unsupported { kind, id } => {
            return Err(ExportError::ValidationError(format!(
                "Unsupported expression <{}> (id {:?}) cannot be written",
                kind, id
            )));
        }
    };
    Ok(el)
}

fn write_information_requirements(el: &mut XmlElement, requirements: &[TInformationRequirement]) {
    for requirement in requirements {
        let mut r = XmlElement::new("informationRequirement");
        if let Some(reference) = &requirement.required_decision {
            r.push(write_reference("requiredDecision", reference));
        }
        if let Some(reference) = &requirement.required_input {
            r.push(write_reference("requiredInput", reference));
        }
        el.push(r);
    }
}

fn write_knowledge_requirements(el: &mut XmlElement, requirements: &[TKnowledgeRequirement]) {
    for requirement in requirements {
        let mut r = XmlElement::new("knowledgeRequirement");
        if let Some(reference) = &requirement.required_knowledge {
            r.push(write_reference("requiredKnowledge", reference));
        }
        el.push(r);
    }
}

fn write_authority_requirements(el: &mut XmlElement, requirements: &[TAuthorityRequirement]) {
    for requirement in requirements {
        let mut r = XmlElement::new("authorityRequirement");
        if let Some(reference) = &requirement.required_decision {
            r.push(write_reference("requiredDecision", reference));
        }
        if let Some(reference) = &requirement.required_input {
            r.push(write_reference("requiredInput", reference));
        }
        if let Some(reference) = &requirement.required_authority {
            r.push(write_reference("requiredAuthority", reference));
        }
        el.push(r);
    }
}

fn write_input_data(input: &TInputData) -> XmlElement {
    let mut el = XmlElement::new("inputData");
    set_opt(&mut el, "id", &input.id);
    set_opt(&mut el, "name", &input.name);
    push_description(&mut el, &input.description);
    if let Some(variable) = &input.variable {
        el.push(write_information_item("variable", variable));
    }
    el
}

fn write_decision(decision: &TDecision) -> Result<XmlElement, ExportError> {
    let mut el = XmlElement::new("decision");
    set_opt(&mut el, "id", &decision.id);
    set_opt(&mut el, "name", &decision.name);
    push_description(&mut el, &decision.description);
    if let Some(question) = &decision.question {
        el.push_text_child("question", question);
    }
    if let Some(answers) = &decision.allowed_answers {
        el.push_text_child("allowedAnswers", answers);
    }
    if let Some(variable) = &decision.variable {
        el.push(write_information_item("variable", variable));
    }
    write_information_requirements(&mut el, &decision.information_requirement);
    write_knowledge_requirements(&mut el, &decision.knowledge_requirement);
    write_authority_requirements(&mut el, &decision.authority_requirement);
    if let Some(expression) = &decision.expression {
        el.push(write_expression(expression)?);
    }
    Ok(el)
}

fn write_bkm(bkm: &TBusinessKnowledgeModel) -> Result<XmlElement, ExportError> {
    let mut el = XmlElement::new("businessKnowledgeModel");
    set_opt(&mut el, "id", &bkm.id);
    set_opt(&mut el, "name", &bkm.name);
    push_description(&mut el, &bkm.description);
    if let Some(variable) = &bkm.variable {
        el.push(write_information_item("variable", variable));
    }
    if let Some(logic) = &bkm.encapsulated_logic {
        el.push(write_function_definition("encapsulatedLogic", logic)?);
    }
    write_knowledge_requirements(&mut el, &bkm.knowledge_requirement);
    write_authority_requirements(&mut el, &bkm.authority_requirement);
    Ok(el)
}

fn write_knowledge_source(source: &TKnowledgeSource) -> XmlElement {
    let mut el = XmlElement::new("knowledgeSource");
    set_opt(&mut el, "id", &source.id);
    set_opt(&mut el, "name", &source.name);
    set_opt(&mut el, "locationURI", &source.location_uri);
    push_description(&mut el, &source.description);
    write_authority_requirements(&mut el, &source.authority_requirement);
    if let Some(source_type) = &source.source_type {
        el.push_text_child("type", source_type);
    }
    el
}

fn write_drg_element(element: &TDRGElement) -> Result<XmlElement, ExportError> {
    match element {
        TDRGElement::InputData(input) => Ok(write_input_data(input)),
        TDRGElement::Decision(decision) => write_decision(decision),
        TDRGElement::BusinessKnowledgeModel(bkm) => write_bkm(bkm),
        TDRGElement::KnowledgeSource(source) => Ok(write_knowledge_source(source)),
        TDRGElement::Unsupported { kind, id } => Err(ExportError::ValidationError(format!(
            "Unsupported DRG element <{}> (id {:?}) cannot be written",
            kind, id
        ))),
    }
}

fn write_artifact(artifact: &TArtifact) -> XmlElement {
    match artifact {
        TArtifact::TextAnnotation(annotation) => {
            let mut el = XmlElement::new("textAnnotation");
            set_opt(&mut el, "id", &annotation.id);
            set_opt(&mut el, "textFormat", &annotation.text_format);
            push_description(&mut el, &annotation.description);
            if let Some(text) = &annotation.text {
                el.push_text_child("text", text);
            }
            el
        }
        TArtifact::Association(association) => {
            let mut el = XmlElement::new("association");
            set_opt(&mut el, "id", &association.id);
            set_opt(
                &mut el,
                "associationDirection",
                &association.association_direction,
            );
            push_description(&mut el, &association.description);
            el.push(write_reference("sourceRef", &association.source_ref));
            el.push(write_reference("targetRef", &association.target_ref));
            el
        }
    }
}

fn write_item_definition(name: &str, item: &TItemDefinition) -> XmlElement {
    let mut el = XmlElement::new(name);
    set_opt(&mut el, "id", &item.id);
    set_opt(&mut el, "name", &item.name);
    set_opt(&mut el, "typeLanguage", &item.type_language);
    if let Some(collection) = item.is_collection {
        el.set_attr("isCollection", collection.to_string());
    }
    push_description(&mut el, &item.description);
    if let Some(type_ref) = &item.type_ref {
        el.push_text_child("typeRef", type_ref);
    }
    if let Some(values) = &item.allowed_values {
        el.push(write_unary_tests("allowedValues", values));
    }
    for component in &item.item_component {
        el.push(write_item_definition("itemComponent", component));
    }
    el
}
