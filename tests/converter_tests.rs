//! Integration tests for expression conversion through the marshaller

use dmn_editor_core::config::MarshallerSection;
use dmn_editor_core::models::drg::DRGElement;
use dmn_editor_core::models::expression::{Expression, FunctionKind};
use dmn_editor_core::models::graph::{DiagramGraph, Metadata, NodeContent};
use dmn_editor_core::models::decision_table::HitPolicy;
use dmn_editor_core::{DMNMarshaller, MarshalError};

fn document(body: &str) -> String {
    format!(
        r#"<definitions xmlns="http://www.omg.org/spec/DMN/20151101/dmn.xsd" id="defs" name="n" namespace="urn:n">{}</definitions>"#,
        body
    )
}

fn element(graph: &DiagramGraph, id: &str) -> DRGElement {
    let index = graph.node_by_element_id(id).unwrap();
    match graph.node(index) {
        Some(NodeContent::DrgElement(e)) => e.clone(),
        other => panic!("expected DRG element, got {:?}", other),
    }
}

fn decision_expression(graph: &DiagramGraph, id: &str) -> Option<Expression> {
    match element(graph, id) {
        DRGElement::Decision(d) => d.expression,
        other => panic!("expected decision, got {:?}", other),
    }
}

const NESTED: &str = r#"
<decision id="d" name="Rates">
  <context id="ctx">
    <contextEntry>
      <variable id="v1" name="table"/>
      <relation id="rel">
        <column id="c1" name="band"/>
        <column id="c2" name="rate"/>
        <row id="r1">
          <literalExpression id="l1"><text>"low"</text></literalExpression>
          <literalExpression id="l2"><text>0.1</text></literalExpression>
        </row>
      </relation>
    </contextEntry>
    <contextEntry>
      <literalExpression id="result"><text>table</text></literalExpression>
    </contextEntry>
  </context>
</decision>"#;

#[test]
fn test_nested_context_relation_list_literal() {
    let marshaller = DMNMarshaller::new(MarshallerSection::default());
    let graph = marshaller.unmarshal(Metadata::default(), &document(NESTED)).unwrap();

    let Some(Expression::Context(context)) = decision_expression(&graph, "d") else {
        panic!("expected context");
    };
    assert_eq!(context.context_entry.len(), 2);
    assert_eq!(
        context.context_entry[0].variable.as_ref().map(|v| v.name.value()),
        Some("table")
    );
    assert!(context.context_entry[1].variable.is_none());

    let Some(Expression::Relation(relation)) = &context.context_entry[0].expression else {
        panic!("expected relation");
    };
    assert_eq!(relation.column.len(), 2);
    assert_eq!(relation.row.len(), 1);
    let cells: Vec<_> = relation.row[0]
        .expression
        .iter()
        .map(|e| e.as_ref().and_then(Expression::as_literal).map(|l| l.text.clone()))
        .collect();
    assert_eq!(cells, vec![Some("\"low\"".to_string()), Some("0.1".to_string())]);

    let xml = marshaller.marshal(&graph).unwrap();
    let again = marshaller.unmarshal(Metadata::default(), &xml).unwrap();
    assert_eq!(
        decision_expression(&again, "d"),
        decision_expression(&graph, "d")
    );
}

#[test]
fn test_unsupported_nested_expression_is_dropped_unless_strict() {
    let body = r#"<decision id="d"><context id="ctx">
  <contextEntry><variable id="v" name="x"/><filter id="f"/></contextEntry>
</context></decision>"#;

    let lenient = DMNMarshaller::new(MarshallerSection::default());
    let graph = lenient.unmarshal(Metadata::default(), &document(body)).unwrap();
    let Some(Expression::Context(context)) = decision_expression(&graph, "d") else {
        panic!("expected context");
    };
    assert!(context.context_entry[0].expression.is_none());

    let strict = DMNMarshaller::new(MarshallerSection {
        strict_expressions: true,
        ..Default::default()
    });
    let err = strict.unmarshal(Metadata::default(), &document(body)).unwrap_err();
    assert!(matches!(err, MarshalError::Conversion(_)));
}

#[test]
fn test_dropped_relation_cell_keeps_later_cells_in_their_column() {
    let body = r#"<decision id="d"><relation id="rel">
  <column id="a" name="A"/>
  <column id="b" name="B"/>
  <row id="r1">
    <filter id="f"/>
    <literalExpression id="l2"><text>second</text></literalExpression>
  </row>
</relation></decision>"#;

    let marshaller = DMNMarshaller::new(MarshallerSection::default());
    let graph = marshaller.unmarshal(Metadata::default(), &document(body)).unwrap();
    let Some(Expression::Relation(relation)) = decision_expression(&graph, "d") else {
        panic!("expected relation");
    };
    assert!(relation.row[0].expression[0].is_none());

    let xml = marshaller.marshal(&graph).unwrap();
    let again = marshaller.unmarshal(Metadata::default(), &xml).unwrap();
    let Some(Expression::Relation(relation)) = decision_expression(&again, "d") else {
        panic!("expected relation");
    };
    assert_eq!(relation.row[0].expression.len(), 2);
    let cells: Vec<Option<String>> = relation.row[0]
        .expression
        .iter()
        .map(|e| e.as_ref().and_then(Expression::as_literal).map(|l| l.text.clone()))
        .collect();
    assert_eq!(cells[1], Some("second".to_string()));
    assert_ne!(cells[0], Some("second".to_string()));
}

#[test]
fn test_decision_table_defaults_are_not_written() {
    let body = r#"<decision id="d"><decisionTable id="dt" hitPolicy="UNIQUE" preferredOrientation="Rule-as-Row">
  <input id="i1"><inputExpression id="ie"><text>age</text></inputExpression></input>
  <output id="o1" name="ok"/>
  <rule id="r1">
    <inputEntry id="e1"><text>&gt; 18</text></inputEntry>
    <outputEntry id="e2"><text>true</text></outputEntry>
  </rule>
</decisionTable></decision>"#;

    let marshaller = DMNMarshaller::new(MarshallerSection::default());
    let graph = marshaller.unmarshal(Metadata::default(), &document(body)).unwrap();
    let Some(Expression::DecisionTable(table)) = decision_expression(&graph, "d") else {
        panic!("expected decision table");
    };
    assert_eq!(table.hit_policy, HitPolicy::Unique);
    assert_eq!(table.rule[0].input_entry[0].text, "> 18");

    let xml = marshaller.marshal(&graph).unwrap();
    assert!(!xml.contains("hitPolicy"));
    assert!(!xml.contains("preferredOrientation"));
    assert!(xml.contains(r#"id="dt""#));
}

#[test]
fn test_bkm_function_kind_round_trips() {
    let body = r#"<businessKnowledgeModel id="k" name="Score">
  <encapsulatedLogic id="f" kind="PMML">
    <formalParameter id="p" name="x"/>
    <context id="body">
      <contextEntry><variable id="doc" name="document"/><literalExpression id="dl"><text>"model.pmml"</text></literalExpression></contextEntry>
    </context>
  </encapsulatedLogic>
</businessKnowledgeModel>"#;

    let marshaller = DMNMarshaller::new(MarshallerSection::default());
    let graph = marshaller.unmarshal(Metadata::default(), &document(body)).unwrap();
    let DRGElement::BusinessKnowledgeModel(bkm) = element(&graph, "k") else {
        panic!("expected business knowledge model");
    };
    let logic = bkm.encapsulated_logic.clone().unwrap();
    assert_eq!(logic.kind, FunctionKind::Pmml);
    assert_eq!(logic.formal_parameter.len(), 1);

    let xml = marshaller.marshal(&graph).unwrap();
    assert!(xml.contains(r#"kind="PMML""#));
    let again = marshaller.unmarshal(Metadata::default(), &xml).unwrap();
    assert_eq!(element(&again, "k"), DRGElement::BusinessKnowledgeModel(bkm));
}
