//! Integration tests for the grid mappers

use std::rc::Rc;

use dmn_editor_core::editors::{
    ContextUIModelMapper, DecisionTableSection, DecisionTableUIModelMapper, EditorType,
    ExpressionEditorDefinitions, InvocationUIModelMapper, RelationUIModelMapper,
};
use dmn_editor_core::grid::{ColumnKind, GridCellValue, GridData};
use dmn_editor_core::models::common::{Description, Id, InformationItem};
use dmn_editor_core::models::decision_table::{
    DecisionRule, DecisionTable, InputClause, OutputClause, UnaryTests,
};
use dmn_editor_core::models::expression::{
    Binding, Context, ContextEntry, Expression, Invocation, List, LiteralExpression, Relation,
};
use dmn_editor_core::{MapperError, UIModelMapper};

fn literal(id: &str, text: &str) -> Expression {
    Expression::LiteralExpression(LiteralExpression::new(Id::new(id), text))
}

fn two_in_one_out() -> DecisionTable {
    DecisionTable {
        input: vec![
            InputClause {
                input_expression: LiteralExpression::new(Id::new("ie0"), "age"),
                ..Default::default()
            },
            InputClause {
                input_expression: LiteralExpression::new(Id::new("ie1"), "income"),
                ..Default::default()
            },
        ],
        output: vec![OutputClause {
            name: "risk".to_string(),
            ..Default::default()
        }],
        rule: vec![
            DecisionRule {
                description: Description::new("young"),
                input_entry: vec![
                    UnaryTests::new(Id::default(), "< 25"),
                    UnaryTests::new(Id::default(), "-"),
                ],
                output_entry: vec![LiteralExpression::new(Id::default(), "\"high\"")],
                ..Default::default()
            },
            DecisionRule {
                input_entry: vec![
                    UnaryTests::new(Id::default(), ">= 25"),
                    UnaryTests::new(Id::default(), "> 1000"),
                ],
                output_entry: vec![LiteralExpression::new(Id::default(), "\"low\"")],
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

#[test]
fn test_decision_table_section_boundaries() {
    let table = two_in_one_out();
    assert_eq!(DecisionTableSection::of(&table, 0).unwrap(), DecisionTableSection::RowIndex);
    assert_eq!(
        DecisionTableSection::of(&table, 2).unwrap(),
        DecisionTableSection::InputClause(1)
    );
    assert_eq!(
        DecisionTableSection::of(&table, 3).unwrap(),
        DecisionTableSection::OutputClause(0)
    );
    assert_eq!(
        DecisionTableSection::of(&table, 4).unwrap(),
        DecisionTableSection::Description
    );
    assert!(matches!(
        DecisionTableSection::of(&table, 5),
        Err(MapperError::ColumnOutOfRange { column: 5, .. })
    ));
}

#[test]
fn test_decision_table_grid_layout() {
    let table = two_in_one_out();
    let grid = DecisionTableUIModelMapper.build_grid(&table).unwrap();

    let kinds: Vec<ColumnKind> = grid.columns().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ColumnKind::RowNumber,
            ColumnKind::InputClause,
            ColumnKind::InputClause,
            ColumnKind::OutputClause,
            ColumnKind::Description,
        ]
    );
    assert_eq!(grid.columns()[3].title, "risk");

    let first: Vec<String> = (0..5).map(|c| grid.cell_text(0, c)).collect();
    assert_eq!(first, vec!["1", "< 25", "-", "\"high\"", "young"]);
    assert_eq!(grid.cell_text(1, 0), "2");
}

#[test]
fn test_decision_table_writes_back_each_section() {
    let mut table = two_in_one_out();
    let mapper = DecisionTableUIModelMapper;
    mapper
        .to_domain_model(&mut table, 1, 2, Some(GridCellValue::text("> 2000")))
        .unwrap();
    mapper
        .to_domain_model(&mut table, 1, 3, Some(GridCellValue::text("\"medium\"")))
        .unwrap();
    mapper
        .to_domain_model(&mut table, 1, 4, Some(GridCellValue::text("established")))
        .unwrap();
    // row number cells are read-only
    mapper
        .to_domain_model(&mut table, 1, 0, Some(GridCellValue::text("9")))
        .unwrap();

    assert_eq!(table.rule[1].input_entry[1].text, "> 2000");
    assert_eq!(table.rule[1].output_entry[0].text, "\"medium\"");
    assert_eq!(table.rule[1].description.value(), "established");
    assert!(mapper.to_domain_model(&mut table, 2, 1, None).is_err());
}

#[test]
fn test_relation_maps_literal_cells_only() {
    let relation = Relation {
        column: vec![
            InformationItem::named(Id::new("c0"), "name"),
            InformationItem::named(Id::new("c1"), "age"),
        ],
        row: vec![List {
            expression: vec![Some(literal("l0", "\"Ann\"")), None],
            ..Default::default()
        }],
        ..Default::default()
    };
    let grid = RelationUIModelMapper.build_grid(&relation).unwrap();
    assert_eq!(grid.cell_text(0, 1), "\"Ann\"");
    assert!(grid.get_cell(0, 2).is_none());
    assert_eq!(grid.columns()[2].title, "age");
}

#[test]
fn test_context_rows_and_nested_editors() {
    let definitions = Rc::new(ExpressionEditorDefinitions::core());
    let context = Context {
        context_entry: vec![
            ContextEntry {
                variable: Some(InformationItem::named(Id::new("v"), "rates")),
                expression: Some(Expression::DecisionTable(two_in_one_out())),
            },
            ContextEntry {
                variable: None,
                expression: Some(literal("r", "rates")),
            },
        ],
        ..Default::default()
    };
    let mapper = ContextUIModelMapper::new(definitions).with_row_caption("result");
    let grid = mapper.build_grid(&context).unwrap();

    assert_eq!(grid.cell_text(0, 1), "rates");
    assert_eq!(grid.cell_text(1, 1), "result");
    let nested = grid.get_cell(0, 2).and_then(GridCellValue::as_editor).unwrap();
    assert_eq!(nested.editor_type, EditorType::DecisionTable);
    assert_eq!(
        nested.expression,
        Some(Expression::DecisionTable(two_in_one_out()))
    );
}

#[test]
fn test_invocation_rows_are_bindings() {
    let definitions = Rc::new(ExpressionEditorDefinitions::core());
    let invocation = Invocation {
        expression: Some(Box::new(literal("fn", "Score"))),
        binding: vec![
            Binding {
                parameter: InformationItem::named(Id::new("p0"), "x"),
                expression: Some(literal("b0", "1")),
            },
            Binding {
                parameter: InformationItem::named(Id::new("p1"), "y"),
                expression: None,
            },
        ],
        ..Default::default()
    };
    let mapper = InvocationUIModelMapper::new(definitions);
    let mut model = invocation.clone();
    let grid = mapper.build_grid(&model).unwrap();
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.cell_text(1, 1), "y");

    mapper
        .to_domain_model(&mut model, 1, 1, Some(GridCellValue::text("z")))
        .unwrap();
    assert_eq!(model.binding[1].parameter.name.value(), "z");
    assert_eq!(model.binding[0], invocation.binding[0]);
}
