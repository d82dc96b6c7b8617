//! Integration tests for grid edit commands and the command manager

use dmn_editor_core::commands::{
    AddDecisionRuleCommand, AddInputClauseCommand, AddRelationColumnCommand,
    AddRelationRowCommand, DeleteDecisionRuleCommand, MoveColumnsCommand,
    MoveRelationColumnsCommand, MoveRelationRowsCommand, MoveRowsCommand, SetCellValueCommand,
};
use dmn_editor_core::config::DefaultsSection;
use dmn_editor_core::editors::{DecisionTableUIModelMapper, RelationUIModelMapper};
use dmn_editor_core::grid::{ColumnKind, DMNGridData, GridCellValue, GridData};
use dmn_editor_core::models::common::{Id, InformationItem};
use dmn_editor_core::models::decision_table::{
    DecisionRule, DecisionTable, InputClause, OutputClause, UnaryTests,
};
use dmn_editor_core::models::expression::{Expression, List, LiteralExpression, Relation};
use dmn_editor_core::{
    CommandError, CommandManager, ExpressionCommand, SessionState, UIModelMapper,
};

fn table(inputs: usize, outputs: usize, rules: usize) -> DecisionTable {
    DecisionTable {
        id: Id::new("dt"),
        input: (0..inputs)
            .map(|i| InputClause {
                id: Id::new(format!("in{}", i)),
                ..Default::default()
            })
            .collect(),
        output: (0..outputs)
            .map(|o| OutputClause {
                id: Id::new(format!("out{}", o)),
                name: format!("out{}", o),
                ..Default::default()
            })
            .collect(),
        rule: (0..rules)
            .map(|r| DecisionRule {
                id: Id::new(format!("rule{}", r)),
                input_entry: (0..inputs)
                    .map(|i| UnaryTests::new(Id::default(), format!("r{}i{}", r, i)))
                    .collect(),
                output_entry: (0..outputs)
                    .map(|o| LiteralExpression::new(Id::default(), format!("r{}o{}", r, o)))
                    .collect(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn setup(model: &DecisionTable) -> DMNGridData {
    DecisionTableUIModelMapper.build_grid(model).unwrap()
}

fn rule_ids(model: &DecisionTable) -> Vec<&str> {
    model.rule.iter().map(|r| r.id.value()).collect()
}

fn row_numbers(grid: &DMNGridData) -> Vec<String> {
    (0..grid.row_count()).map(|r| grid.cell_text(r, 0)).collect()
}

/// Grid and model agree cell by cell
fn assert_synchronised(model: &DecisionTable, grid: &DMNGridData) {
    let rebuilt = setup(model);
    assert_eq!(grid.column_count(), rebuilt.column_count());
    assert_eq!(grid.row_count(), rebuilt.row_count());
    for row in 0..grid.row_count() {
        for column in 0..grid.column_count() {
            assert_eq!(
                grid.cell_text(row, column),
                rebuilt.cell_text(row, column),
                "cell ({}, {})",
                row,
                column
            );
        }
    }
}

#[test]
fn test_moving_input_into_outputs_is_rejected() {
    let original = table(3, 3, 2);
    let mut model = original.clone();
    let mut grid = setup(&model);
    let before = grid.clone();

    let result = MoveColumnsCommand::new(4, vec![1]).execute(&mut model, &mut grid);

    assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    assert_eq!(model, original);
    assert_eq!(grid, before);
}

#[test]
fn test_moving_row_number_column_is_rejected() {
    let mut model = table(2, 1, 1);
    let mut grid = setup(&model);
    let result = MoveColumnsCommand::new(2, vec![0]).execute(&mut model, &mut grid);
    assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    assert_eq!(model, table(2, 1, 1));
}

#[test]
fn test_moving_whole_input_section_keeps_grid_layout() {
    let original = table(3, 1, 2);
    let mut model = original.clone();
    let mut grid = setup(&model);
    let before = grid.clone();
    let session = SessionState::new();
    let mut manager: CommandManager<DecisionTable> = CommandManager::new();

    manager
        .execute(
            Box::new(MoveColumnsCommand::new(2, vec![1, 2, 3])),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    let kinds: Vec<ColumnKind> = grid.columns().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ColumnKind::RowNumber,
            ColumnKind::InputClause,
            ColumnKind::InputClause,
            ColumnKind::InputClause,
            ColumnKind::OutputClause,
            ColumnKind::Description,
        ]
    );
    assert_synchronised(&model, &grid);

    manager.undo(&mut model, &mut grid, &session).unwrap();
    assert_eq!(model, original);
    assert_eq!(grid, before);
}

#[test]
fn test_moving_inputs_before_first_input() {
    let mut model = table(3, 1, 1);
    let mut grid = setup(&model);
    MoveColumnsCommand::new(1, vec![2, 3])
        .execute(&mut model, &mut grid)
        .unwrap();
    let ids: Vec<&str> = model.input.iter().map(|c| c.id.value()).collect();
    assert_eq!(ids, vec!["in1", "in2", "in0"]);
    assert_eq!(grid.cell_text(0, 0), "1");
    assert_synchronised(&model, &grid);
}

#[test]
fn test_duplicate_rule_id_is_rejected() {
    let original = table(1, 1, 2);
    let mut model = original.clone();
    let mut grid = setup(&model);
    let before = grid.clone();
    let session = SessionState::new();
    let mut manager: CommandManager<DecisionTable> = CommandManager::new();

    let result = manager.execute(
        Box::new(AddDecisionRuleCommand::new(
            Id::new("rule0"),
            2,
            &DefaultsSection::default(),
        )),
        &mut model,
        &mut grid,
        &session,
    );
    assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    assert_eq!(rule_ids(&model), vec!["rule0", "rule1"]);
    assert_eq!(grid, before);
    assert!(matches!(
        manager.undo(&mut model, &mut grid, &session),
        Err(CommandError::NothingToUndo)
    ));
    assert_eq!(model, original);
}

#[test]
fn test_move_last_rule_to_top_renumbers() {
    let original = table(1, 1, 3);
    let mut model = original.clone();
    let mut grid = setup(&model);
    let before = grid.clone();

    let mut command = MoveRowsCommand::new(0, vec![2]);
    command.execute(&mut model, &mut grid).unwrap();

    assert_eq!(rule_ids(&model), vec!["rule2", "rule0", "rule1"]);
    assert_eq!(row_numbers(&grid), vec!["1", "2", "3"]);
    assert_eq!(grid.cell_text(0, 1), "r2i0");
    assert_synchronised(&model, &grid);

    command.undo(&mut model, &mut grid).unwrap();
    assert_eq!(model, original);
    assert_eq!(grid, before);
}

#[test]
fn test_move_rows_down_places_block_after_target() {
    let mut model = table(1, 1, 4);
    let mut grid = setup(&model);
    MoveRowsCommand::new(3, vec![0, 1])
        .execute(&mut model, &mut grid)
        .unwrap();
    assert_eq!(rule_ids(&model), vec!["rule2", "rule3", "rule0", "rule1"]);
    assert_eq!(row_numbers(&grid), vec!["1", "2", "3", "4"]);
    assert_synchronised(&model, &grid);
}

#[test]
fn test_clause_and_entry_counts_stay_consistent() {
    let defaults = DefaultsSection::default();
    let original = table(2, 2, 3);
    let mut model = original.clone();
    let mut grid = setup(&model);
    let before = grid.clone();
    let session = SessionState::new();
    let mut manager: CommandManager<DecisionTable> = CommandManager::new();

    let clause = InputClause {
        id: Id::new("extra"),
        ..Default::default()
    };
    manager
        .execute(
            Box::new(AddInputClauseCommand::new(clause, &defaults)),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    manager
        .execute(
            Box::new(AddDecisionRuleCommand::new(Id::new("fresh"), 1, &defaults)),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    manager
        .execute(
            Box::new(MoveColumnsCommand::new(1, vec![3])),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    manager
        .execute(
            Box::new(DeleteDecisionRuleCommand::new(0)),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();

    assert!(model.first_inconsistent_rule().is_none());
    assert_eq!(model.input[0].id.value(), "extra");
    assert_eq!(rule_ids(&model), vec!["fresh", "rule1", "rule2"]);
    assert_eq!(model.rule[0].input_entry[0].text, defaults.input_entry);
    assert_synchronised(&model, &grid);

    while manager.can_undo() {
        manager.undo(&mut model, &mut grid, &session).unwrap();
        assert!(model.first_inconsistent_rule().is_none());
        assert_synchronised(&model, &grid);
    }
    assert_eq!(model, original);
    assert_eq!(grid.columns(), before.columns());
    assert_eq!(grid.rows(), before.rows());

    manager.redo(&mut model, &mut grid, &session).unwrap();
    assert_eq!(model.input.len(), 3);
    assert!(manager.can_redo());
}

#[test]
fn test_manager_vetoes_while_editing() {
    let mut model = table(1, 1, 1);
    let mut grid = setup(&model);
    let mut session = SessionState::new();
    let mut manager: CommandManager<DecisionTable> = CommandManager::new();

    session.begin_edit(0, 1);
    let result = manager.execute(
        Box::new(SetCellValueCommand::new(
            DecisionTableUIModelMapper,
            0,
            1,
            Some(GridCellValue::text("changed")),
        )),
        &mut model,
        &mut grid,
        &session,
    );
    assert!(matches!(result, Err(CommandError::Vetoed(_))));
    assert_eq!(model, table(1, 1, 1));
    assert!(!manager.can_undo());

    session.end_edit();
    manager
        .execute(
            Box::new(SetCellValueCommand::new(
                DecisionTableUIModelMapper,
                0,
                1,
                Some(GridCellValue::text("changed")),
            )),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    assert_eq!(model.rule[0].input_entry[0].text, "changed");
    assert!(matches!(
        manager.redo(&mut model, &mut grid, &session),
        Err(CommandError::NothingToRedo)
    ));
}

fn relation(rows: usize) -> Relation {
    Relation {
        column: vec![InformationItem::named(Id::new("c0"), "name")],
        row: (0..rows)
            .map(|r| List {
                id: Id::new(format!("row{}", r)),
                expression: vec![Some(Expression::LiteralExpression(LiteralExpression::new(
                    Id::new(format!("l{}", r)),
                    format!("v{}", r),
                )))],
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn test_relation_column_add_then_row_move() {
    let defaults = DefaultsSection {
        relation_cell: "?".to_string(),
        ..Default::default()
    };
    let original = relation(3);
    let mut model = original.clone();
    let mut grid = RelationUIModelMapper.build_grid(&model).unwrap();
    let session = SessionState::new();
    let mut manager: CommandManager<Relation> = CommandManager::new();

    manager
        .execute(
            Box::new(AddRelationColumnCommand::new(
                InformationItem::named(Id::new("c1"), "age"),
                2,
                &defaults,
            )),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    assert!(model.row.iter().all(|r| r.expression.len() == 2));
    assert_eq!(grid.cell_text(1, 2), "?");

    manager
        .execute(
            Box::new(MoveRelationRowsCommand::new(0, vec![2])),
            &mut model,
            &mut grid,
            &session,
        )
        .unwrap();
    let ids: Vec<&str> = model.row.iter().map(|r| r.id.value()).collect();
    assert_eq!(ids, vec!["row2", "row0", "row1"]);
    assert_eq!(grid.cell_text(0, 1), "v2");
    assert_eq!(grid.cell_text(0, 0), "1");

    manager.undo(&mut model, &mut grid, &session).unwrap();
    manager.undo(&mut model, &mut grid, &session).unwrap();
    assert_eq!(model, original);
    assert!(matches!(
        manager.undo(&mut model, &mut grid, &session),
        Err(CommandError::NothingToUndo)
    ));
}

#[test]
fn test_moving_every_relation_column_keeps_row_numbers_first() {
    let defaults = DefaultsSection::default();
    let mut model = relation(2);
    let mut grid = RelationUIModelMapper.build_grid(&model).unwrap();
    AddRelationColumnCommand::new(InformationItem::named(Id::new("c1"), "age"), 2, &defaults)
        .execute(&mut model, &mut grid)
        .unwrap();
    let original = model.clone();
    let before = grid.clone();

    let mut command = MoveRelationColumnsCommand::new(2, vec![1, 2]);
    command.execute(&mut model, &mut grid).unwrap();
    assert_eq!(model, original);
    assert_eq!(grid.columns()[0].kind, ColumnKind::RowNumber);
    assert_eq!(grid.cell_text(1, 0), "2");
    assert_eq!(grid.cell_text(1, 1), "v1");

    command.undo(&mut model, &mut grid).unwrap();
    assert_eq!(grid, before);
}

#[test]
fn test_duplicate_relation_row_is_rejected() {
    let original = relation(2);
    let mut model = original.clone();
    let mut grid = RelationUIModelMapper.build_grid(&model).unwrap();
    let before = grid.clone();

    let result = AddRelationRowCommand::new(Id::new("row0"), 2, &DefaultsSection::default())
        .execute(&mut model, &mut grid);
    assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    assert_eq!(model, original);
    assert_eq!(grid, before);
}
