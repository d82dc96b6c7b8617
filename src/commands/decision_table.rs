//! Decision table commands
//!
//! Clause commands keep every rule's entry lists the same length as the
//! clause lists. Row commands renumber the row-number column afterwards.

use tracing::debug;

use super::{CommandError, ExpressionCommand, out_of_range};
use crate::config::DefaultsSection;
use crate::editors::{ROW_INDEX_COLUMN_COUNT, UIModelMapper};
use crate::editors::decision_table::{
    DecisionTableSection, DecisionTableUIModelMapper, input_column, output_column,
};
use crate::grid::{
    ColumnId, ColumnKind, GridColumn, GridData, GridRow, RowId, check_move, move_indices_to,
    restore_indices, update_row_numbers,
};
use crate::models::common::{Description, Id};
use crate::models::decision_table::{
    DecisionRule, DecisionTable, InputClause, OutputClause, UnaryTests,
};
use crate::models::expression::LiteralExpression;

const MAPPER: DecisionTableUIModelMapper = DecisionTableUIModelMapper;

fn input_position(table: &DecisionTable, id: &Id) -> Result<usize, CommandError> {
    table
        .input
        .iter()
        .position(|c| &c.id == id)
        .ok_or_else(|| CommandError::InvalidArgument(format!("no input clause '{}'", id)))
}

fn output_position(table: &DecisionTable, id: &Id) -> Result<usize, CommandError> {
    table
        .output
        .iter()
        .position(|c| &c.id == id)
        .ok_or_else(|| CommandError::InvalidArgument(format!("no output clause '{}'", id)))
}

fn rule_position(table: &DecisionTable, id: &Id) -> Result<usize, CommandError> {
    table
        .rule
        .iter()
        .position(|r| &r.id == id)
        .ok_or_else(|| CommandError::InvalidArgument(format!("no decision rule '{}'", id)))
}

fn require_id(id: &Id, what: &str) -> Result<(), CommandError> {
    if id.is_empty() {
        return Err(CommandError::InvalidArgument(format!("{} needs an id", what)));
    }
    Ok(())
}

fn delete_column_by_id(grid: &mut dyn GridData, id: Option<ColumnId>) -> Result<(), CommandError> {
    if let Some(id) = id
        && let Some(index) = grid.column_index(id)
    {
        grid.delete_column(index)?;
    }
    Ok(())
}

fn delete_row_by_id(grid: &mut dyn GridData, id: Option<RowId>) -> Result<(), CommandError> {
    if let Some(id) = id
        && let Some(index) = grid.row_index(id)
    {
        grid.delete_row(index)?;
    }
    update_row_numbers(grid)?;
    Ok(())
}

/// Append an input clause, giving every rule a default input entry
pub struct AddInputClauseCommand {
    clause: InputClause,
    entry_text: String,
    column: Option<ColumnId>,
}

impl AddInputClauseCommand {
    pub fn new(clause: InputClause, defaults: &DefaultsSection) -> Self {
        Self {
            clause,
            entry_text: defaults.input_entry.clone(),
            column: None,
        }
    }
}

impl ExpressionCommand<DecisionTable> for AddInputClauseCommand {
    fn name(&self) -> &'static str {
        "add input clause"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        require_id(&self.clause.id, "input clause")?;
        if model.input.iter().any(|c| c.id == self.clause.id) {
            return Err(CommandError::InvalidArgument(format!(
                "input clause '{}' already exists",
                self.clause.id
            )));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        model.input.push(self.clause.clone());
        for rule in &mut model.rule {
            rule.input_entry
                .push(UnaryTests::new(Id::default(), self.entry_text.as_str()));
        }
        Ok(())
    }

    fn execute_canvas(
        &mut self,
        model: &DecisionTable,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        let index = input_column(input_position(model, &self.clause.id)?);
        let column = grid.new_column(ColumnKind::InputClause, &self.clause.input_expression.text);
        self.column = Some(column.id);
        grid.insert_column(index, column)?;
        MAPPER.refresh_column(model, grid, index)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let index = input_position(model, &self.clause.id)?;
        for rule in &mut model.rule {
            if index < rule.input_entry.len() {
                rule.input_entry.remove(index);
            }
        }
        model.input.remove(index);
        Ok(())
    }

    fn undo_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        delete_column_by_id(grid, self.column.take())
    }
}

/// Append an output clause, giving every rule a default output entry
pub struct AddOutputClauseCommand {
    clause: OutputClause,
    entry_text: String,
    column: Option<ColumnId>,
}

impl AddOutputClauseCommand {
    pub fn new(clause: OutputClause, defaults: &DefaultsSection) -> Self {
        Self {
            clause,
            entry_text: defaults.output_entry.clone(),
            column: None,
        }
    }
}

impl ExpressionCommand<DecisionTable> for AddOutputClauseCommand {
    fn name(&self) -> &'static str {
        "add output clause"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        require_id(&self.clause.id, "output clause")?;
        if model.output.iter().any(|c| c.id == self.clause.id) {
            return Err(CommandError::InvalidArgument(format!(
                "output clause '{}' already exists",
                self.clause.id
            )));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        model.output.push(self.clause.clone());
        for rule in &mut model.rule {
            rule.output_entry
                .push(LiteralExpression::new(Id::default(), self.entry_text.as_str()));
        }
        Ok(())
    }

    fn execute_canvas(
        &mut self,
        model: &DecisionTable,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        let index = output_column(model, output_position(model, &self.clause.id)?);
        let column = grid.new_column(ColumnKind::OutputClause, &self.clause.name);
        self.column = Some(column.id);
        grid.insert_column(index, column)?;
        MAPPER.refresh_column(model, grid, index)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let index = output_position(model, &self.clause.id)?;
        for rule in &mut model.rule {
            if index < rule.output_entry.len() {
                rule.output_entry.remove(index);
            }
        }
        model.output.remove(index);
        Ok(())
    }

    fn undo_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        delete_column_by_id(grid, self.column.take())
    }
}

/// Insert a rule filled with default entries
pub struct AddDecisionRuleCommand {
    rule_id: Id,
    index: usize,
    defaults: DefaultsSection,
    row: Option<RowId>,
}

impl AddDecisionRuleCommand {
    pub fn new(rule_id: Id, index: usize, defaults: &DefaultsSection) -> Self {
        Self {
            rule_id,
            index,
            defaults: defaults.clone(),
            row: None,
        }
    }
}

impl ExpressionCommand<DecisionTable> for AddDecisionRuleCommand {
    fn name(&self) -> &'static str {
        "add decision rule"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        require_id(&self.rule_id, "decision rule")?;
        if model.rule.iter().any(|r| r.id == self.rule_id) {
            return Err(CommandError::InvalidArgument(format!(
                "decision rule '{}' already exists",
                self.rule_id
            )));
        }
        if self.index > model.rule.len() {
            return Err(out_of_range("decision rules", self.index));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let rule = DecisionRule {
            id: self.rule_id.clone(),
            description: Description::new(self.defaults.rule_description.as_str()),
            input_entry: model
                .input
                .iter()
                .map(|_| UnaryTests::new(Id::default(), self.defaults.input_entry.as_str()))
                .collect(),
            output_entry: model
                .output
                .iter()
                .map(|_| LiteralExpression::new(Id::default(), self.defaults.output_entry.as_str()))
                .collect(),
        };
        model.rule.insert(self.index, rule);
        Ok(())
    }

    fn execute_canvas(
        &mut self,
        model: &DecisionTable,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        let index = rule_position(model, &self.rule_id)?;
        let row = grid.new_row();
        self.row = Some(row.id);
        grid.insert_row(index, row)?;
        MAPPER.refresh_row(model, grid, index)?;
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let index = rule_position(model, &self.rule_id)?;
        model.rule.remove(index);
        Ok(())
    }

    fn undo_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        delete_row_by_id(grid, self.row.take())
    }
}

/// Delete the input clause rendered in grid column `column`
pub struct DeleteInputClauseCommand {
    column: usize,
    removed: Option<(usize, InputClause, Vec<Option<UnaryTests>>)>,
    removed_column: Option<GridColumn>,
}

impl DeleteInputClauseCommand {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            removed: None,
            removed_column: None,
        }
    }

    fn clause_index(&self, model: &DecisionTable) -> Result<usize, CommandError> {
        match DecisionTableSection::of(model, self.column)? {
            DecisionTableSection::InputClause(i) => Ok(i),
            _ => Err(CommandError::InvalidArgument(format!(
                "column {} is not an input clause",
                self.column
            ))),
        }
    }
}

impl ExpressionCommand<DecisionTable> for DeleteInputClauseCommand {
    fn name(&self) -> &'static str {
        "delete input clause"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        self.clause_index(model).map(|_| ())
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let index = self.clause_index(model)?;
        let clause = model.input.remove(index);
        let entries = model
            .rule
            .iter_mut()
            .map(|rule| (index < rule.input_entry.len()).then(|| rule.input_entry.remove(index)))
            .collect();
        self.removed = Some((index, clause, entries));
        Ok(())
    }

    fn execute_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.removed_column = Some(grid.delete_column(self.column)?);
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        if let Some((index, clause, entries)) = self.removed.take() {
            model.input.insert(index, clause);
            for (rule, entry) in model.rule.iter_mut().zip(entries) {
                if let Some(entry) = entry {
                    rule.input_entry.insert(index, entry);
                }
            }
        }
        Ok(())
    }

    fn undo_canvas(
        &mut self,
        model: &DecisionTable,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        if let Some(column) = self.removed_column.take() {
            grid.insert_column(self.column, column)?;
            MAPPER.refresh_column(model, grid, self.column)?;
        }
        Ok(())
    }
}

/// Delete the output clause rendered in grid column `column`
pub struct DeleteOutputClauseCommand {
    column: usize,
    removed: Option<(usize, OutputClause, Vec<Option<LiteralExpression>>)>,
    removed_column: Option<GridColumn>,
}

impl DeleteOutputClauseCommand {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            removed: None,
            removed_column: None,
        }
    }

    fn clause_index(&self, model: &DecisionTable) -> Result<usize, CommandError> {
        match DecisionTableSection::of(model, self.column)? {
            DecisionTableSection::OutputClause(i) => Ok(i),
            _ => Err(CommandError::InvalidArgument(format!(
                "column {} is not an output clause",
                self.column
            ))),
        }
    }
}

impl ExpressionCommand<DecisionTable> for DeleteOutputClauseCommand {
    fn name(&self) -> &'static str {
        "delete output clause"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        self.clause_index(model).map(|_| ())
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let index = self.clause_index(model)?;
        let clause = model.output.remove(index);
        let entries = model
            .rule
            .iter_mut()
            .map(|rule| (index < rule.output_entry.len()).then(|| rule.output_entry.remove(index)))
            .collect();
        self.removed = Some((index, clause, entries));
        Ok(())
    }

    fn execute_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.removed_column = Some(grid.delete_column(self.column)?);
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        if let Some((index, clause, entries)) = self.removed.take() {
            model.output.insert(index, clause);
            for (rule, entry) in model.rule.iter_mut().zip(entries) {
                if let Some(entry) = entry {
                    rule.output_entry.insert(index, entry);
                }
            }
        }
        Ok(())
    }

    fn undo_canvas(
        &mut self,
        model: &DecisionTable,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        if let Some(column) = self.removed_column.take() {
            grid.insert_column(self.column, column)?;
            MAPPER.refresh_column(model, grid, self.column)?;
        }
        Ok(())
    }
}

/// Delete the rule in grid row `row`
pub struct DeleteDecisionRuleCommand {
    row: usize,
    removed_rule: Option<DecisionRule>,
    removed_row: Option<GridRow>,
}

impl DeleteDecisionRuleCommand {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            removed_rule: None,
            removed_row: None,
        }
    }
}

impl ExpressionCommand<DecisionTable> for DeleteDecisionRuleCommand {
    fn name(&self) -> &'static str {
        "delete decision rule"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        if self.row >= model.rule.len() {
            return Err(out_of_range("decision rules", self.row));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        self.removed_rule = Some(model.rule.remove(self.row));
        Ok(())
    }

    fn execute_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.removed_row = Some(grid.delete_row(self.row)?);
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        if let Some(rule) = self.removed_rule.take() {
            model.rule.insert(self.row, rule);
        }
        Ok(())
    }

    fn undo_canvas(
        &mut self,
        model: &DecisionTable,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        if let Some(row) = self.removed_row.take() {
            grid.insert_row(self.row, row)?;
            MAPPER.refresh_row(model, grid, self.row)?;
        }
        update_row_numbers(grid)?;
        Ok(())
    }
}

/// Move rules, as a contiguous block, to grid row `target`
pub struct MoveRowsCommand {
    target: usize,
    rows: Vec<usize>,
    block_start: Option<usize>,
    previous_order: Vec<RowId>,
}

impl MoveRowsCommand {
    pub fn new(target: usize, rows: Vec<usize>) -> Self {
        Self {
            target,
            rows,
            block_start: None,
            previous_order: Vec::new(),
        }
    }
}

impl ExpressionCommand<DecisionTable> for MoveRowsCommand {
    fn name(&self) -> &'static str {
        "move decision rules"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        Ok(check_move(model.rule.len(), self.target, &self.rows)?)
    }

    fn allow_canvas(&self, _: &DecisionTable, grid: &dyn GridData) -> Result<(), CommandError> {
        Ok(check_move(grid.row_count(), self.target, &self.rows)?)
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        self.block_start = Some(move_indices_to(&mut model.rule, self.target, &self.rows)?);
        Ok(())
    }

    fn execute_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.previous_order = grid.rows().iter().map(|r| r.id).collect();
        let ids: Vec<RowId> = self.rows.iter().map(|&i| self.previous_order[i]).collect();
        grid.move_rows_to(self.target, &ids)?;
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        if let Some(start) = self.block_start.take() {
            restore_indices(&mut model.rule, start, &self.rows);
        }
        Ok(())
    }

    fn undo_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        grid.reorder_rows(&self.previous_order)?;
        update_row_numbers(grid)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseSide {
    Input,
    Output,
}

/// Move clause columns within the input or the output section
pub struct MoveColumnsCommand {
    target: usize,
    columns: Vec<usize>,
    moved: Option<(ClauseSide, usize, Vec<usize>)>,
    previous_order: Vec<ColumnId>,
}

impl MoveColumnsCommand {
    pub fn new(target: usize, columns: Vec<usize>) -> Self {
        Self {
            target,
            columns,
            moved: None,
            previous_order: Vec::new(),
        }
    }

    /// Clause side, clause indices and clause target of this move
    fn plan(&self, model: &DecisionTable) -> Result<(ClauseSide, Vec<usize>, usize), CommandError> {
        let side_of = |column: usize| -> Result<(ClauseSide, usize), CommandError> {
            match DecisionTableSection::of(model, column)? {
                DecisionTableSection::InputClause(i) => Ok((ClauseSide::Input, i)),
                DecisionTableSection::OutputClause(i) => Ok((ClauseSide::Output, i)),
                DecisionTableSection::RowIndex => Err(CommandError::InvalidArgument(
                    "the row number column cannot be moved".to_string(),
                )),
                DecisionTableSection::Description => Err(CommandError::InvalidArgument(
                    "the description column cannot be moved".to_string(),
                )),
            }
        };

        let (side, target) = side_of(self.target)?;
        let mut indices = Vec::with_capacity(self.columns.len());
        for &column in &self.columns {
            let (column_side, index) = side_of(column)?;
            if column_side != side {
                return Err(CommandError::InvalidArgument(format!(
                    "column {} cannot move across the input/output boundary to {}",
                    column, self.target
                )));
            }
            indices.push(index);
        }
        let len = match side {
            ClauseSide::Input => model.input.len(),
            ClauseSide::Output => model.output.len(),
        };
        check_move(len, target, &indices)?;
        if let Some(rule) = model.first_inconsistent_rule() {
            return Err(CommandError::InvalidArgument(format!(
                "rule {} does not match the clause lists",
                rule
            )));
        }
        Ok((side, indices, target))
    }
}

impl ExpressionCommand<DecisionTable> for MoveColumnsCommand {
    fn name(&self) -> &'static str {
        "move clause columns"
    }

    fn allow_graph(&self, model: &DecisionTable) -> Result<(), CommandError> {
        self.plan(model).map(|_| ())
    }

    fn allow_canvas(&self, _: &DecisionTable, grid: &dyn GridData) -> Result<(), CommandError> {
        Ok(check_move(grid.column_count(), self.target, &self.columns)?)
    }

    fn execute_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        let (side, indices, target) = self.plan(model)?;
        let start = match side {
            ClauseSide::Input => {
                for rule in &mut model.rule {
                    move_indices_to(&mut rule.input_entry, target, &indices)?;
                }
                move_indices_to(&mut model.input, target, &indices)?
            }
            ClauseSide::Output => {
                for rule in &mut model.rule {
                    move_indices_to(&mut rule.output_entry, target, &indices)?;
                }
                move_indices_to(&mut model.output, target, &indices)?
            }
        };
        debug!("Moved {} {:?} clause(s) to {}", indices.len(), side, start);
        self.moved = Some((side, start, indices));
        Ok(())
    }

    fn execute_canvas(&mut self, model: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        let (side, indices, target) = self.plan(model)?;
        let (offset, len) = match side {
            ClauseSide::Input => (ROW_INDEX_COLUMN_COUNT, model.input.len()),
            ClauseSide::Output => (
                ROW_INDEX_COLUMN_COUNT + model.input.len(),
                model.output.len(),
            ),
        };
        self.previous_order = grid.columns().iter().map(|c| c.id).collect();
        grid.move_columns_within(offset..offset + len, target, &indices)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut DecisionTable) -> Result<(), CommandError> {
        if let Some((side, start, indices)) = self.moved.take() {
            match side {
                ClauseSide::Input => {
                    restore_indices(&mut model.input, start, &indices);
                    for rule in &mut model.rule {
                        restore_indices(&mut rule.input_entry, start, &indices);
                    }
                }
                ClauseSide::Output => {
                    restore_indices(&mut model.output, start, &indices);
                    for rule in &mut model.rule {
                        restore_indices(&mut rule.output_entry, start, &indices);
                    }
                }
            }
        }
        Ok(())
    }

    fn undo_canvas(&mut self, _: &DecisionTable, grid: &mut dyn GridData) -> Result<(), CommandError> {
        grid.reorder_columns(&self.previous_order)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(inputs: usize, outputs: usize, rules: usize) -> DecisionTable {
        DecisionTable {
            input: (0..inputs)
                .map(|i| InputClause {
                    id: Id::new(format!("in{}", i)),
                    ..Default::default()
                })
                .collect(),
            output: (0..outputs)
                .map(|i| OutputClause {
                    id: Id::new(format!("out{}", i)),
                    name: format!("out{}", i),
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

    fn input_ids(table: &DecisionTable) -> Vec<&str> {
        table.input.iter().map(|c| c.id.value()).collect()
    }

    #[test]
    fn test_add_input_clause_and_undo() {
        let mut model = table(1, 1, 2);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let clause = InputClause {
            id: Id::new("new"),
            ..Default::default()
        };
        let mut command = AddInputClauseCommand::new(clause, &DefaultsSection::default());
        command.execute(&mut model, &mut grid).unwrap();

        assert_eq!(input_ids(&model), vec!["in0", "new"]);
        assert!(model.first_inconsistent_rule().is_none());
        assert_eq!(grid.column_count(), 5);
        assert_eq!(grid.cell_text(1, 2), "unary test");

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, table(1, 1, 2));
        let rebuilt = MAPPER.build_grid(&table(1, 1, 2)).unwrap();
        assert_eq!(grid.columns(), rebuilt.columns());
        assert_eq!(grid.rows(), rebuilt.rows());
    }

    #[test]
    fn test_add_rule_renumbers() {
        let mut model = table(1, 1, 2);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let mut command = AddDecisionRuleCommand::new(Id::new("first"), 0, &DefaultsSection::default());
        command.execute(&mut model, &mut grid).unwrap();

        assert_eq!(model.rule[0].id.value(), "first");
        assert_eq!(model.rule[0].description.value(), "A rule");
        assert_eq!(model.rule[0].output_entry[0].text, "literal expression");
        let numbers: Vec<String> = (0..3).map(|r| grid.cell_text(r, 0)).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_delete_output_clause_undo_restores_cells() {
        let original = table(2, 2, 2);
        let mut model = original.clone();
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();

        let mut command = DeleteOutputClauseCommand::new(4);
        command.execute(&mut model, &mut grid).unwrap();
        assert_eq!(model.output.len(), 1);
        assert_eq!(model.rule[1].output_entry[0].text, "r1o0");
        assert_eq!(grid.column_count(), 5);

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, original);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_delete_input_clause_rejects_output_column() {
        let mut model = table(2, 2, 1);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let result = DeleteInputClauseCommand::new(3).execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
        assert_eq!(model, table(2, 2, 1));
    }

    #[test]
    fn test_move_single_input_up() {
        let mut model = table(3, 1, 1);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let mut command = MoveColumnsCommand::new(1, vec![3]);
        command.execute(&mut model, &mut grid).unwrap();
        assert_eq!(input_ids(&model), vec!["in2", "in0", "in1"]);
        assert_eq!(model.rule[0].input_entry[0].text, "r0i2");
        assert_eq!(grid.cell_text(0, 1), "r0i2");
    }

    #[test]
    fn test_move_whole_input_section_keeps_layout() {
        let original = table(3, 1, 2);
        let mut model = original.clone();
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();
        let mut command = MoveColumnsCommand::new(2, vec![1, 2, 3]);
        command.execute(&mut model, &mut grid).unwrap();

        assert_eq!(model, original);
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
        assert_eq!(grid, before);

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, original);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_move_output_block_stays_after_inputs() {
        let mut model = table(2, 3, 1);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let mut command = MoveColumnsCommand::new(3, vec![4, 5]);
        command.execute(&mut model, &mut grid).unwrap();

        let outputs: Vec<&str> = model.output.iter().map(|c| c.id.value()).collect();
        assert_eq!(outputs, vec!["out1", "out2", "out0"]);
        let texts: Vec<String> = (3..6).map(|c| grid.cell_text(0, c)).collect();
        assert_eq!(texts, vec!["r0o1", "r0o2", "r0o0"]);
        assert_eq!(grid.cell_text(0, 1), "r0i0");
        assert_eq!(grid.columns()[6].kind, ColumnKind::Description);
    }

    #[test]
    fn test_duplicate_rule_id_is_rejected() {
        let original = table(1, 1, 2);
        let mut model = original.clone();
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();
        let result = AddDecisionRuleCommand::new(Id::new("rule0"), 2, &DefaultsSection::default())
            .execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
        assert_eq!(model, original);
        assert_eq!(grid, before);
    }
}
