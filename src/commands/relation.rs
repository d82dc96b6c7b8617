//! Relation commands

use super::{CommandError, ExpressionCommand, out_of_range};
use crate::config::DefaultsSection;
use crate::editors::UIModelMapper;
use crate::editors::relation::{RelationSection, RelationUIModelMapper};
use crate::editors::ROW_INDEX_COLUMN_COUNT;
use crate::grid::{
    ColumnId, ColumnKind, GridColumn, GridData, GridRow, RowId, check_move, move_indices_to,
    restore_indices, update_row_numbers,
};
use crate::models::common::{Id, InformationItem};
use crate::models::expression::{Expression, List, LiteralExpression, Relation};

const MAPPER: RelationUIModelMapper = RelationUIModelMapper;

fn default_cell(text: &str) -> Option<Expression> {
    Some(Expression::LiteralExpression(LiteralExpression::new(
        Id::default(),
        text,
    )))
}

fn column_position(relation: &Relation, id: &Id) -> Result<usize, CommandError> {
    relation
        .column
        .iter()
        .position(|c| &c.id == id)
        .ok_or_else(|| CommandError::InvalidArgument(format!("no relation column '{}'", id)))
}

fn row_position(relation: &Relation, id: &Id) -> Result<usize, CommandError> {
    relation
        .row
        .iter()
        .position(|r| &r.id == id)
        .ok_or_else(|| CommandError::InvalidArgument(format!("no relation row '{}'", id)))
}

fn column_index(relation: &Relation, column: usize) -> Result<usize, CommandError> {
    match RelationSection::of(relation, column)? {
        RelationSection::InformationItem(i) => Ok(i),
        RelationSection::RowIndex => Err(CommandError::InvalidArgument(
            "the row number column is not a relation column".to_string(),
        )),
    }
}

/// Insert a column at grid column `index`, filling every row with a default cell
pub struct AddRelationColumnCommand {
    column: InformationItem,
    index: usize,
    cell_text: String,
    grid_column: Option<ColumnId>,
}

impl AddRelationColumnCommand {
    pub fn new(column: InformationItem, index: usize, defaults: &DefaultsSection) -> Self {
        Self {
            column,
            index,
            cell_text: defaults.relation_cell.clone(),
            grid_column: None,
        }
    }
}

impl ExpressionCommand<Relation> for AddRelationColumnCommand {
    fn name(&self) -> &'static str {
        "add relation column"
    }

    fn allow_graph(&self, model: &Relation) -> Result<(), CommandError> {
        if self.column.id.is_empty() {
            return Err(CommandError::InvalidArgument(
                "relation column needs an id".to_string(),
            ));
        }
        if model.column.iter().any(|c| c.id == self.column.id) {
            return Err(CommandError::InvalidArgument(format!(
                "relation column '{}' already exists",
                self.column.id
            )));
        }
        if self.index < ROW_INDEX_COLUMN_COUNT
            || self.index > ROW_INDEX_COLUMN_COUNT + model.column.len()
        {
            return Err(out_of_range("relation columns", self.index));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        let index = self.index - ROW_INDEX_COLUMN_COUNT;
        model.column.insert(index, self.column.clone());
        for row in &mut model.row {
            let at = index.min(row.expression.len());
            row.expression.insert(at, default_cell(&self.cell_text));
        }
        Ok(())
    }

    fn execute_canvas(&mut self, model: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        let index = ROW_INDEX_COLUMN_COUNT + column_position(model, &self.column.id)?;
        let column = grid.new_column(ColumnKind::RelationColumn, self.column.name.value());
        self.grid_column = Some(column.id);
        grid.insert_column(index, column)?;
        MAPPER.refresh_column(model, grid, index)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        let index = column_position(model, &self.column.id)?;
        for row in &mut model.row {
            if index < row.expression.len() {
                row.expression.remove(index);
            }
        }
        model.column.remove(index);
        Ok(())
    }

    fn undo_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        if let Some(id) = self.grid_column.take()
            && let Some(index) = grid.column_index(id)
        {
            grid.delete_column(index)?;
        }
        Ok(())
    }
}

/// Insert a row of default cells at grid row `index`
pub struct AddRelationRowCommand {
    row_id: Id,
    index: usize,
    cell_text: String,
    grid_row: Option<RowId>,
}

impl AddRelationRowCommand {
    pub fn new(row_id: Id, index: usize, defaults: &DefaultsSection) -> Self {
        Self {
            row_id,
            index,
            cell_text: defaults.relation_cell.clone(),
            grid_row: None,
        }
    }
}

impl ExpressionCommand<Relation> for AddRelationRowCommand {
    fn name(&self) -> &'static str {
        "add relation row"
    }

    fn allow_graph(&self, model: &Relation) -> Result<(), CommandError> {
        if self.row_id.is_empty() {
            return Err(CommandError::InvalidArgument(
                "relation row needs an id".to_string(),
            ));
        }
        if model.row.iter().any(|r| r.id == self.row_id) {
            return Err(CommandError::InvalidArgument(format!(
                "relation row '{}' already exists",
                self.row_id
            )));
        }
        if self.index > model.row.len() {
            return Err(out_of_range("relation rows", self.index));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        let row = List {
            id: self.row_id.clone(),
            expression: model
                .column
                .iter()
                .map(|_| default_cell(&self.cell_text))
                .collect(),
            ..Default::default()
        };
        model.row.insert(self.index, row);
        Ok(())
    }

    fn execute_canvas(&mut self, model: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        let index = row_position(model, &self.row_id)?;
        let row = grid.new_row();
        self.grid_row = Some(row.id);
        grid.insert_row(index, row)?;
        MAPPER.refresh_row(model, grid, index)?;
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        let index = row_position(model, &self.row_id)?;
        model.row.remove(index);
        Ok(())
    }

    fn undo_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        if let Some(id) = self.grid_row.take()
            && let Some(index) = grid.row_index(id)
        {
            grid.delete_row(index)?;
        }
        update_row_numbers(grid)?;
        Ok(())
    }
}

/// Delete the relation column rendered in grid column `column`
pub struct DeleteRelationColumnCommand {
    column: usize,
    removed: Option<(usize, InformationItem, Vec<Option<Option<Expression>>>)>,
    removed_column: Option<GridColumn>,
}

impl DeleteRelationColumnCommand {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            removed: None,
            removed_column: None,
        }
    }
}

impl ExpressionCommand<Relation> for DeleteRelationColumnCommand {
    fn name(&self) -> &'static str {
        "delete relation column"
    }

    fn allow_graph(&self, model: &Relation) -> Result<(), CommandError> {
        column_index(model, self.column).map(|_| ())
    }

    fn execute_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        let index = column_index(model, self.column)?;
        let item = model.column.remove(index);
        let cells = model
            .row
            .iter_mut()
            .map(|row| (index < row.expression.len()).then(|| row.expression.remove(index)))
            .collect();
        self.removed = Some((index, item, cells));
        Ok(())
    }

    fn execute_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.removed_column = Some(grid.delete_column(self.column)?);
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        if let Some((index, item, cells)) = self.removed.take() {
            model.column.insert(index, item);
            for (row, cell) in model.row.iter_mut().zip(cells) {
                if let Some(cell) = cell {
                    row.expression.insert(index, cell);
                }
            }
        }
        Ok(())
    }

    fn undo_canvas(&mut self, model: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        if let Some(column) = self.removed_column.take() {
            grid.insert_column(self.column, column)?;
            MAPPER.refresh_column(model, grid, self.column)?;
        }
        Ok(())
    }
}

/// Delete the relation row in grid row `row`
pub struct DeleteRelationRowCommand {
    row: usize,
    removed_list: Option<List>,
    removed_row: Option<GridRow>,
}

impl DeleteRelationRowCommand {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            removed_list: None,
            removed_row: None,
        }
    }
}

impl ExpressionCommand<Relation> for DeleteRelationRowCommand {
    fn name(&self) -> &'static str {
        "delete relation row"
    }

    fn allow_graph(&self, model: &Relation) -> Result<(), CommandError> {
        if self.row >= model.row.len() {
            return Err(out_of_range("relation rows", self.row));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        self.removed_list = Some(model.row.remove(self.row));
        Ok(())
    }

    fn execute_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.removed_row = Some(grid.delete_row(self.row)?);
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        if let Some(list) = self.removed_list.take() {
            model.row.insert(self.row, list);
        }
        Ok(())
    }

    fn undo_canvas(&mut self, model: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        if let Some(row) = self.removed_row.take() {
            grid.insert_row(self.row, row)?;
            MAPPER.refresh_row(model, grid, self.row)?;
        }
        update_row_numbers(grid)?;
        Ok(())
    }
}

/// Move relation rows, as a contiguous block, to grid row `target`
pub struct MoveRelationRowsCommand {
    target: usize,
    rows: Vec<usize>,
    block_start: Option<usize>,
    previous_order: Vec<RowId>,
}

impl MoveRelationRowsCommand {
    pub fn new(target: usize, rows: Vec<usize>) -> Self {
        Self {
            target,
            rows,
            block_start: None,
            previous_order: Vec::new(),
        }
    }
}

impl ExpressionCommand<Relation> for MoveRelationRowsCommand {
    fn name(&self) -> &'static str {
        "move relation rows"
    }

    fn allow_graph(&self, model: &Relation) -> Result<(), CommandError> {
        Ok(check_move(model.row.len(), self.target, &self.rows)?)
    }

    fn allow_canvas(&self, _: &Relation, grid: &dyn GridData) -> Result<(), CommandError> {
        Ok(check_move(grid.row_count(), self.target, &self.rows)?)
    }

    fn execute_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        self.block_start = Some(move_indices_to(&mut model.row, self.target, &self.rows)?);
        Ok(())
    }

    fn execute_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.previous_order = grid.rows().iter().map(|r| r.id).collect();
        let ids: Vec<RowId> = self.rows.iter().map(|&i| self.previous_order[i]).collect();
        grid.move_rows_to(self.target, &ids)?;
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        if let Some(start) = self.block_start.take() {
            restore_indices(&mut model.row, start, &self.rows);
        }
        Ok(())
    }

    fn undo_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        grid.reorder_rows(&self.previous_order)?;
        update_row_numbers(grid)?;
        Ok(())
    }
}

/// Move relation columns, and every row's cells with them, to grid column `target`
///
/// The block start is computed among the relation columns, so the row
/// number column never shifts.
pub struct MoveRelationColumnsCommand {
    target: usize,
    columns: Vec<usize>,
    moved: Option<(usize, Vec<usize>)>,
    previous_order: Vec<ColumnId>,
}

impl MoveRelationColumnsCommand {
    pub fn new(target: usize, columns: Vec<usize>) -> Self {
        Self {
            target,
            columns,
            moved: None,
            previous_order: Vec::new(),
        }
    }

    fn plan(&self, model: &Relation) -> Result<(Vec<usize>, usize), CommandError> {
        let target = column_index(model, self.target)?;
        let indices = self
            .columns
            .iter()
            .map(|&c| column_index(model, c))
            .collect::<Result<Vec<_>, _>>()?;
        check_move(model.column.len(), target, &indices)?;
        if let Some(row) = model
            .row
            .iter()
            .position(|r| r.expression.len() != model.column.len())
        {
            return Err(CommandError::InvalidArgument(format!(
                "row {} does not match the relation columns",
                row
            )));
        }
        Ok((indices, target))
    }
}

impl ExpressionCommand<Relation> for MoveRelationColumnsCommand {
    fn name(&self) -> &'static str {
        "move relation columns"
    }

    fn allow_graph(&self, model: &Relation) -> Result<(), CommandError> {
        self.plan(model).map(|_| ())
    }

    fn allow_canvas(&self, _: &Relation, grid: &dyn GridData) -> Result<(), CommandError> {
        Ok(check_move(grid.column_count(), self.target, &self.columns)?)
    }

    fn execute_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        let (indices, target) = self.plan(model)?;
        for row in &mut model.row {
            move_indices_to(&mut row.expression, target, &indices)?;
        }
        let start = move_indices_to(&mut model.column, target, &indices)?;
        self.moved = Some((start, indices));
        Ok(())
    }

    fn execute_canvas(&mut self, model: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        let (indices, target) = self.plan(model)?;
        let section = ROW_INDEX_COLUMN_COUNT..ROW_INDEX_COLUMN_COUNT + model.column.len();
        self.previous_order = grid.columns().iter().map(|c| c.id).collect();
        grid.move_columns_within(section, target, &indices)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Relation) -> Result<(), CommandError> {
        if let Some((start, indices)) = self.moved.take() {
            restore_indices(&mut model.column, start, &indices);
            for row in &mut model.row {
                restore_indices(&mut row.expression, start, &indices);
            }
        }
        Ok(())
    }

    fn undo_canvas(&mut self, _: &Relation, grid: &mut dyn GridData) -> Result<(), CommandError> {
        grid.reorder_columns(&self.previous_order)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(columns: usize, rows: usize) -> Relation {
        Relation {
            column: (0..columns)
                .map(|c| InformationItem::named(Id::new(format!("c{}", c)), format!("col{}", c)))
                .collect(),
            row: (0..rows)
                .map(|r| List {
                    id: Id::new(format!("row{}", r)),
                    expression: (0..columns)
                        .map(|c| default_cell(&format!("{}-{}", r, c)))
                        .collect(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_column_fills_rows() {
        let mut model = relation(1, 2);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let defaults = DefaultsSection {
            relation_cell: "-".to_string(),
            ..Default::default()
        };
        let mut command =
            AddRelationColumnCommand::new(InformationItem::named(Id::new("n"), "new"), 1, &defaults);
        command.execute(&mut model, &mut grid).unwrap();

        assert_eq!(model.column[0].name.value(), "new");
        assert!(model.row.iter().all(|r| r.expression.len() == 2));
        assert_eq!(grid.cell_text(1, 1), "-");
        assert_eq!(grid.cell_text(1, 2), "1-0");

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, relation(1, 2));
        assert_eq!(grid.column_count(), 2);
    }

    #[test]
    fn test_delete_row_and_undo() {
        let mut model = relation(2, 3);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();
        let mut command = DeleteRelationRowCommand::new(0);
        command.execute(&mut model, &mut grid).unwrap();
        assert_eq!(model.row[0].id.value(), "row1");
        assert_eq!(grid.cell_text(0, 0), "1");

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, relation(2, 3));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_move_columns_and_undo() {
        let mut model = relation(3, 2);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();
        let mut command = MoveRelationColumnsCommand::new(3, vec![1]);
        command.execute(&mut model, &mut grid).unwrap();
        let names: Vec<&str> = model.column.iter().map(|c| c.name.value()).collect();
        assert_eq!(names, vec!["col1", "col2", "col0"]);
        assert_eq!(grid.cell_text(0, 3), "0-0");

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, relation(3, 2));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_move_all_columns_keeps_row_numbers_first() {
        let mut model = relation(3, 2);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();
        let mut command = MoveRelationColumnsCommand::new(2, vec![1, 2, 3]);
        command.execute(&mut model, &mut grid).unwrap();

        assert_eq!(model, relation(3, 2));
        assert_eq!(grid.columns()[0].kind, ColumnKind::RowNumber);
        assert_eq!(grid, before);

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut model = relation(2, 2);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let before = grid.clone();
        let defaults = DefaultsSection::default();

        let row = AddRelationRowCommand::new(Id::new("row0"), 2, &defaults)
            .execute(&mut model, &mut grid);
        assert!(matches!(row, Err(CommandError::InvalidArgument(_))));
        let duplicate = InformationItem::named(Id::new("c1"), "again");
        let column = AddRelationColumnCommand::new(duplicate, 1, &defaults)
            .execute(&mut model, &mut grid);
        assert!(matches!(column, Err(CommandError::InvalidArgument(_))));

        assert_eq!(model, relation(2, 2));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_row_number_column_cannot_move() {
        let mut model = relation(2, 1);
        let mut grid = MAPPER.build_grid(&model).unwrap();
        let result = MoveRelationColumnsCommand::new(2, vec![0]).execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    }
}
