//! Single cell edits

use super::{CommandError, ExpressionCommand};
use crate::editors::UIModelMapper;
use crate::grid::{GridCellValue, GridData};

/// Write one edited cell back through a mapper
///
/// The domain half snapshots the model so undo restores exactly what the
/// mapper overwrote; the grid cell is then re-read from the domain.
pub struct SetCellValueCommand<Mp: UIModelMapper> {
    mapper: Mp,
    row: usize,
    column: usize,
    value: Option<GridCellValue>,
    previous_model: Option<Mp::Model>,
    previous_cell: Option<Option<GridCellValue>>,
}

impl<Mp: UIModelMapper> SetCellValueCommand<Mp> {
    pub fn new(mapper: Mp, row: usize, column: usize, value: Option<GridCellValue>) -> Self {
        Self {
            mapper,
            row,
            column,
            value,
            previous_model: None,
            previous_cell: None,
        }
    }
}

impl<Mp> ExpressionCommand<Mp::Model> for SetCellValueCommand<Mp>
where
    Mp: UIModelMapper,
    Mp::Model: Clone,
{
    fn name(&self) -> &'static str {
        "set cell value"
    }

    fn allow_canvas(&self, _: &Mp::Model, grid: &dyn GridData) -> Result<(), CommandError> {
        if self.row >= grid.row_count() {
            return Err(super::out_of_range("grid rows", self.row));
        }
        if self.column >= grid.column_count() {
            return Err(super::out_of_range("grid columns", self.column));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut Mp::Model) -> Result<(), CommandError> {
        let snapshot = model.clone();
        self.mapper
            .to_domain_model(model, self.row, self.column, self.value.clone())?;
        self.previous_model = Some(snapshot);
        Ok(())
    }

    fn execute_canvas(
        &mut self,
        model: &Mp::Model,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        self.previous_cell = Some(grid.get_cell(self.row, self.column).cloned());
        self.mapper
            .from_domain_model(model, grid, self.row, self.column)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Mp::Model) -> Result<(), CommandError> {
        if let Some(previous) = self.previous_model.take() {
            *model = previous;
        }
        Ok(())
    }

    fn undo_canvas(&mut self, _: &Mp::Model, grid: &mut dyn GridData) -> Result<(), CommandError> {
        match self.previous_cell.take() {
            Some(Some(cell)) => grid.set_cell(self.row, self.column, cell)?,
            Some(None) => {
                grid.delete_cell(self.row, self.column)?;
            }
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::DecisionTableUIModelMapper;
    use crate::models::common::Id;
    use crate::models::decision_table::{DecisionRule, DecisionTable, InputClause, UnaryTests};

    #[test]
    fn test_edit_and_undo_input_entry() {
        let original = DecisionTable {
            input: vec![InputClause::default()],
            rule: vec![DecisionRule {
                input_entry: vec![UnaryTests::new(Id::default(), "> 5")],
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut model = original.clone();
        let mut grid = DecisionTableUIModelMapper.build_grid(&model).unwrap();
        let before = grid.clone();

        let mut command = SetCellValueCommand::new(
            DecisionTableUIModelMapper,
            0,
            1,
            Some(GridCellValue::text("<= 5")),
        );
        command.execute(&mut model, &mut grid).unwrap();
        assert_eq!(model.rule[0].input_entry[0].text, "<= 5");
        assert_eq!(grid.cell_text(0, 1), "<= 5");

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, original);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_out_of_range_cell_is_rejected() {
        let mut model = DecisionTable::default();
        let mut grid = DecisionTableUIModelMapper.build_grid(&model).unwrap();
        let result = SetCellValueCommand::new(DecisionTableUIModelMapper, 0, 1, None)
            .execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::OutOfRange { .. })));
    }
}
