//! Context commands

use std::rc::Rc;

use super::{CommandError, ExpressionCommand, out_of_range};
use crate::editors::{ContextUIModelMapper, ExpressionEditorDefinitions, UIModelMapper};
use crate::grid::{GridData, GridRow, RowId, update_row_numbers};
use crate::models::common::Id;
use crate::models::expression::{Context, ContextEntry};

fn entry_position(context: &Context, variable: &Id) -> Result<usize, CommandError> {
    context
        .context_entry
        .iter()
        .position(|e| e.variable.as_ref().is_some_and(|v| &v.id == variable))
        .ok_or_else(|| CommandError::InvalidArgument(format!("no context entry '{}'", variable)))
}

/// Insert a named entry at grid row `index`
pub struct AddContextEntryCommand {
    entry: ContextEntry,
    index: usize,
    mapper: ContextUIModelMapper,
    grid_row: Option<RowId>,
}

impl AddContextEntryCommand {
    pub fn new(
        entry: ContextEntry,
        index: usize,
        definitions: Rc<ExpressionEditorDefinitions>,
    ) -> Self {
        Self {
            entry,
            index,
            mapper: ContextUIModelMapper::new(definitions),
            grid_row: None,
        }
    }

    /// Caption shown on the result row while this command refreshes the grid
    pub fn with_row_caption(mut self, caption: impl Into<String>) -> Self {
        self.mapper = self.mapper.with_row_caption(caption);
        self
    }

    fn variable_id(&self) -> Result<&Id, CommandError> {
        self.entry
            .variable
            .as_ref()
            .map(|v| &v.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                CommandError::InvalidArgument("new context entries need a variable id".to_string())
            })
    }
}

impl ExpressionCommand<Context> for AddContextEntryCommand {
    fn name(&self) -> &'static str {
        "add context entry"
    }

    fn allow_graph(&self, model: &Context) -> Result<(), CommandError> {
        let id = self.variable_id()?;
        if model
            .context_entry
            .iter()
            .any(|e| e.variable.as_ref().is_some_and(|v| &v.id == id))
        {
            return Err(CommandError::InvalidArgument(format!(
                "context entry '{}' already exists",
                id
            )));
        }
        if self.index > model.context_entry.len() {
            return Err(out_of_range("context entries", self.index));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut Context) -> Result<(), CommandError> {
        model.context_entry.insert(self.index, self.entry.clone());
        Ok(())
    }

    fn execute_canvas(&mut self, model: &Context, grid: &mut dyn GridData) -> Result<(), CommandError> {
        let index = entry_position(model, self.variable_id()?)?;
        let row = grid.new_row();
        self.grid_row = Some(row.id);
        grid.insert_row(index, row)?;
        self.mapper.refresh_row(model, grid, index)?;
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Context) -> Result<(), CommandError> {
        let index = entry_position(model, self.variable_id()?)?;
        model.context_entry.remove(index);
        Ok(())
    }

    fn undo_canvas(&mut self, _: &Context, grid: &mut dyn GridData) -> Result<(), CommandError> {
        if let Some(id) = self.grid_row.take()
            && let Some(index) = grid.row_index(id)
        {
            grid.delete_row(index)?;
        }
        update_row_numbers(grid)?;
        Ok(())
    }
}

/// Delete the entry in grid row `row`; the result row cannot be deleted
pub struct DeleteContextEntryCommand {
    row: usize,
    mapper: ContextUIModelMapper,
    removed_entry: Option<ContextEntry>,
    removed_row: Option<GridRow>,
}

impl DeleteContextEntryCommand {
    pub fn new(row: usize, definitions: Rc<ExpressionEditorDefinitions>) -> Self {
        Self {
            row,
            mapper: ContextUIModelMapper::new(definitions),
            removed_entry: None,
            removed_row: None,
        }
    }
}

impl ExpressionCommand<Context> for DeleteContextEntryCommand {
    fn name(&self) -> &'static str {
        "delete context entry"
    }

    fn allow_graph(&self, model: &Context) -> Result<(), CommandError> {
        let entry = model
            .context_entry
            .get(self.row)
            .ok_or_else(|| out_of_range("context entries", self.row))?;
        if entry.variable.is_none() && self.row + 1 == model.context_entry.len() {
            return Err(CommandError::InvalidArgument(
                "the result row of a context cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut Context) -> Result<(), CommandError> {
        self.removed_entry = Some(model.context_entry.remove(self.row));
        Ok(())
    }

    fn execute_canvas(&mut self, _: &Context, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.removed_row = Some(grid.delete_row(self.row)?);
        update_row_numbers(grid)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut Context) -> Result<(), CommandError> {
        if let Some(entry) = self.removed_entry.take() {
            model.context_entry.insert(self.row, entry);
        }
        Ok(())
    }

    fn undo_canvas(&mut self, model: &Context, grid: &mut dyn GridData) -> Result<(), CommandError> {
        if let Some(row) = self.removed_row.take() {
            grid.insert_row(self.row, row)?;
            self.mapper.refresh_row(model, grid, self.row)?;
        }
        update_row_numbers(grid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::InformationItem;

    fn definitions() -> Rc<ExpressionEditorDefinitions> {
        Rc::new(ExpressionEditorDefinitions::core())
    }

    fn context() -> Context {
        Context {
            context_entry: vec![
                ContextEntry {
                    variable: Some(InformationItem::named(Id::new("a"), "a")),
                    expression: None,
                },
                ContextEntry::default(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_add_entry_before_result_row() {
        let mut model = context();
        let mut grid = ContextUIModelMapper::new(definitions())
            .build_grid(&model)
            .unwrap();
        let entry = ContextEntry {
            variable: Some(InformationItem::named(Id::new("b"), "b")),
            expression: None,
        };
        let mut command = AddContextEntryCommand::new(entry, 1, definitions());
        command.execute(&mut model, &mut grid).unwrap();
        assert_eq!(model.context_entry.len(), 3);
        assert_eq!(grid.cell_text(1, 1), "b");
        assert_eq!(grid.cell_text(2, 0), "3");
        assert_eq!(grid.cell_text(2, 1), "default");

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, context());
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_unnamed_entry_is_rejected() {
        let mut model = context();
        let mut grid = ContextUIModelMapper::new(definitions())
            .build_grid(&model)
            .unwrap();
        let result = AddContextEntryCommand::new(ContextEntry::default(), 0, definitions())
            .execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    }

    #[test]
    fn test_duplicate_variable_is_rejected() {
        let mut model = context();
        let mut grid = ContextUIModelMapper::new(definitions())
            .build_grid(&model)
            .unwrap();
        let entry = ContextEntry {
            variable: Some(InformationItem::named(Id::new("a"), "copy")),
            expression: None,
        };
        let result = AddContextEntryCommand::new(entry, 1, definitions()).execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
        assert_eq!(model, context());
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_result_row_cannot_be_deleted() {
        let mut model = context();
        let mut grid = ContextUIModelMapper::new(definitions())
            .build_grid(&model)
            .unwrap();
        let result = DeleteContextEntryCommand::new(1, definitions()).execute(&mut model, &mut grid);
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));

        let mut command = DeleteContextEntryCommand::new(0, definitions());
        command.execute(&mut model, &mut grid).unwrap();
        assert_eq!(model.context_entry.len(), 1);
        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, context());
    }
}
