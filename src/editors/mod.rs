//! Boxed expression editors
//!
//! A UI model mapper projects one domain expression onto a grid. Each
//! mapper classifies a column index into a section using only the current
//! lengths of the model's lists, reads the matching domain field into the
//! cell (`from_domain_model`) and writes an edited cell back
//! (`to_domain_model`).

pub mod context;
pub mod decision_table;
pub mod definitions;
pub mod function;
pub mod invocation;
pub mod relation;

pub use context::{ContextSection, ContextUIModelMapper};
pub use decision_table::{DecisionTableSection, DecisionTableUIModelMapper};
pub use definitions::{
    BoxedExpressionDefinition, EditorType, ExpressionEditor, ExpressionEditorDefinition,
    ExpressionEditorDefinitions, SupplementaryFunctionDefinition,
};
pub use function::FunctionUIModelMapper;
pub use invocation::{InvocationSection, InvocationUIModelMapper};
pub use relation::{RelationSection, RelationUIModelMapper};

use crate::grid::{ColumnKind, DMNGridData, GridCellValue, GridData, GridError};

/// Number of leading row-number columns in every tabular editor
pub const ROW_INDEX_COLUMN_COUNT: usize = 1;

/// Error raised while mapping between a grid and its domain model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapperError {
    #[error("Column {column} does not belong to any section of a {editor}")]
    ColumnOutOfRange { editor: &'static str, column: usize },
    #[error("Row {row} does not exist in a {editor}")]
    RowOutOfRange { editor: &'static str, row: usize },
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

/// Pure mapping between one domain expression and its grid
pub trait UIModelMapper {
    type Model;

    /// Write the domain value behind `(row, column)` into the grid
    fn from_domain_model(
        &self,
        model: &Self::Model,
        ui: &mut dyn GridData,
        row: usize,
        column: usize,
    ) -> Result<(), MapperError>;

    /// Push an edited cell back into the domain model
    ///
    /// An absent cell writes the empty string.
    fn to_domain_model(
        &self,
        model: &mut Self::Model,
        row: usize,
        column: usize,
        cell: Option<GridCellValue>,
    ) -> Result<(), MapperError>;

    /// Column layout for the model, left to right
    fn columns(&self, model: &Self::Model) -> Vec<(ColumnKind, String)>;

    fn row_count(&self, model: &Self::Model) -> usize;

    /// Build a populated grid for `model`
    fn build_grid(&self, model: &Self::Model) -> Result<DMNGridData, MapperError> {
        let mut grid = DMNGridData::new();
        for (kind, title) in self.columns(model) {
            let column = grid.new_column(kind, &title);
            grid.append_column(column);
        }
        for _ in 0..self.row_count(model) {
            let row = grid.new_row();
            grid.append_row(row);
        }
        for row in 0..grid.row_count() {
            self.refresh_row(model, &mut grid, row)?;
        }
        Ok(grid)
    }

    /// Repopulate every cell of one row
    fn refresh_row(
        &self,
        model: &Self::Model,
        ui: &mut dyn GridData,
        row: usize,
    ) -> Result<(), MapperError> {
        for column in 0..ui.column_count() {
            self.from_domain_model(model, ui, row, column)?;
        }
        Ok(())
    }

    /// Repopulate every cell of one column
    fn refresh_column(
        &self,
        model: &Self::Model,
        ui: &mut dyn GridData,
        column: usize,
    ) -> Result<(), MapperError> {
        for row in 0..self.row_count(model) {
            self.from_domain_model(model, ui, row, column)?;
        }
        Ok(())
    }
}

pub(crate) fn cell_text(cell: Option<GridCellValue>) -> String {
    cell.map(|c| c.display_text()).unwrap_or_default()
}

pub(crate) fn row_number(row: usize) -> GridCellValue {
    GridCellValue::Integer(row as i64 + 1)
}
