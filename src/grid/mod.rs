//! Grid model for boxed expression editors
//!
//! The grid is a projection of a domain expression: columns tagged with the
//! section they render, rows that follow the expression's rule or entry
//! list, and positional cells. [`GridData`] is the contract structural edit
//! commands and UI model mappers work against; [`DMNGridData`] is the
//! in-memory implementation.

pub mod data;

pub use data::DMNGridData;

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::editors::ExpressionEditor;

/// Error raised by grid operations
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum GridError {
    #[error("Row {0} is out of range")]
    RowOutOfRange(usize),
    #[error("Column {0} is out of range")]
    ColumnOutOfRange(usize),
    #[error("Unknown row: {0}")]
    UnknownRow(RowId),
    #[error("Unknown column: {0}")]
    UnknownColumn(ColumnId),
    #[error("Invalid move: {0}")]
    InvalidMove(String),
}

/// Stable identity of a grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Stable identity of a grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(pub u64);

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "column-{}", self.0)
    }
}

/// Section a column renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    RowNumber,
    InputClause,
    OutputClause,
    Description,
    Name,
    ExpressionEditor,
    RelationColumn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    pub id: ColumnId,
    pub kind: ColumnKind,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub id: RowId,
    /// One slot per column, in column order
    pub cells: Vec<Option<GridCellValue>>,
}

/// Value displayed in a grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridCellValue {
    /// Row numbers
    Integer(i64),
    Text(String),
    /// Handle to the editor rendering a nested expression
    Expression(Option<ExpressionEditor>),
}

impl GridCellValue {
    pub fn text(value: impl Into<String>) -> Self {
        GridCellValue::Text(value.into())
    }

    /// Text written back into the domain model for this value
    pub fn display_text(&self) -> String {
        match self {
            GridCellValue::Integer(i) => i.to_string(),
            GridCellValue::Text(s) => s.clone(),
            GridCellValue::Expression(_) => String::new(),
        }
    }

    pub fn as_editor(&self) -> Option<&ExpressionEditor> {
        match self {
            GridCellValue::Expression(editor) => editor.as_ref(),
            _ => None,
        }
    }
}

/// Grid data collaborator
///
/// Rows and columns are addressed positionally; [`RowId`] and [`ColumnId`]
/// stay stable across moves so commands can find what they inserted.
pub trait GridData {
    fn columns(&self) -> &[GridColumn];

    fn rows(&self) -> &[GridRow];

    fn column_count(&self) -> usize {
        self.columns().len()
    }

    fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn row_index(&self, id: RowId) -> Option<usize> {
        self.rows().iter().position(|r| r.id == id)
    }

    fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns().iter().position(|c| c.id == id)
    }

    fn get_cell(&self, row: usize, column: usize) -> Option<&GridCellValue>;

    fn set_cell(&mut self, row: usize, column: usize, value: GridCellValue)
    -> Result<(), GridError>;

    /// Clear a cell, returning its previous value
    fn delete_cell(&mut self, row: usize, column: usize)
    -> Result<Option<GridCellValue>, GridError>;

    /// Create a detached column with a fresh id
    fn new_column(&mut self, kind: ColumnKind, title: &str) -> GridColumn;

    /// Create a detached row with a fresh id
    fn new_row(&mut self) -> GridRow;

    fn append_column(&mut self, column: GridColumn);

    fn insert_column(&mut self, index: usize, column: GridColumn) -> Result<(), GridError>;

    /// Remove a column and its cells
    fn delete_column(&mut self, index: usize) -> Result<GridColumn, GridError>;

    fn append_row(&mut self, row: GridRow);

    fn insert_row(&mut self, index: usize, row: GridRow) -> Result<(), GridError>;

    fn delete_row(&mut self, index: usize) -> Result<GridRow, GridError>;

    /// Move rows to `target` as one contiguous block
    fn move_rows_to(&mut self, target: usize, rows: &[RowId]) -> Result<(), GridError>;

    /// Move columns inside the contiguous `section`, cells included
    ///
    /// `target` and `indices` count from the start of the section, so
    /// columns outside it never shift. Returns the start of the moved
    /// block within the section.
    fn move_columns_within(
        &mut self,
        section: Range<usize>,
        target: usize,
        indices: &[usize],
    ) -> Result<usize, GridError> {
        let mut order: Vec<ColumnId> = self.columns().iter().map(|c| c.id).collect();
        if section.start > section.end || section.end > order.len() {
            return Err(GridError::InvalidMove(format!(
                "section {}..{} is outside {} columns",
                section.start,
                section.end,
                order.len()
            )));
        }
        let mut ids: Vec<ColumnId> = order[section.clone()].to_vec();
        let start = move_indices_to(&mut ids, target, indices)?;
        order.splice(section, ids);
        self.reorder_columns(&order)?;
        Ok(start)
    }

    /// Put rows back into an exact previous order
    fn reorder_rows(&mut self, order: &[RowId]) -> Result<(), GridError>;

    /// Put columns back into an exact previous order
    fn reorder_columns(&mut self, order: &[ColumnId]) -> Result<(), GridError>;
}

/// Check a move selection against a list of `len` items
pub fn check_move(len: usize, target: usize, indices: &[usize]) -> Result<(), GridError> {
    if indices.is_empty() {
        return Err(GridError::InvalidMove("nothing selected".to_string()));
    }
    if target >= len {
        return Err(GridError::InvalidMove(format!(
            "target {} is outside {} items",
            target, len
        )));
    }
    for (i, index) in indices.iter().enumerate() {
        if *index >= len {
            return Err(GridError::InvalidMove(format!(
                "index {} is outside {} items",
                index, len
            )));
        }
        if indices[..i].contains(index) {
            return Err(GridError::InvalidMove(format!(
                "index {} selected twice",
                index
            )));
        }
    }
    Ok(())
}

/// Move the items at `indices` to `target` as a contiguous block
///
/// The block lands at `target` when moving up and at
/// `target - count + 1` when moving down, so the last moved item ends on
/// the target. Returns the start of the block.
///
/// # Example
///
/// ```rust
/// use dmn_editor_core::grid::move_indices_to;
///
/// let mut items = vec!['a', 'b', 'c'];
/// let start = move_indices_to(&mut items, 0, &[2]).unwrap();
/// assert_eq!(items, vec!['c', 'a', 'b']);
/// assert_eq!(start, 0);
/// ```
pub fn move_indices_to<T>(
    items: &mut Vec<T>,
    target: usize,
    indices: &[usize],
) -> Result<usize, GridError> {
    check_move(items.len(), target, indices)?;

    let first = indices[0];
    let count = indices.len();

    let mut descending: Vec<usize> = indices.to_vec();
    descending.sort_unstable_by(|a, b| b.cmp(a));
    let mut removed: Vec<(usize, T)> = descending
        .into_iter()
        .map(|index| (index, items.remove(index)))
        .collect();
    // back into selection order
    removed.sort_by_key(|(index, _)| indices.iter().position(|i| i == index));

    let start = if target > first {
        (target + 1).saturating_sub(count)
    } else {
        target
    }
    .min(items.len());

    for (offset, (_, item)) in removed.into_iter().enumerate() {
        items.insert(start + offset, item);
    }
    Ok(start)
}

/// Undo [`move_indices_to`]: put the block at `start` back at `indices`
pub fn restore_indices<T>(items: &mut Vec<T>, start: usize, indices: &[usize]) {
    let count = indices.len().min(items.len().saturating_sub(start));
    let mut block: Vec<(usize, T)> = indices
        .iter()
        .copied()
        .zip(items.drain(start..start + count))
        .collect();
    block.sort_by_key(|(index, _)| *index);
    for (index, item) in block {
        let at = index.min(items.len());
        items.insert(at, item);
    }
}

/// Recompute the row-number column, if the grid has one
pub fn update_row_numbers(grid: &mut dyn GridData) -> Result<(), GridError> {
    let Some(column) = grid
        .columns()
        .iter()
        .position(|c| c.kind == ColumnKind::RowNumber)
    else {
        return Ok(());
    };
    for row in 0..grid.row_count() {
        grid.set_cell(row, column, GridCellValue::Integer(row as i64 + 1))?;
    }
    Ok(())
}
