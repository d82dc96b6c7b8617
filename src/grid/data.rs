//! In-memory grid data

use serde::{Deserialize, Serialize};

use super::{
    ColumnId, ColumnKind, GridCellValue, GridColumn, GridData, GridError, GridRow, RowId,
    move_indices_to,
};

/// Grid data backing a boxed expression editor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DMNGridData {
    columns: Vec<GridColumn>,
    rows: Vec<GridRow>,
    next_row_id: u64,
    next_column_id: u64,
}

impl DMNGridData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a cell, empty when unset
    pub fn cell_text(&self, row: usize, column: usize) -> String {
        self.get_cell(row, column)
            .map(GridCellValue::display_text)
            .unwrap_or_default()
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, column: usize) -> Vec<Option<&GridCellValue>> {
        (0..self.rows.len())
            .map(|row| self.get_cell(row, column))
            .collect()
    }

    fn fit_row(&self, row: &mut GridRow) {
        row.cells.resize(self.columns.len(), None);
    }

    fn row_indices(&self, ids: &[RowId]) -> Result<Vec<usize>, GridError> {
        ids.iter()
            .map(|id| self.row_index(*id).ok_or(GridError::UnknownRow(*id)))
            .collect()
    }

    fn column_indices(&self, ids: &[ColumnId]) -> Result<Vec<usize>, GridError> {
        ids.iter()
            .map(|id| self.column_index(*id).ok_or(GridError::UnknownColumn(*id)))
            .collect()
    }
}

impl GridData for DMNGridData {
    fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    fn get_cell(&self, row: usize, column: usize) -> Option<&GridCellValue> {
        self.rows.get(row)?.cells.get(column)?.as_ref()
    }

    fn set_cell(
        &mut self,
        row: usize,
        column: usize,
        value: GridCellValue,
    ) -> Result<(), GridError> {
        if column >= self.columns.len() {
            return Err(GridError::ColumnOutOfRange(column));
        }
        let row_data = self
            .rows
            .get_mut(row)
            .ok_or(GridError::RowOutOfRange(row))?;
        row_data.cells[column] = Some(value);
        Ok(())
    }

    fn delete_cell(
        &mut self,
        row: usize,
        column: usize,
    ) -> Result<Option<GridCellValue>, GridError> {
        if column >= self.columns.len() {
            return Err(GridError::ColumnOutOfRange(column));
        }
        let row_data = self
            .rows
            .get_mut(row)
            .ok_or(GridError::RowOutOfRange(row))?;
        Ok(row_data.cells[column].take())
    }

    fn new_column(&mut self, kind: ColumnKind, title: &str) -> GridColumn {
        let id = ColumnId(self.next_column_id);
        self.next_column_id += 1;
        GridColumn {
            id,
            kind,
            title: title.to_string(),
        }
    }

    fn new_row(&mut self) -> GridRow {
        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        GridRow {
            id,
            cells: vec![None; self.columns.len()],
        }
    }

    fn append_column(&mut self, column: GridColumn) {
        for row in &mut self.rows {
            row.cells.push(None);
        }
        self.columns.push(column);
    }

    fn insert_column(&mut self, index: usize, column: GridColumn) -> Result<(), GridError> {
        if index > self.columns.len() {
            return Err(GridError::ColumnOutOfRange(index));
        }
        for row in &mut self.rows {
            row.cells.insert(index, None);
        }
        self.columns.insert(index, column);
        Ok(())
    }

    fn delete_column(&mut self, index: usize) -> Result<GridColumn, GridError> {
        if index >= self.columns.len() {
            return Err(GridError::ColumnOutOfRange(index));
        }
        for row in &mut self.rows {
            row.cells.remove(index);
        }
        Ok(self.columns.remove(index))
    }

    fn append_row(&mut self, mut row: GridRow) {
        self.fit_row(&mut row);
        self.rows.push(row);
    }

    fn insert_row(&mut self, index: usize, mut row: GridRow) -> Result<(), GridError> {
        if index > self.rows.len() {
            return Err(GridError::RowOutOfRange(index));
        }
        self.fit_row(&mut row);
        self.rows.insert(index, row);
        Ok(())
    }

    fn delete_row(&mut self, index: usize) -> Result<GridRow, GridError> {
        if index >= self.rows.len() {
            return Err(GridError::RowOutOfRange(index));
        }
        Ok(self.rows.remove(index))
    }

    fn move_rows_to(&mut self, target: usize, rows: &[RowId]) -> Result<(), GridError> {
        let indices = self.row_indices(rows)?;
        move_indices_to(&mut self.rows, target, &indices)?;
        Ok(())
    }

    fn reorder_rows(&mut self, order: &[RowId]) -> Result<(), GridError> {
        if order.len() != self.rows.len() {
            return Err(GridError::InvalidMove(format!(
                "{} rows given for {} rows",
                order.len(),
                self.rows.len()
            )));
        }
        let indices = self.row_indices(order)?;
        let mut slots: Vec<Option<GridRow>> = std::mem::take(&mut self.rows)
            .into_iter()
            .map(Some)
            .collect();
        self.rows = indices
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect();
        Ok(())
    }

    fn reorder_columns(&mut self, order: &[ColumnId]) -> Result<(), GridError> {
        if order.len() != self.columns.len() {
            return Err(GridError::InvalidMove(format!(
                "{} columns given for {} columns",
                order.len(),
                self.columns.len()
            )));
        }
        let indices = self.column_indices(order)?;
        let columns = std::mem::take(&mut self.columns);
        self.columns = indices.iter().map(|&i| columns[i].clone()).collect();
        for row in &mut self.rows {
            let cells = std::mem::take(&mut row.cells);
            row.cells = indices.iter().map(|&i| cells[i].clone()).collect();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::update_row_numbers;

    fn grid(rows: usize) -> DMNGridData {
        let mut grid = DMNGridData::new();
        let number = grid.new_column(ColumnKind::RowNumber, "#");
        grid.append_column(number);
        let text = grid.new_column(ColumnKind::Description, "Description");
        grid.append_column(text);
        for i in 0..rows {
            let row = grid.new_row();
            grid.append_row(row);
            grid.set_cell(i, 1, GridCellValue::text(format!("r{}", i)))
                .unwrap();
        }
        update_row_numbers(&mut grid).unwrap();
        grid
    }

    #[test]
    fn test_inserted_column_gets_empty_cells() {
        let mut grid = grid(2);
        let column = grid.new_column(ColumnKind::InputClause, "in");
        grid.insert_column(1, column).unwrap();
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.get_cell(0, 1), None);
        assert_eq!(grid.cell_text(0, 2), "r0");
    }

    #[test]
    fn test_move_rows_then_renumber() {
        let mut grid = grid(3);
        let id = grid.rows()[2].id;
        grid.move_rows_to(0, &[id]).unwrap();
        update_row_numbers(&mut grid).unwrap();
        let numbers: Vec<String> = (0..3).map(|r| grid.cell_text(r, 0)).collect();
        let texts: Vec<String> = (0..3).map(|r| grid.cell_text(r, 1)).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
        assert_eq!(texts, vec!["r2", "r0", "r1"]);
    }

    #[test]
    fn test_move_columns_moves_cells() {
        let mut grid = grid(1);
        let before: Vec<ColumnId> = grid.columns().iter().map(|c| c.id).collect();
        let start = grid.move_columns_within(0..2, 0, &[1]).unwrap();
        assert_eq!(start, 0);
        assert_eq!(grid.columns()[0].kind, ColumnKind::Description);
        assert_eq!(grid.cell_text(0, 0), "r0");

        grid.reorder_columns(&before).unwrap();
        assert_eq!(grid.columns()[0].kind, ColumnKind::RowNumber);
        assert_eq!(grid.cell_text(0, 1), "r0");
    }

    #[test]
    fn test_move_whole_section_keeps_outer_columns() {
        let mut grid = grid(1);
        for name in ["a", "b", "c"] {
            let column = grid.new_column(ColumnKind::InputClause, name);
            let at = grid.column_count() - 1;
            grid.insert_column(at, column).unwrap();
        }
        let start = grid.move_columns_within(1..4, 2, &[0, 1, 2]).unwrap();
        assert_eq!(start, 0);
        let kinds: Vec<ColumnKind> = grid.columns().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::RowNumber,
                ColumnKind::InputClause,
                ColumnKind::InputClause,
                ColumnKind::InputClause,
                ColumnKind::Description,
            ]
        );
        assert_eq!(grid.cell_text(0, 0), "1");
        assert!(grid.move_columns_within(1..9, 0, &[0]).is_err());
    }

    #[test]
    fn test_out_of_range_cells() {
        let mut grid = grid(1);
        assert_eq!(
            grid.set_cell(1, 0, GridCellValue::Integer(1)),
            Err(GridError::RowOutOfRange(1))
        );
        assert_eq!(
            grid.set_cell(0, 2, GridCellValue::Integer(1)),
            Err(GridError::ColumnOutOfRange(2))
        );
    }
}
