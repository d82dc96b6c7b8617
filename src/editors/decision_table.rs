//! Decision table grid mapping
//!
//! Columns are laid out as
//! `[row number][input clauses...][output clauses...][description]`.

use crate::grid::{ColumnKind, GridCellValue, GridData};
use crate::models::decision_table::DecisionTable;

use super::{MapperError, ROW_INDEX_COLUMN_COUNT, UIModelMapper, cell_text, row_number};

const EDITOR: &str = "decision table";

/// Section of a decision table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionTableSection {
    RowIndex,
    /// Index into the table's input clauses
    InputClause(usize),
    /// Index into the table's output clauses
    OutputClause(usize),
    Description,
}

impl DecisionTableSection {
    /// Classify `column` against the table's current clause counts
    ///
    /// # Example
    ///
    /// ```rust
    /// use dmn_editor_core::editors::DecisionTableSection;
    /// use dmn_editor_core::models::decision_table::{DecisionTable, InputClause, OutputClause};
    ///
    /// let table = DecisionTable {
    ///     input: vec![InputClause::default(); 2],
    ///     output: vec![OutputClause::default()],
    ///     ..Default::default()
    /// };
    /// assert_eq!(DecisionTableSection::of(&table, 3).unwrap(), DecisionTableSection::OutputClause(0));
    /// assert!(DecisionTableSection::of(&table, 5).is_err());
    /// ```
    pub fn of(table: &DecisionTable, column: usize) -> Result<Self, MapperError> {
        let inputs = table.input.len();
        let outputs = table.output.len();
        if column < ROW_INDEX_COLUMN_COUNT {
            return Ok(Self::RowIndex);
        }
        let column_in_clauses = column - ROW_INDEX_COLUMN_COUNT;
        if column_in_clauses < inputs {
            Ok(Self::InputClause(column_in_clauses))
        } else if column_in_clauses < inputs + outputs {
            Ok(Self::OutputClause(column_in_clauses - inputs))
        } else if column_in_clauses == inputs + outputs {
            Ok(Self::Description)
        } else {
            Err(MapperError::ColumnOutOfRange {
                editor: EDITOR,
                column,
            })
        }
    }
}

/// Grid column of an input clause
pub fn input_column(index: usize) -> usize {
    ROW_INDEX_COLUMN_COUNT + index
}

/// Grid column of an output clause
pub fn output_column(table: &DecisionTable, index: usize) -> usize {
    ROW_INDEX_COLUMN_COUNT + table.input.len() + index
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionTableUIModelMapper;

impl DecisionTableUIModelMapper {
    pub fn new() -> Self {
        Self
    }
}

impl UIModelMapper for DecisionTableUIModelMapper {
    type Model = DecisionTable;

    fn from_domain_model(
        &self,
        model: &DecisionTable,
        ui: &mut dyn GridData,
        row: usize,
        column: usize,
    ) -> Result<(), MapperError> {
        let rule = model
            .rule
            .get(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        let value = match DecisionTableSection::of(model, column)? {
            DecisionTableSection::RowIndex => row_number(row),
            DecisionTableSection::InputClause(i) => GridCellValue::text(
                rule.input_entry
                    .get(i)
                    .map(|e| e.text.as_str())
                    .unwrap_or_default(),
            ),
            DecisionTableSection::OutputClause(i) => GridCellValue::text(
                rule.output_entry
                    .get(i)
                    .map(|e| e.text.as_str())
                    .unwrap_or_default(),
            ),
            DecisionTableSection::Description => GridCellValue::text(rule.description.value()),
        };
        ui.set_cell(row, column, value)?;
        Ok(())
    }

    fn to_domain_model(
        &self,
        model: &mut DecisionTable,
        row: usize,
        column: usize,
        cell: Option<GridCellValue>,
    ) -> Result<(), MapperError> {
        let section = DecisionTableSection::of(model, column)?;
        let rule = model
            .rule
            .get_mut(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        match section {
            DecisionTableSection::RowIndex => {}
            DecisionTableSection::InputClause(i) => {
                if let Some(entry) = rule.input_entry.get_mut(i) {
                    entry.text = cell_text(cell);
                }
            }
            DecisionTableSection::OutputClause(i) => {
                if let Some(entry) = rule.output_entry.get_mut(i) {
                    entry.text = cell_text(cell);
                }
            }
            DecisionTableSection::Description => rule.description.set_value(cell_text(cell)),
        }
        Ok(())
    }

    fn columns(&self, model: &DecisionTable) -> Vec<(ColumnKind, String)> {
        let mut columns = vec![(ColumnKind::RowNumber, "#".to_string())];
        columns.extend(
            model
                .input
                .iter()
                .map(|c| (ColumnKind::InputClause, c.input_expression.text.clone())),
        );
        columns.extend(
            model
                .output
                .iter()
                .map(|c| (ColumnKind::OutputClause, c.name.clone())),
        );
        columns.push((ColumnKind::Description, "Description".to_string()));
        columns
    }

    fn row_count(&self, model: &DecisionTable) -> usize {
        model.rule.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Description, Id};
    use crate::models::decision_table::{DecisionRule, InputClause, OutputClause, UnaryTests};
    use crate::models::expression::LiteralExpression;

    fn table() -> DecisionTable {
        DecisionTable {
            input: vec![InputClause::default(), InputClause::default()],
            output: vec![OutputClause::default()],
            rule: vec![DecisionRule {
                id: Id::new("r0"),
                description: Description::new("first"),
                input_entry: vec![
                    UnaryTests::new(Id::default(), "< 10"),
                    UnaryTests::new(Id::default(), "-"),
                ],
                output_entry: vec![LiteralExpression::new(Id::default(), "\"low\"")],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_sections() {
        let table = table();
        let sections: Vec<_> = (0..5)
            .map(|c| DecisionTableSection::of(&table, c).unwrap())
            .collect();
        assert_eq!(
            sections,
            vec![
                DecisionTableSection::RowIndex,
                DecisionTableSection::InputClause(0),
                DecisionTableSection::InputClause(1),
                DecisionTableSection::OutputClause(0),
                DecisionTableSection::Description,
            ]
        );
        assert!(matches!(
            DecisionTableSection::of(&table, 5),
            Err(MapperError::ColumnOutOfRange { column: 5, .. })
        ));
    }

    #[test]
    fn test_build_grid() {
        let grid = DecisionTableUIModelMapper.build_grid(&table()).unwrap();
        assert_eq!(grid.column_count(), 5);
        assert_eq!(grid.get_cell(0, 0), Some(&GridCellValue::Integer(1)));
        assert_eq!(grid.cell_text(0, 1), "< 10");
        assert_eq!(grid.cell_text(0, 3), "\"low\"");
        assert_eq!(grid.cell_text(0, 4), "first");
    }

    #[test]
    fn test_absent_cell_writes_empty_text() {
        let mut table = table();
        DecisionTableUIModelMapper
            .to_domain_model(&mut table, 0, 2, None)
            .unwrap();
        assert_eq!(table.rule[0].input_entry[1].text, "");
    }

    #[test]
    fn test_row_index_is_read_only() {
        let mut table = table();
        let before = table.clone();
        DecisionTableUIModelMapper
            .to_domain_model(&mut table, 0, 0, Some(GridCellValue::Integer(7)))
            .unwrap();
        assert_eq!(table, before);
    }
}
