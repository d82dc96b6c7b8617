//! Invocation grid mapping
//!
//! One row per binding: `[row number][parameter name][bound expression]`.

use std::rc::Rc;

use crate::grid::{ColumnKind, GridCellValue, GridData};
use crate::models::expression::Invocation;

use super::definitions::ExpressionEditorDefinitions;
use super::{MapperError, ROW_INDEX_COLUMN_COUNT, UIModelMapper, cell_text, row_number};

const EDITOR: &str = "invocation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSection {
    RowIndex,
    Parameter,
    Expression,
}

impl InvocationSection {
    pub fn of(column: usize) -> Result<Self, MapperError> {
        match column {
            c if c < ROW_INDEX_COLUMN_COUNT => Ok(Self::RowIndex),
            c if c == ROW_INDEX_COLUMN_COUNT => Ok(Self::Parameter),
            c if c == ROW_INDEX_COLUMN_COUNT + 1 => Ok(Self::Expression),
            column => Err(MapperError::ColumnOutOfRange {
                editor: EDITOR,
                column,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvocationUIModelMapper {
    definitions: Rc<ExpressionEditorDefinitions>,
}

impl InvocationUIModelMapper {
    pub fn new(definitions: Rc<ExpressionEditorDefinitions>) -> Self {
        Self { definitions }
    }
}

impl UIModelMapper for InvocationUIModelMapper {
    type Model = Invocation;

    fn from_domain_model(
        &self,
        model: &Invocation,
        ui: &mut dyn GridData,
        row: usize,
        column: usize,
    ) -> Result<(), MapperError> {
        let binding = model
            .binding
            .get(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        match InvocationSection::of(column)? {
            InvocationSection::RowIndex => ui.set_cell(row, column, row_number(row))?,
            InvocationSection::Parameter => ui.set_cell(
                row,
                column,
                GridCellValue::text(binding.parameter.name.value()),
            )?,
            InvocationSection::Expression => {
                // an unregistered kind renders as an empty editor cell
                let editor = binding
                    .expression
                    .as_ref()
                    .and_then(|expression| self.definitions.resolve(expression));
                ui.set_cell(row, column, GridCellValue::Expression(editor))?;
            }
        }
        Ok(())
    }

    fn to_domain_model(
        &self,
        model: &mut Invocation,
        row: usize,
        column: usize,
        cell: Option<GridCellValue>,
    ) -> Result<(), MapperError> {
        let section = InvocationSection::of(column)?;
        let binding = model
            .binding
            .get_mut(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        match section {
            InvocationSection::RowIndex => {}
            InvocationSection::Parameter => binding.parameter.name.set_value(cell_text(cell)),
            InvocationSection::Expression => {
                binding.expression = cell
                    .as_ref()
                    .and_then(GridCellValue::as_editor)
                    .and_then(|editor| editor.expression.clone());
            }
        }
        Ok(())
    }

    fn columns(&self, _model: &Invocation) -> Vec<(ColumnKind, String)> {
        vec![
            (ColumnKind::RowNumber, "#".to_string()),
            (ColumnKind::Name, "Parameter".to_string()),
            (ColumnKind::ExpressionEditor, "Expression".to_string()),
        ]
    }

    fn row_count(&self, model: &Invocation) -> usize {
        model.binding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Id, InformationItem};
    use crate::models::expression::{Binding, Expression, LiteralExpression};

    #[test]
    fn test_bindings_map_to_rows() {
        let invocation = Invocation {
            binding: vec![
                Binding {
                    parameter: InformationItem::named(Id::new("p"), "amount"),
                    expression: Some(Expression::LiteralExpression(LiteralExpression::new(
                        Id::new("e"),
                        "100",
                    ))),
                },
                Binding {
                    parameter: InformationItem::named(Id::new("q"), "term"),
                    expression: None,
                },
            ],
            ..Default::default()
        };
        let mapper = InvocationUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::core()));
        let grid = mapper.build_grid(&invocation).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell_text(1, 0), "2");
        assert_eq!(grid.cell_text(0, 1), "amount");
        assert!(grid.get_cell(0, 2).and_then(GridCellValue::as_editor).is_some());
        assert_eq!(grid.get_cell(1, 2), Some(&GridCellValue::Expression(None)));
        assert!(InvocationSection::of(3).is_err());
    }

    #[test]
    fn test_unregistered_kind_clears_stale_editor() {
        let invocation = Invocation {
            binding: vec![Binding {
                parameter: InformationItem::named(Id::new("p"), "amount"),
                expression: Some(Expression::LiteralExpression(LiteralExpression::new(
                    Id::new("e"),
                    "100",
                ))),
            }],
            ..Default::default()
        };
        let mut grid = InvocationUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::core()))
            .build_grid(&invocation)
            .unwrap();
        let empty = InvocationUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::new()));
        empty.from_domain_model(&invocation, &mut grid, 0, 2).unwrap();
        assert_eq!(grid.get_cell(0, 2), Some(&GridCellValue::Expression(None)));
    }

    #[test]
    fn test_rename_parameter() {
        let mut invocation = Invocation {
            binding: vec![Binding::default()],
            ..Default::default()
        };
        let mapper = InvocationUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::core()));
        mapper
            .to_domain_model(&mut invocation, 0, 1, Some(GridCellValue::text("limit")))
            .unwrap();
        assert_eq!(invocation.binding[0].parameter.name.value(), "limit");
        assert!(matches!(
            mapper.to_domain_model(&mut invocation, 1, 1, None),
            Err(MapperError::RowOutOfRange { row: 1, .. })
        ));
    }
}
