//! Context grid mapping
//!
//! Columns are `[row number][name][expression]`, one row per context
//! entry. The final entry without a variable is the context's result row.

use std::rc::Rc;

use crate::grid::{ColumnKind, GridCellValue, GridData};
use crate::models::expression::Context;

use super::definitions::ExpressionEditorDefinitions;
use super::{MapperError, ROW_INDEX_COLUMN_COUNT, UIModelMapper, cell_text, row_number};

const EDITOR: &str = "context";

/// Caption of the result row when no other caption is configured
pub const DEFAULT_ROW_CAPTION: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSection {
    RowIndex,
    Name,
    Expression,
}

impl ContextSection {
    pub fn of(column: usize) -> Result<Self, MapperError> {
        match column {
            c if c < ROW_INDEX_COLUMN_COUNT => Ok(Self::RowIndex),
            c if c == ROW_INDEX_COLUMN_COUNT => Ok(Self::Name),
            c if c == ROW_INDEX_COLUMN_COUNT + 1 => Ok(Self::Expression),
            column => Err(MapperError::ColumnOutOfRange {
                editor: EDITOR,
                column,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContextUIModelMapper {
    definitions: Rc<ExpressionEditorDefinitions>,
    row_caption: String,
}

impl ContextUIModelMapper {
    pub fn new(definitions: Rc<ExpressionEditorDefinitions>) -> Self {
        Self {
            definitions,
            row_caption: DEFAULT_ROW_CAPTION.to_string(),
        }
    }

    /// Use `caption` for the name cell of the result row
    pub fn with_row_caption(mut self, caption: impl Into<String>) -> Self {
        self.row_caption = caption.into();
        self
    }
}

impl UIModelMapper for ContextUIModelMapper {
    type Model = Context;

    fn from_domain_model(
        &self,
        model: &Context,
        ui: &mut dyn GridData,
        row: usize,
        column: usize,
    ) -> Result<(), MapperError> {
        let entry = model
            .context_entry
            .get(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        match ContextSection::of(column)? {
            ContextSection::RowIndex => ui.set_cell(row, column, row_number(row))?,
            ContextSection::Name => {
                let name = match &entry.variable {
                    Some(variable) => variable.name.value().to_string(),
                    None => self.row_caption.clone(),
                };
                ui.set_cell(row, column, GridCellValue::Text(name))?;
            }
            ContextSection::Expression => {
                // an unregistered kind renders as an empty editor cell
                let editor = entry
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
        model: &mut Context,
        row: usize,
        column: usize,
        cell: Option<GridCellValue>,
    ) -> Result<(), MapperError> {
        let section = ContextSection::of(column)?;
        let entry = model
            .context_entry
            .get_mut(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        match section {
            ContextSection::RowIndex => {}
            ContextSection::Name => {
                // the result row has no variable to rename
                if let Some(variable) = entry.variable.as_mut() {
                    variable.name.set_value(cell_text(cell));
                }
            }
            ContextSection::Expression => {
                entry.expression = cell
                    .as_ref()
                    .and_then(GridCellValue::as_editor)
                    .and_then(|editor| editor.expression.clone());
            }
        }
        Ok(())
    }

    fn columns(&self, _model: &Context) -> Vec<(ColumnKind, String)> {
        vec![
            (ColumnKind::RowNumber, "#".to_string()),
            (ColumnKind::Name, "Name".to_string()),
            (ColumnKind::ExpressionEditor, "Expression".to_string()),
        ]
    }

    fn row_count(&self, model: &Context) -> usize {
        model.context_entry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::EditorType;
    use crate::models::common::{Id, InformationItem};
    use crate::models::expression::{ContextEntry, Expression, LiteralExpression};

    fn context() -> Context {
        Context {
            context_entry: vec![
                ContextEntry {
                    variable: Some(InformationItem::named(Id::new("v"), "rate")),
                    expression: Some(Expression::LiteralExpression(LiteralExpression::new(
                        Id::new("l"),
                        "0.5",
                    ))),
                },
                ContextEntry::default(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_result_row_caption() {
        let mapper = ContextUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::core()))
            .with_row_caption("result");
        let grid = mapper.build_grid(&context()).unwrap();
        assert_eq!(grid.cell_text(0, 1), "rate");
        assert_eq!(grid.cell_text(1, 1), "result");
        assert_eq!(grid.get_cell(1, 2), Some(&GridCellValue::Expression(None)));
        let editor = grid.get_cell(0, 2).and_then(GridCellValue::as_editor).unwrap();
        assert_eq!(editor.editor_type, EditorType::Literal);
    }

    #[test]
    fn test_unregistered_kind_clears_stale_editor() {
        let mut grid = ContextUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::core()))
            .build_grid(&context())
            .unwrap();
        assert!(grid.get_cell(0, 2).and_then(GridCellValue::as_editor).is_some());

        let empty = ContextUIModelMapper::new(Rc::new(ExpressionEditorDefinitions::new()));
        empty.from_domain_model(&context(), &mut grid, 0, 2).unwrap();
        assert_eq!(grid.get_cell(0, 2), Some(&GridCellValue::Expression(None)));
    }

    #[test]
    fn test_editor_expression_is_written_back() {
        let definitions = Rc::new(ExpressionEditorDefinitions::core());
        let mapper = ContextUIModelMapper::new(definitions.clone());
        let mut context = context();
        let replacement = Expression::LiteralExpression(LiteralExpression::new(Id::new("n"), "1"));
        let editor = definitions.resolve(&replacement);
        mapper
            .to_domain_model(&mut context, 1, 2, Some(GridCellValue::Expression(editor)))
            .unwrap();
        assert_eq!(context.context_entry[1].expression, Some(replacement));

        mapper.to_domain_model(&mut context, 1, 1, None).unwrap();
        assert!(context.context_entry[1].variable.is_none());
    }
}
