//! Relation grid mapping
//!
//! Columns are `[row number][information items...]`. Relation cells hold
//! literal expressions only.

use crate::grid::{ColumnKind, GridCellValue, GridData};
use crate::models::expression::{Expression, Relation};

use super::{MapperError, ROW_INDEX_COLUMN_COUNT, UIModelMapper, cell_text, row_number};

const EDITOR: &str = "relation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationSection {
    RowIndex,
    /// Index into the relation's columns
    InformationItem(usize),
}

impl RelationSection {
    pub fn of(relation: &Relation, column: usize) -> Result<Self, MapperError> {
        if column < ROW_INDEX_COLUMN_COUNT {
            return Ok(Self::RowIndex);
        }
        let index = column - ROW_INDEX_COLUMN_COUNT;
        if index < relation.column.len() {
            Ok(Self::InformationItem(index))
        } else {
            Err(MapperError::ColumnOutOfRange {
                editor: EDITOR,
                column,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RelationUIModelMapper;

impl RelationUIModelMapper {
    pub fn new() -> Self {
        Self
    }
}

impl UIModelMapper for RelationUIModelMapper {
    type Model = Relation;

    fn from_domain_model(
        &self,
        model: &Relation,
        ui: &mut dyn GridData,
        row: usize,
        column: usize,
    ) -> Result<(), MapperError> {
        let list = model
            .row
            .get(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        match RelationSection::of(model, column)? {
            RelationSection::RowIndex => ui.set_cell(row, column, row_number(row))?,
            RelationSection::InformationItem(i) => {
                if let Some(literal) = list
                    .expression
                    .get(i)
                    .and_then(|e| e.as_ref())
                    .and_then(Expression::as_literal)
                {
                    ui.set_cell(row, column, GridCellValue::text(&literal.text))?;
                }
            }
        }
        Ok(())
    }

    fn to_domain_model(
        &self,
        model: &mut Relation,
        row: usize,
        column: usize,
        cell: Option<GridCellValue>,
    ) -> Result<(), MapperError> {
        let section = RelationSection::of(model, column)?;
        let list = model
            .row
            .get_mut(row)
            .ok_or(MapperError::RowOutOfRange { editor: EDITOR, row })?;
        if let RelationSection::InformationItem(i) = section
            && let Some(Some(Expression::LiteralExpression(literal))) = list.expression.get_mut(i)
        {
            literal.text = cell_text(cell);
        }
        Ok(())
    }

    fn columns(&self, model: &Relation) -> Vec<(ColumnKind, String)> {
        let mut columns = vec![(ColumnKind::RowNumber, "#".to_string())];
        columns.extend(
            model
                .column
                .iter()
                .map(|c| (ColumnKind::RelationColumn, c.name.value().to_string())),
        );
        columns
    }

    fn row_count(&self, model: &Relation) -> usize {
        model.row.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Id, InformationItem};
    use crate::models::expression::{List, LiteralExpression};

    fn relation() -> Relation {
        Relation {
            column: vec![
                InformationItem::named(Id::new("c0"), "name"),
                InformationItem::named(Id::new("c1"), "age"),
            ],
            row: vec![List {
                expression: vec![
                    Some(Expression::LiteralExpression(LiteralExpression::new(
                        Id::new("l0"),
                        "\"Ann\"",
                    ))),
                    None,
                ],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_item_leaves_cell_empty() {
        let grid = RelationUIModelMapper.build_grid(&relation()).unwrap();
        assert_eq!(grid.columns()[1].title, "name");
        assert_eq!(grid.cell_text(0, 1), "\"Ann\"");
        assert_eq!(grid.get_cell(0, 2), None);
    }

    #[test]
    fn test_write_back() {
        let mut relation = relation();
        RelationUIModelMapper
            .to_domain_model(&mut relation, 0, 1, Some(GridCellValue::text("\"Bob\"")))
            .unwrap();
        let text = relation.row[0].expression[0]
            .as_ref()
            .and_then(Expression::as_literal)
            .map(|l| l.text.clone());
        assert_eq!(text.as_deref(), Some("\"Bob\""));
        assert!(matches!(
            RelationSection::of(&relation, 3),
            Err(MapperError::ColumnOutOfRange { .. })
        ));
    }
}
