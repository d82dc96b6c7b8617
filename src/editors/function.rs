//! Function definition grid mapping
//!
//! A function grid has a single cell holding the editor of its body. FEEL
//! bodies resolve against the core registry; Java and PMML bodies use the
//! supplementary registry.

use std::rc::Rc;

use crate::grid::{ColumnKind, GridCellValue, GridData};
use crate::models::expression::{FunctionDefinition, FunctionKind};

use super::definitions::{EditorType, ExpressionEditor, ExpressionEditorDefinitions};
use super::{MapperError, UIModelMapper};

const EDITOR: &str = "function definition";

#[derive(Debug, Clone)]
pub struct FunctionUIModelMapper {
    definitions: Rc<ExpressionEditorDefinitions>,
    supplementary: Rc<ExpressionEditorDefinitions>,
}

impl FunctionUIModelMapper {
    pub fn new(
        definitions: Rc<ExpressionEditorDefinitions>,
        supplementary: Rc<ExpressionEditorDefinitions>,
    ) -> Self {
        Self {
            definitions,
            supplementary,
        }
    }

    pub fn definitions(&self) -> &ExpressionEditorDefinitions {
        &self.definitions
    }

    /// Registry for Java and PMML bodies
    pub fn supplementary(&self) -> &ExpressionEditorDefinitions {
        &self.supplementary
    }

    /// Editor for the body of `function`
    pub fn body_editor(&self, function: &FunctionDefinition) -> Option<ExpressionEditor> {
        let body = function.expression.as_deref();
        match function.kind {
            FunctionKind::Feel => body.and_then(|b| self.definitions.resolve(b)),
            FunctionKind::Java => self
                .supplementary
                .get(EditorType::FunctionJava)
                .map(|d| d.editor(body)),
            FunctionKind::Pmml => self
                .supplementary
                .get(EditorType::FunctionPmml)
                .map(|d| d.editor(body)),
        }
    }

    fn check(row: usize, column: usize) -> Result<(), MapperError> {
        if column != 0 {
            return Err(MapperError::ColumnOutOfRange {
                editor: EDITOR,
                column,
            });
        }
        if row != 0 {
            return Err(MapperError::RowOutOfRange { editor: EDITOR, row });
        }
        Ok(())
    }
}

impl UIModelMapper for FunctionUIModelMapper {
    type Model = FunctionDefinition;

    fn from_domain_model(
        &self,
        model: &FunctionDefinition,
        ui: &mut dyn GridData,
        row: usize,
        column: usize,
    ) -> Result<(), MapperError> {
        Self::check(row, column)?;
        ui.set_cell(row, column, GridCellValue::Expression(self.body_editor(model)))?;
        Ok(())
    }

    fn to_domain_model(
        &self,
        model: &mut FunctionDefinition,
        row: usize,
        column: usize,
        cell: Option<GridCellValue>,
    ) -> Result<(), MapperError> {
        Self::check(row, column)?;
        model.expression = cell
            .as_ref()
            .and_then(GridCellValue::as_editor)
            .and_then(|editor| editor.expression.clone())
            .map(Box::new);
        Ok(())
    }

    fn columns(&self, _model: &FunctionDefinition) -> Vec<(ColumnKind, String)> {
        vec![(ColumnKind::ExpressionEditor, "Body".to_string())]
    }

    fn row_count(&self, _model: &FunctionDefinition) -> usize {
        1
    }
}
