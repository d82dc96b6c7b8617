//! Function definition commands

use std::rc::Rc;

use super::{CommandError, ExpressionCommand};
use crate::editors::{
    EditorType, ExpressionEditorDefinitions, FunctionUIModelMapper, UIModelMapper,
};
use crate::grid::{GridCellValue, GridData};
use crate::models::common::IdGenerator;
use crate::models::expression::{Expression, FunctionDefinition, FunctionKind};

/// Change a function's kind, replacing its body with a fresh one of the new kind
pub struct SetKindCommand {
    kind: FunctionKind,
    body: Option<Expression>,
    mapper: FunctionUIModelMapper,
    previous: Option<(FunctionKind, Option<Box<Expression>>)>,
    previous_cell: Option<GridCellValue>,
}

impl SetKindCommand {
    /// FEEL bodies start as literal expressions; Java and PMML bodies come
    /// from the supplementary definitions
    pub fn new(kind: FunctionKind, mapper: FunctionUIModelMapper, ids: &mut dyn IdGenerator) -> Self {
        let body = match kind {
            FunctionKind::Feel => mapper.definitions().get(EditorType::Literal),
            FunctionKind::Java => mapper.supplementary().get(EditorType::FunctionJava),
            FunctionKind::Pmml => mapper.supplementary().get(EditorType::FunctionPmml),
        }
        .and_then(|definition| definition.model(ids));
        Self {
            kind,
            body,
            mapper,
            previous: None,
            previous_cell: None,
        }
    }

    pub fn with_registries(
        kind: FunctionKind,
        definitions: Rc<ExpressionEditorDefinitions>,
        supplementary: Rc<ExpressionEditorDefinitions>,
        ids: &mut dyn IdGenerator,
    ) -> Self {
        Self::new(kind, FunctionUIModelMapper::new(definitions, supplementary), ids)
    }
}

impl ExpressionCommand<FunctionDefinition> for SetKindCommand {
    fn name(&self) -> &'static str {
        "set function kind"
    }

    fn execute_graph(&mut self, model: &mut FunctionDefinition) -> Result<(), CommandError> {
        let old_body = model.expression.take();
        self.previous = Some((model.kind, old_body));
        model.kind = self.kind;
        model.expression = self.body.clone().map(Box::new);
        Ok(())
    }

    fn execute_canvas(
        &mut self,
        model: &FunctionDefinition,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        self.previous_cell = grid.get_cell(0, 0).cloned();
        self.mapper.from_domain_model(model, grid, 0, 0)?;
        Ok(())
    }

    fn undo_graph(&mut self, model: &mut FunctionDefinition) -> Result<(), CommandError> {
        if let Some((kind, body)) = self.previous.take() {
            model.kind = kind;
            model.expression = body;
        }
        Ok(())
    }

    fn undo_canvas(
        &mut self,
        _: &FunctionDefinition,
        grid: &mut dyn GridData,
    ) -> Result<(), CommandError> {
        match self.previous_cell.take() {
            Some(cell) => grid.set_cell(0, 0, cell)?,
            None => {
                grid.delete_cell(0, 0)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Id, SequentialIdGenerator};
    use crate::models::expression::LiteralExpression;

    #[test]
    fn test_switch_to_pmml_and_back() {
        let mapper = FunctionUIModelMapper::new(
            Rc::new(ExpressionEditorDefinitions::core()),
            Rc::new(ExpressionEditorDefinitions::supplementary()),
        );
        let original = FunctionDefinition {
            expression: Some(Box::new(Expression::LiteralExpression(
                LiteralExpression::new(Id::new("body"), "x"),
            ))),
            ..Default::default()
        };
        let mut model = original.clone();
        let mut grid = mapper.build_grid(&model).unwrap();
        let before = grid.clone();

        let mut ids = SequentialIdGenerator::new("k");
        let mut command = SetKindCommand::new(FunctionKind::Pmml, mapper, &mut ids);
        command.execute(&mut model, &mut grid).unwrap();

        assert_eq!(model.kind, FunctionKind::Pmml);
        assert!(matches!(model.expression.as_deref(), Some(Expression::Context(_))));
        let editor = grid.get_cell(0, 0).and_then(GridCellValue::as_editor).unwrap();
        assert_eq!(editor.editor_type, EditorType::FunctionPmml);

        command.undo(&mut model, &mut grid).unwrap();
        assert_eq!(model, original);
        assert_eq!(grid, before);
    }
}
