//! Command history for one expression editor

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CommandError, ExpressionCommand};
use crate::grid::GridData;

/// Editor session state consulted before running commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    editing_cell: Option<(usize, usize)>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_edit(&mut self, row: usize, column: usize) {
        self.editing_cell = Some((row, column));
    }

    pub fn end_edit(&mut self) {
        self.editing_cell = None;
    }

    /// Cell currently being edited
    pub fn editing_cell(&self) -> Option<(usize, usize)> {
        self.editing_cell
    }

    pub fn is_editing(&self) -> bool {
        self.editing_cell.is_some()
    }
}

/// Undo and redo stacks over commands editing a model of type `M`
pub struct CommandManager<M> {
    undo_stack: Vec<Box<dyn ExpressionCommand<M>>>,
    redo_stack: Vec<Box<dyn ExpressionCommand<M>>>,
}

impl<M> Default for CommandManager<M> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<M> CommandManager<M> {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_session(session: &SessionState, action: &str) -> Result<(), CommandError> {
        match session.editing_cell() {
            Some((row, column)) => Err(CommandError::Vetoed(format!(
                "cannot {} while cell ({}, {}) is being edited",
                action, row, column
            ))),
            None => Ok(()),
        }
    }

    /// Execute a command and record it for undo
    pub fn execute(
        &mut self,
        mut command: Box<dyn ExpressionCommand<M>>,
        model: &mut M,
        grid: &mut dyn GridData,
        session: &SessionState,
    ) -> Result<(), CommandError> {
        Self::check_session(session, command.name())?;
        command.execute(model, grid)?;
        info!("Executed {}", command.name());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    pub fn undo(
        &mut self,
        model: &mut M,
        grid: &mut dyn GridData,
        session: &SessionState,
    ) -> Result<(), CommandError> {
        Self::check_session(session, "undo")?;
        let mut command = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        if let Err(err) = command.undo(model, grid) {
            self.undo_stack.push(command);
            return Err(err);
        }
        debug!("Undid {}", command.name());
        self.redo_stack.push(command);
        Ok(())
    }

    pub fn redo(
        &mut self,
        model: &mut M,
        grid: &mut dyn GridData,
        session: &SessionState,
    ) -> Result<(), CommandError> {
        Self::check_session(session, "redo")?;
        let mut command = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        if let Err(err) = command.execute(model, grid) {
            self.redo_stack.push(command);
            return Err(err);
        }
        debug!("Redid {}", command.name());
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DMNGridData;

    struct Increment;

    impl ExpressionCommand<i32> for Increment {
        fn name(&self) -> &'static str {
            "increment"
        }

        fn execute_graph(&mut self, model: &mut i32) -> Result<(), CommandError> {
            *model += 1;
            Ok(())
        }

        fn execute_canvas(&mut self, _: &i32, _: &mut dyn GridData) -> Result<(), CommandError> {
            Ok(())
        }

        fn undo_graph(&mut self, model: &mut i32) -> Result<(), CommandError> {
            *model -= 1;
            Ok(())
        }

        fn undo_canvas(&mut self, _: &i32, _: &mut dyn GridData) -> Result<(), CommandError> {
            Ok(())
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut manager: CommandManager<i32> = CommandManager::new();
        let mut grid = DMNGridData::new();
        let session = SessionState::new();
        let mut model = 0;

        manager
            .execute(Box::new(Increment), &mut model, &mut grid, &session)
            .unwrap();
        assert_eq!(model, 1);
        manager.undo(&mut model, &mut grid, &session).unwrap();
        assert_eq!(model, 0);
        assert!(manager.can_redo());
        manager.redo(&mut model, &mut grid, &session).unwrap();
        assert_eq!(model, 1);
        assert_eq!(
            manager.redo(&mut model, &mut grid, &session),
            Err(CommandError::NothingToRedo)
        );
    }

    #[test]
    fn test_veto_while_editing() {
        let mut manager: CommandManager<i32> = CommandManager::new();
        let mut grid = DMNGridData::new();
        let mut session = SessionState::new();
        session.begin_edit(0, 1);
        let mut model = 0;

        let result = manager.execute(Box::new(Increment), &mut model, &mut grid, &session);
        assert!(matches!(result, Err(CommandError::Vetoed(_))));
        assert_eq!(model, 0);
        assert!(!manager.can_undo());

        session.end_edit();
        manager
            .execute(Box::new(Increment), &mut model, &mut grid, &session)
            .unwrap();
        assert_eq!(model, 1);
    }
}
