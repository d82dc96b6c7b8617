//! Structural edit commands
//!
//! Every command pairs a domain mutation (the graph half) with a grid
//! mutation (the canvas half). The graph half always runs first so the
//! grid is repopulated from the already-updated domain model. Either half
//! can decline to run before anything changes.

pub mod cell;
pub mod context;
pub mod decision_table;
pub mod function;
pub mod manager;
pub mod relation;

pub use cell::SetCellValueCommand;
pub use context::{AddContextEntryCommand, DeleteContextEntryCommand};
pub use decision_table::{
    AddDecisionRuleCommand, AddInputClauseCommand, AddOutputClauseCommand,
    DeleteDecisionRuleCommand, DeleteInputClauseCommand, DeleteOutputClauseCommand,
    MoveColumnsCommand, MoveRowsCommand,
};
pub use function::SetKindCommand;
pub use manager::{CommandManager, SessionState};
pub use relation::{
    AddRelationColumnCommand, AddRelationRowCommand, DeleteRelationColumnCommand,
    DeleteRelationRowCommand, MoveRelationColumnsCommand, MoveRelationRowsCommand,
};

use crate::editors::MapperError;
use crate::grid::{GridData, GridError};

/// Error raised by a structural edit command
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Command vetoed: {0}")]
    Vetoed(String),
    #[error("Index {index} is out of range for {what}")]
    OutOfRange { what: &'static str, index: usize },
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("Mapper error: {0}")]
    Mapper(#[from] MapperError),
}

impl From<GridError> for CommandError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidMove(reason) => CommandError::InvalidArgument(reason),
            other => CommandError::Mapper(MapperError::Grid(other)),
        }
    }
}

/// A reversible edit of one expression and its grid
pub trait ExpressionCommand<M> {
    fn name(&self) -> &'static str;

    /// Check the domain half can run
    fn allow_graph(&self, _model: &M) -> Result<(), CommandError> {
        Ok(())
    }

    /// Check the grid half can run
    fn allow_canvas(&self, _model: &M, _grid: &dyn GridData) -> Result<(), CommandError> {
        Ok(())
    }

    fn execute_graph(&mut self, model: &mut M) -> Result<(), CommandError>;

    fn execute_canvas(&mut self, model: &M, grid: &mut dyn GridData) -> Result<(), CommandError>;

    fn undo_graph(&mut self, model: &mut M) -> Result<(), CommandError>;

    fn undo_canvas(&mut self, model: &M, grid: &mut dyn GridData) -> Result<(), CommandError>;

    /// Run both halves, rolling the domain back if the grid half fails
    fn execute(&mut self, model: &mut M, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.allow_graph(model)?;
        self.allow_canvas(model, grid)?;
        self.execute_graph(model)?;
        if let Err(err) = self.execute_canvas(model, grid) {
            self.undo_graph(model)?;
            return Err(err);
        }
        Ok(())
    }

    fn undo(&mut self, model: &mut M, grid: &mut dyn GridData) -> Result<(), CommandError> {
        self.undo_graph(model)?;
        self.undo_canvas(model, grid)
    }
}

pub(crate) fn out_of_range(what: &'static str, index: usize) -> CommandError {
    CommandError::OutOfRange { what, index }
}
