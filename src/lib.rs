//! DMN Editor Core - diagram marshalling and boxed expression grid editing
//!
//! Provides:
//! - Conversion between DMN XML and a diagram graph (marshaller and per-element converters)
//! - Grid mappers for the boxed expression editors (decision table, relation, context, ...)
//! - Undoable structural edit commands for those grids
//! - Structural validation of diagram graphs and tables
//! - Editor configuration

pub mod commands;
pub mod config;
pub mod convert;
pub mod editors;
pub mod export;
pub mod grid;
pub mod import;
pub mod model;
pub mod models;
pub mod validation;
pub mod xml;

pub use config::{ConfigError, EditorConfig};
pub use convert::ConversionError;
pub use export::{DMNExporter, ExportError};
pub use import::{DMNImporter, ImportError};
pub use model::{DMNMarshaller, MarshalError};
pub use validation::{
    GraphIssue, GraphValidationResult, GraphValidator, TableValidationResult, TableValidator,
};

// Re-export models
pub use models::{
    DRGElement, DecisionTable, DefaultGraphFactory, DiagramGraph, EdgeContent, Expression,
    GraphFactory, Metadata, NodeContent,
};

// Re-export grid editing types
pub use commands::{CommandError, CommandManager, ExpressionCommand, SessionState};
pub use editors::{ExpressionEditorDefinitions, MapperError, UIModelMapper};
pub use grid::{DMNGridData, GridCellValue, GridData, GridError};
