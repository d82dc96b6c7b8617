//! Validation functionality
//!
//! Provides validation logic for:
//! - XML well-formedness of DMN documents
//! - Diagram graph structure (containment, requirement endpoints, cycles)
//! - Decision table and relation shape invariants

pub mod graph;
pub mod tables;
pub mod xml;

pub use graph::{GraphIssue, GraphValidationResult, GraphValidator};
pub use tables::{ShapeViolation, TableValidationResult, TableValidator};
pub use xml::{validate_dmn_file, validate_dmn_xml};
