//! Table validation functionality
//!
//! Validates the shape invariants of tabular expressions: every decision
//! rule has one entry per clause, and every relation row has one item per
//! column. Nested expressions are checked recursively.

use serde::{Deserialize, Serialize};

use crate::models::decision_table::DecisionTable;
use crate::models::drg::DRGElement;
use crate::models::expression::{Expression, Relation};
use crate::models::graph::{DiagramGraph, NodeContent};

/// Result of table validation.
#[derive(Debug, Default, Serialize, Deserialize)]
#[must_use = "validation results should be checked for shape violations"]
pub struct TableValidationResult {
    /// Shape violations found
    pub violations: Vec<ShapeViolation>,
}

impl TableValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Row whose entry count disagrees with its table's columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeViolation {
    /// Id of the decision table or relation
    pub table_id: String,
    pub row: usize,
    pub message: String,
}

/// Table validator
#[derive(Default)]
pub struct TableValidator;

impl TableValidator {
    /// Create a new table validator
    ///
    /// # Example
    ///
    /// ```rust
    /// use dmn_editor_core::validation::tables::TableValidator;
    ///
    /// let validator = TableValidator::new();
    /// ```
    pub fn new() -> Self {
        Self
    }

    pub fn validate_decision_table(&self, table: &DecisionTable) -> TableValidationResult {
        let mut result = TableValidationResult::default();
        self.check_decision_table(table, &mut result);
        result
    }

    pub fn validate_relation(&self, relation: &Relation) -> TableValidationResult {
        let mut result = TableValidationResult::default();
        self.check_relation(relation, &mut result);
        result
    }

    /// Validate an expression and everything nested in it
    pub fn validate_expression(&self, expression: &Expression) -> TableValidationResult {
        let mut result = TableValidationResult::default();
        self.check_expression(expression, &mut result);
        result
    }

    /// Validate the expressions of every decision and business knowledge model
    pub fn validate_graph(&self, graph: &DiagramGraph) -> TableValidationResult {
        let mut result = TableValidationResult::default();
        for (_, node) in graph.nodes() {
            match node {
                NodeContent::DrgElement(DRGElement::Decision(decision)) => {
                    if let Some(expression) = &decision.expression {
                        self.check_expression(expression, &mut result);
                    }
                }
                NodeContent::DrgElement(DRGElement::BusinessKnowledgeModel(bkm)) => {
                    if let Some(body) = bkm
                        .encapsulated_logic
                        .as_ref()
                        .and_then(|f| f.expression.as_deref())
                    {
                        self.check_expression(body, &mut result);
                    }
                }
                _ => {}
            }
        }
        result
    }

    fn check_decision_table(&self, table: &DecisionTable, result: &mut TableValidationResult) {
        for (row, rule) in table.rule.iter().enumerate() {
            if rule.input_entry.len() != table.input.len() {
                result.violations.push(ShapeViolation {
                    table_id: table.id.value().to_string(),
                    row,
                    message: format!(
                        "rule has {} input entries for {} input clauses",
                        rule.input_entry.len(),
                        table.input.len()
                    ),
                });
            }
            if rule.output_entry.len() != table.output.len() {
                result.violations.push(ShapeViolation {
                    table_id: table.id.value().to_string(),
                    row,
                    message: format!(
                        "rule has {} output entries for {} output clauses",
                        rule.output_entry.len(),
                        table.output.len()
                    ),
                });
            }
        }
    }

    fn check_relation(&self, relation: &Relation, result: &mut TableValidationResult) {
        for (row, list) in relation.row.iter().enumerate() {
            if list.expression.len() != relation.column.len() {
                result.violations.push(ShapeViolation {
                    table_id: relation.id.value().to_string(),
                    row,
                    message: format!(
                        "row has {} items for {} columns",
                        list.expression.len(),
                        relation.column.len()
                    ),
                });
            }
        }
    }

    fn check_expression(&self, expression: &Expression, result: &mut TableValidationResult) {
        match expression {
            Expression::LiteralExpression(_) => {}
            Expression::DecisionTable(table) => self.check_decision_table(table, result),
            Expression::Relation(relation) => {
                self.check_relation(relation, result);
                for item in relation.row.iter().flat_map(|r| r.expression.iter().flatten()) {
                    self.check_expression(item, result);
                }
            }
            Expression::Context(context) => {
                for entry in &context.context_entry {
                    if let Some(e) = &entry.expression {
                        self.check_expression(e, result);
                    }
                }
            }
            Expression::List(list) => {
                for item in list.expression.iter().flatten() {
                    self.check_expression(item, result);
                }
            }
            Expression::Invocation(invocation) => {
                if let Some(callee) = &invocation.expression {
                    self.check_expression(callee, result);
                }
                for binding in &invocation.binding {
                    if let Some(e) = &binding.expression {
                        self.check_expression(e, result);
                    }
                }
            }
            Expression::FunctionDefinition(function) => {
                if let Some(body) = &function.expression {
                    self.check_expression(body, result);
                }
            }
        }
    }
}
