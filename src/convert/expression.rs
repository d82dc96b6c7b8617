//! Expression dispatch
//!
//! Routes each expression variant to its converter with an exhaustive
//! match. The interchange model's `Unsupported` variant is the only kind
//! without a converter and yields `ConversionError::UnsupportedExpression`.

use tracing::warn;

use super::{
    ConversionError, context, decision_table, function, invocation, list, literal, relation,
};
use crate::models::dmn::TExpression;
use crate::models::expression::Expression;

/// Closed-set expression converter
///
/// With `strict` unset, an unsupported expression nested inside another
/// element converts to an absent child and a warning; with `strict` set it
/// aborts the conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionConverter {
    strict: bool,
}

impl ExpressionConverter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Convert one interchange expression
    ///
    /// # Returns
    ///
    /// The editor expression, `ConversionError::UnsupportedExpression` for a
    /// kind without a converter, or the first error of a nested conversion.
    pub fn wb_from_dmn(&self, dmn: &TExpression) -> Result<Expression, ConversionError> {
        let expression = match dmn {
            TExpression::LiteralExpression(e) => {
                Expression::LiteralExpression(literal::wb_from_dmn(e))
            }
            TExpression::Context(e) => Expression::Context(context::wb_from_dmn(e, self)?),
            TExpression::Relation(e) => Expression::Relation(relation::wb_from_dmn(e, self)?),
            TExpression::List(e) => Expression::List(list::wb_from_dmn(e, self)?),
            TExpression::Invocation(e) => {
                Expression::Invocation(invocation::wb_from_dmn(e, self)?)
            }
            TExpression::DecisionTable(e) => {
                Expression::DecisionTable(decision_table::wb_from_dmn(e)?)
            }
            TExpression::FunctionDefinition(e) => {
                Expression::FunctionDefinition(function::wb_from_dmn(e, self)?)
            }
            TExpression::Unsupported { kind, id } => {
                return Err(ConversionError::UnsupportedExpression {
                    kind: kind.clone(),
                    id: id.clone().unwrap_or_default(),
                });
            }
        };
        Ok(expression)
    }

    /// Convert an expression held as a child of another element
    pub fn nested_wb_from_dmn(
        &self,
        dmn: Option<&TExpression>,
    ) -> Result<Option<Expression>, ConversionError> {
        let Some(dmn) = dmn else {
            return Ok(None);
        };
        match self.wb_from_dmn(dmn) {
            Ok(expression) => Ok(Some(expression)),
            Err(ConversionError::UnsupportedExpression { kind, id }) if !self.strict => {
                warn!(
                    "Dropping unsupported expression <{}> (id '{}'); it will be absent",
                    kind, id
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn dmn_from_wb(&self, wb: &Expression) -> TExpression {
        match wb {
            Expression::LiteralExpression(e) => {
                TExpression::LiteralExpression(literal::dmn_from_wb(e))
            }
            Expression::Context(e) => TExpression::Context(context::dmn_from_wb(e, self)),
            Expression::Relation(e) => TExpression::Relation(relation::dmn_from_wb(e, self)),
            Expression::List(e) => TExpression::List(list::dmn_from_wb(e, self)),
            Expression::Invocation(e) => TExpression::Invocation(invocation::dmn_from_wb(e, self)),
            Expression::DecisionTable(e) => {
                TExpression::DecisionTable(decision_table::dmn_from_wb(e))
            }
            Expression::FunctionDefinition(e) => {
                TExpression::FunctionDefinition(function::dmn_from_wb(e, self))
            }
        }
    }

    pub fn nested_dmn_from_wb(&self, wb: Option<&Expression>) -> Option<TExpression> {
        wb.map(|e| self.dmn_from_wb(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dmn::{TContext, TContextEntry, TLiteralExpression};

    fn unsupported() -> TExpression {
        TExpression::Unsupported {
            kind: "filter".to_string(),
            id: Some("f1".to_string()),
        }
    }

    #[test]
    fn unsupported_kind_is_an_explicit_error() {
        let err = ExpressionConverter::default()
            .wb_from_dmn(&unsupported())
            .unwrap_err();
        match err {
            ConversionError::UnsupportedExpression { kind, id } => {
                assert_eq!(kind, "filter");
                assert_eq!(id, "f1");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn nested_unsupported_becomes_absent_unless_strict() {
        let ctx = TExpression::Context(TContext {
            context_entry: vec![
                TContextEntry {
                    variable: None,
                    expression: Some(unsupported()),
                },
                TContextEntry {
                    variable: None,
                    expression: Some(TExpression::LiteralExpression(TLiteralExpression {
                        text: Some("1".to_string()),
                        ..Default::default()
                    })),
                },
            ],
            ..Default::default()
        });

        let Expression::Context(converted) = ExpressionConverter::new(false).wb_from_dmn(&ctx).unwrap()
        else {
            panic!("expected context");
        };
        assert_eq!(converted.context_entry.len(), 2);
        assert!(converted.context_entry[0].expression.is_none());
        assert!(converted.context_entry[1].expression.is_some());

        assert!(ExpressionConverter::new(true).wb_from_dmn(&ctx).is_err());
    }
}
