//! Element and expression converters
//!
//! Each converter module offers a `wb_from_dmn` / `dmn_from_wb` pair between
//! the interchange model (`models::dmn`) and the editor model. Converting
//! interchange to editor and back preserves every semantic field; the only
//! normalisations are that absent optional values and empty or default ones
//! are written the same way.

pub mod context;
pub mod decision_table;
pub mod expression;
pub mod function;
pub mod invocation;
pub mod item_definition;
pub mod list;
pub mod literal;
pub mod nodes;
pub mod property;
pub mod relation;

pub use expression::ExpressionConverter;

/// Error during element or expression conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Unsupported expression kind <{kind}> (id '{id}')")]
    UnsupportedExpression { kind: String, id: String },
    #[error("Unsupported element kind <{kind}> (id '{id}')")]
    UnsupportedElement { kind: String, id: String },
    #[error("Invalid {attribute} value '{value}': {reason}")]
    InvalidAttribute {
        attribute: String,
        value: String,
        reason: String,
    },
}

impl ConversionError {
    pub(crate) fn invalid(attribute: &str, value: &str, reason: String) -> Self {
        ConversionError::InvalidAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}
