//! Function definition converter
//!
//! `FEEL` is the default kind and is written as an absent `kind` attribute.

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, information_item_from_dmn,
    information_item_to_dmn, qname_from_dmn, qname_to_dmn,
};
use super::{ConversionError, ExpressionConverter};
use crate::models::dmn::TFunctionDefinition;
use crate::models::expression::{FunctionDefinition, FunctionKind};

pub fn kind_from_dmn(kind: &Option<String>) -> Result<FunctionKind, ConversionError> {
    match kind.as_deref() {
        None | Some("") => Ok(FunctionKind::Feel),
        Some(value) => value
            .parse()
            .map_err(|reason| ConversionError::invalid("kind", value, reason)),
    }
}

pub fn kind_to_dmn(kind: FunctionKind) -> Option<String> {
    match kind {
        FunctionKind::Feel => None,
        other => Some(other.to_string()),
    }
}

pub fn wb_from_dmn(
    dmn: &TFunctionDefinition,
    expressions: &ExpressionConverter,
) -> Result<FunctionDefinition, ConversionError> {
    Ok(FunctionDefinition {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        formal_parameter: dmn
            .formal_parameter
            .iter()
            .map(information_item_from_dmn)
            .collect(),
        expression: expressions
            .nested_wb_from_dmn(dmn.expression.as_deref())?
            .map(Box::new),
        kind: kind_from_dmn(&dmn.kind)?,
    })
}

pub fn dmn_from_wb(wb: &FunctionDefinition, expressions: &ExpressionConverter) -> TFunctionDefinition {
    TFunctionDefinition {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        formal_parameter: wb
            .formal_parameter
            .iter()
            .map(information_item_to_dmn)
            .collect(),
        expression: expressions
            .nested_dmn_from_wb(wb.expression.as_deref())
            .map(Box::new),
        kind: kind_to_dmn(wb.kind),
    }
}
