//! List converter

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, qname_from_dmn,
    qname_to_dmn,
};
use super::{ConversionError, ExpressionConverter};
use crate::models::dmn::{TExpression, TList, TLiteralExpression};
use crate::models::expression::List;

/// Items that convert to nothing stay in place as `None` so positions hold
pub fn wb_from_dmn(dmn: &TList, expressions: &ExpressionConverter) -> Result<List, ConversionError> {
    let expression = dmn
        .expression
        .iter()
        .map(|e| expressions.nested_wb_from_dmn(Some(e)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(List {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        expression,
    })
}

/// Absent items are written as empty literal expressions so later items keep their position
pub fn dmn_from_wb(wb: &List, expressions: &ExpressionConverter) -> TList {
    TList {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        expression: wb
            .expression
            .iter()
            .map(|e| match e {
                Some(e) => expressions.dmn_from_wb(e),
                None => TExpression::LiteralExpression(TLiteralExpression::default()),
            })
            .collect(),
    }
}
