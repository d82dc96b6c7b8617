//! Invocation converter

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, information_item_from_dmn,
    information_item_to_dmn, qname_from_dmn, qname_to_dmn,
};
use super::{ConversionError, ExpressionConverter};
use crate::models::dmn::{TBinding, TInvocation};
use crate::models::expression::{Binding, Invocation};

pub fn wb_from_dmn(
    dmn: &TInvocation,
    expressions: &ExpressionConverter,
) -> Result<Invocation, ConversionError> {
    let mut binding = Vec::with_capacity(dmn.binding.len());
    for b in &dmn.binding {
        binding.push(Binding {
            parameter: information_item_from_dmn(&b.parameter),
            expression: expressions.nested_wb_from_dmn(b.expression.as_ref())?,
        });
    }
    Ok(Invocation {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        expression: expressions
            .nested_wb_from_dmn(dmn.expression.as_deref())?
            .map(Box::new),
        binding,
    })
}

pub fn dmn_from_wb(wb: &Invocation, expressions: &ExpressionConverter) -> TInvocation {
    TInvocation {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        expression: expressions
            .nested_dmn_from_wb(wb.expression.as_deref())
            .map(Box::new),
        binding: wb
            .binding
            .iter()
            .map(|b| TBinding {
                parameter: information_item_to_dmn(&b.parameter),
                expression: expressions.nested_dmn_from_wb(b.expression.as_ref()),
            })
            .collect(),
    }
}
