//! Context converter

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, information_item_from_dmn,
    information_item_to_dmn, qname_from_dmn, qname_to_dmn,
};
use super::{ConversionError, ExpressionConverter};
use crate::models::dmn::{TContext, TContextEntry};
use crate::models::expression::{Context, ContextEntry};

pub fn wb_from_dmn(
    dmn: &TContext,
    expressions: &ExpressionConverter,
) -> Result<Context, ConversionError> {
    let mut context_entry = Vec::with_capacity(dmn.context_entry.len());
    for entry in &dmn.context_entry {
        context_entry.push(ContextEntry {
            variable: entry.variable.as_ref().map(information_item_from_dmn),
            expression: expressions.nested_wb_from_dmn(entry.expression.as_ref())?,
        });
    }
    Ok(Context {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        context_entry,
    })
}

pub fn dmn_from_wb(wb: &Context, expressions: &ExpressionConverter) -> TContext {
    TContext {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        context_entry: wb
            .context_entry
            .iter()
            .map(|entry| TContextEntry {
                variable: entry.variable.as_ref().map(information_item_to_dmn),
                expression: expressions.nested_dmn_from_wb(entry.expression.as_ref()),
            })
            .collect(),
    }
}
