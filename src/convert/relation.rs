//! Relation converter

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, information_item_from_dmn,
    information_item_to_dmn, qname_from_dmn, qname_to_dmn,
};
use super::{ConversionError, ExpressionConverter, list};
use crate::models::dmn::TRelation;
use crate::models::expression::Relation;

pub fn wb_from_dmn(
    dmn: &TRelation,
    expressions: &ExpressionConverter,
) -> Result<Relation, ConversionError> {
    let row = dmn
        .row
        .iter()
        .map(|r| list::wb_from_dmn(r, expressions))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Relation {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        column: dmn.column.iter().map(information_item_from_dmn).collect(),
        row,
    })
}

pub fn dmn_from_wb(wb: &Relation, expressions: &ExpressionConverter) -> TRelation {
    TRelation {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        column: wb.column.iter().map(information_item_to_dmn).collect(),
        row: wb
            .row
            .iter()
            .map(|r| list::dmn_from_wb(r, expressions))
            .collect(),
    }
}
