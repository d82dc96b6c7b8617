//! Item definition converter

use super::decision_table::{unary_tests_from_dmn, unary_tests_to_dmn};
use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, name_from_dmn, name_to_dmn,
    qname_from_dmn, qname_to_dmn, text_from_dmn, text_to_dmn,
};
use crate::models::dmn::TItemDefinition;
use crate::models::drg::ItemDefinition;

pub fn wb_from_dmn(dmn: &TItemDefinition) -> ItemDefinition {
    ItemDefinition {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        name: name_from_dmn(&dmn.name),
        type_ref: qname_from_dmn(&dmn.type_ref),
        type_language: text_from_dmn(&dmn.type_language),
        is_collection: dmn.is_collection.unwrap_or(false),
        allowed_values: dmn.allowed_values.as_ref().map(unary_tests_from_dmn),
        item_component: dmn.item_component.iter().map(wb_from_dmn).collect(),
    }
}

pub fn dmn_from_wb(wb: &ItemDefinition) -> TItemDefinition {
    TItemDefinition {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        name: name_to_dmn(&wb.name),
        type_ref: qname_to_dmn(&wb.type_ref),
        type_language: text_to_dmn(&wb.type_language),
        is_collection: wb.is_collection.then_some(true),
        allowed_values: wb.allowed_values.as_ref().map(unary_tests_to_dmn),
        item_component: wb.item_component.iter().map(dmn_from_wb).collect(),
    }
}
