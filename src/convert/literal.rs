//! Literal expression converter

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, qname_from_dmn,
    qname_to_dmn, text_from_dmn, text_to_dmn,
};
use crate::models::dmn::TLiteralExpression;
use crate::models::expression::LiteralExpression;

pub fn wb_from_dmn(dmn: &TLiteralExpression) -> LiteralExpression {
    LiteralExpression {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        text: text_from_dmn(&dmn.text),
        expression_language: text_from_dmn(&dmn.expression_language),
    }
}

pub fn dmn_from_wb(wb: &LiteralExpression) -> TLiteralExpression {
    TLiteralExpression {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        text: text_to_dmn(&wb.text),
        expression_language: text_to_dmn(&wb.expression_language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_fields() {
        let dmn = TLiteralExpression {
            id: Some("le".to_string()),
            description: Some("doc".to_string()),
            type_ref: Some("feel:number".to_string()),
            text: Some("a * 2".to_string()),
            expression_language: Some("http://www.omg.org/spec/FEEL/20140401".to_string()),
        };
        assert_eq!(dmn_from_wb(&wb_from_dmn(&dmn)), dmn);
    }
}
