//! Decision table converter
//!
//! Default hit policy (`UNIQUE`) and default orientation (`Rule-as-Row`) are
//! written as absent attributes.

use super::ConversionError;
use super::literal;
use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, qname_from_dmn,
    qname_to_dmn, text_from_dmn, text_to_dmn,
};
use crate::models::decision_table::{
    DecisionRule, DecisionTable, DecisionTableOrientation, HitPolicy, InputClause, OutputClause,
    UnaryTests,
};
use crate::models::dmn::{
    TDecisionRule, TDecisionTable, TInputClause, TOutputClause, TUnaryTests,
};

pub fn unary_tests_from_dmn(dmn: &TUnaryTests) -> UnaryTests {
    UnaryTests {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        text: text_from_dmn(&dmn.text),
        expression_language: text_from_dmn(&dmn.expression_language),
    }
}

pub fn unary_tests_to_dmn(wb: &UnaryTests) -> TUnaryTests {
    TUnaryTests {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        text: text_to_dmn(&wb.text),
        expression_language: text_to_dmn(&wb.expression_language),
    }
}

fn parse_attr<T>(attribute: &str, value: &Option<String>) -> Result<Option<T>, ConversionError>
where
    T: std::str::FromStr<Err = String>,
{
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|reason| ConversionError::invalid(attribute, v, reason)),
    }
}

pub fn wb_from_dmn(dmn: &TDecisionTable) -> Result<DecisionTable, ConversionError> {
    let hit_policy: Option<HitPolicy> = parse_attr("hitPolicy", &dmn.hit_policy)?;
    let orientation: Option<DecisionTableOrientation> =
        parse_attr("preferredOrientation", &dmn.preferred_orientation)?;

    Ok(DecisionTable {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        type_ref: qname_from_dmn(&dmn.type_ref),
        input: dmn
            .input
            .iter()
            .map(|i| InputClause {
                id: id_from_dmn(&i.id),
                description: description_from_dmn(&i.description),
                input_expression: i
                    .input_expression
                    .as_ref()
                    .map(literal::wb_from_dmn)
                    .unwrap_or_default(),
                input_values: i.input_values.as_ref().map(unary_tests_from_dmn),
            })
            .collect(),
        output: dmn
            .output
            .iter()
            .map(|o| OutputClause {
                id: id_from_dmn(&o.id),
                description: description_from_dmn(&o.description),
                name: text_from_dmn(&o.name),
                type_ref: qname_from_dmn(&o.type_ref),
                output_values: o.output_values.as_ref().map(unary_tests_from_dmn),
                default_output_entry: o.default_output_entry.as_ref().map(literal::wb_from_dmn),
            })
            .collect(),
        rule: dmn
            .rule
            .iter()
            .map(|r| DecisionRule {
                id: id_from_dmn(&r.id),
                description: description_from_dmn(&r.description),
                input_entry: r.input_entry.iter().map(unary_tests_from_dmn).collect(),
                output_entry: r.output_entry.iter().map(literal::wb_from_dmn).collect(),
            })
            .collect(),
        hit_policy: hit_policy.unwrap_or_default(),
        aggregation: parse_attr("aggregation", &dmn.aggregation)?,
        preferred_orientation: orientation.unwrap_or_default(),
        output_label: dmn.output_label.clone(),
    })
}

pub fn dmn_from_wb(wb: &DecisionTable) -> TDecisionTable {
    TDecisionTable {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        type_ref: qname_to_dmn(&wb.type_ref),
        input: wb
            .input
            .iter()
            .map(|i| TInputClause {
                id: id_to_dmn(&i.id),
                description: description_to_dmn(&i.description),
                input_expression: Some(literal::dmn_from_wb(&i.input_expression)),
                input_values: i.input_values.as_ref().map(unary_tests_to_dmn),
            })
            .collect(),
        output: wb
            .output
            .iter()
            .map(|o| TOutputClause {
                id: id_to_dmn(&o.id),
                description: description_to_dmn(&o.description),
                name: text_to_dmn(&o.name),
                type_ref: qname_to_dmn(&o.type_ref),
                output_values: o.output_values.as_ref().map(unary_tests_to_dmn),
                default_output_entry: o.default_output_entry.as_ref().map(literal::dmn_from_wb),
            })
            .collect(),
        rule: wb
            .rule
            .iter()
            .map(|r| TDecisionRule {
                id: id_to_dmn(&r.id),
                description: description_to_dmn(&r.description),
                input_entry: r.input_entry.iter().map(unary_tests_to_dmn).collect(),
                output_entry: r.output_entry.iter().map(literal::dmn_from_wb).collect(),
            })
            .collect(),
        hit_policy: match wb.hit_policy {
            HitPolicy::Unique => None,
            other => Some(other.to_string()),
        },
        aggregation: wb.aggregation.map(|a| a.to_string()),
        preferred_orientation: match wb.preferred_orientation {
            DecisionTableOrientation::RuleAsRow => None,
            other => Some(other.to_string()),
        },
        output_label: wb.output_label.clone(),
    }
}
