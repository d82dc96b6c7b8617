//! DRG element and artifact converters
//!
//! Convert the contents of diagram nodes. Requirement lists are left empty
//! here: the marshaller derives them from graph edges.

use super::property::{
    description_from_dmn, description_to_dmn, id_from_dmn, id_to_dmn, name_from_dmn, name_to_dmn,
    text_from_dmn, text_to_dmn, variable_from_dmn, variable_to_dmn,
};
use super::{ConversionError, ExpressionConverter, function};
use crate::models::dmn::{
    TBusinessKnowledgeModel, TDRGElement, TDecision, TInputData, TKnowledgeSource,
    TTextAnnotation,
};
use crate::models::drg::{
    BusinessKnowledgeModel, DRGElement, Decision, InputData, KnowledgeSource, TextAnnotation,
};

pub fn input_data_from_dmn(dmn: &TInputData) -> InputData {
    InputData {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        name: name_from_dmn(&dmn.name),
        variable: variable_from_dmn(&dmn.variable),
    }
}

pub fn input_data_to_dmn(wb: &InputData) -> TInputData {
    TInputData {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        name: name_to_dmn(&wb.name),
        variable: variable_to_dmn(&wb.variable),
    }
}

pub fn decision_from_dmn(
    dmn: &TDecision,
    expressions: &ExpressionConverter,
) -> Result<Decision, ConversionError> {
    Ok(Decision {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        name: name_from_dmn(&dmn.name),
        question: text_from_dmn(&dmn.question),
        allowed_answers: text_from_dmn(&dmn.allowed_answers),
        variable: variable_from_dmn(&dmn.variable),
        expression: expressions.nested_wb_from_dmn(dmn.expression.as_ref())?,
    })
}

pub fn decision_to_dmn(wb: &Decision, expressions: &ExpressionConverter) -> TDecision {
    TDecision {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        name: name_to_dmn(&wb.name),
        question: text_to_dmn(&wb.question),
        allowed_answers: text_to_dmn(&wb.allowed_answers),
        variable: variable_to_dmn(&wb.variable),
        expression: expressions.nested_dmn_from_wb(wb.expression.as_ref()),
        ..Default::default()
    }
}

pub fn bkm_from_dmn(
    dmn: &TBusinessKnowledgeModel,
    expressions: &ExpressionConverter,
) -> Result<BusinessKnowledgeModel, ConversionError> {
    let encapsulated_logic = match &dmn.encapsulated_logic {
        Some(f) => Some(function::wb_from_dmn(f, expressions)?),
        None => None,
    };
    Ok(BusinessKnowledgeModel {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        name: name_from_dmn(&dmn.name),
        variable: variable_from_dmn(&dmn.variable),
        encapsulated_logic,
    })
}

pub fn bkm_to_dmn(
    wb: &BusinessKnowledgeModel,
    expressions: &ExpressionConverter,
) -> TBusinessKnowledgeModel {
    TBusinessKnowledgeModel {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        name: name_to_dmn(&wb.name),
        variable: variable_to_dmn(&wb.variable),
        encapsulated_logic: wb
            .encapsulated_logic
            .as_ref()
            .map(|f| function::dmn_from_wb(f, expressions)),
        ..Default::default()
    }
}

pub fn knowledge_source_from_dmn(dmn: &TKnowledgeSource) -> KnowledgeSource {
    KnowledgeSource {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        name: name_from_dmn(&dmn.name),
        source_type: text_from_dmn(&dmn.source_type),
        location_uri: text_from_dmn(&dmn.location_uri),
    }
}

pub fn knowledge_source_to_dmn(wb: &KnowledgeSource) -> TKnowledgeSource {
    TKnowledgeSource {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        name: name_to_dmn(&wb.name),
        source_type: text_to_dmn(&wb.source_type),
        location_uri: text_to_dmn(&wb.location_uri),
        ..Default::default()
    }
}

pub fn text_annotation_from_dmn(dmn: &TTextAnnotation) -> TextAnnotation {
    TextAnnotation {
        id: id_from_dmn(&dmn.id),
        description: description_from_dmn(&dmn.description),
        text: text_from_dmn(&dmn.text),
        text_format: text_from_dmn(&dmn.text_format),
    }
}

pub fn text_annotation_to_dmn(wb: &TextAnnotation) -> TTextAnnotation {
    TTextAnnotation {
        id: id_to_dmn(&wb.id),
        description: description_to_dmn(&wb.description),
        text: text_to_dmn(&wb.text),
        text_format: text_to_dmn(&wb.text_format),
    }
}

/// Convert any DRG element; unsupported kinds abort with `UnsupportedElement`
pub fn drg_element_from_dmn(
    dmn: &TDRGElement,
    expressions: &ExpressionConverter,
) -> Result<DRGElement, ConversionError> {
    let element = match dmn {
        TDRGElement::InputData(e) => DRGElement::InputData(input_data_from_dmn(e)),
        TDRGElement::Decision(e) => DRGElement::Decision(decision_from_dmn(e, expressions)?),
        TDRGElement::BusinessKnowledgeModel(e) => {
            DRGElement::BusinessKnowledgeModel(bkm_from_dmn(e, expressions)?)
        }
        TDRGElement::KnowledgeSource(e) => {
            DRGElement::KnowledgeSource(knowledge_source_from_dmn(e))
        }
        TDRGElement::Unsupported { kind, id } => {
            return Err(ConversionError::UnsupportedElement {
                kind: kind.clone(),
                id: id.clone().unwrap_or_default(),
            });
        }
    };
    Ok(element)
}

pub fn drg_element_to_dmn(wb: &DRGElement, expressions: &ExpressionConverter) -> TDRGElement {
    match wb {
        DRGElement::InputData(e) => TDRGElement::InputData(input_data_to_dmn(e)),
        DRGElement::Decision(e) => TDRGElement::Decision(decision_to_dmn(e, expressions)),
        DRGElement::BusinessKnowledgeModel(e) => {
            TDRGElement::BusinessKnowledgeModel(bkm_to_dmn(e, expressions))
        }
        DRGElement::KnowledgeSource(e) => TDRGElement::KnowledgeSource(knowledge_source_to_dmn(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_drg_element_aborts() {
        let dmn = TDRGElement::Unsupported {
            kind: "decisionService".to_string(),
            id: Some("ds".to_string()),
        };
        let err = drg_element_from_dmn(&dmn, &ExpressionConverter::default()).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedElement { .. }));
    }

    #[test]
    fn knowledge_source_round_trips() {
        let dmn = TKnowledgeSource {
            id: Some("ks".to_string()),
            name: Some("Policy".to_string()),
            source_type: Some("document".to_string()),
            location_uri: Some("http://example.com/policy".to_string()),
            ..Default::default()
        };
        assert_eq!(knowledge_source_to_dmn(&knowledge_source_from_dmn(&dmn)), dmn);
    }
}
