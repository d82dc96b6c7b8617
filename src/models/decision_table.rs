//! Decision table model
//!
//! A decision table is a list of input clauses, a list of output clauses and
//! a list of rules. Each rule carries one input entry per input clause and
//! one output entry per output clause; structural edits keep those counts
//! equal at all times.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::common::{Description, Id, QName};
use super::expression::LiteralExpression;

/// Hit policy of a decision table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitPolicy {
    #[default]
    Unique,
    First,
    Priority,
    Any,
    Collect,
    RuleOrder,
    OutputOrder,
}

impl fmt::Display for HitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HitPolicy::Unique => "UNIQUE",
            HitPolicy::First => "FIRST",
            HitPolicy::Priority => "PRIORITY",
            HitPolicy::Any => "ANY",
            HitPolicy::Collect => "COLLECT",
            HitPolicy::RuleOrder => "RULE ORDER",
            HitPolicy::OutputOrder => "OUTPUT ORDER",
        };
        f.write_str(s)
    }
}

impl FromStr for HitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNIQUE" => Ok(HitPolicy::Unique),
            "FIRST" => Ok(HitPolicy::First),
            "PRIORITY" => Ok(HitPolicy::Priority),
            "ANY" => Ok(HitPolicy::Any),
            "COLLECT" => Ok(HitPolicy::Collect),
            "RULE ORDER" => Ok(HitPolicy::RuleOrder),
            "OUTPUT ORDER" => Ok(HitPolicy::OutputOrder),
            _ => Err(format!("Unknown hit policy: {}", s)),
        }
    }
}

/// Aggregation applied by a `COLLECT` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinAggregator {
    Sum,
    Count,
    Min,
    Max,
}

impl fmt::Display for BuiltinAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuiltinAggregator::Sum => "SUM",
            BuiltinAggregator::Count => "COUNT",
            BuiltinAggregator::Min => "MIN",
            BuiltinAggregator::Max => "MAX",
        };
        f.write_str(s)
    }
}

impl FromStr for BuiltinAggregator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUM" => Ok(BuiltinAggregator::Sum),
            "COUNT" => Ok(BuiltinAggregator::Count),
            "MIN" => Ok(BuiltinAggregator::Min),
            "MAX" => Ok(BuiltinAggregator::Max),
            _ => Err(format!("Unknown aggregation: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionTableOrientation {
    #[default]
    RuleAsRow,
    RuleAsColumn,
    CrossTable,
}

impl fmt::Display for DecisionTableOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionTableOrientation::RuleAsRow => "Rule-as-Row",
            DecisionTableOrientation::RuleAsColumn => "Rule-as-Column",
            DecisionTableOrientation::CrossTable => "CrossTable",
        };
        f.write_str(s)
    }
}

impl FromStr for DecisionTableOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rule-as-Row" => Ok(DecisionTableOrientation::RuleAsRow),
            "Rule-as-Column" => Ok(DecisionTableOrientation::RuleAsColumn),
            "CrossTable" => Ok(DecisionTableOrientation::CrossTable),
            _ => Err(format!("Unknown decision table orientation: {}", s)),
        }
    }
}

/// Unary tests text, used for input entries and allowed values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnaryTests {
    pub id: Id,
    pub description: Description,
    pub text: String,
    pub expression_language: String,
}

impl UnaryTests {
    pub fn new(id: Id, text: impl Into<String>) -> Self {
        UnaryTests {
            id,
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputClause {
    pub id: Id,
    pub description: Description,
    pub input_expression: LiteralExpression,
    pub input_values: Option<UnaryTests>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputClause {
    pub id: Id,
    pub description: Description,
    pub name: String,
    pub type_ref: QName,
    pub output_values: Option<UnaryTests>,
    pub default_output_entry: Option<LiteralExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    pub id: Id,
    pub description: Description,
    pub input_entry: Vec<UnaryTests>,
    pub output_entry: Vec<LiteralExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTable {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    pub input: Vec<InputClause>,
    pub output: Vec<OutputClause>,
    pub rule: Vec<DecisionRule>,
    pub hit_policy: HitPolicy,
    pub aggregation: Option<BuiltinAggregator>,
    pub preferred_orientation: DecisionTableOrientation,
    pub output_label: Option<String>,
}

impl DecisionTable {
    /// Index of the first rule whose entry counts disagree with the clause counts
    pub fn first_inconsistent_rule(&self) -> Option<usize> {
        self.rule.iter().position(|r| {
            r.input_entry.len() != self.input.len() || r.output_entry.len() != self.output.len()
        })
    }
}
