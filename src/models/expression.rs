//! Boxed expression model
//!
//! `Expression` is a closed sum type over every expression kind the editor
//! understands. Composite kinds nest further expressions; every collection
//! is an owned, always-initialised `Vec`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::common::{Description, Id, InformationItem, QName};
use super::decision_table::DecisionTable;

/// Discriminant of an [`Expression`], used for editor lookup and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionKind {
    LiteralExpression,
    Context,
    Relation,
    List,
    Invocation,
    DecisionTable,
    FunctionDefinition,
}

impl ExpressionKind {
    pub const ALL: [ExpressionKind; 7] = [
        ExpressionKind::LiteralExpression,
        ExpressionKind::Context,
        ExpressionKind::Relation,
        ExpressionKind::List,
        ExpressionKind::Invocation,
        ExpressionKind::DecisionTable,
        ExpressionKind::FunctionDefinition,
    ];
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpressionKind::LiteralExpression => "literalExpression",
            ExpressionKind::Context => "context",
            ExpressionKind::Relation => "relation",
            ExpressionKind::List => "list",
            ExpressionKind::Invocation => "invocation",
            ExpressionKind::DecisionTable => "decisionTable",
            ExpressionKind::FunctionDefinition => "functionDefinition",
        };
        f.write_str(name)
    }
}

/// Any boxed or literal expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    LiteralExpression(LiteralExpression),
    Context(Context),
    Relation(Relation),
    List(List),
    Invocation(Invocation),
    DecisionTable(DecisionTable),
    FunctionDefinition(FunctionDefinition),
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::LiteralExpression(_) => ExpressionKind::LiteralExpression,
            Expression::Context(_) => ExpressionKind::Context,
            Expression::Relation(_) => ExpressionKind::Relation,
            Expression::List(_) => ExpressionKind::List,
            Expression::Invocation(_) => ExpressionKind::Invocation,
            Expression::DecisionTable(_) => ExpressionKind::DecisionTable,
            Expression::FunctionDefinition(_) => ExpressionKind::FunctionDefinition,
        }
    }

    pub fn id(&self) -> &Id {
        match self {
            Expression::LiteralExpression(e) => &e.id,
            Expression::Context(e) => &e.id,
            Expression::Relation(e) => &e.id,
            Expression::List(e) => &e.id,
            Expression::Invocation(e) => &e.id,
            Expression::DecisionTable(e) => &e.id,
            Expression::FunctionDefinition(e) => &e.id,
        }
    }

    pub fn type_ref(&self) -> &QName {
        match self {
            Expression::LiteralExpression(e) => &e.type_ref,
            Expression::Context(e) => &e.type_ref,
            Expression::Relation(e) => &e.type_ref,
            Expression::List(e) => &e.type_ref,
            Expression::Invocation(e) => &e.type_ref,
            Expression::DecisionTable(e) => &e.type_ref,
            Expression::FunctionDefinition(e) => &e.type_ref,
        }
    }

    /// Literal text, when this is a literal expression
    pub fn as_literal(&self) -> Option<&LiteralExpression> {
        match self {
            Expression::LiteralExpression(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpression {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    pub text: String,
    /// Empty means the enclosing default language
    pub expression_language: String,
}

impl LiteralExpression {
    pub fn new(id: Id, text: impl Into<String>) -> Self {
        LiteralExpression {
            id,
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// `None` marks the default (result) entry
    pub variable: Option<InformationItem>,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    pub context_entry: Vec<ContextEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    /// Items that could not be converted are kept as `None` placeholders
    pub expression: Vec<Option<Expression>>,
}

/// Table of rows over named columns
///
/// Every row holds exactly `column.len()` items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    pub column: Vec<InformationItem>,
    pub row: Vec<List>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub parameter: InformationItem,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    /// The invoked function, usually a literal naming a BKM
    pub expression: Option<Box<Expression>>,
    pub binding: Vec<Binding>,
}

/// Language of a function body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    #[default]
    Feel,
    Java,
    Pmml,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Feel => write!(f, "FEEL"),
            FunctionKind::Java => write!(f, "Java"),
            FunctionKind::Pmml => write!(f, "PMML"),
        }
    }
}

impl FromStr for FunctionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" | "FEEL" => Ok(FunctionKind::Feel),
            "J" | "Java" | "JAVA" => Ok(FunctionKind::Java),
            "P" | "PMML" => Ok(FunctionKind::Pmml),
            _ => Err(format!("Unknown function kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub id: Id,
    pub description: Description,
    pub type_ref: QName,
    pub formal_parameter: Vec<InformationItem>,
    pub expression: Option<Box<Expression>>,
    pub kind: FunctionKind,
}
