//! Expression editor definitions
//!
//! A definition knows which kind of expression it edits and how to create
//! a fresh instance of it. The registry resolves an expression to the
//! editor handle shown inside a grid cell.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::common::{Id, IdGenerator, InformationItem};
use crate::models::decision_table::DecisionTable;
use crate::models::expression::{
    Context, ContextEntry, Expression, ExpressionKind, FunctionDefinition, FunctionKind,
    Invocation, List, LiteralExpression, Relation,
};

/// Editor kinds, including the supplementary function body editors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorType {
    Literal,
    Context,
    Relation,
    List,
    Invocation,
    DecisionTable,
    Function,
    FunctionJava,
    FunctionPmml,
}

impl From<ExpressionKind> for EditorType {
    fn from(kind: ExpressionKind) -> Self {
        match kind {
            ExpressionKind::LiteralExpression => EditorType::Literal,
            ExpressionKind::Context => EditorType::Context,
            ExpressionKind::Relation => EditorType::Relation,
            ExpressionKind::List => EditorType::List,
            ExpressionKind::Invocation => EditorType::Invocation,
            ExpressionKind::DecisionTable => EditorType::DecisionTable,
            ExpressionKind::FunctionDefinition => EditorType::Function,
        }
    }
}

impl fmt::Display for EditorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditorType::Literal => "Literal expression",
            EditorType::Context => "Context",
            EditorType::Relation => "Relation",
            EditorType::List => "List",
            EditorType::Invocation => "Invocation",
            EditorType::DecisionTable => "Decision Table",
            EditorType::Function => "Function",
            EditorType::FunctionJava => "Java function",
            EditorType::FunctionPmml => "PMML function",
        };
        f.write_str(name)
    }
}

/// Handle to the editor rendering a nested expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionEditor {
    /// Name of the definition that produced this editor
    pub definition: String,
    pub editor_type: EditorType,
    /// Expression being edited
    pub expression: Option<Expression>,
}

pub trait ExpressionEditorDefinition {
    fn editor_type(&self) -> EditorType;

    fn name(&self) -> &str;

    /// Fresh expression of this editor's kind
    fn model(&self, ids: &mut dyn IdGenerator) -> Option<Expression>;

    fn editor(&self, expression: Option<&Expression>) -> ExpressionEditor {
        ExpressionEditor {
            definition: self.name().to_string(),
            editor_type: self.editor_type(),
            expression: expression.cloned(),
        }
    }
}

/// Editor for one of the core expression kinds
#[derive(Debug, Clone)]
pub struct BoxedExpressionDefinition {
    kind: ExpressionKind,
    name: String,
}

impl BoxedExpressionDefinition {
    pub fn new(kind: ExpressionKind) -> Self {
        Self {
            kind,
            name: EditorType::from(kind).to_string(),
        }
    }
}

impl ExpressionEditorDefinition for BoxedExpressionDefinition {
    fn editor_type(&self) -> EditorType {
        EditorType::from(self.kind)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self, ids: &mut dyn IdGenerator) -> Option<Expression> {
        let id = Id::generate(ids);
        let expression = match self.kind {
            ExpressionKind::LiteralExpression => {
                Expression::LiteralExpression(LiteralExpression::new(id, ""))
            }
            ExpressionKind::Context => Expression::Context(Context {
                id,
                context_entry: vec![ContextEntry::default()],
                ..Default::default()
            }),
            ExpressionKind::Relation => Expression::Relation(Relation {
                id,
                ..Default::default()
            }),
            ExpressionKind::List => Expression::List(List {
                id,
                ..Default::default()
            }),
            ExpressionKind::Invocation => Expression::Invocation(Invocation {
                id,
                ..Default::default()
            }),
            ExpressionKind::DecisionTable => Expression::DecisionTable(DecisionTable {
                id,
                ..Default::default()
            }),
            ExpressionKind::FunctionDefinition => {
                Expression::FunctionDefinition(FunctionDefinition {
                    id,
                    ..Default::default()
                })
            }
        };
        Some(expression)
    }
}

/// Context editor for Java and PMML function bodies
#[derive(Debug, Clone, Copy)]
pub struct SupplementaryFunctionDefinition {
    kind: FunctionKind,
}

impl SupplementaryFunctionDefinition {
    pub fn java() -> Self {
        Self {
            kind: FunctionKind::Java,
        }
    }

    pub fn pmml() -> Self {
        Self {
            kind: FunctionKind::Pmml,
        }
    }

    /// Names of the context entries a body of this kind starts with
    pub fn variables(&self) -> &'static [&'static str] {
        match self.kind {
            FunctionKind::Java => &["class", "method"],
            FunctionKind::Pmml => &["document", "model"],
            FunctionKind::Feel => &[],
        }
    }
}

impl ExpressionEditorDefinition for SupplementaryFunctionDefinition {
    fn editor_type(&self) -> EditorType {
        match self.kind {
            FunctionKind::Pmml => EditorType::FunctionPmml,
            _ => EditorType::FunctionJava,
        }
    }

    fn name(&self) -> &str {
        "Context"
    }

    fn model(&self, ids: &mut dyn IdGenerator) -> Option<Expression> {
        let context_entry = self
            .variables()
            .iter()
            .map(|name| ContextEntry {
                variable: Some(InformationItem::named(Id::generate(ids), *name)),
                expression: Some(Expression::LiteralExpression(LiteralExpression::new(
                    Id::generate(ids),
                    "",
                ))),
            })
            .collect();
        Some(Expression::Context(Context {
            id: Id::generate(ids),
            context_entry,
            ..Default::default()
        }))
    }
}

/// Registry of editor definitions
#[derive(Default)]
pub struct ExpressionEditorDefinitions {
    definitions: Vec<Box<dyn ExpressionEditorDefinition>>,
}

impl fmt::Debug for ExpressionEditorDefinitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.definitions.iter().map(|d| d.editor_type()))
            .finish()
    }
}

impl ExpressionEditorDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with an editor for every core expression kind
    pub fn core() -> Self {
        let mut definitions = Self::new();
        for kind in ExpressionKind::ALL {
            definitions.add(Box::new(BoxedExpressionDefinition::new(kind)));
        }
        definitions
    }

    /// Registry of the Java and PMML function body editors
    pub fn supplementary() -> Self {
        let mut definitions = Self::new();
        definitions.add(Box::new(SupplementaryFunctionDefinition::java()));
        definitions.add(Box::new(SupplementaryFunctionDefinition::pmml()));
        definitions
    }

    pub fn add(&mut self, definition: Box<dyn ExpressionEditorDefinition>) {
        self.definitions.push(definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, editor_type: EditorType) -> Option<&dyn ExpressionEditorDefinition> {
        self.definitions
            .iter()
            .find(|d| d.editor_type() == editor_type)
            .map(|d| d.as_ref())
    }

    /// Editor for `expression`, chosen by its kind
    pub fn resolve(&self, expression: &Expression) -> Option<ExpressionEditor> {
        self.get(EditorType::from(expression.kind()))
            .map(|d| d.editor(Some(expression)))
    }
}
