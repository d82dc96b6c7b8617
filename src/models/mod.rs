//! Models module
//!
//! Defines the editor's internal DMN model, the DMN interchange model read
//! from and written to XML, and the diagram graph that ties them together.

pub mod common;
pub mod decision_table;
pub mod dmn;
pub mod drg;
pub mod expression;
pub mod graph;

pub use common::{
    Description, Id, IdGenerator, InformationItem, Name, QName, SequentialIdGenerator,
    UuidIdGenerator,
};
pub use decision_table::{
    BuiltinAggregator, DecisionRule, DecisionTable, DecisionTableOrientation, HitPolicy,
    InputClause, OutputClause, UnaryTests,
};
pub use drg::{
    BusinessKnowledgeModel, DMNDiagram, DRGElement, Decision, InputData, ItemDefinition,
    KnowledgeSource, TextAnnotation,
};
pub use expression::{
    Binding, Context, ContextEntry, Expression, ExpressionKind, FunctionDefinition, FunctionKind,
    Invocation, List, LiteralExpression, Relation,
};
pub use graph::{
    AssociationDirection, DefaultGraphFactory, DiagramGraph, EdgeContent, GraphFactory, Metadata,
    NodeContent,
};
