//! Primitive DMN properties shared by every element kind
//!
//! Identifiers, descriptions, names, qualified type references and
//! information items, plus explicit identifier generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Element identifier
///
/// An empty identifier stands for "no id attribute" in the XML model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Id(value.into())
    }

    /// Create an identifier from the next value of `ids`
    pub fn generate(ids: &mut dyn IdGenerator) -> Self {
        Id(ids.next_id())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.0 = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text description; absent descriptions are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Self {
        Description(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.0 = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Element name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Name(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.0 = value.into();
    }
}

/// Qualified type reference such as `feel:string`
///
/// The default (empty) QName means the element carries no `typeRef`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QName {
    pub prefix: String,
    pub local_part: String,
}

impl QName {
    pub fn new(prefix: impl Into<String>, local_part: impl Into<String>) -> Self {
        QName {
            prefix: prefix.into(),
            local_part: local_part.into(),
        }
    }

    /// Parse the `prefix:local` form used by `typeRef` attributes
    ///
    /// # Example
    ///
    /// ```rust
    /// use dmn_editor_core::models::common::QName;
    ///
    /// let qname = QName::parse("feel:string");
    /// assert_eq!(qname.prefix, "feel");
    /// assert_eq!(qname.local_part, "string");
    /// assert_eq!(qname.to_string(), "feel:string");
    /// ```
    pub fn parse(value: &str) -> Self {
        match value.split_once(':') {
            Some((prefix, local)) => QName::new(prefix, local),
            None => QName::new("", value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.local_part.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            f.write_str(&self.local_part)
        } else {
            write!(f, "{}:{}", self.prefix, self.local_part)
        }
    }
}

/// Named, typed variable (context entry variable, relation column, parameter)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationItem {
    pub id: Id,
    pub description: Description,
    pub name: Name,
    pub type_ref: QName,
}

impl InformationItem {
    pub fn named(id: Id, name: impl Into<String>) -> Self {
        InformationItem {
            id,
            name: Name::new(name),
            ..Default::default()
        }
    }
}

/// Source of fresh element identifiers
///
/// Passed explicitly into the marshaller and the grid so that no
/// process-wide generator is involved.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID (v4) identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` identifiers, mostly useful in tests
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qname_without_prefix() {
        let q = QName::parse("number");
        assert_eq!(q.prefix, "");
        assert_eq!(q.to_string(), "number");
        assert!(QName::parse("").is_empty());
    }

    #[test]
    fn sequential_ids_are_distinct() {
        let mut ids = SequentialIdGenerator::new("n");
        assert_eq!(ids.next_id(), "n-0");
        assert_eq!(ids.next_id(), "n-1");
    }
}
