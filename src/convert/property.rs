//! Primitive property converters
//!
//! Leaf conversions between optional interchange attributes and the
//! internal property types. Absent values read as empty ones and empty
//! values are written as absent.

use crate::models::common::{Description, Id, InformationItem, Name, QName};
use crate::models::dmn::TInformationItem;

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn id_from_dmn(id: &Option<String>) -> Id {
    Id::new(id.clone().unwrap_or_default())
}

pub fn id_to_dmn(id: &Id) -> Option<String> {
    non_empty(id.value())
}

pub fn description_from_dmn(description: &Option<String>) -> Description {
    Description::new(description.clone().unwrap_or_default())
}

pub fn description_to_dmn(description: &Description) -> Option<String> {
    non_empty(description.value())
}

pub fn name_from_dmn(name: &Option<String>) -> Name {
    Name::new(name.clone().unwrap_or_default())
}

pub fn name_to_dmn(name: &Name) -> Option<String> {
    non_empty(name.value())
}

pub fn qname_from_dmn(type_ref: &Option<String>) -> QName {
    type_ref.as_deref().map(QName::parse).unwrap_or_default()
}

pub fn qname_to_dmn(type_ref: &QName) -> Option<String> {
    if type_ref.is_empty() {
        None
    } else {
        Some(type_ref.to_string())
    }
}

pub fn text_from_dmn(text: &Option<String>) -> String {
    text.clone().unwrap_or_default()
}

pub fn text_to_dmn(text: &str) -> Option<String> {
    non_empty(text)
}

/// Element id referenced by an `href`
///
/// Only the fragment after `#` is significant; references into other
/// documents resolve against the local id space.
///
/// # Example
///
/// ```rust
/// use dmn_editor_core::convert::property::id_from_href;
///
/// assert_eq!(id_from_href("#input-1"), "input-1");
/// assert_eq!(id_from_href("other.dmn#input-1"), "input-1");
/// assert_eq!(id_from_href("input-1"), "input-1");
/// ```
pub fn id_from_href(href: &str) -> &str {
    match href.rfind('#') {
        Some(pos) => &href[pos + 1..],
        None => href,
    }
}

pub fn information_item_from_dmn(item: &TInformationItem) -> InformationItem {
    InformationItem {
        id: id_from_dmn(&item.id),
        description: description_from_dmn(&item.description),
        name: name_from_dmn(&item.name),
        type_ref: qname_from_dmn(&item.type_ref),
    }
}

pub fn information_item_to_dmn(item: &InformationItem) -> TInformationItem {
    TInformationItem {
        id: id_to_dmn(&item.id),
        description: description_to_dmn(&item.description),
        name: name_to_dmn(&item.name),
        type_ref: qname_to_dmn(&item.type_ref),
    }
}

/// Variable of a DRG element; an absent variable reads as an empty item
pub fn variable_from_dmn(item: &Option<TInformationItem>) -> InformationItem {
    item.as_ref()
        .map(information_item_from_dmn)
        .unwrap_or_default()
}

/// Variable of a DRG element; an empty item is written as absent
pub fn variable_to_dmn(item: &InformationItem) -> Option<TInformationItem> {
    if *item == InformationItem::default() {
        None
    } else {
        Some(information_item_to_dmn(item))
    }
}
