use super::rich_text::RichTextRun;
use crate::types::{PageId, PropertyName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A page property reduced to the shapes the catalog reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Vec<RichTextRun>),
    RichText(Vec<RichTextRun>),
    Checkbox(bool),
    /// Start of a date property; datetimes are truncated to their date.
    Date(Option<NaiveDate>),
    Select(Option<String>),
    Url(Option<String>),
    Relation(Vec<PageId>),
    /// Rollups of arrays keep every item in order.
    Rollup(Vec<PropertyValue>),
    /// Any property type the catalog never reads, kept by type name.
    Other(String),
}

impl PropertyValue {
    /// Returns the Notion API type name for this property value.
    pub fn type_name(&self) -> &str {
        match self {
            PropertyValue::Title(_) => "title",
            PropertyValue::RichText(_) => "rich_text",
            PropertyValue::Checkbox(_) => "checkbox",
            PropertyValue::Date(_) => "date",
            PropertyValue::Select(_) => "select",
            PropertyValue::Url(_) => "url",
            PropertyValue::Relation(_) => "relation",
            PropertyValue::Rollup(_) => "rollup",
            PropertyValue::Other(name) => name,
        }
    }

    /// Plain text of the first run of a title or rich text property.
    pub fn first_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => {
                runs.first().map(RichTextRun::plain_text)
            }
            _ => None,
        }
    }
}

/// One row of a database query, before it becomes a `Document`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: PageId,
    /// ISO-8601 timestamp exactly as the API returned it.
    pub created_time: String,
    pub last_edited_time: String,
    pub properties: HashMap<PropertyName, PropertyValue>,
}

impl PageRecord {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}
