// src/catalog/properties.rs
//! Reading blog metadata out of database rows.

use crate::constants::*;
use crate::error::AppError;
use crate::model::{PageRecord, Post, PropertyValue, Quote, RichTextRun};
use crate::types::{PageId, Slug};
use std::collections::HashMap;

/// Builds a post from a row of a posts database.
pub fn post_from_record(record: &PageRecord) -> Result<Post, AppError> {
    let title = required_title(record)?;

    let custom_slug = joined_text(record.property(SLUG_PROPERTY));
    let slug = if custom_slug.trim().is_empty() {
        Slug::from_title(&title)
    } else {
        Slug::from_title(&custom_slug)
    };

    let published = match record.property(CUSTOM_CREATED_PROPERTY) {
        Some(PropertyValue::Date(Some(date))) => date.format("%Y-%m-%d").to_string(),
        _ => record.created_time.chars().take(10).collect(),
    };

    Ok(Post {
        id: record.id.clone(),
        title,
        slug,
        doc_type: select_name(record.property(TYPE_PROPERTY)),
        created: record.created_time.clone(),
        edited: record.last_edited_time.clone(),
        published,
        featured: matches!(
            record.property(FEATURED_PROPERTY),
            Some(PropertyValue::Checkbox(true))
        ),
        description: first_text(record.property(DESCRIPTION_PROPERTY)),
        completeness: select_name(record.property(COMPLETENESS_PROPERTY)),
    })
}

/// Builds a quote from a row of the quotes database.
///
/// `resources` maps resource page ids to their names.
pub fn quote_from_record(
    record: &PageRecord,
    resources: &HashMap<PageId, String>,
) -> Result<Quote, AppError> {
    let title = required_title(record)?;

    let resource = match record.property(RESOURCE_PROPERTY) {
        Some(PropertyValue::Relation(ids)) => ids
            .first()
            .and_then(|id| resources.get(id))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };

    let author = first_rollup_item(record.property(AUTHOR_PROPERTY))
        .and_then(PropertyValue::first_text)
        .unwrap_or_default()
        .to_string();

    let source_url = match first_rollup_item(record.property(SOURCE_PROPERTY)) {
        Some(PropertyValue::Url(Some(url))) => url.clone(),
        _ => String::new(),
    };

    Ok(Quote {
        id: record.id.clone(),
        slug: Slug::from_title(&title),
        title,
        doc_type: select_name(first_rollup_item(record.property(SOURCE_TYPE_PROPERTY))),
        created: record.created_time.clone(),
        edited: record.last_edited_time.clone(),
        resource,
        author,
        source_url,
    })
}

/// Name of a resource row.
pub fn resource_name(record: &PageRecord) -> Result<String, AppError> {
    required_title(record)
}

/// The full `Name` title. Mentions carry the whole title, so all runs count.
fn required_title(record: &PageRecord) -> Result<String, AppError> {
    let reason = match record.property(NAME_PROPERTY) {
        Some(value @ PropertyValue::Title(_)) => {
            let title = joined_text(Some(value));
            if !title.is_empty() {
                return Ok(title);
            }
            format!("'{}' title is empty", NAME_PROPERTY)
        }
        Some(other) => format!("'{}' is a {} property", NAME_PROPERTY, other.type_name()),
        None => format!("missing '{}' title", NAME_PROPERTY),
    };
    Err(AppError::malformed(format!("page {}", record.id), reason))
}

fn joined_text(value: Option<&PropertyValue>) -> String {
    match value {
        Some(PropertyValue::Title(runs)) | Some(PropertyValue::RichText(runs)) => {
            runs.iter().map(RichTextRun::plain_text).collect()
        }
        _ => String::new(),
    }
}

fn first_text(value: Option<&PropertyValue>) -> String {
    value
        .and_then(PropertyValue::first_text)
        .unwrap_or_default()
        .to_string()
}

fn select_name(value: Option<&PropertyValue>) -> String {
    match value {
        Some(PropertyValue::Select(Some(name))) => name.clone(),
        _ => String::new(),
    }
}

fn first_rollup_item(value: Option<&PropertyValue>) -> Option<&PropertyValue> {
    match value {
        Some(PropertyValue::Rollup(items)) => items.first(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyName;
    use chrono::NaiveDate;

    fn page_id(n: u8) -> PageId {
        PageId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn record(properties: Vec<(&str, PropertyValue)>) -> PageRecord {
        PageRecord {
            id: page_id(1),
            created_time: "2021-03-04T05:06:07.000Z".to_string(),
            last_edited_time: "2022-01-02T03:04:05.000Z".to_string(),
            properties: properties
                .into_iter()
                .map(|(name, value)| (PropertyName::new(name), value))
                .collect(),
        }
    }

    fn title(text: &str) -> PropertyValue {
        PropertyValue::Title(vec![RichTextRun::text(text)])
    }

    #[test]
    fn test_post_defaults() {
        let post = post_from_record(&record(vec![("Name", title("Hello World"))])).unwrap();

        assert_eq!(post.title, "Hello World");
        assert_eq!(post.slug.as_str(), "hello-world");
        assert_eq!(post.published, "2021-03-04");
        assert!(!post.featured);
        assert_eq!(post.description, "");
        assert_eq!(post.doc_type, "");
        assert_eq!(post.completeness, "");
        assert_eq!(post.edited, "2022-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_post_with_all_properties() {
        let post = post_from_record(&record(vec![
            (
                "Name",
                PropertyValue::Title(vec![RichTextRun::text("Rust "), RichTextRun::text("Tips")]),
            ),
            ("Slug", PropertyValue::RichText(vec![RichTextRun::text("My Custom Slug")])),
            (
                "Custom Created",
                PropertyValue::Date(NaiveDate::from_ymd_opt(2020, 12, 25)),
            ),
            ("Featured", PropertyValue::Checkbox(true)),
            (
                "Description",
                PropertyValue::RichText(vec![
                    RichTextRun::text("First run"),
                    RichTextRun::text(" second run"),
                ]),
            ),
            ("Type", PropertyValue::Select(Some("essay".to_string()))),
            ("Completeness", PropertyValue::Select(Some("draft".to_string()))),
        ]))
        .unwrap();

        assert_eq!(post.title, "Rust Tips");
        assert_eq!(post.slug.as_str(), "my-custom-slug");
        assert_eq!(post.published, "2020-12-25");
        assert!(post.featured);
        assert_eq!(post.description, "First run");
        assert_eq!(post.doc_type, "essay");
        assert_eq!(post.completeness, "draft");
    }

    #[test]
    fn test_blank_slug_falls_back_to_title() {
        let post = post_from_record(&record(vec![
            ("Name", title("Fallback Title")),
            ("Slug", PropertyValue::RichText(vec![RichTextRun::text("   ")])),
        ]))
        .unwrap();
        assert_eq!(post.slug.as_str(), "fallback-title");
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let err = post_from_record(&record(vec![("Featured", PropertyValue::Checkbox(true))]))
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedContent { .. }));
    }

    #[test]
    fn test_title_of_the_wrong_type_names_the_type() {
        let err = post_from_record(&record(vec![("Name", PropertyValue::Checkbox(true))]))
            .unwrap_err();
        match err {
            AppError::MalformedContent { reason, .. } => {
                assert_eq!(reason, "'Name' is a checkbox property");
            }
            other => panic!("expected malformed content, got {:?}", other),
        }
    }

    #[test]
    fn test_quote_reads_rollups_and_resource() {
        let resources = HashMap::from([(page_id(9), "Thinking in Systems".to_string())]);
        let quote = quote_from_record(
            &record(vec![
                ("Name", title("Stocks and Flows")),
                ("Resource", PropertyValue::Relation(vec![page_id(9)])),
                (
                    "Author",
                    PropertyValue::Rollup(vec![PropertyValue::RichText(vec![RichTextRun::text(
                        "Donella Meadows",
                    )])]),
                ),
                (
                    "Source",
                    PropertyValue::Rollup(vec![PropertyValue::Url(Some(
                        "https://example.com/book".to_string(),
                    ))]),
                ),
                (
                    "Source Type",
                    PropertyValue::Rollup(vec![PropertyValue::Select(Some("book".to_string()))]),
                ),
            ]),
            &resources,
        )
        .unwrap();

        assert_eq!(quote.slug.as_str(), "stocks-and-flows");
        assert_eq!(quote.resource, "Thinking in Systems");
        assert_eq!(quote.author, "Donella Meadows");
        assert_eq!(quote.source_url, "https://example.com/book");
        assert_eq!(quote.doc_type, "book");
    }

    #[test]
    fn test_quote_missing_optionals_are_empty() {
        let quote = quote_from_record(
            &record(vec![
                ("Name", title("Lonely")),
                ("Resource", PropertyValue::Relation(vec![page_id(3)])),
                ("Author", PropertyValue::Rollup(vec![])),
            ]),
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(quote.resource, "");
        assert_eq!(quote.author, "");
        assert_eq!(quote.source_url, "");
        assert_eq!(quote.doc_type, "");
    }
}
