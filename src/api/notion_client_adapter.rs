// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to our domain model.
//!
//! Only the block and property shapes the publisher reads are converted;
//! everything else collapses into `Block::Other` or `PropertyValue::Other`.

use super::responses::{NotionBlock, NotionRichText, PageProperty, RawPage};
use crate::error::{AppError, NotionClientError};
use crate::model::{
    Annotations, Block, ImageBlock, PageRecord, PropertyValue, RichTextRun, TextBlock, ToggleBlock,
};
use crate::types::{BlockId, PageId, PropertyName};
use serde_json::Value;
use std::collections::HashMap;

/// Convert one raw block payload into a domain `Block`.
///
/// Payloads `notion-client` cannot decode (block types newer than the
/// library) are kept as `Block::Other` so the rest of the page still renders.
pub fn convert_block_value(value: Value) -> Result<Block, AppError> {
    let block_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    match serde_json::from_value::<NotionBlock>(value.clone()) {
        Ok(notion_block) => convert_block(notion_block, &value),
        Err(e) => {
            log::debug!("Treating undecodable {} block as unsupported: {}", block_type, e);
            Ok(Block::Other { block_type })
        }
    }
}

/// Convert notion-client Block to our domain Block
///
/// `raw` is the payload the block was decoded from; image captions are read
/// from it because notion-client's image value does not carry them.
pub fn convert_block(notion_block: NotionBlock, raw: &Value) -> Result<Block, AppError> {
    use notion_client::objects::block::BlockType;

    let id = notion_block
        .id
        .as_deref()
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        })?;
    let id = BlockId::parse(id)?;

    match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Ok(Block::Paragraph(TextBlock {
            id,
            rich_text: convert_rich_text_array(paragraph.rich_text),
        })),

        BlockType::Heading1 { heading_1 } => Ok(Block::Heading1(TextBlock {
            id,
            rich_text: convert_rich_text_array(heading_1.rich_text),
        })),

        BlockType::Heading2 { heading_2 } => Ok(Block::Heading2(TextBlock {
            id,
            rich_text: convert_rich_text_array(heading_2.rich_text),
        })),

        BlockType::Heading3 { heading_3 } => Ok(Block::Heading3(TextBlock {
            id,
            rich_text: convert_rich_text_array(heading_3.rich_text),
        })),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Ok(Block::BulletedListItem(TextBlock {
                id,
                rich_text: convert_rich_text_array(bulleted_list_item.rich_text),
            }))
        }

        BlockType::Toggle { toggle } => Ok(Block::Toggle(ToggleBlock {
            id,
            title: convert_rich_text_array(toggle.rich_text),
        })),

        BlockType::Image { image } => Ok(Block::Image(ImageBlock {
            id,
            url: file_url(image.file_type),
            caption: image_caption(raw),
        })),

        _ => Ok(Block::Other {
            block_type: raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unsupported")
                .to_string(),
        }),
    }
}

/// Hosted and external files both expose a plain URL.
fn file_url(file: notion_client::objects::file::File) -> String {
    use notion_client::objects::file::File as NcFile;

    match file {
        NcFile::External { external } => external.url,
        NcFile::File { file } => file.url,
    }
}

fn image_caption(raw: &Value) -> Vec<RichTextRun> {
    let Some(caption) = raw.get("image").and_then(|image| image.get("caption")) else {
        return Vec::new();
    };

    match serde_json::from_value::<Vec<NotionRichText>>(caption.clone()) {
        Ok(runs) => convert_rich_text_array(runs),
        Err(e) => {
            log::warn!("Ignoring undecodable image caption: {}", e);
            Vec::new()
        }
    }
}

/// Convert array of rich text items
pub fn convert_rich_text_array(rich_texts: Vec<NotionRichText>) -> Vec<RichTextRun> {
    rich_texts.into_iter().filter_map(convert_rich_text).collect()
}

/// Convert single rich text item; unknown kinds are dropped.
fn convert_rich_text(rich_text: NotionRichText) -> Option<RichTextRun> {
    match rich_text {
        NotionRichText::Text {
            text, annotations, ..
        } => Some(RichTextRun::Text {
            content: text.content,
            link: text.link.map(|link| link.url),
            annotations: convert_annotations(annotations.unwrap_or_default()),
        }),

        NotionRichText::Mention { plain_text, .. } => Some(RichTextRun::Mention { plain_text }),

        NotionRichText::Equation {
            equation,
            annotations,
            ..
        } => Some(RichTextRun::Text {
            content: equation.expression,
            link: None,
            annotations: convert_annotations(annotations),
        }),

        _ => {
            log::debug!("Dropping unsupported rich text run");
            None
        }
    }
}

fn convert_annotations(annotations: notion_client::objects::rich_text::Annotations) -> Annotations {
    Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        code: annotations.code,
    }
}

/// Convert a database row with graceful per-property fallbacks.
pub fn convert_page(raw: RawPage) -> Result<PageRecord, AppError> {
    let id = PageId::parse(&raw.id)?;
    let mut properties = HashMap::new();

    for (name, value) in raw.properties {
        let type_name = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        match serde_json::from_value::<PageProperty>(value) {
            Ok(property) => {
                let converted = match convert_page_property(property) {
                    PropertyValue::Other(_) => PropertyValue::Other(type_name),
                    converted => converted,
                };
                properties.insert(PropertyName::new(name), converted);
            }
            Err(e) => {
                log::warn!(
                    "Failed to convert page property '{}': {}. Skipping.",
                    name,
                    e
                );
            }
        }
    }

    Ok(PageRecord {
        id,
        created_time: raw.created_time,
        last_edited_time: raw.last_edited_time,
        properties,
    })
}

/// Converts a Notion `DateOrDateTime` to a `NaiveDate`.
fn resolve_date(dod: notion_client::objects::property::DateOrDateTime) -> chrono::NaiveDate {
    match dod {
        notion_client::objects::property::DateOrDateTime::Date(d) => d,
        notion_client::objects::property::DateOrDateTime::DateTime(dt) => dt.date_naive(),
    }
}

fn convert_page_property(property: PageProperty) -> PropertyValue {
    use notion_client::objects::page::RollupPropertyValue;

    match property {
        PageProperty::Title { title, .. } => PropertyValue::Title(convert_rich_text_array(title)),
        PageProperty::RichText { rich_text, .. } => {
            PropertyValue::RichText(convert_rich_text_array(rich_text))
        }
        PageProperty::Checkbox { checkbox, .. } => PropertyValue::Checkbox(checkbox),
        PageProperty::Date { date, .. } => {
            PropertyValue::Date(date.and_then(|d| d.start).map(resolve_date))
        }
        PageProperty::Select { select, .. } => {
            PropertyValue::Select(select.and_then(|s| s.name))
        }
        PageProperty::Url { url, .. } => PropertyValue::Url(url),
        PageProperty::Relation { relation, .. } => PropertyValue::Relation(
            relation
                .into_iter()
                .filter_map(|r| {
                    PageId::parse(&r.id)
                        .map_err(|e| {
                            log::warn!("Skipping relation with invalid ID '{}': {}", r.id, e)
                        })
                        .ok()
                })
                .collect(),
        ),
        PageProperty::Rollup { rollup, .. } => match rollup {
            Some(RollupPropertyValue::Array { array, .. }) => {
                PropertyValue::Rollup(array.into_iter().map(convert_page_property).collect())
            }
            _ => PropertyValue::Rollup(Vec::new()),
        },
        _ => PropertyValue::Other("unsupported".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_block_type_becomes_other() {
        let value = json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "some_future_block",
            "some_future_block": {}
        });
        let block = convert_block_value(value).unwrap();
        assert_eq!(
            block,
            Block::Other {
                block_type: "some_future_block".to_string()
            }
        );
    }

    #[test]
    fn test_property_type_name_is_kept_for_unread_properties() {
        let raw: RawPage = serde_json::from_value(json!({
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-07-06T20:25:00.000Z",
            "properties": {
                "Price": { "id": "BJXS", "type": "number", "number": 2.5 },
                "Featured": { "id": "Ftd", "type": "checkbox", "checkbox": true }
            }
        }))
        .unwrap();

        let page = convert_page(raw).unwrap();
        assert_eq!(page.property("Featured"), Some(&PropertyValue::Checkbox(true)));
        assert_eq!(
            page.property("Price"),
            Some(&PropertyValue::Other("number".to_string()))
        );
        assert_eq!(page.created_time, "2022-03-01T19:05:00.000Z");
    }
}
