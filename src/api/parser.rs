// src/api/parser.rs
//! Turns raw HTTP responses into domain pages of results.
//!
//! Success bodies go through serde; error bodies are read as Notion's error
//! object and classified into `NotionErrorCode`.

use super::client::ApiResponse;
use super::notion_client_adapter::{convert_block_value, convert_page};
use super::responses::{
    NotionError, PaginatedResponse, QueryDatabaseResponse, RetrieveBlockChildrenResponse,
};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{Block, PageRecord};
use reqwest::StatusCode;

/// Parse any Notion API response, surfacing API errors as `AppError`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        parse_error_body(&result.data, result.status, &result.url)
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        NotionClientError::Deserialization {
            source: e,
            body: preview,
        }
        .into()
    })
}

fn parse_error_body<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return Err(AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
        });
    }

    // Fallback to generic error with HTTP status code
    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

/// One page of a block-children listing.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    response.map_results(convert_block_value)
}

/// One page of a database query.
pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<PageRecord>, AppError> {
    let response: QueryDatabaseResponse = parse_api_response(result)?;
    response.map_results(convert_page)
}
