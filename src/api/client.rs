// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations without parsing or business logic.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{Block, PageRecord};
use crate::types::{ApiKey, BlockId, DatabaseId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::{json, Value};

use super::parser::{parse_blocks_pagination, parse_pages_pagination};
use super::responses::PaginatedResponse;

const NOTION_VERSION: &str = "2022-06-28";
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Creates a client that talks to `base_url` instead of api.notion.com.
    pub fn with_base_url(api_key: &ApiKey, base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `query` - Query string pairs
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "POST {} {}",
                url,
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }

        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn query_database(
        &self,
        database_id: &DatabaseId,
        filter: Option<&Value>,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<PageRecord>, AppError> {
        let endpoint = format!("databases/{}/query", database_id.to_dashed());

        let mut body = json!({ "page_size": NOTION_API_PAGE_SIZE });
        if let Some(filter) = filter {
            body["filter"] = filter.clone();
        }
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }

        let response = self.post(&endpoint, &body).await?;
        let result = extract_response_text(response).await?;
        parse_pages_pagination(result)
    }

    async fn list_block_children(
        &self,
        block_id: &BlockId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", block_id.to_dashed());

        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }

        let response = self.get(&endpoint, &query).await?;
        let result = extract_response_text(response).await?;
        parse_blocks_pagination(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
