use std::str::FromStr;

use chrono::{DateTime, Utc};
use estatedesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AdminResource, PublicationStatus, value_at_path};

/// Paging metadata returned alongside list data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// 1-based page returned.
    pub page: u32,
    /// Page size applied by the backend.
    pub limit: u32,
    /// Number of pages available.
    #[serde(default)]
    pub total_pages: u32,
    /// Number of rows matching the query.
    #[serde(default)]
    pub total_records: u64,
}

/// List response envelope: `{ data, meta }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Rows of the page.
    pub data: Vec<T>,
    /// Paging metadata; absent on unpaginated responses.
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

/// The fields every admin table needs from a row, whatever the resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    /// Identifier used in item paths.
    pub id: String,
    /// Publication status; `None` for resources without one.
    pub status: Option<PublicationStatus>,
    /// Display title.
    pub title: Option<String>,
    /// Last modification time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminRow {
    /// Extracts the common fields from a raw row of `resource`.
    pub fn from_record(resource: AdminResource, record: &Value) -> AppResult<Self> {
        let id = value_at_path(record, resource.row_key()).ok_or_else(|| {
            AppError::Validation(format!(
                "{} row is missing its '{}' field",
                resource.as_str(),
                resource.row_key()
            ))
        })?;

        let status = if resource.is_publishable() {
            record
                .get("status")
                .and_then(Value::as_str)
                .map(PublicationStatus::from_str)
                .transpose()?
        } else {
            None
        };

        let title = resource
            .title_paths()
            .iter()
            .find_map(|path| value_at_path(record, path));

        let updated_at = record
            .get("updatedAt")
            .and_then(Value::as_str)
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|value| value.with_timezone(&Utc));

        Ok(Self {
            id,
            status,
            title,
            updated_at,
        })
    }
}
