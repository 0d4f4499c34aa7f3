//! Column definitions and the filter metadata that turns a column into a filter.

use estatedesk_core::{AppResult, NonEmptyString};
use serde_json::Value;

use crate::AdminResource;

/// How a column is filtered and where its filter options come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilterMeta {
    /// Query key the selected values are sent under.
    pub filter_by: NonEmptyString,
    /// Dotted path of the option value inside an option record.
    pub value_by: String,
    /// Dotted path of the option label; falls back to `value_by`.
    pub label_by: Option<String>,
    /// Field the option search box matches against.
    pub search_by: Option<String>,
    /// Resource listed, without pagination, to build the options.
    pub options_resource: AdminResource,
}

impl ColumnFilterMeta {
    /// Creates filter metadata.
    pub fn new(
        filter_by: impl Into<String>,
        value_by: impl Into<String>,
        options_resource: AdminResource,
    ) -> AppResult<Self> {
        Ok(Self {
            filter_by: NonEmptyString::new(filter_by)?,
            value_by: value_by.into(),
            label_by: None,
            search_by: None,
            options_resource,
        })
    }

    /// Sets the label path.
    #[must_use]
    pub fn with_label_by(mut self, label_by: impl Into<String>) -> Self {
        self.label_by = Some(label_by.into());
        self
    }

    /// Sets the search field.
    #[must_use]
    pub fn with_search_by(mut self, search_by: impl Into<String>) -> Self {
        self.search_by = Some(search_by.into());
        self
    }

    /// Extracts a selectable option from one option record.
    #[must_use]
    pub fn option_from(&self, record: &Value) -> Option<FilterOption> {
        let value = value_at_path(record, self.value_by.as_str())?;
        let label = self
            .label_by
            .as_deref()
            .and_then(|path| value_at_path(record, path))
            .unwrap_or_else(|| value.clone());

        Some(FilterOption { value, label })
    }
}

/// One selectable value of a column filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Value sent to the backend.
    pub value: String,
    /// Text shown in the filter dropdown.
    pub label: String,
}

/// Column of a list table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    id: NonEmptyString,
    header_key: String,
    accessor: String,
    filter: Option<ColumnFilterMeta>,
}

impl ColumnDefinition {
    /// Creates a column reading `accessor` from each row.
    pub fn new(
        id: impl Into<String>,
        header_key: impl Into<String>,
        accessor: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            header_key: header_key.into(),
            accessor: accessor.into(),
            filter: None,
        })
    }

    /// Makes the column filterable.
    #[must_use]
    pub fn with_filter(mut self, filter: ColumnFilterMeta) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Returns the column id used by sorting.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the i18n key of the header.
    #[must_use]
    pub fn header_key(&self) -> &str {
        self.header_key.as_str()
    }

    /// Returns the filter metadata, if the column is filterable.
    #[must_use]
    pub fn filter(&self) -> Option<&ColumnFilterMeta> {
        self.filter.as_ref()
    }

    /// Reads the cell text from a row record.
    #[must_use]
    pub fn cell(&self, row: &Value) -> Option<String> {
        value_at_path(row, self.accessor.as_str())
    }
}

/// Columns of the estate and post tables: the location triple.
pub fn listing_columns() -> AppResult<Vec<ColumnDefinition>> {
    Ok(vec![
        ColumnDefinition::new("province", "table.column.province", "province.name")?.with_filter(
            ColumnFilterMeta::new("provinceCode", "code", AdminResource::Province)?
                .with_label_by("name")
                .with_search_by("code"),
        ),
        ColumnDefinition::new("district", "table.column.district", "district.name")?.with_filter(
            ColumnFilterMeta::new("districtCode", "code", AdminResource::District)?
                .with_label_by("name")
                .with_search_by("code"),
        ),
        ColumnDefinition::new("ward", "table.column.ward", "ward.name")?.with_filter(
            ColumnFilterMeta::new("wardCode", "code", AdminResource::Ward)?
                .with_label_by("name")
                .with_search_by("code"),
        ),
    ])
}

/// Columns of the district table, filterable by province.
pub fn district_columns() -> AppResult<Vec<ColumnDefinition>> {
    Ok(vec![
        ColumnDefinition::new("code", "table.column.code", "districtCode")?,
        ColumnDefinition::new("name", "table.column.name", "district.name")?,
        ColumnDefinition::new(
            "provinceName",
            "table.column.provinceName",
            "district.province.name",
        )?
        .with_filter(
            ColumnFilterMeta::new(
                "provinceCodes",
                "district.province.code",
                AdminResource::District,
            )?
            .with_label_by("district.province.name")
            .with_search_by("provinceName"),
        ),
    ])
}

/// Reads a scalar at a dotted path (`district.province.code`) as text.
#[must_use]
pub fn value_at_path(record: &Value, path: &str) -> Option<String> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }

    match current {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}
