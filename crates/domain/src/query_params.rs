//! Request parameters of one admin list fetch and their query-string encoding.
//!
//! Pagination, status and sorting own their keys; free-form fields may not
//! reuse them or the bracketed filter keys.

use std::collections::BTreeMap;

use estatedesk_core::{AppError, AppResult};

use crate::{ColumnFilterMap, Pagination, PublicationStatus, SortingState};

/// Query keys owned by the typed fields of [`QueryParams`].
pub const RESERVED_QUERY_KEYS: &[&str] =
    &["page", "limit", "status", "orderBy", "orderDirection"];

/// Resolved parameters of one list request.
///
/// Equality is structural; the table reducer compares successive values to decide
/// whether a refetch is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pagination: Option<Pagination>,
    status: Option<PublicationStatus>,
    filters: ColumnFilterMap,
    sorting: SortingState,
    extra: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates params for one page window and nothing else.
    #[must_use]
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::default()
        }
    }

    /// Creates params that ask for every row, as the `getAll` option loaders do.
    #[must_use]
    pub fn unpaginated() -> Self {
        Self::default()
    }

    /// Returns the page window, if the request is paginated.
    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Returns the status tab filter.
    #[must_use]
    pub fn status(&self) -> Option<PublicationStatus> {
        self.status
    }

    /// Returns the flattened column filters.
    #[must_use]
    pub fn filters(&self) -> &ColumnFilterMap {
        &self.filters
    }

    /// Returns the sorting state.
    #[must_use]
    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    /// Returns a free-form field.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Replaces the page window.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Replaces the status tab filter.
    #[must_use]
    pub fn with_status(mut self, status: Option<PublicationStatus>) -> Self {
        self.status = status;
        self
    }

    /// Replaces the column filters wholesale.
    #[must_use]
    pub fn with_filters(mut self, filters: ColumnFilterMap) -> Self {
        self.filters = filters;
        self
    }

    /// Replaces the sorting state.
    #[must_use]
    pub fn with_sorting(mut self, sorting: SortingState) -> Self {
        self.sorting = sorting;
        self
    }

    /// Sets a free-form field such as `parentId` or a tab selector.
    ///
    /// Keys owned by the typed fields and bracketed filter keys are rejected so
    /// that every query key is encoded once.
    pub fn with_extra(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> AppResult<Self> {
        let key = key.into();
        Self::validate_extra_key(&key)?;
        self.extra.insert(key, value.into());
        Ok(self)
    }

    /// Checks that `key` can be used as a free-form field.
    pub fn validate_extra_key(key: &str) -> AppResult<()> {
        if key.trim().is_empty() {
            return Err(AppError::Validation("query field key must not be empty".to_owned()));
        }

        if RESERVED_QUERY_KEYS.contains(&key) || key.ends_with("[]") {
            return Err(AppError::Validation(format!("query field '{key}' is reserved")));
        }

        Ok(())
    }

    /// Drops `page` and `limit`, keeping every other constraint.
    #[must_use]
    pub fn without_pagination(mut self) -> Self {
        self.pagination = None;
        self
    }

    /// Encodes the params as ordered query-string pairs.
    ///
    /// Filter values use the backend's bracketed array keys (`key[]=value`).
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(pagination) = self.pagination {
            pairs.push(("page".to_owned(), pagination.page().to_string()));
            pairs.push(("limit".to_owned(), pagination.limit().to_string()));
        }

        if let Some(status) = self.status {
            pairs.push(("status".to_owned(), status.as_str().to_owned()));
        }

        for (key, values) in self.filters.iter() {
            for value in values {
                pairs.push((format!("{key}[]"), value.clone()));
            }
        }

        if let Some(sort) = self.sorting.primary() {
            pairs.push(("orderBy".to_owned(), sort.column_id().to_owned()));
            pairs.push(("orderDirection".to_owned(), sort.direction().to_owned()));
        }

        for (key, value) in &self.extra {
            pairs.push((key.clone(), value.clone()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use estatedesk_core::AppError;

    use super::QueryParams;
    use crate::{
        ColumnFilterState, ColumnSort, Pagination, PublicationStatus, SortingState,
        reduce_column_filters,
    };

    fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
        values
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn default_page_window_is_encoded_first() {
        let params = QueryParams::new(Pagination::default());
        assert_eq!(params.to_query_pairs(), pairs(&[("page", "1"), ("limit", "12")]));
    }

    #[test]
    fn filters_status_and_sort_are_encoded() {
        let filters = reduce_column_filters(&[ColumnFilterState::new("provinceCode", ["HN", "HCM"])
            .unwrap_or_else(|_| unreachable!())]);
        let sorting = SortingState::new(vec![
            ColumnSort::new("updatedAt", true).unwrap_or_else(|_| unreachable!()),
        ]);
        let params = QueryParams::new(Pagination::default())
            .with_status(Some(PublicationStatus::Draft))
            .with_filters(filters)
            .with_sorting(sorting)
            .with_extra("parentId", "4")
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            params.to_query_pairs(),
            pairs(&[
                ("page", "1"),
                ("limit", "12"),
                ("status", "draft"),
                ("provinceCode[]", "HN"),
                ("provinceCode[]", "HCM"),
                ("orderBy", "updatedAt"),
                ("orderDirection", "desc"),
                ("parentId", "4"),
            ])
        );
    }

    #[test]
    fn equality_is_structural() {
        let left = QueryParams::new(Pagination::default()).with_status(Some(PublicationStatus::Published));
        let right = QueryParams::new(Pagination::default()).with_status(Some(PublicationStatus::Published));
        assert_eq!(left, right);
        assert_ne!(left, right.with_status(Some(PublicationStatus::Draft)));
    }

    #[test]
    fn unpaginated_requests_omit_page_and_limit() {
        let params = QueryParams::new(Pagination::default())
            .with_extra("parentId", "null")
            .unwrap_or_else(|_| unreachable!())
            .without_pagination();
        assert_eq!(params.to_query_pairs(), pairs(&[("parentId", "null")]));
        assert_eq!(QueryParams::unpaginated().to_query_pairs(), Vec::new());
    }

    #[test]
    fn extra_fields_cannot_shadow_typed_keys() {
        for key in [
            "page",
            "limit",
            "status",
            "orderBy",
            "orderDirection",
            "provinceCode[]",
            " ",
        ] {
            let result = QueryParams::new(Pagination::default()).with_extra(key, "2");
            assert!(matches!(result, Err(AppError::Validation(_))), "{key}");
        }

        let params = QueryParams::new(Pagination::default())
            .with_status(Some(PublicationStatus::Published))
            .with_extra("parentId", "4")
            .unwrap_or_else(|_| unreachable!());
        let keys: Vec<String> = params.to_query_pairs().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["page", "limit", "status", "parentId"]);
    }
}
