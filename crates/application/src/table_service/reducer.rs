use std::collections::BTreeMap;
use std::str::FromStr;

use estatedesk_core::AppResult;
use estatedesk_domain::{
    ColumnFilterState, Pagination, PublicationStatus, QueryParams, SortingState,
    reduce_column_filters,
};

/// What happens to the current page when column filters change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPagePolicy {
    /// Keep the page index; only tab and page-size changes reset it.
    #[default]
    KeepPage,
    /// Jump back to page 1 whenever the effective filters change.
    ResetToFirstPage,
}

/// Mount-time configuration of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Initial page window.
    pub pagination: Pagination,
    /// Page behavior on filter edits.
    pub filter_page_policy: FilterPagePolicy,
    /// Initial status tab; `None` for resources without a status.
    pub status: Option<PublicationStatus>,
    /// Fixed or selector-driven free-form fields. A `status` entry selects the tab.
    pub selectors: BTreeMap<String, String>,
}

/// Discrete input of the table state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A page index was picked.
    PageChanged(u32),
    /// A page size was picked; the page returns to 1.
    PageSizeChanged(u32),
    /// The whole window was replaced.
    PaginationChanged(Pagination),
    /// A sort header was clicked.
    SortingChanged(SortingState),
    /// The column filter list was replaced.
    FiltersChanged(Vec<ColumnFilterState>),
    /// The status tab changed; the page returns to 1.
    ExternalTabChanged(PublicationStatus),
    /// Another external selector changed; `None` clears it. The page returns to 1.
    ///
    /// The `status` key drives the status tab; other typed keys are rejected.
    SelectorChanged {
        /// Query key of the selector.
        key: String,
        /// New value.
        value: Option<String>,
    },
    /// A row mutation succeeded; the same params must be fetched again.
    Refresh,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTransition {
    /// Params after the event.
    pub query_params: QueryParams,
    /// Whether the owner must issue a list request.
    pub should_refetch: bool,
}

/// Transient UI state of one list table and the params derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pagination: Pagination,
    sorting: SortingState,
    column_filters: Vec<ColumnFilterState>,
    status: Option<PublicationStatus>,
    selectors: BTreeMap<String, String>,
    filter_page_policy: FilterPagePolicy,
    query_params: QueryParams,
}

impl TableState {
    /// Creates the mount-time state.
    pub fn new(options: TableOptions) -> AppResult<Self> {
        let mut state = Self {
            pagination: options.pagination,
            sorting: SortingState::default(),
            column_filters: Vec::new(),
            status: options.status,
            selectors: BTreeMap::new(),
            filter_page_policy: options.filter_page_policy,
            query_params: QueryParams::default(),
        };
        for (key, value) in options.selectors {
            state.set_selector(key, Some(value))?;
        }
        state.query_params = state.derive_query_params()?;
        Ok(state)
    }

    /// Returns the current request params.
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Returns the current page window.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns the sorting state.
    #[must_use]
    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    /// Returns the per-column filter states as the user left them.
    #[must_use]
    pub fn column_filters(&self) -> &[ColumnFilterState] {
        self.column_filters.as_slice()
    }

    /// Returns the active status tab.
    #[must_use]
    pub fn status(&self) -> Option<PublicationStatus> {
        self.status
    }

    /// Applies one event and reports whether the params changed.
    pub fn apply(&mut self, event: TableEvent) -> AppResult<TableTransition> {
        match event {
            TableEvent::PageChanged(page) => {
                self.pagination = self.pagination.with_page(page)?;
            }
            TableEvent::PageSizeChanged(limit) => {
                self.pagination = self.pagination.with_limit(limit)?;
            }
            TableEvent::PaginationChanged(pagination) => {
                self.pagination = pagination;
            }
            TableEvent::SortingChanged(sorting) => {
                self.sorting = sorting;
            }
            TableEvent::FiltersChanged(filters) => {
                let filters_changed =
                    reduce_column_filters(&filters) != *self.query_params.filters();
                self.column_filters = filters;
                if filters_changed && self.filter_page_policy == FilterPagePolicy::ResetToFirstPage
                {
                    self.pagination = self.pagination.reset();
                }
            }
            TableEvent::ExternalTabChanged(status) => {
                self.status = Some(status);
                self.pagination = self.pagination.reset();
            }
            TableEvent::SelectorChanged { key, value } => {
                self.set_selector(key, value)?;
                self.pagination = self.pagination.reset();
            }
            TableEvent::Refresh => {
                return Ok(TableTransition {
                    query_params: self.query_params.clone(),
                    should_refetch: true,
                });
            }
        }

        let next = self.derive_query_params()?;
        let should_refetch = next != self.query_params;
        self.query_params = next;

        Ok(TableTransition {
            query_params: self.query_params.clone(),
            should_refetch,
        })
    }

    fn set_selector(&mut self, key: String, value: Option<String>) -> AppResult<()> {
        if key == "status" {
            self.status = value
                .as_deref()
                .map(PublicationStatus::from_str)
                .transpose()?;
            return Ok(());
        }

        QueryParams::validate_extra_key(&key)?;
        match value {
            Some(value) => self.selectors.insert(key, value),
            None => self.selectors.remove(&key),
        };
        Ok(())
    }

    fn derive_query_params(&self) -> AppResult<QueryParams> {
        let mut params = QueryParams::new(self.pagination)
            .with_status(self.status)
            .with_filters(reduce_column_filters(&self.column_filters))
            .with_sorting(self.sorting.clone());

        for (key, value) in &self.selectors {
            params = params.with_extra(key.clone(), value.clone())?;
        }

        Ok(params)
    }
}
