use estatedesk_core::AppResult;
use estatedesk_domain::{
    AdminResource, AdminRow, ColumnDefinition, ColumnFilterMap, ListMeta, ListPage, Pagination,
    RowAction, RowMenuEntry, primary_action_for, row_menu_for,
};
use serde_json::Value;

/// Everything the body renderer needs to draw one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    /// Common row fields.
    pub row: AdminRow,
    /// Raw record, for resource-specific cells.
    pub record: &'a Value,
    /// Dropdown entries for the row's status.
    pub menu: Vec<RowMenuEntry>,
    /// Full-width button action, for rows with a status.
    pub primary_action: Option<RowAction>,
    /// Whether an action on this row is in flight; controls are disabled while set.
    pub is_in_flight: bool,
}

/// Props handed to a [`TableBodyRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableBodyProps<'a> {
    /// Resource listed by the table.
    pub resource: AdminResource,
    /// Column definitions.
    pub columns: &'a [ColumnDefinition],
    /// Rows of the current page.
    pub rows: Vec<RowView<'a>>,
    /// Current page window.
    pub pagination: Pagination,
    /// Active column filters.
    pub filters: &'a ColumnFilterMap,
    /// Paging metadata of the last response.
    pub meta: Option<ListMeta>,
    /// Whether a list request is outstanding.
    pub is_loading: bool,
}

/// Pluggable row body of a list table.
pub trait TableBodyRenderer {
    /// Rendered form of the body.
    type Output;

    /// Renders the body from the current table props.
    fn render(&self, props: TableBodyProps<'_>) -> Self::Output;
}

/// Data side of a list table: the last fetched page and the loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    resource: AdminResource,
    columns: Vec<ColumnDefinition>,
    page: Option<ListPage<Value>>,
    is_loading: bool,
}

impl TableView {
    /// Creates an empty view for `resource`.
    #[must_use]
    pub fn new(resource: AdminResource, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            resource,
            columns,
            page: None,
            is_loading: false,
        }
    }

    /// Marks a list request as started.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
    }

    /// Stores a fetched page.
    pub fn finish_loading(&mut self, page: ListPage<Value>) {
        self.page = Some(page);
        self.is_loading = false;
    }

    /// Clears the loading flag after a failed request, keeping the previous rows.
    pub fn abort_loading(&mut self) {
        self.is_loading = false;
    }

    /// Returns whether a list request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns the number of rows on the current page.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.page.as_ref().map_or(0, |page| page.data.len())
    }

    /// Renders the body with `renderer`.
    ///
    /// `in_flight` lists the ids of rows whose action is still running.
    pub fn render<R: TableBodyRenderer>(
        &self,
        renderer: &R,
        pagination: Pagination,
        filters: &ColumnFilterMap,
        in_flight: &[String],
    ) -> AppResult<R::Output> {
        let records = self
            .page
            .as_ref()
            .map(|page| page.data.as_slice())
            .unwrap_or_default();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let row = AdminRow::from_record(self.resource, record)?;
            let menu = row_menu_for(self.resource, row.status);
            let primary = primary_action_for(self.resource, row.status);
            let is_in_flight = in_flight.contains(&row.id);

            rows.push(RowView {
                row,
                record,
                menu,
                primary_action: primary,
                is_in_flight,
            });
        }

        Ok(renderer.render(TableBodyProps {
            resource: self.resource,
            columns: self.columns.as_slice(),
            rows,
            pagination,
            filters,
            meta: self.page.as_ref().and_then(|page| page.meta),
            is_loading: self.is_loading,
        }))
    }
}
