//! Domain types and invariants of the admin console's list tables.

#![forbid(unsafe_code)]

mod column;
mod column_filter;
mod listing;
mod pagination;
mod query_params;
mod resource;
mod row_action;
mod sorting;
mod status;

pub use column::{
    ColumnDefinition, ColumnFilterMeta, FilterOption, district_columns, listing_columns,
    value_at_path,
};
pub use column_filter::{ColumnFilterMap, ColumnFilterState, reduce_column_filters};
pub use listing::{AdminRow, ListMeta, ListPage};
pub use pagination::{DEFAULT_PAGE_SIZE, Pagination};
pub use query_params::{QueryParams, RESERVED_QUERY_KEYS};
pub use resource::{ADMIN_API_PREFIX, ActionEndpoint, ActionMethod, AdminResource};
pub use row_action::{
    DeleteConfirmation, RowAction, RowActionTone, RowMenuEntry, confirmed_actions,
    is_action_permitted, permitted_actions, primary_action, primary_action_for, row_menu,
    row_menu_for,
};
pub use sorting::{ColumnSort, SortingState};
pub use status::PublicationStatus;
