use clap::{Parser, Subcommand};
use estatedesk_domain::{AdminResource, PublicationStatus, RowAction};

/// Command-line admin console for the listings backend.
#[derive(Debug, Parser)]
#[command(name = "estatedesk", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one page of a resource table.
    List {
        /// estates, posts, categories, contacts, provinces, districts or wards.
        resource: AdminResource,
        /// Status tab of publishable resources.
        #[arg(long)]
        tab: Option<PublicationStatus>,
        /// 1-based page index.
        #[arg(long)]
        page: Option<u32>,
        /// Page size; defaults to TABLE_PAGE_SIZE.
        #[arg(long)]
        limit: Option<u32>,
        /// Column filter as key=v1,v2. Repeatable.
        #[arg(long = "filter", value_name = "KEY=VALUES")]
        filters: Vec<String>,
        /// Sort as column[:asc|desc].
        #[arg(long)]
        sort: Option<String>,
    },
    /// Run a row action and print the refreshed page.
    Action {
        resource: AdminResource,
        /// Row id, or the location code.
        id: String,
        /// Current status of the row; required for estates and posts.
        #[arg(long)]
        status: Option<PublicationStatus>,
        /// moveToTop, edit, publish, unPublish or delete.
        action: RowAction,
        /// Confirm publish, unpublish and delete without asking.
        #[arg(long)]
        yes: bool,
    },
    /// Print the selectable values of every filterable column.
    Options { resource: AdminResource },
}
