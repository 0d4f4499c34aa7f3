//! EstateDesk admin console composition root.

#![forbid(unsafe_code)]

mod cli;
mod console_config;
mod listing_session;
mod text_renderer;

use std::sync::Arc;

use clap::Parser;
use estatedesk_application::{
    ConfirmationFlow, FilterOptionService, FilterPagePolicy, RowActionOutcome, RowActionRequest,
    RowActionService, RowActionTracker, TableEvent, TableOptions, TableOrchestrator, TableView,
};
use estatedesk_core::{AppError, AppResult};
use estatedesk_domain::{
    AdminResource, ColumnDefinition, ColumnFilterState, ColumnSort, Pagination,
    PublicationStatus, RowAction, SortingState, district_columns, listing_columns,
};
use estatedesk_infrastructure::{
    HttpAdminClient, InMemoryAccessTokenStore, StatusResponseErrorHandler, TracingNotifier,
};
use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::console_config::{ConsoleConfig, init_tracing};
use crate::listing_session::{ListingSession, PendingFetch};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = ConsoleConfig::load()?;
    let client = Arc::new(build_client(&config)?);

    match cli.command {
        Command::List {
            resource,
            tab,
            page,
            limit,
            filters,
            sort,
        } => {
            let options = table_options(&config, resource, tab, limit)?;
            let mut events = Vec::new();
            if !filters.is_empty() {
                let filters = filters
                    .iter()
                    .map(|filter| ColumnFilterState::parse(filter))
                    .collect::<AppResult<Vec<_>>>()?;
                events.push(TableEvent::FiltersChanged(filters));
            }
            if let Some(sort) = sort {
                events.push(TableEvent::SortingChanged(SortingState::new(vec![
                    ColumnSort::parse(sort.as_str())?,
                ])));
            }
            if let Some(page) = page {
                events.push(TableEvent::PageChanged(page));
            }

            run_list(client, resource, options, events).await
        }
        Command::Action {
            resource,
            id,
            status,
            action,
            yes,
        } => {
            let options = table_options(&config, resource, status, None)?;
            run_action(client, resource, options, id, status, action, yes).await
        }
        Command::Options { resource } => run_options(client, resource).await,
    }
}

fn build_client(config: &ConsoleConfig) -> AppResult<HttpAdminClient> {
    let tokens = match config.access_tokens.clone() {
        Some(tokens) => InMemoryAccessTokenStore::with_tokens(tokens),
        None => {
            warn!("BACKEND_ACCESS_TOKEN is not set; requests are sent without credentials");
            InMemoryAccessTokenStore::new()
        }
    };

    HttpAdminClient::new(
        HttpAdminClient::build_http_client(config.request_timeout)?,
        config.backend_api_url.clone(),
        Arc::new(tokens),
        Arc::new(StatusResponseErrorHandler::new()),
    )
}

fn table_options(
    config: &ConsoleConfig,
    resource: AdminResource,
    tab: Option<PublicationStatus>,
    limit: Option<u32>,
) -> AppResult<TableOptions> {
    let filter_page_policy = if config.reset_page_on_filter {
        FilterPagePolicy::ResetToFirstPage
    } else {
        FilterPagePolicy::KeepPage
    };

    Ok(TableOptions {
        pagination: Pagination::first_page(limit.unwrap_or(config.page_size))?,
        filter_page_policy,
        status: resource
            .is_publishable()
            .then(|| tab.unwrap_or_default()),
        ..TableOptions::default()
    })
}

fn columns_for(resource: AdminResource) -> AppResult<Vec<ColumnDefinition>> {
    match resource {
        AdminResource::Estate | AdminResource::Post => listing_columns(),
        AdminResource::District => district_columns(),
        AdminResource::Category
        | AdminResource::Contact
        | AdminResource::Province
        | AdminResource::Ward => Ok(Vec::new()),
    }
}

fn open_table(
    client: Arc<HttpAdminClient>,
    resource: AdminResource,
    options: TableOptions,
) -> AppResult<(ListingSession, TableOrchestrator)> {
    let pending = Arc::new(PendingFetch::default());
    let table = TableOrchestrator::new(options, pending.clone())?;
    let view = TableView::new(resource, columns_for(resource)?);
    Ok((ListingSession::new(resource, client, pending, view), table))
}

async fn run_list(
    client: Arc<HttpAdminClient>,
    resource: AdminResource,
    options: TableOptions,
    events: Vec<TableEvent>,
) -> AppResult<()> {
    let (session, table) = open_table(client, resource, options)?;

    table.mount().await;
    for event in events {
        table.dispatch(event).await?;
    }
    session.fetch_pending().await?;

    println!("{}", session.render(&table, &RowActionTracker::new()).await?);
    Ok(())
}

async fn run_action(
    client: Arc<HttpAdminClient>,
    resource: AdminResource,
    options: TableOptions,
    row_id: String,
    status: Option<PublicationStatus>,
    action: RowAction,
    confirmed: bool,
) -> AppResult<()> {
    let (session, table) = open_table(client.clone(), resource, options)?;
    let service = RowActionService::new(client, Arc::new(TracingNotifier::new()));
    let request = RowActionRequest::new(resource, row_id.as_str(), status, action);

    let outcome = if action.requires_confirmation() {
        let flow = ConfirmationFlow::new();
        let prompt = flow.request(request).await?;
        info!(
            title_key = prompt.title_key,
            message_key = prompt.message_key,
            delete_flow = ?prompt.delete_flow,
            "confirmation requested"
        );
        if !confirmed {
            flow.cancel().await;
            println!("{}: re-run with --yes to confirm", prompt.title_key);
            return Ok(());
        }

        flow.confirm(&service, &table).await
    } else {
        Some(service.execute(request, &table).await)
    };

    match outcome {
        Some(RowActionOutcome::Completed) => {
            session.fetch_pending().await?;
            println!("{}", session.render(&table, service.tracker()).await?);
            Ok(())
        }
        Some(RowActionOutcome::OpenEditor) => {
            println!("edit {}", resource.item_path(row_id.as_str()));
            Ok(())
        }
        Some(RowActionOutcome::Rejected(reason)) => Err(AppError::Validation(reason)),
        Some(RowActionOutcome::Failed) => Err(AppError::Internal(format!(
            "{action} on {resource} '{row_id}' failed"
        ))),
        Some(RowActionOutcome::AlreadyInFlight | RowActionOutcome::Stale) | None => {
            warn!(%resource, row_id = %row_id, %action, "row action produced no result");
            Ok(())
        }
    }
}

async fn run_options(client: Arc<HttpAdminClient>, resource: AdminResource) -> AppResult<()> {
    let service = FilterOptionService::new(client);
    let columns = columns_for(resource)?;
    let filters: Vec<_> = columns
        .iter()
        .filter_map(ColumnDefinition::filter)
        .collect();

    if filters.is_empty() {
        println!("{resource} has no filterable columns");
        return Ok(());
    }

    for filter in filters {
        let options = service.load_options(filter).await?;
        println!("{} ({} options)", filter.filter_by, options.len());
        for option in options {
            println!("  {}\t{}", option.value, option.label);
        }
    }

    Ok(())
}
