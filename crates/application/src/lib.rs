//! Application services and ports.

#![forbid(unsafe_code)]

mod filter_option_service;
mod row_action_ports;
mod row_action_service;
mod session_ports;
mod table_ports;
mod table_service;

pub use filter_option_service::FilterOptionService;
pub use row_action_ports::{InteractionListener, Notifier, RowActionGateway, Toast, ToastKind};
pub use row_action_service::{
    ConfirmationFlow, ConfirmationPrompt, InFlightToken, RowActionOutcome, RowActionRequest,
    RowActionService, RowActionTracker,
};
pub use session_ports::{
    AccessTokenStore, FailedResponse, ResponseDisposition, ResponseErrorHandler,
};
pub use table_ports::{AdminListGateway, QueryParamsSubscriber};
pub use table_service::{
    FilterPagePolicy, RowView, TableBodyProps, TableBodyRenderer, TableEvent, TableOptions,
    TableOrchestrator, TableSnapshot, TableState, TableTransition, TableView,
};
