//! Payment domain: aggregate, lifecycle events, and the CQRS handlers that
//! orchestrate provider calls against the repository and event store.

pub mod command_handler;
pub mod commands;
pub mod dto;
pub mod events;
pub mod model;
pub mod query_handler;
pub mod service;

pub use command_handler::CommandHandler;
pub use query_handler::{ListPaymentsQuery, QueryHandler};
pub use service::PaymentService;
