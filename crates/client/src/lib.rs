//! `stockledger-client`
//!
//! **Responsibility:** thin client for the stock ledger REST backend.
//!
//! This crate provides:
//! - A JSON REST client over the `/product` and `/logs` endpoints
//! - An in-memory query cache, invalidated after every successful mutation
//! - Query/mutation services for stock items and movements
//! - User-facing notifications for mutation outcomes
//!
//! The backend remains the authority; client-side checks only avoid sending
//! requests that are known to be invalid.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod mutation;
pub mod notify;
pub mod orders;
pub mod stock;

pub use cache::{QueryCache, QueryKey};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, FALLBACK_MESSAGE};
pub use http::ApiClient;
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier};
pub use orders::OrderService;
pub use stock::StockService;

use std::sync::Arc;

/// Handles shared by the stock and order services.
#[derive(Clone)]
pub struct ClientContext {
    pub api: ApiClient,
    pub cache: Arc<QueryCache>,
    pub notifier: Arc<dyn Notifier>,
}

/// Application state: one context, one service per resource.
#[derive(Clone)]
pub struct AppState {
    pub stock: StockService,
    pub orders: OrderService,
}

impl AppState {
    /// Build the client stack from configuration.
    pub fn new(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let api = ApiClient::new(config)?;
        let cache = Arc::new(QueryCache::new(config.stale_time));
        let ctx = ClientContext {
            api,
            cache,
            notifier,
        };

        let stock = StockService::new(ctx.clone());
        let orders = OrderService::new(ctx, stock.clone());

        Ok(Self { stock, orders })
    }
}
