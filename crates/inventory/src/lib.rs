//! Inventory domain module.
//!
//! This crate contains the business rules of the stock ledger, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage): the
//! reconciliation rule for stock movements, the aggregates shown on the
//! Stock/History views, and client-side search.

pub mod filter;
pub mod item;
pub mod movement;
pub mod reconcile;
pub mod summary;

pub use filter::{EmptyState, MovementFilter, TypeFilter, filter_movements, filter_stock};
pub use item::{LOW_STOCK_THRESHOLD, NewStockItem, StockItem};
pub use movement::{Movement, MovementPayload, MovementType};
pub use reconcile::{Direction, ReconciledMovement, parse_quantity, preview_value, reconcile};
pub use summary::{BalanceDirection, LedgerSummary, StockSummary};
