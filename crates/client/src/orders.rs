//! Movement queries and mutations (`/logs`).
//!
//! Every movement changes a stock quantity, so successful mutations here
//! invalidate both the movement list and the stock list.

use stockledger_core::{MovementId, StockItemId};
use stockledger_inventory::{Direction, Movement, MovementPayload, ReconciledMovement, reconcile};

use crate::ClientContext;
use crate::cache::QueryKey;
use crate::error::{ClientError, ClientResult};
use crate::mutation::{self, MutationState};
use crate::notify::Notice;
use crate::stock::StockService;

const LOGS: &str = "logs";
const STALE_AFTER_MOVEMENT: [QueryKey; 2] = [QueryKey::Orders, QueryKey::Stock];

#[derive(Clone)]
pub struct OrderService {
    ctx: ClientContext,
    stock: StockService,
    mutations: MutationState,
}

impl OrderService {
    pub fn new(ctx: ClientContext, stock: StockService) -> Self {
        Self {
            ctx,
            stock,
            mutations: MutationState::default(),
        }
    }

    /// Movement history, served from the cache while fresh.
    pub async fn list(&self) -> ClientResult<Vec<Movement>> {
        if let Some(movements) = self.ctx.cache.get(QueryKey::Orders) {
            tracing::debug!("movement list served from cache");
            return Ok(movements);
        }

        let movements: Vec<Movement> = self.ctx.api.list(&[LOGS]).await?;
        tracing::debug!(count = movements.len(), "movement list fetched");
        self.ctx.cache.put(QueryKey::Orders, &movements);
        Ok(movements)
    }

    /// Ship `quantity` units of the selected item.
    pub async fn send_out(
        &self,
        item_id: Option<&StockItemId>,
        quantity: &str,
    ) -> ClientResult<ReconciledMovement> {
        self.submit(item_id, quantity, Direction::SendOut).await
    }

    /// Take `quantity` units of the selected item back into stock.
    pub async fn return_in(
        &self,
        item_id: Option<&StockItemId>,
        quantity: &str,
    ) -> ClientResult<ReconciledMovement> {
        self.submit(item_id, quantity, Direction::ReturnIn).await
    }

    /// Validate against the loaded stock list, then record.
    ///
    /// Every failure is announced; validation failures issue no write.
    async fn submit(
        &self,
        item_id: Option<&StockItemId>,
        quantity: &str,
        direction: Direction,
    ) -> ClientResult<ReconciledMovement> {
        let stock = match self.stock.list().await {
            Ok(stock) => stock,
            Err(err) => return Err(self.reject(direction, err)),
        };

        let movement = match reconcile(&stock, item_id, quantity, direction) {
            Ok(movement) => movement,
            Err(err) => return Err(self.reject(direction, err.into())),
        };

        self.record(&movement).await?;
        Ok(movement)
    }

    fn reject(&self, direction: Direction, err: ClientError) -> ClientError {
        tracing::debug!(?direction, "movement rejected: {err}");
        self.ctx.notifier.notify(Notice::error(err.user_message()));
        err
    }

    /// `POST /logs` with an already reconciled movement.
    pub async fn record(&self, movement: &ReconciledMovement) -> ClientResult<()> {
        let success = match movement.direction() {
            Direction::SendOut => "Shipment sent successfully",
            Direction::ReturnIn => "Return recorded successfully",
        };

        mutation::run(
            &self.ctx,
            &self.mutations,
            &STALE_AFTER_MOVEMENT,
            success,
            async {
                self.ctx.api.post(&[LOGS], movement).await?;
                Ok::<_, ClientError>(())
            },
        )
        .await
    }

    pub async fn update(&self, id: &MovementId, payload: &MovementPayload) -> ClientResult<()> {
        mutation::run(
            &self.ctx,
            &self.mutations,
            &STALE_AFTER_MOVEMENT,
            "Operation updated successfully",
            async {
                self.ctx.api.put(&[LOGS, id.as_str()], payload).await?;
                Ok::<_, ClientError>(())
            },
        )
        .await
    }

    pub async fn delete(&self, id: &MovementId) -> ClientResult<()> {
        mutation::run(
            &self.ctx,
            &self.mutations,
            &STALE_AFTER_MOVEMENT,
            "Operation deleted successfully",
            async {
                self.ctx.api.delete(&[LOGS, id.as_str()]).await?;
                Ok::<_, ClientError>(())
            },
        )
        .await
    }

    pub fn is_pending(&self) -> bool {
        self.mutations.is_pending()
    }
}
