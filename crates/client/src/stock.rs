//! Stock item queries and mutations (`/product`).

use stockledger_core::StockItemId;
use stockledger_inventory::{NewStockItem, StockItem};

use crate::cache::QueryKey;
use crate::error::{ClientError, ClientResult};
use crate::mutation::{self, MutationState};
use crate::ClientContext;

const PRODUCT: &str = "product";

#[derive(Clone)]
pub struct StockService {
    ctx: ClientContext,
    mutations: MutationState,
}

impl StockService {
    pub fn new(ctx: ClientContext) -> Self {
        Self {
            ctx,
            mutations: MutationState::default(),
        }
    }

    /// Current stock list, served from the cache while fresh.
    pub async fn list(&self) -> ClientResult<Vec<StockItem>> {
        if let Some(items) = self.ctx.cache.get(QueryKey::Stock) {
            tracing::debug!("stock list served from cache");
            return Ok(items);
        }

        let items: Vec<StockItem> = self.ctx.api.list(&[PRODUCT]).await?;
        tracing::debug!(count = items.len(), "stock list fetched");
        self.ctx.cache.put(QueryKey::Stock, &items);
        Ok(items)
    }

    pub async fn add(&self, item: &NewStockItem) -> ClientResult<()> {
        mutation::run(
            &self.ctx,
            &self.mutations,
            &[QueryKey::Stock],
            "Item added successfully",
            async {
                self.ctx.api.post(&[PRODUCT], item).await?;
                Ok::<_, ClientError>(())
            },
        )
        .await
    }

    pub async fn update(&self, id: &StockItemId, item: &NewStockItem) -> ClientResult<()> {
        mutation::run(
            &self.ctx,
            &self.mutations,
            &[QueryKey::Stock],
            "Item updated successfully",
            async {
                self.ctx.api.put(&[PRODUCT, id.as_str()], item).await?;
                Ok::<_, ClientError>(())
            },
        )
        .await
    }

    pub async fn delete(&self, id: &StockItemId) -> ClientResult<()> {
        mutation::run(
            &self.ctx,
            &self.mutations,
            &[QueryKey::Stock],
            "Item deleted successfully",
            async {
                self.ctx.api.delete(&[PRODUCT, id.as_str()]).await?;
                Ok::<_, ClientError>(())
            },
        )
        .await
    }

    /// True while any stock mutation is in flight.
    pub fn is_pending(&self) -> bool {
        self.mutations.is_pending()
    }
}
