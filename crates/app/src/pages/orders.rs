//! Orders page: stock cards plus the send/return forms.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Serialize;

use stockledger_client::AppState;
use stockledger_core::{DomainResult, StockItemId};
use stockledger_inventory::{ReconciledMovement, StockItem, StockSummary, preview_value};

use crate::Reported;
use crate::cli::{MovementArgs, OrdersCommands};
use crate::render::{Table, money};

#[derive(Debug, Serialize)]
pub struct OverviewView<'a> {
    pub item_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub items: &'a [StockItem],
}

pub fn overview(items: &[StockItem]) -> DomainResult<OverviewView<'_>> {
    let summary = StockSummary::from_items(items)?;
    Ok(OverviewView {
        item_count: summary.item_count,
        total_value: summary.total_value,
        items,
    })
}

pub fn render_overview(items: &[StockItem]) -> DomainResult<String> {
    let view = overview(items)?;
    let mut out = format!(
        "Total items: {} | Inventory value: {}\n\n",
        view.item_count,
        money(view.total_value)
    );
    if items.is_empty() {
        out.push_str("No items in stock yet. Start by adding a new item.");
        return Ok(out);
    }

    let mut table = Table::new(["ID", "NAME", "AVAILABLE", "PRICE"]);
    for item in items {
        table.row([
            item.id.to_string(),
            item.name.clone(),
            item.quantity.to_string(),
            money(item.price),
        ]);
    }
    out.push_str(&table.render());
    Ok(out)
}

/// Value of a movement that has not been recorded yet.
#[derive(Debug, Serialize)]
pub struct PreviewView {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub value: Option<Decimal>,
}

pub fn render_preview(preview: &PreviewView) -> String {
    match preview.value {
        Some(v) => format!("Value: {}", money(v)),
        None => "Value: -".to_string(),
    }
}

/// One-line receipt for a recorded movement.
pub fn render_receipt(movement: &ReconciledMovement) -> String {
    format!(
        "{} ({}), stock now {}",
        movement.log.description,
        money(movement.log.value),
        movement.new_quantity
    )
}

pub async fn run(state: &AppState, cmd: OrdersCommands, json: bool) -> anyhow::Result<()> {
    match cmd {
        OrdersCommands::Overview => {
            let items = state.stock.list().await.context("failed to load stock")?;
            if json {
                super::print_json(&overview(&items)?)
            } else {
                println!("{}", render_overview(&items)?);
                Ok(())
            }
        }
        OrdersCommands::Send(args) if args.preview => preview(state, &args, json).await,
        OrdersCommands::Return(args) if args.preview => preview(state, &args, json).await,
        OrdersCommands::Send(args) => {
            let item = selection(&args);
            let movement = state
                .orders
                .send_out(item.as_ref(), &args.quantity)
                .await
                .map_err(Reported)?;
            receipt(&movement, json)
        }
        OrdersCommands::Return(args) => {
            let item = selection(&args);
            let movement = state
                .orders
                .return_in(item.as_ref(), &args.quantity)
                .await
                .map_err(Reported)?;
            receipt(&movement, json)
        }
    }
}

/// A blank `--item` counts as no selection.
fn selection(args: &MovementArgs) -> Option<StockItemId> {
    args.item.parse().ok()
}

async fn preview(state: &AppState, args: &MovementArgs, json: bool) -> anyhow::Result<()> {
    let items = state.stock.list().await.context("failed to load stock")?;
    let preview = PreviewView {
        value: preview_value(&items, selection(args).as_ref(), &args.quantity),
    };
    if json {
        return super::print_json(&preview);
    }
    println!("{}", render_preview(&preview));
    Ok(())
}

fn receipt(movement: &ReconciledMovement, json: bool) -> anyhow::Result<()> {
    if json {
        super::print_json(movement)
    } else {
        println!("{}", render_receipt(movement));
        Ok(())
    }
}
