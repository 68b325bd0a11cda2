//! Stock page: summary cards, searchable table, item form.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Serialize;

use stockledger_client::AppState;
use stockledger_core::{DomainResult, StockItemId};
use stockledger_inventory::{EmptyState, NewStockItem, StockItem, StockSummary, filter_stock};

use crate::Reported;
use crate::cli::{DeleteArgs, StockCommands, StockFormArgs};
use crate::render::{Table, money};

#[derive(Debug, Serialize)]
pub struct StockView<'a> {
    pub item_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub items: Vec<&'a StockItem>,
}

/// Cards are computed over every item; the table only shows search hits.
pub fn view<'a>(items: &'a [StockItem], search: &str) -> DomainResult<StockView<'a>> {
    let summary = StockSummary::from_items(items)?;
    Ok(StockView {
        item_count: summary.item_count,
        total_value: summary.total_value,
        low_stock_count: summary.low_stock_count,
        items: filter_stock(items, search),
    })
}

pub fn render(items: &[StockItem], search: &str) -> DomainResult<String> {
    let view = view(items, search)?;
    let mut out = format!(
        "Items: {} | Inventory value: {} | Low stock: {}\n\n",
        view.item_count,
        money(view.total_value),
        view.low_stock_count
    );

    if view.items.is_empty() {
        out.push_str(match EmptyState::for_filter(!search.is_empty()) {
            EmptyState::NoResults => "No items match this search. Try other keywords.",
            EmptyState::NoRecords => "No items in stock yet. Start by adding a new item.",
        });
        return Ok(out);
    }

    let mut table = Table::new(["NAME", "PRICE", "QUANTITY", "VALUE", "STATUS", "ID"]);
    for item in &view.items {
        table.row([
            item.name.clone(),
            money(item.price),
            item.quantity.to_string(),
            money(item.value()?),
            if item.is_low_stock() { "low stock" } else { "ok" }.to_string(),
            item.id.to_string(),
        ]);
    }
    out.push_str(&table.render());
    Ok(out)
}

pub async fn run(state: &AppState, cmd: StockCommands, json: bool) -> anyhow::Result<()> {
    match cmd {
        StockCommands::List(args) => {
            let items = state.stock.list().await.context("failed to load stock")?;
            if json {
                super::print_json(&view(&items, &args.search)?)
            } else {
                println!("{}", render(&items, &args.search)?);
                Ok(())
            }
        }
        StockCommands::Add(form) => {
            let draft = parse_form(&form)?;
            state.stock.add(&draft).await.map_err(Reported)?;
            Ok(())
        }
        StockCommands::Update(args) => {
            let id: StockItemId = args.id.parse()?;
            let draft = parse_form(&args.form)?;
            state.stock.update(&id, &draft).await.map_err(Reported)?;
            Ok(())
        }
        StockCommands::Delete(DeleteArgs { id, yes }) => {
            let id: StockItemId = id.parse()?;
            if !yes {
                super::unconfirmed("item", id.as_str());
                return Ok(());
            }
            state.stock.delete(&id).await.map_err(Reported)?;
            Ok(())
        }
    }
}

fn parse_form(form: &StockFormArgs) -> anyhow::Result<NewStockItem> {
    Ok(NewStockItem::parse(&form.name, &form.price, &form.quantity)?)
}
