//! History page: ledger totals, filtered movement table, edit and delete.

use anyhow::{Context, bail};
use rust_decimal::Decimal;
use serde::Serialize;

use stockledger_client::AppState;
use stockledger_core::{DomainResult, MovementId, StockItemId};
use stockledger_inventory::{
    EmptyState, LedgerSummary, Movement, MovementFilter, MovementPayload, TypeFilter,
    filter_movements,
};

use crate::Reported;
use crate::cli::{DeleteArgs, HistoryCommands, HistoryListArgs, HistoryUpdateArgs};
use crate::render::{Table, money, timestamp};

#[derive(Debug, Serialize)]
pub struct HistoryView<'a> {
    pub operation_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_total: Decimal,
    pub income_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense_total: Decimal,
    pub expense_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub difference: Decimal,
    pub direction: &'static str,
    pub movements: Vec<&'a Movement>,
}

/// Totals always cover the whole ledger; only the table follows the filter.
pub fn view<'a>(
    movements: &'a [Movement],
    filter: &MovementFilter,
) -> DomainResult<HistoryView<'a>> {
    let summary = LedgerSummary::from_movements(movements)?;
    Ok(HistoryView {
        operation_count: summary.operation_count(),
        income_total: summary.income_total,
        income_count: summary.income_count,
        expense_total: summary.expense_total,
        expense_count: summary.expense_count,
        difference: summary.difference(),
        direction: summary.direction().label(),
        movements: filter_movements(movements, filter),
    })
}

pub fn render(movements: &[Movement], filter: &MovementFilter) -> DomainResult<String> {
    let view = view(movements, filter)?;
    let mut out = format!(
        "Operations: {} ({} returns, {} sends)\n\
         Returns: {} ({})\n\
         Sends: {} ({})\n\
         Difference: {} ({})\n\n",
        view.operation_count,
        view.income_count,
        view.expense_count,
        money(view.income_total),
        view.income_count,
        money(view.expense_total),
        view.expense_count,
        money(view.difference),
        view.direction,
    );

    if view.movements.is_empty() {
        out.push_str(match EmptyState::for_filter(filter.is_active()) {
            EmptyState::NoResults => "No results.",
            EmptyState::NoRecords => "No operations yet.",
        });
        return Ok(out);
    }

    let mut table = Table::new(["DATE", "TYPE", "CLASSIFICATION", "DESCRIPTION", "VALUE", "ID"]);
    for m in &view.movements {
        table.row([
            timestamp(m.created_at),
            m.kind.label().to_string(),
            m.classification.clone(),
            m.description.clone(),
            money(m.value),
            m.id.to_string(),
        ]);
    }
    out.push_str(&table.render());
    Ok(out)
}

pub async fn run(state: &AppState, cmd: HistoryCommands, json: bool) -> anyhow::Result<()> {
    match cmd {
        HistoryCommands::List(args) => {
            let filter = list_filter(&args)?;
            let movements = state.orders.list().await.context("failed to load history")?;
            if json {
                super::print_json(&view(&movements, &filter)?)
            } else {
                println!("{}", render(&movements, &filter)?);
                Ok(())
            }
        }
        HistoryCommands::Update(args) => {
            let id: MovementId = args.id.parse()?;
            let payload = edit_payload(&args)?;
            state.orders.update(&id, &payload).await.map_err(Reported)?;
            Ok(())
        }
        HistoryCommands::Delete(DeleteArgs { id, yes }) => {
            let id: MovementId = id.parse()?;
            if !yes {
                super::unconfirmed("operation", id.as_str());
                return Ok(());
            }
            state.orders.delete(&id).await.map_err(Reported)?;
            Ok(())
        }
    }
}

fn list_filter(args: &HistoryListArgs) -> anyhow::Result<MovementFilter> {
    let kind: TypeFilter = args.kind.parse()?;
    Ok(MovementFilter::new(args.search.clone(), kind))
}

/// Build the edit body. The stock quantity is left alone: editing a record
/// does not replay the reconciliation rule.
fn edit_payload(args: &HistoryUpdateArgs) -> anyhow::Result<MovementPayload> {
    let product_id: StockItemId = args.item.parse()?;
    let value: Decimal = args
        .value
        .trim()
        .parse()
        .with_context(|| format!("value must be a number: {}", args.value.trim()))?;
    if value.is_sign_negative() && !value.is_zero() {
        bail!("value must not be negative");
    }
    Ok(MovementPayload {
        classification: args.classification.trim().to_string(),
        description: args.description.trim().to_string(),
        product_id,
        kind: args.kind.parse()?,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use stockledger_inventory::MovementType;

    fn movement(id: &str, kind: MovementType, description: &str, value: Decimal) -> Movement {
        let classification = match kind {
            MovementType::Income => "Return to stock",
            MovementType::Expenses => "Send order",
        };
        Movement {
            id: MovementId::new(id),
            classification: classification.to_string(),
            description: description.to_string(),
            product_id: StockItemId::new("w1"),
            kind,
            value,
            created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()),
        }
    }

    fn ledger() -> Vec<Movement> {
        vec![
            movement("l1", MovementType::Income, "Return 10 of Widget", dec!(100)),
            movement("l2", MovementType::Expenses, "Send 4 of Widget", dec!(40)),
        ]
    }

    fn update_args(value: &str, kind: &str) -> HistoryUpdateArgs {
        HistoryUpdateArgs {
            id: "l1".into(),
            classification: " Send order ".into(),
            description: "corrected".into(),
            item: "w1".into(),
            kind: kind.into(),
            value: value.into(),
        }
    }

    #[test]
    fn cards_summarize_whole_ledger() {
        let movements = ledger();
        let filter = MovementFilter::new("send", TypeFilter::All);
        let v = view(&movements, &filter).unwrap();
        assert_eq!(v.operation_count, 2);
        assert_eq!(v.difference, dec!(60));
        assert_eq!(v.direction, "income greater");
        assert_eq!(v.movements.len(), 1);

        let out = render(&movements, &filter).unwrap();
        assert!(out.contains("Returns: 100 DA (1)"));
        assert!(out.contains("Sends: 40 DA (1)"));
        assert!(out.contains("Difference: 60 DA (income greater)"));
        assert!(out.contains("2025-03-01 09:30  send"));
        assert!(!out.contains("Return 10 of Widget"));
    }

    #[test]
    fn empty_states_follow_filter() {
        assert!(render(&[], &MovementFilter::default()).unwrap().ends_with("No operations yet."));
        let only_income = MovementFilter::new("", TypeFilter::Only(MovementType::Income));
        let sends = vec![movement("l2", MovementType::Expenses, "Send", dec!(1))];
        assert!(render(&sends, &only_income).unwrap().ends_with("No results."));
    }

    #[test]
    fn oversized_totals_fail_instead_of_panicking() {
        let movements = vec![
            movement("l1", MovementType::Expenses, "Send", Decimal::MAX),
            movement("l2", MovementType::Expenses, "Send", Decimal::MAX),
        ];
        assert!(render(&movements, &MovementFilter::default()).is_err());
    }

    #[test]
    fn list_filter_rejects_unknown_type() {
        let args = HistoryListArgs {
            search: String::new(),
            kind: "misc".into(),
        };
        assert!(list_filter(&args).is_err());
    }

    #[test]
    fn edit_payload_parses_fields() {
        let payload = edit_payload(&update_args("20.5", "expenses")).unwrap();
        assert_eq!(payload.classification, "Send order");
        assert_eq!(payload.kind, MovementType::Expenses);
        assert_eq!(payload.value, dec!(20.5));
        assert_eq!(payload.product_id, StockItemId::new("w1"));
    }

    #[test]
    fn edit_payload_rejects_bad_values() {
        assert!(edit_payload(&update_args("-1", "income")).is_err());
        assert!(edit_payload(&update_args("ten", "income")).is_err());
        assert!(edit_payload(&update_args("1", "other")).is_err());
    }
}
