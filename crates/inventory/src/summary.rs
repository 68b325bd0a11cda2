//! Display aggregates for the Stock and History views.

use rust_decimal::Decimal;

use stockledger_core::{DomainError, DomainResult};

use crate::item::StockItem;
use crate::movement::{Movement, MovementType};

/// Cards shown above the stock table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockSummary {
    pub item_count: usize,
    /// `Σ price × quantity` across all loaded items.
    pub total_value: Decimal,
    pub low_stock_count: usize,
}

impl StockSummary {
    /// Fails instead of overflowing when the inventory value exceeds `Decimal`.
    pub fn from_items(items: &[StockItem]) -> DomainResult<Self> {
        items.iter().try_fold(Self::default(), |mut acc, item| {
            acc.item_count += 1;
            acc.total_value = checked_sum(acc.total_value, item.value()?, "inventory value")?;
            if item.is_low_stock() {
                acc.low_stock_count += 1;
            }
            Ok(acc)
        })
    }
}

/// Which side of the ledger dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDirection {
    /// Income is at least as large as expenses (ties land here).
    IncomeGreater,
    ExpensesGreater,
}

impl BalanceDirection {
    pub fn label(&self) -> &'static str {
        match self {
            BalanceDirection::IncomeGreater => "income greater",
            BalanceDirection::ExpensesGreater => "expenses greater",
        }
    }
}

/// Totals shown on the History view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerSummary {
    pub income_total: Decimal,
    pub income_count: usize,
    pub expense_total: Decimal,
    pub expense_count: usize,
}

impl LedgerSummary {
    /// Fails instead of overflowing when a total, or their difference,
    /// exceeds `Decimal`.
    pub fn from_movements(movements: &[Movement]) -> DomainResult<Self> {
        let summary = movements.iter().try_fold(Self::default(), |mut acc, m| {
            match m.kind {
                MovementType::Income => {
                    acc.income_total = checked_sum(acc.income_total, m.value, "income total")?;
                    acc.income_count += 1;
                }
                MovementType::Expenses => {
                    acc.expense_total = checked_sum(acc.expense_total, m.value, "expense total")?;
                    acc.expense_count += 1;
                }
            }
            Ok::<_, DomainError>(acc)
        })?;

        summary
            .income_total
            .checked_sub(summary.expense_total)
            .ok_or_else(|| DomainError::validation("net balance is too large"))?;
        Ok(summary)
    }

    pub fn operation_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    /// `income − expenses`; negative when more value went out than came back.
    pub fn net_balance(&self) -> Decimal {
        self.income_total.saturating_sub(self.expense_total)
    }

    pub fn direction(&self) -> BalanceDirection {
        if self.income_total >= self.expense_total {
            BalanceDirection::IncomeGreater
        } else {
            BalanceDirection::ExpensesGreater
        }
    }

    /// Magnitude displayed next to the direction label.
    pub fn difference(&self) -> Decimal {
        self.net_balance().abs()
    }
}

fn checked_sum(acc: Decimal, value: Decimal, what: &str) -> DomainResult<Decimal> {
    acc.checked_add(value)
        .ok_or_else(|| DomainError::validation(format!("{what} is too large")))
}
