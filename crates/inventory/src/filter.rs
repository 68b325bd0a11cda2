//! Client-side search over loaded lists.

use crate::item::StockItem;
use crate::movement::{Movement, MovementType};

/// Type restriction on the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MovementType),
}

impl TypeFilter {
    pub fn matches(&self, kind: MovementType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(k) => *k == kind,
        }
    }
}

impl core::str::FromStr for TypeFilter {
    type Err = stockledger_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<MovementType>().map(TypeFilter::Only)
    }
}

/// Search term + type filter for the history view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovementFilter {
    pub term: String,
    pub kind: TypeFilter,
}

impl MovementFilter {
    pub fn new(term: impl Into<String>, kind: TypeFilter) -> Self {
        Self {
            term: term.into(),
            kind,
        }
    }

    /// True when the user narrowed the list in any way.
    pub fn is_active(&self) -> bool {
        !self.term.is_empty() || self.kind != TypeFilter::All
    }

    pub fn matches(&self, movement: &Movement) -> bool {
        let needle = self.term.to_lowercase();
        let text_hit = contains_folded(&movement.description, &needle)
            || contains_folded(&movement.classification, &needle);
        text_hit && self.kind.matches(movement.kind)
    }
}

/// Why a filtered list came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// A search or type filter excluded every record.
    NoResults,
    /// Nothing has been recorded yet.
    NoRecords,
}

impl EmptyState {
    pub fn for_filter(filter_active: bool) -> Self {
        if filter_active {
            EmptyState::NoResults
        } else {
            EmptyState::NoRecords
        }
    }
}

/// Items whose name contains `term`, ignoring case.
pub fn filter_stock<'a>(items: &'a [StockItem], term: &str) -> Vec<&'a StockItem> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| contains_folded(&item.name, &needle))
        .collect()
}

/// Movements matching the description/classification search AND the type filter.
pub fn filter_movements<'a>(movements: &'a [Movement], filter: &MovementFilter) -> Vec<&'a Movement> {
    movements.iter().filter(|m| filter.matches(m)).collect()
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use stockledger_core::{MovementId, StockItemId};

    fn item(name: &str) -> StockItem {
        StockItem {
            id: StockItemId::new(name),
            name: name.to_string(),
            price: dec!(1),
            quantity: 1,
        }
    }

    fn movement(id: &str, classification: &str, description: &str, kind: MovementType) -> Movement {
        Movement {
            id: MovementId::new(id),
            classification: classification.to_string(),
            description: description.to_string(),
            product_id: StockItemId::new("w1"),
            kind,
            value: Decimal::ZERO,
            created_at: None,
        }
    }

    fn ledger() -> Vec<Movement> {
        vec![
            movement("l1", "Send order", "Send 5 of Widget", MovementType::Expenses),
            movement("l2", "Return to stock", "Return 3 of Widget", MovementType::Income),
            movement("l3", "Send order", "Send 1 of Gadget", MovementType::Expenses),
        ]
    }

    #[test]
    fn stock_search_is_case_insensitive_substring() {
        let items = vec![item("Blue Widget"), item("Gadget"), item("widget mini")];
        let hits: Vec<&str> = filter_stock(&items, "WIDG").iter().map(|i| i.name.as_str()).collect();
        assert_eq!(hits, vec!["Blue Widget", "widget mini"]);
        assert_eq!(filter_stock(&items, "").len(), 3);
        assert!(filter_stock(&items, "sprocket").is_empty());
    }

    #[test]
    fn history_search_covers_description_and_classification() {
        let movements = ledger();
        let by_desc = filter_movements(&movements, &MovementFilter::new("gadget", TypeFilter::All));
        assert_eq!(by_desc.len(), 1);
        assert_eq!(by_desc[0].id.as_str(), "l3");

        let by_class = filter_movements(&movements, &MovementFilter::new("RETURN TO", TypeFilter::All));
        assert_eq!(by_class.len(), 1);
        assert_eq!(by_class[0].id.as_str(), "l2");
    }

    #[test]
    fn search_and_type_filter_combine_with_and() {
        let movements = ledger();
        let f = MovementFilter::new("widget", TypeFilter::Only(MovementType::Expenses));
        let hits = filter_movements(&movements, &f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "l1");

        let only_income = MovementFilter::new("", TypeFilter::Only(MovementType::Income));
        assert_eq!(filter_movements(&movements, &only_income).len(), 1);
    }

    #[test]
    fn type_filter_parses_all_and_types() {
        assert_eq!("ALL".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "expenses".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(MovementType::Expenses)
        );
        assert!("misc".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn empty_state_depends_on_active_filter() {
        assert!(!MovementFilter::default().is_active());
        assert!(MovementFilter::new("x", TypeFilter::All).is_active());
        assert!(MovementFilter::new("", TypeFilter::Only(MovementType::Income)).is_active());
        assert_eq!(EmptyState::for_filter(true), EmptyState::NoResults);
        assert_eq!(EmptyState::for_filter(false), EmptyState::NoRecords);
    }
}
