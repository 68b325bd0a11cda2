//! Stock/order reconciliation.
//!
//! Turns a movement request (selected item, typed quantity, direction) into the
//! movement record to persist and the item's resulting quantity. Every
//! rejection happens here, before any request is built.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, StockItemId, find_by_id};

use crate::item::StockItem;
use crate::movement::{MovementPayload, MovementType};

/// Which way stock moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ship units out; bounded by the quantity on hand.
    SendOut,
    /// Take units back in; unbounded.
    ReturnIn,
}

impl Direction {
    pub fn movement_type(self) -> MovementType {
        match self {
            Direction::SendOut => MovementType::Expenses,
            Direction::ReturnIn => MovementType::Income,
        }
    }

    pub fn classification(self) -> &'static str {
        match self {
            Direction::SendOut => "Send order",
            Direction::ReturnIn => "Return to stock",
        }
    }

    fn describe(self, quantity: u64, name: &str) -> String {
        match self {
            Direction::SendOut => format!("Send {quantity} of {name}"),
            Direction::ReturnIn => format!("Return {quantity} of {name}"),
        }
    }
}

/// Body of `POST /logs`: the movement plus the item's resulting quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledMovement {
    pub log: MovementPayload,
    /// Resulting stock quantity (the backend names this field `newquality`).
    #[serde(rename = "newquality")]
    pub new_quantity: u64,
}

impl ReconciledMovement {
    pub fn direction(&self) -> Direction {
        match self.log.kind {
            MovementType::Expenses => Direction::SendOut,
            MovementType::Income => Direction::ReturnIn,
        }
    }
}

/// Parse a typed quantity; only positive whole numbers are accepted.
pub fn parse_quantity(text: &str) -> DomainResult<u64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::validation("quantity is required"));
    }
    match text.parse::<i128>() {
        Ok(q) if q <= 0 => Err(DomainError::validation("quantity must be greater than zero")),
        Ok(q) => u64::try_from(q).map_err(|_| DomainError::validation("quantity is too large")),
        Err(_) => Err(DomainError::validation(format!(
            "quantity must be a whole number: {text}"
        ))),
    }
}

/// Run the reconciliation rule against the currently loaded stock list.
///
/// Checks run in order: selection and quantity present, quantity valid, item
/// still loaded, enough stock for a send-out.
pub fn reconcile(
    stock: &[StockItem],
    item_id: Option<&StockItemId>,
    quantity: &str,
    direction: Direction,
) -> DomainResult<ReconciledMovement> {
    let item_id = match item_id {
        Some(id) if !quantity.trim().is_empty() => id,
        _ => {
            return Err(DomainError::validation(
                "select an item and enter a quantity",
            ));
        }
    };
    let quantity = parse_quantity(quantity)?;
    let item = find_by_id(stock, item_id).ok_or_else(|| DomainError::not_found("stock item"))?;
    reconcile_item(item, quantity, direction)
}

/// Apply the rule to a single, already-resolved item.
pub fn reconcile_item(
    item: &StockItem,
    quantity: u64,
    direction: Direction,
) -> DomainResult<ReconciledMovement> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be greater than zero"));
    }

    let new_quantity = match direction {
        Direction::SendOut => {
            if quantity > item.quantity {
                return Err(DomainError::insufficient_stock(quantity, item.quantity));
            }
            item.quantity - quantity
        }
        Direction::ReturnIn => item
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| DomainError::validation("resulting quantity is too large"))?,
    };

    let value = movement_value(item.price, quantity)?;

    Ok(ReconciledMovement {
        log: MovementPayload {
            classification: direction.classification().to_string(),
            description: direction.describe(quantity, &item.name),
            product_id: item.id.clone(),
            kind: direction.movement_type(),
            value,
        },
        new_quantity,
    })
}

/// Value shown next to the form before submitting (`price × quantity`).
///
/// Returns `None` until both a loaded item and a valid quantity are present.
pub fn preview_value(
    stock: &[StockItem],
    item_id: Option<&StockItemId>,
    quantity: &str,
) -> Option<Decimal> {
    let item = find_by_id(stock, item_id?)?;
    let quantity = parse_quantity(quantity).ok()?;
    movement_value(item.price, quantity).ok()
}

fn movement_value(price: Decimal, quantity: u64) -> DomainResult<Decimal> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| DomainError::validation("movement value is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn widget(quantity: u64) -> StockItem {
        StockItem {
            id: StockItemId::new("w1"),
            name: "Widget".to_string(),
            price: dec!(10),
            quantity,
        }
    }

    fn w1() -> StockItemId {
        StockItemId::new("w1")
    }

    #[test]
    fn send_out_of_entire_stock_is_accepted() {
        let stock = vec![widget(5)];
        let r = reconcile(&stock, Some(&w1()), "5", Direction::SendOut).unwrap();
        assert_eq!(r.new_quantity, 0);
        assert_eq!(r.log.value, dec!(50));
        assert_eq!(r.log.kind, MovementType::Expenses);
        assert_eq!(r.log.classification, "Send order");
        assert_eq!(r.log.description, "Send 5 of Widget");
        assert_eq!(r.log.product_id, w1());
        assert_eq!(r.direction(), Direction::SendOut);
    }

    #[test]
    fn send_out_beyond_stock_is_rejected() {
        let stock = vec![widget(5)];
        let err = reconcile(&stock, Some(&w1()), "6", Direction::SendOut).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(6, 5));
        assert_eq!(err.to_string(), "only 5 units available");
    }

    #[test]
    fn return_in_on_empty_item() {
        let stock = vec![widget(0)];
        let r = reconcile(&stock, Some(&w1()), "3", Direction::ReturnIn).unwrap();
        assert_eq!(r.new_quantity, 3);
        assert_eq!(r.log.value, dec!(30));
        assert_eq!(r.log.kind, MovementType::Income);
        assert_eq!(r.log.classification, "Return to stock");
        assert_eq!(r.log.description, "Return 3 of Widget");
    }

    #[test]
    fn missing_selection_or_quantity_is_rejected() {
        let stock = vec![widget(5)];
        assert!(matches!(
            reconcile(&stock, None, "1", Direction::ReturnIn),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            reconcile(&stock, Some(&w1()), "  ", Direction::ReturnIn),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn invalid_quantities_are_rejected() {
        let stock = vec![widget(5)];
        for q in ["abc", "0", "-2", "1.5", "1e3"] {
            let err = reconcile(&stock, Some(&w1()), q, Direction::ReturnIn).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{q} should be rejected");
        }
    }

    #[test]
    fn vanished_item_is_not_found() {
        let stock = vec![widget(5)];
        let gone = StockItemId::new("deleted");
        let err = reconcile(&stock, Some(&gone), "1", Direction::SendOut).unwrap_err();
        assert_eq!(err, DomainError::not_found("stock item"));
    }

    #[test]
    fn request_body_matches_backend_contract() {
        let r = reconcile_item(&widget(5), 2, Direction::SendOut).unwrap();
        let body = serde_json::to_value(&r).unwrap();
        assert_eq!(body["newquality"], 3);
        assert_eq!(body["log"]["type"], "Expenses");
        assert_eq!(body["log"]["productId"], "w1");
        assert_eq!(body["log"]["value"], 20.0);
    }

    #[test]
    fn preview_requires_item_and_valid_quantity() {
        let stock = vec![widget(5)];
        assert_eq!(preview_value(&stock, Some(&w1()), "4"), Some(dec!(40)));
        assert_eq!(preview_value(&stock, Some(&w1()), "x"), None);
        assert_eq!(preview_value(&stock, None, "4"), None);
        // Preview does not apply the stock bound.
        assert_eq!(preview_value(&stock, Some(&w1()), "9"), Some(dec!(90)));
    }

    #[test]
    fn fractional_price_value_is_exact() {
        let item = StockItem {
            price: dec!(0.1),
            ..widget(10)
        };
        let r = reconcile_item(&item, 3, Direction::SendOut).unwrap();
        assert_eq!(r.log.value, dec!(0.3));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: a send-out is accepted exactly when it fits the stock on
        /// hand, and the resulting quantity never underflows.
        #[test]
        fn send_out_respects_stock_bound(
            on_hand in 0u64..10_000,
            requested in 1u64..20_000,
            cents in 0i64..1_000_000,
        ) {
            let item = StockItem { price: Decimal::new(cents, 2), ..widget(on_hand) };
            match reconcile_item(&item, requested, Direction::SendOut) {
                Ok(r) => {
                    prop_assert!(requested <= on_hand);
                    prop_assert_eq!(r.new_quantity, on_hand - requested);
                    prop_assert_eq!(r.log.value, item.price * Decimal::from(requested));
                }
                Err(e) => {
                    prop_assert!(requested > on_hand);
                    prop_assert_eq!(e, DomainError::insufficient_stock(requested, on_hand));
                }
            }
        }

        /// Property: a return always adds the requested units and values them
        /// at the current unit price.
        #[test]
        fn return_in_adds_and_values(
            on_hand in 0u64..10_000,
            requested in 1u64..10_000,
            cents in 0i64..1_000_000,
        ) {
            let item = StockItem { price: Decimal::new(cents, 2), ..widget(on_hand) };
            let r = reconcile_item(&item, requested, Direction::ReturnIn).unwrap();
            prop_assert_eq!(r.new_quantity, on_hand + requested);
            prop_assert_eq!(r.log.value, item.price * Decimal::from(requested));
            prop_assert!(!r.log.value.is_sign_negative() || r.log.value.is_zero());
        }
    }
}
