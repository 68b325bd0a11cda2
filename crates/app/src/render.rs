//! Plain-text rendering helpers shared by the pages.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Currency suffix shown after amounts.
pub const CURRENCY: &str = "DA";

/// Amount with thousands separators and at most two decimals, e.g. `1,234.5 DA`.
pub fn money(amount: Decimal) -> String {
    format!("{} {CURRENCY}", number(amount))
}

/// Number with thousands separators and at most two decimals.
pub fn number(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Left-aligned text table with a header row.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = String::new();
        out.push_str(&line(&self.headers, &widths));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row, &widths));
        }
        out
    }
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(0);
        let pad = width.saturating_sub(cell.chars().count());
        parts.push(format!("{cell}{}", " ".repeat(pad)));
    }
    parts.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn money_groups_thousands_and_trims_decimals() {
        assert_eq!(money(dec!(0)), "0 DA");
        assert_eq!(money(dec!(50.00)), "50 DA");
        assert_eq!(money(dec!(1234.5)), "1,234.5 DA");
        assert_eq!(money(dec!(1234567.891)), "1,234,567.89 DA");
        assert_eq!(money(dec!(-35)), "-35 DA");
        assert_eq!(number(dec!(999)), "999");
        assert_eq!(number(dec!(100000)), "100,000");
    }

    #[test]
    fn timestamp_formats_or_dashes() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap();
        assert_eq!(timestamp(Some(at)), "2025-03-01 10:15");
        assert_eq!(timestamp(None), "-");
    }

    #[test]
    fn table_pads_columns() {
        let mut t = Table::new(["NAME", "QTY"]);
        t.row(["Widget", "5"]);
        t.row(["Bolt", "120"]);
        assert_eq!(t.render(), "NAME    QTY\nWidget  5\nBolt    120");
    }
}
