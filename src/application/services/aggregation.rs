use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Category, Transaction};

/// Totals for one window: exact integer sum plus per-category subtotals.
/// Records without a category count toward `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowTotals {
    pub total: i64,
    pub by_category: BTreeMap<Category, i64>,
}

/// One day inside a range report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub totals: WindowTotals,
}

/// Multi-day report: days in ascending calendar order plus a grand total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeReport {
    pub grand_total: i64,
    pub days: Vec<DayTotals>,
}

pub fn summarize(transactions: &[Transaction]) -> WindowTotals {
    let mut totals = WindowTotals::default();
    for transaction in transactions {
        totals.total += transaction.amount;
        let category = transaction.category.unwrap_or(Category::Other);
        *totals.by_category.entry(category).or_insert(0) += transaction.amount;
    }
    totals
}

/// Groups by calendar date, then by category within each date. The ordered
/// map guarantees ascending dates whatever order the input arrived in, so
/// the report does not depend on incidental store ordering.
pub fn summarize_by_day(transactions: &[Transaction]) -> RangeReport {
    let mut grand_total = 0i64;
    let mut days: BTreeMap<NaiveDate, WindowTotals> = BTreeMap::new();

    for transaction in transactions {
        grand_total += transaction.amount;
        let day = days.entry(transaction.date).or_default();
        day.total += transaction.amount;
        let category = transaction.category.unwrap_or(Category::Other);
        *day.by_category.entry(category).or_insert(0) += transaction.amount;
    }

    RangeReport {
        grand_total,
        days: days
            .into_iter()
            .map(|(date, totals)| DayTotals { date, totals })
            .collect(),
    }
}
