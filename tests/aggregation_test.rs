use chrono::{NaiveDate, Utc};
use ledgerbot::application::services::aggregation::{summarize, summarize_by_day};
use ledgerbot::domain::{Category, Transaction};

fn tx(id: i64, date: NaiveDate, amount: i64, category: Option<Category>) -> Transaction {
    let now = Utc::now();
    Transaction {
        id,
        source_message_id: id,
        chat_user_id: 1,
        amount,
        location: None,
        fulltext: None,
        date,
        time: None,
        category,
        created_at: now,
        updated_at: now,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn given_empty_set_when_summarizing_then_totals_are_zero() {
    let totals = summarize(&[]);
    assert_eq!(totals.total, 0);
    assert!(totals.by_category.is_empty());
}

#[test]
fn given_mixed_categories_when_summarizing_then_subtotals_are_exact() {
    let transactions = vec![
        tx(1, day(2025, 1, 1), 10_000, Some(Category::Shopping)),
        tx(2, day(2025, 1, 1), 5_000, Some(Category::Dining)),
        tx(3, day(2025, 1, 1), 2_500, Some(Category::Shopping)),
    ];

    let totals = summarize(&transactions);
    assert_eq!(totals.total, 17_500);
    assert_eq!(totals.by_category[&Category::Shopping], 12_500);
    assert_eq!(totals.by_category[&Category::Dining], 5_000);
}

#[test]
fn given_uncategorized_records_when_summarizing_then_they_count_as_other() {
    let transactions = vec![
        tx(1, day(2025, 1, 1), 9_000, None),
        tx(2, day(2025, 1, 1), 1_000, Some(Category::Other)),
    ];

    let totals = summarize(&transactions);
    assert_eq!(totals.by_category[&Category::Other], 10_000);
}

#[test]
fn given_two_days_when_reporting_then_days_group_and_grand_total_matches() {
    let transactions = vec![
        tx(1, day(2025, 1, 1), 10_000, Some(Category::Shopping)),
        tx(2, day(2025, 1, 1), 5_000, Some(Category::Dining)),
        tx(3, day(2025, 1, 2), 7_000, Some(Category::Shopping)),
    ];

    let report = summarize_by_day(&transactions);

    assert_eq!(report.grand_total, 22_000);
    assert_eq!(report.days.len(), 2);

    assert_eq!(report.days[0].date, day(2025, 1, 1));
    assert_eq!(report.days[0].totals.total, 15_000);
    assert_eq!(report.days[0].totals.by_category[&Category::Shopping], 10_000);
    assert_eq!(report.days[0].totals.by_category[&Category::Dining], 5_000);

    assert_eq!(report.days[1].date, day(2025, 1, 2));
    assert_eq!(report.days[1].totals.total, 7_000);
    assert_eq!(report.days[1].totals.by_category[&Category::Shopping], 7_000);
}

#[test]
fn given_unordered_input_when_reporting_then_days_still_ascend() {
    let transactions = vec![
        tx(3, day(2025, 1, 2), 7_000, None),
        tx(1, day(2025, 1, 1), 10_000, None),
    ];

    let report = summarize_by_day(&transactions);
    assert_eq!(report.days[0].date, day(2025, 1, 1));
    assert_eq!(report.days[1].date, day(2025, 1, 2));
}
