use chrono::{NaiveDateTime, Timelike};

use crate::domain::{Daypart, ExpenseDraft, FinalizedExpense};

/// Validates a draft and fills in the date/time defaulting policy.
///
/// `None` is the soft no-op: the amount was missing or non-positive and
/// the pipeline stops silently. Defaults: an absent date becomes the
/// ingestion day; an absent time follows a daypart mentioned in the source
/// text (morning 08:00, midday 12:00, evening 20:00) or, failing that,
/// the ingestion wall-clock time.
pub fn finalize(draft: ExpenseDraft, ingested_at: NaiveDateTime) -> Option<FinalizedExpense> {
    if !draft.is_usable() {
        return None;
    }

    let date = draft.date.unwrap_or_else(|| ingested_at.date());
    let time = draft.time.unwrap_or_else(|| {
        Daypart::detect(&draft.full_text)
            .map(Daypart::clock_time)
            .unwrap_or_else(|| {
                let now = ingested_at.time();
                now.with_nanosecond(0).unwrap_or(now)
            })
    });

    Some(FinalizedExpense {
        amount: draft.amount,
        location: draft.location,
        category: draft.category,
        full_text: draft.full_text,
        date,
        time,
        judgment: draft.judgment,
    })
}
