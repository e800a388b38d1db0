use chrono::NaiveTime;

/// Time-of-day words mentioned in an expense message, mapped to fixed
/// clock times when the backend returned no explicit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daypart {
    Morning,
    Midday,
    Evening,
}

const MORNING_WORDS: &[&str] = &["morning", "breakfast"];
const MIDDAY_WORDS: &[&str] = &["noon", "midday", "lunch"];
const EVENING_WORDS: &[&str] = &["evening", "tonight", "dinner"];

impl Daypart {
    /// Scans free text for a daypart mention. First match wins in the
    /// order morning, midday, evening.
    pub fn detect(text: &str) -> Option<Daypart> {
        let lowered = text.to_lowercase();
        if MORNING_WORDS.iter().any(|w| lowered.contains(w)) {
            return Some(Daypart::Morning);
        }
        if MIDDAY_WORDS.iter().any(|w| lowered.contains(w)) {
            return Some(Daypart::Midday);
        }
        if EVENING_WORDS.iter().any(|w| lowered.contains(w)) {
            return Some(Daypart::Evening);
        }
        None
    }

    pub fn clock_time(self) -> NaiveTime {
        let (hour, minute) = match self {
            Daypart::Morning => (8, 0),
            Daypart::Midday => (12, 0),
            Daypart::Evening => (20, 0),
        };
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
    }
}
