use chrono::{Datelike, Duration, NaiveDate};

/// A recognized bot command with its arguments already resolved against
/// the current calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Report,
    Date(NaiveDate),
    Month { year: i32, month: u32 },
    Update,
    Delete,
    Unknown,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid date token")]
    InvalidDate,
    #[error("invalid month token")]
    InvalidMonth,
}

/// Resolves a classified command name + args. Date and month tokens are
/// strict and positional: every component must parse as an unsigned
/// integer and pass its range check, or the whole command is rejected.
pub fn parse(name: &str, args: &[String], today: NaiveDate) -> Result<BotCommand, CommandError> {
    match name {
        "start" => Ok(BotCommand::Start),
        "help" => Ok(BotCommand::Help),
        "report" => Ok(BotCommand::Report),
        "date" => match args.first() {
            None => Ok(BotCommand::Date(today)),
            Some(token) => parse_date_token(token, today).map(BotCommand::Date),
        },
        "month" => match args.first() {
            None => Ok(BotCommand::Month {
                year: today.year(),
                month: today.month(),
            }),
            Some(token) => parse_month_token(token, today),
        },
        "update" => Ok(BotCommand::Update),
        "delete" | "cancel" => Ok(BotCommand::Delete),
        _ => Ok(BotCommand::Unknown),
    }
}

/// Grammar: `dd` | `dd/MM` | `dd/MM/yyyy`, day in [1,31], month in [1,12].
/// Day/month combinations that pass the range check but do not exist in
/// the concrete month roll into the adjacent month (29/02 outside a leap
/// year resolves to March 1). The current year fills in when omitted.
pub fn parse_date_token(token: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    let parts: Vec<&str> = token.split('/').collect();

    let (day, month, year) = match parts.as_slice() {
        [d] => (parse_day(d)?, today.month(), today.year()),
        [d, m] => (parse_day(d)?, parse_month_number(m)?, today.year()),
        [d, m, y] => (
            parse_day(d)?,
            parse_month_number(m)?,
            y.parse::<i32>().map_err(|_| CommandError::InvalidDate)?,
        ),
        _ => return Err(CommandError::InvalidDate),
    };

    rolled_date(year, month, day).ok_or(CommandError::InvalidDate)
}

/// Grammar: `MM` | `MM/yyyy`, month in [1,12].
fn parse_month_token(token: &str, today: NaiveDate) -> Result<BotCommand, CommandError> {
    let parts: Vec<&str> = token.split('/').collect();

    match parts.as_slice() {
        [m] => Ok(BotCommand::Month {
            year: today.year(),
            month: parse_month_number(m).map_err(|_| CommandError::InvalidMonth)?,
        }),
        [m, y] => Ok(BotCommand::Month {
            year: y.parse::<i32>().map_err(|_| CommandError::InvalidMonth)?,
            month: parse_month_number(m).map_err(|_| CommandError::InvalidMonth)?,
        }),
        _ => Err(CommandError::InvalidMonth),
    }
}

fn parse_day(raw: &str) -> Result<u32, CommandError> {
    match raw.parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(CommandError::InvalidDate),
    }
}

fn parse_month_number(raw: &str) -> Result<u32, CommandError> {
    match raw.parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(CommandError::InvalidDate),
    }
}

/// Builds the date as first-of-month plus a day offset, so an out-of-range
/// day rolls forward instead of failing.
fn rolled_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}

/// Inclusive calendar bounds of one month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}
