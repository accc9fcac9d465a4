//! Age arithmetic and the date-of-birth text format.

use serde::Serializer;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// `dd MM yyyy`, numeric and space separated.
pub const DATE_OF_BIRTH_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day] [month] [year]");

/// Completed years between `date_of_birth` and `today`.
///
/// The year difference is reduced by one while this year's birthday is still
/// ahead. A 29 February birthday counts as reached on 1 March in common years.
pub fn age_on(date_of_birth: Date, today: Date) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    let birthday = (u8::from(date_of_birth.month()), date_of_birth.day());
    let current = (u8::from(today.month()), today.day());
    if current < birthday {
        age -= 1;
    }
    age
}

pub fn parse_date_of_birth(input: &str) -> Option<Date> {
    Date::parse(input.trim(), DATE_OF_BIRTH_FORMAT).ok()
}

pub fn format_date_of_birth(date: Date) -> String {
    date.format(DATE_OF_BIRTH_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serializes an optional date of birth in [`DATE_OF_BIRTH_FORMAT`].
pub fn serialize_date_of_birth<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_some(&format_date_of_birth(*date)),
        None => serializer.serialize_none(),
    }
}
