//! Date formatting for `{date:FORMAT}` placeholders.
//!
//! FORMAT uses moment-style tokens (`YYYY-MM-DDTHH:mm:ss`, `dddd, MMMM Do`,
//! `X`). Text inside `[...]` is emitted literally and any character that does
//! not start a token passes through unchanged, so a malformed format never fails.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Datelike, TimeZone, Timelike};

// Longest tokens first so `YYYY` wins over `YY` and `Do` over `D`.
const TOKENS: [&str; 29] = [
    "YYYY", "MMMM", "dddd", "SSS", "MMM", "ddd", "YY", "MM", "DD", "Do", "dd", "HH", "hh", "mm",
    "ss", "ZZ", "M", "D", "d", "H", "h", "m", "s", "A", "a", "Z", "X", "x", "Q",
];

/// Render `now` according to `format`.
pub fn format_date<Tz>(format: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;

    while let Some(c) = rest.chars().next() {
        if c == '['
            && let Some(end) = rest.find(']')
        {
            out.push_str(&rest[1..end]);
            rest = &rest[end + 1..];
            continue;
        }

        match TOKENS.iter().find(|token| rest.starts_with(**token)) {
            Some(token) => {
                write_token(&mut out, token, now);
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

fn write_token<Tz>(out: &mut String, token: &str, now: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let (is_pm, hour12) = now.hour12();
    // Writing to a String cannot fail.
    let _ = match token {
        "YYYY" => write!(out, "{:04}", now.year()),
        "YY" => write!(out, "{:02}", now.year().rem_euclid(100)),
        "Q" => write!(out, "{}", (now.month() - 1) / 3 + 1),
        "MMMM" => write!(out, "{}", now.format("%B")),
        "MMM" => write!(out, "{}", now.format("%b")),
        "MM" => write!(out, "{:02}", now.month()),
        "M" => write!(out, "{}", now.month()),
        "DD" => write!(out, "{:02}", now.day()),
        "Do" => write!(out, "{}{}", now.day(), ordinal_suffix(now.day())),
        "D" => write!(out, "{}", now.day()),
        "dddd" => write!(out, "{}", now.format("%A")),
        "ddd" => write!(out, "{}", now.format("%a")),
        "dd" => write!(out, "{}", &now.format("%a").to_string()[..2]),
        "d" => write!(out, "{}", now.weekday().num_days_from_sunday()),
        "HH" => write!(out, "{:02}", now.hour()),
        "H" => write!(out, "{}", now.hour()),
        "hh" => write!(out, "{hour12:02}"),
        "h" => write!(out, "{hour12}"),
        "mm" => write!(out, "{:02}", now.minute()),
        "m" => write!(out, "{}", now.minute()),
        "ss" => write!(out, "{:02}", now.second()),
        "s" => write!(out, "{}", now.second()),
        "SSS" => write!(out, "{:03}", now.timestamp_subsec_millis().min(999)),
        "A" => out.write_str(if is_pm { "PM" } else { "AM" }),
        "a" => out.write_str(if is_pm { "pm" } else { "am" }),
        "Z" => write!(out, "{}", now.format("%:z")),
        "ZZ" => write!(out, "{}", now.format("%z")),
        "X" => write!(out, "{}", now.timestamp()),
        "x" => write!(out, "{}", now.timestamp_millis()),
        other => out.write_str(other),
    };
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).single().expect("valid date")
    }

    #[test]
    fn iso_like_format() {
        assert_eq!(format_date("YYYY-MM-DDTHH:mm:ss", &sample()), "2024-03-01T14:05:09");
    }

    #[test]
    fn names_and_ordinals() {
        assert_eq!(format_date("dddd, MMMM Do YYYY", &sample()), "Friday, March 1st 2024");
        assert_eq!(format_date("ddd MMM D, h:mm A", &sample()), "Fri Mar 1, 2:05 PM");
    }

    #[test]
    fn literal_brackets_and_unknown_chars() {
        assert_eq!(format_date("[Year] YYYY!", &sample()), "Year 2024!");
        assert_eq!(format_date("%&@", &sample()), "%&@");
    }

    #[test]
    fn offsets() {
        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let now = sample().with_timezone(&offset);
        assert_eq!(format_date("HH Z ZZ", &now), "16 +02:00 +0200");
    }

    #[test]
    fn ordinal_teens() {
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(113), "th");
    }
}
