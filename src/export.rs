//! CSV export of the visitor log

use std::borrow::Cow;
use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::visitor::Visitor;

pub const CSV_HEADERS: [&str; 9] = [
    "Pass ID",
    "Name",
    "CNIC",
    "Contact",
    "House",
    "Purpose",
    "Check-in",
    "Check-out",
    "Status",
];

/// Written in the check-out column of visitors still inside
pub const MISSING_CHECK_OUT: &str = "N/A";

/// Human-readable timestamp, e.g. `Oct 16, 2026, 9:05:12 AM`
pub fn format_timestamp<Tz>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz)
        .format("%b %-d, %Y, %-I:%M:%S %p")
        .to_string()
}

/// Quote a field holding a separator, quote or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<Cow<'_, str>> = fields.into_iter().map(escape_field).collect();
    out.push_str(&row.join(","));
}

/// Header row then one row per visitor, rows separated by `\n`
pub fn visitors_to_csv<Tz>(visitors: &[Visitor], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    push_row(&mut out, CSV_HEADERS);

    for v in visitors {
        let check_in = format_timestamp(&v.check_in_time, tz);
        let check_out = v
            .check_out_time
            .as_ref()
            .map(|at| format_timestamp(at, tz))
            .unwrap_or_else(|| MISSING_CHECK_OUT.to_string());

        out.push('\n');
        push_row(
            &mut out,
            [
                v.id.as_str(),
                v.name.as_str(),
                v.cnic.as_str(),
                v.contact.as_str(),
                v.house_number.as_str(),
                v.purpose.as_str(),
                check_in.as_str(),
                check_out.as_str(),
                v.status.as_str(),
            ],
        );
    }

    out
}

/// Download name of an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("visitor-log-{}.csv", date.format("%Y-%m-%d"))
}
