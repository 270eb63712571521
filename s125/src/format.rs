// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::trace;

/// Date and time format of SECOM, e.g. `19850412T101530Z`.
pub const SECOM_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Normalizes a date or date-time to the SECOM format in UTC.
///
/// Accepts RFC 3339 date-times, date-times without offset (taken as UTC),
/// plain dates (midnight UTC) and values already in SECOM format. Returns
/// `None` for empty or unparsable input, which callers treat as an omitted
/// field.
///
/// # Examples
///
/// ```
/// use s125::date_format;
///
/// assert_eq!(date_format("1985-04-12T10:15:30Z").as_deref(), Some("19850412T101530Z"));
/// assert_eq!(date_format("1985-04-12").as_deref(), Some("19850412T000000Z"));
/// assert_eq!(date_format(""), None);
/// ```
pub fn date_format(date: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    let utc: DateTime<Utc> = if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        dt.with_timezone(&Utc)
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        dt.and_utc()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(date, SECOM_DATE_FORMAT) {
        dt.and_utc()
    } else if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        d.and_hms_opt(0, 0, 0)?.and_utc()
    } else {
        trace!("unparsable date \"{date}\"");
        return None;
    };

    Some(utc.format(SECOM_DATE_FORMAT).to_string())
}

/// Capitalizes the first letter of each word and lowers the rest.
///
/// Words are separated by whitespace, commas and underscores, which are all
/// kept.
///
/// # Examples
///
/// ```
/// use s125::to_title_case;
///
/// assert_eq!(to_title_case("STARBOARD, MARK"), "Starboard, Mark");
/// assert_eq!(to_title_case("north_cardinal_mark"), "North_Cardinal_Mark");
/// ```
pub fn to_title_case(text: &str) -> String {
    let mut title = String::with_capacity(text.len());
    let mut word_start = true;

    for c in text.chars() {
        if c.is_whitespace() || c == ',' || c == '_' {
            word_start = true;
            title.push(c);
        } else if word_start {
            word_start = false;
            title.extend(c.to_uppercase());
        } else {
            title.extend(c.to_lowercase());
        }
    }

    title
}

/// Turns a label like `buoy_lateral` into `Buoy Lateral`.
pub fn humanize(label: &str) -> String {
    to_title_case(&label.replace('_', " "))
}
