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

use log::trace;
use s100::{AttributeTable, NOT_AVAILABLE};

use crate::format::{date_format, humanize, to_title_case};
use crate::record::AtonRecord;

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn title(value: Option<&str>) -> String {
    or_na(value.filter(|v| !v.is_empty()).map(to_title_case))
}

fn joined(values: &[String]) -> String {
    match values {
        [] => NOT_AVAILABLE.to_string(),
        _ => to_title_case(&values.join(", ")),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Maps an AtoN to its attribute table.
///
/// The fixed rows come first, each showing `N/A` if the record lacks it.
/// Date and period rows are left out if the value is no valid date. Shape,
/// colour and mark category rows follow only if the record has them.
///
/// # Examples
///
/// ```
/// use s125::{map_to_table, AtonRecord};
///
/// let aton = AtonRecord::from_json(r#"{
///     "id": 12,
///     "featureNames": [{ "name": "EAST GOODWIN" }],
///     "dateStart": "2023-06-01",
///     "categoryOfCardinalMark": "EAST_CARDINAL_MARK"
/// }"#)?;
///
/// let table = map_to_table(Some("cardinal_buoy"), &aton);
/// assert_eq!(table.text("Name"), Some("East Goodwin"));
/// assert_eq!(table.text("Type"), Some("Cardinal Buoy"));
/// assert_eq!(table.text("Date Start"), Some("20230601T000000Z"));
/// assert_eq!(table.text("Information"), Some("N/A"));
/// assert_eq!(table.text("Category of Cardinal Mark"), Some("East_Cardinal_Mark"));
/// # Ok::<(), s125::Error>(())
/// ```
pub fn map_to_table(type_label: Option<&str>, aton: &AtonRecord) -> AttributeTable {
    let mut table = AttributeTable::new();

    table.insert("ID", or_na(aton.id.clone()));
    table.insert("ID Code", or_na(aton.id_code.clone()));
    table.insert(
        "Name",
        title(aton.feature_names.first().and_then(|f| f.name.as_deref())),
    );
    table.insert(
        "Type",
        or_na(type_label.filter(|t| !t.is_empty()).map(humanize)),
    );
    table.insert(
        "Information",
        title(aton.informations.first().and_then(|i| i.text.as_deref())),
    );
    table.insert(
        "Scale Minimum",
        or_na(aton.scale_minimum.map(|s| s.to_string())),
    );

    let dates = [
        ("Date Start", &aton.date_start),
        ("Date End", &aton.date_end),
        ("Period Start", &aton.period_start),
        ("Period End", &aton.period_end),
    ];

    for (label, date) in dates {
        match date.as_deref().and_then(date_format) {
            Some(date) => table.insert(label, date),
            None => trace!("omitting {label} of AtoN {:?}", aton.id),
        }
    }

    table.insert(
        "Radar Conspicuous",
        match aton.radar_conspicuous {
            Some(true) => "True",
            Some(false) => "False",
            None => NOT_AVAILABLE,
        },
    );
    table.insert("Status", joined(&aton.statuses));
    table.insert(
        "Marks Navigational System",
        title(aton.marks_navigational_system_of.as_deref()),
    );
    table.insert(
        "Seasonal Actions Required",
        joined(&aton.seasonal_action_requireds),
    );

    if let Some(shape) = non_empty(&aton.buoy_shape) {
        table.insert("Buoy Shape", to_title_case(shape));
    }
    if let Some(colours) = aton.colours.as_ref().filter(|c| !c.is_empty()) {
        let colours: Vec<String> = colours.iter().map(|c| to_title_case(c)).collect();
        table.insert("Colour", colours);
    }
    if let Some(patterns) = aton.colour_patterns.as_ref().filter(|p| !p.is_empty()) {
        let patterns: Vec<String> = patterns.iter().map(|p| to_title_case(p)).collect();
        table.insert("Colour Patterns", patterns);
    }
    if let Some(category) = non_empty(&aton.category_of_lateral_mark) {
        table.insert("Category of Lateral Mark", to_title_case(category));
    }
    if let Some(category) = non_empty(&aton.category_of_cardinal_mark) {
        table.insert("Category of Cardinal Mark", to_title_case(category));
    }

    table
}
