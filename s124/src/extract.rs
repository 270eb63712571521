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

//! Field extractors over a parsed S-124 document.
//!
//! Textual fields never fail. A missing element yields `None` or the
//! [`NOT_AVAILABLE`] literal. Only geometry decoding returns errors.

use log::trace;
use s100::geometry::decode_geometries;
use s100::xml::NS_S124;
use s100::{AttributeTable, Document, Element, Error, Lookup, Scope, NOT_AVAILABLE};

use crate::cancellation::{CancellationSource, TextPatternCancellation};
use crate::warning::WarningPart;

/// Category of a warning that summarises all warnings in force.
pub const IN_FORCE_BULLETIN: &str = "In-Force Bulletin";

/// Returns the namespaced `id` attribute of the `NAVWARNPreamble`.
///
/// # Examples
///
/// ```
/// use s100::Document;
///
/// let doc = Document::parse(
///     r#"<S124:NAVWARNPreamble xmlns:S124="http://www.iho.int/S124/1.0"
///          xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="ID0815"/>"#,
/// )?;
/// assert_eq!(s124::extract_id(&doc).as_deref(), Some("ID0815"));
/// # Ok::<(), s100::Error>(())
/// ```
pub fn extract_id(document: &Document) -> Option<String> {
    document
        .first(Scope::Any, "NAVWARNPreamble")?
        .attributes
        .iter()
        .find(|attr| attr.is_prefixed() && attr.local_name == "id")
        .map(|attr| attr.value.clone())
}

/// Returns the id of the warning cancelled by this one, matched from the
/// warning text with [`TextPatternCancellation`].
pub fn extract_cancellation_reference(document: &Document) -> Option<String> {
    TextPatternCancellation.cancelled_warning(document)
}

/// Returns the first warning text without its three header and two footer
/// lines.
///
/// Texts of five lines or less have no body and yield an empty string.
pub fn extract_body_text(document: &Document) -> Option<String> {
    let text = document.first(Scope::Any, "text")?.text_content();
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() <= 5 {
        return Some(String::new());
    }

    Some(lines[3..lines.len() - 2].join("\n"))
}

/// Returns `true` if the document has any `pos` or `posList` element.
pub fn has_geometry(document: &Document) -> bool {
    document.contains(Scope::Any, "posList") || document.contains(Scope::Any, "pos")
}

/// Returns `true` if the general warning type is an in-force bulletin.
pub fn is_in_force_bulletin(document: &Document) -> bool {
    document
        .first(Scope::Any, "navwarnTypeGeneral")
        .is_some_and(|e| e.text_content() == IN_FORCE_BULLETIN)
}

/// Builds the display table of a warning.
///
/// | label                | element                          |
/// |----------------------|----------------------------------|
/// | `id`                 | `NW-` and `warningNumber`        |
/// | `Data model`         | `productIdentifier`              |
/// | `Version`            | `productEdition`                 |
/// | `S-100 profile`      | `applicationProfile`             |
/// | `Dataset title`      | `datasetTitle`                   |
/// | `Area identifier`    | `localityIdentifier`             |
/// | `Responsible agency` | `agencyResponsibleForProduction` |
/// | `Warning series`     | `nameOfSeries`                   |
/// | `# of warning`       | `warningNumber`                  |
/// | `Warning type`       | `warningType`                    |
/// | `Type of warning`    | `navwarnTypeGeneral` with code   |
/// | `Detailed Type`      | `navwarnTypeDetails` with code   |
/// | `Valid from`         | `dateStart`, trimmed             |
/// | `Valid to`           | `dateEnd`, trimmed               |
/// | `Language`           | `language`                       |
/// | `Warning text`       | `text`                           |
///
/// Every field missing in the document is [`NOT_AVAILABLE`].
pub fn extract_attribute_table(document: &Document) -> AttributeTable {
    let mut table = AttributeTable::new();
    let field = |local: &str| text_or_na(document.first(Scope::Any, local));
    let classification = |local: &str| classification_or_na(document.first(Scope::Any, local));

    table.insert("id", format!("NW-{}", field("warningNumber")));
    table.insert("Data model", field("productIdentifier"));
    table.insert("Version", field("productEdition"));
    table.insert("S-100 profile", field("applicationProfile"));
    table.insert("Dataset title", field("datasetTitle"));
    table.insert("Area identifier", field("localityIdentifier"));
    table.insert("Responsible agency", field("agencyResponsibleForProduction"));
    table.insert("Warning series", field("nameOfSeries"));
    table.insert("# of warning", field("warningNumber"));
    table.insert("Warning type", field("warningType"));
    table.insert("Type of warning", classification("navwarnTypeGeneral"));
    table.insert("Detailed Type", classification("navwarnTypeDetails"));
    table.insert("Valid from", field("dateStart").trim());
    table.insert("Valid to", field("dateEnd").trim());
    table.insert("Language", field("language"));
    table.insert("Warning text", field("text"));

    table
}

fn text_or_na(element: Option<&Element>) -> String {
    match element {
        Some(e) => e.text_content(),
        None => {
            trace!("field missing, using {NOT_AVAILABLE}");
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Formats a warning type as `<code> - <text>`, or the text alone if the
/// element has no code.
fn classification_or_na(element: Option<&Element>) -> String {
    match element {
        Some(e) => match e.attribute("code") {
            Some(code) => format!("{code} - {}", e.text_content()),
            None => e.text_content(),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Decodes every `NAVWARNPart` with the geometries it holds.
///
/// Each part is decoded on its own, so a part without geometry covers the
/// default region even if its siblings carry geometries.
///
/// # Errors
///
/// Returns the first geometry decoding error.
pub fn extract_warning_parts(document: &Document) -> Result<Vec<WarningPart>, Error> {
    document
        .descendants(Scope::Namespace(NS_S124), "NAVWARNPart")
        .map(|part| {
            Ok(WarningPart {
                id: part
                    .attributes
                    .iter()
                    .find(|attr| attr.local_name == "id")
                    .map(|attr| attr.value.clone()),
                geometries: decode_geometries(part, Scope::Namespace(NS_S124))?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Document {
        Document::parse(&format!(
            r#"<S124:Dataset xmlns:S124="http://www.iho.int/S124/1.0"
                             xmlns:S100="http://www.iho.int/s100gml/5.0"
                             xmlns:gml="http://www.opengis.net/gml/3.2">{body}</S124:Dataset>"#
        ))
        .unwrap()
    }

    #[test]
    fn id_requires_prefixed_attribute() {
        assert_eq!(
            extract_id(&doc(r#"<S124:NAVWARNPreamble id="plain" gml:id="ID1"/>"#)).as_deref(),
            Some("ID1")
        );
        assert_eq!(extract_id(&doc(r#"<S124:NAVWARNPreamble id="plain"/>"#)), None);
        assert_eq!(extract_id(&doc("<S124:other/>")), None);
    }

    #[test]
    fn body_text_strips_header_and_footer() {
        let d = doc("<S124:text>h1\nh2\nh3\nbody 1\nbody 2\nf1\nf2</S124:text>");
        assert_eq!(extract_body_text(&d).as_deref(), Some("body 1\nbody 2"));

        let short = doc("<S124:text>h1\nh2\nh3\nf1\nf2</S124:text>");
        assert_eq!(extract_body_text(&short).as_deref(), Some(""));

        assert_eq!(extract_body_text(&doc("<S124:other/>")), None);
    }

    #[test]
    fn geometry_presence() {
        assert!(has_geometry(&doc("<gml:pos>1 2</gml:pos>")));
        assert!(has_geometry(&doc("<gml:posList>1 2 3 4</gml:posList>")));
        assert!(!has_geometry(&doc("<S124:geometry/>")));
    }

    #[test]
    fn in_force_bulletin() {
        assert!(is_in_force_bulletin(&doc(
            "<S124:navwarnTypeGeneral>In-Force Bulletin</S124:navwarnTypeGeneral>"
        )));
        assert!(!is_in_force_bulletin(&doc(
            r#"<S124:navwarnTypeGeneral code="11">Wreck</S124:navwarnTypeGeneral>"#
        )));
        assert!(!is_in_force_bulletin(&doc("")));
    }

    #[test]
    fn empty_document_table_is_not_available() {
        let table = extract_attribute_table(&doc(""));

        assert_eq!(table.len(), 16);
        assert_eq!(table.text("id"), Some("NW-N/A"));
        for (label, value) in table.iter().skip(1) {
            assert_eq!(value.as_text(), Some(NOT_AVAILABLE), "{label}");
        }
    }

    #[test]
    fn classification_with_and_without_code() {
        let table = extract_attribute_table(&doc(
            r#"<S124:navwarnTypeGeneral code="7">Wreck</S124:navwarnTypeGeneral>
               <S124:navwarnTypeDetails>Dangerous wreck</S124:navwarnTypeDetails>
               <S124:dateStart>
                 2024-01-10
               </S124:dateStart>"#,
        ));

        assert_eq!(table.text("Type of warning"), Some("7 - Wreck"));
        assert_eq!(table.text("Detailed Type"), Some("Dangerous wreck"));
        assert_eq!(table.text("Valid from"), Some("2024-01-10"));
    }

    #[test]
    fn parts_are_decoded_independently() {
        let d = doc(
            r#"<S124:NAVWARNPart gml:id="P1">
                 <S124:geometry><S100:pointProperty><gml:pos>1 2</gml:pos></S100:pointProperty></S124:geometry>
               </S124:NAVWARNPart>
               <S124:NAVWARNPart gml:id="P2"/>"#,
        );
        let parts = extract_warning_parts(&d).unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].id.as_deref(), Some("P1"));
        assert_eq!(parts[0].geometries.len(), 1);
        assert_eq!(parts[1].geometries, vec![s100::geometry::navarea_x()]);
    }
}
