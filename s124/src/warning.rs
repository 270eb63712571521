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

use log::debug;
use s100::{AttributeTable, Coordinate, Document, Error, Geometry, Lookup, Scope};

use crate::cancellation::{CancellationSource, TextPatternCancellation};
use crate::extract;

/// One `NAVWARNPart` of a warning with its decoded geometries.
#[derive(Clone, PartialEq, Debug)]
pub struct WarningPart {
    /// The `gml:id` of the part, if any.
    pub id: Option<String>,
    /// Never empty. Parts without geometry cover NAVAREA X.
    pub geometries: Vec<Geometry>,
}

/// A navigational warning normalized for display.
///
/// # Examples
///
/// ```
/// let xml = r#"
///   <S124:Dataset xmlns:S124="http://www.iho.int/S124/1.0"
///                 xmlns:S100="http://www.iho.int/s100gml/5.0"
///                 xmlns:gml="http://www.opengis.net/gml/3.2">
///     <S124:NAVWARNPreamble gml:id="ID42">
///       <S124:warningNumber>42</S124:warningNumber>
///     </S124:NAVWARNPreamble>
///     <S124:NAVWARNPart gml:id="P1">
///       <S124:geometry>
///         <S100:pointProperty>
///           <S100:Point gml:id="PT1"><gml:pos>55.5 12.25</gml:pos></S100:Point>
///         </S100:pointProperty>
///       </S124:geometry>
///     </S124:NAVWARNPart>
///   </S124:Dataset>"#;
///
/// let warning = s124::Warning::parse(xml)?;
///
/// assert_eq!(warning.id.as_deref(), Some("ID42"));
/// assert_eq!(warning.attributes.text("id"), Some("NW-42"));
/// assert_eq!(warning.geometries().count(), 1);
/// # Ok::<(), s100::Error>(())
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Warning {
    /// The `id` of the preamble.
    pub id: Option<String>,
    /// The warning number within its series.
    pub number: Option<String>,
    /// The id of the warning this one cancels.
    pub cancels: Option<String>,
    pub in_force_bulletin: bool,
    pub attributes: AttributeTable,
    pub parts: Vec<WarningPart>,
}

impl Warning {
    /// Parses the XML text and extracts the warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] if the text is no XML or any geometry error of
    /// its parts.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        Self::from_document(&Document::parse(xml)?)
    }

    /// Extracts the warning, reading cancellations with the
    /// [`TextPatternCancellation`].
    ///
    /// # Errors
    ///
    /// Returns the first geometry error of any part.
    pub fn from_document(document: &Document) -> Result<Self, Error> {
        Self::from_document_with(document, &TextPatternCancellation)
    }

    /// Extracts the warning with a custom cancellation source.
    ///
    /// # Errors
    ///
    /// Returns the first geometry error of any part.
    pub fn from_document_with(
        document: &Document,
        cancellation: &dyn CancellationSource,
    ) -> Result<Self, Error> {
        let parts = extract::extract_warning_parts(document)?;
        let warning = Self {
            id: extract::extract_id(document),
            number: document
                .first(Scope::Any, "warningNumber")
                .map(|e| e.text_content().trim().to_string()),
            cancels: cancellation.cancelled_warning(document),
            in_force_bulletin: extract::is_in_force_bulletin(document),
            attributes: extract::extract_attribute_table(document),
            parts,
        };

        debug!(
            "warning {} extracted: {} part(s), {} geometries",
            warning.id.as_deref().unwrap_or("without id"),
            warning.parts.len(),
            warning.geometries().count()
        );

        Ok(warning)
    }

    /// Iterates over the geometries of all parts in document order.
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.parts.iter().flat_map(|part| part.geometries.iter())
    }

    /// Returns where the warning's marker goes, which is the marker position
    /// of its first geometry.
    pub fn marker_position(&self) -> Option<Coordinate> {
        self.geometries().next().map(Geometry::marker_position)
    }

    /// Returns `true` if this warning cancels another one.
    pub fn is_cancellation(&self) -> bool {
        self.cancels.is_some()
    }
}
