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

//! Serde-deserializable model of the JSON representation of an S-125 AtoN.
//!
//! Every field is optional. Records delivered by a service are frequently
//! partial and must still be shown with whatever they carry.

use log::trace;
use s100::Coordinate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::Error;

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtonRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub feature_names: Vec<FeatureName>,
    #[serde(default, deserialize_with = "lenient")]
    pub informations: Vec<Information>,
    #[serde(default, deserialize_with = "lenient")]
    pub scale_minimum: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_end: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub period_start: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub period_end: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub radar_conspicuous: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub statuses: Vec<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub marks_navigational_system_of: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub seasonal_action_requireds: Vec<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub shape: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub buoy_shape: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub beacon_shape: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub colours: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub colour_patterns: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient")]
    pub category_of_landmark: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_of_installation_buoy: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_of_special_purpose_mark: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_of_lateral_mark: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_of_cardinal_mark: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        rename = "virtualAISAidToNavigationType"
    )]
    pub virtual_ais_aid_to_navigation_type: Option<String>,

    /// Reference to the structure this AtoN is equipment of.
    #[serde(default, deserialize_with = "lenient")]
    pub parent: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub geometries: Vec<AtonGeometry>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureName {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<bool>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Information {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtonGeometry {
    #[serde(default)]
    pub point_property: Option<PointProperty>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct PointProperty {
    #[serde(default)]
    pub point: Option<Point>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub pos: Option<Pos>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct Pos {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Vec<f64>,
}

impl AtonRecord {
    /// Decodes a record from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is no JSON object. Fields of
    /// unexpected type are read as missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use s125::AtonRecord;
    ///
    /// let aton = AtonRecord::from_json(r#"{
    ///     "id": 7,
    ///     "idCode": "aton.uk.north_buoy",
    ///     "featureNames": [{ "name": "North Buoy", "displayName": true }],
    ///     "categoryOfCardinalMark": "NORTH_CARDINAL_MARK"
    /// }"#)?;
    ///
    /// assert_eq!(aton.id.as_deref(), Some("7"));
    /// assert_eq!(aton.display_name(), Some("North Buoy"));
    /// # Ok::<(), s125::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a record from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the value is no JSON object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the name flagged as display name or else the first name.
    pub fn display_name(&self) -> Option<&str> {
        self.feature_names
            .iter()
            .find(|f| f.display_name == Some(true))
            .or_else(|| self.feature_names.first())
            .and_then(|f| f.name.as_deref())
    }

    /// Returns the position of the first point geometry.
    pub fn position(&self) -> Option<Coordinate> {
        let pos = self
            .geometries
            .first()?
            .point_property
            .as_ref()?
            .point
            .as_ref()?
            .pos
            .as_ref()?;

        match pos.value.as_slice() {
            [lat, lon, ..] => Some(Coordinate::new(*lat, *lon)),
            _ => None,
        }
    }

    /// Returns `true` if the AtoN is not equipment of another structure.
    pub fn is_top_level(&self) -> bool {
        self.parent.as_ref().map_or(true, serde_json::Value::is_null)
    }
}

/// Deserializes a field, taking `null` or a value of unexpected type like a
/// missing field.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        trace!("ignoring field value: {e}");
        T::default()
    }))
}

/// Accepts values given as JSON string or number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        other => {
            if !other.is_null() {
                trace!("ignoring non-scalar value {other}");
            }
            None
        }
    })
}
