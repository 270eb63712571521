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

//! Seamark icon encoding.
//!
//! Icons are rendered by an external service from OpenSeaMap-style seamark
//! tags like `seamark:buoy_lateral:category=port`. The encoder derives those
//! tags from the categorical attributes of an AtoN.
//!
//! An AtoN can have several category attributes set at once, but only one of
//! them describes its icon. The sources are tried in a fixed order and the
//! first one present decides, even if its value has no seamark equivalent:
//!
//! | category                         | shape           |
//! |----------------------------------|-----------------|
//! | `categoryOfLandmark`             | `shape`         |
//! | `categoryOfInstallationBuoy`     | `buoyShape`     |
//! | `categoryOfSpecialPurposeMark`   | `beaconShape`   |
//! | `categoryOfLateralMark`          |                 |
//! | `categoryOfCardinalMark`         |                 |
//! | `virtualAISAidToNavigationType`  |                 |

use log::{debug, trace};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::record::AtonRecord;

/// Characters kept unencoded in a URI component, same as JavaScript's
/// `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const INSTALLATION_BUOY_CATEGORIES: [(&str, &str); 2] = [
    ("CATENARY_ANCHOR_LEG_MOORING_CALM", "calm"),
    ("SINGLE_BUOY_MOORING_SBM_OR_SPM", "sbm"),
];

const LATERAL_MARK_CATEGORIES: [(&str, &str); 4] = [
    ("PORT_HAND_LATERAL_MARK", "port"),
    ("STARBOARD_HAND_LATERAL_MARK", "starboard"),
    (
        "PREFERRED_CHANNEL_TO_PORT_LATERAL_MARK",
        "preferred_channel_port",
    ),
    (
        "PREFERRED_CHANNEL_TO_STARBOARD_LATERAL_MARK",
        "preferred_channel_starboard",
    ),
];

const BUOY_SHAPES: [(&str, &str); 8] = [
    ("CONICAL_NUN_OGIVAL", "conical"),
    ("CAN_CYLINDRICAL", "can"),
    ("SPHERICAL", "spherical"),
    ("SUPER_BUOY", "super-buoy"),
    ("PILLAR", "pillar"),
    ("SPAR_SPINDLE", "spar"),
    ("BARREL_TUN", "barrel"),
    ("ICE_BUOY", "ice-buoy"),
];

const BEACON_SHAPES: [(&str, &str); 4] = [
    ("STAKE_POLE_PERCH_POST", "stake"),
    ("BEACON_TOWER", "stake"),
    ("LATTICE_BEACON", "lattice"),
    ("PILE_BEACON", "pile"),
];

const COLOUR_PATTERNS: [(&str, &str); 7] = [
    ("HORIZONTAL_STRIPES", "horizontal"),
    ("VERTICAL_STRIPES", "vertical"),
    ("DIAGONAL_STRIPES", "diagonal"),
    ("SQUARED", "squared"),
    ("STRIPES_DIRECTION_UNKNOWN", "stripes"),
    ("BORDER_STRIPE", "border"),
    ("SINGLE_COLOUR", "single"),
];

/// S-125 feature classes and their seamark types.
const SEAMARK_TYPES: [(&str, &str); 14] = [
    ("BeaconCardinal", "beacon_cardinal"),
    ("BeaconLateral", "beacon_lateral"),
    ("BeaconIsolatedDanger", "beacon_isolated_danger"),
    ("BeaconSafeWater", "beacon_safe_water"),
    ("BeaconSpecialPurposeGeneral", "beacon_special_purpose"),
    ("BuoyCardinal", "cardinal_buoy"),
    ("BuoyLateral", "buoy_lateral"),
    ("BuoyInstallation", "buoy_installation"),
    ("BuoyIsolatedDanger", "buoy_isolated_danger"),
    ("BuoySafeWater", "buoy_safe_water"),
    ("BuoySpecialPurposeGeneral", "buoy_special_purpose"),
    ("LandmarkType", "landmark"),
    ("LightVessel", "light_vessel"),
    ("VirtualAISAidToNavigation", "virtual_aton"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Returns the seamark type of an S-125 feature class.
///
/// ```
/// assert_eq!(s125::seamark_type("BuoyLateral"), Some("buoy_lateral"));
/// assert_eq!(s125::seamark_type("Lighthouse"), None);
/// ```
pub fn seamark_type(s125_class: &str) -> Option<&'static str> {
    lookup(&SEAMARK_TYPES, s125_class)
}

/// Maps the value of a present source to its seamark value.
type Mapper = fn(&str) -> Option<String>;

/// Returns the mapped value of the first present source.
///
/// Sources after the first present one are never consulted, even if the
/// first one maps to nothing.
fn first_present(rules: &[(Option<&str>, Mapper)]) -> Option<String> {
    rules
        .iter()
        .find_map(|(value, map)| value.map(map))
        .flatten()
}

/// Treats empty strings like missing values.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn lowercase(value: &str) -> Option<String> {
    Some(value.to_lowercase())
}

fn installation_buoy(value: &str) -> Option<String> {
    lookup(&INSTALLATION_BUOY_CATEGORIES, value).map(str::to_string)
}

fn special_purpose_mark(value: &str) -> Option<String> {
    let value = value.strip_suffix("_MARK").unwrap_or(value);
    Some(value.trim().to_lowercase())
}

fn lateral_mark(value: &str) -> Option<String> {
    lookup(&LATERAL_MARK_CATEGORIES, value).map(str::to_string)
}

fn cardinal_mark(value: &str) -> Option<String> {
    let value = value.strip_suffix("_CARDINAL_MARK").unwrap_or(value);
    Some(value.to_lowercase())
}

fn virtual_aton(value: &str) -> Option<String> {
    match value {
        "NEW_DANGER_MARKING" => Some("wreck".to_string()),
        _ => Some(value.replacen("_CHANNEL_TO", "", 1).to_lowercase()),
    }
}

fn buoy_shape(value: &str) -> Option<String> {
    lookup(&BUOY_SHAPES, value).map(str::to_string)
}

fn beacon_shape(value: &str) -> Option<String> {
    lookup(&BEACON_SHAPES, value).map(str::to_string)
}

/// Returns the seamark category of the AtoN.
pub fn category(aton: &AtonRecord) -> Option<String> {
    first_present(&[
        (present(&aton.category_of_landmark), lowercase),
        (present(&aton.category_of_installation_buoy), installation_buoy),
        (present(&aton.category_of_special_purpose_mark), special_purpose_mark),
        (present(&aton.category_of_lateral_mark), lateral_mark),
        (present(&aton.category_of_cardinal_mark), cardinal_mark),
        (present(&aton.virtual_ais_aid_to_navigation_type), virtual_aton),
    ])
}

/// Returns the seamark shape of the AtoN.
pub fn shape(aton: &AtonRecord) -> Option<String> {
    first_present(&[
        (present(&aton.shape), lowercase),
        (present(&aton.buoy_shape), buoy_shape),
        (present(&aton.beacon_shape), beacon_shape),
    ])
}

/// Returns the `;` separated seamark colours of the AtoN.
pub fn colour(aton: &AtonRecord) -> Option<String> {
    let colours = aton.colours.as_ref().filter(|c| !c.is_empty())?;
    Some(colours.join(";").to_lowercase())
}

/// Returns the `;` separated seamark colour patterns of the AtoN.
pub fn colour_pattern(aton: &AtonRecord) -> Option<String> {
    let patterns = aton.colour_patterns.as_ref().filter(|p| !p.is_empty())?;
    let patterns: Vec<String> = patterns
        .iter()
        .map(|p| match lookup(&COLOUR_PATTERNS, p) {
            Some(short) => short.to_string(),
            None => p.to_lowercase(),
        })
        .collect();

    Some(patterns.join(";"))
}

/// Static configuration of the icon service.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IconConfig {
    pub base_url: String,
    /// Path of the icon endpoint on the service that takes the seamark query.
    pub overview_path: String,
    /// Icon used when an AtoN has no seamark type.
    pub default_icon: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rnavlab.gla-rad.org/niord-ng".to_string(),
            overview_path: "/rest/aton-icon/overview".to_string(),
            default_icon: "/images/aton.png".to_string(),
        }
    }
}

/// Query string with percent-encoded `key=value` pairs.
#[derive(Default)]
struct Query(String);

impl Query {
    fn append(&mut self, key: &str, value: &str) {
        if !self.0.is_empty() {
            self.0.push('&');
        }
        self.0.extend(utf8_percent_encode(key, URI_COMPONENT));
        self.0.push('=');
        self.0.extend(utf8_percent_encode(value, URI_COMPONENT));
    }
}

/// Encodes AtoN into seamark icon queries.
///
/// # Examples
///
/// ```
/// use s125::{AtonRecord, IconEncoder};
///
/// let aton = AtonRecord {
///     category_of_lateral_mark: Some("PORT_HAND_LATERAL_MARK".to_string()),
///     buoy_shape: Some("CAN_CYLINDRICAL".to_string()),
///     colours: Some(vec!["RED".to_string()]),
///     ..Default::default()
/// };
///
/// let encoder = IconEncoder::default();
/// assert_eq!(
///     encoder.encode(Some("buoy_lateral"), &aton),
///     "seamark%3Atype=buoy_lateral\
///      &seamark%3Abuoy_lateral%3Acategory=port\
///      &seamark%3Abuoy_lateral%3Ashape=can\
///      &seamark%3Abuoy_lateral%3Acolour=red"
/// );
/// assert_eq!(encoder.encode(None, &aton), "/images/aton.png");
/// ```
#[derive(Clone, Debug, Default)]
pub struct IconEncoder {
    config: IconConfig,
}

impl IconEncoder {
    pub fn new(config: IconConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// Returns the seamark query of the AtoN, or the default icon path if
    /// there is no type.
    pub fn encode(&self, type_label: Option<&str>, aton: &AtonRecord) -> String {
        let Some(seamark) = type_label.filter(|t| !t.is_empty()) else {
            trace!("no seamark type, using default icon");
            return self.config.default_icon.clone();
        };

        let mut query = Query::default();
        query.append("seamark:type", seamark);

        let tags = [
            ("category", category(aton)),
            ("shape", shape(aton)),
            ("colour", colour(aton)),
            ("colour_pattern", colour_pattern(aton)),
        ];

        for (tag, value) in tags {
            if let Some(value) = value {
                query.append(&format!("seamark:{seamark}:{tag}"), &value);
            }
        }

        debug!("icon query for {seamark}: {}", query.0);
        query.0
    }

    /// Returns the full icon URL on the configured service, or the default
    /// icon path if there is no type.
    pub fn icon_url(&self, type_label: Option<&str>, aton: &AtonRecord) -> String {
        match type_label.filter(|t| !t.is_empty()) {
            Some(_) => format!(
                "{}{}?{}",
                self.config.base_url,
                self.config.overview_path,
                self.encode(type_label, aton)
            ),
            None => self.config.default_icon.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aton() -> AtonRecord {
        AtonRecord::default()
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn landmark_wins_over_cardinal() {
        let a = AtonRecord {
            category_of_landmark: some("HARBOUR"),
            category_of_cardinal_mark: some("NORTH_CARDINAL_MARK"),
            ..aton()
        };
        assert_eq!(category(&a).as_deref(), Some("harbour"));
    }

    #[test]
    fn first_present_source_decides_even_without_mapping() {
        let a = AtonRecord {
            category_of_installation_buoy: some("SOMETHING_ELSE"),
            category_of_lateral_mark: some("PORT_HAND_LATERAL_MARK"),
            ..aton()
        };
        assert_eq!(category(&a), None);

        let b = AtonRecord {
            buoy_shape: some("UNKNOWN"),
            beacon_shape: some("PILE_BEACON"),
            ..aton()
        };
        assert_eq!(shape(&b), None);
    }

    #[test]
    fn empty_values_are_not_present() {
        let a = AtonRecord {
            category_of_landmark: some(""),
            category_of_cardinal_mark: some("SOUTH_CARDINAL_MARK"),
            ..aton()
        };
        assert_eq!(category(&a).as_deref(), Some("south"));
    }

    #[test]
    fn category_mappings() {
        let cases = [
            (
                AtonRecord {
                    category_of_installation_buoy: some("SINGLE_BUOY_MOORING_SBM_OR_SPM"),
                    ..aton()
                },
                "sbm",
            ),
            (
                AtonRecord {
                    category_of_special_purpose_mark: some("TARGET_MARK"),
                    ..aton()
                },
                "target",
            ),
            (
                AtonRecord {
                    category_of_lateral_mark: some("PREFERRED_CHANNEL_TO_STARBOARD_LATERAL_MARK"),
                    ..aton()
                },
                "preferred_channel_starboard",
            ),
            (
                AtonRecord {
                    category_of_cardinal_mark: some("WEST_CARDINAL_MARK"),
                    ..aton()
                },
                "west",
            ),
            (
                AtonRecord {
                    virtual_ais_aid_to_navigation_type: some("NEW_DANGER_MARKING"),
                    ..aton()
                },
                "wreck",
            ),
            (
                AtonRecord {
                    virtual_ais_aid_to_navigation_type: some("PREFERRED_CHANNEL_TO_PORT"),
                    ..aton()
                },
                "preferred_port",
            ),
        ];

        for (a, expected) in cases {
            assert_eq!(category(&a).as_deref(), Some(expected));
        }
    }

    #[test]
    fn shape_mappings() {
        let explicit = AtonRecord {
            shape: some("TOWER"),
            buoy_shape: some("PILLAR"),
            ..aton()
        };
        assert_eq!(shape(&explicit).as_deref(), Some("tower"));

        let buoy = AtonRecord {
            buoy_shape: some("ICE_BUOY"),
            ..aton()
        };
        assert_eq!(shape(&buoy).as_deref(), Some("ice-buoy"));

        let beacon = AtonRecord {
            beacon_shape: some("BEACON_TOWER"),
            ..aton()
        };
        assert_eq!(shape(&beacon).as_deref(), Some("stake"));
    }

    #[test]
    fn colours_and_patterns() {
        let a = AtonRecord {
            colours: Some(vec!["BLACK".to_string(), "YELLOW".to_string()]),
            colour_patterns: Some(vec![
                "HORIZONTAL_STRIPES".to_string(),
                "HORIZONTAL_STRIPES".to_string(),
                "CHECKERED".to_string(),
            ]),
            ..aton()
        };

        assert_eq!(colour(&a).as_deref(), Some("black;yellow"));
        assert_eq!(
            colour_pattern(&a).as_deref(),
            Some("horizontal;horizontal;checkered")
        );
        assert_eq!(colour(&aton()), None);
        assert_eq!(
            colour(&AtonRecord {
                colours: Some(vec![]),
                ..aton()
            }),
            None
        );
    }

    #[test]
    fn encode_in_insertion_order() {
        let a = AtonRecord {
            category_of_cardinal_mark: some("NORTH_CARDINAL_MARK"),
            buoy_shape: some("PILLAR"),
            colours: Some(vec!["BLACK".to_string(), "YELLOW".to_string()]),
            colour_patterns: Some(vec!["HORIZONTAL_STRIPES".to_string()]),
            ..aton()
        };

        assert_eq!(
            IconEncoder::default().encode(Some("cardinal_buoy"), &a),
            "seamark%3Atype=cardinal_buoy\
             &seamark%3Acardinal_buoy%3Acategory=north\
             &seamark%3Acardinal_buoy%3Ashape=pillar\
             &seamark%3Acardinal_buoy%3Acolour=black%3Byellow\
             &seamark%3Acardinal_buoy%3Acolour_pattern=horizontal"
        );
    }

    #[test]
    fn encode_type_only() {
        let encoder = IconEncoder::default();
        assert_eq!(
            encoder.encode(Some("light_vessel"), &aton()),
            "seamark%3Atype=light_vessel"
        );
        assert_eq!(encoder.encode(Some(""), &aton()), "/images/aton.png");
    }

    #[test]
    fn icon_url_uses_config() {
        let encoder = IconEncoder::new(IconConfig {
            base_url: "https://icons.example.org".to_string(),
            overview_path: "/overview".to_string(),
            default_icon: "/default.svg".to_string(),
        });

        assert_eq!(
            encoder.icon_url(Some("landmark"), &aton()),
            "https://icons.example.org/overview?seamark%3Atype=landmark"
        );
        assert_eq!(encoder.icon_url(None, &aton()), "/default.svg");
    }

    #[test]
    fn uri_component_encoding() {
        let mut query = Query::default();
        query.append("a b", "x&y=z/(ok)*~");
        assert_eq!(query.0, "a%20b=x%26y%3Dz%2F(ok)*~");
    }

    #[test]
    fn seamark_types() {
        assert_eq!(seamark_type("BuoyCardinal"), Some("cardinal_buoy"));
        assert_eq!(
            seamark_type("VirtualAISAidToNavigation"),
            Some("virtual_aton")
        );
    }
}
