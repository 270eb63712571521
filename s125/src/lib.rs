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

//! S-125 Aids to Navigation (AtoN).
//!
//! An AtoN arrives as the JSON representation of its S-125 feature. This crate
//! maps it to the [`AttributeTable`](s100::AttributeTable) shown to the user
//! and derives the seamark query from which an icon service renders its
//! symbol.
//!
//! # Examples
//!
//! ```
//! use s125::{map_to_table, seamark_type, AtonRecord, IconEncoder};
//!
//! let aton = AtonRecord::from_json(r#"{
//!     "idCode": "aton.uk.calm",
//!     "categoryOfInstallationBuoy": "CATENARY_ANCHOR_LEG_MOORING_CALM"
//! }"#)?;
//!
//! let seamark = seamark_type("BuoyInstallation");
//! let table = map_to_table(seamark, &aton);
//! assert_eq!(table.text("Type"), Some("Buoy Installation"));
//!
//! let query = IconEncoder::default().encode(seamark, &aton);
//! assert!(query.ends_with("seamark%3Abuoy_installation%3Acategory=calm"));
//! # Ok::<(), s125::Error>(())
//! ```

mod error;
mod format;
mod icon;
mod record;
mod table;

pub use error::Error;
pub use format::{date_format, humanize, to_title_case, SECOM_DATE_FORMAT};
pub use icon::{
    category, colour, colour_pattern, seamark_type, shape, IconConfig, IconEncoder,
};
pub use record::{AtonGeometry, AtonRecord, FeatureName, Information, Point, PointProperty, Pos};
pub use table::map_to_table;
