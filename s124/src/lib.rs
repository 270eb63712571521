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

//! S-124 Navigational Warning extraction.
//!
//! Turns an S-124 GML dataset into a [`Warning`]: the attributes shown to the
//! user, the geometries of each warning part and a few predicates the client
//! needs to decide how to render it (is it a cancellation, an in-force
//! bulletin, does it carry geometry at all).
//!
//! Attribute extraction never fails. Missing elements show up as `"N/A"`.
//! Geometry decoding on the other hand fails fast, since a malformed geometry
//! must not be drawn at some approximated position.
//!
//! # Examples
//!
//! ```
//! use s100::Document;
//!
//! let doc = Document::parse(
//!     r#"<S124:Dataset xmlns:S124="http://www.iho.int/S124/1.0">
//!          <S124:navwarnTypeGeneral>In-Force Bulletin</S124:navwarnTypeGeneral>
//!        </S124:Dataset>"#,
//! )?;
//!
//! assert!(s124::is_in_force_bulletin(&doc));
//! assert!(!s124::has_geometry(&doc));
//! # Ok::<(), s100::Error>(())
//! ```

mod cancellation;
mod extract;
mod warning;

pub use cancellation::{CancellationSource, TextPatternCancellation};
pub use extract::{
    extract_attribute_table, extract_body_text, extract_cancellation_reference, extract_id,
    extract_warning_parts, has_geometry, is_in_force_bulletin, IN_FORCE_BULLETIN,
};
pub use s100::Error;
pub use warning::{Warning, WarningPart};
