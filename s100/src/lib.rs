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

//! Shared building blocks for IHO S-100 data products.
//!
//! Products like S-124 (Navigational Warnings) and S-125 (Aids to Navigation)
//! are encoded as GML. This crate provides the pieces they have in common:
//!
//! - a namespace-aware [element tree](xml) with scoped and unscoped lookups,
//! - the [geometry] decoder turning GML positions into map-ready shapes,
//! - the [`AttributeTable`] in which products present their attributes.
//!
//! Nothing in here performs I/O. Callers hand in the document text and get
//! plain values back.

mod error;
pub mod geometry;
mod table;
pub mod xml;

pub use error::Error;
pub use geometry::{Coordinate, Geometry};
pub use table::{AttributeTable, Value, NOT_AVAILABLE};
pub use xml::{Document, Element, Lookup, Scope};
