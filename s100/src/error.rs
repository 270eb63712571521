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

use std::fmt;

#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// The document is not well-formed XML.
    Xml(String),
    /// A coordinate token sequence has an odd length or a token is not a
    /// number.
    MalformedGeometry { tokens: usize, reason: &'static str },
    /// The position or position list element of a declared geometry is
    /// missing.
    MissingGeometryData(&'static str),
    /// The geometry wrapper holds a property element we can't decode.
    UnsupportedGeometryType(String),
    /// A shape has fewer coordinates than its kind requires.
    InvalidGeometry { kind: &'static str, min: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML error: {e}"),
            Self::MalformedGeometry { tokens, reason } => {
                write!(f, "malformed coordinates ({tokens} token(s)): {reason}")
            }
            Self::MissingGeometryData(element) => {
                write!(f, "missing geometry data: no {element} element found")
            }
            Self::UnsupportedGeometryType(tag) => {
                write!(f, "unsupported geometry type \"{tag}\"")
            }
            Self::InvalidGeometry { kind, min, actual } => {
                write!(
                    f,
                    "{kind} requires at least {min} coordinates but has {actual}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}
