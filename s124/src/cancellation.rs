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

use once_cell::sync::Lazy;
use regex::Regex;
use s100::{Document, Lookup, Scope};

static CANCELLATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Cancellation of Warning with id ([a-fA-F0-9]+)\.")
        .expect("valid cancellation regex")
});

/// Finds the id of the warning that a warning cancels.
pub trait CancellationSource {
    fn cancelled_warning(&self, document: &Document) -> Option<String>;
}

/// Reads the cancelled id from the warning text.
///
/// Datasets don't carry a structural reference to the cancelled warning yet.
/// Instead the first `text` element starts with
/// `Cancellation of Warning with id <hex>.`, which is matched literally.
#[derive(Copy, Clone, Debug, Default)]
pub struct TextPatternCancellation;

impl TextPatternCancellation {
    /// Matches the cancellation sentence at the start of `text`.
    pub fn match_text(text: &str) -> Option<String> {
        CANCELLATION_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str().to_string())
    }
}

impl CancellationSource for TextPatternCancellation {
    fn cancelled_warning(&self, document: &Document) -> Option<String> {
        let text = document.first(Scope::Any, "text")?;
        Self::match_text(&text.text_content())
    }
}
