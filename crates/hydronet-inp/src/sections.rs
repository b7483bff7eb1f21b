// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `[SECTION]`-headed text: parse to an ordered section map and render back.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InpError;

/// Separator used by [`join_fields`].
pub const FIELD_SEPARATOR: &str = "    ";

/// One named section and its content rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Upper-case section name, without brackets.
    pub name: String,
    /// Non-blank rows with comments stripped.
    pub lines: Vec<String>,
}

/// Sections in first-seen order.
///
/// A header seen twice keeps accumulating rows into the first section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    /// No sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses headed text.
    ///
    /// Everything from `;` to end of line is a comment. A line containing
    /// `[` opens the section named between the brackets; `[END]` stops
    /// parsing. Blank lines are skipped.
    ///
    /// # Errors
    /// [`InpError::OrphanLine`] for content before the first header.
    pub fn parse(text: &str) -> Result<Self, InpError> {
        let mut out = Self::new();
        let mut current: Option<usize> = None;
        for (n, raw) in text.lines().enumerate() {
            let content = raw.split_once(';').map_or(raw, |(head, _)| head).trim();
            if content.is_empty() {
                continue;
            }
            if let Some(open) = content.find('[') {
                let rest = &content[open + 1..];
                let name = rest.split_once(']').map_or(rest, |(name, _)| name);
                let name = name.trim().to_ascii_uppercase();
                if name == "END" {
                    break;
                }
                current = Some(out.index_or_insert(&name));
                continue;
            }
            let Some(i) = current else {
                return Err(InpError::OrphanLine { line: n + 1 });
            };
            out.sections[i].lines.push(content.to_owned());
        }
        Ok(out)
    }

    /// Renders each section as `[NAME]`, its rows and a blank line, then
    /// `[END]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for s in &self.sections {
            out.push('[');
            out.push_str(&s.name);
            out.push_str("]\n");
            for line in &s.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str("[END]\n");
        out
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` when there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// All sections in order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter()
    }

    /// Rows of `name`, `None` if the section is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.sections[i].lines.as_slice())
    }

    /// Rows of `name`; an absent section reads as empty.
    #[must_use]
    pub fn lines(&self, name: &str) -> &[String] {
        self.get(name).unwrap_or(&[])
    }

    /// Mutable rows of `name`, appending an empty section if absent.
    pub fn section_mut(&mut self, name: &str) -> &mut Vec<String> {
        let i = self.index_or_insert(name);
        &mut self.sections[i].lines
    }

    /// Replaces the rows of `name`, appending the section if absent.
    pub fn replace(&mut self, name: &str, lines: Vec<String>) {
        *self.section_mut(name) = lines;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    fn index_or_insert(&mut self, name: &str) -> usize {
        self.position(name).unwrap_or_else(|| {
            self.sections.push(Section {
                name: name.to_ascii_uppercase(),
                lines: Vec::new(),
            });
            self.sections.len() - 1
        })
    }
}

impl FromStr for Sections {
    type Err = InpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Sections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Whitespace-separated fields of a row.
pub fn fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Joins fields with [`FIELD_SEPARATOR`].
pub fn join_fields<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    items
        .into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}
