// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Externally visible id generation for assembled nodes and links.

use serde::{Deserialize, Serialize};

/// Maps a zero-based element index to a string id.
///
/// The numeric part is `start + index * increment`. Policies with a non-zero
/// increment are injective, which is what keeps assembled ids unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum IdPolicy {
    /// `prefix` followed by the decimal number, e.g. `N-1000`.
    Prefix {
        /// Literal prefix.
        prefix: String,
        /// Number of the first element.
        start: i64,
        /// Step between consecutive elements.
        increment: i64,
    },
    /// The longest run of `$` in `mask` replaced by the zero-padded number,
    /// e.g. `J$$$$-A` → `J0042-A`.
    Mask {
        /// Template containing a run of `$`.
        mask: String,
        /// Number of the first element.
        start: i64,
        /// Step between consecutive elements.
        increment: i64,
    },
}

impl IdPolicy {
    /// Prefix policy.
    #[must_use]
    pub fn prefix(prefix: impl Into<String>, start: i64, increment: i64) -> Self {
        Self::Prefix {
            prefix: prefix.into(),
            start,
            increment,
        }
    }

    /// Mask policy.
    #[must_use]
    pub fn mask(mask: impl Into<String>, start: i64, increment: i64) -> Self {
        Self::Mask {
            mask: mask.into(),
            start,
            increment,
        }
    }

    /// Default node numbering: `N-1000`, `N-1001`, ...
    #[must_use]
    pub fn default_nodes() -> Self {
        Self::prefix("N-", 1000, 1)
    }

    /// Default link numbering: `L-1000`, `L-1001`, ...
    #[must_use]
    pub fn default_links() -> Self {
        Self::prefix("L-", 1000, 1)
    }

    /// `true` when distinct indices always yield distinct ids.
    #[must_use]
    pub fn is_injective(&self) -> bool {
        match self {
            Self::Prefix { increment, .. } | Self::Mask { increment, .. } => *increment != 0,
        }
    }

    /// Numeric part for `index`, saturating at the `i64` range.
    #[must_use]
    pub fn number(&self, index: usize) -> i64 {
        let (Self::Prefix {
            start, increment, ..
        }
        | Self::Mask {
            start, increment, ..
        }) = self;
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        start.saturating_add(index.saturating_mul(*increment))
    }

    /// Id for the element at `index`.
    #[must_use]
    pub fn format(&self, index: usize) -> String {
        let n = self.number(index);
        match self {
            Self::Prefix { prefix, .. } => format!("{prefix}{n}"),
            Self::Mask { mask, .. } => format_mask(mask, n),
        }
    }
}

fn format_mask(mask: &str, n: i64) -> String {
    let Some((at, width)) = longest_dollar_run(mask) else {
        return format!("{mask}{n}");
    };
    let digits = n.unsigned_abs().to_string();
    let number = if n < 0 {
        format!("-{digits:0>pad$}", pad = width.saturating_sub(1))
    } else {
        format!("{digits:0>width$}")
    };
    format!("{}{number}{}", &mask[..at], &mask[at + width..])
}

/// Byte offset and length of the first longest run of `$`.
fn longest_dollar_run(mask: &str) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut run_start = None;
    for (i, c) in mask.char_indices().chain(core::iter::once((mask.len(), '\0'))) {
        match (c == '$', run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(s)) => {
                let len = i - s;
                if best.is_none_or(|(_, l)| len > l) {
                    best = Some((s, len));
                }
                run_start = None;
            }
            _ => {}
        }
    }
    best
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::IdPolicy;

    #[test]
    fn prefix_numbering() {
        let p = IdPolicy::default_nodes();
        assert_eq!(p.format(0), "N-1000");
        assert_eq!(p.format(7), "N-1007");
        assert_eq!(IdPolicy::prefix("P", 10, -5).format(3), "P-5");
    }

    #[test]
    fn mask_numbering_pads_longest_run() {
        assert_eq!(IdPolicy::mask("J$$$$-A", 42, 1).format(0), "J0042-A");
        assert_eq!(IdPolicy::mask("$X$$$", 1, 1).format(4), "$X005");
        assert_eq!(IdPolicy::mask("N$$", 1234, 1).format(0), "N1234");
        assert_eq!(IdPolicy::mask("N$$$$", -5, 1).format(0), "N-005");
        assert_eq!(IdPolicy::mask("plain", 3, 2).format(1), "plain5");
    }

    #[test]
    fn injectivity_follows_increment() {
        assert!(IdPolicy::default_links().is_injective());
        assert!(!IdPolicy::prefix("X", 1, 0).is_injective());
    }

    #[test]
    fn serde_is_tagged() {
        let p: IdPolicy =
            serde_json::from_str(r#"{"style":"mask","mask":"L$$$","start":1,"increment":2}"#)
                .unwrap();
        assert_eq!(p.format(2), "L005");
    }
}
