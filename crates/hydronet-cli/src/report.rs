// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Human-readable tables for command output.

use std::collections::BTreeMap;

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use hydronet_topo::{Classification, ProblemReport};

fn table(header: &[&str]) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(*h)));
    t
}

/// One row per problem category, with a count and the offending ids.
pub fn problems(report: &ProblemReport) -> Table {
    let mut t = table(&["Problem", "Count", "Ids"]);
    for (name, ids) in report.categories() {
        let listed = ids.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        t.add_row(vec![
            Cell::new(name),
            Cell::new(ids.len()),
            Cell::new(if listed.is_empty() { "-" } else { listed.as_str() }),
        ]);
    }
    t
}

/// One row per link: kind and subzone.
pub fn classification(classes: &BTreeMap<String, Classification>) -> Table {
    let mut t = table(&["Link", "Kind", "Subzone"]);
    for (link, c) in classes {
        t.add_row(vec![Cell::new(link), Cell::new(c.kind), Cell::new(c.subzone)]);
    }
    t
}

/// One row per node with its degree.
pub fn degrees(degrees: &BTreeMap<String, usize>) -> Table {
    let mut t = table(&["Node", "Degree"]);
    for (node, d) in degrees {
        t.add_row(vec![Cell::new(node), Cell::new(d)]);
    }
    t
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{classification, problems};
    use hydronet_topo::{Classification, ProblemReport, ZoneKind};
    use std::collections::BTreeMap;

    #[test]
    fn problem_table_lists_every_category() {
        let mut report = ProblemReport::default();
        report.loops.insert("L-7".into());
        let text = problems(&report).to_string();
        for name in ["orphan nodes", "duplicate nodes", "undefined endpoints", "duplicate links", "loops"] {
            assert!(text.contains(name), "{name} missing");
        }
        assert!(text.contains("L-7"));
    }

    #[test]
    fn classification_rows_follow_link_order() {
        let classes = BTreeMap::from([
            (
                "b".to_owned(),
                Classification {
                    kind: ZoneKind::Meshed,
                    subzone: 1,
                },
            ),
            (
                "a".to_owned(),
                Classification {
                    kind: ZoneKind::Branched,
                    subzone: 2,
                },
            ),
        ]);
        let text = classification(&classes).to_string();
        let a = text.find("branched").unwrap();
        let b = text.find("meshed").unwrap();
        assert!(a < b);
    }
}
