//! Structural index scanner
//!
//! Reads a Helm repository `index.yaml` line by line without a YAML parser.
//! The index is shallow and regular: chart names sit at two spaces under
//! `entries:`, version entries start with `"  - "`, and entry properties are
//! flat `key: value` lines indented four or more spaces. Anything that does
//! not fit one of those shapes is skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::record::{ChartGroup, ChartRecord, RawEntry};

/// Chart name line: exactly two spaces, an identifier, a colon
static GROUP_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^  [a-zA-Z][a-zA-Z0-9-]*:$").expect("valid header pattern"));

static PROPERTY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {4,}[A-Za-z0-9_]+:").expect("valid property pattern"));

const SECTION_MARKER: &str = "entries:";
const ENTRY_MARKER: &str = "  - ";

/// Phrase that marks a description wrapped onto the following line
const WRAPPED_DESCRIPTION: &str = "for cluster nodes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingSection,
    InEntries,
}

/// Extract one record per chart, taking each chart's first entry
///
/// Never fails: malformed input yields fewer (possibly zero) records.
pub fn parse_structured(text: &str) -> Vec<ChartRecord> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut state = ScanState::SeekingSection;
    let mut groups: Vec<ChartGroup> = Vec::new();
    // (group, entry) receiving properties; survives later group headers
    let mut current: Option<(usize, usize)> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        i += 1;

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == SECTION_MARKER {
            state = ScanState::InEntries;
            continue;
        }

        if state != ScanState::InEntries {
            continue;
        }

        if GROUP_HEADER.is_match(line) {
            let name = trimmed.trim_end_matches(':');
            groups.push(ChartGroup::new(name));
            continue;
        }

        if line.starts_with(ENTRY_MARKER) {
            if let Some(group_index) = groups.len().checked_sub(1) {
                let group = &mut groups[group_index];
                group.entries.push(RawEntry::new());
                current = Some((group_index, group.entries.len() - 1));
            }
            continue;
        }

        let Some((group_index, entry_index)) = current else {
            continue;
        };
        if !PROPERTY_LINE.is_match(line) {
            continue;
        }

        let Some((key, raw_value)) = trimmed.split_once(':') else {
            continue;
        };
        let mut value = strip_quotes(raw_value.trim()).to_string();

        if key == "description" && value.contains(WRAPPED_DESCRIPTION) {
            if let Some(next) = lines.get(i).map(|l| l.trim()) {
                if next.starts_with(WRAPPED_DESCRIPTION) {
                    value.push(' ');
                    value.push_str(next);
                    i += 1;
                }
            }
        }

        if let Some(entry) = groups
            .get_mut(group_index)
            .and_then(|g| g.entries.get_mut(entry_index))
        {
            entry.insert(key.to_string(), value);
        }
    }

    let mut seen = HashSet::new();
    for group in &groups {
        if !seen.insert(group.name.as_str()) {
            warn!("Chart '{}' appears more than once in the index", group.name);
        }
    }

    let records: Vec<ChartRecord> = groups
        .into_iter()
        .filter_map(ChartGroup::into_record)
        .collect();

    debug!("Structural scan found {} chart(s)", records.len());
    records
}

/// Strip one leading and one trailing double quote when both are present
fn strip_quotes(value: &str) -> &str {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner,
        None if value == "\"" => "",
        None => value,
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn helm_index() -> &'static str {
        r#"apiVersion: v1
entries:
  hostendpoint-operator:
  - apiVersion: v2
    appVersion: "0.3.1"
    created: "2024-05-01T12:00:00.000000000Z"
    description: Manages host endpoints
    name: hostendpoint-operator
    version: 0.3.1
  - apiVersion: v2
    appVersion: "0.3.0"
    created: "2024-04-01T12:00:00.000000000Z"
    description: Manages host endpoints
    version: 0.3.0
  node-agent:
  - created: "2024-02-02T00:00:00Z"
    description: "Agent"
    version: "1.0.0"
generated: "2024-05-01T12:00:00Z"
"#
    }

    #[test]
    fn test_parses_helm_index() {
        let records = parse_structured(helm_index());
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "hostendpoint-operator");
        assert_eq!(records[0].version, "0.3.1");
        assert_eq!(records[0].app_version, "0.3.1");
        assert_eq!(records[0].description, "Manages host endpoints");
        assert_eq!(records[0].created, "2024-05-01T12:00:00.000000000Z");

        assert_eq!(records[1].name, "node-agent");
        assert_eq!(records[1].version, "1.0.0");
        assert_eq!(records[1].app_version, "1.0.0");
        assert_eq!(records[1].description, "Agent");
    }

    #[test]
    fn test_first_entry_wins() {
        let text = "entries:\n  app:\n  - version: x\n    version: \"2.0.0\"\n  - apiVersion: v2\n    version: \"1.0.0\"\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "2.0.0");
    }

    #[test]
    fn test_lines_before_marker_are_ignored() {
        let text = "  early:\n  - x\n    version: 9\nentries:\n  late:\n  - x\n    version: 1\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "late");
    }

    #[test]
    fn test_group_without_entries_is_dropped() {
        let text = "entries:\n  lonely:\n  busy:\n  - x\n    version: 1\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "busy");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let text = "entries:\n  app:\n  - x\n    created: 2024-01-01T00:00:00Z\n";
        let records = parse_structured(text);
        assert_eq!(records[0].created, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# generated\nentries:\n\n  app:\n  # note\n  - x\n    # version: 9\n    version: 1\n";
        let records = parse_structured(text);
        assert_eq!(records[0].version, "1");
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "entries:\r\n  app:\r\n  - x\r\n    version: \"1.0.0\"\r\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "1.0.0");
    }

    #[test]
    fn test_duplicate_names_preserved() {
        let text = "entries:\n  app:\n  - x\n    version: 1\n  app:\n  - x\n    version: 2\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].version, "1");
        assert_eq!(records[1].version, "2");
    }

    #[test]
    fn test_properties_before_marker_go_to_previous_entry() {
        let text = "entries:\n  a:\n  - x\n    version: 1\n  b:\n    version: 2\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[0].version, "2");
    }

    #[test]
    fn test_nested_keys_overwrite_entry_values() {
        let text = "entries:\n  app:\n  - apiVersion: v2\n    version: 1.0.0\n    dependencies:\n    - name: common\n      version: 0.2.0\n";
        let records = parse_structured(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "0.2.0");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"1.0.0\""), "1.0.0");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("\""), "");
        assert_eq!(strip_quotes("\"half"), "\"half");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes("\"\"nested\"\""), "\"nested\"");
    }
}
