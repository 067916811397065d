//! Reader for the sectioned key/value configuration format.
//!
//! `[section]` headers, `key = value` (or `key: value`) entries, `;`/`#`
//! comment lines, and indented continuation lines that extend the previous
//! value with a newline — multi-value fields are written as one key with
//! several continuation lines.

use std::{collections::HashMap, fs, path::Path};

use crate::error::LoadError;

/// One configuration section: the endpoint name and its raw key/value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: HashMap<String, String>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }
}

/// Read and parse a configuration file, preserving section order.
pub fn load(path: &Path) -> Result<Vec<Section>, LoadError> {
    parse_str(&fs::read_to_string(path)?)
}

/// Parse configuration text, preserving section order.
pub fn parse_str(input: &str) -> Result<Vec<Section>, LoadError> {
    let mut sections: Vec<Section> = Vec::new();
    // Key the next continuation line belongs to, if any.
    let mut open_key: Option<String> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();

        if trimmed.is_empty() {
            open_key = None;
            continue;
        }
        if trimmed.starts_with(';') || trimmed.starts_with('#') {
            open_key = None;
            continue;
        }

        // Indented non-blank line: continuation of the previous value.
        if raw_line.starts_with([' ', '\t']) {
            let (Some(section), Some(key)) = (sections.last_mut(), open_key.as_deref()) else {
                return Err(LoadError::syntax(line_no, "continuation line without a key"));
            };
            let value = section
                .entries
                .get_mut(key)
                .expect("open_key always names an existing entry");
            value.push('\n');
            value.push_str(trimmed);
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[') {
            let Some(name) = name.strip_suffix(']') else {
                return Err(LoadError::syntax(line_no, "unterminated section header"));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(LoadError::syntax(line_no, "empty section name"));
            }
            sections.push(Section::new(name));
            open_key = None;
            continue;
        }

        let Some((key, value)) = split_entry(trimmed) else {
            return Err(LoadError::syntax(line_no, "expected 'key = value'"));
        };
        let Some(section) = sections.last_mut() else {
            return Err(LoadError::syntax(line_no, "entry outside of any section"));
        };
        let key = key.trim().to_lowercase();
        section
            .entries
            .insert(key.clone(), value.trim().to_string());
        open_key = Some(key);
    }

    Ok(sections)
}

/// Split on whichever of `=` / `:` comes first.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let pos = match (line.find('='), line.find(':')) {
        (Some(e), Some(c)) => e.min(c),
        (Some(e), None) => e,
        (None, Some(c)) => c,
        (None, None) => return None,
    };
    Some((&line[..pos], &line[pos + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_and_entries() {
        let sections = parse_str(
            "[irc bridge]\ntype = Console\nactive = yes\n\n[other]\ntype: Console\n",
        )
        .unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "irc bridge");
        assert_eq!(sections[0].entries["type"], "Console");
        assert_eq!(sections[1].entries["type"], "Console");
    }

    #[test]
    fn continuation_lines_join_with_newlines() {
        let sections = parse_str(
            "[a]\nbroadcaster_channels =\n    general\n    random -> relayA\n",
        )
        .unwrap();
        assert_eq!(
            sections[0].entries["broadcaster_channels"],
            "\ngeneral\nrandom -> relayA"
        );
    }

    #[test]
    fn comments_are_skipped() {
        let sections = parse_str("[a]\n; a comment\n# another\ntype = Console\n").unwrap();
        assert_eq!(sections[0].entries.len(), 1);
    }

    #[test]
    fn keys_are_lowercased() {
        let sections = parse_str("[a]\nTyPe = Console\n").unwrap();
        assert_eq!(sections[0].entries["type"], "Console");
    }

    #[test]
    fn entry_outside_section_is_a_syntax_error() {
        let err = parse_str("type = Console\n").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { line: 1, .. }));
    }

    #[test]
    fn continuation_without_key_is_a_syntax_error() {
        let err = parse_str("[a]\n    dangling\n").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
    }

    #[test]
    fn malformed_entry_reports_its_line() {
        let err = parse_str("[a]\ntype = Console\nnonsense\n").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { line: 3, .. }));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[term]\ntype = Console\n").unwrap();
        let sections = load(&path).unwrap();
        assert_eq!(sections[0].name, "term");
    }
}
