//! Line scanner for the catalog document format.
//!
//! The input is a markdown file holding one section per entity:
//!
//! ```markdown
//! ## 1. Test Academy
//!
//! | Параметр | Значение |
//! |----------|----------|
//! | **Город** | Москва |
//! | **Сайт** | example.ru |
//!
//! ---
//!
//! ## 2. Next Academy
//! ...
//! ```
//!
//! Sections are separated by `---` horizontal rules. Within a section the
//! first `## ` heading names the record; every following `|`-row with at
//! least a key and a value cell contributes a field. Scanning is total:
//! malformed rows and incomplete sections are skipped, never an error.

use super::record::Record;

/// Placeholder phrases the source uses where data is missing. Any value
/// containing one of these collapses to [`NO_DATA_MARKER`].
const NO_DATA_PLACEHOLDERS: &[&str] =
    &["Данные не найдены", "Официальные данные не опубликованы"];

/// Canonical marker substituted for all "no data" placeholder variants.
pub const NO_DATA_MARKER: &str = "Данные не найдены";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Waiting for the section's `## ` heading; other lines are ignored.
    SeekingTitle,
    /// Heading seen; collecting table rows until the next separator.
    InTable,
}

/// Scan a catalog document into records.
///
/// A record is emitted only if its section had both a heading and at least
/// one extracted key/value pair. Sections failing either condition are
/// silently dropped.
pub fn scan_document(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut state = ScanState::SeekingTitle;
    let mut current: Option<Record> = None;
    // Key inserted by the immediately preceding line, so a following
    // alignment row can retract the table header.
    let mut prev_line_key: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();

        if is_separator(line) {
            flush(&mut current, &mut records);
            state = ScanState::SeekingTitle;
            prev_line_key = None;
            continue;
        }

        match state {
            ScanState::SeekingTitle => {
                if let Some(title) = line.strip_prefix("## ") {
                    let title = title.trim();
                    if !title.is_empty() {
                        current = Some(Record::new(title));
                        state = ScanState::InTable;
                    }
                }
            }
            ScanState::InTable => {
                prev_line_key = scan_row(line, current.as_mut(), prev_line_key);
            }
        }
    }

    flush(&mut current, &mut records);
    records
}

/// Process one line in the `InTable` state. Returns the key inserted by
/// this line, if any, for header retraction.
fn scan_row(
    line: &str,
    current: Option<&mut Record>,
    prev_line_key: Option<String>,
) -> Option<String> {
    let Some(record) = current else {
        return None;
    };

    if !line.starts_with('|') {
        return None;
    }

    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        // Malformed row, too few cells
        return None;
    }

    if is_alignment_row(&parts) {
        // The row above was the table header, not data
        if let Some(key) = prev_line_key {
            record.remove(&key);
        }
        return None;
    }

    let key = strip_emphasis(parts[1].trim());
    let key = key.trim();
    let stripped = strip_emphasis(parts[2].trim());
    let value = normalize_placeholder(stripped.trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    record.insert(key, value);
    Some(key.to_string())
}

fn flush(current: &mut Option<Record>, records: &mut Vec<Record>) {
    if let Some(record) = current.take() {
        if !record.is_empty() {
            records.push(record);
        }
    }
}

/// A horizontal rule: three or more dashes and nothing else.
fn is_separator(line: &str) -> bool {
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

/// A table alignment row: every interior cell is dashes/colons only, e.g.
/// `|----|:---:|`.
fn is_alignment_row(parts: &[&str]) -> bool {
    let interior = &parts[1..];
    let mut saw_dash = false;
    for cell in interior {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        if !cell.chars().all(|c| c == '-' || c == ':') {
            return false;
        }
        saw_dash |= cell.contains('-');
    }
    saw_dash
}

/// Strip `**bold**` and `*italic*` markers, keeping the wrapped text.
/// Unpaired markers are left alone; no other markdown is interpreted.
fn strip_emphasis(s: &str) -> String {
    let stripped = strip_paired(s, "**");
    strip_paired(&stripped, "*")
}

fn strip_paired(s: &str, marker: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find(marker) {
        let after = start + marker.len();
        match rest[after..].find(marker) {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(&rest[after..after + end]);
                rest = &rest[after + end + marker.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Collapse known "no data" placeholder variants to the canonical marker.
fn normalize_placeholder(value: &str) -> &str {
    if NO_DATA_PLACEHOLDERS.iter().any(|p| value.contains(p)) {
        NO_DATA_MARKER
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_single_section() {
        let doc = "## 1. Test Academy\n| **Город** | Москва |\n| **Сайт** | example.ru |\n";
        let records = scan_document(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "1. Test Academy");
        assert_eq!(records[0].get("Город"), Some("Москва"));
        assert_eq!(records[0].get("Сайт"), Some("example.ru"));
    }

    #[test]
    fn test_scan_multiple_sections() {
        let doc = "\
## 1. First
| **Город** | Москва |

---

## 2. Second
| **Город** | Казань |
";
        let records = scan_document(doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "1. First");
        assert_eq!(records[1].title, "2. Second");
        assert_eq!(records[1].get("Город"), Some("Казань"));
    }

    #[test]
    fn test_heading_only_section_yields_no_record() {
        let doc = "## Lonely Heading\n\nSome prose, no table.\n";
        assert!(scan_document(doc).is_empty());
    }

    #[test]
    fn test_table_without_heading_yields_no_record() {
        let doc = "| **Город** | Москва |\n";
        assert!(scan_document(doc).is_empty());
    }

    #[test]
    fn test_rows_before_heading_are_ignored() {
        let doc = "| **Город** | Тверь |\n## Academy\n| **Город** | Москва |\n";
        let records = scan_document(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Город"), Some("Москва"));
    }

    #[test]
    fn test_header_and_alignment_rows_skipped() {
        let doc = "\
## Academy
| Параметр | Значение |
|----------|----------|
| **Город** | Москва |
";
        let records = scan_document(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("Параметр"), None);
        assert_eq!(records[0].get("Город"), Some("Москва"));
    }

    #[test]
    fn test_malformed_rows_ignored() {
        let doc = "## Academy\n| lonely cell\n| **Город** | Москва |\nnot a row\n";
        let records = scan_document(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let doc = "## Academy\n| **Город** | Москва |\n| **Город** | Казань |\n";
        let records = scan_document(doc);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("Город"), Some("Казань"));
    }

    #[test]
    fn test_whitespace_around_pipes_trimmed() {
        let doc = "## Academy\n|   **Город**   |   Москва   |\n";
        let records = scan_document(doc);
        assert_eq!(records[0].get("Город"), Some("Москва"));
    }

    #[test]
    fn test_placeholder_normalized() {
        let doc = "## Academy\n| **Email** | *Данные не найдены* |\n| **Сайт** | *Официальные данные не опубликованы* |\n";
        let records = scan_document(doc);
        assert_eq!(records[0].get("Email"), Some(NO_DATA_MARKER));
        assert_eq!(records[0].get("Сайт"), Some(NO_DATA_MARKER));
    }

    #[test]
    fn test_empty_cells_dropped() {
        let doc = "## Academy\n| **Город** | |\n| | Москва |\n| **Сайт** | example.ru |\n";
        let records = scan_document(doc);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("Сайт"), Some("example.ru"));
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_emphasis("**Город**"), "Город");
        assert_eq!(strip_emphasis("*курсив*"), "курсив");
        assert_eq!(strip_emphasis("**a** and *b*"), "a and b");
        // Unpaired markers survive
        assert_eq!(strip_emphasis("5* rating"), "5* rating");
        assert_eq!(strip_emphasis("plain"), "plain");
    }

    #[test]
    fn test_extra_cells_ignored() {
        // Only the 2nd and 3rd cells count
        let doc = "## Academy\n| **Город** | Москва | третья | четвёртая |\n";
        let records = scan_document(doc);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("Город"), Some("Москва"));
    }

    #[test]
    fn test_long_rule_is_separator() {
        let doc = "## A\n| **Город** | Москва |\n-----\n## B\n| **Город** | Казань |\n";
        assert_eq!(scan_document(doc).len(), 2);
    }
}
