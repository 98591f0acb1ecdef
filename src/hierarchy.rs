//! Hierarchy helpers derived from task identifiers and parent strings.
//!
//! Task depth is never stored; it is always derived from the dot-delimited
//! identifier (`"2.1.1"` is depth 3).

/// Separator between levels of a hierarchical task identifier.
pub const LEVEL_SEPARATOR: char = '.';

/// Depth of a task identifier: number of separators plus one.
pub fn depth(id: &str) -> usize {
    id.matches(LEVEL_SEPARATOR).count() + 1
}

/// Split a comma-separated parent list, trimming each entry.
///
/// Order and empty entries are preserved, so `""` yields `[""]`. An empty entry
/// means "no parent" and must never be treated as a node name.
pub fn parse_parents(raw: &str) -> Vec<String> {
    raw.split(',').map(|p| p.trim().to_string()).collect()
}

/// Completion predicate shared by every renderer: `done`, or anything starting
/// with `complete` (case-insensitive).
pub fn is_completed(status: &str) -> bool {
    let status = status.to_lowercase();
    status == "done" || status.starts_with("complete")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        assert_eq!(depth("1"), 1);
        assert_eq!(depth("1.1"), 2);
        assert_eq!(depth("1.1.2"), 3);
        assert_eq!(depth(""), 1);
    }

    #[test]
    fn test_parse_parents() {
        assert_eq!(parse_parents("2.1.1, 3.1.1"), vec!["2.1.1", "3.1.1"]);
        assert_eq!(parse_parents("2.1.1,3.1.1"), vec!["2.1.1", "3.1.1"]);
        assert_eq!(parse_parents("2.1.1,  3.1.1, 4.1.2"), vec!["2.1.1", "3.1.1", "4.1.2"]);
        assert_eq!(parse_parents(""), vec![""]);
    }

    #[test]
    fn test_parse_parents_keeps_duplicates_and_blanks() {
        assert_eq!(parse_parents("1.1, ,1.1"), vec!["1.1", "", "1.1"]);
    }

    #[test]
    fn test_is_completed() {
        assert!(is_completed("Done"));
        assert!(is_completed("COMPLETE"));
        assert!(is_completed("Completed"));
        assert!(!is_completed("In Progress"));
        assert!(!is_completed("undone"));
        assert!(!is_completed(""));
    }
}
