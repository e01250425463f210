use crate::ir::FlatRecord;

/// Ancestor path for hover highlighting: the delimiter-truncated prefixes
/// of `hovered_id` that exist in `records`, ordered from the root down to
/// `hovered_id` itself. An id with no matching record yields an empty
/// path. The renderer dims everything outside the returned set.
pub fn ancestor_path(hovered_id: &str, records: &[FlatRecord], delimiter: &str) -> Vec<String> {
    let known = |id: &str| records.iter().any(|record| record.id == id);
    if !known(hovered_id) {
        return Vec::new();
    }
    let mut path = vec![hovered_id.to_string()];
    if !delimiter.is_empty() {
        let mut cursor = hovered_id;
        while let Some(at) = cursor.rfind(delimiter) {
            cursor = &cursor[..at];
            if known(cursor) {
                path.push(cursor.to_string());
            }
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ids: &[&str]) -> Vec<FlatRecord> {
        ids.iter().map(|id| FlatRecord::new(*id, 1.0)).collect()
    }

    #[test]
    fn path_runs_from_root_to_hovered_inclusive() {
        let records = records(&["a", "a|b", "a|b|c", "a|other"]);
        assert_eq!(ancestor_path("a|b|c", &records, "|"), ["a", "a|b", "a|b|c"]);
    }

    #[test]
    fn hovering_the_root_yields_just_the_root() {
        let records = records(&["a", "a|b"]);
        assert_eq!(ancestor_path("a", &records, "|"), ["a"]);
    }

    #[test]
    fn unknown_id_yields_an_empty_path() {
        let records = records(&["a", "a|b"]);
        assert!(ancestor_path("a|nope", &records, "|").is_empty());
    }

    #[test]
    fn truncation_respects_the_delimiter_boundary() {
        // "a|b" is a plain prefix of "a|bc" but not its ancestor
        let records = records(&["a", "a|b", "a|bc"]);
        assert_eq!(ancestor_path("a|bc", &records, "|"), ["a", "a|bc"]);
    }

    #[test]
    fn delimiter_choice_changes_the_path() {
        let records = records(&["a|b"]);
        assert_eq!(ancestor_path("a|b", &records, "/"), ["a|b"]);
    }
}
