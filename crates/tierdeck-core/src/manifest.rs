//! Startup manifest: the newline-separated `source,label` tile list.

use crate::error::ManifestError;

/// One manifest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub source: String,
    pub label: String,
}

/// Parse manifest text.
///
/// Records are `source,label`, one per line, whitespace-trimmed. Blank lines
/// are skipped; a missing label defaults to empty; fields past the second
/// are ignored. A record whose source field is empty fails the parse, since
/// a tile without an image would be unusable.
pub fn parse(text: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(',').map(str::trim);
        let source = fields.next().unwrap_or("");
        if source.is_empty() {
            return Err(ManifestError::MissingSource { line: index + 1 });
        }
        let label = fields.next().unwrap_or("");
        entries.push(ManifestEntry {
            source: source.to_string(),
            label: label.to_string(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_records() {
        let entries = parse("a.png,Alpha\nb.png,Beta\n").unwrap();
        assert_eq!(
            entries,
            vec![
                ManifestEntry { source: "a.png".into(), label: "Alpha".into() },
                ManifestEntry { source: "b.png".into(), label: "Beta".into() },
            ]
        );
    }

    #[test]
    fn test_trimming_blanks_and_defaults() {
        let entries = parse("  a.png ,  Alpha  \n\n   \nb.png\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "a.png");
        assert_eq!(entries[0].label, "Alpha");
        assert_eq!(entries[1].label, "");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let entries = parse("a.png,Alpha,ignored,also ignored").unwrap();
        assert_eq!(entries[0].label, "Alpha");
    }

    #[test]
    fn test_missing_source_is_a_parse_error() {
        let err = parse("a.png,Alpha\n,Orphan\n").unwrap_err();
        assert!(matches!(err, ManifestError::MissingSource { line: 2 }));
    }

    #[test]
    fn test_empty_text_is_empty_board() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }
}
