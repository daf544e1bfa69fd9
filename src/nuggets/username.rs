use crate::nuggets::prelude::*;

/// Whether a prospective player name contains nothing but blanks.
/// Blank-only names are rejected before normalization.
pub fn is_blank(name: &str) -> bool {
    name.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Normalizes a player name: truncates to [`MAX_NAME_LENGTH`] bytes
/// and replaces every byte that is neither graphic nor blank with an
/// underscore. Multi-byte characters are masked byte by byte.
pub fn normalize(name: &str) -> String {
    name.bytes()
        .take(MAX_NAME_LENGTH)
        .map(|b| {
            if b.is_ascii_graphic() || b == b' ' || b == b'\t' {
                b as char
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("                "));
        assert!(is_blank(" \t "));
        assert!(!is_blank("Hello world"));
        assert!(!is_blank("  x  "));
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(normalize("Marvin Escobar Barajas"), "Marvin Esc");
        assert_eq!(normalize("Alice"), "Alice");
    }

    #[test]
    fn masks_unprintable_bytes() {
        assert_eq!(normalize("a\x07b"), "a_b");
        assert_eq!(normalize("tab\tok"), "tab\tok");
        // each byte of a multi-byte character is masked on its own
        assert_eq!(normalize("caf\u{e9}"), "caf__");
    }
}
