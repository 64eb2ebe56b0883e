//! Filesystem-safe output names.

use std::collections::HashSet;

/// Characters rejected by at least one common filesystem.
const RESERVED_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Make an extracted name safe to use as a file stem.
///
/// Trims the ends, collapses runs of two or more whitespace characters into
/// a single space and replaces reserved characters with `_`. Case and
/// accents are kept. The function is idempotent.
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if chars.peek().is_some_and(|next| next.is_whitespace()) {
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
                out.push(' ');
            } else {
                out.push(c);
            }
        } else if RESERVED_CHARS.contains(&c) {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}

/// Hands out unique file stems within one run.
///
/// The first occurrence of a stem is kept as is. Later duplicates get `_2`,
/// `_3`, ... in the order they are claimed. Comparison ignores case so the
/// output also works on case-insensitive filesystems.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `stem`, or the first free suffixed variant of it.
    pub fn claim(&mut self, stem: &str) -> String {
        if self.taken.insert(stem.to_lowercase()) {
            return stem.to_string();
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", stem, n);
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Number of names handed out so far.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Whether no name has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_chars_replaced() {
        assert_eq!(sanitize_filename("JOÃO: SILVA"), "JOÃO_ SILVA");
        assert_eq!(sanitize_filename(r#"a\b/c*d?e"f<g>h|i"#), "a_b_c_d_e_f_g_h_i");
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(sanitize_filename("  MARIA   OLIVEIRA \n"), "MARIA OLIVEIRA");
        assert_eq!(sanitize_filename("A \t B"), "A B");
        // Single whitespace characters are left alone
        assert_eq!(sanitize_filename("A\tB"), "A\tB");
    }

    #[test]
    fn test_case_and_accents_preserved() {
        assert_eq!(sanitize_filename("José d'Ávila"), "José d'Ávila");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "JOÃO: SILVA",
            " a  b\t\tc ",
            "x \u{00A0} y",
            "<<>>??",
            "A\tB",
            "\n\nZ  ",
        ];
        for sample in samples {
            let once = sanitize_filename(sample);
            assert_eq!(sanitize_filename(&once), once, "input {:?}", sample);
        }
    }

    #[test]
    fn test_unique_names_suffixes() {
        let mut names = UniqueNames::new();
        assert_eq!(names.claim("ANA"), "ANA");
        assert_eq!(names.claim("ANA"), "ANA_2");
        assert_eq!(names.claim("ana"), "ana_3");
        assert_eq!(names.claim("BRUNO"), "BRUNO");
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_unique_names_skips_literal_suffix() {
        let mut names = UniqueNames::new();
        assert_eq!(names.claim("ANA_2"), "ANA_2");
        assert_eq!(names.claim("ANA"), "ANA");
        assert_eq!(names.claim("ANA"), "ANA_3");
        assert_eq!(names.claim("ANA_2"), "ANA_2_2");
    }
}
