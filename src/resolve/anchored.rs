//! Name positioned above a six-digit occupation code.

use regex::Regex;

use super::{clean_name, NameResolver, Strategy};

/// Field labels that share the header block with the employee name on
/// payroll slips and must never be taken for a name.
pub const DEFAULT_EXCLUDED_LABELS: &[&str] = &[
    "Nome do Funcionário",
    "Departamento",
    "Filial",
    "Mensalista",
    "Admissão",
    "Folha Mensal",
];

/// How many lines above the anchor may hold the name.
const LOOKBEHIND_LINES: usize = 3;

/// Resolves the name printed just above a CBO occupation code.
///
/// The first line containing a standalone six-digit number is the anchor.
/// The up to three lines before it are checked oldest first and the first
/// one that is not blank, not purely numeric and not a known field label
/// wins. Only the first anchor on a page is considered, so pages holding
/// several employee records yield the first record's name.
#[derive(Debug, Clone)]
pub struct AnchoredHeuristicStrategy {
    anchor: Regex,
    excluded: Vec<String>,
}

impl AnchoredHeuristicStrategy {
    /// Create a resolver excluding [`DEFAULT_EXCLUDED_LABELS`].
    pub fn new() -> Self {
        Self {
            anchor: Regex::new(r"\b[0-9]{6}\b").unwrap(),
            excluded: DEFAULT_EXCLUDED_LABELS
                .iter()
                .map(|label| label.to_lowercase())
                .collect(),
        }
    }

    /// Replace the set of field labels that are never names.
    pub fn with_excluded_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    fn is_candidate(&self, line: &str) -> bool {
        if line.is_empty() || line.chars().all(char::is_numeric) {
            return false;
        }
        let lowered = line.to_lowercase();
        !self.excluded.iter().any(|label| *label == lowered)
    }
}

impl Default for AnchoredHeuristicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver for AnchoredHeuristicStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::AnchoredHeuristic
    }

    fn resolve(&self, page_text: &str) -> Option<String> {
        let lines: Vec<&str> = page_text.lines().collect();
        let anchor = lines.iter().position(|line| self.anchor.is_match(line))?;

        lines[anchor.saturating_sub(LOOKBEHIND_LINES)..anchor]
            .iter()
            .map(|line| line.trim())
            .find(|line| self.is_candidate(line))
            .and_then(clean_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> Option<String> {
        AnchoredHeuristicStrategy::new().resolve(text)
    }

    #[test]
    fn test_name_after_header_labels() {
        let text = "Nome do Funcionário\nDepartamento\nMARIA OLIVEIRA\n123456 AUXILIAR\n";
        assert_eq!(resolve(text), Some("MARIA OLIVEIRA".to_string()));
    }

    #[test]
    fn test_oldest_candidate_wins() {
        let text = "EMPRESA X\nJOSE SANTOS\nFilial\n001\n654321\n";
        // Window is the three lines above the code: JOSE SANTOS, Filial, 001
        assert_eq!(resolve(text), Some("JOSE SANTOS".to_string()));
    }

    #[test]
    fn test_only_three_lines_back() {
        let text = "FAR AWAY NAME\nFilial\nMensalista\n0042\n111111\n";
        assert_eq!(resolve(text), None);
    }

    #[test]
    fn test_numeric_lines_skipped() {
        let text = "12345\nLUCIA MENDES\n999999\n";
        assert_eq!(resolve(text), Some("LUCIA MENDES".to_string()));
    }

    #[test]
    fn test_only_first_anchor_considered() {
        let text = "Departamento\n123456\nSEGUNDO NOME\n654321\n";
        assert_eq!(resolve(text), None);
    }

    #[test]
    fn test_seven_digits_is_not_anchor() {
        assert_eq!(resolve("ANA\n1234567\n"), None);
        assert_eq!(resolve("ANA\nX123456\n"), None);
    }

    #[test]
    fn test_anchor_on_first_line() {
        assert_eq!(resolve("123456\nNOME\n"), None);
    }

    #[test]
    fn test_no_anchor() {
        assert_eq!(resolve("Nome do Funcionário\nMARIA\n"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let text = "DEPARTAMENTO\nRUTE COSTA\n123456\n";
        assert_eq!(resolve(text), Some("RUTE COSTA".to_string()));
        let text = "  FOLHA MENSAL  \n123456\n";
        assert_eq!(resolve(text), None);
    }

    #[test]
    fn test_custom_excluded_labels() {
        let resolver = AnchoredHeuristicStrategy::new().with_excluded_labels(["Setor"]);
        assert_eq!(
            resolver.resolve("Setor\nDepartamento\n123456\n"),
            Some("Departamento".to_string())
        );
    }
}
