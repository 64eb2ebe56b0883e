//! Name following a literal "full name" label.

use regex::Regex;

use super::{clean_name, NameResolver, Strategy};

/// Label printed above the employee name on registration forms.
pub const DEFAULT_LABEL: &str = "NOME COMPLETO";

/// Resolves the name written on the line after a label such as
/// `NOME COMPLETO`.
///
/// The strict pattern wants the label, a line break, then at least three
/// name-like characters (letters, combining marks, spaces, apostrophes,
/// hyphens). When text extraction has mangled the line breaks, the first
/// non-empty text after the label is accepted instead.
#[derive(Debug, Clone)]
pub struct LabeledFieldStrategy {
    label: String,
    strict: Regex,
}

impl LabeledFieldStrategy {
    /// Create a resolver using [`DEFAULT_LABEL`].
    pub fn new() -> Self {
        Self::with_label(DEFAULT_LABEL)
    }

    /// Create a resolver anchored on a custom label.
    pub fn with_label(label: &str) -> Self {
        let pattern = format!(
            r"{}[^\S\n]*\r?\n[^\S\n]*([\p{{L}}\p{{M}}'’\- \t]{{3,}})",
            regex::escape(label)
        );
        Self {
            label: label.to_string(),
            strict: Regex::new(&pattern).unwrap(),
        }
    }

    /// The label this resolver looks for.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn strict_match(&self, text: &str) -> Option<String> {
        let caps = self.strict.captures(text)?;
        clean_name(caps.get(1)?.as_str())
    }

    /// Text on the label's own line counts only after a `:` separator, so
    /// longer captions such as `NOME COMPLETO DO FUNCIONARIO` are skipped.
    fn loose_match(&self, text: &str) -> Option<String> {
        let start = text.find(&self.label)? + self.label.len();
        let rest = &text[start..];
        let (label_line, following) = rest.split_once('\n').unwrap_or((rest, ""));

        label_line
            .trim_start()
            .strip_prefix(':')
            .and_then(clean_name)
            .or_else(|| following.lines().find_map(clean_name))
    }
}

impl Default for LabeledFieldStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver for LabeledFieldStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::LabeledField
    }

    fn resolve(&self, page_text: &str) -> Option<String> {
        self.strict_match(page_text).or_else(|| {
            let name = self.loose_match(page_text);
            if let Some(ref n) = name {
                log::debug!("Label matched loosely: {:?}", n);
            }
            name
        })
    }
}
