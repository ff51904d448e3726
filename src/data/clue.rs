//! Clues from the case sheet

use serde::{Deserialize, Serialize};

/// A single clue.
///
/// Clues are loaded once when a case opens and never change afterwards.
/// The hint and the related-suspect reference are optional; the reference
/// is a name, not a link into the suspect list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub description: String,
    pub hint: String,
    pub related_suspect: String,
}

impl Clue {
    pub fn new(description: &str, hint: &str, related_suspect: &str) -> Self {
        Self {
            description: description.to_string(),
            hint: hint.to_string(),
            related_suspect: related_suspect.to_string(),
        }
    }

    /// Parses one `description|hint|relatedSuspect` line from the clue
    /// sheet.
    ///
    /// Fields are whitespace-trimmed. Missing trailing fields default to
    /// empty; anything past the third `|` is ignored. A line never fails
    /// to parse.
    pub fn from_line(line: &str) -> Self {
        let mut fields = line.split('|');
        let description = fields.next().unwrap_or("").trim();
        let hint = fields.next().unwrap_or("").trim();
        let related_suspect = fields.next().unwrap_or("").trim();
        Self::new(description, hint, related_suspect)
    }

    /// The clue with its extra details, if any, in bracketed suffixes.
    pub fn detailed_description(&self) -> String {
        let mut out = self.description.clone();
        if !self.hint.is_empty() {
            out.push_str(&format!(" [Hint: {}]", self.hint));
        }
        if !self.related_suspect.is_empty() {
            out.push_str(&format!(" [Related Suspect: {}]", self.related_suspect));
        }
        out
    }
}

impl std::fmt::Display for Clue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detailed_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_line_parses_all_three_fields() {
        let clue = Clue::from_line("Key found|Look under the mat|Sipho");
        assert_eq!(clue.description, "Key found");
        assert_eq!(clue.hint, "Look under the mat");
        assert_eq!(clue.related_suspect, "Sipho");
    }

    #[test]
    fn short_line_defaults_trailing_fields_to_empty() {
        let clue = Clue::from_line("Scones missing");
        assert_eq!(clue.description, "Scones missing");
        assert_eq!(clue.hint, "");
        assert_eq!(clue.related_suspect, "");
    }

    #[test]
    fn fields_are_trimmed_and_extras_ignored() {
        let clue = Clue::from_line("  Key found | under the mat |  Sipho | spare | parts");
        assert_eq!(clue.description, "Key found");
        assert_eq!(clue.hint, "under the mat");
        assert_eq!(clue.related_suspect, "Sipho");
    }

    #[test]
    fn detailed_description_is_bare_without_details() {
        let clue = Clue::new("Scones missing", "", "");
        assert_eq!(clue.detailed_description(), "Scones missing");
    }

    #[test]
    fn detailed_description_appends_both_suffixes() {
        let clue = Clue::new("Key found", "Look under the mat", "Sipho");
        assert_eq!(
            clue.detailed_description(),
            "Key found [Hint: Look under the mat] [Related Suspect: Sipho]"
        );
    }

    #[test]
    fn detailed_description_with_hint_only() {
        let clue = Clue::new("Flour on the floor", "Size seven prints", "");
        assert_eq!(
            clue.detailed_description(),
            "Flour on the floor [Hint: Size seven prints]"
        );
    }
}
