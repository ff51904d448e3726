//! Suspect dialogue model
//!
//! Each suspect carries a small fixed dialogue tree: a named context
//! branch mapping to an ordered list of question/answer pairs. Only the
//! "Start" branch is populated by the shipped case, but the model holds
//! any number of branches.
//!
//! Lookups are total. Unknown contexts yield empty branches and unknown
//! questions yield a stock deflection, so any input the player produces
//! is safe to feed through.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The branch every interrogation opens with.
pub const START_CONTEXT: &str = "Start";

/// What a suspect says to a question that is not in the current branch.
pub const FALLBACK_ANSWER: &str = "I have nothing further to add.";

/// One question the player can put to a suspect, with its fixed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    pub question: String,
    pub answer: String,
}

impl DialogueEntry {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }
}

/// A suspect in the case.
///
/// The dialogue table is fixed at construction and never mutated. Whether
/// the suspect has been questioned is not held here - that flag lives in
/// the progress store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suspect {
    name: String,
    dialogue: HashMap<String, Vec<DialogueEntry>>,
}

impl Suspect {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dialogue: HashMap::new(),
        }
    }

    /// Adds a dialogue branch, builder-style, so case setup reads like a
    /// script.
    pub fn with_branch(mut self, context: &str, entries: Vec<DialogueEntry>) -> Self {
        self.dialogue.insert(context.to_string(), entries);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The questions available in a context, in the order the case defines
    /// them. An empty context resolves to "Start"; an unknown context has
    /// no questions rather than being an error.
    pub fn options_for(&self, context: &str) -> &[DialogueEntry] {
        let context = if context.is_empty() {
            START_CONTEXT
        } else {
            context
        };
        self.dialogue
            .get(context)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The suspect's answer to a question in a context.
    ///
    /// Total: an unknown context behaves as an empty branch, and any
    /// question outside the branch gets the fallback line.
    pub fn respond(&self, context: &str, question: &str) -> &str {
        self.dialogue
            .get(context)
            .and_then(|branch| branch.iter().find(|entry| entry.question == question))
            .map(|entry| entry.answer.as_str())
            .unwrap_or(FALLBACK_ANSWER)
    }
}

impl std::fmt::Display for Suspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suspect() -> Suspect {
        Suspect::new("Nomsa").with_branch(
            START_CONTEXT,
            vec![
                DialogueEntry::new("Where were you?", "In the main hall."),
                DialogueEntry::new("What did you see?", "Nothing unusual."),
            ],
        )
    }

    #[test]
    fn known_question_returns_its_answer() {
        let s = suspect();
        assert_eq!(s.respond(START_CONTEXT, "Where were you?"), "In the main hall.");
    }

    #[test]
    fn unknown_question_gets_the_fallback() {
        let s = suspect();
        assert_eq!(
            s.respond(START_CONTEXT, "Do you like scones?"),
            FALLBACK_ANSWER
        );
    }

    #[test]
    fn unknown_context_behaves_as_an_empty_branch() {
        let s = suspect();
        // Even a question that exists under "Start" deflects here.
        assert_eq!(s.respond("Confrontation", "Where were you?"), FALLBACK_ANSWER);
        assert_eq!(s.respond("Confrontation", "Anything?"), FALLBACK_ANSWER);
        assert!(s.options_for("Confrontation").is_empty());
    }

    #[test]
    fn empty_context_lists_the_start_branch() {
        let s = suspect();
        let options = s.options_for("");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].question, "Where were you?");
        assert_eq!(options[1].question, "What did you see?");
    }

    #[test]
    fn question_order_is_preserved() {
        let s = suspect();
        let questions: Vec<&str> = s
            .options_for(START_CONTEXT)
            .iter()
            .map(|entry| entry.question.as_str())
            .collect();
        assert_eq!(questions, vec!["Where were you?", "What did you see?"]);
    }
}
