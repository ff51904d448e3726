//! The shipped case: Gogo's missing scones
//!
//! The cast is authored by hand, one suspect at a time. Each opening
//! branch reflects the clue sheet:
//! - Sipho was last seen near the pantry and holds a key.
//! - Nomsa had a heated conversation with Gogo over the secret recipe.
//! - Thando was seen in the kitchen without a clear explanation.

use crate::game::dialogue::{DialogueEntry, Suspect, START_CONTEXT};

/// Title shown in the header and on the menu.
pub const CASE_TITLE: &str = "The Case of the Missing Scones";

/// The one name the accusation rule accepts, compared case-insensitively.
pub const CULPRIT: &str = "Sipho";

/// Builds the three suspects with their opening interrogation branches.
pub fn create_suspects() -> Vec<Suspect> {
    let nomsa = Suspect::new("Nomsa").with_branch(
        START_CONTEXT,
        vec![
            DialogueEntry::new(
                "Where were you when the scones disappeared?",
                "I was in the main hall, keeping an eye on the setup. I admit I argued \
                 with Gogo earlier, but I wouldn't steal from my own family.",
            ),
            DialogueEntry::new(
                "Can you explain your argument with Gogo?",
                "Yes, we disagreed about the secret recipe, but that was just a passing \
                 conflict. I value our traditions too much.",
            ),
        ],
    );

    let sipho = Suspect::new("Sipho").with_branch(
        START_CONTEXT,
        vec![
            DialogueEntry::new(
                "Where were you last seen?",
                "I was near the pantry, checking the ingredients. Yes, I have a key - \
                 but I only use it when necessary.",
            ),
            DialogueEntry::new(
                "What about the tip saying you feel overlooked?",
                "I admit I've felt underappreciated sometimes, but that doesn't mean \
                 I'd sabotage our traditions.",
            ),
        ],
    );

    let thando = Suspect::new("Thando").with_branch(
        START_CONTEXT,
        vec![
            DialogueEntry::new(
                "Why were you in the kitchen shortly before the scones went missing?",
                "I was just curious; the kitchen is where the magic happens, and I \
                 wanted to see if everything was in order.",
            ),
            DialogueEntry::new(
                "Do you think you had anything to do with the disappearance?",
                "No, I was simply passing through. I have no motive to disrupt the \
                 family tradition.",
            ),
        ],
    );

    vec![nomsa, sipho, thando]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_is_three_suspects_in_order() {
        let suspects = create_suspects();
        let names: Vec<&str> = suspects.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Nomsa", "Sipho", "Thando"]);
    }

    #[test]
    fn every_suspect_has_two_opening_questions() {
        for suspect in create_suspects() {
            assert_eq!(
                suspect.options_for(START_CONTEXT).len(),
                2,
                "{} should open with two questions",
                suspect.name()
            );
        }
    }

    #[test]
    fn the_culprit_is_in_the_cast() {
        assert!(create_suspects().iter().any(|s| s.name() == CULPRIT));
    }
}
