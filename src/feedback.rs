use crate::engine::{WORD_LENGTH, Word};

/// Per-letter result of comparing a guess to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl Feedback {
    /// Parse the `G`/`Y`/`X` shorthand used when printing rows.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Colour every letter of `guess` against `target`.
///
/// A letter that is not in place is marked `Present` whenever the target
/// contains it at all. Letter counts are not consumed, so a repeated guess
/// letter can be marked more often than it occurs in the target.
pub fn get_feedback(guess: &Word, target: &Word) -> [Feedback; WORD_LENGTH] {
    let mut feedback = [Feedback::Absent; WORD_LENGTH];
    let target_letters = target.letters();
    for (i, &letter) in guess.letters().iter().enumerate() {
        feedback[i] = if target_letters[i] == letter {
            Feedback::Correct
        } else if target.contains(letter) {
            Feedback::Present
        } else {
            Feedback::Absent
        };
    }
    feedback
}

/// Render feedback as a `G`/`Y`/`X` pattern such as `XGGYG`.
pub fn feedback_pattern(feedback: &[Feedback]) -> String {
    feedback.iter().map(|f| f.to_char()).collect()
}
