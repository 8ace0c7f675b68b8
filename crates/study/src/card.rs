/// How hard a card was the last time it was answered.
///
/// Stored in deck files as the upper-case variant name. Unrecognized text
/// reads back as [`CardDifficulty::Unknown`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CardDifficulty {
    #[default]
    Unknown,
    Easy,
    Medium,
    High,
}

impl CardDifficulty {
    pub fn parse_lenient(text: &str) -> Self {
        text.trim().parse().unwrap_or_default()
    }
}

/// Answer given by the user during a review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Rating {
    Easy,
    Medium,
    Hard,
}

impl Rating {
    /// Points awarded toward the session score.
    pub const fn points(self) -> u32 {
        match self {
            Self::Easy => 3,
            Self::Medium => 2,
            Self::Hard => 1,
        }
    }

    pub const fn difficulty(self) -> CardDifficulty {
        match self {
            Self::Easy => CardDifficulty::Easy,
            Self::Medium => CardDifficulty::Medium,
            Self::Hard => CardDifficulty::High,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashCard {
    pub question: String,
    pub answer: String,
    pub difficulty: CardDifficulty,
    pub times_answered: u32,
}

impl FlashCard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Self::default()
        }
    }

    /// Records a review: stores the rating and bumps the answer count.
    pub fn record_answer(&mut self, rating: Rating) {
        self.difficulty = rating.difficulty();
        self.times_answered = self.times_answered.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_text_round_trips() {
        assert_eq!(CardDifficulty::High.to_string(), "HIGH");
        assert_eq!(CardDifficulty::parse_lenient("MEDIUM"), CardDifficulty::Medium);
        assert_eq!(CardDifficulty::parse_lenient(" EASY "), CardDifficulty::Easy);
        assert_eq!(CardDifficulty::parse_lenient(""), CardDifficulty::Unknown);
        assert_eq!(CardDifficulty::parse_lenient("SOMETHING"), CardDifficulty::Unknown);
    }

    #[test]
    fn new_card_is_unanswered() {
        let card = FlashCard::new("q", "a");
        assert_eq!(card.difficulty, CardDifficulty::Unknown);
        assert_eq!(card.times_answered, 0);
    }

    #[test]
    fn recording_answers() {
        let mut card = FlashCard::new("q", "a");
        card.record_answer(Rating::Hard);
        card.record_answer(Rating::Medium);
        assert_eq!(card.difficulty, CardDifficulty::Medium);
        assert_eq!(card.times_answered, 2);
        assert_eq!(Rating::Hard.difficulty(), CardDifficulty::High);
    }
}
