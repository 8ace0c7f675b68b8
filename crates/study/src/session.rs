//! A single review session over one deck.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::Rating;
use crate::deck::FlashCardDeck;

/// Result shown once a session ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    /// False when the user left before reviewing every card.
    pub completed: bool,
}

impl SessionSummary {
    pub fn reviewed(&self) -> u32 {
        self.easy + self.medium + self.hard
    }

    /// Easy 3, medium 2, hard 1 point per card.
    pub fn score(&self) -> u32 {
        self.easy * Rating::Easy.points()
            + self.medium * Rating::Medium.points()
            + self.hard * Rating::Hard.points()
    }

    pub fn max_score(&self) -> u32 {
        self.reviewed() * Rating::Easy.points()
    }

    fn count(&mut self, rating: Rating) {
        match rating {
            Rating::Easy => self.easy += 1,
            Rating::Medium => self.medium += 1,
            Rating::Hard => self.hard += 1,
        }
    }
}

/// Shuffled queue of card indices into a deck, capped at the card limit.
#[derive(Clone, Debug)]
pub struct StudySession {
    deck_name: String,
    queue: Vec<usize>,
    position: usize,
    revealed: bool,
    summary: SessionSummary,
}

impl StudySession {
    pub fn new(deck: &FlashCardDeck, limit: usize, rng: &mut impl Rng) -> Self {
        let mut queue: Vec<usize> = (0..deck.len()).collect();
        queue.shuffle(rng);
        queue.truncate(limit);
        Self {
            deck_name: deck.name.clone(),
            queue,
            position: 0,
            revealed: false,
            summary: SessionSummary::default(),
        }
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// 1-based position of the card under review, for display.
    pub fn progress(&self) -> (usize, usize) {
        ((self.position + 1).min(self.queue.len()), self.queue.len())
    }

    /// Deck index of the card under review.
    pub fn current_card(&self) -> Option<usize> {
        self.queue.get(self.position).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Shows the answer. Returns true if it was hidden.
    pub fn reveal(&mut self) -> bool {
        if self.is_finished() || self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Rates the current card and advances. Returns the rated deck index.
    ///
    /// Cards must be revealed before they can be rated.
    pub fn rate(&mut self, rating: Rating) -> Option<usize> {
        if !self.revealed {
            return None;
        }
        let card = self.current_card()?;
        self.summary.count(rating);
        self.position += 1;
        self.revealed = false;
        Some(card)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            completed: self.is_finished(),
            ..self.summary
        }
    }

    /// Summary for a session cut short by the clock, which still counts as done.
    pub fn summary_on_timeout(&self) -> SessionSummary {
        SessionSummary {
            completed: true,
            ..self.summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::FlashCard;
    use rand::{SeedableRng, rngs::StdRng};

    fn deck(n: usize) -> FlashCardDeck {
        FlashCardDeck::with_cards(
            "Numbers",
            (0..n).map(|i| FlashCard::new(format!("{i}?"), i.to_string())).collect(),
        )
    }

    #[test]
    fn queue_is_a_limited_permutation() {
        let mut rng = StdRng::seed_from_u64(9);
        let session = StudySession::new(&deck(10), 4, &mut rng);
        assert_eq!(session.len(), 4);

        let mut all = StudySession::new(&deck(6), 15, &mut rng).queue;
        all.sort_unstable();
        assert_eq!(all, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn rating_requires_reveal() {
        let mut session = StudySession::new(&deck(2), 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(session.rate(Rating::Easy), None);
        assert!(session.reveal());
        assert!(!session.reveal());
        let first = session.current_card();
        assert_eq!(session.rate(Rating::Easy), first);
        assert!(!session.is_revealed());
        assert_eq!(session.progress(), (2, 2));
    }

    #[test]
    fn summary_scores_and_completion() {
        let mut session = StudySession::new(&deck(3), 10, &mut StdRng::seed_from_u64(2));
        for rating in [Rating::Easy, Rating::Medium] {
            session.reveal();
            session.rate(rating);
        }
        let partial = session.summary();
        assert!(!partial.completed);
        assert_eq!(partial.score(), 5);
        assert!(session.summary_on_timeout().completed);

        session.reveal();
        session.rate(Rating::Hard);
        let done = session.summary();
        assert!(session.is_finished());
        assert!(done.completed);
        assert_eq!((done.easy, done.medium, done.hard), (1, 1, 1));
        assert_eq!(done.score(), 6);
        assert_eq!(done.max_score(), 9);
        assert!(!session.reveal());
    }

    #[test]
    fn empty_deck_finishes_immediately() {
        let session = StudySession::new(&deck(0), 10, &mut StdRng::seed_from_u64(3));
        assert!(session.is_finished());
        assert_eq!(session.current_card(), None);
        assert_eq!(session.progress(), (0, 0));
    }
}
