//! File-based DeckRepository implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::deck::{DECK_EXTENSION, FlashCardDeck, file_stem_for};
use crate::error::{DeckError, Result};
use crate::repository::DeckRepository;

/// Stores each deck as `<stem>.deck` in one directory.
///
/// Writes go to a temporary file that is renamed over the target, so a crash
/// never leaves a half-written deck behind. Decks loaded from a file whose
/// name does not match the deck's stem keep being read from and written to
/// that file.
pub struct FileDeckRepository {
    base_dir: PathBuf,
    /// Source file of every listed deck, keyed by deck stem.
    paths: RwLock<BTreeMap<String, PathBuf>>,
}

impl FileDeckRepository {
    /// Opens `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            paths: RwLock::new(BTreeMap::new()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The file a deck was listed from, or `<stem>.deck` for new decks.
    fn deck_path(&self, name: &str) -> Result<PathBuf> {
        let stem = file_stem_for(name);
        let paths = self.paths.read().map_err(|_| DeckError::LockPoisoned)?;
        Ok(paths
            .get(&stem)
            .cloned()
            .unwrap_or_else(|| self.base_dir.join(format!("{stem}.{DECK_EXTENSION}"))))
    }

    fn read_deck(path: &Path) -> Result<Option<FlashCardDeck>> {
        let Ok(text) = String::from_utf8(fs::read(path)?) else {
            tracing::warn!("Skipping {}: not valid UTF-8", path.display());
            return Ok(None);
        };
        match FlashCardDeck::parse(&text) {
            Ok(deck) => Ok(Some(deck)),
            Err(DeckError::Parse { line, reason }) => {
                tracing::warn!(
                    "Skipping {}: line {}: {}",
                    path.display(),
                    line,
                    reason
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl DeckRepository for FileDeckRepository {
    fn list(&self) -> Result<Vec<FlashCardDeck>> {
        let mut decks = Vec::new();
        let mut paths: BTreeMap<String, PathBuf> = BTreeMap::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(DECK_EXTENSION)
            {
                continue;
            }

            let Some(deck) = Self::read_deck(&path)? else {
                continue;
            };
            let stem = file_stem_for(&deck.name);
            if let Some(first) = paths.get(&stem) {
                tracing::warn!(
                    "Skipping {}: deck '{}' is already stored in {}",
                    path.display(),
                    deck.name,
                    first.display()
                );
                continue;
            }
            paths.insert(stem, path);
            decks.push(deck);
        }

        *self.paths.write().map_err(|_| DeckError::LockPoisoned)? = paths;
        decks.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("Loaded {} decks from {}", decks.len(), self.base_dir.display());
        Ok(decks)
    }

    fn save(&self, deck: &FlashCardDeck) -> Result<()> {
        let path = self.deck_path(&deck.name)?;
        let temp_path = path.with_extension("deck.tmp");

        fs::write(&temp_path, deck.to_text())?;
        fs::rename(&temp_path, &path)?;
        self.paths
            .write()
            .map_err(|_| DeckError::LockPoisoned)?
            .insert(file_stem_for(&deck.name), path.clone());

        tracing::debug!("Saved deck '{}' to {}", deck.name, path.display());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.deck_path(name)?;
        self.paths
            .write()
            .map_err(|_| DeckError::LockPoisoned)?
            .remove(&file_stem_for(name));

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted deck '{}'", name);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::FlashCard;
    use tempfile::TempDir;

    #[test]
    fn saves_lists_and_deletes() {
        let dir = TempDir::new().unwrap();
        let repo = FileDeckRepository::new(dir.path().join("Decks")).unwrap();
        assert!(repo.is_empty().unwrap());

        let deck = FlashCardDeck::with_cards("Spanish Verbs", vec![FlashCard::new("ser", "to be")]);
        repo.save(&deck).unwrap();
        repo.save(&FlashCardDeck::new("Algebra")).unwrap();

        assert!(repo.base_dir().join("spanish_verbs.deck").exists());
        let names: Vec<_> = repo.list().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Algebra", "Spanish Verbs"]);

        repo.delete("Spanish Verbs").unwrap();
        repo.delete("never existed").unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn skips_foreign_and_malformed_files() {
        let dir = TempDir::new().unwrap();
        let repo = FileDeckRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a deck").unwrap();
        fs::write(dir.path().join("broken.deck"), "Broken\nwhat is this\n").unwrap();
        fs::write(dir.path().join("latin1.deck"), b"Caf\xe9\nQ: a\nA: b\n").unwrap();
        repo.save(&FlashCardDeck::new("Fine")).unwrap();

        let decks = repo.list().unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name, "Fine");
    }

    #[test]
    fn overwrite_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileDeckRepository::new(dir.path()).unwrap();
        let mut deck = FlashCardDeck::new("Deck");
        repo.save(&deck).unwrap();
        deck.cards.push(FlashCard::new("q", "a"));
        repo.save(&deck).unwrap();

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
        assert_eq!(repo.list().unwrap()[0].len(), 1);
    }

    #[test]
    fn decks_keep_their_source_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileDeckRepository::new(dir.path()).unwrap();
        let old_file = dir.path().join("my_old_file.deck");
        fs::write(&old_file, "Biology\n").unwrap();

        let mut deck = repo.list().unwrap().remove(0);
        assert_eq!(deck.name, "Biology");

        deck.cards.push(FlashCard::new("cell?", "unit"));
        repo.save(&deck).unwrap();
        assert!(!dir.path().join("biology.deck").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(repo.list().unwrap()[0].len(), 1);

        repo.delete("Biology").unwrap();
        assert!(!old_file.exists());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn duplicate_deck_names_load_once() {
        let dir = TempDir::new().unwrap();
        let repo = FileDeckRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("biology.deck"), "Biology\n").unwrap();
        fs::write(dir.path().join("copy.deck"), "biology\n").unwrap();

        assert_eq!(repo.list().unwrap().len(), 1);
    }
}
