use crate::engine::Word;
use crate::error::WordbankError;
use crate::{debug_log, info_log};
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const APP_DIR: &str = "wordle-game";
const USER_WORDBANK_FILE: &str = "wordbank.txt";

/// Non-empty set of candidate target words.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<Word>,
}

impl WordBank {
    pub fn new(words: Vec<Word>) -> Result<Self, WordbankError> {
        if words.is_empty() {
            return Err(WordbankError::Empty);
        }
        Ok(Self { words })
    }

    pub fn embedded() -> Result<Self, WordbankError> {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Pick a target uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        self.words[rng.random_range(0..self.words.len())]
    }
}

fn parse_line(line: &str) -> Option<Word> {
    Word::parse(line.trim()).ok()
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(parse_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, WordbankError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_line(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// `<config dir>/wordle-game/wordbank.txt`, when the platform has a config dir.
pub fn get_user_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_WORDBANK_FILE))
}

/// Load the word bank from `path`, else the user's config dir, else the embedded list.
pub fn resolve_wordbank(path: Option<&Path>) -> Result<WordBank, WordbankError> {
    resolve_wordbank_with(path, get_user_wordbank_path().as_deref())
}

fn resolve_wordbank_with(
    path: Option<&Path>,
    user_path: Option<&Path>,
) -> Result<WordBank, WordbankError> {
    if let Some(path) = path {
        info_log!("Loading word bank from '{}'", path.display());
        return WordBank::new(load_wordbank_from_file(path)?);
    }
    if let Some(user_path) = user_path
        && user_path.is_file()
    {
        info_log!("Loading word bank from '{}'", user_path.display());
        return WordBank::new(load_wordbank_from_file(user_path)?);
    }
    debug_log!("Using embedded word bank");
    WordBank::embedded()
}
