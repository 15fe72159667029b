//! Ranked word lists consumed by the dictionary matchers.
//!
//! A ranked dictionary maps lowercased words to a 1-based frequency rank
//! (1 = most common). Lists are explicit values owned by whoever assembles
//! the matcher set; nothing here is process-global.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Word lists read by [`load_default_dictionaries`], one `<name>.txt` file
/// per list, most common word first.
pub const DEFAULT_DICTIONARY_NAMES: [&str; 6] = [
    "passwords",
    "english",
    "male_names",
    "female_names",
    "surnames",
    "us_tv_and_film",
];

/// Name of the per-call list synthesized from caller-supplied terms.
pub const USER_INPUTS_DICTIONARY: &str = "user_inputs";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Word list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read word list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Word list file is empty")]
    EmptyFile,
    #[error("Duplicate word {word:?} in list {name:?}")]
    DuplicateWord { name: String, word: String },
    #[error("Rank {rank} for word {word:?} in list {name:?} is not positive")]
    InvalidRank {
        name: String,
        word: String,
        rank: usize,
    },
    #[error("Duplicate rank {rank} in list {name:?}")]
    DuplicateRank { name: String, rank: usize },
}

/// A named frequency-ordered word list.
#[derive(Debug, Clone)]
pub struct RankedDictionary {
    name: String,
    words: HashMap<String, usize>,
}

impl RankedDictionary {
    /// Builds a dictionary from words in frequency order; rank is the
    /// 1-based position. Duplicate words are rejected, never renumbered.
    pub fn from_ordered_words<I, S>(name: &str, words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (i, word) in words.into_iter().enumerate() {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if map.insert(word.clone(), i + 1).is_some() {
                return Err(DictionaryError::DuplicateWord {
                    name: name.to_string(),
                    word,
                });
            }
        }
        Ok(RankedDictionary {
            name: name.to_string(),
            words: map,
        })
    }

    /// Builds a dictionary from explicit `(word, rank)` pairs. Ranks must
    /// be positive and unique.
    pub fn from_ranked_pairs<I, S>(name: &str, pairs: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        let mut seen_ranks = HashMap::new();
        for (word, rank) in pairs {
            let word = word.as_ref().trim().to_lowercase();
            if rank == 0 {
                return Err(DictionaryError::InvalidRank {
                    name: name.to_string(),
                    word,
                    rank,
                });
            }
            if seen_ranks.insert(rank, ()).is_some() {
                return Err(DictionaryError::DuplicateRank {
                    name: name.to_string(),
                    rank,
                });
            }
            if map.insert(word.clone(), rank).is_some() {
                return Err(DictionaryError::DuplicateWord {
                    name: name.to_string(),
                    word,
                });
            }
        }
        Ok(RankedDictionary {
            name: name.to_string(),
            words: map,
        })
    }

    /// Reads a word list file, one word per line in frequency order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, is
    /// empty, or contains a duplicate word.
    pub fn from_path<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Word list load FAILED: file not found {:?}", path);
            return Err(DictionaryError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Word list load FAILED: empty file {:?}", path);
            return Err(DictionaryError::EmptyFile);
        }

        let dict = Self::from_ordered_words(name, content.lines())?;

        #[cfg(feature = "tracing")]
        tracing::info!("Word list {:?} loaded: {} words from {:?}", name, dict.len(), path);

        Ok(dict)
    }

    /// Synthesizes the per-call `user_inputs` list from caller-supplied
    /// identifying terms; rank is the position in the supplied sequence.
    /// Repeated terms keep their first (lowest) rank.
    pub fn user_inputs(terms: &[String]) -> Self {
        let mut map = HashMap::new();
        for (i, term) in terms.iter().enumerate() {
            let term = term.trim().to_lowercase();
            if term.is_empty() {
                continue;
            }
            map.entry(term).or_insert(i + 1);
        }
        RankedDictionary {
            name: USER_INPUTS_DICTIONARY.to_string(),
            words: map,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frequency rank of `word`, if present. Lookup is case-insensitive;
    /// callers normally pass already-lowercased substrings.
    pub fn rank_of(&self, word: &str) -> Option<usize> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Returns the word list directory.
///
/// Priority:
/// 1. Environment variable `PWD_WORDLIST_DIR`
/// 2. Default path `./assets`
pub fn wordlist_dir() -> PathBuf {
    std::env::var("PWD_WORDLIST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets"))
}

/// Loads the built-in word lists from `<dir>/<name>.txt` for every name in
/// [`DEFAULT_DICTIONARY_NAMES`].
///
/// # Errors
///
/// Returns the first load error; the engine never falls back to a partial
/// dictionary set silently.
pub fn load_default_dictionaries() -> Result<Vec<RankedDictionary>, DictionaryError> {
    let dir = wordlist_dir();
    DEFAULT_DICTIONARY_NAMES
        .iter()
        .map(|name| RankedDictionary::from_path(name, dir.join(format!("{name}.txt"))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn setup_with_tempfile(words: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for word in words {
            writeln!(temp_file, "{}", word).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    fn test_from_ordered_words_ranks_are_positional() {
        let dict =
            RankedDictionary::from_ordered_words("passwords", ["password", "123456", "qwerty"])
                .expect("valid list");
        assert_eq!(dict.rank_of("password"), Some(1));
        assert_eq!(dict.rank_of("qwerty"), Some(3));
        assert_eq!(dict.rank_of("zzzzzz"), None);
    }

    #[test]
    fn test_from_ordered_words_lowercases() {
        let dict = RankedDictionary::from_ordered_words("names", ["Brian", "SMITH"])
            .expect("valid list");
        assert_eq!(dict.rank_of("brian"), Some(1));
        assert_eq!(dict.rank_of("smith"), Some(2));
    }

    #[test]
    fn test_from_ordered_words_rejects_duplicates() {
        let result = RankedDictionary::from_ordered_words("passwords", ["abc", "ABC"]);
        assert!(matches!(
            result,
            Err(DictionaryError::DuplicateWord { .. })
        ));
    }

    #[test]
    fn test_from_ranked_pairs_rejects_zero_rank() {
        let result = RankedDictionary::from_ranked_pairs("custom", [("word", 0usize)]);
        assert!(matches!(result, Err(DictionaryError::InvalidRank { .. })));
    }

    #[test]
    fn test_from_ranked_pairs_rejects_duplicate_rank() {
        let result = RankedDictionary::from_ranked_pairs("custom", [("one", 5usize), ("two", 5)]);
        assert!(matches!(result, Err(DictionaryError::DuplicateRank { .. })));
    }

    #[test]
    fn test_user_inputs_keep_first_rank() {
        let terms = vec![
            "Rosebud".to_string(),
            "1987".to_string(),
            "rosebud".to_string(),
        ];
        let dict = RankedDictionary::user_inputs(&terms);
        assert_eq!(dict.name(), USER_INPUTS_DICTIONARY);
        assert_eq!(dict.rank_of("rosebud"), Some(1));
        assert_eq!(dict.rank_of("1987"), Some(2));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result =
            RankedDictionary::from_path("passwords", "/nonexistent/path/passwords.txt");
        assert!(matches!(result, Err(DictionaryError::FileNotFound(_))));
    }

    #[test]
    fn test_from_path_empty_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "").expect("Failed to write empty content");
        let result = RankedDictionary::from_path("passwords", temp_file.path());
        assert!(matches!(result, Err(DictionaryError::EmptyFile)));
    }

    #[test]
    fn test_from_path_success() {
        let temp_file = setup_with_tempfile(&["password", "123456", "qwerty", "admin"]);
        let dict = RankedDictionary::from_path("passwords", temp_file.path())
            .expect("valid word list file");
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.rank_of("admin"), Some(4));
    }

    #[test]
    #[serial]
    fn test_wordlist_dir_default() {
        remove_env("PWD_WORDLIST_DIR");
        assert_eq!(wordlist_dir(), PathBuf::from("./assets"));
    }

    #[test]
    #[serial]
    fn test_wordlist_dir_from_env() {
        set_env("PWD_WORDLIST_DIR", "/custom/lists");
        assert_eq!(wordlist_dir(), PathBuf::from("/custom/lists"));
        remove_env("PWD_WORDLIST_DIR");
    }

    #[test]
    #[serial]
    fn test_load_default_dictionaries_missing_dir() {
        set_env("PWD_WORDLIST_DIR", "/nonexistent/wordlists");
        let result = load_default_dictionaries();
        assert!(matches!(result, Err(DictionaryError::FileNotFound(_))));
        remove_env("PWD_WORDLIST_DIR");
    }
}
