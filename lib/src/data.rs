use crate::results::WordleError;
use log::debug;
use std::collections::HashSet;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// Contains all the words of a single length that a game may use.
#[derive(Clone, Debug)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    index: HashSet<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case. Words that don't have `word_length` letters, and repeated words, are skipped.
    pub fn from_reader<R: BufRead>(word_reader: R, word_length: usize) -> Result<Self, WordleError> {
        let lines = word_reader.lines().collect::<io::Result<Vec<String>>>()?;
        Ok(WordBank::from_iterator(lines, word_length))
    }

    /// Constructs a new `WordBank` from the given words.
    ///
    /// Each word is trimmed and converted to lower case. Words that don't have `word_length`
    /// letters, and repeated words, are skipped.
    ///
    /// ```
    /// use rs_wordle_filter::WordBank;
    ///
    /// let bank = WordBank::from_iterator(["crane", "CRANE", "cranes", ""], 5);
    ///
    /// assert_eq!(bank.len(), 1);
    /// assert!(bank.contains("crane"));
    /// ```
    pub fn from_iterator<I, S>(words: I, word_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all_words: Vec<Arc<str>> = Vec::new();
        let mut index: HashSet<Arc<str>> = HashSet::new();
        let mut num_skipped = 0;
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if word.chars().count() != word_length {
                num_skipped += 1;
                continue;
            }
            let word: Arc<str> = Arc::from(word.to_ascii_lowercase().as_str());
            if index.insert(Arc::clone(&word)) {
                all_words.push(word);
            }
        }
        debug!(
            "Loaded {} words of length {}, skipped {} of other lengths",
            all_words.len(),
            word_length,
            num_skipped
        );
        WordBank {
            all_words,
            index,
            word_length,
        }
    }

    /// Writes the words in the bank to `writer`, one per line, in the order they were loaded.
    ///
    /// The output can be read back with [`WordBank::from_reader`] to skip filtering a large
    /// dictionary again.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), WordleError> {
        for word in &self.all_words {
            writeln!(writer, "{}", word)?;
        }
        writer.flush()?;
        debug!("Wrote {} words", self.all_words.len());
        Ok(())
    }

    /// Returns the number of words in the bank.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    /// Returns `true` iff the bank has no words.
    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of every word in the bank.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Returns `true` iff the given word is in the bank.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}
