use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::Path;

// The game core only needs membership; whoever owns the word data is behind
// this seam.
pub trait Dictionary {
    // Case-insensitive membership test.
    fn contains(&self, word: &str) -> bool;
}

pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    // One word per line; blank lines are skipped, case is normalized away.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_ascii_lowercase());
            }
        }
        Ok(Self { words })
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|word| word.to_ascii_lowercase())
                .collect(),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.words.len()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_lowercase())
    }
}
