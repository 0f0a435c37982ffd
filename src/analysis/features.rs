//! # Feature Extraction
//!
//! Splits text into the overlapping features that feed the SimHash digest.
//!
//! Short texts (a word, a short phrase) are described by character n-grams,
//! longer ones (sentences up to whole books) by shingles of consecutive words.
//! Both variants are lazy iterators: word tokens are borrowed slices of the
//! input and only the current shingle is ever allocated.

use std::collections::VecDeque;
use std::str::CharIndices;

/// Iterator over the fingerprinting features of a text.
pub enum Features<'a> {
    /// Overlapping character n-grams of the cleaned text
    CharNgrams(CharNgrams),
    /// Overlapping shingles of consecutive word tokens
    WordShingles(WordShingles<'a>),
}

impl<'a> Features<'a> {
    /// Pick the feature kind for `text`.
    ///
    /// # Arguments
    /// - `text`: Raw input text
    /// - `short_text_threshold`: Texts with fewer chars than this use n-grams
    /// - `n_gram_size`: Width of the character n-grams
    /// - `word_shingle_size`: Number of words per shingle
    pub fn new(
        text: &'a str,
        short_text_threshold: usize,
        n_gram_size: usize,
        word_shingle_size: usize,
    ) -> Self {
        if text.chars().count() < short_text_threshold {
            Features::CharNgrams(CharNgrams::new(text, n_gram_size))
        } else {
            Features::WordShingles(WordShingles::new(text, word_shingle_size))
        }
    }
}

impl Iterator for Features<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            Features::CharNgrams(inner) => inner.next(),
            Features::WordShingles(inner) => inner.next(),
        }
    }
}

/// Sliding window of `size` chars over the lower-cased, trimmed text.
///
/// A cleaned text shorter than the window is yielded whole, once.
pub struct CharNgrams {
    chars: Vec<char>,
    size: usize,
    pos: usize,
    whole: bool,
}

impl CharNgrams {
    pub fn new(text: &str, size: usize) -> Self {
        let chars: Vec<char> = text.to_lowercase().trim().chars().collect();
        let size = size.max(1);
        let whole = chars.len() < size;
        Self {
            chars,
            size,
            pos: 0,
            whole,
        }
    }
}

impl Iterator for CharNgrams {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.whole {
            if self.pos > 0 {
                return None;
            }
            self.pos = 1;
            return Some(self.chars.iter().collect());
        }

        if self.pos + self.size > self.chars.len() {
            return None;
        }
        let gram = self.chars[self.pos..self.pos + self.size].iter().collect();
        self.pos += 1;
        Some(gram)
    }
}

/// Lazy `\w+` tokenizer yielding borrowed slices of the input.
///
/// A word char is any Unicode alphanumeric or `_`.
pub struct WordTokens<'a> {
    text: &'a str,
    iter: CharIndices<'a>,
}

impl<'a> WordTokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            iter: text.char_indices(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Iterator for WordTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = loop {
            let (idx, c) = self.iter.next()?;
            if is_word_char(c) {
                break idx;
            }
        };

        let mut end = self.text.len();
        for (idx, c) in self.iter.by_ref() {
            if !is_word_char(c) {
                end = idx;
                break;
            }
        }

        Some(&self.text[start..end])
    }
}

/// Overlapping shingles of `size` consecutive lower-cased words, space-joined.
pub struct WordShingles<'a> {
    tokens: WordTokens<'a>,
    window: VecDeque<&'a str>,
    size: usize,
}

impl<'a> WordShingles<'a> {
    pub fn new(text: &'a str, size: usize) -> Self {
        let size = size.max(1);
        Self {
            tokens: WordTokens::new(text),
            window: VecDeque::with_capacity(size),
            size,
        }
    }
}

impl Iterator for WordShingles<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let word = self.tokens.next()?;
            if self.window.len() == self.size {
                self.window.pop_front();
            }
            self.window.push_back(word);

            if self.window.len() == self.size {
                let mut shingle = String::new();
                for (i, w) in self.window.iter().enumerate() {
                    if i > 0 {
                        shingle.push(' ');
                    }
                    shingle.push_str(&w.to_lowercase());
                }
                return Some(shingle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_ngrams_are_lowercased_and_trimmed() {
        let grams: Vec<String> = CharNgrams::new("  HeLLo ", 3).collect();
        assert_eq!(grams, vec!["hel", "ell", "llo"]);
    }

    #[test]
    fn test_short_text_is_single_feature() {
        let grams: Vec<String> = CharNgrams::new("Hi", 3).collect();
        assert_eq!(grams, vec!["hi"]);

        let empty: Vec<String> = CharNgrams::new("", 3).collect();
        assert_eq!(empty, vec![""]);
    }

    #[test]
    fn test_word_tokens_unicode() {
        let tokens: Vec<&str> = WordTokens::new("Привет! Как_дела, 42?").collect();
        assert_eq!(tokens, vec!["Привет", "Как_дела", "42"]);
    }

    #[test]
    fn test_word_shingles_overlap() {
        let shingles: Vec<String> = WordShingles::new("The quick Brown fox", 2).collect();
        assert_eq!(shingles, vec!["the quick", "quick brown", "brown fox"]);
    }

    #[test]
    fn test_single_word_yields_no_shingle() {
        assert_eq!(WordShingles::new("lonely", 2).count(), 0);
    }

    #[test]
    fn test_threshold_selects_feature_kind() {
        assert!(matches!(Features::new("short", 50, 3, 2), Features::CharNgrams(_)));
        let long = "word ".repeat(20);
        assert!(matches!(Features::new(&long, 50, 3, 2), Features::WordShingles(_)));
    }
}
