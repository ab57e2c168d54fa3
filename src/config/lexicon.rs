//! Term lexicons and the matching strategies applied to them.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How a lexicon term is located inside a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Substring search. Catches inflections ("defaulted") at the price of
    /// hits inside unrelated words.
    #[default]
    Substring,
    /// Match on whole word tokens. Multi-word terms must appear as a
    /// contiguous token run ("san francisco").
    Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub terms: Vec<String>,
    #[serde(default)]
    pub mode: MatchMode,
    /// Both modes fold case unless this is set.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Lexicon {
    pub fn new(terms: &[&str], mode: MatchMode) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            mode,
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        }
    }

    /// Return the first term (in lexicon order) found in `text`.
    pub fn find(&self, text: &str) -> Option<&str> {
        match self.mode {
            MatchMode::Substring => {
                let haystack = self.fold(text);
                self.terms
                    .iter()
                    .find(|term| !term.is_empty() && haystack.contains(&*self.fold(term)))
                    .map(String::as_str)
            }
            MatchMode::Token => {
                let haystack = tokenize(&self.fold(text));
                self.terms
                    .iter()
                    .find(|term| contains_run(&haystack, &tokenize(&self.fold(term))))
                    .map(String::as_str)
            }
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

/// Alphanumeric word tokens, case preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}
