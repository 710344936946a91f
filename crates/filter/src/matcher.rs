use std::fmt;
use std::str::FromStr;

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::FilterError;

/// How a fragment is tested against a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The fragment is a case-insensitive regex searched anywhere in the cell.
    #[default]
    FindFirst,
    /// Any whitespace/comma separated sub-phrase is a substring of the cell.
    FindAny,
    /// Every sub-phrase is a substring of the cell.
    FindAll,
}

impl MatchMode {
    pub fn config_name(self) -> &'static str {
        match self {
            Self::FindFirst => "find_first",
            Self::FindAny => "find_any",
            Self::FindAll => "find_all",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl FromStr for MatchMode {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "find_first" | "first" | "filtertablefind" => Ok(Self::FindFirst),
            "find_any" | "any" | "filtertablefindany" => Ok(Self::FindAny),
            "find_all" | "all" | "filtertablefindall" => Ok(Self::FindAll),
            _ => Err(FilterError::InvalidMatchMode(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone)]
enum Checker {
    Regex(Regex),
    /// Lowercased needle, used when a fragment is not a valid regex.
    Literal(String),
    AnyOf(Vec<String>),
    AllOf(Vec<String>),
    Never,
}

/// A fragment compiled once for a given mode, then tested against many cells.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    checker: Checker,
}

impl TermMatcher {
    pub fn new(fragment: &str, mode: MatchMode) -> Self {
        if let Some(regex) = compile_regex_literal(fragment) {
            return Self {
                checker: Checker::Regex(regex),
            };
        }

        let checker = match mode {
            MatchMode::FindFirst => match RegexBuilder::new(fragment).case_insensitive(true).build()
            {
                Ok(regex) => Checker::Regex(regex),
                Err(e) => {
                    debug!("fragment {fragment:?} is not a valid regex, matching literally: {e}");
                    Checker::Literal(fragment.to_lowercase())
                }
            },
            MatchMode::FindAny => match split_phrases(fragment) {
                phrases if phrases.is_empty() => Checker::Never,
                phrases => Checker::AnyOf(phrases),
            },
            MatchMode::FindAll => match split_phrases(fragment) {
                phrases if phrases.is_empty() => Checker::Never,
                phrases => Checker::AllOf(phrases),
            },
        };

        Self { checker }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.checker {
            Checker::Regex(regex) => regex.is_match(text),
            Checker::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
            Checker::AnyOf(phrases) => {
                let text = text.to_lowercase();
                phrases.iter().any(|phrase| text.contains(phrase.as_str()))
            }
            Checker::AllOf(phrases) => {
                let text = text.to_lowercase();
                phrases.iter().all(|phrase| text.contains(phrase.as_str()))
            }
            Checker::Never => false,
        }
    }
}

/// Tests a single cell's text against a fragment.
pub fn matches(cell_text: &str, fragment: &str, mode: MatchMode) -> bool {
    TermMatcher::new(fragment, mode).is_match(cell_text)
}

/// Splits `/pattern/flags` into its pattern and flags. Returns `None` when
/// the fragment is not shaped like a regex literal.
pub fn split_regex_literal(fragment: &str) -> Option<(&str, &str)> {
    let body = fragment.strip_prefix('/')?;
    let (pattern, flags) = body.rsplit_once('/')?;
    if pattern.is_empty() || !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((pattern, flags))
}

fn compile_regex_literal(fragment: &str) -> Option<Regex> {
    let (pattern, flags) = split_regex_literal(fragment)?;

    let mut builder = RegexBuilder::new(pattern);
    let mut seen = String::with_capacity(flags.len());
    for flag in flags.chars() {
        if seen.contains(flag) {
            debug!("regex literal {fragment:?} repeats flag `{flag}`");
            return None;
        }
        seen.push(flag);

        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'U' => {
                builder.swap_greed(true);
            }
            'u' => {
                builder.unicode(true);
            }
            // Global and sticky only affect iteration, not a yes/no test.
            'g' | 'y' => {}
            _ => {
                debug!("regex literal {fragment:?} has unsupported flag `{flag}`");
                return None;
            }
        }
    }

    match builder.build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("regex literal {fragment:?} failed to compile: {e}");
            None
        }
    }
}

fn split_phrases(fragment: &str) -> Vec<String> {
    fragment
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_is_case_insensitive() {
        assert!(matches("Apple", "A", MatchMode::FindFirst));
        assert!(matches("banana A", "A", MatchMode::FindFirst));
        assert!(matches("APPLE PIE", "apple", MatchMode::FindFirst));
        assert!(!matches("cherry", "apple", MatchMode::FindFirst));
    }

    #[test]
    fn test_find_first_treats_fragment_as_regex() {
        assert!(matches("order 1234", r"\d{4}", MatchMode::FindFirst));
        assert!(matches("grey", "gr[ae]y", MatchMode::FindFirst));
        assert!(!matches("green", "gr[ae]y", MatchMode::FindFirst));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        assert!(matches("See (DRAFT) notes", "(draft", MatchMode::FindFirst));
        assert!(!matches("draft", "(draft", MatchMode::FindFirst));
        assert!(matches("list [abc", "[abc", MatchMode::FindFirst));
    }

    #[test]
    fn test_regex_literal() {
        assert!(matches("Apple", "/^A/i", MatchMode::FindFirst));
        assert!(!matches("banana", "/^A/i", MatchMode::FindFirst));
        assert!(matches("apple", "/^A/i", MatchMode::FindFirst));
        assert!(!matches("apple", "/^A/", MatchMode::FindFirst));
    }

    #[test]
    fn test_regex_literal_applies_in_every_mode() {
        assert!(matches("Apple", "/^A/", MatchMode::FindAll));
        assert!(!matches("an Apple", "/^A/", MatchMode::FindAny));
    }

    #[test]
    fn test_regex_literal_accepts_global_flag() {
        assert!(matches("ABC", "/b/gi", MatchMode::FindFirst));
    }

    #[test]
    fn test_malformed_regex_literal_falls_back() {
        // Unsupported flag: the whole fragment is matched through the mode path.
        assert!(matches("path /a/q here", "/a/q", MatchMode::FindFirst));
        assert!(!matches("a", "/a/q", MatchMode::FindFirst));

        // Unbalanced pattern: matched literally.
        assert!(matches("see /(a/ there", "/(a/", MatchMode::FindFirst));
        assert!(!matches("a", "/(a/", MatchMode::FindFirst));

        // Repeated flag.
        assert!(!matches("a", "/a/ii", MatchMode::FindFirst));
    }

    #[test]
    fn test_split_regex_literal() {
        assert_eq!(split_regex_literal("/^A/i"), Some(("^A", "i")));
        assert_eq!(split_regex_literal("/a/b/"), Some(("a/b", "")));
        assert_eq!(split_regex_literal("//i"), None);
        assert_eq!(split_regex_literal("/"), None);
        assert_eq!(split_regex_literal("abc"), None);
        assert_eq!(split_regex_literal("/a/1"), None);
    }

    #[test]
    fn test_find_all_vs_find_any() {
        assert!(!matches("just x here", "x y", MatchMode::FindAll));
        assert!(matches("just x here", "x y", MatchMode::FindAny));
        assert!(matches("x and Y", "x,y", MatchMode::FindAll));
    }

    #[test]
    fn test_find_any_uses_plain_substrings() {
        assert!(matches("a.b", "a.b", MatchMode::FindAny));
        assert!(!matches("axb", "a.b", MatchMode::FindAny));
    }

    #[test]
    fn test_empty_phrases_never_match() {
        assert!(!matches("anything", " , ", MatchMode::FindAny));
        assert!(!matches("anything", "", MatchMode::FindAll));
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("find_any".parse::<MatchMode>().unwrap(), MatchMode::FindAny);
        assert_eq!(
            "filterTableFindAll".parse::<MatchMode>().unwrap(),
            MatchMode::FindAll
        );
        assert_eq!(" FIRST ".parse::<MatchMode>().unwrap(), MatchMode::FindFirst);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }
}
