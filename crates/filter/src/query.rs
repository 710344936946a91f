use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    /// `+term`: may reveal any row in the grid.
    Include,
    /// `-term`: hides currently visible rows that match.
    Exclude,
    /// Bare `term`: narrows the visible rows to those that match.
    Constrain,
}

impl Sign {
    fn from_prefix(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Include),
            '-' => Some(Self::Exclude),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "+",
            Self::Exclude => "-",
            Self::Constrain => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub sign: Sign,
    pub fragment: String,
}

impl Term {
    pub fn new(sign: Sign, fragment: impl Into<String>) -> Self {
        Self {
            sign,
            fragment: fragment.into(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.as_str(), self.fragment)
    }
}

/// A raw query together with its parsed terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    raw: String,
    terms: Vec<Term>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            terms: parse(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// True when the raw query is empty or shorter than `min_chars`
    /// characters, i.e. no filter should be applied.
    pub fn is_degenerate(&self, min_chars: usize) -> bool {
        self.raw.is_empty() || self.raw.chars().count() < min_chars
    }
}

/// Splits a raw query into ordered signed terms. Never fails.
pub fn parse(raw: &str) -> Vec<Term> {
    let mut terms = Vec::new();
    let pieces = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty());

    for (index, piece) in pieces.enumerate() {
        let mut chars = piece.chars();
        let (sign, fragment) = match chars.next().and_then(Sign::from_prefix) {
            Some(sign) => (sign, chars.as_str()),
            // The first piece defaults to a global include.
            None if index == 0 => (Sign::Include, piece),
            None => (Sign::Constrain, piece),
        };

        if fragment.is_empty() {
            continue;
        }
        terms.push(Term::new(sign, fragment));
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(raw: &str) -> Vec<String> {
        parse(raw).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_first_term_defaults_to_include() {
        assert_eq!(rendered("apple pie"), vec!["+apple", "pie"]);
    }

    #[test]
    fn test_explicit_signs() {
        assert_eq!(rendered("-apple +pie tart"), vec!["-apple", "+pie", "tart"]);
        assert_eq!(
            parse("+a -b c"),
            vec![
                Term::new(Sign::Include, "a"),
                Term::new(Sign::Exclude, "b"),
                Term::new(Sign::Constrain, "c"),
            ]
        );
    }

    #[test]
    fn test_whitespace_and_comma_runs() {
        assert_eq!(rendered("  a,, b \t\n,c  "), vec!["+a", "b", "c"]);
    }

    #[test]
    fn test_only_one_sign_is_stripped() {
        assert_eq!(parse("--x"), vec![Term::new(Sign::Exclude, "-x")]);
        assert_eq!(parse("+-x"), vec![Term::new(Sign::Include, "-x")]);
    }

    #[test]
    fn test_lone_signs_are_dropped() {
        assert_eq!(rendered("+ - apple"), vec!["apple"]);
        assert!(parse("+").is_empty());
        assert!(parse("-").is_empty());
    }

    #[test]
    fn test_empty_query() {
        assert!(parse("").is_empty());
        assert!(parse(" , ,").is_empty());
    }

    #[test]
    fn test_regex_literal_survives_as_fragment() {
        assert_eq!(rendered("/^A/i -/b$/"), vec!["+/^A/i", "-/b$/"]);
    }

    #[test]
    fn test_degenerate_query() {
        assert!(Query::new("").is_degenerate(0));
        assert!(Query::new("ab").is_degenerate(3));
        assert!(!Query::new("abc").is_degenerate(3));
        // Characters, not bytes.
        assert!(Query::new("éé").is_degenerate(3));
    }
}
