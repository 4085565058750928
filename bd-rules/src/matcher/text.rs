use super::{MatchResult, MatcherType};
use crate::error::{RulesError, RulesResult};
use bd_model::TextMatchMode;
use regex::Regex;

/// Which text a matcher applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextMatchType {
    /// Both player names and chat messages.
    Any,
    Name,
    Message,
}

impl TextMatchType {
    /// Returns true if a matcher of this type should see text of `kind`.
    pub fn applies_to(self, kind: TextMatchType) -> bool {
        self == TextMatchType::Any || self == kind
    }
}

/// A text matcher: literal patterns or regular expressions.
#[derive(Debug, Clone)]
pub enum TextMatcher {
    General(GeneralTextMatcher),
    Regex(RegexTextMatcher),
}

impl TextMatcher {
    pub fn match_type(&self) -> TextMatchType {
        match self {
            Self::General(m) => m.match_type,
            Self::Regex(m) => m.match_type,
        }
    }

    pub fn matches(&self, text: &str) -> Option<MatchResult> {
        match self {
            Self::General(m) => m.matches(text),
            Self::Regex(m) => m.matches(text),
        }
    }
}

impl From<GeneralTextMatcher> for TextMatcher {
    fn from(matcher: GeneralTextMatcher) -> Self {
        Self::General(matcher)
    }
}

impl From<RegexTextMatcher> for TextMatcher {
    fn from(matcher: RegexTextMatcher) -> Self {
        Self::Regex(matcher)
    }
}

/// Matches text against literal patterns.
///
/// Case-insensitive matchers fold patterns at construction and the input at
/// match time. [`TextMatchMode::Regex`] is accepted but never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralTextMatcher {
    origin: String,
    match_type: TextMatchType,
    mode: TextMatchMode,
    case_sensitive: bool,
    attributes: Vec<String>,
    patterns: Vec<String>,
}

impl GeneralTextMatcher {
    pub fn new(
        origin: impl Into<String>,
        match_type: TextMatchType,
        mode: TextMatchMode,
        case_sensitive: bool,
        attributes: Vec<String>,
        patterns: Vec<String>,
    ) -> Self {
        let patterns = if case_sensitive {
            patterns
        } else {
            patterns.iter().map(|p| p.to_lowercase()).collect()
        };
        Self {
            origin: origin.into(),
            match_type,
            mode,
            case_sensitive,
            attributes,
            patterns,
        }
    }

    pub fn mode(&self) -> TextMatchMode {
        self.mode
    }

    pub fn matches(&self, text: &str) -> Option<MatchResult> {
        let folded;
        let input = if self.case_sensitive {
            text
        } else {
            folded = text.to_lowercase();
            folded.as_str()
        };

        let patterns = &self.patterns;
        let hit = match self.mode {
            TextMatchMode::Contains => patterns.iter().any(|p| input.contains(p.as_str())),
            TextMatchMode::StartsWith => patterns.iter().any(|p| input.starts_with(p.as_str())),
            TextMatchMode::EndsWith => patterns.iter().any(|p| input.ends_with(p.as_str())),
            TextMatchMode::Equal => patterns.iter().any(|p| input == p),
            TextMatchMode::Word => input
                .split(' ')
                .any(|word| patterns.iter().any(|p| word == p)),
            TextMatchMode::Regex => false,
        };

        hit.then(|| MatchResult::new(&self.origin, self.attributes.clone(), MatcherType::Text))
    }
}

/// Matches text against compiled regular expressions, anywhere in the input.
#[derive(Debug, Clone)]
pub struct RegexTextMatcher {
    origin: String,
    match_type: TextMatchType,
    attributes: Vec<String>,
    patterns: Vec<Regex>,
}

impl RegexTextMatcher {
    /// Compiles every pattern, failing on the first one that does not.
    pub fn new(
        origin: impl Into<String>,
        match_type: TextMatchType,
        attributes: Vec<String>,
        patterns: &[String],
    ) -> RulesResult<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| RulesError::InvalidRegex {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<RulesResult<Vec<_>>>()?;

        Ok(Self {
            origin: origin.into(),
            match_type,
            attributes,
            patterns,
        })
    }

    pub fn matches(&self, text: &str) -> Option<MatchResult> {
        self.patterns
            .iter()
            .any(|re| re.is_match(text))
            .then(|| MatchResult::new(&self.origin, self.attributes.clone(), MatcherType::Regex))
    }
}
