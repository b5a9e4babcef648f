//! Line matching strategies.
//!
//! A strategy looks at one line of source text and decides whether it
//! declares an enum member. Matching is stateless across lines: a line that
//! only partially fits a pattern yields `None`, never a partial record.
//!
//! Built-in strategies, from least to most information extracted:
//!
//! | Strategy | Matches | `comment` |
//! |----------|---------|-----------|
//! | [`by_name_only`] | `FOO`, `FOO,`, `FOO;` | - |
//! | [`by_name_with_args`] | `FOO(anything)` | - |
//! | [`by_name_with_quoted_comment`] | `FOO("text", ...)` | `text` |
//! | [`by_name_value_quoted_comment`] | `FOO(1, "text")` | `text` |
//! | [`by_name_quoted_comment_value`] | `FOO("text", 1)` | `text` |
//!
//! Every built-in sets `value` to the member name.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A quoted string, double or single. The closing quote must match the
/// opening one and a backslash-escaped quote does not terminate it.
macro_rules! quoted {
    () => {
        r#"(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#
    };
}

/// A quoted string as a single opaque token, without capture groups.
macro_rules! quoted_token {
    () => {
        r#"(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#
    };
}

static RE_NAME_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Z_][A-Z0-9_]*)\s*[;,]?\s*$").unwrap());

static RE_NAME_WITH_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Z_][A-Z0-9_]*)\s*\([^)]*\)").unwrap());

static RE_NAME_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(r"^\s*([A-Z_][A-Z0-9_]*)\s*\(\s*", quoted!())).unwrap()
});

static RE_NAME_VALUE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*([A-Z_][A-Z0-9_]*)\s*\(\s*",
        r#"((?:[^"'\s]|"#,
        quoted_token!(),
        r#")(?:[^"']|"#,
        quoted_token!(),
        r")*?)\s*,\s*",
        quoted!()
    ))
    .unwrap()
});

// The value may hold quoted tokens and one level of balanced parentheses.
static RE_NAME_QUOTED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*([A-Z_][A-Z0-9_]*)\s*\(\s*",
        quoted!(),
        r#"\s*,\s*((?:[^,()"'\s]|\([^()]*\)|"#,
        quoted_token!(),
        r#")(?:[^,()"']|\([^()]*\)|"#,
        quoted_token!(),
        r")*?)\s*[,)]"
    ))
    .unwrap()
});

/// One enum member extracted from a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub name: String,
    pub value: String,
    pub comment: Option<String>,
    /// Auxiliary captured text (raw argument expression) a description
    /// extractor can decompose further.
    pub extra: Option<String>,
}

impl MatchResult {
    /// A record whose value is its own name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        MatchResult {
            value: name.clone(),
            name,
            comment: None,
            extra: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }
}

/// A strategy mapping one line to an optional member record.
///
/// Implemented for every `Fn(&str) -> Option<MatchResult>`, so built-in
/// functions and caller closures can be used interchangeably.
pub trait LineMatcher {
    fn match_line(&self, line: &str) -> Option<MatchResult>;
}

impl<F> LineMatcher for F
where
    F: Fn(&str) -> Option<MatchResult>,
{
    fn match_line(&self, line: &str) -> Option<MatchResult> {
        self(line)
    }
}

/// Secondary extraction applied to [`MatchResult::extra`] to derive a
/// description.
pub trait DescriptionExtractor {
    fn extract(&self, text: &str) -> Option<String>;
}

impl<F> DescriptionExtractor for F
where
    F: Fn(&str) -> Option<String>,
{
    fn extract(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Whichever of the two quoted-string groups participated.
fn quoted_text(caps: &Captures, first_group: usize) -> Option<String> {
    caps.get(first_group)
        .or_else(|| caps.get(first_group + 1))
        .map(|m| m.as_str().to_string())
}

/// Bare identifier: `FOO`, optionally followed by `,` or `;`.
pub fn by_name_only(line: &str) -> Option<MatchResult> {
    let caps = RE_NAME_ONLY.captures(line)?;
    Some(MatchResult::named(&caps[1]))
}

/// `FOO(...)`, arguments ignored.
pub fn by_name_with_args(line: &str) -> Option<MatchResult> {
    let caps = RE_NAME_WITH_ARGS.captures(line)?;
    Some(MatchResult::named(&caps[1]))
}

/// `FOO("comment", ...)` or `FOO('comment', ...)`.
pub fn by_name_with_quoted_comment(line: &str) -> Option<MatchResult> {
    let caps = RE_NAME_QUOTED.captures(line)?;
    let comment = quoted_text(&caps, 2)?;
    Some(MatchResult::named(&caps[1]).with_comment(comment))
}

/// `FOO(<value>, "comment", ...)`. The raw value expression lands in
/// `extra`.
pub fn by_name_value_quoted_comment(line: &str) -> Option<MatchResult> {
    let caps = RE_NAME_VALUE_QUOTED.captures(line)?;
    let comment = quoted_text(&caps, 3)?;
    Some(
        MatchResult::named(&caps[1])
            .with_comment(comment)
            .with_extra(&caps[2]),
    )
}

/// `FOO("comment", <value>, ...)`. The raw value expression lands in
/// `extra`.
pub fn by_name_quoted_comment_value(line: &str) -> Option<MatchResult> {
    let caps = RE_NAME_QUOTED_VALUE.captures(line)?;
    let comment = quoted_text(&caps, 2)?;
    Some(
        MatchResult::named(&caps[1])
            .with_comment(comment)
            .with_extra(&caps[4]),
    )
}

/// Named handle for the built-in strategies, used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    NameOnly,
    NameWithArgs,
    NameWithQuotedComment,
    NameValueQuotedComment,
    NameQuotedCommentValue,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::NameOnly,
        Builtin::NameWithArgs,
        Builtin::NameWithQuotedComment,
        Builtin::NameValueQuotedComment,
        Builtin::NameQuotedCommentValue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Builtin::NameOnly => "name-only",
            Builtin::NameWithArgs => "name-with-args",
            Builtin::NameWithQuotedComment => "name-with-quoted-comment",
            Builtin::NameValueQuotedComment => "name-value-quoted-comment",
            Builtin::NameQuotedCommentValue => "name-quoted-comment-value",
        }
    }

    pub fn function(self) -> fn(&str) -> Option<MatchResult> {
        match self {
            Builtin::NameOnly => by_name_only,
            Builtin::NameWithArgs => by_name_with_args,
            Builtin::NameWithQuotedComment => by_name_with_quoted_comment,
            Builtin::NameValueQuotedComment => by_name_value_quoted_comment,
            Builtin::NameQuotedCommentValue => by_name_quoted_comment_value,
        }
    }
}

impl LineMatcher for Builtin {
    fn match_line(&self, line: &str) -> Option<MatchResult> {
        (self.function())(line)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Builtin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Builtin::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Builtin::ALL.iter().map(|b| b.as_str()).collect();
                Error::MisconfiguredJob(format!(
                    "unknown matcher: {}. Use one of {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Strategy driven by a caller-supplied regex.
///
/// Named groups: `name` (required), `value` (defaults to the name),
/// `comment` and `extra`. An empty `name` capture is not a match.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if !regex.capture_names().any(|n| n == Some("name")) {
            return Err(Error::MisconfiguredJob(format!(
                "pattern `{}` has no (?P<name>...) group",
                pattern
            )));
        }
        Ok(PatternMatcher { regex })
    }
}

impl LineMatcher for PatternMatcher {
    fn match_line(&self, line: &str) -> Option<MatchResult> {
        let caps = self.regex.captures(line)?;
        let name = caps.name("name").map(|m| m.as_str()).filter(|n| !n.is_empty())?;
        let mut record = MatchResult::named(name);
        if let Some(value) = caps.name("value") {
            record.value = value.as_str().to_string();
        }
        record.comment = caps.name("comment").map(|m| m.as_str().to_string());
        record.extra = caps.name("extra").map(|m| m.as_str().to_string());
        Some(record)
    }
}

/// Satellite pattern decomposing an auxiliary capture into a description.
///
/// Yields the first capture group, or the whole match when the pattern has
/// no groups.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    regex: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(PatternExtractor { regex })
    }
}

impl DescriptionExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only_matches_identifier() {
        assert_eq!(by_name_only("FOO"), Some(MatchResult::named("FOO")));
        assert_eq!(by_name_only("    BAR_2,"), Some(MatchResult::named("BAR_2")));
        assert_eq!(by_name_only("BAZ;"), Some(MatchResult::named("BAZ")));
    }

    #[test]
    fn name_only_rejects_lowercase() {
        assert_eq!(by_name_only("foo"), None);
        assert_eq!(by_name_only("Foo"), None);
    }

    #[test]
    fn name_only_rejects_declarations() {
        assert_eq!(by_name_only("public enum Color {"), None);
        assert_eq!(by_name_only("FOO(1),"), None);
    }

    #[test]
    fn name_with_args_ignores_arguments() {
        let r = by_name_with_args("    RED(255, 0, 0),").unwrap();
        assert_eq!(r, MatchResult::named("RED"));
        assert_eq!(by_name_with_args("RED"), None);
        assert_eq!(by_name_with_args("RED(255"), None);
    }

    #[test]
    fn quoted_comment_double_and_single() {
        assert_eq!(
            by_name_with_quoted_comment(r#"FOO("bar")"#),
            Some(MatchResult::named("FOO").with_comment("bar"))
        );
        assert_eq!(
            by_name_with_quoted_comment("FOO('bar', 3),"),
            Some(MatchResult::named("FOO").with_comment("bar"))
        );
    }

    #[test]
    fn quoted_comment_keeps_escaped_quote() {
        let r = by_name_with_quoted_comment(r#"FOO("ba\"r")"#).unwrap();
        assert_eq!(r.comment.as_deref(), Some(r#"ba\"r"#));
    }

    #[test]
    fn quoted_comment_requires_matching_close() {
        assert_eq!(by_name_with_quoted_comment(r#"FOO("bar')"#), None);
        assert_eq!(by_name_with_quoted_comment(r#"FOO("bar\")"#), None);
        // The other quote kind is ordinary text inside the string.
        let r = by_name_with_quoted_comment(r#"FOO("it's")"#).unwrap();
        assert_eq!(r.comment.as_deref(), Some("it's"));
    }

    #[test]
    fn quoted_comment_rejects_unquoted_args() {
        assert_eq!(by_name_with_quoted_comment("FOO(1)"), None);
    }

    #[test]
    fn value_then_comment() {
        let r = by_name_value_quoted_comment(r#"FOO(1, "bar")"#).unwrap();
        assert_eq!(r.name, "FOO");
        assert_eq!(r.value, "FOO");
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(r.extra.as_deref(), Some("1"));
    }

    #[test]
    fn value_then_comment_with_compound_value() {
        let r = by_name_value_quoted_comment(r#"  FOO(Type.A, 2, "bar", true),"#).unwrap();
        assert_eq!(r.extra.as_deref(), Some("Type.A, 2"));
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(by_name_value_quoted_comment(r#"FOO("bar")"#), None);
    }

    #[test]
    fn value_then_comment_with_quoted_value() {
        let r = by_name_value_quoted_comment(r#"FOO('x', "bar"),"#).unwrap();
        assert_eq!(r.name, "FOO");
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(r.extra.as_deref(), Some("'x'"));

        let r = by_name_value_quoted_comment(r#"FOO("x", "bar"),"#).unwrap();
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(r.extra.as_deref(), Some(r#""x""#));

        let r = by_name_value_quoted_comment(r#"    FOO(Code.of("c, d"), "bar"),"#).unwrap();
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(r.extra.as_deref(), Some(r#"Code.of("c, d")"#));
    }

    #[test]
    fn comment_then_value() {
        let r = by_name_quoted_comment_value(r#"FOO("bar", 42),"#).unwrap();
        assert_eq!(r.name, "FOO");
        assert_eq!(r.value, "FOO");
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(r.extra.as_deref(), Some("42"));
        assert_eq!(by_name_quoted_comment_value(r#"FOO("bar")"#), None);
    }

    #[test]
    fn comment_then_value_keeps_call_arguments() {
        let r = by_name_quoted_comment_value(r#"FOO("bar", of(1), 2),"#).unwrap();
        assert_eq!(r.comment.as_deref(), Some("bar"));
        assert_eq!(r.extra.as_deref(), Some("of(1)"));

        let r = by_name_quoted_comment_value(r#"FOO("bar", Code.of("a, b"))"#).unwrap();
        assert_eq!(r.extra.as_deref(), Some(r#"Code.of("a, b")"#));
    }

    #[test]
    fn builtin_names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(builtin.as_str().parse::<Builtin>().unwrap(), builtin);
        }
        assert!(matches!(
            "by-magic".parse::<Builtin>(),
            Err(Error::MisconfiguredJob(_))
        ));
    }

    #[test]
    fn closures_are_matchers() {
        let upper = |line: &str| Some(MatchResult::named(line.trim().to_uppercase()));
        assert_eq!(upper.match_line(" a "), Some(MatchResult::named("A")));
        assert_eq!(
            Builtin::NameOnly.match_line("FOO"),
            Some(MatchResult::named("FOO"))
        );
    }

    #[test]
    fn pattern_matcher_named_groups() {
        let m = PatternMatcher::new(
            r#"^\s*(?P<name>[A-Z_]+)\((?P<value>\d+),\s*(?P<extra>.*)\)"#,
        )
        .unwrap();
        let r = m.match_line(r#"  OPEN(1, Label.of("Open", "o")),"#).unwrap();
        assert_eq!(r.name, "OPEN");
        assert_eq!(r.value, "1");
        assert_eq!(r.comment, None);
        assert_eq!(r.extra.as_deref(), Some(r#"Label.of("Open", "o")"#));
        assert_eq!(m.match_line("open(1, x)"), None);
    }

    #[test]
    fn pattern_matcher_requires_name_group() {
        assert!(matches!(
            PatternMatcher::new(r"^([A-Z]+)$"),
            Err(Error::MisconfiguredJob(_))
        ));
        assert!(matches!(
            PatternMatcher::new(r"^(?P<name>[A-Z]+"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn pattern_extractor_first_group() {
        let e = PatternExtractor::new(r#"Label\.of\("([^"]*)""#).unwrap();
        assert_eq!(e.extract(r#"Label.of("Open", "o")"#).as_deref(), Some("Open"));
        assert_eq!(e.extract("nothing"), None);

        let whole = PatternExtractor::new(r"\d+").unwrap();
        assert_eq!(whole.extract("abc 42").as_deref(), Some("42"));
    }
}
