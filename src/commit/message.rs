//! Parsing generated commit messages and checking them against the requested format.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Longest title the prompt asks for.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Verbs the prompt forbids because they say nothing concrete.
const VAGUE_VERBS: &[&str] = &["enhance", "improve", "streamline"];

// type(scope)!: title
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*(.+)$").expect("header regex is valid")
});

/// Commit types the prompt allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "test" => Ok(Self::Test),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type(scope): title` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHeader {
    /// Type as written, even when not one of [`CommitType`].
    pub raw_type: String,
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub breaking: bool,
    pub title: String,
}

/// A commit message split into header and bullet body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub header_line: String,
    pub header: Option<CommitHeader>,
    /// Body lines starting with `-` or `*`, marker stripped.
    pub bullets: Vec<String>,
}

/// A way a generated message departs from the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatIssue {
    MissingHeader,
    UnknownType(String),
    TitleTooLong(usize),
    VagueVerb(&'static str),
    NoBullets,
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatIssue::MissingHeader => write!(f, "first line is not `type(scope): title`"),
            FormatIssue::UnknownType(t) => write!(f, "unknown commit type '{t}'"),
            FormatIssue::TitleTooLong(len) => {
                write!(f, "title is {len} characters (max {MAX_TITLE_LENGTH})")
            }
            FormatIssue::VagueVerb(verb) => write!(f, "uses vague verb '{verb}'"),
            FormatIssue::NoBullets => write!(f, "body has no bullet points"),
        }
    }
}

impl CommitMessage {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let mut lines = text.lines();
        let header_line = lines.next().unwrap_or("").trim().to_string();

        let header = HEADER_RE.captures(&header_line).map(|caps| {
            let raw_type = caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string();
            CommitHeader {
                commit_type: raw_type.parse().ok(),
                raw_type,
                scope: caps.get(2).map(|m| m.as_str().to_string()),
                breaking: caps.get(3).is_some(),
                title: caps.get(4).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            }
        });

        let bullets = lines
            .map(str::trim)
            .filter_map(|line| line.strip_prefix('-').or_else(|| line.strip_prefix('*')))
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();

        Self {
            header_line,
            header,
            bullets,
        }
    }

    /// Everything about this message that breaks the requested format.
    pub fn format_issues(&self) -> Vec<FormatIssue> {
        let mut issues = Vec::new();

        match &self.header {
            None => issues.push(FormatIssue::MissingHeader),
            Some(header) => {
                if header.commit_type.is_none() {
                    issues.push(FormatIssue::UnknownType(header.raw_type.clone()));
                }
                let len = header.title.chars().count();
                if len > MAX_TITLE_LENGTH {
                    issues.push(FormatIssue::TitleTooLong(len));
                }
            }
        }

        let words: Vec<String> = std::iter::once(self.header_line.as_str())
            .chain(self.bullets.iter().map(String::as_str))
            .flat_map(str::split_whitespace)
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .collect();
        for verb in VAGUE_VERBS {
            if words.iter().any(|w| w.starts_with(verb)) {
                issues.push(FormatIssue::VagueVerb(verb));
            }
        }

        if self.bullets.is_empty() {
            issues.push(FormatIssue::NoBullets);
        }

        issues
    }
}
