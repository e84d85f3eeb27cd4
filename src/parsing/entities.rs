//! Person-name detection for label lines.
//!
//! The line classifier only needs a yes/no answer per line, so the
//! capability is the narrow [`PersonNameRecognizer`] trait. Any model can sit
//! behind it; [`GazetteerRecognizer`] is the built-in dictionary recognizer.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;

const BUILTIN_GIVEN_NAMES: &str = include_str!("../../data/given_names.txt");

const HONORIFICS: &[&str] = &["MR", "MRS", "MS", "MISS", "MX", "DR", "PROF"];

/// Words that rule out a personal name: street suffixes, business forms and
/// label furniture
const NON_NAME_WORDS: &[&str] = &[
    "ST", "STREET", "AVE", "AVENUE", "RD", "ROAD", "BLVD", "LN", "LANE", "CT", "COURT", "WAY",
    "PL", "PLACE", "HWY", "PKWY", "CIR", "TER", "SUITE", "STE", "APT", "UNIT", "BOX", "PO",
    "INC", "LLC", "LTD", "CO", "CORP", "COMPANY", "DEPT", "SHIP", "TO", "FROM", "RETURN",
    "TRACKING", "PRIORITY", "MAIL", "GROUND", "EXPRESS", "POSTAGE", "PAID", "USPS", "UPS",
    "FEDEX", "WEIGHT", "LBS", "OZ",
];

/// Decides whether a normalized line names a person.
///
/// Implementations must be safe to share read-only across worker threads.
pub trait PersonNameRecognizer: Send + Sync {
    fn is_person_name(&self, text: &str) -> Result<bool>;
}

lazy_static! {
    static ref SHARED: Arc<GazetteerRecognizer> = Arc::new(GazetteerRecognizer::new());
}

/// Dictionary-based recognizer.
///
/// A line names a person when it has two to four purely alphabetic words,
/// none of them a [`NON_NAME_WORDS`] entry, and it either starts with an
/// honorific or its first word is a known given name.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    given_names: HashSet<String>,
}

impl GazetteerRecognizer {
    pub fn new() -> Self {
        Self {
            given_names: parse_name_list(BUILTIN_GIVEN_NAMES).collect(),
        }
    }

    /// Process-wide default instance, built on first use
    pub fn shared() -> Arc<GazetteerRecognizer> {
        SHARED.clone()
    }

    /// Built-in names plus those listed in `path` (one per line, `#` comments)
    pub fn with_names_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut recognizer = Self::new();
        let before = recognizer.given_names.len();
        recognizer.given_names.extend(parse_name_list(&raw));
        info!(
            path = %path.display(),
            added = recognizer.given_names.len() - before,
            "Loaded extra given names"
        );
        Ok(recognizer)
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.given_names
            .extend(names.into_iter().map(|n| n.as_ref().trim().to_uppercase()));
        self
    }

    pub fn knows(&self, name: &str) -> bool {
        self.given_names.contains(name)
    }

    fn matches(&self, text: &str) -> bool {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_end_matches(['.', ',']))
            .filter(|w| !w.is_empty())
            .collect();

        if !(2..=4).contains(&words.len()) {
            return false;
        }
        if !words.iter().all(|w| w.chars().all(|c| c.is_ascii_alphabetic())) {
            return false;
        }

        let (first, rest) = (words[0], &words[1..]);
        if HONORIFICS.contains(&first) {
            return rest.iter().all(|w| !NON_NAME_WORDS.contains(w));
        }

        self.knows(first) && words.iter().all(|w| !NON_NAME_WORDS.contains(w))
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonNameRecognizer for GazetteerRecognizer {
    fn is_person_name(&self, text: &str) -> Result<bool> {
        let found = self.matches(text);
        debug!(text, found, "person name check");
        Ok(found)
    }
}

fn parse_name_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
}
