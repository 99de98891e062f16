//! Evaluation of a single regex pattern against the corpus.

use std::collections::HashSet;

use regex::RegexBuilder;

use crate::Corpus;

/// Label for matches found directly in the extracted strings.
const DIRECT_LABEL: &str = "direto";

/// How the string containing a match entered the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// The match was found in a directly extracted string.
    Direct,
    /// The match was found in the decode of the given base64 string.
    Base64(String),
}

impl Provenance {
    /// Human-readable provenance label, also used as a sort key by the
    /// processor.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Direct => DIRECT_LABEL.to_owned(),
            Self::Base64(encoded) => format!("base64: {encoded}"),
        }
    }
}

/// A single deduplicated match.
///
/// Identity is the full triple: two matches are the same record only if
/// text, provenance and context are all equal. The same substring found
/// both directly and through a base64 decode yields two distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchRecord {
    /// The matched text, after capture-group resolution.
    pub text: String,
    /// How the containing string entered the corpus.
    pub provenance: Provenance,
    /// The full decoded string for base64-provenance matches, empty
    /// otherwise.
    pub context: String,
}

/// Search one pattern across the whole corpus.
///
/// Matching is always case-insensitive; this is a fixed policy, not an
/// option. Every corpus string is searched for all non-overlapping,
/// leftmost-first occurrences of the pattern, and the results are
/// collected into a set so exact duplicates collapse into one record.
///
/// An invalid pattern is returned as an error and never aborts anything:
/// the caller decides how to surface it and moves on to the next pattern.
///
/// # Errors
///
/// Returns the [`regex::Error`] if the pattern fails to compile.
pub fn search_pattern(
    pattern: &str,
    corpus: &Corpus,
) -> Result<HashSet<MatchRecord>, regex::Error> {
    let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;

    let mut matches = HashSet::new();
    for string in corpus.strings() {
        let provenance = match corpus.provenance(string) {
            Some(encoded) => Provenance::Base64(encoded.to_owned()),
            None => Provenance::Direct,
        };
        let context = match &provenance {
            Provenance::Base64(_) => string.clone(),
            Provenance::Direct => String::new(),
        };

        for caps in regex.captures_iter(string) {
            let text = resolve_match_text(&caps);
            if text.is_empty() {
                // An empty capture is never recorded.
                continue;
            }
            matches.insert(MatchRecord {
                text,
                provenance: provenance.clone(),
                context: context.clone(),
            });
        }
    }

    Ok(matches)
}

/// Resolve which text a capture represents.
///
/// When the pattern has capture groups, the first group is preferred if it
/// participated in the match and is non-empty; otherwise the texts of all
/// groups are concatenated. Without any group, the whole matched span is
/// used.
fn resolve_match_text(caps: &regex::Captures<'_>) -> String {
    if caps.len() > 1 {
        if let Some(first) = caps.get(1) {
            if !first.as_str().is_empty() {
                return first.as_str().to_owned();
            }
        }
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect()
    } else {
        caps[0].to_owned()
    }
}
