//! **strsift** sifts printable strings out of binary files and searches them
//! with regular expressions.
//!
//! The pipeline is built from four pieces: an [`extractor`] that pulls
//! printable strings out of a file, a [`Corpus`] that expands that list by
//! decoding base64-looking strings (keeping a provenance link from each
//! decode back to its encoded form), a [`matcher`] that evaluates a single
//! case-insensitive regex over the whole corpus, and a [`processor`] that
//! walks a named set of patterns and builds a deduplicated, sorted report.
//!
//! ```
//! use strsift::{process_patterns, Corpus, PatternGroup, PatternValue};
//!
//! // Strings as they come out of the extractor. The second one is the
//! // base64 encoding of "http://hidden.example.org/beacon".
//! let corpus = Corpus::expand(vec![
//!     "visit https://example.com".to_owned(),
//!     "aHR0cDovL2hpZGRlbi5leGFtcGxlLm9yZy9iZWFjb24=".to_owned(),
//! ]);
//!
//! let groups = vec![PatternGroup {
//!     name: "urls".to_owned(),
//!     patterns: PatternValue::Single(r"https?://[^\s]+".to_owned()),
//! }];
//!
//! let (reports, summary) = process_patterns(&groups, &corpus, 20);
//! assert_eq!(summary.total_patterns, 1);
//! assert_eq!(summary.total_matches, 2);
//! assert_eq!(reports[0].name, "urls");
//! ```

pub mod corpus;
pub use corpus::Corpus;
pub mod extractor;
pub use extractor::{ExtractError, StringExtractor, StringsTool};
pub mod matcher;
pub use matcher::{search_pattern, MatchRecord, Provenance};
pub mod patterns;
pub use patterns::{load_pattern_file, LoadError, PatternGroup, PatternValue};
pub mod processor;
pub use processor::{process_patterns, Evaluation, GroupReport, PatternMatches, RunSummary};
