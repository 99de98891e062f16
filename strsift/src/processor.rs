//! Sequential evaluation of every pattern group against the corpus.

use crate::matcher::{search_pattern, MatchRecord};
use crate::patterns::PatternGroup;
use crate::Corpus;

/// Matches for one pattern, sorted and truncated for rendering.
#[derive(Debug)]
pub struct PatternMatches {
    /// At most `max_results` records, sorted by `(text, provenance
    /// label)` ascending.
    pub records: Vec<MatchRecord>,
    /// Unique matches found, before truncation.
    pub total: usize,
}

impl PatternMatches {
    /// Matches found but not rendered because of the result cap.
    #[must_use]
    pub fn suppressed(&self) -> usize {
        self.total - self.records.len()
    }
}

/// Outcome of evaluating one regex of a group.
#[derive(Debug)]
pub struct Evaluation {
    /// The regex as written in the pattern file.
    pub pattern: String,
    /// The matches, or the compilation error message.
    pub result: Result<PatternMatches, String>,
}

/// Report for one named pattern group.
#[derive(Debug)]
pub struct GroupReport {
    /// The group name from the pattern file.
    pub name: String,
    /// Whether the group was declared as a list.
    pub is_list: bool,
    /// One evaluation per regex, in list order.
    pub evaluations: Vec<Evaluation>,
}

/// Counters accumulated over a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Patterns evaluated. Each element of a list counts individually; a
    /// scalar pattern counts as one.
    pub total_patterns: usize,
    /// Unique matches accumulated across all patterns. Truncation does
    /// not affect this counter.
    pub total_matches: usize,
}

/// Evaluate every group in order and build the run report.
///
/// Groups are processed in file order and list elements in list order,
/// strictly sequentially. A pattern that fails to compile contributes an
/// error evaluation and zero matches; it still counts as a processed
/// pattern and never aborts the run.
#[must_use]
pub fn process_patterns(
    groups: &[PatternGroup],
    corpus: &Corpus,
    max_results: usize,
) -> (Vec<GroupReport>, RunSummary) {
    let mut summary = RunSummary::default();
    let mut reports = Vec::with_capacity(groups.len());

    for group in groups {
        let mut evaluations = Vec::with_capacity(group.patterns.patterns().len());

        for pattern in group.patterns.patterns() {
            let result = match search_pattern(pattern, corpus) {
                Ok(matches) => {
                    let total = matches.len();
                    summary.total_matches += total;

                    let mut records: Vec<MatchRecord> = matches.into_iter().collect();
                    // The context tie-break is not part of the contract,
                    // it only pins down the order of otherwise-equal
                    // entries.
                    records.sort_by_key(|r| {
                        (r.text.clone(), r.provenance.label(), r.context.clone())
                    });
                    records.truncate(max_results);

                    Ok(PatternMatches { records, total })
                }
                Err(err) => Err(err.to_string()),
            };

            summary.total_patterns += 1;
            evaluations.push(Evaluation {
                pattern: pattern.clone(),
                result,
            });
        }

        reports.push(GroupReport {
            name: group.name.clone(),
            is_list: group.patterns.is_list(),
            evaluations,
        });
    }

    (reports, summary)
}

#[cfg(test)]
mod tests {
    use crate::matcher::Provenance;
    use crate::patterns::PatternValue;

    use super::*;

    fn corpus_of(strings: &[&str]) -> Corpus {
        Corpus::expand(strings.iter().map(|s| (*s).to_owned()).collect())
    }

    fn single(name: &str, pattern: &str) -> PatternGroup {
        PatternGroup {
            name: name.to_owned(),
            patterns: PatternValue::Single(pattern.to_owned()),
        }
    }

    #[test]
    fn test_scalar_pattern_scenario() {
        let corpus = corpus_of(&["visit https://example.com now", "http://test.org"]);
        let groups = vec![single("urls", r"https?://[^\s]+")];

        let (reports, summary) = process_patterns(&groups, &corpus, 20);

        assert_eq!(summary.total_patterns, 1);
        assert_eq!(summary.total_matches, 2);
        let matches = reports[0].evaluations[0].result.as_ref().unwrap();
        assert_eq!(matches.total, 2);
        assert_eq!(matches.suppressed(), 0);
    }

    #[test]
    fn test_list_pattern_counts_each_element() {
        let corpus = corpus_of(&["token=abc123"]);
        let groups = vec![PatternGroup {
            name: "tokens".to_owned(),
            patterns: PatternValue::Many(vec![
                r"token=(\w+)".to_owned(),
                r"key=(\w+)".to_owned(),
            ]),
        }];

        let (reports, summary) = process_patterns(&groups, &corpus, 20);

        assert_eq!(summary.total_patterns, 2);
        assert_eq!(summary.total_matches, 1);
        assert!(reports[0].is_list);
        assert_eq!(reports[0].evaluations.len(), 2);
    }

    #[test]
    fn test_truncation_accounting() {
        let corpus = corpus_of(&["id=a1 id=b2 id=c3 id=d4 id=e5"]);
        let groups = vec![single("ids", r"id=(\w\d)")];

        let (reports, summary) = process_patterns(&groups, &corpus, 2);

        let matches = reports[0].evaluations[0].result.as_ref().unwrap();
        assert_eq!(matches.records.len(), 2);
        assert_eq!(matches.suppressed(), 3);
        assert_eq!(matches.total, 5);
        // The counter reflects unique matches found, not rendered count.
        assert_eq!(summary.total_matches, 5);
    }

    #[test]
    fn test_sorted_by_text_then_label() {
        // "dG9rZW49YWJjMTIz" is the base64 encoding of "token=abc123", so
        // the same match text exists with two different provenances.
        let corpus = corpus_of(&["token=abc123", "dG9rZW49YWJjMTIz", "token=aaa111"]);
        let groups = vec![single("tokens", r"token=(\w+)")];

        let (reports, _) = process_patterns(&groups, &corpus, 20);

        let records = &reports[0].evaluations[0].result.as_ref().unwrap().records;
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "aaa111");
        // "base64: ..." sorts before "direto" for the tied text.
        assert_eq!(records[1].text, "abc123");
        assert_eq!(
            records[1].provenance,
            Provenance::Base64("dG9rZW49YWJjMTIz".to_owned())
        );
        assert_eq!(records[2].text, "abc123");
        assert_eq!(records[2].provenance, Provenance::Direct);
    }

    #[test]
    fn test_invalid_regex_is_recoverable() {
        let corpus = corpus_of(&["hello world"]);
        let groups = vec![single("bad", "(unclosed"), single("greet", "hello")];

        let (reports, summary) = process_patterns(&groups, &corpus, 20);

        assert!(reports[0].evaluations[0].result.is_err());
        // The broken pattern still counts as processed, and the following
        // pattern evaluates normally.
        assert_eq!(summary.total_patterns, 2);
        assert_eq!(summary.total_matches, 1);
        let matches = reports[1].evaluations[0].result.as_ref().unwrap();
        assert_eq!(matches.total, 1);
    }

    #[test]
    fn test_empty_groups() {
        let corpus = corpus_of(&["anything"]);
        let (reports, summary) = process_patterns(&[], &corpus, 20);
        assert!(reports.is_empty());
        assert_eq!(summary, RunSummary::default());
    }
}
