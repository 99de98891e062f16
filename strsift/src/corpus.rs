//! Corpus construction, including base64 expansion.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Minimum length for a string to be considered a base64 candidate.
///
/// Short incidental alphanumeric tokens would otherwise pass the textual
/// filters far too often.
const MIN_BASE64_LEN: usize = 16;

/// The full ordered collection of strings available for pattern matching.
///
/// Directly extracted strings come first, in extraction order, followed by
/// every string recovered through base64 decoding. Duplicates coming from
/// the file are kept: deduplication happens at the match level, not here.
#[derive(Debug, Default)]
pub struct Corpus {
    strings: Vec<String>,
    /// Decoded string -> encoded string it came from. If two encoded
    /// strings decode to the same plaintext, the last one seen wins.
    decoded_from: HashMap<String, String>,
    direct_len: usize,
}

impl Corpus {
    /// Build a corpus from extracted strings, expanding base64 content.
    ///
    /// Every extracted string that passes the candidate filters, decodes
    /// strictly and yields printable text different from its encoded form
    /// is appended to the corpus and recorded in the provenance map.
    /// Strings that merely resemble base64 are skipped silently: they are
    /// common in binaries and not an error condition.
    #[must_use]
    pub fn expand(extracted: Vec<String>) -> Self {
        let mut decoded_from = HashMap::new();
        let mut decoded_strings = Vec::new();

        for s in &extracted {
            if !is_base64_candidate(s) {
                continue;
            }
            let Some(decoded) = decode_base64(s) else {
                continue;
            };
            if decoded == *s {
                // A string that is its own decoding is garbage that
                // happens to self-map, not hidden content.
                continue;
            }
            decoded_from.insert(decoded.clone(), s.clone());
            decoded_strings.push(decoded);
        }

        let direct_len = extracted.len();
        let mut strings = extracted;
        strings.append(&mut decoded_strings);

        Self {
            strings,
            decoded_from,
            direct_len,
        }
    }

    /// All strings, direct first then decoded, in construction order.
    #[must_use]
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Number of strings recovered through base64 decoding.
    #[must_use]
    pub fn decoded_count(&self) -> usize {
        self.strings.len() - self.direct_len
    }

    /// The encoded string `s` was decoded from, if it entered the corpus
    /// through base64 expansion.
    #[must_use]
    pub fn provenance(&self, s: &str) -> Option<&str> {
        self.decoded_from.get(s).map(String::as_str)
    }
}

/// Textual filter for base64 candidates.
///
/// The string must be entirely made of standard-alphabet characters
/// followed by at most two `=` padding characters, be at least
/// [`MIN_BASE64_LEN`] long, and have a length that is a multiple of 4.
/// Survivors still go through a strict decode.
fn is_base64_candidate(s: &str) -> bool {
    if s.len() < MIN_BASE64_LEN || s.len() % 4 != 0 {
        return false;
    }
    let payload = s.trim_end_matches('=');
    if s.len() - payload.len() > 2 || payload.is_empty() {
        return false;
    }
    payload
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Strict decode plus acceptance checks on the decoded text.
///
/// Decoded bytes are interpreted as UTF-8 lossily, so an invalid sequence
/// never rejects the whole string by itself. The decode is accepted only
/// if the text is non-empty and contains at least one printable character.
fn decode_base64(s: &str) -> Option<String> {
    let bytes = STANDARD.decode(s).ok()?;
    let decoded = String::from_utf8_lossy(&bytes).into_owned();
    if decoded.is_empty() || !decoded.chars().any(|c| !c.is_control()) {
        return None;
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_of(strings: &[&str]) -> Corpus {
        Corpus::expand(strings.iter().map(|s| (*s).to_owned()).collect())
    }

    #[test]
    fn test_short_strings_are_never_decoded() {
        // "dGVzdA==" is valid base64 for "test" but is below the length
        // threshold, so the corpus must stay unchanged.
        let corpus = corpus_of(&["dGVzdA==", "short", "QUJD"]);
        assert_eq!(corpus.strings().len(), 3);
        assert_eq!(corpus.decoded_count(), 0);
    }

    #[test]
    fn test_textual_filters() {
        // Wrong alphabet, bad padding, bad length modulo: none of these
        // may expand the corpus.
        let corpus = corpus_of(&[
            "aGVsbG8gd29ybGQh!aaa",  // '!' is not in the alphabet
            "aGVsbG8gd29ybGQh====",  // more than two padding characters
            "aGVsbG8gd29ybGQhYQ",    // length 18, not a multiple of 4
            "================",      // padding only
        ]);
        assert_eq!(corpus.decoded_count(), 0);
    }

    #[test]
    fn test_valid_base64_is_expanded_with_provenance() {
        let encoded = "aGVsbG8gd29ybGQsIHRoaXMgaXMgcGxhaW4=";
        let corpus = corpus_of(&["plain string", encoded]);

        assert_eq!(corpus.decoded_count(), 1);
        assert_eq!(
            corpus.strings(),
            &[
                "plain string".to_owned(),
                encoded.to_owned(),
                "hello world, this is plain".to_owned(),
            ]
        );
        assert_eq!(
            corpus.provenance("hello world, this is plain"),
            Some(encoded)
        );
        assert_eq!(corpus.provenance("plain string"), None);
    }

    #[test]
    fn test_round_trip() {
        let plaintext = "a secret worth hiding in a binary";
        let encoded = STANDARD.encode(plaintext);
        let corpus = Corpus::expand(vec![encoded.clone()]);

        assert!(corpus.strings().iter().any(|s| s == plaintext));
        assert_eq!(corpus.provenance(plaintext), Some(encoded.as_str()));
    }

    #[test]
    fn test_strict_decode_rejects_textual_survivors() {
        // Passes every textual filter (16 chars, multiple of 4, two '='),
        // but the last symbol carries non-zero trailing bits, which the
        // strict decoder refuses.
        let corpus = corpus_of(&["AAAAAAAAAAAAAB=="]);
        assert_eq!(corpus.decoded_count(), 0);
    }

    #[test]
    fn test_non_printable_decode_is_rejected() {
        // 16 control bytes, strictly valid base64.
        let encoded = STANDARD.encode([0x01u8; 16]);
        assert!(encoded.len() >= MIN_BASE64_LEN);
        let corpus = Corpus::expand(vec![encoded]);
        assert_eq!(corpus.decoded_count(), 0);
    }

    #[test]
    fn test_last_write_wins_on_duplicate_plaintext() {
        let plaintext = "duplicated plaintext";
        let encoded = STANDARD.encode(plaintext);
        // The same encoded string twice: both decodes are appended, the
        // provenance map keeps the last-seen source.
        let corpus = Corpus::expand(vec![encoded.clone(), encoded.clone()]);
        assert_eq!(corpus.decoded_count(), 2);
        assert_eq!(corpus.provenance(plaintext), Some(encoded.as_str()));
    }

    #[test]
    fn test_duplicates_from_the_file_are_kept() {
        let corpus = corpus_of(&["same", "same", "same"]);
        assert_eq!(corpus.strings().len(), 3);
    }
}
