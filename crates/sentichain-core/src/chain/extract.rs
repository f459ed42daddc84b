//! Sentiment extraction from free-text model output

use crate::error::{Result, SentiChainError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    // Label may span several words; it ends at the first " (Score: ".
    // Score digits are ASCII only: other numerals are a miss, not a parse error.
    static ref SENTIMENT_RE: Regex =
        Regex::new(r"Sentiment: (.+?) \(Score: ([0-9.]+)\)").unwrap();
}

/// Extracted sentiment. Both fields are absent after an extraction miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(
        rename = "sentiment_label",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,

    #[serde(
        rename = "sentiment_score",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
}

impl SentimentResult {
    /// True when nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.score.is_none()
    }
}

/// Raw captures of the first sentiment line in a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentMatch<'a> {
    pub label: &'a str,
    pub score: &'a str,
}

/// Find the first `Sentiment: <label> (Score: <number>)` in `response`
pub fn find_sentiment(response: &str) -> Option<SentimentMatch<'_>> {
    let caps = SENTIMENT_RE.captures(response)?;
    Some(SentimentMatch {
        label: caps.get(1)?.as_str().trim(),
        score: caps.get(2)?.as_str().trim(),
    })
}

/// Turns model responses into `SentimentResult`s
#[derive(Debug, Clone, Default)]
pub struct SentimentExtractor {
    label_mapping: HashMap<String, String>,
    include_score: bool,
}

impl SentimentExtractor {
    pub fn new(label_mapping: HashMap<String, String>, include_score: bool) -> Self {
        Self {
            label_mapping,
            include_score,
        }
    }

    /// Extract a result from a raw response.
    ///
    /// A response without a sentiment line yields an empty result. A matched
    /// score that is not a number (`1.2.3`) is a parse error.
    pub fn extract(&self, response: &str) -> Result<SentimentResult> {
        let Some(found) = find_sentiment(response) else {
            return Ok(SentimentResult::default());
        };

        let score = found
            .score
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| {
                SentiChainError::Parse(format!("Invalid sentiment score: {:?}", found.score))
            })?;

        let label = self
            .label_mapping
            .get(found.label)
            .cloned()
            .unwrap_or_else(|| found.label.to_string());

        Ok(SentimentResult {
            label: Some(label),
            score: self.include_score.then_some(score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extractor() -> SentimentExtractor {
        SentimentExtractor::new(HashMap::new(), true)
    }

    #[test]
    fn test_extract_basic() {
        let result = extractor()
            .extract("Sentiment: Positive (Score: 0.87)")
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("Positive"));
        assert_eq!(result.score, Some(0.87));
    }

    #[test]
    fn test_extract_multi_word_label() {
        let result = extractor()
            .extract("Overall this reads as\nSentiment: Very Negative (Score: 0.12)\n")
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("Very Negative"));
    }

    #[test]
    fn test_first_match_wins() {
        let result = extractor()
            .extract("Sentiment: Neutral (Score: 0.5) then Sentiment: Positive (Score: 0.9)")
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("Neutral"));
        assert_eq!(result.score, Some(0.5));
    }

    #[test]
    fn test_no_match_is_empty() {
        let result = extractor().extract("I think it is positive.").unwrap();
        assert!(result.is_empty());
        assert_eq!(serde_json::to_string(&result).unwrap(), "{}");
    }

    #[test]
    fn test_malformed_score_is_parse_error() {
        let err = extractor()
            .extract("Sentiment: Positive (Score: 1.2.3)")
            .unwrap_err();
        assert!(matches!(err, SentiChainError::Parse(_)));
    }

    #[test]
    fn test_non_ascii_digits_are_a_miss() {
        for response in [
            "Sentiment: Positive (Score: \u{0660}.\u{0665})",
            "Sentiment: Positive (Score: \u{FF10}.\u{FF18})",
        ] {
            let result = extractor().extract(response).unwrap();
            assert!(result.is_empty(), "{response}");
        }
    }

    #[test]
    fn test_label_mapping_and_passthrough() {
        let mapping = HashMap::from([("Positive".to_string(), "POS".to_string())]);
        let extractor = SentimentExtractor::new(mapping, true);

        let mapped = extractor.extract("Sentiment: Positive (Score: 0.8)").unwrap();
        assert_eq!(mapped.label.as_deref(), Some("POS"));

        let unmapped = extractor.extract("Sentiment: Negative (Score: 0.2)").unwrap();
        assert_eq!(unmapped.label.as_deref(), Some("Negative"));
    }

    #[test]
    fn test_score_omitted_when_disabled() {
        let extractor = SentimentExtractor::new(HashMap::new(), false);
        let result = extractor.extract("Sentiment: Positive (Score: 0.8)").unwrap();
        assert_eq!(result.score, None);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"sentiment_label": "Positive"})
        );
    }

    #[test]
    fn test_integer_score() {
        let result = extractor().extract("Sentiment: Positive (Score: 1)").unwrap();
        assert_eq!(result.score, Some(1.0));
    }

    proptest! {
        #[test]
        fn extract_never_panics(response in "\\PC*") {
            let _ = extractor().extract(&response);
        }

        #[test]
        fn embedded_line_is_found(
            prefix in "[a-z ]{0,40}",
            label in "[A-Za-z]{1,12}( [A-Za-z]{1,12})?",
            score in 0.0f64..1.0,
        ) {
            let response = format!("{}\nSentiment: {} (Score: {})", prefix, label, score);
            let result = extractor().extract(&response).unwrap();
            prop_assert_eq!(result.label.as_deref(), Some(label.as_str()));
            prop_assert_eq!(result.score, Some(score));
        }
    }
}
