//! Locality phrase extraction for query augmentation.
//!
//! Addresses arrive as delimited strings ordered from finest to coarsest locality
//! (`"풍덕천동, 수지구, 용인시, 경기도"`). The extractor picks the first
//! district-level and the first neighborhood-level segment and joins them,
//! district first, into a short phrase that biases the free-text query toward
//! the user's area.
//!
//! Which trailing characters mark a district or a neighborhood is locale data,
//! so it lives in [`RegionVocabulary`] and can be replaced from configuration.

use serde::{Deserialize, Serialize};

/// Suffix vocabulary and delimiters used to recognise locality segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionVocabulary {
    /// Characters that separate address segments.
    pub delimiters: Vec<char>,

    /// Trailing strings marking a neighborhood-level segment (동, 읍, ...).
    pub neighborhood_suffixes: Vec<String>,

    /// Trailing strings marking a district-level segment (구, 군).
    pub district_suffixes: Vec<String>,
}

impl Default for RegionVocabulary {
    /// Korean administrative suffixes, comma-delimited segments.
    fn default() -> Self {
        Self {
            delimiters: vec![','],
            neighborhood_suffixes: ["동", "읍", "면", "리", "가"]
                .into_iter()
                .map(String::from)
                .collect(),
            district_suffixes: ["구", "군"].into_iter().map(String::from).collect(),
        }
    }
}

impl RegionVocabulary {
    fn first_with_suffix<'a>(&self, address: &'a str, suffixes: &[String]) -> Option<&'a str> {
        address
            .split(|c: char| self.delimiters.contains(&c))
            .map(str::trim)
            .find(|segment| {
                suffixes
                    .iter()
                    .any(|suffix| segment.len() > suffix.len() && segment.ends_with(suffix.as_str()))
            })
    }

    /// Extracts the regional phrase from an address label.
    ///
    /// Returns `"<district> <neighborhood>"` when both are found, whichever one
    /// was found otherwise, and an empty string when neither matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodfinder::search::RegionVocabulary;
    ///
    /// let vocab = RegionVocabulary::default();
    /// assert_eq!(vocab.extract("풍덕천동, 수지구, 용인시, 경기도"), "수지구 풍덕천동");
    /// assert_eq!(vocab.extract(""), "");
    /// ```
    #[must_use]
    pub fn extract(&self, address: &str) -> String {
        let neighborhood = self.first_with_suffix(address, &self.neighborhood_suffixes);
        let district = self.first_with_suffix(address, &self.district_suffixes);

        let phrase = match (district, neighborhood) {
            (Some(d), Some(n)) if d == n => d.to_string(),
            (Some(d), Some(n)) => format!("{d} {n}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => String::new(),
        };

        tracing::trace!(address = %address, phrase = %phrase, "regional phrase extracted");

        phrase
    }
}

/// Prepends `phrase` to `query` unless the query already contains it verbatim.
///
/// # Examples
///
/// ```
/// use foodfinder::search::augment_query;
///
/// assert_eq!(augment_query("국밥", "수지구 풍덕천동"), "수지구 풍덕천동 국밥");
/// assert_eq!(augment_query("수지구 풍덕천동 국밥", "수지구 풍덕천동"), "수지구 풍덕천동 국밥");
/// assert_eq!(augment_query("국밥", ""), "국밥");
/// ```
#[must_use]
pub fn augment_query(query: &str, phrase: &str) -> String {
    let query = query.trim();
    if phrase.is_empty() || query.contains(phrase) {
        return query.to_string();
    }
    if query.is_empty() {
        return phrase.to_string();
    }
    format!("{phrase} {query}")
}
