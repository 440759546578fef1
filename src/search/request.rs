//! Search request derivation.
//!
//! A [`SearchRequest`] is rebuilt from scratch for every search. The builder is
//! a pure function of its inputs, so two searches issued against unchanged
//! location, filters and query carry identical derived fields.

use super::filter::{BudgetBasis, FilterCriteria};
use super::region::{augment_query, RegionVocabulary};
use crate::domain::Coordinate;
use serde::{Deserialize, Serialize};

/// The body sent to `restaurants.search`, in the backend's field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "radius")]
    pub radius_meters: u32,
    #[serde(rename = "query")]
    pub query_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u32>,
    #[serde(rename = "budget_type", skip_serializing_if = "Option::is_none")]
    pub budget_basis: Option<BudgetBasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_hint: Option<String>,
    /// Locality phrase that was folded into `query_text`; not sent.
    #[serde(skip)]
    pub regional_phrase: String,
}

/// Everything a request is derived from.
#[derive(Debug, Clone, Copy)]
pub struct RequestInputs<'a> {
    pub coordinate: Coordinate,
    /// Address label used for the backend hint and the regional phrase.
    pub location_hint: Option<&'a str>,
    pub filters: &'a FilterCriteria,
    /// Free-text query as typed.
    pub query: &'a str,
    /// Term used when the query is blank.
    pub default_query: &'a str,
    pub vocabulary: &'a RegionVocabulary,
}

impl SearchRequest {
    /// Builds the request for one search.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodfinder::search::{FilterCriteria, RegionVocabulary, RequestInputs, SearchRequest};
    /// use foodfinder::Coordinate;
    ///
    /// let filters = FilterCriteria::default();
    /// let vocabulary = RegionVocabulary::default();
    /// let request = SearchRequest::build(&RequestInputs {
    ///     coordinate: Coordinate::new(37.3211, 127.0954)?,
    ///     location_hint: Some("풍덕천동, 수지구, 용인시, 경기도"),
    ///     filters: &filters,
    ///     query: "",
    ///     default_query: "음식점",
    ///     vocabulary: &vocabulary,
    /// });
    /// assert_eq!(request.query_text, "수지구 풍덕천동 음식점");
    /// assert_eq!(request.radius_meters, 1000);
    /// # Ok::<(), foodfinder::FinderError>(())
    /// ```
    #[must_use]
    pub fn build(inputs: &RequestInputs<'_>) -> Self {
        let base_query = match inputs.query.trim() {
            "" => inputs.default_query.trim(),
            typed => typed,
        };

        let hint = inputs
            .location_hint
            .map(str::trim)
            .filter(|hint| !hint.is_empty());

        let regional_phrase = hint
            .map(|hint| inputs.vocabulary.extract(hint))
            .unwrap_or_default();

        let filters = inputs.filters;
        let categories = (!filters.categories.is_empty())
            .then(|| filters.categories.iter().cloned().collect::<Vec<_>>());

        Self {
            latitude: inputs.coordinate.latitude(),
            longitude: inputs.coordinate.longitude(),
            radius_meters: filters.radius_meters,
            query_text: augment_query(base_query, &regional_phrase),
            budget: filters.budget,
            budget_basis: filters.budget.map(|_| filters.budget_basis),
            categories,
            location_hint: hint.map(String::from),
            regional_phrase,
        }
    }
}
