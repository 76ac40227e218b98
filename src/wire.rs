//! JSON shapes exchanged with the RegexSolver API and their mapping to domain types.

use serde::{Deserialize, Serialize};

use crate::details::{Cardinality, Details, Length};
use crate::term::{Term, TermType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TermJson {
    #[serde(rename = "type")]
    pub term_type: TermType,
    pub value: String,
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        Self {
            term_type: term.term_type(),
            value: term.value().to_string(),
        }
    }
}

impl From<TermJson> for Term {
    fn from(json: TermJson) -> Self {
        Term::from_parts(json.term_type, json.value)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MultiTermsRequest {
    pub terms: Vec<TermJson>,
}

impl MultiTermsRequest {
    pub fn new(terms: &[Term]) -> Self {
        Self {
            terms: terms.iter().map(TermJson::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateStringsRequest {
    pub term: TermJson,
    pub count: usize,
}

/// Responses wrapping a single `value` field
#[derive(Debug, Deserialize)]
pub(crate) struct ValueResponse<T> {
    pub value: T,
}

/// Error payload returned by the service
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardinalityJson {
    #[serde(rename = "type")]
    pub cardinality_type: String,
    #[serde(default)]
    pub value: Option<serde_json::Number>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsJson {
    pub cardinality: CardinalityJson,
    /// `[minimum, maximum]`; maximum absent or null when unbounded, both null when empty
    pub length: Vec<Option<u64>>,
    pub empty: bool,
    pub total: bool,
}

impl TryFrom<CardinalityJson> for Cardinality {
    type Error = String;

    fn try_from(json: CardinalityJson) -> Result<Self, Self::Error> {
        match json.cardinality_type.as_str() {
            "Infinite" => Ok(Cardinality::Infinite),
            "BigInteger" => Ok(Cardinality::BigInteger),
            "Integer" => json
                .value
                .as_ref()
                .and_then(serde_json::Number::as_u64)
                .map(Cardinality::Integer)
                .ok_or_else(|| format!("invalid integer cardinality value: {:?}", json.value)),
            other => Err(format!("unknown cardinality type: {}", other)),
        }
    }
}

impl TryFrom<DetailsJson> for Details {
    type Error = String;

    fn try_from(json: DetailsJson) -> Result<Self, Self::Error> {
        let cardinality = Cardinality::try_from(json.cardinality)?;

        let minimum = json.length.first().copied().flatten();
        let maximum = json.length.get(1).copied().flatten();

        Ok(Details::new(
            cardinality,
            Length::new(minimum, maximum),
            json.empty,
            json.total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn details_from(value: serde_json::Value) -> Result<Details, String> {
        let json: DetailsJson = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Details::try_from(json)
    }

    #[test]
    fn test_term_json_shape() {
        let json = serde_json::to_value(TermJson::from(&Term::fair("xyz"))).unwrap();
        assert_eq!(json, json!({"type": "fair", "value": "xyz"}));
    }

    #[test]
    fn test_term_json_to_term() {
        let json: TermJson = serde_json::from_value(json!({"type": "regex", "value": "deabc"})).unwrap();
        assert_eq!(Term::from(json), Term::regex("deabc"));
    }

    #[test]
    fn test_term_json_rejects_unknown_type() {
        let result = serde_json::from_value::<TermJson>(json!({"type": "unknown", "value": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_multi_terms_request_shape() {
        let request = MultiTermsRequest::new(&[Term::regex("abc"), Term::fair("xyz")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"terms": [
                {"type": "regex", "value": "abc"},
                {"type": "fair", "value": "xyz"}
            ]})
        );
    }

    #[test]
    fn test_generate_strings_request_shape() {
        let request = GenerateStringsRequest {
            term: TermJson::from(&Term::regex("(abc|de){2}")),
            count: 10,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"term": {"type": "regex", "value": "(abc|de){2}"}, "count": 10})
        );
    }

    #[test]
    fn test_details_bounded() {
        let details = details_from(json!({
            "cardinality": {"type": "Integer", "value": 2},
            "length": [2, 3],
            "empty": false,
            "total": false
        }))
        .unwrap();

        assert_eq!(details.cardinality(), Cardinality::Integer(2));
        assert_eq!(details.length(), Length::new(Some(2), Some(3)));
    }

    #[test]
    fn test_details_unbounded_length() {
        let details = details_from(json!({
            "cardinality": {"type": "Infinite"},
            "length": [0, null],
            "empty": false,
            "total": true
        }))
        .unwrap();
        assert!(details.cardinality().is_infinite());
        assert_eq!(details.length(), Length::new(Some(0), None));

        let details = details_from(json!({
            "cardinality": {"type": "Infinite"},
            "length": [1],
            "empty": false,
            "total": false
        }))
        .unwrap();
        assert_eq!(details.length(), Length::new(Some(1), None));
    }

    #[test]
    fn test_details_big_integer_ignores_value() {
        let details = details_from(json!({
            "cardinality": {"type": "BigInteger", "value": 1.0e40},
            "length": [40, 40],
            "empty": false,
            "total": false
        }))
        .unwrap();
        assert_eq!(details.cardinality(), Cardinality::BigInteger);
    }

    #[test]
    fn test_details_empty_language_has_no_length_bounds() {
        let details = details_from(json!({
            "cardinality": {"type": "Integer", "value": 0},
            "length": [null, null],
            "empty": true,
            "total": false
        }))
        .unwrap();

        assert!(details.is_empty());
        assert_eq!(details.cardinality(), Cardinality::Integer(0));
        assert_eq!(details.length(), Length::new(None, None));

        let details = details_from(json!({
            "cardinality": {"type": "Integer", "value": 0},
            "length": [],
            "empty": true,
            "total": false
        }))
        .unwrap();
        assert_eq!(details.length(), Length::new(None, None));
    }

    #[test]
    fn test_details_length_bounds_copied_verbatim() {
        let details = details_from(json!({
            "cardinality": {"type": "Integer", "value": 1},
            "length": [3, 2],
            "empty": false,
            "total": false
        }))
        .unwrap();
        assert_eq!(details.length(), Length::new(Some(3), Some(2)));
    }

    #[test]
    fn test_details_rejects_malformed_cardinality() {
        let integer_without_value = details_from(json!({
            "cardinality": {"type": "Integer"},
            "length": [1, 1],
            "empty": false,
            "total": false
        }));
        assert!(integer_without_value.is_err());

        let unknown_cardinality = details_from(json!({
            "cardinality": {"type": "Huge"},
            "length": [1, 1],
            "empty": false,
            "total": false
        }));
        assert_eq!(unknown_cardinality, Err("unknown cardinality type: Huge".to_string()));
    }
}
