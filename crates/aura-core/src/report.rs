//! Facial report model — the structured output of a remote analysis.
//!
//! Parsing is schema-validated and fails closed: a payload missing any
//! required field is rejected rather than defaulted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes of one analysis attempt. The session collapses these
/// into a single user-facing advisory; the distinction is kept for logs.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("remote returned no report payload")]
    EmptyResponse,
    #[error("report payload violates schema: {0}")]
    Schema(String),
}

/// Structured aesthetic report returned by the remote model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialReport {
    /// Overall aesthetic index (the "Aura Index"), typically 0–100.
    pub overall_score: f64,
    pub summary: String,
    pub proportions: Proportions,
    /// Per-feature findings, in display order.
    pub features: Vec<FeatureFinding>,
    pub style_advice: String,
    /// Ordered medical-aesthetic recommendations.
    pub medical_suggestion: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proportions {
    /// Vertical thirds (三庭). Always present.
    pub three_parts: ThreeParts,
    /// Horizontal five-eye segmentation (五眼). Responses may omit this
    /// entirely or in part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub five_eyes: Option<FiveEyes>,
}

/// Vertical thirds measurements. Values are textual (e.g. "33%"), not
/// guaranteed numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeParts {
    pub upper: String,
    pub middle: String,
    pub lower: String,
    pub analysis: String,
}

/// Five-eye segmentation. Every field may be absent independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiveEyes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_eye: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_eye: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

/// One facial-feature finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFinding {
    pub name: String,
    pub observation: String,
    pub suggestion: String,
}

/// Parse a structured payload into a [`FacialReport`].
///
/// Malformed JSON or any missing required field rejects the whole
/// payload; a partially populated report is never returned.
pub fn parse_report(text: &str) -> Result<FacialReport, AnalyzeError> {
    serde_json::from_str(text).map_err(|e| AnalyzeError::Schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn full_payload() -> Value {
        json!({
            "overallScore": 88.0,
            "summary": "轮廓流畅，骨相立体。",
            "proportions": {
                "threeParts": {
                    "upper": "33%",
                    "middle": "34%",
                    "lower": "33%",
                    "analysis": "三庭比例接近理想值。"
                },
                "fiveEyes": {
                    "leftSide": "1.0",
                    "leftEye": "1.0",
                    "middle": "1.1",
                    "rightEye": "1.0",
                    "rightSide": "0.9",
                    "analysis": "眼距略宽。"
                }
            },
            "features": [
                {
                    "name": "鼻部",
                    "observation": "鼻背平直，鼻翼基底轻度凹陷。",
                    "suggestion": "可考虑鼻基底填充。"
                }
            ],
            "styleAdvice": "适合清冷风格。",
            "medicalSuggestion": ["建议A"]
        })
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let input = full_payload();
        let report = parse_report(&input.to_string()).unwrap();
        assert_eq!(report.overall_score, 88.0);
        assert_eq!(report.features.len(), 1);
        assert_eq!(report.medical_suggestion, vec!["建议A".to_string()]);

        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_parse_without_five_eyes() {
        let payload = json!({
            "overallScore": 88,
            "summary": "...",
            "proportions": {
                "threeParts": {
                    "upper": "33%",
                    "middle": "34%",
                    "lower": "33%",
                    "analysis": "..."
                }
            },
            "features": [],
            "styleAdvice": "...",
            "medicalSuggestion": ["建议A"]
        });
        let report = parse_report(&payload.to_string()).unwrap();
        assert_eq!(report.overall_score, 88.0);
        assert!(report.features.is_empty());
        assert!(report.proportions.five_eyes.is_none());
    }

    #[test]
    fn test_partial_five_eyes() {
        let mut payload = full_payload();
        payload["proportions"]["fiveEyes"] = json!({ "analysis": "仅有总评。" });
        let report = parse_report(&payload.to_string()).unwrap();
        let five_eyes = report.proportions.five_eyes.unwrap();
        assert_eq!(five_eyes.analysis.as_deref(), Some("仅有总评。"));
        assert!(five_eyes.left_side.is_none());
        assert!(five_eyes.right_side.is_none());
    }

    #[test]
    fn test_missing_three_parts_field_rejected() {
        let mut payload = full_payload();
        payload["proportions"]["threeParts"]
            .as_object_mut()
            .unwrap()
            .remove("analysis");
        let err = parse_report(&payload.to_string()).unwrap_err();
        assert!(matches!(err, AnalyzeError::Schema(_)));
    }

    #[test]
    fn test_missing_top_level_field_rejected() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("medicalSuggestion");
        let err = parse_report(&payload.to_string()).unwrap_err();
        assert!(matches!(err, AnalyzeError::Schema(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_report("{ not json").unwrap_err();
        assert!(matches!(err, AnalyzeError::Schema(_)));
    }
}
