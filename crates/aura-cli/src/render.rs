//! Terminal rendering of a facial report. Presentation only.

use aura_core::report::{FacialReport, FiveEyes};
use std::fmt::Write;

/// Shown in place of the five-eye section when the model omitted it.
const FIVE_EYES_FALLBACK: &str = "五眼数据未返回，请参考三庭分析。";
/// Shown for an individually absent five-eye measurement.
const MEASUREMENT_FALLBACK: &str = "—";

/// Render the full report as terminal text. Every feature card is
/// printed expanded; the collapsible cards of the original UI have no
/// terminal counterpart.
pub fn render_report(report: &FacialReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "══════ 面部美学诊断报告 ══════");
    let _ = writeln!(out, "魅力指数: {}", format_score(report.overall_score));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.summary);

    let three = &report.proportions.three_parts;
    let _ = writeln!(out);
    let _ = writeln!(out, "【三庭】");
    let _ = writeln!(out, "  上庭: {}", three.upper);
    let _ = writeln!(out, "  中庭: {}", three.middle);
    let _ = writeln!(out, "  下庭: {}", three.lower);
    let _ = writeln!(out, "  分析: {}", three.analysis);

    let _ = writeln!(out);
    let _ = writeln!(out, "【五眼】");
    match &report.proportions.five_eyes {
        Some(five) => render_five_eyes(&mut out, five),
        None => {
            let _ = writeln!(out, "  {FIVE_EYES_FALLBACK}");
        }
    }

    if !report.features.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "【五官细节】");
        for (i, feature) in report.features.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, feature.name);
            let _ = writeln!(out, "     观察: {}", feature.observation);
            let _ = writeln!(out, "     建议: {}", feature.suggestion);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "【风格建议】");
    let _ = writeln!(out, "  {}", report.style_advice);

    if !report.medical_suggestion.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "【医美建议】");
        for (i, suggestion) in report.medical_suggestion.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
        }
    }

    out
}

fn render_five_eyes(out: &mut String, five: &FiveEyes) {
    let rows = [
        ("左侧", &five.left_side),
        ("左眼", &five.left_eye),
        ("中庭", &five.middle),
        ("右眼", &five.right_eye),
        ("右侧", &five.right_side),
    ];
    for (label, value) in rows {
        let _ = writeln!(
            out,
            "  {label}: {}",
            value.as_deref().unwrap_or(MEASUREMENT_FALLBACK)
        );
    }
    if let Some(analysis) = &five.analysis {
        let _ = writeln!(out, "  分析: {analysis}");
    }
}

/// Scores arrive as JSON numbers; print whole values without a
/// trailing ".0".
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::report::parse_report;
    use serde_json::json;

    fn report(five_eyes: Option<serde_json::Value>) -> FacialReport {
        let mut proportions = json!({
            "threeParts": {
                "upper": "33%",
                "middle": "34%",
                "lower": "33%",
                "analysis": "比例均衡。"
            }
        });
        if let Some(five) = five_eyes {
            proportions["fiveEyes"] = five;
        }
        parse_report(
            &json!({
                "overallScore": 88.0,
                "summary": "总体评价。",
                "proportions": proportions,
                "features": [
                    { "name": "鼻部", "observation": "鼻背平直。", "suggestion": "无需处理。" }
                ],
                "styleAdvice": "清冷风。",
                "medicalSuggestion": ["建议A", "建议B"]
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_renders_sections() {
        let text = render_report(&report(None));
        assert!(text.contains("魅力指数: 88"));
        assert!(text.contains("上庭: 33%"));
        assert!(text.contains("1. 鼻部"));
        assert!(text.contains("2. 建议B"));
    }

    #[test]
    fn test_absent_five_eyes_fallback() {
        let text = render_report(&report(None));
        assert!(text.contains(FIVE_EYES_FALLBACK));
    }

    #[test]
    fn test_partial_five_eyes_placeholders() {
        let text = render_report(&report(Some(json!({ "leftEye": "1.0" }))));
        assert!(text.contains("左眼: 1.0"));
        assert!(text.contains(&format!("右眼: {MEASUREMENT_FALLBACK}")));
        assert!(!text.contains(FIVE_EYES_FALLBACK));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(88.0), "88");
        assert_eq!(format_score(86.5), "86.5");
    }
}
