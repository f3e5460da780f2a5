//! Request construction — fixed instruction block, inline image parts,
//! and the declared response schema.

use aura_core::intake::{Angle, EncodedImage};
use aura_core::MultiAngleImages;
use serde_json::{json, Value};

/// Fixed instruction block sent with every analysis request. Not
/// user-configurable.
pub const ANALYSIS_PROMPT: &str = "\
作为顶级整形外科专家，请结合提供的三张照片（正脸、45度斜位、侧脸）进行全方位面部美学诊断。

分析维度：
1. 【正脸】：精准计算三庭五眼比例，分析面部对称性及骨骼宽度。
2. 【侧脸】：分析E-line（审美平面）、鼻额角（115-135°）、鼻唇角（90-105°）、下颌角弧度。
3. 【45度斜位】：分析中面部丰盈度（苹果肌）、鼻翼基底凹陷情况、面部光影转折（凸度）。

输出要求：
- 医美建议必须极其专业，区分注射类（如玻尿酸、肉毒素）、光电类（如超声炮）及手术类。
- 细节观察需包含解剖学名词（如：内眦、下颌支、颧突）。

严格以 JSON 格式输出。";

/// Build the `generateContent` request body.
///
/// Part order: the instruction text first, then one inline-data part
/// per populated angle in frontal, oblique, side order. Only the bare
/// base64 payload is transmitted, never a data-URI prefix.
pub fn build_request(images: &MultiAngleImages) -> Value {
    let mut parts = vec![json!({ "text": ANALYSIS_PROMPT })];
    for angle in Angle::ALL {
        if let Some(image) = images.get(angle) {
            parts.push(inline_part(image));
        }
    }

    json!({
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
    })
}

fn inline_part(image: &EncodedImage) -> Value {
    json!({
        "inlineData": {
            "mimeType": image.mime_type,
            "data": image.data,
        }
    })
}

/// Declared output shape for the structured response.
///
/// Everything the report parser requires is marked required here, so
/// the remote is constrained to the same contract the parser enforces.
/// `fiveEyes` is declared but left optional; responses may omit it.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overallScore": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "proportions": {
                "type": "OBJECT",
                "properties": {
                    "threeParts": {
                        "type": "OBJECT",
                        "properties": {
                            "upper": { "type": "STRING" },
                            "middle": { "type": "STRING" },
                            "lower": { "type": "STRING" },
                            "analysis": { "type": "STRING" }
                        },
                        "required": ["upper", "middle", "lower", "analysis"]
                    },
                    "fiveEyes": {
                        "type": "OBJECT",
                        "properties": {
                            "leftSide": { "type": "STRING" },
                            "leftEye": { "type": "STRING" },
                            "middle": { "type": "STRING" },
                            "rightEye": { "type": "STRING" },
                            "rightSide": { "type": "STRING" },
                            "analysis": { "type": "STRING" }
                        }
                    }
                },
                "required": ["threeParts"]
            },
            "features": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "observation": { "type": "STRING" },
                        "suggestion": { "type": "STRING" }
                    }
                }
            },
            "styleAdvice": { "type": "STRING" },
            "medicalSuggestion": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": [
            "overallScore",
            "summary",
            "proportions",
            "features",
            "styleAdvice",
            "medicalSuggestion"
        ]
    })
}

/// Pull the model's text payload out of a `generateContent` response.
pub fn extract_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}
