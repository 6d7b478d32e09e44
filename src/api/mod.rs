//! Wire payloads for the `generateContent` endpoint.
//!
//! Requests are built from a single prompt. Responses are decoded into
//! structs where every level is optional, so a body that is missing
//! `candidates`, `content` or `parts` still decodes and simply yields no text.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it exists and is
    /// non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    pub fn into_first_text(self) -> Option<String> {
        self.first_text().map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).expect("body should decode")
    }

    #[test]
    fn request_serializes_single_prompt_part() {
        let request = GenerateContentRequest::from_prompt("Hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "contents": [{ "parts": [{ "text": "Hello" }] }] })
        );
    }

    #[test]
    fn first_text_reads_first_candidate_first_part() {
        let response = decode(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"first"},{"text":"second"}],"role":"model"}},
                {"content":{"parts":[{"text":"other candidate"}]}}
            ]}"#,
        );
        assert_eq!(response.first_text(), Some("first"));
    }

    #[test]
    fn missing_levels_yield_none() {
        let bodies = [
            "{}",
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
            r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#,
        ];

        for body in bodies {
            assert_eq!(decode(body).first_text(), None, "body: {body}");
        }
    }

    #[test]
    fn explicit_nulls_are_tolerated() {
        let response = decode(r#"{"candidates":null}"#);
        assert!(response.into_first_text().is_none());
    }
}
