//! Envelope types for the NLU platform's webhook calls, reduced to the
//! fields this backend reads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SESSION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/sessions/([^/]+)/contexts/").unwrap());

/// One webhook call from the platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub intent: IntentRef,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub output_contexts: Vec<OutputContext>,
    /// Raw user utterance; only consulted for reset-keyword detection.
    #[serde(default)]
    pub query_text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputContext {
    pub name: String,
}

/// Parameter bag resolved upstream. The platform sends numbers as JSON
/// floats; quantities are coerced to non-negative integers at this boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameters {
    #[serde(rename = "food-item", default)]
    pub food_item: Vec<String>,
    #[serde(default)]
    pub number: Vec<f64>,
    #[serde(default)]
    pub order_id: Option<f64>,
}

impl Parameters {
    /// Quantities as integers: fractions truncate, negatives clamp to zero.
    pub fn quantities(&self) -> Vec<u32> {
        self.number.iter().map(|n| n.max(0.0) as u32).collect()
    }
}

impl WebhookRequest {
    /// Session id from the first output context; empty when the envelope
    /// carries none (all such requests share the anonymous session).
    pub fn session_id(&self) -> String {
        self.query_result
            .output_contexts
            .first()
            .map(|ctx| extract_session_id(&ctx.name))
            .unwrap_or_default()
    }
}

/// The single-field reply envelope the platform renders to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
}

impl WebhookResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }
}

/// Extracts the session id from a context identifier of the form
/// `projects/<p>/agent/sessions/<id>/contexts/<name>`. Empty string when the
/// identifier carries no session segment.
pub fn extract_session_id(context_name: &str) -> String {
    SESSION_ID_RE
        .captures(context_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_the_session_segment() {
        let name = "projects/demo-bot/locations/global/agent/sessions/183dabdc-ec6a-9fdc/contexts/ongoing-order";
        assert_eq!(extract_session_id(name), "183dabdc-ec6a-9fdc");
    }

    #[test]
    fn unmatched_context_names_yield_empty() {
        assert_eq!(extract_session_id("projects/demo-bot/agent"), "");
        assert_eq!(extract_session_id(""), "");
    }

    #[test]
    fn deserializes_the_platform_envelope() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "queryResult": {
                "intent": { "displayName": "order.add - context: ongoing-order" },
                "parameters": {
                    "food-item": ["samosa", "chhole"],
                    "number": [2.0, 5.0]
                },
                "outputContexts": [
                    { "name": "projects/demo/agent/sessions/abc-123/contexts/ongoing-order" }
                ],
                "queryText": "two samosa and five chhole"
            }
        }))
        .unwrap();

        assert_eq!(
            request.query_result.intent.display_name,
            "order.add - context: ongoing-order"
        );
        assert_eq!(request.query_result.parameters.food_item, ["samosa", "chhole"]);
        assert_eq!(request.query_result.parameters.quantities(), [2, 5]);
        assert_eq!(request.session_id(), "abc-123");
    }

    #[test]
    fn missing_parameters_default_to_empty() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "queryResult": {
                "intent": { "displayName": "new.order" }
            }
        }))
        .unwrap();

        assert!(request.query_result.parameters.food_item.is_empty());
        assert_eq!(request.session_id(), "");
    }

    #[test]
    fn quantities_truncate_and_clamp() {
        let parameters = Parameters {
            food_item: vec![],
            number: vec![2.9, -1.0, 0.0],
            order_id: None,
        };
        assert_eq!(parameters.quantities(), [2, 0, 0]);
    }

    #[test]
    fn response_serializes_with_the_platform_field_name() {
        let response = WebhookResponse::text("done");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "fulfillmentText": "done" }));
    }
}
