//! Edit plans returned by the AI planning service.
//!
//! An [`EditPlan`] is an ordered list of [`Effect`]s. This system never
//! interprets effects; the plan is stored and forwarded to the video
//! processor as received. Unknown fields on both the plan and each effect
//! are captured so that forwarding does not drop anything the backend sent.

use serde::{Deserialize, Serialize};

/// Structured editing instructions produced by the planning service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditPlan {
    #[serde(default)]
    pub effects: Vec<Effect>,

    /// Fields outside the documented shape, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single effect, optionally bounded to a time range (seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Effect {
    pub fn new(effect_type: impl Into<String>) -> Self {
        Self {
            effect_type: effect_type.into(),
            start_time: None,
            end_time: None,
            parameters: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_range(mut self, start_time: f64, end_time: f64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }
}

impl EditPlan {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            extra: serde_json::Map::new(),
        }
    }

    /// Serialize the plan to the string stored in `EditRequest::response_json`.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).expect("EditPlan is always serialisable")
    }
}
