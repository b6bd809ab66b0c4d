//! Wire types for the crystal backend's JSON API

use serde::{Deserialize, Serialize};

/// `POST /chat` body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat` reply
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub phi: f64,
    #[serde(default)]
    pub timestamp: String,
}

/// `GET /status` reply
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub core: String,
    #[serde(default)]
    pub phi: f64,
    #[serde(default)]
    pub timestamp: String,
}

/// `POST /simulate` body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_steps: Option<usize>,
}

/// `POST /simulate` reply
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub timestamp: String,
}

impl ChatResponse {
    /// The reply text, or the reason the backend refused.
    pub fn into_result(self) -> Result<String, String> {
        if self.success {
            Ok(self.response)
        } else if self.message.is_empty() {
            Err("backend reported failure".to_string())
        } else {
            Err(self.message)
        }
    }
}
