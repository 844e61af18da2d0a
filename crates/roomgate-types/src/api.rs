use serde::{Deserialize, Serialize};

// -- Registration --

/// Fields are optional so an absent field reaches the handler instead of
/// failing inside the JSON extractor.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterFailure {
    pub success: bool,
    pub error: String,
}

// -- Token issuance --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub participant_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TokenRequest {
    /// Returns `(room_name, participant_name, password)` when all three are
    /// present and non-empty.
    pub fn into_parts(self) -> Option<(String, String, String)> {
        let room = self.room_name.filter(|s| !s.is_empty())?;
        let participant = self.participant_name.filter(|s| !s.is_empty())?;
        let password = self.password.filter(|s| !s.is_empty())?;
        Some((room, participant, password))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// -- Errors / health --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
