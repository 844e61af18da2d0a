use serde::{Deserialize, Serialize};

/// Room permissions carried in the `video` claim. Field names follow the
/// camelCase layout media servers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(default)]
    pub room_join: bool,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub can_publish: bool,
    #[serde(default)]
    pub can_subscribe: bool,
}

impl VideoGrant {
    /// Join `room` with publish and subscribe rights.
    pub fn join_room(room: &str) -> Self {
        Self {
            room_join: true,
            room: room.to_string(),
            can_publish: true,
            can_subscribe: true,
        }
    }
}

/// Claims of a signed access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// API key of the issuer.
    pub iss: String,
    /// Participant identity.
    pub sub: String,
    pub jti: String,
    pub nbf: i64,
    pub exp: i64,
    pub video: VideoGrant,
}
