//! The `subsonic-response` envelope.

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const API_VERSION: &str = "1.16.1";
pub const SERVER_TYPE: &str = "sonica";

/// Successful response envelope. The payload root key varies per endpoint
/// (`song`, `album`, `albumList2`, ...), so the body is assembled as a JSON
/// map instead of a fixed struct.
pub struct SubsonicResponse {
    data: Map<String, Value>,
}

impl SubsonicResponse {
    pub fn ok() -> Self {
        let mut data = Map::new();
        data.insert("status".to_string(), json!("ok"));
        data.insert("version".to_string(), json!(API_VERSION));
        data.insert("type".to_string(), json!(SERVER_TYPE));
        data.insert(
            "serverVersion".to_string(),
            json!(env!("CARGO_PKG_VERSION")),
        );
        data.insert("openSubsonic".to_string(), json!(true));
        SubsonicResponse { data }
    }

    pub fn with_payload<T: Serialize>(root_key: &str, payload: T) -> Self {
        let mut response = Self::ok();
        response.data.insert(
            root_key.to_string(),
            serde_json::to_value(payload).expect("view serialization is infallible"),
        );
        response
    }
}

impl IntoResponse for SubsonicResponse {
    fn into_response(self) -> Response {
        Json(json!({ "subsonic-response": self.data })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_protocol_fields() {
        let response = SubsonicResponse::with_payload("song", json!({"id": 1}));
        let body = json!({ "subsonic-response": response.data });
        assert_eq!(body["subsonic-response"]["status"], "ok");
        assert_eq!(body["subsonic-response"]["version"], API_VERSION);
        assert_eq!(body["subsonic-response"]["openSubsonic"], true);
        assert_eq!(body["subsonic-response"]["song"]["id"], 1);
    }
}
