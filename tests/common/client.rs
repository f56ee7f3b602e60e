use serde_json::Value;

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        TestClient {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path_and_query))
            .send()
            .await
            .unwrap()
    }

    /// GET expecting success, unwrapping the `subsonic-response` envelope.
    pub async fn get_ok(&self, path_and_query: &str) -> Value {
        let response = self.get(path_and_query).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "unexpected status for {}",
            path_and_query
        );
        let mut body: Value = response.json().await.unwrap();
        let envelope = body
            .get_mut("subsonic-response")
            .expect("missing subsonic-response envelope")
            .take();
        assert_eq!(envelope["status"], "ok");
        envelope
    }
}
