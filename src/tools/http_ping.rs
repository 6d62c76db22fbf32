use async_trait::async_trait;
use std::time::Duration;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult};
use crate::config::HttpPingConfig;

const PARAMS: &[ParamSpec] = &[ParamSpec::required(
    "url",
    ParamKind::Text,
    "The http:// or https:// URL to ping",
)];

/// Issues a single GET request and reports the status code.
pub struct HttpPingTool {
    config: HttpPingConfig,
}

impl HttpPingTool {
    pub fn new(config: HttpPingConfig) -> Self {
        Self { config }
    }

    fn validate_url(raw_url: &str) -> anyhow::Result<&str> {
        let url = raw_url.trim();
        if url.is_empty() {
            anyhow::bail!("URL cannot be empty");
        }
        if url.chars().any(char::is_whitespace) {
            anyhow::bail!("URL cannot contain whitespace");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("Only http:// and https:// URLs are allowed");
        }
        Ok(url)
    }
}

#[async_trait]
impl Tool for HttpPingTool {
    fn name(&self) -> &str {
        "http_ping"
    }

    fn description(&self) -> &str {
        "Send one GET request to a URL and report the HTTP status code. Useful as a connectivity check."
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn may_suspend(&self) -> bool {
        true
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let raw_url = args
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("missing url"))?;
        let url = match Self::validate_url(raw_url) {
            Ok(url) => url,
            Err(e) => return Ok(ToolResult::failure(e.to_string())),
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                Ok(ToolResult::text(format!(
                    "{url} responded with status {status}"
                )))
            }
            Err(e) => Ok(ToolResult::failure(format!("request failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reports_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let tool = HttpPingTool::new(HttpPingConfig::default());
        let url = format!("{}/get", server.uri());
        let result = tool.execute(json!({ "url": url })).await.unwrap();
        assert_eq!(result, ToolResult::text(format!("{url} responded with status 200 OK")));
    }

    #[tokio::test]
    async fn surfaces_http_errors_as_success_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let tool = HttpPingTool::new(HttpPingConfig::default());
        let result = tool
            .execute(json!({ "url": server.uri() }))
            .await
            .unwrap();
        // A reachable server is a successful ping, whatever the status code.
        assert!(result.is_success());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["payload"]["value"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let tool = HttpPingTool::new(HttpPingConfig::default());
        let result = tool.execute(json!({"url": "ftp://example.com"})).await.unwrap();
        assert!(result.message().unwrap().contains("http://"));
    }

    #[tokio::test]
    async fn unreachable_host_becomes_failure() {
        let tool = HttpPingTool::new(HttpPingConfig { timeout_secs: 1 });
        let result = tool
            .execute(json!({"url": "http://127.0.0.1:9"}))
            .await
            .unwrap();
        assert!(result.message().unwrap().contains("request failed"));
    }
}
