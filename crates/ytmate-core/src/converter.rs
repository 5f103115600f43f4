//! Converter: replays one row's conversion parameters to the upstream

use tracing::{info, warn};

use crate::client::UpstreamClient;
use crate::error::{YtMateError, Result};
use crate::types::{ConversionParams, ConversionResult};

/// Request a conversion for one ConversionRequired option
///
/// Non-empty fields are forwarded verbatim alongside `platform=youtube`;
/// empty ones are left out of the form entirely. A non-empty note is also
/// sent as the `x-note` header. The upstream JSON comes back unmodified.
///
/// # Errors
/// - `InvalidConversionRequest` if `params.id` is empty, before any
///   network call
/// - `Http` / `UpstreamUnavailable` if the round trip fails
pub async fn convert(client: &UpstreamClient, params: &ConversionParams) -> Result<ConversionResult> {
    if params.id.trim().is_empty() {
        return Err(YtMateError::InvalidConversionRequest(
            "Missing ID for conversion.".to_string(),
        ));
    }

    let form: Vec<(&str, &str)> = [
        ("platform", "youtube"),
        ("url", params.youtube_url.as_str()),
        ("title", params.title.as_str()),
        ("id", params.id.as_str()),
        ("ext", params.ext.as_str()),
        ("note", params.note.as_str()),
        ("format", params.format.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect();
    let note = Some(params.note.as_str()).filter(|note| !note.is_empty());

    info!(id = %params.id, title = %params.title, format = %params.format, "converting video");
    let payload = client.post_convert(&params.id, note, &form).await?;

    let result = ConversionResult(payload);
    if result.download_url().is_none() {
        warn!(id = %params.id, "conversion payload carries no recognizable download URL");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::with_config(ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn params() -> ConversionParams {
        ConversionParams {
            youtube_url: "https://www.youtube.com/watch?v=abc".to_string(),
            title: "Test Video".to_string(),
            id: "conv_42".to_string(),
            ext: "mp3".to_string(),
            note: "128k".to_string(),
            format: "140".to_string(),
        }
    }

    #[tokio::test]
    async fn test_convert_forwards_params_and_returns_payload() {
        let server = MockServer::start().await;
        let payload = json!({ "status": "success", "result": "https://cdn.example/f.mp3" });
        Mock::given(method("POST"))
            .and(path("/mates/en/convert"))
            .and(query_param("id", "conv_42"))
            .and(header("x-note", "128k"))
            .and(header("platform", "youtube"))
            .and(body_string_contains("platform=youtube"))
            .and(body_string_contains("id=conv_42"))
            .and(body_string_contains("ext=mp3"))
            .and(body_string_contains("format=140"))
            .and(body_string_contains("title=Test+Video"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = convert(&client_for(&server), &params()).await.unwrap();
        assert_eq!(result.download_url(), Some("https://cdn.example/f.mp3"));
        assert_eq!(result.into_inner(), payload);
    }

    #[tokio::test]
    async fn test_convert_missing_id_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut missing = params();
        missing.id = String::new();
        let result = convert(&client_for(&server), &missing).await;
        assert!(matches!(result, Err(YtMateError::InvalidConversionRequest(_))));

        missing.id = "  ".to_string();
        let result = convert(&client_for(&server), &missing).await;
        assert!(matches!(result, Err(YtMateError::InvalidConversionRequest(_))));
    }

    #[tokio::test]
    async fn test_convert_omits_empty_fields_and_note_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mates/en/convert"))
            .and(query_param("id", "conv_42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let sparse = ConversionParams {
            id: "conv_42".to_string(),
            ..ConversionParams::default()
        };
        convert(&client_for(&server), &sparse).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(!request.headers.keys().any(|name| name.as_str() == "x-note"));
        assert_eq!(String::from_utf8_lossy(&request.body), "platform=youtube&id=conv_42");
    }

    #[tokio::test]
    async fn test_convert_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = convert(&client_for(&server), &params()).await.unwrap_err();
        assert!(err.is_upstream_unavailable());
    }

    #[tokio::test]
    async fn test_convert_passes_payload_without_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "converting", "progress": 10 })),
            )
            .mount(&server)
            .await;

        let result = convert(&client_for(&server), &params()).await.unwrap();
        assert_eq!(result.download_url(), None);
        assert_eq!(result.0["progress"], 10);
    }
}
