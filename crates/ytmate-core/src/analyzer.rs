//! Analyzer: one upstream analyze round trip, parsed into download options

use tracing::{info, warn};

use crate::client::UpstreamClient;
use crate::error::{YtMateError, Result};
use crate::parser::parse_analysis;
use crate::token;
use crate::types::AnalysisResult;

/// Analyze a source video URL
///
/// Sends the URL with a placeholder `cftoken` to the analyze endpoint
/// and parses the returned HTML fragment. The URL is forwarded as given;
/// it is not checked against any video-host pattern.
///
/// # Errors
/// - `Validation` if `source_url` is empty or whitespace only
/// - `Http` / `UpstreamUnavailable` if the round trip fails
/// - `UpstreamAnalysisFailure` if the upstream reports failure or
///   returns an empty fragment
pub async fn analyze(client: &UpstreamClient, source_url: &str) -> Result<AnalysisResult> {
    if source_url.trim().is_empty() {
        return Err(YtMateError::Validation(
            "YouTube URL is required".to_string(),
        ));
    }

    let cftoken = token::fresh();
    let form = [
        ("url", source_url),
        ("ajax", "1"),
        ("lang", "en"),
        ("cftoken", cftoken.as_str()),
    ];

    info!(url = %source_url, "analyzing video");
    let envelope = client.post_analyze(&form).await?;

    let Some(html) = envelope.html() else {
        warn!(url = %source_url, status = %envelope.status, "upstream analysis unsuccessful");
        return Err(YtMateError::UpstreamAnalysisFailure(
            "Failed to get data or HTML result is empty".to_string(),
        ));
    };

    let result = parse_analysis(html)?;
    info!(
        title = %result.video_title,
        downloads = result.downloads.len(),
        "analysis complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RESULT_HTML: &str = r#"
        <b id="video_title">Test Video</b>
        <img class="img-thumbnail" src="https://i.ytimg.com/vi/abc/0.jpg">
        <table class="table"><tbody>
            <tr><td>720p</td><td>10 MB</td><td><a href="https://r1.googlevideo.com/v?x=1">Download</a></td></tr>
        </tbody></table>
    "#;

    fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::with_config(ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_sends_form_and_parses_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mates/en/analyze/ajax"))
            .and(query_param("platform", "youtube"))
            .and(query_param("mhash", "2eb5f4c999fea86c"))
            .and(body_string_contains("url=https%3A%2F%2Fyoutu.be%2Fabc"))
            .and(body_string_contains("ajax=1"))
            .and(body_string_contains("lang=en"))
            .and(body_string_contains("cftoken="))
            .and(header("referer", format!("{}/en307/", server.uri()).as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "success", "result": RESULT_HTML })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = analyze(&client_for(&server), "https://youtu.be/abc").await.unwrap();
        assert_eq!(result.video_title, "Test Video");
        assert_eq!(result.thumbnail.as_deref(), Some("https://i.ytimg.com/vi/abc/0.jpg"));
        assert_eq!(result.downloads.len(), 1);
        assert!(result.downloads[0].is_direct());
    }

    #[tokio::test]
    async fn test_analyze_status_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "error", "result": RESULT_HTML })),
            )
            .mount(&server)
            .await;

        let result = analyze(&client_for(&server), "https://youtu.be/abc").await;
        match result {
            Err(YtMateError::UpstreamAnalysisFailure(_)) => {}
            other => panic!("Expected UpstreamAnalysisFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_empty_html() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "result": "" })),
            )
            .mount(&server)
            .await;

        let result = analyze(&client_for(&server), "https://youtu.be/abc").await;
        assert!(matches!(result, Err(YtMateError::UpstreamAnalysisFailure(_))));
    }

    #[tokio::test]
    async fn test_analyze_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = analyze(&client_for(&server), "https://youtu.be/abc")
            .await
            .unwrap_err();
        assert!(err.is_upstream_unavailable());
    }

    #[tokio::test]
    async fn test_analyze_non_json_body_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let err = analyze(&client_for(&server), "https://youtu.be/abc")
            .await
            .unwrap_err();
        assert!(err.is_upstream_unavailable());
    }

    #[tokio::test]
    async fn test_analyze_empty_url_skips_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = analyze(&client_for(&server), "   ").await;
        assert!(matches!(result, Err(YtMateError::Validation(_))));
    }
}
