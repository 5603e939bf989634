use mediawiki::{ClientOptions, MediaWiki};
use reqwest::header::HeaderMap;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "info|pageprops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "query": {"pages": {"12345": {
            "pageid": 12345,
            "ns": 6,
            "title": "File:F.png",
            "fullurl": "https://example.org/wiki/File:F.png"
          }}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "imageinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "query": {"pages": {"12345": {"imageinfo": [{"url": "https://example.org/f.png"}]}}}
        })))
        .mount(&server)
        .await;

    let wiki = MediaWiki::new(ClientOptions {
        api_url: Some(format!("{}/w/api.php", server.uri())),
        user_agent: None,
        timeout: Some(Duration::from_millis(250)),
        default_headers: HeaderMap::new(),
    })?;

    let mut file = wiki.file("File:F.png").await?;
    println!("file_url={}", file.file_url().await?);

    Ok(())
}
