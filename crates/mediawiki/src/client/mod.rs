use crate::error::{ApiError, Error, HttpApiError};
use crate::resources::file::File;
use crate::resources::page::{Page, PageParams};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client as HttpClient, Method, StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const HEADER_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Full URL of the wiki's `api.php` endpoint.
    pub api_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
    pub default_headers: HeaderMap,
}

impl Default for ClientOptions {
    fn default() -> Self {
        let api_url = std::env::var("MEDIAWIKI_API_URL").ok();
        let user_agent = std::env::var("MEDIAWIKI_USER_AGENT").ok();
        Self {
            api_url,
            user_agent,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Handle to a MediaWiki site. Clones share one connection pool.
#[derive(Clone)]
pub struct MediaWiki {
    inner: Arc<Inner>,
}

impl MediaWiki {
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        Ok(Self {
            inner: Arc::new(Inner::new(options)?),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    /// Runs an `api.php` request and returns the parsed JSON body.
    ///
    /// `action=query` and `format=json` are added unless `params` already
    /// sets them.
    pub async fn wiki_request(&self, params: &[(&str, &str)]) -> Result<Value, Error> {
        self.wiki_request_with_options(params, None).await
    }

    pub async fn wiki_request_with_options(
        &self,
        params: &[(&str, &str)],
        options: Option<RequestOptions>,
    ) -> Result<Value, Error> {
        self.inner
            .request_json(params, options.unwrap_or_default())
            .await
    }

    /// Resolves `title` into a [`Page`], following redirects.
    pub async fn page(&self, title: &str) -> Result<Page<'_>, Error> {
        Page::new(self, PageParams::title(title)).await
    }

    /// Resolves `title` into a [`File`], following redirects.
    pub async fn file(&self, title: &str) -> Result<File<'_>, Error> {
        File::new(self, PageParams::title(title)).await
    }
}

struct Inner {
    http: HttpClient,
    api_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    user_agent: HeaderValue,
}

impl Inner {
    fn new(options: ClientOptions) -> Result<Self, Error> {
        let api_url_str = options.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let api_url = Url::parse(api_url_str)?;

        let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let http = HttpClient::builder().build()?;
        let user_agent = match options.user_agent {
            Some(ua) => HeaderValue::from_str(&ua)?,
            None => HeaderValue::from_str(&format!("mediawiki-rs/{}", env!("CARGO_PKG_VERSION")))?,
        };

        Ok(Self {
            http,
            api_url,
            timeout,
            default_headers: options.default_headers,
            user_agent,
        })
    }

    fn make_headers(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, self.user_agent.clone());

        for (name, value) in self.default_headers.iter() {
            headers.insert(name, value.clone());
        }
        for (name, value) in options.headers.iter() {
            headers.insert(name, value.clone());
        }
        headers
    }

    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut qp = url.query_pairs_mut();
            if !params.iter().any(|(k, _)| *k == "action") {
                qp.append_pair("action", "query");
            }
            if !params.iter().any(|(k, _)| *k == "format") {
                qp.append_pair("format", "json");
            }
            for (k, v) in params {
                qp.append_pair(k, v);
            }
        }
        url
    }

    async fn request_json(
        &self,
        params: &[(&str, &str)],
        options: RequestOptions,
    ) -> Result<Value, Error> {
        let timeout = options.timeout.unwrap_or(self.timeout);
        let url = self.build_url(params);
        let headers = self.make_headers(&options);

        let prop = params
            .iter()
            .find(|(k, _)| *k == "prop")
            .map(|(_, v)| *v)
            .unwrap_or("-");
        tracing::debug!(prop, url = %url, "mediawiki request");

        let req = self.http.request(Method::GET, url).headers(headers);
        let resp = match tokio::time::timeout(timeout, req.send()).await {
            Err(_) => return Err(Error::Timeout),
            Ok(Err(err)) if err.is_timeout() => return Err(Error::Timeout),
            Ok(Err(err)) => return Err(Error::Transport(err)),
            Ok(Ok(resp)) => resp,
        };

        let status = resp.status();
        let request_id = resp
            .headers()
            .get(HEADER_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(Error::Http(http_error(status, request_id, &bytes)));
        }

        let json = serde_json::from_slice::<Value>(&bytes)?;
        if let Some((code, info)) = extract_api_error(&json) {
            tracing::warn!(%code, %info, request_id = request_id.as_deref(), "mediawiki api error");
            return Err(Error::Api { code, info });
        }
        Ok(json)
    }
}

fn http_error(status: StatusCode, request_id: Option<String>, body: &[u8]) -> HttpApiError {
    let json = serde_json::from_slice::<Value>(body).ok();
    let text = String::from_utf8_lossy(body).to_string();
    let message = json
        .as_ref()
        .and_then(extract_api_error)
        .map(|(code, info)| format!("{code}: {info}"))
        .or_else(|| (!text.is_empty()).then_some(text));
    HttpApiError::from(ApiError {
        status,
        request_id,
        message,
        body: json,
    })
}

/// Pulls `error.code` and `error.info` out of a MediaWiki error payload.
fn extract_api_error(json: &Value) -> Option<(String, String)> {
    let error = json.as_object()?.get("error")?.as_object()?;
    let code = error
        .get("code")
        .and_then(|c| c.as_str())
        .unwrap_or("unknown")
        .to_string();
    let info = error
        .get("info")
        .and_then(|i| i.as_str())
        .unwrap_or_default()
        .to_string();
    Some((code, info))
}
