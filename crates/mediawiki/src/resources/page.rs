use crate::client::MediaWiki;
use crate::error::Error;
use crate::types::page::{ExtractResponse, PageInfoResponse};

/// Read access shared by every resolved wiki page type.
pub trait PageLike {
    fn mediawiki(&self) -> &MediaWiki;

    fn title(&self) -> &str;

    fn pageid(&self) -> u64;

    /// Canonical URL of the page on the wiki.
    fn url(&self) -> &str;

    /// Title originally requested when a redirect was followed, else empty.
    fn original_title(&self) -> &str;

    fn redirect(&self) -> bool;

    fn preload(&self) -> bool;
}

/// How to identify and load a page.
#[derive(Debug, Clone)]
pub struct PageParams {
    pub title: Option<String>,
    pub pageid: Option<u64>,
    /// Follow redirects instead of failing with [`Error::Redirect`].
    pub redirect: bool,
    /// Fetch lazily loaded properties during construction.
    pub preload: bool,
    pub original_title: String,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            title: None,
            pageid: None,
            redirect: true,
            preload: false,
            original_title: String::new(),
        }
    }
}

impl PageParams {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn pageid(pageid: u64) -> Self {
        Self {
            pageid: Some(pageid),
            ..Default::default()
        }
    }
}

pub struct Page<'a> {
    mediawiki: &'a MediaWiki,
    title: String,
    pageid: u64,
    url: String,
    redirect: bool,
    preload: bool,
    original_title: String,
    content: Option<String>,
}

impl<'a> Page<'a> {
    /// Resolves the page identified by `params` against the wiki.
    ///
    /// Fails with [`Error::PageNotFound`], [`Error::Disambiguation`] or, when
    /// `params.redirect` is false, [`Error::Redirect`].
    pub async fn new(mediawiki: &'a MediaWiki, params: PageParams) -> Result<Page<'a>, Error> {
        let pageid_str = params.pageid.map(|id| id.to_string());
        let (key, requested) = match (&params.title, &pageid_str) {
            (Some(title), _) => ("titles", title.as_str()),
            (None, Some(id)) => ("pageids", id.as_str()),
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "either a title or a pageid must be specified".to_string(),
                ))
            }
        };
        // `|` separates multiple values in the API; a title may name one page.
        if key == "titles" && requested.contains('|') {
            return Err(Error::InvalidArgument(format!(
                "title {requested:?} contains '|'"
            )));
        }

        let mut query = vec![
            ("prop", "info|pageprops"),
            ("inprop", "url"),
            ("ppprop", "disambiguation"),
            (key, requested),
        ];
        if params.redirect {
            query.push(("redirects", "1"));
        }

        let raw = mediawiki.wiki_request(&query).await?;
        let resp: PageInfoResponse = serde_json::from_value(raw)
            .map_err(|e| Error::MalformedResponse(format!("page info: {e}")))?;

        if resp.query.pages.len() != 1 {
            return Err(Error::MalformedResponse(format!(
                "page info: expected one page, got {}",
                resp.query.pages.len()
            )));
        }
        let info = resp
            .query
            .pages
            .into_values()
            .next()
            .ok_or_else(|| Error::MalformedResponse("page info: no pages".to_string()))?;

        if info.is_missing() {
            return Err(Error::PageNotFound(requested.to_string()));
        }
        if info.is_redirect() && !params.redirect {
            return Err(Error::Redirect {
                title: info.title.unwrap_or_else(|| requested.to_string()),
            });
        }
        if info.is_disambiguation() {
            return Err(Error::Disambiguation {
                title: info.title.unwrap_or_else(|| requested.to_string()),
                url: info.fullurl.unwrap_or_default(),
            });
        }

        let pageid = info
            .pageid
            .ok_or_else(|| Error::MalformedResponse("page info: missing pageid".to_string()))?;
        let title = info
            .title
            .ok_or_else(|| Error::MalformedResponse("page info: missing title".to_string()))?;

        let original_title = if !params.original_title.is_empty() {
            params.original_title
        } else if let Some(first) = resp.query.redirects.first() {
            params.title.unwrap_or_else(|| first.from.clone())
        } else {
            String::new()
        };

        let mut page = Page {
            mediawiki,
            title,
            pageid,
            url: info.fullurl.unwrap_or_default(),
            redirect: params.redirect,
            preload: params.preload,
            original_title,
            content: None,
        };

        if page.preload {
            page.content().await?;
        }
        Ok(page)
    }

    /// Plain-text content of the page, fetched on first call.
    pub async fn content(&mut self) -> Result<&str, Error> {
        if self.content.is_none() {
            let raw = self
                .mediawiki
                .wiki_request(&[
                    ("prop", "extracts"),
                    ("explaintext", "1"),
                    ("titles", self.title.as_str()),
                ])
                .await?;
            let resp: ExtractResponse = serde_json::from_value(raw)
                .map_err(|e| Error::MalformedResponse(format!("extracts: {e}")))?;
            let extract = resp
                .query
                .pages
                .get(&self.pageid.to_string())
                .and_then(|p| p.extract.clone())
                .ok_or_else(|| {
                    Error::MalformedResponse(format!("no extract for pageid {}", self.pageid))
                })?;
            tracing::debug!(pageid = self.pageid, "page content loaded");
            self.content = Some(extract);
        }
        Ok(self.content.as_deref().unwrap_or_default())
    }
}

impl PageLike for Page<'_> {
    fn mediawiki(&self) -> &MediaWiki {
        self.mediawiki
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn pageid(&self) -> u64 {
        self.pageid
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn original_title(&self) -> &str {
        &self.original_title
    }

    fn redirect(&self) -> bool {
        self.redirect
    }

    fn preload(&self) -> bool {
        self.preload
    }
}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("title", &self.title)
            .field("pageid", &self.pageid)
            .field("url", &self.url)
            .field("original_title", &self.original_title)
            .finish_non_exhaustive()
    }
}
