use crate::client::MediaWiki;
use crate::error::Error;
use crate::resources::page::{Page, PageLike, PageParams};
use crate::types::imageinfo::ImageInfoResponse;

/// A file page (`File:` namespace) on the wiki.
///
/// Identity comes from the wrapped [`Page`]; the direct file URL is fetched
/// with an `imageinfo` query the first time [`File::file_url`] is called and
/// kept for the life of the value. The cached URL cannot be replaced from
/// outside:
///
/// ```compile_fail
/// # async fn demo(wiki: &mediawiki::MediaWiki) -> Result<(), mediawiki::Error> {
/// let mut file = wiki.file("File:Example.png").await?;
/// file.file_url = Some("https://example.org/other.png".to_string());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct File<'a> {
    page: Page<'a>,
    file_url: Option<String>,
}

impl<'a> File<'a> {
    /// Resolves the file page identified by `params`.
    ///
    /// Errors are those of [`Page::new`].
    pub async fn new(mediawiki: &'a MediaWiki, params: PageParams) -> Result<File<'a>, Error> {
        let page = Page::new(mediawiki, params).await?;
        let mut file = File {
            page,
            file_url: None,
        };
        if file.page.preload() {
            file.file_url().await?;
        }
        Ok(file)
    }

    /// Direct URL to the file.
    ///
    /// Issues a single request on first call; later calls return the cached
    /// value. A response without image info for this page yields
    /// [`Error::MalformedResponse`].
    pub async fn file_url(&mut self) -> Result<&str, Error> {
        if self.file_url.is_none() {
            let url = self.fetch_file_url().await?;
            tracing::debug!(pageid = self.page.pageid(), %url, "file url loaded");
            self.file_url = Some(url);
        }
        Ok(self.file_url.as_deref().unwrap_or_default())
    }

    /// The cached file URL, if it has been fetched.
    pub fn cached_file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn page(&self) -> &Page<'a> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<'a> {
        &mut self.page
    }

    async fn fetch_file_url(&self) -> Result<String, Error> {
        let raw = self
            .page
            .mediawiki()
            .wiki_request(&[
                ("prop", "imageinfo"),
                ("titles", self.page.title()),
                ("iiprop", "url"),
            ])
            .await?;
        let resp: ImageInfoResponse = serde_json::from_value(raw)
            .map_err(|e| Error::MalformedResponse(format!("imageinfo: {e}")))?;

        let pageid = self.page.pageid();
        let page = resp.query.pages.get(&pageid.to_string()).ok_or_else(|| {
            Error::MalformedResponse(format!("imageinfo: no entry for pageid {pageid}"))
        })?;
        // The current revision is listed first.
        page.imageinfo
            .as_deref()
            .and_then(|infos| infos.first())
            .and_then(|info| info.url.clone())
            .ok_or_else(|| {
                Error::MalformedResponse(format!("imageinfo: no url for pageid {pageid}"))
            })
    }
}

impl PageLike for File<'_> {
    fn mediawiki(&self) -> &MediaWiki {
        self.page.mediawiki()
    }

    fn title(&self) -> &str {
        self.page.title()
    }

    fn pageid(&self) -> u64 {
        self.page.pageid()
    }

    fn url(&self) -> &str {
        self.page.url()
    }

    fn original_title(&self) -> &str {
        self.page.original_title()
    }

    fn redirect(&self) -> bool {
        self.page.redirect()
    }

    fn preload(&self) -> bool {
        self.page.preload()
    }
}
