use mediawiki::{ClientOptions, MediaWiki, PageLike};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), mediawiki::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mediawiki=debug")),
        )
        .init();

    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "File:Rust programming language black logo.svg".to_string());

    let wiki = MediaWiki::new(ClientOptions::default())?;
    let mut file = wiki.file(&title).await?;

    println!("title:    {}", file.title());
    println!("pageid:   {}", file.pageid());
    println!("page:     {}", file.url());
    println!("file url: {}", file.file_url().await?);
    Ok(())
}
