mod client;
mod error;
pub mod resources;
pub mod types;

pub use crate::client::{ClientOptions, MediaWiki, RequestOptions};
pub use crate::error::{ApiError, Error, HttpApiError};
pub use crate::resources::file::File;
pub use crate::resources::page::{Page, PageLike, PageParams};
