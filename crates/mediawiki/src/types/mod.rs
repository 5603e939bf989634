pub mod imageinfo;
pub mod page;
