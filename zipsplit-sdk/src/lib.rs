/// Extension given to every archive written by the [`plugins::archiver::ZipArchiver`].
pub const ARCHIVE_EXTENSION: &str = "zip";

pub mod context;
pub mod engine;
pub mod error;
pub mod plugins;
pub mod resource;
