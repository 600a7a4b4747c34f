use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("bitmap decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// width or height does not fit the 16-bit header fields
    #[error("image is {width}x{height}, binary output is limited to 65535x65535")]
    TooLarge { width: u32, height: u32 },

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    #[error("malformed stream: {0}")]
    Malformed(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
