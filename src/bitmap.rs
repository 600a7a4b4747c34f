//! Bitmap decoding.
//!
//! Input is always decoded as BMP regardless of the file extension, then
//! widened to 8-bit RGBA.

use crate::{Error, Result};
use image::{ImageFormat, RgbaImage};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

pub fn load<R: BufRead + Seek>(reader: R) -> Result<RgbaImage> {
    let image = image::load(reader, ImageFormat::Bmp)?;
    debug!(
        "decoded {}x{} bitmap, {:?}",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image.into_rgba8())
}

pub fn open<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    info!("reading {}", path.display());
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;
    load(BufReader::new(file))
}
