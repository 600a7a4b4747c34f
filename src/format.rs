use crate::words::{encode_raw, encode_rgb565_text, identifier};
use crate::{encode_binary, encode_text, variable_name, Error, Palette, Result};
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `uint8_t` array of packed 4-bit palette indices
    #[default]
    Nibbles,
    /// binary run-length encoded RGB565
    Rle,
    /// `uint16_t` array of RGB565 pixels
    Rgb565,
    /// `uint16_t` array of run-length encoded RGB565
    Rgb565Rle,
    /// binary RGB565 pixels
    Raw,
}

impl Format {
    const NAMES: [(&'static str, Format); 5] = [
        ("nibbles", Format::Nibbles),
        ("rle", Format::Rle),
        ("rgb565", Format::Rgb565),
        ("rgb565-rle", Format::Rgb565Rle),
        ("raw", Format::Raw),
    ];

    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, format)| *format == self)
            .map_or("", |(name, _)| *name)
    }

    /// Binary formats only ever convert a single image.
    pub fn is_binary(self) -> bool {
        matches!(self, Format::Rle | Format::Raw)
    }

    /// Formats that write next to the input when no output file is given.
    pub fn writes_beside_input(self) -> bool {
        matches!(self, Format::Rgb565 | Format::Rgb565Rle | Format::Raw)
    }

    /// `icons/logo.bmp` becomes `icons/logo.h`, or `icons/logo.bin` for binary output.
    pub fn output_path(self, input: &Path) -> PathBuf {
        input.with_extension(if self.is_binary() { "bin" } else { "h" })
    }

    /// Converts one decoded image read from `path`.
    pub fn convert<W: io::Write>(
        self,
        image: &RgbaImage,
        path: &Path,
        palette: &Palette,
        writer: W,
    ) -> Result<W> {
        match self {
            Format::Nibbles => encode_text(image, &variable_name(path), palette, writer),
            Format::Rle => encode_binary(image, writer),
            Format::Rgb565 => encode_rgb565_text(image, &identifier(path), false, writer),
            Format::Rgb565Rle => encode_rgb565_text(image, &identifier(path), true, writer),
            Format::Raw => encode_raw(image, writer),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, format)| *format)
            .ok_or_else(|| Error::UnknownFormat(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::Format;
    use crate::{Error, Palette};
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};

    #[test]
    fn test_format_names() {
        for name in ["nibbles", "rle", "rgb565", "rgb565-rle", "raw"] {
            let format: Format = name.parse().unwrap();
            assert_eq!(format.name(), name);
        }
        assert_eq!("RGB565".parse::<Format>().unwrap(), Format::Rgb565);
        assert!(matches!(
            "png".parse::<Format>(),
            Err(Error::UnknownFormat(name)) if name == "png"
        ));
        assert_eq!(Format::default(), Format::Nibbles);
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            Format::Rgb565.output_path(Path::new("icons/logo.bmp")),
            PathBuf::from("icons/logo.h")
        );
        assert_eq!(
            Format::Raw.output_path(Path::new("icons/logo.bmp")),
            PathBuf::from("icons/logo.bin")
        );
        assert!(Format::Raw.is_binary() && Format::Rle.is_binary());
        assert!(!Format::Rgb565Rle.is_binary());
        assert!(!Format::Nibbles.writes_beside_input() && !Format::Rle.writes_beside_input());
    }

    #[test]
    fn test_convert_names_arrays_per_format() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let path = Path::new("dir/heat-bed_21h.bmp");
        let palette = Palette::PANELDUE;

        let out = Format::Nibbles.convert(&image, path, &palette, vec![]).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("extern const uint8_t heat-bed[] =\n"));

        let out = Format::Rgb565Rle.convert(&image, path, &palette, vec![]).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("extern const uint16_t heatbed_21h[] =\n"));
        assert!(out.contains("\t0x0000, 0xffff\n};\n"));

        let out = Format::Rle.convert(&image, path, &palette, vec![]).unwrap();
        assert_eq!(hex::decode("010001000000ffff").unwrap(), out);
    }
}
