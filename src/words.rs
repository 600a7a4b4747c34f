use crate::{rgb565, Error, Result, Rle};
use image::RgbaImage;
use std::io;
use std::path::Path;

/// Characters after which the next group starts on a fresh line.
const LINE_THRESHOLD: usize = 80;

/// Builds a C identifier from the file stem, dropping every character
/// outside `[A-Za-z0-9_]`.
pub fn identifier(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Formats little-endian 16-bit words as `0x%04x` literals joined by `, `.
///
/// Words are handled in groups of `group`: a line break is only inserted in
/// front of a group, once the current line is longer than 80 characters.
pub struct HexWords<W> {
    group: usize,
    words: usize,
    line_len: usize,
    low: Option<u8>,
    writer: W,
}

impl<W: io::Write> HexWords<W> {
    pub fn new(writer: W, group: usize) -> Self {
        debug_assert!(group > 0);
        HexWords {
            group,
            words: 0,
            line_len: 0,
            low: None,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, word: u16) -> io::Result<()> {
        if self.words != 0 {
            self.writer.write_all(b", ")?;
            self.line_len += 2;
            if self.words % self.group == 0 && self.line_len > LINE_THRESHOLD {
                trace!("wrap after {} chars", self.line_len);
                self.writer.write_all(b"\n\t")?;
                self.line_len = 0;
            }
        }
        write!(self.writer, "0x{word:04x}")?;
        self.line_len += 6;
        self.words += 1;
        Ok(())
    }

    pub fn finalize(self) -> io::Result<W> {
        if self.low.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "dangling half word",
            ));
        }
        Ok(self.writer)
    }
}

impl<W: io::Write> io::Write for HexWords<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            match self.low.take() {
                None => self.low = Some(*byte),
                Some(low) => self.update(u16::from_le_bytes([low, *byte]))?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Writes `image` as a `uint16_t` C array of RGB565 values.
///
/// Uncompressed output lists every pixel column by column. Compressed output
/// lists `count - 1, color` pairs in the same order as
/// [`encode_binary`](crate::encode_binary).
pub fn encode_rgb565_text<W: io::Write>(
    image: &RgbaImage,
    name: &str,
    compress: bool,
    mut writer: W,
) -> Result<W> {
    let (width, height) = image.dimensions();
    debug!("rgb565 array {name}: {width}x{height}, compress {compress}");
    writeln!(writer, "// File generated by bmp2c")?;
    writeln!(writer)?;
    writeln!(writer, "#include <cstdint>")?;
    writeln!(writer)?;
    writeln!(writer, "extern const uint16_t {name}[] =")?;
    writeln!(writer, "{{")?;
    write!(writer, "\t{width}, {height},\t\t\t// width and height in pixels\n\t")?;

    let mut writer = if compress {
        let mut rle = Rle::new(HexWords::new(writer, 2));
        for y in (0..height).rev() {
            for x in 0..width {
                let [r, g, b, _] = image.get_pixel(x, y).0;
                rle.update(rgb565(r, g, b))?;
            }
        }
        rle.finalize()?.finalize()?
    } else {
        let mut words = HexWords::new(writer, 1);
        for x in 0..width {
            for y in 0..height {
                let [r, g, b, _] = image.get_pixel(x, y).0;
                words.update(rgb565(r, g, b))?;
            }
        }
        words.finalize()?
    };
    writer.write_all(b"\n};\n\n")?;
    Ok(writer)
}

/// Writes the size header followed by one little-endian RGB565 word per
/// pixel, column by column.
pub fn encode_raw<W: io::Write>(image: &RgbaImage, mut writer: W) -> Result<W> {
    let (width, height) = image.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(Error::TooLarge { width, height });
    };
    debug!("raw header {w}x{h}");
    writer.write_all(&w.to_le_bytes())?;
    writer.write_all(&h.to_le_bytes())?;
    for x in 0..width {
        for y in 0..height {
            let [r, g, b, _] = image.get_pixel(x, y).0;
            writer.write_all(&rgb565(r, g, b).to_le_bytes())?;
        }
    }
    Ok(writer)
}
