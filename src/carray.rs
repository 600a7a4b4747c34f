use crate::{Palette, Result, PIXELS_PER_LINE};
use image::RgbaImage;
use std::io;
use std::path::Path;

/// Suffixes stripped from file names when naming the C array.
const NAME_SUFFIXES: [&str; 2] = ["_21h.bmp", "_30h.bmp"];

/// Derives the C identifier from an input path.
pub fn variable_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    NAME_SUFFIXES
        .iter()
        .fold(file_name, |name, suffix| match name.strip_suffix(suffix) {
            Some(stripped) => stripped.to_owned(),
            None => name,
        })
}

/// Packs palette indices into `0xHL` byte literals.
pub struct CArray<W> {
    pixels: usize,
    writer: W,
}

impl<W: io::Write> CArray<W> {
    pub fn new(writer: W) -> Self {
        CArray { pixels: 0, writer }
    }

    #[inline(always)]
    pub fn update(&mut self, index: u8) -> io::Result<()> {
        debug_assert!(index < 16);
        if self.pixels % 2 == 0 {
            if self.pixels != 0 {
                self.writer.write_all(b", ")?;
                if self.pixels % PIXELS_PER_LINE == 0 {
                    self.writer.write_all(b"\n\t")?;
                }
            }
            self.writer.write_all(b"0x")?;
        }
        write!(self.writer, "{:x}", index & 0x0F)?;
        self.pixels += 1;
        Ok(())
    }

    /// Pads an unfinished byte and hands back the writer.
    pub fn finalize(mut self) -> io::Result<W> {
        if self.pixels % 2 == 1 {
            trace!("pad odd pixel count {}", self.pixels);
            self.writer.write_all(b"0")?;
        }
        Ok(self.writer)
    }
}

/// Writes `image` as a C array declaration named `name`.
///
/// Pixels are emitted column by column, top to bottom within a column.
pub fn encode_text<W: io::Write>(
    image: &RgbaImage,
    name: &str,
    palette: &Palette,
    mut writer: W,
) -> Result<W> {
    let (width, height) = image.dimensions();
    debug!("text array {name}: {width}x{height}, palette {}", palette.name());
    writeln!(writer, "extern const uint8_t {name}[] =")?;
    write!(writer, "{{\t{width}, {height},\t// width, height\n\t")?;

    let mut array = CArray::new(writer);
    for x in 0..width {
        for y in 0..height {
            array.update(palette.index_of(*image.get_pixel(x, y)))?;
        }
    }
    let mut writer = array.finalize()?;
    writer.write_all(b"\n};\n")?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::{encode_text, variable_name, CArray};
    use crate::Palette;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Setup function that is only run once, even if called multiple times.
    fn setup() {
        INIT.call_once(|| {
            let _ = pretty_env_logger::try_init();
        });
    }

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_variable_name() {
        let cases = [
            ("foo_21h.bmp", "foo"),
            ("foo_30h.bmp", "foo"),
            ("foo.bmp", "foo.bmp"),
            ("icons/heat_21h.bmp", "heat"),
            ("/abs/path/logo_30h.bmp", "logo"),
            ("foo_30h.bmp_21h.bmp", "foo"),
            ("foo_21h.bmp_30h.bmp", "foo_21h.bmp"),
        ];
        for (path, expected) in cases {
            assert_eq!(variable_name(Path::new(path)), expected, "path {path}");
        }
    }

    #[test]
    fn test_carray_packing() {
        setup();
        let cases: [(&[u8], &str); 5] = [
            (&[], ""),
            (&[1], "0x10"),
            (&[3, 5], "0x35"),
            (&[12, 11, 10], "0xcb, 0xa0"),
            (&[1, 2, 3, 4], "0x12, 0x34"),
        ];
        for (input, expected) in cases {
            let mut array = CArray::new(vec![]);
            for index in input {
                array.update(*index).unwrap();
            }
            let out = array.finalize().unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), expected);
        }
    }

    #[test]
    fn test_carray_wraps_every_24_pixels() {
        setup();
        let mut array = CArray::new(vec![]);
        for _ in 0..50 {
            array.update(1).unwrap();
        }
        let out = String::from_utf8(array.finalize().unwrap()).unwrap();
        let line = vec!["0x11"; 12].join(", ");
        let expected = format!("{line}, \n\t{line}, \n\t0x11");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_encode_text_scenario() {
        setup();
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, WHITE);
        image.put_pixel(1, 0, BLACK);
        let name = variable_name(Path::new("test_21h.bmp"));
        let out = encode_text(&image, &name, &Palette::PANELDUE, vec![]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "extern const uint8_t test[] =\n{\t2, 1,\t// width, height\n\t0x10\n};\n"
        );
    }

    #[test]
    fn test_encode_text_single_pixel() {
        setup();
        let image = RgbaImage::from_pixel(1, 1, Rgba([0x90, 0x90, 0x90, 255]));
        let out = encode_text(&image, "dot", &Palette::PANELDUE, vec![]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "extern const uint8_t dot[] =\n{\t1, 1,\t// width, height\n\t0xc0\n};\n"
        );
    }

    #[test]
    fn test_encode_text_column_major() {
        setup();
        // column 0 white, column 1 black, one green pixel at the bottom right
        let mut image = RgbaImage::from_pixel(2, 3, WHITE);
        for y in 0..3 {
            image.put_pixel(1, y, BLACK);
        }
        image.put_pixel(1, 2, Rgba([0x40, 0xac, 0x48, 255]));
        let out = encode_text(&image, "cols", &Palette::PANELDUE, vec![]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "extern const uint8_t cols[] =\n{\t2, 3,\t// width, height\n\t0x11, 0x10, 0x0b\n};\n"
        );
    }
}
