use image::Rgba;

/// Packs 8-bit channels into RGB565.
#[inline(always)]
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
}

/// A fixed set of colors known to the display firmware.
///
/// Entry `i` of the table is reported as index `i + 1`. Index 0 is the
/// background and covers every color not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    colors: &'static [u16; 12],
}

impl Palette {
    /// PanelDue UI colors
    pub const PANELDUE: Palette = Palette {
        name: "paneldue",
        colors: &[
            0xffff, // 0xffffff
            0x20e4, // 0x201c20
            0xffdf, // 0xf8f8f8
            0x18e3, // 0x181c18
            0xf79e, // 0xf0f0f0
            0xc986, // 0xc83030
            0xd30c, // 0xd06060
            0xc103, // 0xc02018
            0xff52, // 0xf8e890
            0xfffb, // 0xf8fcd8
            0x4569, // 0x40ac48
            0x9492, // 0x909090
        ],
    };

    const ALL: [Palette; 1] = [Palette::PANELDUE];

    pub fn by_name(name: &str) -> Option<Palette> {
        Self::ALL
            .into_iter()
            .find(|palette| palette.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self, color: u16) -> u8 {
        self.colors
            .iter()
            .position(|&c| c == color)
            .map_or(0, |i| i as u8 + 1)
    }

    /// Quantizes a pixel; alpha is ignored.
    #[inline(always)]
    pub fn index_of(&self, pixel: Rgba<u8>) -> u8 {
        let [r, g, b, _] = pixel.0;
        self.index(rgb565(r, g, b))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::PANELDUE
    }
}
