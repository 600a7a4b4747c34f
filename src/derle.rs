use crate::{Error, Result};

/// A binary stream expanded back into RGB565 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub width: u16,
    pub height: u16,
    /// pixels in stream order: bottom row first, each row left to right
    pub pixels: Vec<u16>,
}

struct DeRle {
    repeats: Option<u16>,
    pixels: Vec<u16>,
}

impl DeRle {
    fn new(capacity: usize) -> DeRle {
        DeRle {
            repeats: None,
            pixels: Vec::with_capacity(capacity),
        }
    }

    /// Feeds one little-endian word, alternating between count and color.
    #[inline(always)]
    fn update(&mut self, word: u16) {
        match self.repeats.take() {
            None => self.repeats = Some(word),
            Some(repeats) => {
                let count = repeats as usize + 1;
                trace!("decode run: count={count}, color={word:#06x}");
                self.pixels.extend(std::iter::repeat(word).take(count));
            }
        }
    }

    fn finalize(self) -> Result<Vec<u16>> {
        if self.repeats.is_some() {
            return Err(Error::Malformed("run count without color"));
        }
        Ok(self.pixels)
    }
}

/// Expands a stream produced by [`encode_binary`](crate::encode_binary).
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    if bytes.len() < 4 {
        return Err(Error::Malformed("missing size header"));
    }
    let (header, body) = bytes.split_at(4);
    let width = u16::from_le_bytes([header[0], header[1]]);
    let height = u16::from_le_bytes([header[2], header[3]]);
    let expected = width as usize * height as usize;

    let words = body.chunks_exact(2);
    if !words.remainder().is_empty() {
        return Err(Error::Malformed("odd trailing byte"));
    }
    let mut derle = DeRle::new(expected);
    for word in words {
        derle.update(u16::from_le_bytes([word[0], word[1]]));
        if derle.pixels.len() > expected {
            return Err(Error::Malformed("more pixels than the header announces"));
        }
    }
    let pixels = derle.finalize()?;
    if pixels.len() != expected {
        return Err(Error::Malformed("fewer pixels than the header announces"));
    }
    debug!("decoded {width}x{height} from {} bytes", bytes.len());
    Ok(Decoded {
        width,
        height,
        pixels,
    })
}
