use crate::{rgb565, Error, Result, MAX_RUN};
use image::RgbaImage;
use std::fmt::Debug;
use std::{fmt, io};

pub struct Rle<W> {
    status: RleStatus,
    writer: W,
}

#[derive(Copy, Clone)]
enum RleStatus {
    Run { color: u16, counter: u32 },
    Wait,
}

impl<W: io::Write> Rle<W> {
    pub fn new(writer: W) -> Self {
        Rle {
            status: RleStatus::Wait,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, color: u16) -> io::Result<()> {
        trace!("update color {color:#06x}");
        match self.status {
            RleStatus::Wait => {
                self.status = RleStatus::Run { color, counter: 1 };
                trace!("transit to {:?}", self.status);
            }
            RleStatus::Run { color: last, counter } => {
                if last == color && counter < MAX_RUN {
                    self.status = RleStatus::Run {
                        color,
                        counter: counter + 1,
                    };
                } else {
                    if counter == MAX_RUN {
                        trace!("cut! counter: {counter}");
                    }
                    self.flush_run()?;
                    self.status = RleStatus::Run { color, counter: 1 };
                    trace!("transit to {:?}", self.status);
                }
            }
        }
        Ok(())
    }

    #[inline(always)]
    fn flush_run(&mut self) -> io::Result<()> {
        if let Some(encode) = self.status.try_encode() {
            self.writer.write_all(&encode)?;
        }
        self.status = RleStatus::Wait;
        Ok(())
    }

    /// Writes the pending run and hands back the writer.
    pub fn finalize(mut self) -> io::Result<W> {
        trace!("last run: {:?}", self.status);
        self.flush_run()?;
        Ok(self.writer)
    }
}

impl RleStatus {
    #[inline(always)]
    fn try_encode(self) -> Option<[u8; 4]> {
        match self {
            RleStatus::Wait => None,
            RleStatus::Run { color, counter } => {
                debug_assert!(counter >= 1);
                debug_assert!(counter <= MAX_RUN);
                let repeats = ((counter - 1) as u16).to_le_bytes();
                let color = color.to_le_bytes();
                trace!("encode run {:?}", self);
                Some([repeats[0], repeats[1], color[0], color[1]])
            }
        }
    }
}

impl Debug for RleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleStatus::Run { color, counter } => f
                .debug_struct("Run")
                .field("color", &format!("{color:#06x}"))
                .field("counter", &counter)
                .finish(),
            RleStatus::Wait => f.write_str("Wait"),
        }
    }
}

/// Writes the size header followed by the run-length encoded pixels.
///
/// Rows are visited from the bottom up, each row left to right.
pub fn encode_binary<W: io::Write>(image: &RgbaImage, mut writer: W) -> Result<W> {
    let (width, height) = image.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(Error::TooLarge { width, height });
    };
    debug!("binary header {w}x{h}");
    writer.write_all(&w.to_le_bytes())?;
    writer.write_all(&h.to_le_bytes())?;

    let mut rle = Rle::new(writer);
    for y in (0..height).rev() {
        for x in 0..width {
            let [r, g, b, _] = image.get_pixel(x, y).0;
            rle.update(rgb565(r, g, b))?;
        }
    }
    // the pending run ends at the last column of row 0
    Ok(rle.finalize()?)
}
