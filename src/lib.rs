//! Bitmap to firmware asset converter.
//!
//! # Text Output
//!
//! Every pixel is quantized to a 4-bit palette index and two indices are
//! packed per byte, high nibble first. Pixels are walked column by column:
//!
//! ```text
//!         x=0   x=1   x=2
//!        ┌─────┬─────┬─────┐
//!   y=0  │  0  │  3  │  6  │
//!   y=1  │  1  │  4  │  7  │
//!   y=2  │  2  │  5  │  8  │
//!        └─────┴─────┴─────┘
//! ```
//!
//! ```c
//! extern const uint8_t name[] =
//! {	3, 3,	// width, height
//! 	0x01, 0x23, 0x45, 0x67, 0x80
//! };
//! ```
//!
//! # Binary Output
//!
//! All fields are little-endian `u16`.
//!
//! ```text
//!  ┌───────┬────────┬──────────────┬──────────┬─────┐
//!  │ width │ height │ count - 1    │ RGB565   │ ... │
//!  └───────┴────────┴──────────────┴──────────┴─────┘
//!                    └──────── one run ──────┘
//! ```
//!
//! Rows are scanned from the last one up to the first, each row left to right.
//! A run covers at most 65536 pixels, so `count - 1` always fits in 16 bits.
//! The stream carries no pixel count; the decoder derives it from the header.
//!
//! # RGB565 Output
//!
//! [`Format::Rgb565`] and [`Format::Raw`] list one RGB565 word per pixel in
//! the column order above, as a `uint16_t` C array or as little-endian words
//! after the same size header. [`Format::Rgb565Rle`] writes the binary run
//! pairs as a `uint16_t` C array instead.

#[macro_use]
extern crate log;

pub mod bitmap;
mod carray;
mod derle;
mod error;
mod format;
mod palette;
mod rle;
mod words;

pub use carray::{encode_text, variable_name, CArray};
pub use derle::{decode, Decoded};
pub use error::{Error, Result};
pub use format::Format;
pub use palette::{rgb565, Palette};
pub use rle::{encode_binary, Rle};
pub use words::{encode_raw, encode_rgb565_text, identifier, HexWords};

/// longest run a single pair can describe
const MAX_RUN: u32 = 1 << 16;
/// pixels per line of C source
const PIXELS_PER_LINE: usize = 24;
