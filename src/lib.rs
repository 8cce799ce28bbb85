//! # plainpnm
//!
//! Plain-text PNM reader and writer with an editable pixel buffer.
//!
//! ## Supported Formats
//!
//! - **P1** (PBM plain) — bitmap, one `0`/`1` per pixel
//! - **P2** (PGM plain) — grayscale, max-value up to 65535
//! - **P3** (PPM plain) — RGB, max-value up to 65535
//!
//! ## Editing
//!
//! [`PnmImage`] owns the grid. It can be drawn on with
//! [`PnmImage::draw_line`], upscaled with [`PnmImage::scaled`], converted
//! between formats, and exported as RGBA bytes for display.
//!
//! ## Non-Goals
//!
//! - Binary PNM formats (P4, P5, P6, P7)
//! - Anti-aliasing or interpolating scalers
//! - Color management
//!
//! ## Usage
//!
//! ```
//! use plainpnm::{PnmFormat, PnmImage, Unstoppable};
//!
//! let mut canvas = PnmImage::of_size(4, 4, PnmFormat::BiLevel)?;
//! canvas.draw_line((0, 0), (3, 3))?;
//!
//! let text = plainpnm::encode(&canvas.scaled(2)?, Unstoppable)?;
//! let back = plainpnm::decode(&text, Unstoppable)?;
//! assert_eq!(back.width(), 8);
//! # Ok::<(), plainpnm::PnmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image;
mod info;
mod limits;
mod pixel;

pub mod pnm;
pub mod raster;

#[cfg(feature = "std")]
pub mod io;

mod decode;
mod encode;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
pub use image::{DEFAULT_MAX_VALUE, MAX_PIXELS, PnmImage};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{Pixel, PnmFormat};
pub use raster::Point;

/// Decode plain PNM text, skipping comment and blank lines.
pub fn decode(text: &str, stop: impl Stop) -> Result<PnmImage, PnmError> {
    DecodeRequest::new(text).decode(stop)
}

/// Encode an image in its own format.
pub fn encode(image: &PnmImage, stop: impl Stop) -> Result<alloc::string::String, PnmError> {
    EncodeRequest::new().encode(image, stop)
}
