use core::fmt;

/// Which plain PNM sub-format an image uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1 — bitmap (PBM), one on/off value per pixel.
    BiLevel,
    /// P2 — grayscale (PGM), one intensity per pixel.
    Grayscale,
    /// P3 — color (PPM), red/green/blue per pixel.
    Rgb,
}

impl PnmFormat {
    /// Numeric tag following the `P` in the magic line.
    pub fn tag(self) -> u8 {
        match self {
            Self::BiLevel => 1,
            Self::Grayscale => 2,
            Self::Rgb => 3,
        }
    }

    /// Inverse of [`tag`](Self::tag). Binary tags (4..=7) are not plain formats.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::BiLevel),
            2 => Some(Self::Grayscale),
            3 => Some(Self::Rgb),
            _ => None,
        }
    }

    /// Whether the header carries a max-value line.
    pub fn has_max_value(self) -> bool {
        !matches!(self, Self::BiLevel)
    }

    /// Text tokens per pixel in the data section.
    pub fn samples_per_pixel(self) -> usize {
        match self {
            Self::BiLevel | Self::Grayscale => 1,
            Self::Rgb => 3,
        }
    }

    /// The "off" value every cell of a fresh canvas holds.
    pub fn background(self) -> Pixel {
        match self {
            Self::BiLevel => Pixel::Bit(false),
            Self::Grayscale => Pixel::Gray(0),
            Self::Rgb => Pixel::Rgb {
                red: 0,
                green: 0,
                blue: 0,
            },
        }
    }

    /// The ink used by line drawing: `on` for bitmaps, `max_value` on
    /// every channel otherwise.
    pub fn foreground(self, max_value: u16) -> Pixel {
        match self {
            Self::BiLevel => Pixel::Bit(true),
            Self::Grayscale => Pixel::Gray(max_value),
            Self::Rgb => Pixel::Rgb {
                red: max_value,
                green: max_value,
                blue: max_value,
            },
        }
    }
}

/// A single cell. The variant always matches the owning image's [`PnmFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pixel {
    /// Bitmap cell; `true` is foreground (black).
    Bit(bool),
    /// Grayscale intensity in `0..=max_value`.
    Gray(u16),
    /// Color cell, each channel in `0..=max_value`.
    Rgb { red: u16, green: u16, blue: u16 },
}

impl Pixel {
    pub fn format(&self) -> PnmFormat {
        match self {
            Self::Bit(_) => PnmFormat::BiLevel,
            Self::Gray(_) => PnmFormat::Grayscale,
            Self::Rgb { .. } => PnmFormat::Rgb,
        }
    }

    /// True for any non-background cell.
    pub fn is_on(&self) -> bool {
        match *self {
            Self::Bit(on) => on,
            Self::Gray(v) => v != 0,
            Self::Rgb { red, green, blue } => (red | green | blue) != 0,
        }
    }

    /// Red, green and blue on a `0..=max_value` scale.
    ///
    /// Bitmap cells map `on` to black and `off` to `max_value` white,
    /// grayscale replicates the intensity.
    pub fn channels(&self, max_value: u16) -> [u16; 3] {
        match *self {
            Self::Bit(true) => [0; 3],
            Self::Bit(false) => [max_value; 3],
            Self::Gray(v) => [v; 3],
            Self::Rgb { red, green, blue } => [red, green, blue],
        }
    }

    pub fn red(&self, max_value: u16) -> u16 {
        self.channels(max_value)[0]
    }

    pub fn green(&self, max_value: u16) -> u16 {
        self.channels(max_value)[1]
    }

    pub fn blue(&self, max_value: u16) -> u16 {
        self.channels(max_value)[2]
    }

    /// Largest channel value stored in the cell (1 for an `on` bit).
    pub(crate) fn peak(&self) -> u16 {
        match *self {
            Self::Bit(on) => u16::from(on),
            Self::Gray(v) => v,
            Self::Rgb { red, green, blue } => red.max(green).max(blue),
        }
    }
}

/// Plain-text encoding of the cell: `1`/`0`, the intensity, or `r g b`.
impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Bit(on) => f.write_str(if on { "1" } else { "0" }),
            Self::Gray(v) => write!(f, "{v}"),
            Self::Rgb { red, green, blue } => write!(f, "{red} {green} {blue}"),
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB<u16>> for Pixel {
    fn from(px: rgb::RGB<u16>) -> Self {
        Pixel::Rgb {
            red: px.r,
            green: px.g,
            blue: px.b,
        }
    }
}

#[cfg(feature = "rgb")]
impl Pixel {
    /// Typed view of [`channels`](Self::channels).
    pub fn to_rgb16(&self, max_value: u16) -> rgb::RGB<u16> {
        let [r, g, b] = self.channels(max_value);
        rgb::RGB::new(r, g, b)
    }
}
