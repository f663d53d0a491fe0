//! Heuristic swatch-color extraction from product photos.
//!
//! Product photography is inconsistent — flat painted swatches, dropper
//! bottles, side-lit artist composites — so no single fixed pixel is
//! reliable. Instead, a policy-supplied layout names candidate regions;
//! each is averaged over a small neighborhood, background-like regions
//! (near-white, near-black) are rejected, and the survivors compete on a
//! "plausibly paint-like" score that prefers saturated, mid-brightness
//! color. The best region wins. This is an explainable stand-in for full
//! object segmentation and has held up across four storefronts' photo
//! styles.
//!
//! Secondary sampling (the second tone of a shifting paint) reuses the
//! neighborhood averaging over off-center points but takes the FIRST
//! accepted point without scoring. The asymmetry is intentional-looking
//! but of unclear intent; it is preserved as observed and pinned by a
//! test rather than silently "fixed".

use paintdb_core::{SampleLayout, SamplePoint};

/// An averaged RGB color.
pub type Rgb = (u8, u8, u8);

/// One evaluated sample region. Transient: produced and consumed inside
/// the sampler, surfaced only for tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub rgb: Rgb,
    /// `(max - min) / max` over the averaged channels, in `[0, 1]`.
    pub saturation: f64,
    /// Mean of the averaged channels, in `[0, 255]`.
    pub brightness: f64,
    pub score: f64,
}

/// Decoded RGB pixel data for one product image.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw interleaved RGB8 data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FetchError::Decode`] if the dimensions are zero
    /// or do not match the buffer length.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, crate::FetchError> {
        let expected = width as usize * height as usize * 3;
        if width == 0 || height == 0 {
            return Err(crate::FetchError::Decode {
                reason: format!("image has degenerate dimensions {width}x{height}"),
            });
        }
        if data.len() != expected {
            return Err(crate::FetchError::Decode {
                reason: format!(
                    "pixel buffer length {} does not match {width}x{height} RGB8",
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reads the pixel at `(x, y)`, clamping out-of-bounds coordinates to
    /// the image edge.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel(&self, x: i64, y: i64) -> Rgb {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let offset = (y * self.width as usize + x) * 3;
        (self.data[offset], self.data[offset + 1], self.data[offset + 2])
    }

    /// The pixel coordinates of a fractional sample point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    fn locate(&self, point: SamplePoint) -> (i64, i64) {
        (
            (point.x * f64::from(self.width)) as i64,
            (point.y * f64::from(self.height)) as i64,
        )
    }
}

/// Mean brightness of an averaged color, in `[0, 255]`.
#[must_use]
pub fn brightness(rgb: Rgb) -> f64 {
    f64::from(u16::from(rgb.0) + u16::from(rgb.1) + u16::from(rgb.2)) / 3.0
}

/// Saturation of an averaged color: `(max - min) / max`, zero for black.
#[must_use]
pub fn saturation(rgb: Rgb) -> f64 {
    let max = rgb.0.max(rgb.1).max(rgb.2);
    let min = rgb.0.min(rgb.1).min(rgb.2);
    f64::from(max - min) / f64::from(max.max(1))
}

/// The region score: saturated, mid-brightness color ranks highest. The
/// small additive term keeps a low-saturation-but-valid region ahead of
/// no answer at all.
#[must_use]
pub fn score(saturation: f64, brightness: f64) -> f64 {
    let brightness_penalty = (brightness - 127.0).abs() / 127.0;
    saturation * (1.0 - brightness_penalty * 0.3) + 0.1
}

/// Formats an averaged color as an uppercase `"#RRGGBB"` string.
#[must_use]
pub fn hex_string(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.0, rgb.1, rgb.2)
}

/// Averages the pixels of the square neighborhood around `(cx, cy)`,
/// walking offsets `-radius..=radius` at the layout stride. Out-of-bounds
/// pixels clamp to the image edge, matching the behavior near borders.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
fn average_region(img: &PixelBuffer, cx: i64, cy: i64, radius: u32, stride: u32) -> Rgb {
    let radius = i64::from(radius);
    let stride = i64::from(stride).max(1);

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    let mut count = 0u64;

    let mut dx = -radius;
    while dx <= radius {
        let mut dy = -radius;
        while dy <= radius {
            let (pr, pg, pb) = img.pixel(cx + dx, cy + dy);
            r += u64::from(pr);
            g += u64::from(pg);
            b += u64::from(pb);
            count += 1;
            dy += stride;
        }
        dx += stride;
    }

    ((r / count) as u8, (g / count) as u8, (b / count) as u8)
}

/// Evaluates one layout point: neighborhood average plus its statistics.
#[must_use]
pub fn evaluate_point(img: &PixelBuffer, layout: &SampleLayout, point: SamplePoint) -> ColorSample {
    let (cx, cy) = img.locate(point);
    let rgb = average_region(img, cx, cy, layout.radius, layout.stride);
    let saturation = saturation(rgb);
    let brightness = brightness(rgb);
    ColorSample {
        rgb,
        saturation,
        brightness,
        score: score(saturation, brightness),
    }
}

/// Samples the representative primary color.
///
/// Every layout point is evaluated; points outside the brightness accept
/// band are rejected as background or shadow, and the highest-scoring
/// survivor wins. If every point is rejected, the single pixel at the
/// image's geometric center is returned with no scoring.
#[must_use]
pub fn sample_primary(img: &PixelBuffer, layout: &SampleLayout) -> Rgb {
    let mut best: Option<ColorSample> = None;

    for &point in &layout.points {
        let sample = evaluate_point(img, layout, point);
        if sample.brightness > layout.max_brightness || sample.brightness < layout.min_brightness {
            continue;
        }
        if best.as_ref().is_none_or(|b| sample.score > b.score) {
            best = Some(sample);
        }
    }

    match best {
        Some(sample) => sample.rgb,
        None => img.pixel(i64::from(img.width / 2), i64::from(img.height / 2)),
    }
}

/// Samples the secondary tone of a shifting paint.
///
/// Walks the off-center layout in order and returns the first point whose
/// averaged brightness falls strictly inside the accept band — no scoring
/// competition, unlike the primary sampler. Returns `None` when no point
/// qualifies.
#[must_use]
pub fn sample_secondary(img: &PixelBuffer, layout: &SampleLayout) -> Option<Rgb> {
    for &point in &layout.points {
        let sample = evaluate_point(img, layout, point);
        if sample.brightness > layout.min_brightness && sample.brightness < layout.max_brightness {
            return Some(sample.rgb);
        }
    }
    None
}

/// Outcome of color sampling for one record. `NotFound` (sampling ran or
/// was skipped, no color produced) and `Unavailable` (no image, fetch or
/// decode failure) both serialize to an empty hex but stay distinguishable
/// for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwatchColor {
    Sampled(String),
    NotFound,
    Unavailable,
}

impl SwatchColor {
    /// The hex string written into the entry; empty unless sampled.
    #[must_use]
    pub fn hex(&self) -> &str {
        match self {
            SwatchColor::Sampled(hex) => hex,
            SwatchColor::NotFound | SwatchColor::Unavailable => "",
        }
    }

    #[must_use]
    pub fn is_sampled(&self) -> bool {
        matches!(self, SwatchColor::Sampled(_))
    }
}
