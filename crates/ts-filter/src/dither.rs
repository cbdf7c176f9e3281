//! Tramage ordonné 2×2 appliqué à la luminance.

use ts_core::{DecodedFrame, PipelineError, RasterBuffer};

use crate::expand::grey_raster;
use crate::luminance::luma;
use crate::store::clamped;

/// Matrice de Bayer 2x2, indexée `[y % 2][x % 2]`.
pub const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

/// Décalage ajouté à la luminance en (x, y) : `(d / 4) * 255`.
///
/// # Example
/// ```
/// use ts_filter::dither::offset_at;
/// assert_eq!(offset_at(0, 0), 0.0);
/// assert_eq!(offset_at(1, 0), 127.5);
/// assert_eq!(offset_at(2, 1), 191.25);
/// ```
#[inline(always)]
#[must_use]
pub fn offset_at(x: u32, y: u32) -> f64 {
    let d = f64::from(BAYER_2X2[(y % 2) as usize][(x % 2) as usize]);
    (d / 4.0) * 255.0
}

/// Luminance + motif 2×2 tuilé sur toute l'image.
///
/// Values above 255 are expected and saturate in the byte store.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
pub fn ordered_dither(frame: &DecodedFrame) -> Result<RasterBuffer, PipelineError> {
    frame.validate()?;
    Ok(grey_raster(frame, |x, y, (r, g, b)| {
        let grey = luma(f64::from(r), f64::from(g), f64::from(b));
        clamped(grey + offset_at(x, y))
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn black_frame_shows_the_pattern() {
        let out = ordered_dither(&DecodedFrame::solid(2, 2, (0, 0, 0))).unwrap();
        assert_eq!(out.pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(out.pixel(1, 0), (128, 128, 128, 255));
        assert_eq!(out.pixel(0, 1), (191, 191, 191, 255));
        assert_eq!(out.pixel(1, 1), (64, 64, 64, 255));
    }

    #[test]
    fn offset_depends_only_on_parity() {
        // Two frames share the same dark 2×2-periodic window and differ
        // everywhere else; matching-parity positions must carry equal offsets.
        let (w, h) = (6, 4);
        let mut a = DecodedFrame::solid(w, h, (0, 0, 0));
        let mut b = DecodedFrame::solid(w, h, (0, 0, 0));
        for y in 0..h {
            for x in 0..w {
                let idx = (y * w + x) as usize * 3;
                if x >= 2 || y >= 2 {
                    a.rgb[idx..idx + 3].copy_from_slice(&[40, 40, 40]);
                    b.rgb[idx..idx + 3].copy_from_slice(&[20, 20, 20]);
                }
            }
        }
        let out_a = ordered_dither(&a).unwrap();
        let out_b = ordered_dither(&b).unwrap();
        for y in 0..h {
            for x in 0..w {
                let base_a = clamped(luma(
                    f64::from(a.rgb_at(x, y).0),
                    f64::from(a.rgb_at(x, y).1),
                    f64::from(a.rgb_at(x, y).2),
                ));
                let base_b = clamped(luma(
                    f64::from(b.rgb_at(x, y).0),
                    f64::from(b.rgb_at(x, y).1),
                    f64::from(b.rgb_at(x, y).2),
                ));
                let off_a = i16::from(out_a.pixel(x, y).0) - i16::from(base_a);
                let off_b = i16::from(out_b.pixel(x, y).0) - i16::from(base_b);
                let window = i16::from(out_a.pixel(x % 2, y % 2).0);
                assert!((off_a - off_b).abs() <= 1, "({x},{y}): {off_a} vs {off_b}");
                assert!((off_a - window).abs() <= 1, "({x},{y}): {off_a} vs {window}");
            }
        }
    }

    #[test]
    fn bright_pixels_saturate() {
        let out = ordered_dither(&DecodedFrame::solid(2, 2, (250, 250, 250))).unwrap();
        assert_eq!(out.pixel(0, 0).0, 250);
        assert_eq!(out.pixel(1, 0).0, 255);
        assert_eq!(out.pixel(0, 1).0, 255);
        assert_eq!(out.pixel(1, 1).0, 255);
        assert!(out.is_opaque());
    }
}
