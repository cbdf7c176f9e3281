use ts_core::{DecodedFrame, PipelineError, RasterBuffer};

use crate::expand::grey_raster;
use crate::store::clamped;

/// Poids luma BT.601.
pub const WEIGHT_R: f64 = 0.299;
/// Green luma weight.
pub const WEIGHT_G: f64 = 0.587;
/// Blue luma weight.
pub const WEIGHT_B: f64 = 0.114;

/// Luminance non arrondie : `0.299 R + 0.587 G + 0.114 B`.
///
/// # Example
/// ```
/// use ts_filter::luminance::luma;
/// assert!((luma(10.0, 20.0, 30.0) - 18.64).abs() < 1e-9);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    WEIGHT_R * r + WEIGHT_G * g + WEIGHT_B * b
}

/// Niveaux de gris : écrit la luminance dans R, G et B.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
///
/// # Example
/// ```
/// use ts_core::DecodedFrame;
/// use ts_filter::luminance::greyscale;
/// let frame = DecodedFrame::new(1, 1, vec![10, 20, 30]);
/// assert_eq!(greyscale(&frame).unwrap().rgba, vec![19, 19, 19, 255]);
/// ```
pub fn greyscale(frame: &DecodedFrame) -> Result<RasterBuffer, PipelineError> {
    frame.validate()?;
    Ok(grey_raster(frame, |_, _, (r, g, b)| {
        clamped(luma(f64::from(r), f64::from(g), f64::from(b)))
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_reference_values() {
        let frame = DecodedFrame::new(
            2,
            2,
            vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120],
        );
        let out = greyscale(&frame).unwrap();
        let greys: Vec<u8> = out.rgba.chunks_exact(4).map(|px| px[0]).collect();
        assert_eq!(greys, vec![19, 48, 78, 108]);
        assert!(out.is_opaque());
    }

    #[test]
    fn channels_are_equal() {
        let rgb: Vec<u8> = (0..=255u8).flat_map(|v| [v, 255 - v, v / 3]).collect();
        let frame = DecodedFrame::new(16, 16, rgb);
        let out = greyscale(&frame).unwrap();
        for px in out.rgba.chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn white_stays_white() {
        let out = greyscale(&DecodedFrame::solid(3, 3, (255, 255, 255))).unwrap();
        assert!(out.rgba.iter().all(|&v| v == 255));
    }
}
