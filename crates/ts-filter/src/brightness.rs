use ts_core::{DecodedFrame, PipelineError, RasterBuffer};

use crate::luminance::{WEIGHT_B, WEIGHT_G, WEIGHT_R, luma};
use crate::store::clamped;

/// Facteur appliqué aux contributions de luminance.
pub const BRIGHTNESS_FACTOR: f64 = 0.5;

/// Décompose un pixel en contributions luma, les met à l'échelle, puis
/// divise par les poids pour revenir en RGB.
///
/// Algebraically a flat ×0.5 per channel; the arithmetic is kept literal so
/// rounding matches the reference output bit for bit.
#[inline(always)]
#[must_use]
pub fn scale_pixel(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let red = f64::from(r) * WEIGHT_R;
    let green = f64::from(g) * WEIGHT_G;
    let blue = f64::from(b) * WEIGHT_B;
    (
        red * BRIGHTNESS_FACTOR / WEIGHT_R,
        green * BRIGHTNESS_FACTOR / WEIGHT_G,
        blue * BRIGHTNESS_FACTOR / WEIGHT_B,
    )
}

/// Image à 50% de luminosité.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
///
/// # Example
/// ```
/// use ts_core::DecodedFrame;
/// use ts_filter::brightness::half_brightness;
/// let frame = DecodedFrame::new(1, 1, vec![200, 100, 50]);
/// assert_eq!(half_brightness(&frame).unwrap().rgba, vec![100, 50, 25, 255]);
/// ```
pub fn half_brightness(frame: &DecodedFrame) -> Result<RasterBuffer, PipelineError> {
    frame.validate()?;
    let mut rgba = Vec::with_capacity(frame.rgb.len() / 3 * 4);
    for px in frame.rgb.chunks_exact(3) {
        let (r, g, b) = scale_pixel(px[0], px[1], px[2]);
        rgba.extend_from_slice(&[clamped(r), clamped(g), clamped(b), 255]);
    }
    Ok(RasterBuffer {
        width: frame.width,
        height: frame.height,
        rgba,
    })
}

/// Niveaux de gris de l'image à 50% : luma des canaux mis à l'échelle,
/// sans arrondi intermédiaire.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
pub fn half_bright_grey(frame: &DecodedFrame) -> Result<RasterBuffer, PipelineError> {
    frame.validate()?;
    Ok(crate::expand::grey_raster(frame, |_, _, (r, g, b)| {
        let (r, g, b) = scale_pixel(r, g, b);
        clamped(luma(r, g, b))
    }))
}
