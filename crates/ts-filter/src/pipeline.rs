use std::time::Instant;

use ts_core::{DecodedFrame, PipelineError, RasterBuffer, Transform};

use crate::{brightness, dither, equalize, expand, luminance};

/// Applique une stratégie de transformation à une frame.
///
/// Single entry point over every transform. Validation happens first, so an
/// invalid frame never allocates an output buffer.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if `rgb.len() != 3 * width * height`.
///
/// # Example
/// ```
/// use ts_core::{DecodedFrame, Transform};
/// use ts_filter::apply;
/// let frame = DecodedFrame::solid(2, 2, (10, 20, 30));
/// for t in Transform::ALL {
///     let raster = apply(&frame, t).unwrap();
///     assert_eq!(raster.rgba.len(), 16);
/// }
/// ```
pub fn apply(frame: &DecodedFrame, transform: Transform) -> Result<RasterBuffer, PipelineError> {
    let start = Instant::now();
    let result = match transform {
        Transform::Identity => expand::expand_rgba(frame),
        Transform::Luminance => luminance::greyscale(frame),
        Transform::Brightness => brightness::half_brightness(frame),
        Transform::HalfBrightGrey => brightness::half_bright_grey(frame),
        Transform::Dither => dither::ordered_dither(frame),
        Transform::Equalize => equalize::equalize(frame),
    };
    match &result {
        Ok(_) => log::debug!(
            "{transform} {}×{} en {:.2?}",
            frame.width,
            frame.height,
            start.elapsed()
        ),
        Err(e) => log::warn!("{transform} rejeté : {e}"),
    }
    result
}
