/// Pipeline de transformation pixel pour tiffstep.
///
/// Every transform takes a validated `DecodedFrame` (RGB, 3 bytes per pixel)
/// and returns an opaque `RasterBuffer` (RGBA, 4 bytes per pixel), or a
/// `PipelineError` without allocating any output.
pub mod brightness;
pub mod dither;
pub mod equalize;
pub mod expand;
pub mod luminance;
pub mod pipeline;
pub mod store;

pub use pipeline::apply;
