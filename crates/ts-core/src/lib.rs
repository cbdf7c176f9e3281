/// Types partagés, erreurs et configuration pour tiffstep.
///
/// This crate contains the frame types exchanged between the decoder, the
/// transform pipeline and the raster surfaces, plus the viewer configuration
/// and the carousel paging state.

pub mod carousel;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use carousel::{Carousel, Step, Transform};
pub use config::ViewerConfig;
pub use error::PipelineError;
pub use frame::{DecodedFrame, RasterBuffer};
pub use traits::PageDecoder;
