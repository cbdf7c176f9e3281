use crate::error::PipelineError;
use crate::frame::DecodedFrame;

/// Décode un conteneur multi-pages en frames RGB 8 bits.
///
/// Implémenté par : `TiffDecoder`.
///
/// # Example
/// ```
/// use ts_core::traits::PageDecoder;
/// use ts_core::{DecodedFrame, PipelineError};
///
/// struct EmptyDecoder;
/// impl PageDecoder for EmptyDecoder {
///     fn decode_pages(&self, _bytes: &[u8]) -> Result<Vec<DecodedFrame>, PipelineError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let err = EmptyDecoder.decode_first(&[]).unwrap_err();
/// assert_eq!(err, PipelineError::NoPagesFound);
/// ```
pub trait PageDecoder: Send + Sync {
    /// Decode every page of the container.
    ///
    /// # Errors
    /// Returns `PipelineError::Decode` if the container cannot be parsed.
    fn decode_pages(&self, bytes: &[u8]) -> Result<Vec<DecodedFrame>, PipelineError>;

    /// Decode only the first page.
    ///
    /// The default implementation decodes everything and keeps page 0;
    /// implementations that can stop early should override it.
    ///
    /// # Errors
    /// Returns `PipelineError::NoPagesFound` if the container holds no page,
    /// or the decoding error otherwise.
    fn decode_first(&self, bytes: &[u8]) -> Result<DecodedFrame, PipelineError> {
        self.decode_pages(bytes)?
            .into_iter()
            .next()
            .ok_or(PipelineError::NoPagesFound)
    }
}
