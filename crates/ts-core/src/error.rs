use thiserror::Error;

/// Erreurs du pipeline de transformation et de l'acquisition de frames.
///
/// Every variant is terminal for a single render attempt: no partial
/// `RasterBuffer` is ever produced alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The decoder returned zero pages. No transform is attempted.
    #[error("Aucune page trouvée dans le conteneur TIFF")]
    NoPagesFound,

    /// RGB buffer length does not match `3 * width * height`.
    #[error(
        "Données pixel invalides : {actual} octets, {} attendus",
        expected.map_or_else(|| "trop de".to_string(), |n| n.to_string())
    )]
    InvalidPixelData {
        /// Expected byte count (`None` if `3 * width * height` overflows).
        expected: Option<usize>,
        /// Actual byte count of the RGB buffer.
        actual: usize,
    },

    /// Upstream failure (I/O, container parsing, unsupported sample layout).
    #[error("Échec du décodage : {0}")]
    Decode(String),
}
