use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use ts_core::{DecodedFrame, PipelineError};

/// Résultat d'un décodage, étiqueté par l'index de l'image demandée.
#[derive(Debug)]
pub struct LoadResult {
    /// Index dans la liste des images de l'app.
    pub index: usize,
    /// Première page, ou l'erreur de décodage.
    pub frame: Result<Arc<DecodedFrame>, PipelineError>,
}

/// Décode `path` sur un thread dédié et envoie le résultat sur `tx`.
///
/// The receiver may have moved on to another image by the time the result
/// arrives; it compares `index` and drops stale results.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
pub fn spawn_loader(path: PathBuf, index: usize, tx: flume::Sender<LoadResult>) -> Result<()> {
    std::thread::Builder::new()
        .name("tiff-loader".into())
        .spawn(move || {
            let frame = ts_source::load_first_page(&path).map(Arc::new);
            if let Err(ref e) = frame {
                log::error!("Erreur de chargement TIFF {} : {e}", path.display());
            }
            // Receiver gone = app quitting.
            let _ = tx.send(LoadResult { index, frame });
        })
        .context("Impossible de lancer le thread de décodage")?;
    Ok(())
}
