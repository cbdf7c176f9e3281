use std::path::PathBuf;

use clap::Parser;
use ts_core::{Transform, ViewerConfig};

/// tiffstep — compare des filtres pixel sur une image TIFF, côte à côte.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichiers TIFF à afficher. Tab / Shift-Tab passe de l'un à l'autre.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Étape initiale du carrousel (1-4).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub step: Option<u8>,

    /// Exporter les transformations dans ce dossier puis quitter (pas de TUI).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Transformations à exporter, séparées par des virgules (défaut : celles de la config).
    #[arg(long, value_delimiter = ',')]
    pub transforms: Vec<Transform>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Warn about inputs that do not look like TIFF files. They are still
    /// attempted; the decoder decides.
    pub fn warn_non_tiff(&self) {
        for path in &self.images {
            if !ts_source::is_tiff(path) {
                log::warn!("{} n'a pas l'extension .tif/.tiff", path.display());
            }
        }
    }

    /// Transformations sélectionnées pour l'export. The CLI list wins over
    /// the config one.
    #[must_use]
    pub fn export_transforms(&self, config: &ViewerConfig) -> Vec<Transform> {
        if self.transforms.is_empty() {
            config.export_transforms.clone()
        } else {
            self.transforms.clone()
        }
    }
}
