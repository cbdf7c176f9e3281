use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::carousel::Transform;

/// Configuration du viewer, chargée depuis TOML.
///
/// Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ts_core::config::ViewerConfig;
/// let config = ViewerConfig::default();
/// assert_eq!(config.initial_step, 1);
/// assert_eq!(config.target_fps, 30);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ViewerConfig {
    // === Carrousel ===
    /// Étape affichée au démarrage [1, 4].
    pub initial_step: u8,

    // === Boucle UI ===
    /// Fréquence de polling des événements [5, 120].
    pub target_fps: u32,
    /// Afficher la ligne de statut sous les panneaux.
    pub show_status: bool,
    /// Filtre utilisé pour ajuster l'image à la taille d'un panneau.
    pub resize_filter: ResizeFilter,

    // === Export ===
    /// Format des fichiers écrits par `--export`.
    pub export_format: ExportFormat,
    /// Transformations écrites par `--export` quand la CLI n'en liste aucune.
    pub export_transforms: Vec<Transform>,
}

/// Resize filter for fitting a raster into a pane.
///
/// # Example
/// ```
/// use ts_core::config::ResizeFilter;
/// assert_eq!(ResizeFilter::default(), ResizeFilter::Bilinear);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ResizeFilter {
    /// Plus proche voisin, préserve le motif de tramage.
    Nearest,
    /// Bilinear convolution.
    #[default]
    Bilinear,
    /// Lanczos3 convolution, sharpest and slowest.
    Lanczos3,
}

/// Output format of the export mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG, lossless.
    #[default]
    Png,
    /// BMP, uncompressed.
    Bmp,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Bmp => "bmp",
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_step: 1,
            target_fps: 30,
            show_status: true,
            resize_filter: ResizeFilter::Bilinear,
            export_format: ExportFormat::Png,
            export_transforms: Transform::ALL.to_vec(),
        }
    }
}

impl ViewerConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.initial_step = self.initial_step.clamp(1, 4);
        self.target_fps = self.target_fps.clamp(5, 120);
        if self.export_transforms.is_empty() {
            self.export_transforms = Transform::ALL.to_vec();
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    viewer: Option<ViewerSection>,
    export: Option<ExportSection>,
}

/// Viewer section, all fields optional for partial override.
#[derive(Deserialize)]
struct ViewerSection {
    initial_step: Option<u8>,
    target_fps: Option<u32>,
    show_status: Option<bool>,
    resize_filter: Option<ResizeFilter>,
}

#[derive(Deserialize)]
struct ExportSection {
    format: Option<ExportFormat>,
    transforms: Option<Vec<Transform>>,
}

/// Parse a TOML string and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value has the wrong type.
///
/// # Example
/// ```
/// use ts_core::config::{parse_config, ExportFormat};
/// let config = parse_config("[export]\nformat = \"bmp\"").unwrap();
/// assert_eq!(config.export_format, ExportFormat::Bmp);
/// assert_eq!(config.initial_step, 1);
/// ```
pub fn parse_config(content: &str) -> Result<ViewerConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ViewerConfig::default();

    if let Some(v) = file.viewer {
        if let Some(x) = v.initial_step {
            config.initial_step = x;
        }
        if let Some(x) = v.target_fps {
            config.target_fps = x;
        }
        if let Some(x) = v.show_status {
            config.show_status = x;
        }
        if let Some(x) = v.resize_filter {
            config.resize_filter = x;
        }
    }
    if let Some(e) = file.export {
        if let Some(x) = e.format {
            config.export_format = x;
        }
        if let Some(x) = e.transforms {
            config.export_transforms = x;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ts_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}
