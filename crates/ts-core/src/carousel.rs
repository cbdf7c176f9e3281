use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stratégie de transformation pixel appliquée à une frame décodée.
///
/// # Example
/// ```
/// use ts_core::carousel::Transform;
/// let t: Transform = "dither".parse().unwrap();
/// assert_eq!(t, Transform::Dither);
/// assert_eq!(t.label(), "Ordered dither");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    /// RGB copied verbatim, opaque alpha.
    #[default]
    Identity,
    /// Luma greyscale (0.299 R + 0.587 G + 0.114 B).
    Luminance,
    /// Every channel at 50%.
    Brightness,
    /// Luma of the 50% brightness image.
    HalfBrightGrey,
    /// Luma plus a 2×2 ordered offset.
    Dither,
    /// Per-channel histogram equalization.
    Equalize,
}

impl Transform {
    /// Toutes les stratégies, dans l'ordre d'export.
    pub const ALL: [Transform; 6] = [
        Transform::Identity,
        Transform::Luminance,
        Transform::Brightness,
        Transform::HalfBrightGrey,
        Transform::Dither,
        Transform::Equalize,
    ];

    /// Identifiant court, utilisé en CLI et pour les noms de fichiers.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::Luminance => "luminance",
            Transform::Brightness => "brightness",
            Transform::HalfBrightGrey => "half-bright-grey",
            Transform::Dither => "dither",
            Transform::Equalize => "equalize",
        }
    }

    /// Titre lisible pour l'UI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Transform::Identity => "Original",
            Transform::Luminance => "Greyscale",
            Transform::Brightness => "50% brightness",
            Transform::HalfBrightGrey => "50% brightness, greyscale",
            Transform::Dither => "Ordered dither",
            Transform::Equalize => "Equalized",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Transform::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .or(match lower.as_str() {
                "grey" | "gray" | "greyscale" | "grayscale" => Some(Transform::Luminance),
                "half" | "halfbright" => Some(Transform::Brightness),
                "halfbrightgrey" => Some(Transform::HalfBrightGrey),
                "leveled" | "levels" => Some(Transform::Equalize),
                _ => None,
            })
            .ok_or_else(|| format!("Transformation inconnue : {s}"))
    }
}

/// Étape du carrousel, toujours dans 1..=4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step(u8);

impl Step {
    /// Number of steps before wrapping.
    pub const COUNT: u8 = 4;

    /// Clamp `n` into 1..=4.
    #[must_use]
    pub fn new(n: u8) -> Self {
        Self(n.clamp(1, Self::COUNT))
    }

    /// 1-based step number.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Paire (gauche, droite) affichée à cette étape.
    #[must_use]
    pub fn panes(self) -> [Transform; 2] {
        match self.0 {
            1 => [Transform::Identity, Transform::Luminance],
            2 => [Transform::Brightness, Transform::HalfBrightGrey],
            3 => [Transform::Luminance, Transform::Dither],
            4 => [Transform::Identity, Transform::Equalize],
            _ => [Transform::Identity, Transform::Identity],
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self(1)
    }
}

/// État de pagination du carrousel. Pure application state, the transforms
/// never see it.
///
/// # Example
/// ```
/// use ts_core::carousel::{Carousel, Transform};
/// let mut c = Carousel::new(4);
/// c.next();
/// assert_eq!(c.step().get(), 1);
/// assert_eq!(c.panes(), [Transform::Identity, Transform::Luminance]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    step: Step,
}

impl Carousel {
    /// Start at `initial` (clamped into 1..=4).
    #[must_use]
    pub fn new(initial: u8) -> Self {
        Self {
            step: Step::new(initial),
        }
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Advance one step, 4 wraps to 1.
    pub fn next(&mut self) {
        let n = self.step.get() + 1;
        self.step = Step::new(if n > Step::COUNT { 1 } else { n });
    }

    /// Go back one step, 1 wraps to 4.
    pub fn previous(&mut self) {
        let n = self.step.get() - 1;
        self.step = Step::new(if n == 0 { Step::COUNT } else { n });
    }

    /// Transforms for the left and right panes.
    #[must_use]
    pub fn panes(&self) -> [Transform; 2] {
        self.step.panes()
    }

    /// Libellé du bouton de pagination.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Next Step (Current: {})", self.step.get())
    }
}
