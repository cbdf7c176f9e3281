/// Sources visuelles pour tiffstep : décodage TIFF et ajustement aux panneaux.

pub mod decoder;
pub mod image;
pub mod resize;

pub use decoder::TiffDecoder;
pub use image::{is_tiff, load_first_page};
