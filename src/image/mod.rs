pub mod io;
pub mod rgba;
pub mod traits;

pub use self::rgba::{RasterRgba, Rgba, TRANSPARENT};
pub use self::traits::{ImageView, ImageViewMut};
