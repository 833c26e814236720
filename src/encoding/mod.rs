//! Host side of the relief encoding: the same steps the emitted script evaluates.
pub mod border;
pub mod height;
pub mod surface;
pub mod transition;

pub use height::UnitWidth;
pub use surface::Surface;
pub use transition::Transition;
