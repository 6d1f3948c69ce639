//! Brush geometry: planes, face construction and convex brushes.

pub mod plane;
pub mod face;
pub mod brush;

pub use plane::{Plane, TextureAlign};
pub use face::{axis_face, sloped_face, FaceDir, Heading, Slope};
pub use brush::Brush;
