#![allow(
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]
//! Deterministic engine behind the scattered 3D photo gallery.
//!
//! Produces per-frame transforms, screen positions and textures; drawing
//! them is left to the host.

pub mod ambient;
pub mod layout;
pub mod projection;
pub mod reporter;
pub mod reveal;
pub mod scene;
pub mod texture;

pub use ambient::{AmbientMotion, GroupTransform};
pub use layout::{LayoutTuning, PhotoPlacement, layout, layout_with};
pub use projection::{Camera, plane_size, photo_transform, project_photo};
pub use reporter::ScreenReporter;
pub use reveal::{RevealAnimation, ease_out_cubic};
pub use scene::{RenderedPhoto, ScatteredGallery};
pub use texture::{LoadingProgress, Texture, TextureError, TextureLoader};
