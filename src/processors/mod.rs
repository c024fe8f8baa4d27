//! Image-to-tensor processing stages.

pub mod canvas;

pub use canvas::{
    from_training_orientation, to_training_orientation, CanvasNormalizer, CANONICAL_SIZE,
};
