pub mod camera;
pub mod touch;

pub use camera::PreviewCamera;
pub use touch::{GestureUpdate, TouchTracker};
