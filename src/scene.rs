//! Seam to the host's scene graph.
//!
//! Scene construction, meshes, lighting and the renderer itself live
//! outside this crate. The controller only needs somewhere to write the
//! camera pose and the followed entity's placement, and a way to ask for a
//! frame.

use glam::Vec3;

use crate::camera::Camera;

/// What the controller needs from the host scene.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use touchrig::camera::Camera;
/// use touchrig::scene::SceneProvider;
///
/// struct Headless {
///     camera: Camera,
///     player: (Vec3, f32),
///     frames: u32,
/// }
///
/// impl SceneProvider for Headless {
///     fn camera_mut(&mut self) -> &mut Camera {
///         &mut self.camera
///     }
///     fn place_entity(&mut self, position: Vec3, facing_yaw: f32) {
///         self.player = (position, facing_yaw);
///     }
///     fn render(&mut self) {
///         self.frames += 1;
///     }
/// }
/// ```
pub trait SceneProvider {
    /// The camera whose pose the controller drives.
    fn camera_mut(&mut self) -> &mut Camera;

    /// Move the followed entity and turn it to `facing_yaw` (radians about
    /// +Y, 0 facing +Z).
    fn place_entity(&mut self, position: Vec3, facing_yaw: f32);

    /// Draw a frame with the current camera and entity placement.
    fn render(&mut self);
}
