//! Random sampling helpers for entity creation
//!
//! All randomness flows through the session's seeded RNG so a run is
//! reproducible from its seed.

use glam::IVec2;
use rand::Rng;

use super::geometry::Rect;

/// Signed speed with magnitude in `min..=max` and a random sign
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let speed = rng.random_range(min..=max);
    if rng.random_bool(0.5) { speed } else { -speed }
}

/// Sample a top-left position near the camera whose box is off screen.
///
/// Candidates are drawn from camera-relative `[-W, 2W) x [-H, 2H)` and
/// rejected while the entity's box overlaps the viewport.
pub fn random_off_camera_pos<R: Rng + ?Sized>(
    rng: &mut R,
    camera: IVec2,
    viewport: IVec2,
    width: i32,
    height: i32,
) -> IVec2 {
    let view = Rect::from_pos_size(camera, viewport.x, viewport.y);
    loop {
        let x = rng.random_range(camera.x - viewport.x..camera.x + 2 * viewport.x);
        let y = rng.random_range(camera.y - viewport.y..camera.y + 2 * viewport.y);
        let candidate = Rect::new(x, y, width, height);
        if !candidate.intersects(&view) {
            return IVec2::new(x, y);
        }
    }
}

/// Roll a percent chance (`0..=100`)
pub fn percent_chance<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    rng.random_range(0..100) < percent
}
