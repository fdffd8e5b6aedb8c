//! Dead-zone camera
//!
//! The camera only moves once its target strays more than `slack` pixels from
//! the middle of the viewport, and then only far enough to put the target
//! back on the edge of that dead zone.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the viewport's top-left corner
    pub offset: IVec2,
}

impl Camera {
    /// Pull the camera along per axis when the target leaves the dead zone
    pub fn follow(&mut self, target_center: IVec2, viewport: IVec2, slack: i32) {
        let half = viewport / 2;
        self.offset.x = follow_axis(self.offset.x, target_center.x, half.x, slack);
        self.offset.y = follow_axis(self.offset.y, target_center.y, half.y, slack);
    }

    #[inline]
    pub fn world_to_screen(&self, world: IVec2) -> IVec2 {
        world - self.offset
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect.translated(-self.offset)
    }

    /// The visible part of the world
    pub fn viewport_rect(&self, viewport: IVec2) -> Rect {
        Rect::from_pos_size(self.offset, viewport.x, viewport.y)
    }
}

fn follow_axis(offset: i32, target: i32, half: i32, slack: i32) -> i32 {
    let center = offset + half;
    if center - target > slack {
        target + slack - half
    } else if target - center > slack {
        target - slack - half
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: IVec2 = IVec2::new(640, 480);

    #[test]
    fn test_small_moves_stay_in_dead_zone() {
        let mut camera = Camera::default();
        camera.follow(IVec2::new(320 + 90, 240 - 90), VIEWPORT, 90);
        assert_eq!(camera.offset, IVec2::ZERO);
    }

    #[test]
    fn test_follow_moves_by_excess_only() {
        let mut camera = Camera::default();
        // Player center starts at the viewport center and moves 200px right
        camera.follow(IVec2::new(320 + 200, 240), VIEWPORT, 90);
        assert_eq!(camera.offset, IVec2::new(110, 0));
        // Target sits exactly `slack` from the new center
        assert_eq!(camera.world_to_screen(IVec2::new(520, 240)).x, 320 + 90);
    }

    #[test]
    fn test_follow_negative_directions() {
        let mut camera = Camera {
            offset: IVec2::new(50, 50),
        };
        camera.follow(IVec2::new(50 + 320 - 150, 50 + 240 - 100), VIEWPORT, 90);
        assert_eq!(camera.offset, IVec2::new(50 - 60, 50 - 10));
    }

    #[test]
    fn test_axes_are_independent() {
        let mut camera = Camera::default();
        camera.follow(IVec2::new(320, 240 + 300), VIEWPORT, 90);
        assert_eq!(camera.offset, IVec2::new(0, 210));
    }

    #[test]
    fn test_rect_to_screen() {
        let camera = Camera {
            offset: IVec2::new(100, -20),
        };
        assert_eq!(
            camera.rect_to_screen(Rect::new(150, 0, 10, 10)),
            Rect::new(50, 20, 10, 10)
        );
        assert_eq!(camera.viewport_rect(VIEWPORT), Rect::new(100, -20, 640, 480));
    }
}
