use glam::Vec2;

use crate::geometry::{Axis, Rect};

/// A moving axis-aligned body. `pos` is the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Integrate `body.vel * dt` one axis at a time, resolving against
/// `obstacles` after each axis.
///
/// The horizontal test runs with the old vertical position and the vertical
/// test with the already-corrected horizontal one, so sliding along a wall
/// works and corners never trap the body.
pub fn move_and_collide(body: &mut Body, dt: f32, obstacles: &[Rect]) {
    let target = body.pos + body.vel * dt;

    body.pos.x = target.x;
    collide_with_walls(body, Axis::X, obstacles);

    body.pos.y = target.y;
    collide_with_walls(body, Axis::Y, obstacles);
}

/// Push `body` out of the first obstacle it overlaps on `axis`.
///
/// The body is snapped to the obstacle edge facing its motion and its
/// velocity on that axis is zeroed. With several overlaps only the first one
/// in `obstacles` order is used, so a body wedged into two obstacles at once
/// may be resolved against the farther one. Returns the index of the
/// obstacle used, if any.
pub fn collide_with_walls(body: &mut Body, axis: Axis, obstacles: &[Rect]) -> Option<usize> {
    let rect = body.rect();
    let (index, hit) = obstacles
        .iter()
        .enumerate()
        .find(|(_, wall)| rect.overlaps(wall))?;

    match axis {
        Axis::X => {
            if body.vel.x > 0.0 {
                body.pos.x = hit.left() - rect.w;
            } else if body.vel.x < 0.0 {
                body.pos.x = hit.right();
            }
            body.vel.x = 0.0;
        }
        Axis::Y => {
            if body.vel.y > 0.0 {
                body.pos.y = hit.top() - rect.h;
            } else if body.vel.y < 0.0 {
                body.pos.y = hit.bottom();
            }
            body.vel.y = 0.0;
        }
    }

    Some(index)
}
