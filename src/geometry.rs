// =============================================================================
// GEOMETRY.RS: Axis-aligned rectangles and compass directions
//
// World space is in pixels, x to the right and y downward, matching the tile
// map and the framebuffer.
// =============================================================================

use glam::Vec2;
use serde::Deserialize;

/// Axis-aligned rectangle: top-left corner plus size, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w × h` centred on `center`.
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 { self.x }
    #[inline]
    pub fn right(&self) -> f32 { self.x + self.w }
    #[inline]
    pub fn top(&self) -> f32 { self.y }
    #[inline]
    pub fn bottom(&self) -> f32 { self.y + self.h }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Copy of this rectangle shifted by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// True when the interiors intersect. Rectangles that only share an edge
    /// do not overlap, so a body resting against a wall is not "inside" it.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are not.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

// =============================================================================
// AXES AND DIRECTIONS
// =============================================================================

/// One of the two screen axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Compass direction a sprite faces. North is up the screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit step in screen space.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::North => Vec2::new(0.0, -1.0),
            Direction::East => Vec2::new(1.0, 0.0),
            Direction::South => Vec2::new(0.0, 1.0),
            Direction::West => Vec2::new(-1.0, 0.0),
        }
    }

    /// Direction of a velocity, or `None` when it is zero. Vertical motion
    /// wins on diagonals.
    pub fn from_velocity(vel: Vec2) -> Option<Self> {
        if vel.y < 0.0 {
            Some(Direction::North)
        } else if vel.y > 0.0 {
            Some(Direction::South)
        } else if vel.x > 0.0 {
            Some(Direction::East)
        } else if vel.x < 0.0 {
            Some(Direction::West)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partial_overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(!r.contains_point(Vec2::new(4.0, 2.0)));
        assert!(!r.contains_point(Vec2::new(2.0, 4.0)));
    }

    #[test]
    fn from_center_round_trips_center() {
        let r = Rect::from_center(Vec2::new(50.0, 20.0), 10.0, 6.0);
        assert_eq!(r.center(), Vec2::new(50.0, 20.0));
        assert_eq!(r.top_left(), Vec2::new(45.0, 17.0));
    }

    #[test]
    fn vertical_motion_wins_facing() {
        assert_eq!(Direction::from_velocity(Vec2::new(1.0, -1.0)), Some(Direction::North));
        assert_eq!(Direction::from_velocity(Vec2::new(-1.0, 0.0)), Some(Direction::West));
        assert_eq!(Direction::from_velocity(Vec2::ZERO), None);
    }
}
