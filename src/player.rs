use glam::Vec2;
use image::RgbaImage;

use crate::camera::Camera;
use crate::collision::{move_and_collide, Body};
use crate::config::GameConfig;
use crate::geometry::{Direction, Rect};
use crate::input::Movement;
use crate::renderer::canvas::Canvas;
use crate::world::{Collidable, Drawable};

/// The sprite the keyboard drives.
#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub facing: Direction,
    /// Cleared while a dialog is open.
    pub mobile: bool,
    pub sprite: RgbaImage,
    speed: f32,
    diagonal_scale: f32,
    reach: f32,
}

impl Player {
    /// A square body of `config.body_size()` with its top-left corner at `pos`.
    pub fn new(pos: Vec2, config: &GameConfig, sprite: RgbaImage) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(config.body_size())),
            facing: Direction::default(),
            mobile: true,
            sprite,
            speed: config.player_speed,
            diagonal_scale: config.diagonal_scale,
            reach: config.interact_reach,
        }
    }

    /// Velocity for the held keys. Right beats left and down beats up; a
    /// diagonal is scaled on both axes so it is no faster than a straight
    /// line.
    pub fn velocity_for(&self, movement: Movement) -> Vec2 {
        let mut vel = Vec2::ZERO;
        if movement.left {
            vel.x = -self.speed;
        }
        if movement.right {
            vel.x = self.speed;
        }
        if movement.up {
            vel.y = -self.speed;
        }
        if movement.down {
            vel.y = self.speed;
        }
        if vel.x != 0.0 && vel.y != 0.0 {
            vel *= self.diagonal_scale;
        }
        vel
    }

    /// One simulation step. An immobile player stands still and keeps its
    /// facing.
    pub fn update(&mut self, dt: f32, movement: Movement, obstacles: &[Rect]) {
        if !self.mobile {
            self.body.vel = Vec2::ZERO;
            return;
        }
        self.body.vel = self.velocity_for(movement);
        if let Some(facing) = Direction::from_velocity(self.body.vel) {
            self.facing = facing;
        }
        move_and_collide(&mut self.body, dt, obstacles);
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// The point the player would interact with: `interact_reach` pixels
    /// from the body centre in the facing direction.
    pub fn facing_point(&self) -> Vec2 {
        self.rect().center() + self.facing.unit() * self.reach
    }

    /// 7×7 marker around [`facing_point`](Self::facing_point) for the debug
    /// overlay.
    pub fn facing_marker(&self) -> Rect {
        Rect::from_center(self.facing_point(), 7.0, 7.0)
    }
}

impl Collidable for Player {
    fn bounds(&self) -> Rect {
        self.rect()
    }
}

impl Drawable for Player {
    fn draw(&self, canvas: &mut Canvas, camera: &Camera) {
        canvas.blit_centered(&self.sprite, camera.apply_point(self.rect().center()));
    }
}
