// =============================================================================
// WORLD: Everything standing on the current map
//
// Each kind of thing lives in its own typed list. The loader registers
// objects explicitly; anything that blocks movement is also recorded in the
// collider list, in map object order, and collision walks that list.
// =============================================================================

use std::path::PathBuf;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::dialog::DialogScript;
use crate::error::LoadError;
use crate::geometry::Rect;
use crate::input::Movement;
use crate::map::{MapObject, TiledMap};
use crate::player::Player;
use crate::renderer::canvas::Canvas;

// ── Capabilities ─────────────────────────────────────────────────────────────

/// Blocks movement or can be hit-tested.
pub trait Collidable {
    fn bounds(&self) -> Rect;
}

/// Has a sprite drawn in world space.
pub trait Drawable {
    fn draw(&self, canvas: &mut Canvas, camera: &Camera);
}

// ── Objects ──────────────────────────────────────────────────────────────────

/// A static, invisible wall.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub bounds: Rect,
}

impl Collidable for Obstacle {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// A non-player character. Solid, and talks when interacted with.
#[derive(Clone, Debug)]
pub struct Npc {
    pub bounds: Rect,
    pub sprite: RgbaImage,
    pub script: DialogScript,
}

impl Collidable for Npc {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Drawable for Npc {
    fn draw(&self, canvas: &mut Canvas, camera: &Camera) {
        canvas.blit_centered(&self.sprite, camera.apply_point(self.bounds.center()));
    }
}

/// Moves the player to another map when stepped on.
#[derive(Clone, Debug, PartialEq)]
pub struct Warp {
    pub trigger: Rect,
    /// Map file, relative to the map directory.
    pub destination: String,
    /// Top-left of the player on arrival. `None` uses the destination map's
    /// `player` object.
    pub spawn: Option<Vec2>,
}

/// Index into one of the typed lists of a [`World`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColliderRef {
    Wall(usize),
    Npc(usize),
}

// ── Map objects ──────────────────────────────────────────────────────────────

/// What a map object turns into, decided from its name and type string.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    /// `player`: top-left of the player body.
    PlayerSpawn(Vec2),
    /// `wall`
    Wall(Rect),
    /// `NPC`, type `"<image>,<dialog file>"`, centred on the object origin.
    Npc { center: Vec2, image: String, dialog: String },
    /// `warp`, type `"<map>[,<x>,<y>]"`.
    Warp(Warp),
    /// Any other name.
    Ignored,
}

impl ObjectKind {
    pub fn parse(object: &MapObject) -> Result<Self, String> {
        match object.name.as_str() {
            "player" => Ok(Self::PlayerSpawn(Vec2::new(object.x, object.y))),
            "wall" => Ok(Self::Wall(object.rect())),
            "NPC" => {
                let mut parts = object.kind.split(',').map(str::trim);
                match (parts.next(), parts.next()) {
                    (Some(image), Some(dialog)) if !image.is_empty() && !dialog.is_empty() => Ok(Self::Npc {
                        center: Vec2::new(object.x, object.y),
                        image: image.to_owned(),
                        dialog: dialog.to_owned(),
                    }),
                    _ => Err(format!("NPC type '{}' is not \"image,dialog\"", object.kind)),
                }
            }
            "warp" => {
                let parts: Vec<&str> = object.kind.split(',').map(str::trim).collect();
                let spawn = match parts.as_slice() {
                    [map] if !map.is_empty() => None,
                    [map, x, y] if !map.is_empty() => {
                        let x = x.parse::<f32>().map_err(|e| format!("warp x '{x}': {e}"))?;
                        let y = y.parse::<f32>().map_err(|e| format!("warp y '{y}': {e}"))?;
                        Some(Vec2::new(x, y))
                    }
                    _ => return Err(format!("warp type '{}' is not \"map[,x,y]\"", object.kind)),
                };
                Ok(Self::Warp(Warp {
                    trigger: object.rect(),
                    destination: parts[0].to_owned(),
                    spawn,
                }))
            }
            _ => Ok(Self::Ignored),
        }
    }
}

// ── Assets ───────────────────────────────────────────────────────────────────

/// Where the world builder gets NPC sprites and dialog scripts from.
pub trait Assets {
    /// A missing or broken image is not fatal: implementations return a
    /// placeholder.
    fn sprite(&mut self, relative: &str) -> RgbaImage;
    fn dialog(&mut self, relative: &str) -> Result<DialogScript, LoadError>;
}

/// Assets read from `asset_dir`.
pub struct FsAssets {
    root: PathBuf,
    placeholder: u32,
}

impl FsAssets {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            root: config.asset_dir.clone(),
            placeholder: config.body_size().max(1.0) as u32,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative.trim())
    }
}

impl Assets for FsAssets {
    fn sprite(&mut self, relative: &str) -> RgbaImage {
        let path = self.path(relative);
        match image::open(&path) {
            Ok(image) => image.to_rgba8(),
            Err(e) => {
                log::warn!("cannot load sprite {}: {e}; using a placeholder", path.display());
                placeholder_sprite(self.placeholder)
            }
        }
    }

    fn dialog(&mut self, relative: &str) -> Result<DialogScript, LoadError> {
        DialogScript::load(self.path(relative))
    }
}

/// Magenta square drawn in place of a sprite that failed to load.
pub fn placeholder_sprite(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, Rgba([255, 0, 255, 255]))
}

// ── World ────────────────────────────────────────────────────────────────────

pub struct World {
    pub player: Player,
    pub npcs: Vec<Npc>,
    pub obstacles: Vec<Obstacle>,
    pub warps: Vec<Warp>,
    colliders: Vec<ColliderRef>,
    /// Map size in pixels.
    pub size: Vec2,
}

impl World {
    pub fn new(player: Player, size: Vec2) -> Self {
        Self {
            player,
            npcs: Vec::new(),
            obstacles: Vec::new(),
            warps: Vec::new(),
            colliders: Vec::new(),
            size,
        }
    }

    /// Build the world for `map`.
    ///
    /// `spawn` overrides the map's `player` object; without either the map
    /// is rejected. Object type strings that cannot be parsed and dialog
    /// files that cannot be read are load errors.
    pub fn from_map(
        map: &TiledMap,
        config: &GameConfig,
        spawn: Option<Vec2>,
        player_sprite: RgbaImage,
        assets: &mut dyn Assets,
    ) -> Result<Self, LoadError> {
        let kinds = map
            .objects
            .iter()
            .map(|object| {
                ObjectKind::parse(object).map_err(|reason| LoadError::BadObject {
                    path: map.path.clone(),
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let map_spawn = kinds.iter().find_map(|kind| match kind {
            ObjectKind::PlayerSpawn(pos) => Some(*pos),
            _ => None,
        });
        let Some(start) = spawn.or(map_spawn) else {
            return Err(LoadError::MissingSpawn { path: map.path.clone() });
        };

        let size = Vec2::new(map.pixel_width() as f32, map.pixel_height() as f32);
        let mut world = World::new(Player::new(start, config, player_sprite), size);

        for kind in kinds {
            match kind {
                ObjectKind::Wall(bounds) => {
                    world.register_obstacle(Obstacle { bounds });
                }
                ObjectKind::Npc { center, image, dialog } => {
                    let sprite = assets.sprite(&image);
                    let script = assets.dialog(&dialog)?;
                    let side = config.body_size();
                    let index = world.register_npc(Npc {
                        bounds: Rect::from_center(center, side, side),
                        sprite,
                        script,
                    });
                    log::debug!("registered NPC {index} ({image}, {dialog})");
                }
                ObjectKind::Warp(warp) => {
                    world.register_warp(warp);
                }
                ObjectKind::PlayerSpawn(_) | ObjectKind::Ignored => {}
            }
        }

        log::info!(
            "world for {}: {} walls, {} NPCs, {} warps",
            map.path.display(),
            world.obstacles.len(),
            world.npcs.len(),
            world.warps.len()
        );
        Ok(world)
    }

    pub fn register_obstacle(&mut self, obstacle: Obstacle) -> usize {
        self.obstacles.push(obstacle);
        let index = self.obstacles.len() - 1;
        self.colliders.push(ColliderRef::Wall(index));
        index
    }

    pub fn register_npc(&mut self, npc: Npc) -> usize {
        self.npcs.push(npc);
        let index = self.npcs.len() - 1;
        self.colliders.push(ColliderRef::Npc(index));
        index
    }

    pub fn register_warp(&mut self, warp: Warp) -> usize {
        self.warps.push(warp);
        self.warps.len() - 1
    }

    /// Everything solid, in registration order.
    pub fn colliders(&self) -> &[ColliderRef] {
        &self.colliders
    }

    pub fn collider(&self, collider: ColliderRef) -> &dyn Collidable {
        match collider {
            ColliderRef::Wall(i) => &self.obstacles[i],
            ColliderRef::Npc(i) => &self.npcs[i],
        }
    }

    pub fn collider_rects(&self) -> Vec<Rect> {
        self.colliders.iter().map(|c| self.collider(*c).bounds()).collect()
    }

    /// Move the player for one step against every collider.
    pub fn update_player(&mut self, dt: f32, movement: Movement) {
        let obstacles = self.collider_rects();
        self.player.update(dt, movement, &obstacles);
    }

    /// First NPC whose bounds contain `point`.
    pub fn npc_at(&self, point: Vec2) -> Option<usize> {
        self.npcs.iter().position(|npc| npc.bounds.contains_point(point))
    }

    /// First warp the player is standing on.
    pub fn triggered_warp(&self) -> Option<&Warp> {
        let rect = self.player.rect();
        self.warps.iter().find(|warp| warp.trigger.overlaps(&rect))
    }

    /// Sprites in draw order: NPCs, then the player on top.
    pub fn drawables(&self) -> impl Iterator<Item = &dyn Drawable> + '_ {
        self.npcs
            .iter()
            .map(|npc| npc as &dyn Drawable)
            .chain(std::iter::once(&self.player as &dyn Drawable))
    }

    /// Rectangles outlined by the debug overlay: sprites, walls and warps.
    pub fn debug_rects(&self) -> Vec<Rect> {
        let mut rects: Vec<Rect> = self.npcs.iter().map(|npc| npc.bounds).collect();
        rects.push(self.player.rect());
        rects.extend(self.obstacles.iter().map(|o| o.bounds));
        rects.extend(self.warps.iter().map(|w| w.trigger));
        rects.push(self.player.facing_marker());
        rects
    }
}
