// =============================================================================
// GAME: One play session on one map
//
// Per frame, driven by the runner in `engine.rs`:
//
//   handle_action()  for each key pressed this frame
//   on_tick()        once per elapsed dialog tick, even while paused
//   update()         fixed simulation steps, skipped while paused
//   render()         always
// =============================================================================

use std::rc::Rc;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::dialog::{DialogBox, DialogEvent};
use crate::error::LoadError;
use crate::input::{Action, Movement};
use crate::map::TiledMap;
use crate::renderer::canvas::{Canvas, DEBUG_BLUE, WHITE};
use crate::renderer::text::TextRenderer;
use crate::world::{Assets, FsAssets, World};

/// Opacity of the black layer drawn over a paused frame.
const PAUSE_DIM: u8 = 125;

/// Something the runner has to act on.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Quit,
    /// Leave for another map.
    Warp { map: String, spawn: Option<Vec2> },
}

/// Text renderers for the dialog lines and the pause banner.
#[derive(Clone)]
pub struct Fonts {
    pub dialog: Rc<dyn TextRenderer>,
    pub banner: Rc<dyn TextRenderer>,
}

pub struct Session {
    pub config: GameConfig,
    pub world: World,
    pub camera: Camera,
    pub dialog: DialogBox,
    pub paused: bool,
    pub draw_debug: bool,
    background: RgbaImage,
    overlay: RgbaImage,
    pause_banner: RgbaImage,
}

impl Session {
    /// Start on `world`, with `background` and `overlay` already baked from
    /// its map.
    pub fn new(
        config: GameConfig,
        world: World,
        background: RgbaImage,
        overlay: RgbaImage,
        fonts: &Fonts,
    ) -> Self {
        let viewport = config.viewport();
        let mut camera = Camera::new(world.size.x, world.size.y, viewport);
        camera.update(&world.player.rect());
        Self {
            dialog: DialogBox::new(&config.dialog, viewport, Rc::clone(&fonts.dialog)),
            pause_banner: fonts.banner.render("Paused", WHITE),
            config,
            world,
            camera,
            paused: false,
            draw_debug: false,
            background,
            overlay,
        }
    }

    /// Load `config.start_map` from disk and start on it.
    pub fn start(config: GameConfig, fonts: &Fonts) -> Result<Self, LoadError> {
        let map_file = config.start_map.clone();
        let (world, background, overlay) = load_world(&config, &map_file, None)?;
        Ok(Self::new(config, world, background, overlay, fonts))
    }

    /// Replace the world with `map_file`. The dialog box is closed; the pause
    /// and debug flags carry over.
    pub fn enter_map(&mut self, map_file: &str, spawn: Option<Vec2>) -> Result<(), LoadError> {
        let (world, background, overlay) = load_world(&self.config, map_file, spawn)?;
        self.replace_world(world, background, overlay);
        log::info!("entered {map_file}");
        Ok(())
    }

    pub fn replace_world(&mut self, world: World, background: RgbaImage, overlay: RgbaImage) {
        self.camera = Camera::new(world.size.x, world.size.y, self.config.viewport());
        self.camera.update(&world.player.rect());
        self.world = world;
        self.background = background;
        self.overlay = overlay;
        self.dialog.close();
    }

    /// React to a one-shot action.
    pub fn handle_action(&mut self, action: Action) -> Option<Transition> {
        match action {
            Action::Pause => self.paused = !self.paused,
            Action::ToggleDebug => self.draw_debug = !self.draw_debug,
            Action::DialogNext => {
                if self.dialog.advance() == DialogEvent::Closed {
                    self.world.player.mobile = true;
                }
            }
            Action::Interact => self.interact(),
            Action::Quit => return Some(Transition::Quit),
            Action::MoveLeft | Action::MoveRight | Action::MoveUp | Action::MoveDown => {}
        }
        None
    }

    /// Talk to the NPC in front of the player, if any. Ignored while a dialog
    /// is already showing.
    pub fn interact(&mut self) {
        if self.dialog.is_active() {
            return;
        }
        let point = self.world.player.facing_point();
        let Some(index) = self.world.npc_at(point) else { return };

        self.world.player.mobile = false;
        let lines = self.world.npcs[index].script.lines.clone();
        log::debug!("interacting with NPC {index}");
        if self.dialog.open(lines) == DialogEvent::Closed {
            self.world.player.mobile = true;
        }
    }

    /// One dialog timer tick.
    pub fn on_tick(&mut self) {
        self.dialog.tick();
    }

    /// One fixed simulation step. Returns a warp when the player ends the
    /// step on a warp trigger.
    pub fn update(&mut self, dt: f32, movement: Movement) -> Option<Transition> {
        if self.paused {
            return None;
        }
        self.world.update_player(dt, movement);
        self.camera.update(&self.world.player.rect());

        self.world.triggered_warp().map(|warp| {
            log::info!("warp to {} at {:?}", warp.destination, warp.spawn);
            Transition::Warp { map: warp.destination.clone(), spawn: warp.spawn }
        })
    }

    pub fn render(&self, canvas: &mut Canvas) {
        let [r, g, b, a] = self.config.background;
        canvas.clear(Rgba([r, g, b, a]));
        canvas.blit(&self.background, self.camera.offset);

        for sprite in self.world.drawables() {
            sprite.draw(canvas, &self.camera);
        }
        if self.draw_debug {
            for rect in self.world.debug_rects() {
                canvas.stroke_rect(&self.camera.apply_rect(&rect), DEBUG_BLUE, 1.0);
            }
        }

        canvas.blit(&self.overlay, self.camera.offset);
        self.dialog.draw(canvas);

        if self.paused {
            canvas.dim(PAUSE_DIM);
            let center = Vec2::new(canvas.width() as f32, canvas.height() as f32) / 2.0;
            canvas.blit_centered(&self.pause_banner, center);
        }
    }
}

/// Read `map_file` from the map directory and build its world.
pub fn load_world(
    config: &GameConfig,
    map_file: &str,
    spawn: Option<Vec2>,
) -> Result<(World, RgbaImage, RgbaImage), LoadError> {
    let map = TiledMap::load(config.map_path(map_file))?;
    let mut assets = FsAssets::new(config);
    let player_sprite = assets.sprite(&config.player_sprite);
    let world = World::from_map(&map, config, spawn, player_sprite, &mut assets)?;
    Ok((world, map.background(), map.overlay()))
}
