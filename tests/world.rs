use std::collections::HashMap;

use glam::Vec2;
use image::RgbaImage;
use tilewalk::config::GameConfig;
use tilewalk::dialog::DialogScript;
use tilewalk::error::LoadError;
use tilewalk::geometry::{Direction, Rect};
use tilewalk::input::Movement;
use tilewalk::map::{MapObject, TiledMap};
use tilewalk::world::{Assets, ColliderRef, ObjectKind, World};

/// In-memory assets: every sprite is a 1×1 image, dialogs come from a table.
#[derive(Default)]
struct MemoryAssets {
    dialogs: HashMap<String, String>,
    sprites_requested: Vec<String>,
}

impl Assets for MemoryAssets {
    fn sprite(&mut self, relative: &str) -> RgbaImage {
        self.sprites_requested.push(relative.to_owned());
        RgbaImage::new(1, 1)
    }

    fn dialog(&mut self, relative: &str) -> Result<DialogScript, LoadError> {
        match self.dialogs.get(relative) {
            Some(text) => Ok(DialogScript::parse(text)),
            None => Err(LoadError::io(
                relative,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such dialog"),
            )),
        }
    }
}

fn assets() -> MemoryAssets {
    let mut a = MemoryAssets::default();
    a.dialogs.insert("hi.txt".into(), "Hello!~Nice day.\n\n".into());
    a
}

fn object(name: &str, kind: &str, x: f32, y: f32, w: f32, h: f32) -> MapObject {
    MapObject { name: name.into(), kind: kind.into(), x, y, width: w, height: h }
}

/// 20×20 tiles of 64 px, no tile data.
fn map_with(objects: Vec<MapObject>) -> TiledMap {
    let xml = r#"<map version="1.10" orientation="orthogonal" width="20" height="20" tilewidth="64" tileheight="64" infinite="0"></map>"#;
    let mut map = TiledMap::from_tmx(xml, "world.tmx").expect("map parses");
    map.objects = objects;
    map
}

fn build(objects: Vec<MapObject>, spawn: Option<Vec2>) -> Result<World, LoadError> {
    World::from_map(&map_with(objects), &GameConfig::default(), spawn, RgbaImage::new(1, 1), &mut assets())
}

#[test]
fn object_kinds_parse_from_name_and_type() {
    assert_eq!(
        ObjectKind::parse(&object("player", "", 5.0, 6.0, 0.0, 0.0)),
        Ok(ObjectKind::PlayerSpawn(Vec2::new(5.0, 6.0)))
    );
    assert_eq!(
        ObjectKind::parse(&object("wall", "", 0.0, 0.0, 64.0, 32.0)),
        Ok(ObjectKind::Wall(Rect::new(0.0, 0.0, 64.0, 32.0)))
    );
    assert_eq!(
        ObjectKind::parse(&object("NPC", "assets/man.png, hi.txt", 100.0, 50.0, 0.0, 0.0)),
        Ok(ObjectKind::Npc { center: Vec2::new(100.0, 50.0), image: "assets/man.png".into(), dialog: "hi.txt".into() })
    );
    assert_eq!(ObjectKind::parse(&object("tree", "", 0.0, 0.0, 1.0, 1.0)), Ok(ObjectKind::Ignored));
}

#[test]
fn warp_type_carries_map_and_optional_spawn() {
    let Ok(ObjectKind::Warp(warp)) = ObjectKind::parse(&object("warp", "house.tmx,128,256", 0.0, 0.0, 64.0, 64.0)) else {
        panic!("not a warp");
    };
    assert_eq!(warp.destination, "house.tmx");
    assert_eq!(warp.spawn, Some(Vec2::new(128.0, 256.0)));

    let Ok(ObjectKind::Warp(warp)) = ObjectKind::parse(&object("warp", "house.tmx", 0.0, 0.0, 64.0, 64.0)) else {
        panic!("not a warp");
    };
    assert_eq!(warp.spawn, None);
}

#[test]
fn malformed_type_strings_are_errors() {
    assert!(ObjectKind::parse(&object("NPC", "just-an-image.png", 0.0, 0.0, 0.0, 0.0)).is_err());
    assert!(ObjectKind::parse(&object("warp", "", 0.0, 0.0, 0.0, 0.0)).is_err());
    assert!(ObjectKind::parse(&object("warp", "a.tmx,1", 0.0, 0.0, 0.0, 0.0)).is_err());
    assert!(ObjectKind::parse(&object("warp", "a.tmx,x,2", 0.0, 0.0, 0.0, 0.0)).is_err());

    let err = build(vec![object("NPC", "nope", 0.0, 0.0, 0.0, 0.0)], Some(Vec2::ZERO)).err();
    assert!(matches!(err, Some(LoadError::BadObject { .. })));
}

#[test]
fn registers_objects_in_map_order() {
    let world = build(
        vec![
            object("wall", "", 0.0, 0.0, 64.0, 64.0),
            object("NPC", "man.png,hi.txt", 300.0, 300.0, 0.0, 0.0),
            object("player", "", 100.0, 100.0, 0.0, 0.0),
            object("wall", "", 500.0, 0.0, 64.0, 64.0),
            object("warp", "next.tmx", 600.0, 600.0, 64.0, 64.0),
        ],
        None,
    )
    .expect("world builds");

    assert_eq!(world.colliders(), &[ColliderRef::Wall(0), ColliderRef::Npc(0), ColliderRef::Wall(1)]);
    assert_eq!(world.obstacles.len(), 2);
    assert_eq!(world.warps.len(), 1);
    assert_eq!(world.player.body.pos, Vec2::new(100.0, 100.0));
    assert_eq!(world.size, Vec2::new(1280.0, 1280.0));
}

#[test]
fn npc_is_centred_and_carries_its_script() {
    let world = build(
        vec![object("player", "", 0.0, 0.0, 0.0, 0.0), object("NPC", "man.png,hi.txt", 300.0, 200.0, 0.0, 0.0)],
        None,
    )
    .expect("world builds");
    let npc = &world.npcs[0];
    assert_eq!(npc.bounds.center(), Vec2::new(300.0, 200.0));
    assert_eq!(npc.bounds.size(), Vec2::splat(48.0));
    assert_eq!(npc.script.lines, vec!["Hello!", "Nice day."]);
}

#[test]
fn missing_dialog_file_fails_the_load() {
    let err = build(
        vec![object("player", "", 0.0, 0.0, 0.0, 0.0), object("NPC", "man.png,missing.txt", 0.0, 0.0, 0.0, 0.0)],
        None,
    )
    .err();
    assert!(matches!(err, Some(LoadError::Io { .. })));
}

#[test]
fn spawn_comes_from_map_or_override() {
    let err = build(vec![object("wall", "", 0.0, 0.0, 1.0, 1.0)], None).err();
    assert!(matches!(err, Some(LoadError::MissingSpawn { .. })));

    let world = build(vec![object("player", "", 10.0, 10.0, 0.0, 0.0)], Some(Vec2::new(640.0, 64.0)))
        .expect("world builds");
    assert_eq!(world.player.body.pos, Vec2::new(640.0, 64.0));
}

#[test]
fn player_collides_with_npcs_too() {
    let mut world = build(
        vec![object("player", "", 0.0, 0.0, 0.0, 0.0), object("NPC", "man.png,hi.txt", 124.0, 24.0, 0.0, 0.0)],
        None,
    )
    .expect("world builds");
    // NPC spans x 100..148; the player starts at 0..48 and walks right.
    for _ in 0..30 {
        world.update_player(1.0 / 60.0, Movement { right: true, ..Default::default() });
    }
    assert_eq!(world.player.rect().right(), 100.0);
}

#[test]
fn facing_point_finds_the_npc_in_front() {
    let mut world = build(
        vec![object("player", "", 0.0, 0.0, 0.0, 0.0), object("NPC", "man.png,hi.txt", 124.0, 24.0, 0.0, 0.0)],
        None,
    )
    .expect("world builds");
    world.player.body.pos = Vec2::new(52.0, 0.0);
    world.player.facing = Direction::East;
    // centre 76 + 48 reach = 124.
    assert_eq!(world.npc_at(world.player.facing_point()), Some(0));

    world.player.facing = Direction::West;
    assert_eq!(world.npc_at(world.player.facing_point()), None);
}

#[test]
fn standing_on_a_warp_triggers_it() {
    let mut world = build(
        vec![object("player", "", 0.0, 0.0, 0.0, 0.0), object("warp", "b.tmx,1,2", 200.0, 0.0, 64.0, 64.0)],
        None,
    )
    .expect("world builds");
    assert!(world.triggered_warp().is_none());
    world.player.body.pos = Vec2::new(180.0, 0.0);
    let warp = world.triggered_warp().expect("on the warp");
    assert_eq!(warp.destination, "b.tmx");
}

#[test]
fn debug_rects_include_walls_warps_and_marker() {
    let world = build(
        vec![
            object("player", "", 0.0, 0.0, 0.0, 0.0),
            object("wall", "", 0.0, 100.0, 10.0, 10.0),
            object("warp", "b.tmx", 200.0, 0.0, 64.0, 64.0),
        ],
        None,
    )
    .expect("world builds");
    let rects = world.debug_rects();
    assert!(rects.contains(&Rect::new(0.0, 100.0, 10.0, 10.0)));
    assert!(rects.contains(&Rect::new(200.0, 0.0, 64.0, 64.0)));
    assert!(rects.contains(&world.player.facing_marker()));
    assert_eq!(world.player.facing_marker().size(), Vec2::splat(7.0));
}
