// =============================================================================
// MAP: Tiled maps
//
// Parsing (TMX/TSX, CSV or base64/zlib/zstd layer data, flip flags) is done by
// the `tiled` crate. This module flattens what it returns into the few things
// the game needs, and bakes the tile layers into two images when a map is
// entered:
//
//   background()  every visible tile layer except the overlay, drawn under
//                 the sprites
//   overlay()     the layer named `walls2`, drawn over the sprites so the
//                 player can walk behind wall tops
//
// Objects are handed to the world builder as plain records.
// =============================================================================

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{imageops, Rgba, RgbaImage};
use tiled::{LayerType, Loader, ObjectShape, Orientation};

use crate::error::LoadError;
use crate::geometry::Rect;

/// Name of the tile layer drawn above the sprites.
pub const OVERLAY_LAYER: &str = "walls2";

/// Largest map, in pixels, that will be baked into images.
pub const MAX_MAP_PIXELS: u64 = 16_384 * 16_384;

// ── Objects ──────────────────────────────────────────────────────────────────

/// An object from one of the map's object groups.
#[derive(Clone, Debug, PartialEq)]
pub struct MapObject {
    pub name: String,
    /// Free-form type string (`type` or `class` in Tiled). NPCs and warps
    /// encode their parameters here.
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl MapObject {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn from_tiled(object: &tiled::ObjectData) -> Self {
        let (width, height) = match &object.shape {
            ObjectShape::Rect { width, height } | ObjectShape::Ellipse { width, height } => {
                (*width, *height)
            }
            _ => (0.0, 0.0),
        };
        Self {
            name: object.name.clone(),
            kind: object.user_type.clone(),
            x: object.x,
            y: object.y,
            width,
            height,
        }
    }
}

// ── Tile layers ──────────────────────────────────────────────────────────────

/// One placed tile: which tileset, and the tile's local id inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub tileset: usize,
    pub id: u32,
}

#[derive(Clone, Debug)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major cells. Flip flags are already stripped.
    pub cells: Vec<Option<TileRef>>,
    /// Own visibility AND-ed with that of every enclosing group.
    pub visible: bool,
}

impl TileLayer {
    /// Non-empty cells as `(column, row, tile)`.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, TileRef)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|tile| (i as u32 % width, i as u32 / width, tile)))
    }

    pub fn tile_at(&self, col: u32, row: u32) -> Option<TileRef> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get((row * self.width + col) as usize).copied().flatten()
    }
}

// ── Tilesets ─────────────────────────────────────────────────────────────────

/// A tileset cut from a single image.
#[derive(Clone, Debug)]
pub struct Tileset {
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub tile_count: u32,
    pub margin: u32,
    pub spacing: u32,
    /// Image file, relative to the working directory.
    pub image_source: PathBuf,
    /// Decoded image, filled in by [`TiledMap::load`].
    pub image: Option<RgbaImage>,
}

impl Tileset {
    /// Pixel origin of local tile `id` inside the tileset image.
    pub fn tile_origin(&self, id: u32) -> Option<(u32, u32)> {
        if id >= self.tile_count || self.columns == 0 {
            return None;
        }
        let col = id % self.columns;
        let row = id / self.columns;
        Some((
            self.margin + col * (self.tile_width + self.spacing),
            self.margin + row * (self.tile_height + self.spacing),
        ))
    }

    /// Copy of the tile's pixels, or `None` when the image is not loaded or
    /// the tile lies outside it.
    pub fn tile_image(&self, id: u32) -> Option<RgbaImage> {
        let image = self.image.as_ref()?;
        let (x, y) = self.tile_origin(id)?;
        if x + self.tile_width > image.width() || y + self.tile_height > image.height() {
            return None;
        }
        Some(imageops::crop_imm(image, x, y, self.tile_width, self.tile_height).to_image())
    }

    fn from_tiled(tileset: &tiled::Tileset, path: &Path) -> Result<Self, LoadError> {
        let Some(image) = tileset.image.as_ref() else {
            return Err(LoadError::unsupported(
                path,
                format!("tileset '{}' is an image collection", tileset.name),
            ));
        };
        Ok(Self {
            name: tileset.name.clone(),
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
            columns: tileset.columns.max(1),
            tile_count: tileset.tilecount,
            margin: tileset.margin,
            spacing: tileset.spacing,
            image_source: image.source.clone(),
            image: None,
        })
    }
}

// ── TiledMap ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TiledMap {
    pub path: PathBuf,
    /// Size in tiles.
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pixel_width: u32,
    pixel_height: u32,
    pub layers: Vec<TileLayer>,
    /// Objects of every object group, in file order.
    pub objects: Vec<MapObject>,
    pub tilesets: Vec<Tileset>,
}

impl TiledMap {
    /// Parse a TMX document held in memory. Tilesets must be embedded; their
    /// images are left unloaded. `path` names the document in errors.
    pub fn from_tmx(xml: &str, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path.to_path_buf();
        let bytes = xml.as_bytes().to_vec();
        let mut loader = Loader::with_reader(move |requested: &Path| -> std::io::Result<_> {
            if requested == name.as_path() {
                Ok(Cursor::new(bytes.clone()))
            } else {
                Err(std::io::ErrorKind::NotFound.into())
            }
        });
        let map = loader.load_tmx_map(path).map_err(|e| LoadError::map(path, e))?;
        Self::from_tiled(&map, path)
    }

    /// Read a map file, the external tilesets it references, and every
    /// tileset image.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let map = Loader::new()
            .load_tmx_map(path)
            .map_err(|e| LoadError::map(path, e))?;

        let mut map = Self::from_tiled(&map, path)?;
        for tileset in &mut map.tilesets {
            let image = image::open(&tileset.image_source)
                .map_err(|e| LoadError::image(&tileset.image_source, e))?;
            tileset.image = Some(image.to_rgba8());
        }

        log::info!(
            "loaded map {} ({}x{} tiles, {} layers, {} objects)",
            path.display(),
            map.width,
            map.height,
            map.layers.len(),
            map.objects.len()
        );
        Ok(map)
    }

    fn from_tiled(map: &tiled::Map, path: &Path) -> Result<Self, LoadError> {
        if map.infinite() {
            return Err(LoadError::unsupported(path, "infinite maps are not supported"));
        }
        if map.orientation != Orientation::Orthogonal {
            return Err(LoadError::unsupported(
                path,
                format!("{:?} orientation is not supported", map.orientation),
            ));
        }
        let (pixel_width, pixel_height) =
            pixel_size(map.width, map.height, map.tile_width, map.tile_height).ok_or_else(|| {
                LoadError::unsupported(
                    path,
                    format!(
                        "{}x{} tiles of {}x{} px is too large",
                        map.width, map.height, map.tile_width, map.tile_height
                    ),
                )
            })?;

        let mut layers = Vec::new();
        let mut objects = Vec::new();
        flatten_layers(map.layers(), true, path, &mut layers, &mut objects)?;

        let tilesets = map
            .tilesets()
            .iter()
            .map(|ts| Tileset::from_tiled(ts, path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            width: map.width,
            height: map.height,
            tile_width: map.tile_width,
            tile_height: map.tile_height,
            pixel_width,
            pixel_height,
            layers,
            objects,
            tilesets,
        })
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Every visible tile layer except [`OVERLAY_LAYER`], composited in file
    /// order onto an opaque black image of the map's pixel size.
    pub fn background(&self) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(
            self.pixel_width,
            self.pixel_height,
            Rgba([0, 0, 0, 255]),
        );
        let layers = self
            .layers
            .iter()
            .filter(|layer| layer.visible && layer.name != OVERLAY_LAYER);
        self.composite(&mut image, layers);
        image
    }

    /// The [`OVERLAY_LAYER`] alone on a transparent image. Fully transparent
    /// when the map has no such layer.
    pub fn overlay(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixel_width, self.pixel_height);
        self.composite(&mut image, self.layer(OVERLAY_LAYER).into_iter());
        image
    }

    fn composite<'a>(&self, target: &mut RgbaImage, layers: impl Iterator<Item = &'a TileLayer>) {
        let mut cache: HashMap<TileRef, Option<RgbaImage>> = HashMap::new();
        for layer in layers {
            for (col, row, tile) in layer.tiles() {
                let image = cache.entry(tile).or_insert_with(|| {
                    let image = self.tilesets.get(tile.tileset).and_then(|ts| ts.tile_image(tile.id));
                    if image.is_none() {
                        log::warn!(
                            "{}: no image for tile {} of tileset {}",
                            self.path.display(),
                            tile.id,
                            tile.tileset
                        );
                    }
                    image
                });
                if let Some(image) = image.as_ref() {
                    imageops::overlay(
                        target,
                        image,
                        i64::from(col) * i64::from(self.tile_width),
                        i64::from(row) * i64::from(self.tile_height),
                    );
                }
            }
        }
    }
}

/// Map size in pixels, or `None` when it overflows or exceeds
/// [`MAX_MAP_PIXELS`].
fn pixel_size(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Option<(u32, u32)> {
    let pixel_width = width.checked_mul(tile_width)?;
    let pixel_height = height.checked_mul(tile_height)?;
    (u64::from(pixel_width) * u64::from(pixel_height) <= MAX_MAP_PIXELS)
        .then_some((pixel_width, pixel_height))
}

fn flatten_layers<'map>(
    source: impl Iterator<Item = tiled::Layer<'map>>,
    parent_visible: bool,
    path: &Path,
    layers: &mut Vec<TileLayer>,
    objects: &mut Vec<MapObject>,
) -> Result<(), LoadError> {
    for layer in source {
        let visible = parent_visible && layer.visible;
        match layer.layer_type() {
            LayerType::Tiles(tiled::TileLayer::Finite(tiles)) => {
                let (width, height) = (tiles.width(), tiles.height());
                let mut cells = Vec::with_capacity(width as usize * height as usize);
                for row in 0..height {
                    for col in 0..width {
                        let cell = tiles.get_tile(col as i32, row as i32).map(|tile| TileRef {
                            tileset: tile.tileset_index(),
                            id: tile.id(),
                        });
                        cells.push(cell);
                    }
                }
                layers.push(TileLayer { name: layer.name.clone(), width, height, cells, visible });
            }
            LayerType::Tiles(tiled::TileLayer::Infinite(_)) => {
                return Err(LoadError::unsupported(
                    path,
                    format!("layer '{}' is infinite", layer.name),
                ));
            }
            LayerType::Objects(group) => {
                objects.extend(group.objects().map(|object| MapObject::from_tiled(&object)));
            }
            LayerType::Group(group) => {
                flatten_layers(group.layers(), visible, path, layers, objects)?;
            }
            LayerType::Image(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset(columns: u32, count: u32) -> Tileset {
        Tileset {
            name: "t".into(),
            tile_width: 2,
            tile_height: 2,
            columns,
            tile_count: count,
            margin: 0,
            spacing: 0,
            image_source: PathBuf::new(),
            image: None,
        }
    }

    #[test]
    fn tile_origin_walks_rows() {
        let ts = tileset(3, 6);
        assert_eq!(ts.tile_origin(0), Some((0, 0)));
        assert_eq!(ts.tile_origin(2), Some((4, 0)));
        assert_eq!(ts.tile_origin(3), Some((0, 2)));
        assert_eq!(ts.tile_origin(6), None);
    }

    #[test]
    fn tile_origin_honours_margin_and_spacing() {
        let mut ts = tileset(2, 4);
        ts.margin = 1;
        ts.spacing = 2;
        assert_eq!(ts.tile_origin(1), Some((5, 1)));
        assert_eq!(ts.tile_origin(2), Some((1, 5)));
    }

    #[test]
    fn layer_tiles_skip_empty_cells() {
        let a = TileRef { tileset: 0, id: 4 };
        let b = TileRef { tileset: 1, id: 0 };
        let layer = TileLayer {
            name: "ground".into(),
            width: 2,
            height: 2,
            cells: vec![None, Some(a), Some(b), None],
            visible: true,
        };
        let tiles: Vec<_> = layer.tiles().collect();
        assert_eq!(tiles, vec![(1, 0, a), (0, 1, b)]);
        assert_eq!(layer.tile_at(0, 1), Some(b));
        assert_eq!(layer.tile_at(2, 0), None);
    }

    #[test]
    fn pixel_size_rejects_overflow_and_huge_maps() {
        assert_eq!(pixel_size(20, 10, 64, 64), Some((1280, 640)));
        assert_eq!(pixel_size(u32::MAX, 1, 64, 64), None);
        assert_eq!(pixel_size(1000, 1000, 64, 64), None);
    }
}
