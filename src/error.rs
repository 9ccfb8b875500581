use std::fmt;
use std::path::{Path, PathBuf};

/// Failure while loading something from disk: a config, a map, its tileset
/// images, an NPC sprite or dialog script, or the font.
///
/// These are reported once when a map is loaded. Nothing inside the frame loop
/// produces a `LoadError`.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    Io { path: PathBuf, source: std::io::Error },
    /// The file was read but is not valid JSON of the expected shape.
    Format { path: PathBuf, source: serde_json::Error },
    /// The map or one of its tilesets could not be read or parsed.
    Map { path: PathBuf, source: tiled::Error },
    /// An image referenced by the map or an NPC could not be decoded.
    Image { path: PathBuf, source: image::ImageError },
    /// The font file was read but could not be parsed.
    Font { path: PathBuf, reason: String },
    /// The map has no `player` object and no spawn point was supplied.
    MissingSpawn { path: PathBuf },
    /// A map object's type string could not be understood.
    BadObject { path: PathBuf, reason: String },
    /// The map uses a feature the loader does not handle.
    Unsupported { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io { path: path.as_ref().to_path_buf(), source }
    }

    pub fn format(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Format { path: path.as_ref().to_path_buf(), source }
    }

    pub fn map(path: impl AsRef<Path>, source: tiled::Error) -> Self {
        Self::Map { path: path.as_ref().to_path_buf(), source }
    }

    pub fn image(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Image { path: path.as_ref().to_path_buf(), source }
    }

    pub fn unsupported(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Unsupported { path: path.as_ref().to_path_buf(), reason: reason.into() }
    }

    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Format { path, .. }
            | Self::Map { path, .. }
            | Self::Image { path, .. }
            | Self::Font { path, .. }
            | Self::MissingSpawn { path }
            | Self::BadObject { path, .. }
            | Self::Unsupported { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Format { path, source } => write!(f, "malformed {}: {source}", path.display()),
            Self::Map { path, source } => write!(f, "cannot load map {}: {source}", path.display()),
            Self::Image { path, source } => write!(f, "cannot decode image {}: {source}", path.display()),
            Self::Font { path, reason } => write!(f, "cannot parse font {}: {reason}", path.display()),
            Self::MissingSpawn { path } => write!(f, "map {} has no player object", path.display()),
            Self::BadObject { path, reason } => write!(f, "bad object in {}: {reason}", path.display()),
            Self::Unsupported { path, reason } => write!(f, "unsupported map {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
            Self::Map { source, .. } => Some(source),
            Self::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}
