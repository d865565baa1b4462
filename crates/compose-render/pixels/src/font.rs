//! Font discovery for the rasterizer. Nothing is bundled: the font comes
//! from an explicit source, the `MYCOMPOSE_FONT` variable or one of the
//! usual system locations.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::{Lazy, OnceCell};
use rusttype::Font;

pub const FONT_ENV_VAR: &str = "MYCOMPOSE_FONT";

const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/roboto/unhinted/RobotoTTF/Roboto-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    /// `MYCOMPOSE_FONT` when set, otherwise the first system font found.
    #[default]
    System,
}

#[derive(Debug)]
pub enum FontError {
    Io { path: PathBuf, source: io::Error },
    Invalid { origin: String },
    NotFound,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io { path, source } => {
                write!(f, "failed to read font {}: {source}", path.display())
            }
            FontError::Invalid { origin } => write!(f, "{origin} is not a TrueType font"),
            FontError::NotFound => write!(
                f,
                "no font found; set {FONT_ENV_VAR} to the path of a .ttf file"
            ),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl FontSource {
    pub fn load(&self) -> Result<Font<'static>, FontError> {
        match self {
            FontSource::Path(path) => load_path(path),
            FontSource::Bytes(bytes) => Font::try_from_vec(bytes.clone()).ok_or(FontError::Invalid {
                origin: "in-memory font".to_string(),
            }),
            FontSource::System => {
                if let Some(path) = std::env::var_os(FONT_ENV_VAR) {
                    return load_path(Path::new(&path));
                }
                SYSTEM_FONT_PATHS
                    .iter()
                    .map(Path::new)
                    .filter(|path| path.is_file())
                    .find_map(|path| match load_path(path) {
                        Ok(font) => Some(font),
                        Err(err) => {
                            log::debug!("skipping {}: {err}", path.display());
                            None
                        }
                    })
                    .ok_or(FontError::NotFound)
            }
        }
    }
}

fn load_path(path: &Path) -> Result<Font<'static>, FontError> {
    let bytes = fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| FontError::Invalid {
        origin: path.display().to_string(),
    })
}

static INSTALLED: OnceCell<Font<'static>> = OnceCell::new();

static SYSTEM_FONT: Lazy<Option<Font<'static>>> = Lazy::new(|| match FontSource::System.load() {
    Ok(font) => Some(font),
    Err(err) => {
        log::warn!("{err}; text is drawn as blocks");
        None
    }
});

/// Makes `source` the font used for all later text drawing. Only the first
/// installed font is kept.
pub fn install_font(source: &FontSource) -> Result<(), FontError> {
    let font = source.load()?;
    if INSTALLED.set(font).is_err() {
        log::warn!("a font is already installed; keeping it");
    }
    Ok(())
}

pub(crate) fn font() -> Option<&'static Font<'static>> {
    INSTALLED.get().or_else(|| SYSTEM_FONT.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = FontSource::Bytes(vec![0, 1, 2, 3]).load().err();
        assert!(matches!(err, Some(FontError::Invalid { .. })));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = PathBuf::from("/definitely/not/here.ttf");
        match FontSource::Path(path.clone()).load() {
            Err(FontError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {:?}", other.err()),
        }
    }
}
