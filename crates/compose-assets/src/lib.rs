//! Drawable resources for MyCompose.
//!
//! Applications register their drawables under stable [`ResourceId`]s and
//! the UI layer resolves them at composition time. Drawables are simple
//! vector images made of filled shapes, which is enough for launcher style
//! artwork and keeps the renderers free of any image decoding.

use std::fmt;

use compose_ui_graphics::{Color, Rect, Size};
use indexmap::IndexMap;

/// Stable identifier of a drawable, the Rust counterpart of `R.drawable.*`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathShape {
    Rect,
    RoundRect { radius: f32 },
    Oval,
}

/// One filled shape of an [`ImageVector`], in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorPath {
    pub shape: PathShape,
    pub bounds: Rect,
    pub fill: Color,
}

impl VectorPath {
    pub fn rect(bounds: Rect, fill: Color) -> Self {
        Self {
            shape: PathShape::Rect,
            bounds,
            fill,
        }
    }

    pub fn round_rect(bounds: Rect, radius: f32, fill: Color) -> Self {
        Self {
            shape: PathShape::RoundRect { radius },
            bounds,
            fill,
        }
    }

    pub fn oval(bounds: Rect, fill: Color) -> Self {
        Self {
            shape: PathShape::Oval,
            bounds,
            fill,
        }
    }
}

/// Vector drawable with an intrinsic size (dp) and a viewport that its
/// paths are expressed in.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageVector {
    pub name: String,
    pub default_size: Size,
    pub viewport: Size,
    pub paths: Vec<VectorPath>,
}

impl ImageVector {
    pub fn new(name: impl Into<String>, default_size: Size, viewport: Size) -> Self {
        Self {
            name: name.into(),
            default_size,
            viewport,
            paths: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: VectorPath) -> Self {
        self.paths.push(path);
        self
    }

    /// Width over height of the intrinsic size; 1.0 for degenerate sizes.
    pub fn aspect_ratio(&self) -> f32 {
        if self.default_size.width > 0.0 && self.default_size.height > 0.0 {
            self.default_size.width / self.default_size.height
        } else {
            1.0
        }
    }

    /// Paths mapped from the viewport into `target`.
    pub fn paths_in(&self, target: Rect) -> Vec<VectorPath> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Vec::new();
        }
        let sx = target.width / self.viewport.width;
        let sy = target.height / self.viewport.height;
        self.paths
            .iter()
            .map(|path| {
                let bounds = Rect {
                    x: target.x + path.bounds.x * sx,
                    y: target.y + path.bounds.y * sy,
                    width: path.bounds.width * sx,
                    height: path.bounds.height * sy,
                };
                let shape = match path.shape {
                    PathShape::RoundRect { radius } => PathShape::RoundRect {
                        radius: radius * sx.min(sy),
                    },
                    other => other,
                };
                VectorPath {
                    shape,
                    bounds,
                    fill: path.fill,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    NotFound(ResourceId),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(id) => write!(f, "drawable resource {id} not found"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Lookup table from [`ResourceId`] to drawable, in registration order.
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    drawables: IndexMap<ResourceId, ImageVector>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `vector` under `id`, returning the drawable it replaced.
    pub fn register(&mut self, id: ResourceId, vector: ImageVector) -> Option<ImageVector> {
        let previous = self.drawables.insert(id, vector);
        if previous.is_some() {
            log::warn!("drawable {id} registered twice; keeping the latest");
        }
        previous
    }

    pub fn with(mut self, id: ResourceId, vector: ImageVector) -> Self {
        self.register(id, vector);
        self
    }

    pub fn resolve(&self, id: ResourceId) -> Result<ImageVector, ResourceError> {
        self.drawables
            .get(&id)
            .cloned()
            .ok_or(ResourceError::NotFound(id))
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.drawables.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.drawables.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ImageVector {
        ImageVector::new("square", Size::new(48.0, 24.0), Size::new(10.0, 10.0)).with_path(
            VectorPath::round_rect(
                Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 5.0,
                    height: 10.0,
                },
                2.0,
                Color::WHITE,
            ),
        )
    }

    #[test]
    fn resolve_unknown_id_reports_not_found() {
        let registry = ResourceRegistry::new();
        let err = registry.resolve(ResourceId(7)).expect_err("missing");
        assert_eq!(err, ResourceError::NotFound(ResourceId(7)));
        assert_eq!(err.to_string(), "drawable resource #00000007 not found");
    }

    #[test]
    fn register_replaces_and_returns_previous() {
        let mut registry = ResourceRegistry::new();
        assert!(registry.register(ResourceId(1), square()).is_none());
        assert!(registry.register(ResourceId(1), square()).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(ResourceId(1)).expect("found").name, "square");
    }

    #[test]
    fn paths_scale_from_viewport_into_target() {
        let vector = square();
        assert_eq!(vector.aspect_ratio(), 2.0);
        let paths = vector.paths_in(Rect {
            x: 100.0,
            y: 0.0,
            width: 20.0,
            height: 40.0,
        });
        assert_eq!(
            paths[0].bounds,
            Rect {
                x: 100.0,
                y: 0.0,
                width: 10.0,
                height: 40.0
            }
        );
        assert_eq!(paths[0].shape, PathShape::RoundRect { radius: 4.0 });
    }
}
