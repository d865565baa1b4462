//! Drawable lookup for composables.

#![allow(non_snake_case)]

use std::rc::Rc;

use compose_assets::{ImageVector, ResourceId, ResourceRegistry};
use compose_core::{staticCompositionLocalOf, StaticCompositionLocal};
use compose_ui_graphics::Size;

/// Something an `Image` can draw. An empty painter has no intrinsic size
/// and paints nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Painter {
    vector: Option<Rc<ImageVector>>,
}

impl Painter {
    pub fn vector(vector: ImageVector) -> Self {
        Self {
            vector: Some(Rc::new(vector)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_none()
    }

    pub fn image_vector(&self) -> Option<&ImageVector> {
        self.vector.as_deref()
    }

    pub fn intrinsic_size(&self) -> Size {
        self.vector
            .as_ref()
            .map(|vector| vector.default_size)
            .unwrap_or(Size::ZERO)
    }

    pub fn name(&self) -> &str {
        self.vector
            .as_ref()
            .map(|vector| vector.name.as_str())
            .unwrap_or("")
    }
}

thread_local! {
    static LOCAL_RESOURCES: StaticCompositionLocal<Rc<ResourceRegistry>> =
        staticCompositionLocalOf(|| Rc::new(ResourceRegistry::new()));
}

pub fn LocalResources() -> StaticCompositionLocal<Rc<ResourceRegistry>> {
    LOCAL_RESOURCES.with(Clone::clone)
}

/// Resolves drawable `id` through [`LocalResources`]. An unknown id is
/// logged and yields an empty painter.
pub fn painterResource(id: ResourceId) -> Painter {
    let registry = LocalResources().current();
    let cached = compose_core::remember(|| None::<(ResourceId, Rc<ResourceRegistry>, Painter)>);
    if let Some(painter) = cached.with(|entry| match entry {
        Some((cached_id, source, painter)) if *cached_id == id && Rc::ptr_eq(source, &registry) => {
            Some(painter.clone())
        }
        _ => None,
    }) {
        return painter;
    }
    let painter = match registry.resolve(id) {
        Ok(vector) => Painter::vector(vector),
        Err(err) => {
            log::error!("{err}");
            Painter::empty()
        }
    };
    cached.update(|entry| *entry = Some((id, registry, painter.clone())));
    painter
}
