//! Greeting card demo: a themed column with a clickable launcher image and
//! two labelled rows.

pub mod config;
pub mod greeting;
pub mod resources;
pub mod theme;

pub use config::{GreetingConfig, LocalGreetingConfig, NAME_FIELD_ENV_VAR};
pub use greeting::{Greeting, GreetingPreview, MyComposeApp, BORN, CLICKED};
pub use resources::{launcher_foreground, registry, R};
pub use theme::{light_colors, MyComposeTheme};
