#![allow(non_snake_case)]

use std::rc::Rc;

use compose_core::{useState, CompositionLocalProvider};
use compose_ui::{
    composable, painterResource, Color, Column, ColumnSpec, HorizontalAlignment, Image,
    LocalContext, LocalResources, MaterialTheme, Modifier, ResourceRegistry, Row, RowSpec,
    RoundedCornerShape, Surface, Text, TextField, Toast, ToastDuration,
};

use crate::config::{GreetingConfig, LocalGreetingConfig};
use crate::resources::R;
use crate::theme::MyComposeTheme;

pub const BORN: &str = "1998";
pub const CLICKED: &str = "Clicked";
const SPACING: f32 = 4.0;
const IMAGE_CORNER: f32 = 8.0;

/// Whole screen: resources, config and theme around a background surface
/// holding the greeting.
#[composable]
pub fn MyComposeApp(name: &str, resources: Rc<ResourceRegistry>, config: GreetingConfig) {
    CompositionLocalProvider(
        [
            LocalResources().provides(resources),
            LocalGreetingConfig().provides(config),
        ],
        || {
            MyComposeTheme(|| {
                Surface(
                    Modifier::empty(),
                    MaterialTheme::colors().background,
                    || {
                        Greeting(name);
                    },
                );
            });
        },
    );
}

/// Launcher image followed by the name and birth year rows. Tapping the
/// image shows a short "Clicked" toast.
#[composable]
pub fn Greeting(name: &str) {
    let draft = useState(String::new);
    let config = LocalGreetingConfig().current();
    MyComposeTheme(|| {
        Column(
            Modifier::padding(SPACING)
                .then(Modifier::fill_max_height())
                .then(Modifier::fill_max_width()),
            ColumnSpec::new().horizontal_alignment(HorizontalAlignment::CenterHorizontally),
            || {
                if config.show_name_field {
                    let sink = draft.clone();
                    TextField(
                        draft.value(),
                        move |next| sink.set(next),
                        "Name",
                        Modifier::fill_max_width(),
                    );
                }
                let context = LocalContext().current();
                Image(
                    painterResource(R::drawable::IC_LAUNCHER_FOREGROUND),
                    None,
                    Modifier::fill_max_width()
                        .then(Modifier::clip(RoundedCornerShape::uniform(IMAGE_CORNER)))
                        .then(Modifier::background(Color::BLUE))
                        .then(Modifier::clickable(move |_| {
                            Toast::make_text(&context, CLICKED, ToastDuration::Short).show()
                        })),
                );
                Row(Modifier::padding(SPACING), RowSpec::new(), || {
                    Text("Name:", Modifier::empty());
                    Text(name, Modifier::empty());
                });
                Row(Modifier::padding(SPACING), RowSpec::new(), || {
                    Text("Born:", Modifier::empty());
                    Text(BORN, Modifier::empty());
                });
            },
        );
    });
}

/// Design-time rendition with a placeholder name.
#[composable]
pub fn GreetingPreview() {
    MyComposeTheme(|| {
        Greeting("Name");
    });
}
