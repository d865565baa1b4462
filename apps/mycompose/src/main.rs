use std::rc::Rc;

use compose_app::ComposeAppBuilder;
use mycompose::{registry, GreetingConfig, MyComposeApp};

const WINDOW_WIDTH: u32 = 420;
const WINDOW_HEIGHT: u32 = 760;

fn main() {
    env_logger::init();

    let resources = Rc::new(registry());
    let config = GreetingConfig::from_env();
    log::info!("starting MyCompose ({} drawables, {config:?})", resources.len());

    ComposeAppBuilder::new()
        .title("MyCompose")
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .run(move || {
            MyComposeApp("Android", Rc::clone(&resources), config);
        })
}
