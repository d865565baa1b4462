use std::sync::Arc;

use compose_app_shell::{default_root_key, AppShell};
use compose_core::useState;
use compose_foundation::{KeyCode, KeyEvent};
use compose_render_pixels::PixelsRenderer;
use compose_runtime_std::ManualClock;
use compose_ui::{
    Column, ColumnSpec, Image, LocalContext, Modifier, Painter, Text, TextField, Toast,
    ToastDuration,
};

fn pump<C: compose_core::Clock>(shell: &mut AppShell<PixelsRenderer, C>) {
    for _ in 0..8 {
        if !shell.should_render() {
            break;
        }
        shell.update();
    }
}

fn clickable_screen() -> impl FnMut() + 'static {
    || {
        Column(Modifier::fill_max_size(), ColumnSpec::default(), || {
            let context = LocalContext().current();
            Image(
                Painter::empty(),
                None,
                Modifier::size_points(100.0, 100.0).then(Modifier::clickable(move |_| {
                    Toast::make_text(&context, "Clicked", ToastDuration::Short).show()
                })),
            );
            Text("below", Modifier::empty());
        });
    }
}

#[test]
fn click_shows_toast_until_its_duration_passes() {
    let clock = Arc::new(ManualClock::new());
    let mut shell = AppShell::with_clock(
        PixelsRenderer::new(),
        default_root_key(),
        Arc::clone(&clock),
        clickable_screen(),
    );
    shell.set_viewport(400.0, 400.0);
    pump(&mut shell);
    assert!(shell.active_toast().is_none());

    shell.set_cursor(50.0, 50.0);
    shell.pointer_pressed();
    assert!(shell.active_toast().is_none());
    shell.pointer_released();
    let toast = shell.active_toast().expect("toast shown").clone();
    assert_eq!(toast.text, "Clicked");
    assert_eq!(toast.duration, ToastDuration::Short);

    clock.advance_millis(1999);
    assert!(shell.active_toast().is_some());
    clock.advance_millis(1);
    assert!(shell.active_toast().is_none());
    assert!(shell.should_render());
    pump(&mut shell);
    assert!(!shell.should_render());
}

#[test]
fn release_outside_the_pressed_node_cancels_the_click() {
    let clock = Arc::new(ManualClock::new());
    let mut shell = AppShell::with_clock(
        PixelsRenderer::new(),
        default_root_key(),
        clock,
        clickable_screen(),
    );
    shell.set_viewport(400.0, 400.0);
    shell.set_cursor(50.0, 50.0);
    shell.pointer_pressed();
    shell.set_cursor(300.0, 300.0);
    shell.pointer_released();
    assert!(shell.active_toast().is_none());
}

#[test]
fn typing_into_a_focused_field_updates_bound_state() {
    let mut shell = AppShell::new(PixelsRenderer::new(), default_root_key(), || {
        let draft = useState(String::new);
        let sink = draft.clone();
        TextField(
            draft.value(),
            move |next| sink.set(next),
            "Name",
            Modifier::size_points(200.0, 40.0),
        );
    });
    shell.set_viewport(400.0, 400.0);
    shell.set_cursor(10.0, 10.0);
    shell.pointer_pressed();
    shell.pointer_released();
    assert!(shell.focused().is_some());

    for ch in "Ada".chars() {
        shell.key_pressed(KeyEvent::character(ch));
        pump(&mut shell);
    }
    shell.key_pressed(KeyEvent::new(KeyCode::Backspace));
    pump(&mut shell);

    assert_eq!(visible_texts(&shell), vec!["Ad".to_string()]);

    shell.key_pressed(KeyEvent::new(KeyCode::Escape));
    assert!(shell.focused().is_none());
}

fn visible_texts<C: compose_core::Clock>(shell: &AppShell<PixelsRenderer, C>) -> Vec<String> {
    let layout = shell.layout().expect("layout");
    compose_ui::HeadlessRenderer::new()
        .render(layout)
        .texts()
        .map(str::to_string)
        .collect()
}

#[test]
fn newest_toast_replaces_the_active_one() {
    let mut shell = AppShell::new(PixelsRenderer::new(), default_root_key(), || {
        Text("host", Modifier::empty());
    });
    let context = shell.context().clone();
    Toast::make_text(&context, "first", ToastDuration::Long).show();
    Toast::make_text(&context, "second", ToastDuration::Short).show();
    assert!(shell.should_render());
    shell.update();
    assert_eq!(shell.active_toast().map(|toast| toast.text.as_str()), Some("second"));
}
