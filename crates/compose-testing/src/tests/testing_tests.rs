use super::*;
use compose_core::useState;
use compose_ui::{
    Column, ColumnSpec, Image, Modifier, Painter, Text, TextField, Toast, ToastDuration,
};

fn clickable_image() {
    let context = LocalContext().current();
    Column(Modifier::empty(), ColumnSpec::new(), move || {
        Image(
            Painter::empty(),
            Some("launcher"),
            Modifier::size_points(48.0, 48.0).then(Modifier::clickable(move |_| {
                Toast::make_text(&context, "Clicked", ToastDuration::Short).show()
            })),
        );
        Text("Born:", Modifier::empty());
    });
}

#[test]
fn finds_nodes_by_text_and_description() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(clickable_image).expect("render");

    rule.on_node_with_text("Born:").assert_exists();
    rule.on_node_with_text("Died:").assert_does_not_exist();
    let image = rule.on_node_with_content_description("launcher");
    image.assert_exists();
    assert_eq!(image.bounds().map(|rect| rect.width), Some(48.0));
}

#[test]
fn click_records_toast_without_rendering() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(clickable_image).expect("render");
    assert!(rule.toasts().is_empty());

    rule.on_node_with_content_description("launcher").perform_click();

    let toasts = rule.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "Clicked");
    assert_eq!(toasts[0].duration, ToastDuration::Short);
    assert_eq!(rule.render_count(), 1);
}

#[test]
#[should_panic(expected = "not clickable")]
fn clicking_plain_text_panics() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(clickable_image).expect("render");
    rule.on_node_with_text("Born:").perform_click();
}

#[test]
fn typed_text_shows_after_pump() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(|| {
        let name = useState(String::new);
        let sink = name.clone();
        TextField(name.value(), move |next| sink.set(next), "Name", Modifier::empty());
    })
    .expect("render");

    rule.on_node_with_text("Name").perform_text_input("Ada");
    rule.pump_until_idle().expect("pump");

    rule.on_node_with_text("Ada").assert_exists();
    assert!(rule.visible_texts().contains(&"Ada".to_string()));
}

#[test]
fn empty_rule_has_no_layout() {
    let rule = ComposeTestRule::new();
    assert!(rule.layout(Size::new(100.0, 100.0)).is_err());
    rule.on_node_with_text("anything").assert_does_not_exist();
}
