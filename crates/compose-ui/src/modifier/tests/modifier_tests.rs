use super::{Color, DimensionConstraint, EdgeInsets, Modifier, RoundedCornerShape};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn padding_values_accumulate_per_edge() {
    let modifier = Modifier::padding(4.0)
        .then(Modifier::padding_symmetric(2.0, 0.0))
        .then(Modifier::padding_each(1.0, 3.0, 5.0, 7.0));
    assert_eq!(
        modifier.padding_values(),
        EdgeInsets {
            left: 7.0,
            top: 7.0,
            right: 11.0,
            bottom: 11.0,
        }
    );
}

#[test]
fn fill_fractions_are_clamped() {
    let props = Modifier::fill_max_width_fraction(1.5)
        .then(Modifier::fill_max_height_fraction(-0.5))
        .layout_properties();
    assert_eq!(props.width(), DimensionConstraint::Fraction(1.0));
    assert_eq!(props.height(), DimensionConstraint::Fraction(0.0));
}

#[test]
fn later_size_operations_win() {
    let modifier = Modifier::fill_max_width().then(Modifier::width(40.0));
    assert_eq!(
        modifier.layout_properties().width(),
        DimensionConstraint::Points(40.0)
    );
    assert_eq!(modifier.explicit_size(), None);
    assert!(Modifier::size_points(10.0, 20.0).explicit_size().is_some());
}

#[test]
fn drawing_queries_read_the_chain() {
    let modifier = Modifier::fill_max_width()
        .then(Modifier::clip(RoundedCornerShape::uniform(8.0)))
        .then(Modifier::background(Color::BLUE));
    assert_eq!(modifier.background_color(), Some(Color::BLUE));
    assert_eq!(
        modifier.clip_shape(),
        Some(RoundedCornerShape::uniform(8.0))
    );
    assert!(modifier.click_handler().is_none());
}

#[test]
fn clickable_handler_is_shared_by_clones() {
    let clicks = Rc::new(Cell::new(0));
    let modifier = Modifier::clickable({
        let clicks = Rc::clone(&clicks);
        move |_| clicks.set(clicks.get() + 1)
    });
    let copy = modifier.clone();
    assert_eq!(modifier, copy);
    if let Some(handler) = copy.click_handler() {
        handler(super::Point::ZERO);
    }
    assert_eq!(clicks.get(), 1);
}

#[test]
fn then_with_empty_side_returns_other_chain() {
    let modifier = Modifier::padding(2.0);
    assert_eq!(Modifier::empty().then(modifier.clone()), modifier);
    assert_eq!(modifier.then(Modifier::empty()), modifier);
}
