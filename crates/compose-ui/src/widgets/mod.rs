//! UI Widget components

pub mod box_widget;
pub mod column;
pub mod image;
pub mod layout;
pub mod nodes;
pub mod row;
pub mod surface;
pub mod text;
pub mod text_field;

pub use box_widget::*;
pub use column::*;
pub use image::*;
pub use layout::*;
pub use nodes::*;
pub use row::*;
pub use surface::*;
pub use text::*;
pub use text_field::*;
