pub mod canvas_view;
pub mod flex;
pub mod text;
