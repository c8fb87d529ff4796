pub mod components;
pub mod labels;
pub mod layout;
pub mod line_input;
pub mod render;
pub mod theme;
