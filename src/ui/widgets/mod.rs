//! Custom widgets

pub mod uv_bar;

pub use uv_bar::UvBar;
