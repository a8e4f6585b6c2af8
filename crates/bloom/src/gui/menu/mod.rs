pub mod model;
pub mod view;

pub use model::{Controller, Menu};
pub use view::draw;

pub const MAIN_TITLE: &str = "+";
