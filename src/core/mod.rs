pub mod color;
pub mod console;
pub mod input;
pub mod tileset;

pub use color::Color;
pub use console::{Cell, Console};
pub use input::{direction_for, Event, Key};
pub use tileset::Tileset;
