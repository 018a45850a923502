pub mod headless;
pub mod terminal;
pub mod window;

use crate::core::{Console, Event, Tileset};
use crate::error::Result;
use crate::DisplayTarget;

pub use headless::HeadlessContext;
pub use terminal::TerminalContext;
pub use window::WindowContext;

/// An open presentation surface plus the input queue that comes with it.
pub trait Context {
    /// Show `console` as the next frame.
    fn present(&mut self, console: &Console) -> Result<()>;
    /// Drain whatever input arrived since the last call, without blocking.
    fn poll_events(&mut self) -> Vec<Event>;
}

/// Fixed display parameters handed to the backend at startup.
#[derive(Debug, Clone)]
pub struct ContextParams {
    pub title: String,
    pub columns: usize,
    pub rows: usize,
    pub vsync: bool,
    pub resizable: bool,
    pub target: DisplayTarget,
}

pub fn new_context(params: &ContextParams, tileset: Tileset) -> Result<Box<dyn Context>> {
    log::info!(
        "Opening {:?} context \"{}\" ({}x{} cells, vsync: {})",
        params.target,
        params.title,
        params.columns,
        params.rows,
        params.vsync
    );
    match params.target {
        DisplayTarget::Window => Ok(Box::new(WindowContext::new(params, tileset)?)),
        DisplayTarget::Terminal => Ok(Box::new(TerminalContext::new(params)?)),
    }
}
