mod winbuffer;
pub use winbuffer::WinBuffer;

use minifb::{KeyRepeat, Scale, ScaleMode, Window, WindowOptions};
use std::io;

use crate::core::{Console, Event, Key, Tileset};
use crate::error::{Error, Result};
use crate::renderers::{Context, ContextParams};

const VSYNC_FPS: usize = 60;

pub struct WindowContext {
    window: Window,
    buffer: WinBuffer,
    tileset: Tileset,
}

impl WindowContext {
    pub fn new(params: &ContextParams, tileset: Tileset) -> Result<Self> {
        let (tile_w, tile_h) = tileset.tile_size();
        let width = params.columns * tile_w;
        let height = params.rows * tile_h;

        let opts = WindowOptions {
            resize: params.resizable,
            scale: Scale::X1,
            scale_mode: ScaleMode::AspectRatioStretch,
            title: true,
            borderless: false,
            ..WindowOptions::default()
        };
        let mut window = Window::new(&params.title, width, height, opts)
            .map_err(|e| Error::BackendInit(e.to_string()))?;
        window.set_target_fps(if params.vsync { VSYNC_FPS } else { 0 });

        log::info!("Window opened at {}x{} pixels", width, height);
        Ok(Self {
            window,
            buffer: WinBuffer::new(width, height),
            tileset,
        })
    }
}

impl Context for WindowContext {
    fn present(&mut self, console: &Console) -> Result<()> {
        self.buffer.clear();
        self.buffer.draw_console(console, &self.tileset);
        self.window
            .update_with_buffer(&self.buffer.data, self.buffer.width, self.buffer.height)
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<Event> {
        if !self.window.is_open() {
            return vec![Event::Quit];
        }
        self.window
            .get_keys_pressed(KeyRepeat::Yes)
            .into_iter()
            .map(|key| Event::KeyDown(map_key(key)))
            .collect()
    }
}

pub fn map_key(key: minifb::Key) -> Key {
    use minifb::Key as K;
    match key {
        K::Left => Key::Left,
        K::Right => Key::Right,
        K::Up => Key::Up,
        K::Down => Key::Down,
        K::Home => Key::Home,
        K::End => Key::End,
        K::PageUp => Key::PageUp,
        K::PageDown => Key::PageDown,
        K::Period => Key::Period,
        K::H => Key::H,
        K::J => Key::J,
        K::K => Key::K,
        K::L => Key::L,
        K::Y => Key::Y,
        K::U => Key::U,
        K::B => Key::B,
        K::N => Key::N,
        K::NumPad1 => Key::Kp1,
        K::NumPad2 => Key::Kp2,
        K::NumPad3 => Key::Kp3,
        K::NumPad4 => Key::Kp4,
        K::NumPad5 => Key::Kp5,
        K::NumPad6 => Key::Kp6,
        K::NumPad7 => Key::Kp7,
        K::NumPad8 => Key::Kp8,
        K::NumPad9 => Key::Kp9,
        K::Escape => Key::Escape,
        _ => Key::Other,
    }
}
