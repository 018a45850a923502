use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
        SetTitle,
    },
};
use log::error;
use std::io::{self, stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Duration;

use crate::core::{Color, Console, Event, Key};
use crate::error::{Error, Result};
use crate::renderers::{Context, ContextParams};

/// Set while kitty keyboard flags are pushed, so the panic hook knows to pop them.
static ENHANCED_KEYS: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// Install the cleanup panic hook. Only the first call has any effect.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            error!("Panic occurred: {:?}", panic_info);
            let _ = TerminalContext::cleanup_terminal(ENHANCED_KEYS.load(Ordering::Relaxed));
            original_hook(panic_info);
        }));
    });
}

/// Runs `restore` when dropped unless disarmed first. Covers the early
/// returns between enabling raw mode and handing out a `TerminalContext`.
struct SetupGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> SetupGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnOnce()> Drop for SetupGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// Takes over the controlling terminal: raw mode, alternate screen, hidden
/// cursor. Everything is restored on drop, on panic, and when setup fails
/// partway.
pub struct TerminalContext {
    enhanced_keys: bool,
}

impl TerminalContext {
    pub fn new(params: &ContextParams) -> Result<Self> {
        install_panic_hook();

        enable_raw_mode().map_err(|e| Error::BackendInit(format!("raw mode: {e}")))?;
        let guard = SetupGuard::new(|| {
            let _ = Self::cleanup_terminal(false);
        });

        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, Hide, SetTitle(&params.title))
            .map_err(|e| Error::BackendInit(e.to_string()))?;

        // Keypad digits are only distinguishable with the kitty protocol.
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .map_err(|e| Error::BackendInit(format!("keyboard flags: {e}")))?;
            ENHANCED_KEYS.store(true, Ordering::Relaxed);
        }

        guard.disarm();
        log::info!("Terminal backend ready (keypad reporting: {})", enhanced_keys);
        Ok(Self { enhanced_keys })
    }

    fn cleanup_terminal(enhanced_keys: bool) -> io::Result<()> {
        let mut stdout = stdout();
        if enhanced_keys {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(stdout, Show, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalContext {
    fn drop(&mut self) {
        let _ = Self::cleanup_terminal(self.enhanced_keys);
        ENHANCED_KEYS.store(false, Ordering::Relaxed);
    }
}

impl Context for TerminalContext {
    fn present(&mut self, console: &Console) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let output = render_ansi(console, cols as usize, rows as usize);
        let mut stdout = stdout();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!("Terminal event poll failed: {}", e);
                    events.push(Event::Quit);
                    break;
                }
            }
            match event::read() {
                Ok(event::Event::Key(key)) => events.extend(map_key_event(&key)),
                Ok(_) => events.push(Event::Other),
                Err(e) => {
                    error!("Terminal event read failed: {}", e);
                    events.push(Event::Quit);
                    break;
                }
            }
        }
        events
    }
}

/// Translate a crossterm key event. Releases produce nothing; Esc and Ctrl-C
/// stand in for closing the window.
pub fn map_key_event(key: &KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return Some(Event::Quit);
    }

    let keypad = key.state.contains(KeyEventState::KEYPAD);
    let mapped = match key.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::KeypadBegin => Key::Kp5,
        KeyCode::Char(c) if keypad => match c {
            '1' => Key::Kp1,
            '2' => Key::Kp2,
            '3' => Key::Kp3,
            '4' => Key::Kp4,
            '5' => Key::Kp5,
            '6' => Key::Kp6,
            '7' => Key::Kp7,
            '8' => Key::Kp8,
            '9' => Key::Kp9,
            _ => Key::Other,
        },
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' => Key::H,
            'j' => Key::J,
            'k' => Key::K,
            'l' => Key::L,
            'y' => Key::Y,
            'u' => Key::U,
            'b' => Key::B,
            'n' => Key::N,
            '.' => Key::Period,
            _ => Key::Other,
        },
        _ => Key::Other,
    };
    Some(Event::KeyDown(mapped))
}

fn fg_escape(color: &Color) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn bg_escape(color: &Color) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Emit the visible part of `console` as one ANSI string, batching runs of
/// cells that share colors.
pub fn render_ansi(console: &Console, cols: usize, rows: usize) -> String {
    let width = console.width().min(cols);
    let height = console.height().min(rows);
    let mut output = String::new();
    let mut last_colors = None;

    output.push_str("\x1B[H"); // Move cursor to home position

    for y in 0..height {
        output.push_str(&format!("\x1B[{};{}H", y + 1, 1));
        let row = &console.row(y)[..width];
        let mut x = 0;
        while x < width {
            let colors = (row[x].fg, row[x].bg);
            if last_colors != Some(colors) {
                output.push_str(&fg_escape(&colors.0));
                output.push_str(&bg_escape(&colors.1));
                last_colors = Some(colors);
            }
            while x < width && (row[x].fg, row[x].bg) == colors {
                output.push(row[x].ch);
                x += 1;
            }
        }
    }
    output.push_str("\x1b[0m");
    output
}
