use glam::IVec2;
use log::{debug, error, info, LevelFilter};

use crate::core::tileset::{CHARMAP_TCOD, DEFAULT_LAYOUT, DEFAULT_TILESHEET};
use crate::core::{direction_for, Color, Console, Event, Tileset};
use crate::error::Result;
use crate::renderers::{new_context, Context, ContextParams};
use crate::util::{find_data_dir, get_data_dir, DATA_DIR};
use crate::{create_clap_command, handle_clap_matches, Options};

pub const WIDTH: usize = 80;
pub const HEIGHT: usize = 40;
pub const TITLE: &str = "Libtcod Template Project";
pub const GREETING: &str = "Hello World";
pub const PLAYER_GLYPH: char = '@';

/// What a callback tells the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppResult {
    Continue,
    Success,
    Failure,
}

/// Lifecycle hooks invoked by [`run`].
pub trait App: Sized {
    fn init(args: &[String]) -> Result<Self>;
    /// Called once per frame.
    fn iterate(&mut self) -> AppResult;
    /// Called once per queued input event.
    fn event(&mut self, event: &Event) -> AppResult;
    fn poll_events(&mut self) -> Vec<Event>;
    /// Called exactly once, after the last callback.
    fn quit(&mut self, _result: AppResult) {}
}

/// Drive `app` until a callback returns something other than `Continue`.
/// Each pass drains pending events first, then renders one frame.
pub fn run<A: App>(app: &mut A) -> AppResult {
    let result = 'frames: loop {
        for event in app.poll_events() {
            match app.event(&event) {
                AppResult::Continue => {}
                done => break 'frames done,
            }
        }
        match app.iterate() {
            AppResult::Continue => {}
            done => break 'frames done,
        }
    };
    app.quit(result);
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Terminated,
}

/// The template itself: one console, one context, one player glyph.
pub struct Template {
    console: Console,
    context: Box<dyn Context>,
    player: IVec2,
    state: RunState,
}

impl Template {
    /// Wrap an existing console and context. The player starts at the
    /// console's center.
    pub fn new(console: Console, context: Box<dyn Context>) -> Self {
        let player = console.center();
        Self {
            console,
            context,
            player,
            state: RunState::Running,
        }
    }

    pub fn from_options(opts: &Options) -> Result<Self> {
        let data_dir = match &opts.data_dir {
            Some(start) => find_data_dir(start, DATA_DIR)?,
            None => get_data_dir()?,
        };
        info!("Using data directory {}", data_dir.display());

        let tileset = Tileset::load_tilesheet(
            &data_dir.join(DEFAULT_TILESHEET),
            DEFAULT_LAYOUT,
            &CHARMAP_TCOD,
        )?;

        let console = Console::new(WIDTH, HEIGHT);
        let params = ContextParams {
            title: TITLE.to_string(),
            columns: console.width(),
            rows: console.height(),
            vsync: true,
            resizable: true,
            target: opts.target,
        };
        let context = new_context(&params, tileset)?;
        Ok(Self::new(console, context))
    }

    pub fn player(&self) -> IVec2 {
        self.player
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Redraw the whole console from scratch.
    pub fn render(&mut self) {
        self.console.clear();
        self.console.print(IVec2::ZERO, GREETING, Color::WHITE, None);
        if let Some(cell) = self.console.at_mut(self.player) {
            cell.ch = PLAYER_GLYPH;
        }
    }
}

impl App for Template {
    fn init(args: &[String]) -> Result<Self> {
        let matches = create_clap_command().try_get_matches_from(args)?;
        let opts = handle_clap_matches(&matches);
        log::set_max_level(if opts.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
        info!("Starting with {:?}", opts);
        Self::from_options(&opts)
    }

    fn iterate(&mut self) -> AppResult {
        if self.state == RunState::Terminated {
            return AppResult::Success;
        }
        self.render();
        match self.context.present(&self.console) {
            Ok(()) => AppResult::Continue,
            Err(e) => {
                error!("Failed to present frame: {}", e);
                AppResult::Failure
            }
        }
    }

    fn event(&mut self, event: &Event) -> AppResult {
        if self.state == RunState::Terminated {
            return AppResult::Success;
        }
        match event {
            Event::KeyDown(key) => {
                if let Some(delta) = direction_for(*key) {
                    self.player += delta;
                    debug!("{:?} moved player by {} to {}", key, delta, self.player);
                }
                AppResult::Continue
            }
            Event::Quit => {
                self.state = RunState::Terminated;
                AppResult::Success
            }
            Event::Other => AppResult::Continue,
        }
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.context.poll_events()
    }

    fn quit(&mut self, result: AppResult) {
        self.state = RunState::Terminated;
        info!("Exiting with {:?}, player at {}", result, self.player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Key;
    use crate::renderers::HeadlessContext;

    fn template() -> (Template, HeadlessContext) {
        let handle = HeadlessContext::new();
        let app = Template::new(Console::new(WIDTH, HEIGHT), Box::new(handle.clone()));
        (app, handle)
    }

    #[test]
    fn starts_centered_and_running() {
        let (app, _) = template();
        assert_eq!(app.player(), IVec2::new(40, 20));
        assert_eq!(app.state(), RunState::Running);
    }

    #[test]
    fn unbound_keys_and_other_events_change_nothing() {
        let (mut app, _) = template();
        assert_eq!(app.event(&Event::KeyDown(Key::Escape)), AppResult::Continue);
        assert_eq!(app.event(&Event::KeyDown(Key::Other)), AppResult::Continue);
        assert_eq!(app.event(&Event::Other), AppResult::Continue);
        assert_eq!(app.player(), IVec2::new(40, 20));
    }

    #[test]
    fn terminated_is_absorbing() {
        let (mut app, handle) = template();
        assert_eq!(app.event(&Event::Quit), AppResult::Success);

        assert_eq!(app.event(&Event::KeyDown(Key::Left)), AppResult::Success);
        assert_eq!(app.iterate(), AppResult::Success);
        assert_eq!(app.player(), IVec2::new(40, 20));
        assert_eq!(handle.frame_count(), 0);
        assert_eq!(app.state(), RunState::Terminated);
    }

    #[test]
    fn run_drains_events_before_rendering() {
        let (mut app, handle) = template();
        handle.push_event(Event::KeyDown(Key::Right));
        handle.push_event(Event::Quit);
        handle.push_event(Event::KeyDown(Key::Right));

        assert_eq!(run(&mut app), AppResult::Success);
        assert_eq!(app.player(), IVec2::new(41, 20));
        assert_eq!(handle.frame_count(), 0);
    }

    #[test]
    fn init_rejects_unknown_arguments() {
        let args = vec!["tile_console".to_string(), "--bogus".to_string()];
        let err = Template::init(&args).err().unwrap();
        assert!(matches!(err, crate::Error::Usage(_)));
    }

    #[test]
    fn init_fails_without_tilesheet() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(DATA_DIR)).unwrap();
        let args = vec![
            "tile_console".to_string(),
            "--data-dir".to_string(),
            dir.path().display().to_string(),
        ];
        let err = Template::init(&args).err().unwrap();
        assert!(matches!(err, crate::Error::ResourceNotFound { .. }));
    }
}
