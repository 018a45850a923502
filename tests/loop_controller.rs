use glam::IVec2;
use tile_console::app::{RunState, GREETING, HEIGHT, PLAYER_GLYPH, WIDTH};
use tile_console::core::{direction_for, Event, Key};
use tile_console::renderers::HeadlessContext;
use tile_console::{run, App, AppResult, Console, Template};

fn template() -> (Template, HeadlessContext) {
    let handle = HeadlessContext::new();
    let app = Template::new(Console::new(WIDTH, HEIGHT), Box::new(handle.clone()));
    (app, handle)
}

fn press(app: &mut Template, key: Key) {
    assert_eq!(app.event(&Event::KeyDown(key)), AppResult::Continue);
}

fn glyph_positions(console: &Console) -> Vec<IVec2> {
    let mut found = Vec::new();
    for y in 0..console.height() as i32 {
        for x in 0..console.width() as i32 {
            let pos = IVec2::new(x, y);
            if console.at(pos).map(|c| c.ch) == Some(PLAYER_GLYPH) {
                found.push(pos);
            }
        }
    }
    found
}

#[test]
fn bindings_agree_for_all_eight_directions() {
    let groups = [
        ([Key::Left, Key::H, Key::Kp4], IVec2::new(-1, 0)),
        ([Key::Right, Key::L, Key::Kp6], IVec2::new(1, 0)),
        ([Key::Up, Key::K, Key::Kp8], IVec2::new(0, -1)),
        ([Key::Down, Key::J, Key::Kp2], IVec2::new(0, 1)),
        ([Key::Home, Key::Y, Key::Kp7], IVec2::new(-1, -1)),
        ([Key::PageUp, Key::U, Key::Kp9], IVec2::new(1, -1)),
        ([Key::End, Key::B, Key::Kp1], IVec2::new(-1, 1)),
        ([Key::PageDown, Key::N, Key::Kp3], IVec2::new(1, 1)),
    ];
    for (keys, expected) in groups {
        for key in keys {
            assert_eq!(direction_for(key), Some(expected), "{key:?}");

            let (mut app, _) = template();
            press(&mut app, key);
            assert_eq!(app.player(), IVec2::new(40, 20) + expected, "{key:?}");
        }
    }
}

#[test]
fn wait_keys_never_move() {
    let (mut app, _) = template();
    for key in [Key::Kp5, Key::Clear, Key::Period] {
        assert_eq!(direction_for(key), Some(IVec2::ZERO));
        press(&mut app, key);
        assert_eq!(app.player(), IVec2::new(40, 20));
    }
}

#[test]
fn render_tick_is_idempotent() {
    let (mut app, handle) = template();
    press(&mut app, Key::N);
    assert_eq!(app.iterate(), AppResult::Continue);
    assert_eq!(app.iterate(), AppResult::Continue);

    assert_eq!(handle.frame_count(), 2);
    assert_eq!(handle.frame(0), handle.frame(1));
}

#[test]
fn three_ups_from_center() {
    let (mut app, handle) = template();
    for _ in 0..3 {
        press(&mut app, Key::Up);
    }
    assert_eq!(app.player(), IVec2::new(40, 17));

    app.iterate();
    let frame = handle.last_frame().unwrap();
    assert_eq!(glyph_positions(&frame), vec![IVec2::new(40, 17)]);
    assert!(frame.row_string(0).starts_with(GREETING));
    assert_eq!(frame.row_string(0).trim_end(), GREETING);
}

#[test]
fn home_is_up_left() {
    for key in [Key::Home, Key::Y, Key::Kp7] {
        let (mut app, _) = template();
        press(&mut app, key);
        assert_eq!(app.player(), IVec2::new(39, 19));
    }
}

#[test]
fn glyph_keeps_clear_colors() {
    let (mut app, handle) = template();
    app.iterate();
    let frame = handle.last_frame().unwrap();
    let cell = frame.at(IVec2::new(40, 20)).unwrap();
    assert_eq!(cell.ch, PLAYER_GLYPH);
    assert_eq!(cell.fg, tile_console::Color::WHITE);
    assert_eq!(cell.bg, tile_console::Color::BLACK);
}

#[test]
fn walking_off_the_left_edge_hides_the_glyph() {
    let (mut app, handle) = template();
    for _ in 0..40 {
        press(&mut app, Key::Left);
    }
    assert_eq!(app.player(), IVec2::new(0, 20));
    assert_eq!(app.iterate(), AppResult::Continue);
    assert_eq!(
        glyph_positions(&handle.last_frame().unwrap()),
        vec![IVec2::new(0, 20)]
    );

    press(&mut app, Key::H);
    assert_eq!(app.player(), IVec2::new(-1, 20));
    assert_eq!(app.iterate(), AppResult::Continue);
    let frame = handle.last_frame().unwrap();
    assert!(glyph_positions(&frame).is_empty());
    assert_eq!(frame.row_string(0).trim_end(), GREETING);

    // No clamping: coming back is symmetric.
    press(&mut app, Key::L);
    app.iterate();
    assert_eq!(
        glyph_positions(&handle.last_frame().unwrap()),
        vec![IVec2::new(0, 20)]
    );
}

#[test]
fn glyph_can_overwrite_the_greeting() {
    let (mut app, handle) = template();
    for _ in 0..20 {
        press(&mut app, Key::Kp7);
    }
    assert_eq!(app.player(), IVec2::new(20, 0));
    for _ in 0..18 {
        press(&mut app, Key::Left);
    }
    app.iterate();
    let frame = handle.last_frame().unwrap();
    assert_eq!(&frame.row_string(0)[..11], "He@lo World");
}

#[test]
fn quit_terminates_from_anywhere() {
    let (mut app, handle) = template();
    for _ in 0..100 {
        press(&mut app, Key::PageDown);
    }
    handle.push_event(Event::KeyDown(Key::Up));
    handle.push_event(Event::Quit);
    handle.push_event(Event::KeyDown(Key::Up));

    assert_eq!(run(&mut app), AppResult::Success);
    assert_eq!(app.state(), RunState::Terminated);
    assert_eq!(app.player(), IVec2::new(140, 119));
}

#[test]
fn driver_renders_every_pass_until_quit() {
    struct Scripted {
        inner: Template,
        passes: usize,
    }

    impl App for Scripted {
        fn init(_args: &[String]) -> tile_console::Result<Self> {
            unreachable!()
        }
        fn iterate(&mut self) -> AppResult {
            self.passes += 1;
            self.inner.iterate()
        }
        fn event(&mut self, event: &Event) -> AppResult {
            self.inner.event(event)
        }
        fn poll_events(&mut self) -> Vec<Event> {
            // Quiet for three frames, then close.
            if self.passes == 3 {
                vec![Event::Other, Event::Quit]
            } else {
                self.inner.poll_events()
            }
        }
    }

    let (inner, handle) = template();
    let mut app = Scripted { inner, passes: 0 };
    assert_eq!(run(&mut app), AppResult::Success);
    assert_eq!(app.passes, 3);
    assert_eq!(handle.frame_count(), 3);
}
