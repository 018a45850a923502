use glam::IVec2;

/// Backend-independent key identifier. Backends translate their own key codes
/// into this before the app sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Clear,
    Period,
    // Vi keys
    H,
    J,
    K,
    L,
    Y,
    U,
    B,
    N,
    // Numeric keypad
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(Key),
    /// The window was closed (or the terminal asked to exit).
    Quit,
    /// Anything else the backend saw; ignored by the app.
    Other,
}

pub const LEFT: IVec2 = IVec2::new(-1, 0);
pub const RIGHT: IVec2 = IVec2::new(1, 0);
pub const UP: IVec2 = IVec2::new(0, -1);
pub const DOWN: IVec2 = IVec2::new(0, 1);
pub const UP_LEFT: IVec2 = IVec2::new(-1, -1);
pub const UP_RIGHT: IVec2 = IVec2::new(1, -1);
pub const DOWN_LEFT: IVec2 = IVec2::new(-1, 1);
pub const DOWN_RIGHT: IVec2 = IVec2::new(1, 1);
pub const WAIT: IVec2 = IVec2::ZERO;

/// Every key that moves (or deliberately doesn't move) the player.
/// Diagonals follow numpad geometry: Home sits over Kp7, so it is up-left.
pub static MOVE_KEYS: [(Key, IVec2); 27] = [
    (Key::Left, LEFT),
    (Key::H, LEFT),
    (Key::Kp4, LEFT),
    (Key::Right, RIGHT),
    (Key::L, RIGHT),
    (Key::Kp6, RIGHT),
    (Key::Up, UP),
    (Key::K, UP),
    (Key::Kp8, UP),
    (Key::Down, DOWN),
    (Key::J, DOWN),
    (Key::Kp2, DOWN),
    (Key::Home, UP_LEFT),
    (Key::Y, UP_LEFT),
    (Key::Kp7, UP_LEFT),
    (Key::PageUp, UP_RIGHT),
    (Key::U, UP_RIGHT),
    (Key::Kp9, UP_RIGHT),
    (Key::End, DOWN_LEFT),
    (Key::B, DOWN_LEFT),
    (Key::Kp1, DOWN_LEFT),
    (Key::PageDown, DOWN_RIGHT),
    (Key::N, DOWN_RIGHT),
    (Key::Kp3, DOWN_RIGHT),
    (Key::Period, WAIT),
    (Key::Clear, WAIT),
    (Key::Kp5, WAIT),
];

/// Look up the movement vector for `key`. `None` means the key is not bound.
pub fn direction_for(key: Key) -> Option<IVec2> {
    MOVE_KEYS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, delta)| *delta)
}
