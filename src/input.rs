//! Keyboard state and cursor mapping.

use std::collections::HashMap;

use crate::geometry::Point;

macro_rules! keys {
    ($($name:ident = $code:literal),* $(,)?) => {
        /// Legacy DOM `keyCode` values.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Key {
            $($name),*
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$name),*];

            pub const fn code(self) -> u32 {
                match self {
                    $(Key::$name => $code),*
                }
            }

            pub fn from_code(code: u32) -> Option<Key> {
                match code {
                    $($code => Some(Key::$name),)*
                    _ => None,
                }
            }
        }
    };
}

keys! {
    Backspace = 8, Tab = 9, Enter = 13, Shift = 16, Ctrl = 17, Alt = 18,
    Escape = 27, Space = 32, PageUp = 33, PageDown = 34, End = 35, Home = 36,
    Left = 37, Up = 38, Right = 39, Down = 40, Insert = 45, Delete = 46,
    K0 = 48, K1 = 49, K2 = 50, K3 = 51, K4 = 52, K5 = 53, K6 = 54, K7 = 55, K8 = 56, K9 = 57,
    A = 65, B = 66, C = 67, D = 68, E = 69, F = 70, G = 71, H = 72, I = 73, J = 74,
    K = 75, L = 76, M = 77, N = 78, O = 79, P = 80, Q = 81, R = 82, S = 83, T = 84,
    U = 85, V = 86, W = 87, X = 88, Y = 89, Z = 90,
    Select = 93,
    Num0 = 96, Num1 = 97, Num2 = 98, Num3 = 99, Num4 = 100,
    Num5 = 101, Num6 = 102, Num7 = 103, Num8 = 104, Num9 = 105,
    Multiply = 106, Add = 107, Subtract = 109, Decimal = 110, Divide = 111,
    F1 = 112, F2 = 113, F3 = 114, F4 = 115, F5 = 116, F6 = 117,
    F7 = 118, F8 = 119, F9 = 120, F10 = 121, F11 = 122, F12 = 123,
    Minus = 173, Semicolon = 186, Equal = 187, Comma = 188, Dash = 189, Period = 190,
    Slash = 191, Backquote = 192, BracketLeft = 219, Backslash = 220, BracketRight = 221,
    Quote = 222,
}

impl Key {
    /// Keys whose browser default (page scrolling) is suppressed.
    pub fn blocks_default(self) -> bool {
        matches!(self, Key::Space | Key::Up | Key::Down | Key::Left | Key::Right)
    }
}

/// Sparse pressed-state table keyed by raw key code.
#[derive(Debug, Default)]
pub struct Input {
    pressed: HashMap<u32, bool>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: u32) {
        self.pressed.insert(code, true);
    }

    pub fn key_up(&mut self, code: u32) {
        self.pressed.insert(code, false);
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.get(&key.code()).copied().unwrap_or(false)
    }

    /// Translate client coordinates into the canvas' local space given the
    /// canvas' bounding-rect origin.
    pub fn cursor_position(client: Point, canvas_origin: Point) -> Point {
        Point::new(client.x - canvas_origin.x, client.y - canvas_origin.y)
    }
}
