//! Colour themes: a 16-slot palette plus four named roles. Entities refer
//! to palette slots, so cycling the theme recolours everything at once.

pub const PALETTE_SIZE: usize = 16;

pub const PLAYER_SLOT: usize = 1;
pub const ENEMY_SLOT: usize = 2;
pub const VFX_SLOT: usize = 4;
pub const SPIKE_SLOT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const LIME: Color = Color::rgb(0, 158, 47);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const PINK: Color = Color::rgb(255, 109, 194);
    pub const GOLD: Color = Color::rgb(255, 203, 0);
    pub const SKYBLUE: Color = Color::rgb(102, 191, 255);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub palette: [Color; PALETTE_SIZE],
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
    pub selection: Color,
}

impl Theme {
    /// Palette lookup; out-of-range slots wrap.
    pub fn color(&self, slot: usize) -> Color {
        self.palette[slot % PALETTE_SIZE]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            name: "Default".to_string(),
            palette: [
                Color::BLACK,
                Color::RED,
                Color::GREEN,
                Color::YELLOW,
                Color::BLUE,
                Color::MAGENTA,
                Color::LIME,
                Color::WHITE,
                Color::GRAY,
                Color::PINK,
                Color::LIME,
                Color::GOLD,
                Color::SKYBLUE,
                Color::PURPLE,
                Color::GREEN,
                Color::WHITE,
            ],
            background: Color::BLACK,
            foreground: Color::WHITE,
            cursor: Color::WHITE,
            selection: Color::GRAY,
        }
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "Solarized Dark".to_string(),
        palette: [
            Color::rgb(7, 54, 66),
            Color::rgb(220, 50, 47),
            Color::rgb(133, 153, 0),
            Color::rgb(181, 137, 0),
            Color::rgb(38, 139, 210),
            Color::rgb(211, 54, 130),
            Color::rgb(42, 161, 152),
            Color::rgb(238, 232, 213),
            Color::rgb(0, 43, 54),
            Color::rgb(203, 75, 22),
            Color::rgb(88, 110, 117),
            Color::rgb(101, 123, 131),
            Color::rgb(131, 148, 150),
            Color::rgb(108, 113, 196),
            Color::rgb(147, 161, 161),
            Color::rgb(253, 246, 227),
        ],
        background: Color::rgb(0, 43, 54),
        foreground: Color::rgb(131, 148, 150),
        cursor: Color::rgb(147, 161, 161),
        selection: Color::rgb(7, 54, 66),
    }
}

fn gruvbox() -> Theme {
    Theme {
        name: "Gruvbox".to_string(),
        palette: [
            Color::rgb(40, 40, 40),
            Color::rgb(204, 36, 29),
            Color::rgb(152, 151, 26),
            Color::rgb(215, 153, 33),
            Color::rgb(69, 133, 136),
            Color::rgb(177, 98, 134),
            Color::rgb(104, 157, 106),
            Color::rgb(168, 153, 132),
            Color::rgb(146, 131, 116),
            Color::rgb(251, 73, 52),
            Color::rgb(184, 187, 38),
            Color::rgb(250, 189, 47),
            Color::rgb(131, 165, 152),
            Color::rgb(211, 134, 155),
            Color::rgb(142, 192, 124),
            Color::rgb(235, 219, 178),
        ],
        background: Color::rgb(40, 40, 40),
        foreground: Color::rgb(235, 219, 178),
        cursor: Color::rgb(235, 219, 178),
        selection: Color::rgb(80, 73, 69),
    }
}

/// Ordered, non-empty list of themes with a cursor.
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: Vec<Theme>,
    current: usize,
}

impl ThemeSet {
    /// An empty list falls back to the built-in default theme.
    pub fn new(themes: Vec<Theme>) -> Self {
        let themes = if themes.is_empty() {
            vec![Theme::default()]
        } else {
            themes
        };
        ThemeSet { themes, current: 0 }
    }

    pub fn current(&self) -> &Theme {
        &self.themes[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Moves to the next theme, wrapping after the last one.
    pub fn advance(&mut self) -> &Theme {
        self.current = (self.current + 1) % self.themes.len();
        &self.themes[self.current]
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        ThemeSet::new(vec![Theme::default(), solarized_dark(), gruvbox()])
    }
}
