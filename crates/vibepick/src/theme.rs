//! Colors, glyphs and frame art shared by the three screens.

use vibepick_tui::{Color, Style};

/// Screen background.
pub const BACKGROUND: Color = Color::Rgb {
    r: 0x1b,
    g: 0x1e,
    b: 0x28,
};

/// Outer frame and idle card borders.
pub const FRAME: Color = Color::Rgb {
    r: 0x3f,
    g: 0x6f,
    b: 0xb5,
};

/// Result text and warnings.
pub const ACCENT: Color = Color::Rgb {
    r: 0xff,
    g: 0xcc,
    b: 0x66,
};

/// Highlighted wheel cell background.
pub const HIGHLIGHT_BG: Color = Color::Yellow;

/// Idle wheel cell background.
pub const CELL_BG: Color = Color::DarkBlue;

/// Slot payline background.
pub const PAYLINE_BG: Color = Color::Rgb {
    r: 0x44,
    g: 0x44,
    b: 0x44,
};

/// Matched card background.
pub const MATCHED_BG: Color = Color::Rgb {
    r: 0x1f,
    g: 0x4d,
    b: 0x1f,
};

/// Cycled through while celebrating.
pub const ANIMATION_COLORS: [Color; 5] = [
    Color::Yellow,
    Color::Red,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Flashing border colors.
pub const BORDER_COLORS: [Color; 5] = [
    Color::Yellow,
    Color::Red,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
];

/// Sprinkled around special winners.
pub const CELEBRATION_EMOJIS: [char; 7] = ['✨', '🌟', '⭐', '💫', '🎉', '🎊', '🎈'];

pub const DICE: char = '🎲';
pub const TARGET: char = '🎯';

/// Base style over the themed background.
pub fn base() -> Style {
    Style::new().bg(BACKGROUND)
}

/// Fireworks shown after a jackpot, one frame per tick.
pub const FIREWORKS_FRAMES: [&str; 8] = [
    "        *\n    *       *\n*               *\n    *       *\n        *",
    "    *       *\n*               *\n  *               *\n*               *\n    *       *",
    "    *   ✦       ✦   *\n*   ✦   ★   ★   ✦   *\n✦   ★   ✦   ★   ✦\n*   ✦   ★   ★   ✦   *\n    *   ✦       ✦   *",
    "    ✦   *   ✦\n*   ★   ✦   ★   *\n✦   ★   ✦   ★   ✦\n*   ★   ✦   ★   *\n    ✦   *   ✦",
    "        ·\n    ·       ·\n·       ·       ·\n    ·       ·\n        ·",
    "*   ✦           ✦   *\n    ★   *   ★\n✦           ✦           ✦\n    ★   *   ★\n*   ✦           ✦   *",
    "★   ✦   *   ✦   *   ✦   ★\n    *   ★   ✦   ★   *\n✦   ★   ✦   ★   ✦   ★   ✦\n    *   ★   ✦   ★   *\n★   ✦   *   ✦   *   ✦   ★",
    "    ·   ✦   ·\n✦       ★       ✦\n·   ✦       ·       ✦   ·\n✦       ★       ✦\n    ·   ✦   ·",
];

/// Shown when every card is matched.
pub const CELEBRATION_FRAMES: [&str; 4] = [
    "    🎉  🎊  🎉\n✨  🌟  ⭐  🌟  ✨\n    🎉  🎊  🎉",
    "⭐  ✨  🌟  ✨  ⭐\n    🎊  🎉  🎊\n⭐  ✨  🌟  ✨  ⭐",
    "    🌟  ⭐  🌟\n🎉  ✨  💫  ✨  🎉\n    🌟  ⭐  🌟",
    "💫  🎊  ⭐  🎊  💫\n    ✨  🎉  ✨\n💫  🎊  ⭐  🎊  💫",
];

/// The lever, up and down.
pub const LEVER_UP: &str = " ║\n ║\n ●";
pub const LEVER_DOWN: &str = "\n ║\n ║\n ●";
