//! Color theme system for quizterm.
//!
//! Two built-in themes:
//!
//! - `dark` uses ANSI 16 colors only, so it works over SSH and on terminals
//!   without truecolor.
//! - `catppuccin_mocha` uses the Catppuccin Mocha palette in RGB.

use quizterm_core::Difficulty;
use ratatui::style::Color;

/// Every color quizterm draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border of the focused card / modal.
    pub border_active: Color,
    pub border_inactive: Color,

    // Text
    pub title: Color,
    pub text: Color,
    /// Secondary labels and hints.
    pub muted: Color,
    pub accent: Color,

    // Difficulty tags
    pub easy: Color,
    pub medium: Color,
    pub hard: Color,

    // Answers
    /// Highlight for the option under the cursor / chosen option.
    pub option_selected: Color,
    pub correct: Color,
    pub incorrect: Color,

    // Timer and progress
    pub timer: Color,
    /// Timer color at 10 seconds or less.
    pub timer_low: Color,
    pub progress: Color,

    // Notifications
    pub toast_error: Color,
    pub toast_warning: Color,
    pub toast_info: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_screen: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            title: Color::White,
            text: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Magenta,

            easy: Color::Green,
            medium: Color::Yellow,
            hard: Color::Red,

            option_selected: Color::Cyan,
            correct: Color::Green,
            incorrect: Color::Red,

            timer: Color::Reset,
            timer_low: Color::Red,
            progress: Color::Cyan,

            toast_error: Color::Red,
            toast_warning: Color::Yellow,
            toast_info: Color::Blue,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_screen: Color::Cyan,
        }
    }

    /// Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            title: text,
            text,
            muted: overlay1,
            accent: mauve,

            easy: green,
            medium: yellow,
            hard: red,

            option_selected: blue,
            correct: green,
            incorrect: red,

            timer: text,
            timer_low: red,
            progress: lavender,

            toast_error: red,
            toast_warning: peach,
            toast_info: blue,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_screen: lavender,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`
    /// with a logged warning so a typo never prevents startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                log::warn!("unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }

    /// Tag color for a difficulty.
    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}
