//! Theme presets for tweak-tui.
//!
//! A small palette the dispatch and controls draw from. The default
//! `terminal` theme uses ANSI colors so the panel respects the user's
//! terminal palette; `class_names` in the panel options layer named presets
//! over it.

use crossterm::style::Color;

/// Panel palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Row labels.
    pub label: Color,
    /// Control values and readouts.
    pub value: Color,
    /// Active elements: filled slider track, selected option, focused row.
    pub accent: Color,
    /// De-emphasized elements: empty slider track, collapsed group icon.
    pub muted: Color,
    /// Group headers.
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}

/// Terminal theme - ANSI colors, respects the user's terminal palette.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        label: Color::AnsiValue(7),
        value: Color::AnsiValue(15),
        accent: Color::AnsiValue(12),
        muted: Color::AnsiValue(8),
        header: Color::AnsiValue(14),
    }
}

/// Nord-flavored preset.
pub fn nord() -> Theme {
    Theme {
        name: "nord".to_string(),
        label: Color::Rgb {
            r: 216,
            g: 222,
            b: 233,
        },
        value: Color::Rgb {
            r: 236,
            g: 239,
            b: 244,
        },
        accent: Color::Rgb {
            r: 136,
            g: 192,
            b: 208,
        },
        muted: Color::Rgb {
            r: 76,
            g: 86,
            b: 106,
        },
        header: Color::Rgb {
            r: 129,
            g: 161,
            b: 193,
        },
    }
}

/// Light preset for bright terminals.
pub fn light() -> Theme {
    Theme {
        name: "light".to_string(),
        label: Color::AnsiValue(0),
        value: Color::AnsiValue(0),
        accent: Color::AnsiValue(4),
        muted: Color::AnsiValue(7),
        header: Color::AnsiValue(5),
    }
}

/// Look up a preset by name. Unknown names return `None`.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "terminal" => Some(terminal()),
        "nord" => Some(nord()),
        "light" => Some(light()),
        _ => None,
    }
}

/// Resolve the theme for a panel: the default overlaid by each named preset
/// in order (last known name wins). Unknown names warn and are skipped.
pub fn resolve(class_names: &[String]) -> Theme {
    let mut theme = Theme::default();
    for name in class_names {
        match get_preset(name) {
            Some(preset) => theme = preset,
            None => tracing::warn!(name = %name, "unknown theme preset"),
        }
    }
    theme
}
