//! Style roles and terminal color themes for mdterm.
//!
//! The renderer never deals with escape sequences directly. It asks a
//! [`StyleResolver`] for the sequence belonging to a symbolic [`StyleRole`]
//! ("heading level 2", "table border", ...). [`Theme`] is the standard
//! resolver: a palette chosen for the terminal [`Background`], optionally
//! tweaked by configuration.
//!
//! Background detection reads a [`TerminalEnv`] snapshot instead of the
//! process environment, so a theme can be built once at startup and shared
//! read-only afterwards.
//!
//! # Example
//!
//! ```
//! use mdterm_theme::{Background, StyleResolver, StyleRole, Theme};
//!
//! let theme = Theme::new(Background::Dark);
//! assert_eq!(theme.resolve(StyleRole::Bold), "\x1b[1m");
//! assert_eq!(theme.style("x", StyleRole::Italic), "\x1b[3mx\x1b[0m");
//! ```

mod detect;
mod error;
mod palette;
mod resolver;
mod role;
mod theme;

pub use detect::{Background, BackgroundPreference, TerminalEnv, detect_background};
pub use error::ThemeError;
pub use palette::{ANSI_RESET, sgr};
pub use resolver::StyleResolver;
pub use role::StyleRole;
pub use theme::Theme;
