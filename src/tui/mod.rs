//! Terminal User Interface
//!
//! Cozy TUI for the scone mystery using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Yellow,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::LightYellow,
            info: Color::Blue,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔══════════════════════════════════════════════════════╗
║                                                      ║
║        P A N T R Y   D E T E C T I V E               ║
║                                                      ║
║        The Case of the Missing Scones                ║
║                                                      ║
║        A family mystery, solved one                  ║
║        question at a time.                           ║
║                                                      ║
╚══════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " PANTRY DETECTIVE ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  ↑/↓  Navigate menus                                          ║
║  Enter Select option / Confirm                                ║
║  Esc   Go back / Pause                                        ║
║  ?     Toggle this help                                       ║
║  q     Quit (from the main menu)                              ║
╠═══════════════════════════════════════════════════════════════╣
║                      QUICK ACTIONS                            ║
╠═══════════════════════════════════════════════════════════════╣
║  o     Read the case story                                    ║
║  c     View the clue sheet                                    ║
║  s     List the suspects                                      ║
║  i     Question a suspect                                     ║
║  a     Make an accusation                                     ║
╠═══════════════════════════════════════════════════════════════╣
║  Press : or / for command mode, then type 'help'              ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (left panel + main area)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),  // Side panel
            Constraint::Percentage(72),  // Main area
        ])
        .split(area)
        .to_vec()
}

/// Create the main area layout (terminal + case notes)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),     // Terminal output + input
            Constraint::Length(6),   // Case notes
        ])
        .split(area)
        .to_vec()
}
