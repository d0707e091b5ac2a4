//! Shared UI theme constants.

use ratatui::style::Color;

// Usage bar segments
pub const BAR_FREE: Color = Color::Rgb(46, 139, 87);
pub const BAR_USED: Color = Color::Rgb(178, 34, 34);
pub const BAR_TEXT: Color = Color::White;

// Block map cells
pub const CELL_EMPTY: Color = Color::DarkGray;
pub const CELL_UNUSED: Color = Color::Green;
pub const CELL_USED: Color = Color::Red;

// Message line, matching the web page's navy/red notices
pub const NOTICE_NORMAL: Color = Color::Rgb(0, 0, 128);
pub const NOTICE_ERROR: Color = Color::Rgb(192, 0, 0);
