//! Top header with target and session state.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
};

use crate::session::SessionState;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, target: &str, state: SessionState) {
    let status = match state {
        SessionState::Connecting => "connecting...",
        SessionState::Open => "connected",
        SessionState::Closed => "disconnected",
    };
    let title = format!(
        "blockwatch | {target} | {status}  (q quit, b refresh block map, r reconnect)"
    );
    let header = Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}
