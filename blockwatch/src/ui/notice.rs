//! Message line and the blocking overlay shown while disconnected.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::session::SessionState;
use crate::ui::theme::{NOTICE_ERROR, NOTICE_NORMAL};
use crate::ui::util::centered;
use crate::view::{Notice, NoticeLevel};

pub fn draw_notice(f: &mut ratatui::Frame<'_>, area: Rect, notice: Option<&Notice>) {
    let Some(n) = notice else { return; };
    let color = match n.level {
        NoticeLevel::Normal => NOTICE_NORMAL,
        NoticeLevel::Error => NOTICE_ERROR,
    };
    let p = Paragraph::new(n.text.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(p, area);
}

pub fn draw_blocker(f: &mut ratatui::Frame<'_>, area: Rect, target: &str, state: SessionState) {
    let lines = match state {
        SessionState::Connecting => vec![Line::from(format!("Connecting to {target}..."))],
        _ => vec![
            Line::from(format!("Not connected to {target}")),
            Line::from(""),
            Line::from("press r to reconnect, q to quit"),
        ],
    };
    let rect = centered(area, 48, lines.len() as u16 + 2);
    f.render_widget(Clear, rect);
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("blockwatch"));
    f.render_widget(p, rect);
}
