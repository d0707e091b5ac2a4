//! Server clock and uptime.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::types::ServerInfo;

pub fn draw_server(f: &mut ratatui::Frame<'_>, area: Rect, server: Option<&ServerInfo>) {
    let block = Block::default().borders(Borders::ALL).title("Server");
    let lines = match server {
        Some(s) => vec![
            Line::from(format!("Started  {}", s.starttime)),
            Line::from(format!("Now      {}", s.currenttime)),
            Line::from(format!("Uptime   {}", s.uptime_label())),
        ],
        None => vec![Line::from("waiting for server info...")],
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}
