//! File population counters and the configured limits.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    text::Line,
};

use crate::types::{FileInfo, FileSizeInfo};
use crate::ui::util::{grouped, human};

pub fn draw_files(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    files: Option<&FileInfo>,
    limits: Option<&FileSizeInfo>,
) {
    let block = Block::default().borders(Borders::ALL).title("Files");
    let max_files = limits.map(|l| grouped(l.maxfiles)).unwrap_or_else(|| "-".into());
    let max_size = limits.map(|l| human(l.maxfilesize)).unwrap_or_else(|| "-".into());
    let lines = match files {
        Some(fi) => vec![
            Line::from(format!("Files    {} / max {}", grouped(fi.count), max_files)),
            Line::from(format!("Size     {}  (max per file {})", human(fi.size), max_size)),
            Line::from(format!("Created  {}", grouped(fi.created))),
            Line::from(format!("Removed  {}", grouped(fi.destroyed))),
        ],
        None => vec![Line::from("waiting for file info...")],
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}
