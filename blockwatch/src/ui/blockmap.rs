//! Block map: one fixed-width cell per storage slot, coloured by allocation.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::grid::{BlockGrid, CellState, CELL_SIZE};
use crate::ui::theme::{CELL_EMPTY, CELL_UNUSED, CELL_USED};
use crate::ui::util::inner;

pub fn draw_block_map(f: &mut ratatui::Frame<'_>, area: Rect, grid: &BlockGrid) {
    let total_rows = grid.rows().len();
    let inner = inner(area);
    let shown = total_rows.min(inner.height as usize);
    let title = if grid.is_empty() {
        "Block map".to_string()
    } else if shown < total_rows {
        format!(
            "Block map: {} / {} used (rows {}/{})",
            grid.used_count(),
            grid.len(),
            shown,
            total_rows
        )
    } else {
        format!("Block map: {} / {} used", grid.used_count(), grid.len())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let glyph = "■".to_string() + &" ".repeat(CELL_SIZE.saturating_sub(1) as usize);
    let lines: Vec<Line> = grid
        .rows()
        .take(shown)
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|c| Span::styled(glyph.clone(), Style::default().fg(cell_color(c.state))))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn cell_color(s: CellState) -> ratatui::style::Color {
    match s {
        CellState::Empty => CELL_EMPTY,
        CellState::Unused => CELL_UNUSED,
        CellState::Used => CELL_USED,
    }
}
