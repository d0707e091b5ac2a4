//! Disk panel: one free/used bar per tier plus the server's counts.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::theme::{BAR_FREE, BAR_TEXT, BAR_USED};
use crate::ui::util::{inner, or_grouped};
use crate::usage::{Tier, Usage};
use crate::view::DiskView;

pub fn draw_disk(f: &mut ratatui::Frame<'_>, area: Rect, disk: Option<&DiskView>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Disk"), area);
    let Some(d) = disk else { return; };

    let inner = inner(area);
    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines = Vec::with_capacity(6);
    for u in &d.usage {
        let (total, free, used) = counts(d, u.tier);
        lines.push(Line::from(vec![
            Span::styled(format!("{:<7}", u.tier.title()), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("total {total}  free {free}  used {used}")),
        ]));
        lines.push(bar_line(u, inner.width));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn counts(d: &DiskView, tier: Tier) -> (String, String, String) {
    let i = &d.info;
    match tier {
        Tier::Blocks => (
            or_grouped(&i.totalblocksstring, i.totalblocks),
            or_grouped(&i.freeblocksstring, i.freeblocks),
            or_grouped(&i.usedblocksstring, i.totalblocks.saturating_sub(i.freeblocks)),
        ),
        Tier::Bytes => (
            or_grouped(&i.totalbytesstring, i.totalbytes),
            or_grouped(&i.freebytesstring, i.freebytes),
            or_grouped(&i.usedbytesstring, i.totalbytes.saturating_sub(i.freebytes)),
        ),
        Tier::Inodes => (
            or_grouped(&i.totalinodesstring, i.totalinodes),
            or_grouped(&i.freeinodesstring, i.freeinodes),
            or_grouped(&i.usedinodesstring, i.totalinodes.saturating_sub(i.freeinodes)),
        ),
    }
}

// Free on the left, used on the right; the percentages flank the split.
fn bar_line(u: &Usage, width: u16) -> Line<'static> {
    let layout = u.bar(width);
    let w = width as usize;
    let split = layout.breakpoint as usize;
    let mut text: Vec<char> = vec![' '; w];

    let free = u.avail_label();
    let free_end = w - layout.free_label_offset as usize;
    if free.len() <= free_end {
        place(&mut text, free_end - free.len(), &free);
    }
    let used = u.used_label();
    let used_start = layout.used_label_offset as usize;
    if used_start + used.len() <= w {
        place(&mut text, used_start, &used);
    }

    let free_seg: String = text[..split].iter().collect();
    let used_seg: String = text[split..].iter().collect();
    Line::from(vec![
        Span::styled(free_seg, Style::default().bg(BAR_FREE).fg(BAR_TEXT)),
        Span::styled(used_seg, Style::default().bg(BAR_USED).fg(BAR_TEXT)),
    ])
}

fn place(buf: &mut [char], at: usize, s: &str) {
    for (slot, ch) in buf.iter_mut().skip(at).zip(s.chars()) {
        *slot = ch;
    }
}
