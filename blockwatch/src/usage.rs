//! Free/used split for the disk panel: per-mille shares, labels and bar geometry.

use crate::types::DiskInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Blocks,
    Bytes,
    Inodes,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Blocks, Tier::Bytes, Tier::Inodes];

    pub fn title(self) -> &'static str {
        match self {
            Tier::Blocks => "Blocks",
            Tier::Bytes => "Bytes",
            Tier::Inodes => "Inodes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub tier: Tier,
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub avail_per_mille: u32,
    pub used_per_mille: u32,
}

impl Usage {
    /// An empty filesystem (`total == 0`) reads as 0% free / 100% used.
    /// `free` above `total` is clamped.
    pub fn derive(tier: Tier, total: u64, free: u64) -> Self {
        let free = free.min(total);
        let avail_per_mille = if total == 0 {
            0
        } else {
            // round(free * 1000 / total), widened so large byte counts cannot overflow
            let num = free as u128 * 1000 + total as u128 / 2;
            (num / total as u128) as u32
        };
        Self {
            tier,
            total,
            free,
            used: total - free,
            avail_per_mille,
            used_per_mille: 1000 - avail_per_mille,
        }
    }

    pub fn avail_label(&self) -> String {
        render_percent(self.tier, self.avail_per_mille)
    }

    pub fn used_label(&self) -> String {
        match self.tier {
            // complement of the rounded free figure so the pair sums to 100
            Tier::Blocks => format!("{}%", 100 - whole_percent(self.avail_per_mille)),
            Tier::Bytes | Tier::Inodes => render_percent(self.tier, self.used_per_mille),
        }
    }

    pub fn bar(&self, width: u16) -> BarLayout {
        BarLayout::new(width, self.avail_per_mille)
    }
}

fn whole_percent(per_mille: u32) -> u32 {
    (per_mille + 5) / 10
}

// Blocks are shown as whole percent, rounded; bytes and inodes keep one decimal.
fn render_percent(tier: Tier, per_mille: u32) -> String {
    match tier {
        Tier::Blocks => format!("{}%", whole_percent(per_mille)),
        Tier::Bytes | Tier::Inodes => format!("{}.{}%", per_mille / 10, per_mille % 10),
    }
}

/// Free segment on the left, used on the right. Label offsets are measured
/// from the right edge of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub width: u16,
    pub breakpoint: u16,
    pub free_label_offset: u16,
    pub used_label_offset: u16,
}

impl BarLayout {
    pub fn new(width: u16, avail_per_mille: u32) -> Self {
        let breakpoint = (width as u32 * avail_per_mille.min(1000) / 1000) as u16;
        Self {
            width,
            breakpoint,
            free_label_offset: width - breakpoint,
            used_label_offset: breakpoint,
        }
    }
}

pub fn disk_usage(d: &DiskInfo) -> [Usage; 3] {
    [
        Usage::derive(Tier::Blocks, d.totalblocks, d.freeblocks),
        Usage::derive(Tier::Bytes, d.totalbytes, d.freebytes),
        Usage::derive(Tier::Inodes, d.totalinodes, d.freeinodes),
    ]
}
