//! Per-category poll timers. A timer is only armed when a reply for that
//! category arrives, so each category paces itself on the server's latency.

use std::time::{Duration, Instant};

use crate::protocol::RequestKind;

pub const INFO_INTERVAL: Duration = Duration::from_millis(10_000);
pub const BLOCK_INTERVAL: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollCategory {
    Disk,
    File,
    Runtime,
    Server,
    Block,
}

impl PollCategory {
    pub const ALL: [PollCategory; 5] = [
        PollCategory::Disk,
        PollCategory::File,
        PollCategory::Runtime,
        PollCategory::Server,
        PollCategory::Block,
    ];

    pub fn interval(self) -> Duration {
        match self {
            PollCategory::Block => BLOCK_INTERVAL,
            _ => INFO_INTERVAL,
        }
    }

    pub fn request(self) -> RequestKind {
        match self {
            PollCategory::Disk => RequestKind::GetDiskInfo,
            PollCategory::File => RequestKind::GetFileInfo,
            PollCategory::Runtime => RequestKind::GetRuntimeInfo,
            PollCategory::Server => RequestKind::GetServerInfo,
            PollCategory::Block => RequestKind::GetBlockInfo,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
pub struct PollScheduler {
    // one deadline slot per category; a slot can never hold two timers
    deadlines: [Option<Instant>; 5],
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any pending timer for `cat`, then arms a fresh one.
    pub fn arm(&mut self, cat: PollCategory, now: Instant) {
        self.clear(cat);
        self.deadlines[cat.slot()] = Some(now + cat.interval());
    }

    pub fn clear(&mut self, cat: PollCategory) {
        self.deadlines[cat.slot()] = None;
    }

    pub fn clear_all(&mut self) {
        self.deadlines = [None; 5];
    }

    pub fn deadline(&self, cat: PollCategory) -> Option<Instant> {
        self.deadlines[cat.slot()]
    }

    pub fn is_pending(&self, cat: PollCategory) -> bool {
        self.deadline(cat).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.deadlines.iter().flatten().count()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Removes and returns every category whose deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Vec<PollCategory> {
        let mut due = Vec::new();
        for cat in PollCategory::ALL {
            if matches!(self.deadlines[cat.slot()], Some(at) if at <= now) {
                self.deadlines[cat.slot()] = None;
                due.push(cat);
            }
        }
        due
    }
}
