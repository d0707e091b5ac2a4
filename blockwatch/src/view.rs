//! View model the handlers write into and the panels draw from.

use std::time::{Duration, Instant};

use crate::grid::BlockGrid;
use crate::types::{DiskInfo, FileInfo, FileSizeInfo, RuntimeInfo, ServerInfo};
use crate::usage::{disk_usage, Usage};

pub const NOTICE_TTL: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Normal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskView {
    pub info: DiskInfo,
    pub usage: [Usage; 3],
}

#[derive(Debug, Default)]
pub struct ViewModel {
    pub disk: Option<DiskView>,
    pub files: Option<FileInfo>,
    pub file_sizes: Option<FileSizeInfo>,
    pub server: Option<ServerInfo>,
    pub runtime: Option<RuntimeInfo>,
    pub grid: BlockGrid,
    /// Width the block map panel had when the grid was last built.
    pub grid_width: u16,
    pub notice: Option<Notice>,
    /// Connectivity lost: the overlay stays up until a session opens again.
    pub blocked: bool,
}

impl ViewModel {
    pub fn new(grid_width: u16) -> Self {
        Self {
            grid_width,
            blocked: true,
            ..Self::default()
        }
    }

    pub fn set_disk(&mut self, info: DiskInfo) {
        let usage = disk_usage(&info);
        self.disk = Some(DiskView { info, usage });
    }

    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.set_notice(text.into(), NoticeLevel::Normal, now);
    }

    pub fn notify_error(&mut self, text: impl Into<String>, now: Instant) {
        self.set_notice(text.into(), NoticeLevel::Error, now);
    }

    fn set_notice(&mut self, text: String, level: NoticeLevel, now: Instant) {
        self.notice = Some(Notice {
            text,
            level,
            expires_at: now + NOTICE_TTL,
        });
    }

    pub fn notice_text(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if matches!(&self.notice, Some(n) if n.expires_at <= now) {
            self.notice = None;
        }
    }

    pub fn notice_deadline(&self) -> Option<Instant> {
        self.notice.as_ref().map(|n| n.expires_at)
    }
}
