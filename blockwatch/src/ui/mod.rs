//! UI module root: exposes drawing functions for individual panels.

pub mod blockmap;
pub mod disk;
pub mod files;
pub mod header;
pub mod notice;
pub mod server;
pub mod theme;
pub mod util;
