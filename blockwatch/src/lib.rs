//! Live filesystem telemetry client: polls a backend over one WebSocket and
//! renders disk usage, file counters, server uptime and the block map.

pub mod app;
pub mod grid;
pub mod handlers;
pub mod logging;
pub mod profiles;
pub mod protocol;
pub mod scheduler;
pub mod session;
pub mod target;
pub mod types;
pub mod ui;
pub mod usage;
pub mod view;
pub mod ws;
