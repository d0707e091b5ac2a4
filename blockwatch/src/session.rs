//! Session lifecycle with the backend: connection state, packet ids, the
//! outbound queue and the poll timers. Owned by the event loop; socket
//! callbacks never touch it directly.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::protocol::{decode, encode, Packet, RequestKind};
use crate::scheduler::PollScheduler;
use crate::view::ViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closed,
}

#[derive(Debug)]
pub struct SessionContext {
    target: String,
    state: SessionState,
    next_packet_id: i64,
    last_peer_id: i64,
    pub(crate) scheduler: PollScheduler,
    outbox: VecDeque<String>,
}

impl SessionContext {
    /// `target` is the "host:port" shown in notices.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            state: SessionState::Connecting,
            next_packet_id: 0,
            last_peer_id: 0,
            scheduler: PollScheduler::new(),
            outbox: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Id carried by the most recent request (0 before the first send).
    pub fn next_packet_id(&self) -> i64 {
        self.next_packet_id
    }

    pub fn last_peer_id(&self) -> i64 {
        self.last_peer_id
    }

    pub fn scheduler(&self) -> &PollScheduler {
        &self.scheduler
    }

    /// Socket is up: lift the overlay and ask for the init bundle.
    pub fn open(&mut self, view: &mut ViewModel, now: Instant) {
        info!(peer = %self.target, "session open");
        self.state = SessionState::Open;
        view.blocked = false;
        view.notify(format!("Connected to {}", self.target), now);
        self.send(RequestKind::Init);
    }

    /// Queues a request. Dropped without error unless the session is open.
    pub fn send(&mut self, kind: RequestKind) -> bool {
        if self.state != SessionState::Open {
            debug!(request = kind.as_str(), state = ?self.state, "dropping request");
            return false;
        }
        self.next_packet_id += 1;
        let packet = Packet::request(kind, self.next_packet_id, chrono::Utc::now().timestamp_millis());
        debug!(request = kind.as_str(), packetid = packet.packetid, "send");
        self.outbox.push_back(encode(&packet));
        true
    }

    /// Encoded frames waiting for the socket writer.
    pub fn drain_outbound(&mut self) -> Vec<String> {
        self.outbox.drain(..).collect()
    }

    pub fn on_frame(&mut self, raw: &str, view: &mut ViewModel, now: Instant) {
        match decode(raw) {
            Ok(packet) => self.dispatch(packet, view, now),
            Err(e) => {
                warn!(error = %e, frame = raw, "dropping frame");
                view.notify_error(e.to_string(), now);
            }
        }
    }

    /// Sends the request for every category whose timer has expired.
    pub fn poll_due(&mut self, now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        for cat in &due {
            self.send(cat.request());
        }
        due.len()
    }

    pub fn on_close(&mut self, view: &mut ViewModel, now: Instant) {
        if self.state == SessionState::Closed {
            return;
        }
        info!(peer = %self.target, "session closed");
        self.teardown();
        view.blocked = true;
        view.notify(format!("Disconnected from {}", self.target), now);
    }

    pub fn on_error(&mut self, err: &str, view: &mut ViewModel, now: Instant) {
        if self.state == SessionState::Closed {
            return;
        }
        warn!(peer = %self.target, error = err, "socket error");
        self.on_close(view, now);
    }

    pub fn on_connect_failed(&mut self, err: &str, view: &mut ViewModel, now: Instant) {
        warn!(peer = %self.target, error = err, "connect failed");
        self.teardown();
        view.blocked = true;
        view.notify_error(format!("Could not connect to {}: {err}", self.target), now);
    }

    fn teardown(&mut self) {
        self.state = SessionState::Closed;
        self.scheduler.clear_all();
        self.outbox.clear();
    }

    pub(crate) fn note_peer_id(&mut self, id: i64) {
        if id > 0 {
            self.last_peer_id = id;
        }
    }
}
