//! Response dispatch and the per-category handlers.
//!
//! Every handler follows the same sequence: clear the category's timer,
//! store the snapshot in the view model, arm the timer again. A category
//! whose reply never comes (or comes back as an error) is not polled again.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::protocol::{Packet, PacketType, ResponseKind, Status};
use crate::grid::MAX_CELLS;
use crate::scheduler::PollCategory;
use crate::session::SessionContext;
use crate::types::{
    BlockInfo, DiskInfo, FileInfo, FileSizeInfo, InitBundle, RuntimeInfo, ServerInfo,
};
use crate::view::ViewModel;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("response body has no `{0}` object")]
    MissingField(&'static str),
    #[error("bad `{field}` object: {source}")]
    BadField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn sub_object<T: DeserializeOwned>(body: &Value, field: &'static str) -> Result<T, HandlerError> {
    let v = body.get(field).ok_or(HandlerError::MissingField(field))?;
    serde_json::from_value(v.clone()).map_err(|source| HandlerError::BadField { field, source })
}

impl SessionContext {
    pub(crate) fn dispatch(&mut self, p: Packet, view: &mut ViewModel, now: Instant) {
        self.note_peer_id(p.packetid);

        if p.packettype != PacketType::Response {
            debug!(packettype = ?p.packettype, kind = %p.kind, "ignoring non-response packet");
            return;
        }

        match p.status {
            Some(Status::Ok) => {}
            Some(Status::Error) => {
                let msg = p
                    .message
                    .unwrap_or_else(|| format!("{} request failed", p.kind));
                warn!(kind = %p.kind, message = %msg, "server error");
                view.notify_error(msg, now);
                return;
            }
            other => {
                debug!(status = ?other, kind = %p.kind, "ignoring response without OK status");
                return;
            }
        }

        let res = match p.response_kind() {
            ResponseKind::Init => serde_json::from_value::<InitBundle>(p.body)
                .map_err(|source| HandlerError::BadField { field: "init", source })
                .map(|b| self.handle_init(b, view, now)),
            ResponseKind::DiskInfo => {
                sub_object(&p.body, "diskinfo").map(|d| self.handle_disk(d, view, now))
            }
            ResponseKind::FileInfo => {
                sub_object(&p.body, "fileinfo").map(|f| self.handle_file(f, view, now))
            }
            ResponseKind::FileSizeInfo => {
                sub_object(&p.body, "filesizeinfo").map(|f| self.handle_file_size(f, view, now))
            }
            ResponseKind::BlockInfo => {
                sub_object(&p.body, "blockinfo").map(|b| self.handle_block(b, view, now))
            }
            ResponseKind::RuntimeInfo => {
                sub_object(&p.body, "runtimeinfo").map(|r| self.handle_runtime(r, view, now))
            }
            ResponseKind::ServerInfo => {
                sub_object(&p.body, "serverinfo").map(|s| self.handle_server(s, view, now))
            }
            ResponseKind::Unknown(tag) => {
                debug!(kind = %tag, "ignoring response of unknown type");
                Ok(())
            }
        };

        if let Err(e) = res {
            warn!(kind = %p.kind, error = %e, "dropping response");
            view.notify_error(e.to_string(), now);
        }
    }

    fn handle_init(&mut self, bundle: InitBundle, view: &mut ViewModel, now: Instant) {
        if let Some(d) = bundle.diskinfo {
            self.handle_disk(d, view, now);
        }
        if let Some(f) = bundle.fileinfo {
            self.handle_file(f, view, now);
        }
        let cells = bundle.filesizeinfo.as_ref().map(FileSizeInfo::cell_count);
        if let Some(f) = bundle.filesizeinfo {
            self.handle_file_size(f, view, now);
        }
        if let Some(s) = bundle.serverinfo {
            self.handle_server(s, view, now);
        }
        self.scheduler.arm(PollCategory::Runtime, now);

        match cells.map(|n| usize::try_from(n).unwrap_or(usize::MAX)) {
            Some(n) if n > MAX_CELLS => {
                warn!(cells = n, max = MAX_CELLS, "block map too large; not built");
                view.notify_error(
                    format!("Block map of {n} cells exceeds the {MAX_CELLS} cell limit"),
                    now,
                );
            }
            Some(n) => {
                view.grid.build(n, view.grid_width);
                info!(cells = n, columns = view.grid.columns(), "block map built");
                self.scheduler.arm(PollCategory::Block, now);
            }
            None => warn!("init carried no filesizeinfo; block map not built"),
        }
    }

    fn handle_disk(&mut self, info: DiskInfo, view: &mut ViewModel, now: Instant) {
        self.scheduler.clear(PollCategory::Disk);
        view.set_disk(info);
        self.scheduler.arm(PollCategory::Disk, now);
    }

    fn handle_file(&mut self, info: FileInfo, view: &mut ViewModel, now: Instant) {
        self.scheduler.clear(PollCategory::File);
        view.files = Some(info);
        self.scheduler.arm(PollCategory::File, now);
    }

    // Size limits have no request of their own; they ride on the file poll.
    fn handle_file_size(&mut self, info: FileSizeInfo, view: &mut ViewModel, now: Instant) {
        self.scheduler.clear(PollCategory::File);
        view.file_sizes = Some(info);
        self.scheduler.arm(PollCategory::File, now);
    }

    fn handle_server(&mut self, info: ServerInfo, view: &mut ViewModel, now: Instant) {
        self.scheduler.clear(PollCategory::Server);
        view.server = Some(info);
        self.scheduler.arm(PollCategory::Server, now);
    }

    fn handle_runtime(&mut self, info: RuntimeInfo, view: &mut ViewModel, now: Instant) {
        self.scheduler.clear(PollCategory::Runtime);
        debug!(runtime = %info.0, "runtime info");
        view.runtime = Some(info);
        self.scheduler.arm(PollCategory::Runtime, now);
    }

    fn handle_block(&mut self, info: BlockInfo, view: &mut ViewModel, now: Instant) {
        self.scheduler.clear(PollCategory::Block);
        let map = &info.filemapinfo;
        view.grid.apply_bitmap(&map.map, map.mapsize);
        self.scheduler.arm(PollCategory::Block, now);
    }
}
