//! Types that mirror the backend's response bodies.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DiskInfo {
    pub totalblocks: u64,
    pub freeblocks: u64,
    pub usedblocks: u64,
    pub totalbytes: u64,
    pub freebytes: u64,
    pub usedbytes: u64,
    pub totalinodes: u64,
    pub freeinodes: u64,
    pub usedinodes: u64,
    pub blocksize: u64,

    // comma-grouped renditions prepared by the server
    pub totalblocksstring: String,
    pub freeblocksstring: String,
    pub usedblocksstring: String,
    pub totalbytesstring: String,
    pub freebytesstring: String,
    pub usedbytesstring: String,
    pub totalinodesstring: String,
    pub freeinodesstring: String,
    pub usedinodesstring: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FileInfo {
    pub count: u64,
    pub size: u64,
    pub created: u64,
    pub destroyed: u64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FileSizeInfo {
    pub maxfiles: u64,
    pub maxfilesize: u64,
    pub maxfilesint: u64,
}

impl FileSizeInfo {
    /// Cells in the block map. Servers that predate `maxfilesint` only send
    /// `maxfiles`.
    pub fn cell_count(&self) -> u64 {
        if self.maxfilesint > 0 {
            self.maxfilesint
        } else {
            self.maxfiles
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ServerInfo {
    #[serde(deserialize_with = "text_or_number")]
    pub starttime: String,
    #[serde(deserialize_with = "text_or_number")]
    pub currenttime: String,
    pub updays: u64,
    pub uphours: u64,
    pub upminutes: u64,
    pub upseconds: u64,
}

impl ServerInfo {
    /// "2 Days 0 Hours 5 Minutes 1 Seconds": leading zero units are dropped,
    /// seconds are always shown.
    pub fn uptime_label(&self) -> String {
        let mut s = String::new();
        if self.updays > 0 {
            s.push_str(&format!("{} Days ", self.updays));
        }
        if self.uphours > 0 || !s.is_empty() {
            s.push_str(&format!("{} Hours ", self.uphours));
        }
        if self.upminutes > 0 || !s.is_empty() {
            s.push_str(&format!("{} Minutes ", self.upminutes));
        }
        s.push_str(&format!("{} Seconds", self.upseconds));
        s
    }
}

/// Opaque; only its arrival matters.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RuntimeInfo(pub Value);

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FileMapInfo {
    pub map: String,
    pub mapsize: usize,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct BlockInfo {
    pub filemapinfo: FileMapInfo,
}

/// Body of the `init` response; the server may omit any part of it.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InitBundle {
    pub diskinfo: Option<DiskInfo>,
    pub fileinfo: Option<FileInfo>,
    pub filesizeinfo: Option<FileSizeInfo>,
    pub serverinfo: Option<ServerInfo>,
}

// The server has sent these both as epoch integers and as preformatted text.
fn text_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
