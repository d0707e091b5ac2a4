//! Wire envelope shared with the backend: JSON text frames, one packet per frame.

use serde::de::Unexpected;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed packet: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketType {
    Request,
    Response,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
    #[serde(other)]
    Other,
}

impl Default for PacketType {
    fn default() -> Self {
        PacketType::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    #[serde(default)]
    pub packettype: PacketType,
    #[serde(default)]
    pub packetid: i64,
    #[serde(default)]
    pub time: i64,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub body: Value,
}

impl Packet {
    /// Body-less request as the client sends it: `body` is the empty string.
    pub fn request(kind: RequestKind, packetid: i64, time: i64) -> Self {
        Self {
            packettype: PacketType::Request,
            packetid,
            time,
            kind: kind.as_str().to_string(),
            status: None,
            message: None,
            body: Value::String(String::new()),
        }
    }

    pub fn response_kind(&self) -> ResponseKind {
        ResponseKind::parse(&self.kind)
    }
}

pub fn encode(p: &Packet) -> String {
    // Packet only holds strings, integers and a Value, none of which can fail.
    serde_json::to_string(p).unwrap_or_default()
}

/// Only a JSON object is a packet; arrays and scalars are rejected even
/// though every field has a default.
pub fn decode(text: &str) -> Result<Packet, CodecError> {
    match serde_json::from_str::<Value>(text)? {
        obj @ Value::Object(_) => Ok(serde_json::from_value(obj)?),
        other => Err(CodecError::Malformed(serde::de::Error::invalid_type(
            unexpected(&other),
            &"a packet object",
        ))),
    }
}

fn unexpected(v: &Value) -> Unexpected<'_> {
    match v {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Requests the client issues. None of them carry a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Init,
    GetDiskInfo,
    GetFileInfo,
    GetRuntimeInfo,
    GetServerInfo,
    GetBlockInfo,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Init => "init",
            RequestKind::GetDiskInfo => "getdiskinfo",
            RequestKind::GetFileInfo => "getfileinfo",
            RequestKind::GetRuntimeInfo => "getruntimeinfo",
            RequestKind::GetServerInfo => "getserverinfo",
            RequestKind::GetBlockInfo => "getblockinfo",
        }
    }
}

/// Response tags the client understands; anything else lands in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    Init,
    DiskInfo,
    FileInfo,
    FileSizeInfo,
    BlockInfo,
    RuntimeInfo,
    ServerInfo,
    Unknown(String),
}

impl ResponseKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "init" => ResponseKind::Init,
            "diskinfo" => ResponseKind::DiskInfo,
            "fileinfo" => ResponseKind::FileInfo,
            "filesizeinfo" => ResponseKind::FileSizeInfo,
            "blockinfo" => ResponseKind::BlockInfo,
            "runtimeinfo" => ResponseKind::RuntimeInfo,
            "serverinfo" => ResponseKind::ServerInfo,
            other => ResponseKind::Unknown(other.to_string()),
        }
    }
}
