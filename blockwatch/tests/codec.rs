//! Envelope encode/decode against the backend's JSON shapes.

use blockwatch::protocol::{
    decode, encode, CodecError, Packet, PacketType, RequestKind, ResponseKind, Status,
};
use serde_json::json;

#[test]
fn request_has_empty_string_body() {
    let p = Packet::request(RequestKind::GetDiskInfo, 5, 1_607_000_000_000);
    let v: serde_json::Value = serde_json::from_str(&encode(&p)).unwrap();
    assert_eq!(
        v,
        json!({
            "packettype": "request",
            "packetid": 5,
            "time": 1_607_000_000_000i64,
            "type": "getdiskinfo",
            "body": ""
        })
    );
}

#[test]
fn decodes_server_response() {
    let raw = r#"{"packettype":"response","packetid":7,"time":1607000000,"type":"fileinfo",
                  "status":"OK","body":{"fileinfo":{"size":4096,"count":3,"created":9,"destroyed":6}}}"#;
    let p = decode(raw).unwrap();
    assert_eq!(p.packettype, PacketType::Response);
    assert_eq!(p.packetid, 7);
    assert_eq!(p.status, Some(Status::Ok));
    assert_eq!(p.response_kind(), ResponseKind::FileInfo);
    assert_eq!(p.body["fileinfo"]["count"], 3);
}

#[test]
fn error_response_keeps_message() {
    let p = decode(r#"{"packettype":"response","packetid":2,"status":"Error","type":"diskinfo","message":"disk unavailable"}"#).unwrap();
    assert_eq!(p.status, Some(Status::Error));
    assert_eq!(p.message.as_deref(), Some("disk unavailable"));
    assert!(p.body.is_null());
}

#[test]
fn unexpected_tags_decode_without_failing() {
    let p = decode(r#"{"packettype":"push","status":"Maybe","type":"weather"}"#).unwrap();
    assert_eq!(p.packettype, PacketType::Unknown);
    assert_eq!(p.status, Some(Status::Other));
    assert_eq!(p.packetid, 0);
    assert_eq!(p.response_kind(), ResponseKind::Unknown("weather".into()));
}

#[test]
fn malformed_text_is_rejected() {
    for raw in [
        "",
        "not json",
        "{\"packettype\":",
        "[1,2,3]",
        "[]",
        r#"["response",5,0,"diskinfo","OK",null,{}]"#,
        "42",
        "\"init\"",
        "null",
    ] {
        assert!(
            matches!(decode(raw), Err(CodecError::Malformed(_))),
            "expected malformed for {raw:?}"
        );
    }
}

#[test]
fn round_trip_preserves_packets() {
    let packets = vec![
        Packet::request(RequestKind::Init, 1, 10),
        Packet::request(RequestKind::GetBlockInfo, 99, 20),
        Packet {
            packettype: PacketType::Response,
            packetid: 3,
            time: 30,
            kind: "blockinfo".into(),
            status: Some(Status::Ok),
            message: None,
            body: json!({"blockinfo": {"filemapinfo": {"map": "0101", "mapsize": 4}}}),
        },
        Packet {
            packettype: PacketType::Response,
            packetid: 4,
            time: 40,
            kind: "diskinfo".into(),
            status: Some(Status::Error),
            message: Some("disk unavailable".into()),
            body: serde_json::Value::Null,
        },
    ];
    for p in packets {
        assert_eq!(decode(&encode(&p)).unwrap(), p);
    }
}

#[test]
fn request_tags_match_wire_names() {
    let names: Vec<_> = [
        RequestKind::Init,
        RequestKind::GetDiskInfo,
        RequestKind::GetFileInfo,
        RequestKind::GetRuntimeInfo,
        RequestKind::GetServerInfo,
        RequestKind::GetBlockInfo,
    ]
    .iter()
    .map(|k| k.as_str())
    .collect();
    assert_eq!(
        names,
        ["init", "getdiskinfo", "getfileinfo", "getruntimeinfo", "getserverinfo", "getblockinfo"]
    );
}
