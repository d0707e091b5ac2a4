//! Backend address parsing.

use blockwatch::target::{Target, TargetError, DEFAULT_PORT};

#[test]
fn bare_host_gets_default_port() {
    let t = Target::parse("192.168.1.20", DEFAULT_PORT).unwrap();
    assert_eq!(t.url.as_str(), "ws://192.168.1.20:8002/");
    assert_eq!(t.label(), "192.168.1.20:8002");
}

#[test]
fn host_and_port() {
    let t = Target::parse("pi.local:9001", DEFAULT_PORT).unwrap();
    assert_eq!((t.host.as_str(), t.port), ("pi.local", 9001));
}

#[test]
fn full_urls_are_kept() {
    let t = Target::parse("ws://example:1/ws", DEFAULT_PORT).unwrap();
    assert_eq!(t.url.as_str(), "ws://example:1/ws");
    assert_eq!(t.port, 1);

    let t = Target::parse("wss://secure.example", DEFAULT_PORT).unwrap();
    assert_eq!(t.port, 443);
}

#[test]
fn rejects_other_schemes_and_empty_hosts() {
    assert_eq!(
        Target::parse("http://host:8002", DEFAULT_PORT),
        Err(TargetError::Scheme("http".into()))
    );
    assert!(Target::parse("", DEFAULT_PORT).is_err());
    assert!(Target::parse("ws://", DEFAULT_PORT).is_err());
}
