//! End-to-end over a real socket: an in-test peer answers `init`, then hangs up.

use std::time::{Duration, Instant};

use blockwatch::protocol::decode;
use blockwatch::session::{SessionContext, SessionState};
use blockwatch::target::Target;
use blockwatch::view::ViewModel;
use blockwatch::ws::{self, Inbound};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{accept_async, tungstenite::Message};

#[tokio::test]
async fn init_round_trip_then_peer_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let peer = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();
        let msg = ws.next().await.unwrap().unwrap();
        let req = decode(msg.to_text().unwrap()).unwrap();
        let reply = json!({
            "packettype": "response", "packetid": req.packetid, "time": 1607000000,
            "type": "init", "status": "OK",
            "body": {
                "diskinfo": {"totalblocks": 1000, "freeblocks": 250},
                "fileinfo": {"count": 2, "size": 100, "created": 2, "destroyed": 0},
                "filesizeinfo": {"maxfiles": 6, "maxfilesize": 50, "maxfilesint": 6}
            }
        });
        ws.send(Message::Text(reply.to_string())).await.unwrap();
        ws.close(None).await.unwrap();
        req
    });

    let target = Target::parse(&addr.to_string(), 0).unwrap();
    let stream = ws::connect(target.url.as_str()).await.expect("connect");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (mut sink, _reader) = ws::spawn_reader(stream, tx);

    let mut session = SessionContext::new(target.label());
    let mut view = ViewModel::new(22);
    session.open(&mut view, Instant::now());
    ws::send_frames(&mut sink, session.drain_outbound()).await.unwrap();

    loop {
        let ev = timeout(Duration::from_secs(5), rx.recv()).await.expect("peer went quiet");
        let now = Instant::now();
        match ev {
            Some(Inbound::Frame(text)) => session.on_frame(&text, &mut view, now),
            Some(Inbound::Error(e)) => {
                session.on_error(&e, &mut view, now);
                break;
            }
            Some(Inbound::Closed) | None => {
                session.on_close(&mut view, now);
                break;
            }
        }
    }

    let req = peer.await.unwrap();
    assert_eq!(req.kind, "init");
    assert_eq!(req.packetid, 1);

    assert_eq!(view.grid.len(), 6);
    assert_eq!(view.disk.as_ref().unwrap().usage[0].used_per_mille, 750);
    assert_eq!(session.state(), SessionState::Closed);
    assert!(view.blocked);
    assert_eq!(session.scheduler().pending_count(), 0);
}

#[tokio::test]
async fn connect_to_closed_port_fails() {
    // bind then drop to get a port nobody listens on
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap().port()
    };
    let target = Target::parse(&format!("127.0.0.1:{port}"), 0).unwrap();
    assert!(ws::connect(target.url.as_str()).await.is_err());
}

#[tokio::test]
async fn wss_target_reaches_tls_handshake() {
    use tokio_tungstenite::tungstenite::{error::UrlError, Error};

    // a plain TCP peer that hangs up: the client must get as far as TLS
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let peer = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        drop(tcp);
    });

    let target = Target::parse(&format!("wss://127.0.0.1:{port}"), 0).unwrap();
    let res = timeout(Duration::from_secs(5), ws::connect(target.url.as_str()))
        .await
        .expect("connect timed out");
    let Err(err) = res else {
        panic!("handshake against a hung-up peer succeeded");
    };
    assert!(
        !matches!(err, Error::Url(UrlError::TlsFeatureNotEnabled)),
        "wss rejected before connecting: {err}"
    );
    peer.await.unwrap();
}
