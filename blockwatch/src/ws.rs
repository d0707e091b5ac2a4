//! WebSocket plumbing: connect, then split into a writer the event loop keeps
//! and a reader task that posts everything it sees onto the inbound channel.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub type WsSink = SplitSink<WsStream, Message>;

/// What the reader task reports to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Frame(String),
    Error(String),
    Closed,
}

// Connect to the backend and return the WS stream
pub async fn connect(url: &str) -> Result<WsStream, tokio_tungstenite::tungstenite::Error> {
    if url.starts_with("wss://") {
        ensure_crypto_provider();
    }
    let (ws, _) = connect_async(url).await?;
    Ok(ws)
}

// rustls needs a process-wide provider before the first TLS handshake.
fn ensure_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    }
}

/// Splits the socket; the returned sink is the only writer.
pub fn spawn_reader(ws: WsStream, tx: mpsc::UnboundedSender<Inbound>) -> (WsSink, JoinHandle<()>) {
    let (sink, stream) = ws.split();
    let handle = tokio::spawn(read_loop(stream, tx));
    (sink, handle)
}

async fn read_loop(mut stream: SplitStream<WsStream>, tx: mpsc::UnboundedSender<Inbound>) {
    while let Some(msg) = stream.next().await {
        let ev = match msg {
            Ok(Message::Text(text)) => Inbound::Frame(text),
            Ok(Message::Close(_)) => break,
            // ping/pong are answered by tungstenite; binary frames are not part of the protocol
            Ok(other) => {
                debug!(len = other.len(), "ignoring non-text frame");
                continue;
            }
            Err(e) => {
                let _ = tx.send(Inbound::Error(e.to_string()));
                break;
            }
        };
        if tx.send(ev).is_err() {
            // event loop is gone
            return;
        }
    }
    let _ = tx.send(Inbound::Closed);
}

pub async fn send_frames(sink: &mut WsSink, frames: Vec<String>) -> Result<(), tokio_tungstenite::tungstenite::Error> {
    for f in frames {
        sink.send(Message::Text(f)).await?;
    }
    Ok(())
}
