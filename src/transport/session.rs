//! Reconnecting device session.
//!
//! A [`Session`] owns one logical connection to the device endpoint for its
//! whole lifetime. Internally a single spawned task runs the connect loop:
//!
//! ```text
//! Disconnected --open--> Connecting --handshake ok--> Connected
//! Connected    --close/error--> Disconnected
//! Connecting   --handshake err--> Disconnected
//! Disconnected --(reconnect delay)--> Connecting      [automatic]
//! ```
//!
//! Exactly one reconnect attempt is scheduled per loss; there is no attempt
//! cap and no circuit breaker. Frames sent while not connected are dropped
//! and logged; the caller never sees an error, and nothing is queued for
//! later delivery. Frames that slip into the channel during a disconnect
//! race are drained during the retry wait so a stale intent can never be
//! delivered after reconnecting.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, trace, warn};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::protocol::PixelFrame;
use crate::transport::WireSink;

// ============================================================================
// Types
// ============================================================================

/// The session's WebSocket stream type.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of the socket.
type WsWrite = SplitSink<WsStream, Message>;

/// Handler for raw inbound text, diagnostics only.
pub type MessageHandler = Box<dyn Fn(&str) + Send + Sync>;

// ============================================================================
// ConnectionState
// ============================================================================

/// Observable connectivity of the session.
///
/// Owned by the session loop; callers can read it, never write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No socket, no attempt in flight.
    #[default]
    Disconnected,
    /// Handshake in flight.
    Connecting,
    /// Socket open; sends go out immediately.
    Connected,
}

// ============================================================================
// SessionCommand
// ============================================================================

/// Internal commands for the session loop.
enum SessionCommand {
    /// Transmit an encoded frame.
    Send(String),
    /// Close the socket and terminate the loop.
    Shutdown,
}

// ============================================================================
// Shared
// ============================================================================

/// State shared between the handle and the session loop.
struct Shared {
    /// Current connectivity, read by `send` to gate enqueueing.
    state: Mutex<ConnectionState>,
    /// Inbound-message handler slot.
    message_handler: Mutex<Option<MessageHandler>>,
}

impl Shared {
    fn set_state(&self, next: ConnectionState) {
        let mut state = self.state.lock();
        if *state != next {
            debug!(from = ?*state, to = ?next, "connection state changed");
            *state = next;
        }
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock()
    }
}

// ============================================================================
// Session
// ============================================================================

/// A resilient connection to one device endpoint.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`; all operations are non-blocking. Dropping
/// the handle closes the command channel, which terminates the loop at its
/// next poll.
pub struct Session {
    /// Channel into the session loop.
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    /// Observable state (shared with the loop).
    shared: Arc<Shared>,
}

impl Session {
    /// Opens a session: spawns the connect loop and returns the handle.
    ///
    /// Connecting begins immediately. The loop structurally guarantees at
    /// most one attempt in flight, so there is no re-entrant `open` to
    /// guard against.
    #[must_use]
    pub fn open(config: SessionConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            state: Mutex::new(ConnectionState::Disconnected),
            message_handler: Mutex::new(None),
        });

        tokio::spawn(run_connect_loop(config, command_rx, Arc::clone(&shared)));

        Self { command_tx, shared }
    }

    /// Returns the current connectivity.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    /// Returns `true` if the socket is open.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Sets the handler invoked with each raw inbound text message.
    pub fn set_message_handler(&self, handler: MessageHandler) {
        let mut guard = self.shared.message_handler.lock();
        *guard = Some(handler);
    }

    /// Clears the inbound-message handler.
    pub fn clear_message_handler(&self) {
        let mut guard = self.shared.message_handler.lock();
        *guard = None;
    }

    /// Sends one frame, best effort.
    ///
    /// While connected the frame is encoded and transmitted immediately.
    /// Otherwise it is dropped and logged; there is no queueing and no
    /// retry of an individual frame.
    pub fn send(&self, frame: &PixelFrame) {
        if !self.is_connected() {
            warn!("not connected; frame dropped");
            return;
        }

        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "frame encoding failed; frame dropped");
                return;
            }
        };

        if self.command_tx.send(SessionCommand::Send(json)).is_err() {
            warn!("session loop gone; frame dropped");
        }
    }

    /// Closes the socket and terminates the session loop.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(SessionCommand::Shutdown);
    }
}

impl WireSink for Session {
    fn send_frame(&self, frame: &PixelFrame) {
        self.send(frame);
    }
}

// ============================================================================
// Connect Loop
// ============================================================================

/// Runs the reconnecting state machine until shutdown.
async fn run_connect_loop(
    config: SessionConfig,
    mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    shared: Arc<Shared>,
) {
    let mut failures: u32 = 0;

    loop {
        shared.set_state(ConnectionState::Connecting);
        info!(endpoint = config.endpoint(), "opening connection");

        match connect_once(config.endpoint()).await {
            Ok(ws) => {
                failures = 0;
                shared.set_state(ConnectionState::Connected);
                info!("connection opened");

                let shutdown = run_connected(ws, &mut command_rx, &shared).await;
                shared.set_state(ConnectionState::Disconnected);
                if shutdown {
                    break;
                }
                warn!("connection lost");
            }
            Err(e) => {
                shared.set_state(ConnectionState::Disconnected);
                warn!(error = %e, "connect failed");
            }
        }

        let delay = config.reconnect().delay_for(failures);
        failures = failures.saturating_add(1);
        if wait_for_retry(delay, &mut command_rx).await {
            break;
        }
    }

    debug!("session loop terminated");
}

/// Performs one connect handshake.
async fn connect_once(endpoint: &str) -> Result<WsStream> {
    let (ws, _response) = connect_async(endpoint)
        .await
        .map_err(|e| Error::connection(e.to_string()))?;
    Ok(ws)
}

/// Services one open connection. Returns `true` on shutdown.
async fn run_connected(
    ws: WsStream,
    command_rx: &mut mpsc::UnboundedReceiver<SessionCommand>,
    shared: &Shared,
) -> bool {
    let (mut ws_write, mut ws_read) = ws.split();

    loop {
        tokio::select! {
            message = ws_read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        let handler = shared.message_handler.lock();
                        if let Some(handler) = handler.as_ref() {
                            handler(text.as_str());
                        } else {
                            debug!(data = %text, "message received");
                        }
                    }

                    Some(Ok(Message::Close(_))) => {
                        debug!("close frame from device");
                        return false;
                    }

                    Some(Err(e)) => {
                        warn!(error = %e, "socket error");
                        return false;
                    }

                    None => {
                        debug!("socket stream ended");
                        return false;
                    }

                    // Ignore Binary, Ping, Pong
                    _ => {}
                }
            }

            command = command_rx.recv() => {
                match command {
                    Some(SessionCommand::Send(json)) => {
                        if let Err(e) = transmit(&mut ws_write, json).await {
                            warn!(error = %e, "write failed; frame dropped");
                            return false;
                        }
                    }

                    Some(SessionCommand::Shutdown) | None => {
                        debug!("shutting down");
                        let _ = ws_write.close().await;
                        return true;
                    }
                }
            }
        }
    }
}

/// Writes one encoded frame to the socket.
async fn transmit(ws_write: &mut WsWrite, json: String) -> Result<()> {
    ws_write.send(Message::Text(json.into())).await?;
    trace!("frame sent");
    Ok(())
}

/// Waits out the reconnect delay. Returns `true` on shutdown.
///
/// Frames arriving during the gap are stale by definition and are dropped
/// here, logged, so they cannot be delivered after reconnecting.
async fn wait_for_retry(
    delay: Duration,
    command_rx: &mut mpsc::UnboundedReceiver<SessionCommand>,
) -> bool {
    debug!(delay_ms = delay.as_millis() as u64, "reconnect scheduled");

    let retry = tokio::time::sleep(delay);
    tokio::pin!(retry);

    loop {
        tokio::select! {
            _ = &mut retry => return false,

            command = command_rx.recv() => {
                match command {
                    Some(SessionCommand::Send(_)) => warn!("not connected; frame dropped"),
                    Some(SessionCommand::Shutdown) | None => return true,
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    use crate::color::Rgb;
    use crate::config::ReconnectPolicy;

    /// Polls until the session reaches `want`, or panics after 5s.
    async fn wait_for_state(session: &Session, want: ConnectionState) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if session.state() == want {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("session never reached {want:?}"));
    }

    async fn bound_listener() -> (TcpListener, SessionConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        let config = SessionConfig::new(format!("ws://127.0.0.1:{port}/ws"))
            .expect("valid endpoint")
            .with_reconnect(ReconnectPolicy::fixed(Duration::from_millis(100)));
        (listener, config)
    }

    #[tokio::test]
    async fn test_connects_and_delivers_frames() {
        let (listener, config) = bound_listener().await;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("upgrade");
            match ws.next().await {
                Some(Ok(Message::Text(text))) => text.to_string(),
                other => panic!("expected text frame, got {other:?}"),
            }
        });

        let session = Session::open(config);
        wait_for_state(&session, ConnectionState::Connected).await;

        session.send(&PixelFrame::broadcast(Rgb::new(255, 87, 51)));

        let received = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server finished")
            .expect("server task");
        let frame: PixelFrame = serde_json::from_str(&received).expect("wire json");
        assert_eq!(frame, PixelFrame::broadcast(Rgb::new(255, 87, 51)));

        session.shutdown();
    }

    #[tokio::test]
    async fn test_send_while_disconnected_is_silent() {
        // Nothing is listening on this endpoint.
        let (listener, config) = bound_listener().await;
        drop(listener);

        let session = Session::open(config);
        assert_ne!(session.state(), ConnectionState::Connected);

        // Must neither panic nor error; the frame is dropped.
        session.send(&PixelFrame::broadcast(Rgb::new(1, 2, 3)));
        session.shutdown();
    }

    #[tokio::test]
    async fn test_reconnects_after_loss_waiting_out_the_delay() {
        let (listener, config) = bound_listener().await;

        let server = tokio::spawn(async move {
            // First connection: hold it briefly, then drop to sever it.
            let (stream, _) = listener.accept().await.expect("accept");
            let ws = accept_async(stream).await.expect("upgrade");
            tokio::time::sleep(Duration::from_millis(300)).await;
            let dropped_at = std::time::Instant::now();
            drop(ws);

            // The session must come back on its own, but not before the
            // configured delay has passed.
            let (stream, _) = listener.accept().await.expect("second accept");
            let gap = dropped_at.elapsed();
            let _ws = accept_async(stream).await.expect("second upgrade");
            tokio::time::sleep(Duration::from_millis(500)).await;
            gap
        });

        let session = Session::open(config);
        wait_for_state(&session, ConnectionState::Connected).await;
        wait_for_state(&session, ConnectionState::Disconnected).await;
        wait_for_state(&session, ConnectionState::Connected).await;

        let gap = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server finished")
            .expect("server task");
        assert!(
            gap >= Duration::from_millis(100),
            "reconnected after {gap:?}, before the configured delay"
        );

        session.shutdown();
    }

    #[tokio::test]
    async fn test_each_loss_schedules_one_further_attempt() {
        let (listener, config) = bound_listener().await;

        let server = tokio::spawn(async move {
            // Sever two connections in a row; the session must retry once
            // per loss and settle on the third.
            for _ in 0..2 {
                let (stream, _) = listener.accept().await.expect("accept");
                let ws = accept_async(stream).await.expect("upgrade");
                tokio::time::sleep(Duration::from_millis(300)).await;
                drop(ws);
            }

            let (stream, _) = listener.accept().await.expect("final accept");
            let _ws = accept_async(stream).await.expect("final upgrade");
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let session = Session::open(config);
        for _ in 0..2 {
            wait_for_state(&session, ConnectionState::Connected).await;
            wait_for_state(&session, ConnectionState::Disconnected).await;
        }
        wait_for_state(&session, ConnectionState::Connected).await;

        session.shutdown();
        server.abort();
    }

    #[tokio::test]
    async fn test_message_handler_receives_inbound_text() {
        let (listener, config) = bound_listener().await;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("upgrade");
            // Give the client a beat to register its handler.
            tokio::time::sleep(Duration::from_millis(200)).await;
            ws.send(Message::Text("status: ok".into()))
                .await
                .expect("server send");
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let session = Session::open(config);
        let received = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&received);
        session.set_message_handler(Box::new(move |text| {
            sink.lock().push(text.to_string());
        }));

        wait_for_state(&session, ConnectionState::Connected).await;

        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if !received.lock().is_empty() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("handler never fired");

        assert_eq!(received.lock()[0], "status: ok");
        session.shutdown();
        server.abort();
    }
}
