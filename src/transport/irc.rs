//! Twitch IRC transport over plain TCP.
//!
//! A reader task turns incoming lines into [`InboundEvent`]s and pushes them
//! into a bounded channel, answering `PING`s on its own. Sends take the
//! writer lock, write one line and flush, so a returned `Ok(())` means the
//! line reached the socket.

use super::wire::{Line, sanitize};
use super::{InboundEvent, Transport, TransportError};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, mpsc};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

/// Inbound events buffered between the reader task and the dispatcher.
const EVENT_QUEUE_SIZE: usize = 256;
/// Twitch caps messages well below this, including tags.
pub const MAX_LINE_LENGTH: usize = 8192;
/// Pseudo channel Twitch routes chat commands such as `/w` through.
const WHISPER_CHANNEL: &str = "#jtv";
const CAPABILITIES: [&str; 2] = ["twitch.tv/membership", "twitch.tv/commands"];

/// Connection parameters.
#[derive(Clone)]
pub struct IrcOptions {
    pub host: String,
    pub port: u16,
    pub nick: String,
    /// OAuth token, `oauth:...`.
    pub pass: String,
}

impl std::fmt::Debug for IrcOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrcOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("nick", &self.nick)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Live connection to a Twitch IRC server.
#[derive(Debug)]
pub struct IrcTransport {
    writer: Mutex<BufWriter<OwnedWriteHalf>>,
    closed: AtomicBool,
}

impl IrcTransport {
    /// Connect, authenticate and start the reader task.
    ///
    /// The returned receiver yields events in arrival order and ends with
    /// [`InboundEvent::Disconnected`].
    pub async fn connect(
        options: &IrcOptions,
    ) -> Result<(Arc<Self>, mpsc::Receiver<InboundEvent>), TransportError> {
        info!(host = %options.host, port = options.port, "Connecting");
        let stream = TcpStream::connect((options.host.as_str(), options.port)).await?;
        let (read_half, write_half) = stream.into_split();

        let transport = Arc::new(Self {
            writer: Mutex::new(BufWriter::new(write_half)),
            closed: AtomicBool::new(false),
        });

        transport.write_line(&format!("PASS {}", options.pass)).await?;
        transport.write_line(&format!("NICK {}", options.nick)).await?;

        let (tx, rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let reader = FramedRead::new(read_half, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        tokio::spawn(read_loop(reader, Arc::clone(&transport), tx));

        Ok((transport, rx))
    }

    /// Whether the connection has been torn down.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn write_line(&self, line: &str) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\r\n").await?;
        writer.flush().await?;
        Ok(())
    }

    async fn privmsg(&self, target: &str, text: &str) -> Result<(), TransportError> {
        self.write_line(&format!("PRIVMSG {} :{}", target, sanitize(text)))
            .await
    }
}

#[async_trait]
impl Transport for IrcTransport {
    async fn send_channel_message(&self, channel: &str, text: &str) -> Result<(), TransportError> {
        self.privmsg(channel, text).await
    }

    async fn send_whisper(&self, target: &str, text: &str) -> Result<(), TransportError> {
        self.privmsg(WHISPER_CHANNEL, &format!("/w {} {}", target, text))
            .await
    }

    async fn apply_timeout(
        &self,
        channel: &str,
        target: &str,
        duration: Duration,
    ) -> Result<(), TransportError> {
        let secs = duration.as_secs().max(1);
        self.privmsg(channel, &format!("/timeout {} {}", target, secs))
            .await
    }

    async fn join_channel(&self, channel: &str) -> Result<(), TransportError> {
        self.write_line(&format!("JOIN {}", channel)).await
    }

    async fn quit(&self, reason: Option<&str>) -> Result<(), TransportError> {
        let line = match reason {
            Some(reason) => format!("QUIT :{}", sanitize(reason)),
            None => "QUIT".to_string(),
        };
        let result = self.write_line(&line).await;
        self.closed.store(true, Ordering::SeqCst);
        let mut writer = self.writer.lock().await;
        let _ = writer.shutdown().await;
        result
    }
}

async fn read_loop(
    mut reader: FramedRead<OwnedReadHalf, LinesCodec>,
    transport: Arc<IrcTransport>,
    events: mpsc::Sender<InboundEvent>,
) {
    // A decode error makes the framed stream yield a single `None` before it
    // resumes reading.
    let mut resuming = false;
    let reason = loop {
        let raw = match reader.next().await {
            Some(Ok(raw)) => {
                resuming = false;
                raw
            }
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                warn!(max = MAX_LINE_LENGTH, "Discarding overlong line");
                resuming = true;
                continue;
            }
            Some(Err(e)) => break Some(e.to_string()),
            None if resuming => {
                resuming = false;
                continue;
            }
            None => break Some("connection closed by server".to_string()),
        };

        let Some(line) = Line::parse(&raw) else {
            continue;
        };

        match line.command {
            "PING" => {
                let token = line.param(0).unwrap_or("tmi.twitch.tv");
                if let Err(e) = transport.write_line(&format!("PONG :{}", token)).await {
                    warn!(error = %e, "Failed to answer PING");
                }
                continue;
            }
            "001" => {
                for cap in CAPABILITIES {
                    if let Err(e) = transport.write_line(&format!("CAP REQ :{}", cap)).await {
                        warn!(capability = cap, error = %e, "Could not request capability");
                    }
                }
            }
            _ => {}
        }

        match line.to_event() {
            Some(event) => {
                if events.send(event).await.is_err() {
                    debug!("Event receiver dropped, stopping reader");
                    break None;
                }
            }
            None => debug!(command = line.command, "Ignoring line"),
        }
    };

    transport.closed.store(true, Ordering::SeqCst);
    info!(reason = reason.as_deref().unwrap_or("local shutdown"), "Disconnected");
    let _ = events.send(InboundEvent::Disconnected { reason }).await;
}
