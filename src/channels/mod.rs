//! Channel abstraction for message I/O.
//!
//! A channel is the chat surface: it yields user utterances as a stream
//! and displays assistant responses. The dialogue core never touches a
//! channel directly.

pub mod cli;

pub use cli::CliChannel;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;

/// An inbound user utterance.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub channel: String,
    pub sender: String,
    pub content: String,
}

impl IncomingMessage {
    pub fn new(channel: &str, sender: &str, content: &str) -> Self {
        Self {
            channel: channel.to_string(),
            sender: sender.to_string(),
            content: content.to_string(),
        }
    }
}

/// An outbound assistant response, with an optional progress line
/// (classified / pending counts) for the host to render.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    pub content: String,
    pub progress: Option<String>,
}

impl OutgoingResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = Some(progress.into());
        self
    }
}

/// Stream of inbound messages produced by a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A chat surface: message source plus response sink.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel identifier for logging.
    fn name(&self) -> &str;

    /// Start the channel and return its message stream.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Display a response to the user.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    /// Shut the channel down.
    async fn shutdown(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
