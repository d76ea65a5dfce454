use std::sync::Arc;

use tokio::sync::mpsc;

use crate::provider::{CompletionProvider, ProviderError};
use crate::terminal::ChatRequest;

/// Outcome of a dispatched chat request. The id lets the terminal drop
/// replies that arrive after a close.
#[derive(Debug)]
pub struct ChatReply {
    pub id: u64,
    pub result: Result<String, ProviderError>,
}

/// Bridges the terminal's outgoing requests to the completion provider
/// without blocking the host event loop: each dispatch runs on its own task
/// and the reply lands on the receiver handed out by [`ChatRouter::new`].
pub struct ChatRouter {
    provider: Arc<dyn CompletionProvider>,
    tx: mpsc::UnboundedSender<ChatReply>,
}

impl ChatRouter {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> (Self, mpsc::UnboundedReceiver<ChatReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { provider, tx }, rx)
    }

    pub fn dispatch(&self, request: ChatRequest) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.complete(&request.message).await;
            if tx
                .send(ChatReply {
                    id: request.id,
                    result,
                })
                .is_err()
            {
                tracing::warn!(id = request.id, "chat reply receiver dropped");
            }
        });
    }
}
