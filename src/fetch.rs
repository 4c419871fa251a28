//! Background fetches
//!
//! Each [`Request`] runs on its own tokio task and posts an [`AppMessage`]
//! back to the event loop. Nothing is cancelled or coalesced: a request that
//! has been issued always runs to completion.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::OmdbClient;
use crate::app::{AppMessage, Request};

/// Perform a request and build the message describing its outcome
pub async fn perform(client: &OmdbClient, request: Request) -> AppMessage {
    match request {
        Request::Search { seq, filters } => AppMessage::SearchLoaded {
            seq,
            page: filters.page,
            result: client.search(&filters).await,
        },
        Request::Lookup { seq, imdb_id } => {
            let result = client.lookup(&imdb_id).await;
            AppMessage::DetailLoaded {
                seq,
                imdb_id,
                result,
            }
        }
    }
}

/// Spawn a request; the outcome is sent on `tx`
pub fn spawn(
    client: Arc<OmdbClient>,
    tx: UnboundedSender<AppMessage>,
    request: Request,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let seq = request.seq();
        let msg = perform(&client, request).await;
        if tx.send(msg).is_err() {
            debug!(seq, "event loop gone, fetch result discarded");
        }
    })
}
