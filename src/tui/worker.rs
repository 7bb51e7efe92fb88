//! Background execution of generation requests.
//!
//! The event loop stays synchronous. Each submission is spawned onto the
//! tokio runtime and reports back over a channel that the loop drains
//! between input polls.

use std::sync::mpsc::Sender;

use tokio::runtime::Handle;

use crate::client::{ClientError, GenerationRequest, GeneratorClient, SourcePayload};
use crate::model::Mcq;

/// The outcome of one spawned generation request.
#[derive(Debug)]
pub struct GenerationReply {
    /// Token of the request this reply answers. The receiver ignores replies
    /// whose token is not the latest one issued.
    pub request_id: u64,
    pub outcome: Result<Vec<Mcq>, ClientError>,
}

/// Runs `request` on the runtime and delivers exactly one reply on `tx`.
///
/// A failed send means the receiver is gone and the app is shutting down;
/// the reply is dropped.
pub fn spawn_generation(
    handle: &Handle,
    client: GeneratorClient,
    request_id: u64,
    request: GenerationRequest,
    tx: Sender<GenerationReply>,
) {
    let kind = match &request.source {
        SourcePayload::File(_) => "file",
        SourcePayload::Text(_) => "text",
    };
    log::info!(
        "request {request_id} issued: {kind} source, quantity {}, difficulty {}",
        request.quantity,
        request.difficulty.wire_str()
    );
    handle.spawn(async move {
        let outcome = client.generate(&request).await;
        if let Err(err) = &outcome {
            log::warn!("generation request {request_id} failed: {err}");
        }
        let _ = tx.send(GenerationReply {
            request_id,
            outcome,
        });
    });
}
