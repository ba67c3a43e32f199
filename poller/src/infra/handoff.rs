//! Zero-capacity handoff between a poller and its update consumer.
//!
//! `HandoffSender::offer` resolves only once the receiver has taken the
//! update. Each offer carries a oneshot acknowledgement; the receiver
//! completes it at the moment it hands the update out, and drops offers
//! whose sender has already given up. A withdrawn offer is therefore never
//! delivered late.

use tokio::sync::{mpsc, oneshot};

use crate::application::ports::UpdateSink;
use crate::domain::{ProgressUpdate, SinkClosedError};

#[derive(Debug)]
struct Offer {
    update: ProgressUpdate,
    accepted: oneshot::Sender<()>,
}

/// Create a connected sender/receiver pair.
#[must_use]
pub fn channel() -> (HandoffSender, UpdateReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (HandoffSender { tx }, UpdateReceiver { rx })
}

/// Producing half; implements [`UpdateSink`].
#[derive(Debug, Clone)]
pub struct HandoffSender {
    tx: mpsc::Sender<Offer>,
}

impl UpdateSink for HandoffSender {
    async fn offer(&self, update: ProgressUpdate) -> Result<(), SinkClosedError> {
        let (accepted, acknowledged) = oneshot::channel();
        self.tx
            .send(Offer { update, accepted })
            .await
            .map_err(|_| SinkClosedError)?;
        acknowledged.await.map_err(|_| SinkClosedError)
    }
}

/// Consuming half.
#[derive(Debug)]
pub struct UpdateReceiver {
    rx: mpsc::Receiver<Offer>,
}

impl UpdateReceiver {
    /// Wait for the next update. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<ProgressUpdate> {
        while let Some(offer) = self.rx.recv().await {
            if let Some(update) = offer.accept() {
                return Some(update);
            }
        }
        None
    }

    /// Take an update only if one is on offer right now.
    pub fn try_recv(&mut self) -> Option<ProgressUpdate> {
        while let Ok(offer) = self.rx.try_recv() {
            if let Some(update) = offer.accept() {
                return Some(update);
            }
        }
        None
    }
}

impl Offer {
    /// Complete the handoff; `None` if the offer was withdrawn.
    fn accept(self) -> Option<ProgressUpdate> {
        self.accepted.send(()).ok().map(|()| self.update)
    }
}
