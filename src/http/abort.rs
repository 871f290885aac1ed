// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Abort controller and signal
//!
//! One controller per request. Aborting flips a watch channel that the
//! transport races against the in-flight call.

use std::sync::Arc;

use tokio::sync::watch;

/// Owner side: call [`AbortController::abort`] to cancel
#[derive(Debug, Clone)]
pub struct AbortController {
    sender: Arc<watch::Sender<bool>>,
    signal: AbortSignal,
}

/// Observer side, carried in the request config
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: watch::Receiver<bool>,
}

impl AbortController {
    /// Create a new, not yet aborted controller
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            signal: AbortSignal { receiver },
        }
    }

    /// Signal to attach to a request
    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// Abort every call carrying this controller's signal
    pub fn abort(&self) {
        self.sender.send_replace(true);
    }

    /// Check if abort was requested
    pub fn is_aborted(&self) -> bool {
        self.signal.is_aborted()
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortSignal {
    /// Check if abort was requested
    pub fn is_aborted(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once abort is requested.
    ///
    /// Never resolves if the controller is dropped without aborting.
    pub async fn aborted(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                futures::future::pending::<()>().await;
            }
        }
    }
}
