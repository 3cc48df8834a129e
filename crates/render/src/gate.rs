use tokio::sync::oneshot::{self, error::TryRecvError};

/// Whether draws are permitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Ready,
}

/// One-shot `Loading -> Ready` gate over an asynchronously produced resource.
///
/// The gate flips at most once, when the pending receiver yields a value,
/// and never reverts. If the producer drops its sender without sending, the
/// gate stays `Loading` forever; there is no retry and no timeout.
#[derive(Debug)]
pub struct ResourceGate<T> {
    state: GateState,
    pending: Option<oneshot::Receiver<T>>,
    resource: Option<T>,
}

impl<T> ResourceGate<T> {
    pub fn new(pending: oneshot::Receiver<T>) -> Self {
        Self {
            state: GateState::Loading,
            pending: Some(pending),
            resource: None,
        }
    }

    /// A gate that is already open.
    pub fn ready(resource: T) -> Self {
        Self {
            state: GateState::Ready,
            pending: None,
            resource: Some(resource),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Non-blocking check for completion. Returns the state after polling.
    pub fn poll(&mut self) -> GateState {
        if self.state == GateState::Ready {
            return self.state;
        }
        let Some(pending) = self.pending.as_mut() else {
            return self.state;
        };
        match pending.try_recv() {
            Ok(resource) => {
                tracing::info!("resource gate ready");
                self.resource = Some(resource);
                self.pending = None;
                self.state = GateState::Ready;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                // producer gave up; nothing will ever arrive
                self.pending = None;
            }
        }
        self.state
    }

    /// True when the gate is `Loading` and can no longer complete.
    pub fn is_stalled(&self) -> bool {
        self.state == GateState::Loading && self.pending.is_none()
    }

    pub fn resource(&self) -> Option<&T> {
        self.resource.as_ref()
    }

    /// Move the resource out. The gate stays `Ready`.
    pub fn take_resource(&mut self) -> Option<T> {
        self.resource.take()
    }
}
