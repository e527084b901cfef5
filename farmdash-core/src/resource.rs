//! A value obtained from a remote endpoint, together with its load state.

/// Where a [`RemoteResource`] is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Never requested; the owning unit has not mounted yet.
    #[default]
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Remote value plus load state.
///
/// Every transition goes through one of [`begin`](Self::begin),
/// [`resolve`](Self::resolve) or [`fail`](Self::fail), so `data` is present
/// exactly when the state is `Ready` and `error` exactly when it is `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource<T> {
    data: Option<T>,
    state: LoadState,
    error: Option<String>,
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self {
            data: None,
            state: LoadState::Idle,
            error: None,
        }
    }
}

impl<T> RemoteResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to pending, dropping any previous value or error.
    pub fn begin(&mut self) {
        self.data = None;
        self.error = None;
        self.state = LoadState::Pending;
    }

    pub fn resolve(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.state = LoadState::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.data = None;
        self.error = Some(message.into());
        self.state = LoadState::Failed;
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.state == LoadState::Pending
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }
}
