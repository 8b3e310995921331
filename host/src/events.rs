use tokio::sync::mpsc;

/// Something the outside world asks a running session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Call the guest's entry export.
    Invoke,
    /// Call the guest's `add_numbers` export.
    Add(i32, i32),
    /// Increment the guest-side counter and show its status.
    Increment,
}

/// Create a channel between request sources and a session.
pub fn channel(capacity: usize) -> (Trigger, Requests) {
    let (tx, rx) = mpsc::channel(capacity);
    (Trigger { tx }, Requests { rx })
}

/// The sending half. Cheap to clone; hand one to every request source (a key
/// press handler, a timer, ...). The session stops once all of them dropped.
#[derive(Debug, Clone)]
pub struct Trigger {
    tx: mpsc::Sender<Request>,
}

impl Trigger {
    /// Send a request. Returns `false` if the session is gone.
    pub async fn send(&self, request: Request) -> bool {
        self.tx.send(request).await.is_ok()
    }

    pub async fn request_invoke(&self) -> bool {
        self.send(Request::Invoke).await
    }
}

/// The receiving half, consumed by [`Session::run`](crate::Session::run).
#[derive(Debug)]
pub struct Requests {
    rx: mpsc::Receiver<Request>,
}

impl Requests {
    pub async fn next(&mut self) -> Option<Request> {
        self.rx.recv().await
    }

    /// Take a request that is already queued, without waiting.
    pub fn try_next(&mut self) -> Option<Request> {
        self.rx.try_recv().ok()
    }
}
