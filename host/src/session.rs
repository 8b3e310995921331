use {
    crate::{
        Bridge, ContextHandle, GuestValue, Loader, Phase, Presenter, Readiness, Request,
        Requests, Status, VmResult,
    },
    tokio::sync::watch,
    tracing::{debug, error, info, warn},
};

/// Coordinates the loader, the bridge and the presenter.
///
/// The session owns the readiness state and is its only writer. It processes
/// one operation at a time, so nothing here needs a lock.
pub struct Session<P> {
    loader: Option<Loader>,
    readiness: Readiness,
    context: Option<ContextHandle>,
    phase: watch::Sender<Phase>,
    presenter: P,
}

impl<P> Session<P>
where
    P: Presenter,
{
    pub fn new(loader: Loader, presenter: P) -> Self {
        Self {
            loader: Some(loader),
            readiness: Readiness::NotReady,
            context: None,
            phase: watch::Sender::new(Phase::NotReady),
            presenter,
        }
    }

    /// Observe the lifecycle phase. Receivers may be created at any time and
    /// see the current phase immediately.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Load the guest module. Runs at most once: later calls are ignored.
    ///
    /// On success the session becomes ready, the presenter is told so, and the
    /// entry export is invoked once. On failure the error is logged and shown;
    /// it is not returned, and the session stays not ready for good.
    pub async fn initialize(&mut self) {
        let Some(loader) = self.loader.take() else {
            warn!("guest module initialization already ran; ignoring");
            return;
        };

        info!("initializing guest module");

        match loader.initialize().await {
            Ok(bridge) => {
                self.readiness = Readiness::Ready(bridge);
                self.phase.send_replace(Phase::Ready);

                info!("guest module ready");

                self.presenter.show_status(&Status::Loaded);
                self.invoke();
            },
            Err(err) => {
                self.phase.send_replace(Phase::Failed);

                error!(%err, "failed to initialize guest module");

                self.presenter.show_status(&Status::Failed(err.to_string()));
            },
        }
    }

    /// Call the guest's entry export and forward the result to the presenter.
    ///
    /// Before the session is ready this does nothing besides logging a
    /// warning, and returns `None`.
    pub fn invoke(&mut self) -> Option<GuestValue> {
        let result = self.bridge_or_warn("invoke")?.invoke();
        self.forward("invoke", result)
    }

    /// Call the guest's `add_numbers` export. Guarded like [`invoke`](Self::invoke).
    pub fn add_numbers(&mut self, a: i32, b: i32) -> Option<GuestValue> {
        let result = self.bridge_or_warn("add_numbers")?.add_numbers(a, b);
        self.forward("add_numbers", result)
    }

    /// Increment the guest-side counter, creating it on first use, and forward
    /// its status. Guarded like [`invoke`](Self::invoke).
    pub fn increment(&mut self) -> Option<GuestValue> {
        let Readiness::Ready(bridge) = &mut self.readiness else {
            warn!(op = "increment", "guest module is not ready; dropping call");
            return None;
        };

        let result = increment_context(bridge, &mut self.context);
        self.forward("increment", result)
    }

    /// Initialize, then serve requests one at a time until every
    /// [`Trigger`](crate::Trigger) has been dropped. Returns the session so
    /// the caller can inspect it afterwards.
    ///
    /// Requests sent before the session became ready are dropped, the same as
    /// a direct call to [`invoke`](Self::invoke) would be. Only the automatic
    /// invocation follows a successful load.
    pub async fn run(mut self, mut requests: Requests) -> Self {
        {
            let init = self.initialize();
            tokio::pin!(init);

            loop {
                tokio::select! {
                    biased;
                    () = &mut init => break,
                    Some(request) = requests.next() => drop_early(request),
                }
            }
        }

        while let Some(request) = requests.try_next() {
            drop_early(request);
        }

        while let Some(request) = requests.next().await {
            debug!(?request, "request received");

            match request {
                Request::Invoke => {
                    self.invoke();
                },
                Request::Add(a, b) => {
                    self.add_numbers(a, b);
                },
                Request::Increment => {
                    self.increment();
                },
            }
        }

        info!("all triggers dropped; session finished");

        self
    }

    fn bridge_or_warn(&mut self, op: &'static str) -> Option<&mut Bridge> {
        let bridge = self.readiness.bridge_mut();
        if bridge.is_none() {
            warn!(op, "guest module is not ready; dropping call");
        }
        bridge
    }

    fn forward(&mut self, op: &'static str, result: VmResult<GuestValue>) -> Option<GuestValue> {
        match result {
            Ok(value) => {
                debug!(op, %value, "guest call returned");

                self.presenter.show_result(&value);

                Some(value)
            },
            Err(err) => {
                error!(op, %err, "guest call failed");

                self.presenter.show_status(&Status::CallFailed(err.to_string()));

                None
            },
        }
    }
}

impl<P> Drop for Session<P> {
    fn drop(&mut self) {
        if let (Some(handle), Some(bridge)) = (self.context.take(), self.readiness.bridge_mut()) {
            if let Err(err) = bridge.free_context(handle) {
                warn!(%err, "failed to free guest context");
            }
        }
    }
}

fn drop_early(request: Request) {
    warn!(?request, "guest module is not ready; dropping request");
}

fn increment_context(
    bridge: &mut Bridge,
    context: &mut Option<ContextHandle>,
) -> VmResult<GuestValue> {
    let handle = match *context {
        Some(handle) => handle,
        None => {
            let handle = bridge.new_context()?;
            *context = Some(handle);
            handle
        },
    };

    bridge.increment(handle)?;
    bridge.context_status(handle)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            GuestSource, LoaderConfig,
            testing::{HELLO_WAT, RecordingPresenter},
        },
    };

    fn session() -> Session<RecordingPresenter> {
        let config = LoaderConfig::new(GuestSource::Bytes(HELLO_WAT.as_bytes().to_vec()));
        Session::new(Loader::new(config), RecordingPresenter::default())
    }

    #[test]
    fn not_ready_calls_are_dropped() {
        let mut session = session();

        assert_eq!(session.invoke(), None);
        assert_eq!(session.add_numbers(1, 2), None);
        assert_eq!(session.increment(), None);

        assert!(session.presenter().statuses.is_empty());
        assert!(session.presenter().results.is_empty());
        assert_eq!(session.phase(), Phase::NotReady);
    }

    #[tokio::test]
    async fn second_initialize_is_ignored() {
        let mut session = session();

        session.initialize().await;
        session.initialize().await;

        assert_eq!(session.presenter().statuses, [Status::Loaded]);
        assert_eq!(session.presenter().results.len(), 1);
    }

    #[tokio::test]
    async fn counter_is_created_once() {
        let mut session = session();
        session.initialize().await;

        for count in 1..=2 {
            assert_eq!(
                session.increment(),
                Some(GuestValue::Text(format!(
                    "message: context initialized, count: {count}"
                )))
            );
        }
        assert!(session.context.is_some());
    }
}
