use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a running poll loop. Cancelling (or dropping) the handle stops
/// future ticks; a fetch already spawned by an earlier tick runs to completion.
pub struct PollHandle {
    handle: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        debug!("Cancelling poller");
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs `task` immediately and then once per `period` until cancelled.
///
/// Each tick spawns its own task, so a fetch slower than `period` overlaps
/// with the next one. There is no guard against that: whichever finishes last
/// wins.
pub fn spawn_poller<F, Fut>(period: Duration, mut task: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            debug!(period_secs = period.as_secs_f64(), "Poll tick");
            tokio::spawn(task());
        }
    });
    PollHandle { handle }
}
