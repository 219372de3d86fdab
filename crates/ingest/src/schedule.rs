use slog::{info, Logger};
use std::{future::Future, time::Duration};
use tokio::time::{interval, MissedTickBehavior};

/// Calls `run` every `every` until `shutdown` resolves.
///
/// Runs are serialized: the next tick is not taken until the current run returns.
/// A shutdown that arrives mid-run abandons that run.
pub async fn run_on_interval<F, Fut, S>(every: Duration, shutdown: S, logger: &Logger, mut run: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => break,
        }
        tokio::select! {
            _ = run() => {}
            _ = &mut shutdown => break,
        }
    }
    info!(logger, "shutdown requested, stopping");
}
