//! Simulated upload progress.
//!
//! The service reports nothing while a multipart upload is in flight, so
//! progress is estimated locally: it climbs by [`PROGRESS_STEP`] every
//! [`PROGRESS_TICK`] and holds at [`PROGRESS_CAP`] until the request ends.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant};

/// Interval between progress steps.
pub const PROGRESS_TICK: Duration = Duration::from_millis(200);

/// Percentage added per tick.
pub const PROGRESS_STEP: u8 = 10;

/// Highest value reported while the request is still in flight.
pub const PROGRESS_CAP: u8 = 90;

/// Drive `request` to completion while publishing progress on `progress`.
///
/// Ends at 100 on success and resets to 0 on failure.
pub async fn track<F, T, E>(progress: &watch::Sender<u8>, request: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    progress.send_replace(0);

    let mut ticker = interval_at(Instant::now() + PROGRESS_TICK, PROGRESS_TICK);
    tokio::pin!(request);

    let result = loop {
        tokio::select! {
            result = &mut request => break result,
            _ = ticker.tick() => {
                progress.send_modify(|p| *p = p.saturating_add(PROGRESS_STEP).min(PROGRESS_CAP));
            }
        }
    };

    progress.send_replace(if result.is_ok() { 100 } else { 0 });
    result
}
