//! Task timing helper

use std::future::Future;
use std::time::Instant;

/// Await a future and report its wall-clock duration in milliseconds.
pub async fn timed<F>(future: F) -> (F::Output, f64)
where
    F: Future,
{
    let start = Instant::now();
    let output = future.await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    (output, elapsed_ms)
}
