//! Background gradient computation.
//!
//! [`compute_gradients_async`] moves a density volume into a dedicated worker
//! thread and returns a [`GradientTask`] handle. The worker shares nothing
//! mutable with the caller: the volume goes in by value and the finished
//! [`GradientField`] comes back over a channel, at most once.
//!
//! The handle can be polled once per frame ([`GradientTask::try_take`]),
//! blocked on ([`GradientTask::wait`]) or awaited as a [`Future`]. Dropping
//! it early is fine: the worker still finishes and its result is discarded.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, Waker};
use std::thread;

use cumulus_core::{CumulusError, Result};

use crate::density::DensityVolume;
use crate::gradient::{compute_gradients, GradientField};

const WORKER_NAME: &str = "cumulus-gradient";

/// Completion flag and the waker of whoever awaits the task.
#[derive(Default)]
struct Signal {
    done: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl Signal {
    fn register(&self, waker: &Waker) {
        *self.waker.lock().unwrap_or_else(PoisonError::into_inner) = Some(waker.clone());
    }

    fn finish(&self) {
        self.done.store(true, Ordering::Release);
        let waker = self
            .waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Sending half owned by the worker.
///
/// Dropping it closes the channel before signalling, so a worker that
/// unwinds without sending shows up as a disconnected channel.
struct Courier {
    tx: Option<Sender<GradientField>>,
    signal: Arc<Signal>,
}

impl Courier {
    fn deliver(self, field: GradientField) {
        if let Some(tx) = &self.tx {
            // The receiver may be gone; the result is simply discarded.
            let _ = tx.send(field);
        }
    }
}

impl Drop for Courier {
    fn drop(&mut self) {
        drop(self.tx.take());
        self.signal.finish();
    }
}

/// Handle to a gradient computation running on a worker thread.
pub struct GradientTask {
    rx: Receiver<GradientField>,
    signal: Arc<Signal>,
    consumed: bool,
}

impl std::fmt::Debug for GradientTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientTask")
            .field("pending", &self.is_pending())
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

fn channel() -> (Courier, GradientTask) {
    let (tx, rx) = mpsc::channel();
    let signal = Arc::new(Signal::default());
    let courier = Courier {
        tx: Some(tx),
        signal: Arc::clone(&signal),
    };
    let task = GradientTask {
        rx,
        signal,
        consumed: false,
    };
    (courier, task)
}

/// Starts computing the gradients of `volume` on a worker thread.
pub fn compute_gradients_async(volume: DensityVolume) -> GradientTask {
    let (courier, task) = channel();

    let dims = volume.dims();
    let spawned = thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .spawn(move || {
            let field = compute_gradients(&volume);
            courier.deliver(field);
        });

    match spawned {
        Ok(_) => log::debug!(
            "gradient worker started for {}x{}x{} volume",
            dims.x,
            dims.y,
            dims.z
        ),
        // The failed spawn dropped the closure and its courier, which closed
        // the channel.
        Err(e) => log::warn!("failed to spawn gradient worker: {e}"),
    }

    task
}

impl GradientTask {
    /// Whether the worker has not finished yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.consumed && !self.signal.done.load(Ordering::Acquire)
    }

    /// Whether the result was already handed out.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Takes the field if the worker is done, without blocking.
    ///
    /// Returns `Some` at most once. A worker failure is logged and yields
    /// `None`; the caller keeps rendering without gradients.
    pub fn try_take(&mut self) -> Option<GradientField> {
        if self.consumed {
            return None;
        }
        match self.rx.try_recv() {
            Ok(field) => {
                self.consumed = true;
                Some(field)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.consumed = true;
                log::warn!("{}; continuing without gradient shading", worker_gone());
                None
            }
        }
    }

    /// Blocks until the worker posts its result.
    pub fn wait(mut self) -> Result<GradientField> {
        if self.consumed {
            return Err(already_consumed());
        }
        self.consumed = true;
        self.rx.recv().map_err(|_| worker_gone())
    }
}

impl Future for GradientTask {
    type Output = Result<GradientField>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.consumed {
            return Poll::Ready(Err(already_consumed()));
        }
        // Register before looking so a delivery in between still wakes us.
        self.signal.register(cx.waker());
        match self.rx.try_recv() {
            Ok(field) => {
                self.consumed = true;
                Poll::Ready(Ok(field))
            }
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => {
                self.consumed = true;
                Poll::Ready(Err(worker_gone()))
            }
        }
    }
}

fn worker_gone() -> CumulusError {
    CumulusError::WorkerDeliveryFailure("gradient worker exited without a result".to_string())
}

fn already_consumed() -> CumulusError {
    CumulusError::WorkerDeliveryFailure("gradient result already taken".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec3;
    use std::time::{Duration, Instant};

    fn poll_until_ready(task: &mut GradientTask) -> Option<GradientField> {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Some(field) = task.try_take() {
                return Some(field);
            }
            thread::sleep(Duration::from_millis(1));
        }
        None
    }

    #[test]
    fn test_wait_matches_sync() {
        let volume = crate::generator::generate(12, 10, 8, 0.2, crate::FalloffShape::Sphere)
            .unwrap();
        let expected = compute_gradients(&volume);
        let field = compute_gradients_async(volume).wait().unwrap();
        assert_eq!(field, expected);
    }

    #[test]
    fn test_try_take_delivers_once() {
        let volume = DensityVolume::filled(UVec3::splat(6), 10).unwrap();
        let mut task = compute_gradients_async(volume);
        let field = poll_until_ready(&mut task).expect("worker never delivered");
        assert_eq!(field.len(), 3 * 6 * 6 * 6);
        assert!(task.is_consumed());
        assert!(!task.is_pending());
        assert!(task.try_take().is_none());
    }

    #[test]
    fn test_future_resolves() {
        let volume = DensityVolume::filled(UVec3::splat(4), 200).unwrap();
        let field = pollster::block_on(compute_gradients_async(volume)).unwrap();
        assert_eq!(field.dims(), UVec3::splat(4));
    }

    #[test]
    fn test_dropped_task_is_harmless() {
        let volume = DensityVolume::filled(UVec3::splat(8), 1).unwrap();
        drop(compute_gradients_async(volume));
    }

    #[test]
    fn test_dropped_courier_reports_failure() {
        let (courier, task) = channel();
        assert!(task.is_pending());
        drop(courier);
        assert!(!task.is_pending());
        assert!(matches!(
            task.wait(),
            Err(CumulusError::WorkerDeliveryFailure(_))
        ));
    }

    #[test]
    fn test_failure_yields_none_from_try_take() {
        let (courier, mut task) = channel();
        assert!(task.try_take().is_none());
        assert!(!task.is_consumed());
        drop(courier);
        assert!(task.try_take().is_none());
        assert!(task.is_consumed());
    }

    #[test]
    fn test_future_reports_failure() {
        let (courier, task) = channel();
        let worker = thread::spawn(move || drop(courier));
        assert!(matches!(
            pollster::block_on(task),
            Err(CumulusError::WorkerDeliveryFailure(_))
        ));
        worker.join().unwrap();
    }
}
