//! Tokio driver for the engine.
//!
//! The engine lives behind one mutex. The driver task and every handle call
//! take that lock for a single engine operation, so each intake, expiry, or
//! drain turn runs to completion before the next one starts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use pacer_core::errors::{PacerError, PacerResult};
use pacer_core::traits::IEffectApplier;
use pacer_core::{PacerConfig, Payload};
use pacer_engine::{EngineSnapshot, PacerEngine};
use pacer_observability::tracing_setup::events;

use crate::clock::TokioClock;

/// Entry point for running an engine on the current tokio runtime.
pub struct PacerRuntime;

impl PacerRuntime {
    /// Spawn the driver task for `engine`.
    ///
    /// Must be called from inside a tokio runtime. The engine's clock should
    /// track tokio time (see [`TokioClock`]) for deadlines to line up.
    pub fn spawn(engine: PacerEngine) -> PacerHandle {
        let draining = engine.draining_flag();
        let engine = Arc::new(Mutex::new(engine));
        let wake = Arc::new(Notify::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(drive(Arc::clone(&engine), Arc::clone(&wake), shutdown_rx));

        PacerHandle {
            engine,
            wake,
            draining,
            shutdown_tx: Arc::new(shutdown_tx),
            task: Arc::new(Mutex::new(Some(task))),
        }
    }

    /// Build an engine on a [`TokioClock`] with the registry resolver and spawn it.
    pub fn start(
        config: PacerConfig,
        applier: impl IEffectApplier + 'static,
    ) -> PacerResult<PacerHandle> {
        let engine = PacerEngine::builder(config)
            .clock(Arc::new(TokioClock::new()))
            .build(applier)?;
        Ok(Self::spawn(engine))
    }
}

/// Fire due timers, then sleep until the next deadline, a wake-up, or shutdown.
async fn drive(
    engine: Arc<Mutex<PacerEngine>>,
    wake: Arc<Notify>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut started = false;
    loop {
        let wait = match engine.lock() {
            Ok(mut engine) => {
                engine.advance();
                if !started {
                    events::driver_started(engine.next_deadline().map(|d| d.as_millis()));
                    started = true;
                }
                engine
                    .next_deadline()
                    .map(|deadline| deadline.saturating_since(engine.now()))
            }
            Err(_) => {
                events::driver_stopped("engine lock poisoned");
                return;
            }
        };

        tokio::select! {
            _ = sleep_for(wait) => {}
            _ = wake.notified() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    // Revert whatever is still active before exiting.
    if let Ok(mut engine) = engine.lock() {
        engine.reset();
    }
    events::driver_stopped("shutdown");
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

/// Cloneable host-side handle to a running engine.
#[derive(Clone)]
pub struct PacerHandle {
    engine: Arc<Mutex<PacerEngine>>,
    wake: Arc<Notify>,
    draining: Arc<AtomicBool>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl PacerHandle {
    fn lock(&self) -> PacerResult<MutexGuard<'_, PacerEngine>> {
        self.engine.lock().map_err(|e| PacerError::LockPoisoned {
            reason: e.to_string(),
        })
    }

    fn ensure_running(&self) -> PacerResult<()> {
        if *self.shutdown_tx.borrow() {
            return Err(PacerError::RuntimeStopped {
                reason: "shutdown requested".to_string(),
            });
        }
        Ok(())
    }

    /// Offer a signal. `Ok(false)` means the intake gate dropped it.
    pub fn submit(&self, signal_type: &str, payload: Payload) -> PacerResult<bool> {
        self.ensure_running()?;
        let accepted = self.lock()?.submit(signal_type, payload);
        if accepted {
            self.wake.notify_one();
        }
        Ok(accepted)
    }

    pub fn is_throttled(&self, signal_type: &str) -> PacerResult<bool> {
        Ok(self.lock()?.is_throttled(signal_type))
    }

    pub fn snapshot(&self) -> PacerResult<EngineSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    pub fn reset(&self) -> PacerResult<()> {
        self.lock()?.reset();
        self.wake.notify_one();
        Ok(())
    }

    /// Revert the active action now. `Ok(false)` if nothing was active.
    pub fn clear_active(&self) -> PacerResult<bool> {
        let cleared = self.lock()?.clear_active();
        if cleared {
            self.wake.notify_one();
        }
        Ok(cleared)
    }

    /// Lock-free: reads the engine's drain guard directly.
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }

    /// Stop the driver, revert the active action, and wait for the task.
    ///
    /// Later calls on any clone return `RuntimeStopped`. Calling `shutdown`
    /// twice is fine.
    pub async fn shutdown(&self) -> PacerResult<()> {
        self.shutdown_tx.send_replace(true);
        let task = self
            .task
            .lock()
            .map_err(|e| PacerError::LockPoisoned {
                reason: e.to_string(),
            })?
            .take();
        if let Some(task) = task {
            task.await.map_err(|e| PacerError::RuntimeStopped {
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PacerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacerHandle")
            .field("is_draining", &self.is_draining())
            .field("stopped", &*self.shutdown_tx.borrow())
            .finish()
    }
}
