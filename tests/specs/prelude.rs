//! Shared helpers for coordinator specs

pub use philo_core::{
    ActorId, ActorState, CancelToken, Coordinator, CoordinatorConfig, CoordinatorError, Event,
    TableError, WakeMode,
};
pub use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
pub use std::sync::{Arc, Barrier};
pub use std::thread::{self, JoinHandle};
pub use std::time::{Duration, Instant};

const PATIENCE: Duration = Duration::from_secs(10);

/// Install a test subscriber once; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A shared coordinator with history enabled
pub fn table(actors: usize) -> Arc<Coordinator> {
    table_with(CoordinatorConfig::new(actors))
}

pub fn table_with(config: CoordinatorConfig) -> Arc<Coordinator> {
    init_tracing();
    Arc::new(Coordinator::from_config(config.with_history_capacity(4096)).unwrap())
}

/// Run `body` on its own thread with a handle to the coordinator
pub fn spawn<T, F>(coord: &Arc<Coordinator>, body: F) -> JoinHandle<T>
where
    T: Send + 'static,
    F: FnOnce(&Coordinator) -> T + Send + 'static,
{
    let coord = Arc::clone(coord);
    thread::spawn(move || body(&coord))
}

/// Poll until `check` passes; false if it never does
pub fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + PATIENCE;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    check()
}

/// Both wake modes, for specs that must hold under either
pub const WAKE_MODES: [WakeMode; 2] = [WakeMode::Shared, WakeMode::Split];
