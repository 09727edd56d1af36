//! Recording doubles for the external collaborators: the transaction
//! manager, the directory service and the extension-discovery facility.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use ambient_tx::{
    Directory, DirectoryContext, ExtensionDiscovery, ManagerError, NamingError, Result,
    TransactionLookup, TxStatus, UserTransaction,
};

// ============================================================================
// Transaction manager
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Status,
    Begin,
    Commit,
    Rollback,
    SetRollbackOnly,
}

/// Manager double that simulates status transitions and records every call.
pub struct MockManager {
    status: Mutex<TxStatus>,
    failing: Mutex<HashSet<Call>>,
    calls: Mutex<Vec<Call>>,
}

impl MockManager {
    pub fn new(status: TxStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Make every future `call` fail.
    pub fn fail_on(&self, call: Call) {
        self.failing.lock().insert(call);
    }

    pub fn current_status(&self) -> TxStatus {
        *self.status.lock()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) -> std::result::Result<(), ManagerError> {
        self.calls.lock().push(call);
        if self.failing.lock().contains(&call) {
            return Err(ManagerError::System(format!("{call:?} failed")));
        }
        Ok(())
    }
}

impl UserTransaction for MockManager {
    fn status(&self) -> std::result::Result<TxStatus, ManagerError> {
        self.record(Call::Status)?;
        Ok(self.current_status())
    }

    fn begin(&self) -> std::result::Result<(), ManagerError> {
        self.record(Call::Begin)?;
        *self.status.lock() = TxStatus::Active;
        Ok(())
    }

    fn commit(&self) -> std::result::Result<(), ManagerError> {
        self.record(Call::Commit)?;
        *self.status.lock() = TxStatus::NoTransaction;
        Ok(())
    }

    fn rollback(&self) -> std::result::Result<(), ManagerError> {
        self.record(Call::Rollback)?;
        *self.status.lock() = TxStatus::NoTransaction;
        Ok(())
    }

    fn set_rollback_only(&self) -> std::result::Result<(), ManagerError> {
        self.record(Call::SetRollbackOnly)?;
        *self.status.lock() = TxStatus::MarkedRollback;
        Ok(())
    }
}

// ============================================================================
// Directory service
// ============================================================================

#[derive(Default)]
pub struct DirectoryStats {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

/// Directory double binding names to managers.
#[derive(Default)]
pub struct MockDirectory {
    bindings: HashMap<String, Arc<MockManager>>,
    pub stats: Arc<DirectoryStats>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, name: &str, manager: Arc<MockManager>) -> Self {
        self.bindings.insert(name.to_string(), manager);
        self
    }
}

impl Directory for MockDirectory {
    fn open(&self) -> std::result::Result<Box<dyn DirectoryContext>, NamingError> {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockContext {
            bindings: self.bindings.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct MockContext {
    bindings: HashMap<String, Arc<MockManager>>,
    stats: Arc<DirectoryStats>,
}

impl DirectoryContext for MockContext {
    fn lookup(&self, name: &str) -> std::result::Result<Arc<dyn UserTransaction>, NamingError> {
        match self.bindings.get(name) {
            Some(manager) => Ok(manager.clone()),
            None => Err(NamingError::NameNotFound(name.to_string())),
        }
    }

    fn close(&mut self) -> std::result::Result<(), NamingError> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Extension discovery
// ============================================================================

/// Lookup extension handing out a fixed manager.
pub struct StaticLookup(pub Arc<MockManager>);

impl TransactionLookup for StaticLookup {
    fn lookup(&self) -> Result<Arc<dyn UserTransaction>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> &str {
        "static"
    }
}

/// Discovery double counting how often it is consulted. Each discovery
/// takes a little while so racing callers overlap.
#[derive(Default)]
pub struct CountingDiscovery {
    extensions: Vec<Arc<dyn TransactionLookup>>,
    pub discoveries: AtomicUsize,
}

impl CountingDiscovery {
    pub fn new(extensions: Vec<Arc<dyn TransactionLookup>>) -> Self {
        Self { extensions, discoveries: AtomicUsize::new(0) }
    }

    pub fn count(&self) -> usize {
        self.discoveries.load(Ordering::SeqCst)
    }
}

impl ExtensionDiscovery for CountingDiscovery {
    fn discover(&self) -> Vec<Arc<dyn TransactionLookup>> {
        self.discoveries.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        self.extensions.clone()
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// Tracing layer collecting `"[LEVEL] message"` lines.
pub struct LogCapture {
    pub logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        struct MessageVisitor {
            message: String,
        }

        impl tracing::field::Visit for MessageVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = format!("{value:?}");
                }
            }
        }

        let mut visitor = MessageVisitor { message: String::new() };
        event.record(&mut visitor);
        self.logs
            .lock()
            .push(format!("[{}] {}", event.metadata().level(), visitor.message));
    }
}

/// Run `f` with a capturing subscriber installed on this thread and return
/// what was logged.
pub fn capture_logs(f: impl FnOnce()) -> Vec<String> {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let logs = Arc::new(Mutex::new(Vec::new()));
    let capture = LogCapture { logs: Arc::clone(&logs) };
    {
        let _guard = tracing_subscriber::registry().with(capture).set_default();
        f();
    }
    let captured = logs.lock().clone();
    captured
}

pub fn warnings(logs: &[String]) -> Vec<&String> {
    logs.iter().filter(|l| l.starts_with("[WARN]")).collect()
}
