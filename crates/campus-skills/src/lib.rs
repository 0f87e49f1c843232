//! Concrete bot commands: one [`QueryCommand`] per command name.

pub use campus_core::{CommandRegistry, QueryCommand};

mod attendance;
mod certificates;
mod fees;
mod hostel;
mod library;
mod lookup;
mod placements;
mod start;
mod verify;

pub use attendance::AttendanceQuery;
pub use certificates::CertificatesQuery;
pub use fees::FeesQuery;
pub use hostel::HostelQuery;
pub use library::LibraryQuery;
pub use placements::PlacementsQuery;
pub use start::Start;
pub use verify::VerifyCertificate;

use std::sync::Arc;

use campus_core::{LedgerIndex, RecordStore};

/// Registry with `/start` and all seven queries wired to the given stores.
pub fn default_registry(
    app_name: &str,
    store: Arc<RecordStore>,
    ledger: Arc<LedgerIndex>,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(Start::new(app_name)));
    registry.register(Arc::new(FeesQuery::new(Arc::clone(&store))));
    registry.register(Arc::new(AttendanceQuery::new(Arc::clone(&store))));
    registry.register(Arc::new(HostelQuery::new(Arc::clone(&store))));
    registry.register(Arc::new(LibraryQuery::new(Arc::clone(&store))));
    registry.register(Arc::new(PlacementsQuery::new(Arc::clone(&store))));
    registry.register(Arc::new(CertificatesQuery::new(store)));
    registry.register(Arc::new(VerifyCertificate::new(ledger)));
    tracing::debug!(
        target: "campus::dispatch",
        commands = registry.commands().len(),
        "Command registry assembled"
    );
    registry
}
