pub mod diagnostics;
pub mod metrics;
pub mod mock;
pub mod mongo;
pub mod schema;
pub mod store;
pub mod writer;

pub use diagnostics::{collect_snapshot, ConfigPresence, DiagnosticSnapshot};
pub use metrics::{get_metrics, init_metrics, record_submission};
pub use mock::MockStore;
pub use mongo::MongoStore;
pub use schema::{validate_payload, FieldSpec, Schema};
pub use store::{DocumentStore, PersistenceError, StoreStatus};
pub use writer::DocumentWriter;
