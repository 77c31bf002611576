pub mod autosave;
pub mod clock;
pub mod consistency;
pub mod error;
pub mod ports;
pub mod storage;
pub mod workspace;


// Re-export the session surface (explicit list per module)
pub use autosave::{AutosavePolicy, AutosaveState, SaveStatus};
pub use clock::SystemClock;
pub use consistency::{CheckerStats, StateConsistencyChecker, DEFAULT_REPAIR_THRESHOLD};
pub use error::{SessionError, StorageError};
pub use ports::{ClockPort, StoragePort};
pub use storage::{FileStorage, MemoryStorage, SafeStore};
pub use workspace::{SheetTab, SheetWorkspace, TabId, DEFAULT_STORAGE_KEY};
