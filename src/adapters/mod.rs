//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to                  |
//! |----------------|----------------|------------------------------|
//! | `file_store`   | SnapshotStore  | Status file in the data dir  |
//! | `memory_store` | SnapshotStore  | Process memory (simulation)  |
//! | `time`         | Clock          | `std::time::SystemTime`      |
//! | `log_sink`     | EventSink      | `log` facade                 |

pub mod file_store;
pub mod log_sink;
pub mod memory_store;
pub mod time;

pub use file_store::FileSnapshotStore;
pub use log_sink::LogEventSink;
pub use memory_store::MemorySnapshotStore;
pub use time::SystemClock;
