pub mod clock;
pub mod error;
pub mod file_storage;
pub mod storage;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StorageError;
pub use file_storage::JsonFileStorage;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::WatchlistStore;
pub use view::{CardAction, CardStatus, ImpressionFilter, ListTab};
