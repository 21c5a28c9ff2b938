pub mod atomic_json;
pub mod file_storage;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use file_storage::FileStorage;
