// Adapters layer: concrete implementations of the domain ports.

pub mod random;
pub mod storage;

pub use random::OsSecretSource;
pub use storage::LocalStorage;
