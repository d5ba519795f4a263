mod fs;

pub use fs::{write_atomic, write_atomic_async, write_atomic_str};
