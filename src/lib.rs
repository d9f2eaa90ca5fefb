//! Reflock: in-process try-locks for content references.
//!
//! A content store that runs several ingest or write sessions at once must
//! not let two of them work on the same blob digest together. Reflock keeps
//! a table of held `(root, ref)` keys; a second caller for a held key gets
//! an immediate [`RefLockError::Unavailable`](error::RefLockError::Unavailable)
//! telling it how long the key has been held, instead of blocking.
//!
//! ```
//! use reflock::locks::RefLockTable;
//!
//! let table = RefLockTable::new();
//! let guard = table.try_lock("store1", "sha256:abc")?;
//!
//! let busy = table.try_lock("store1", "sha256:abc").unwrap_err();
//! assert!(busy.is_unavailable());
//!
//! drop(guard);
//! table.try_acquire("store1", "sha256:abc")?;
//! table.release("store1", "sha256:abc");
//! # Ok::<(), reflock::error::RefLockError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
