//! LRU cache keyed by 16-byte digests, with flat-file key snapshot
//! 以 16 字节摘要为键的 LRU 缓存，支持平面文件键快照
//!
//! - [`Lru`]: single owner, synchronized by `&mut self`
//! - [`SyncLru`]: lock-per-call, shareable across threads
//!
//! Only keys are persisted. Loading inserts each key with `V::default()`.
//! 仅持久化键。加载时每个键以 `V::default()` 插入。
//!
//! ```
//! use digest_lru::{Key, Lru};
//!
//! let mut cache: Lru<u32> = Lru::new(2);
//! cache.set(Key([1; 16]), 1);
//! cache.set(Key([2; 16]), 2);
//! cache.get(&Key([1; 16]));
//! cache.set(Key([3; 16]), 3);
//! assert!(!cache.contains(&Key([2; 16])));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod file;
mod key;
mod lru;
mod on_rm;
mod sync;

pub use error::{Error, Result};
pub use key::{KEY_LEN, Key};
pub use lru::{Iter, Lru};
pub use on_rm::{NoOnRm, OnRm};
pub use sync::SyncLru;
