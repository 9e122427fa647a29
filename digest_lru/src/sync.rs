//! Lock-per-call LRU
//! 每次调用加锁的 LRU
//!
//! Every operation that reads or reorders the map / recency list takes the same lock,
//! including `get` (promotion mutates the list) and `len`.
//! 所有读取或重排映射表 / 最近使用链表的操作都持有同一把锁，
//! 包括 `get`（提升会修改链表）和 `len`。

use std::path::Path;

use parking_lot::{Mutex, MutexGuard};

use crate::{Key, Lru, NoOnRm, OnRm, Result, file};

/// Shared LRU, `&self` on every call
/// 可共享的 LRU，所有调用都是 `&self`
#[must_use]
pub struct SyncLru<V, F = NoOnRm>(Mutex<Lru<V, F>>);

impl<V> SyncLru<V> {
  #[inline]
  pub fn new(cap: usize) -> Self {
    Self(Mutex::new(Lru::new(cap)))
  }

  #[inline]
  pub fn with_on_rm<F>(cap: usize, on_rm: F) -> SyncLru<V, F> {
    SyncLru(Mutex::new(Lru::with_on_rm(cap, on_rm)))
  }
}

impl<V, F> From<Lru<V, F>> for SyncLru<V, F> {
  #[inline]
  fn from(lru: Lru<V, F>) -> Self {
    Self(Mutex::new(lru))
  }
}

impl<V, F: OnRm<V>> SyncLru<V, F> {
  #[inline]
  pub fn set(&self, key: Key, val: V) {
    self.0.lock().set(key, val);
  }

  /// Clone of value, promotes key
  /// 值的克隆，并提升键
  #[inline]
  pub fn get(&self, key: &Key) -> Option<V>
  where
    V: Clone,
  {
    self.0.lock().get(key).cloned()
  }

  /// Run `f` on value under lock, promotes key
  /// 在锁内对值执行 `f`，并提升键
  #[inline]
  pub fn get_with<R>(&self, key: &Key, f: impl FnOnce(&V) -> R) -> Option<R> {
    self.0.lock().get(key).map(f)
  }

  #[inline]
  pub fn contains(&self, key: &Key) -> bool {
    self.0.lock().contains(key)
  }

  #[inline]
  pub fn rm(&self, key: &Key) {
    self.0.lock().rm(key);
  }

  #[inline]
  pub fn rm_oldest(&self) {
    self.0.lock().rm_oldest();
  }

  #[inline]
  pub fn clear(&self) {
    self.0.lock().clear();
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.0.lock().len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.lock().is_empty()
  }

  #[inline]
  pub fn cap(&self) -> usize {
    self.0.lock().cap()
  }

  /// Copy of the key snapshot, taken under lock
  /// 在锁内获取的键快照副本
  #[inline]
  pub fn snapshot(&self) -> Vec<u8> {
    self.0.lock().snapshot().to_vec()
  }

  /// Snapshot under lock, write after release
  /// 锁内快照，释放锁后写入
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let bin = self.snapshot();
    file::save(path.as_ref(), &bin)
  }

  /// Read file without lock, insert all keys under one lock
  /// 无锁读取文件，在一次加锁内插入所有键
  pub fn load(&self, path: impl AsRef<Path>) -> Result<usize>
  where
    V: Default,
  {
    let cap = self.cap();
    let mut buf = Vec::new();
    file::read(path.as_ref(), file::limit(cap), &mut buf)?;
    let mut lru = self.0.lock();
    let mut n = 0;
    for key in file::keys(&buf) {
      lru.set(key, V::default());
      n += 1;
    }
    Ok(n)
  }

  /// Hold the lock across several calls
  /// 跨多次调用持有锁
  #[inline]
  pub fn lock(&self) -> MutexGuard<'_, Lru<V, F>> {
    self.0.lock()
  }

  #[inline]
  pub fn into_inner(self) -> Lru<V, F> {
    self.0.into_inner()
  }
}
