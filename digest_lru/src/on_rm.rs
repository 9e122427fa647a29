//! Eviction callback
//! 淘汰回调

use crate::Key;

/// Callback on entry removal/eviction
///
/// Invoked once per removed entry, after it has been unlinked, for every removal path:
/// `rm`, `rm_oldest`, capacity eviction and `clear`.
/// Receives the owned value, the cache is not reachable from inside the callback.
///
/// 条目删除/淘汰时的回调
///
/// 每个被删除的条目调用一次（已从链表摘除后），覆盖所有删除路径：
/// `rm`、`rm_oldest`、容量淘汰以及 `clear`。
/// 回调拿到值的所有权，回调内无法访问缓存。
pub trait OnRm<V> {
  fn call(&mut self, key: Key, val: V);
}

/// No-op callback (zero overhead)
/// 空回调（零开销）
#[derive(Clone, Copy, Default)]
pub struct NoOnRm;

impl<V> OnRm<V> for NoOnRm {
  #[inline(always)]
  fn call(&mut self, _: Key, _: V) {}
}

impl<V, F: FnMut(Key, V)> OnRm<V> for F {
  #[inline(always)]
  fn call(&mut self, key: Key, val: V) {
    self(key, val)
  }
}
