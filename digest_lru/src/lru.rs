//! LRU (Least Recently Used) cache keyed by 16-byte digests
//! 以 16 字节摘要为键的 LRU（最近最少使用）缓存
//!
//! # Complexity
//! 复杂度
//!
//! - get: O(1)
//! - set: O(1) amortized
//! - rm / rm_oldest: O(1)
//!
//! Entries live in an arena addressed by index. The map stores indices, the recency
//! list is intrusive (prev/next indices inside each slot). Freed slots are recycled
//! through a free list threaded on `next`.
//! 条目存放在按下标寻址的 arena 中。映射表存下标，最近使用链表是侵入式的
//! （每个槽内保存 prev/next 下标）。释放的槽通过 `next` 串成空闲链表复用。

use std::{collections::HashMap, mem, path::Path};

use crate::{KEY_LEN, Key, NoOnRm, OnRm, Result, file};

// Null link
// 空链接
const NIL: usize = usize::MAX;

// Max keys reserved up front in the snapshot scratch, grows past it on demand
// 快照暂存区预分配的最大键数，超出时按需增长
const PRE_ALLOC_KEYS: usize = 1 << 16;

struct Node<V> {
  key: Key,
  // None for slots on the free list
  // 空闲链表中的槽为 None
  val: Option<V>,
  prev: usize,
  next: usize,
}

/// LRU cache with fixed capacity, not synchronized
/// 固定容量的 LRU 缓存，不带同步
///
/// Exclusive access is proven by `&mut self`. Wrap in [`crate::SyncLru`] to share across threads.
/// 通过 `&mut self` 保证独占访问。跨线程共享请用 [`crate::SyncLru`]。
#[must_use]
pub struct Lru<V, F = NoOnRm> {
  nodes: Vec<Node<V>>,
  index: HashMap<Key, usize>,
  // Most recently used
  // 最近使用
  head: usize,
  // Least recently used, next to evict
  // 最久未使用，下一个淘汰
  tail: usize,
  free: usize,
  // 0 = unbounded
  // 0 表示不限
  cap: usize,
  // Snapshot scratch, pre-sized to cap * KEY_LEN (bounded)
  // 快照暂存区，预分配 cap * KEY_LEN（有上限）
  buf: Vec<u8>,
  on_rm: F,
}

impl<V> Lru<V> {
  /// Create with capacity, 0 means unbounded
  /// 创建，指定容量，0 表示不限
  #[inline]
  pub fn new(cap: usize) -> Self {
    Self::with_on_rm(cap, NoOnRm)
  }

  /// Create with eviction callback
  /// 创建带淘汰回调的缓存
  #[inline]
  pub fn with_on_rm<F>(cap: usize, on_rm: F) -> Lru<V, F> {
    Lru {
      nodes: Vec::new(),
      index: HashMap::new(),
      head: NIL,
      tail: NIL,
      free: NIL,
      cap,
      buf: Vec::with_capacity(cap.min(PRE_ALLOC_KEYS) * KEY_LEN),
      on_rm,
    }
  }
}

impl<V, F: OnRm<V>> Lru<V, F> {
  /// Insert or update, promotes key to most recently used
  /// 插入或更新，键提升为最近使用
  ///
  /// Evicts at most one entry (the tail) when a new key overflows capacity.
  /// 新键超出容量时最多淘汰一个条目（链尾）。
  pub fn set(&mut self, key: Key, val: V) {
    if let Some(&idx) = self.index.get(&key) {
      self.nodes[idx].val = Some(val);
      self.touch(idx);
      return;
    }

    let idx = self.alloc(key, val);
    self.index.insert(key, idx);
    self.push_head(idx);

    if self.cap != 0 && self.index.len() > self.cap {
      self.rm_oldest();
    }
  }

  /// Get value and promote to most recently used
  /// 获取值并提升为最近使用
  #[inline]
  pub fn get(&mut self, key: &Key) -> Option<&V> {
    let idx = *self.index.get(key)?;
    self.touch(idx);
    self.nodes[idx].val.as_ref()
  }

  /// Get mutable value and promote to most recently used
  /// 获取可变值并提升为最近使用
  #[inline]
  pub fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
    let idx = *self.index.get(key)?;
    self.touch(idx);
    self.nodes[idx].val.as_mut()
  }

  /// Peek value without touching recency
  /// 查看值但不更新最近使用顺序
  #[inline]
  pub fn peek(&self, key: &Key) -> Option<&V> {
    let idx = *self.index.get(key)?;
    self.nodes[idx].val.as_ref()
  }

  /// Check key without touching recency
  /// 检查键是否存在，不更新最近使用顺序
  #[inline]
  pub fn contains(&self, key: &Key) -> bool {
    self.index.contains_key(key)
  }

  /// Remove by key, no-op if absent
  /// 按键删除，不存在则忽略
  #[inline]
  pub fn rm(&mut self, key: &Key) {
    if let Some(idx) = self.index.remove(key) {
      self.unlink_free(idx);
    }
  }

  /// Remove least recently used entry, no-op if empty
  /// 删除最久未使用的条目，空时忽略
  #[inline]
  pub fn rm_oldest(&mut self) {
    let idx = self.tail;
    if idx == NIL {
      return;
    }
    let key = self.nodes[idx].key;
    self.index.remove(&key);
    self.unlink_free(idx);
  }

  /// Call back every entry then drop all storage
  /// 对每个条目调用回调，然后释放全部存储
  ///
  /// Callback order follows the map, not recency. The cache stays usable afterwards.
  /// 回调顺序按映射表而非最近使用顺序。之后缓存仍可继续使用。
  pub fn clear(&mut self) {
    let index = mem::take(&mut self.index);
    let mut nodes = mem::take(&mut self.nodes);
    self.head = NIL;
    self.tail = NIL;
    self.free = NIL;
    for (key, idx) in index {
      if let Some(val) = nodes[idx].val.take() {
        self.on_rm.call(key, val);
      }
    }
  }

  /// Entry count
  /// 条目数量
  #[inline]
  pub fn len(&self) -> usize {
    self.index.len()
  }

  /// Check if cache is empty
  /// 检查缓存是否为空
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  /// Capacity, 0 means unbounded
  /// 容量，0 表示不限
  #[inline]
  pub fn cap(&self) -> usize {
    self.cap
  }

  /// Iterate from most to least recently used
  /// 从最近使用到最久未使用遍历
  #[inline]
  pub fn iter(&self) -> Iter<'_, V> {
    Iter {
      nodes: &self.nodes,
      cur: self.head,
      remain: self.index.len(),
    }
  }

  /// Concatenated raw keys, 16 bytes each, no header
  /// 拼接的原始键，每个 16 字节，无头部
  ///
  /// Emitted from least to most recently used, so loading the snapshot back
  /// in file order rebuilds the same recency order.
  /// 从最久未使用到最近使用输出，按文件顺序加载即可重建相同的最近使用顺序。
  pub fn snapshot(&mut self) -> &[u8] {
    self.buf.clear();
    let mut idx = self.tail;
    while idx != NIL {
      let node = &self.nodes[idx];
      self.buf.extend_from_slice(node.key.as_bytes());
      idx = node.prev;
    }
    &self.buf
  }

  /// Write snapshot to path (create / truncate, mode 0644)
  /// 将快照写入路径（创建 / 截断，权限 0644）
  #[inline]
  pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    file::save(path, self.snapshot())
  }

  /// Load keys from path with `V::default()` as value, returns keys read
  /// 从路径加载键，值为 `V::default()`，返回读取的键数
  ///
  /// Missing file is created empty. Existing entries are kept, loaded keys go
  /// through `set` and may evict them.
  /// 文件不存在时创建空文件。已有条目保留，加载的键经 `set` 插入，可能淘汰已有条目。
  pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize>
  where
    V: Default,
  {
    let mut buf = mem::take(&mut self.buf);
    let r = file::read(path.as_ref(), file::limit(self.cap), &mut buf).map(|_| {
      let mut n = 0;
      for key in file::keys(&buf) {
        self.set(key, V::default());
        n += 1;
      }
      n
    });
    self.buf = buf;
    r
  }

  // Move to head
  // 移到链头
  #[inline]
  fn touch(&mut self, idx: usize) {
    if self.head != idx {
      self.unlink(idx);
      self.push_head(idx);
    }
  }

  fn alloc(&mut self, key: Key, val: V) -> usize {
    let node = Node {
      key,
      val: Some(val),
      prev: NIL,
      next: NIL,
    };
    if self.free == NIL {
      self.nodes.push(node);
      self.nodes.len() - 1
    } else {
      let idx = self.free;
      self.free = self.nodes[idx].next;
      self.nodes[idx] = node;
      idx
    }
  }

  fn unlink(&mut self, idx: usize) {
    let Node { prev, next, .. } = self.nodes[idx];
    if prev == NIL {
      self.head = next;
    } else {
      self.nodes[prev].next = next;
    }
    if next == NIL {
      self.tail = prev;
    } else {
      self.nodes[next].prev = prev;
    }
  }

  fn push_head(&mut self, idx: usize) {
    let node = &mut self.nodes[idx];
    node.prev = NIL;
    node.next = self.head;
    if self.head == NIL {
      self.tail = idx;
    } else {
      self.nodes[self.head].prev = idx;
    }
    self.head = idx;
  }

  // Caller already removed the key from index
  // 调用方已从映射表删除键
  fn unlink_free(&mut self, idx: usize) {
    self.unlink(idx);
    let node = &mut self.nodes[idx];
    let val = node.val.take();
    node.prev = NIL;
    node.next = self.free;
    self.free = idx;
    if let Some(val) = val {
      self.on_rm.call(node.key, val);
    }
  }
}

/// Recency iterator, most recently used first
/// 最近使用顺序迭代器，最近使用的在前
pub struct Iter<'a, V> {
  nodes: &'a [Node<V>],
  cur: usize,
  remain: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
  type Item = (&'a Key, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    if self.cur == NIL {
      return None;
    }
    let node = &self.nodes[self.cur];
    self.cur = node.next;
    self.remain -= 1;
    node.val.as_ref().map(|val| (&node.key, val))
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remain, Some(self.remain))
  }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
