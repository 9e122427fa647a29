//! 16-byte cache key
//! 16 字节缓存键

use std::fmt;

use crate::{Error, Result};

/// Key length in bytes
/// 键字节长度
pub const KEY_LEN: usize = 16;

/// Opaque 16-byte key, usually an MD5 digest
/// 不透明的 16 字节键，通常为 MD5 摘要
///
/// Only equality and hashing are meaningful. The cache never hashes or validates content.
/// 仅相等与哈希有意义，缓存不会计算或校验内容。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Key(pub [u8; KEY_LEN]);

impl Key {
  /// Copy from slice, length must be exactly 16
  /// 从切片复制，长度必须为 16
  #[inline]
  pub fn from_slice(bin: &[u8]) -> Result<Self> {
    let arr: [u8; KEY_LEN] = bin.try_into().map_err(|_| Error::KeyLen(bin.len()))?;
    Ok(Self(arr))
  }

  #[inline(always)]
  pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
    &self.0
  }
}

impl From<[u8; KEY_LEN]> for Key {
  #[inline(always)]
  fn from(arr: [u8; KEY_LEN]) -> Self {
    Self(arr)
  }
}

impl From<Key> for [u8; KEY_LEN] {
  #[inline(always)]
  fn from(key: Key) -> Self {
    key.0
  }
}

impl AsRef<[u8]> for Key {
  #[inline(always)]
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.0 {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({self})")
  }
}
