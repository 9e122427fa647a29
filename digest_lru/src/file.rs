//! Flat key file
//! 平面键文件
//!
//! Raw 16-byte keys back to back. No header, length, checksum or values.
//! Trailing bytes that do not form a whole key are dropped on read.
//! 16 字节原始键首尾相接。无头部、长度、校验和或值。
//! 读取时丢弃末尾不足一个键的字节。

use std::{
  fs::{File, OpenOptions},
  io::{ErrorKind, Read, Write},
  path::Path,
};

use log::error;

use crate::{KEY_LEN, Key, Result};

// rw-r--r--
#[cfg(unix)]
const MODE: u32 = 0o644;

fn open_write(path: &Path, truncate: bool) -> std::io::Result<File> {
  let mut opt = OpenOptions::new();
  opt.write(true).create(true).truncate(truncate);
  #[cfg(unix)]
  {
    use std::os::unix::fs::OpenOptionsExt;
    opt.mode(MODE);
  }
  opt.open(path)
}

/// Byte limit for a cache of capacity `cap` (0 = unbounded)
/// 容量为 `cap` 的缓存的读取字节上限（0 表示不限）
#[inline]
pub fn limit(cap: usize) -> u64 {
  if cap == 0 {
    u64::MAX
  } else {
    (cap as u64).saturating_mul(KEY_LEN as u64)
  }
}

/// Write bin to path, create or truncate
/// 写入路径，创建或截断
pub fn save(path: &Path, bin: &[u8]) -> Result<()> {
  let r = open_write(path, true).and_then(|mut file| file.write_all(bin));
  if let Err(e) = r {
    error!("save {}, error={e}", path.display());
    return Err(e.into());
  }
  Ok(())
}

/// Read up to `limit` bytes into buf (cleared first)
/// 读取最多 `limit` 字节到 buf（先清空）
///
/// Missing file is created empty and yields nothing. Short read is not an error.
/// 文件不存在时创建空文件，读到 0 字节。读不满不算错误。
pub fn read(path: &Path, limit: u64, buf: &mut Vec<u8>) -> Result<()> {
  buf.clear();
  let file = match File::open(path) {
    Ok(file) => file,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      if let Err(e) = open_write(path, false) {
        error!("load create {}, error={e}", path.display());
        return Err(e.into());
      }
      return Ok(());
    }
    Err(e) => {
      error!("load open {}, error={e}", path.display());
      return Err(e.into());
    }
  };
  if let Err(e) = file.take(limit).read_to_end(buf) {
    error!("load read {}, error={e}", path.display());
    return Err(e.into());
  }
  Ok(())
}

/// Whole keys in bin, in order
/// bin 中的完整键，按顺序
#[inline]
pub fn keys(bin: &[u8]) -> impl Iterator<Item = Key> + '_ {
  bin.chunks_exact(KEY_LEN).map(|chunk| {
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(chunk);
    Key(key)
  })
}
