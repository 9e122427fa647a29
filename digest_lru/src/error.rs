use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("key must be 16 bytes, got {0} / 键必须为 16 字节")]
  KeyLen(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
