use core::fmt;
use std::{
  error::Error,
  fmt::{Display, Formatter},
};

#[derive(Debug)]
pub enum XWordError {
  Internal(String),
  Parse(String),
  Io(String),
}

impl Display for XWordError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      XWordError::Internal(msg) => write!(f, "Internal error: {msg}"),
      XWordError::Parse(msg) => write!(f, "Parse error: {msg}"),
      XWordError::Io(msg) => write!(f, "I/O error: {msg}"),
    }
  }
}

impl Error for XWordError {}

pub type XWordResult<T = ()> = Result<T, Box<dyn Error>>;
