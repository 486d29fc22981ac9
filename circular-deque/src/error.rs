use crate::collection::{CircularDequeError, SlotsError};
use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External
  //
  /// See [`tracing_subscriber::util::TryInitError`].
  #[cfg(feature = "_tracing-subscriber")]
  TryInitError(tracing_subscriber::util::TryInitError),

  // Internal
  //
  /// See [`CircularDequeError`].
  CircularDequeError(CircularDequeError),
  /// See [`SlotsError`].
  SlotsError(SlotsError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

impl From<Error> for () {
  #[inline]
  fn from(_: Error) -> Self {}
}

#[cfg(feature = "_tracing-subscriber")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

impl From<CircularDequeError> for Error {
  #[inline]
  fn from(from: CircularDequeError) -> Self {
    Self::CircularDequeError(from)
  }
}

impl From<SlotsError> for Error {
  #[inline]
  fn from(from: SlotsError) -> Self {
    Self::SlotsError(from)
  }
}
