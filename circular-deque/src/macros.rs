macro_rules! _debug {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::debug!($($tt)+);
  };
}

macro_rules! _trace {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::trace!($($tt)+);
  };
}

macro_rules! doc_empty_out_of_range {
  ($method:literal) => {
    concat!("`", $method, "` was called on an empty instance.")
  };
}

macro_rules! doc_underflow {
  ($method:literal) => {
    concat!("`", $method, "` was called on an empty instance, there is nothing to remove.")
  };
}
