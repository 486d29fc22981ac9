/// Marks the path that produces `elem` as cold.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) const fn unlikely_elem<T>(elem: T) -> T {
  elem
}
