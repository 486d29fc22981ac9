use alloc::vec::Vec;
use core::{
  fmt::{Debug, Display, Formatter},
  mem::MaybeUninit,
};

/// Errors of [Slots].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotsError {
  /// The allocator could not provide the requested number of slots.
  AllocationFailed,
}

impl Display for SlotsError {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for SlotsError {}

/// Owned contiguous block of possibly uninitialized slots.
///
/// The number of slots is fixed at construction. Stored values are never dropped by this
/// structure, it is up to the owner to track which slots are initialized and to drop them.
pub struct Slots<T> {
  data: Vec<MaybeUninit<T>>,
}

impl<T> Slots<T> {
  /// Allocates a block of exactly `len` uninitialized slots.
  ///
  /// ```rust
  /// let slots = circular_deque::collection::Slots::<u8>::with_len(4).unwrap();
  /// assert_eq!(slots.len(), 4);
  /// ```
  #[inline]
  pub fn with_len(len: usize) -> crate::Result<Self> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_err| SlotsError::AllocationFailed)?;
    data.resize_with(len, MaybeUninit::uninit);
    Ok(Self { data })
  }

  /// A block with a single slot. Aborts on allocation failure like any other infallible
  /// allocation.
  #[inline]
  pub(crate) fn single() -> Self {
    let mut data = Vec::with_capacity(1);
    data.push(MaybeUninit::uninit());
    Self { data }
  }

  /// Raw pointer to the first slot.
  #[inline]
  pub fn as_ptr(&self) -> *const T {
    self.data.as_ptr().cast()
  }

  /// Mutable raw pointer to the first slot.
  #[inline]
  pub fn as_ptr_mut(&mut self) -> *mut T {
    self.data.as_mut_ptr().cast()
  }

  /// Number of slots, initialized or not.
  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// If the block has no slots at all.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}

impl<T> Debug for Slots<T> {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Slots").field("len", &self.data.len()).finish()
  }
}
