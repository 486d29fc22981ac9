// 1. Valid instances
//
// Elements live between `head` and `tail`, both inclusive. An empty instance has no cursors at all.
//
// 1.1. Contiguous
//
// |   |   | A | B | C |   |   |   |
//           H       T
//
// 1.2. Wrapping
//
// Front elements stay at the right-hand-side and back elements stay at the left-hand-side.
//
// | C | D |   |   |   |   | A | B |
//       T                   H
//
// 1.3. Full
//
// A full block is contiguous only when `head` is zero.
//
// | A | B | C | D |    | C | D | A | B |
//   H           T            T   H
//
// 2. Resizing
//
// A resize always moves the logical sequence to the beginning of a fresh block, which means
// that wrapping is eliminated.
//
// | C | D |   |   |   |   | A | B |
// ---------------------------------
// | A | B | C | D |   |   |   |   |   |   |   |   |   |   |   |   |

macro_rules! as_slices {
  ($empty:expr, $ptr:ident, $slice:ident, $this:expr, $($ref:tt)*) => {{
    let capacity = $this.slots.len();
    let len = $this.len;
    let ptr = $this.slots.$ptr();
    match $this.cursors {
      None => ($empty, $empty),
      Some(Cursors { head, tail }) => {
        // SAFETY: `head` is always within the allocated slots
        let head_ptr = unsafe { ptr.add(head) };
        if head <= tail {
          // SAFETY: `head..=tail` are initialized slots
          let front = unsafe { $($ref)* *ptr::$slice(head_ptr, len) };
          (front, $empty)
        } else {
          let front_len = capacity.wrapping_sub(head);
          // SAFETY: `head..capacity` are initialized slots
          let front = unsafe { $($ref)* *ptr::$slice(head_ptr, front_len) };
          // SAFETY: `0..=tail` are initialized slots
          let back = unsafe { $($ref)* *ptr::$slice(ptr, tail.wrapping_add(1)) };
          (front, back)
        }
      }
    }
  }}
}

#[cfg(kani)]
mod kani;
#[cfg(test)]
mod tests;

use crate::{collection::Slots, misc::unlikely_elem};
use core::{
  fmt::{Debug, Display, Formatter},
  iter::Chain,
  mem, ptr,
  slice::{Iter, IterMut},
};

/// Errors of [`CircularDeque`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircularDequeError {
  #[doc = doc_empty_out_of_range!("back")]
  BackOutOfRange,
  #[doc = doc_empty_out_of_range!("front")]
  FrontOutOfRange,
  /// The capacity could not be doubled to accommodate one more element.
  GrowOverflow,
  /// The requested position is not within `0..len`.
  IndexOutOfRange {
    /// Requested position
    idx: usize,
    /// Number of elements at the time of the request
    len: usize,
  },
  #[doc = doc_underflow!("pop_back")]
  PopBackUnderflow,
  #[doc = doc_underflow!("pop_front")]
  PopFrontUnderflow,
}

impl CircularDequeError {
  /// If the error was caused by an access outside of the stored elements.
  #[inline]
  pub const fn is_out_of_range(&self) -> bool {
    matches!(self, Self::BackOutOfRange | Self::FrontOutOfRange | Self::IndexOutOfRange { .. })
  }

  /// If the error was caused by a removal from an empty instance.
  #[inline]
  pub const fn is_underflow(&self) -> bool {
    matches!(self, Self::PopBackUnderflow | Self::PopFrontUnderflow)
  }
}

impl Display for CircularDequeError {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for CircularDequeError {}

/// A double-ended queue implemented with a ring buffer that grows when full and shrinks when
/// sparse.
///
/// Capacity starts at one slot, doubles when a push finds the block full and halves when a pop
/// leaves at most a quarter of the slots occupied.
///
/// References returned by the accessors borrow the instance, so any structural mutation (push,
/// pop, clear or resize) invalidates them at compile time.
//
// # Illustration
//
// |   |   | A | B | C | D |   |   |
//         |           |           |--> slots.len()
//         |           |
//         |           |--------------> tail (inclusive)
//         |
//         |--------------------------> head
pub struct CircularDeque<T> {
  cursors: Option<Cursors>,
  len: usize,
  slots: Slots<T>,
}

impl<T> CircularDeque<T> {
  /// Creates a new empty instance with a single slot.
  ///
  /// ```rust
  /// let queue = circular_deque::collection::CircularDeque::<u8>::new();
  /// assert_eq!((queue.len(), queue.capacity()), (0, 1));
  /// ```
  #[inline]
  pub fn new() -> Self {
    Self { cursors: None, len: 0, slots: Slots::single() }
  }

  /// Constructs a new, empty instance with exactly `capacity` slots. A zero `capacity` still
  /// allocates one slot.
  ///
  /// ```rust
  /// let queue = circular_deque::collection::CircularDeque::<u8>::with_capacity(8).unwrap();
  /// assert_eq!(queue.capacity(), 8);
  /// ```
  #[inline]
  pub fn with_capacity(capacity: usize) -> crate::Result<Self> {
    Ok(Self { cursors: None, len: 0, slots: Slots::with_len(capacity.max(1))? })
  }

  /// Returns a reference to the element at the logical position `idx`, counting from the front.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_front(3).unwrap();
  /// assert_eq!(queue.at(1).unwrap(), &1);
  /// assert!(queue.at(2).is_err());
  /// ```
  #[inline]
  pub fn at(&self, idx: usize) -> crate::Result<&T> {
    match self.get(idx) {
      Some(elem) => Ok(elem),
      None => unlikely_elem(Err(CircularDequeError::IndexOutOfRange { idx, len: self.len }.into())),
    }
  }

  /// Mutable version of [`Self::at`].
  #[inline]
  pub fn at_mut(&mut self, idx: usize) -> crate::Result<&mut T> {
    let len = self.len;
    self.get_mut(idx).ok_or(CircularDequeError::IndexOutOfRange { idx, len }.into())
  }

  /// Returns a pair of slices which contain, in order, the contents of the queue.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_back(2).unwrap();
  /// queue.push_front(3).unwrap();
  /// assert_eq!(queue.as_slices(), (&[3][..], &[1, 2][..]));
  /// ```
  #[inline]
  pub fn as_slices(&self) -> (&[T], &[T]) {
    as_slices!(&[][..], as_ptr, slice_from_raw_parts, self, &)
  }

  /// Mutable version of [`Self::as_slices`].
  #[inline]
  pub fn as_slices_mut(&mut self) -> (&mut [T], &mut [T]) {
    as_slices!(&mut [][..], as_ptr_mut, slice_from_raw_parts_mut, self, &mut)
  }

  /// Returns the last element.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// assert!(queue.back().is_err());
  /// queue.push_back(1).unwrap();
  /// queue.push_back(2).unwrap();
  /// assert_eq!(queue.back().unwrap(), &2);
  /// ```
  #[inline]
  pub fn back(&self) -> crate::Result<&T> {
    let Some(Cursors { tail, .. }) = self.cursors else {
      return unlikely_elem(Err(CircularDequeError::BackOutOfRange.into()));
    };
    // SAFETY: `tail` is initialized in non-empty instances
    Ok(unsafe { self.slot(tail) })
  }

  /// Mutable version of [`Self::back`].
  #[inline]
  pub fn back_mut(&mut self) -> crate::Result<&mut T> {
    let Some(Cursors { tail, .. }) = self.cursors else {
      return unlikely_elem(Err(CircularDequeError::BackOutOfRange.into()));
    };
    // SAFETY: `tail` is initialized in non-empty instances
    Ok(unsafe { self.slot_mut(tail) })
  }

  /// Returns the number of elements the queue can hold without reallocating.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.slots.len()
  }

  /// Drops all elements and returns to the initial single slot state.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.extend_back_from_iter([1, 2, 3]).unwrap();
  /// queue.clear();
  /// assert_eq!((queue.len(), queue.capacity()), (0, 1));
  /// ```
  #[inline]
  pub fn clear(&mut self) {
    let (front, back) = self.as_slices_mut();
    let (front, back): (*mut [T], *mut [T]) = (front, back);
    self.cursors = None;
    self.len = 0;
    // SAFETY: both runs were initialized and are no longer tracked
    unsafe {
      drop_runs(front, back);
    }
    if self.slots.len() > 1 {
      match Slots::with_len(1) {
        Ok(elem) => self.slots = elem,
        Err(_err) => {
          _debug!("Keeping a block of {} slots after clearing: {}", self.slots.len(), _err);
        }
      }
    }
  }

  /// Appends all elements of the iterator.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.extend_back_from_iter([1, 2]).unwrap();
  /// assert_eq!(queue.as_slices(), (&[1, 2][..], &[][..]));
  /// ```
  #[inline]
  pub fn extend_back_from_iter(&mut self, ii: impl IntoIterator<Item = T>) -> crate::Result<()> {
    for elem in ii {
      self.push_back(elem)?;
    }
    Ok(())
  }

  /// Prepends all elements of the iterator. The last yielded element becomes the front.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.extend_front_from_iter([1, 2]).unwrap();
  /// assert_eq!(queue.front().unwrap(), &2);
  /// ```
  #[inline]
  pub fn extend_front_from_iter(&mut self, ii: impl IntoIterator<Item = T>) -> crate::Result<()> {
    for elem in ii {
      self.push_front(elem)?;
    }
    Ok(())
  }

  /// Returns the first element.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// assert!(queue.front().is_err());
  /// queue.push_back(1).unwrap();
  /// queue.push_front(2).unwrap();
  /// assert_eq!(queue.front().unwrap(), &2);
  /// ```
  #[inline]
  pub fn front(&self) -> crate::Result<&T> {
    let Some(Cursors { head, .. }) = self.cursors else {
      return unlikely_elem(Err(CircularDequeError::FrontOutOfRange.into()));
    };
    // SAFETY: `head` is initialized in non-empty instances
    Ok(unsafe { self.slot(head) })
  }

  /// Mutable version of [`Self::front`].
  #[inline]
  pub fn front_mut(&mut self) -> crate::Result<&mut T> {
    let Some(Cursors { head, .. }) = self.cursors else {
      return unlikely_elem(Err(CircularDequeError::FrontOutOfRange.into()));
    };
    // SAFETY: `head` is initialized in non-empty instances
    Ok(unsafe { self.slot_mut(head) })
  }

  /// Optional version of [`Self::at`].
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_back(3).unwrap();
  /// assert_eq!(queue.get(0), Some(&1));
  /// assert_eq!(queue.get(2), None);
  /// ```
  #[inline]
  pub fn get(&self, idx: usize) -> Option<&T> {
    if idx >= self.len {
      return None;
    }
    let Cursors { head, .. } = self.cursors?;
    let slot = wrap_add_idx(self.slots.len(), head, idx);
    // SAFETY: `slot` is within `head..=tail`
    Some(unsafe { self.slot(slot) })
  }

  /// Mutable version of [`Self::get`].
  #[inline]
  pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
    if idx >= self.len {
      return None;
    }
    let Cursors { head, .. } = self.cursors?;
    let slot = wrap_add_idx(self.slots.len(), head, idx);
    // SAFETY: `slot` is within `head..=tail`
    Some(unsafe { self.slot_mut(slot) })
  }

  /// If there are no elements.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Indicates whether the elements cross the physical end of the block.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::with_capacity(4).unwrap();
  /// queue.push_back(1).unwrap();
  /// assert!(!queue.is_wrapping());
  /// queue.push_front(2).unwrap();
  /// assert!(queue.is_wrapping());
  /// ```
  #[inline]
  pub fn is_wrapping(&self) -> bool {
    matches!(self.cursors, Some(Cursors { head, tail }) if tail < head)
  }

  /// Returns a front-to-back iterator.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_front(3).unwrap();
  /// let mut iter = queue.iter();
  /// assert_eq!(iter.next(), Some(&3));
  /// assert_eq!(iter.next(), Some(&1));
  /// assert_eq!(iter.next(), None);
  /// ```
  #[inline]
  pub fn iter(&self) -> Chain<Iter<'_, T>, Iter<'_, T>> {
    let (front, back) = self.as_slices();
    front.iter().chain(back)
  }

  /// Mutable version of [`Self::iter`].
  #[inline]
  pub fn iter_mut(&mut self) -> Chain<IterMut<'_, T>, IterMut<'_, T>> {
    let (front, back) = self.as_slices_mut();
    front.iter_mut().chain(back)
  }

  /// Returns the number of elements.
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Removes the last element and returns it.
  ///
  /// The block is halved if at most a quarter of it remains occupied.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_back(3).unwrap();
  /// assert_eq!(queue.pop_back().unwrap(), 3);
  /// assert_eq!(queue.as_slices(), (&[1][..], &[][..]));
  /// ```
  #[inline]
  pub fn pop_back(&mut self) -> crate::Result<T> {
    let Some(Cursors { head, tail }) = self.cursors else {
      return unlikely_elem(Err(CircularDequeError::PopBackUnderflow.into()));
    };
    self.cursors = if head == tail {
      None
    } else {
      Some(Cursors { head, tail: wrap_sub_idx(self.slots.len(), tail, 1) })
    };
    self.len = self.len.wrapping_sub(1);
    // SAFETY: `tail` was initialized and is no longer tracked
    let elem = unsafe { ptr::read(self.slots.as_ptr().add(tail)) };
    self.shrink_if_sparse();
    Ok(elem)
  }

  /// Removes the first element and returns it.
  ///
  /// The block is halved if at most a quarter of it remains occupied.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_back(3).unwrap();
  /// assert_eq!(queue.pop_front().unwrap(), 1);
  /// assert_eq!(queue.as_slices(), (&[3][..], &[][..]));
  /// ```
  #[inline]
  pub fn pop_front(&mut self) -> crate::Result<T> {
    let Some(Cursors { head, tail }) = self.cursors else {
      return unlikely_elem(Err(CircularDequeError::PopFrontUnderflow.into()));
    };
    self.cursors = if head == tail {
      None
    } else {
      Some(Cursors { head: wrap_add_idx(self.slots.len(), head, 1), tail })
    };
    self.len = self.len.wrapping_sub(1);
    // SAFETY: `head` was initialized and is no longer tracked
    let elem = unsafe { ptr::read(self.slots.as_ptr().add(head)) };
    self.shrink_if_sparse();
    Ok(elem)
  }

  /// Appends an element to the back of the queue, doubling the capacity if the block is full.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_back(1).unwrap();
  /// queue.push_back(3).unwrap();
  /// assert_eq!(queue.as_slices(), (&[1, 3][..], &[][..]));
  /// ```
  #[inline]
  pub fn push_back(&mut self, value: T) -> crate::Result<()> {
    if self.len == self.slots.len() {
      self.grow()?;
    }
    let cursors = match self.cursors {
      None => Cursors { head: 0, tail: 0 },
      Some(Cursors { head, tail }) => {
        Cursors { head, tail: wrap_add_idx(self.slots.len(), tail, 1) }
      }
    };
    // SAFETY: the block is not full so the slot after the previous tail is free
    unsafe {
      ptr::write(self.slots.as_ptr_mut().add(cursors.tail), value);
    }
    self.cursors = Some(cursors);
    self.len = self.len.wrapping_add(1);
    Ok(())
  }

  /// Prepends an element to the queue, doubling the capacity if the block is full.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.push_front(1).unwrap();
  /// queue.push_front(3).unwrap();
  /// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [3, 1]);
  /// ```
  #[inline]
  pub fn push_front(&mut self, value: T) -> crate::Result<()> {
    if self.len == self.slots.len() {
      self.grow()?;
    }
    let cursors = match self.cursors {
      None => Cursors { head: 0, tail: 0 },
      Some(Cursors { head, tail }) => {
        Cursors { head: wrap_sub_idx(self.slots.len(), head, 1), tail }
      }
    };
    // SAFETY: the block is not full so the slot before the previous head is free
    unsafe {
      ptr::write(self.slots.as_ptr_mut().add(cursors.head), value);
    }
    self.cursors = Some(cursors);
    self.len = self.len.wrapping_add(1);
    Ok(())
  }

  /// Reallocates the block to exactly fit the current number of elements, which also removes any
  /// wrapping.
  ///
  /// ```rust
  /// let mut queue = circular_deque::collection::CircularDeque::new();
  /// queue.extend_back_from_iter([1, 2, 3]).unwrap();
  /// assert_eq!(queue.capacity(), 4);
  /// queue.shrink_to_fit().unwrap();
  /// assert_eq!(queue.capacity(), 3);
  /// ```
  #[inline]
  pub fn shrink_to_fit(&mut self) -> crate::Result<()> {
    self.resize(self.len)
  }

  fn grow(&mut self) -> crate::Result<()> {
    let capacity = self.slots.len();
    let Some(new_capacity) = capacity.checked_mul(2) else {
      return unlikely_elem(Err(CircularDequeError::GrowOverflow.into()));
    };
    self.resize(new_capacity).map_err(|_err| CircularDequeError::GrowOverflow)?;
    Ok(())
  }

  /// Moves all elements, in logical order, to the beginning of a fresh block of
  /// `new_capacity` slots. The previous block is only released after the swap.
  ///
  /// `new_capacity` must not be less than the current length.
  fn resize(&mut self, new_capacity: usize) -> crate::Result<()> {
    let mut slots = Slots::with_len(new_capacity.max(1))?;
    let (front, back) = self.as_slices();
    let front_len = front.len();
    let dst = slots.as_ptr_mut();
    // SAFETY: the fresh block has at least `len` slots and doesn't overlap the current one
    unsafe {
      ptr::copy_nonoverlapping(front.as_ptr(), dst, front_len);
    }
    // SAFETY: `back` lands right after `front`, still within the fresh block
    unsafe {
      ptr::copy_nonoverlapping(back.as_ptr(), dst.add(front_len), back.len());
    }
    _trace!(from = self.slots.len(), len = self.len, to = slots.len(), "Resizing block");
    let _prev = mem::replace(&mut self.slots, slots);
    self.cursors = self.len.checked_sub(1).map(|tail| Cursors { head: 0, tail });
    Ok(())
  }

  fn shrink_if_sparse(&mut self) {
    let capacity = self.slots.len();
    if capacity > 1
      && self.len <= capacity / 4
      && let Err(_err) = self.resize(capacity / 2)
    {
      _debug!("Keeping a sparse block of {} slots: {}", capacity, _err);
    }
  }

  /// # Safety
  ///
  /// `slot` must point to an initialized element.
  unsafe fn slot(&self, slot: usize) -> &T {
    // SAFETY: it is up to the caller to provide an initialized slot
    unsafe { &*self.slots.as_ptr().add(slot) }
  }

  /// # Safety
  ///
  /// `slot` must point to an initialized element.
  unsafe fn slot_mut(&mut self, slot: usize) -> &mut T {
    // SAFETY: it is up to the caller to provide an initialized slot
    unsafe { &mut *self.slots.as_ptr_mut().add(slot) }
  }
}

impl<T> Clone for CircularDeque<T>
where
  T: Clone,
{
  #[inline]
  fn clone(&self) -> Self {
    let mut instance = CircularDeque::new();
    let _rslt = instance.extend_back_from_iter(self.iter().cloned());
    instance
  }
}

impl<T> Debug for CircularDeque<T>
where
  T: Debug,
{
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    let (front, back) = self.as_slices();
    f.debug_struct("CircularDeque").field("front", &front).field("back", &back).finish()
  }
}

impl<T> Default for CircularDeque<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Drop for CircularDeque<T> {
  #[inline]
  fn drop(&mut self) {
    let (front, back) = self.as_slices_mut();
    // SAFETY: both runs are initialized and the instance is being destroyed
    unsafe {
      drop_runs(front, back);
    }
  }
}

impl<T> Eq for CircularDeque<T> where T: Eq {}

impl<'any, T> IntoIterator for &'any CircularDeque<T> {
  type IntoIter = Chain<Iter<'any, T>, Iter<'any, T>>;
  type Item = &'any T;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'any, T> IntoIterator for &'any mut CircularDeque<T> {
  type IntoIter = Chain<IterMut<'any, T>, IterMut<'any, T>>;
  type Item = &'any mut T;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

impl<T> PartialEq for CircularDeque<T>
where
  T: PartialEq,
{
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.len == other.len && self.iter().eq(other.iter())
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Cursors {
  head: usize,
  tail: usize,
}

/// Drops the front run and then the back run. The back run is still dropped if a destructor of
/// the front run panics.
///
/// # Safety
///
/// Both runs must be initialized and must not be used afterwards.
unsafe fn drop_runs<T>(front: *mut [T], back: *mut [T]) {
  struct Guard<T>(*mut [T]);
  impl<T> Drop for Guard<T> {
    fn drop(&mut self) {
      // SAFETY: it is up to the caller to provide initialized elements
      unsafe {
        ptr::drop_in_place(self.0);
      }
    }
  }

  let _back_dropper = Guard(back);
  let _front_dropper = Guard(front);
}

// `idx` and `offset` are expected to be less than `bound`.
const fn wrap_add_idx(bound: usize, idx: usize, offset: usize) -> usize {
  let until_end = bound.wrapping_sub(idx);
  if offset < until_end { idx.wrapping_add(offset) } else { offset.wrapping_sub(until_end) }
}

// `idx` and `offset` are expected to be less than `bound`.
const fn wrap_sub_idx(bound: usize, idx: usize, offset: usize) -> usize {
  if offset <= idx {
    idx.wrapping_sub(offset)
  } else {
    bound.wrapping_sub(offset.wrapping_sub(idx))
  }
}
