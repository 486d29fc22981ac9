use crate::{
  Error,
  collection::{CircularDeque, CircularDequeError},
};
use alloc::{format, rc::Rc, vec::Vec};

#[test]
fn alternating_pushes() {
  let mut dq = CircularDeque::new();
  dq.push_front(23).unwrap();
  dq.push_back(18).unwrap();
  dq.push_front(32).unwrap();
  dq.push_back(10).unwrap();
  assert!(!dq.is_empty());
  assert_eq!(dq.len(), 4);
  assert_eq!(collect(&dq), [32, 23, 18, 10]);
  assert_eq!(dq.front().unwrap(), &32);
  assert_eq!(dq.back().unwrap(), &10);
}

#[test]
fn back_pops_are_lifo_and_front_pops_are_fifo() {
  let mut dq = CircularDeque::new();
  dq.extend_back_from_iter(0..10).unwrap();
  let mut popped = Vec::new();
  while let Ok(elem) = dq.pop_back() {
    popped.push(elem);
  }
  assert_eq!(popped, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);

  dq.extend_back_from_iter(0..10).unwrap();
  popped.clear();
  while let Ok(elem) = dq.pop_front() {
    popped.push(elem);
  }
  assert_eq!(popped, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
  assert!(dq.is_empty());
  assert_eq!(dq.capacity(), 1);
}

#[test]
fn clear() {
  let mut dq = CircularDeque::new();
  dq.clear();
  assert!(dq.is_empty());
  dq.push_back(23).unwrap();
  dq.push_back(42).unwrap();
  dq.clear();
  assert_eq!(dq.len(), 0);
  assert!(dq.is_empty());
  assert_eq!(dq.capacity(), 1);
  assert_eq!(deque_err(dq.at(0)), CircularDequeError::IndexOutOfRange { idx: 0, len: 0 });
  dq.clear();
  assert!(dq.is_empty());
  dq.push_front(7).unwrap();
  assert_eq!(collect(&dq), [7]);
}

#[test]
fn clone_and_eq() {
  let mut dq = CircularDeque::with_capacity(4).unwrap();
  dq.extend_back_from_iter([1, 2, 3]).unwrap();
  let _ = dq.pop_front().unwrap();
  dq.push_back(4).unwrap();
  dq.push_back(5).unwrap();
  assert!(dq.is_wrapping());
  let cloned = dq.clone();
  assert!(!cloned.is_wrapping());
  assert_eq!(cloned, dq);
  dq.push_back(6).unwrap();
  assert_ne!(cloned, dq);
}

#[test]
fn debug_shows_both_runs() {
  let mut dq = CircularDeque::new();
  dq.push_back(23).unwrap();
  dq.push_front(18).unwrap();
  assert_eq!(format!("{dq:?}"), "CircularDeque { front: [18], back: [23] }");
}

#[test]
fn drops_every_live_element_once() {
  let marker = Rc::new(());
  {
    let mut dq = CircularDeque::new();
    for _ in 0..5 {
      dq.push_back(Rc::clone(&marker)).unwrap();
      dq.push_front(Rc::clone(&marker)).unwrap();
    }
    assert_eq!(Rc::strong_count(&marker), 11);
    drop(dq.pop_front().unwrap());
    drop(dq.pop_back().unwrap());
    assert_eq!(Rc::strong_count(&marker), 9);
    dq.shrink_to_fit().unwrap();
    assert_eq!(Rc::strong_count(&marker), 9);
    dq.clear();
    assert_eq!(Rc::strong_count(&marker), 1);
    for _ in 0..3 {
      dq.push_front(Rc::clone(&marker)).unwrap();
    }
    assert_eq!(Rc::strong_count(&marker), 4);
  }
  assert_eq!(Rc::strong_count(&marker), 1);
}

#[test]
fn empty() {
  let mut dq = CircularDeque::<i32>::new();
  assert!(dq.is_empty());
  assert_eq!(dq.len(), 0);
  assert_eq!(dq.capacity(), 1);
  assert!(deque_err(dq.pop_front()).is_underflow());
  assert_eq!(dq.as_slices(), (&[][..], &[][..]));
  assert_eq!(dq.iter().next(), None);
}

#[test]
fn errors_leave_the_instance_untouched() {
  let mut dq = CircularDeque::<i32>::new();
  assert_eq!(deque_err(dq.front()), CircularDequeError::FrontOutOfRange);
  assert_eq!(deque_err(dq.back()), CircularDequeError::BackOutOfRange);
  assert_eq!(deque_err(dq.front_mut()), CircularDequeError::FrontOutOfRange);
  assert_eq!(deque_err(dq.back_mut()), CircularDequeError::BackOutOfRange);
  assert_eq!(deque_err(dq.pop_front()), CircularDequeError::PopFrontUnderflow);
  assert_eq!(deque_err(dq.pop_back()), CircularDequeError::PopBackUnderflow);
  assert_eq!(deque_err(dq.at(1)), CircularDequeError::IndexOutOfRange { idx: 1, len: 0 });
  let negative = -2isize as usize;
  assert!(deque_err(dq.at(negative)).is_out_of_range());
  assert!(deque_err(dq.at_mut(usize::MAX)).is_out_of_range());
  assert!(dq.is_empty());
  assert_eq!(dq.capacity(), 1);

  dq.extend_back_from_iter([1, 2, 3]).unwrap();
  let capacity = dq.capacity();
  assert_eq!(deque_err(dq.at(3)), CircularDequeError::IndexOutOfRange { idx: 3, len: 3 });
  assert_eq!(collect(&dq), [1, 2, 3]);
  assert_eq!(dq.capacity(), capacity);
}

#[test]
fn error_classification() {
  for elem in [
    CircularDequeError::BackOutOfRange,
    CircularDequeError::FrontOutOfRange,
    CircularDequeError::IndexOutOfRange { idx: 0, len: 0 },
  ] {
    assert!(elem.is_out_of_range());
    assert!(!elem.is_underflow());
  }
  for elem in [CircularDequeError::PopBackUnderflow, CircularDequeError::PopFrontUnderflow] {
    assert!(elem.is_underflow());
    assert!(!elem.is_out_of_range());
  }
  let grow = CircularDequeError::GrowOverflow;
  assert!(!grow.is_out_of_range() && !grow.is_underflow());
}

#[test]
fn growth_doubles_and_sparse_pops_halve() {
  #[cfg(feature = "_tracing-subscriber")]
  let _rslt = crate::misc::tracing_subscriber_init(Some("trace"));
  let mut dq = CircularDeque::new();
  let mut capacities = Vec::new();
  for idx in 0..9 {
    dq.push_back(idx).unwrap();
    capacities.push(dq.capacity());
  }
  assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
  let mut states = Vec::new();
  while dq.pop_front().is_ok() {
    states.push((dq.len(), dq.capacity()));
  }
  assert_eq!(
    states,
    [(8, 16), (7, 16), (6, 16), (5, 16), (4, 8), (3, 8), (2, 4), (1, 2), (0, 1)]
  );
}

#[test]
fn indexing_through_wraparound() {
  let mut dq = CircularDeque::with_capacity(4).unwrap();
  dq.extend_back_from_iter([0, 1, 2]).unwrap();
  assert_eq!(dq.pop_front().unwrap(), 0);
  dq.push_back(3).unwrap();
  dq.push_back(4).unwrap();
  assert!(dq.is_wrapping());
  assert_eq!(dq.as_slices(), (&[1, 2, 3][..], &[4][..]));
  for (idx, elem) in [1, 2, 3, 4].into_iter().enumerate() {
    assert_eq!(dq.at(idx).unwrap(), &elem);
    assert_eq!(dq.get(idx), Some(&elem));
  }
  *dq.at_mut(3).unwrap() = 40;
  *dq.front_mut().unwrap() = 10;
  *dq.back_mut().unwrap() += 1;
  assert_eq!(collect(&dq), [10, 2, 3, 41]);
  for elem in &mut dq {
    *elem *= 2;
  }
  assert_eq!(collect(&dq), [20, 4, 6, 82]);
}

#[test]
fn push_and_pop_across_both_ends() {
  let mut dq = CircularDeque::new();
  dq.push_back(100).unwrap();
  dq.push_back(20).unwrap();
  dq.push_front(30).unwrap();
  assert_eq!(dq.pop_back().unwrap(), 20);
  assert!(!dq.is_empty());
  assert_eq!(dq.len(), 2);
  assert_eq!(dq.at(0).unwrap(), &30);
  assert_eq!(dq.at(1).unwrap(), &100);
  assert_eq!(dq.back().unwrap(), &100);
}

#[test]
fn push_four_and_front() {
  let mut dq = CircularDeque::new();
  dq.extend_back_from_iter([23, 18, 32, 10]).unwrap();
  assert_eq!(dq.len(), 4);
  assert_eq!(collect(&dq), [23, 18, 32, 10]);
  assert_eq!(dq.front().unwrap(), &23);
  assert_eq!(dq.back().unwrap(), &10);
}

#[test]
fn resize_removes_wrapping() {
  let mut dq = CircularDeque::new();
  dq.push_back(1).unwrap();
  dq.push_front(2).unwrap();
  assert!(dq.is_wrapping());
  dq.push_front(3).unwrap();
  assert_eq!(dq.capacity(), 4);
  dq.push_back(4).unwrap();
  assert!(dq.is_wrapping());
  dq.push_back(5).unwrap();
  assert_eq!(dq.capacity(), 8);
  assert!(!dq.is_wrapping());
  assert_eq!(dq.as_slices(), (&[3, 2, 1, 4, 5][..], &[][..]));
}

#[test]
fn shrink_to_fit() {
  let mut dq = CircularDeque::new();
  dq.push_back(23).unwrap();
  dq.push_back(42).unwrap();
  dq.push_back(1).unwrap();
  assert_eq!(dq.len(), 3);
  assert_eq!(dq.pop_back().unwrap(), 1);
  let before = collect(&dq);
  dq.shrink_to_fit().unwrap();
  assert!(!dq.is_empty());
  assert_eq!(dq.len(), 2);
  assert_eq!(dq.capacity(), 2);
  assert_eq!(collect(&dq), before);
}

#[test]
fn shrink_to_fit_linearizes_and_keeps_one_slot() {
  let mut dq = CircularDeque::with_capacity(4).unwrap();
  dq.push_back(1).unwrap();
  dq.push_front(2).unwrap();
  assert!(dq.is_wrapping());
  dq.shrink_to_fit().unwrap();
  assert!(!dq.is_wrapping());
  assert_eq!(dq.as_slices(), (&[2, 1][..], &[][..]));

  let mut empty = CircularDeque::<u8>::with_capacity(0).unwrap();
  assert_eq!(empty.capacity(), 1);
  empty.shrink_to_fit().unwrap();
  assert_eq!(empty.capacity(), 1);
}

#[test]
fn single_element_pops() {
  let mut dq = CircularDeque::with_capacity(4).unwrap();
  dq.extend_back_from_iter([1, 2]).unwrap();
  assert_eq!(dq.pop_front().unwrap(), 1);
  assert_eq!(dq.pop_back().unwrap(), 2);
  assert!(dq.is_empty());
  assert!(dq.back().is_err());

  dq.push_back(3).unwrap();
  dq.push_back(4).unwrap();
  assert_eq!(dq.pop_front().unwrap(), 3);
  assert_eq!(dq.pop_back().unwrap(), 4);
  assert!(dq.front().is_err());
  assert!(dq.pop_back().is_err());
}

#[test]
fn size_accounting() {
  let mut dq = CircularDeque::new();
  let mut expected: usize = 0;
  for idx in 0..64u32 {
    match idx % 7 {
      0 | 3 | 5 => {
        dq.push_back(idx).unwrap();
        expected += 1;
      }
      1 | 4 => {
        dq.push_front(idx).unwrap();
        expected += 1;
      }
      2 => {
        if dq.pop_back().is_ok() {
          expected -= 1;
        }
      }
      _ => {
        if dq.pop_front().is_ok() {
          expected -= 1;
        }
      }
    }
    assert_eq!(dq.len(), expected);
    assert_eq!(dq.is_empty(), expected == 0);
    assert!(dq.len() <= dq.capacity());
  }
}

#[test]
fn wrap_head_around() {
  let mut dq = CircularDeque::new();
  dq.push_back(23).unwrap();
  dq.push_front(18).unwrap();
  dq.push_front(32).unwrap();
  assert!(!dq.is_empty());
  assert_eq!(dq.len(), 3);
  assert_eq!(dq.at(0).unwrap(), &32);
  assert_eq!(dq.at(1).unwrap(), &18);
  assert_eq!(dq.at(2).unwrap(), &23);
  assert_eq!(dq.back().unwrap(), &23);
  assert_eq!(dq.as_slices(), (&[32][..], &[18, 23][..]));
}

#[test]
fn wrap_tail_around() {
  let mut dq = CircularDeque::new();
  dq.push_back(23).unwrap();
  dq.push_back(42).unwrap();
  assert_eq!(dq.pop_front().unwrap(), 23);
  dq.push_back(1).unwrap();
  dq.push_back(2).unwrap();
  assert!(!dq.is_empty());
  assert_eq!(dq.len(), 3);
  assert_eq!(collect(&dq), [42, 1, 2]);
  assert_eq!(dq.back().unwrap(), &2);
}

#[test]
fn zero_sized_elements() {
  let mut dq = CircularDeque::new();
  for _ in 0..10 {
    dq.push_back(()).unwrap();
  }
  assert_eq!((dq.len(), dq.capacity()), (10, 16));
  assert_eq!(dq.at(9).unwrap(), &());
  for _ in 0..10 {
    dq.pop_front().unwrap();
  }
  assert!(dq.is_empty());
}

fn collect<T>(dq: &CircularDeque<T>) -> Vec<T>
where
  T: Clone,
{
  dq.iter().cloned().collect()
}

#[track_caller]
fn deque_err<T>(rslt: crate::Result<T>) -> CircularDequeError {
  match rslt {
    Err(Error::CircularDequeError(elem)) => elem,
    _ => panic!("expected a deque error"),
  }
}
