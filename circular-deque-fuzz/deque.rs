//! Deque

#![no_main]

use circular_deque::collection::CircularDeque;
use std::collections::VecDeque;

#[derive(Debug, arbitrary::Arbitrary)]
enum Op {
  Clear,
  PopBack,
  PopFront,
  PushBack(u8),
  PushFront(u8),
  ShrinkToFit,
}

libfuzzer_sys::fuzz_target!(|ops: Vec<Op>| {
  let mut deque = CircularDeque::new();
  let mut vec_deque = VecDeque::new();
  for op in ops {
    match op {
      Op::Clear => {
        deque.clear();
        vec_deque.clear();
      }
      Op::PopBack => assert_eq!(deque.pop_back().ok(), vec_deque.pop_back()),
      Op::PopFront => assert_eq!(deque.pop_front().ok(), vec_deque.pop_front()),
      Op::PushBack(elem) => {
        deque.push_back(elem).unwrap();
        vec_deque.push_back(elem);
      }
      Op::PushFront(elem) => {
        deque.push_front(elem).unwrap();
        vec_deque.push_front(elem);
      }
      Op::ShrinkToFit => deque.shrink_to_fit().unwrap(),
    }
    assert_eq!(deque.len(), vec_deque.len());
    assert!(deque.len() <= deque.capacity());
    assert!(deque.iter().eq(vec_deque.iter()));
    assert_eq!(deque.front().ok(), vec_deque.front());
    assert_eq!(deque.back().ok(), vec_deque.back());
  }
});
