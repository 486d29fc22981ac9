use crate::collection::CircularDeque;
use alloc::collections::VecDeque;

#[kani::proof]
#[kani::unwind(10)]
fn queue() {
  let bytes = kani::vec::any_vec::<u8, 8>();
  let mut queue = CircularDeque::new();
  let mut vec_deque = VecDeque::new();

  for byte in bytes.iter().copied() {
    queue.push_front(byte).unwrap();
    vec_deque.push_front(byte);
  }
  assert_eq!(queue.len(), vec_deque.len());
  for _ in 0..(bytes.len() / 2) {
    assert!(queue.iter().eq(vec_deque.iter()));
    assert_eq!(queue.get(0), vec_deque.get(0));
    assert_eq!(queue.get_mut(0), vec_deque.get_mut(0));
    assert_eq!(queue.pop_back().ok(), vec_deque.pop_back());
    assert!(queue.iter().eq(vec_deque.iter()));
    assert_eq!(queue.back().ok(), vec_deque.back());
    assert_eq!(queue.pop_front().ok(), vec_deque.pop_front());
  }
  loop {
    if queue.is_empty() {
      break;
    }
    assert!(queue.iter().eq(vec_deque.iter()));
    assert_eq!(queue.pop_back().ok(), vec_deque.pop_back());
    if queue.is_empty() {
      break;
    }
    assert_eq!(queue.front().ok(), vec_deque.front());
    assert_eq!(queue.pop_front().ok(), vec_deque.pop_front());
  }
  assert_eq!((queue.len(), vec_deque.len()), (0, 0));
  assert_eq!(queue.capacity(), 1);
}
