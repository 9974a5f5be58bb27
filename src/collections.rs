//! Minimal LIFO and FIFO containers.
//!
//! `Stack` holds operators while an expression is reordered and partial
//! results while postfix is evaluated. `Queue` holds the postfix output
//! of the converter. Both are thin wrappers over `Vec` / `VecDeque` that
//! return `Option` instead of panicking when empty.

use std::collections::VecDeque;

/// A last-in-first-out container.
///
/// # Examples
///
/// ```rust
/// use zzroll::collections::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(stack.peek(), Some(&2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Place an item on top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the top item, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Look at the top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of items on the stack.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate from the bottom of the stack to the top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A first-in-first-out container.
///
/// # Examples
///
/// ```rust
/// use zzroll::collections::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue("a");
/// queue.enqueue("b");
/// assert_eq!(queue.first(), Some(&"a"));
/// assert_eq!(queue.dequeue(), Some("a"));
/// assert_eq!(queue.size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an item at the back of the queue.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the front item, or `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Look at the front item without removing it.
    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of items in the queue.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate from front to back.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
