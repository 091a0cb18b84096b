/*!
A max-heap on some subset of elements with fixed indices.

In other words, a heap backed by a vector of values with a companion vector which tracks the
current location of each index on the heap.
The backing vector stays constant, allowing the heap to act as a store of values for elements
which may move on and off the heap.

[IndexHeap] is used as a store of variable activities: any decision-eligible variable without a
value is *active* on the heap, and the most active variable is at the root.

```rust
# use marten_sat::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.reserve(600);
heap.set_value(600, 1.0);
heap.set_value(0, 7.0);

heap.activate(600);
heap.activate(0);

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```
*/

use crate::config::Activity;

/// The index heap struct.
#[derive(Default)]
pub struct IndexHeap {
    /// A value for every index, on the heap or not.
    values: Vec<Activity>,

    /// Where, if anywhere, an index sits on the heap.
    position: Vec<Option<usize>>,

    /// The heap itself, as indices into `values`.
    heap: Vec<usize>,
}

impl IndexHeap {
    /// Grows the backing store so `index` is valid, with default values for fresh indices.
    pub fn reserve(&mut self, index: usize) {
        if self.values.len() <= index {
            self.values.resize(index + 1, Activity::default());
            self.position.resize(index + 1, None);
        }
    }

    /// The value stored for `index`.
    pub fn value(&self, index: usize) -> Activity {
        self.values[index]
    }

    /// Sets the value stored for `index` without adjusting the heap.
    ///
    /// If `index` is active, [heapify_if_active](IndexHeap::heapify_if_active) restores order.
    pub fn set_value(&mut self, index: usize, value: Activity) {
        self.reserve(index);
        self.values[index] = value;
    }

    /// Applies `f` to every stored value without adjusting the heap.
    ///
    /// Safe for order-preserving maps, such as a uniform rescale.
    pub fn scale_all(&mut self, factor: Activity) {
        for value in self.values.iter_mut() {
            *value *= factor;
        }
    }

    /// True if `index` is on the heap, false otherwise.
    pub fn active(&self, index: usize) -> bool {
        self.position.get(index).is_some_and(|p| p.is_some())
    }

    /// Places `index` on the heap, if absent.
    pub fn activate(&mut self, index: usize) {
        self.reserve(index);
        if self.position[index].is_none() {
            let slot = self.heap.len();
            self.heap.push(index);
            self.position[index] = Some(slot);
            self.sift_up(slot);
        }
    }

    /// Restores heap order around `index`, if `index` is on the heap.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(slot) = self.position[index] {
            self.sift_up(slot);
            if let Some(slot) = self.position[index] {
                self.sift_down(slot);
            }
        }
    }

    /// Removes and returns the index with the maximum value, if any.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = *self.heap.first()?;
        let last = self.heap.pop().expect("non-empty heap");
        self.position[max] = None;
        if max != last {
            self.heap[0] = last;
            self.position[last] = Some(0);
            self.sift_down(0);
        }
        Some(max)
    }

    /// A count of active indices.
    pub fn active_count(&self) -> usize {
        self.heap.len()
    }

    /// The active index at heap slot `slot`, for random access.
    pub fn active_at(&self, slot: usize) -> usize {
        self.heap[slot]
    }

    /// Deactivates every index, leaving values in place.
    pub fn clear_active(&mut self) {
        for &index in &self.heap {
            self.position[index] = None;
        }
        self.heap.clear();
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.values[self.heap[parent]] >= self.values[self.heap[slot]] {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let mut largest = slot;
            if self.values[self.heap[left]] > self.values[self.heap[largest]] {
                largest = left;
            }
            if right < self.heap.len() && self.values[self.heap[right]] > self.values[self.heap[largest]] {
                largest = right;
            }
            if largest == slot {
                break;
            }
            self.swap_slots(slot, largest);
            slot = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_of(pairs: &[(usize, Activity)]) -> IndexHeap {
        let mut heap = IndexHeap::default();
        for &(index, value) in pairs {
            heap.set_value(index, value);
            heap.activate(index);
        }
        heap
    }

    #[test]
    fn heap_simple() {
        let mut heap = heap_of(&[(6, 1.0), (5, 2.0), (4, 3.0), (1, 6.0), (0, 7.0)]);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_update() {
        let mut heap = heap_of(&[(6, 1.0), (4, 3.0), (1, 6.0), (0, 7.0)]);

        for index in [0, 1, 4, 6] {
            heap.set_value(index, index as Activity);
            heap.heapify_if_active(index);
        }

        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_sparse() {
        let mut heap = heap_of(&[(600, 1.0), (0, 7.0)]);

        assert_eq!(heap.value(5), Activity::default());
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(600));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_reactivation() {
        let mut heap = heap_of(&[(2, 2.0), (3, 3.0)]);

        assert_eq!(heap.pop_max(), Some(3));
        assert!(!heap.active(3));

        heap.activate(3);
        heap.activate(3);

        assert_eq!(heap.pop_max(), Some(3));
        assert_eq!(heap.pop_max(), Some(2));
    }
}
