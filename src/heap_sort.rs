//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use crate::generic_sort::SortTarget;
use core::{cmp::Ordering::Less, ops::Range};

/// Sorts the positions in `range` using heapsort, which guarantees *O*(*n* \* log(*n*))
/// worst-case.
#[cold]
pub fn heap_sort<T>(range: Range<usize>, target: &mut T)
where
	T: SortTarget + ?Sized,
{
	let off = range.start;
	let len = range.end.saturating_sub(off);

	// This binary heap respects the invariant `parent >= child`.
	let sift_down = |target: &mut T, len: usize, mut node: usize| {
		loop {
			// Children of `node`.
			let mut child = 2 * node + 1;
			if child >= len {
				break;
			}

			// Choose the greater child.
			if child + 1 < len && target.compare(off + child, off + child + 1) == Less {
				child += 1;
			}

			// Stop if the invariant holds at `node`.
			if target.compare(off + node, off + child) != Less {
				break;
			}

			// Swap `node` with the greater child, move one step down, and continue sifting.
			target.swap(off + node, off + child);
			node = child;
		}
	};

	// Build the heap in linear time.
	for i in (0..len / 2).rev() {
		sift_down(target, len, i);
	}

	// Pop maximal elements from the heap.
	for i in (1..len).rev() {
		target.swap(off, off + i);
		sift_down(target, i, 0);
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::heap_sort;
	use crate::generic_sort::SortTarget;
	use core::cmp::Ordering;
	use quickcheck_macros::quickcheck;

	impl SortTarget for Vec<i64> {
		fn compare(&mut self, a: usize, b: usize) -> Ordering {
			self[a].cmp(&self[b])
		}
		fn swap(&mut self, a: usize, b: usize) {
			<[i64]>::swap(self, a, b);
		}
	}

	#[quickcheck]
	fn sorted(xs: Vec<i64>, skip: usize) {
		let skip = skip % (xs.len() + 1);
		let mut sorted = xs.clone();
		sorted[skip..].sort_unstable();
		let mut array = xs;
		let len = array.len();
		heap_sort(skip..len, &mut array);
		assert_eq!(array, sorted);
	}
}
