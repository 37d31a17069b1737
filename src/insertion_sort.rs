//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use crate::generic_sort::SortTarget;
use core::{cmp::Ordering::Greater, ops::Range};

/// Sorts the positions in `range` using insertion sort, which is *O*(*n*^2) worst-case.
///
/// Each out-of-order position is moved towards the front by adjacent swaps.
pub fn insertion_sort<T>(range: Range<usize>, target: &mut T)
where
	T: SortTarget + ?Sized,
{
	let Range { start, end } = range;
	for i in start.saturating_add(1)..end {
		let mut j = i;
		while j > start && target.compare(j - 1, j) == Greater {
			target.swap(j, j - 1);
			j -= 1;
		}
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::insertion_sort;
	use crate::generic_sort::{SortTarget, generic_sort_with};
	use core::cmp::Ordering;
	use ndarray::{Array1, ArrayViewMut1};
	use quickcheck_macros::quickcheck;

	struct View<'a>(ArrayViewMut1<'a, u32>);

	impl SortTarget for View<'_> {
		fn compare(&mut self, a: usize, b: usize) -> Ordering {
			self.0[a].cmp(&self.0[b])
		}
		fn swap(&mut self, a: usize, b: usize) {
			self.0.swap(a, b);
		}
	}

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		let mut array = Array1::from_vec(xs);
		let len = array.len();
		insertion_sort(0..len, &mut View(array.view_mut()));
		for i in 1..array.len() {
			assert!(array[i - 1] <= array[i]);
		}
	}

	#[test]
	fn leaves_outside_untouched() {
		let mut xs = [9, 5, 3, 4, 1, 0];
		insertion_sort(1..5, &mut Recorder(&mut xs));
		assert_eq!(xs, [9, 1, 3, 4, 5, 0]);

		// Same through the public adapter.
		let mut ys = [9, 5, 3, 4, 1, 0];
		generic_sort_with(1..5, &mut ys, |v, a, b| v[a].cmp(&v[b]), |v, a, b| v.swap(a, b));
		assert_eq!(ys, [9, 1, 3, 4, 5, 0]);
	}

	struct Recorder<'a>(&'a mut [i32; 6]);

	impl SortTarget for Recorder<'_> {
		fn compare(&mut self, a: usize, b: usize) -> Ordering {
			self.0[a].cmp(&self.0[b])
		}
		fn swap(&mut self, a: usize, b: usize) {
			self.0.swap(a, b);
		}
	}
}
