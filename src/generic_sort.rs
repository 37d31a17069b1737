//! Sorting of logical positions through caller-supplied comparison and swap operations.

use crate::quick_sort::quick_sort;
use core::{cmp::Ordering, ops::Range};

/// Positions that can be compared and swapped without exposing the data behind them.
///
/// One implementation may reorder any number of logically parallel structures (e.g., several
/// arrays, rows of a matrix, or fields of records) by swapping all of them in [`swap`].
///
/// [`compare`] must define a strict weak ordering of the positions. If it doesn't, the resulting
/// order is unspecified but the result is still a permutation.
///
/// [`compare`]: SortTarget::compare
/// [`swap`]: SortTarget::swap
pub trait SortTarget {
	/// Compares the data at positions `a` and `b`.
	fn compare(&mut self, a: usize, b: usize) -> Ordering;
	/// Exchanges the data at positions `a` and `b`.
	fn swap(&mut self, a: usize, b: usize);
}

struct ByClosures<C, W> {
	compare: C,
	swap: W,
}

impl<C, W> SortTarget for ByClosures<C, W>
where
	C: FnMut(usize, usize) -> Ordering,
	W: FnMut(usize, usize),
{
	#[inline]
	fn compare(&mut self, a: usize, b: usize) -> Ordering {
		(self.compare)(a, b)
	}
	#[inline]
	fn swap(&mut self, a: usize, b: usize) {
		(self.swap)(a, b)
	}
}

struct WithData<'a, D: ?Sized, C, W> {
	data: &'a mut D,
	compare: C,
	swap: W,
}

impl<D, C, W> SortTarget for WithData<'_, D, C, W>
where
	D: ?Sized,
	C: FnMut(&D, usize, usize) -> Ordering,
	W: FnMut(&mut D, usize, usize),
{
	#[inline]
	fn compare(&mut self, a: usize, b: usize) -> Ordering {
		(self.compare)(&*self.data, a, b)
	}
	#[inline]
	fn swap(&mut self, a: usize, b: usize) {
		(self.swap)(&mut *self.data, a, b)
	}
}

/// Sorts the positions in `range` of `target` in ascending order.
///
/// Only [`SortTarget::compare`] and [`SortTarget::swap`] are invoked. An empty `range` is a
/// no-op. Upon return, `target.compare(i, j) != Greater` for all `i < j` in `range`.
///
/// This sort is unstable, in-place, and *O*(*n* log *n*) worst-case.
pub fn generic_sort<T>(range: Range<usize>, target: &mut T)
where
	T: SortTarget + ?Sized,
{
	if range.start < range.end {
		quick_sort(range, target);
	}
}

/// Sorts the positions in `range` with a comparator and a swapper closure.
///
/// Both closures usually capture shared state, e.g., via [`Cell`](core::cell::Cell) or
/// [`RefCell`](core::cell::RefCell). When they need to borrow the same data mutably and
/// immutably, use [`generic_sort_with`] instead.
///
/// # Examples
///
/// ```
/// use core::cell::RefCell;
/// use ndarray_partition::generic_sort_by;
///
/// let x = RefCell::new([3, 2, 1]);
/// let y = RefCell::new([30, 20, 10]);
///
/// generic_sort_by(
/// 	0..3,
/// 	|a, b| x.borrow()[a].cmp(&x.borrow()[b]),
/// 	|a, b| {
/// 		x.borrow_mut().swap(a, b);
/// 		y.borrow_mut().swap(a, b);
/// 	},
/// );
///
/// assert_eq!(x.into_inner(), [1, 2, 3]);
/// assert_eq!(y.into_inner(), [10, 20, 30]);
/// ```
pub fn generic_sort_by<C, W>(range: Range<usize>, compare: C, swap: W)
where
	C: FnMut(usize, usize) -> Ordering,
	W: FnMut(usize, usize),
{
	generic_sort(range, &mut ByClosures { compare, swap });
}

/// Sorts the positions in `range` of `data` with a comparator reading and a swapper mutating
/// `data`.
///
/// # Examples
///
/// ```
/// use ndarray_partition::generic_sort_with;
///
/// let mut columns = (vec![3, 2, 1], vec![30.0, 20.0, 10.0]);
///
/// generic_sort_with(
/// 	0..3,
/// 	&mut columns,
/// 	|(x, _), a, b| x[a].cmp(&x[b]),
/// 	|(x, y), a, b| {
/// 		x.swap(a, b);
/// 		y.swap(a, b);
/// 	},
/// );
///
/// assert_eq!(columns, (vec![1, 2, 3], vec![10.0, 20.0, 30.0]));
/// ```
pub fn generic_sort_with<D, C, W>(range: Range<usize>, data: &mut D, compare: C, swap: W)
where
	D: ?Sized,
	C: FnMut(&D, usize, usize) -> Ordering,
	W: FnMut(&mut D, usize, usize),
{
	generic_sort(range, &mut WithData {
		data,
		compare,
		swap,
	});
}

/// Returns the permutation `p` of `0..len` sorting the positions by `compare`.
///
/// `compare` is invoked with original positions, the underlying data is left untouched. Upon
/// return, `compare(p[i], p[i + 1]) != Greater` for all consecutive `i`. The permutation can be
/// applied with [`ArrayBase::select`](ndarray::ArrayBase::select).
///
/// # Examples
///
/// ```
/// use ndarray_partition::{ndarray::{arr1, Axis}, sorted_permutation};
///
/// let v = arr1(&[7, 1, 3, 1]);
/// let p = sorted_permutation(v.len(), |a, b| v[a].cmp(&v[b]));
///
/// assert_eq!(v.select(Axis(0), &p), arr1(&[1, 1, 3, 7]));
/// assert_eq!(v, arr1(&[7, 1, 3, 1]));
/// ```
#[cfg(feature = "alloc")]
#[must_use]
pub fn sorted_permutation<C>(len: usize, mut compare: C) -> alloc::vec::Vec<usize>
where
	C: FnMut(usize, usize) -> Ordering,
{
	let mut permutation = (0..len).collect::<alloc::vec::Vec<_>>();
	generic_sort_with(
		0..len,
		&mut permutation,
		|p, a, b| compare(p[a], p[b]),
		|p, a, b| p.swap(a, b),
	);
	permutation
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{generic_sort_by, generic_sort_with, sorted_permutation};
	use core::{cell::Cell, cmp::Ordering};
	use quickcheck_macros::quickcheck;

	#[test]
	fn parallel_arrays() {
		let mut columns = ([3, 2, 1], [30, 20, 10]);
		generic_sort_with(
			0..3,
			&mut columns,
			|(x, _), a, b| x[a].cmp(&x[b]),
			|(x, y), a, b| {
				x.swap(a, b);
				y.swap(a, b);
			},
		);
		assert_eq!(columns, ([1, 2, 3], [10, 20, 30]));
	}

	#[test]
	fn by_secondary_keys() {
		let mut columns = ([6, 7, 8, 9], [3.0, 2.0, 1.0, 3.0], [5.0, 4.0, 4.0, 1.0]);
		generic_sort_with(
			0..4,
			&mut columns,
			|(_, y, z), a, b| {
				y[a].partial_cmp(&y[b])
					.unwrap()
					.then(z[a].partial_cmp(&z[b]).unwrap())
			},
			|(x, y, z), a, b| {
				x.swap(a, b);
				y.swap(a, b);
				z.swap(a, b);
			},
		);
		assert_eq!(columns.0, [8, 7, 9, 6]);
		assert_eq!(columns.1, [1.0, 2.0, 3.0, 3.0]);
		assert_eq!(columns.2, [4.0, 4.0, 1.0, 5.0]);
	}

	#[test]
	fn empty_range() {
		let calls = Cell::new(0);
		generic_sort_by(
			5..2,
			|_, _| {
				calls.set(calls.get() + 1);
				Ordering::Equal
			},
			|_, _| calls.set(calls.get() + 1),
		);
		assert_eq!(calls.get(), 0);
	}

	#[quickcheck]
	fn sub_range(xs: Vec<i32>, from: usize, to: usize) {
		let (from, to) = match xs.len() {
			0 => (0, 0),
			len => {
				let (a, b) = (from % (len + 1), to % (len + 1));
				(a.min(b), a.max(b))
			}
		};
		let mut sorted = xs.clone();
		sorted[from..to].sort_unstable();
		let mut array = xs;
		generic_sort_with(
			from..to,
			&mut array,
			|v, a, b| v[a].cmp(&v[b]),
			|v, a, b| v.swap(a, b),
		);
		assert_eq!(array, sorted);
	}

	#[quickcheck]
	fn permutation(xs: Vec<u8>) {
		let p = sorted_permutation(xs.len(), |a, b| xs[a].cmp(&xs[b]));
		let mut seen = vec![false; xs.len()];
		for &i in &p {
			assert!(!seen[i]);
			seen[i] = true;
		}
		for w in p.windows(2) {
			assert!(xs[w[0]] <= xs[w[1]]);
		}
	}
}
