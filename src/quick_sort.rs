//! Tuned quicksort of positions, adapted from Jon L. Bentley and M. Douglas McIlroy,
//! ["Engineering a Sort Function"][paper], Software: Practice and Experience 23(11), 1993.
//!
//! [paper]: https://doi.org/10.1002/spe.4380231105

use crate::{generic_sort::SortTarget, heap_sort::heap_sort, insertion_sort::insertion_sort};
use core::{
	cmp::{
		self,
		Ordering::{Equal, Greater, Less},
	},
	ops::Range,
};

/// Ranges shorter than this get sorted using insertion sort.
const SMALL: usize = 7;
/// Ranges longer than this choose their pivot as pseudo-median of nine.
const MEDIUM: usize = 40;

/// Sorts the positions in `range`, which is *O*(*n* \* log(*n*)) worst-case.
pub fn quick_sort<T>(range: Range<usize>, target: &mut T)
where
	T: SortTarget + ?Sized,
{
	let len = range.end.saturating_sub(range.start);

	// Limit the number of imbalanced partitions to `floor(log2(len)) + 1`.
	let limit = usize::BITS - len.leading_zeros();

	recurse(range.start, len, target, limit);
}

/// Sorts `len` positions starting at `off` recursively.
///
/// `limit` is the number of allowed imbalanced partitions before switching to `heap_sort`. If zero,
/// this function will immediately switch to heapsort.
fn recurse<T>(mut off: usize, mut len: usize, target: &mut T, mut limit: u32)
where
	T: SortTarget + ?Sized,
{
	loop {
		if len < SMALL {
			insertion_sort(off..off + len, target);
			return;
		}

		// If too many bad pivot choices were made, simply fall back to heapsort in order to
		// guarantee `O(n * log(n))` worst-case.
		if limit == 0 {
			heap_sort(off..off + len, target);
			return;
		}

		// The pivot is a position. Every swap moving it has to move `m` along.
		let mut m = choose_pivot(off, len, target);

		// Establish invariant `=* <* >* =*` on `off..a`, `a..b`, `c..d`, and `d..off + len`.
		// Both `c` and `d` are exclusive.
		let (mut a, mut b) = (off, off);
		let (mut c, mut d) = (off + len, off + len);
		loop {
			while b < c {
				match target.compare(b, m) {
					Greater => break,
					Equal => {
						if a == m {
							m = b;
						} else if b == m {
							m = a;
						}
						target.swap(a, b);
						a += 1;
					}
					Less => {}
				}
				b += 1;
			}
			while c > b {
				match target.compare(c - 1, m) {
					Less => break,
					Equal => {
						if c - 1 == m {
							m = d - 1;
						} else if d - 1 == m {
							m = c - 1;
						}
						target.swap(c - 1, d - 1);
						d -= 1;
					}
					Greater => {}
				}
				c -= 1;
			}
			if b >= c {
				break;
			}
			if b == m {
				m = c - 1;
			} else if c - 1 == m {
				m = b;
			}
			target.swap(b, c - 1);
			b += 1;
			c -= 1;
		}

		// Swap the runs equal to the pivot back to the middle.
		let end = off + len;
		let s = cmp::min(a - off, b - a);
		swap_runs(target, off, b - s, s);
		let s = cmp::min(d - c, end - d);
		swap_runs(target, b, end - s, s);

		let left = b - a;
		let right = d - c;
		// An empty side counts as imbalanced, so every iteration either shrinks `len` or `limit`.
		if cmp::min(left, right) < cmp::max(len / 8, 1) {
			limit -= 1;
		}

		// Recurse into the shorter side only in order to minimize the total number of recursive
		// calls and consume less stack space. Then just continue with the longer side (this is
		// akin to tail recursion).
		if left < right {
			if left > 1 {
				recurse(off, left, target, limit);
			}
			off = end - right;
			len = right;
		} else {
			if right > 1 {
				recurse(end - right, right, target, limit);
			}
			len = left;
		}
	}
}

/// Chooses the middle position for short ranges, the median of three for medium ranges, and the
/// pseudo-median of nine (Tukey's ninther) for long ranges.
fn choose_pivot<T>(off: usize, len: usize, target: &mut T) -> usize
where
	T: SortTarget + ?Sized,
{
	let mut m = off + len / 2;
	if len > SMALL {
		let mut l = off;
		let mut n = off + len - 1;
		if len > MEDIUM {
			let s = len / 8;
			l = median_of_three(target, l, l + s, l + 2 * s);
			m = median_of_three(target, m - s, m, m + s);
			n = median_of_three(target, n - 2 * s, n - s, n);
		}
		m = median_of_three(target, l, m, n);
	}
	m
}

/// Returns the position of the median of the three positions.
fn median_of_three<T>(target: &mut T, a: usize, b: usize, c: usize) -> usize
where
	T: SortTarget + ?Sized,
{
	if target.compare(a, b) == Less {
		if target.compare(b, c) == Less {
			b
		} else if target.compare(a, c) == Less {
			c
		} else {
			a
		}
	} else if target.compare(b, c) == Greater {
		b
	} else if target.compare(a, c) == Greater {
		c
	} else {
		a
	}
}

/// Swaps the `n` positions starting at `a` with the `n` positions starting at `b`.
fn swap_runs<T>(target: &mut T, a: usize, b: usize, n: usize)
where
	T: SortTarget + ?Sized,
{
	for i in 0..n {
		target.swap(a + i, b + i);
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::quick_sort;
	use crate::generic_sort::SortTarget;
	use core::cmp::Ordering::{self, Equal, Greater, Less};
	use ndarray::{Array1, ArrayViewMut1};
	use quickcheck_macros::quickcheck;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	struct Counting<'a> {
		v: ArrayViewMut1<'a, u32>,
		compares: usize,
	}

	impl SortTarget for Counting<'_> {
		fn compare(&mut self, a: usize, b: usize) -> Ordering {
			self.compares += 1;
			self.v[a].cmp(&self.v[b])
		}
		fn swap(&mut self, a: usize, b: usize) {
			self.v.swap(a, b);
		}
	}

	struct Inconsistent<'a, F> {
		v: ArrayViewMut1<'a, u32>,
		order: F,
	}

	impl<F> SortTarget for Inconsistent<'_, F>
	where
		F: FnMut(u32, u32) -> Ordering,
	{
		fn compare(&mut self, a: usize, b: usize) -> Ordering {
			(self.order)(self.v[a], self.v[b])
		}
		fn swap(&mut self, a: usize, b: usize) {
			self.v.swap(a, b);
		}
	}

	fn permuted<F>(xs: &[u32], order: F)
	where
		F: FnMut(u32, u32) -> Ordering,
	{
		let mut array = Array1::from_vec(xs.to_vec());
		let len = array.len();
		quick_sort(0..len, &mut Inconsistent {
			v: array.view_mut(),
			order,
		});
		let mut sorted = array.to_vec();
		sorted.sort_unstable();
		let mut expected = xs.to_vec();
		expected.sort_unstable();
		assert_eq!(sorted, expected);
	}

	#[test]
	fn inconsistent_order_terminates() {
		let mut rng = StdRng::seed_from_u64(0x5eed);
		for len in [7, 8, 41, 500] {
			let equal = vec![5; len];
			let mixed = (0..len).map(|_| rng.random_range(0..5)).collect::<Vec<u32>>();
			for xs in [&equal, &mixed] {
				permuted(xs, |_, _| Less);
				permuted(xs, |_, _| Greater);
				permuted(xs, |a, b| if a < b { Less } else { Greater });
				permuted(xs, |a, b| if a <= b { Less } else { Greater });
				permuted(xs, |_, _| [Less, Equal, Greater][rng.random_range(0..3)]);
			}
		}
	}

	fn sort(array: &mut Array1<u32>) -> usize {
		let len = array.len();
		let mut target = Counting {
			v: array.view_mut(),
			compares: 0,
		};
		quick_sort(0..len, &mut target);
		target.compares
	}

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let sorted = Array1::from_vec(sorted);
		let mut array = Array1::from_vec(xs);
		sort(&mut array);
		assert_eq!(array, sorted);
	}

	#[quickcheck]
	fn sorted_few_distinct(xs: Vec<u8>) {
		let xs = xs.into_iter().map(|x| u32::from(x % 4)).collect::<Vec<_>>();
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let sorted = Array1::from_vec(sorted);
		let mut array = Array1::from_vec(xs);
		sort(&mut array);
		assert_eq!(array, sorted);
	}

	#[test]
	fn all_equal_is_linear() {
		let len = 10_000;
		let mut array = Array1::from_elem(len, 7);
		let compares = sort(&mut array);
		assert!(compares < 4 * len);
	}

	#[test]
	fn patterns() {
		let len = 5_000u32;
		let ascending = (0..len).collect::<Vec<_>>();
		let descending = (0..len).rev().collect::<Vec<_>>();
		let organ_pipe = (0..len / 2).chain((0..len / 2).rev()).collect::<Vec<_>>();
		let saw = (0..len).map(|i| i % 64).collect::<Vec<_>>();
		for xs in [ascending, descending, organ_pipe, saw] {
			let mut sorted = xs.clone();
			sorted.sort_unstable();
			let mut array = Array1::from_vec(xs);
			sort(&mut array);
			assert_eq!(array.to_vec(), sorted);
		}
	}
}
