//! In-place [sorting] of logical positions and multi-way [partitioning] by splitters for
//! non-contiguous (sub)views into *n*-dimensional arrays.
//!
//! The [index sorter](generic_sort()) orders positions through a caller-supplied comparator and
//! swapper without ever touching the data itself. Hence, one invocation reorders any number of
//! logically parallel structures, e.g., several columns, whole matrix rows, or fields of records.
//!
//! The [partitioner](partition()) classifies the elements of an array into the intervals
//! `(-inf, s[0]), [s[0], s[1]), ..., [s[k - 1], +inf)` defined by `k` ascending splitters without
//! fully sorting them, optionally moving up to two synchronized arrays along.
//!
//! # Example
//!
//! ```
//! use ndarray_partition::{ndarray::{arr1, arr2}, Partition1Ext, Sort2Ext};
//!
//! // Histogram-like bucketing of a non-contiguous column.
//! let mut v = arr2(&[[ 7, 0],
//!                    [ 4, 1],
//!                    [50, 2],
//!                    [ 6, 3]]);
//! let mut column = v.column_mut(0);
//! assert_eq!(column.as_slice_mut(), None);
//!
//! let split_points = column.partition_at_splitters(&arr1(&[5, 10, 30]))?;
//! assert_eq!(split_points, arr1(&[1, 3, 3]));
//! assert_eq!(v[(0, 0)], 4);
//! assert_eq!(v[(3, 0)], 50);
//!
//! // Only the column got partitioned. Now, whole rows ordered by the first column.
//! v.sort_rows_by_column(0)?;
//! assert_eq!(v, arr2(&[[4, 0], [6, 2], [7, 1], [50, 3]]));
//! # Ok::<(), ndarray_partition::Error>(())
//! ```
//!
//! # Current Implementation
//!
//! Complexities where *n* is the length of the (sub)view and *k* the count of splitters.
//!
//! | Resource | Complexity | Sorting (unstable) | Partitioning (unstable) |
//! |----------|------------|--------------------|-------------------------|
//! | Time     | Best       | *O*(*n*)           | *O*(*n*)                |
//! | Time     | Average    | *O*(*n* log *n*)   | *O*(*n* log *k*)        |
//! | Time     | Worst      | *O*(*n* log *n*)   | *O*(*n* log *k*)        |
//! | Space    | Worst      | *O*(log *n*)       | *O*(log *k*)            |
//!
//! [sorting]: https://en.wikipedia.org/wiki/Sorting_algorithm
//! [partitioning]: https://en.wikipedia.org/wiki/Bucket_sort
//!
//! # Features
//!
//!   * `alloc` for the allocating conveniences returning split points or permutations. Enabled by
//!     `std`.
//!   * `std` for `std::error::Error`. Enabled by `default`.
//!   * `stacker` for growing the stack on demand while partitioning. Enabled by `default`.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod generic_sort;
mod heap_sort;
mod insertion_sort;
mod partition;
mod quick_sort;

pub use crate::{
	error::{Error, Result},
	generic_sort::{SortTarget, generic_sort, generic_sort_by, generic_sort_with},
	partition::{
		Partitionable, dual_partition, dual_partition_at, is_partitioned, is_partitioned_by,
		partition, partition_at, partition_by, partition_target, partition_target_at,
		split_ranges, triple_partition, triple_partition_at, validate_splitters,
	},
};
#[cfg(feature = "alloc")]
pub use generic_sort::sorted_permutation;

use crate::partition::split_at;
use core::cmp::Ordering;
use ndarray::{ArrayBase, ArrayView1, ArrayViewMut2, Data, DataMut, Ix1, Ix2, Zip, s};
#[cfg(feature = "alloc")]
use ndarray::Array1;

pub use ndarray;

/// Extension trait for 1-dimensional [`ArrayBase<S, Ix1>`](`ArrayBase`) array or (sub)view with
/// arbitrary memory layout (e.g., non-contiguous) providing [partitioning] by splitters and
/// sorting by swaps.
///
/// [partitioning]: https://en.wikipedia.org/wiki/Bucket_sort
pub trait Partition1Ext<A, S>
where
	S: Data<Elem = A>,
{
	/// Partitions the whole array by all `splitters` and returns the split points.
	///
	/// Split point `j` is the exclusive end of the elements less than `splitters[j]`, see
	/// [`partition`](partition()) for the full contract. This is *O*(*n* log(*k* + 1)) and
	/// allocates the returned split points only.
	///
	/// # Errors
	///
	/// In debug builds, returns [`Error::UnsortedSplitters`] if `splitters` is not strictly
	/// ascending.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr1, Partition1Ext};
	///
	/// let mut v = arr1(&[7, 4, 5, 50, 6, 4, 3, 6]);
	///
	/// let split_points = v.partition_at_splitters(&arr1(&[5, 10, 30]))?;
	/// assert_eq!(split_points, arr1(&[3, 7, 7]));
	/// assert!(v.is_partitioned_at(&arr1(&[5, 10, 30]), &split_points));
	/// # Ok::<(), ndarray_partition::Error>(())
	/// ```
	#[cfg(feature = "alloc")]
	fn partition_at_splitters<S2>(
		&mut self,
		splitters: &ArrayBase<S2, Ix1>,
	) -> Result<Array1<usize>>
	where
		A: PartialOrd,
		S: DataMut,
		S2: Data<Elem = A>;
	/// Partitions the whole array by all `splitters` with a predicate deciding whether an element
	/// is less than a splitter and returns the split points.
	///
	/// `is_less` must define a strict weak ordering.
	///
	/// # Errors
	///
	/// Same as [`partition_at_splitters`](Partition1Ext::partition_at_splitters).
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr1, Partition1Ext};
	///
	/// let mut v = arr1(&[1.5, -0.5, 3.0, f64::NAN]);
	///
	/// let split_points =
	/// 	v.partition_at_splitters_by(&arr1(&[0.0, 2.0]), |a, b| a.total_cmp(b).is_lt())?;
	/// assert_eq!(split_points, arr1(&[1, 2]));
	/// assert_eq!(v[0], -0.5);
	/// assert_eq!(v[1], 1.5);
	/// # Ok::<(), ndarray_partition::Error>(())
	/// ```
	#[cfg(feature = "alloc")]
	fn partition_at_splitters_by<S2, F>(
		&mut self,
		splitters: &ArrayBase<S2, Ix1>,
		is_less: F,
	) -> Result<Array1<usize>>
	where
		F: FnMut(&A, &A) -> bool,
		S: DataMut,
		S2: Data<Elem = A>;
	/// Moves all elements less than `splitter` to the front and returns their count.
	///
	/// This is *O*(*n*) and does not allocate.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr1, Partition1Ext};
	///
	/// let mut v = arr1(&[7, 4, 5, 50, 6, 4, 3, 6]);
	///
	/// let split = v.partition_at_splitter(&5);
	/// assert_eq!(split, 3);
	/// assert!(v.iter().take(split).all(|&x| x < 5));
	/// assert!(v.iter().skip(split).all(|&x| x >= 5));
	/// ```
	fn partition_at_splitter(&mut self, splitter: &A) -> usize
	where
		A: PartialOrd,
		S: DataMut;
	/// Checks if the array is partitioned by `splitters` at `split_points`.
	///
	/// Returns `false` if the split points are not ascending within the array, if any element lies
	/// outside of its interval, or if the arguments are of inconsistent lengths.
	#[must_use]
	fn is_partitioned_at<S2, S3>(
		&self,
		splitters: &ArrayBase<S2, Ix1>,
		split_points: &ArrayBase<S3, Ix1>,
	) -> bool
	where
		A: PartialOrd,
		S2: Data<Elem = A>,
		S3: Data<Elem = usize>;

	/// Sorts the array by swapping elements, but might not preserve the order of equal elements.
	///
	/// This sort is unstable (i.e., may reorder equal elements), in-place
	/// (i.e., does not allocate), and *O*(*n* log *n*) worst-case.
	///
	/// # Current Implementation
	///
	/// The current algorithm is the tuned quicksort of Bentley and McIlroy operating on positions
	/// only, see [`generic_sort`](generic_sort()). It falls back to heapsort after too many
	/// imbalanced partitions.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr1, Partition1Ext};
	///
	/// let mut v = arr1(&[-5, 4, 1, -3, 2]);
	///
	/// v.sort_unstable_by_swaps();
	/// assert!(v == arr1(&[-5, -3, 1, 2, 4]));
	/// ```
	fn sort_unstable_by_swaps(&mut self)
	where
		A: Ord,
		S: DataMut;
	/// Sorts the array by swapping elements with a comparator function, but might not preserve
	/// the order of equal elements.
	///
	/// The comparator function must define a strict weak ordering. If it doesn't, the order of
	/// the elements is unspecified, but they remain a permutation of the original ones.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr1, Partition1Ext};
	///
	/// let mut floats = arr1(&[5f64, 4.0, 1.0, 3.0, 2.0]);
	/// floats.sort_unstable_by_swaps_by(|a, b| b.total_cmp(a));
	/// assert_eq!(floats, arr1(&[5.0, 4.0, 3.0, 2.0, 1.0]));
	/// ```
	fn sort_unstable_by_swaps_by<F>(&mut self, compare: F)
	where
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut;
}

impl<A, S> Partition1Ext<A, S> for ArrayBase<S, Ix1>
where
	S: Data<Elem = A>,
{
	#[cfg(feature = "alloc")]
	#[inline]
	fn partition_at_splitters<S2>(
		&mut self,
		splitters: &ArrayBase<S2, Ix1>,
	) -> Result<Array1<usize>>
	where
		A: PartialOrd,
		S: DataMut,
		S2: Data<Elem = A>,
	{
		self.partition_at_splitters_by(splitters, A::lt)
	}
	#[cfg(feature = "alloc")]
	fn partition_at_splitters_by<S2, F>(
		&mut self,
		splitters: &ArrayBase<S2, Ix1>,
		is_less: F,
	) -> Result<Array1<usize>>
	where
		F: FnMut(&A, &A) -> bool,
		S: DataMut,
		S2: Data<Elem = A>,
	{
		let len = self.len();
		let mut split_points = Array1::zeros(splitters.len());
		partition_by(
			self.view_mut(),
			0..len,
			splitters.view(),
			0..splitters.len(),
			split_points.view_mut(),
			is_less,
		)?;
		Ok(split_points)
	}
	#[inline]
	fn partition_at_splitter(&mut self, splitter: &A) -> usize
	where
		A: PartialOrd,
		S: DataMut,
	{
		let len = self.len();
		split_at(&mut self.view_mut(), 0, len, splitter, &mut A::lt)
	}
	#[inline]
	fn is_partitioned_at<S2, S3>(
		&self,
		splitters: &ArrayBase<S2, Ix1>,
		split_points: &ArrayBase<S3, Ix1>,
	) -> bool
	where
		A: PartialOrd,
		S2: Data<Elem = A>,
		S3: Data<Elem = usize>,
	{
		splitters.len() == split_points.len()
			&& is_partitioned(
				self.view(),
				0..self.len(),
				splitters.view(),
				0..splitters.len(),
				split_points.view(),
			)
	}

	#[inline]
	fn sort_unstable_by_swaps(&mut self)
	where
		A: Ord,
		S: DataMut,
	{
		self.sort_unstable_by_swaps_by(A::cmp);
	}
	#[inline]
	fn sort_unstable_by_swaps_by<F>(&mut self, mut compare: F)
	where
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut,
	{
		let len = self.len();
		generic_sort_with(
			0..len,
			&mut self.view_mut(),
			|v, a, b| compare(&v[a], &v[b]),
			|v, a, b| v.swap(a, b),
		);
	}
}

/// Extension trait for 2-dimensional [`ArrayBase<S, Ix2>`](`ArrayBase`) array or (sub)view with
/// arbitrary memory layout (e.g., non-contiguous) reordering whole rows.
///
/// Columns are sorted the same way by sorting the rows of
/// [`reversed_axes`](ArrayBase::reversed_axes) or [`t`](ArrayBase::t) views.
pub trait Sort2Ext<A, S>
where
	S: Data<Elem = A>,
{
	/// Sorts the rows by their elements in `column`, but might not preserve the order of equal
	/// rows.
	///
	/// Whole rows are swapped in place. This is *O*(*mn* log *m*) worst-case for *m* rows of *n*
	/// columns.
	///
	/// # Errors
	///
	/// Returns [`Error::ColumnOutOfBounds`] if `column` is not less than the number of columns.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr2, Sort2Ext};
	///
	/// let mut m = arr2(&[[7, 6], [5, 4], [3, 2], [1, 0]]);
	///
	/// m.sort_rows_by_column(0)?;
	/// assert_eq!(m, arr2(&[[1, 0], [3, 2], [5, 4], [7, 6]]));
	/// # Ok::<(), ndarray_partition::Error>(())
	/// ```
	fn sort_rows_by_column(&mut self, column: usize) -> Result<()>
	where
		A: Ord,
		S: DataMut;
	/// Sorts the rows with a comparator function of two rows, but might not preserve the order of
	/// equal rows.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::arr2, Sort2Ext};
	///
	/// let mut m = arr2(&[[6, 3, 5], [7, 2, 4], [8, 1, 4], [9, 3, 1]]);
	///
	/// // By second column, then by third column.
	/// m.sort_rows_by(|a, b| a[1].cmp(&b[1]).then(a[2].cmp(&b[2])));
	/// assert_eq!(m.column(0), ndarray::arr1(&[8, 7, 9, 6]));
	/// ```
	fn sort_rows_by<F>(&mut self, compare: F)
	where
		F: FnMut(ArrayView1<'_, A>, ArrayView1<'_, A>) -> Ordering,
		S: DataMut;
	/// Returns the permutation of row indices sorting the rows by their elements in `column`.
	///
	/// The array is left untouched. The permutation can be applied with
	/// [`select`](ArrayBase::select) along `Axis(0)`.
	///
	/// # Errors
	///
	/// Returns [`Error::ColumnOutOfBounds`] if `column` is not less than the number of columns.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_partition::{ndarray::{arr2, Axis}, Sort2Ext};
	///
	/// let m = arr2(&[[7, 6], [5, 4], [3, 2], [1, 0]]);
	///
	/// let p = m.row_permutation_by_column(1)?;
	/// assert_eq!(p, [3, 2, 1, 0]);
	/// assert_eq!(m.select(Axis(0), &p), arr2(&[[1, 0], [3, 2], [5, 4], [7, 6]]));
	/// # Ok::<(), ndarray_partition::Error>(())
	/// ```
	#[cfg(feature = "alloc")]
	fn row_permutation_by_column(&self, column: usize) -> Result<alloc::vec::Vec<usize>>
	where
		A: Ord;
}

impl<A, S> Sort2Ext<A, S> for ArrayBase<S, Ix2>
where
	S: Data<Elem = A>,
{
	fn sort_rows_by_column(&mut self, column: usize) -> Result<()>
	where
		A: Ord,
		S: DataMut,
	{
		check_column(column, self.ncols())?;
		self.sort_rows_by(|a, b| a[column].cmp(&b[column]));
		Ok(())
	}
	fn sort_rows_by<F>(&mut self, mut compare: F)
	where
		F: FnMut(ArrayView1<'_, A>, ArrayView1<'_, A>) -> Ordering,
		S: DataMut,
	{
		let rows = self.nrows();
		generic_sort_with(
			0..rows,
			&mut self.view_mut(),
			|m, a, b| compare(m.row(a), m.row(b)),
			|m, a, b| swap_rows(m, a, b),
		);
	}
	#[cfg(feature = "alloc")]
	fn row_permutation_by_column(&self, column: usize) -> Result<alloc::vec::Vec<usize>>
	where
		A: Ord,
	{
		check_column(column, self.ncols())?;
		Ok(sorted_permutation(self.nrows(), |a, b| {
			self[(a, column)].cmp(&self[(b, column)])
		}))
	}
}

fn check_column(column: usize, columns: usize) -> Result<()> {
	if column < columns {
		Ok(())
	} else {
		Err(Error::ColumnOutOfBounds { column, columns })
	}
}

fn swap_rows<A>(m: &mut ArrayViewMut2<'_, A>, a: usize, b: usize) {
	if a != b {
		let (x, y) = m.multi_slice_mut((s![a, ..], s![b, ..]));
		Zip::from(x).and(y).for_each(|x, y| core::mem::swap(x, y));
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{Error, Partition1Ext, Sort2Ext};
	use ndarray::{Array1, Array2, Axis, arr1, arr2};
	use quickcheck_macros::quickcheck;

	#[test]
	fn rows_by_column() {
		let mut m = arr2(&[[7, 6], [5, 4], [3, 2], [1, 0]]);
		m.sort_rows_by_column(0).unwrap();
		assert_eq!(m, arr2(&[[1, 0], [3, 2], [5, 4], [7, 6]]));
		assert_eq!(
			m.sort_rows_by_column(2),
			Err(Error::ColumnOutOfBounds {
				column: 2,
				columns: 2
			})
		);
	}

	#[test]
	fn columns_by_row() {
		let mut m = arr2(&[[3, 1, 2], [30, 10, 20]]);
		m.view_mut().reversed_axes().sort_rows_by_column(0).unwrap();
		assert_eq!(m, arr2(&[[1, 2, 3], [10, 20, 30]]));
	}

	#[test]
	fn non_contiguous_column() {
		let mut m = arr2(&[[7, 0], [4, 1], [5, 2], [50, 3], [6, 4]]);
		let mut column = m.column_mut(0);
		let split = column.partition_at_splitter(&6);
		assert_eq!(split, 2);
		assert!(column.iter().take(2).all(|&x| x < 6));
		column.sort_unstable_by_swaps();
		assert_eq!(m.column(0), arr1(&[4, 5, 6, 7, 50]));
		assert_eq!(m.column(1), arr1(&[0, 1, 2, 3, 4]));
	}

	#[quickcheck]
	fn rows_stay_intact(xs: Vec<(u8, u16)>) {
		let mut m = Array2::from_shape_fn((xs.len(), 2), |(i, j)| match j {
			0 => u32::from(xs[i].0),
			_ => u32::from(xs[i].1),
		});
		let p = m.row_permutation_by_column(0).unwrap();
		let selected = m.select(Axis(0), &p);
		m.sort_rows_by_column(0).unwrap();
		for (row, &i) in m.rows().into_iter().zip(&p) {
			assert!(xs.contains(&(row[0] as u8, row[1] as u16)));
			assert_eq!(row[0], u32::from(xs[i].0));
		}
		assert_eq!(m.column(0), selected.column(0));
		for i in 1..m.nrows() {
			assert!(m[(i - 1, 0)] <= m[(i, 0)]);
		}
	}

	#[quickcheck]
	fn sorted_by_swaps(xs: Vec<i64>) {
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let mut v = Array1::from_vec(xs);
		v.sort_unstable_by_swaps();
		assert_eq!(v.to_vec(), sorted);
	}

	#[quickcheck]
	fn partitioned_at_splitters(xs: Vec<i32>, mut splitters: Vec<i32>) {
		splitters.sort_unstable();
		splitters.dedup();
		let splitters = Array1::from_vec(splitters);
		let mut v = Array1::from_vec(xs);
		let split_points = v.partition_at_splitters(&splitters).unwrap();
		assert!(v.is_partitioned_at(&splitters, &split_points));
	}
}
