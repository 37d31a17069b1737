//! Multi-way partitioning of (synchronized) arrays into the intervals defined by splitters.
//!
//! `K` ascending and unique splitters `s` define the `K + 1` intervals
//! `(-inf, s[0]), [s[0], s[1]), ..., [s[K - 1], +inf)`. Partitioning moves the elements of each
//! interval next to each other and records the exclusive end of each interval as its split point.
//! Within an interval, elements are left in no particular order.

use crate::error::{Error, Result};
use core::{cmp, iter, ops::Range};
use ndarray::{ArrayView1, ArrayViewMut1, s};

/// Storage partitioned by the keys of its primary array.
///
/// Implemented for a single [`ArrayViewMut1`] and for pairs and triples of them, where the first
/// array is the primary one and the others are synchronized with it, i.e., every swap in the
/// primary array is applied to the other arrays at the same positions.
pub trait Partitionable {
	/// Element type of the primary array.
	type Key;

	/// Length of the primary array.
	fn len(&self) -> usize;
	/// Whether the primary array is empty.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
	/// Key at `index` of the primary array.
	fn key(&self, index: usize) -> &Self::Key;
	/// Swaps the elements at `a` and `b` in all arrays.
	fn swap(&mut self, a: usize, b: usize);
	/// Checks that the synchronized arrays have the length of the primary array.
	fn validate(&self) -> Result<()> {
		Ok(())
	}
}

impl<T> Partitionable for ArrayViewMut1<'_, T> {
	type Key = T;

	#[inline]
	fn len(&self) -> usize {
		self.len()
	}
	#[inline]
	fn key(&self, index: usize) -> &T {
		&self[index]
	}
	#[inline]
	fn swap(&mut self, a: usize, b: usize) {
		self.swap(a, b);
	}
}

impl<T, U> Partitionable for (ArrayViewMut1<'_, T>, ArrayViewMut1<'_, U>) {
	type Key = T;

	#[inline]
	fn len(&self) -> usize {
		self.0.len()
	}
	#[inline]
	fn key(&self, index: usize) -> &T {
		&self.0[index]
	}
	#[inline]
	fn swap(&mut self, a: usize, b: usize) {
		self.0.swap(a, b);
		self.1.swap(a, b);
	}
	fn validate(&self) -> Result<()> {
		same_length(self.0.len(), self.1.len())
	}
}

impl<T, U, V> Partitionable for (ArrayViewMut1<'_, T>, ArrayViewMut1<'_, U>, ArrayViewMut1<'_, V>) {
	type Key = T;

	#[inline]
	fn len(&self) -> usize {
		self.0.len()
	}
	#[inline]
	fn key(&self, index: usize) -> &T {
		&self.0[index]
	}
	#[inline]
	fn swap(&mut self, a: usize, b: usize) {
		self.0.swap(a, b);
		self.1.swap(a, b);
		self.2.swap(a, b);
	}
	fn validate(&self) -> Result<()> {
		same_length(self.0.len(), self.1.len())?;
		same_length(self.0.len(), self.2.len())
	}
}

fn same_length(expected: usize, found: usize) -> Result<()> {
	if expected == found {
		Ok(())
	} else {
		Err(Error::LengthMismatch { expected, found })
	}
}

/// Partitions `values[range]` by `splitters[split_range]`, filling `split_points[split_range]`.
///
/// Upon return, for every `j` in `split_range`, the elements at `lo..split_points[j]` satisfy
/// `splitters[j - 1] <= v < splitters[j]` where `lo` is `range.start` for the first splitter and
/// `split_points[j - 1]` otherwise. The elements at `split_points[split_range.end - 1]..range.end`
/// are not less than the last splitter. An empty interval following position `p` has split point
/// `p`, so an empty `range` sets every split point to `range.start`.
///
/// Values incomparable to the splitters (e.g., `NaN`) are never less than any splitter and end up
/// in the last interval.
///
/// The time complexity is *O*(*n* log(*k* + 1)) for *n* elements and *k* splitters. No memory is
/// allocated.
///
/// # Errors
///
/// Returns an [`Error`] if the non-empty `range` or `split_range` is out of bounds or if
/// `split_points` is shorter than `split_range.end`. In debug builds, additionally returns
/// [`Error::UnsortedSplitters`] if `splitters[split_range]` is not strictly ascending. In release
/// builds, unsorted or duplicate splitters result in an unspecified arrangement.
///
/// # Examples
///
/// ```
/// use ndarray_partition::{ndarray::{arr1, Array1}, partition};
///
/// let mut list = arr1(&[7, 4, 5, 50, 6, 4, 3, 6]);
/// let splitters = arr1(&[5, 10, 30]);
/// let mut split_points = Array1::zeros(3);
///
/// partition(list.view_mut(), 0..8, splitters.view(), 0..3, split_points.view_mut())?;
///
/// assert_eq!(split_points, arr1(&[3, 7, 7]));
/// assert!(list.slice(ndarray::s![..3]).iter().all(|&v| v < 5));
/// assert!(list.slice(ndarray::s![3..7]).iter().all(|&v| 5 <= v && v < 10));
/// assert_eq!(list[7], 50);
/// # Ok::<(), ndarray_partition::Error>(())
/// ```
pub fn partition<T>(
	values: ArrayViewMut1<'_, T>,
	range: Range<usize>,
	splitters: ArrayView1<'_, T>,
	split_range: Range<usize>,
	split_points: ArrayViewMut1<'_, usize>,
) -> Result<()>
where
	T: PartialOrd,
{
	partition_by(values, range, splitters, split_range, split_points, T::lt)
}

/// Same as [`partition`] but with a predicate deciding whether an element is less than a
/// splitter.
///
/// `is_less` must define a strict weak ordering.
pub fn partition_by<T, F>(
	mut values: ArrayViewMut1<'_, T>,
	range: Range<usize>,
	splitters: ArrayView1<'_, T>,
	split_range: Range<usize>,
	split_points: ArrayViewMut1<'_, usize>,
	is_less: F,
) -> Result<()>
where
	F: FnMut(&T, &T) -> bool,
{
	partition_target(
		&mut values,
		range,
		splitters,
		split_range,
		split_points,
		is_less,
	)
}

/// Same as [`partition`] but synchronously partitions `secondary` by `primary`.
///
/// Each time an element of `primary` moves from position `a` to `b`, the element of `secondary`
/// at `a` moves to `b` as well. Useful for point-like data laid out as one array per dimension,
/// partitioned by one of the dimensions.
///
/// # Errors
///
/// Same as [`partition`] and additionally returns [`Error::LengthMismatch`] if `secondary` differs
/// in length from `primary`.
///
/// # Examples
///
/// ```
/// use ndarray_partition::{dual_partition, ndarray::{arr1, Array1}};
///
/// let mut x = arr1(&[0.5, 2.5, 1.5, 0.25]);
/// let mut y = arr1(&[10, 20, 30, 40]);
/// let mut split_points = Array1::zeros(2);
///
/// dual_partition(
/// 	x.view_mut(),
/// 	y.view_mut(),
/// 	0..4,
/// 	arr1(&[1.0, 2.0]).view(),
/// 	0..2,
/// 	split_points.view_mut(),
/// )?;
///
/// assert_eq!(split_points, arr1(&[2, 3]));
/// for (x, y) in x.iter().zip(&y) {
/// 	let original = [(0.5, 10), (2.5, 20), (1.5, 30), (0.25, 40)];
/// 	assert!(original.contains(&(*x, *y)));
/// }
/// # Ok::<(), ndarray_partition::Error>(())
/// ```
pub fn dual_partition<T, U>(
	primary: ArrayViewMut1<'_, T>,
	secondary: ArrayViewMut1<'_, U>,
	range: Range<usize>,
	splitters: ArrayView1<'_, T>,
	split_range: Range<usize>,
	split_points: ArrayViewMut1<'_, usize>,
) -> Result<()>
where
	T: PartialOrd,
{
	partition_target(
		&mut (primary, secondary),
		range,
		splitters,
		split_range,
		split_points,
		T::lt,
	)
}

/// Same as [`dual_partition`] but synchronously partitions `secondary` and `tertiary` by
/// `primary`.
///
/// # Errors
///
/// Same as [`dual_partition`] for both synchronized arrays.
pub fn triple_partition<T, U, V>(
	primary: ArrayViewMut1<'_, T>,
	secondary: ArrayViewMut1<'_, U>,
	tertiary: ArrayViewMut1<'_, V>,
	range: Range<usize>,
	splitters: ArrayView1<'_, T>,
	split_range: Range<usize>,
	split_points: ArrayViewMut1<'_, usize>,
) -> Result<()>
where
	T: PartialOrd,
{
	partition_target(
		&mut (primary, secondary, tertiary),
		range,
		splitters,
		split_range,
		split_points,
		T::lt,
	)
}

/// Partitions any [`Partitionable`] target, see [`partition`].
///
/// # Errors
///
/// Same as [`dual_partition`] with [`Partitionable::validate`] deciding on length mismatches.
pub fn partition_target<P, F>(
	target: &mut P,
	range: Range<usize>,
	splitters: ArrayView1<'_, P::Key>,
	split_range: Range<usize>,
	mut split_points: ArrayViewMut1<'_, usize>,
	mut is_less: F,
) -> Result<()>
where
	P: Partitionable + ?Sized,
	F: FnMut(&P::Key, &P::Key) -> bool,
{
	target.validate()?;
	check_range(&range, target.len())?;
	if split_range.start < split_range.end {
		if split_range.end > splitters.len() {
			return Err(Error::SplitterRangeOutOfBounds {
				start: split_range.start,
				end: split_range.end,
				len: splitters.len(),
			});
		}
		if split_points.len() < split_range.end {
			return Err(Error::SplitPointsTooShort {
				len: split_points.len(),
				required: split_range.end,
			});
		}
		#[cfg(debug_assertions)]
		check_ascending(&splitters, split_range.clone(), &mut is_less)?;
	}

	recurse(
		target,
		range.start,
		range.end,
		&splitters,
		split_range.start,
		split_range.end,
		&mut split_points,
		&mut is_less,
	);
	Ok(())
}

/// Moves all elements of `values[range]` less than `splitter` to the front of `range`.
///
/// Returns the split point, i.e., the exclusive end of the elements less than `splitter`. Upon
/// return, `values[range.start..split] < splitter` and `!(values[split..range.end] < splitter)`.
/// Returns `range.start` for an empty `range`. The time complexity is *O*(*n*).
///
/// # Errors
///
/// Returns [`Error::RangeOutOfBounds`] if the non-empty `range` exceeds `values`.
///
/// # Examples
///
/// ```
/// use ndarray_partition::{ndarray::arr1, partition_at};
///
/// let mut list = arr1(&[7, 4, 5, 50, 6, 4, 3, 6]);
///
/// let split = partition_at(list.view_mut(), 0..8, &5)?;
///
/// assert_eq!(split, 3);
/// assert!(list.iter().take(3).all(|&v| v < 5));
/// assert!(list.iter().skip(3).all(|&v| v >= 5));
/// # Ok::<(), ndarray_partition::Error>(())
/// ```
pub fn partition_at<T>(
	mut values: ArrayViewMut1<'_, T>,
	range: Range<usize>,
	splitter: &T,
) -> Result<usize>
where
	T: PartialOrd,
{
	partition_target_at(&mut values, range, splitter, T::lt)
}

/// Same as [`partition_at`] but synchronously partitions `secondary` by `primary`.
///
/// # Errors
///
/// Same as [`partition_at`] and additionally returns [`Error::LengthMismatch`] if `secondary`
/// differs in length from `primary`.
pub fn dual_partition_at<T, U>(
	primary: ArrayViewMut1<'_, T>,
	secondary: ArrayViewMut1<'_, U>,
	range: Range<usize>,
	splitter: &T,
) -> Result<usize>
where
	T: PartialOrd,
{
	partition_target_at(&mut (primary, secondary), range, splitter, T::lt)
}

/// Same as [`dual_partition_at`] but synchronously partitions `secondary` and `tertiary` by
/// `primary`.
///
/// # Errors
///
/// Same as [`dual_partition_at`] for both synchronized arrays.
pub fn triple_partition_at<T, U, V>(
	primary: ArrayViewMut1<'_, T>,
	secondary: ArrayViewMut1<'_, U>,
	tertiary: ArrayViewMut1<'_, V>,
	range: Range<usize>,
	splitter: &T,
) -> Result<usize>
where
	T: PartialOrd,
{
	partition_target_at(&mut (primary, secondary, tertiary), range, splitter, T::lt)
}

/// Partitions any [`Partitionable`] target at a single splitter, see [`partition_at`].
///
/// # Errors
///
/// Same as [`dual_partition_at`] with [`Partitionable::validate`] deciding on length mismatches.
pub fn partition_target_at<P, F>(
	target: &mut P,
	range: Range<usize>,
	splitter: &P::Key,
	mut is_less: F,
) -> Result<usize>
where
	P: Partitionable + ?Sized,
	F: FnMut(&P::Key, &P::Key) -> bool,
{
	target.validate()?;
	check_range(&range, target.len())?;
	Ok(split_at(target, range.start, range.end, splitter, &mut is_less))
}

/// Checks that `splitters` are strictly ascending with respect to `is_less`.
///
/// This is *O*(*k*) for *k* splitters. The partitioning functions only check it in debug builds.
///
/// # Errors
///
/// Returns [`Error::UnsortedSplitters`] with the index of the first splitter not less than its
/// successor.
///
/// # Examples
///
/// ```
/// use ndarray_partition::{Error, ndarray::arr1, validate_splitters};
///
/// assert_eq!(validate_splitters(arr1(&[1.0, 2.0, 3.5]).view(), f64::lt), Ok(()));
/// assert_eq!(
/// 	validate_splitters(arr1(&[1, 2, 2, 3]).view(), i32::lt),
/// 	Err(Error::UnsortedSplitters { index: 1 }),
/// );
/// ```
pub fn validate_splitters<T, F>(splitters: ArrayView1<'_, T>, mut is_less: F) -> Result<()>
where
	F: FnMut(&T, &T) -> bool,
{
	check_ascending(&splitters, 0..splitters.len(), &mut is_less)
}

/// Whether `values[range]` is partitioned by `splitters[split_range]` at
/// `split_points[split_range]`.
///
/// Returns `false` instead of panicking on out-of-bounds arguments.
#[must_use]
pub fn is_partitioned<T>(
	values: ArrayView1<'_, T>,
	range: Range<usize>,
	splitters: ArrayView1<'_, T>,
	split_range: Range<usize>,
	split_points: ArrayView1<'_, usize>,
) -> bool
where
	T: PartialOrd,
{
	is_partitioned_by(values, range, splitters, split_range, split_points, T::lt)
}

/// Same as [`is_partitioned`] but with a predicate deciding whether an element is less than a
/// splitter.
#[must_use]
pub fn is_partitioned_by<T, F>(
	values: ArrayView1<'_, T>,
	range: Range<usize>,
	splitters: ArrayView1<'_, T>,
	split_range: Range<usize>,
	split_points: ArrayView1<'_, usize>,
	mut is_less: F,
) -> bool
where
	F: FnMut(&T, &T) -> bool,
{
	let end = cmp::max(range.start, range.end);
	if range.start < range.end && range.end > values.len() {
		return false;
	}
	let split_range = split_range.start..cmp::max(split_range.start, split_range.end);
	if split_range.end > splitters.len() || split_range.end > split_points.len() {
		return false;
	}
	let splitters = splitters.slice(s![split_range.clone()]);
	let split_points = split_points.slice(s![split_range]);
	let mut previous = range.start;
	for &point in &split_points {
		if point < previous || point > end {
			return false;
		}
		previous = point;
	}
	for (interval, bounds) in split_ranges(range, split_points).enumerate() {
		let lower = interval.checked_sub(1).map(|index| &splitters[index]);
		let upper = splitters.get(interval);
		for index in bounds {
			let value = &values[index];
			if lower.is_some_and(|lower| is_less(value, lower))
				|| upper.is_some_and(|upper| !is_less(value, upper))
			{
				return false;
			}
		}
	}
	true
}

/// Returns the ranges of the intervals delimited by `split_points` within `range`.
///
/// Yields `range.start..split_points[0]`, `split_points[0]..split_points[1]`, and so on up to
/// `split_points[k - 1]..range.end`, i.e., one more range than there are split points.
///
/// # Examples
///
/// ```
/// use ndarray_partition::{ndarray::arr1, split_ranges};
///
/// let split_points = arr1(&[3, 7, 7]);
/// let ranges = split_ranges(0..8, split_points.view()).collect::<Vec<_>>();
///
/// assert_eq!(ranges, [0..3, 3..7, 7..7, 7..8]);
/// ```
pub fn split_ranges<'a>(
	range: Range<usize>,
	split_points: ArrayView1<'a, usize>,
) -> impl Iterator<Item = Range<usize>> + 'a {
	let mut start = range.start;
	split_points
		.into_iter()
		.copied()
		.chain(iter::once(cmp::max(range.start, range.end)))
		.map(move |end| {
			let interval = start..end;
			start = end;
			interval
		})
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
	if range.start < range.end && range.end > len {
		Err(Error::RangeOutOfBounds {
			start: range.start,
			end: range.end,
			len,
		})
	} else {
		Ok(())
	}
}

fn check_ascending<T, F>(
	splitters: &ArrayView1<'_, T>,
	range: Range<usize>,
	is_less: &mut F,
) -> Result<()>
where
	F: FnMut(&T, &T) -> bool,
{
	for index in range.start..range.end.saturating_sub(1) {
		if !is_less(&splitters[index], &splitters[index + 1]) {
			return Err(Error::UnsortedSplitters { index });
		}
	}
	Ok(())
}

/// Moves all elements of `target[from..to]` less than `splitter` to the front and returns the
/// exclusive end of them.
pub(crate) fn split_at<P, F>(
	target: &mut P,
	from: usize,
	to: usize,
	splitter: &P::Key,
	is_less: &mut F,
) -> usize
where
	P: Partitionable + ?Sized,
	F: FnMut(&P::Key, &P::Key) -> bool,
{
	let mut head = from;
	for index in from..to {
		if is_less(target.key(index), splitter) {
			if index != head {
				target.swap(index, head);
			}
			head += 1;
		}
	}
	head
}

/// Partitions `target[from..to]` by `splitters[split_from..split_to]`.
///
/// Recurses into the upper half of the splitters and continues with the lower half, so the depth
/// is bounded by log2 of the number of splitters.
#[allow(clippy::too_many_arguments)]
fn recurse<P, F>(
	target: &mut P,
	mut from: usize,
	mut to: usize,
	splitters: &ArrayView1<'_, P::Key>,
	mut split_from: usize,
	mut split_to: usize,
	split_points: &mut ArrayViewMut1<'_, usize>,
	is_less: &mut F,
) where
	P: Partitionable + ?Sized,
	F: FnMut(&P::Key, &P::Key) -> bool,
{
	while split_from < split_to && from < to {
		// Two elements, resolved directly. Can be deleted without changing semantics.
		if to - from == 2 {
			let (first, second) = (target.key(from), target.key(from + 1));
			let mut index = split_from;
			while index < split_to
				&& !is_less(first, &splitters[index])
				&& !is_less(second, &splitters[index])
			{
				split_points[index] = from;
				index += 1;
			}
			if index == split_to {
				return;
			}
			let first_less = is_less(first, &splitters[index]);
			let second_less = is_less(second, &splitters[index]);
			let point = from + usize::from(first_less) + usize::from(second_less);
			if first_less && second_less {
				split_points.slice_mut(s![index..split_to]).fill(point);
				return;
			}
			if second_less {
				target.swap(from, from + 1);
			}
			split_points[index] = point;
			// One element left.
			from += 1;
			split_from = index + 1;
		}

		// One element, resolved directly. Can be deleted without changing semantics.
		if to - from == 1 {
			let key = target.key(from);
			let mut index = split_from;
			while index < split_to && !is_less(key, &splitters[index]) {
				split_points[index] = from;
				index += 1;
			}
			split_points.slice_mut(s![index..split_to]).fill(to);
			return;
		}

		let middle = (split_from + split_to - 1) / 2;
		let split = split_at(target, from, to, &splitters[middle], is_less);
		split_points[middle] = split;

		if middle + 1 < split_to {
			#[cfg(feature = "stacker")]
			stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
				recurse(
					target,
					split,
					to,
					splitters,
					middle + 1,
					split_to,
					split_points,
					is_less,
				)
			});
			#[cfg(not(feature = "stacker"))]
			recurse(
				target,
				split,
				to,
				splitters,
				middle + 1,
				split_to,
				split_points,
				is_less,
			);
		}

		// Akin to tail recursion into the lower half.
		to = split;
		split_to = middle;
	}

	// Remaining intervals are empty and follow `from`.
	if split_from < split_to {
		split_points.slice_mut(s![split_from..split_to]).fill(from);
	}
}
