//! Precondition violations detected at the call boundary.

/// Error returned when arguments violate a checkable precondition.
///
/// Violations that are too expensive to check on every call (e.g., an inconsistent comparator)
/// are not reported and merely result in an unspecified arrangement of the elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Non-empty element range exceeds the primary array.
	#[error("range {start}..{end} out of bounds for array of length {len}")]
	RangeOutOfBounds {
		/// Start of the element range.
		start: usize,
		/// End of the element range.
		end: usize,
		/// Length of the primary array.
		len: usize,
	},
	/// Non-empty splitter range exceeds the splitters.
	#[error("splitter range {start}..{end} out of bounds for {len} splitters")]
	SplitterRangeOutOfBounds {
		/// Start of the splitter range.
		start: usize,
		/// End of the splitter range.
		end: usize,
		/// Number of splitters.
		len: usize,
	},
	/// Split points cannot hold the slots of the splitter range.
	#[error("split points of length {len} but at least {required} required")]
	SplitPointsTooShort {
		/// Length of the split points.
		len: usize,
		/// Minimum length, the end of the splitter range.
		required: usize,
	},
	/// Synchronized arrays differ in length.
	#[error("synchronized array of length {found} but primary array of length {expected}")]
	LengthMismatch {
		/// Length of the primary array.
		expected: usize,
		/// Length of the offending synchronized array.
		found: usize,
	},
	/// Column index exceeds the columns of a matrix.
	#[error("column {column} out of bounds for matrix with {columns} columns")]
	ColumnOutOfBounds {
		/// Requested column.
		column: usize,
		/// Number of columns.
		columns: usize,
	},
	/// Splitters are not strictly ascending.
	#[error("splitter at {index} is not strictly less than its successor")]
	UnsortedSplitters {
		/// Index of the splitter not less than its successor.
		index: usize,
	},
}

/// Result type of fallible operations.
pub type Result<T> = core::result::Result<T, Error>;
