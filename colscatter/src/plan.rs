/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use crate::{
    error::{DuplicateIndex, IndexOutOfRange, ScatterResult},
    ColumnIndex,
};

/// Inverse map entry for a destination column that receives the pad value.
pub(crate) const PADDING: usize = usize::MAX;

/// A validated mapping from source columns to destination columns.
///
/// A plan depends only on the destination indices and the output width, so it can be
/// built once and applied to any number of source matrices with
/// [`ScatterColumns::scatter_planned`](crate::ScatterColumns::scatter_planned). Plans are
/// immutable after construction and can be shared freely between threads.
///
/// ```
/// use colscatter::ScatterPlan;
///
/// // Source column `i` lands in destination column `indices[i]`.
/// let plan = ScatterPlan::new(&[7, 4, 2, 3], 10).unwrap();
/// assert_eq!(plan.source_for(2), Some(2));
/// assert_eq!(plan.source_for(7), Some(0));
/// assert_eq!(plan.source_for(0), None);
/// assert_eq!(plan.padding_columns(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterPlan {
    /// `inverse[d]` is the source column written to destination `d`, or `PADDING`.
    inverse: Box<[usize]>,
    /// `runs[d]` is the number of consecutive padding columns beginning at `d`.
    /// Zero for mapped columns.
    runs: Box<[usize]>,
    source_columns: usize,
    max_run: usize,
}

impl ScatterPlan {
    /// Validate `indices` against `output_width` and build the plan.
    ///
    /// Entry `i` of `indices` is the destination column of source column `i`.
    ///
    /// # Errors
    ///
    /// Indices are checked in order and the first faulty position decides the error:
    ///
    /// * [`ScatterError::OutOfRange`](crate::ScatterError::OutOfRange) if an index is
    ///   negative or not less than `output_width`.
    /// * [`ScatterError::Duplicate`](crate::ScatterError::Duplicate) if an index repeats an
    ///   earlier one.
    pub fn new<I>(indices: &[I], output_width: usize) -> ScatterResult<Self>
    where
        I: ColumnIndex,
    {
        let inverse = build_inverse(indices, output_width).inspect_err(|err| {
            tracing::debug!(
                source_columns = indices.len(),
                output_width,
                %err,
                "rejected destination indices"
            )
        })?;

        let (runs, max_run) = compress_padding_runs(&inverse);
        let plan = Self {
            inverse,
            runs,
            source_columns: indices.len(),
            max_run,
        };

        tracing::debug!(
            source_columns = plan.source_columns,
            output_width,
            padding_columns = plan.padding_columns(),
            padding_runs = plan.num_runs(),
            max_run = plan.max_run,
            "built scatter plan"
        );
        Ok(plan)
    }

    /// The number of columns in the output matrix.
    pub fn output_width(&self) -> usize {
        self.inverse.len()
    }

    /// The number of columns in the source matrix.
    pub fn source_columns(&self) -> usize {
        self.source_columns
    }

    /// The number of destination columns filled with the pad value.
    pub fn padding_columns(&self) -> usize {
        self.output_width() - self.source_columns
    }

    /// Whether every destination column is mapped, in which case the pad value is never
    /// used.
    pub fn is_permutation(&self) -> bool {
        self.padding_columns() == 0
    }

    /// Return the source column written to destination column `dest`, or `None` if `dest`
    /// is a padding column.
    ///
    /// # Panics
    ///
    /// Panics if `dest >= self.output_width()`.
    pub fn source_for(&self, dest: usize) -> Option<usize> {
        assert!(
            dest < self.output_width(),
            "destination column {dest} is out of bounds for an output width of {}",
            self.output_width()
        );
        match self.inverse[dest] {
            PADDING => None,
            src => Some(src),
        }
    }

    pub(crate) fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    pub(crate) fn runs(&self) -> &[usize] {
        &self.runs
    }

    /// The length of the longest padding run.
    pub(crate) fn max_run(&self) -> usize {
        self.max_run
    }

    fn num_runs(&self) -> usize {
        let mut previous = 0;
        self.runs
            .iter()
            .filter(|&&run| {
                let starts = run != 0 && previous == 0;
                previous = run;
                starts
            })
            .count()
    }
}

/// Validate `indices` and return the destination-to-source map.
///
/// Out of range entries are caught before they are used to index the map, and a
/// duplicate is caught when its destination slot is already claimed.
fn build_inverse<I>(indices: &[I], output_width: usize) -> ScatterResult<Box<[usize]>>
where
    I: ColumnIndex,
{
    let mut inverse = vec![PADDING; output_width].into_boxed_slice();
    for (position, &index) in indices.iter().enumerate() {
        let dest = match index.to_column() {
            Some(dest) if dest < output_width => dest,
            _ => return Err(IndexOutOfRange::new(position, index.widen(), output_width).into()),
        };

        let slot = &mut inverse[dest];
        if *slot != PADDING {
            return Err(DuplicateIndex::new(indices, position, *slot, dest).into());
        }
        *slot = position;
    }
    Ok(inverse)
}

/// Find the maximal runs of padding columns in `inverse`.
///
/// Every column of a run of length `L` records the number of padding columns left in the
/// run, counting down from `L` at its first column to 1 at its last. Returns the run
/// lengths and the longest run.
fn compress_padding_runs(inverse: &[usize]) -> (Box<[usize]>, usize) {
    let width = inverse.len();
    let mut runs = vec![0; width].into_boxed_slice();
    let mut max_run = 0;

    let mut col = 0;
    while col < width {
        if inverse[col] != PADDING {
            col += 1;
            continue;
        }

        let len = inverse[col..]
            .iter()
            .take_while(|&&src| src == PADDING)
            .count();

        runs[col..col + len]
            .iter_mut()
            .enumerate()
            .for_each(|(offset, run)| *run = len - offset);

        max_run = max_run.max(len);
        col += len;
    }

    (runs, max_run)
}

///////////
// Tests //
///////////
