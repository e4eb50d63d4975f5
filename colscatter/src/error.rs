/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use hashbrown::HashSet;
use thiserror::Error;

use crate::ColumnIndex;

/// Convenience alias for a `Result<T, ScatterError>`.
pub type ScatterResult<T> = Result<T, ScatterError>;

/// The category of a [`ScatterError`].
///
/// Every failure originates in caller supplied indices, so there is only one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
}

/// Reasons a set of destination indices is rejected.
///
/// Both variants are detected before anything is written to the output matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScatterError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateIndex),
    #[error(transparent)]
    OutOfRange(#[from] IndexOutOfRange),
}

impl ScatterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Duplicate(_) | Self::OutOfRange(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Two source columns were sent to the same destination column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "indices cannot contain duplicates: total number of indices {total} != number of \
     unique indices {unique} (index {value} at position {position} is already used by \
     position {first})"
)]
pub struct DuplicateIndex {
    total: usize,
    unique: usize,
    position: usize,
    first: usize,
    value: usize,
}

impl DuplicateIndex {
    /// Record that `indices[position]` repeats `indices[first]`, which has value `value`.
    ///
    /// The unique count is taken over the entire index list, including entries after
    /// `position` and entries that would be out of range.
    #[cold]
    #[inline(never)]
    pub(crate) fn new<I>(indices: &[I], position: usize, first: usize, value: usize) -> Self
    where
        I: ColumnIndex,
    {
        let unique = indices
            .iter()
            .map(|i| i.widen())
            .collect::<HashSet<i128>>()
            .len();

        Self {
            total: indices.len(),
            unique,
            position,
            first,
            value,
        }
    }

    /// The number of indices supplied.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of distinct values among the supplied indices.
    pub fn unique(&self) -> usize {
        self.unique
    }

    /// The position of the first repeated index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The earlier position holding the same value.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The repeated destination column.
    pub fn value(&self) -> usize {
        self.value
    }
}

/// A destination index outside `[0, bound)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("indices({position}): {value} is not in range [0, {bound})")]
pub struct IndexOutOfRange {
    position: usize,
    value: i128,
    bound: usize,
}

impl IndexOutOfRange {
    #[cold]
    #[inline(never)]
    pub(crate) fn new(position: usize, value: i128, bound: usize) -> Self {
        Self {
            position,
            value,
            bound,
        }
    }

    /// The position of the offending index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The offending index, widened so values of every index type are preserved.
    pub fn value(&self) -> i128 {
        self.value
    }

    /// The output width the index was checked against.
    pub fn bound(&self) -> usize {
        self.bound
    }
}
