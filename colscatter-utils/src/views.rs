/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use thiserror::Error;

/// Storage that can be viewed as a dense slice.
///
/// Implementations must return the same slice (same base pointer and same length) from
/// every call to `as_slice`. Matrix views rely on this to keep their `nrows * ncols`
/// length invariant after construction.
pub trait DenseData {
    type Elem;

    /// Return the underlying data as a slice.
    fn as_slice(&self) -> &[Self::Elem];
}

/// A mutable companion to [`DenseData`].
///
/// The slice returned by `as_mut_slice` must span exactly the memory returned by
/// `as_slice`.
pub trait MutDenseData: DenseData {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

impl<T> DenseData for &[T] {
    type Elem = T;
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> DenseData for &mut [T] {
    type Elem = T;
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> MutDenseData for &mut [T] {
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T> DenseData for Box<[T]> {
    type Elem = T;
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> MutDenseData for Box<[T]> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

////////////
// Matrix //
////////////

/// A dense block of memory interpreted as a 2-dimensional matrix in row-major order.
///
/// Use one of the aliases [`Matrix`], [`MatrixView`] or [`MutMatrixView`] rather than
/// naming this type directly. Views over immutable memory are `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixBase<T>
where
    T: DenseData,
{
    data: T,
    nrows: usize,
    ncols: usize,
}

/// An owning row-major matrix.
pub type Matrix<T> = MatrixBase<Box<[T]>>;

/// A borrowed, read-only row-major matrix.
pub type MatrixView<'a, T> = MatrixBase<&'a [T]>;

/// A borrowed, writable row-major matrix.
pub type MutMatrixView<'a, T> = MatrixBase<&'a mut [T]>;

/// Returned from [`MatrixBase::try_from`] when the length of the data does not match the
/// requested dimensions. The rejected data can be recovered with [`Self::into_inner`].
#[derive(Error)]
#[non_exhaustive]
#[error(
    "cannot view a slice of length {} as a matrix with {nrows} rows and {ncols} columns",
    data.as_slice().len()
)]
pub struct TryFromError<T: DenseData> {
    data: T,
    nrows: usize,
    ncols: usize,
}

// Written by hand so `T` does not need to be `Debug`.
impl<T: DenseData> fmt::Debug for TryFromError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFromError")
            .field("len", &self.data.as_slice().len())
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .finish()
    }
}

impl<T: DenseData> TryFromError<T> {
    /// Consume the error and return the rejected data.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// A source of initial values for [`Matrix::new`].
pub trait Generator<T> {
    fn generate(&mut self) -> T;
}

impl<T> Generator<T> for T
where
    T: Clone,
{
    fn generate(&mut self) -> T {
        self.clone()
    }
}

/// Initialize each element of a matrix by calling the wrapped closure.
pub struct Init<F>(pub F);

impl<T, F> Generator<T> for Init<F>
where
    F: FnMut() -> T,
{
    fn generate(&mut self) -> T {
        (self.0)()
    }
}

impl<T> Matrix<T> {
    /// Construct a `nrows x ncols` matrix, filling it from `generator` in memory order.
    ///
    /// # Panics
    ///
    /// Panics if `nrows * ncols` overflows `usize`.
    pub fn new<U>(mut generator: U, nrows: usize, ncols: usize) -> Self
    where
        U: Generator<T>,
    {
        let len = nrows.checked_mul(ncols).unwrap_or_else(|| {
            panic!("a matrix with {nrows} rows and {ncols} columns overflows usize")
        });
        let data: Box<[T]> = (0..len).map(|_| generator.generate()).collect();
        Self { data, nrows, ncols }
    }
}

impl<T> MatrixBase<T>
where
    T: DenseData,
{
    /// Interpret `data` as a `nrows x ncols` matrix.
    ///
    /// Fails if `data` does not have exactly `nrows * ncols` elements, or if that product
    /// overflows `usize`.
    pub fn try_from(data: T, nrows: usize, ncols: usize) -> Result<Self, TryFromError<T>> {
        match nrows.checked_mul(ncols) {
            Some(len) if len == data.as_slice().len() => Ok(Self { data, nrows, ncols }),
            _ => Err(TryFromError { data, nrows, ncols }),
        }
    }

    /// Interpret `data` as a matrix with a single row.
    pub fn row_vector(data: T) -> Self {
        let ncols = data.as_slice().len();
        Self {
            data,
            nrows: 1,
            ncols,
        }
    }

    /// Return the number of rows in the matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the number of columns in the matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the underlying data as a slice.
    pub fn as_slice(&self) -> &[T::Elem] {
        self.data.as_slice()
    }

    /// Return the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        self.data.as_mut_slice()
    }

    /// Return row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> &[T::Elem] {
        match self.get_row(row) {
            Some(row) => row,
            None => panic!(
                "tried to access row {row} of a matrix with {} rows",
                self.nrows
            ),
        }
    }

    /// Return row `row` if it exists.
    pub fn get_row(&self, row: usize) -> Option<&[T::Elem]> {
        if row < self.nrows {
            let start = row * self.ncols;
            Some(&self.as_slice()[start..start + self.ncols])
        } else {
            None
        }
    }

    /// Return row `row` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        assert!(
            row < self.nrows,
            "tried to access row {row} of a matrix with {} rows",
            self.nrows
        );
        let ncols = self.ncols;
        let start = row * ncols;
        &mut self.as_mut_slice()[start..start + ncols]
    }

    /// Iterate over the rows of the matrix, beginning with row 0.
    ///
    /// Matrices with zero columns still yield `nrows` (empty) rows.
    pub fn row_iter(&self) -> Rows<'_, T::Elem> {
        Rows {
            data: self.as_slice(),
            ncols: self.ncols,
            remaining: self.nrows,
        }
    }

    /// Iterate mutably over the rows of the matrix, beginning with row 0.
    ///
    /// Matrices with zero columns still yield `nrows` (empty) rows.
    pub fn row_iter_mut(&mut self) -> RowsMut<'_, T::Elem>
    where
        T: MutDenseData,
    {
        let ncols = self.ncols;
        let remaining = self.nrows;
        RowsMut {
            data: self.as_mut_slice(),
            ncols,
            remaining,
        }
    }

    /// Return a read-only view over the matrix.
    pub fn as_view(&self) -> MatrixView<'_, T::Elem> {
        MatrixBase {
            data: self.as_slice(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Return a writable view over the matrix.
    pub fn as_mut_view(&mut self) -> MutMatrixView<'_, T::Elem>
    where
        T: MutDenseData,
    {
        let nrows = self.nrows;
        let ncols = self.ncols;
        MatrixBase {
            data: self.as_mut_slice(),
            nrows,
            ncols,
        }
    }

}

impl<T> Index<(usize, usize)> for MatrixBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            col < self.ncols,
            "col {col} is out of bounds (max: {})",
            self.ncols
        );
        &self.row(row)[col]
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            col < self.ncols,
            "col {col} is out of bounds (max: {})",
            self.ncols
        );
        &mut self.row_mut(row)[col]
    }
}

//////////
// Rows //
//////////

/// Iterator over the rows of a matrix. See [`MatrixBase::row_iter`].
#[derive(Debug, Clone)]
pub struct Rows<'a, T> {
    data: &'a [T],
    ncols: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let data = self.data;
        let (row, rest) = data.split_at(self.ncols);
        self.data = rest;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Rows<'_, T> {}

/// Mutable iterator over the rows of a matrix. See [`MatrixBase::row_iter_mut`].
#[derive(Debug)]
pub struct RowsMut<'a, T> {
    data: &'a mut [T],
    ncols: usize,
    remaining: usize,
}

impl<'a, T> Iterator for RowsMut<'a, T> {
    type Item = &'a mut [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let data = std::mem::take(&mut self.data);
        let (row, rest) = data.split_at_mut(self.ncols);
        self.data = rest;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RowsMut<'_, T> {}

///////////
// Tests //
///////////
