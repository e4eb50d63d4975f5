/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
//! # colscatter
//!
//! Scatter the columns of a dense row-major matrix into a wider matrix, filling every
//! destination column that receives no source column with a pad value. This is the
//! inverse of gathering columns by index.
//!
//! ```
//! use colscatter::{scatter_columns, Matrix, MatrixView};
//!
//! let data = [11, 12, 13, 14];
//! let params = MatrixView::row_vector(&data[..]);
//! let mut output = Matrix::new(-1, 1, 10);
//!
//! scatter_columns(params, &[7, 4, 2, 3], 0, output.as_mut_view()).unwrap();
//! assert_eq!(output.as_slice(), &[0, 0, 13, 14, 12, 0, 0, 11, 0, 0]);
//! ```
//!
//! Indices are validated before any output is written. Shape agreement between the
//! matrices and the indices is the caller's responsibility; see [`ScatterColumns`].
#![cfg_attr(
    not(test),
    warn(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::undocumented_unsafe_blocks
    )
)]

pub use colscatter_utils::{Matrix, MatrixView, MutMatrixView};

pub mod config;
pub use config::{BackendKind, ScatterConfig};

pub mod error;
pub use error::{DuplicateIndex, ErrorKind, IndexOutOfRange, ScatterError, ScatterResult};

mod index;
pub use index::ColumnIndex;

mod plan;
pub use plan::ScatterPlan;

mod backend;
pub use backend::{Backend, ScatterColumns};

mod elementwise;
pub use elementwise::Elementwise;

mod runs;
pub use runs::Runs;

mod prefetch;

#[cfg(test)]
mod test_util;

/// Write column `i` of `params` to column `indices[i]` of `output` and fill every other
/// column of `output` with `pad_value`, using the default [`Backend`].
///
/// See [`ScatterColumns::scatter_columns`] for the full contract.
pub fn scatter_columns<T, I>(
    params: MatrixView<'_, T>,
    indices: &[I],
    pad_value: T,
    output: MutMatrixView<'_, T>,
) -> ScatterResult<()>
where
    T: Copy,
    I: ColumnIndex,
{
    Backend::default().scatter_columns(params, indices, pad_value, output)
}
