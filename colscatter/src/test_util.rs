/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use colscatter_utils::{views::Init, Matrix, MatrixView};
use rand::{seq::SliceRandom, Rng};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::ColumnIndex;

/// Install a thread-local subscriber so log output is captured per test.
///
/// Honors `RUST_LOG`, defaulting to the "debug" level.
pub(crate) fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}

/// Generate a random `rows x cols` source matrix and `cols` distinct destination indices
/// drawn from `[0, width)`.
pub(crate) fn random_problem<R>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    width: usize,
) -> (Matrix<u32>, Vec<i64>)
where
    R: Rng,
{
    assert!(cols <= width, "cannot place {cols} columns into {width}");
    let params = Matrix::new(Init(|| rng.random::<u32>()), rows, cols);

    let mut destinations: Vec<i64> = (0..width as i64).collect();
    destinations.shuffle(rng);
    destinations.truncate(cols);
    (params, destinations)
}

/// Compute the scatter straight from its definition: destination `c` of each row holds the
/// source column `i` with `indices[i] == c`, or `pad_value` if there is none.
pub(crate) fn expected_output<T, I>(
    params: MatrixView<'_, T>,
    indices: &[I],
    width: usize,
    pad_value: T,
) -> Matrix<T>
where
    T: Copy,
    I: ColumnIndex,
{
    let mut output = Matrix::new(pad_value, params.nrows(), width);
    for row in 0..params.nrows() {
        for col in 0..width {
            if let Some(src) = indices.iter().position(|i| i.to_column() == Some(col)) {
                output[(row, col)] = params[(row, src)];
            }
        }
    }
    output
}
