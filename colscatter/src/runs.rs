/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use colscatter_utils::{MatrixView, MutMatrixView};

use crate::{
    backend::check_shapes, config::defaults, plan::PADDING, prefetch::prefetch_hint,
    ScatterColumns, ScatterPlan,
};

/// Row copy engine that copies mapped columns one element at a time and fills each run
/// of padding columns with a single slice copy from a shared buffer of pad values.
///
/// When `prefetch` is enabled, each step first hints the next destination element and,
/// if the next destination is mapped, the source element that feeds it. Hints never
/// change the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runs {
    prefetch: bool,
}

impl Runs {
    /// Construct a new engine, issuing prefetch hints if `prefetch` is set.
    pub fn new(prefetch: bool) -> Self {
        Self { prefetch }
    }

    /// Return whether this engine issues prefetch hints.
    pub fn prefetch(&self) -> bool {
        self.prefetch
    }
}

impl Default for Runs {
    fn default() -> Self {
        Self::new(defaults::PREFETCH)
    }
}

impl ScatterColumns for Runs {
    fn scatter_planned<T>(
        &self,
        plan: &ScatterPlan,
        params: MatrixView<'_, T>,
        pad_value: T,
        mut output: MutMatrixView<'_, T>,
    ) where
        T: Copy,
    {
        check_shapes(plan, &params, &output);
        tracing::trace!(
            rows = params.nrows(),
            prefetch = self.prefetch,
            "scattering columns by padding runs"
        );

        // The longest run fits, so every run is a prefix of this buffer.
        let pad = vec![pad_value; plan.max_run()];
        let inverse = plan.inverse();
        let runs = plan.runs();

        let rows = params.row_iter().zip(output.row_iter_mut());
        if self.prefetch {
            rows.for_each(|(src, dst)| copy_row::<T, true>(inverse, runs, &pad, src, dst));
        } else {
            rows.for_each(|(src, dst)| copy_row::<T, false>(inverse, runs, &pad, src, dst));
        }
    }
}

/// Write one output row.
///
/// `inverse` and `runs` come from the same plan and have the length of `dst`. `pad` holds
/// at least as many elements as the longest run.
#[inline(always)]
fn copy_row<T, const PREFETCH: bool>(
    inverse: &[usize],
    runs: &[usize],
    pad: &[T],
    src: &[T],
    dst: &mut [T],
) where
    T: Copy,
{
    let width = dst.len();
    let mut col = 0;
    while col < width {
        if PREFETCH && col + 1 < width {
            prefetch_hint(&dst[col + 1]);
            let next = inverse[col + 1];
            if next != PADDING {
                prefetch_hint(&src[next]);
            }
        }

        match inverse[col] {
            PADDING => {
                let len = runs[col];
                dst[col..col + len].copy_from_slice(&pad[..len]);
                col += len;
            }
            source => {
                dst[col] = src[source];
                col += 1;
            }
        }
    }
}
