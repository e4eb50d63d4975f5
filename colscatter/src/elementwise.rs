/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use colscatter_utils::{MatrixView, MutMatrixView};

use crate::{backend::check_shapes, plan::PADDING, ScatterColumns, ScatterPlan};

/// Row copy engine that writes every destination cell on its own.
///
/// This ignores the padding run structure of the plan and never prefetches. It serves as
/// a portable baseline and as the oracle the other backends are checked against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Elementwise;

impl ScatterColumns for Elementwise {
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
        tracing::trace!(rows = params.nrows(), "scattering columns elementwise");

        let inverse = plan.inverse();
        for (src, dst) in params.row_iter().zip(output.row_iter_mut()) {
            for (out, &source) in dst.iter_mut().zip(inverse) {
                *out = if source == PADDING {
                    pad_value
                } else {
                    src[source]
                };
            }
        }
    }
}
