/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use colscatter_utils::{MatrixView, MutMatrixView};

use crate::{
    error::ScatterResult, BackendKind, ColumnIndex, Elementwise, Runs, ScatterConfig,
    ScatterPlan,
};

/// Place the columns of a dense row-major matrix into a wider matrix, filling the
/// remaining columns with a pad value.
///
/// Every implementation must produce the same output for the same inputs. Callers choose
/// an implementation; [`Backend`] selects one at runtime from a [`ScatterConfig`].
///
/// # Shapes
///
/// With `C` source columns and an output width of `W`, the host is responsible for
/// passing `params` with `C` columns and `output` with `W` columns and the same number of
/// rows as `params`. Implementations panic if these do not hold.
pub trait ScatterColumns {
    /// Apply a validated plan to every row of `params`, writing all of `output`.
    ///
    /// # Panics
    ///
    /// Panics if `params.ncols() != plan.source_columns()`,
    /// `output.ncols() != plan.output_width()` or `params.nrows() != output.nrows()`.
    fn scatter_planned<T>(
        &self,
        plan: &ScatterPlan,
        params: MatrixView<'_, T>,
        pad_value: T,
        output: MutMatrixView<'_, T>,
    ) where
        T: Copy;

    /// Write column `i` of `params` to column `indices[i]` of `output` and fill every other
    /// column of `output` with `pad_value`.
    ///
    /// The output width is `output.ncols()`. On error `output` is not modified.
    ///
    /// # Errors
    ///
    /// Fails if `indices` contains a duplicate or a value outside `[0, output.ncols())`.
    /// See [`ScatterPlan::new`].
    ///
    /// # Panics
    ///
    /// Panics if `params.ncols() != indices.len()` or `params.nrows() != output.nrows()`.
    fn scatter_columns<T, I>(
        &self,
        params: MatrixView<'_, T>,
        indices: &[I],
        pad_value: T,
        output: MutMatrixView<'_, T>,
    ) -> ScatterResult<()>
    where
        T: Copy,
        I: ColumnIndex,
    {
        let plan = ScatterPlan::new(indices, output.ncols())?;
        self.scatter_planned(&plan, params, pad_value, output);
        Ok(())
    }
}

/// A runtime selected [`ScatterColumns`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Copy padding in runs from a shared buffer. See [`Runs`].
    Runs(Runs),
    /// Write every destination cell individually. See [`Elementwise`].
    Elementwise(Elementwise),
}

impl Backend {
    /// Return which kind of backend this is.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Runs(_) => BackendKind::Runs,
            Self::Elementwise(_) => BackendKind::Elementwise,
        }
    }
}

impl From<&ScatterConfig> for Backend {
    fn from(config: &ScatterConfig) -> Self {
        match config.backend() {
            BackendKind::Runs => Self::Runs(Runs::new(config.prefetch())),
            BackendKind::Elementwise => Self::Elementwise(Elementwise),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::from(&ScatterConfig::default())
    }
}

impl ScatterColumns for Backend {
    #[inline]
    fn scatter_planned<T>(
        &self,
        plan: &ScatterPlan,
        params: MatrixView<'_, T>,
        pad_value: T,
        output: MutMatrixView<'_, T>,
    ) where
        T: Copy,
    {
        match self {
            Self::Runs(backend) => backend.scatter_planned(plan, params, pad_value, output),
            Self::Elementwise(backend) => {
                backend.scatter_planned(plan, params, pad_value, output)
            }
        }
    }
}

/// Enforce the shape contract shared by all backends.
pub(crate) fn check_shapes<T>(
    plan: &ScatterPlan,
    params: &MatrixView<'_, T>,
    output: &MutMatrixView<'_, T>,
) {
    assert_eq!(
        params.ncols(),
        plan.source_columns(),
        "expected a source matrix with {} columns, instead got {}",
        plan.source_columns(),
        params.ncols(),
    );
    assert_eq!(
        output.ncols(),
        plan.output_width(),
        "expected an output matrix with {} columns, instead got {}",
        plan.output_width(),
        output.ncols(),
    );
    assert_eq!(
        params.nrows(),
        output.nrows(),
        "expected an output matrix with {} rows, instead got {}",
        params.nrows(),
        output.nrows(),
    );
}
