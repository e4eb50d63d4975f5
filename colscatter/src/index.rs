/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::{Debug, Display};

/// Integer types that can name a destination column.
///
/// Negative values and values that do not fit in a `usize` never name a column.
pub trait ColumnIndex: Copy + Debug + Display {
    /// Return the column named by `self`, if it is representable as a `usize`.
    fn to_column(self) -> Option<usize>;

    /// Widen `self` without loss for error reporting.
    fn widen(self) -> i128;
}

macro_rules! impl_column_index {
    ($($T:ty),* $(,)?) => {
        $(
            impl ColumnIndex for $T {
                #[inline(always)]
                fn to_column(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline(always)]
                fn widen(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_column_index!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
