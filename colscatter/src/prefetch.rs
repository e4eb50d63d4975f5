/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "sse"))] {
        /// Hint that the cache line holding `value` will be accessed soon.
        #[inline(always)]
        pub(crate) fn prefetch_hint<T>(value: &T) {
            use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};

            let ptr: *const T = value;
            // SAFETY: `ptr` is derived from a live reference, prefetching never faults, and
            // use of the intrinsic is gated by the `cfg` on this function.
            unsafe { _mm_prefetch(ptr.cast::<i8>(), _MM_HINT_T0) }
        }
    } else {
        #[inline(always)]
        pub(crate) fn prefetch_hint<T>(_value: &T) {}
    }
}
