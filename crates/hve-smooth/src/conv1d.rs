/// Offset of the "same"-length window inside the full convolution:
/// `out[k] = full[k + (kernel_len - 1) / 2]`.
#[inline]
pub fn same_offset(kernel_len: usize) -> usize {
    kernel_len.saturating_sub(1) / 2
}

/// Discrete convolution of `signal` with `kernel`, cropped to the length of
/// `signal`.
///
/// `out[k] = sum_j signal[j] * kernel[k + off - j]` with
/// `off = same_offset(kernel.len())` and out-of-range kernel taps treated as
/// zero. For odd kernels this centers the kernel on each output sample; for
/// even kernels the extra tap falls on the right. The output never changes
/// length, even when the kernel is longer than the signal.
pub fn convolve_same_f64(signal: &[f64], kernel: &[f64], out: &mut [f64]) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert!(!kernel.is_empty(), "kernel must not be empty");

    out.fill(0.0);

    let n = signal.len();
    if n == 0 {
        return;
    }

    let klen = kernel.len();
    let off = same_offset(klen);

    // Scatter each input sample over its output footprint. For a fixed output
    // index the products are still accumulated in ascending input order, and
    // zero inputs contribute nothing, so skipping them leaves every sum intact.
    for (j, &x) in signal.iter().enumerate() {
        if x == 0.0 {
            continue;
        }

        let k_start = j.saturating_sub(off);
        let k_end = (j + klen).saturating_sub(off + 1).min(n - 1);
        if j + klen <= off || k_start > k_end {
            continue;
        }

        for (k, out_k) in out
            .iter_mut()
            .enumerate()
            .take(k_end + 1)
            .skip(k_start)
        {
            *out_k += x * kernel[k + off - j];
        }
    }
}

/// Allocating wrapper around [`convolve_same_f64`].
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0f64; signal.len()];
    convolve_same_f64(signal, kernel, &mut out);
    out
}
