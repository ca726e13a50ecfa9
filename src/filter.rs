use std::iter::Sum;
use std::ops::{Div, Mul, Sub};

use num::traits::Zero;

/// Direct form linear filter
///
/// `a[0]·y[n] = Σ b[j]·x[n-j] - Σ a[j]·y[n-j]`, j ≥ 1 in the feedback sum.
/// With `a = [1]` this is a plain FIR convolution with `b`.
pub fn lfilter<T>(b: &[T], a: &[T], input: &[T]) -> Vec<T>
where
    T: Copy + Zero + Mul<Output = T> + Div<Output = T> + Sub<Output = T> + Sum<T>,
{
    let mut output = vec![T::zero(); input.len()];

    let a0 = match a.first() {
        Some(&a0) => a0,
        None => return output,
    };

    let sum = |vals: &[T], coeffs: &[T], n: usize| -> T {
        coeffs
            .iter()
            .take(n + 1)
            .enumerate()
            .map(|(j, &c)| c * vals[n - j])
            .sum()
    };

    for n in 0..input.len() {
        // output[n] is still zero here, so a[0] drops out of the feedback sum
        output[n] = (sum(input, b, n) - sum(&output, a, n)) / a0;
    }

    output
}
