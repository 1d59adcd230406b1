use num::traits::AsPrimitive;

/// Squared Euclidean norm
#[inline]
pub fn norm_sq<N>(values: &[N]) -> f64
where
    N: AsPrimitive<f64>,
{
    values
        .iter()
        .map(|v| {
            let v: f64 = v.as_();
            v * v
        })
        .sum()
}

/// Euclidean norm
#[inline]
pub fn l2_norm<N>(values: &[N]) -> f64
where
    N: AsPrimitive<f64>,
{
    norm_sq(values).sqrt()
}

/// Divide every value by `norm`.
/// A zero (or non-finite) norm yields all zeros instead of NaN.
#[inline]
pub fn scale_by_norm<N>(values: &[N], norm: f64) -> Vec<f64>
where
    N: AsPrimitive<f64>,
{
    if norm == 0.0 || !norm.is_finite() {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| {
            let v: f64 = v.as_();
            v / norm
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn norm_of_three_four() {
        assert_eq!(norm_sq(&[3u64, 4]), 25.0);
        assert_eq!(l2_norm(&[3u64, 4]), 5.0);
        assert_eq!(l2_norm::<f64>(&[]), 0.0);
    }

    #[test]
    fn scale_divides_by_norm() {
        let scaled = scale_by_norm(&[3u64, 4], 5.0);
        assert_relative_eq!(scaled[0], 0.6);
        assert_relative_eq!(scaled[1], 0.8);
    }

    #[test]
    fn zero_norm_scales_to_zeros() {
        assert_eq!(scale_by_norm(&[0u64, 0, 0], 0.0), vec![0.0, 0.0, 0.0]);
        assert_eq!(scale_by_norm(&[1.0f64], f64::NAN), vec![0.0]);
    }
}
