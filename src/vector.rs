//! Dense vector helpers for cosine similarity.
//!
//! ```text
//! cos(a, b) = (a · b) / (|a| × |b|)
//! ```
//!
//! Undefined when either norm is zero; callers pick a [`ZeroNormPolicy`].
//!
//! Sums are accumulated in `f64`. Squaring any finite `f32` stays finite and
//! non-zero there, so very large or very small vectors still get a score and
//! only a vector of exact zeros has a zero norm. The score is narrowed back to
//! `f32` at the end.

use crate::{Error, Result, ZeroNormPolicy};

/// Dot product, accumulated in `f64`. Extra components of the longer slice are ignored.
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

/// Euclidean (L2) norm, accumulated in `f64`.
#[must_use]
pub fn norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

/// Fail unless `actual` has the `expected` length.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] when the lengths differ.
pub fn check_dimension(expected: usize, actual: &[f32]) -> Result<()> {
    if actual.len() == expected {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected,
            actual: actual.len(),
        })
    }
}

/// Cosine similarity of two equal-length vectors.
///
/// `index` labels `candidate` in a [`Error::DegenerateVector`] error.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if the lengths differ.
/// - [`Error::DegenerateVector`] if a norm is zero under
///   [`ZeroNormPolicy::Reject`], or the score is not finite.
pub fn cosine_similarity(
    query: &[f32],
    candidate: &[f32],
    index: Option<usize>,
    policy: ZeroNormPolicy,
) -> Result<f32> {
    check_dimension(query.len(), candidate)?;
    scored(dot(query, candidate), norm(query), norm(candidate), index, policy)
}

/// Finish a cosine computation from a dot product and precomputed norms.
pub(crate) fn scored(
    dot: f64,
    query_norm: f64,
    candidate_norm: f64,
    index: Option<usize>,
    policy: ZeroNormPolicy,
) -> Result<f32> {
    if query_norm == 0.0 || candidate_norm == 0.0 {
        return match policy {
            ZeroNormPolicy::ZeroScore => Ok(0.0),
            ZeroNormPolicy::Reject => Err(Error::DegenerateVector {
                index: if query_norm == 0.0 { None } else { index },
            }),
        };
    }

    let score = (dot / (query_norm * candidate_norm)) as f32;
    if score.is_finite() {
        Ok(score)
    } else {
        Err(Error::DegenerateVector { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_dot_and_norm() {
        assert!((dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - 32.0).abs() < 1e-12);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(norm(&[]), 0.0);
    }

    #[test]
    fn test_large_magnitudes_do_not_overflow() {
        let r = ZeroNormPolicy::Reject;
        let score = cosine_similarity(&[1e20, 1e20], &[2e20, 2e20], Some(0), r).unwrap();
        assert!(approx(score, 1.0));

        let score = cosine_similarity(&[f32::MAX, 0.0], &[0.0, f32::MAX], Some(0), r).unwrap();
        assert!(approx(score, 0.0));
    }

    #[test]
    fn test_tiny_magnitudes_do_not_underflow() {
        let r = ZeroNormPolicy::Reject;
        let score = cosine_similarity(&[1e-25, 0.0], &[1.0, 0.0], Some(0), r).unwrap();
        assert!(approx(score, 1.0));

        // smallest subnormal is still a non-zero vector
        let tiny = f32::from_bits(1);
        let score = cosine_similarity(&[-tiny, 0.0], &[tiny, 0.0], Some(0), r).unwrap();
        assert!(approx(score, -1.0));
    }

    #[test]
    fn test_cosine_basic() {
        let r = ZeroNormPolicy::Reject;
        assert!(approx(cosine_similarity(&[1.0, 0.0], &[2.0, 0.0], Some(0), r).unwrap(), 1.0));
        assert!(approx(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0], Some(0), r).unwrap(), 0.0));
        assert!(approx(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0], Some(0), r).unwrap(), -1.0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0], Some(3), ZeroNormPolicy::Reject)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_zero_candidate() {
        let err =
            cosine_similarity(&[1.0, 0.0], &[0.0, 0.0], Some(4), ZeroNormPolicy::Reject).unwrap_err();
        assert!(matches!(err, Error::DegenerateVector { index: Some(4) }));

        let score =
            cosine_similarity(&[1.0, 0.0], &[0.0, 0.0], Some(4), ZeroNormPolicy::ZeroScore).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_zero_query_is_reported_as_query() {
        let err =
            cosine_similarity(&[0.0, 0.0], &[1.0, 0.0], Some(1), ZeroNormPolicy::Reject).unwrap_err();
        assert!(matches!(err, Error::DegenerateVector { index: None }));
    }

    #[test]
    fn test_non_finite_rejected_under_either_policy() {
        for policy in [ZeroNormPolicy::Reject, ZeroNormPolicy::ZeroScore] {
            let err = cosine_similarity(&[1.0, 0.0], &[f32::NAN, 1.0], Some(0), policy).unwrap_err();
            assert!(matches!(err, Error::DegenerateVector { index: Some(0) }));
        }
    }
}
