//! Chebyshev series evaluation.
//!
//! Both functions generate the basis with the three-term recurrence
//! `T0 = 1, T1 = u, Tn = 2·u·T(n-1) − T(n-2)` instead of evaluating powers of `u`, which stays
//! well conditioned for the 32-coefficient series found in DE files.

/// Largest number of coefficients per component found in a DE/INPOP record.
pub const MAX_CHEBYSHEV_COEFFS: usize = 32;

/// Evaluate `Σ c_n·T_n(u)` for a normalized time `u ∈ [-1, 1]`.
pub fn chebyshev_sum(coeffs: &[f64], u: f64) -> f64 {
    let Some((&c0, rest)) = coeffs.split_first() else {
        return 0.0;
    };

    let mut sum = c0;
    let mut t_prev = 1.0;
    let mut t_curr = u;
    let twice_u = u + u;

    for (n, c) in rest.iter().enumerate() {
        if n > 0 {
            let t_next = twice_u * t_curr - t_prev;
            t_prev = t_curr;
            t_curr = t_next;
        }
        sum += c * t_curr;
    }

    sum
}

/// Evaluate the derivative `Σ c_n·T'_n(u)` with respect to `u`.
///
/// Uses `T'0 = 0, T'1 = 1, T'n = 2·u·T'(n-1) + 2·T(n-1) − T'(n-2)`.
pub fn chebyshev_derivative_sum(coeffs: &[f64], u: f64) -> f64 {
    if coeffs.len() < 2 {
        return 0.0;
    }

    let twice_u = u + u;

    let (mut t_prev, mut t_curr) = (1.0, u);
    let (mut d_prev, mut d_curr) = (0.0, 1.0);
    let mut sum = coeffs[1];

    for c in &coeffs[2..] {
        let t_next = twice_u * t_curr - t_prev;
        let d_next = twice_u * d_curr + 2.0 * t_curr - d_prev;

        sum += c * d_next;

        t_prev = t_curr;
        t_curr = t_next;
        d_prev = d_curr;
        d_curr = d_next;
    }

    sum
}
