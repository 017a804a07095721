use crate::util::*;
use num_traits::{NumAssign, Zero};

/// Exact row-major matrix multiplication `lhs (m x k) * rhs (k x n)` on the host
pub fn mtx_mul<T>(lhs: &[T], rhs: &[T], m_dim: usize, k_dim: usize, n_dim: usize) -> Vec<T>
where
    T: NumAssign + Zero + Copy,
{
    debug_assert_eq!(lhs.len(), m_dim * k_dim);
    debug_assert_eq!(rhs.len(), k_dim * n_dim);

    let mut c_mul = vec![Zero::zero(); m_dim * n_dim];
    for i in 0..m_dim {
        for j in 0..n_dim {
            for z in 0..k_dim {
                *c_mul.elem_mut(n_dim, i, j) += *lhs.elem(k_dim, i, z) * *rhs.elem(n_dim, z, j);
            }
        }
    }
    c_mul
}
