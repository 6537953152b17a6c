//! Sequential minimal optimization for the C-SVC dual problem.
//!
//! Solves
//!
//! ```text
//! min  1/2 a^T Q a - e^T a
//! s.t. y^T a = 0,  0 <= a_i <= C
//! ```
//!
//! with `Q_ij = y_i y_j K(x_i, x_j)`. Each iteration picks a maximal violating
//! pair with second-order working set selection, solves the two-variable
//! subproblem analytically, clips it to the box and updates the gradient.

use std::rc::Rc;

use super::cache::KernelCache;
use super::kernel::{KernelFunction, SparseRow};

/// Substitute for a non-positive curvature.
const TAU: f64 = 1e-12;

/// Solver output.
#[derive(Debug, Clone)]
pub(crate) struct SmoSolution {
    /// Dual coefficients, one per training row.
    pub(crate) alpha: Vec<f64>,
    /// Decision threshold; `f(x) = sum a_i y_i K(x_i, x) - rho`.
    pub(crate) rho: f64,
    /// Dual objective value.
    pub(crate) objective: f64,
    pub(crate) iterations: usize,
    pub(crate) converged: bool,
}

pub(crate) struct SmoSolver<'a> {
    rows: &'a [SparseRow],
    /// +1.0 or -1.0 per row.
    y: &'a [f64],
    kernel: KernelFunction,
    c: f64,
    tol: f64,
    max_iter: usize,
    cache: KernelCache,
    /// Diagonal of Q.
    qd: Vec<f64>,
    alpha: Vec<f64>,
    /// Gradient of the objective: `Q a - e`.
    gradient: Vec<f64>,
}

impl<'a> SmoSolver<'a> {
    pub(crate) fn new(
        rows: &'a [SparseRow],
        y: &'a [f64],
        kernel: KernelFunction,
        c: f64,
        tol: f64,
        max_iter: usize,
        cache_rows: usize,
    ) -> Self {
        let l = rows.len();
        let qd = rows.iter().map(|x| kernel.compute(x, x)).collect();
        SmoSolver {
            rows,
            y,
            kernel,
            c,
            tol,
            max_iter,
            cache: KernelCache::new(cache_rows),
            qd,
            alpha: vec![0.0; l],
            gradient: vec![-1.0; l],
        }
    }

    fn is_upper(&self, i: usize) -> bool {
        self.alpha[i] >= self.c
    }

    fn is_lower(&self, i: usize) -> bool {
        self.alpha[i] <= 0.0
    }

    /// Row `i` of Q, computed on a cache miss.
    fn q_row(&mut self, i: usize) -> Rc<[f64]> {
        if let Some(row) = self.cache.get(i) {
            return row;
        }
        let (rows, y, kernel) = (self.rows, self.y, self.kernel);
        let row: Rc<[f64]> = rows
            .iter()
            .zip(y)
            .map(|(x_j, &y_j)| y[i] * y_j * kernel.compute(&rows[i], x_j))
            .collect();
        self.cache.insert(i, Rc::clone(&row));
        row
    }

    /// Second-order working set selection. `None` means optimal within `tol`.
    fn select_working_set(&mut self) -> Option<(usize, usize)> {
        let l = self.alpha.len();

        let mut g_max = f64::NEG_INFINITY;
        let mut i_best = None;
        for t in 0..l {
            if self.y[t] > 0.0 {
                if !self.is_upper(t) && -self.gradient[t] >= g_max {
                    g_max = -self.gradient[t];
                    i_best = Some(t);
                }
            } else if !self.is_lower(t) && self.gradient[t] >= g_max {
                g_max = self.gradient[t];
                i_best = Some(t);
            }
        }
        let i = i_best?;
        let q_i = self.q_row(i);

        let mut g_max2 = f64::NEG_INFINITY;
        let mut j_best = None;
        let mut obj_diff_min = f64::INFINITY;
        for j in 0..l {
            let (grad_diff, quad_coef) = if self.y[j] > 0.0 {
                if self.is_lower(j) {
                    continue;
                }
                g_max2 = g_max2.max(self.gradient[j]);
                (
                    g_max + self.gradient[j],
                    self.qd[i] + self.qd[j] - 2.0 * self.y[i] * q_i[j],
                )
            } else {
                if self.is_upper(j) {
                    continue;
                }
                g_max2 = g_max2.max(-self.gradient[j]);
                (
                    g_max - self.gradient[j],
                    self.qd[i] + self.qd[j] + 2.0 * self.y[i] * q_i[j],
                )
            };

            if grad_diff > 0.0 {
                let curvature = if quad_coef > 0.0 { quad_coef } else { TAU };
                let obj_diff = -(grad_diff * grad_diff) / curvature;
                if obj_diff <= obj_diff_min {
                    j_best = Some(j);
                    obj_diff_min = obj_diff;
                }
            }
        }

        if g_max + g_max2 < self.tol {
            return None;
        }
        j_best.map(|j| (i, j))
    }

    /// Solve the two-variable subproblem for `(i, j)` and update the gradient.
    fn update_pair(&mut self, i: usize, j: usize) {
        let q_i = self.q_row(i);
        let q_j = self.q_row(j);
        let c = self.c;

        let old_alpha_i = self.alpha[i];
        let old_alpha_j = self.alpha[j];
        let mut alpha_i = old_alpha_i;
        let mut alpha_j = old_alpha_j;

        if self.y[i] != self.y[j] {
            let quad_coef = self.qd[i] + self.qd[j] + 2.0 * q_i[j];
            let quad_coef = if quad_coef > 0.0 { quad_coef } else { TAU };
            let delta = (-self.gradient[i] - self.gradient[j]) / quad_coef;
            let diff = alpha_i - alpha_j;
            alpha_i += delta;
            alpha_j += delta;

            if diff > 0.0 {
                if alpha_j < 0.0 {
                    alpha_j = 0.0;
                    alpha_i = diff;
                }
            } else if alpha_i < 0.0 {
                alpha_i = 0.0;
                alpha_j = -diff;
            }
            // both bounds equal C, so the upper clip only depends on the sign of diff
            if diff > 0.0 {
                if alpha_i > c {
                    alpha_i = c;
                    alpha_j = c - diff;
                }
            } else if alpha_j > c {
                alpha_j = c;
                alpha_i = c + diff;
            }
        } else {
            let quad_coef = self.qd[i] + self.qd[j] - 2.0 * q_i[j];
            let quad_coef = if quad_coef > 0.0 { quad_coef } else { TAU };
            let delta = (self.gradient[i] - self.gradient[j]) / quad_coef;
            let sum = alpha_i + alpha_j;
            alpha_i -= delta;
            alpha_j += delta;

            if sum > c {
                if alpha_i > c {
                    alpha_i = c;
                    alpha_j = sum - c;
                }
            } else if alpha_j < 0.0 {
                alpha_j = 0.0;
                alpha_i = sum;
            }
            if sum > c {
                if alpha_j > c {
                    alpha_j = c;
                    alpha_i = sum - c;
                }
            } else if alpha_i < 0.0 {
                alpha_i = 0.0;
                alpha_j = sum;
            }
        }

        self.alpha[i] = alpha_i;
        self.alpha[j] = alpha_j;

        let delta_i = alpha_i - old_alpha_i;
        let delta_j = alpha_j - old_alpha_j;
        for (k, g) in self.gradient.iter_mut().enumerate() {
            *g += q_i[k] * delta_i + q_j[k] * delta_j;
        }
    }

    /// Threshold from the free support vectors, or the midpoint of the
    /// feasible interval when none are free.
    fn compute_rho(&self) -> f64 {
        let mut upper = f64::INFINITY;
        let mut lower = f64::NEG_INFINITY;
        let mut free_count = 0usize;
        let mut free_sum = 0.0;

        for i in 0..self.alpha.len() {
            let y_g = self.y[i] * self.gradient[i];
            if self.is_upper(i) {
                if self.y[i] < 0.0 {
                    upper = upper.min(y_g);
                } else {
                    lower = lower.max(y_g);
                }
            } else if self.is_lower(i) {
                if self.y[i] > 0.0 {
                    upper = upper.min(y_g);
                } else {
                    lower = lower.max(y_g);
                }
            } else {
                free_count += 1;
                free_sum += y_g;
            }
        }

        if free_count > 0 {
            free_sum / free_count as f64
        } else {
            (upper + lower) / 2.0
        }
    }

    pub(crate) fn solve(mut self) -> SmoSolution {
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            match self.select_working_set() {
                Some((i, j)) => self.update_pair(i, j),
                None => {
                    converged = true;
                    break;
                }
            }
            iterations += 1;
        }

        if !converged {
            log::warn!(
                "SMO stopped after {} iterations without reaching tol = {}",
                iterations,
                self.tol
            );
        }

        let rho = self.compute_rho();
        // objective = 1/2 a^T Q a - e^T a = 1/2 sum a_i (G_i - 1)
        let objective = self
            .alpha
            .iter()
            .zip(&self.gradient)
            .map(|(a, g)| a * (g - 1.0))
            .sum::<f64>()
            / 2.0;
        let (hits, misses) = self.cache.stats();
        log::debug!(
            "SMO finished: {} iterations, objective {:.6}, rho {:.6}, cache {}/{} hits",
            iterations,
            objective,
            rho,
            hits,
            hits + misses
        );

        SmoSolution {
            alpha: self.alpha,
            rho,
            objective,
            iterations,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::svm::Kernel;

    fn linear() -> KernelFunction {
        KernelFunction {
            kernel: Kernel::Linear,
            gamma: 1.0,
            degree: 3,
            coef0: 0.0,
        }
    }

    #[test]
    fn test_two_points() {
        // x = +1 and x = -1 on one axis: w = 1, b = 0, both alphas 0.5
        let rows = vec![SparseRow::new(vec![(0, 1.0)]), SparseRow::new(vec![(0, -1.0)])];
        let y = [1.0, -1.0];
        let solution = SmoSolver::new(&rows, &y, linear(), 10.0, 1e-6, 1000, 4).solve();

        assert!(solution.converged);
        assert!((solution.alpha[0] - 0.5).abs() < 1e-9);
        assert!((solution.alpha[1] - 0.5).abs() < 1e-9);
        assert!(solution.rho.abs() < 1e-9);
        assert!((solution.objective + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_alphas_respect_constraints() {
        let rows: Vec<SparseRow> = [(2.0, 0.0), (3.0, 1.0), (0.5, 0.2), (0.0, 2.0), (1.0, 3.0), (0.3, 0.4)]
            .iter()
            .map(|&(a, b)| SparseRow::new(vec![(0, a), (1, b)]))
            .collect();
        let y = [1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
        let c = 0.5;
        let solution = SmoSolver::new(&rows, &y, linear(), c, 1e-3, 10_000, 2).solve();

        let balance: f64 = solution.alpha.iter().zip(&y).map(|(a, y)| a * y).sum();
        assert!(balance.abs() < 1e-9);
        assert!(solution.alpha.iter().all(|&a| (0.0..=c).contains(&a)));
    }

    #[test]
    fn test_iteration_cap() {
        let rows = vec![SparseRow::new(vec![(0, 1.0)]), SparseRow::new(vec![(0, -1.0)])];
        let y = [1.0, -1.0];
        let solution = SmoSolver::new(&rows, &y, linear(), 10.0, 1e-6, 0, 4).solve();
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 0);
    }
}
