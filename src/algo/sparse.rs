//! Sparse matrix and LU solver for the conformal systems.
//!
//! This module provides a lightweight column-major sparse matrix (CSC
//! format) built from triplets, and a sparse LU factorization with partial
//! pivoting. The conformal system assembled per island is square but not
//! symmetric, so a direct factorization is used rather than conjugate
//! gradients.

use nalgebra::DVector;

use crate::error::{Result, UnwrapError};

/// Compressed Sparse Column (CSC) matrix.
///
/// Triplet assembly followed by a single compression keeps per-entry
/// insertion O(1) during matrix construction; the factorization then works
/// column by column over the compressed form.
#[derive(Debug, Clone)]
pub struct CscMatrix {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Column pointers: `col_ptr[j]` is the index in `row_idx`/`values`
    /// where column j starts. Length is `cols + 1`, with
    /// `col_ptr[cols] = nnz`.
    col_ptr: Vec<usize>,
    /// Row indices for each non-zero value.
    row_idx: Vec<usize>,
    /// Non-zero values.
    values: Vec<f64>,
}

impl CscMatrix {
    /// Create a CSC matrix from triplets (row, col, value).
    ///
    /// Duplicate entries at the same (row, col) are summed.
    pub fn from_triplets(rows: usize, cols: usize, mut triplets: Vec<(usize, usize, f64)>) -> Self {
        if triplets.is_empty() {
            return Self {
                rows,
                cols,
                col_ptr: vec![0; cols + 1],
                row_idx: Vec::new(),
                values: Vec::new(),
            };
        }

        // Sort by (col, row) for CSC construction
        triplets.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut col_ptr = vec![0usize; cols + 1];
        let mut row_idx = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());

        let mut prev_col = usize::MAX;
        let mut prev_row = usize::MAX;

        for (row, col, val) in triplets {
            if col == prev_col && row == prev_row {
                // Same position: accumulate value
                *values.last_mut().unwrap() += val;
            } else {
                row_idx.push(row);
                values.push(val);
                // Update column pointers for any skipped columns
                for c in (prev_col.wrapping_add(1))..=col {
                    col_ptr[c] = row_idx.len() - 1;
                }
                prev_col = col;
                prev_row = row;
            }
        }

        // Fill remaining column pointers
        let nnz = row_idx.len();
        for c in (prev_col + 1)..=cols {
            col_ptr[c] = nnz;
        }

        Self {
            rows,
            cols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Get the number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Get the number of non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row indices and values of column `j`.
    #[inline]
    pub fn col(&self, j: usize) -> (&[usize], &[f64]) {
        let range = self.col_ptr[j]..self.col_ptr[j + 1];
        (&self.row_idx[range.clone()], &self.values[range])
    }

    /// Multiply matrix by vector: y = A * x.
    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        assert_eq!(x.len(), self.cols, "Vector dimension mismatch");

        let mut y = DVector::zeros(self.rows);
        for j in 0..self.cols {
            let xj = x[j];
            if xj == 0.0 {
                continue;
            }
            let (rows, vals) = self.col(j);
            for (&r, &v) in rows.iter().zip(vals) {
                y[r] += v * xj;
            }
        }
        y
    }
}

/// Sparse LU factorization `P·A = L·U` with partial pivoting.
///
/// Columns are factored left to right: each column of A is scattered into a
/// dense workspace, eliminated against the previously computed columns of
/// L, and the largest remaining entry becomes the pivot. L is unit lower
/// triangular; its stored entries keep their original row indices, with the
/// permutation tracked separately.
#[derive(Debug, Clone)]
pub struct SparseLu {
    n: usize,
    /// Below-pivot multipliers per column, as (original row, value).
    l_cols: Vec<Vec<(usize, f64)>>,
    /// Above-diagonal entries of U per column, as (elimination step, value).
    u_cols: Vec<Vec<(usize, f64)>>,
    /// Diagonal of U, per elimination step.
    u_diag: Vec<f64>,
    /// Pivot row (original indexing) chosen at each elimination step.
    piv: Vec<usize>,
}

impl SparseLu {
    /// Factor a square CSC matrix.
    ///
    /// # Errors
    ///
    /// Returns [`UnwrapError::SingularSystem`] when a column has no usable
    /// pivot (zero or non-finite).
    pub fn factor(a: &CscMatrix) -> Result<Self> {
        assert_eq!(a.nrows(), a.ncols(), "Matrix must be square");
        let n = a.nrows();

        let mut l_cols: Vec<Vec<(usize, f64)>> = Vec::with_capacity(n);
        let mut u_cols: Vec<Vec<(usize, f64)>> = Vec::with_capacity(n);
        let mut u_diag = Vec::with_capacity(n);
        let mut piv = Vec::with_capacity(n);
        let mut pivoted = vec![false; n];

        // Dense workspace for the current column, indexed by original row.
        let mut x = vec![0.0f64; n];

        for k in 0..n {
            let (rows, vals) = a.col(k);
            for (&r, &v) in rows.iter().zip(vals) {
                x[r] = v;
            }

            // Eliminate against previous columns in pivot order. The loop
            // runs ascending so each U entry is read after all updates
            // from earlier steps have landed on it.
            let mut ucol = Vec::new();
            for (i, &p) in piv.iter().enumerate() {
                let xi = x[p];
                if xi != 0.0 {
                    ucol.push((i, xi));
                    x[p] = 0.0;
                    for &(r, l) in &l_cols[i] {
                        x[r] -= l * xi;
                    }
                }
            }

            // Partial pivot: largest remaining magnitude, lowest row on ties.
            let mut p_row = usize::MAX;
            let mut p_val = 0.0f64;
            for (r, &xr) in x.iter().enumerate() {
                if !pivoted[r] && xr.abs() > p_val.abs() {
                    p_row = r;
                    p_val = xr;
                }
            }
            if p_row == usize::MAX || !p_val.is_finite() {
                return Err(UnwrapError::SingularSystem { column: k });
            }

            pivoted[p_row] = true;
            let mut lcol = Vec::new();
            for (r, &xr) in x.iter().enumerate() {
                if !pivoted[r] && xr != 0.0 {
                    lcol.push((r, xr / p_val));
                }
            }

            piv.push(p_row);
            u_diag.push(p_val);
            u_cols.push(ucol);
            l_cols.push(lcol);
            x.fill(0.0);
        }

        Ok(Self {
            n,
            l_cols,
            u_cols,
            u_diag,
            piv,
        })
    }

    /// Solve `A·x = b` using the computed factorization.
    pub fn solve(&self, b: &DVector<f64>) -> DVector<f64> {
        assert_eq!(b.len(), self.n, "Vector dimension mismatch");

        // Forward substitution: L·y = P·b
        let mut w: Vec<f64> = b.iter().copied().collect();
        let mut y = vec![0.0f64; self.n];
        for i in 0..self.n {
            let yi = w[self.piv[i]];
            y[i] = yi;
            if yi != 0.0 {
                for &(r, l) in &self.l_cols[i] {
                    w[r] -= l * yi;
                }
            }
        }

        // Back substitution: U·x = y
        let mut x = vec![0.0f64; self.n];
        for k in (0..self.n).rev() {
            let xk = y[k] / self.u_diag[k];
            x[k] = xk;
            if xk != 0.0 {
                for &(i, u) in &self.u_cols[k] {
                    y[i] -= u * xk;
                }
            }
        }

        DVector::from_vec(x)
    }
}
