use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Sparse system matrix for least-squares solves.
///
/// Stored in CSR form together with its transpose, since LSQR needs `A · x` and `Aᵀ · y`
/// on every iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    matrix: CsrMatrix<f64>,
    transpose: CsrMatrix<f64>
}

impl SparseMatrix {
    /// Builds the matrix from `(row, col, value)` triplets. Entries sharing a position are summed.
    ///
    /// Panics if a triplet lies outside `rows × cols`.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> SparseMatrix {
        let mut coo = CooMatrix::new(rows, cols);
        for &(row, col, value) in triplets {
            coo.push(row, col, value);
        }

        let matrix = CsrMatrix::from(&coo);
        SparseMatrix {
            transpose: matrix.transpose(),
            matrix
        }
    }

    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// `A · x`
    pub fn multiply(&self, x: &DVector<f64>) -> DVector<f64> {
        &self.matrix * x
    }

    /// `Aᵀ · y`
    pub fn transpose_multiply(&self, y: &DVector<f64>) -> DVector<f64> {
        &self.transpose * y
    }
}
