use num::{traits::AsPrimitive, Num};
use rayon::prelude::*;

use crate::utils::math::{l2_norm, scale_by_norm};
use crate::vectorizer::matrix::TermDocumentMatrix;

/// L2 document vectors.
///
/// Norms are computed from the matrix they are called on and never cached;
/// a transformed matrix needs its own call.
impl<N> TermDocumentMatrix<N>
where
    N: Num + Copy + AsPrimitive<f64> + Send + Sync,
{
    /// Euclidean norm of every row, `sqrt(Σ cell²)`
    pub fn norms(&self) -> Vec<f64> {
        let rows: Vec<&[N]> = self.rows().collect();
        rows.par_iter().map(|row| l2_norm(row)).collect()
    }

    /// Every row divided by its norm.
    ///
    /// A row whose norm is zero (a document that cleaned down to nothing)
    /// stays all zero rather than turning into NaN.
    pub fn l2_normalize(&self) -> TermDocumentMatrix<f64> {
        let rows: Vec<&[N]> = self.rows().collect();
        let cells: Vec<f64> = rows
            .par_iter()
            .flat_map_iter(|row| scale_by_norm(row, l2_norm(row)))
            .collect();
        tracing::debug!(documents = self.n_docs(), "document vectors normalized");
        TermDocumentMatrix::from_parts(self.vocabulary().clone(), self.n_docs(), cells)
    }
}
