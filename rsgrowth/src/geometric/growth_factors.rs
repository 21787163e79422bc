use crate::commons::basic_functions::identical_values;
use crate::error::{GrowthError, GrowthResult};
use crate::geometric::grid::FactorGrid;

/// Ordered set of growth factor rasters (proximity to roads, slope, ...)
/// Factor `n` (1-based) is paired with the `n`-th threshold of the model.
#[derive(Debug, Clone)]
pub struct GrowthFactorSet {
    factors: Vec<FactorGrid>,
    rows: usize,
    cols: usize,
}

impl GrowthFactorSet {
    /// Validate that all factor grids share the same size
    pub fn load(factors: Vec<FactorGrid>) -> GrowthResult<Self> {
        println!("Checking the size of input growth factors...");
        let first = factors.first().ok_or(GrowthError::EmptyFactorSet)?;

        let rows: Vec<usize> = factors.iter().map(|f| f.height()).collect();
        let cols: Vec<usize> = factors.iter().map(|f| f.width()).collect();
        let (same_rows, distinct_rows) = identical_values(&rows);
        let (same_cols, distinct_cols) = identical_values(&cols);

        if !(same_rows && same_cols) {
            println!(
                "Input factors have different row and column values: rows {:?}, cols {:?}",
                distinct_rows, distinct_cols
            );
            let odd_one = factors
                .iter()
                .find(|f| !first.same_shape(f))
                .map(|f| f.shape())
                .unwrap_or_default();
            return Err(GrowthError::ShapeMismatch {
                what: "growth factor rasters",
                expected: first.shape(),
                found: odd_one,
            });
        }
        println!("Input factors have same row and column value.");

        let (rows, cols) = first.shape();
        Ok(GrowthFactorSet {
            factors,
            rows,
            cols,
        })
    }

    /// Decode factor rasters in the given order
    #[cfg(feature = "gdal")]
    pub fn from_files<P: AsRef<std::path::Path>>(paths: &[P]) -> anyhow::Result<Self> {
        use crate::collect::raster::decode_factor_grid;

        let factors = paths
            .iter()
            .map(|p| decode_factor_grid(p.as_ref()))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::load(factors)?)
    }

    /// Value of factor `n` (1-based) at (row, col)
    #[inline]
    pub fn factor_value(&self, n: usize, row: usize, col: usize) -> f64 {
        self.factors[n - 1].get(row, col)
    }

    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    pub fn factors(&self) -> &[FactorGrid] {
        &self.factors
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometric::grid::Grid;

    #[test]
    fn test_load_factors() {
        let road = Grid::filled(4, 3, 10.0).unwrap();
        let slope = Grid::from_rows(&[
            vec![0.0, 1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0, 7.0],
            vec![8.0, 9.0, 10.0, 11.0],
        ])
        .unwrap();
        let set = GrowthFactorSet::load(vec![road, slope]).unwrap();
        assert_eq!(set.factor_count(), 2);
        assert_eq!(set.shape(), (3, 4));
        assert_eq!(set.factor_value(1, 2, 3), 10.0);
        assert_eq!(set.factor_value(2, 1, 2), 6.0);
    }

    #[test]
    fn test_load_shape_mismatch() {
        let a = Grid::filled(4, 3, 1.0).unwrap();
        let b = Grid::filled(4, 3, 2.0).unwrap();
        let c = Grid::filled(3, 3, 3.0).unwrap();
        let err = GrowthFactorSet::load(vec![a, b, c]).unwrap_err();
        assert_eq!(
            err,
            GrowthError::ShapeMismatch {
                what: "growth factor rasters",
                expected: (3, 4),
                found: (3, 3)
            }
        );
    }

    #[test]
    fn test_load_empty() {
        let err = GrowthFactorSet::load(Vec::new()).unwrap_err();
        assert_eq!(err, GrowthError::EmptyFactorSet);
    }
}
