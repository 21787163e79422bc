#[cfg(feature = "indicatif")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::collect::global_variables::BUILTUP_CLASS;
#[cfg(not(feature = "indicatif"))]
use crate::collect::global_variables::PROGRESS_INTERVAL;
use crate::error::{GrowthError, GrowthResult};
use crate::geometric::grid::LandCoverGrid;
use crate::geometric::growth_factors::GrowthFactorSet;
use crate::geometric::land_cover::LandCoverComparison;
use crate::model::accuracy::AccuracyReport;
use crate::model::config::ModelConfig;

#[cfg(feature = "indicatif")]
fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {percent} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

/// Land cover date the prediction starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    T1 = 1,
    T2 = 2,
}

impl TryFrom<u8> for Base {
    type Error = GrowthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Base::T1),
            2 => Ok(Base::T2),
            other => Err(GrowthError::InvalidBaseArgument(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Thresholds {
    builtup: u32,
    factors: Vec<f64>,
}

/// Whether a factor value satisfies its signed threshold.
/// Negative thresholds trigger at or below their magnitude,
/// positive ones at or above.
#[inline]
fn factor_triggers(threshold: f64, value: f64) -> bool {
    if threshold < 0.0 {
        value <= threshold.abs()
    } else {
        value >= threshold
    }
}

/// Check one non-zero, non-NaN threshold per growth factor
pub fn validate_thresholds(factor_count: usize, factor_thresholds: &[f64]) -> GrowthResult<()> {
    if factor_thresholds.len() != factor_count {
        return Err(GrowthError::ThresholdCountMismatch {
            expected: factor_count,
            found: factor_thresholds.len(),
        });
    }
    if let Some((idx, &value)) = factor_thresholds
        .iter()
        .enumerate()
        .find(|(_, &t)| t == 0.0 || t.is_nan())
    {
        return Err(GrowthError::InvalidThreshold {
            factor: idx + 1,
            value,
        });
    }
    Ok(())
}

/// Built-up cells in the square window of half-width `half` centered on (row, col)
fn builtup_count(grid: &LandCoverGrid, row: usize, col: usize, half: usize) -> usize {
    let mut count = 0;
    for r in row - half..=row + half {
        for c in col - half..=col + half {
            if grid.get(r, c) == BUILTUP_CLASS {
                count += 1;
            }
        }
    }
    count
}

/// Cellular automaton predicting built-up growth
/// Reads the land cover at t1 and the growth factors, and turns a non
/// built-up cell into built-up when its neighborhood is dense enough and at
/// least one factor passes its threshold.
pub struct GrowthModel<'a> {
    landcovers: &'a LandCoverComparison,
    factors: &'a GrowthFactorSet,
    kernel_size: usize,
    thresholds: Option<Thresholds>,
    show_progress: bool,
    predicted: Option<LandCoverGrid>,
    accuracy: Option<AccuracyReport>,
}

impl<'a> GrowthModel<'a> {
    /// Create a model over aligned land cover and growth factor rasters
    pub fn new(
        landcovers: &'a LandCoverComparison,
        factors: &'a GrowthFactorSet,
        kernel_size: usize,
    ) -> GrowthResult<Self> {
        if kernel_size == 0 || kernel_size % 2 == 0 {
            return Err(GrowthError::InvalidKernelSize(kernel_size));
        }

        println!("Matching the size of land cover and growth factors...");
        let expected = (landcovers.rows(), landcovers.cols());
        if factors.shape() != expected {
            return Err(GrowthError::ShapeMismatch {
                what: "growth factors against land cover",
                expected,
                found: factors.shape(),
            });
        }
        println!("Size of rasters matched.");

        Ok(GrowthModel {
            landcovers,
            factors,
            kernel_size,
            thresholds: None,
            show_progress: false,
            predicted: None,
            accuracy: None,
        })
    }

    /// Create and configure a model in one go
    pub fn from_config(
        landcovers: &'a LandCoverComparison,
        factors: &'a GrowthFactorSet,
        config: &ModelConfig,
    ) -> GrowthResult<Self> {
        let mut model = Self::new(landcovers, factors, config.kernel_size)?;
        model.configure_thresholds(config.builtup_threshold, config.factor_thresholds.clone())?;
        model.set_show_progress(config.show_progress);
        Ok(model)
    }

    /// Set the neighborhood density threshold and one threshold per factor
    /// A positive threshold `t` lets a factor trigger growth when its value is
    /// at least `t`; a negative threshold `-t` when its value is at most `t`.
    /// Zero carries no direction and is rejected.
    pub fn configure_thresholds(
        &mut self,
        builtup_threshold: u32,
        factor_thresholds: Vec<f64>,
    ) -> GrowthResult<()> {
        validate_thresholds(self.factors.factor_count(), &factor_thresholds)?;

        self.thresholds = Some(Thresholds {
            builtup: builtup_threshold,
            factors: factor_thresholds,
        });
        println!("Threshold set for factors");
        Ok(())
    }

    pub fn set_show_progress(&mut self, show_progress: bool) {
        self.show_progress = show_progress;
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    /// ceil(kernel_size / 2), kernel_size being odd
    pub fn margin(&self) -> usize {
        self.kernel_size / 2 + 1
    }

    /// Run the automaton from the chosen base date
    /// The neighborhood is always read from t1. Each call starts again from a
    /// fresh copy of the base grid and replaces any previous prediction.
    pub fn predict(&mut self, base: Base) -> GrowthResult<&LandCoverGrid> {
        let thresholds = self
            .thresholds
            .as_ref()
            .ok_or(GrowthError::ThresholdsNotConfigured)?;

        let t1 = self.landcovers.t1();
        let mut predicted = match base {
            Base::T1 => t1.clone(),
            Base::T2 => self.landcovers.t2().clone(),
        };

        let margin = self.margin();
        let half = margin - 1;
        let (rows, cols) = t1.shape();
        let row_end = (rows + 1).saturating_sub(margin);
        let col_end = (cols + 1).saturating_sub(margin);
        let builtup_threshold = thresholds.builtup as usize;

        #[cfg(feature = "indicatif")]
        let progress = self.show_progress.then(|| {
            let pb = ProgressBar::new(row_end.saturating_sub(margin) as u64);
            pb.set_style(progress_style());
            pb.set_message("Rows");
            pb
        });

        for y in margin..row_end {
            for x in margin..col_end {
                let count = builtup_count(t1, y, x, half);

                if count >= builtup_threshold {
                    let grows = thresholds
                        .factors
                        .iter()
                        .enumerate()
                        .any(|(i, &t)| factor_triggers(t, self.factors.factor_value(i + 1, y, x)));
                    if grows {
                        predicted.set(y, x, BUILTUP_CLASS);
                    }
                }

                #[cfg(not(feature = "indicatif"))]
                if self.show_progress && y % PROGRESS_INTERVAL == 0 && x % PROGRESS_INTERVAL == 0 {
                    println!("Row: {}, Col: {}, Builtup cells count: {}", y, x, count);
                }
            }

            #[cfg(feature = "indicatif")]
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        #[cfg(feature = "indicatif")]
        if let Some(pb) = progress {
            pb.finish_with_message("Prediction done");
        }

        self.accuracy = None;
        Ok(&*self.predicted.insert(predicted))
    }

    /// Latest prediction
    pub fn predicted(&self) -> Option<&LandCoverGrid> {
        self.predicted.as_ref()
    }

    /// Hand over the latest prediction, dropping the model
    pub fn into_predicted(self) -> Option<LandCoverGrid> {
        self.predicted
    }

    /// Compare the latest prediction with the land cover at t2
    pub fn evaluate_accuracy(&mut self, cell_size: f64) -> GrowthResult<&AccuracyReport> {
        let predicted = self.predicted.as_ref().ok_or(GrowthError::NotPredicted)?;
        let report = AccuracyReport::evaluate(
            self.landcovers.t1(),
            self.landcovers.t2(),
            predicted,
            BUILTUP_CLASS,
            cell_size,
        )?;
        println!("{}", report);
        Ok(&*self.accuracy.insert(report))
    }

    /// Report of the last accuracy evaluation
    pub fn accuracy(&self) -> Option<&AccuracyReport> {
        self.accuracy.as_ref()
    }

    /// Write the prediction as a byte GeoTIFF georeferenced like t1
    #[cfg(feature = "gdal")]
    pub fn export_predicted(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> anyhow::Result<std::path::PathBuf> {
        use crate::collect::raster::encode_class_grid;

        let predicted = self.predicted.as_ref().ok_or(GrowthError::NotPredicted)?;
        encode_class_grid(path.as_ref(), predicted, self.landcovers.t1().geo_core())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometric::grid::{FactorGrid, Grid};

    fn comparison(t1: LandCoverGrid, t2: LandCoverGrid) -> LandCoverComparison {
        LandCoverComparison::load(t1, t2).unwrap()
    }

    /// 5x5 of "others" with a 3x3 built-up block centered on (2, 2)
    fn block_grid() -> LandCoverGrid {
        let mut grid = Grid::filled(5, 5, 4u8).unwrap();
        for r in 1..=3 {
            for c in 1..=3 {
                grid.set(r, c, 1);
            }
        }
        grid
    }

    /// 8x8 mixed land cover with scattered built-up cells
    fn mixed_grid() -> LandCoverGrid {
        Grid::from_rows(&[
            vec![2, 2, 1, 1, 2, 3, 3, 4],
            vec![2, 1, 1, 2, 2, 3, 4, 4],
            vec![1, 1, 2, 2, 1, 2, 4, 4],
            vec![2, 2, 2, 1, 1, 1, 2, 4],
            vec![3, 2, 1, 1, 2, 1, 2, 2],
            vec![3, 3, 2, 2, 2, 2, 1, 2],
            vec![4, 3, 2, 1, 1, 2, 2, 2],
            vec![4, 4, 2, 2, 1, 2, 2, 1],
        ])
        .unwrap()
    }

    fn ramp(width: usize, height: usize) -> FactorGrid {
        let cells = (0..width * height).map(|i| i as f64).collect();
        Grid::new(width, height, cells, Default::default()).unwrap()
    }

    #[test]
    fn test_base_from_u8() {
        assert_eq!(Base::try_from(1), Ok(Base::T1));
        assert_eq!(Base::try_from(2), Ok(Base::T2));
        assert_eq!(Base::try_from(0), Err(GrowthError::InvalidBaseArgument(0)));
        assert_eq!(Base::try_from(3), Err(GrowthError::InvalidBaseArgument(3)));
    }

    #[test]
    fn test_factor_triggers_sign_convention() {
        assert!(factor_triggers(8.0, 10.0));
        assert!(factor_triggers(8.0, 8.0));
        assert!(!factor_triggers(8.0, 7.9));
        assert!(factor_triggers(-250.0, 100.0));
        assert!(factor_triggers(-250.0, 250.0));
        assert!(!factor_triggers(-250.0, 251.0));
    }

    #[test]
    fn test_new_rejects_even_kernel() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 1.0).unwrap()]).unwrap();
        for k in [0, 2, 4] {
            assert_eq!(
                GrowthModel::new(&lc, &factors, k).err(),
                Some(GrowthError::InvalidKernelSize(k))
            );
        }
    }

    #[test]
    fn test_new_rejects_misaligned_factors() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![Grid::filled(6, 5, 1.0).unwrap()]).unwrap();
        assert!(matches!(
            GrowthModel::new(&lc, &factors, 3).err(),
            Some(GrowthError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_configure_thresholds_count_mismatch() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![
            Grid::filled(5, 5, 1.0).unwrap(),
            Grid::filled(5, 5, 2.0).unwrap(),
        ])
        .unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        assert_eq!(
            model.configure_thresholds(5, vec![8.0]),
            Err(GrowthError::ThresholdCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_configure_thresholds_rejects_zero() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![
            Grid::filled(5, 5, 1.0).unwrap(),
            Grid::filled(5, 5, 2.0).unwrap(),
        ])
        .unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        assert_eq!(
            model.configure_thresholds(5, vec![8.0, 0.0]),
            Err(GrowthError::InvalidThreshold {
                factor: 2,
                value: 0.0
            })
        );
    }

    #[test]
    fn test_predict_requires_thresholds() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 1.0).unwrap()]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        assert_eq!(
            model.predict(Base::T1).err(),
            Some(GrowthError::ThresholdsNotConfigured)
        );
        assert_eq!(
            model.evaluate_accuracy(100.0).err(),
            Some(GrowthError::NotPredicted)
        );
    }

    #[test]
    fn test_huge_kernel_leaves_base_untouched() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 10.0).unwrap()]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, usize::MAX).unwrap();
        model.configure_thresholds(0, vec![1.0]).unwrap();
        let predicted = model.predict(Base::T1).unwrap();
        assert_eq!(predicted, lc.t1());
    }

    #[test]
    fn test_margin_is_half_kernel_rounded_up() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 1.0).unwrap()]).unwrap();
        for (k, margin) in [(1, 1), (3, 2), (5, 3), (7, 4)] {
            assert_eq!(GrowthModel::new(&lc, &factors, k).unwrap().margin(), margin);
        }
    }

    #[test]
    fn test_validate_thresholds_without_model() {
        assert_eq!(validate_thresholds(2, &[-250.0, 8.0]), Ok(()));
        assert_eq!(
            validate_thresholds(2, &[-250.0]),
            Err(GrowthError::ThresholdCountMismatch {
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            validate_thresholds(1, &[f64::NAN]),
            Err(GrowthError::InvalidThreshold { factor: 1, .. })
        ));
    }

    #[test]
    fn test_block_scenario() {
        let lc = comparison(block_grid(), block_grid());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 10.0).unwrap()]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(5, vec![8.0]).unwrap();

        let predicted = model.predict(Base::T1).unwrap();
        assert_eq!(predicted.get(2, 2), 1);
        assert_eq!(predicted, lc.t1());
    }

    #[test]
    fn test_isolated_cell_grows_next_to_block() {
        // vegetation cell (2, 3) is surrounded by five built-up cells
        let t1 = Grid::from_rows(&[
            vec![2u8, 2, 2, 2, 2],
            vec![2, 1, 1, 1, 2],
            vec![2, 1, 1, 2, 2],
            vec![2, 1, 1, 1, 2],
            vec![2, 2, 2, 2, 4],
        ])
        .unwrap();
        let lc = comparison(t1.clone(), t1.clone());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 10.0).unwrap()]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(5, vec![8.0]).unwrap();

        let predicted = model.predict(Base::T1).unwrap();
        assert_eq!(predicted.get(2, 3), 1);
        assert_eq!(predicted.get(2, 4), 2);
        assert_eq!(predicted.count(|v| v == 1), t1.count(|v| v == 1) + 1);
    }

    #[test]
    fn test_unreachable_gate_leaves_base_untouched() {
        let grid = mixed_grid();
        let lc = comparison(grid.clone(), grid.clone());
        let factors = GrowthFactorSet::load(vec![Grid::filled(8, 8, 1.0).unwrap()]).unwrap();
        for kernel in [1usize, 3, 5] {
            let mut model = GrowthModel::new(&lc, &factors, kernel).unwrap();
            model
                .configure_thresholds((kernel * kernel) as u32 + 1, vec![-5.0])
                .unwrap();
            assert_eq!(model.predict(Base::T1).unwrap(), &grid);
        }
    }

    #[test]
    fn test_border_cells_keep_base_values() {
        let t1 = mixed_grid();
        let mut t2 = t1.clone();
        t2.set(0, 0, 3);
        t2.set(7, 7, 3);
        let lc = comparison(t1, t2.clone());
        let factors = GrowthFactorSet::load(vec![Grid::filled(8, 8, 1.0).unwrap()]).unwrap();

        for kernel in [3usize, 5] {
            let mut model = GrowthModel::new(&lc, &factors, kernel).unwrap();
            // every evaluated cell is eligible and every factor triggers
            model.configure_thresholds(0, vec![1.0]).unwrap();
            let margin = model.margin();
            let predicted = model.predict(Base::T2).unwrap().clone();

            for r in 0..8 {
                for c in 0..8 {
                    let border = r < margin - 1 || c < margin - 1 || r > 8 - margin || c > 8 - margin;
                    if border {
                        assert_eq!(predicted.get(r, c), t2.get(r, c), "cell ({}, {})", r, c);
                    }
                }
            }
            // scanned interior turns built-up everywhere
            for r in margin..(9 - margin) {
                for c in margin..(9 - margin) {
                    assert_eq!(predicted.get(r, c), 1);
                }
            }
        }
    }

    #[test]
    fn test_scan_range_skips_first_interior_row() {
        // with a 3x3 kernel the scan starts at row/col 2
        let grid = Grid::filled(6, 6, 1u8).unwrap();
        let mut t1 = grid.clone();
        t1.set(1, 1, 2);
        t1.set(2, 2, 2);
        t1.set(1, 4, 2);
        let lc = comparison(t1.clone(), t1.clone());
        let factors = GrowthFactorSet::load(vec![Grid::filled(6, 6, 1.0).unwrap()]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(1, vec![1.0]).unwrap();

        let predicted = model.predict(Base::T1).unwrap();
        assert_eq!(predicted.get(1, 1), 2);
        assert_eq!(predicted.get(1, 4), 2);
        assert_eq!(predicted.get(2, 2), 1);
    }

    #[test]
    fn test_or_semantics_independent_of_factor_order() {
        let grid = mixed_grid();
        let lc = comparison(grid.clone(), grid.clone());
        let passing = Grid::filled(8, 8, 50.0).unwrap();
        let failing = Grid::filled(8, 8, 500.0).unwrap();

        let forward = GrowthFactorSet::load(vec![passing.clone(), failing.clone()]).unwrap();
        let reverse = GrowthFactorSet::load(vec![failing, passing]).unwrap();

        let mut model_a = GrowthModel::new(&lc, &forward, 3).unwrap();
        model_a.configure_thresholds(3, vec![-100.0, -100.0]).unwrap();
        let predicted_a = model_a.predict(Base::T1).unwrap().clone();

        let mut model_b = GrowthModel::new(&lc, &reverse, 3).unwrap();
        model_b.configure_thresholds(3, vec![-100.0, -100.0]).unwrap();
        let predicted_b = model_b.predict(Base::T1).unwrap().clone();

        assert_eq!(predicted_a, predicted_b);
        // (3, 2) has 4 built-up neighbors and is vegetation at t1
        assert_eq!(grid.get(3, 2), 2);
        assert_eq!(predicted_a.get(3, 2), 1);
    }

    #[test]
    fn test_no_factor_triggering_keeps_cell() {
        let grid = mixed_grid();
        let lc = comparison(grid.clone(), grid.clone());
        let factors = GrowthFactorSet::load(vec![
            Grid::filled(8, 8, 500.0).unwrap(),
            Grid::filled(8, 8, 1.0).unwrap(),
        ])
        .unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(0, vec![-100.0, 2.0]).unwrap();
        assert_eq!(model.predict(Base::T1).unwrap(), &grid);
    }

    #[test]
    fn test_factor_values_are_read_per_cell() {
        let grid = Grid::filled(5, 5, 2u8).unwrap();
        let mut t2 = grid.clone();
        t2.set(0, 0, 1);
        let mut t1 = grid;
        t1.set(4, 4, 1);
        let lc = comparison(t1.clone(), t2);
        // ramp values 0..25, only cells with value >= 18 trigger
        let factors = GrowthFactorSet::load(vec![ramp(5, 5)]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(1, vec![18.0]).unwrap();

        let predicted = model.predict(Base::T1).unwrap();
        // (3, 3) holds 18 and neighbors the built-up corner
        assert_eq!(predicted.get(3, 3), 1);
        // (2, 3) holds 13 and is outside the corner's window anyway
        assert_eq!(predicted.get(2, 3), 2);
        assert_eq!(predicted.count(|v| v == 1), 2);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let grid = mixed_grid();
        let lc = comparison(grid.clone(), grid);
        let factors = GrowthFactorSet::load(vec![ramp(8, 8)]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(3, vec![20.0]).unwrap();

        let first = model.predict(Base::T1).unwrap().clone();
        let second = model.predict(Base::T1).unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_predict_from_t2_uses_t1_neighborhood() {
        // t2 has no built-up around (2, 2) but t1 does
        let t1 = block_grid();
        let mut t2 = Grid::filled(5, 5, 4u8).unwrap();
        t2.set(0, 0, 1);
        let lc = comparison(t1, t2.clone());
        let factors = GrowthFactorSet::load(vec![Grid::filled(5, 5, 10.0).unwrap()]).unwrap();
        let mut model = GrowthModel::new(&lc, &factors, 3).unwrap();
        model.configure_thresholds(5, vec![8.0]).unwrap();

        let predicted = model.predict(Base::T2).unwrap();
        assert_eq!(predicted.get(2, 2), 1);
        assert_eq!(predicted.get(2, 3), 1);
        assert_eq!(predicted.get(3, 3), 4);
        assert_eq!(predicted.get(0, 0), 1);
    }

    #[test]
    fn test_from_config_and_accuracy() {
        let mut t1 = Grid::filled(10, 10, 2u8).unwrap();
        for r in 3..=5 {
            for c in 3..=5 {
                t1.set(r, c, 1);
            }
        }
        let mut t2 = t1.clone();
        t2.set(3, 6, 1);
        t2.set(9, 9, 1);
        let lc = comparison(t1, t2);
        let factors = GrowthFactorSet::load(vec![Grid::filled(10, 10, 10.0).unwrap()]).unwrap();
        let config = ModelConfig {
            builtup_threshold: 3,
            factor_thresholds: vec![8.0],
            ..ModelConfig::default()
        };

        let mut model = GrowthModel::from_config(&lc, &factors, &config).unwrap();
        model.predict(config.base().unwrap()).unwrap();
        let report = model
            .evaluate_accuracy(config.cell_size_for(lc.t1().geo_core()))
            .unwrap()
            .clone();

        assert_eq!(report.reference_builtup_cells, 11);
        assert!((report.actual_builtup_change_km2 - 0.02).abs() < 1e-12);
        assert!(report.spatial_accuracy_percent.is_some());
        assert_eq!(model.accuracy(), Some(&report));

        // a new prediction invalidates the previous report
        model.predict(Base::T1).unwrap();
        assert!(model.accuracy().is_none());
    }
}
