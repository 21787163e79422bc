use serde::{Deserialize, Serialize};

use crate::commons::basic_functions::value_range;
use crate::error::{GrowthError, GrowthResult};
use crate::geometric::grid::LandCoverGrid;

/// Land cover class codes
/// Name         Code
/// Built-up       1
/// Vegetation     2
/// Water          3
/// Others         4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandCoverClass {
    BuiltUp = 1,
    Vegetation = 2,
    Water = 3,
    Others = 4,
}

impl LandCoverClass {
    pub const ALL: [LandCoverClass; 4] = [
        LandCoverClass::BuiltUp,
        LandCoverClass::Vegetation,
        LandCoverClass::Water,
        LandCoverClass::Others,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            LandCoverClass::BuiltUp => "built-up",
            LandCoverClass::Vegetation => "vegetation",
            LandCoverClass::Water => "water",
            LandCoverClass::Others => "others",
        }
    }
}

impl TryFrom<u8> for LandCoverClass {
    type Error = u8;

    /// Codes outside the fixed class set are handed back as the error
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(LandCoverClass::BuiltUp),
            2 => Ok(LandCoverClass::Vegetation),
            3 => Ok(LandCoverClass::Water),
            4 => Ok(LandCoverClass::Others),
            other => Err(other),
        }
    }
}

/// Class transition counts and probabilities between two dates
/// Row `i` is the class `min_class + i` at t1, column `j` the class
/// `min_class + j` at t2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    min_class: u8,
    size: usize,
    counts: Vec<u64>,
    normalized: Vec<f64>,
    degenerate_rows: Vec<usize>,
}

impl TransitionMatrix {
    /// Count transitions cell by cell, then normalize each row by its sum.
    /// Rows that sum to zero stay all-zero and are listed in `degenerate_rows`.
    pub(crate) fn from_grids(
        t1: &LandCoverGrid,
        t2: &LandCoverGrid,
        min_class: u8,
        max_class: u8,
    ) -> Self {
        let size = (max_class - min_class) as usize + 1;
        let mut counts = vec![0u64; size * size];

        for (&from, &to) in t1.cells().iter().zip(t2.cells()) {
            let i = (from - min_class) as usize;
            let j = (to - min_class) as usize;
            counts[i * size + j] += 1;
        }

        let mut normalized = vec![0.0f64; size * size];
        let mut degenerate_rows = Vec::new();
        for i in 0..size {
            let row = &counts[i * size..(i + 1) * size];
            let total: u64 = row.iter().sum();
            if total == 0 {
                degenerate_rows.push(i);
                continue;
            }
            for j in 0..size {
                normalized[i * size + j] = row[j] as f64 / total as f64;
            }
        }

        TransitionMatrix {
            min_class,
            size,
            counts,
            normalized,
            degenerate_rows,
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn min_class(&self) -> u8 {
        self.min_class
    }

    /// Raw count at matrix position (i, j)
    pub fn count(&self, i: usize, j: usize) -> u64 {
        self.counts[i * self.size + j]
    }

    /// Normalized probability at matrix position (i, j)
    pub fn normalized(&self, i: usize, j: usize) -> f64 {
        self.normalized[i * self.size + j]
    }

    /// Probability that a cell of class `from` at t1 is of class `to` at t2
    pub fn probability(&self, from: LandCoverClass, to: LandCoverClass) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Some(self.normalized(i, j))
    }

    /// Normalized row `i`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.normalized[i * self.size..(i + 1) * self.size]
    }

    /// Rows whose class never occurs at t1
    pub fn degenerate_rows(&self) -> &[usize] {
        &self.degenerate_rows
    }

    pub fn count_rows(&self) -> Vec<Vec<u64>> {
        self.counts.chunks(self.size).map(<[u64]>::to_vec).collect()
    }

    pub fn normalized_rows(&self) -> Vec<Vec<f64>> {
        self.normalized.chunks(self.size).map(<[f64]>::to_vec).collect()
    }

    fn index_of(&self, class: LandCoverClass) -> Option<usize> {
        let code = class.code();
        if code < self.min_class {
            return None;
        }
        let idx = (code - self.min_class) as usize;
        (idx < self.size).then_some(idx)
    }

    fn class_label(&self, idx: usize) -> String {
        let code = self.min_class + idx as u8;
        match LandCoverClass::try_from(code) {
            Ok(class) => class.name().to_string(),
            Err(code) => format!("class_{}", code),
        }
    }

    /// Write the normalized matrix as CSV, one row per class at t1
    #[cfg(feature = "csv")]
    pub fn write_csv(&self, path: &std::path::Path) -> anyhow::Result<()> {
        use anyhow::Context;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create output directory: {:?}", parent))?;
            }
        }

        let mut writer = csv::Writer::from_path(path)
            .context(format!("Failed to create CSV file: {:?}", path))?;

        let mut header = vec!["from".to_string()];
        header.extend((0..self.size).map(|j| self.class_label(j)));
        writer
            .write_record(&header)
            .context("Failed to write CSV header")?;

        for i in 0..self.size {
            let mut record = vec![self.class_label(i)];
            record.extend(self.row(i).iter().map(|p| p.to_string()));
            writer
                .write_record(&record)
                .context("Failed to write CSV row")?;
        }

        writer.flush().context("Failed to flush CSV file")?;
        println!("Transition matrix saved to: {:?}", path);
        Ok(())
    }
}

/// Two land cover maps of the same area at dates t1 and t2
#[derive(Debug, Clone)]
pub struct LandCoverComparison {
    t1: LandCoverGrid,
    t2: LandCoverGrid,
    rows: usize,
    cols: usize,
    min_class: u8,
    max_class: u8,
    transition_matrix: Option<TransitionMatrix>,
}

impl LandCoverComparison {
    /// Validate and pair two land cover grids
    /// Both grids must have the same size and span the same class range,
    /// and every cell must hold a known land cover class.
    pub fn load(t1: LandCoverGrid, t2: LandCoverGrid) -> GrowthResult<Self> {
        println!("Checking the size of input rasters...");
        t1.ensure_same_shape(&t2, "land cover rasters")?;
        println!("Land cover data size matched.");

        println!("Checking feature classes in land cover data...");
        let range_t1 = class_range(&t1)?;
        let range_t2 = class_range(&t2)?;
        if range_t1 != range_t2 {
            return Err(GrowthError::ClassRangeMismatch {
                t1: range_t1,
                t2: range_t2,
            });
        }
        println!("The classes in input land cover files are matched.");

        let (rows, cols) = t1.shape();
        let (min_class, max_class) = range_t1;

        Ok(LandCoverComparison {
            t1,
            t2,
            rows,
            cols,
            min_class,
            max_class,
            transition_matrix: None,
        })
    }

    /// Decode two class rasters and pair them
    #[cfg(feature = "gdal")]
    pub fn from_files(
        path_t1: impl AsRef<std::path::Path>,
        path_t2: impl AsRef<std::path::Path>,
    ) -> anyhow::Result<Self> {
        use crate::collect::raster::decode_class_grid;

        let t1 = decode_class_grid(path_t1.as_ref())?;
        let t2 = decode_class_grid(path_t2.as_ref())?;
        Ok(Self::load(t1, t2)?)
    }

    /// Compute and store the transition matrix from t1 to t2
    pub fn compute_transition_matrix(&mut self) -> &TransitionMatrix {
        let matrix =
            TransitionMatrix::from_grids(&self.t1, &self.t2, self.min_class, self.max_class);
        println!("Transition matrix computed.");
        if !matrix.degenerate_rows().is_empty() {
            println!(
                "  Classes absent at t1 (rows left at zero): {:?}",
                matrix
                    .degenerate_rows()
                    .iter()
                    .map(|i| self.min_class as usize + i)
                    .collect::<Vec<_>>()
            );
        }
        self.transition_matrix.insert(matrix)
    }

    /// Last computed transition matrix
    pub fn transition_matrix(&self) -> Option<&TransitionMatrix> {
        self.transition_matrix.as_ref()
    }

    pub fn t1(&self) -> &LandCoverGrid {
        &self.t1
    }

    pub fn t2(&self) -> &LandCoverGrid {
        &self.t2
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (min_class, max_class) shared by both dates
    pub fn class_range(&self) -> (u8, u8) {
        (self.min_class, self.max_class)
    }

    /// Number of classes in the shared range
    pub fn feature_count(&self) -> usize {
        (self.max_class - self.min_class) as usize + 1
    }
}

/// Class range of a grid, rejecting codes outside `LandCoverClass`
fn class_range(grid: &LandCoverGrid) -> GrowthResult<(u8, u8)> {
    let width = grid.width();
    if let Some((idx, &value)) = grid
        .cells()
        .iter()
        .enumerate()
        .find(|(_, &v)| LandCoverClass::try_from(v).is_err())
    {
        return Err(GrowthError::UnknownClass {
            value,
            row: idx / width,
            col: idx % width,
        });
    }

    value_range(grid.cells()).ok_or(GrowthError::InvalidGrid {
        width,
        height: grid.height(),
        len: 0,
    })
}
