//! Batch generation of the benchmark test sets

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use tracing::info;

use super::maxcut::generate_color02;
use super::{
    ElecInstance, GenerateError, InstanceGenerator, KissingNumberInstance, PackingInstance,
    write_instance,
};
use crate::symmetry::Variant;

/// Which instances a batch run produces
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Numbers of points
    pub points: RangeInclusive<usize>,
    /// Dimensions of the points
    pub dimensions: RangeInclusive<usize>,
    pub variants: Vec<Variant>,
    /// Use the reformulated distance constraints for the kissing number problem
    pub kissing_reformulation: bool,
    pub output_dir: PathBuf,
    /// Directory with the DIMACS Color02 graphs (None = skip max-cut)
    pub color02_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            points: 3..=14,
            dimensions: 2..=3,
            variants: Variant::ALL.to_vec(),
            kissing_reformulation: true,
            output_dir: PathBuf::from("instances"),
            color02_dir: None,
        }
    }
}

impl BatchConfig {
    pub fn with_points(mut self, points: RangeInclusive<usize>) -> Self {
        self.points = points;
        self
    }

    pub fn with_dimensions(mut self, dimensions: RangeInclusive<usize>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_kissing_reformulation(mut self, enabled: bool) -> Self {
        self.kissing_reformulation = enabled;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_color02_option(mut self, dir: Option<PathBuf>) -> Self {
        self.color02_dir = dir;
        self
    }

    /// Number of point-based instances per problem type
    pub fn instances_per_problem(&self) -> usize {
        self.points.clone().count() * self.dimensions.clone().count() * self.variants.len()
    }
}

/// Files written by a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub elec: Vec<PathBuf>,
    pub kissing: Vec<PathBuf>,
    pub packing: Vec<PathBuf>,
    pub maxcut: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.elec.len() + self.kissing.len() + self.packing.len() + self.maxcut.len()
    }
}

/// Generate every instance described by `config` into `config.output_dir`.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, GenerateError> {
    let dir = config.output_dir.as_path();
    std::fs::create_dir_all(dir).map_err(|source| GenerateError::Create {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut summary = BatchSummary {
        elec: generate_family(config, dir, |n, d, v| ElecInstance::new(n, d, v))?,
        kissing: generate_family(config, dir, |n, d, v| {
            KissingNumberInstance::new(n, d, config.kissing_reformulation, v)
        })?,
        packing: generate_family(config, dir, |n, d, v| PackingInstance::new(n, d, v))?,
        ..Default::default()
    };

    if let Some(color02) = &config.color02_dir {
        summary.maxcut = generate_color02(color02, dir)?;
    }

    info!(
        total = summary.total(),
        dir = %dir.display(),
        "batch generation finished"
    );
    Ok(summary)
}

/// Dimension outermost, then number of points, then variant
fn generate_family<G, F>(
    config: &BatchConfig,
    dir: &Path,
    make: F,
) -> Result<Vec<PathBuf>, GenerateError>
where
    G: InstanceGenerator,
    F: Fn(usize, usize, Variant) -> G,
{
    let mut written = Vec::with_capacity(config.instances_per_problem());
    for d in config.dimensions.clone() {
        for n in config.points.clone() {
            for &variant in &config.variants {
                written.push(write_instance(&make(n, d, variant), dir)?);
            }
        }
    }
    Ok(written)
}
