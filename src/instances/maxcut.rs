//! Max-cut models for undirected graphs in DIMACS format

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::{GenerateError, InstanceGenerator, write_instance};
use crate::model::{ConsKind, ModelStatistics, ModelWriter, ObjectiveSense, Relation, VarType};

/// Graphs of the DIMACS Color02 test set
pub const COLOR02_GRAPHS: &[&str] = &[
    "1-FullIns_3.col", "1-FullIns_4.col", "1-FullIns_5.col", "1-Insertions_4.col",
    "1-Insertions_5.col", "1-Insertions_6.col", "2-FullIns_3.col", "2-FullIns_4.col",
    "2-FullIns_5.col", "2-Insertions_3.col", "2-Insertions_4.col", "2-Insertions_5.col",
    "3-FullIns_3.col", "3-FullIns_4.col", "3-FullIns_5.col", "3-Insertions_3.col",
    "3-Insertions_4.col", "3-Insertions_5.col", "4-FullIns_3.col", "4-FullIns_4.col",
    "4-FullIns_5.col", "4-Insertions_3.col", "4-Insertions_4.col", "5-FullIns_3.col",
    "5-FullIns_4.col", "abb313GPIA.col", "anna.col", "ash331GPIA.col", "ash608GPIA.col",
    "ash958GPIA.col", "david.col", "DSJC1000.1.col", "DSJC1000.5.col", "DSJC1000.9.col",
    "DSJC125.1.col", "DSJC125.5.col", "DSJC125.9.col", "DSJC250.1.col", "DSJC250.5.col",
    "DSJC250.9.col", "DSJC500.1.col", "DSJC500.5.col", "DSJC500.9.col", "DSJR500.1c.col",
    "DSJR500.1.col", "DSJR500.5.col", "fpsol2.i.1.col", "fpsol2.i.2.col", "fpsol2.i.3.col",
    "games120.col", "homer.col", "huck.col", "inithx.i.1.col", "inithx.i.2.col",
    "inithx.i.3.col", "jean.col", "latin_square_10.col", "le450_15a.col", "le450_15b.col",
    "le450_15c.col", "le450_15d.col", "le450_25a.col", "le450_25b.col", "le450_25c.col",
    "le450_25d.col", "le450_5a.col", "le450_5b.col", "le450_5c.col", "le450_5d.col",
    "miles1000.col", "miles1500.col", "miles250.col", "miles500.col", "miles750.col",
    "mug100_1.col", "mug100_25.col", "mug88_1.col", "mug88_25.col", "mulsol.i.1.col",
    "mulsol.i.2.col", "mulsol.i.3.col", "mulsol.i.4.col", "mulsol.i.5.col", "myciel3.col",
    "myciel4.col", "myciel5.col", "myciel6.col", "myciel7.col", "qg.order100.col",
    "qg.order30.col", "qg.order40.col", "qg.order60.col", "queen10_10.col", "queen11_11.col",
    "queen12_12.col", "queen13_13.col", "queen14_14.col", "queen15_15.col", "queen16_16.col",
    "queen5_5.col", "queen6_6.col", "queen7_7.col", "queen8_12.col", "queen8_8.col",
    "queen9_9.col", "school1.col", "school1_nsh.col", "wap01a.col", "wap02a.col", "wap03a.col",
    "wap04a.col", "wap05a.col", "wap06a.col", "wap07a.col", "wap08a.col", "will199GPIA.col",
    "zeroin.i.1.col", "zeroin.i.2.col", "zeroin.i.3.col",
];

/// Undirected graph; edges are stored as `(u, v)` with `u <= v`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<u64>,
    pub edges: Vec<(u64, u64)>,
}

impl Graph {
    /// Parse the `e u v` lines of a DIMACS graph; all other lines are skipped.
    pub fn parse_dimacs(text: &str) -> Result<Self, GenerateError> {
        let mut nodes = BTreeSet::new();
        let mut edges = BTreeSet::new();

        for (idx, line) in text.lines().enumerate() {
            if !line.starts_with('e') {
                continue;
            }

            let invalid = || GenerateError::InvalidEdge {
                line_number: idx + 1,
                content: line.to_string(),
            };
            let mut tokens = line.split_whitespace().skip(1);
            let u: u64 = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(invalid)?;
            let v: u64 = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(invalid)?;

            nodes.insert(u);
            nodes.insert(v);
            edges.insert((u.min(v), u.max(v)));
        }

        Ok(Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        })
    }

    pub fn read_dimacs(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|source| GenerateError::ReadGraph {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_dimacs(&text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxCutInstance {
    pub graph_name: String,
    pub graph: Graph,
    /// Draw edge weights in `{-1, 1}` instead of unit weights
    pub weighted: bool,
    pub seed: u64,
}

impl MaxCutInstance {
    pub fn new(graph_name: impl Into<String>, graph: Graph) -> Self {
        Self {
            graph_name: graph_name.into(),
            graph,
            weighted: false,
            seed: 0,
        }
    }

    pub fn with_weights(mut self, seed: u64) -> Self {
        self.weighted = true;
        self.seed = seed;
        self
    }

    /// Load a graph file whose name must end with `filetype` (e.g. `.col`).
    ///
    /// The graph name is the file name without that extension.
    pub fn from_file(path: &Path, filetype: &str) -> Result<Self, GenerateError> {
        let graph_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(filetype))
            .ok_or_else(|| GenerateError::FileType {
                path: path.to_path_buf(),
                filetype: filetype.to_string(),
            })?
            .to_string();

        let graph = Graph::read_dimacs(path)?;
        debug!(
            graph = %graph_name,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "read graph"
        );
        Ok(Self::new(graph_name, graph))
    }

    /// Objective coefficient of every edge, in edge order
    pub fn edge_weights(&self) -> Vec<i64> {
        if !self.weighted {
            return vec![1; self.graph.edges.len()];
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        self.graph
            .edges
            .iter()
            .map(|_| -1 + 2 * rng.random_range(0..=1i64))
            .collect()
    }
}

impl InstanceGenerator for MaxCutInstance {
    fn file_stem(&self) -> String {
        if self.weighted {
            format!("maxcut_{}", self.graph_name)
        } else {
            format!("unweighted_maxcut_{}", self.graph_name)
        }
    }

    fn write_model<W: Write>(&self, writer: &mut ModelWriter<W>) -> Result<(), GenerateError> {
        let Graph { nodes, edges } = &self.graph;
        let node_var = |v: u64| format!("s{}", v);
        let edge_var = |(u, v): (u64, u64)| format!("c{}_{}", u, v);

        writer.write_statistics(&ModelStatistics::binary(
            format!("maxcut_{}", self.graph_name),
            nodes.len() + edges.len(),
            2 * edges.len(),
        ))?;
        writer.write_objective(ObjectiveSense::Maximize)?;

        writer.begin_variables()?;
        for (&edge, weight) in edges.iter().zip(self.edge_weights()) {
            writer.write_variable(VarType::Binary, &edge_var(edge), weight, 0.0, 1.0)?;
        }
        for &v in nodes {
            writer.write_variable(VarType::Binary, &node_var(v), 0, 0.0, 1.0)?;
        }

        writer.begin_constraints()?;
        for (e, &(u, v)) in edges.iter().enumerate() {
            let (su, sv, cuv) = (node_var(u), node_var(v), edge_var((u, v)));
            writer.write_constraint(
                ConsKind::Linear,
                &format!("edgecons{}_A", e),
                &format!("+<{}> +<{}> +<{}>", su, sv, cuv),
                Relation::Le,
                2,
            )?;
            writer.write_constraint(
                ConsKind::Linear,
                &format!("edgecons{}_B", e),
                &format!("-<{}> -<{}> +<{}>", su, sv, cuv),
                Relation::Le,
                0,
            )?;
        }

        Ok(())
    }
}

/// Generate unweighted max-cut models for the Color02 graphs found in `color02_dir`.
///
/// Graphs missing from the directory are skipped with a warning.
pub fn generate_color02(color02_dir: &Path, write_to: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::new();
    for graph in COLOR02_GRAPHS {
        let path = color02_dir.join(graph);
        if !path.exists() {
            warn!(path = %path.display(), "Color02 graph not found, skipping");
            continue;
        }
        let instance = MaxCutInstance::from_file(&path, ".col")?;
        written.push(write_instance(&instance, write_to)?);
    }
    Ok(written)
}
