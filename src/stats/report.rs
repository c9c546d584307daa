//! LaTeX table rows summarizing extracted symmetry statistics

use std::hash::Hash;

use indexmap::IndexMap;

use super::extractor::StatisticsCollection;
use super::structure::SymmetryStatistics;

/// File endings stripped from instance names before display
pub const KNOWN_ENDINGS: [&str; 4] = [".mps.gz", ".cip", ".osil.gz", ".cnf"];

/// Escape underscores for LaTeX
pub fn latexify(s: &str) -> String {
    s.replace('_', "\\_")
}

/// Strip the first known file ending, if any
pub fn remove_ending(name: &str) -> &str {
    KNOWN_ENDINGS
        .iter()
        .find_map(|ending| name.strip_suffix(ending))
        .unwrap_or(name)
}

/// Number of instances of a test set that admit each kind of symmetry handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatedCounts {
    pub instances: usize,
    pub symmetric: usize,
    pub signed_perm: usize,
    pub perm: usize,
    pub signed_doublelex: usize,
    pub doublelex: usize,
    pub signed_orbitope: usize,
    pub orbitope: usize,
    pub simple: usize,
}

impl AggregatedCounts {
    pub fn from_statistics(collection: &StatisticsCollection) -> Self {
        let mut counts = Self {
            instances: collection.len(),
            ..Self::default()
        };

        for stats in collection.values() {
            counts.symmetric += usize::from(stats.n_perms > 0 || stats.n_signed_perms > 0);
            counts.perm += usize::from(stats.n_perms > 0);
            counts.signed_perm += usize::from(stats.n_signed_perms > 0);
            counts.signed_doublelex += usize::from(stats.n_signed_doublelex() > 0);
            counts.doublelex += usize::from(stats.n_doublelex() > 0);
            counts.signed_orbitope += usize::from(stats.n_signed_orbitope() > 0);
            counts.orbitope += usize::from(stats.n_orbitope() > 0);
            counts.simple += usize::from(stats.n_simple() > 0);
        }

        counts
    }
}

/// One table row with the aggregated counts of a test set
pub fn aggregated_row(collection: &StatisticsCollection, testset_name: &str) -> String {
    let c = AggregatedCounts::from_statistics(collection);
    format!(
        "  {:>20} & {:>4} & {:>4} & {:>4} & {:>4} & {:>4} & {:>4} & {:>4} & {:>4} & {:>4}\\\\",
        latexify(testset_name),
        c.instances,
        c.symmetric,
        c.signed_perm,
        c.perm,
        c.signed_doublelex,
        c.doublelex,
        c.signed_orbitope,
        c.orbitope,
        c.simple
    )
}

/// Multiplicity of each distinct entry, in order of first appearance
fn multiplicities<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> IndexMap<T, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Table row listing the structures of one instance.
///
/// Returns `None` if no structure was found for the instance.
pub fn detailed_row(stats: &SymmetryStatistics, instance_name: &str) -> Option<String> {
    if !stats.has_structures() {
        return None;
    }

    let mut line = format!("    {:>30} & ", latexify(remove_ending(instance_name)));

    for (s, k) in multiplicities(stats.signed_doublelex()) {
        line.push_str(&format!(
            r"\mbox{{{}$\cdot$sRC({}, {}; {})}} ",
            k, s.rowblock, s.colblock, s.sign
        ));
    }
    for (s, k) in multiplicities(stats.doublelex()) {
        line.push_str(&format!(
            r"\mbox{{{}$\cdot$RC({}, {})}} ",
            k,
            s.total_rows(),
            s.total_cols()
        ));
    }
    for (s, k) in multiplicities(stats.signed_orbitope()) {
        line.push_str(&format!(r"\mbox{{{}$\cdot$sC({}, {})}} ", k, s.rows, s.cols));
    }
    for (s, k) in multiplicities(stats.orbitope()) {
        line.push_str(&format!(r"\mbox{{{}$\cdot$C({}, {})}} ", k, s.rows, s.cols));
    }
    if stats.n_simple() != 0 {
        line.push_str(&format!(r"\mbox{{S({})}}", stats.n_simple()));
    }

    line.push_str(" \\\\");
    Some(line)
}

/// Detailed rows of all instances with at least one structure
pub fn detailed_rows(collection: &StatisticsCollection) -> Vec<String> {
    collection
        .iter()
        .filter_map(|(name, stats)| detailed_row(stats, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::structure::{DoubleLex, Orbitope, SignedDoubleLex, SymmetryStructure};

    fn collection(entries: Vec<(&str, SymmetryStatistics)>) -> StatisticsCollection {
        entries
            .into_iter()
            .map(|(name, stats)| (name.to_string(), stats))
            .collect()
    }

    #[test]
    fn test_latexify() {
        assert_eq!(latexify("elec_N3_D2"), "elec\\_N3\\_D2");
        assert_eq!(latexify("plain"), "plain");
    }

    #[test]
    fn test_remove_ending() {
        assert_eq!(remove_ending("elec_N3_D2_sym0.cip"), "elec_N3_D2_sym0");
        assert_eq!(remove_ending("air04.mps.gz"), "air04");
        assert_eq!(remove_ending("foo.osil.gz"), "foo");
        assert_eq!(remove_ending("sat.cnf"), "sat");
        assert_eq!(remove_ending("pic.cip.bak"), "pic.cip.bak");
        // only the suffix is stripped, not trailing characters of the stem
        assert_eq!(remove_ending("topic.cip"), "topic");
    }

    #[test]
    fn test_aggregated_row() {
        let mut a = SymmetryStatistics::new();
        a.set_permutations(5, 2);
        a.record(SymmetryStructure::SimpleCut);
        let mut b = SymmetryStatistics::new();
        b.set_permutations(3, 0);
        b.record(SymmetryStructure::Orbitope(Orbitope { rows: 3, cols: 2 }));
        b.record(SymmetryStructure::Orbitope(Orbitope { rows: 3, cols: 2 }));
        let c = SymmetryStatistics::new();

        let coll = collection(vec![("a.cip", a), ("b.cip", b), ("c.cip", c)]);
        let counts = AggregatedCounts::from_statistics(&coll);
        assert_eq!(
            counts,
            AggregatedCounts {
                instances: 3,
                symmetric: 2,
                signed_perm: 1,
                perm: 2,
                signed_doublelex: 0,
                doublelex: 0,
                signed_orbitope: 0,
                orbitope: 1,
                simple: 1,
            }
        );

        assert_eq!(
            aggregated_row(&coll, "my_set"),
            format!(
                "  {:>20} &    3 &    2 &    1 &    2 &    0 &    0 &    0 &    1 &    1\\\\",
                "my\\_set"
            )
        );
    }

    #[test]
    fn test_detailed_row() {
        let mut stats = SymmetryStatistics::new();
        stats.record(SymmetryStructure::SignedDoubleLex(SignedDoubleLex {
            rowblock: 4,
            colblock: 3,
            sign: 1,
        }));
        stats.record(SymmetryStructure::DoubleLex(DoubleLex {
            rowblocks: vec![2],
            colblocks: vec![3],
        }));
        stats.record(SymmetryStructure::Orbitope(Orbitope { rows: 5, cols: 2 }));
        stats.record(SymmetryStructure::Orbitope(Orbitope { rows: 5, cols: 2 }));
        stats.record(SymmetryStructure::SignedOrbitope(Orbitope { rows: 6, cols: 1 }));
        stats.record(SymmetryStructure::SimpleCut);

        let row = detailed_row(&stats, "kissing_N5.cip").unwrap();
        let expected = format!(
            "    {:>30} & {}{}{}{}{} \\\\",
            "kissing\\_N5",
            r"\mbox{1$\cdot$sRC(4, 3; 1)} ",
            r"\mbox{1$\cdot$RC(2, 3)} ",
            r"\mbox{1$\cdot$sC(6, 1)} ",
            r"\mbox{2$\cdot$C(5, 2)} ",
            r"\mbox{S(1)}"
        );
        assert_eq!(row, expected);
    }

    #[test]
    fn test_detailed_rows_skip_empty() {
        let mut with = SymmetryStatistics::new();
        with.record(SymmetryStructure::SimpleCut);
        let mut perms_only = SymmetryStatistics::new();
        perms_only.set_permutations(4, 4);

        let coll = collection(vec![("x.cip", perms_only), ("y_1.cip", with)]);
        let rows = detailed_rows(&coll);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("y\\_1 & "));
        assert!(rows[0].ends_with(r"\mbox{S(1)} \\"));
    }
}
