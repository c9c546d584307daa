//! Symmetry structures detected by the solver and their per-instance tally

/// Signed double-lex orbitope: row/column symmetry with sign reflections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedDoubleLex {
    pub rowblock: i64,
    pub colblock: i64,
    pub sign: i64,
}

/// Double-lex with column blocks; one entry per block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DoubleLex {
    pub rowblocks: Vec<i64>,
    pub colblocks: Vec<i64>,
}

impl DoubleLex {
    /// `(nrowblocks, ncolblocks, rowblock_0, ..., colblock_0, ...)`
    pub fn as_tuple(&self) -> Vec<i64> {
        let mut tuple = Vec::with_capacity(2 + self.rowblocks.len() + self.colblocks.len());
        tuple.push(self.rowblocks.len() as i64);
        tuple.push(self.colblocks.len() as i64);
        tuple.extend(&self.rowblocks);
        tuple.extend(&self.colblocks);
        tuple
    }

    pub fn total_rows(&self) -> i64 {
        self.rowblocks.iter().sum()
    }

    pub fn total_cols(&self) -> i64 {
        self.colblocks.iter().sum()
    }
}

/// Orbitope of a `rows x cols` matrix (signed or not)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orbitope {
    pub rows: i64,
    pub cols: i64,
}

/// One application of a symmetry handling method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymmetryStructure {
    SignedDoubleLex(SignedDoubleLex),
    DoubleLex(DoubleLex),
    SignedOrbitope(Orbitope),
    Orbitope(Orbitope),
    SimpleCut,
}

/// Symmetry information of a single instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryStatistics {
    /// Number of permutation generators, -1 if never reported
    pub n_perms: i64,
    /// Number of signed permutation generators, -1 if never reported
    pub n_signed_perms: i64,
    signed_doublelex: Vec<SignedDoubleLex>,
    doublelex: Vec<DoubleLex>,
    signed_orbitope: Vec<Orbitope>,
    orbitope: Vec<Orbitope>,
    n_simple: usize,
}

impl Default for SymmetryStatistics {
    fn default() -> Self {
        Self {
            n_perms: -1,
            n_signed_perms: -1,
            signed_doublelex: Vec::new(),
            doublelex: Vec::new(),
            signed_orbitope: Vec::new(),
            orbitope: Vec::new(),
            n_simple: 0,
        }
    }
}

impl SymmetryStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one structure application
    pub fn record(&mut self, structure: SymmetryStructure) {
        match structure {
            SymmetryStructure::SignedDoubleLex(s) => self.signed_doublelex.push(s),
            SymmetryStructure::DoubleLex(s) => self.doublelex.push(s),
            SymmetryStructure::SignedOrbitope(s) => self.signed_orbitope.push(s),
            SymmetryStructure::Orbitope(s) => self.orbitope.push(s),
            SymmetryStructure::SimpleCut => self.n_simple += 1,
        }
    }

    pub fn set_permutations(&mut self, n_perms: i64, n_signed_perms: i64) {
        self.n_perms = n_perms;
        self.n_signed_perms = n_signed_perms;
    }

    pub fn signed_doublelex(&self) -> &[SignedDoubleLex] {
        &self.signed_doublelex
    }

    pub fn doublelex(&self) -> &[DoubleLex] {
        &self.doublelex
    }

    pub fn signed_orbitope(&self) -> &[Orbitope] {
        &self.signed_orbitope
    }

    pub fn orbitope(&self) -> &[Orbitope] {
        &self.orbitope
    }

    pub fn n_signed_doublelex(&self) -> usize {
        self.signed_doublelex.len()
    }

    pub fn n_doublelex(&self) -> usize {
        self.doublelex.len()
    }

    pub fn n_signed_orbitope(&self) -> usize {
        self.signed_orbitope.len()
    }

    pub fn n_orbitope(&self) -> usize {
        self.orbitope.len()
    }

    pub fn n_simple(&self) -> usize {
        self.n_simple
    }

    /// Whether any symmetry handling structure was applied
    pub fn has_structures(&self) -> bool {
        self.n_signed_doublelex() > 0
            || self.n_doublelex() > 0
            || self.n_signed_orbitope() > 0
            || self.n_orbitope() > 0
            || self.n_simple > 0
    }
}
