//! Generation configuration.
//!
//! Controls the knobs that vary between runs: whether negative existence
//! questions are synthesized, how many, and under which seed. Everything
//! else about generation is a pure function of the graph.

/// Seed used for negative-name sampling when the configuration carries none.
pub const DEFAULT_SEED: u64 = 42;

/// Number of negative existence questions generated per input by default.
pub const DEFAULT_NEGATIVES_PER_FILE: usize = 5;

/// Configuration for question generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Whether to synthesize existence questions about entities that do not
    /// exist in the graph.
    pub include_negative_entities: bool,
    /// How many negative existence questions to synthesize.
    pub negative_entities_per_file: usize,
    /// Seed for negative-name sampling; `None` falls back to [`DEFAULT_SEED`].
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_negative_entities: true,
            negative_entities_per_file: DEFAULT_NEGATIVES_PER_FILE,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The seed negative sampling actually runs with.
    #[must_use]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Enables or disables negative existence questions.
    #[must_use]
    pub fn with_negative_entities(mut self, include: bool) -> Self {
        self.include_negative_entities = include;
        self
    }

    /// Sets the number of negative existence questions per input.
    #[must_use]
    pub fn with_negatives_per_file(mut self, count: usize) -> Self {
        self.negative_entities_per_file = count;
        self
    }

    /// Pins the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
