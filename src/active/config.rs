use super::LearningError;

/// The default bound on the number of iterations of the learning loop.
pub const ITERATION_THRESHOLD: usize = if cfg!(debug_assertions) { 300 } else { 200000 };

/// Name of the environment variable that overrides [`LStarConfig::max_iterations`].
pub const MAX_ITERATIONS_VAR: &str = "LSTAR_MAX_ITERATIONS";

/// Determines how a counterexample is folded into the observation table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CounterexampleHandling {
    /// Adds all prefixes of the counterexample to the access strings and all of its suffixes to the
    /// experiments. This is the variant proposed by Angluin.
    #[default]
    PrefixesAndSuffixes,
    /// Only adds the suffixes of the counterexample to the experiments, which keeps the set of access strings
    /// small. New access strings are then discovered through closedness violations alone.
    Suffixes,
}

/// Settings of a learning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LStarConfig {
    /// Exceeding this many loop iterations aborts the session with [`LearningError::DidNotConverge`].
    pub max_iterations: usize,
    /// How counterexamples are processed.
    pub counterexamples: CounterexampleHandling,
}

impl Default for LStarConfig {
    fn default() -> Self {
        Self {
            max_iterations: ITERATION_THRESHOLD,
            counterexamples: CounterexampleHandling::default(),
        }
    }
}

impl LStarConfig {
    /// Builds the default configuration, taking the iteration bound from the `LSTAR_MAX_ITERATIONS`
    /// environment variable if it is set.
    pub fn from_env() -> Result<Self, LearningError> {
        Self::default().with_env_value(std::env::var(MAX_ITERATIONS_VAR).ok())
    }

    fn with_env_value(self, value: Option<String>) -> Result<Self, LearningError> {
        let Some(value) = value else {
            return Ok(self);
        };
        match value.trim().parse::<usize>() {
            Ok(max_iterations) if max_iterations > 0 => Ok(self.with_max_iterations(max_iterations)),
            _ => Err(LearningError::InvalidConfig {
                key: MAX_ITERATIONS_VAR.to_string(),
                value,
            }),
        }
    }

    /// Sets the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the way counterexamples are folded into the table.
    pub fn with_counterexample_handling(mut self, handling: CounterexampleHandling) -> Self {
        self.counterexamples = handling;
        self
    }
}
