mod lstar;
pub use lstar::*;

mod oracle;
pub use oracle::*;

mod observationtable;
pub use observationtable::{ObservationTable, Row};

mod strategy;
pub use strategy::{Inconsistency, SignatureIndex, SortedScan, TableStrategy};

mod hypothesis;

mod verifier;
pub use verifier::{Counterexample, CounterexampleOrigin, Verifier};

mod config;
pub use config::{CounterexampleHandling, LStarConfig, ITERATION_THRESHOLD};

mod error;
pub use error::LearningError;
