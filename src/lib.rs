pub mod code;
pub mod config;
pub mod error;
pub mod fetch;
pub mod matrix;
pub mod session;

pub use code::Compatibility;
pub use error::LoadFailure;
pub use fetch::DataSource;
pub use matrix::{Candidate, CompatibilityMatrix, DrugRow};
pub use session::{CandidateView, Session, Verdict};
