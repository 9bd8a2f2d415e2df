pub mod app;
pub mod credentials;
pub mod error;
pub mod probe;
pub mod rest;
pub mod settings;
pub mod types;

pub use app::{RunConfig, run, run_and_report};
pub use credentials::Credentials;
pub use error::{ProbeError, QueryError};
pub use probe::{Probe, ProbeOptions, ProbeReport};
pub use rest::{RestClient, RestConfig, Select};
pub use settings::Settings;
pub use types::{Game, TeamListing};
