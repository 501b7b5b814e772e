pub mod error;
pub mod expiry;
pub mod output;
pub mod probe;
pub mod registrar;
pub mod validation;

pub use error::{LapseError, Result};
pub use validation::normalize_domain;

pub use expiry::{
    days_until, evaluate, parse_expiry_date, Evaluation, ExpiryQuery, ExpiryStatus, RawExpiryDate,
};
pub use probe::ExpiryProbe;
pub use registrar::{extract_expiry_date, RegistrarClient};

pub use output::{OutputFormat, OutputFormatter};
