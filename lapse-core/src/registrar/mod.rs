//! Registrar lookup: HTTP client for the PKNIC lookup page and the
//! expiry-row extractor that turns its HTML into a [`RawExpiryDate`].

mod client;
mod extract;

pub use client::RegistrarClient;
pub use extract::extract_expiry_date;
