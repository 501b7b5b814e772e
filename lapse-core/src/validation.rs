//! Lookup-target validation.
//!
//! The registrar form wants a bare registered name. Operators paste
//! whatever their browser shows, so the scheme, a leading `www.`, and any
//! path are shed before the name is checked at all.

use crate::error::{LapseError, Result};

/// Reduce caller input to the bare lowercase domain the lookup form
/// accepts, rejecting anything that is not a plausible registered name.
pub fn normalize_domain(domain: &str) -> Result<String> {
    let mut name = domain.trim().to_lowercase();

    for scheme in ["http://", "https://"] {
        if let Some(rest) = name.strip_prefix(scheme) {
            name = rest.to_string();
            break;
        }
    }
    if let Some((host, _path)) = name.split_once('/') {
        name = host.to_string();
    }
    if let Some(rest) = name.strip_prefix("www.") {
        name = rest.to_string();
    }

    // A registered name has at least two labels; each label is non-empty
    // ASCII alphanumeric/hyphen with no hyphen at either edge. Empty
    // labels also catch stray leading/trailing/doubled dots.
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return Err(LapseError::InvalidDomain(name));
    }
    for label in &labels {
        let hyphen_at_edge = label.starts_with('-') || label.ends_with('-');
        let well_formed = !label.is_empty()
            && !hyphen_at_edge
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !well_formed {
            return Err(LapseError::InvalidDomain(name.clone()));
        }
    }

    Ok(name)
}
