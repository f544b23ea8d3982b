//! Error conversions from external crates into [`wobbly_domain::WobblyError`]

mod conversions;

pub use conversions::InfraError;
