pub mod claims;
pub mod credentials;
