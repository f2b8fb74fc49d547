pub mod artifact;
pub mod fetch;
