pub mod clock;
pub mod config;
pub mod content;
pub mod domain;
pub mod profile;
pub mod rewards;
pub mod scoring;
pub mod session;
pub mod srs;
pub mod validation;
