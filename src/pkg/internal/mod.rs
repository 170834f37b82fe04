pub mod adaptors;
pub mod listing;
pub mod screens;
pub mod session;
pub mod stats;
pub mod store;
