pub mod address;
pub mod analysis;
pub mod holding;
pub mod market;
pub mod settings;
pub mod wallet;
