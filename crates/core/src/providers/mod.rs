pub mod traits;

// Backend implementation
pub mod api_client;
pub(crate) mod dto;
