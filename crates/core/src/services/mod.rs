pub mod address_service;
pub mod analysis_service;
pub mod portfolio_service;
pub mod valuation_service;
