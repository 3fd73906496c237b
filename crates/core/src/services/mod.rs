pub mod chart_service;
pub mod format;
pub mod market_service;
pub mod normalizer;
