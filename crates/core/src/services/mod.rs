pub mod analytics_service;
pub mod record_validation;
