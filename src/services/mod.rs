pub mod advisory;

pub mod countries;
pub use countries::CountryCatalog;

pub mod ranking;

pub mod recommend_service;
pub mod recommend_service_impl;
pub use recommend_service::{RecommendError, RecommendService, RecommendationOutcome};
pub use recommend_service_impl::DefaultRecommendService;
