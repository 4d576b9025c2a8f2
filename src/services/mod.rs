// Service exports
pub mod cache;
pub mod crm;
pub mod history;

pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
pub use crm::{CrmClient, CrmError};
pub use history::{HistoryStore, HistoryError, AnalysisRecord, AnalysisStats};
