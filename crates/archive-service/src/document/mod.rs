//! Document upload, retrieval, search and content analysis.

pub mod analysis;
pub mod service;

pub use analysis::DocumentAnalysisService;
pub use service::{DocumentDetails, DocumentService, DocumentStats, DocumentUpdate, NewDocument};
