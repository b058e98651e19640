//! Archived document entity.

pub mod model;
pub mod tags;

pub use model::ArchiveDocument;
pub use tags::Tags;
