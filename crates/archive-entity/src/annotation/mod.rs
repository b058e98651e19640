//! Annotation entity.

pub mod kind;
pub mod model;

pub use kind::AnnotationType;
pub use model::Annotation;
