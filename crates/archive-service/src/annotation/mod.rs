//! Annotations on archived documents.

pub mod service;

pub use service::{AnnotationService, AnnotationUpdate, NewAnnotation};
