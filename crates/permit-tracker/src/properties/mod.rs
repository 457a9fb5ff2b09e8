//! Property lookup and permit project tracking.
//!
//! Properties and projects are persisted through [`PropertyRepository`]; deadlines are
//! never stored and are recomputed from each project's milestones on every read.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DocumentStatus, NewProject, NewProperty, Project, ProjectDocument, ProjectId, ProjectStatus,
    ProjectView, Property, PropertyId, PropertyLookup, PropertyView,
};
pub use repository::{InMemoryPropertyRepository, PropertyRepository, RepositoryError};
pub use router::property_router;
pub use service::{PropertyService, PropertyServiceError};
