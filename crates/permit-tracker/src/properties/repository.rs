use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Project, ProjectId, Property, PropertyId};

/// Storage abstraction so the service can run against any backing store.
pub trait PropertyRepository: Send + Sync {
    /// Store a property unless one with the same address (ignoring case) or the
    /// same parcel id exists. The check and the write must be atomic.
    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError>;
    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
    fn find_by_parcel_id(&self, parcel_id: &str) -> Result<Option<Property>, RepositoryError>;
    /// First property whose address contains `fragment`, ignoring case.
    fn search_by_address(&self, fragment: &str) -> Result<Option<Property>, RepositoryError>;
    fn list_properties(&self, limit: usize) -> Result<Vec<Property>, RepositoryError>;
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError>;
    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
    /// Projects on a property, newest first.
    fn projects_for(&self, property_id: &PropertyId) -> Result<Vec<Project>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("property already registered as {}", .0.id)]
    Duplicate(Box<Property>),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keeping records in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPropertyRepository {
    properties: Arc<Mutex<Vec<Property>>>,
    projects: Arc<Mutex<Vec<Project>>>,
}

impl InMemoryPropertyRepository {
    fn properties(&self) -> Result<MutexGuard<'_, Vec<Property>>, RepositoryError> {
        self.properties
            .lock()
            .map_err(|_| RepositoryError::Unavailable("property store poisoned".to_string()))
    }

    fn projects(&self) -> Result<MutexGuard<'_, Vec<Project>>, RepositoryError> {
        self.projects
            .lock()
            .map_err(|_| RepositoryError::Unavailable("project store poisoned".to_string()))
    }
}

impl PropertyRepository for InMemoryPropertyRepository {
    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut guard = self.properties()?;
        if guard.iter().any(|existing| existing.id == property.id) {
            return Err(RepositoryError::Conflict);
        }
        if let Some(existing) = guard.iter().find(|existing| is_duplicate(existing, &property)) {
            return Err(RepositoryError::Duplicate(Box::new(existing.clone())));
        }
        guard.push(property.clone());
        Ok(property)
    }

    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        let guard = self.properties()?;
        Ok(guard.iter().find(|property| &property.id == id).cloned())
    }

    fn find_by_parcel_id(&self, parcel_id: &str) -> Result<Option<Property>, RepositoryError> {
        let guard = self.properties()?;
        Ok(guard
            .iter()
            .find(|property| property.parcel_id.as_deref() == Some(parcel_id))
            .cloned())
    }

    fn search_by_address(&self, fragment: &str) -> Result<Option<Property>, RepositoryError> {
        let needle = fragment.to_lowercase();
        let guard = self.properties()?;
        Ok(guard
            .iter()
            .find(|property| property.address.to_lowercase().contains(&needle))
            .cloned())
    }

    fn list_properties(&self, limit: usize) -> Result<Vec<Property>, RepositoryError> {
        let guard = self.properties()?;
        Ok(guard.iter().take(limit).cloned().collect())
    }

    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError> {
        let mut guard = self.projects()?;
        if guard.iter().any(|existing| existing.id == project.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(project.clone());
        Ok(project)
    }

    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        let guard = self.projects()?;
        Ok(guard.iter().find(|project| &project.id == id).cloned())
    }

    fn projects_for(&self, property_id: &PropertyId) -> Result<Vec<Project>, RepositoryError> {
        let guard = self.projects()?;
        let mut projects: Vec<Project> = guard
            .iter()
            .filter(|project| &project.property_id == property_id)
            .cloned()
            .collect();
        // Stable, so equal timestamps fall back to newest insertion first.
        projects.reverse();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }
}

fn is_duplicate(existing: &Property, candidate: &Property) -> bool {
    existing.address.to_lowercase() == candidate.address.to_lowercase()
        || (candidate.parcel_id.is_some() && existing.parcel_id == candidate.parcel_id)
}
