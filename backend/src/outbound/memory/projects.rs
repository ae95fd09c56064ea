//! In-memory `ProjectRepository`.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectId, ProjectStatus, UserId, Visibility};

fn slug_taken(projects: &HashMap<ProjectId, Project>, project: &Project) -> Option<String> {
    projects
        .values()
        .filter(|other| other.id != project.id)
        .find_map(|other| {
            if other.slug == project.slug {
                Some(project.slug.clone())
            } else {
                project
                    .public_slug
                    .as_ref()
                    .filter(|slug| other.public_slug.as_ref() == Some(*slug))
                    .cloned()
            }
        })
}

/// Projects kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryProjectRepository {
    projects: RwLock<HashMap<ProjectId, Project>>,
}

impl MemoryProjectRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first<F>(&self, predicate: F) -> Vec<Project>
    where
        F: Fn(&Project) -> bool + Send,
    {
        let mut matching: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|project| predicate(project))
            .cloned()
            .collect();
        matching.sort_by_key(|project| Reverse(project.created_at));
        matching
    }

    async fn find_where<F>(&self, predicate: F) -> Option<Project>
    where
        F: Fn(&Project) -> bool + Send,
    {
        self.projects
            .read()
            .await
            .values()
            .find(|project| predicate(project))
            .cloned()
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut projects = self.projects.write().await;
        if let Some(slug) = slug_taken(&projects, project) {
            return Err(ProjectRepositoryError::duplicate_slug(slug));
        }
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        Ok(self.projects.write().await.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn find_by_share_token(
        &self,
        token: &str,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self.find_where(|project| project.share_token == token).await)
    }

    async fn find_published_by_slug(
        &self,
        public_slug: &str,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self
            .find_where(|project| {
                project.is_published && project.public_slug.as_deref() == Some(public_slug)
            })
            .await)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(self.newest_first(|project| project.owner == *owner).await)
    }

    async fn list_published(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut published = self.newest_first(|project| project.is_published).await;
        published.sort_by_key(|project| Reverse(project.published_at));
        Ok(published)
    }

    async fn list_open_to_contractors(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(self
            .newest_first(|project| {
                project.visibility == Visibility::Contractors
                    && matches!(
                        project.status,
                        ProjectStatus::Completed | ProjectStatus::Pending
                    )
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::service_test_support::{fixture_timestamp, make_project};

    fn project_with_slug(owner: UserId, slug: &str) -> Project {
        let mut project = make_project(owner);
        project.slug = slug.to_owned();
        project
    }

    #[tokio::test]
    async fn owner_listing_is_newest_first() {
        let repo = MemoryProjectRepository::new();
        let owner = UserId::random();
        let mut older = project_with_slug(owner, "loft-kitchen-older");
        older.created_at = fixture_timestamp() - Duration::days(2);
        let newer = project_with_slug(owner, "loft-kitchen-newer");
        repo.save(&older).await.expect("save");
        repo.save(&newer).await.expect("save");
        repo.save(&project_with_slug(UserId::random(), "loft-kitchen-other"))
            .await
            .expect("save");

        let listed = repo.list_by_owner(&owner).await.expect("list");
        let ids: Vec<_> = listed.iter().map(|project| project.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn open_listing_skips_private_and_drafts() {
        let repo = MemoryProjectRepository::new();
        let mut open = project_with_slug(UserId::random(), "loft-kitchen-open");
        open.visibility = Visibility::Contractors;
        open.status = ProjectStatus::Pending;
        let mut draft = open.clone();
        draft.id = ProjectId::random();
        draft.slug = "loft-kitchen-draft".to_owned();
        draft.status = ProjectStatus::Draft;
        let private = make_project(UserId::random());
        for project in [&open, &draft, &private] {
            repo.save(project).await.expect("save");
        }

        let listed = repo.list_open_to_contractors().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|project| project.id), Some(open.id));
    }

    #[tokio::test]
    async fn slugs_are_unique_across_projects() {
        let repo = MemoryProjectRepository::new();
        let first = make_project(UserId::random());
        repo.save(&first).await.expect("save");

        let mut twin = make_project(UserId::random());
        assert_eq!(twin.slug, first.slug, "same title at the same instant");
        let err = repo.save(&twin).await.expect_err("slug taken");
        assert!(matches!(err, ProjectRepositoryError::DuplicateSlug { .. }));

        twin.slug = "loft-kitchen-other".to_owned();
        repo.save(&twin).await.expect("distinct slug");
        repo.save(&first).await.expect("resaving keeps its own slug");
    }

    #[tokio::test]
    async fn gallery_slugs_are_unique_across_projects() {
        let repo = MemoryProjectRepository::new();
        let mut first = make_project(UserId::random());
        first.public_slug = Some("loft-kitchen-ab12".to_owned());
        repo.save(&first).await.expect("save");

        let mut second = make_project(UserId::random());
        second.slug = "loft-kitchen-cd34".to_owned();
        second.public_slug = first.public_slug.clone();
        let err = repo.save(&second).await.expect_err("gallery slug taken");
        assert!(matches!(err, ProjectRepositoryError::DuplicateSlug { .. }));
    }

    #[tokio::test]
    async fn unpublished_slug_is_not_found() {
        let repo = MemoryProjectRepository::new();
        let mut project = make_project(UserId::random());
        project.public_slug = Some("loft-kitchen-ab12".to_owned());
        repo.save(&project).await.expect("save");

        assert!(
            repo.find_published_by_slug("loft-kitchen-ab12")
                .await
                .expect("lookup")
                .is_none()
        );
    }
}
