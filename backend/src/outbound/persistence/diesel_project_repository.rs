//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectId, ProjectStatus, UserId, Visibility};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{DocumentError, ProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

type ProjectQuery = projects::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(&self, query: ProjectQuery) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = query
            .select(ProjectRow::as_select())
            .load::<ProjectRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(ProjectRow::into_project)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_document_error)
    }

    async fn load_one(&self, query: ProjectQuery) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self.load(query.limit(1)).await?.into_iter().next())
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    map_basic_pool_error(error, ProjectRepositoryError::connection)
}

const SLUG_CONSTRAINTS: [&str; 2] = ["projects_slug_key", "projects_public_slug_key"];

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    if let Some(constraint) =
        unique_violation(&error).filter(|name| SLUG_CONSTRAINTS.contains(name))
    {
        return ProjectRepositoryError::duplicate_slug(constraint.to_owned());
    }
    map_basic_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn map_document_error(error: DocumentError) -> ProjectRepositoryError {
    ProjectRepositoryError::query(error.to_string())
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let row = ProjectRow::from_project(project).map_err(map_document_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(projects::table)
            .values(&row)
            .on_conflict(projects::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(projects::table.filter(projects::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        self.load_one(
            projects::table
                .into_boxed()
                .filter(projects::id.eq(*id.as_uuid())),
        )
        .await
    }

    async fn find_by_share_token(
        &self,
        token: &str,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        self.load_one(
            projects::table
                .into_boxed()
                .filter(projects::share_token.eq(token.to_owned())),
        )
        .await
    }

    async fn find_published_by_slug(
        &self,
        public_slug: &str,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        self.load_one(
            projects::table
                .into_boxed()
                .filter(projects::public_slug.eq(public_slug.to_owned()))
                .filter(projects::is_published.eq(true)),
        )
        .await
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        self.load(
            projects::table
                .into_boxed()
                .filter(projects::owner_id.eq(*owner.as_uuid()))
                .order(projects::created_at.desc()),
        )
        .await
    }

    async fn list_published(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        self.load(
            projects::table
                .into_boxed()
                .filter(projects::is_published.eq(true))
                .order(projects::published_at.desc()),
        )
        .await
    }

    async fn list_open_to_contractors(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        self.load(
            projects::table
                .into_boxed()
                .filter(projects::visibility.eq(Visibility::Contractors.as_str()))
                .filter(projects::status.eq_any([
                    ProjectStatus::Completed.as_str(),
                    ProjectStatus::Pending.as_str(),
                ]))
                .order(projects::created_at.desc()),
        )
        .await
    }
}
