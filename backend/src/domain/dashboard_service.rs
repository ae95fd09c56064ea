//! Dashboard domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::port_errors::{map_contractor_error, map_project_error};
use crate::domain::ports::{
    ContractorRepository, DashboardQuery, DashboardView, ProjectRepository,
};
use crate::domain::{Actor, Error, ProjectStats, Role};

/// Projects shown on a client dashboard.
pub const RECENT_PROJECT_COUNT: usize = 5;
/// Open projects shown on a contractor dashboard.
pub const AVAILABLE_PROJECT_COUNT: usize = 10;

/// Builds the dashboard for the signed-in user's role.
#[derive(Clone)]
pub struct DashboardService<P, C> {
    projects: Arc<P>,
    contractors: Arc<C>,
}

impl<P, C> DashboardService<P, C> {
    /// Create a new service.
    pub fn new(projects: Arc<P>, contractors: Arc<C>) -> Self {
        Self {
            projects,
            contractors,
        }
    }
}

impl<P, C> DashboardService<P, C>
where
    P: ProjectRepository,
    C: ContractorRepository,
{
    async fn client_view(&self, actor: Actor) -> Result<DashboardView, Error> {
        let projects = self
            .projects
            .list_by_owner(&actor.id)
            .await
            .map_err(map_project_error)?;
        let stats = ProjectStats::from_projects(&projects);
        Ok(DashboardView::Client {
            stats,
            recent_projects: projects.into_iter().take(RECENT_PROJECT_COUNT).collect(),
        })
    }

    async fn contractor_view(&self, actor: Actor) -> Result<DashboardView, Error> {
        let Some(profile) = self
            .contractors
            .find_by_user(&actor.id)
            .await
            .map_err(map_contractor_error)?
        else {
            return Ok(DashboardView::Contractor {
                profile: None,
                stats: None,
                available_projects: Vec::new(),
            });
        };
        let available_projects = self
            .projects
            .list_open_to_contractors()
            .await
            .map_err(map_project_error)?
            .into_iter()
            .filter(|project| profile.covers(project.room_type))
            .take(AVAILABLE_PROJECT_COUNT)
            .collect();
        Ok(DashboardView::Contractor {
            stats: Some(profile.dashboard_stats()),
            profile: Some(Box::new(profile)),
            available_projects,
        })
    }
}

#[async_trait]
impl<P, C> DashboardQuery for DashboardService<P, C>
where
    P: ProjectRepository,
    C: ContractorRepository,
{
    async fn overview(&self, actor: Actor) -> Result<DashboardView, Error> {
        match actor.role {
            Role::Contractor => self.contractor_view(actor).await,
            Role::Client | Role::Admin => self.client_view(actor).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockContractorRepository, MockProjectRepository};
    use crate::domain::service_test_support::{
        client_actor, contractor_actor, make_contractor, make_project,
    };
    use crate::domain::{ProjectStatus, UserId, Visibility};

    fn service(
        projects: MockProjectRepository,
        contractors: MockContractorRepository,
    ) -> DashboardService<MockProjectRepository, MockContractorRepository> {
        DashboardService::new(Arc::new(projects), Arc::new(contractors))
    }

    #[tokio::test]
    async fn client_dashboard_shows_five_recent_projects() {
        let actor = client_actor();
        let owned: Vec<_> = (0..7).map(|_| make_project(actor.id)).collect();
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_by_owner()
            .times(1)
            .return_once(move |_| Ok(owned));

        let view = service(projects, MockContractorRepository::new())
            .overview(actor)
            .await
            .expect("dashboard");
        let DashboardView::Client {
            stats,
            recent_projects,
        } = view
        else {
            panic!("expected a client dashboard");
        };
        assert_eq!(stats.total_projects, 7);
        assert_eq!(recent_projects.len(), RECENT_PROJECT_COUNT);
    }

    #[tokio::test]
    async fn contractor_without_profile_gets_empty_dashboard() {
        let mut contractors = MockContractorRepository::new();
        contractors
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(None));
        let mut projects = MockProjectRepository::new();
        projects.expect_list_open_to_contractors().times(0);

        let view = service(projects, contractors)
            .overview(contractor_actor())
            .await
            .expect("dashboard");
        assert_eq!(
            view,
            DashboardView::Contractor {
                profile: None,
                stats: None,
                available_projects: Vec::new(),
            }
        );
    }

    #[tokio::test]
    async fn contractor_dashboard_lists_matching_open_projects() {
        let actor = contractor_actor();
        let mut contractors = MockContractorRepository::new();
        contractors
            .expect_find_by_user()
            .times(1)
            .return_once(move |user| Ok(Some(make_contractor(*user))));
        let open: Vec<_> = (0..12)
            .map(|_| {
                let mut project = make_project(UserId::random());
                project.visibility = Visibility::Contractors;
                project.status = ProjectStatus::Pending;
                project
            })
            .collect();
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list_open_to_contractors()
            .times(1)
            .return_once(move || Ok(open));

        let view = service(projects, contractors)
            .overview(actor)
            .await
            .expect("dashboard");
        let DashboardView::Contractor {
            profile,
            stats,
            available_projects,
        } = view
        else {
            panic!("expected a contractor dashboard");
        };
        assert_eq!(profile.map(|found| found.user), Some(actor.id));
        assert_eq!(stats.map(|figures| figures.projects_received), Some(0));
        assert_eq!(available_projects.len(), AVAILABLE_PROJECT_COUNT);
    }
}
