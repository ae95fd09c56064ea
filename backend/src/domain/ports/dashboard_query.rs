//! Driving port for the role-specific dashboard.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Actor, Contractor, ContractorDashboardStats, Error, Project, ProjectStats};

/// Dashboard content for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DashboardView {
    /// Homeowners and administrators.
    #[serde(rename_all = "camelCase")]
    Client {
        /// Figures across the user's projects.
        stats: ProjectStats,
        /// Latest projects.
        recent_projects: Vec<Project>,
    },
    /// Contractors.
    #[serde(rename_all = "camelCase")]
    Contractor {
        /// Profile, when set up.
        profile: Option<Box<Contractor>>,
        /// Profile counters.
        stats: Option<ContractorDashboardStats>,
        /// Open projects to bid on.
        available_projects: Vec<Project>,
    },
}

/// Dashboard reads.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Dashboard for the actor's role.
    async fn overview(&self, actor: Actor) -> Result<DashboardView, Error>;
}
