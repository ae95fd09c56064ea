//! Tests for the contractor service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockContractorRepository, MockConversationRepository, MockProjectRepository,
    MockUserRepository,
};
use crate::domain::service_test_support::{
    client_actor, contractor_actor, fixture_clock, make_contractor, make_project, make_user,
};
use crate::domain::{ErrorCode, ProjectStatus, RoomType, UserId, Visibility};

#[derive(Default)]
struct Mocks {
    contractors: MockContractorRepository,
    projects: MockProjectRepository,
    users: MockUserRepository,
    conversations: MockConversationRepository,
}

type Service = ContractorService<
    MockContractorRepository,
    MockProjectRepository,
    MockUserRepository,
    MockConversationRepository,
>;

impl Mocks {
    fn into_service(self) -> Service {
        ContractorService::new(
            Arc::new(self.contractors),
            Arc::new(self.projects),
            Arc::new(self.users),
            Arc::new(self.conversations),
            fixture_clock(),
        )
    }
}

fn open_project(owner: UserId) -> Project {
    let mut project = make_project(owner);
    project.visibility = Visibility::Contractors;
    project.status = ProjectStatus::Completed;
    project
}

#[tokio::test]
async fn setup_is_reserved_for_contractors() {
    let err = Mocks::default()
        .into_service()
        .setup(client_actor(), make_setup())
        .await
        .expect_err("client");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

fn make_setup() -> ContractorSetup {
    let profile = make_contractor(UserId::random());
    ContractorSetup {
        company_name: profile.company_name,
        description: profile.description,
        specialties: profile.specialties,
        experience_years: 3,
        phone: None,
        website: None,
        address: profile.address,
        service_cities: profile.service_area.cities,
        service_radius: None,
        hourly_rate: None,
        minimum_project: None,
    }
}

#[tokio::test]
async fn setup_allows_one_profile_per_user() {
    let mut mocks = Mocks::default();
    let actor = contractor_actor();
    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(move |user| Ok(Some(make_contractor(*user))));
    mocks.contractors.expect_insert().times(0);

    let err = mocks
        .into_service()
        .setup(actor, make_setup())
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Contractor profile already exists");
}

#[tokio::test]
async fn setup_uses_account_email_as_contact() {
    let mut mocks = Mocks::default();
    let user = make_user("builder@example.com", Role::Contractor);
    let actor = Actor::of(&user);
    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(|_| Ok(None));
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(user)));
    mocks
        .contractors
        .expect_insert()
        .times(1)
        .return_once(|_| Ok(()));

    let profile = mocks
        .into_service()
        .setup(actor, make_setup())
        .await
        .expect("created");
    assert_eq!(profile.user, actor.id);
    assert_eq!(profile.contact.email.as_deref(), Some("builder@example.com"));
    assert!(profile.slug.starts_with("atelier-bois-"));
}

#[tokio::test]
async fn express_interest_records_bid_and_notifies_owner() {
    let mut mocks = Mocks::default();
    let actor = contractor_actor();
    let owner = UserId::random();
    let profile = make_contractor(actor.id);
    let profile_id = profile.id;
    let project = open_project(owner);
    let project_id = project.id;

    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(profile)));
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(project)));
    mocks
        .projects
        .expect_save()
        .withf(move |project: &Project| {
            project
                .contractor_requests
                .iter()
                .any(|request| request.contractor == profile_id)
        })
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .contractors
        .expect_save()
        .withf(|profile: &Contractor| profile.stats.projects_received == 1)
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .conversations
        .expect_find_between()
        .times(1)
        .return_once(|_, _, _| Ok(None));
    mocks
        .conversations
        .expect_save()
        .withf(move |conversation: &Conversation| {
            conversation.is_between(actor.id, owner, Some(project_id))
                && conversation.unread_for(owner) == 1
        })
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .conversations
        .expect_save_messages()
        .withf(|messages: &[Message]| {
            messages.len() == 1
                && messages.iter().all(|message| {
                    message.is_system_message
                        && message.content.as_str().contains("Loft kitchen")
                        && message.content.as_str().ends_with("Available in May")
                })
        })
        .times(1)
        .return_once(|_| Ok(()));

    mocks
        .into_service()
        .express_interest(
            actor,
            &project_id,
            InterestRequest {
                message: Some("Available in May".to_owned()),
                quotation: Some(8500.0),
            },
        )
        .await
        .expect("interest recorded");
}

#[tokio::test]
async fn express_interest_twice_is_rejected() {
    let mut mocks = Mocks::default();
    let actor = contractor_actor();
    let profile = make_contractor(actor.id);
    let mut project = open_project(UserId::random());
    project
        .add_contractor_request(profile.id, None, None, project.created_at)
        .expect("first bid");
    let project_id = project.id;

    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(profile)));
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(project)));
    mocks.projects.expect_save().times(0);

    let err = mocks
        .into_service()
        .express_interest(actor, &project_id, InterestRequest::default())
        .await
        .expect_err("duplicate bid");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Already expressed interest");
}

#[tokio::test]
async fn oversized_note_is_rejected_before_anything_is_stored() {
    let mut mocks = Mocks::default();
    let actor = contractor_actor();
    let profile = make_contractor(actor.id);
    let project = open_project(UserId::random());
    let project_id = project.id;

    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(profile)));
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(project)));
    mocks.projects.expect_save().times(0);
    mocks.contractors.expect_save().times(0);
    mocks.conversations.expect_save().times(0);

    let err = mocks
        .into_service()
        .express_interest(
            actor,
            &project_id,
            InterestRequest {
                message: Some("x".repeat(5000)),
                quotation: None,
            },
        )
        .await
        .expect_err("notice too long");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Message cannot exceed 5000 characters");
}

#[tokio::test]
async fn private_projects_cannot_be_bid_on() {
    let mut mocks = Mocks::default();
    let actor = contractor_actor();
    let profile = make_contractor(actor.id);
    let project = make_project(UserId::random());
    let project_id = project.id;
    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(profile)));
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(project)));

    let err = mocks
        .into_service()
        .express_interest(actor, &project_id, InterestRequest::default())
        .await
        .expect_err("private project");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn reviews_come_from_clients_only() {
    let err = Mocks::default()
        .into_service()
        .review(
            contractor_actor(),
            "atelier-bois",
            NewReview::try_new(5, None, None, None).expect("rating"),
        )
        .await
        .expect_err("contractor reviewer");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn review_refreshes_rating() {
    let mut mocks = Mocks::default();
    mocks
        .contractors
        .expect_find_by_slug()
        .times(1)
        .return_once(|_| Ok(Some(make_contractor(UserId::random()))));
    mocks
        .contractors
        .expect_save()
        .times(1)
        .return_once(|_| Ok(()));

    let profile = mocks
        .into_service()
        .review(
            client_actor(),
            "atelier-bois",
            NewReview::try_new(4, Some("Great"), Some("Clean work"), None).expect("rating"),
        )
        .await
        .expect("reviewed");
    assert_eq!(profile.rating.count, 1);
    assert!(profile.rating.average.total_cmp(&4.0).is_eq());
}

#[tokio::test]
async fn view_counts_profile_views() {
    let mut mocks = Mocks::default();
    mocks
        .contractors
        .expect_find_by_slug()
        .times(1)
        .return_once(|_| Ok(Some(make_contractor(UserId::random()))));
    mocks
        .contractors
        .expect_save()
        .withf(|profile: &Contractor| profile.stats.profile_views == 1)
        .times(1)
        .return_once(|_| Ok(()));

    let profile = mocks
        .into_service()
        .view("atelier-bois")
        .await
        .expect("profile");
    assert_eq!(profile.stats.profile_views, 1);
}

#[tokio::test]
async fn inactive_profiles_are_hidden() {
    let mut mocks = Mocks::default();
    let mut profile = make_contractor(UserId::random());
    profile.is_active = false;
    mocks
        .contractors
        .expect_find_by_slug()
        .times(1)
        .return_once(move |_| Ok(Some(profile)));

    let err = mocks
        .into_service()
        .view("atelier-bois")
        .await
        .expect_err("inactive");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn available_projects_match_specialties() {
    let mut mocks = Mocks::default();
    let actor = contractor_actor();
    let profile = make_contractor(actor.id);
    let kitchen = open_project(UserId::random());
    let kitchen_id = kitchen.id;
    let mut garden = open_project(UserId::random());
    garden.room_type = RoomType::Outdoor;
    mocks
        .contractors
        .expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(profile)));
    mocks
        .projects
        .expect_list_open_to_contractors()
        .times(1)
        .return_once(move || Ok(vec![garden, kitchen]));

    let projects = mocks
        .into_service()
        .available_projects(actor, Some(10))
        .await
        .expect("projects");
    let ids: Vec<ProjectId> = projects.iter().map(|project| project.id).collect();
    assert_eq!(ids, vec![kitchen_id]);
}

#[tokio::test]
async fn browse_ranks_premium_first() {
    let mut mocks = Mocks::default();
    let regular = make_contractor(UserId::random());
    let mut premium = make_contractor(UserId::random());
    premium.is_premium = true;
    let premium_id = premium.id;
    mocks
        .contractors
        .expect_list_active()
        .times(1)
        .return_once(move || Ok(vec![regular, premium]));

    let listed = mocks
        .into_service()
        .browse(ContractorFilter::default())
        .await
        .expect("directory");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed.first().map(|profile| profile.id), Some(premium_id));
}
