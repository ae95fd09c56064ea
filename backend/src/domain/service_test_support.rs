//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Actor, EmailAddress, ImageUpload, NewUser, PasswordHash, Project, ProjectDraft, Role, User,
    UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn make_user(email: &str, role: Role) -> User {
    User::create(
        NewUser {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: EmailAddress::parse(email).expect("fixture email"),
            password_hash: PasswordHash::new("fixture$secret1"),
            role,
            verified: true,
        },
        fixture_timestamp(),
    )
}

pub(crate) fn client_actor() -> Actor {
    Actor {
        id: UserId::random(),
        role: Role::Client,
    }
}

pub(crate) fn make_project(owner: UserId) -> Project {
    let draft = ProjectDraft {
        title: "Loft kitchen".to_owned(),
        description: "Open the kitchen onto the living room".to_owned(),
        room_type: crate::domain::RoomType::Kitchen,
        style: Some(crate::domain::DesignStyle::Industrial),
        budget: crate::domain::Budget::default(),
        dimensions: crate::domain::project::Dimensions::default(),
        preferences: crate::domain::Preferences::default(),
        priorities: crate::domain::Priorities::default(),
        is_diy: false,
        images: vec![ImageUpload {
            url: "https://cdn.example/kitchen.jpg".to_owned(),
            public_id: None,
        }],
    };
    Project::create(owner, draft, fixture_timestamp())
}

pub(crate) fn make_contractor(user: UserId) -> crate::domain::Contractor {
    let setup = crate::domain::ContractorSetup::try_from_input(crate::domain::ContractorSetupInput {
        company_name: "Atelier Bois",
        description: "Kitchens and bathrooms in Lyon",
        specialties: &[
            crate::domain::Specialty::Kitchen,
            crate::domain::Specialty::Bathroom,
        ],
        experience_years: Some(12),
        phone: None,
        website: None,
        street: None,
        city: Some("Lyon"),
        state: None,
        zip_code: None,
        service_cities: Some("Lyon, Villeurbanne"),
        service_radius: None,
        hourly_rate: Some(45.0),
        minimum_project: None,
    })
    .expect("fixture setup");
    let email = EmailAddress::parse("atelier@example.com").expect("fixture email");
    crate::domain::Contractor::create(user, &email, setup, fixture_timestamp())
}

pub(crate) fn contractor_actor() -> Actor {
    Actor {
        id: UserId::random(),
        role: Role::Contractor,
    }
}
