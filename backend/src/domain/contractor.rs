//! Contractor profiles, reviews, and the public directory.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::project::{RoomType, split_csv};
use crate::domain::slug::unique_slug;
use crate::domain::wire_enum::wire_enum;
use crate::domain::{ContractorId, EmailAddress, Error, ProjectId, UserId};

/// Maximum number of profiles on a directory page.
pub const BROWSE_LIMIT: usize = 20;
/// Default number of results of the search API.
pub const SEARCH_DEFAULT_LIMIT: usize = 10;
/// Upper bound accepted for the search API limit.
pub const SEARCH_MAX_LIMIT: usize = 50;
/// Service radius used when none is given, in kilometres.
pub const DEFAULT_SERVICE_RADIUS_KM: u32 = 50;

const SLUG_FALLBACK: &str = "contractor";
const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_COUNTRY: &str = "France";

wire_enum! {
    /// Trade a contractor offers.
    pub enum Specialty as "specialty" {
        /// Kitchens.
        Kitchen => "kitchen",
        /// Bathrooms.
        Bathroom => "bathroom",
        /// Living rooms.
        LivingRoom => "living-room",
        /// Bedrooms.
        Bedroom => "bedroom",
        /// Outdoor spaces.
        Outdoor => "outdoor",
        /// Floors.
        Flooring => "flooring",
        /// Painting.
        Painting => "painting",
        /// Electrical work.
        Electrical => "electrical",
        /// Plumbing.
        Plumbing => "plumbing",
        /// General contracting.
        General => "general",
    }
}

impl Specialty {
    /// Whether the specialty matches projects of `room`.
    #[must_use]
    pub fn covers(self, room: RoomType) -> bool {
        self.as_str() == room.as_str()
    }
}

wire_enum! {
    /// Whether a contractor takes new work.
    pub enum AvailabilityStatus as "availability" {
        /// Taking work.
        Available => "available",
        /// Booked for now.
        Busy => "busy",
        /// Not taking work.
        Unavailable => "unavailable",
    }
}

/// Validation failures for contractor profiles and reviews.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractorError {
    /// Company name blank.
    #[error("Company name is required")]
    MissingCompanyName,
    /// Description blank.
    #[error("Description is required")]
    MissingDescription,
    /// No specialty selected.
    #[error("Select at least one specialty")]
    NoSpecialties,
    /// Review rating outside 1..=5.
    #[error("Rating must be between 1 and 5")]
    InvalidRating,
}

impl ContractorError {
    const fn field(&self) -> &'static str {
        match self {
            Self::MissingCompanyName => "companyName",
            Self::MissingDescription => "description",
            Self::NoSpecialties => "specialties",
            Self::InvalidRating => "rating",
        }
    }
}

impl From<ContractorError> for Error {
    fn from(value: ContractorError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

/// Professional experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Years in business.
    pub years: u32,
    /// Projects delivered.
    pub projects_completed: u32,
}

/// How clients reach the contractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    /// Phone.
    pub phone: Option<String>,
    /// Email, taken from the owning account.
    pub email: Option<String>,
    /// Website.
    pub website: Option<String>,
}

/// Business address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAddress {
    /// Street.
    pub street: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Region.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Country.
    pub country: String,
}

impl Default for BusinessAddress {
    fn default() -> Self {
        Self {
            street: None,
            city: None,
            state: None,
            zip_code: None,
            country: DEFAULT_COUNTRY.to_owned(),
        }
    }
}

/// Where the contractor works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceArea {
    /// Cities served.
    pub cities: Vec<String>,
    /// Radius around the base, in kilometres.
    pub radius: u32,
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self {
            cities: Vec::new(),
            radius: DEFAULT_SERVICE_RADIUS_KM,
        }
    }
}

impl ServiceArea {
    /// Case-insensitive substring match against the served cities.
    #[must_use]
    pub fn serves(&self, city: &str) -> bool {
        let needle = city.trim().to_lowercase();
        needle.is_empty()
            || self
                .cities
                .iter()
                .any(|served| served.to_lowercase().contains(&needle))
    }
}

/// Professional certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    /// Name.
    pub name: String,
    /// Issuing body.
    pub issuer: Option<String>,
    /// Scan of the certificate.
    pub document_url: Option<String>,
    /// Issue date.
    pub issued_at: Option<DateTime<Utc>>,
    /// Expiry date.
    pub expires_at: Option<DateTime<Utc>>,
    /// Checked by an administrator.
    pub is_verified: bool,
}

/// Liability insurance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    /// Insurer.
    pub provider: Option<String>,
    /// Policy number.
    pub policy_number: Option<String>,
    /// Scan of the policy.
    pub document_url: Option<String>,
    /// Expiry date.
    pub expires_at: Option<DateTime<Utc>>,
    /// Checked by an administrator.
    pub is_verified: bool,
}

/// Past job shown on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Photos.
    pub images: Vec<String>,
    /// Photo before the works.
    pub before_image: Option<String>,
    /// Photo after the works.
    pub after_image: Option<String>,
    /// Completion date.
    pub completed_at: Option<DateTime<Utc>>,
    /// Job budget.
    pub budget: Option<f64>,
}

/// Client review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Reviewing user.
    pub author: UserId,
    /// Reviewed project, if any.
    pub project: Option<ProjectId>,
    /// Score from 1 to 5.
    pub rating: u8,
    /// Headline.
    pub title: Option<String>,
    /// Body.
    pub comment: Option<String>,
    /// Contractor's answer.
    pub response: Option<String>,
    /// Tied to a contracted project.
    pub is_verified: bool,
    /// Submission instant.
    pub created_at: DateTime<Utc>,
}

/// Validated review input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Score from 1 to 5.
    pub rating: u8,
    /// Headline.
    pub title: Option<String>,
    /// Body.
    pub comment: Option<String>,
    /// Reviewed project.
    pub project: Option<ProjectId>,
}

impl NewReview {
    /// Require a 1..=5 rating and drop blank text.
    pub fn try_new(
        rating: u8,
        title: Option<&str>,
        comment: Option<&str>,
        project: Option<ProjectId>,
    ) -> Result<Self, ContractorError> {
        if !(1..=5).contains(&rating) {
            return Err(ContractorError::InvalidRating);
        }
        Ok(Self {
            rating,
            title: optional_text(title),
            comment: optional_text(comment),
            project,
        })
    }
}

/// Average review score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Mean score rounded to one decimal.
    pub average: f64,
    /// Number of reviews.
    pub count: u32,
}

impl Rating {
    /// Mean of `scores`, rounded to one decimal place.
    ///
    /// # Examples
    /// ```
    /// use craftycrib::domain::Rating;
    ///
    /// let rating = Rating::from_scores([5, 4, 4]);
    /// assert_eq!(rating.average, 4.3);
    /// assert_eq!(rating.count, 3);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "review averages are display values rounded to one decimal"
    )]
    #[must_use]
    pub fn from_scores(scores: impl IntoIterator<Item = u8>) -> Self {
        let (sum, count) = scores
            .into_iter()
            .fold((0_u32, 0_u32), |(sum, count), score| {
                (sum + u32::from(score), count + 1)
            });
        if count == 0 {
            return Self::default();
        }
        let mean = f64::from(sum) / f64::from(count);
        Self {
            average: (mean * 10.0).round() / 10.0,
            count,
        }
    }
}

/// Working availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Current state.
    pub status: AvailabilityStatus,
    /// Next free date.
    pub next_available: Option<DateTime<Utc>>,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            status: AvailabilityStatus::Available,
            next_available: None,
        }
    }
}

/// Rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// Hourly rate.
    pub hourly_rate: Option<f64>,
    /// Smallest job taken.
    pub minimum_project: Option<f64>,
    /// ISO currency code.
    pub currency: String,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            hourly_rate: None,
            minimum_project: None,
            currency: DEFAULT_CURRENCY.to_owned(),
        }
    }
}

/// Activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorStats {
    /// Public profile views.
    pub profile_views: u64,
    /// Projects the contractor bid on.
    pub projects_received: u64,
    /// Bids accepted by owners.
    pub projects_accepted: u64,
    /// Share of messages answered, 0 to 100.
    pub response_rate: f64,
}

/// Figures shown on the contractor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorDashboardStats {
    /// Public profile views.
    pub profile_views: u64,
    /// Projects the contractor bid on.
    pub projects_received: u64,
    /// Bids accepted by owners.
    pub projects_accepted: u64,
    /// Average review score.
    pub avg_rating: f64,
}

/// Validated profile creation input.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorSetup {
    /// Company name.
    pub company_name: String,
    /// Description.
    pub description: String,
    /// Trades offered.
    pub specialties: Vec<Specialty>,
    /// Years in business.
    pub experience_years: u32,
    /// Phone.
    pub phone: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Address.
    pub address: BusinessAddress,
    /// Cities served.
    pub service_cities: Vec<String>,
    /// Radius in kilometres.
    pub service_radius: Option<u32>,
    /// Hourly rate.
    pub hourly_rate: Option<f64>,
    /// Smallest job taken.
    pub minimum_project: Option<f64>,
}

/// Raw profile creation form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractorSetupInput<'a> {
    /// Company name.
    pub company_name: &'a str,
    /// Description.
    pub description: &'a str,
    /// Trades offered.
    pub specialties: &'a [Specialty],
    /// Years in business.
    pub experience_years: Option<u32>,
    /// Phone.
    pub phone: Option<&'a str>,
    /// Website.
    pub website: Option<&'a str>,
    /// Street.
    pub street: Option<&'a str>,
    /// City.
    pub city: Option<&'a str>,
    /// Region.
    pub state: Option<&'a str>,
    /// Postal code.
    pub zip_code: Option<&'a str>,
    /// Comma-separated cities served.
    pub service_cities: Option<&'a str>,
    /// Radius in kilometres.
    pub service_radius: Option<u32>,
    /// Hourly rate.
    pub hourly_rate: Option<f64>,
    /// Smallest job taken.
    pub minimum_project: Option<f64>,
}

fn required_text(raw: &str, missing: ContractorError) -> Result<String, ContractorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed.to_owned())
    }
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn specialties(raw: &[Specialty]) -> Result<Vec<Specialty>, ContractorError> {
    let mut unique: Vec<Specialty> = Vec::with_capacity(raw.len());
    for specialty in raw {
        if !unique.contains(specialty) {
            unique.push(*specialty);
        }
    }
    if unique.is_empty() {
        Err(ContractorError::NoSpecialties)
    } else {
        Ok(unique)
    }
}

impl ContractorSetup {
    /// Validate the setup form.
    pub fn try_from_input(input: ContractorSetupInput<'_>) -> Result<Self, ContractorError> {
        Ok(Self {
            company_name: required_text(input.company_name, ContractorError::MissingCompanyName)?,
            description: required_text(input.description, ContractorError::MissingDescription)?,
            specialties: specialties(input.specialties)?,
            experience_years: input.experience_years.unwrap_or_default(),
            phone: optional_text(input.phone),
            website: optional_text(input.website),
            address: BusinessAddress {
                street: optional_text(input.street),
                city: optional_text(input.city),
                state: optional_text(input.state),
                zip_code: optional_text(input.zip_code),
                ..BusinessAddress::default()
            },
            service_cities: split_csv(input.service_cities),
            service_radius: input.service_radius,
            hourly_rate: input.hourly_rate,
            minimum_project: input.minimum_project,
        })
    }
}

/// Owner edits to a profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractorProfileUpdate {
    /// New company name.
    pub company_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New trades.
    pub specialties: Option<Vec<Specialty>>,
    /// New availability.
    pub availability: Option<AvailabilityStatus>,
    /// New served cities.
    pub service_cities: Option<Vec<String>>,
    /// New hourly rate.
    pub hourly_rate: Option<f64>,
}

/// Directory filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorFilter {
    /// Required specialty.
    pub specialty: Option<Specialty>,
    /// City served (substring, case-insensitive).
    pub city: Option<String>,
    /// Minimum average rating.
    pub min_rating: Option<f64>,
    /// Free text matched against name, description, and specialties.
    pub query: Option<String>,
    /// Maximum results.
    pub limit: usize,
}

impl Default for ContractorFilter {
    fn default() -> Self {
        Self {
            specialty: None,
            city: None,
            min_rating: None,
            query: None,
            limit: BROWSE_LIMIT,
        }
    }
}

impl ContractorFilter {
    /// Whether `contractor` is active and passes every filter.
    #[must_use]
    pub fn matches(&self, contractor: &Contractor) -> bool {
        contractor.is_active
            && self
                .specialty
                .is_none_or(|wanted| contractor.specialties.contains(&wanted))
            && self
                .city
                .as_deref()
                .is_none_or(|city| contractor.service_area.serves(city))
            && self
                .min_rating
                .is_none_or(|min| contractor.rating.average >= min)
            && self
                .query
                .as_deref()
                .is_none_or(|query| contractor.matches_text(query))
    }

    /// Filter, rank (premium first, then rating), and truncate.
    #[must_use]
    pub fn apply(&self, contractors: Vec<Contractor>) -> Vec<Contractor> {
        let mut selected: Vec<Contractor> = contractors
            .into_iter()
            .filter(|contractor| self.matches(contractor))
            .collect();
        selected.sort_by(rank);
        selected.truncate(self.limit);
        selected
    }
}

fn rank(left: &Contractor, right: &Contractor) -> Ordering {
    right
        .is_premium
        .cmp(&left.is_premium)
        .then_with(|| right.rating.average.total_cmp(&left.rating.average))
}

/// A contractor's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    /// Identifier.
    pub id: ContractorId,
    /// Owning account.
    pub user: UserId,
    /// Company name.
    pub company_name: String,
    /// Unique slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Trades offered.
    pub specialties: Vec<Specialty>,
    /// Experience.
    pub experience: Experience,
    /// Contact details.
    pub contact: ContactDetails,
    /// Address.
    pub address: BusinessAddress,
    /// Service area.
    pub service_area: ServiceArea,
    /// Certifications.
    pub certifications: Vec<Certification>,
    /// Insurance.
    pub insurance: Option<Insurance>,
    /// Portfolio.
    pub portfolio: Vec<PortfolioItem>,
    /// Reviews, oldest first.
    pub reviews: Vec<Review>,
    /// Aggregate of `reviews`.
    pub rating: Rating,
    /// Availability.
    pub availability: Availability,
    /// Rates.
    pub pricing: Pricing,
    /// Promoted in listings.
    pub is_premium: bool,
    /// Checked by an administrator.
    pub is_verified: bool,
    /// Listed in the directory.
    pub is_active: bool,
    /// Activity counters.
    pub stats: ContractorStats,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Contractor {
    /// Build the profile of `user`, using their account email as contact.
    #[must_use]
    pub fn create(
        user: UserId,
        email: &EmailAddress,
        setup: ContractorSetup,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ContractorId::random(),
            user,
            slug: unique_slug(&setup.company_name, SLUG_FALLBACK, now),
            company_name: setup.company_name,
            description: setup.description,
            specialties: setup.specialties,
            experience: Experience {
                years: setup.experience_years,
                projects_completed: 0,
            },
            contact: ContactDetails {
                phone: setup.phone,
                email: Some(email.as_str().to_owned()),
                website: setup.website,
            },
            address: setup.address,
            service_area: ServiceArea {
                cities: setup.service_cities,
                radius: setup.service_radius.unwrap_or(DEFAULT_SERVICE_RADIUS_KM),
            },
            certifications: Vec::new(),
            insurance: None,
            portfolio: Vec::new(),
            reviews: Vec::new(),
            rating: Rating::default(),
            availability: Availability::default(),
            pricing: Pricing {
                hourly_rate: setup.hourly_rate,
                minimum_project: setup.minimum_project,
                ..Pricing::default()
            },
            is_premium: false,
            is_verified: false,
            is_active: true,
            stats: ContractorStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.company_name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .specialties
                .iter()
                .any(|specialty| specialty.as_str().contains(&needle))
    }

    /// Whether the contractor works on projects of `room`.
    #[must_use]
    pub fn covers(&self, room: RoomType) -> bool {
        self.specialties
            .iter()
            .any(|specialty| specialty.covers(room))
    }

    /// Apply owner edits.
    pub fn apply_update(
        &mut self,
        update: ContractorProfileUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), ContractorError> {
        let company_name = update
            .company_name
            .map(|raw| required_text(&raw, ContractorError::MissingCompanyName))
            .transpose()?;
        let description = update
            .description
            .map(|raw| required_text(&raw, ContractorError::MissingDescription))
            .transpose()?;
        let chosen = update
            .specialties
            .map(|raw| specialties(&raw))
            .transpose()?;

        if let Some(name) = company_name {
            self.company_name = name;
        }
        if let Some(text) = description {
            self.description = text;
        }
        if let Some(list) = chosen {
            self.specialties = list;
        }
        if let Some(status) = update.availability {
            self.availability.status = status;
        }
        if let Some(cities) = update.service_cities {
            self.service_area.cities = cities
                .into_iter()
                .map(|city| city.trim().to_owned())
                .filter(|city| !city.is_empty())
                .collect();
        }
        if update.hourly_rate.is_some() {
            self.pricing.hourly_rate = update.hourly_rate;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Append a review and refresh the rating.
    pub fn add_review(&mut self, author: UserId, review: NewReview, now: DateTime<Utc>) {
        self.reviews.push(Review {
            author,
            project: review.project,
            rating: review.rating,
            title: review.title,
            comment: review.comment,
            response: None,
            is_verified: false,
            created_at: now,
        });
        self.rating = Rating::from_scores(self.reviews.iter().map(|entry| entry.rating));
        self.updated_at = now;
    }

    /// Count a public profile view.
    pub const fn record_profile_view(&mut self) {
        self.stats.profile_views = self.stats.profile_views.saturating_add(1);
    }

    /// Count a bid on a project.
    pub const fn record_project_received(&mut self) {
        self.stats.projects_received = self.stats.projects_received.saturating_add(1);
    }

    /// Count a bid accepted by an owner.
    pub const fn record_project_accepted(&mut self) {
        self.stats.projects_accepted = self.stats.projects_accepted.saturating_add(1);
    }

    /// Dashboard summary.
    #[must_use]
    pub const fn dashboard_stats(&self) -> ContractorDashboardStats {
        ContractorDashboardStats {
            profile_views: self.stats.profile_views,
            projects_received: self.stats.projects_received,
            projects_accepted: self.stats.projects_accepted,
            avg_rating: self.rating.average,
        }
    }
}
