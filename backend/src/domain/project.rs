//! Renovation projects and their design lifecycle.
//!
//! A project starts as a draft, moves to `generating` while the AI provider
//! renders a variant, and lands on `completed` (or back on `pending` when the
//! call fails). Publishing exposes a completed project in the public gallery.
//! Every transition lives on [`Project`] so services only orchestrate I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::catalogue::find_style;
use crate::domain::generation::{GeneratedDesign, GenerationRequest};
use crate::domain::slug::unique_slug;
use crate::domain::token::{SHARE_TOKEN_BYTES, random_hex};
use crate::domain::wire_enum::wire_enum;
use crate::domain::{ContractorId, Error, ImageId, ProjectId, UserId, VariantId};

/// Maximum number of images accepted in one upload.
pub const MAX_IMAGES_PER_UPLOAD: usize = 5;
/// Style used when neither the request nor the project names one.
pub const DEFAULT_GENERATION_STYLE: &str = "modern";

const SLUG_FALLBACK: &str = "project";
const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_UNIT: &str = "m";
const DEFAULT_PRIORITY: u8 = 3;

wire_enum! {
    /// Room being renovated.
    pub enum RoomType as "room type" {
        /// Living room.
        LivingRoom => "living-room",
        /// Bedroom.
        Bedroom => "bedroom",
        /// Kitchen.
        Kitchen => "kitchen",
        /// Bathroom.
        Bathroom => "bathroom",
        /// Dining room.
        DiningRoom => "dining-room",
        /// Home office.
        Office => "office",
        /// Patio or garden.
        Outdoor => "outdoor",
        /// Anything else.
        Other => "other",
    }
}

wire_enum! {
    /// Style a project aims for.
    pub enum DesignStyle as "design style" {
        /// Modern.
        Modern => "modern",
        /// Contemporary.
        Contemporary => "contemporary",
        /// Minimalist.
        Minimalist => "minimalist",
        /// Industrial.
        Industrial => "industrial",
        /// Scandinavian.
        Scandinavian => "scandinavian",
        /// Traditional.
        Traditional => "traditional",
        /// Rustic.
        Rustic => "rustic",
        /// Bohemian.
        Bohemian => "bohemian",
        /// Coastal.
        Coastal => "coastal",
        /// Mid-century modern.
        MidCentury => "mid-century",
        /// Anything else.
        Other => "other",
    }
}

wire_enum! {
    /// Lifecycle state of a project.
    #[derive(Default)]
    pub enum ProjectStatus as "project status" {
        /// Freshly created.
        #[default]
        Draft => "draft",
        /// Waiting for a (new) generation attempt.
        Pending => "pending",
        /// A generation call is in flight.
        Generating => "generating",
        /// At least one variant has been generated.
        Completed => "completed",
        /// Works under way.
        InProgress => "in-progress",
        /// A contractor has been selected.
        Contracted => "contracted",
        /// Closed by the owner.
        Archived => "archived",
    }
}

wire_enum! {
    /// Who may see a project.
    #[derive(Default)]
    pub enum Visibility as "visibility" {
        /// Owner only.
        #[default]
        Private => "private",
        /// Contractors browsing available projects.
        Contractors => "contractors",
        /// Everybody, through the gallery.
        Public => "public",
    }
}

wire_enum! {
    /// State of a contractor's request to work on a project.
    pub enum RequestStatus as "request status" {
        /// Awaiting the owner's answer.
        Pending => "pending",
        /// Chosen by the owner.
        Accepted => "accepted",
        /// Declined, or superseded by another acceptance.
        Rejected => "rejected",
    }
}

wire_enum! {
    /// Price tier of a generated variant.
    pub enum BudgetLevel as "budget level" {
        /// Cheapest.
        Economy => "economy",
        /// Middle of the range.
        Standard => "standard",
        /// Upmarket.
        Premium => "premium",
        /// No expense spared.
        Luxury => "luxury",
    }
}

/// Validation and transition failures for projects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    /// Title blank.
    #[error("Title is required")]
    MissingTitle,
    /// Description blank.
    #[error("Description is required")]
    MissingDescription,
    /// Budget bounds inverted or negative.
    #[error("Budget minimum must be between 0 and the maximum")]
    InvalidBudget,
    /// Priority outside 1..=5.
    #[error("Priorities must be between 1 and 5")]
    InvalidPriority,
    /// Upload without images.
    #[error("Please select at least one image")]
    NoImagesSelected,
    /// Upload with too many images.
    #[error("You can upload at most 5 images at once")]
    TooManyImages,
    /// Image URL blank.
    #[error("Image URL is required")]
    MissingImageUrl,
    /// Image id unknown to the project.
    #[error("Image not found")]
    ImageNotFound,
    /// Generation requested on a project without images.
    #[error("Please upload at least one image first")]
    NoSourceImage,
    /// Generation requested while another is running.
    #[error("Generation already in progress")]
    GenerationInProgress,
    /// Style override not in the catalogue.
    #[error("Unknown design style: {0}")]
    UnknownStyle(String),
    /// Publish requested without variants.
    #[error("Generate at least one AI design before publishing")]
    NothingToPublish,
    /// Featured image not owned by the project.
    #[error("Featured image must be one of the project's images")]
    ForeignFeaturedImage,
    /// Status patch to `generating`.
    #[error("Status generating can only be set by a generation")]
    ReservedStatus,
    /// Contractor already has a request on the project.
    #[error("Already expressed interest")]
    AlreadyInterested,
    /// No request from the contractor.
    #[error("Contractor request not found")]
    RequestNotFound,
    /// Request already answered.
    #[error("Contractor request is no longer pending")]
    RequestNotPending,
}

impl From<ProjectError> for Error {
    fn from(value: ProjectError) -> Self {
        let message = value.to_string();
        match value {
            ProjectError::ImageNotFound | ProjectError::RequestNotFound => {
                Self::not_found(message)
            }
            ProjectError::GenerationInProgress | ProjectError::RequestNotPending => {
                Self::conflict(message)
            }
            ProjectError::MissingTitle => {
                Self::invalid_request(message).with_details(json!({ "field": "title" }))
            }
            ProjectError::MissingDescription => {
                Self::invalid_request(message).with_details(json!({ "field": "description" }))
            }
            _ => Self::invalid_request(message),
        }
    }
}

/// Budget bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
    /// ISO currency code.
    pub currency: String,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: DEFAULT_CURRENCY.to_owned(),
        }
    }
}

impl Budget {
    /// Budget in euros with both bounds checked.
    pub fn try_new(min: Option<f64>, max: Option<f64>) -> Result<Self, ProjectError> {
        let negative = [min, max].into_iter().flatten().any(|value| value < 0.0);
        let inverted = matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
        if negative || inverted {
            return Err(ProjectError::InvalidBudget);
        }
        Ok(Self {
            min,
            max,
            ..Self::default()
        })
    }
}

/// Room dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Length.
    pub length: Option<f64>,
    /// Width.
    pub width: Option<f64>,
    /// Ceiling height.
    pub height: Option<f64>,
    /// Unit of the three measures.
    pub unit: String,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            length: None,
            width: None,
            height: None,
            unit: DEFAULT_UNIT.to_owned(),
        }
    }
}

/// Owner priorities, each scored 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priorities {
    /// Importance of quality.
    pub quality: u8,
    /// Importance of price.
    pub price: u8,
    /// Importance of speed.
    pub speed: u8,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            quality: DEFAULT_PRIORITY,
            price: DEFAULT_PRIORITY,
            speed: DEFAULT_PRIORITY,
        }
    }
}

impl Priorities {
    /// Missing scores default to 3; present ones must be within 1..=5.
    pub fn try_new(
        quality: Option<u8>,
        price: Option<u8>,
        speed: Option<u8>,
    ) -> Result<Self, ProjectError> {
        let score = |value: Option<u8>| match value.unwrap_or(DEFAULT_PRIORITY) {
            valid @ 1..=5 => Ok(valid),
            _ => Err(ProjectError::InvalidPriority),
        };
        Ok(Self {
            quality: score(quality)?,
            price: score(price)?,
            speed: score(speed)?,
        })
    }
}

/// Free-form owner preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Preferred colours.
    pub colors: Vec<String>,
    /// Preferred materials.
    pub materials: Vec<String>,
    /// Required elements.
    pub must_have: Vec<String>,
    /// Elements to avoid.
    pub must_avoid: Vec<String>,
}

impl Preferences {
    /// Build preferences from comma-separated form fields.
    ///
    /// # Examples
    /// ```
    /// use craftycrib::domain::Preferences;
    ///
    /// let prefs = Preferences::from_csv(Some("white, oak ,"), None, None, None);
    /// assert_eq!(prefs.colors, vec!["white", "oak"]);
    /// ```
    #[must_use]
    pub fn from_csv(
        colors: Option<&str>,
        materials: Option<&str>,
        must_have: Option<&str>,
        must_avoid: Option<&str>,
    ) -> Self {
        Self {
            colors: split_csv(colors),
            materials: split_csv(materials),
            must_have: split_csv(must_have),
            must_avoid: split_csv(must_avoid),
        }
    }
}

/// Split a comma-separated list, trimming items and dropping empties.
#[must_use]
pub fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

/// Image supplied by the client, already hosted elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Public URL (absolute or site-relative).
    pub url: String,
    /// Identifier at the hosting provider.
    pub public_id: Option<String>,
}

/// Source photo attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    /// Identifier within the project.
    pub id: ImageId,
    /// Public URL.
    pub url: String,
    /// Identifier at the hosting provider.
    pub public_id: Option<String>,
    /// Upload instant.
    pub uploaded_at: DateTime<Utc>,
}

/// AI parameters recorded on a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantParameters {
    /// Request sent to the provider.
    pub request: GenerationRequest,
    /// Provider-side identifier.
    pub generation_id: Option<String>,
    /// Provider credits charged.
    pub credits_used: Option<u32>,
}

/// Generated rendering of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignVariant {
    /// Identifier within the project.
    pub id: VariantId,
    /// Display name, e.g. "Modern Design".
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Price tier.
    pub budget_level: Option<BudgetLevel>,
    /// Style identifier used for the render.
    pub style: String,
    /// Full-size render.
    pub image_url: String,
    /// Thumbnail render.
    pub thumbnail_url: Option<String>,
    /// Generation instant.
    pub generated_at: DateTime<Utc>,
    /// Provider parameters.
    pub ai_parameters: VariantParameters,
    /// Whether the owner picked this variant.
    pub is_selected: bool,
}

/// Material line of the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Name.
    pub name: String,
    /// Category, e.g. flooring.
    pub category: Option<String>,
    /// Quantity.
    pub quantity: Option<f64>,
    /// Unit of the quantity.
    pub unit: Option<String>,
    /// Estimated price.
    pub estimated_price: Option<f64>,
    /// Supplier name.
    pub supplier: Option<String>,
}

/// Cost breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedCost {
    /// Materials.
    pub materials: Option<f64>,
    /// Labour.
    pub labor: Option<f64>,
    /// Total.
    pub total: Option<f64>,
}

/// A contractor's request to carry out the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorRequest {
    /// Requesting contractor.
    pub contractor: ContractorId,
    /// Answer state.
    pub status: RequestStatus,
    /// Message to the owner.
    pub message: Option<String>,
    /// Proposed price.
    pub quotation: Option<f64>,
    /// Request instant.
    pub requested_at: DateTime<Utc>,
}

/// One attempt at generating a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    /// Attempt instant.
    pub timestamp: DateTime<Utc>,
    /// Request sent to the provider.
    pub parameters: GenerationRequest,
    /// Outcome.
    pub success: bool,
    /// Failure description.
    pub error_message: Option<String>,
}

/// Validated input for creating a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Room type.
    pub room_type: RoomType,
    /// Target style.
    pub style: Option<DesignStyle>,
    /// Budget.
    pub budget: Budget,
    /// Dimensions.
    pub dimensions: Dimensions,
    /// Preferences.
    pub preferences: Preferences,
    /// Priorities.
    pub priorities: Priorities,
    /// Whether the owner plans to do the work.
    pub is_diy: bool,
    /// Initial photos.
    pub images: Vec<ImageUpload>,
}

fn required_text(raw: &str, missing: ProjectError) -> Result<String, ProjectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed.to_owned())
    }
}

fn check_uploads(images: &[ImageUpload]) -> Result<(), ProjectError> {
    if images.len() > MAX_IMAGES_PER_UPLOAD {
        return Err(ProjectError::TooManyImages);
    }
    if images.iter().any(|image| image.url.trim().is_empty()) {
        return Err(ProjectError::MissingImageUrl);
    }
    Ok(())
}

impl ProjectDraft {
    /// Trim and check the free-text fields and initial images.
    pub fn validate(mut self) -> Result<Self, ProjectError> {
        self.title = required_text(&self.title, ProjectError::MissingTitle)?;
        self.description = required_text(&self.description, ProjectError::MissingDescription)?;
        check_uploads(&self.images)?;
        Ok(self)
    }
}

/// Partial update of owner-editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New room type.
    pub room_type: Option<RoomType>,
    /// New style.
    pub style: Option<DesignStyle>,
    /// New budget.
    pub budget: Option<Budget>,
    /// New visibility.
    pub visibility: Option<Visibility>,
    /// New preferences.
    pub preferences: Option<Preferences>,
    /// New priorities.
    pub priorities: Option<Priorities>,
    /// New notes; blank clears them.
    pub notes: Option<String>,
}

/// A homeowner's renovation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier.
    pub id: ProjectId,
    /// Owning user.
    pub owner: UserId,
    /// Title.
    pub title: String,
    /// Unique slug derived from the title.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Room type.
    pub room_type: RoomType,
    /// Target style.
    pub style: Option<DesignStyle>,
    /// Budget.
    pub budget: Budget,
    /// Dimensions.
    pub dimensions: Dimensions,
    /// Source photos.
    pub original_images: Vec<ProjectImage>,
    /// Generated renders.
    pub design_variants: Vec<DesignVariant>,
    /// Bill of materials.
    pub materials: Vec<Material>,
    /// Cost estimate.
    pub estimated_cost: Option<EstimatedCost>,
    /// Priorities.
    pub priorities: Priorities,
    /// Preferences.
    pub preferences: Preferences,
    /// Lifecycle state.
    pub status: ProjectStatus,
    /// Audience.
    pub visibility: Visibility,
    /// Listed in the public gallery.
    pub is_published: bool,
    /// Last publication instant.
    pub published_at: Option<DateTime<Utc>>,
    /// Gallery slug, assigned on first publication.
    pub public_slug: Option<String>,
    /// Gallery likes.
    pub likes: u64,
    /// Gallery views.
    pub views: u64,
    /// Gallery tags.
    pub tags: Vec<String>,
    /// Gallery cover image.
    pub featured_image: Option<String>,
    /// Token of the unlisted share link.
    pub share_token: String,
    /// Owner does the work.
    #[serde(rename = "isDIY")]
    pub is_diy: bool,
    /// Requests from contractors.
    pub contractor_requests: Vec<ContractorRequest>,
    /// Contractor chosen by the owner.
    pub selected_contractor: Option<ContractorId>,
    /// Generation attempts, oldest first.
    pub ai_generation_history: Vec<GenerationRecord>,
    /// Owner notes.
    pub notes: Option<String>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a draft owned by `owner`.
    #[must_use]
    pub fn create(owner: UserId, draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        let original_images = draft
            .images
            .into_iter()
            .map(|upload| Self::image_from(upload, now))
            .collect();
        Self {
            id: ProjectId::random(),
            owner,
            slug: unique_slug(&draft.title, SLUG_FALLBACK, now),
            title: draft.title,
            description: draft.description,
            room_type: draft.room_type,
            style: draft.style,
            budget: draft.budget,
            dimensions: draft.dimensions,
            original_images,
            design_variants: Vec::new(),
            materials: Vec::new(),
            estimated_cost: None,
            priorities: draft.priorities,
            preferences: draft.preferences,
            status: ProjectStatus::Draft,
            visibility: Visibility::Private,
            is_published: false,
            published_at: None,
            public_slug: None,
            likes: 0,
            views: 0,
            tags: Vec::new(),
            featured_image: None,
            share_token: random_hex(SHARE_TOKEN_BYTES),
            is_diy: draft.is_diy,
            contractor_requests: Vec::new(),
            selected_contractor: None,
            ai_generation_history: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn image_from(upload: ImageUpload, now: DateTime<Utc>) -> ProjectImage {
        ProjectImage {
            id: ImageId::random(),
            url: upload.url.trim().to_owned(),
            public_id: upload.public_id,
            uploaded_at: now,
        }
    }

    /// Whether `user` owns the project.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Replace the slug after a collision, numbering it by `attempt`.
    pub fn disambiguate_slug(&mut self, attempt: u32) {
        self.slug = format!(
            "{}-{attempt}",
            unique_slug(&self.title, SLUG_FALLBACK, self.updated_at)
        );
    }

    /// Apply owner edits. A title change regenerates the slug.
    pub fn apply_changes(
        &mut self,
        changes: ProjectChanges,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        let new_title = changes
            .title
            .map(|raw| required_text(&raw, ProjectError::MissingTitle))
            .transpose()?;
        let new_description = changes
            .description
            .map(|raw| required_text(&raw, ProjectError::MissingDescription))
            .transpose()?;

        if let Some(title) = new_title
            && title != self.title
        {
            self.slug = unique_slug(&title, SLUG_FALLBACK, now);
            self.title = title;
        }
        if let Some(description) = new_description {
            self.description = description;
        }
        if let Some(room_type) = changes.room_type {
            self.room_type = room_type;
        }
        if changes.style.is_some() {
            self.style = changes.style;
        }
        if let Some(budget) = changes.budget {
            self.budget = budget;
        }
        if let Some(visibility) = changes.visibility {
            self.visibility = visibility;
        }
        if let Some(preferences) = changes.preferences {
            self.preferences = preferences;
        }
        if let Some(priorities) = changes.priorities {
            self.priorities = priorities;
        }
        if let Some(notes) = changes.notes {
            let trimmed = notes.trim();
            self.notes = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        }
        self.updated_at = now;
        Ok(())
    }

    /// Attach up to [`MAX_IMAGES_PER_UPLOAD`] photos and return them.
    pub fn add_images(
        &mut self,
        uploads: Vec<ImageUpload>,
        now: DateTime<Utc>,
    ) -> Result<&[ProjectImage], ProjectError> {
        if uploads.is_empty() {
            return Err(ProjectError::NoImagesSelected);
        }
        check_uploads(&uploads)?;
        let start = self.original_images.len();
        self.original_images.extend(
            uploads
                .into_iter()
                .map(|upload| Self::image_from(upload, now)),
        );
        self.updated_at = now;
        Ok(self.original_images.get(start..).unwrap_or_default())
    }

    /// Detach a photo, returning it.
    pub fn remove_image(
        &mut self,
        image: ImageId,
        now: DateTime<Utc>,
    ) -> Result<ProjectImage, ProjectError> {
        let index = self
            .original_images
            .iter()
            .position(|candidate| candidate.id == image)
            .ok_or(ProjectError::ImageNotFound)?;
        let removed = self.original_images.remove(index);
        if self.featured_image.as_deref() == Some(removed.url.as_str()) {
            self.featured_image = None;
        }
        self.updated_at = now;
        Ok(removed)
    }

    /// Photo sent to the generator.
    #[must_use]
    pub fn source_image(&self) -> Option<&ProjectImage> {
        self.original_images.first()
    }

    /// Style identifier for a generation: the override when given, else the
    /// project's style, else [`DEFAULT_GENERATION_STYLE`].
    pub fn generation_style(&self, requested: Option<&str>) -> Result<String, ProjectError> {
        let Some(raw) = requested.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(self
                .style
                .map_or(DEFAULT_GENERATION_STYLE, DesignStyle::as_str)
                .to_owned());
        };
        let id = raw.to_ascii_lowercase();
        if find_style(&id).is_some() || id.parse::<DesignStyle>().is_ok() {
            Ok(id)
        } else {
            Err(ProjectError::UnknownStyle(raw.to_owned()))
        }
    }

    /// Enter `generating`. Requires a source photo and no running generation.
    pub fn begin_generation(&mut self, now: DateTime<Utc>) -> Result<(), ProjectError> {
        if self.original_images.is_empty() {
            return Err(ProjectError::NoSourceImage);
        }
        if self.status == ProjectStatus::Generating {
            return Err(ProjectError::GenerationInProgress);
        }
        self.status = ProjectStatus::Generating;
        self.updated_at = now;
        Ok(())
    }

    /// Store the render and move to `completed`.
    pub fn complete_generation(
        &mut self,
        request: GenerationRequest,
        design: GeneratedDesign,
        now: DateTime<Utc>,
    ) -> DesignVariant {
        let label = find_style(&request.style).map_or(request.style.as_str(), |entry| entry.name);
        let variant = DesignVariant {
            id: VariantId::random(),
            name: format!("{label} Design"),
            description: None,
            budget_level: None,
            style: request.style.clone(),
            image_url: design.output_url,
            thumbnail_url: design.thumbnail_url,
            generated_at: now,
            ai_parameters: VariantParameters {
                request: request.clone(),
                generation_id: design.generation_id,
                credits_used: design.credits_used,
            },
            is_selected: false,
        };
        self.ai_generation_history.push(GenerationRecord {
            timestamp: now,
            parameters: request,
            success: true,
            error_message: None,
        });
        self.status = ProjectStatus::Completed;
        self.updated_at = now;
        self.design_variants.push(variant.clone());
        variant
    }

    /// Record a failed attempt and fall back to `pending`.
    pub fn fail_generation(
        &mut self,
        request: GenerationRequest,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.ai_generation_history.push(GenerationRecord {
            timestamp: now,
            parameters: request,
            success: false,
            error_message: Some(message.into()),
        });
        self.status = ProjectStatus::Pending;
        self.updated_at = now;
    }

    /// List the project in the gallery and return its gallery path.
    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<String, ProjectError> {
        let first_render = self
            .design_variants
            .first()
            .map(|variant| variant.image_url.clone())
            .ok_or(ProjectError::NothingToPublish)?;
        let public_slug = self
            .public_slug
            .get_or_insert_with(|| unique_slug(&self.title, SLUG_FALLBACK, now))
            .clone();
        if self.featured_image.is_none() {
            self.featured_image = Some(first_render);
        }
        self.is_published = true;
        self.published_at = Some(now);
        self.visibility = Visibility::Public;
        self.updated_at = now;
        Ok(gallery_path(&public_slug))
    }

    /// Withdraw the project from the gallery.
    pub const fn unpublish(&mut self, now: DateTime<Utc>) {
        self.is_published = false;
        self.visibility = Visibility::Private;
        self.updated_at = now;
    }

    /// Pick the gallery cover among the project's photos and renders.
    pub fn set_featured_image(
        &mut self,
        url: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        let wanted = url.trim();
        let known = self.original_images.iter().any(|image| image.url == wanted)
            || self
                .design_variants
                .iter()
                .any(|variant| variant.image_url == wanted);
        if !known {
            return Err(ProjectError::ForeignFeaturedImage);
        }
        self.featured_image = Some(wanted.to_owned());
        self.updated_at = now;
        Ok(())
    }

    /// Set the status directly; `generating` is reserved for the generation
    /// flow.
    pub fn set_status(
        &mut self,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        if status == ProjectStatus::Generating {
            return Err(ProjectError::ReservedStatus);
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }

    /// Whether contractors may see and bid on the project.
    #[must_use]
    pub fn is_open_to_contractors(&self) -> bool {
        self.visibility == Visibility::Contractors
            && matches!(
                self.status,
                ProjectStatus::Completed | ProjectStatus::Pending
            )
    }

    /// Register a contractor's interest.
    pub fn add_contractor_request(
        &mut self,
        contractor: ContractorId,
        message: Option<String>,
        quotation: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        if self
            .contractor_requests
            .iter()
            .any(|request| request.contractor == contractor)
        {
            return Err(ProjectError::AlreadyInterested);
        }
        self.contractor_requests.push(ContractorRequest {
            contractor,
            status: RequestStatus::Pending,
            message: message
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            quotation,
            requested_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    /// Accept `contractor`'s pending request and reject the other pending
    /// ones.
    pub fn accept_contractor(
        &mut self,
        contractor: ContractorId,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        let request = self
            .contractor_requests
            .iter()
            .find(|request| request.contractor == contractor)
            .ok_or(ProjectError::RequestNotFound)?;
        if request.status != RequestStatus::Pending {
            return Err(ProjectError::RequestNotPending);
        }
        for request in &mut self.contractor_requests {
            if request.contractor == contractor {
                request.status = RequestStatus::Accepted;
            } else if request.status == RequestStatus::Pending {
                request.status = RequestStatus::Rejected;
            }
        }
        self.selected_contractor = Some(contractor);
        self.status = ProjectStatus::Contracted;
        self.updated_at = now;
        Ok(())
    }

    /// Count a gallery view.
    pub const fn record_view(&mut self) {
        self.views = self.views.saturating_add(1);
    }

    /// Path of the unlisted share page.
    #[must_use]
    pub fn share_path(&self) -> String {
        format!("/projects/share/{}", self.share_token)
    }
}

/// Gallery path of a published project.
#[must_use]
pub fn gallery_path(public_slug: &str) -> String {
    format!("/gallery/{public_slug}")
}

/// Aggregate figures for an owner's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// Every project.
    pub total_projects: usize,
    /// Projects in `completed`.
    pub completed_designs: usize,
    /// Projects in `generating` or `in-progress`.
    pub in_progress: usize,
    /// Projects in `pending`.
    pub pending: usize,
    /// Variants across all projects.
    pub total_variants: usize,
}

impl ProjectStats {
    /// Tally `projects`.
    #[must_use]
    pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |mut stats, project| {
                stats.total_projects += 1;
                stats.total_variants += project.design_variants.len();
                match project.status {
                    ProjectStatus::Completed => stats.completed_designs += 1,
                    ProjectStatus::Generating | ProjectStatus::InProgress => {
                        stats.in_progress += 1;
                    }
                    ProjectStatus::Pending => stats.pending += 1,
                    _ => {}
                }
                stats
            })
    }
}
