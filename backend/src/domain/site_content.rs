//! Editable landing page content: images, the specialists section, and the
//! gallery video.
//!
//! Stored records only override defaults. Every read merges the overrides
//! onto the built-in defaults so a missing or blank field never leaves a
//! hole on the page.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Site content validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteContentError {
    /// Key absent from the landing defaults.
    #[error("Unknown landing asset.")]
    UnknownLandingAsset,
    /// Image URL blank.
    #[error("Image URL is required")]
    MissingImageUrl,
    /// Video URL blank.
    #[error("Video URL is required")]
    MissingVideoUrl,
}

impl From<SiteContentError> for Error {
    fn from(value: SiteContentError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Built-in landing image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LandingAssetDefault {
    /// Slot key.
    pub key: &'static str,
    /// Page section.
    pub section: &'static str,
    /// Admin label.
    pub label: &'static str,
    /// Default image.
    pub url: &'static str,
    /// Default alternative text.
    pub alt: &'static str,
}

const fn slot(
    key: &'static str,
    section: &'static str,
    label: &'static str,
    url: &'static str,
    alt: &'static str,
) -> LandingAssetDefault {
    LandingAssetDefault {
        key,
        section,
        label,
        url,
        alt,
    }
}

/// Every landing image slot in page order.
pub const LANDING_DEFAULTS: [LandingAssetDefault; 25] = [
    slot("heroBefore", "Hero", "Hero - Avant", "/assets/beforelivingroom.jpeg", "Salon avant transformation"),
    slot("heroAfter", "Hero", "Hero - Après", "/assets/afterlivingingroom.jpeg", "Salon après transformation"),
    slot("styleModernArabic", "Styles Slider", "Style - Modern Arabic", "/assets/11houses/Modern Arabic.jpeg", "Modern Arabic"),
    slot("styleNordicBlack", "Styles Slider", "Style - Nordic Black", "/assets/11houses/Nordic Black.jpeg", "Nordic Black"),
    slot("styleBali", "Styles Slider", "Style - Bali", "/assets/11houses/Bali.jpeg", "Bali"),
    slot("styleIndustrial", "Styles Slider", "Style - Industrial", "/assets/11houses/Industrial.jpeg", "Industrial"),
    slot("styleLuxury", "Styles Slider", "Style - Luxury", "/assets/11houses/Luxury.jpeg", "Luxury"),
    slot("styleMarbre", "Styles Slider", "Style - Marbre", "/assets/11houses/Marbre.jpeg", "Marbre"),
    slot("styleRustic", "Styles Slider", "Style - Rustic", "/assets/11houses/Rustic.jpeg", "Rustic"),
    slot("styleBois", "Styles Slider", "Style - Bois", "/assets/11houses/Bois.jpeg", "Bois"),
    slot("styleGranite", "Styles Slider", "Style - Granite", "/assets/11houses/Granite.jpeg", "Granite"),
    slot("styleQuartz", "Styles Slider", "Style - Quartz", "/assets/11houses/Quartz.jpeg", "Quartz"),
    slot("styleIndustrialLoft", "Styles Slider", "Style - Industrial Loft", "/assets/11houses/Industrial2.jpeg", "Industrial Loft"),
    slot("galleryHouse1", "Gallery", "Galerie - Maison 1", "/assets/houeses/house1.jpeg", "Design maison moderne"),
    slot("galleryHouse2", "Gallery", "Galerie - Maison 2", "/assets/houeses/house2.jpeg", "Design maison contemporaine"),
    slot("galleryHouse3", "Gallery", "Galerie - Maison 3", "/assets/houeses/house3.jpeg", "Design maison luxe"),
    slot("galleryHouse4", "Gallery", "Galerie - Maison 4", "/assets/houeses/house4.jpeg", "Design maison villa"),
    slot("galleryAfterHouse", "Gallery", "Galerie - Extérieur rénové", "/assets/afterhouse.jpeg", "Design extérieur rénové"),
    slot("galleryAfterLiving", "Gallery", "Galerie - Salon design", "/assets/afterlivingingroom.jpeg", "Salon design"),
    slot("featureBefore", "Features", "Fonctionnalités - Avant", "/assets/beforelivingroom.jpeg", "Génération IA"),
    slot("featureAfter", "Features", "Fonctionnalités - Après", "/assets/afterlivingingroom.jpeg", "Résultat IA"),
    slot("showcaseLivingBefore", "Showcase", "Showcase - Salon avant", "/assets/afterlivingingroom.jpeg", "Salon avant"),
    slot("showcaseLivingAfter", "Showcase", "Showcase - Salon après", "/assets/beforelivingroom.jpeg", "Salon après"),
    slot("showcaseExteriorBefore", "Showcase", "Showcase - Maison avant", "/assets/beforehouse.jpeg", "Maison avant"),
    slot("showcaseExteriorAfter", "Showcase", "Showcase - Maison après", "/assets/afterhouse.jpeg", "Maison après"),
];

/// Default for `key`, if the slot exists.
#[must_use]
pub fn landing_default(key: &str) -> Option<&'static LandingAssetDefault> {
    LANDING_DEFAULTS.iter().find(|entry| entry.key == key)
}

/// Stored override of one landing slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingAsset {
    /// Slot key.
    pub key: String,
    /// Admin label.
    pub label: String,
    /// Page section.
    pub section: String,
    /// Image URL.
    pub url: String,
    /// Identifier at the hosting provider.
    pub public_id: String,
    /// Alternative text.
    pub alt: String,
    /// Last edit instant.
    pub updated_at: DateTime<Utc>,
}

/// Admin edit of one landing slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingAssetUpdate {
    /// New image URL.
    pub url: String,
    /// New alternative text; blank keeps the current one.
    pub alt: Option<String>,
    /// Identifier at the hosting provider.
    pub public_id: Option<String>,
}

impl LandingAsset {
    /// Apply `update` to the override of `key`, creating it from the
    /// defaults when absent. Label and section always follow the defaults.
    pub fn upsert(
        existing: Option<Self>,
        key: &str,
        update: LandingAssetUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, SiteContentError> {
        let defaults = landing_default(key).ok_or(SiteContentError::UnknownLandingAsset)?;
        let url = update.url.trim();
        if url.is_empty() {
            return Err(SiteContentError::MissingImageUrl);
        }
        let mut asset = existing.unwrap_or_else(|| Self {
            key: defaults.key.to_owned(),
            label: defaults.label.to_owned(),
            section: defaults.section.to_owned(),
            url: defaults.url.to_owned(),
            public_id: String::new(),
            alt: defaults.alt.to_owned(),
            updated_at: now,
        });
        defaults.label.clone_into(&mut asset.label);
        defaults.section.clone_into(&mut asset.section);
        let alt = update.alt.as_deref().map(str::trim).unwrap_or_default();
        if !alt.is_empty() {
            alt.clone_into(&mut asset.alt);
        } else if asset.alt.is_empty() {
            defaults.alt.clone_into(&mut asset.alt);
        }
        url.clone_into(&mut asset.url);
        asset.public_id = update.public_id.unwrap_or_default();
        asset.updated_at = now;
        Ok(asset)
    }
}

/// Landing slot after merging overrides onto defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLandingAsset {
    /// Slot key.
    pub key: &'static str,
    /// Page section.
    pub section: &'static str,
    /// Admin label.
    pub label: &'static str,
    /// Effective image URL.
    pub url: String,
    /// Effective alternative text.
    pub alt: String,
    /// Identifier at the hosting provider; empty for defaults.
    pub public_id: String,
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

/// Merge stored overrides onto every default slot, in page order.
#[must_use]
pub fn resolve_landing_assets(stored: &[LandingAsset]) -> Vec<ResolvedLandingAsset> {
    let by_key: BTreeMap<&str, &LandingAsset> = stored
        .iter()
        .map(|asset| (asset.key.as_str(), asset))
        .collect();
    LANDING_DEFAULTS
        .iter()
        .map(|entry| {
            let asset = by_key.get(entry.key);
            ResolvedLandingAsset {
                key: entry.key,
                section: entry.section,
                label: entry.label,
                url: non_empty_or(asset.map(|found| found.url.as_str()), entry.url),
                alt: non_empty_or(asset.map(|found| found.alt.as_str()), entry.alt),
                public_id: asset.map(|found| found.public_id.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Image and alternative text of one slot as used by the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingImage {
    /// Image URL.
    pub url: String,
    /// Alternative text.
    pub alt: String,
}

/// Landing images keyed by slot.
#[must_use]
pub fn landing_image_map(stored: &[LandingAsset]) -> BTreeMap<&'static str, LandingImage> {
    resolve_landing_assets(stored)
        .into_iter()
        .map(|asset| {
            (
                asset.key,
                LandingImage {
                    url: asset.url,
                    alt: asset.alt,
                },
            )
        })
        .collect()
}

/// One category of the specialists section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistsCategory {
    /// Stable key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Listed trades.
    pub options: Vec<String>,
}

const DEFAULT_SPECIALISTS_IMAGE_URL: &str = "/assets/afterhouse.jpeg";
const DEFAULT_SPECIALISTS_IMAGE_ALT: &str = "Spécialistes de la rénovation";

const DEFAULT_CATEGORIES: [(&str, &str, [&str; 5]); 5] = [
    (
        "gros-oeuvres",
        "Gros oeuvres",
        ["Fondations", "Démolition", "Maçonnerie", "Structure", "Toiture"],
    ),
    (
        "second-oeuvre",
        "Second oeuvre",
        ["Plomberie", "Électricité", "Chauffage", "Cloisons & plâtrerie", "Revêtements de sol"],
    ),
    (
        "decoration-finition",
        "Décoration et finition",
        ["Peinture", "Papier peint", "Éclairage décoratif", "Mobilier", "Habillage mural"],
    ),
    (
        "ouverture-isolation",
        "Ouverture et isolation",
        ["Fenêtres", "Portes", "Isolation thermique", "Isolation phonique", "Volets"],
    ),
    (
        "autre",
        "Autre",
        ["Paysagisme", "Domotique", "Nettoyage chantier", "Assistance design", "Consultation"],
    ),
];

fn default_categories() -> Vec<SpecialistsCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(key, label, options)| SpecialistsCategory {
            key: (*key).to_owned(),
            label: (*label).to_owned(),
            options: options.iter().map(|option| (*option).to_owned()).collect(),
        })
        .collect()
}

/// Form values for one specialists category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryForm {
    /// New label; blank keeps the default.
    pub label: Option<String>,
    /// One option per line; blank keeps the defaults.
    pub options: Option<String>,
}

/// Specialists section configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistsConfig {
    /// Section image.
    pub image_url: String,
    /// Section image alternative text.
    pub image_alt: String,
    /// Identifier of the image at the hosting provider.
    pub image_public_id: String,
    /// Categories in display order.
    pub categories: Vec<SpecialistsCategory>,
    /// Last edit instant.
    pub updated_at: DateTime<Utc>,
}

impl SpecialistsConfig {
    /// Built-in configuration.
    #[must_use]
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            image_url: DEFAULT_SPECIALISTS_IMAGE_URL.to_owned(),
            image_alt: DEFAULT_SPECIALISTS_IMAGE_ALT.to_owned(),
            image_public_id: String::new(),
            categories: default_categories(),
            updated_at: now,
        }
    }

    /// Fill blank fields of a stored configuration from the defaults.
    #[must_use]
    pub fn merged(stored: Option<Self>, now: DateTime<Utc>) -> Self {
        let Some(config) = stored else {
            return Self::defaults(now);
        };
        Self {
            image_url: non_empty_or(Some(config.image_url.as_str()), DEFAULT_SPECIALISTS_IMAGE_URL),
            image_alt: non_empty_or(Some(config.image_alt.as_str()), DEFAULT_SPECIALISTS_IMAGE_ALT),
            image_public_id: config.image_public_id,
            categories: if config.categories.is_empty() {
                default_categories()
            } else {
                config.categories
            },
            updated_at: config.updated_at,
        }
    }

    /// Replace the section image. A blank alternative text keeps the current
    /// one.
    pub fn update_image(
        &mut self,
        url: &str,
        alt: Option<&str>,
        public_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), SiteContentError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(SiteContentError::MissingImageUrl);
        }
        trimmed.clone_into(&mut self.image_url);
        if let Some(text) = alt.map(str::trim).filter(|text| !text.is_empty()) {
            text.clone_into(&mut self.image_alt);
        }
        self.image_public_id = public_id.unwrap_or_default();
        self.updated_at = now;
        Ok(())
    }

    /// Rebuild every default category from `forms`, keyed by category key.
    /// Labels fall back to the default label and empty option lists to the
    /// default options.
    pub fn update_options(&mut self, forms: &BTreeMap<String, CategoryForm>, now: DateTime<Utc>) {
        self.categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(key, default_label, default_options)| {
                let form = forms.get(*key);
                let label = form
                    .and_then(|entry| entry.label.as_deref())
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .unwrap_or(*default_label);
                let options: Vec<String> = form
                    .and_then(|entry| entry.options.as_deref())
                    .map(|text| {
                        text.lines()
                            .map(str::trim)
                            .filter(|line| !line.is_empty())
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default();
                SpecialistsCategory {
                    key: (*key).to_owned(),
                    label: label.to_owned(),
                    options: if options.is_empty() {
                        default_options.iter().map(|option| (*option).to_owned()).collect()
                    } else {
                        options
                    },
                }
            })
            .collect();
        self.updated_at = now;
    }
}

/// Video shown in the landing gallery section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryVideo {
    /// Video URL.
    pub url: String,
    /// Identifier at the hosting provider.
    pub public_id: String,
    /// Last edit instant.
    pub updated_at: DateTime<Utc>,
}

impl GalleryVideo {
    /// Validate a new gallery video.
    pub fn try_new(
        url: &str,
        public_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, SiteContentError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(SiteContentError::MissingVideoUrl);
        }
        Ok(Self {
            url: trimmed.to_owned(),
            public_id: public_id.unwrap_or_default(),
            updated_at: now,
        })
    }
}

/// Everything the public landing page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingView {
    /// Images keyed by slot.
    pub images: BTreeMap<&'static str, LandingImage>,
    /// Specialists section.
    pub specialists: SpecialistsConfig,
    /// Gallery video; the page falls back to images when absent.
    pub gallery_video: Option<GalleryVideo>,
}
