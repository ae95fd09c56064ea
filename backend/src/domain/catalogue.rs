//! Static design catalogue: styles, room types, and pricing plans.

use serde::Serialize;

use crate::domain::SubscriptionPlan;
use crate::domain::generation::OutputQuality;

/// A design style the AI provider can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleEntry {
    /// Identifier sent to the provider.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// A room type offered in the project form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomTypeEntry {
    /// Identifier sent to the provider.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon name used by the front end.
    pub icon: &'static str,
}

const fn style(id: &'static str, name: &'static str, description: &'static str) -> StyleEntry {
    StyleEntry {
        id,
        name,
        description,
    }
}

const fn room(id: &'static str, name: &'static str, icon: &'static str) -> RoomTypeEntry {
    RoomTypeEntry { id, name, icon }
}

/// Every style the generator accepts.
pub const STYLES: [StyleEntry; 14] = [
    style("modern", "Modern", "Clean lines, neutral colors, minimal ornamentation"),
    style("contemporary", "Contemporary", "Current trends, bold colors, mixed materials"),
    style("minimalist", "Minimalist", "Simple, functional, clutter-free spaces"),
    style("industrial", "Industrial", "Raw materials, exposed elements, urban feel"),
    style("scandinavian", "Scandinavian", "Light colors, natural materials, cozy vibes"),
    style("traditional", "Traditional", "Classic details, warm colors, elegant furnishings"),
    style("rustic", "Rustic", "Natural wood, earthy tones, country charm"),
    style("bohemian", "Bohemian", "Eclectic mix, bold patterns, artistic flair"),
    style("coastal", "Coastal", "Beach-inspired, light blues, natural textures"),
    style("mid-century", "Mid-Century Modern", "Retro 50s-60s, organic shapes, bold colors"),
    style("farmhouse", "Farmhouse", "Country living, vintage touches, comfortable spaces"),
    style("art-deco", "Art Deco", "Glamorous, geometric patterns, rich colors"),
    style("japanese", "Japanese", "Zen-inspired, natural elements, serene spaces"),
    style("mediterranean", "Mediterranean", "Warm terracotta, arched doorways, rustic elegance"),
];

/// Every room type the generator accepts.
pub const ROOM_TYPES: [RoomTypeEntry; 10] = [
    room("living-room", "Living Room", "sofa"),
    room("bedroom", "Bedroom", "bed"),
    room("kitchen", "Kitchen", "utensils"),
    room("bathroom", "Bathroom", "bath"),
    room("dining-room", "Dining Room", "utensils-crossed"),
    room("office", "Home Office", "briefcase"),
    room("outdoor", "Outdoor/Patio", "tree"),
    room("kids-room", "Kids Room", "baby"),
    room("basement", "Basement", "home"),
    room("garage", "Garage", "car"),
];

/// Look up a style by id.
#[must_use]
pub fn find_style(id: &str) -> Option<&'static StyleEntry> {
    STYLES.iter().find(|entry| entry.id == id)
}

/// A plan as shown on the pricing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    /// Plan identifier.
    pub plan: SubscriptionPlan,
    /// Display name.
    pub name: &'static str,
    /// Monthly price in euros.
    pub monthly_price_eur: u32,
    /// Generations per month; `None` means unlimited.
    pub generations: Option<u32>,
    /// Output quality of generated renders.
    pub quality: &'static str,
    /// Billing period label.
    pub period: &'static str,
    /// Selling points.
    pub features: &'static [&'static str],
    /// Highlighted on the pricing page.
    pub popular: bool,
}

const FREE_FEATURES: &[&str] = &[
    "3 AI generations per month",
    "Basic design styles",
    "Standard quality renders",
    "Save up to 2 projects",
    "Community support",
];

const PRO_FEATURES: &[&str] = &[
    "50 AI generations per month",
    "All design styles",
    "HD quality renders",
    "Unlimited projects",
    "Materials list & suppliers",
    "Connect with contractors",
    "Priority support",
];

const PREMIUM_FEATURES: &[&str] = &[
    "Unlimited AI generations",
    "All design styles + exclusive",
    "Ultra HD renders",
    "Unlimited projects",
    "Advanced materials analysis",
    "Priority contractor matching",
    "Cost estimation tools",
    "PDF export",
    "Dedicated support",
];

/// Render quality granted by `plan`.
#[must_use]
pub const fn quality_for(plan: SubscriptionPlan) -> OutputQuality {
    match plan {
        SubscriptionPlan::Free => OutputQuality::Standard,
        SubscriptionPlan::Pro | SubscriptionPlan::Premium => OutputQuality::Hd,
    }
}

/// Pricing page content derived from the plan definitions.
#[must_use]
pub fn pricing_plans() -> Vec<PricingPlan> {
    SubscriptionPlan::ALL
        .into_iter()
        .map(|plan| {
            let (name, period, features) = match plan {
                SubscriptionPlan::Free => ("Free", "forever", FREE_FEATURES),
                SubscriptionPlan::Pro => ("Pro", "month", PRO_FEATURES),
                SubscriptionPlan::Premium => ("Premium", "month", PREMIUM_FEATURES),
            };
            PricingPlan {
                plan,
                name,
                monthly_price_eur: plan.monthly_price_eur(),
                generations: plan.allowance(),
                quality: quality_for(plan).as_str(),
                period,
                features,
                popular: plan == SubscriptionPlan::Pro,
            }
        })
        .collect()
}
