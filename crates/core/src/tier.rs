//! Service tier routing for intake submissions.
//!
//! Maps an intake form (budget range, timeline, project type, survey and
//! construction-drawing flags) to one of four service tiers plus a
//! human-readable routing reason. The mapping is a pure rule table: the same
//! inputs always produce the same recommendation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// One of the four service levels a client can be routed to.
///
/// Discriminants are the public tier numbers (1-4) stored in `leads.
/// recommended_tier`, `clients.tier`, and `projects.tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i16)]
pub enum Tier {
    /// Digital design package for a single yard area.
    Starter = 1,
    /// Full-yard design with a revision round.
    Premium = 2,
    /// Design plus site survey and construction documents.
    Signature = 3,
    /// Full-property or commercial engagement with installation support.
    Estate = 4,
}

impl Tier {
    /// Return the tier number stored in the database (1-4).
    pub fn number(self) -> i16 {
        self as i16
    }

    /// Parse a database tier number.
    pub fn from_number(n: i16) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Starter),
            2 => Ok(Self::Premium),
            3 => Ok(Self::Signature),
            4 => Ok(Self::Estate),
            _ => Err(CoreError::Validation(format!(
                "Invalid tier number {n}. Must be 1-4"
            ))),
        }
    }

    /// Marketing name for the tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Premium => "Premium",
            Self::Signature => "Signature",
            Self::Estate => "Estate",
        }
    }

    /// Design fee charged at checkout, in cents.
    pub fn price_cents(self) -> Cents {
        match self {
            Self::Starter => 149_500,
            Self::Premium => 299_500,
            Self::Signature => 599_500,
            Self::Estate => 1_250_000,
        }
    }

    /// Monthly price of the ongoing care plan opened at conversion, in cents.
    pub fn care_plan_cents(self) -> Cents {
        match self {
            Self::Starter => 4_900,
            Self::Premium => 9_900,
            Self::Signature => 19_900,
            Self::Estate => 39_900,
        }
    }

    /// Minimum construction budget the tier is designed around, in cents.
    ///
    /// Used to flag intake submissions whose stated budget cannot fund the
    /// tier the rules selected.
    pub fn min_budget_cents(self) -> Cents {
        match self {
            Self::Starter => 0,
            Self::Premium => 1_000_000,
            Self::Signature => 2_500_000,
            Self::Estate => 7_500_000,
        }
    }

    /// Raise the tier by one step, saturating at [`Tier::Estate`].
    pub fn bumped(self) -> Self {
        match self {
            Self::Starter => Self::Premium,
            Self::Premium => Self::Signature,
            Self::Signature => Self::Estate,
            Self::Estate => Self::Estate,
        }
    }
}

// ---------------------------------------------------------------------------
// Intake field enums
// ---------------------------------------------------------------------------

/// Construction budget bucket selected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under_10k")]
    Under10k,
    #[serde(rename = "10k_to_25k")]
    From10kTo25k,
    #[serde(rename = "25k_to_75k")]
    From25kTo75k,
    #[serde(rename = "over_75k")]
    Over75k,
}

impl BudgetRange {
    /// Convert from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "under_10k" => Ok(Self::Under10k),
            "10k_to_25k" => Ok(Self::From10kTo25k),
            "25k_to_75k" => Ok(Self::From25kTo75k),
            "over_75k" => Ok(Self::Over75k),
            _ => Err(CoreError::Validation(format!(
                "Invalid budget range '{s}'"
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Under10k => "under_10k",
            Self::From10kTo25k => "10k_to_25k",
            Self::From25kTo75k => "25k_to_75k",
            Self::Over75k => "over_75k",
        }
    }

    /// Upper bound of the bucket in cents (`Cents::MAX` for the open bucket).
    pub fn ceiling_cents(self) -> Cents {
        match self {
            Self::Under10k => 1_000_000,
            Self::From10kTo25k => 2_500_000,
            Self::From25kTo75k => 7_500_000,
            Self::Over75k => Cents::MAX,
        }
    }

    /// The highest tier this budget bucket funds on its own.
    pub fn base_tier(self) -> Tier {
        match self {
            Self::Under10k => Tier::Starter,
            Self::From10kTo25k => Tier::Premium,
            Self::From25kTo75k => Tier::Signature,
            Self::Over75k => Tier::Estate,
        }
    }

    /// Label used in routing reasons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Under10k => "under $10k",
            Self::From10kTo25k => "$10k-$25k",
            Self::From25kTo75k => "$25k-$75k",
            Self::Over75k => "over $75k",
        }
    }
}

/// Desired project timeline selected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    /// No fixed date.
    Flexible,
    /// Wants the project done within the current season.
    ThisSeason,
    /// Needs crews on site as soon as possible.
    Rush,
}

impl Timeline {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "flexible" => Ok(Self::Flexible),
            "this_season" => Ok(Self::ThisSeason),
            "rush" => Ok(Self::Rush),
            _ => Err(CoreError::Validation(format!("Invalid timeline '{s}'"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flexible => "flexible",
            Self::ThisSeason => "this_season",
            Self::Rush => "rush",
        }
    }
}

/// Kind of property the intake concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    FrontYard,
    BackYard,
    FullProperty,
    Commercial,
}

impl ProjectType {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "front_yard" => Ok(Self::FrontYard),
            "back_yard" => Ok(Self::BackYard),
            "full_property" => Ok(Self::FullProperty),
            "commercial" => Ok(Self::Commercial),
            _ => Err(CoreError::Validation(format!("Invalid project type '{s}'"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontYard => "front_yard",
            Self::BackYard => "back_yard",
            Self::FullProperty => "full_property",
            Self::Commercial => "commercial",
        }
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// The intake fields the router evaluates.
#[derive(Debug, Clone, Copy)]
pub struct TierInputs {
    pub budget: BudgetRange,
    pub timeline: Timeline,
    pub project_type: ProjectType,
    /// Client asked for a professional site survey.
    pub needs_survey: bool,
    /// Client asked for stamped construction drawings.
    pub needs_drawings: bool,
}

/// Result of routing an intake submission.
#[derive(Debug, Clone, Serialize)]
pub struct TierRecommendation {
    pub tier: Tier,
    /// Which rules fired, joined in application order.
    pub reason: String,
    /// The selected tier's minimum budget exceeds the stated bucket; the
    /// lead should land in the review queue instead of the standard funnel.
    pub needs_review: bool,
}

/// Route an intake submission to a recommended tier.
///
/// Rules are applied in a fixed order so the mapping is deterministic:
///
/// 1. The budget bucket sets the base tier.
/// 2. Survey or construction-drawing requests raise the tier to at least
///    [`Tier::Signature`] (both are tier-3 services).
/// 3. Commercial properties are always served by [`Tier::Estate`].
/// 4. A rush timeline raises the result one step (dedicated crews are only
///    staffed on the upper tiers).
/// 5. If the final tier's minimum budget exceeds the stated bucket, the
///    recommendation is flagged for manual review.
pub fn route(inputs: &TierInputs) -> TierRecommendation {
    let mut reasons: Vec<String> = Vec::new();

    let mut tier = inputs.budget.base_tier();
    reasons.push(format!(
        "a {} budget supports the {} tier",
        inputs.budget.label(),
        tier.label()
    ));

    if (inputs.needs_survey || inputs.needs_drawings) && tier < Tier::Signature {
        tier = Tier::Signature;
        let service = if inputs.needs_survey {
            "a site survey"
        } else {
            "construction drawings"
        };
        reasons.push(format!(
            "{service} requires at least the {} tier",
            Tier::Signature.label()
        ));
    }

    if inputs.project_type == ProjectType::Commercial && tier < Tier::Estate {
        tier = Tier::Estate;
        reasons.push(format!(
            "commercial properties are served by the {} tier",
            Tier::Estate.label()
        ));
    }

    if inputs.timeline == Timeline::Rush && tier < Tier::Estate {
        tier = tier.bumped();
        reasons.push(format!(
            "a rush timeline moves the recommendation up to the {} tier",
            tier.label()
        ));
    }

    let needs_review = tier.min_budget_cents() > inputs.budget.ceiling_cents();
    if needs_review {
        reasons.push(format!(
            "the {} tier normally needs a budget {} and up, so a designer will review this request",
            tier.label(),
            format_cents(tier.min_budget_cents())
        ));
    }

    TierRecommendation {
        tier,
        reason: reasons.join("; "),
        needs_review,
    }
}

/// Format a cent amount as a whole-thousands dollar figure for reasons.
fn format_cents(cents: Cents) -> String {
    format!("${}k", cents / 100_000)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
