//! Tier-gated feature access.
//!
//! A subscriber holds one [`SubscriptionTier`]; every gated feature carries
//! the minimum tier it requires. [`check_access`] maps the pair to an
//! [`AccessDecision`] — a plain value, computed fresh on every call, cheap
//! enough to evaluate per render. It never fails: malformed catalog data
//! degrades to the most restrictive tier instead of granting by default.

pub mod catalog;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ─── Subscription tiers ───────────────────────────────────────────────────────

/// The three-level subscription hierarchy, strictly ordered
/// freemium < basic < pro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionTier {
    Freemium,
    Basic,
    Pro,
}

impl SubscriptionTier {
    /// Rank in the tier order. A subscriber may use any feature whose
    /// required tier has an equal or lower rank.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Freemium => 0,
            Self::Basic => 1,
            Self::Pro => 2,
        }
    }

    /// Wire name as used by the portal ("freemium" | "basic" | "pro").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freemium => "freemium",
            Self::Basic => "basic",
            Self::Pro => "pro",
        }
    }

    /// Parse a tier from its wire name. Returns `None` for anything else —
    /// callers decide whether that fails closed (see
    /// [`FeatureDescriptor::required_tier`]).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "freemium" => Some(Self::Freemium),
            "basic" => Some(Self::Basic),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }

    /// Human-readable label for badges and upgrade copy.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Freemium => "Freemium",
            Self::Basic => "Basic",
            Self::Pro => "Pro",
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Feature descriptors ──────────────────────────────────────────────────────

/// A gated capability — a named tool, page, or action in the catalog.
///
/// Built once at catalog-load time and never mutated afterwards. The required
/// tier is kept as the raw catalog string so an unrecognized value can be
/// detected at evaluation time and treated as `pro` (fail closed) rather than
/// rejected at load time or silently granted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureDescriptor {
    /// Stable feature id (e.g. `"ai-text-summarizer"`).
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Tool category — drives per-category processing behavior.
    #[serde(default)]
    pub category: String,
    /// Minimum tier, as written in the catalog.
    #[serde(rename = "tier")]
    pub required_tier_raw: String,
    /// Externally hosted tools bypass tier gating entirely — the portal does
    /// not control their access surface.
    #[serde(rename = "externallyHosted", default)]
    pub externally_hosted: bool,
    /// Usage-limit copy shown alongside the tool (e.g. free-tier quotas).
    #[serde(rename = "usageLimit", default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<String>,
    /// Listed but not yet launchable.
    #[serde(rename = "comingSoon", default)]
    pub coming_soon: bool,
}

impl FeatureDescriptor {
    /// Minimal descriptor, used by catalog builders and tests.
    pub fn new(id: impl Into<String>, tier: SubscriptionTier) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category: String::new(),
            required_tier_raw: tier.as_str().to_string(),
            externally_hosted: false,
            usage_limit: None,
            coming_soon: false,
        }
    }

    /// The tier this feature requires. An unrecognized catalog value is
    /// treated as the most restrictive tier — granting by default would be a
    /// security regression.
    pub fn required_tier(&self) -> SubscriptionTier {
        match SubscriptionTier::parse(&self.required_tier_raw) {
            Some(tier) => tier,
            None => {
                debug!(
                    feature = %self.id,
                    tier = %self.required_tier_raw,
                    "unrecognized required tier — failing closed to pro"
                );
                SubscriptionTier::Pro
            }
        }
    }
}

// ─── Access decisions ─────────────────────────────────────────────────────────

/// Why an access check came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessReason {
    /// Tier requirement met.
    Granted,
    /// Subscriber tier ranks below the feature's required tier.
    InsufficientTier,
    /// Externally hosted — never gated.
    ExternalAlwaysAllowed,
}

/// Result of evaluating a feature against a subscriber's tier.
/// Ephemeral — computed fresh on every check, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
    /// What the feature requires — feeds the upgrade call-to-action.
    #[serde(rename = "requiredTier")]
    pub required_tier: SubscriptionTier,
}

// ─── Access check ─────────────────────────────────────────────────────────────

/// Decide whether a subscriber on `tier` may use `feature`.
///
/// Pure and total: no side effects, never panics, deterministic for a given
/// input pair.
pub fn check_access(tier: SubscriptionTier, feature: &FeatureDescriptor) -> AccessDecision {
    let required = feature.required_tier();

    if feature.externally_hosted {
        return AccessDecision {
            allowed: true,
            reason: AccessReason::ExternalAlwaysAllowed,
            required_tier: required,
        };
    }

    let allowed = tier.rank() >= required.rank();
    AccessDecision {
        allowed,
        reason: if allowed {
            AccessReason::Granted
        } else {
            AccessReason::InsufficientTier
        },
        required_tier: required,
    }
}

/// Upgrade call-to-action copy for a denied decision.
///
/// Returns `None` when access was granted (no prompt to show).
pub fn upgrade_prompt(decision: &AccessDecision) -> Option<String> {
    if decision.allowed {
        return None;
    }
    Some(format!("Requires {} Tier", decision.required_tier.label()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(tier: SubscriptionTier) -> FeatureDescriptor {
        FeatureDescriptor::new("test-tool", tier)
    }

    #[test]
    fn freemium_feature_open_to_all() {
        for tier in [
            SubscriptionTier::Freemium,
            SubscriptionTier::Basic,
            SubscriptionTier::Pro,
        ] {
            let d = check_access(tier, &feature(SubscriptionTier::Freemium));
            assert!(d.allowed);
            assert_eq!(d.reason, AccessReason::Granted);
        }
    }

    #[test]
    fn basic_feature_denied_to_freemium() {
        let d = check_access(SubscriptionTier::Freemium, &feature(SubscriptionTier::Basic));
        assert!(!d.allowed);
        assert_eq!(d.reason, AccessReason::InsufficientTier);
    }

    #[test]
    fn pro_feature_denied_to_basic() {
        let d = check_access(SubscriptionTier::Basic, &feature(SubscriptionTier::Pro));
        assert!(!d.allowed);
        assert_eq!(d.reason, AccessReason::InsufficientTier);
        assert_eq!(d.required_tier, SubscriptionTier::Pro);
    }

    #[test]
    fn external_bypasses_gating_even_on_freemium() {
        let mut f = feature(SubscriptionTier::Pro);
        f.externally_hosted = true;
        let d = check_access(SubscriptionTier::Freemium, &f);
        assert!(d.allowed);
        assert_eq!(d.reason, AccessReason::ExternalAlwaysAllowed);
    }

    #[test]
    fn unknown_tier_string_fails_closed() {
        let mut f = feature(SubscriptionTier::Freemium);
        f.required_tier_raw = "enterprise".to_string();
        // Only pro subscribers get through.
        assert!(!check_access(SubscriptionTier::Basic, &f).allowed);
        assert!(check_access(SubscriptionTier::Pro, &f).allowed);
    }

    #[test]
    fn check_is_idempotent() {
        let f = feature(SubscriptionTier::Basic);
        let a = check_access(SubscriptionTier::Basic, &f);
        let b = check_access(SubscriptionTier::Basic, &f);
        assert_eq!(a, b);
    }

    #[test]
    fn upgrade_prompt_names_required_tier() {
        let d = check_access(SubscriptionTier::Freemium, &feature(SubscriptionTier::Pro));
        assert_eq!(upgrade_prompt(&d).as_deref(), Some("Requires Pro Tier"));
    }

    #[test]
    fn no_upgrade_prompt_when_granted() {
        let d = check_access(SubscriptionTier::Pro, &feature(SubscriptionTier::Basic));
        assert!(upgrade_prompt(&d).is_none());
    }

    #[test]
    fn tier_wire_names_round_trip() {
        for tier in [
            SubscriptionTier::Freemium,
            SubscriptionTier::Basic,
            SubscriptionTier::Pro,
        ] {
            assert_eq!(SubscriptionTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(SubscriptionTier::parse("platinum"), None);
    }
}
