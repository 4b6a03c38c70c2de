//! Feature catalog — the static set of gated tools and pages.
//!
//! Built once at startup from config (or the built-in defaults) and
//! read-shared afterwards. Descriptors are never mutated at runtime.

use std::collections::HashMap;

use tracing::warn;

use super::{check_access, FeatureDescriptor, SubscriptionTier};

/// Lookup table over the portal's feature descriptors.
pub struct FeatureCatalog {
    features: Vec<FeatureDescriptor>,
    by_id: HashMap<String, usize>,
}

impl FeatureCatalog {
    /// Build a catalog from descriptors. On a duplicate id the first entry
    /// wins and the duplicate is dropped with a warning.
    pub fn from_descriptors(descriptors: Vec<FeatureDescriptor>) -> Self {
        let mut features = Vec::with_capacity(descriptors.len());
        let mut by_id = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if by_id.contains_key(&descriptor.id) {
                warn!(id = %descriptor.id, "duplicate feature id in catalog — keeping first");
                continue;
            }
            by_id.insert(descriptor.id.clone(), features.len());
            features.push(descriptor);
        }

        Self { features, by_id }
    }

    /// The built-in catalog, mirroring the portal's shipped tool set.
    /// Used when the host supplies no `[[catalog.feature]]` config.
    pub fn builtin() -> Self {
        Self::from_descriptors(builtin_descriptors())
    }

    pub fn get(&self, id: &str) -> Option<&FeatureDescriptor> {
        self.by_id.get(id).map(|&i| &self.features[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.features.iter()
    }

    /// Descriptors a subscriber on `tier` may use (directory tier filter).
    pub fn accessible_by(&self, tier: SubscriptionTier) -> Vec<&FeatureDescriptor> {
        self.features
            .iter()
            .filter(|f| check_access(tier, f).allowed)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn descriptor(
    id: &str,
    name: &str,
    category: &str,
    tier: &str,
    externally_hosted: bool,
    usage_limit: Option<&str>,
) -> FeatureDescriptor {
    FeatureDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        required_tier_raw: tier.to_string(),
        externally_hosted,
        usage_limit: usage_limit.map(str::to_string),
        coming_soon: false,
    }
}

/// The default tool set: the portal's own processors plus a few externally
/// hosted directory entries (which are never gated).
fn builtin_descriptors() -> Vec<FeatureDescriptor> {
    vec![
        descriptor(
            "ai-text-summarizer",
            "AI Text Summarizer",
            "text tools",
            "freemium",
            false,
            Some("Free tier: 10 summaries per day"),
        ),
        descriptor(
            "ai-image-generator",
            "AI Image Generator",
            "image generation",
            "basic",
            false,
            None,
        ),
        descriptor(
            "ai-code-assistant",
            "AI Code Assistant",
            "development",
            "pro",
            false,
            None,
        ),
        descriptor(
            "ai-language-translator",
            "AI Language Translator",
            "language translator",
            "basic",
            false,
            None,
        ),
        descriptor(
            "ai-data-analyzer",
            "AI Data Analyzer",
            "data analysis",
            "pro",
            false,
            None,
        ),
        // Externally hosted directory entries — listed, linked, never gated.
        descriptor(
            "chatgpt",
            "ChatGPT",
            "content-creation",
            "freemium",
            true,
            Some("Free tier: 40 messages every 3 hours"),
        ),
        descriptor(
            "claude",
            "Claude",
            "content-creation",
            "freemium",
            true,
            Some("Free tier: Limited messages per day"),
        ),
        descriptor("jasper", "Jasper AI", "content-creation", "basic", true, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_nonempty() {
        let catalog = FeatureCatalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog.get("ai-text-summarizer").is_some());
        assert!(catalog.get("no-such-tool").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut a = FeatureDescriptor::new("dup", SubscriptionTier::Freemium);
        a.name = "first".to_string();
        let mut b = FeatureDescriptor::new("dup", SubscriptionTier::Pro);
        b.name = "second".to_string();

        let catalog = FeatureCatalog::from_descriptors(vec![a, b]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("dup").unwrap().name, "first");
    }

    #[test]
    fn accessible_by_grows_with_tier() {
        let catalog = FeatureCatalog::builtin();
        let freemium = catalog.accessible_by(SubscriptionTier::Freemium).len();
        let basic = catalog.accessible_by(SubscriptionTier::Basic).len();
        let pro = catalog.accessible_by(SubscriptionTier::Pro).len();
        assert!(freemium <= basic && basic <= pro);
        // Pro sees everything in the built-in set.
        assert_eq!(pro, catalog.len());
    }

    #[test]
    fn external_entries_visible_to_freemium() {
        let catalog = FeatureCatalog::builtin();
        let ids: Vec<&str> = catalog
            .accessible_by(SubscriptionTier::Freemium)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        // Jasper requires basic but is externally hosted, so it is never gated.
        assert!(ids.contains(&"jasper"));
    }
}
