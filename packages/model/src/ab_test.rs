//! A/B tests over the content of a single section.
//!
//! Each variant carries a full replacement [`SectionContent`] and a weight.
//! Visitors are bucketed deterministically from `(test id, visitor id)` so a
//! returning visitor always sees the same variant.

use crate::content::SectionContent;
use pagecraft_common::stable_hash;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbTestStatus {
    #[default]
    Draft,
    Running,
    Concluded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbVariant {
    pub id: String,
    pub name: String,
    pub content: SectionContent,
    /// Relative traffic share
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub conversions: u64,
}

fn default_weight() -> u32 {
    1
}

impl AbVariant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: SectionContent) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content,
            weight: default_weight(),
            impressions: 0,
            conversions: 0,
        }
    }

    /// Compare conversion rates without floating point.
    /// Variants with no impressions rank below everything else.
    pub fn compare_rate(&self, other: &AbVariant) -> Ordering {
        match (self.impressions, other.impressions) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Less,
            (_, 0) => Ordering::Greater,
            (a_imp, b_imp) => {
                let lhs = self.conversions as u128 * b_imp as u128;
                let rhs = other.conversions as u128 * a_imp as u128;
                lhs.cmp(&rhs)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbTest {
    pub id: String,
    pub section_id: String,
    pub name: String,
    pub variants: Vec<AbVariant>,
    #[serde(default)]
    pub status: AbTestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl AbTest {
    pub fn new(
        id: impl Into<String>,
        section_id: impl Into<String>,
        name: impl Into<String>,
        variants: Vec<AbVariant>,
    ) -> Self {
        Self {
            id: id.into(),
            section_id: section_id.into(),
            name: name.into(),
            variants,
            status: AbTestStatus::Draft,
            winner: None,
        }
    }

    pub fn variant(&self, id: &str) -> Option<&AbVariant> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub fn variant_mut(&mut self, id: &str) -> Option<&mut AbVariant> {
        self.variants.iter_mut().find(|v| v.id == id)
    }

    pub fn total_weight(&self) -> u64 {
        self.variants.iter().map(|v| v.weight as u64).sum()
    }

    /// Variant shown to `visitor_id`. Only running tests assign.
    pub fn assign(&self, visitor_id: &str) -> Option<&AbVariant> {
        if self.status != AbTestStatus::Running {
            return None;
        }

        let total = self.total_weight();
        if total == 0 {
            return None;
        }

        let bucket = stable_hash(&[&self.id, visitor_id]) as u64 % total;
        let mut cumulative = 0u64;
        for variant in &self.variants {
            cumulative += variant.weight as u64;
            if bucket < cumulative {
                return Some(variant);
            }
        }

        None
    }

    /// Best performing variant so far. Ties keep the earlier variant.
    pub fn leader(&self) -> Option<&AbVariant> {
        self.variants.iter().fold(None, |best: Option<&AbVariant>, v| match best {
            Some(b) if v.compare_rate(b) != Ordering::Greater => Some(b),
            _ => Some(v),
        })
    }

    pub fn total_impressions(&self) -> u64 {
        self.variants.iter().map(|v| v.impressions).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SectionKind;

    fn test_with_weights(weights: &[u32]) -> AbTest {
        let variants = weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let mut v = AbVariant::new(
                    format!("v{}", i),
                    format!("Variant {}", i),
                    SectionContent::default_for(SectionKind::Hero),
                );
                v.weight = *w;
                v
            })
            .collect();
        let mut test = AbTest::new("t1", "s1", "Headline test", variants);
        test.status = AbTestStatus::Running;
        test
    }

    #[test]
    fn test_assign_is_deterministic() {
        let test = test_with_weights(&[1, 1]);
        let first = test.assign("visitor-42").map(|v| v.id.clone());
        let second = test.assign("visitor-42").map(|v| v.id.clone());
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_assign_respects_zero_weight() {
        let test = test_with_weights(&[0, 3]);
        for i in 0..50 {
            let v = test.assign(&format!("visitor-{}", i)).unwrap();
            assert_eq!(v.id, "v1");
        }
    }

    #[test]
    fn test_assign_requires_running() {
        let mut test = test_with_weights(&[1, 1]);
        test.status = AbTestStatus::Draft;
        assert!(test.assign("visitor").is_none());
    }

    #[test]
    fn test_assign_spreads_traffic() {
        let test = test_with_weights(&[1, 1]);
        let hits_v0 = (0..200)
            .filter(|i| test.assign(&format!("visitor-{}", i)).unwrap().id == "v0")
            .count();
        assert!(hits_v0 > 40 && hits_v0 < 160, "skewed split: {}", hits_v0);
    }

    #[test]
    fn test_leader_uses_conversion_rate() {
        let mut test = test_with_weights(&[1, 1, 1]);
        // 10/100 = 10%
        test.variants[0].impressions = 100;
        test.variants[0].conversions = 10;
        // 3/20 = 15%
        test.variants[1].impressions = 20;
        test.variants[1].conversions = 3;
        // never shown
        test.variants[2].impressions = 0;

        assert_eq!(test.leader().unwrap().id, "v1");
    }

    #[test]
    fn test_leader_tie_keeps_first() {
        let mut test = test_with_weights(&[1, 1]);
        for v in &mut test.variants {
            v.impressions = 10;
            v.conversions = 1;
        }
        assert_eq!(test.leader().unwrap().id, "v0");
    }
}
