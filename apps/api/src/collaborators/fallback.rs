//! Synthetic data tables, one per collaborator.
//!
//! Each table is a plain value injected into its collaborator at startup, so
//! tests can swap in their own. Variable fields (costs, levels, urgency) are
//! drawn from a `Variation` seeded by the job description: the same job always
//! gets the same placeholder, different jobs get different ones.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::matching::trade_type::{classify, Category};
use crate::models::provider::{ProviderListing, RawRating};

/// Deterministic random stream seeded from a SHA-256 digest of its parts.
#[derive(Debug, Clone)]
pub struct Variation {
    rng: fastrand::Rng,
}

impl Variation {
    /// Seeds from the given parts; a collaborator name as the first part keeps
    /// streams of different collaborators independent for the same job.
    pub fn seeded(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hasher.finalize()[..8]);
        Self {
            rng: fastrand::Rng::with_seed(u64::from_be_bytes(seed)),
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.f64()
    }

    /// Uniform integer in `[low, high)`. Returns `low` for an empty range.
    pub fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.u32(low..high)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis tables
// ────────────────────────────────────────────────────────────────────────────

/// Shape: `{tradeType, complexity, estimatedCost, urgency}`.
#[derive(Debug, Clone)]
pub struct ZeroentropyDefaults {
    pub cost_range: (u32, u32),
    pub high_complexity_share: f64,
    pub urgent_share: f64,
}

impl Default for ZeroentropyDefaults {
    fn default() -> Self {
        Self {
            cost_range: (1000, 6000),
            high_complexity_share: 0.5,
            urgent_share: 0.3,
        }
    }
}

impl ZeroentropyDefaults {
    pub fn render(&self, job_description: &str) -> Value {
        let mut v = Variation::seeded(&["zeroentropy", job_description]);
        let complexity = if v.chance(self.high_complexity_share) {
            "high"
        } else {
            "medium"
        };
        let estimated_cost = v.range(self.cost_range.0, self.cost_range.1);
        let urgency = if v.chance(self.urgent_share) {
            "urgent"
        } else {
            "normal"
        };

        json!({
            "tradeType": classify(job_description),
            "complexity": complexity,
            "estimatedCost": estimated_cost,
            "urgency": urgency
        })
    }
}

/// Shape: `{requiredSkills, experienceLevel, certifications}`.
#[derive(Debug, Clone)]
pub struct ArcadeDefaults {
    pub expert_share: f64,
    pub certifications: Vec<String>,
}

impl Default for ArcadeDefaults {
    fn default() -> Self {
        Self {
            expert_share: 0.5,
            certifications: vec!["licensed".to_string(), "insured".to_string()],
        }
    }
}

impl ArcadeDefaults {
    pub fn render(&self, job_description: &str) -> Value {
        let lower = job_description.to_lowercase();
        // Whole trade names only, unlike the classifier's stems.
        let required_skills: Vec<&str> = Category::TRADES
            .iter()
            .map(Category::as_str)
            .filter(|skill| lower.contains(skill))
            .collect();

        let mut v = Variation::seeded(&["arcade", job_description]);
        let experience_level = if v.chance(self.expert_share) {
            "expert"
        } else {
            "intermediate"
        };

        json!({
            "requiredSkills": required_skills,
            "experienceLevel": experience_level,
            "certifications": self.certifications
        })
    }
}

/// Shape: `{marketDemand, averagePricing, completionTime, riskFactors}`.
#[derive(Debug, Clone)]
pub struct DatalogDefaults {
    pub market_demand: String,
    pub pricing_range: (u32, u32),
    /// Days.
    pub completion_range: (u32, u32),
    pub risk_factors: Vec<String>,
}

impl Default for DatalogDefaults {
    fn default() -> Self {
        Self {
            market_demand: "high".to_string(),
            pricing_range: (1500, 4500),
            completion_range: (3, 17),
            risk_factors: vec![
                "weather_dependent".to_string(),
                "permits_required".to_string(),
            ],
        }
    }
}

impl DatalogDefaults {
    pub fn render(&self, job_description: &str) -> Value {
        let mut v = Variation::seeded(&["datalog", job_description]);

        json!({
            "marketDemand": self.market_demand,
            "averagePricing": v.range(self.pricing_range.0, self.pricing_range.1),
            "completionTime": v.range(self.completion_range.0, self.completion_range.1),
            "riskFactors": self.risk_factors
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Search table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SyntheticListing {
    pub name: String,
    pub rating: f64,
    pub description: String,
    pub contact: String,
    pub website: String,
}

impl SyntheticListing {
    fn new(name: &str, rating: f64, description: &str, contact: &str, website: &str) -> Self {
        Self {
            name: name.to_string(),
            rating,
            description: description.to_string(),
            contact: contact.to_string(),
            website: website.to_string(),
        }
    }
}

/// Fixed listings stamped with the requested category and location.
#[derive(Debug, Clone)]
pub struct SearchDefaults {
    pub listings: Vec<SyntheticListing>,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            listings: vec![
                SyntheticListing::new(
                    "Bay Area Pro Services",
                    4.5,
                    "Found through web search - professional service provider",
                    "+1-555-9999",
                    "https://bayareapros.com",
                ),
                SyntheticListing::new(
                    "Local Expert Contractors",
                    4.3,
                    "Found through web search - local expert contractors",
                    "+1-555-8888",
                    "https://localexperts.com",
                ),
                SyntheticListing::new(
                    "AI-Enhanced Services",
                    4.7,
                    "Found through AI search - modern technology-driven contractor",
                    "+1-555-7777",
                    "https://aienhanced.com",
                ),
            ],
        }
    }
}

impl SearchDefaults {
    pub fn render(&self, category: Category, location: &str) -> Vec<ProviderListing> {
        self.listings
            .iter()
            .map(|l| ProviderListing {
                name: l.name.clone(),
                specialty: category,
                rating: RawRating::Number(l.rating),
                location: location.to_string(),
                description: l.description.clone(),
                contact: l.contact.clone(),
                website: l.website.clone(),
            })
            .collect()
    }
}
