use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matching::trade_type::Category;

/// A tradesman or company recommended to the caller.
/// Built once per request from either the local directory or a search
/// collaborator; `rating` is always a finite number by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceProvider {
    pub name: String,
    pub specialty: Category,
    pub rating: f64,
    pub location: String,
    pub description: String,
    pub contact: String,
    pub website: String,
}

/// Rating as it arrives from a collaborator: some sources send `4.7`,
/// others `"4.7"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Number(f64),
    Text(String),
}

impl RawRating {
    /// Coerces to a finite number. Unparseable or non-finite values become
    /// `0.0` so they rank last instead of poisoning the sort.
    pub fn normalize(&self) -> f64 {
        let value = match self {
            RawRating::Number(n) => Some(*n),
            RawRating::Text(s) => s.trim().parse::<f64>().ok(),
        };

        match value {
            Some(v) if v.is_finite() => v,
            _ => {
                warn!("Discarding unusable rating {:?}; ranking as 0.0", self);
                0.0
            }
        }
    }
}

impl From<f64> for RawRating {
    fn from(value: f64) -> Self {
        RawRating::Number(value)
    }
}

impl From<&str> for RawRating {
    fn from(value: &str) -> Self {
        RawRating::Text(value.to_string())
    }
}

/// Un-normalized provider record, as read from a directory file or built
/// by a search collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderListing {
    pub name: String,
    pub specialty: Category,
    pub rating: RawRating,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub website: String,
}

impl ProviderListing {
    pub fn normalize(self) -> ServiceProvider {
        ServiceProvider {
            rating: self.rating.normalize(),
            name: self.name,
            specialty: self.specialty,
            location: self.location,
            description: self.description,
            contact: self.contact,
            website: self.website,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_rating_passes_through() {
        assert_eq!(RawRating::Number(4.8).normalize(), 4.8);
    }

    #[test]
    fn test_string_rating_is_parsed() {
        assert_eq!(RawRating::from("4.7").normalize(), 4.7);
        assert_eq!(RawRating::from(" 4.5 ").normalize(), 4.5);
    }

    #[test]
    fn test_garbage_rating_ranks_as_zero() {
        assert_eq!(RawRating::from("five stars").normalize(), 0.0);
        assert_eq!(RawRating::from("NaN").normalize(), 0.0);
        assert_eq!(RawRating::Number(f64::INFINITY).normalize(), 0.0);
    }

    #[test]
    fn test_listing_deserializes_string_and_number_ratings() {
        let json = r#"[
            {"name": "A", "specialty": "plumbing", "rating": "4.2", "location": "Austin, TX"},
            {"name": "B", "specialty": "electrical", "rating": 3.9, "location": "Austin, TX",
             "description": "d", "contact": "c", "website": "w"}
        ]"#;
        let listings: Vec<ProviderListing> = serde_json::from_str(json).unwrap();
        let providers: Vec<ServiceProvider> =
            listings.into_iter().map(ProviderListing::normalize).collect();

        assert_eq!(providers[0].rating, 4.2);
        assert_eq!(providers[0].specialty, Category::Plumbing);
        assert!(providers[0].website.is_empty());
        assert_eq!(providers[1].rating, 3.9);
        assert_eq!(providers[1].contact, "c");
    }

    #[test]
    fn test_provider_serializes_rating_as_number() {
        let provider = ProviderListing {
            name: "ABC Plumbing Services".to_string(),
            specialty: Category::Plumbing,
            rating: RawRating::from("4.8"),
            location: "San Francisco, CA".to_string(),
            description: String::new(),
            contact: String::new(),
            website: String::new(),
        }
        .normalize();

        let value = serde_json::to_value(&provider).unwrap();
        assert_eq!(value["rating"], serde_json::json!(4.8));
        assert_eq!(value["specialty"], "plumbing");
    }
}
