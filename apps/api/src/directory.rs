//! Local directory: read-only providers loaded once at startup.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::matching::trade_type::Category;
use crate::models::provider::{ProviderListing, RawRating, ServiceProvider};

#[derive(Debug, Clone)]
pub struct Directory {
    providers: Vec<ServiceProvider>,
}

impl Directory {
    pub fn new(listings: Vec<ProviderListing>) -> Self {
        Self {
            providers: listings.into_iter().map(ProviderListing::normalize).collect(),
        }
    }

    /// The built-in San Francisco directory, one provider per trade.
    pub fn seeded() -> Self {
        let seed = |name: &str, specialty, rating: f64, description: &str, contact: &str, website: &str| {
            ProviderListing {
                name: name.to_string(),
                specialty,
                rating: RawRating::Number(rating),
                location: "San Francisco, CA".to_string(),
                description: description.to_string(),
                contact: contact.to_string(),
                website: website.to_string(),
            }
        };

        Self::new(vec![
            seed(
                "ABC Plumbing Services",
                Category::Plumbing,
                4.8,
                "Professional plumbing services for residential and commercial properties",
                "+1-555-0123",
                "https://abcplumbing.com",
            ),
            seed(
                "Master Carpentry Co.",
                Category::Carpentry,
                4.9,
                "Expert carpentry and woodworking services",
                "+1-555-0124",
                "https://mastercarpentry.com",
            ),
            seed(
                "Golden State Construction",
                Category::Construction,
                4.7,
                "Full-service construction and renovation company",
                "+1-555-0125",
                "https://goldenstateconstruction.com",
            ),
            seed(
                "Quick Fix Electric",
                Category::Electrical,
                4.6,
                "Licensed electrical contractors for all your electrical needs",
                "+1-555-0126",
                "https://quickfixelectric.com",
            ),
        ])
    }

    /// Loads a JSON array of listings. Ratings may be numbers or numeric strings.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read directory file {}", path.display()))?;
        let listings: Vec<ProviderListing> = serde_json::from_str(&raw)
            .with_context(|| format!("Directory file {} is not a valid listing array", path.display()))?;

        info!("Loaded {} directory providers from {}", listings.len(), path.display());
        Ok(Self::new(listings))
    }

    /// Uses the file at `path` if given, otherwise the seeded directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::seeded()),
        }
    }

    pub fn providers(&self) -> &[ServiceProvider] {
        &self.providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seeded_has_one_provider_per_trade() {
        let directory = Directory::seeded();
        assert_eq!(directory.providers().len(), 4);
        for trade in Category::TRADES {
            assert_eq!(
                directory.providers().iter().filter(|p| p.specialty == trade).count(),
                1,
                "expected one {trade} provider"
            );
        }
    }

    #[test]
    fn test_load_without_path_is_seeded() {
        let directory = Directory::load(None).unwrap();
        assert_eq!(directory.providers()[0].name, "ABC Plumbing Services");
    }

    #[test]
    fn test_from_json_file_normalizes_ratings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Tahoe Timber", "specialty": "carpentry", "rating": "4.4", "location": "Truckee, CA"}}]"#
        )
        .unwrap();

        let directory = Directory::load(Some(file.path())).unwrap();

        assert_eq!(directory.providers()[0].rating, 4.4);
        assert_eq!(directory.providers()[0].specialty, Category::Carpentry);
    }

    #[test]
    fn test_from_json_file_rejects_unknown_specialty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "X", "specialty": "roofing", "rating": 4, "location": "Reno, NV"}}]"#
        )
        .unwrap();

        assert!(Directory::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Directory::from_json_file(Path::new("/nonexistent/directory.json")).is_err());
    }
}
