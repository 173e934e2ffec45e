//! Ranker: merges the local directory with search results and keeps the top five.

use crate::matching::trade_type::Category;
use crate::models::provider::ServiceProvider;

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Ranks recommendations for a job of `category`.
///
/// Algorithm:
/// 1. Keep directory providers whose specialty serves `category` (all of them for `General`)
/// 2. Append every search result; duplicates by name or website are kept
/// 3. Stable sort by rating, highest first; ties keep input order
/// 4. Truncate to `MAX_RECOMMENDATIONS`
pub fn rank(
    directory: &[ServiceProvider],
    found: Vec<ServiceProvider>,
    category: Category,
) -> Vec<ServiceProvider> {
    let mut ranked: Vec<ServiceProvider> = directory
        .iter()
        .filter(|p| p.specialty.serves(category))
        .cloned()
        .chain(found)
        .collect();

    // Vec::sort_by is stable.
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::provider::{ProviderListing, RawRating};

    fn listing(name: &str, specialty: Category, rating: RawRating) -> ServiceProvider {
        ProviderListing {
            name: name.to_string(),
            specialty,
            rating,
            location: "San Francisco, CA".to_string(),
            description: String::new(),
            contact: String::new(),
            website: String::new(),
        }
        .normalize()
    }

    fn ratings(providers: &[ServiceProvider]) -> Vec<f64> {
        providers.iter().map(|p| p.rating).collect()
    }

    #[test]
    fn test_filters_by_category_and_merges_string_ratings() {
        let directory = vec![
            listing("ABC Plumbing Services", Category::Plumbing, RawRating::Number(4.8)),
            listing("Quick Fix Electric", Category::Electrical, RawRating::Number(4.6)),
        ];
        let found = vec![
            listing("Bay Area Pro Services", Category::Plumbing, "4.5".into()),
            listing("AI-Enhanced Services", Category::Plumbing, "4.7".into()),
        ];

        let ranked = rank(&directory, found, Category::Plumbing);

        assert_eq!(ratings(&ranked), vec![4.8, 4.7, 4.5]);
        assert!(ranked.iter().all(|p| p.name != "Quick Fix Electric"));
    }

    #[test]
    fn test_general_keeps_whole_directory() {
        let directory = vec![
            listing("A", Category::Plumbing, RawRating::Number(4.8)),
            listing("B", Category::Carpentry, RawRating::Number(4.9)),
            listing("C", Category::Electrical, RawRating::Number(4.6)),
        ];

        let ranked = rank(&directory, vec![], Category::General);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "B");
    }

    #[test]
    fn test_truncates_to_five() {
        let directory: Vec<ServiceProvider> = (0..6)
            .map(|i| listing(&format!("D{i}"), Category::General, (4.0 + i as f64 / 10.0).into()))
            .collect();
        let found: Vec<ServiceProvider> = (0..6)
            .map(|i| listing(&format!("F{i}"), Category::General, RawRating::Number(3.5)))
            .collect();

        let ranked = rank(&directory, found, Category::General);

        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
        assert_eq!(ranked[0].name, "D5");
    }

    #[test]
    fn test_ties_keep_input_order_and_duplicates_survive() {
        let directory = vec![listing("Same Co", Category::Carpentry, RawRating::Number(4.5))];
        let found = vec![
            listing("Same Co", Category::Carpentry, "4.5".into()),
            listing("Other Co", Category::Carpentry, RawRating::Number(4.5)),
        ];

        let ranked = rank(&directory, found, Category::Carpentry);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "Same Co");
        assert_eq!(ranked[1].name, "Same Co");
        assert_eq!(ranked[2].name, "Other Co");
    }

    #[test]
    fn test_unparseable_rating_sinks_to_bottom() {
        let found = vec![
            listing("Broken", Category::Plumbing, "n/a".into()),
            listing("Fine", Category::Plumbing, RawRating::Number(4.1)),
        ];

        let ranked = rank(&[], found, Category::Plumbing);

        assert_eq!(ranked[0].name, "Fine");
        assert_eq!(ranked[1].rating, 0.0);
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        assert!(rank(&[], vec![], Category::Electrical).is_empty());
    }
}
