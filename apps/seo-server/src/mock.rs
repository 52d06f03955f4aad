//! Randomized competitive metrics for `/analyze` and `/keyword_finder`.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAnalysis {
    pub organic_keywords: String,
    pub paid_keywords: String,
    pub monthly_traffic: String,
    pub domain_authority: String,
    pub organic_keywords_change: String,
    pub paid_keywords_change: String,
    pub monthly_traffic_change: String,
    pub domain_authority_change: String,
    /// Always empty: search-result scraping is not part of this service.
    pub top_organic_keywords: Vec<OrganicKeyword>,
    pub top_paid_keywords: Vec<PaidKeyword>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicKeyword {
    pub keyword: String,
    pub position: u32,
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidKeyword {
    pub keyword: String,
    pub cpc: f64,
    pub ad_spend: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    pub volume: u32,
    pub cpc: f64,
    pub difficulty: u32,
}

pub fn domain_analysis<R: Rng + ?Sized>(rng: &mut R) -> DomainAnalysis {
    DomainAnalysis {
        organic_keywords: thousands(rng.gen_range(5_000..=25_000)),
        paid_keywords: thousands(rng.gen_range(500..=5_000)),
        monthly_traffic: format!(
            "{}.{}K",
            rng.gen_range(20..=100),
            rng.gen_range(0..=9)
        ),
        domain_authority: rng.gen_range(40..=95).to_string(),
        organic_keywords_change: format!("+{:.1}%", rng.gen_range(1.0..=10.0)),
        paid_keywords_change: format!("-{:.1}%", rng.gen_range(1.0..=5.0)),
        monthly_traffic_change: format!("+{:.1}%", rng.gen_range(5.0..=20.0)),
        domain_authority_change: format!("+{:.1}%", rng.gen_range(1.0..=3.0)),
        top_organic_keywords: Vec::new(),
        top_paid_keywords: vec![
            paid(rng, "seo software", 8.0..=15.0, 4_000..=9_000),
            paid(rng, "ppc competitor research", 15.0..=25.0, 7_000..=12_000),
            paid(rng, "keyword tracking tool", 5.0..=12.0, 3_000..=6_000),
        ],
    }
}

pub fn keyword_suggestions<R: Rng + ?Sized>(rng: &mut R, keyword: &str) -> Vec<KeywordSuggestion> {
    vec![
        suggestion(rng, format!("{keyword} for small business"), 5_000..=10_000, Some(10.0..=20.0), 80..=95),
        suggestion(rng, format!("best {keyword} tools"), 3_000..=8_000, Some(5.0..=15.0), 70..=85),
        suggestion(rng, format!("free {keyword} analysis"), 1_000..=5_000, None, 60..=75),
        suggestion(rng, format!("how to use {keyword}"), 500..=2_000, Some(1.0..=5.0), 50..=65),
        suggestion(rng, format!("{keyword} pricing"), 1_000..=3_000, Some(3.0..=10.0), 75..=90),
    ]
}

fn suggestion<R: Rng + ?Sized>(
    rng: &mut R,
    keyword: String,
    volume: RangeInclusive<u32>,
    cpc: Option<RangeInclusive<f64>>,
    difficulty: RangeInclusive<u32>,
) -> KeywordSuggestion {
    KeywordSuggestion {
        keyword,
        volume: rng.gen_range(volume),
        cpc: cpc.map_or(0.0, |range| round2(rng.gen_range(range))),
        difficulty: rng.gen_range(difficulty),
    }
}

fn paid<R: Rng + ?Sized>(
    rng: &mut R,
    keyword: &str,
    cpc: RangeInclusive<f64>,
    ad_spend: RangeInclusive<u32>,
) -> PaidKeyword {
    PaidKeyword {
        keyword: keyword.to_string(),
        cpc: round2(rng.gen_range(cpc)),
        ad_spend: rng.gen_range(ad_spend),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `12345` -> `"12,345"`
fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn parse_thousands(value: &str) -> u32 {
        value.replace(',', "").parse().unwrap()
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(5_000), "5,000");
        assert_eq!(thousands(25_000), "25,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_domain_analysis_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let analysis = domain_analysis(&mut rng);
            assert!((5_000..=25_000).contains(&parse_thousands(&analysis.organic_keywords)));
            assert!((500..=5_000).contains(&parse_thousands(&analysis.paid_keywords)));
            assert!(analysis.monthly_traffic.ends_with('K'));
            let authority: u32 = analysis.domain_authority.parse().unwrap();
            assert!((40..=95).contains(&authority));
            assert!(analysis.organic_keywords_change.starts_with('+'));
            assert!(analysis.paid_keywords_change.starts_with('-'));
            assert!(analysis.top_organic_keywords.is_empty());
            assert_eq!(analysis.top_paid_keywords.len(), 3);
            for paid in &analysis.top_paid_keywords {
                assert_eq!(round2(paid.cpc), paid.cpc);
            }
        }
    }

    #[test]
    fn test_domain_analysis_json_shape() {
        let value = serde_json::to_value(domain_analysis(&mut StdRng::seed_from_u64(1))).unwrap();
        assert!(value["organicKeywords"].is_string());
        assert!(value["topOrganicKeywords"].as_array().unwrap().is_empty());
        assert!(value["topPaidKeywords"][0]["adSpend"].is_u64());
    }

    #[test]
    fn test_keyword_suggestions() {
        let mut rng = StdRng::seed_from_u64(3);
        let suggestions = keyword_suggestions(&mut rng, "seo");
        let phrases: Vec<_> = suggestions.iter().map(|s| s.keyword.as_str()).collect();

        assert_eq!(
            phrases,
            vec![
                "seo for small business",
                "best seo tools",
                "free seo analysis",
                "how to use seo",
                "seo pricing"
            ]
        );
        assert_eq!(suggestions[2].cpc, 0.0);
        assert!((80..=95).contains(&suggestions[0].difficulty));
        assert!((500..=2_000).contains(&suggestions[3].volume));
    }
}
