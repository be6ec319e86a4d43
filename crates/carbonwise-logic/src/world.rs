//! Country per-capita emissions for the world comparison view.

use serde::{Deserialize, Serialize};

/// Per-capita emission band used to color countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionBand {
    /// Under 3 t per person.
    Low,
    /// 3–6 t.
    Moderate,
    /// 6–10 t.
    High,
    VeryHigh,
}

impl EmissionBand {
    pub fn for_tonnes(per_capita_tonnes: f64) -> Self {
        if per_capita_tonnes < 3.0 {
            Self::Low
        } else if per_capita_tonnes < 6.0 {
            Self::Moderate
        } else if per_capita_tonnes < 10.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryInfo {
    pub name: &'static str,
    /// ISO 3166-1 alpha-2.
    pub code: &'static str,
    /// Total emissions, million tonnes CO2e.
    pub emissions_mt: f64,
    /// Population, millions.
    pub population_m: f64,
    /// Tonnes CO2e per person per year.
    pub per_capita_tonnes: f64,
}

/// The twenty largest national emitters.
pub fn countries() -> Vec<CountryInfo> {
    const DATA: [(&str, &str, f64, f64, f64); 20] = [
        ("United States", "US", 5416.0, 331.0, 16.4),
        ("China", "CN", 10065.0, 1439.0, 7.0),
        ("India", "IN", 2654.0, 1380.0, 1.9),
        ("Russia", "RU", 1711.0, 146.0, 11.7),
        ("Japan", "JP", 1162.0, 126.0, 9.2),
        ("Germany", "DE", 759.0, 83.0, 9.1),
        ("Iran", "IR", 720.0, 84.0, 8.6),
        ("South Korea", "KR", 616.0, 52.0, 11.9),
        ("Saudi Arabia", "SA", 517.0, 35.0, 14.8),
        ("Indonesia", "ID", 615.0, 274.0, 2.2),
        ("Canada", "CA", 672.0, 38.0, 17.7),
        ("Mexico", "MX", 475.0, 129.0, 3.7),
        ("Brazil", "BR", 462.0, 213.0, 2.2),
        ("Australia", "AU", 415.0, 26.0, 16.0),
        ("United Kingdom", "GB", 379.0, 67.0, 5.6),
        ("Turkey", "TR", 353.0, 84.0, 4.2),
        ("Italy", "IT", 330.0, 60.0, 5.5),
        ("France", "FR", 323.0, 68.0, 4.8),
        ("Poland", "PL", 319.0, 38.0, 8.4),
        ("South Africa", "ZA", 456.0, 60.0, 7.6),
    ];

    DATA.iter()
        .map(|&(name, code, emissions_mt, population_m, per_capita_tonnes)| CountryInfo {
            name,
            code,
            emissions_mt,
            population_m,
            per_capita_tonnes,
        })
        .collect()
}

/// How a household footprint sits against one country's average.
#[derive(Debug, Clone, Serialize)]
pub struct CountryComparison {
    pub country: CountryInfo,
    pub band: EmissionBand,
    /// Signed percent difference of the user's footprint from the country
    /// average; positive means above it.
    pub percent_difference: f64,
}

/// Compare an annual footprint (kg CO2e) with every country.
pub fn compare_to_countries(annual_total_kg: f64) -> Vec<CountryComparison> {
    let user_tonnes = annual_total_kg / 1000.0;
    countries()
        .into_iter()
        .map(|country| {
            let percent_difference = if country.per_capita_tonnes > 0.0 {
                (user_tonnes - country.per_capita_tonnes) / country.per_capita_tonnes * 100.0
            } else {
                0.0
            };
            CountryComparison {
                band: EmissionBand::for_tonnes(country.per_capita_tonnes),
                country,
                percent_difference,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_countries_with_unique_codes() {
        let list = countries();
        assert_eq!(list.len(), 20);
        let codes: std::collections::HashSet<_> = list.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), 20);
    }

    #[test]
    fn bands() {
        assert_eq!(EmissionBand::for_tonnes(1.9), EmissionBand::Low);
        assert_eq!(EmissionBand::for_tonnes(3.0), EmissionBand::Moderate);
        assert_eq!(EmissionBand::for_tonnes(7.0), EmissionBand::High);
        assert_eq!(EmissionBand::for_tonnes(16.4), EmissionBand::VeryHigh);
    }

    #[test]
    fn percent_difference_signs() {
        let cmp = compare_to_countries(7000.0);
        let china = cmp.iter().find(|c| c.country.code == "CN").unwrap();
        assert!(china.percent_difference.abs() < 1e-9);
        let india = cmp.iter().find(|c| c.country.code == "IN").unwrap();
        assert!(india.percent_difference > 0.0);
        let us = cmp.iter().find(|c| c.country.code == "US").unwrap();
        assert!(us.percent_difference < 0.0);
    }
}
