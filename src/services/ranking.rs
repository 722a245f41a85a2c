//! Filtering, enrichment and ordering of candidate destinations.
//!
//! Everything here is synchronous and side-effect free; the service layer
//! gathers countries, weather and ratings and hands them in.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::db::CountryRating;
use crate::models::country::Country;
use crate::models::preferences::{Preferences, TravelType, TripDuration};
use crate::models::recommendation::{CostEstimate, Recommendation};
use crate::models::weather::Weather;
use crate::services::advisory;

pub const BEACH_REGIONS: &[&str] = &["Africa", "Americas", "Asia", "Oceania"];
pub const BEACH_MIN_TEMP: i32 = 20;
pub const MAX_TAGS: usize = 5;
pub const POPULAR_REVIEW_THRESHOLD: i64 = 10;
/// Cap on results served when the pipeline itself fails.
pub const DEGRADED_LIMIT: usize = 3;

const COST_PER_TIER: u64 = 500;

/// Whether a country survives every filter the user switched on.
pub fn passes_filters(country: &Country, weather: &Weather, prefs: &Preferences) -> bool {
    if prefs.travel_type() == TravelType::Beach
        && (!BEACH_REGIONS.contains(&country.region.as_str()) || weather.temp < BEACH_MIN_TEMP)
    {
        return false;
    }

    if !prefs.climate().admits(weather.temp) {
        return false;
    }

    prefs
        .language_filter()
        .is_none_or(|lang| country.speaks(lang))
}

pub fn cost_estimate(budget_tier: u8, duration: TripDuration, currency: &str) -> CostEstimate {
    let base = u64::from(budget_tier) * COST_PER_TIER * duration.cost_multiplier();
    CostEstimate::from_base(base, currency)
}

/// Descriptive tags, never more than [`MAX_TAGS`].
pub fn country_tags(
    weather: &Weather,
    landlocked: bool,
    region: &str,
    language_count: usize,
    reviews: i64,
) -> Vec<String> {
    let mut tags = Vec::with_capacity(MAX_TAGS);

    if weather.temp > 25 {
        tags.push("Жаркий климат");
    } else if weather.temp < 10 {
        tags.push("Холодный климат");
    }

    tags.push(if landlocked {
        "Не имеет выхода к морю"
    } else {
        "Есть пляжи"
    });

    match region {
        "Europe" => tags.push("Европа"),
        "Asia" => tags.push("Азия"),
        _ => {}
    }

    if language_count > 1 {
        tags.push("Многоязычная");
    }

    if reviews > POPULAR_REVIEW_THRESHOLD {
        tags.push("Популярное направление");
    }

    tags.into_iter()
        .take(MAX_TAGS)
        .map(ToString::to_string)
        .collect()
}

/// Builds the full result card for a country that passed the filters.
/// Returns `None` when the record has no common name or capital.
pub fn enrich(
    country: &Country,
    weather: Weather,
    ratings: &HashMap<String, CountryRating>,
    prefs: &Preferences,
) -> Option<Recommendation> {
    let name = country.common_name()?;
    let capital = country.primary_capital()?;
    let rating = ratings.get(name).copied();
    let (rating, reviews) = rating.map_or((0.0, 0), |r| (r.rating, r.reviews));

    let duration = prefs.duration();
    let budget_level = advisory::budget_tier(name);
    let languages = country.language_names();
    let tags = country_tags(
        &weather,
        country.landlocked,
        &country.region,
        languages.len(),
        reviews,
    );

    Some(Recommendation {
        name: name.to_string(),
        capital: capital.to_string(),
        flag: country.flags.png.clone(),
        weather,
        region: country.region.clone(),
        landlocked: country.landlocked,
        languages,
        rating,
        reviews,
        events: advisory::upcoming_events(capital),
        tips: advisory::travel_tips(name),
        population: country.population,
        area: country.area,
        estimated_cost: cost_estimate(budget_level, duration, &prefs.currency),
        duration_advice: advisory::duration_advice(duration, name).to_string(),
        budget_level,
        tags,
    })
}

fn synthetic_card(
    dest: &advisory::BackupDestination,
    duration: TripDuration,
    events: Vec<String>,
    tips: Vec<String>,
) -> Recommendation {
    Recommendation {
        name: dest.name.to_string(),
        capital: dest.capital.to_string(),
        flag: dest.flag.to_string(),
        weather: Weather::synthetic(),
        region: "Europe".to_string(),
        landlocked: dest.landlocked,
        languages: vec!["Местный язык".to_string()],
        rating: 4.0,
        reviews: 15,
        events,
        tips,
        population: 1_000_000,
        area: 100_000.0,
        estimated_cost: CostEstimate::from_base(1000, "USD"),
        duration_advice: advisory::duration_advice(duration, dest.name).to_string(),
        budget_level: 2,
        tags: vec!["Популярное направление".to_string()],
    }
}

/// Stand-ins for a category when live filtering left nothing.
pub fn backup_recommendations(
    travel_type: TravelType,
    duration: TripDuration,
) -> Vec<Recommendation> {
    advisory::backup_destinations(travel_type)
        .iter()
        .map(|dest| {
            synthetic_card(
                dest,
                duration,
                advisory::upcoming_events(dest.capital),
                advisory::travel_tips(dest.name),
            )
        })
        .collect()
}

/// Fully synthetic results served when the pipeline itself failed.
pub fn degraded_recommendations(
    travel_type: TravelType,
    duration: TripDuration,
) -> Vec<Recommendation> {
    let events: Vec<String> = advisory::upcoming_events("default")
        .into_iter()
        .take(1)
        .collect();

    advisory::backup_destinations(travel_type)
        .iter()
        .take(DEGRADED_LIMIT)
        .map(|dest| synthetic_card(dest, duration, events.clone(), advisory::default_tips()))
        .collect()
}

/// Beach searches go warmest first; then higher rating, then cheaper tier.
/// The sort is stable, so remaining ties keep dataset order.
pub fn sort_recommendations(recommendations: &mut [Recommendation], travel_type: TravelType) {
    let beach = travel_type == TravelType::Beach;
    recommendations.sort_by(|a, b| {
        let by_temp = if beach {
            b.weather.temp.cmp(&a.weather.temp)
        } else {
            Ordering::Equal
        };
        by_temp
            .then_with(|| b.rating.total_cmp(&a.rating))
            .then_with(|| a.budget_level.cmp(&b.budget_level))
    });
}

/// Filters, enriches and orders candidates. Falls back to the category's
/// backup list when nothing survives.
pub fn rank(
    candidates: Vec<(Country, Weather)>,
    ratings: &HashMap<String, CountryRating>,
    prefs: &Preferences,
) -> Vec<Recommendation> {
    let travel_type = prefs.travel_type();

    let mut recommendations: Vec<Recommendation> = candidates
        .into_iter()
        .filter(|(country, weather)| passes_filters(country, weather, prefs))
        .filter_map(|(country, weather)| enrich(&country, weather, ratings, prefs))
        .collect();

    if recommendations.is_empty() && travel_type.is_category() {
        recommendations = backup_recommendations(travel_type, prefs.duration());
    }

    sort_recommendations(&mut recommendations, travel_type);
    recommendations
}
