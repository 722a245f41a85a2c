//! Static travel advisories: events, tips, price tiers, trip-length advice and
//! the backup destinations used when live data yields nothing.
//!
//! Every lookup falls back to a shared default entry, so these never fail.

use crate::models::preferences::{TravelType, TripDuration};

const DEFAULT_EVENTS: &[&str] = &["Фестиваль местной культуры", "Международный кинофестиваль"];

const EVENTS_BY_CAPITAL: &[(&str, &[&str])] = &[
    (
        "Paris",
        &["Фестиваль света (12-15 мая)", "День взятия Бастилии (14 июля)"],
    ),
    (
        "Rome",
        &["Неделя моды (10-17 июня)", "Фестиваль мороженого (июль)"],
    ),
    (
        "Berlin",
        &["Фестиваль пива (август)", "Рождественские ярмарки (декабрь)"],
    ),
    (
        "Tokyo",
        &["Фестиваль сакуры (апрель)", "Фестиваль фейерверков (июль)"],
    ),
];

const DEFAULT_TIPS: &[&str] = &[
    "Изучите местные обычаи перед поездкой",
    "Сохраните контакты экстренных служб",
];

const TIPS_BY_COUNTRY: &[(&str, &[&str])] = &[
    (
        "France",
        &[
            "Попробуйте круассаны в местных пекарнях",
            "Билеты в музеи лучше покупать онлайн",
        ],
    ),
    (
        "Italy",
        &[
            "Остерегайтесь карманников в туристических местах",
            "Попробуйте джелато в маленьких кафе",
        ],
    ),
    (
        "Japan",
        &[
            "Имейте при себе наличные - не везде принимают карты",
            "Соблюдайте очередь при входе в транспорт",
        ],
    ),
];

const CHEAP_COUNTRIES: &[&str] = &["Thailand", "Vietnam", "India", "Indonesia", "Mexico"];
const MEDIUM_COUNTRIES: &[&str] = &["Brazil", "Turkey", "Malaysia", "Greece", "Portugal"];

const SHORT_TRIP_COUNTRIES: &[&str] = &["France", "Italy", "Spain", "Portugal"];
const LONG_TRIP_COUNTRIES: &[&str] = &["Australia", "New Zealand", "Canada", "Russia"];

/// A hardcoded stand-in destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupDestination {
    pub name: &'static str,
    pub capital: &'static str,
    pub flag: &'static str,
    pub landlocked: bool,
}

const fn backup(
    name: &'static str,
    capital: &'static str,
    flag: &'static str,
    landlocked: bool,
) -> BackupDestination {
    BackupDestination {
        name,
        capital,
        flag,
        landlocked,
    }
}

const BEACH_BACKUPS: &[BackupDestination] = &[
    backup("Мальдивы", "Мале", "https://flagcdn.com/w320/mv.png", false),
    backup("Тайланд", "Бангкок", "https://flagcdn.com/w320/th.png", false),
];

const MOUNTAIN_BACKUPS: &[BackupDestination] = &[
    backup("Швейцария", "Берн", "https://flagcdn.com/w320/ch.png", true),
    backup("Непал", "Катманду", "https://flagcdn.com/w320/np.png", true),
];

const CITY_BACKUPS: &[BackupDestination] = &[
    backup("Франция", "Париж", "https://flagcdn.com/w320/fr.png", false),
    backup("Япония", "Токио", "https://flagcdn.com/w320/jp.png", false),
];

const NATURE_BACKUPS: &[BackupDestination] = &[
    backup("Коста-Рика", "Сан-Хосе", "https://flagcdn.com/w320/cr.png", false),
    backup(
        "Новая Зеландия",
        "Веллингтон",
        "https://flagcdn.com/w320/nz.png",
        false,
    ),
];

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, values)| *values)
}

/// At most two upcoming events for a capital.
pub fn upcoming_events(capital: &str) -> Vec<String> {
    lookup(EVENTS_BY_CAPITAL, capital)
        .unwrap_or(DEFAULT_EVENTS)
        .iter()
        .take(2)
        .map(ToString::to_string)
        .collect()
}

pub fn travel_tips(country_name: &str) -> Vec<String> {
    lookup(TIPS_BY_COUNTRY, country_name)
        .unwrap_or(DEFAULT_TIPS)
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn default_tips() -> Vec<String> {
    travel_tips("default")
}

/// Price level from 1 (cheap) to 3 (expensive).
pub fn budget_tier(country_name: &str) -> u8 {
    if CHEAP_COUNTRIES.contains(&country_name) {
        1
    } else if MEDIUM_COUNTRIES.contains(&country_name) {
        2
    } else {
        3
    }
}

pub fn duration_advice(duration: TripDuration, country_name: &str) -> &'static str {
    match duration {
        TripDuration::Weekend => {
            if SHORT_TRIP_COUNTRIES.contains(&country_name) {
                "Идеально для короткого визита"
            } else {
                "Можно посмотреть основные достопримечательности"
            }
        }
        TripDuration::Week => "Оптимально для знакомства со страной",
        TripDuration::Long => {
            if LONG_TRIP_COUNTRIES.contains(&country_name) {
                "Отлично для глубокого изучения"
            } else {
                "Хороший вариант для длительного пребывания"
            }
        }
    }
}

/// Backup destinations for a category; empty for [`TravelType::Any`].
pub const fn backup_destinations(travel_type: TravelType) -> &'static [BackupDestination] {
    match travel_type {
        TravelType::Beach => BEACH_BACKUPS,
        TravelType::Mountains => MOUNTAIN_BACKUPS,
        TravelType::City => CITY_BACKUPS,
        TravelType::Nature => NATURE_BACKUPS,
        TravelType::Any => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_fall_back_to_default() {
        assert_eq!(upcoming_events("Tokyo")[0], "Фестиваль сакуры (апрель)");
        assert_eq!(upcoming_events("Lima"), upcoming_events("default"));
        assert!(upcoming_events("Paris").len() <= 2);
    }

    #[test]
    fn tips_fall_back_to_default() {
        assert_eq!(travel_tips("Italy").len(), 2);
        assert_eq!(travel_tips("Peru"), default_tips());
    }

    #[test]
    fn budget_tiers() {
        assert_eq!(budget_tier("Vietnam"), 1);
        assert_eq!(budget_tier("Greece"), 2);
        assert_eq!(budget_tier("Norway"), 3);
    }

    #[test]
    fn duration_advice_rules() {
        assert_eq!(
            duration_advice(TripDuration::Weekend, "Spain"),
            "Идеально для короткого визита"
        );
        assert_eq!(
            duration_advice(TripDuration::Weekend, "Chile"),
            "Можно посмотреть основные достопримечательности"
        );
        assert_eq!(
            duration_advice(TripDuration::Week, "Canada"),
            "Оптимально для знакомства со страной"
        );
        assert_eq!(
            duration_advice(TripDuration::Long, "Canada"),
            "Отлично для глубокого изучения"
        );
        assert_eq!(
            duration_advice(TripDuration::Long, "Chile"),
            "Хороший вариант для длительного пребывания"
        );
    }

    #[test]
    fn every_category_has_two_backups() {
        for t in [
            TravelType::Beach,
            TravelType::Mountains,
            TravelType::City,
            TravelType::Nature,
        ] {
            assert_eq!(backup_destinations(t).len(), 2);
        }
        assert!(backup_destinations(TravelType::Any).is_empty());
        assert!(backup_destinations(TravelType::Mountains)[0].landlocked);
    }
}
