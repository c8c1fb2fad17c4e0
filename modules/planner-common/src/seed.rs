//! Default plan written on first access to an empty store.

use std::collections::BTreeMap;

use crate::types::{Attendees, Category, Cost, Day, Event, PlanDocument, ScheduleEntry};

impl PlanDocument {
    /// The built-in IAPN 2027 catalog.
    pub fn seed() -> Self {
        use Category::{Food, Other, Venue};

        let events = vec![
            event(1, "Welcome Reception in Murray", "", "3 hours", 1180.0, 140000.0, Food),
            event(5, "Welcome Reception in Hyatt Regency", "", "3 hours", 818.0, 68800.0, Food),
            event(6, "Gala Dinner in The Verandah", "", "Dinner", 1628.0, 360000.0, Food),
            event(9, "Gala Dinner in Crown Wine Cellar", "", "Dinner", 1688.0, 110000.0, Food),
            event(10, "Gala Dinner in WaterMark", "", "Dinner", 0.0, 168000.0, Food),
            event(11, "Sai Kung Seafood Dinner", "", "Dinner", 1000.0, 0.0, Food),
            event(12, "Star Ferry", "110 passengers. 3 hours 45,000", "Cocktail", 0.0, 45000.0, Food),
            event(15, "Star Ferry Canapes/ Lunch", "Canapes Room.", "Cocktail", 500.0, 0.0, Food),
            event(
                2,
                "Conference Hall Rental in Murray",
                "Main venue for keynote sessions",
                "Half Day",
                0.0,
                75000.0,
                Venue,
            ),
            event(
                7,
                "Conference Hall Rental in Hyatt Regency",
                "Main venue for keynote sessions",
                "Half Day",
                0.0,
                40800.0,
                Venue,
            ),
            event(
                8,
                "Conference Hall Rental in W Hotel",
                "Main venue for keynote sessions",
                "Half Day",
                0.0,
                118000.0,
                Venue,
            ),
            event(
                3,
                "Workshop Session",
                "Interactive training with materials",
                "4 hours",
                1200.0,
                0.0,
                Venue,
            ),
            event(13, "Tour Bus for Macau", "2 buses, 1 bus 4500 full day estimate", "", 0.0, 9000.0, Other),
            event(14, "Macau Lunch - Portugese Food", "Budget 500 per person", "", 500.0, 0.0, Other),
            event(16, "Sai Kung Alcohol Cost", "Buy Bottles and bring there.", "", 299.98, 0.0, Other),
            event(17, "Dragon Dance Performance", "", "", 0.0, 10000.0, Other),
            event(18, "Dim Sum Lunch", "", "Lunch", 350.0, 0.0, Other),
            event(19, "Korean BBQ Dinner", "", "Dinner", 800.0, 0.0, Other),
            event(20, "Star Ferry Alcohol Cost", "", "Lunch", 300.0, 0.0, Other),
            event(21, "Murray Lunch", "", "", 600.0, 0.0, Other),
            event(
                22,
                "Jocky Club Lunch- Saturday/ Sunday",
                "Wouldnt know until the race schedule out in 2026.",
                "",
                830.0,
                0.0,
                Other,
            ),
        ];

        let days = vec![
            day("day1", "Day 1", ""),
            day("day2", "Day 2", "Murray Conference->Star Ferry Lunch->Sai Kung Seafood Dinner"),
            day("day3", "Day 3", "Macau Day Trip->Lunch in Macau-> Come BackBBQ"),
            day("day4", "Day 4", "Conference->Dim Sum->Gala"),
        ];

        let schedule: BTreeMap<String, Vec<ScheduleEntry>> = [
            ("day1", vec![1]),
            ("day2", vec![2, 11, 16, 17, 12, 15, 20]),
            ("day3", vec![13, 14, 19]),
            ("day4", vec![2, 18, 6]),
        ]
        .into_iter()
        .map(|(day, ids)| {
            (
                day.to_string(),
                ids.into_iter().map(ScheduleEntry::Id).collect(),
            )
        })
        .collect();

        PlanDocument {
            event_title: "IAPN 2027 May 21-24".to_string(),
            event_description: Some(String::new()),
            attendees: Attendees::Count(100),
            currency: "HKD".to_string(),
            events,
            days,
            schedule,
            next_event_id: 23,
            next_day_id: 5,
            extra: serde_json::Map::new(),
        }
    }
}

fn event(
    id: i64,
    name: &str,
    description: &str,
    duration: &str,
    per_person_cost: f64,
    minimum_cost: f64,
    category: Category,
) -> Event {
    Event {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        duration: Some(duration.to_string()),
        per_person_cost: Some(Cost::new(per_person_cost)),
        minimum_cost: Some(Cost::new(minimum_cost)),
        category: Some(category),
        extra: serde_json::Map::new(),
    }
}

fn day(id: &str, label: &str, notes: &str) -> Day {
    Day {
        id: id.to_string(),
        label: label.to_string(),
        notes: Some(notes.to_string()),
        extra: serde_json::Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seed_has_full_catalog() {
        let seed = PlanDocument::seed();
        assert_eq!(seed.events.len(), 21);
        assert_eq!(seed.days.len(), 4);
        assert_eq!(seed.next_event_id, 23);
        assert_eq!(seed.next_day_id, 5);
        let alcohol = seed.events.iter().find(|e| e.id == 16).unwrap();
        assert_eq!(alcohol.per_person_cost.as_ref().unwrap().as_f64(), 299.98);
        assert!(seed.days.iter().any(|d| d.id == "day3" && d.label == "Day 3"));
    }

    #[test]
    fn seed_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(PlanDocument::seed()).unwrap();
        assert_eq!(value["eventTitle"], json!("IAPN 2027 May 21-24"));
        assert_eq!(value["nextEventId"], json!(23));
        assert_eq!(value["schedule"]["day4"], json!([2, 18, 6]));
        assert_eq!(
            value["events"][0],
            json!({
                "id": 1,
                "name": "Welcome Reception in Murray",
                "description": "",
                "duration": "3 hours",
                "perPersonCost": 1180,
                "minimumCost": 140000,
                "category": "food"
            })
        );
    }
}
