use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

static RE_DAY_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^day(\d+)$").unwrap());

// --- Catalog Types ---

/// Catalog category. Food, venue and other are the known values; anything
/// else a client sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Venue,
    Other,
    Custom(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "food" => Category::Food,
            "venue" => Category::Venue,
            "other" => Category::Other,
            _ => Category::Custom(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Food => write!(f, "food"),
            Category::Venue => write!(f, "venue"),
            Category::Other => write!(f, "other"),
            Category::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A money amount exactly as the client wrote it. Integers stay integers
/// (`1180`, not `1180.0`) so stored documents read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(serde_json::Number);

impl Cost {
    pub fn new(value: f64) -> Self {
        if value.fract() == 0.0 && value >= 0.0 && value <= u64::MAX as f64 {
            return Cost(serde_json::Number::from(value as u64));
        }
        Cost(serde_json::Number::from_f64(value).unwrap_or_else(|| serde_json::Number::from(0)))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    pub fn is_non_negative(&self) -> bool {
        let v = self.as_f64();
        v.is_finite() && v >= 0.0
    }
}

/// Headcount as the client sent it. Form inputs often deliver numbers as
/// strings; those are kept as strings and only checked for a numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attendees {
    Count(u64),
    Text(String),
}

impl Attendees {
    pub fn count(&self) -> Option<u64> {
        match self {
            Attendees::Count(n) => Some(*n),
            Attendees::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A catalog entry. Optional fields stay absent when the client left them
/// out, and keys this type does not know about are carried in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_person_cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Day {
    /// Numeric part of a `day<N>` id, if the id has that shape.
    pub fn number(&self) -> Option<i64> {
        RE_DAY_ID
            .captures(&self.id)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// One slot in a day's schedule. Clients either reference a catalog event
/// by id or embed a full copy of it; both shapes are kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleEntry {
    Id(i64),
    Copy(Event),
}

impl ScheduleEntry {
    pub fn event_id(&self) -> i64 {
        match self {
            ScheduleEntry::Id(id) => *id,
            ScheduleEntry::Copy(event) => event.id,
        }
    }
}

// --- Plan Document ---

/// The whole event plan, stored and replaced as one unit.
///
/// Keys this type does not know about are carried in `extra` (here and on
/// `Event` and `Day`) and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub event_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    pub attendees: Attendees,
    pub currency: String,
    pub events: Vec<Event>,
    pub days: Vec<Day>,
    pub schedule: BTreeMap<String, Vec<ScheduleEntry>>,
    pub next_event_id: i64,
    pub next_day_id: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlanDocument {
    /// Check the referential and counter invariants. Every violation is
    /// reported, not just the first.
    pub fn validate(&self) -> Result<(), PlannerError> {
        let mut problems = Vec::new();

        if self.attendees.count().is_none() {
            problems.push("attendees must be a whole number".to_string());
        }

        let mut event_ids = HashSet::new();
        for event in &self.events {
            if !event_ids.insert(event.id) {
                problems.push(format!("duplicate event id {}", event.id));
            }
            if event.id >= self.next_event_id {
                problems.push(format!(
                    "nextEventId {} must exceed event id {}",
                    self.next_event_id, event.id
                ));
            }
            if event.per_person_cost.as_ref().is_some_and(|c| !c.is_non_negative()) {
                problems.push(format!("event {} has a negative perPersonCost", event.id));
            }
            if event.minimum_cost.as_ref().is_some_and(|c| !c.is_non_negative()) {
                problems.push(format!("event {} has a negative minimumCost", event.id));
            }
        }

        let mut day_ids = HashSet::new();
        for day in &self.days {
            if !day_ids.insert(day.id.as_str()) {
                problems.push(format!("duplicate day id `{}`", day.id));
            }
            if let Some(n) = day.number() {
                if n >= self.next_day_id {
                    problems.push(format!(
                        "nextDayId {} must exceed day `{}`",
                        self.next_day_id, day.id
                    ));
                }
            }
        }

        for (day, entries) in &self.schedule {
            if !day_ids.contains(day.as_str()) {
                problems.push(format!("schedule references unknown day `{day}`"));
            }
            for entry in entries {
                let id = entry.event_id();
                if !event_ids.contains(&id) {
                    problems.push(format!("schedule for `{day}` references unknown event {id}"));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::Validation(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seed_passes_validation() {
        PlanDocument::seed().validate().unwrap();
    }

    #[test]
    fn unknown_category_round_trips() {
        let cat: Category = serde_json::from_value(json!("transport")).unwrap();
        assert_eq!(cat, Category::Custom("transport".into()));
        assert_eq!(serde_json::to_value(&cat).unwrap(), json!("transport"));

        let food: Category = serde_json::from_value(json!("food")).unwrap();
        assert_eq!(food, Category::Food);
    }

    #[test]
    fn cost_keeps_integer_and_decimal_forms() {
        assert_eq!(serde_json::to_string(&Cost::new(1180.0)).unwrap(), "1180");
        assert_eq!(serde_json::to_string(&Cost::new(299.98)).unwrap(), "299.98");

        let parsed: Cost = serde_json::from_str("818").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "818");
    }

    #[test]
    fn schedule_accepts_ids_and_copies() {
        let entries: Vec<ScheduleEntry> = serde_json::from_value(json!([
            3,
            {"id": 4, "name": "Boat", "category": "other"}
        ]))
        .unwrap();
        assert_eq!(entries[0], ScheduleEntry::Id(3));
        assert_eq!(entries[1].event_id(), 4);
    }

    #[test]
    fn unknown_top_level_keys_are_kept() {
        let mut value = serde_json::to_value(PlanDocument::seed()).unwrap();
        value["theme"] = json!({"color": "teal"});

        let doc: PlanDocument = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(doc.extra.get("theme"), Some(&json!({"color": "teal"})));
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }

    #[test]
    fn dangling_schedule_reference_is_rejected() {
        let mut doc = PlanDocument::seed();
        doc.schedule.get_mut("day1").unwrap().push(ScheduleEntry::Id(999));

        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("unknown event 999"));
    }

    #[test]
    fn schedule_for_missing_day_is_rejected() {
        let mut doc = PlanDocument::seed();
        doc.schedule.insert("day9".into(), vec![ScheduleEntry::Id(1)]);

        let PlannerError::Validation(problems) = doc.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(problems, vec!["schedule references unknown day `day9`".to_string()]);
    }

    #[test]
    fn stale_counters_are_rejected() {
        let mut doc = PlanDocument::seed();
        doc.next_event_id = 22;
        doc.next_day_id = 4;

        let PlannerError::Validation(problems) = doc.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("nextEventId 22 must exceed event id 22"));
        assert!(problems[1].contains("nextDayId 4 must exceed day `day4`"));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let mut doc = PlanDocument::seed();
        doc.events[0].minimum_cost = Some(Cost::new(-5.0));

        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("event 1 has a negative minimumCost"));
    }

    #[test]
    fn duplicate_event_ids_are_rejected() {
        let mut doc = PlanDocument::seed();
        let copy = doc.events[0].clone();
        doc.events.push(copy);

        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate event id 1"));
    }

    #[test]
    fn non_numeric_day_ids_skip_counter_check() {
        let mut doc = PlanDocument::seed();
        doc.days.push(Day {
            id: "extra".into(),
            label: "Spare day".into(),
            notes: None,
            extra: serde_json::Map::new(),
        });
        doc.validate().unwrap();
    }

    #[test]
    fn event_and_day_keys_round_trip_as_sent() {
        let mut value = serde_json::to_value(PlanDocument::seed()).unwrap();
        value["events"][0]["vendor"] = json!("Murray Hotel");
        value["days"][0]["date"] = json!("2027-05-21");
        value["schedule"]["day2"][0] = json!({"id": 2, "name": "Hall", "deposit": 5000});
        // A minimal event comes back without defaulted fields.
        value["events"][1] = json!({"id": 5, "name": "Hyatt Reception"});

        let doc: PlanDocument = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(doc.events[0].extra.get("vendor"), Some(&json!("Murray Hotel")));
        assert_eq!(doc.events[1].description, None);
        doc.validate().unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }

    #[test]
    fn attendees_accept_numeric_text() {
        let mut value = serde_json::to_value(PlanDocument::seed()).unwrap();
        value["attendees"] = json!("120");

        let doc: PlanDocument = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(doc.attendees.count(), Some(120));
        doc.validate().unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap()["attendees"], json!("120"));

        let mut doc = doc;
        doc.attendees = Attendees::Text("lots".into());
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("attendees must be a whole number"));
    }
}
