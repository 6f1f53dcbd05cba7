//! Typed argument builders, one per dashboard action
//!
//! Each builder produces the `arguments` mapping for its tool call. Optional
//! fields on update and summarize are omitted when unset; the add form always
//! sends all five fields, empty strings included, because that is what the
//! server expects. No validation happens here beyond type shape - an update
//! with zero optional fields set is forwarded as-is.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

const DATE_FMT: &str = "%Y-%m-%d";

fn date_value(date: NaiveDate) -> Value {
    Value::String(date.format(DATE_FMT).to_string())
}

/// Arguments for `add_expense`
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

impl AddExpense {
    pub fn arguments(&self) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert("date".into(), date_value(self.date));
        args.insert("amount".into(), json!(self.amount));
        args.insert("category".into(), json!(self.category));
        args.insert("subcategory".into(), json!(self.subcategory));
        args.insert("note".into(), json!(self.note));
        args
    }
}

/// Arguments for `update_expense`
///
/// Only `expense_id` is mandatory; unset fields stay untouched on the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpense {
    pub expense_id: u64,
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl UpdateExpense {
    pub fn arguments(&self) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert("expense_id".into(), json!(self.expense_id));
        if let Some(date) = self.date {
            args.insert("date".into(), date_value(date));
        }
        if let Some(amount) = self.amount {
            args.insert("amount".into(), json!(amount));
        }
        if let Some(category) = &self.category {
            args.insert("category".into(), json!(category));
        }
        if let Some(subcategory) = &self.subcategory {
            args.insert("subcategory".into(), json!(subcategory));
        }
        if let Some(note) = &self.note {
            args.insert("note".into(), json!(note));
        }
        args
    }
}

/// Arguments for `delete_expenses_by_date_range`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn arguments(&self) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert("start_date".into(), date_value(self.start_date));
        args.insert("end_date".into(), date_value(self.end_date));
        args
    }
}

/// Arguments for `summarize`
#[derive(Debug, Clone, PartialEq)]
pub struct Summarize {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Restrict the summary to one category; omitted from the call when unset
    pub category: Option<String>,
    pub group_by_subcategory: bool,
}

impl Summarize {
    pub fn arguments(&self) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert("start_date".into(), date_value(self.start_date));
        args.insert("end_date".into(), date_value(self.end_date));
        args.insert(
            "group_by_subcategory".into(),
            json!(self.group_by_subcategory),
        );
        if let Some(category) = &self.category {
            args.insert("category".into(), json!(category));
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_sends_all_fields_including_empty_strings() {
        let req = AddExpense {
            date: date(2024, 1, 5),
            amount: 12.50,
            category: "Food".into(),
            subcategory: String::new(),
            note: "lunch".into(),
        };

        let expected = json!({
            "date": "2024-01-05",
            "amount": 12.5,
            "category": "Food",
            "subcategory": "",
            "note": "lunch",
        });
        assert_eq!(Value::Object(req.arguments()), expected);
    }

    #[test]
    fn update_omits_unset_fields() {
        let req = UpdateExpense {
            expense_id: 3,
            amount: Some(99.0),
            note: Some("corrected".into()),
            ..Default::default()
        };

        let args = req.arguments();
        assert_eq!(args.len(), 3);
        assert_eq!(args["expense_id"], json!(3));
        assert_eq!(args["amount"], json!(99.0));
        assert_eq!(args["note"], json!("corrected"));
        assert!(!args.contains_key("date"));
        assert!(!args.contains_key("category"));
    }

    #[test]
    fn update_with_no_fields_still_carries_id() {
        let req = UpdateExpense {
            expense_id: 12,
            ..Default::default()
        };

        let args = req.arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args["expense_id"], json!(12));
    }

    #[test]
    fn date_range_formats_iso() {
        let req = DateRange {
            start_date: date(2024, 2, 1),
            end_date: date(2024, 2, 29),
        };

        let args = req.arguments();
        assert_eq!(args["start_date"], json!("2024-02-01"));
        assert_eq!(args["end_date"], json!("2024-02-29"));
    }

    #[test]
    fn summarize_omits_empty_category() {
        let req = Summarize {
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 31),
            category: None,
            group_by_subcategory: true,
        };

        let args = req.arguments();
        assert_eq!(args.len(), 3);
        assert_eq!(args["group_by_subcategory"], json!(true));
        assert!(!args.contains_key("category"));
    }

    #[test]
    fn summarize_includes_category_when_set() {
        let req = Summarize {
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 31),
            category: Some("Travel".into()),
            group_by_subcategory: false,
        };

        let args = req.arguments();
        assert_eq!(args["category"], json!("Travel"));
        assert_eq!(args["group_by_subcategory"], json!(false));
    }
}
