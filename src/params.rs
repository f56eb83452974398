//! Parameter resolution - which inputs an endpoint takes, their defaults,
//! and the exact query parameters sent on the wire

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::catalog::ParamSchema;

/// Query parameters for one request, ordered by name
pub type QueryParams = BTreeMap<String, String>;

/// Calendar date as typed into a date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minute-precision timestamp as typed into a datetime field
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Widens a minute-precision input into a full UTC timestamp
pub const DATETIME_SUFFIX: &str = ":00Z";

/// An editable input field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    StartDate,
    EndDate,
    StartDatetime,
    EndDatetime,
}

impl Field {
    /// Query parameter name
    pub fn param_name(&self) -> &'static str {
        match self {
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
            Field::StartDatetime => "start_datetime",
            Field::EndDatetime => "end_datetime",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::StartDate => "Start Date",
            Field::EndDate => "End Date",
            Field::StartDatetime => "Start Datetime",
            Field::EndDatetime => "End Datetime",
        }
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self, Field::StartDatetime | Field::EndDatetime)
    }
}

/// Raw values of every range input.
///
/// Values are kept as typed. Fields the selected endpoint does not declare
/// may hold stale values from an earlier selection; they are never sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub start_date: String,
    pub end_date: String,
    pub start_datetime: String,
    pub end_datetime: String,
}

impl InputState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
            Field::StartDatetime => &self.start_datetime,
            Field::EndDatetime => &self.end_datetime,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::StartDate => &mut self.start_date,
            Field::EndDate => &mut self.end_date,
            Field::StartDatetime => &mut self.start_datetime,
            Field::EndDatetime => &mut self.end_datetime,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Overwrite the fields `schema` declares with their defaults, leaving
    /// every other field as it was
    pub fn reset_for(&mut self, schema: ParamSchema, now: DateTime<Utc>, lookback_days: u32) {
        let defaults = defaults_for(schema, now, lookback_days);
        for field in visible_fields(schema) {
            self.set(*field, defaults.get(*field));
        }
    }
}

/// Default range: `lookback_days` before `now` up to `now`.
///
/// `None` when the start falls outside the representable calendar.
pub fn lookback_window(now: DateTime<Utc>, lookback_days: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let span = TimeDelta::try_days(i64::from(lookback_days))?;
    let start = now.checked_sub_signed(span)?;
    Some((start, now))
}

/// Default inputs for an endpoint. Fields the schema does not declare stay empty.
pub fn defaults_for(schema: ParamSchema, now: DateTime<Utc>, lookback_days: u32) -> InputState {
    let mut input = InputState::default();
    let (start_field, end_field, format) = match schema {
        ParamSchema::DateRange => (Field::StartDate, Field::EndDate, DATE_FORMAT),
        ParamSchema::DatetimeRange => (Field::StartDatetime, Field::EndDatetime, DATETIME_FORMAT),
        ParamSchema::None | ParamSchema::Fixed => return input,
    };

    match lookback_window(now, lookback_days) {
        Some((start, end)) => {
            input.set(start_field, start.format(format).to_string());
            input.set(end_field, end.format(format).to_string());
        }
        None => tracing::warn!(lookback_days, "Lookback window out of range, leaving range empty"),
    }

    input
}

/// Fields to render for an endpoint, in display order
pub fn visible_fields(schema: ParamSchema) -> &'static [Field] {
    match schema {
        ParamSchema::DateRange => &[Field::StartDate, Field::EndDate],
        ParamSchema::DatetimeRange => &[Field::StartDatetime, Field::EndDatetime],
        ParamSchema::None | ParamSchema::Fixed => &[],
    }
}

/// Wire parameters for an endpoint.
///
/// Keys are exactly `visible_fields(schema)`. Values are not validated or
/// reordered; the remote side owns range checks.
pub fn resolve(schema: ParamSchema, input: &InputState) -> QueryParams {
    visible_fields(schema)
        .iter()
        .map(|field| {
            let raw = input.get(*field);
            let value = if field.is_datetime() {
                format!("{}{}", raw, DATETIME_SUFFIX)
            } else {
                raw.to_string()
            };
            (field.param_name().to_string(), value)
        })
        .collect()
}

/// One-line description of what a fetch would send
pub fn summary(schema: ParamSchema, input: &InputState) -> String {
    let params = resolve(schema, input);
    let pair = |start: Field, end: Field| {
        let get = |f: Field| params.get(f.param_name()).map(String::as_str).unwrap_or("");
        format!("{} to {}", get(start), get(end))
    };

    match schema {
        ParamSchema::None => String::from("Current"),
        ParamSchema::Fixed => String::from("Fixed"),
        ParamSchema::DateRange => format!("Date range: {}", pair(Field::StartDate, Field::EndDate)),
        ParamSchema::DatetimeRange => format!(
            "Datetime range: {}",
            pair(Field::StartDatetime, Field::EndDatetime)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn june_10() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 14, 37, 52).unwrap()
    }

    #[test]
    fn test_lookback_window() {
        let (start, end) = lookback_window(june_10(), 7).unwrap();
        assert_eq!(end, june_10());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 3, 14, 37, 52).unwrap());
    }

    #[test]
    fn test_oversized_lookback_does_not_panic() {
        assert_eq!(lookback_window(june_10(), u32::MAX), None);
        assert_eq!(lookback_window(june_10(), 100_000_000), None);

        let input = defaults_for(ParamSchema::DateRange, june_10(), 100_000_000);
        assert_eq!(input, InputState::default());
        let input = defaults_for(ParamSchema::DatetimeRange, june_10(), u32::MAX);
        assert_eq!(input, InputState::default());

        // Schemas without a range never look at the window
        assert_eq!(defaults_for(ParamSchema::None, june_10(), u32::MAX), InputState::default());
        assert_eq!(defaults_for(ParamSchema::Fixed, june_10(), u32::MAX), InputState::default());
    }

    #[test]
    fn test_date_defaults() {
        let input = defaults_for(ParamSchema::DateRange, june_10(), 7);
        assert_eq!(input.start_date, "2024-06-03");
        assert_eq!(input.end_date, "2024-06-10");
        assert!(input.start_datetime.is_empty());
        assert!(input.end_datetime.is_empty());
    }

    #[test]
    fn test_datetime_defaults_are_minute_precision() {
        let input = defaults_for(ParamSchema::DatetimeRange, june_10(), 7);
        assert_eq!(input.start_datetime, "2024-06-03T14:37");
        assert_eq!(input.end_datetime, "2024-06-10T14:37");
        assert!(input.start_date.is_empty());
    }

    #[test]
    fn test_defaults_idempotent() {
        for schema in [ParamSchema::None, ParamSchema::DateRange, ParamSchema::DatetimeRange] {
            assert_eq!(defaults_for(schema, june_10(), 7), defaults_for(schema, june_10(), 7));
        }
    }

    #[test]
    fn test_defaults_cross_month_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 5, 0).unwrap();
        let input = defaults_for(ParamSchema::DateRange, now, 7);
        assert_eq!(input.start_date, "2024-02-24");
        assert_eq!(input.end_date, "2024-03-02");
    }

    #[test]
    fn test_visible_fields_follow_schema() {
        assert_eq!(visible_fields(ParamSchema::DateRange), &[Field::StartDate, Field::EndDate]);
        assert_eq!(
            visible_fields(ParamSchema::DatetimeRange),
            &[Field::StartDatetime, Field::EndDatetime]
        );
        assert!(visible_fields(ParamSchema::None).is_empty());
        assert!(visible_fields(ParamSchema::Fixed).is_empty());
    }

    #[test]
    fn test_resolve_keys_match_visible_fields() {
        let mut input = defaults_for(ParamSchema::DateRange, june_10(), 7);
        input.reset_for(ParamSchema::DatetimeRange, june_10(), 7);

        for schema in [
            ParamSchema::None,
            ParamSchema::DateRange,
            ParamSchema::DatetimeRange,
            ParamSchema::Fixed,
        ] {
            let params = resolve(schema, &input);
            let keys: Vec<&str> = params.keys().map(String::as_str).collect();
            let mut expected: Vec<&str> =
                visible_fields(schema).iter().map(|f| f.param_name()).collect();
            expected.sort();
            assert_eq!(keys, expected, "schema {:?}", schema);
        }
    }

    #[test]
    fn test_resolve_no_params_ignores_stale_input() {
        let mut input = defaults_for(ParamSchema::DateRange, june_10(), 7);
        input.set(Field::StartDatetime, "2024-01-01T00:00");
        assert!(resolve(ParamSchema::None, &input).is_empty());
    }

    #[test]
    fn test_resolve_dates_verbatim() {
        let mut input = InputState::default();
        input.set(Field::StartDate, "2024-06-10");
        input.set(Field::EndDate, "2024-06-01");

        // Reversed range passes through untouched
        let params = resolve(ParamSchema::DateRange, &input);
        assert_eq!(params["start_date"], "2024-06-10");
        assert_eq!(params["end_date"], "2024-06-01");
    }

    #[test]
    fn test_resolve_datetime_appends_suffix_once() {
        let input = defaults_for(ParamSchema::DatetimeRange, june_10(), 7);
        let first = resolve(ParamSchema::DatetimeRange, &input);
        let second = resolve(ParamSchema::DatetimeRange, &input);

        assert_eq!(first, second);
        assert_eq!(first["start_datetime"], "2024-06-03T14:37:00Z");
        assert_eq!(first["end_datetime"], "2024-06-10T14:37:00Z");
    }

    #[test]
    fn test_reset_for_keeps_other_pair() {
        let mut input = InputState::default();
        input.set(Field::StartDatetime, "2023-01-01T08:00");
        input.set(Field::StartDate, "1999-01-01");

        input.reset_for(ParamSchema::DateRange, june_10(), 7);
        assert_eq!(input.start_date, "2024-06-03");
        assert_eq!(input.start_datetime, "2023-01-01T08:00");

        input.reset_for(ParamSchema::None, june_10(), 7);
        assert_eq!(input.start_date, "2024-06-03");
    }

    #[test]
    fn test_summary() {
        let input = defaults_for(ParamSchema::DateRange, june_10(), 7);
        assert_eq!(summary(ParamSchema::DateRange, &input), "Date range: 2024-06-03 to 2024-06-10");
        assert_eq!(summary(ParamSchema::None, &input), "Current");

        let input = defaults_for(ParamSchema::DatetimeRange, june_10(), 7);
        assert_eq!(
            summary(ParamSchema::DatetimeRange, &input),
            "Datetime range: 2024-06-03T14:37:00Z to 2024-06-10T14:37:00Z"
        );
    }
}
