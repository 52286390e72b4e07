//! Recurrence-rule validation and form encoding for calendar events.
//!
//! The portal's event form takes recurrence as a flat set of camelCase
//! fields (`intervalType`, `monthDayInMonth`, `recurrenceDays`, ...) whose
//! required subset depends on the chosen interval type. [`RecurrenceSpec`]
//! is that flat input shape; [`RecurrenceSpec::validate`] checks it in a
//! fixed order (first violated rule wins) and converts it into the typed
//! [`Recurrence`] / [`EndRule`] pair, from which the wire fields are
//! rendered. Nothing here performs I/O; the output is merged into the event
//! form body by [`super::EventDraft`].

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Day-of-week, serialized as `MON`..`SUN` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MON" => Ok(Weekday::Mon),
            "TUE" => Ok(Weekday::Tue),
            "WED" => Ok(Weekday::Wed),
            "THU" => Ok(Weekday::Thu),
            "FRI" => Ok(Weekday::Fri),
            "SAT" => Ok(Weekday::Sat),
            "SUN" => Ok(Weekday::Sun),
            _ => Err(ValidationError::InvalidMember {
                field: "weekday".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// How the event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalType {
    #[default]
    None,
    Daily,
    Weekdays,
    Weekly,
    Monthly,
    Yearly,
}

impl IntervalType {
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalType::None => "NONE",
            IntervalType::Daily => "DAILY",
            IntervalType::Weekdays => "WEEKDAYS",
            IntervalType::Weekly => "WEEKLY",
            IntervalType::Monthly => "MONTHLY",
            IntervalType::Yearly => "YEARLY",
        }
    }
}

/// Which monthly rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyKind {
    ByMonthDay,
    ByWeekdayOrdinal,
}

/// How the recurrence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndType {
    #[default]
    Never,
    Count,
    Until,
}

impl EndType {
    pub fn as_str(self) -> &'static str {
        match self {
            EndType::Never => "NEVER",
            EndType::Count => "COUNT",
            EndType::Until => "UNTIL",
        }
    }
}

/// Flat recurrence input, mirroring the portal form: every field optional,
/// the required subset depending on `interval_type` / `end_type`.
///
/// `until_date` is passed through raw (the portal wants `DD.MM.YYYY`); this
/// module does not parse or reformat it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub interval_type: IntervalType,
    pub interval: Option<u32>,
    pub monthly_kind: Option<MonthlyKind>,
    pub month_day_of_month: Option<u32>,
    pub month_ordinal: Option<i32>,
    pub month_weekday: Option<Weekday>,
    /// Weekly repeat days; order is preserved in the encoded output.
    /// Empty means absent.
    pub weekly_days: Vec<Weekday>,
    pub end_type: EndType,
    pub end_count: Option<u32>,
    pub until_date: Option<String>,
}

/// Validated recurrence: one variant per interval type, carrying exactly
/// the fields that type requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    None,
    Daily { interval: u32 },
    Weekdays,
    Weekly { interval: u32, days: Vec<Weekday> },
    Monthly { interval: u32, rule: MonthlyRule },
    Yearly { interval: u32 },
}

/// Validated monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyRule {
    ByMonthDay { day: u32 },
    ByWeekdayOrdinal { ordinal: i32, weekday: Weekday },
}

/// Validated end rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndRule {
    Never,
    Count(u32),
    Until(String),
}

/// A [`RecurrenceSpec`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecurrence {
    pub recurrence: Recurrence,
    pub end: EndRule,
}

/// Ordinal values the portal understands: first..fourth, or last.
const VALID_ORDINALS: [i32; 5] = [1, 2, 3, 4, -1];

impl RecurrenceSpec {
    /// Validate the spec and convert it into its typed form.
    ///
    /// Checks run in a fixed order and the first violated rule is the one
    /// reported; fields irrelevant to the chosen interval type are ignored.
    pub fn validate(&self) -> Result<ValidatedRecurrence, ValidationError> {
        // 1: interval is required for every repeating type except WEEKDAYS.
        let needs_interval = !matches!(
            self.interval_type,
            IntervalType::None | IntervalType::Weekdays
        );
        if needs_interval && self.interval.is_none() {
            return Err(ValidationError::MissingField {
                field: "interval",
                context: "recurrence",
            });
        }

        // 2: range check applies whenever an interval was given.
        if let Some(n) = self.interval {
            if !(1..=30).contains(&n) {
                return Err(ValidationError::OutOfRange {
                    field: "interval",
                    value: i64::from(n),
                    min: 1,
                    max: 30,
                });
            }
        }

        // 3: monthly sub-rule.
        let monthly = if self.interval_type == IntervalType::Monthly {
            Some(self.monthly_rule()?)
        } else {
            None
        };

        // 4: weekly repeat days.
        if self.interval_type == IntervalType::Weekly && self.weekly_days.is_empty() {
            return Err(ValidationError::MissingField {
                field: "recurrenceDays",
                context: "weekly recurrence",
            });
        }

        // 5 + 6: end rule.
        let end = match self.end_type {
            EndType::Never => EndRule::Never,
            EndType::Count => EndRule::Count(self.end_count.ok_or(
                ValidationError::MissingField {
                    field: "endCount",
                    context: "recurrence end",
                },
            )?),
            EndType::Until => EndRule::Until(self.until_date.clone().ok_or(
                ValidationError::MissingField {
                    field: "untilDate",
                    context: "recurrence end",
                },
            )?),
        };

        let recurrence = match (self.interval_type, self.interval, monthly) {
            (IntervalType::None, _, _) => Recurrence::None,
            (IntervalType::Weekdays, _, _) => Recurrence::Weekdays,
            (IntervalType::Daily, Some(n), _) => Recurrence::Daily { interval: n },
            (IntervalType::Weekly, Some(n), _) => Recurrence::Weekly {
                interval: n,
                days: self.weekly_days.clone(),
            },
            (IntervalType::Monthly, Some(n), Some(rule)) => Recurrence::Monthly {
                interval: n,
                rule,
            },
            (IntervalType::Yearly, Some(n), _) => Recurrence::Yearly { interval: n },
            // The checks above guarantee the pieces are present.
            _ => {
                return Err(ValidationError::MissingField {
                    field: "interval",
                    context: "recurrence",
                })
            }
        };

        Ok(ValidatedRecurrence { recurrence, end })
    }

    fn monthly_rule(&self) -> Result<MonthlyRule, ValidationError> {
        let kind = self.monthly_kind.ok_or(ValidationError::MissingField {
            field: "monthlyKind",
            context: "monthly recurrence",
        })?;
        match kind {
            MonthlyKind::ByWeekdayOrdinal => {
                let ordinal = self.month_ordinal.ok_or(ValidationError::MissingField {
                    field: "monthOrdinal",
                    context: "monthly recurrence",
                })?;
                let weekday = self.month_weekday.ok_or(ValidationError::MissingField {
                    field: "monthWeekday",
                    context: "monthly recurrence",
                })?;
                if !VALID_ORDINALS.contains(&ordinal) {
                    return Err(ValidationError::InvalidMember {
                        field: "monthOrdinal".to_string(),
                        value: ordinal.to_string(),
                    });
                }
                Ok(MonthlyRule::ByWeekdayOrdinal { ordinal, weekday })
            }
            MonthlyKind::ByMonthDay => {
                let day = self.month_day_of_month.ok_or(ValidationError::MissingField {
                    field: "monthDayInMonth",
                    context: "monthly recurrence",
                })?;
                if !(1..=31).contains(&day) {
                    return Err(ValidationError::OutOfRange {
                        field: "monthDayInMonth",
                        value: i64::from(day),
                        min: 1,
                        max: 31,
                    });
                }
                Ok(MonthlyRule::ByMonthDay { day })
            }
        }
    }

    /// Validate and render the recurrence form fields, in wire order.
    ///
    /// Either all required fields for the chosen combination are present
    /// and the full fragment is returned, or validation fails before any
    /// field is written.
    pub fn encode(&self) -> Result<Vec<(String, String)>, ValidationError> {
        Ok(self.validate()?.to_form_fields())
    }
}

impl ValidatedRecurrence {
    /// Render the wire fields. Infallible: the typed form carries exactly
    /// what the portal needs.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut push = |k: &str, v: String| fields.push((k.to_string(), v));

        match &self.recurrence {
            Recurrence::None => push("intervalType", "NONE".to_string()),
            Recurrence::Weekdays => push("intervalType", "WEEKDAYS".to_string()),
            Recurrence::Daily { interval } => {
                push("intervalType", "DAILY".to_string());
                push("interval", interval.to_string());
            }
            Recurrence::Weekly { interval, days } => {
                push("intervalType", "WEEKLY".to_string());
                push("interval", interval.to_string());
                let joined = days
                    .iter()
                    .map(|d| d.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                push("recurrenceDays", joined);
            }
            Recurrence::Monthly { interval, rule } => {
                push("intervalType", "MONTHLY".to_string());
                push("interval", interval.to_string());
                match rule {
                    MonthlyRule::ByMonthDay { day } => {
                        push("monthlyIntervalType", "BYMONTHDAY".to_string());
                        push("monthDayInMonth", day.to_string());
                    }
                    MonthlyRule::ByWeekdayOrdinal { ordinal, weekday } => {
                        push("monthlyIntervalType", "BYWEEKDAY".to_string());
                        push("monthInterval", ordinal.to_string());
                        push("monthDay", weekday.as_str().to_string());
                    }
                }
            }
            Recurrence::Yearly { interval } => {
                push("intervalType", "YEARLY".to_string());
                push("interval", interval.to_string());
            }
        }

        match &self.end {
            EndRule::Never => push("endType", "NEVER".to_string()),
            EndRule::Count(n) => {
                push("endType", "COUNT".to_string());
                push("endInterval", n.to_string());
            }
            EndRule::Until(date) => {
                push("endType", "UNTIL".to_string());
                push("untilDate", date.clone());
            }
        }

        fields
    }
}

/// Alarm offsets the portal accepts, keyed by their wire token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOffset {
    Min0,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour2,
    Hour12,
    Day1,
    Day2,
    Day7,
}

/// All valid alarm tokens, in the order the portal's form lists them.
pub const ALARM_TOKENS: [&str; 10] = [
    "0M", "5M", "15M", "30M", "1H", "2H", "12H", "1D", "2D", "7D",
];

impl AlarmOffset {
    pub fn token(self) -> &'static str {
        match self {
            AlarmOffset::Min0 => "0M",
            AlarmOffset::Min5 => "5M",
            AlarmOffset::Min15 => "15M",
            AlarmOffset::Min30 => "30M",
            AlarmOffset::Hour1 => "1H",
            AlarmOffset::Hour2 => "2H",
            AlarmOffset::Hour12 => "12H",
            AlarmOffset::Day1 => "1D",
            AlarmOffset::Day2 => "2D",
            AlarmOffset::Day7 => "7D",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "0M" => Some(AlarmOffset::Min0),
            "5M" => Some(AlarmOffset::Min5),
            "15M" => Some(AlarmOffset::Min15),
            "30M" => Some(AlarmOffset::Min30),
            "1H" => Some(AlarmOffset::Hour1),
            "2H" => Some(AlarmOffset::Hour2),
            "12H" => Some(AlarmOffset::Hour12),
            "1D" => Some(AlarmOffset::Day1),
            "2D" => Some(AlarmOffset::Day2),
            "7D" => Some(AlarmOffset::Day7),
            _ => None,
        }
    }
}

/// Render the per-occurrence alarm fields for the event form.
///
/// Each token at index `i` becomes one alarm group. The portal's form
/// processor expects the day/hour/minute/before companion fields with these
/// exact constant values next to every trigger, and a trigger date pinned
/// to the event's calendar date at 09:00, independent of the token.
///
/// An unknown token aborts the whole call; no partial fragment is returned.
pub fn encode_alarms<S: AsRef<str>>(
    tokens: &[S],
    event_start: NaiveDate,
) -> Result<Vec<(String, String)>, ValidationError> {
    let mut parsed = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let offset =
            AlarmOffset::from_token(token).ok_or_else(|| ValidationError::InvalidMember {
                field: format!("alarm[{i}]"),
                value: token.to_string(),
            })?;
        parsed.push(offset);
    }

    let trigger_date = format!("{} 09:00", event_start.format("%d.%m.%Y"));
    let mut fields = Vec::with_capacity(parsed.len() * 6);
    for (i, offset) in parsed.iter().enumerate() {
        fields.push((format!("triggerType{i}"), offset.token().to_string()));
        fields.push((format!("triggerDay{i}"), "0".to_string()));
        fields.push((format!("triggerHour{i}"), "0".to_string()));
        fields.push((format!("triggerMinute{i}"), "15".to_string()));
        fields.push((format!("triggerBefore{i}"), "1".to_string()));
        fields.push((format!("triggerDate{i}"), trigger_date.clone()));
    }
    Ok(fields)
}
