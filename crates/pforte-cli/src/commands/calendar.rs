use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;
use pforte_core::api::calendar as calendar_api;
use pforte_core::calendar::{self, EventDraft};
use pforte_core::{EndType, IntervalType, MonthlyKind, RecurrenceSpec, Weekday};

use super::common;

#[derive(Subcommand)]
pub enum CalendarAction {
    /// List entries in a date window
    List {
        /// Window start, `DD.MM.YYYY`
        #[arg(long)]
        from: String,
        /// Window end, `DD.MM.YYYY`
        #[arg(long)]
        to: String,
    },
    /// Create an event
    Add {
        #[arg(long)]
        subject: String,
        /// Target calendar id
        #[arg(long)]
        calendar: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Start, `DD.MM.YYYY HH:MM`
        #[arg(long)]
        start: String,
        /// End, `DD.MM.YYYY HH:MM`
        #[arg(long)]
        end: String,
        #[arg(long)]
        whole_day: bool,
        /// Repeat: daily, weekdays, weekly, monthly, yearly
        #[arg(long)]
        repeat: Option<String>,
        /// Repeat every N units (1-30)
        #[arg(long)]
        interval: Option<u32>,
        /// Weekly repeat days, comma-separated (MON,WED,FRI)
        #[arg(long)]
        weekly_days: Option<String>,
        /// Monthly: repeat on this day of the month (1-31)
        #[arg(long)]
        monthly_day: Option<u32>,
        /// Monthly: 1-4 for first..fourth, -1 for last
        #[arg(long, allow_hyphen_values = true)]
        monthly_ordinal: Option<i32>,
        /// Monthly: weekday for the ordinal rule (MON..SUN)
        #[arg(long)]
        monthly_weekday: Option<String>,
        /// Stop after N occurrences
        #[arg(long)]
        end_count: Option<u32>,
        /// Stop at this date, `DD.MM.YYYY`
        #[arg(long)]
        until: Option<String>,
        /// Alarm offset before start (0M,5M,15M,30M,1H,2H,12H,1D,2D,7D); repeatable
        #[arg(long)]
        alarm: Vec<String>,
    },
    /// Delete an event by id
    Delete { id: String },
}

pub async fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = common::open_session().await?;
    match action {
        CalendarAction::List { from, to } => {
            let from = NaiveDate::parse_from_str(&from, "%d.%m.%Y")?;
            let to = NaiveDate::parse_from_str(&to, "%d.%m.%Y")?;
            for entry in calendar_api::list(&session, from, to).await? {
                let location = entry
                    .location
                    .as_deref()
                    .map(|l| format!(" @ {l}"))
                    .unwrap_or_default();
                println!(
                    "{}  {} - {}  {}{location}",
                    entry.id, entry.start, entry.end, entry.subject
                );
            }
        }
        CalendarAction::Add {
            subject,
            calendar: calendar_id,
            location,
            description,
            start,
            end,
            whole_day,
            repeat,
            interval,
            weekly_days,
            monthly_day,
            monthly_ordinal,
            monthly_weekday,
            end_count,
            until,
            alarm,
        } => {
            let recurrence = match repeat {
                Some(repeat) => Some(build_recurrence(
                    &repeat,
                    interval,
                    weekly_days.as_deref(),
                    monthly_day,
                    monthly_ordinal,
                    monthly_weekday.as_deref(),
                    end_count,
                    until,
                )?),
                None => None,
            };
            let draft = EventDraft {
                subject,
                calendar: calendar_id,
                location,
                description,
                start: NaiveDateTime::parse_from_str(&start, "%d.%m.%Y %H:%M")?,
                end: NaiveDateTime::parse_from_str(&end, "%d.%m.%Y %H:%M")?,
                whole_day,
                recurrence,
                alarms: alarm,
            };
            calendar::create_event(&session, &draft).await?;
            println!("event created");
        }
        CalendarAction::Delete { id } => {
            calendar::delete_event(&session, &id).await?;
            println!("event {id} deleted");
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_recurrence(
    repeat: &str,
    interval: Option<u32>,
    weekly_days: Option<&str>,
    monthly_day: Option<u32>,
    monthly_ordinal: Option<i32>,
    monthly_weekday: Option<&str>,
    end_count: Option<u32>,
    until: Option<String>,
) -> Result<RecurrenceSpec, Box<dyn std::error::Error>> {
    let interval_type = match repeat.to_ascii_lowercase().as_str() {
        "daily" => IntervalType::Daily,
        "weekdays" => IntervalType::Weekdays,
        "weekly" => IntervalType::Weekly,
        "monthly" => IntervalType::Monthly,
        "yearly" => IntervalType::Yearly,
        other => return Err(format!("unknown repeat '{other}'").into()),
    };

    let weekly_days = match weekly_days {
        Some(days) => days
            .split(',')
            .map(|d| d.trim().parse::<Weekday>())
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let monthly_kind = if monthly_day.is_some() {
        Some(MonthlyKind::ByMonthDay)
    } else if monthly_ordinal.is_some() || monthly_weekday.is_some() {
        Some(MonthlyKind::ByWeekdayOrdinal)
    } else {
        None
    };

    let end_type = if end_count.is_some() {
        EndType::Count
    } else if until.is_some() {
        EndType::Until
    } else {
        EndType::Never
    };

    let month_weekday = monthly_weekday
        .map(|w| w.parse::<Weekday>())
        .transpose()?;

    Ok(RecurrenceSpec {
        interval_type,
        interval,
        monthly_kind,
        month_day_of_month: monthly_day,
        month_ordinal: monthly_ordinal,
        month_weekday,
        weekly_days,
        end_type,
        end_count,
        until_date: until,
    })
}
