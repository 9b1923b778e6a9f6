//! Pure date and time labels for the rendered message list.
//!
//! Every function takes the viewer's "now" explicitly so the output only
//! depends on its arguments.

use super::{Message, MessageTimestamp, SelectionSet};
use crate::session::domain::UserId;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt;

/// Time label of a message the store has not stamped yet.
pub const SENDING_LABEL: &str = "Sending...";
/// Time label of a stored value that is not an instant.
pub const INVALID_TIME_LABEL: &str = "Invalid Time";
/// Date label of a message without a resolved day.
pub const LOADING_LABEL: &str = "Loading...";
/// Date label for the viewer's current day.
pub const TODAY_LABEL: &str = "Today";
/// Date label for the day before the viewer's current day.
pub const YESTERDAY_LABEL: &str = "Yesterday";
/// Text shown instead of the list when a conversation has no messages.
pub const EMPTY_CONVERSATION_PLACEHOLDER: &str = "No messages yet. Start the conversation!";

const TIME_FORMAT: &str = "%I:%M %p";
const DATE_FORMAT: &str = "%d %b %Y";

/// Formats the hour and minute of a message in `tz`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pairchat::chat::domain::{MessageTimestamp, format_time};
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 0).unwrap();
/// assert_eq!(format_time(&MessageTimestamp::Resolved(at), &Utc), "03:04 PM");
/// assert_eq!(format_time(&MessageTimestamp::Pending, &Utc), "Sending...");
/// ```
#[must_use]
pub fn format_time<Tz>(timestamp: &MessageTimestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match timestamp {
        MessageTimestamp::Pending => SENDING_LABEL.to_owned(),
        MessageTimestamp::Invalid(_) => INVALID_TIME_LABEL.to_owned(),
        MessageTimestamp::Resolved(at) => at.with_timezone(tz).format(TIME_FORMAT).to_string(),
    }
}

/// Labels the day of a message relative to `now`.
///
/// Returns `Today`, `Yesterday` or a `dd Mon yyyy` date, and `Loading...`
/// while the timestamp is unresolved.
#[must_use]
pub fn date_label<Tz>(timestamp: &MessageTimestamp, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    local_day(timestamp, &now.timezone())
        .map_or_else(|| LOADING_LABEL.to_owned(), |day| day_label(day, now))
}

/// Returns the calendar day of a resolved timestamp in `tz`.
#[must_use]
pub fn local_day<Tz: TimeZone>(timestamp: &MessageTimestamp, tz: &Tz) -> Option<NaiveDate> {
    timestamp
        .resolved()
        .map(|at| at.with_timezone(tz).date_naive())
}

fn day_label<Tz: TimeZone>(day: NaiveDate, now: &DateTime<Tz>) -> String {
    let today = now.date_naive();
    if day == today {
        TODAY_LABEL.to_owned()
    } else if today.pred_opt() == Some(day) {
        YESTERDAY_LABEL.to_owned()
    } else {
        day.format(DATE_FORMAT).to_string()
    }
}

/// Options controlling timeline layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Emit a separator before the very first message as well.
    pub leading_separator: bool,
}

/// Inputs for laying out a timeline.
#[derive(Debug, Clone)]
pub struct TimelineContext<'a, Tz: TimeZone> {
    /// Viewer's current time; its zone is the display zone.
    pub now: DateTime<Tz>,
    /// Signed-in user, used to tell own messages apart.
    pub viewer: Option<&'a UserId>,
    /// Current selection.
    pub selection: &'a SelectionSet,
    /// Layout options.
    pub options: TimelineOptions,
}

/// One row of the rendered conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEntry<'a> {
    /// Day boundary.
    Separator {
        /// Date label.
        label: String,
        /// Day the separator introduces, `None` for an unresolved day.
        day: Option<NaiveDate>,
    },
    /// A message bubble.
    Message {
        /// The message.
        message: &'a Message,
        /// Time label.
        time_label: String,
        /// Whether the viewer sent the message.
        from_viewer: bool,
        /// Whether the message is selected.
        selected: bool,
    },
}

impl TimelineEntry<'_> {
    /// Returns `true` for day separators.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator { .. })
    }
}

/// Lays out an ordered message list with day separators.
///
/// A separator precedes each message whose local day differs from the day
/// of the nearest preceding resolved message. Unresolved messages never
/// start a day.
#[must_use]
pub fn build_timeline<'a, Tz>(
    messages: &'a [Message],
    context: &TimelineContext<'_, Tz>,
) -> Vec<TimelineEntry<'a>>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let tz = context.now.timezone();
    let mut entries = Vec::with_capacity(messages.len().saturating_mul(2));
    let mut previous_day: Option<NaiveDate> = None;

    for (index, message) in messages.iter().enumerate() {
        let day = local_day(message.timestamp(), &tz);
        let leading = index == 0 && context.options.leading_separator;
        let starts_day = match (day, previous_day) {
            (Some(current), Some(previous)) => current != previous,
            (Some(_), None) | (None, _) => leading,
        };
        if starts_day {
            entries.push(TimelineEntry::Separator {
                label: date_label(message.timestamp(), &context.now),
                day,
            });
        }
        if day.is_some() {
            previous_day = day;
        }

        entries.push(TimelineEntry::Message {
            message,
            time_label: format_time(message.timestamp(), &tz),
            from_viewer: context
                .viewer
                .is_some_and(|viewer| message.is_from(viewer)),
            selected: context.selection.contains(message.id()),
        });
    }
    entries
}
