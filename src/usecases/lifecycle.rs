use chrono::{DateTime, Utc};

use crate::domain::entities::subscriptions::SubscriptionEntity;
use crate::domain::value_objects::enums::{
    severity_levels::SeverityLevel, subscription_statuses::SubscriptionStatus,
};
use crate::domain::value_objects::subscriptions::{RemainingLabel, RemainingTime};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;

/// Classifies a subscription against `now`: display status plus a cascading
/// days/hours/minutes breakdown of the time left and the percentage of the
/// window still ahead.
///
/// Read-only. A subscription past its end date is reported as expired even
/// while the stored status column still says otherwise; rewriting the
/// stored column is the reconciliation job's business, not ours.
pub fn classify(subscription: &SubscriptionEntity, now: DateTime<Utc>) -> RemainingTime {
    let stored_status = SubscriptionStatus::from_str(&subscription.status);

    let Some(ends_at) = subscription.ends_at else {
        // No fixed duration: degenerate zero-width window.
        return RemainingTime {
            status: stored_status,
            days: 0,
            hours: 0,
            minutes: 0,
            percent: 0,
        };
    };

    let total_ms = (ends_at - subscription.starts_at).num_milliseconds();
    let left_ms = (ends_at - now).num_milliseconds();

    if left_ms <= 0 {
        return RemainingTime {
            status: SubscriptionStatus::Expired,
            days: 0,
            hours: 0,
            minutes: 0,
            percent: 0,
        };
    }

    let days = left_ms / MS_PER_DAY;
    let hours = left_ms % MS_PER_DAY / MS_PER_HOUR;
    let minutes = left_ms % MS_PER_HOUR / MS_PER_MINUTE;

    // total_ms <= 0 happens only on malformed rows (end before start);
    // report 0% rather than divide by a non-positive window.
    let percent = if total_ms <= 0 {
        0
    } else {
        (100.0 * left_ms as f64 / total_ms as f64)
            .round()
            .clamp(0.0, 100.0) as u8
    };

    RemainingTime {
        status: stored_status,
        days,
        hours,
        minutes,
        percent,
    }
}

/// Human-readable counterpart of [`classify`] for list and table rows.
pub fn describe_remaining(ends_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> RemainingLabel {
    let Some(ends_at) = ends_at else {
        return RemainingLabel {
            text: "no expiration date set".to_string(),
            severity: None,
        };
    };

    if ends_at < now {
        let days_ago = (now - ends_at).num_milliseconds() / MS_PER_DAY;
        return RemainingLabel {
            text: format!("expired {days_ago} day(s) ago"),
            severity: Some(SeverityLevel::Expired),
        };
    }

    let diff_ms = (ends_at - now).num_milliseconds();
    let days = diff_ms / MS_PER_DAY;
    let hours = diff_ms % MS_PER_DAY / MS_PER_HOUR;
    let minutes = diff_ms % MS_PER_HOUR / MS_PER_MINUTE;

    if days > 30 {
        return RemainingLabel {
            text: format!("{} month(s) remaining", days / 30),
            severity: Some(SeverityLevel::Safe),
        };
    }

    if days > 0 {
        if days < 7 {
            let severity = if days < 3 {
                SeverityLevel::Critical
            } else {
                SeverityLevel::Alert
            };
            return RemainingLabel {
                text: format!("{days} day(s) and {hours}h remaining"),
                severity: Some(severity),
            };
        }

        let severity = if days < 15 {
            SeverityLevel::Alert
        } else {
            SeverityLevel::Ok
        };
        return RemainingLabel {
            text: format!("{days} day(s) remaining"),
            severity: Some(severity),
        };
    }

    if hours > 0 {
        return RemainingLabel {
            text: format!("{hours}h and {minutes}min remaining"),
            severity: Some(SeverityLevel::Critical),
        };
    }

    RemainingLabel {
        text: format!("{minutes} minute(s) remaining"),
        severity: Some(SeverityLevel::Critical),
    }
}
