use std::fmt;

use chrono::NaiveDate;

use crate::api::Time;

/// How long ago something was posted, as shown next to a comment
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelativeTime {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Date(NaiveDate),
}

// Rounds half up, for any sign
fn div_round(a: i64, b: i64) -> i64 {
    (2 * a + b).div_euclid(2 * b)
}

impl RelativeTime {
    pub fn between(date: Time, now: Time) -> RelativeTime {
        let seconds = div_round((now - date).num_milliseconds(), 1000);
        let minutes = div_round(seconds, 60);
        let hours = div_round(minutes, 60);
        let days = div_round(hours, 24);
        if seconds < 60 {
            RelativeTime::JustNow
        } else if minutes < 60 {
            RelativeTime::Minutes(minutes)
        } else if hours < 24 {
            RelativeTime::Hours(hours)
        } else if days < 7 {
            RelativeTime::Days(days)
        } else {
            RelativeTime::Date(date.date_naive())
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: i64| if n == 1 { "" } else { "s" };
        match self {
            RelativeTime::JustNow => write!(f, "just now"),
            RelativeTime::Minutes(n) => write!(f, "{n} minute{} ago", plural(*n)),
            RelativeTime::Hours(n) => write!(f, "{n} hour{} ago", plural(*n)),
            RelativeTime::Days(n) => write!(f, "{n} day{} ago", plural(*n)),
            RelativeTime::Date(d) => write!(f, "{}", d.format("%B %-d, %Y")),
        }
    }
}
