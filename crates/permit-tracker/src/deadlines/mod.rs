//! Regulatory deadline calculation for permit projects.
//!
//! Deadlines are derived on demand from a project's milestone dates and a
//! reference date. Nothing here is persisted and nothing here can fail: every
//! input is optional and the arithmetic saturates at the edge of the calendar.

mod clock;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub use clock::{Clock, FixedClock, SystemClock};

/// Days after submission before a pending application is considered abandoned.
pub const ABANDONMENT_DAYS: u32 = 180;
/// Warning window ahead of the abandonment date.
pub const ABANDONMENT_WARNING_DAYS: u32 = 30;
/// Days an issued building permit stays valid.
pub const PERMIT_VALIDITY_DAYS: u32 = 365;
/// Warning window ahead of permit expiration.
pub const EXPIRY_WARNING_DAYS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    Abandonment,
    PermitExpiry,
    Inspection,
    ResponseDue,
}

impl DeadlineKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Abandonment => "Application Abandonment",
            Self::PermitExpiry => "Permit Expiration",
            Self::Inspection => "Inspection",
            Self::ResponseDue => "Response Due",
        }
    }
}

/// Three-way urgency classification consumed by every presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    Urgent,
    Warning,
    Normal,
}

impl DeadlineStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Warning => "Warning",
            Self::Normal => "Normal",
        }
    }

    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::Urgent | Self::Warning)
    }
}

/// Milestone dates a deadline calculation starts from.
///
/// `last_action_at` is carried for a future response-due rule and is not read
/// by any current rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineInputs {
    #[serde(default)]
    pub submitted_at: Option<NaiveDate>,
    #[serde(default)]
    pub permit_issued_at: Option<NaiveDate>,
    #[serde(default)]
    pub last_action_at: Option<NaiveDate>,
}

/// A dated obligation computed for a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deadline {
    #[serde(rename = "type")]
    kind: DeadlineKind,
    date: NaiveDate,
    days_remaining: i64,
    is_urgent: bool,
    is_overdue: bool,
    description: String,
    action_required: String,
}

impl Deadline {
    pub fn kind(&self) -> DeadlineKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Signed whole days until the deadline; negative once it has passed.
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining
    }

    pub fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn action_required(&self) -> &str {
        &self.action_required
    }

    pub fn status(&self) -> DeadlineStatus {
        deadline_status(self)
    }

    pub fn to_view(&self) -> DeadlineView {
        let status = self.status();
        DeadlineView {
            deadline: self.clone(),
            status,
            status_label: status.label(),
        }
    }
}

/// Deadline paired with its classification for API and report output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineView {
    #[serde(flatten)]
    pub deadline: Deadline,
    pub status: DeadlineStatus,
    pub status_label: &'static str,
}

/// Windows used by the deadline rules. `Default` carries the county values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    pub abandonment_days: u32,
    pub abandonment_warning_days: u32,
    pub permit_validity_days: u32,
    pub expiry_warning_days: u32,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            abandonment_days: ABANDONMENT_DAYS,
            abandonment_warning_days: ABANDONMENT_WARNING_DAYS,
            permit_validity_days: PERMIT_VALIDITY_DAYS,
            expiry_warning_days: EXPIRY_WARNING_DAYS,
        }
    }
}

impl DeadlinePolicy {
    /// Derive every applicable deadline, ordered by date.
    pub fn calculate(&self, inputs: &DeadlineInputs, today: NaiveDate) -> Vec<Deadline> {
        let mut deadlines = Vec::with_capacity(2);

        if let (Some(submitted_at), None) = (inputs.submitted_at, inputs.permit_issued_at) {
            deadlines.push(self.abandonment(submitted_at, today));
        }

        if let Some(issued_at) = inputs.permit_issued_at {
            deadlines.push(self.permit_expiry(issued_at, today));
        }

        deadlines.sort_by_key(|deadline| deadline.date);
        deadlines
    }

    fn abandonment(&self, submitted_at: NaiveDate, today: NaiveDate) -> Deadline {
        let date = add_days(submitted_at, self.abandonment_days);
        let days_remaining = days_between(today, date);
        let is_overdue = days_remaining < 0;

        let action_required = if is_overdue {
            "Contact permit office immediately - application may be abandoned"
        } else {
            "Respond to any county requests for information"
        };

        Deadline {
            kind: DeadlineKind::Abandonment,
            date,
            days_remaining,
            is_urgent: is_overdue || days_remaining <= i64::from(self.abandonment_warning_days),
            is_overdue,
            description: format!("Application abandonment deadline: {}", display_date(date)),
            action_required: action_required.to_string(),
        }
    }

    fn permit_expiry(&self, issued_at: NaiveDate, today: NaiveDate) -> Deadline {
        let date = add_days(issued_at, self.permit_validity_days);
        let days_remaining = days_between(today, date);
        let is_overdue = days_remaining < 0;
        let within_warning = days_remaining <= i64::from(self.expiry_warning_days);

        let action_required = if is_overdue {
            "Permit expired - contact office about starting over"
        } else if within_warning {
            "Request permit extension before expiration"
        } else {
            "Complete work and schedule final inspection"
        };

        Deadline {
            kind: DeadlineKind::PermitExpiry,
            date,
            days_remaining,
            is_urgent: is_overdue || within_warning,
            is_overdue,
            description: format!("Building permit expires: {}", display_date(date)),
            action_required: action_required.to_string(),
        }
    }
}

/// Compute deadlines with the county's standard windows.
pub fn calculate_deadlines(inputs: &DeadlineInputs, today: NaiveDate) -> Vec<Deadline> {
    DeadlinePolicy::default().calculate(inputs, today)
}

pub fn deadline_status(deadline: &Deadline) -> DeadlineStatus {
    if deadline.is_overdue {
        DeadlineStatus::Urgent
    } else if deadline.is_urgent {
        DeadlineStatus::Warning
    } else {
        DeadlineStatus::Normal
    }
}

/// Keep deadlines that are urgent or overdue, preserving their order.
pub fn urgent_deadlines(deadlines: &[Deadline]) -> Vec<Deadline> {
    deadlines
        .iter()
        .filter(|deadline| deadline.is_urgent || deadline.is_overdue)
        .cloned()
        .collect()
}

fn add_days(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
