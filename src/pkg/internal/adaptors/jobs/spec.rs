use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const JOB_COLUMNS: &str = "id, owner_id, company, title, status, location, salary, url, notes, \
     applied_date, deadline, reminder_date, tags, created_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub owner_id: String,
    pub company: String,
    pub title: String,
    /// Raw stored value. Null reads as `applied`; unknown strings are kept as-is.
    pub status: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub applied_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub reminder_date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Applied,
        Status::Interviewing,
        Status::Offer,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "applied",
            Status::Interviewing => "interviewing",
            Status::Offer => "offer",
            Status::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Status a stored value counts as. Null is `applied`, unknown values count as nothing.
    pub fn of(raw: Option<&str>) -> Option<Status> {
        match raw {
            None => Some(Status::Applied),
            Some(raw) => Status::parse(raw),
        }
    }
}

impl JobApplication {
    pub fn status(&self) -> Option<Status> {
        Status::of(self.status.as_deref())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trimmed_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().filter_map(|t| trimmed(Some(t))).collect()
}

fn deserialize_some<'de, T, D>(deserializer: D) -> core::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub company: String,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: String,
    pub status: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub applied_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub reminder_date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

impl NewJob {
    /// Trims required text, stores blank optional text as null, defaults status to `applied`.
    pub fn normalized(self) -> Self {
        NewJob {
            company: self.company.trim().to_string(),
            title: self.title.trim().to_string(),
            status: trimmed(self.status).or_else(|| Some(Status::Applied.as_str().to_string())),
            location: trimmed(self.location),
            salary: trimmed(self.salary),
            url: trimmed(self.url),
            notes: trimmed(self.notes),
            tags: self.tags.map(trimmed_tags),
            ..self
        }
    }
}

/// Partial update. `None` leaves a column alone, `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub salary: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub applied_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub reminder_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub tags: Option<Option<Vec<String>>>,
}

impl JobPatch {
    pub fn normalized(self) -> Self {
        JobPatch {
            company: self.company.map(|c| c.trim().to_string()),
            title: self.title.map(|t| t.trim().to_string()),
            status: trimmed(self.status),
            location: self.location.map(trimmed),
            salary: self.salary.map(trimmed),
            url: self.url.map(trimmed),
            notes: self.notes.map(trimmed),
            tags: self.tags.map(|tags| tags.map(trimmed_tags)),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.title.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.salary.is_none()
            && self.url.is_none()
            && self.notes.is_none()
            && self.applied_date.is_none()
            && self.deadline.is_none()
            && self.reminder_date.is_none()
            && self.tags.is_none()
    }

    /// Applies the patch to an in-memory record the same way the store's UPDATE does.
    pub fn apply_to(self, job: &mut JobApplication) {
        if let Some(company) = self.company {
            job.company = company;
        }
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(status) = self.status {
            job.status = Some(status);
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(salary) = self.salary {
            job.salary = salary;
        }
        if let Some(url) = self.url {
            job.url = url;
        }
        if let Some(notes) = self.notes {
            job.notes = notes;
        }
        if let Some(applied_date) = self.applied_date {
            job.applied_date = applied_date;
        }
        if let Some(deadline) = self.deadline {
            job.deadline = deadline;
        }
        if let Some(reminder_date) = self.reminder_date {
            job.reminder_date = reminder_date;
        }
        if let Some(tags) = self.tags {
            job.tags = tags;
        }
    }
}
