use serde::{Deserialize, Serialize};

use super::adaptors::jobs::spec::{JobApplication, Status};

const ALL: &str = "all";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ListingQuery {
    /// `all`, or a raw status value matched exactly.
    pub status: Option<String>,
    /// Case-insensitive substring over title, company and location.
    pub q: Option<String>,
}

impl ListingQuery {
    fn status_filter(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != ALL)
    }

    fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn is_filtered(&self) -> bool {
        self.status_filter().is_some() || self.search_term().is_some()
    }

    /// A null status does not match `applied` here, unlike in the dashboard counts.
    pub fn matches(&self, job: &JobApplication) -> bool {
        let status_ok = match self.status_filter() {
            Some(wanted) => job.status.as_deref() == Some(wanted),
            None => true,
        };
        let search_ok = match self.search_term() {
            Some(term) => {
                let term = term.to_lowercase();
                job.title.to_lowercase().contains(&term)
                    || job.company.to_lowercase().contains(&term)
                    || job
                        .location
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(&term))
            }
            None => true,
        };
        status_ok && search_ok
    }

    pub fn apply(&self, jobs: &[JobApplication]) -> Vec<JobApplication> {
        jobs.iter().filter(|job| self.matches(job)).cloned().collect()
    }

    pub fn headline(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.search_term().map(|t| format!("Search results for \"{}\"", t)),
            self.status_filter().map(|s| format!("Filtered by {} status", s)),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn empty_message(&self) -> &'static str {
        if self.is_filtered() {
            "No applications found"
        } else {
            "No job applications yet"
        }
    }
}

/// Badge variant for a stored status; anything unrecognised renders as `applied`.
pub fn badge_variant(raw: Option<&str>) -> Status {
    raw.and_then(Status::parse).unwrap_or(Status::Applied)
}

/// Text shown for a stored status. Unknown values are shown verbatim.
pub fn status_label(raw: Option<&str>) -> &str {
    match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => Status::Applied.as_str(),
    }
}

pub fn normalize_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedJob {
    #[serde(flatten)]
    pub job: JobApplication,
    pub status_label: String,
    pub badge: Status,
    pub link: Option<String>,
}

impl From<JobApplication> for ListedJob {
    fn from(job: JobApplication) -> Self {
        ListedJob {
            status_label: status_label(job.status.as_deref()).to_string(),
            badge: badge_variant(job.status.as_deref()),
            link: job.url.as_deref().map(normalize_url),
            job,
        }
    }
}
