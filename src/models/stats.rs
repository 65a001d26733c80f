//! Quota statistics types.

use serde::{Deserialize, Serialize};

/// Whether a volunteer has met the month's quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaStatus {
    /// Fewer assignments than the minimum.
    Pending,
    /// At least the minimum number of assignments.
    Ok,
    /// Reserved; no rule currently produces it.
    Excess,
}

/// Assignment count and quota status for one volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerStats {
    /// The volunteer the numbers belong to.
    pub volunteer_id: String,
    /// Number of shifts the volunteer holds a seat in.
    pub count: usize,
    /// Quota status derived from `count`.
    pub status: QuotaStatus,
}

/// Statistics for every volunteer on the roster, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaReport {
    /// The minimum the statuses were computed against.
    pub minimum_required: usize,
    /// One entry per roster volunteer.
    pub stats: Vec<VolunteerStats>,
}

impl QuotaReport {
    /// Returns the entry for a volunteer.
    pub fn get(&self, volunteer_id: &str) -> Option<&VolunteerStats> {
        self.stats.iter().find(|s| s.volunteer_id == volunteer_id)
    }

    /// Returns the number of volunteers still below the minimum.
    pub fn pending_count(&self) -> usize {
        self.stats
            .iter()
            .filter(|s| s.status == QuotaStatus::Pending)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_status_serialization() {
        assert_eq!(serde_json::to_string(&QuotaStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&QuotaStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&QuotaStatus::Excess).unwrap(),
            "\"excess\""
        );
    }

    #[test]
    fn test_report_lookup_and_pending_count() {
        let report = QuotaReport {
            minimum_required: 2,
            stats: vec![
                VolunteerStats {
                    volunteer_id: "a".to_string(),
                    count: 2,
                    status: QuotaStatus::Ok,
                },
                VolunteerStats {
                    volunteer_id: "b".to_string(),
                    count: 0,
                    status: QuotaStatus::Pending,
                },
            ],
        };

        assert_eq!(report.get("a").unwrap().count, 2);
        assert!(report.get("c").is_none());
        assert_eq!(report.pending_count(), 1);
    }
}
