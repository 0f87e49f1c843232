//! Student record shapes as they appear in the dataset.

use serde::{Deserialize, Serialize};

/// One student's full record. Keyed by student id in the [`RecordStore`](super::RecordStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub fees: Fees,
    pub attendance: Attendance,
    pub hostel: Hostel,
    pub library: Library,
    #[serde(alias = "placements")]
    pub placement: Placement,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

/// Fee account in rupees. `paid + due == total` is checked when the store is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    pub total: u64,
    pub paid: u64,
    pub due: u64,
}

impl Fees {
    pub fn is_balanced(&self) -> bool {
        self.paid.checked_add(self.due) == Some(self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub classes_held: u32,
    pub attended: u32,
    /// Stored percentage. Filled from the counts at load time when the dataset omits it.
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl Attendance {
    /// Percentage from the counts, rounded to one decimal. `0.0` when no classes were held.
    pub fn derived_percentage(&self) -> f64 {
        if self.classes_held == 0 {
            return 0.0;
        }
        let raw = f64::from(self.attended) / f64::from(self.classes_held) * 100.0;
        (raw * 10.0).round() / 10.0
    }

    /// Stored percentage, or the derived one.
    pub fn percentage(&self) -> f64 {
        self.percentage.unwrap_or_else(|| self.derived_percentage())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hostel {
    pub block: String,
    pub room: String,
    pub mess: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub books_issued: Vec<String>,
    #[serde(default)]
    pub fine: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub company: String,
    pub role: String,
    /// Offer in lakhs per annum.
    pub package: f64,
}

/// Certificate held by a student. `cert_id` is unique across the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(alias = "id")]
    pub cert_id: String,
    pub name: String,
}
