//! Student records: dataset model and the read-only store built from it.

mod model;
mod store;

pub use model::{Attendance, Certificate, Fees, Hostel, Library, Placement, StudentRecord};
pub use store::RecordStore;
