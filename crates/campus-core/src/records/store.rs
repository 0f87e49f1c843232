//! Read-only student record store.
//!
//! Built once at startup from a JSON object keyed by student id, validated, and
//! never written again. Iteration follows the dataset's listing order; lookups
//! go through a hash map.

use std::collections::HashMap;
use std::path::Path;

use super::model::{Certificate, StudentRecord};
use crate::error::ConfigurationError;
use crate::shared::CoreConfig;

/// Dataset compiled into the binary.
const EMBEDDED_DATASET: &str = include_str!("../../data/students.json");

/// Immutable mapping from student id to [`StudentRecord`].
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: HashMap<String, StudentRecord>,
    /// Student ids in dataset order.
    order: Vec<String>,
}

impl RecordStore {
    /// Store built from the embedded dataset.
    pub fn embedded() -> Result<Self, ConfigurationError> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    /// Store for the configured dataset: `dataset_path` when set, else the embedded one.
    pub fn for_config(config: &CoreConfig) -> Result<Self, ConfigurationError> {
        match config.dataset_path.as_deref() {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Store built from a JSON dataset file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json_str(&text)?;
        tracing::debug!(
            target: "campus::records",
            path = %path.as_ref().display(),
            "Dataset read from file"
        );
        Ok(store)
    }

    /// Parses and validates a dataset. Any malformed record rejects the whole dataset.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigurationError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

        let mut records = HashMap::with_capacity(raw.len());
        let mut order = Vec::with_capacity(raw.len());
        // cert_id -> owning student id
        let mut cert_owners: HashMap<String, String> = HashMap::new();

        for (student_id, value) in raw {
            if student_id.trim().is_empty() {
                return Err(ConfigurationError::EmptyStudentId);
            }
            let mut record: StudentRecord =
                serde_json::from_value(value).map_err(|source| ConfigurationError::InvalidRecord {
                    student_id: student_id.clone(),
                    source,
                })?;
            validate_record(&student_id, &record)?;

            for cert in &record.certificates {
                if let Some(first_owner) = cert_owners.insert(cert.cert_id.clone(), student_id.clone()) {
                    return Err(ConfigurationError::DuplicateCertificate {
                        cert_id: cert.cert_id.clone(),
                        first_owner,
                        second_owner: student_id.clone(),
                    });
                }
            }

            if record.attendance.percentage.is_none() {
                record.attendance.percentage = Some(record.attendance.derived_percentage());
            }

            order.push(student_id.clone());
            records.insert(student_id, record);
        }

        tracing::info!(
            target: "campus::records",
            students = order.len(),
            certificates = cert_owners.len(),
            "Record store loaded"
        );
        Ok(Self { records, order })
    }

    /// Exact, case-sensitive lookup by student id.
    pub fn lookup(&self, student_id: &str) -> Option<&StudentRecord> {
        self.records.get(student_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Student ids in dataset order.
    pub fn student_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every certificate with its owner, in dataset order (students, then each student's list).
    pub fn certificates(&self) -> impl Iterator<Item = (&str, &Certificate)> {
        self.order.iter().filter_map(move |id| {
            self.records
                .get(id)
                .map(|record| record.certificates.iter().map(move |cert| (id.as_str(), cert)))
        })
        .flatten()
    }

    /// Total number of certificates across all students.
    pub fn certificate_count(&self) -> usize {
        self.records.values().map(|r| r.certificates.len()).sum()
    }
}

fn validate_record(student_id: &str, record: &StudentRecord) -> Result<(), ConfigurationError> {
    let fees = &record.fees;
    if !fees.is_balanced() {
        return Err(ConfigurationError::FeesMismatch {
            student_id: student_id.to_string(),
            total: fees.total,
            paid: fees.paid,
            due: fees.due,
        });
    }
    let attendance = &record.attendance;
    if attendance.attended > attendance.classes_held {
        return Err(ConfigurationError::AttendanceExceedsHeld {
            student_id: student_id.to_string(),
            classes_held: attendance.classes_held,
            attended: attendance.attended,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn student_json(name: &str, certs: &[&str]) -> String {
        let certs: Vec<String> = certs
            .iter()
            .map(|id| format!(r#"{{ "id": "{}", "name": "Course {}" }}"#, id, id))
            .collect();
        format!(
            r#"{{
                "name": "{name}",
                "fees": {{ "total": 1000, "paid": 400, "due": 600 }},
                "attendance": {{ "classes_held": 10, "attended": 7 }},
                "hostel": {{ "block": "C", "room": "12", "mess": "Veg" }},
                "library": {{ "books_issued": [], "fine": 0 }},
                "placement": {{ "company": "Acme", "role": "Intern", "package": 4.0 }},
                "certificates": [{certs}]
            }}"#,
            name = name,
            certs = certs.join(", ")
        )
    }

    #[test]
    fn embedded_dataset_loads_both_students() {
        let store = RecordStore::embedded().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.student_ids().collect::<Vec<_>>(), vec!["101", "102"]);
        assert_eq!(store.lookup("101").unwrap().name, "Aarav Sharma");
        assert_eq!(store.lookup("102").unwrap().name, "Meera Nair");
        assert_eq!(store.certificate_count(), 3);
    }

    #[test]
    fn embedded_records_hold_fee_and_attendance_invariants() {
        let store = RecordStore::embedded().unwrap();
        for id in store.student_ids() {
            let record = store.lookup(id).unwrap();
            assert_eq!(record.fees.paid + record.fees.due, record.fees.total, "student {}", id);
            assert!(record.attendance.attended <= record.attendance.classes_held, "student {}", id);
        }
    }

    #[test]
    fn lookup_is_exact_match() {
        let store = RecordStore::embedded().unwrap();
        assert!(store.lookup("101").is_some());
        assert!(store.lookup(" 101").is_none());
        assert!(store.lookup("1010").is_none());
        assert!(store.lookup("999").is_none());
    }

    #[test]
    fn legacy_dataset_spellings_are_accepted() {
        let store = RecordStore::embedded().unwrap();
        let record = store.lookup("101").unwrap();
        assert_eq!(record.placement.company, "Infosys");
        assert_eq!(record.certificates[0].cert_id, "CERT-2024-001");
        assert_eq!(record.attendance.percentage(), 91.6);
    }

    #[test]
    fn certificates_iterate_in_listed_order() {
        let store = RecordStore::embedded().unwrap();
        let ids: Vec<(&str, &str)> = store
            .certificates()
            .map(|(owner, cert)| (owner, cert.cert_id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![("101", "CERT-2024-001"), ("101", "CERT-2024-002"), ("102", "CERT-2024-003")]
        );
    }

    #[test]
    fn missing_percentage_is_derived() {
        let text = format!(r#"{{ "201": {} }}"#, student_json("Test", &[]));
        let store = RecordStore::from_json_str(&text).unwrap();
        assert_eq!(store.lookup("201").unwrap().attendance.percentage, Some(70.0));
    }

    #[test]
    fn fee_mismatch_is_rejected() {
        let text = format!(r#"{{ "201": {} }}"#, student_json("Test", &[]))
            .replace(r#""due": 600"#, r#""due": 500"#);
        let err = RecordStore::from_json_str(&text).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::FeesMismatch { ref student_id, total: 1000, paid: 400, due: 500 } if student_id == "201"
        ));
    }

    #[test]
    fn attendance_above_classes_held_is_rejected() {
        let text = format!(r#"{{ "201": {} }}"#, student_json("Test", &[]))
            .replace(r#""attended": 7"#, r#""attended": 11"#);
        let err = RecordStore::from_json_str(&text).unwrap_err();
        assert!(matches!(err, ConfigurationError::AttendanceExceedsHeld { attended: 11, .. }));
    }

    #[test]
    fn duplicate_certificate_across_students_is_rejected() {
        let text = format!(
            r#"{{ "201": {}, "202": {} }}"#,
            student_json("First", &["CERT-X"]),
            student_json("Second", &["CERT-Y", "CERT-X"])
        );
        let err = RecordStore::from_json_str(&text).unwrap_err();
        match err {
            ConfigurationError::DuplicateCertificate { cert_id, first_owner, second_owner } => {
                assert_eq!(cert_id, "CERT-X");
                assert_eq!(first_owner, "201");
                assert_eq!(second_owner, "202");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_field_names_the_student() {
        let text = format!(r#"{{ "201": {} }}"#, student_json("Test", &[]))
            .replace(r#""hostel": { "block": "C", "room": "12", "mess": "Veg" },"#, "");
        let err = RecordStore::from_json_str(&text).unwrap_err();
        match err {
            ConfigurationError::InvalidRecord { student_id, source } => {
                assert_eq!(student_id, "201");
                assert!(source.to_string().contains("hostel"), "{}", source);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_student_id_and_bad_json_are_rejected() {
        let text = format!(r#"{{ "": {} }}"#, student_json("Test", &[]));
        assert!(matches!(
            RecordStore::from_json_str(&text),
            Err(ConfigurationError::EmptyStudentId)
        ));
        assert!(matches!(
            RecordStore::from_json_str("[1, 2, 3]"),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn from_path_reads_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "301": {} }}"#, student_json("File Student", &["CERT-F"])).unwrap();

        let store = RecordStore::from_path(&path).unwrap();
        assert_eq!(store.lookup("301").unwrap().name, "File Student");

        let missing = RecordStore::from_path(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(ConfigurationError::Io(_))));
    }

    #[test]
    fn for_config_prefers_dataset_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, format!(r#"{{ "401": {} }}"#, student_json("Configured", &[]))).unwrap();

        let mut config = CoreConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(RecordStore::for_config(&config).unwrap().len(), 2);

        config.dataset_path = Some(path.to_string_lossy().into_owned());
        let store = RecordStore::for_config(&config).unwrap();
        assert_eq!(store.student_ids().collect::<Vec<_>>(), vec!["401"]);
    }
}
