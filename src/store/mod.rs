use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::error;
use tokio::sync::Mutex;

use crate::models::employee::{Employee, EmployeeChanges};

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    DuplicateEmail,
    Corrupt(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "no employee with that id"),
            StoreError::DuplicateEmail => write!(f, "email already taken"),
            StoreError::Corrupt(err) => write!(f, "backing file is not valid JSON: {}", err),
            StoreError::Io(err) => write!(f, "backing file I/O failed: {}", err),
        }
    }
}

// The whole employee list, held in memory and rewritten to the backing file
// after every mutation. The mutex makes uniqueness check + mutation + file
// write one unit, so two in-flight writes cannot interleave.
#[derive(Debug)]
pub struct EmployeeStore {
    path: PathBuf,
    records: Mutex<Vec<Employee>>,
}

impl EmployeeStore {
    // Loads the backing file once at startup. A missing or empty file starts
    // an empty directory; existing but malformed content is fatal.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(StoreError::Corrupt)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(EmployeeStore {
            path,
            records: Mutex::new(records),
        })
    }

    pub async fn list_active(&self) -> Vec<Employee> {
        let records = self.records.lock().await;
        records.iter().filter(|e| !e.is_deleted).cloned().collect()
    }

    // Lookup by id ignores the deletion flag.
    pub async fn find_by_id(&self, id: &str) -> Option<Employee> {
        let records = self.records.lock().await;
        records.iter().find(|e| e.id == id).cloned()
    }

    // Appends a new record. Emails are stored lowercased, so the uniqueness
    // check is a plain comparison; deleted records count too.
    pub async fn insert(&self, employee: Employee) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        if records.iter().any(|e| e.email == employee.email) {
            return Err(StoreError::DuplicateEmail);
        }
        records.push(employee);
        self.persist(&records).await
    }

    pub async fn update(&self, id: &str, changes: EmployeeChanges) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let idx = records
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        if records
            .iter()
            .any(|e| e.id != id && e.email == changes.email)
        {
            return Err(StoreError::DuplicateEmail);
        }

        let employee = &mut records[idx];
        employee.fname = changes.fname;
        employee.lname = changes.lname;
        employee.email = changes.email;
        employee.dob = changes.dob;
        employee.country = changes.country;
        if let Some(avatar) = changes.avatar {
            employee.avatar = avatar;
        }
        self.persist(&records).await
    }

    // Flag flip only; records are never removed, and re-deleting an already
    // deleted record succeeds.
    pub async fn soft_delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let idx = records
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        records[idx].is_deleted = true;
        self.persist(&records).await
    }

    // Serializes the full list and swaps it in via temp file + rename so the
    // backing file never holds a partial write. On failure the in-memory
    // list is left as mutated: memory runs ahead of disk until the next
    // successful persist.
    async fn persist(&self, records: &[Employee]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(StoreError::Corrupt)?;
        let tmp = self.path.with_extension("json.tmp");
        let written = async {
            tokio::fs::write(&tmp, &raw).await?;
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;
        if let Err(err) = written {
            error!("Failed to persist employee list to {:?}: {}", self.path, err);
            return Err(StoreError::Io(err));
        }
        Ok(())
    }
}
