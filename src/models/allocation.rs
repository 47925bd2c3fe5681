//! Allocation plan model
//!
//! An allocation plan is the user's list of named percentage-of-income
//! targets. "Daily Expenses" and "Leftover" are never stored here; they are
//! computed rows that always accompany the plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names reserved for the computed allocation rows
pub const RESERVED_BUCKET_NAMES: [&str; 3] = ["Leftover", "Daily Expenses", "Total allocated"];

/// A named savings or spending target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationBucket {
    pub name: String,
    /// Share of income in percentage points (20 means 20%)
    pub percent_share: f64,
}

impl AllocationBucket {
    pub fn new(name: impl Into<String>, percent_share: f64) -> Self {
        Self {
            name: name.into(),
            percent_share,
        }
    }

    /// Share as a fraction of income
    pub fn fraction(&self) -> f64 {
        if self.percent_share.is_finite() {
            self.percent_share / 100.0
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AllocationValidationError::EmptyName);
        }
        if RESERVED_BUCKET_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(name))
        {
            return Err(AllocationValidationError::ReservedName(name.to_string()));
        }
        if !self.percent_share.is_finite() || self.percent_share < 0.0 {
            return Err(AllocationValidationError::InvalidPercent(self.percent_share));
        }
        Ok(())
    }
}

/// The ordered list of manual allocation buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPlan {
    #[serde(default)]
    pub buckets: Vec<AllocationBucket>,
    pub updated_at: DateTime<Utc>,
}

impl Default for AllocationPlan {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

impl AllocationPlan {
    pub fn new(buckets: Vec<AllocationBucket>) -> Self {
        Self {
            buckets,
            updated_at: Utc::now(),
        }
    }

    /// Find a bucket by name, case-insensitively
    pub fn find(&self, name: &str) -> Option<&AllocationBucket> {
        let name = name.trim();
        self.buckets
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Insert a new bucket at the end, or update the share of an existing one.
    ///
    /// Returns the previous share when the bucket already existed.
    pub fn set(
        &mut self,
        name: &str,
        percent_share: f64,
    ) -> Result<Option<f64>, AllocationValidationError> {
        let candidate = AllocationBucket::new(name.trim(), percent_share);
        candidate.validate()?;

        let previous = match self
            .buckets
            .iter_mut()
            .find(|b| b.name.eq_ignore_ascii_case(&candidate.name))
        {
            Some(existing) => {
                let previous = existing.percent_share;
                existing.percent_share = percent_share;
                Some(previous)
            }
            None => {
                self.buckets.push(candidate);
                None
            }
        };

        self.updated_at = Utc::now();
        Ok(previous)
    }

    /// Remove a bucket by name
    pub fn remove(&mut self, name: &str) -> Option<AllocationBucket> {
        let name = name.trim();
        let index = self
            .buckets
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))?;
        self.updated_at = Utc::now();
        Some(self.buckets.remove(index))
    }

    /// Rename a bucket, keeping its share and position.
    ///
    /// `Ok(None)` when no bucket is called `name`.
    pub fn rename(
        &mut self,
        name: &str,
        new_name: &str,
    ) -> Result<Option<AllocationBucket>, AllocationValidationError> {
        let name = name.trim();
        let Some(index) = self
            .buckets
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
        else {
            return Ok(None);
        };

        let candidate = AllocationBucket::new(new_name.trim(), self.buckets[index].percent_share);
        candidate.validate()?;
        let taken = self
            .buckets
            .iter()
            .enumerate()
            .any(|(i, b)| i != index && b.name.eq_ignore_ascii_case(&candidate.name));
        if taken {
            return Err(AllocationValidationError::DuplicateName(candidate.name));
        }

        self.buckets[index] = candidate.clone();
        self.updated_at = Utc::now();
        Ok(Some(candidate))
    }

    /// Replace the whole list, e.g. when a leftover split is applied
    pub fn replace(&mut self, buckets: Vec<AllocationBucket>) -> Result<(), AllocationValidationError> {
        for (i, bucket) in buckets.iter().enumerate() {
            bucket.validate()?;
            if buckets[..i]
                .iter()
                .any(|b| b.name.trim().eq_ignore_ascii_case(bucket.name.trim()))
            {
                return Err(AllocationValidationError::DuplicateName(bucket.name.clone()));
            }
        }
        self.buckets = buckets;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Sum of manual shares in percentage points
    pub fn manual_percent(&self) -> f64 {
        self.buckets.iter().map(|b| b.fraction() * 100.0).sum()
    }
}

/// Validation errors for allocation buckets
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationValidationError {
    EmptyName,
    ReservedName(String),
    DuplicateName(String),
    InvalidPercent(f64),
}

impl fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Allocation bucket name is required"),
            Self::ReservedName(name) => {
                write!(f, "'{}' is a computed row and cannot be used as a bucket name", name)
            }
            Self::DuplicateName(name) => write!(f, "A bucket named '{}' already exists", name),
            Self::InvalidPercent(p) => {
                write!(f, "Percent share must be a non-negative number, got {}", p)
            }
        }
    }
}

impl std::error::Error for AllocationValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_inserts_then_updates() {
        let mut plan = AllocationPlan::default();
        assert_eq!(plan.set("Smile", 10.0).unwrap(), None);
        assert_eq!(plan.set("smile", 12.5).unwrap(), Some(10.0));

        assert_eq!(plan.buckets.len(), 1);
        assert_eq!(plan.buckets[0].name, "Smile");
        assert_eq!(plan.find("SMILE").unwrap().percent_share, 12.5);
    }

    #[test]
    fn test_set_keeps_order() {
        let mut plan = AllocationPlan::default();
        plan.set("Splurge", 5.0).unwrap();
        plan.set("Smile", 10.0).unwrap();
        plan.set("Fire Extinguisher", 20.0).unwrap();

        let names: Vec<_> = plan.buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Splurge", "Smile", "Fire Extinguisher"]);
        assert_eq!(plan.manual_percent(), 35.0);
    }

    #[test]
    fn test_validation() {
        let mut plan = AllocationPlan::default();
        assert_eq!(plan.set(" ", 5.0), Err(AllocationValidationError::EmptyName));
        assert!(matches!(
            plan.set("leftover", 5.0),
            Err(AllocationValidationError::ReservedName(_))
        ));
        assert!(matches!(
            plan.set("Smile", -1.0),
            Err(AllocationValidationError::InvalidPercent(_))
        ));
        assert!(matches!(
            plan.set("Smile", f64::NAN),
            Err(AllocationValidationError::InvalidPercent(_))
        ));
        assert!(plan.buckets.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut plan = AllocationPlan::new(vec![AllocationBucket::new("Smile", 10.0)]);
        assert!(plan.remove("nope").is_none());
        assert_eq!(plan.remove("smile").unwrap().name, "Smile");
        assert!(plan.buckets.is_empty());
    }

    #[test]
    fn test_rename() {
        let mut plan = AllocationPlan::new(vec![
            AllocationBucket::new("Smile", 10.0),
            AllocationBucket::new("Splurge", 5.0),
        ]);
        let renamed = plan.rename("smile", "Holiday").unwrap().unwrap();
        assert_eq!(renamed.percent_share, 10.0);
        assert_eq!(plan.buckets[0].name, "Holiday");

        assert!(plan.rename("nope", "Other").unwrap().is_none());
        assert!(matches!(
            plan.rename("Holiday", "SPLURGE"),
            Err(AllocationValidationError::DuplicateName(_))
        ));
        // Changing only the case of its own name is allowed
        assert!(plan.rename("Holiday", "HOLIDAY").unwrap().is_some());
    }

    #[test]
    fn test_replace_rejects_duplicates() {
        let mut plan = AllocationPlan::default();
        let result = plan.replace(vec![
            AllocationBucket::new("Smile", 10.0),
            AllocationBucket::new("smile", 5.0),
        ]);
        assert!(matches!(result, Err(AllocationValidationError::DuplicateName(_))));
        assert!(plan.buckets.is_empty());
    }

    #[test]
    fn test_bucket_serialization_shape() {
        let json = serde_json::to_value(AllocationBucket::new("Smile", 10.0)).unwrap();
        assert_eq!(json["Name"], "Smile");
        assert_eq!(json["PercentShare"], 10.0);
    }
}
