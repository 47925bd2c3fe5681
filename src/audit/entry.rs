//! Audit entry format
//!
//! One entry per persisted change. The entity is stored as JSON on whichever
//! side of the change it exists: `after` for a create, `before` for a delete,
//! both for an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        };
        write!(f, "{}", label)
    }
}

/// Locally owned records whose changes are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Scenario,
    AllocationPlan,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario => write!(f, "Scenario"),
            Self::AllocationPlan => write!(f, "AllocationPlan"),
        }
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: None,
            summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id, entity_name)
        }
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            summary,
            ..Self::new(Operation::Update, entity_type, entity_id, entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id, entity_name)
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        )?;
        if let Some(name) = &self.entity_name {
            write!(f, " ({})", name)?;
        }
        if let Some(summary) = &self.summary {
            write!(f, "\n  {}", summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sides_recorded_per_operation() {
        let data = json!({"Name": "Pay rise"});

        let created = AuditEntry::create(EntityType::Scenario, "scn-1", None, &data);
        assert!(created.before.is_none());
        assert_eq!(created.after, Some(data.clone()));

        let deleted = AuditEntry::delete(EntityType::Scenario, "scn-1", None, &data);
        assert_eq!(deleted.before, Some(data.clone()));
        assert!(deleted.after.is_none());

        let updated = AuditEntry::update(
            EntityType::AllocationPlan,
            "allocations",
            None,
            &json!({"Buckets": []}),
            &data,
            Some("buckets: 0 -> 1".into()),
        );
        assert_eq!(updated.operation, Operation::Update);
        assert!(updated.before.is_some() && updated.after.is_some());
    }

    #[test]
    fn test_serialized_names() {
        let entry = AuditEntry::create(EntityType::AllocationPlan, "allocations", None, &json!({}));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["operation"], "create");
        assert_eq!(value["entity_type"], "allocation_plan");
        assert!(value.get("entity_name").is_none());
    }

    #[test]
    fn test_display() {
        let entry = AuditEntry::create(
            EntityType::Scenario,
            "scn-1a2b3c4d",
            Some("Pay rise".into()),
            &json!({}),
        );
        let line = entry.to_string();
        assert!(line.contains("CREATE Scenario scn-1a2b3c4d (Pay rise)"));
    }
}
