//! Record stages flowing through the pipeline.
//!
//! Each stage produces a new collection instead of mutating the previous one:
//! `Record` (read) → `NormalizedRecord` (normalize) → `AnnotatedRecord` (cluster).
//! The normalized text lives only on `NormalizedRecord`, so it can never reach
//! the output sink.

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub order_id: String,
    pub company: String,
    pub task_name: String,
    /// Every input column in header order, required columns included.
    /// Carried through so the writer can reproduce the original row.
    pub fields: Vec<String>,
}

impl Record {
    /// Build a record whose only columns are the three required ones.
    pub fn new(
        order_id: impl Into<String>,
        company: impl Into<String>,
        task_name: impl Into<String>,
    ) -> Self {
        let order_id = order_id.into();
        let company = company.into();
        let task_name = task_name.into();
        Self {
            fields: vec![order_id.clone(), company.clone(), task_name.clone()],
            order_id,
            company,
            task_name,
        }
    }
}

/// A record plus its derived, transient normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub record: Record,
    pub normalized: String,
}

/// A record annotated with its company-local cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    pub record: Record,
    /// Company-local cluster id, starting at 1.
    pub cluster_id: u32,
    /// Most frequent raw task name within the cluster.
    pub representative_name: String,
}
