use crate::core::store::{LoadIssue, TimepieceStore};
use crate::core::timelog::{Anomaly, TimepieceId};
use crate::errors::AppResult;

/// Findings of a consistency pass over the whole store.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub issues: Vec<LoadIssue>,
    pub anomalies: Vec<(TimepieceId, Anomaly)>,
    pub index_rebuilt: bool,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.anomalies.is_empty()
    }
}

pub struct CheckLogic;

impl CheckLogic {
    /// Load everything and collect what is wrong with it. Nothing is repaired.
    pub fn run(store: &TimepieceStore) -> AppResult<CheckReport> {
        let report = store.load_all_with_report()?;

        let anomalies = report
            .timepieces
            .iter()
            .flat_map(|t| t.anomalies().into_iter().map(move |a| (t.id(), a)))
            .collect();

        Ok(CheckReport {
            checked: report.timepieces.len(),
            issues: report.issues,
            anomalies,
            index_rebuilt: report.index_rebuilt,
        })
    }
}
