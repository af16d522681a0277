//! Extraction statistics tracking.
//!
//! This module provides statistics tracking for soft degradations and
//! informational events during a generation run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{InfoType, WarningType};

/// Extraction statistics tracker.
///
/// Tracks warnings and informational metrics using atomic counters so the
/// tracker can be shared by reference through every extraction call. All types
/// are initialized to zero on creation.
///
/// # Categories
///
/// - **Warnings**: Soft degradations (fallback shapes substituted)
/// - **Info**: Notable events that aren't errors or warnings
///
/// Fatal failures are not counted here; they are returned as errors.
pub struct ExtractionStats {
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl Default for ExtractionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExtractionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionStats")
            .field("warnings", &self.total_warnings())
            .field("info", &self.total_info())
            .finish()
    }
}

impl ExtractionStats {
    pub fn new() -> Self {
        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ExtractionStats { warnings, info }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map. \
                 This indicates a bug in ExtractionStats initialization.",
                warning
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map. \
                 This indicates a bug in ExtractionStats initialization.",
                info_type
            );
        }
    }

    /// Get the count for a warning type.
    ///
    /// Returns 0 if the warning type is not in the map (should never happen if properly initialized).
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    ///
    /// Returns 0 if the info type is not in the map (should never happen if properly initialized).
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        WarningType::iter().map(|w| self.get_warning_count(w)).sum()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }

    /// Logs every non-zero counter at the end of a run.
    pub fn log_summary(&self) {
        for warning in WarningType::iter() {
            let count = self.get_warning_count(warning);
            if count > 0 {
                log::warn!("{:?}: {}", warning, count);
            }
        }
        for info_type in InfoType::iter() {
            let count = self.get_info_count(info_type);
            if count > 0 {
                log::info!("{:?}: {}", info_type, count);
            }
        }
    }
}
