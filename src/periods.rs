// src/periods.rs
//! Study-period windows and bug-to-period classification.
//!
//! The study span is divided into K contiguous equal windows. Division
//! rounds to whole seconds, so the last window's end is forced exactly
//! to the span end. A bug is assigned to the window its activity
//! interval overlaps longest; exact ties fall back to the window whose
//! inclusive bounds contain the last-activity timestamp, scanned from
//! the final window backward.

use chrono::{Duration, NaiveDateTime};

use crate::error::{MinerError, Result};

/// The K windows partitioning the study span. Period numbers are 1-based.
#[derive(Debug, Clone)]
pub struct PeriodWindows {
    windows: Vec<(NaiveDateTime, NaiveDateTime)>,
}

impl PeriodWindows {
    /// Splits `[start, end]` into `k` contiguous equal windows.
    ///
    /// # Errors
    /// Returns an error if `k` is zero or `start` is not before `end`.
    pub fn split(start: NaiveDateTime, end: NaiveDateTime, k: u32) -> Result<Self> {
        if k == 0 {
            return Err(MinerError::Config("period count must be at least 1".into()));
        }
        if start >= end {
            return Err(MinerError::InvalidSpan {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let slice = (end - start) / k as i32;
        let mut windows = Vec::with_capacity(k as usize);
        let mut window_start = start;
        for _ in 0..k {
            let window_end = window_start + slice;
            windows.push((window_start, window_end));
            window_start = window_end;
        }
        // Absorb rounding from the integer division above.
        if let Some(last) = windows.last_mut() {
            last.1 = end;
        }

        Ok(Self { windows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Returns the inclusive bounds of 1-based period `period`.
    #[must_use]
    pub fn bounds(&self, period: u32) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if period == 0 {
            return None;
        }
        self.windows.get(period as usize - 1).copied()
    }

    /// Assigns an activity interval to the period with the greatest
    /// overlap. Returns `None` when no period can be determined; callers
    /// treat that as an unresolved assignment, never a default.
    #[must_use]
    pub fn classify(&self, first: NaiveDateTime, last: NaiveDateTime) -> Option<u32> {
        let overlaps: Vec<Duration> = self
            .windows
            .iter()
            .map(|&(ws, we)| {
                let overlap_start = first.max(ws);
                let overlap_end = last.min(we);
                if overlap_end > overlap_start {
                    overlap_end - overlap_start
                } else {
                    Duration::zero()
                }
            })
            .collect();

        let max_overlap = overlaps.iter().max().copied()?;
        let leaders: Vec<usize> = overlaps
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == max_overlap)
            .map(|(i, _)| i)
            .collect();

        if leaders.len() == 1 {
            return Some(leaders[0] as u32 + 1);
        }

        // Tie: the window containing the last-activity timestamp wins,
        // latest window first.
        for (i, &(ws, we)) in self.windows.iter().enumerate().rev() {
            if ws <= last && last <= we {
                return Some(i as u32 + 1);
            }
        }
        None
    }
}
