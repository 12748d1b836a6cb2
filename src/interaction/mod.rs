//! Drag-to-zoom selection over chart categories.
//!
//! `ZoomSelector` is a plain state object: hosts feed it pointer events
//! already resolved to category labels and read back the active window.
//! It never touches a rendering surface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ProcessedPoint;

/// Category labels spanned by an in-progress drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub left: String,
    pub right: String,
}

impl ZoomRange {
    #[must_use]
    pub fn at(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            left: label.clone(),
            right: label,
        }
    }

    /// A range whose ends coincide selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPhase {
    /// Showing the full series, zoom mode off.
    Idle,
    /// Zoom mode on, waiting for a pointer press.
    ZoomArmed,
    /// Pointer held down; the range follows the pointer.
    Dragging(ZoomRange),
    /// A committed sub-range is displayed, zoom mode off.
    Zoomed,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommit {
    /// No drag was in progress.
    Ignored,
    /// Press and release landed on the same category.
    Discarded,
    /// A drag endpoint is not a category of the current window.
    Unresolved,
    /// The window now holds `start..=end` of the previous window.
    Applied { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomSelector {
    phase: ZoomPhase,
    history: Vec<Vec<ProcessedPoint>>,
}

impl Default for ZoomSelector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ZoomSelector {
    #[must_use]
    pub fn new(base: Vec<ProcessedPoint>) -> Self {
        Self {
            phase: ZoomPhase::Idle,
            history: vec![base],
        }
    }

    #[must_use]
    pub fn phase(&self) -> &ZoomPhase {
        &self.phase
    }

    /// Zoom mode is on (armed or dragging).
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, ZoomPhase::ZoomArmed | ZoomPhase::Dragging(_))
    }

    #[must_use]
    pub fn range(&self) -> Option<&ZoomRange> {
        match &self.phase {
            ZoomPhase::Dragging(range) => Some(range),
            _ => None,
        }
    }

    /// Points currently displayed.
    #[must_use]
    pub fn window(&self) -> &[ProcessedPoint] {
        self.history.last().map_or(&[], Vec::as_slice)
    }

    /// Full series the history started from.
    #[must_use]
    pub fn base(&self) -> &[ProcessedPoint] {
        self.history.first().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether a reset would change anything.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        self.history.len() > 1
    }

    /// Turns zoom mode on without touching the window.
    pub fn arm(&mut self) {
        if matches!(self.phase, ZoomPhase::Idle | ZoomPhase::Zoomed) {
            debug!("zoom armed");
            self.phase = ZoomPhase::ZoomArmed;
        }
    }

    pub fn pointer_down(&mut self, label: Option<&str>) {
        if self.phase != ZoomPhase::ZoomArmed {
            return;
        }
        let Some(label) = label else {
            return;
        };
        debug!(label, "zoom drag started");
        self.phase = ZoomPhase::Dragging(ZoomRange::at(label));
    }

    pub fn pointer_move(&mut self, label: Option<&str>) {
        let ZoomPhase::Dragging(range) = &mut self.phase else {
            return;
        };
        match label {
            Some(label) if label != range.left => range.right = label.to_owned(),
            _ => {}
        }
    }

    /// Drops an in-progress drag and stays armed.
    pub fn pointer_cancel(&mut self) {
        if matches!(self.phase, ZoomPhase::Dragging(_)) {
            self.phase = ZoomPhase::ZoomArmed;
        }
    }

    /// Ends a drag and, when it spans distinct known categories, zooms into it.
    ///
    /// Endpoints are resolved against the current window, so consecutive
    /// zooms narrow each other.
    pub fn pointer_up(&mut self) -> ZoomCommit {
        let ZoomPhase::Dragging(range) = &self.phase else {
            return ZoomCommit::Ignored;
        };

        if range.is_empty() {
            self.phase = ZoomPhase::ZoomArmed;
            return ZoomCommit::Discarded;
        }

        let window = self.window();
        let left = window.iter().position(|point| point.label == range.left);
        let right = window.iter().position(|point| point.label == range.right);

        let commit = match (left, right) {
            (Some(left), Some(right)) => {
                let (start, end) = (left.min(right), left.max(right));
                let zoomed = window[start..=end].to_vec();
                self.history.push(zoomed);
                debug!(start, end, depth = self.history.len(), "zoom applied");
                ZoomCommit::Applied { start, end }
            }
            _ => {
                debug!(
                    left = %range.left,
                    right = %range.right,
                    "zoom endpoints not in current window, selection dropped"
                );
                ZoomCommit::Unresolved
            }
        };

        self.phase = self.settled_phase();
        commit
    }

    /// Restores the full series and leaves zoom mode.
    pub fn reset(&mut self) {
        self.history.truncate(1);
        self.phase = ZoomPhase::Idle;
    }

    /// Starts over from a freshly computed full series.
    pub fn replace_base(&mut self, base: Vec<ProcessedPoint>) {
        self.history = vec![base];
        self.phase = ZoomPhase::Idle;
    }

    fn settled_phase(&self) -> ZoomPhase {
        if self.can_reset() {
            ZoomPhase::Zoomed
        } else {
            ZoomPhase::Idle
        }
    }
}
