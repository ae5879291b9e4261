//! Page restoration.
//!
//! Reverts everything the ruler and the reading-mode feature may have put
//! on the page. Two policies are available:
//!
//! - [`RestorePolicy::Surgical`] removes the known artifacts one by one and
//!   leaves the rest of the page (form input, scroll position) untouched.
//! - [`RestorePolicy::Reload`] asks the surface to reload the page, which
//!   also discards unrelated page state.
//!
//! Either way the ruler is disabled first and the persisted enabled flag is
//! cleared, so the next page load starts without the ruler. Failures never
//! reach the caller; they are reported as a notification and a
//! [`StatusEvent::RestoreFailed`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::app::PageCtx;
use crate::error::Result;
use crate::events::StatusEvent;
use crate::model::constants::*;
use crate::storage::PreferenceStore;
use crate::ui::OverlayController;

/// How `restorePage` reverts the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestorePolicy {
    #[default]
    Surgical,
    Reload,
}

/// What a successful restore removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub ruler_disabled: bool,
    pub stylesheets_removed: usize,
    pub injected_nodes_removed: usize,
    pub inline_styles_cleared: usize,
    pub indicators_removed: usize,
    pub reloaded: bool,
}

/// Result of [`PageRestorer::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(RestoreReport),
    Failed(String),
}

/// Reverts page modifications under a [`RestorePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRestorer {
    policy: RestorePolicy,
}

impl PageRestorer {
    pub fn new(policy: RestorePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RestorePolicy {
        self.policy
    }

    /// Restore the page. Never fails; the outcome is also reported on the
    /// page and through the status channel.
    pub fn restore<P: PreferenceStore + ?Sized>(
        &self,
        overlay: &mut OverlayController,
        prefs: &mut P,
        cx: &mut PageCtx<'_>,
    ) -> RestoreOutcome {
        match self.try_restore(overlay, prefs, cx) {
            Ok(report) => {
                info!(policy = ?self.policy, ?report, "page restored");
                cx.notify(MSG_RESTORED_TITLE, MSG_RESTORED_BODY);
                cx.emit(StatusEvent::PageRestored);
                RestoreOutcome::Restored(report)
            }
            Err(e) => {
                warn!(policy = ?self.policy, error = %e, "page restore failed");
                let reason = e.to_string();
                cx.notify(MSG_RESTORE_FAILED_TITLE, MSG_RESTORE_FAILED_BODY);
                cx.emit(StatusEvent::RestoreFailed {
                    reason: reason.clone(),
                });
                RestoreOutcome::Failed(reason)
            }
        }
    }

    fn try_restore<P: PreferenceStore + ?Sized>(
        &self,
        overlay: &mut OverlayController,
        prefs: &mut P,
        cx: &mut PageCtx<'_>,
    ) -> Result<RestoreReport> {
        let ruler_disabled = overlay.disable(cx);

        let mut report = match self.policy {
            RestorePolicy::Surgical => remove_artifacts(cx)?,
            RestorePolicy::Reload => {
                // the reload drops our toasts along with everything else
                cx.notifier.dismiss_all(&mut *cx.surface, &mut *cx.timers);
                cx.surface.reload()?;
                RestoreReport {
                    reloaded: true,
                    ..RestoreReport::default()
                }
            }
        };
        report.ruler_disabled = ruler_disabled;

        prefs.set_bool(PREF_RULER_ENABLED, false)?;
        prefs.flush()?;
        Ok(report)
    }
}

/// Surgical removal of reading-mode artifacts.
fn remove_artifacts(cx: &mut PageCtx<'_>) -> Result<RestoreReport> {
    let mut report = RestoreReport::default();

    for (node, css) in cx.surface.stylesheets() {
        let injected = READING_MODE_STYLE_MARKERS.iter().any(|m| css.contains(m));
        if injected && cx.surface.remove_node(node) {
            report.stylesheets_removed += 1;
        }
    }

    for dom_id in READING_MODE_NODE_IDS {
        if let Some(node) = cx.surface.find_by_dom_id(dom_id) {
            if cx.surface.remove_node(node) {
                report.injected_nodes_removed += 1;
            }
        }
    }

    let own_nodes = cx.notifier.live_nodes();
    report.inline_styles_cleared = cx.surface.clear_inline_styles(
        FONT_RESET_SELECTORS,
        FONT_RESET_PROPERTIES,
        &own_nodes,
    )?;

    for node in cx.surface.nodes_with_inline_style_containing(READING_MODE_INDICATOR_MARKER) {
        if cx.surface.remove_node(node) {
            report.indicators_removed += 1;
        }
    }
    for (node, css) in cx.surface.stylesheets() {
        if css.contains(READING_MODE_INDICATOR_PSEUDO)
            && css.contains(READING_MODE_INDICATOR_MARKER)
            && cx.surface.remove_node(node)
        {
            report.indicators_removed += 1;
        }
    }

    debug!(?report, "reading-mode artifacts removed");
    Ok(report)
}
