//! Short money tips from an external text generator.
//!
//! Callers always get a displayable string back: failures turn into canned
//! fallbacks, and the background variant reports over a channel so the UI
//! can keep drawing a placeholder until the answer lands.

mod gemini;

pub(crate) use gemini::GeminiAdvisor;

use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::budget;
use crate::models::BudgetState;

/// Shown while a tip is still on its way.
pub(crate) const PLACEHOLDER_TIP: &str = "Thinking about your money...";
/// Used when the advisor fails or is unavailable.
pub(crate) const FALLBACK_TIP: &str =
    "Tip: Take the trotro instead of an Uber this week and put the difference in your susu box.";
/// Used when the advisor answers with nothing.
pub(crate) const EMPTY_TIP: &str =
    "Tip: Keep an eye on the small expenses; they add up fast!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AdviceRequest {
    pub(crate) salary: Decimal,
    pub(crate) remaining: Decimal,
}

impl AdviceRequest {
    pub(crate) fn from_state(state: &BudgetState) -> Self {
        Self {
            salary: state.income,
            remaining: budget::remaining(state.total_income(), &state.categories),
        }
    }
}

pub(crate) trait Advisor: Send + Sync {
    fn advise(&self, request: &AdviceRequest) -> Result<String>;
}

/// Advisor used when no API key is configured.
pub(crate) struct OfflineAdvisor;

impl Advisor for OfflineAdvisor {
    fn advise(&self, _request: &AdviceRequest) -> Result<String> {
        anyhow::bail!("no advice service configured")
    }
}

/// Ask for a tip, never failing.
pub(crate) fn tip_or_fallback(advisor: &dyn Advisor, request: &AdviceRequest) -> String {
    match advisor.advise(request) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                debug!("Advisor returned an empty tip");
                EMPTY_TIP.to_string()
            } else {
                text.to_string()
            }
        }
        Err(e) => {
            warn!("Tip request failed, using fallback: {e:#}");
            FALLBACK_TIP.to_string()
        }
    }
}

/// An in-flight tip request. Dropping it discards whatever arrives later.
pub(crate) struct PendingTip {
    rx: Receiver<String>,
}

impl PendingTip {
    /// Non-blocking check for the answer. A worker that died without replying
    /// counts as a failure and yields the fallback.
    pub(crate) fn poll(&self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(tip) => Some(tip),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(FALLBACK_TIP.to_string()),
        }
    }
}

/// Fetch a tip on a background thread.
pub(crate) fn spawn_tip(advisor: Arc<dyn Advisor>, request: AdviceRequest) -> PendingTip {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("tip".into())
        .spawn(move || {
            let tip = tip_or_fallback(advisor.as_ref(), &request);
            // Receiver may be gone if a newer request superseded this one.
            let _ = tx.send(tip);
        });
    if let Err(e) = spawned {
        warn!("Could not start tip worker: {e}");
    }
    PendingTip { rx }
}

#[cfg(test)]
mod tests;
