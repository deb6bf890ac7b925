#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rust_decimal_macros::dec;

use super::*;

struct Fixed(&'static str);

impl Advisor for Fixed {
    fn advise(&self, _request: &AdviceRequest) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Failing;

impl Advisor for Failing {
    fn advise(&self, _request: &AdviceRequest) -> Result<String> {
        anyhow::bail!("timeout")
    }
}

/// Echoes the request back so callers can tell which answer they got.
struct Echo {
    calls: AtomicUsize,
}

impl Advisor for Echo {
    fn advise(&self, request: &AdviceRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} / {}", request.salary, request.remaining))
    }
}

fn request() -> AdviceRequest {
    AdviceRequest {
        salary: dec!(4500),
        remaining: dec!(300),
    }
}

fn poll_until(pending: &PendingTip) -> String {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(tip) = pending.poll() {
            return tip;
        }
        assert!(Instant::now() < deadline, "tip never arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
}

// ── AdviceRequest ─────────────────────────────────────────────

#[test]
fn test_request_from_state() {
    let state = BudgetState::default().apply_income_update(dec!(4500), dec!(500), false);
    let req = AdviceRequest::from_state(&state);
    assert_eq!(req.salary, dec!(4500));
    assert_eq!(req.remaining, dec!(0));

    let state = state.set_manual_allocation("rent", dec!(1000)).unwrap();
    assert_eq!(AdviceRequest::from_state(&state).remaining, dec!(575));
}

// ── tip_or_fallback ───────────────────────────────────────────

#[test]
fn test_tip_passthrough() {
    assert_eq!(
        tip_or_fallback(&Fixed("  Save small small.  "), &request()),
        "Save small small."
    );
}

#[test]
fn test_tip_failure_falls_back() {
    assert_eq!(tip_or_fallback(&Failing, &request()), FALLBACK_TIP);
}

#[test]
fn test_tip_empty_uses_empty_fallback() {
    assert_eq!(tip_or_fallback(&Fixed("   "), &request()), EMPTY_TIP);
}

#[test]
fn test_offline_advisor_falls_back() {
    assert_eq!(tip_or_fallback(&OfflineAdvisor, &request()), FALLBACK_TIP);
}

// ── spawn_tip ─────────────────────────────────────────────────

#[test]
fn test_spawn_tip_delivers() {
    let advisor: Arc<dyn Advisor> = Arc::new(Echo {
        calls: AtomicUsize::new(0),
    });
    let pending = spawn_tip(advisor, request());
    assert_eq!(poll_until(&pending), "4500 / 300");
}

#[test]
fn test_spawn_tip_failure_delivers_fallback() {
    let pending = spawn_tip(Arc::new(Failing), request());
    assert_eq!(poll_until(&pending), FALLBACK_TIP);
}

#[test]
fn test_superseded_request_is_harmless() {
    let echo = Arc::new(Echo {
        calls: AtomicUsize::new(0),
    });
    let first = spawn_tip(echo.clone(), request());
    drop(first);
    let second = spawn_tip(
        echo.clone(),
        AdviceRequest {
            salary: dec!(5000),
            remaining: dec!(0),
        },
    );
    assert_eq!(poll_until(&second), "5000 / 0");
}
