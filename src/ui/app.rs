use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::advice::{self, AdviceRequest, Advisor, PendingTip};
use crate::models::{BudgetState, Category};

/// Allocation slider increment on the categories screen.
pub(crate) const SLIDER_STEP: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const MAX_KEYPAD_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Welcome,
    Income,
    Dashboard,
    Categories,
    Wallet,
    Analytics,
    Profile,
}

impl Screen {
    /// Screens reachable from the tab bar. Welcome is only shown before the
    /// first income is set.
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Income,
            Self::Categories,
            Self::Wallet,
            Self::Analytics,
            Self::Profile,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome => write!(f, "Welcome"),
            Self::Income => write!(f, "Income"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Categories => write!(f, "Categories"),
            Self::Wallet => write!(f, "Wallet"),
            Self::Analytics => write!(f, "Analytics"),
            Self::Profile => write!(f, "Profile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// What the edit prompt is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditTarget {
    /// Exact amount for one category in the draft.
    Allocation { category_id: String },
    /// `<amount> [note]` for a new spend.
    Spend { category_id: String },
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Self::Allocation { .. } => "amount> ",
            Self::Spend { .. } => "spend (amount note)> ",
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    ResetAll,
    ResetToSuggested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IncomeField {
    Salary,
    Bonus,
}

/// Keypad-style entry for salary and side-hustle income.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IncomeForm {
    pub(crate) salary: String,
    pub(crate) bonus: String,
    pub(crate) include_bonus: bool,
    pub(crate) field: IncomeField,
}

impl IncomeForm {
    pub(crate) fn from_state(state: &BudgetState) -> Self {
        Self {
            salary: keypad_text(state.income),
            bonus: keypad_text(state.bonus),
            include_bonus: state.include_bonus,
            field: IncomeField::Salary,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            IncomeField::Salary => &mut self.salary,
            IncomeField::Bonus => &mut self.bonus,
        }
    }

    /// Digits replace a lone `0`; a second decimal point is ignored.
    pub(crate) fn press(&mut self, key: char) {
        let value = self.active_mut();
        match key {
            '.' if value.contains('.') => {}
            '.' => value.push('.'),
            d if d.is_ascii_digit() => {
                if value == "0" {
                    *value = d.to_string();
                } else if value.len() < MAX_KEYPAD_LEN {
                    value.push(d);
                }
            }
            _ => {}
        }
    }

    /// Deleting the last remaining character leaves `0`.
    pub(crate) fn backspace(&mut self) {
        let value = self.active_mut();
        if value.chars().count() <= 1 {
            *value = "0".into();
        } else {
            value.pop();
        }
    }

    pub(crate) fn clear(&mut self) {
        *self.active_mut() = "0".into();
    }

    pub(crate) fn switch_field(&mut self) {
        self.field = match self.field {
            IncomeField::Salary => IncomeField::Bonus,
            IncomeField::Bonus => IncomeField::Salary,
        };
    }

    pub(crate) fn toggle_bonus(&mut self) {
        self.include_bonus = !self.include_bonus;
    }

    pub(crate) fn salary_value(&self) -> Decimal {
        keypad_value(&self.salary)
    }

    pub(crate) fn bonus_value(&self) -> Decimal {
        keypad_value(&self.bonus)
    }

    /// Preview of what the split will be computed against.
    pub(crate) fn total(&self) -> Decimal {
        if self.include_bonus {
            self.salary_value() + self.bonus_value()
        } else {
            self.salary_value()
        }
    }
}

fn keypad_value(text: &str) -> Decimal {
    Decimal::from_str(text.trim_end_matches('.')).unwrap_or(Decimal::ZERO)
}

fn keypad_text(value: Decimal) -> String {
    if value.is_zero() {
        "0".into()
    } else {
        value.normalize().to_string()
    }
}

/// Move an allocation by `delta`, kept within `[0, cap]`.
pub(crate) fn step_allocation(amount: Decimal, delta: Decimal, cap: Decimal) -> Decimal {
    amount.saturating_add(delta).clamp(Decimal::ZERO, cap.max(Decimal::ZERO))
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Income
    pub(crate) income_form: IncomeForm,

    // Categories (unsaved copy of the allocations)
    pub(crate) draft: Vec<Category>,
    pub(crate) category_index: usize,

    // Wallet
    pub(crate) wallet_index: usize,
    pub(crate) wallet_scroll: usize,
    pub(crate) wallet_category: usize,

    // Editing / confirmation
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Tip
    pub(crate) tip: String,
    tip_for: Option<AdviceRequest>,
    pending_tip: Option<PendingTip>,
    advisor: Arc<dyn Advisor>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(state: &BudgetState, advisor: Arc<dyn Advisor>) -> Self {
        Self {
            running: true,
            screen: if state.has_income() {
                Screen::Dashboard
            } else {
                Screen::Welcome
            },
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            income_form: IncomeForm::from_state(state),

            draft: state.categories.clone(),
            category_index: 0,

            wallet_index: 0,
            wallet_scroll: 0,
            wallet_category: 0,

            edit_target: None,
            pending_action: None,
            confirm_message: String::new(),

            tip: advice::PLACEHOLDER_TIP.into(),
            tip_for: None,
            pending_tip: None,
            advisor,

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.pending_action = Some(action);
        self.confirm_message = message.into();
        self.input_mode = InputMode::Confirm;
    }

    /// Change screens. Leaving the categories editor drops unsaved edits.
    pub(crate) fn switch_screen(&mut self, screen: Screen, state: &BudgetState) {
        if self.screen == screen {
            return;
        }
        if self.screen == Screen::Categories && self.draft_is_dirty(state) {
            self.set_status("Unsaved allocation changes discarded");
        }
        match screen {
            Screen::Income => self.income_form = IncomeForm::from_state(state),
            Screen::Categories => self.load_draft(state),
            _ => {}
        }
        self.screen = screen;
    }

    pub(crate) fn start_edit(&mut self, target: EditTarget) {
        self.edit_target = Some(target);
        self.command_input.clear();
        self.input_mode = InputMode::Editing;
    }

    // ── Categories draft ─────────────────────────────────────

    /// Throw away unsaved edits and copy the stored allocations.
    pub(crate) fn load_draft(&mut self, state: &BudgetState) {
        self.draft = state.categories.clone();
        if self.category_index >= self.draft.len() {
            self.category_index = self.draft.len().saturating_sub(1);
        }
    }

    pub(crate) fn draft_is_dirty(&self, state: &BudgetState) -> bool {
        self.draft != state.categories
    }

    pub(crate) fn selected_draft(&self) -> Option<&Category> {
        self.draft.get(self.category_index)
    }

    pub(crate) fn adjust_draft(&mut self, delta: Decimal, cap: Decimal) {
        if let Some(cat) = self.draft.get_mut(self.category_index) {
            cat.amount = step_allocation(cat.amount, delta, cap);
        }
    }

    pub(crate) fn set_draft_amount(&mut self, category_id: &str, amount: Decimal, cap: Decimal) -> bool {
        match self.draft.iter_mut().find(|c| c.id == category_id) {
            Some(cat) => {
                cat.amount = step_allocation(amount, Decimal::ZERO, cap);
                true
            }
            None => false,
        }
    }

    // ── Wallet ───────────────────────────────────────────────

    /// Category new spends are logged against.
    pub(crate) fn wallet_category<'a>(&self, state: &'a BudgetState) -> Option<&'a Category> {
        state
            .categories
            .get(self.wallet_category)
            .or_else(|| state.categories.first())
    }

    pub(crate) fn cycle_wallet_category(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.wallet_category = 0;
            return;
        }
        let current = self.wallet_category.min(len - 1);
        self.wallet_category = if forward {
            (current + 1) % len
        } else if current == 0 {
            len - 1
        } else {
            current - 1
        };
    }

    // ── Tips ─────────────────────────────────────────────────

    /// Ask for a fresh tip when salary or remaining changed since the last ask.
    pub(crate) fn sync_tip(&mut self, state: &BudgetState) {
        if !state.has_income() {
            return;
        }
        let request = AdviceRequest::from_state(state);
        if self.tip_for != Some(request) {
            self.request_tip(request);
        }
    }

    /// Ask again even if nothing changed.
    pub(crate) fn refresh_tip(&mut self, state: &BudgetState) {
        self.request_tip(AdviceRequest::from_state(state));
    }

    fn request_tip(&mut self, request: AdviceRequest) {
        // Replacing the pending request drops its channel; a late answer is ignored.
        self.pending_tip = Some(advice::spawn_tip(Arc::clone(&self.advisor), request));
        self.tip_for = Some(request);
        self.tip = advice::PLACEHOLDER_TIP.into();
    }

    pub(crate) fn poll_tip(&mut self) {
        if let Some(tip) = self.pending_tip.as_ref().and_then(PendingTip::poll) {
            self.tip = tip;
            self.pending_tip = None;
        }
    }

    pub(crate) fn tip_loading(&self) -> bool {
        self.pending_tip.is_some()
    }

    /// Back to first-run after the budget was wiped.
    pub(crate) fn reset_session(&mut self, state: &BudgetState) {
        self.income_form = IncomeForm::from_state(state);
        self.draft = state.categories.clone();
        self.category_index = 0;
        self.wallet_index = 0;
        self.wallet_scroll = 0;
        self.wallet_category = 0;
        self.tip = advice::PLACEHOLDER_TIP.into();
        self.tip_for = None;
        self.pending_tip = None;
        self.screen = Screen::Welcome;
    }
}
