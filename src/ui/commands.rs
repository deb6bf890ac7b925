use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, PendingAction, Screen};
use super::util::{format_amount, parse_amount};
use crate::models::{Category, NewTransaction};
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SalaryWise", cmd_quit, r);
    register_command!("quit", "Quit SalaryWise", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("w", "Go to Wallet", cmd_wallet, r);
    register_command!("wallet", "Go to Wallet", cmd_wallet, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("p", "Go to Profile", cmd_profile, r);
    register_command!("profile", "Go to Profile", cmd_profile, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "income",
        "Set salary and re-split (e.g. :income 4500, or :income 4500 300)",
        cmd_income,
        r
    );
    register_command!("i", "Set salary (e.g. :i 4500)", cmd_income, r);
    register_command!(
        "bonus",
        "Side-hustle income (e.g. :bonus 500, :bonus on, :bonus off)",
        cmd_bonus,
        r
    );
    register_command!(
        "spend",
        "Log a spend (e.g. :spend 120 food waakye)",
        cmd_spend,
        r
    );
    register_command!(
        "set",
        "Set a category amount (e.g. :set rent 1500)",
        cmd_set,
        r
    );
    register_command!("save", "Save edited allocations", cmd_save, r);
    register_command!(
        "discard",
        "Discard edited allocations",
        cmd_discard,
        r
    );
    register_command!(
        "suggest",
        "Reset allocations to the suggested split",
        cmd_suggest,
        r
    );
    register_command!("tip", "Ask for a new money tip", cmd_tip, r);
    register_command!(
        "export",
        "Export spends to CSV (e.g. :export ~/spends.csv)",
        cmd_export,
        r
    );
    register_command!("reset", "Erase all data and start over", cmd_reset, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Argument parsing ─────────────────────────────────────────

/// `<amount> <category> [note...]`
pub(crate) fn parse_spend_args(args: &str) -> Result<(Decimal, String, Option<String>), String> {
    let mut parts = args.split_whitespace();
    let amount = parts
        .next()
        .and_then(parse_amount)
        .ok_or("Usage: :spend <amount> <category> [note]")?;
    let category = parts
        .next()
        .ok_or("Usage: :spend <amount> <category> [note]")?
        .to_string();
    let note = parts.collect::<Vec<_>>().join(" ");
    Ok((amount, category, (!note.is_empty()).then_some(note)))
}

/// `<category words...> <amount>`; the amount is always the last word so
/// category names with spaces work.
pub(crate) fn parse_set_args(args: &str) -> Option<(&str, Decimal)> {
    let (key, amount) = args.trim().rsplit_once(' ')?;
    let amount = parse_amount(amount)?;
    let key = key.trim();
    (!key.is_empty()).then_some((key, amount))
}

/// Log one spend and report it on the status line.
pub(crate) fn log_spend(
    app: &mut App,
    store: &mut Store,
    category_id: &str,
    amount: Decimal,
    note: Option<String>,
) {
    let mut new = NewTransaction::new(category_id, amount);
    new.note = note;
    match store.append_transaction(new) {
        Ok(state) => {
            let name = Category::resolve(&state.categories, category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| category_id.to_string());
            app.wallet_index = 0;
            app.wallet_scroll = 0;
            app.set_status(format!("Logged {} on {name}", format_amount(amount)));
        }
        Err(e) => app.set_status(format!("Could not log spend: {e}")),
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.switch_screen(Screen::Dashboard, store.state());
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.switch_screen(Screen::Categories, store.state());
    Ok(())
}

fn cmd_wallet(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.switch_screen(Screen::Wallet, store.state());
    Ok(())
}

fn cmd_analytics(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.switch_screen(Screen::Analytics, store.state());
    Ok(())
}

fn cmd_profile(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.switch_screen(Screen::Profile, store.state());
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_income(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.switch_screen(Screen::Income, store.state());
        return Ok(());
    }

    let mut parts = args.split_whitespace();
    let Some(salary) = parts.next().and_then(parse_amount) else {
        app.set_status("Usage: :income <salary> [bonus]");
        return Ok(());
    };
    let (bonus, include_bonus) = match parts.next() {
        Some(raw) => match parse_amount(raw) {
            Some(bonus) => (bonus, !bonus.is_zero()),
            None => {
                app.set_status(format!("Invalid bonus: {raw}"));
                return Ok(());
            }
        },
        None => (store.state().bonus, store.state().include_bonus),
    };

    let total = store
        .update_income(salary, bonus, include_bonus)
        .total_income();
    app.load_draft(store.state());
    app.income_form = super::app::IncomeForm::from_state(store.state());
    app.set_status(format!("Budget split for {}", format_amount(total)));
    Ok(())
}

fn cmd_bonus(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let state = store.state();
    let (bonus, include_bonus) = match args {
        "on" => (state.bonus, true),
        "off" => (state.bonus, false),
        raw => match parse_amount(raw) {
            Some(bonus) => (bonus, true),
            None => {
                app.set_status("Usage: :bonus <amount> | on | off");
                return Ok(());
            }
        },
    };
    let salary = state.income;
    let total = store
        .update_income(salary, bonus, include_bonus)
        .total_income();
    app.load_draft(store.state());
    app.income_form = super::app::IncomeForm::from_state(store.state());
    app.set_status(format!("Budget split for {}", format_amount(total)));
    Ok(())
}

fn cmd_spend(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let (amount, key, note) = match parse_spend_args(args) {
        Ok(parsed) => parsed,
        Err(usage) => {
            app.set_status(usage);
            return Ok(());
        }
    };
    let Some(id) = Category::find_by_key(&store.state().categories, &key).map(|c| c.id.clone())
    else {
        app.set_status(format!("Unknown category: {key}"));
        return Ok(());
    };
    log_spend(app, store, &id, amount, note);
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some((key, amount)) = parse_set_args(args) else {
        app.set_status("Usage: :set <category> <amount>");
        return Ok(());
    };
    let Some(id) = Category::find_by_key(&store.state().categories, key).map(|c| c.id.clone())
    else {
        app.set_status(format!("Unknown category: {key}"));
        return Ok(());
    };

    let cap = store.state().total_income();
    let amount = amount.min(cap.max(Decimal::ZERO));
    match store.set_manual_allocation(&id, amount) {
        Ok(_) => {
            // Keep other unsaved edits; only this row follows the stored value.
            app.set_draft_amount(&id, amount, cap);
            app.set_status(format!("{key} set to {}", format_amount(amount)));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn cmd_save(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if !app.draft_is_dirty(store.state()) {
        app.set_status("No allocation changes to save");
        return Ok(());
    }
    match store.update_categories(app.draft.clone()) {
        Ok(_) => app.set_status("Budget saved"),
        Err(e) => app.set_status(format!("Could not save budget: {e}")),
    }
    Ok(())
}

fn cmd_discard(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.load_draft(store.state());
    app.set_status("Changes discarded");
    Ok(())
}

fn cmd_suggest(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.confirm(
        PendingAction::ResetToSuggested,
        "Reset every category to the suggested split?",
    );
    Ok(())
}

fn cmd_tip(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if !store.state().has_income() {
        app.set_status("Set your income first with :income");
        return Ok(());
    }
    app.refresh_tip(store.state());
    app.set_status("Asking for a new tip...");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let path = export_path(args);
    let state = store.state();
    match state.transactions.export_csv(&state.categories, &path) {
        Ok(0) => app.set_status("No spends to export"),
        Ok(count) => app.set_status(format!("Exported {count} spends to {}", path.display())),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

/// Explicit path (with `~/` expansion) or a dated file in `$HOME`.
pub(crate) fn export_path(arg: &str) -> PathBuf {
    let arg = arg.trim();
    if arg.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let today = chrono::Local::now().format("%Y-%m-%d");
        PathBuf::from(format!("{home}/salarywise-spends-{today}.csv"))
    } else {
        PathBuf::from(crate::run::shellexpand(arg))
    }
}

fn cmd_reset(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.confirm(
        PendingAction::ResetAll,
        "Erase income, allocations and every spend?",
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("spend", "spend"), 0);
        assert_eq!(levenshtein("spnd", "spend"), 1);
        assert_eq!(levenshtein("", "tip"), 3);
    }

    #[test]
    fn test_find_closest() {
        assert_eq!(find_closest("spned"), "spend");
        assert_eq!(find_closest("exprt"), "export");
    }

    #[test]
    fn test_parse_spend_args() {
        let (amount, cat, note) = parse_spend_args("120 food waakye and shito").unwrap();
        assert_eq!(amount, dec!(120));
        assert_eq!(cat, "food");
        assert_eq!(note.as_deref(), Some("waakye and shito"));

        let (_, _, note) = parse_spend_args("5 transport").unwrap();
        assert!(note.is_none());
    }

    #[test]
    fn test_parse_spend_args_rejects() {
        assert!(parse_spend_args("").is_err());
        assert!(parse_spend_args("lots food").is_err());
        assert!(parse_spend_args("12").is_err());
    }

    #[test]
    fn test_parse_set_args() {
        assert_eq!(parse_set_args("rent 1500"), Some(("rent", dec!(1500))));
        assert_eq!(
            parse_set_args("Roof over head 1,200"),
            Some(("Roof over head", dec!(1200)))
        );
        assert_eq!(parse_set_args("1500"), None);
        assert_eq!(parse_set_args("rent much"), None);
    }

    #[test]
    fn test_export_path_expands_home() {
        let path = export_path("~/out.csv");
        assert!(path.to_string_lossy().ends_with("/out.csv"));
        assert!(!path.to_string_lossy().starts_with('~'));
        assert_eq!(export_path("/tmp/x.csv"), PathBuf::from("/tmp/x.csv"));
    }

    #[test]
    fn test_every_command_has_description() {
        assert!(COMMANDS.values().all(|c| !c.description.is_empty()));
        assert!(COMMANDS.contains_key("spend"));
        assert!(COMMANDS.contains_key("reset"));
    }
}
