use anyhow::Result;

use crate::advice::{self, AdviceRequest, Advisor};
use crate::budget::{self, Summary};
use crate::models::{Category, NewTransaction};
use crate::store::{Store, STORAGE_KEY};
use crate::ui::commands::export_path;
use crate::ui::util::{format_amount, format_percent, parse_amount, truncate};

pub(crate) fn as_cli(args: &[String], store: &mut Store, advisor: &dyn Advisor) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(store),
        "income" => cli_income(&args[2..], store),
        "spend" => cli_spend(&args[2..], store),
        "categories" => cli_categories(store),
        "transactions" | "t" => cli_transactions(store),
        "suggest" => cli_suggest(store),
        "tip" => cli_tip(store, advisor),
        "export" => cli_export(&args[2..], store),
        "reset" => cli_reset(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("salarywise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SalaryWise: split your salary, track your spends");
    println!();
    println!("Usage: salarywise [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print income, allocations and burn rate");
    println!("  income <salary>               Set salary and re-split every category");
    println!("    --bonus <amount>            Side-hustle income (kept if omitted)");
    println!("    --include-bonus             Count the bonus in the split");
    println!("  spend <amount> <category> [note...]");
    println!("                                Log a spend (category id or name)");
    println!("  categories                    List categories with budget vs actual");
    println!("  transactions                  List logged spends, newest first");
    println!("  suggest                       Reset allocations to the suggested split");
    println!("  tip                           Ask for a money tip");
    println!("  export [path]                 Export spends to CSV");
    println!("  reset --yes                   Erase all data");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(store: &Store) -> Result<()> {
    let state = store.state();
    let summary = Summary::of(state);

    println!("SalaryWise summary");
    println!("{}", "─".repeat(44));
    println!("  Salary:        {}", format_amount(state.income));
    println!(
        "  Bonus:         {}{}",
        format_amount(state.bonus),
        if state.include_bonus { "" } else { " (not in split)" }
    );
    println!("  Total income:  {}", format_amount(summary.total_income));
    println!("  Allocated:     {}", format_amount(summary.total_allocated));
    println!("  Unallocated:   {}", format_amount(summary.unallocated));
    println!("  Remaining:     {}  [{}]", format_amount(summary.remaining), summary.status);
    println!("  Spent:         {}", format_amount(summary.total_spent));
    println!(
        "  Burn rate:     {}{}",
        format_percent(summary.burn_rate),
        if budget::is_high_burn(summary.burn_rate) {
            "  (high)"
        } else {
            ""
        }
    );
    if summary.is_over_allocated() {
        println!();
        println!(
            "  Warning: allocations exceed income by {}",
            format_amount(summary.unallocated.abs())
        );
    }

    if let Some(saved) = store.blobs().blob_updated_at(STORAGE_KEY)? {
        println!();
        println!("  Last saved:    {saved}");
    }
    Ok(())
}

fn cli_income(args: &[String], store: &mut Store) -> Result<()> {
    let salary_arg = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: salarywise income <salary> [--bonus N] [--include-bonus]"))?;
    let salary =
        parse_amount(salary_arg).ok_or_else(|| anyhow::anyhow!("Invalid salary: {salary_arg}"))?;

    let bonus = match args.windows(2).find(|w| w[0] == "--bonus") {
        Some(w) => parse_amount(&w[1]).ok_or_else(|| anyhow::anyhow!("Invalid bonus: {}", w[1]))?,
        None => store.state().bonus,
    };
    let include_bonus = args.iter().any(|a| a == "--include-bonus");

    let state = store.update_income(salary, bonus, include_bonus);
    println!("Budget split for {}:", format_amount(state.total_income()));
    for cat in &state.categories {
        println!("  {:<20} {:>16}", truncate(&cat.name, 20), format_amount(cat.amount));
    }
    Ok(())
}

fn cli_spend(args: &[String], store: &mut Store) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: salarywise spend <amount> <category> [note...]");
    }
    let amount = parse_amount(&args[0]).ok_or_else(|| anyhow::anyhow!("Invalid amount: {}", args[0]))?;
    let id = Category::find_by_key(&store.state().categories, &args[1])
        .map(|c| c.id.clone())
        .ok_or_else(|| {
            let ids: Vec<&str> = store
                .state()
                .categories
                .iter()
                .map(|c| c.id.as_str())
                .collect();
            anyhow::anyhow!("Unknown category '{}'. Choose one of: {}", args[1], ids.join(", "))
        })?;

    let mut new = NewTransaction::new(id.clone(), amount);
    if args.len() > 2 {
        new = new.with_note(args[2..].join(" "));
    }
    let state = store.append_transaction(new)?;
    println!(
        "Logged {} on {} ({} spent there so far)",
        format_amount(amount),
        id,
        format_amount(budget::actual_spend(&id, &state.transactions))
    );
    Ok(())
}

fn cli_categories(store: &Store) -> Result<()> {
    let state = store.state();
    let total = state.total_income();
    let report = budget::category_report(&state.categories, &state.transactions);

    println!(
        "{:<10} {:<20} {:>6} {:>16} {:>16}",
        "ID", "Name", "Share", "Budget", "Spent"
    );
    println!("{}", "─".repeat(72));
    for row in &report {
        println!(
            "{:<10} {:<20} {:>6} {:>16} {:>16}{}",
            truncate(&row.id, 10),
            truncate(&row.name, 20),
            format_percent(budget::share_of_income(row.budget, total)),
            format_amount(row.budget),
            format_amount(row.actual),
            if row.is_over() { "  over" } else { "" }
        );
    }
    Ok(())
}

fn cli_transactions(store: &Store) -> Result<()> {
    let state = store.state();
    if state.transactions.is_empty() {
        println!("No spends logged");
        return Ok(());
    }

    println!("{:<11} {:<20} {:<28} {:>14}", "Date", "Category", "Note", "Amount");
    println!("{}", "─".repeat(76));
    for txn in &state.transactions {
        let cat = Category::resolve(&state.categories, &txn.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown");
        println!(
            "{:<11} {:<20} {:<28} {:>14}",
            txn.day(),
            truncate(cat, 20),
            truncate(&txn.note, 28),
            format_amount(txn.amount)
        );
    }
    println!();
    println!("Total spent: {}", format_amount(budget::total_spent(&state.transactions)));
    Ok(())
}

fn cli_suggest(store: &mut Store) -> Result<()> {
    let state = store.reset_to_suggested();
    println!("Allocations reset for {}:", format_amount(state.total_income()));
    for cat in &state.categories {
        println!(
            "  {:<20} {:>6} {:>16}",
            truncate(&cat.name, 20),
            format_percent(cat.default_percentage),
            format_amount(cat.amount)
        );
    }
    Ok(())
}

fn cli_tip(store: &Store, advisor: &dyn Advisor) -> Result<()> {
    let state = store.state();
    if !state.has_income() {
        anyhow::bail!("Set your income first: salarywise income <salary>");
    }
    println!("{}", advice::tip_or_fallback(advisor, &AdviceRequest::from_state(state)));
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let path = export_path(args.first().map(String::as_str).unwrap_or(""));
    let state = store.state();
    let count = state.transactions.export_csv(&state.categories, &path)?;
    if count == 0 {
        println!("No spends to export");
    } else {
        println!("Exported {count} spends to {}", path.display());
    }
    Ok(())
}

fn cli_reset(args: &[String], store: &mut Store) -> Result<()> {
    if !args.iter().any(|a| a == "--yes") {
        anyhow::bail!("This erases income, allocations and every spend. Re-run with --yes");
    }
    store.reset()?;
    println!("All data erased");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::advice::OfflineAdvisor;
    use crate::db::Database;

    fn store() -> Store {
        Store::open(Database::open_in_memory().unwrap())
    }

    fn run(store: &mut Store, args: &[&str]) -> Result<()> {
        let mut full = vec!["salarywise".to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        as_cli(&full, store, &OfflineAdvisor)
    }

    #[test]
    fn test_income_splits() {
        let mut store = store();
        run(&mut store, &["income", "4500"]).unwrap();
        let amounts: Vec<Decimal> = store.state().categories.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![dec!(1575), dec!(1125), dec!(675), dec!(675), dec!(450)]);
    }

    #[test]
    fn test_income_with_bonus() {
        let mut store = store();
        run(&mut store, &["income", "4500", "--bonus", "500", "--include-bonus"]).unwrap();
        assert_eq!(store.state().total_income(), dec!(5000));
        assert_eq!(store.state().categories[0].amount, dec!(1750));

        // Bonus is kept but left out unless asked for.
        run(&mut store, &["income", "4500"]).unwrap();
        assert_eq!(store.state().bonus, dec!(500));
        assert_eq!(store.state().total_income(), dec!(4500));
    }

    #[test]
    fn test_income_rejects_bad_input() {
        let mut store = store();
        assert!(run(&mut store, &["income"]).is_err());
        assert!(run(&mut store, &["income", "lots"]).is_err());
        assert!(run(&mut store, &["income", "100", "--bonus", "x"]).is_err());
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let mut store = store();
        run(&mut store, &["income", "5000000000000000000000000000"]).unwrap_err();
        assert!(!store.state().has_income());

        run(&mut store, &["income", "1000"]).unwrap();
        for _ in 0..2 {
            run(&mut store, &["spend", "50000000000000000000000000000", "food"]).unwrap_err();
        }
        assert!(store.state().transactions.is_empty());
        run(&mut store, &["summary"]).unwrap();
    }

    #[test]
    fn test_spend_by_id_and_name() {
        let mut store = store();
        run(&mut store, &["income", "3000"]).unwrap();
        run(&mut store, &["spend", "120", "food", "waakye", "and", "egg"]).unwrap();
        run(&mut store, &["spend", "15", "TRANSPORT"]).unwrap();

        let ledger = &store.state().transactions;
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[1].note, "waakye and egg");
        assert_eq!(ledger.entries()[0].category_id, "transport");
        assert_eq!(ledger.entries()[0].note, crate::models::DEFAULT_NOTE);
    }

    #[test]
    fn test_spend_rejects() {
        let mut store = store();
        assert!(run(&mut store, &["spend", "10"]).is_err());
        assert!(run(&mut store, &["spend", "10", "jollof"]).is_err());
        assert!(run(&mut store, &["spend", "0", "food"]).is_err());
        assert!(store.state().transactions.is_empty());
    }

    #[test]
    fn test_suggest_restores_split() {
        let mut store = store();
        run(&mut store, &["income", "1000"]).unwrap();
        store.set_manual_allocation("rent", dec!(1)).unwrap();
        run(&mut store, &["suggest"]).unwrap();
        assert_eq!(store.state().categories[0].amount, dec!(350));
    }

    #[test]
    fn test_reset_requires_yes() {
        let mut store = store();
        run(&mut store, &["income", "1000"]).unwrap();
        assert!(run(&mut store, &["reset"]).is_err());
        assert_eq!(store.state().income, dec!(1000));
        run(&mut store, &["reset", "--yes"]).unwrap();
        assert!(!store.state().has_income());
    }

    #[test]
    fn test_tip_needs_income() {
        let mut store = store();
        assert!(run(&mut store, &["tip"]).is_err());
        run(&mut store, &["income", "1000"]).unwrap();
        run(&mut store, &["tip"]).unwrap();
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spends.csv");
        let mut store = store();
        run(&mut store, &["income", "1000"]).unwrap();
        run(&mut store, &["spend", "20", "chill"]).unwrap();
        run(&mut store, &["export", path.to_str().unwrap()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("date,category,note,amount"));
        assert!(text.contains("Fufu & Chill"));
    }

    #[test]
    fn test_read_only_commands() {
        let mut store = store();
        run(&mut store, &["income", "1000"]).unwrap();
        for cmd in ["summary", "categories", "transactions", "help", "version"] {
            run(&mut store, &[cmd]).unwrap();
        }
        assert!(run(&mut store, &["bogus"]).is_err());
    }

    #[test]
    fn test_shellexpand() {
        assert_eq!(shellexpand("/abs/path.csv"), "/abs/path.csv");
        assert!(!shellexpand("~/x.csv").starts_with('~'));
    }
}
