use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::advice::Advisor;
use crate::store::Store;
use crate::ui::app::{App, EditTarget, InputMode, PendingAction, Screen, SLIDER_STEP};
use crate::ui::commands;
use crate::ui::util::{format_amount, parse_amount, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long to wait for a key before redrawing, so finished tips show up.
const TICK: Duration = Duration::from_millis(200);

/// Rows taken by the wallet's category picker and list borders.
const WALLET_CHROME: usize = 5;

pub(crate) fn as_tui(store: &mut Store, advisor: Arc<dyn Advisor>) -> Result<()> {
    let mut app = App::new(store.state(), advisor);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("TUI exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        app.poll_tip();
        if matches!(app.screen, Screen::Dashboard | Screen::Analytics) {
            app.sync_tip(store.state());
        }

        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, store.state());
        })?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app, store),
                InputMode::Confirm => handle_confirm_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    if app.screen == Screen::Income && handle_income_input(key, app, store) {
        return Ok(());
    }

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, store),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if let Some(&screen) = Screen::all().get(idx) {
                app.switch_screen(screen, store.state());
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            app.switch_screen(screens[next], store.state());
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.switch_screen(screens[prev], store.state());
        }
        KeyCode::Enter => handle_enter(app, store),
        KeyCode::Esc => handle_escape(app, store),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app, store),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app, store);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }

        // Categories
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Categories => {
            app.adjust_draft(SLIDER_STEP, store.state().total_income());
        }
        KeyCode::Char('-') if app.screen == Screen::Categories => {
            app.adjust_draft(-SLIDER_STEP, store.state().total_income());
        }
        KeyCode::Char('e') if app.screen == Screen::Categories => edit_selected_allocation(app),
        KeyCode::Char('s') if app.screen == Screen::Categories => {
            commands::handle_command("save", app, store)?;
        }
        KeyCode::Char('r') if app.screen == Screen::Categories => {
            commands::handle_command("suggest", app, store)?;
        }

        // Wallet
        KeyCode::Char('h') | KeyCode::Left if app.screen == Screen::Wallet => {
            app.cycle_wallet_category(false, store.state().categories.len());
        }
        KeyCode::Char('l') | KeyCode::Right if app.screen == Screen::Wallet => {
            app.cycle_wallet_category(true, store.state().categories.len());
        }
        KeyCode::Char('a') if app.screen == Screen::Wallet => start_spend(app, store),

        // Dashboard / Analytics / Profile
        KeyCode::Char('i') if matches!(app.screen, Screen::Dashboard | Screen::Profile) => {
            app.switch_screen(Screen::Income, store.state());
        }
        KeyCode::Char('t') if matches!(app.screen, Screen::Dashboard | Screen::Analytics) => {
            commands::handle_command("tip", app, store)?;
        }
        KeyCode::Char('R') if app.screen == Screen::Profile => {
            commands::handle_command("reset", app, store)?;
        }
        _ => {}
    }
    Ok(())
}

/// Keypad keys on the income screen. Returns false for keys it leaves to
/// the normal handler (tabs, `:`, help, quit).
fn handle_income_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.income_form.press(c),
        KeyCode::Backspace => app.income_form.backspace(),
        KeyCode::Delete => app.income_form.clear(),
        KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Up | KeyCode::Down => {
            app.income_form.switch_field();
        }
        KeyCode::Char('b') | KeyCode::Char(' ') => app.income_form.toggle_bonus(),
        KeyCode::Enter => submit_income(app, store),
        KeyCode::Esc => {
            let back = if store.state().has_income() {
                Screen::Dashboard
            } else {
                Screen::Welcome
            };
            app.switch_screen(back, store.state());
        }
        _ => return false,
    }
    true
}

fn submit_income(app: &mut App, store: &mut Store) {
    let form = app.income_form.clone();
    let salary = form.salary_value();
    if salary.is_zero() {
        app.set_status("Enter your monthly salary first");
        return;
    }
    let total = store
        .update_income(salary, form.bonus_value(), form.include_bonus)
        .total_income();
    app.load_draft(store.state());
    app.switch_screen(Screen::Dashboard, store.state());
    app.set_status(format!("Budget split for {}", format_amount(total)));
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, store: &mut Store) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            if let Some(target) = app.edit_target.take() {
                apply_edit(target, &input, app, store);
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.edit_target = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn apply_edit(target: EditTarget, input: &str, app: &mut App, store: &mut Store) {
    match target {
        EditTarget::Allocation { category_id } => match parse_amount(input) {
            Some(amount) => {
                let cap = store.state().total_income();
                app.set_draft_amount(&category_id, amount, cap);
                app.set_status("Draft updated; press s to save");
            }
            None => app.set_status(format!("Invalid amount: {}", input.trim())),
        },
        EditTarget::Spend { category_id } => {
            let input = input.trim();
            let (amount_text, note) = input
                .split_once(' ')
                .map(|(a, n)| (a, n.trim()))
                .unwrap_or((input, ""));
            match parse_amount(amount_text) {
                Some(amount) => {
                    let note = (!note.is_empty()).then(|| note.to_string());
                    commands::log_spend(app, store, &category_id, amount, note);
                }
                None => app.set_status(format!("Invalid amount: {amount_text}")),
            }
        }
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut Store) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::ResetAll => match store.reset() {
                        Ok(()) => {
                            app.reset_session(store.state());
                            app.set_status("All data erased");
                        }
                        Err(e) => app.set_status(format!("Reset failed: {e:#}")),
                    },
                    PendingAction::ResetToSuggested => {
                        store.reset_to_suggested();
                        app.load_draft(store.state());
                        app.set_status("Allocations reset to the suggested split");
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Screen actions ───────────────────────────────────────────

fn edit_selected_allocation(app: &mut App) {
    if let Some(id) = app.selected_draft().map(|c| c.id.clone()) {
        app.start_edit(EditTarget::Allocation { category_id: id });
    }
}

fn start_spend(app: &mut App, store: &Store) {
    match app.wallet_category(store.state()).map(|c| c.id.clone()) {
        Some(id) => app.start_edit(EditTarget::Spend { category_id: id }),
        None => app.set_status("No categories to log against"),
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn wallet_page(app: &App) -> usize {
    app.visible_rows.saturating_sub(WALLET_CHROME).max(1)
}

fn handle_enter(app: &mut App, store: &mut Store) {
    match app.screen {
        Screen::Welcome => app.switch_screen(Screen::Income, store.state()),
        Screen::Categories => edit_selected_allocation(app),
        Screen::Wallet => start_spend(app, store),
        _ => {}
    }
}

fn handle_escape(app: &mut App, store: &Store) {
    if app.screen == Screen::Categories && app.draft_is_dirty(store.state()) {
        app.load_draft(store.state());
        app.set_status("Changes discarded");
    } else {
        app.status_message.clear();
    }
}

fn handle_move_down(app: &mut App, store: &Store) {
    match app.screen {
        Screen::Categories => {
            if app.category_index + 1 < app.draft.len() {
                app.category_index += 1;
            }
        }
        Screen::Wallet => {
            let page = wallet_page(app);
            let len = store.state().transactions.len();
            scroll_down(&mut app.wallet_index, &mut app.wallet_scroll, len, page);
        }
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Categories => {
            app.category_index = app.category_index.saturating_sub(1);
        }
        Screen::Wallet => scroll_up(&mut app.wallet_index, &mut app.wallet_scroll),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Categories => app.category_index = 0,
        Screen::Wallet => scroll_to_top(&mut app.wallet_index, &mut app.wallet_scroll),
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App, store: &Store) {
    match app.screen {
        Screen::Categories => {
            app.category_index = app.draft.len().saturating_sub(1);
        }
        Screen::Wallet => {
            let page = wallet_page(app);
            let len = store.state().transactions.len();
            scroll_to_bottom(&mut app.wallet_index, &mut app.wallet_scroll, len, page);
        }
        _ => {}
    }
}
