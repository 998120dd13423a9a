mod app;
mod cli;
mod config;
mod error;
mod integrations;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{
    CalculatorField, CalculatorScreen, ChatScreen, HomeScreen, ResourcesScreen, ResultsScreen,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.command.is_none());

    if let Some(Commands::Init) = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = match Config::load_or_default(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `carbonwise init` or fix the file passed with --config");
            std::process::exit(1);
        }
    };

    if let Some(command) = cli.command {
        return cli::run(command, config).await;
    }

    let mut app = App::new(config);
    if !app.assistant.is_configured() {
        app.set_status("Gemini API key not configured - chat replies unavailable");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// The TUI owns the terminal, so logs go to a file there; subcommands log
/// to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8, tui: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let file = Config::log_path().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(Into::into)
    });

    match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        draw(terminal, app)?;

        // An outbound call was queued by the last key press. The frame above
        // already shows its "waiting" status; run it, then redraw.
        if app.pending.is_some() {
            app.process_pending().await;
            continue;
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    _ if app.is_typing() => handle_screen_input(app, key.code),
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Esc => app.switch_screen(Screen::Home),
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => handle_screen_input(app, key.code),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &App) -> Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        let status = app.status_message.as_deref();

        match app.screen {
            Screen::Home => {
                let screen = HomeScreen::new(&app.name)
                    .with_last_total(app.footprint.as_ref().map(|fp| fp.emissions.total()));
                f.render_widget(screen, area);
            }
            Screen::Calculator => {
                let values: Vec<String> = CalculatorField::all()
                    .iter()
                    .map(|field| app.field_value(*field))
                    .collect();
                let state = &app.calculator_state;
                let screen = CalculatorScreen::new(&values)
                    .with_focus(state.focused_field)
                    .editing(state.editing, &state.edit_buffer)
                    .with_status(status);
                f.render_widget(screen, area);
            }
            Screen::Results => {
                let screen = ResultsScreen::new(app.footprint.as_ref()).with_status(status);
                f.render_widget(screen, area);
            }
            Screen::Chat => {
                let screen = ChatScreen::new(app.transcript.entries(), &app.chat_state.input)
                    .typing(app.chat_state.typing)
                    .configured(app.assistant.is_configured())
                    .with_status(status);
                f.render_widget(screen, area);
            }
            Screen::Resources => f.render_widget(ResourcesScreen, area),
        }
    })?;

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Calculator => handle_calculator_input(app, code),
        Screen::Chat => handle_chat_input(app, code),
        Screen::Home => {
            if let KeyCode::Enter = code {
                app.switch_screen(Screen::Calculator);
            }
        }
        Screen::Results | Screen::Resources => {}
    }
}

fn handle_calculator_input(app: &mut App, code: KeyCode) {
    if app.calculator_state.editing {
        match code {
            KeyCode::Esc => app.calculator_state.cancel_editing(),
            KeyCode::Enter => {
                let value = app.calculator_state.finish_editing();
                let field = app.calculator_state.focused_field;
                app.clear_status();
                app.apply_field_value(field, &value);
            }
            KeyCode::Backspace => {
                app.calculator_state.edit_buffer.pop();
            }
            KeyCode::Char(c) => app.calculator_state.edit_buffer.push(c),
            _ => {}
        }
        return;
    }

    let field = app.calculator_state.focused_field;
    match code {
        KeyCode::Up | KeyCode::BackTab => app.calculator_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.calculator_state.next_field(),
        KeyCode::Left if field.is_select() => app.cycle_option(field, false),
        KeyCode::Right if field.is_select() => app.cycle_option(field, true),
        KeyCode::Enter if field.is_select() => app.cycle_option(field, true),
        KeyCode::Enter => {
            let current = app.field_value(field);
            app.calculator_state.start_editing(&current);
        }
        KeyCode::Char('c') => app.calculate(),
        _ => {}
    }
}

fn handle_chat_input(app: &mut App, code: KeyCode) {
    if !app.chat_state.typing {
        if let KeyCode::Char('i') | KeyCode::Enter = code {
            app.chat_state.typing = true;
        }
        return;
    }

    match code {
        KeyCode::Esc => app.chat_state.typing = false,
        KeyCode::Enter => app.submit_chat(),
        KeyCode::Backspace => {
            app.chat_state.input.pop();
        }
        KeyCode::Char(c) => app.chat_state.input.push(c),
        _ => {}
    }
}
