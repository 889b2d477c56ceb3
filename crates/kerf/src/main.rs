use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kerf::{ui, App, Config};
use log::LevelFilter;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::{File, OpenOptions};
use std::{env, io, time::Duration};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logger();

    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        }
    };

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let args: Vec<String> = env::args().skip(1).collect();
    let mut app = App::new(config);
    app.open_files(args.as_slice());

    if let Err(e) = enable_raw_mode() {
        eprintln!("Failed to initialise the terminal: {}", e);
        return Err(e.into());
    }
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        eprintln!("Failed to configure the terminal: {}", e);
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    restore_terminal()?;

    if let Err(err) = res {
        log::error!("Application error: {:#}", err);
        eprintln!("kerf: {:#}", err);
        return Err(err);
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    log::info!("Event loop started with {} buffer(s)", app.buffer_count());

    loop {
        if app.should_quit() {
            log::info!("Application shutdown requested");
            break;
        }

        if let Err(e) = terminal.draw(|f| ui::draw(f, app)) {
            log::error!("Terminal draw error: {}", e);
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(width, height) => {
                    log::debug!("Terminal resized to {}x{}", width, height);
                    app.resize(width, height);
                }
                _ => {}
            }
        }

        app.update_status();
    }

    log::info!("Event loop ended");
    Ok(())
}

/// Log to a file, since the terminal belongs to the editor while it runs.
fn init_logger() {
    let mut logger = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("kerf", LevelFilter::Debug);
        logger.filter_module("linecore", LevelFilter::Debug);
    }
    if let Some(file) = open_log_file() {
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();
}

fn open_log_file() -> Option<File> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    let _ = execute!(stdout, crossterm::cursor::Show);
    Ok(())
}
