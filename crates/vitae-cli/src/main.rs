//! `vitae`: a terminal résumé editor backed by a remote PDF compile service.
//!
//! # Usage
//!
//! ```text
//! vitae                                   # edit, starting from an empty skeleton
//! vitae edit --input resume.json          # edit an existing dataset
//! vitae compile --demo --out ./pdf        # compile once and save the PDF
//! vitae export --demo > resume.json       # print a dataset to start from
//! VITAE_API_URL=https://example.com/api vitae
//! ```

mod app;
mod fields;
mod settings;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result, bail};
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vitae_compile::{ClientConfig, CompileClient, Submitter};
use vitae_core::{Document, DocumentStore};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "vitae", version, about = "Terminal résumé editor with remote PDF compilation")]
struct Args {
  /// Path to a TOML config file (api_url, output_dir).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Base URL of the compile service (default: http://localhost:8080/api).
  #[arg(long, global = true)]
  api_url: Option<String>,

  /// Directory compiled PDFs are saved into (default: current directory).
  #[arg(long, value_name = "DIR", global = true)]
  out: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Edit a résumé interactively.
  Edit(Source),
  /// Compile a résumé once and save the PDF.
  Compile(Source),
  /// Print a dataset as JSON.
  Export {
    /// Print the demo résumé instead of the empty skeleton.
    #[arg(long)]
    demo: bool,
  },
}

/// Where the starting document comes from.
#[derive(clap::Args, Debug, Default)]
struct Source {
  /// JSON dataset to load.
  #[arg(short, long, value_name = "FILE", conflicts_with = "demo")]
  input: Option<PathBuf>,

  /// Start from the built-in demo résumé.
  #[arg(long)]
  demo: bool,
}

impl Source {
  fn load(&self) -> Result<Document> {
    match &self.input {
      Some(path) => load_dataset(path),
      None if self.demo => Ok(Document::demo()),
      None => Ok(Document::skeleton()),
    }
  }
}

fn load_dataset(path: &Path) -> Result<Document> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading dataset {}", path.display()))?;
  Document::from_json(&raw).with_context(|| format!("parsing dataset {}", path.display()))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::resolve(args.config.as_deref(), args.api_url, args.out)?;

  match args.command.unwrap_or(Command::Edit(Source::default())) {
    Command::Export { demo } => {
      let doc = if demo {
        Document::demo()
      } else {
        Document::skeleton()
      };
      println!("{}", doc.to_json_pretty()?);
      Ok(())
    }
    Command::Compile(source) => {
      init_tracing(None)?;
      let doc = source.load()?;
      compile_once(&settings, &doc).await
    }
    Command::Edit(source) => {
      let log_path = std::env::temp_dir().join("vitae.log");
      init_tracing(Some(&log_path))?;
      let doc = source.load()?;
      edit(&settings, doc).await
    }
  }
}

/// Log to stderr, or to `log_file` when the terminal is owned by the TUI.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  let builder = tracing_subscriber::fmt().with_env_filter(filter);

  match log_file {
    Some(path) => {
      let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      builder
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    }
    None => builder.with_writer(io::stderr).init(),
  }
  Ok(())
}

fn submitter(settings: &Settings) -> Result<Submitter> {
  let client = CompileClient::new(ClientConfig {
    base_url: settings.api_url.clone(),
  })
  .context("building compile client")?;
  tracing::info!(base_url = %client.base_url(), "compile service");
  Ok(Submitter::new(client))
}

// ─── One-shot compile ─────────────────────────────────────────────────────────

async fn compile_once(settings: &Settings, doc: &Document) -> Result<()> {
  let submitter = submitter(settings)?;
  let compiled = match submitter.submit(doc).await {
    Ok(compiled) => compiled,
    Err(e) => bail!("{e}"),
  };

  match compiled.artifact {
    Some(artifact) => {
      let path = artifact
        .save_in(&settings.output_dir)
        .context("saving compiled PDF")?;
      println!("{}", path.display());
    }
    None => println!("{} ({})", compiled.message, compiled.pdf_url),
  }
  Ok(())
}

// ─── Interactive editor ───────────────────────────────────────────────────────

async fn edit(settings: &Settings, doc: Document) -> Result<()> {
  let submitter = submitter(settings)?;
  let mut app = App::new(
    DocumentStore::with_document(doc),
    submitter,
    settings.output_dir.clone(),
  );

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.poll_submission().await;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
