//! CLI entrypoint for lore-forge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use lore_application::{
    ArchetypeStages, AudioSink, BookRepository, ConversationLogger, DocumentStore, EditPageUseCase,
    ExportBookUseCase, GenerateBookError, GenerateBookUseCase, GenerateChapterUseCase,
    NarratePageUseCase, NoConversationLogger, NoProgress, ProgressNotifier, RetryingCaller,
    RunReport,
};
use lore_domain::{Book, NodePath};
use lore_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, HtmlBookExporter, JsonFileBookRepository,
    JsonlConversationLogger, WavFileSink,
};
use lore_presentation::{
    Cli, Command, ConsoleFormatter, EditArgs, ProgressReporter, ShowArgs, SimpleProgress,
};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, prelude::*};

type Stages = ArchetypeStages<GeminiGateway>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref());
    info!("Starting lore-forge");

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{} {}", "config error:".red().bold(), issue);
        } else {
            eprintln!("{} {}", "config warning:".yellow().bold(), issue);
        }
    }

    let app = App::new(config, cli.quiet);
    match cli.subcommand() {
        Command::Show(args) => app.show(args),
        Command::Generate => app.generate().await,
        Command::Chapter { path } => app.chapter(path).await,
        Command::Edit(args) => app.edit(args),
        Command::Narrate { path } => app.narrate(path).await,
        Command::Export { out } => app.export(out),
        Command::Reset { yes } => app.reset(yes),
    }
}

/// Install the stderr subscriber, plus a plain-text file layer when
/// `[logging] file` is set. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8, file: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("lore-forge.log"));
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

/// Wiring shared by the subcommands
struct App {
    config: FileConfig,
    quiet: bool,
}

impl App {
    fn new(config: FileConfig, quiet: bool) -> Self {
        Self { config, quiet }
    }

    fn repository(&self) -> Arc<dyn BookRepository> {
        let storage = &self.config.storage;
        let dir = storage
            .dir
            .clone()
            .unwrap_or_else(JsonFileBookRepository::default_dir);
        Arc::new(JsonFileBookRepository::new(dir, &storage.key))
    }

    fn open_store(&self) -> Result<Arc<DocumentStore>> {
        let store = DocumentStore::open(self.repository())
            .context("Saved book could not be read; `lore-forge reset` starts over")?;
        Ok(Arc::new(store))
    }

    fn conversation_logger(&self) -> Arc<dyn ConversationLogger> {
        self.config
            .logging
            .conversation_log
            .as_ref()
            .and_then(JsonlConversationLogger::new)
            .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
            .unwrap_or_else(|| Arc::new(NoConversationLogger))
    }

    fn stages(&self, logger: Arc<dyn ConversationLogger>) -> Result<Arc<Stages>> {
        let provider = &self.config.provider;
        let api_key = std::env::var(&provider.api_key_env).with_context(|| {
            format!(
                "Set {} to your Gemini API key (see [provider] api_key_env)",
                provider.api_key_env
            )
        })?;

        let mut gateway = GeminiGateway::new(api_key);
        if let Some(base_url) = &provider.base_url {
            gateway = gateway.with_base_url(base_url.clone());
        }

        let caller = RetryingCaller::new(Arc::new(gateway), self.config.pacing_params())
            .with_conversation_logger(logger);
        Ok(Arc::new(ArchetypeStages::new(
            Arc::new(caller),
            self.config.generation_params(),
        )))
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if self.quiet {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        }
    }

    fn data_dir(&self, configured: Option<&PathBuf>, fallback: &str) -> PathBuf {
        configured.cloned().unwrap_or_else(|| {
            self.config
                .storage
                .dir
                .clone()
                .unwrap_or_else(JsonFileBookRepository::default_dir)
                .join(fallback)
        })
    }

    // ==================== Commands ====================

    fn show(&self, args: ShowArgs) -> Result<()> {
        let book = self.open_store()?.snapshot();
        if args.json {
            println!("{}", ConsoleFormatter::format_json(&book));
            return Ok(());
        }
        match args.path {
            None => print!("{}", ConsoleFormatter::format_tree(&book)),
            Some(path) => {
                let (chapter, page) = book.resolve(&path)?;
                print!("{}", ConsoleFormatter::format_node(chapter, page));
            }
        }
        Ok(())
    }

    async fn generate(&self) -> Result<()> {
        let store = self.open_store()?;
        let logger = self.conversation_logger();
        let use_case = GenerateBookUseCase::new(self.stages(Arc::clone(&logger))?, store)
            .with_conversation_logger(logger);

        let progress = self.progress();
        let outcome = use_case.execute_with_progress(progress.as_ref()).await;
        let run = use_case.run_state();

        match outcome {
            Ok(report) => {
                print!("{}", ConsoleFormatter::format_run(&run, Some(&report)));
                Ok(())
            }
            Err(GenerateBookError::Aborted { committed, .. }) => {
                let report = RunReport {
                    chapters: committed,
                };
                print!("{}", ConsoleFormatter::format_run(&run, Some(&report)));
                bail!(
                    "Run stopped after {} chapters; rerun `generate` to retry",
                    report.chapters.len()
                )
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn chapter(&self, path: NodePath) -> Result<()> {
        let store = self.open_store()?;
        let use_case =
            GenerateChapterUseCase::new(self.stages(self.conversation_logger())?, store);

        let progress = self.progress();
        let result = use_case
            .execute_with_progress(path, progress.as_ref())
            .await?;
        println!(
            "{} [{}] {} ({} pages)",
            "v".green(),
            path.to_chapter(),
            result.chapter_title,
            result.pages.len()
        );
        Ok(())
    }

    fn edit(&self, args: EditArgs) -> Result<()> {
        let content = match (args.text, args.file) {
            (Some(text), _) => text,
            (None, Some(file)) if file != Path::new("-") => std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?,
            (None, _) => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read page text from stdin")?;
                text
            }
        };

        let use_case = EditPageUseCase::new(self.open_store()?);
        let book = use_case.execute(args.path, content)?;
        if let (chapter, Some(page)) = book.resolve(&args.path)? {
            print!("{}", ConsoleFormatter::format_node(chapter, Some(page)));
        }
        Ok(())
    }

    async fn narrate(&self, path: NodePath) -> Result<()> {
        let audio_dir = self.data_dir(self.config.storage.audio_dir.as_ref(), "audio");
        let sink = Arc::new(WavFileSink::new(audio_dir));
        let use_case = NarratePageUseCase::new(
            self.stages(self.conversation_logger())?,
            self.open_store()?,
            Arc::clone(&sink) as Arc<dyn AudioSink>,
        );

        let clip = use_case.execute(path).await?;
        if let Some(file) = sink.last_written() {
            println!(
                "{} {:.1}s of narration written to {}",
                "v".green(),
                clip.duration_secs(),
                file.display()
            );
        }
        Ok(())
    }

    fn export(&self, out: Option<PathBuf>) -> Result<()> {
        let dir = out.unwrap_or_else(|| {
            self.config
                .storage
                .export_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
        });
        let exporter = HtmlBookExporter::new(dir, self.config.storage.key.clone());
        let use_case = ExportBookUseCase::new(self.open_store()?, Arc::new(exporter));
        let path = use_case.execute()?;
        println!("{} Exported to {}", "v".green(), path.display());
        Ok(())
    }

    fn reset(&self, yes: bool) -> Result<()> {
        if !yes && !confirm("Discard every written page and restore the starter outline?")? {
            bail!("Reset cancelled");
        }
        // A corrupt save must not block a reset, so the store is not loaded.
        let store = DocumentStore::new(Book::default(), self.repository());
        let book = store.reset();
        println!(
            "{} Book reset: {} sections, {} chapters",
            "v".green(),
            book.sections.len(),
            book.chapter_count()
        );
        Ok(())
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
