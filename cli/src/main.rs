//! CLI entrypoint for twentyq
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use twentyq_application::{
    GameParams, NoSessionLogger, PlayGameInput, PlayGameUseCase, Presenter, ScriptedPresenter,
    SelectCategoryUseCase, SessionLogger,
};
use twentyq_domain::ConfigIssue;
use twentyq_infrastructure::{
    CatalogLoader, CategoryReport, CategoryTreeLoader, ConfigLoader, DatasetFormat, DatasetLoader,
    DuplicatePolicy, FileConfig, JsonlSessionLogger, check_meta_file, convert_long_to_wide,
};
use twentyq_presentation::{
    CheckArgs, Cli, Command, ConsoleFormatter, ConsolePresenter, ConvertArgs, DatasetLayout,
    OnDuplicate, OutputFormatter, PlayArgs, ReportArgs, set_color_enabled,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    check_issues(&config.validate())?;

    set_color_enabled(config.output.color && !cli.no_color);

    info!("Starting twentyq");

    match cli.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => play(args, &config).await,
        Command::Convert(args) => convert(args),
        Command::Check(args) => check(args),
        Command::Report(args) => report(args, &config),
    }
}

/// Install the tracing subscriber; logs go to stderr unless a log file is given.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("twentyq.log");
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Print warnings; refuse to continue on errors.
fn check_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        eprintln!("{}", issue);
    }
    if ConfigIssue::has_errors(issues) {
        bail!("Invalid configuration");
    }
    Ok(())
}

fn dataset_format(layout: Option<DatasetLayout>, config: &FileConfig) -> DatasetFormat {
    match layout {
        Some(DatasetLayout::Auto) => DatasetFormat::Auto,
        Some(DatasetLayout::Long) => DatasetFormat::Long,
        Some(DatasetLayout::Wide) => DatasetFormat::Wide,
        None => config.dataset.format,
    }
}

fn load_store(
    dataset: Option<&Path>,
    layout: Option<DatasetLayout>,
    config: &FileConfig,
) -> Result<twentyq_domain::AttributeStore> {
    let path = dataset
        .or(config.dataset.path.as_deref())
        .context("No dataset given. Use --dataset or set [dataset].path in the config file")?;
    let store = DatasetLoader::new(dataset_format(layout, config)).load(path)?;
    Ok(store)
}

fn game_params(args: &PlayArgs, config: &FileConfig, scripted: bool) -> GameParams {
    let mut params = config.game.to_game_params();
    if let Some(max_turns) = args.max_turns {
        params = params.with_max_turns(max_turns);
    }
    if let Some(seconds) = args.timeout {
        params = params.with_answer_timeout(Some(Duration::from_secs(seconds)));
    }
    if scripted {
        params = params.with_confirm_guess(false);
    }
    params
}

async fn play(args: PlayArgs, config: &FileConfig) -> Result<()> {
    let store = Arc::new(load_store(args.dataset.as_deref(), args.format, config)?);
    let catalog = CatalogLoader::load_or_builtin(
        args.catalog.as_deref().or(config.dataset.catalog.as_deref()),
    )?;

    let scripted = args.scripted_answers();
    let params = game_params(&args, config, scripted.is_some());
    check_issues(&params.validate())?;
    let tokens = config.answers.to_tokens();

    let session_logger: Arc<dyn SessionLogger> =
        match args.session_log.as_ref().or(config.log.session_log.as_ref()) {
            Some(path) => match JsonlSessionLogger::new(path) {
                Some(logger) => Arc::new(logger),
                None => Arc::new(NoSessionLogger),
            },
            None => Arc::new(NoSessionLogger),
        };

    let presenter: Box<dyn Presenter> = match scripted {
        Some(answers) => Box::new(ScriptedPresenter::new(answers)),
        None => Box::new(ConsolePresenter::new()),
    };

    let input = if let Some(label) = args.category.clone() {
        PlayGameInput::category(label)
    } else if let Some(tree_path) = args
        .category_tree
        .as_ref()
        .or(config.dataset.category_tree.as_ref())
    {
        let tree = Arc::new(CategoryTreeLoader::load(tree_path)?);
        let selection = SelectCategoryUseCase::new(tree)
            .with_tokens(tokens.clone())
            .with_answer_timeout(params.answer_timeout)
            .with_session_logger(session_logger.clone())
            .execute(presenter.as_ref())
            .await?;
        presenter.show(&format!(
            "Category: {} ({} listed options)",
            selection.label, selection.option_count
        ));
        PlayGameInput::category(selection.label)
    } else {
        PlayGameInput::all()
    };

    let use_case = PlayGameUseCase::new(store, catalog)
        .with_params(params)
        .with_tokens(tokens)
        .with_session_logger(session_logger);
    let output = use_case.execute(input, presenter.as_ref()).await?;

    let format = args
        .output
        .map(Into::into)
        .unwrap_or(config.output.format);
    println!("{}", ConsoleFormatter.render(&output, format));

    Ok(())
}

fn convert(args: ConvertArgs) -> Result<()> {
    let policy = match args.on_duplicate {
        OnDuplicate::Last => DuplicatePolicy::Last,
        OnDuplicate::First => DuplicatePolicy::First,
        OnDuplicate::Mean => DuplicatePolicy::Mean,
    };
    let stats = convert_long_to_wide(&args.input, &args.output, policy)?;
    println!("{}", stats);
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    let issues = check_meta_file(&args.input)?;
    if issues.is_empty() {
        println!("{}: all lines have _meta.category", args.input.display());
        return Ok(());
    }
    for issue in &issues {
        println!("{}", issue);
    }
    warn!("{} metadata issues in {}", issues.len(), args.input.display());
    bail!("{} line(s) failed the metadata check", issues.len())
}

fn report(args: ReportArgs, config: &FileConfig) -> Result<()> {
    let store = load_store(args.dataset.as_deref(), args.format, config)?;
    let written = CategoryReport::from_store(&store).write_to(&args.out_dir)?;
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
