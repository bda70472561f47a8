use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use quiz_tracker::{DynStore, FileStore, MemoryStore, Quiz, QuizError};
use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "quiz-tracker";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = "questions.json")]
    questions: PathBuf,

    /// File that keeps answers between runs
    #[arg(long, conflicts_with = "ephemeral")]
    state_file: Option<PathBuf>,

    /// Keep answers in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Where to write logs (the terminal is taken by the quiz)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_logging(path: &Path) {
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| File::options().create(true).append(true).open(path));

    let file = match file {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Logging disabled, cannot open {}: {}", path.display(), err);
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QUIZ_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn open_store(args: &Args) -> Result<DynStore, QuizError> {
    if args.ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }

    let path = args
        .state_file
        .clone()
        .unwrap_or_else(|| data_dir().join("storage.json"));
    Ok(Box::new(FileStore::open(path)?))
}

fn run(args: Args) -> Result<(), QuizError> {
    let store = open_store(&args)?;
    let quiz = Quiz::from_json(&args.questions, store)?;
    tracing::info!(questions = %args.questions.display(), "starting quiz");
    quiz.run()
}

fn main() {
    let args = Args::parse();
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir().join("quiz-tracker.log"));
    init_logging(&log_file);

    if let Err(e) = run(args) {
        tracing::error!(error = %e, "quiz exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
