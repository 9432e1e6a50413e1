//! CLI entry point for the transcript result analyzer.
//!
//! Provides subcommands for parsing extracted transcript text into student
//! records, producing per-department analyses, and analysing previously
//! exported records.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use result_analyzer::analyzers::aggregate::{analyze_department_with_threshold, analyze_transcript};
use result_analyzer::{
    GradingConfig, StudentRecord,
    output::{department_rows, print_json, print_pretty, student_rows, write_json, write_records},
    parse_transcript,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "result_analyzer")]
#[command(about = "A tool to analyze university exam result transcripts", long_about = None)]
struct Cli {
    /// Grading config JSON overriding the built-in credit and department tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse transcript text into graded student records
    Parse {
        /// Text file extracted from the result document
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// JSON file to write records to (logged when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse transcript text and write per-department analysis files
    Analyze {
        /// Text file extracted from the result document
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Directory for report.json, students.csv and departments.csv
        #[arg(short = 'd', long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Analyze a JSON array of previously parsed student records
    AnalyzeRecords {
        /// JSON file holding student records
        #[arg(value_name = "RECORDS")]
        source: PathBuf,

        /// Two-digit admission year of the regular batch
        #[arg(short, long, allow_negative_numbers = true)]
        batch: i32,

        /// JSON file to write the analysis to (logged when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/result_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("result_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { source, output } => {
            let text = read_text(&source)?;
            let result = parse_transcript(&text, &config)?;
            print_pretty(&result);

            match output {
                Some(path) => {
                    write_json(&path, &result)?;
                    info!(path = %path.display(), students = result.student_count(), "Records written");
                }
                None => print_json(&result)?,
            }
        }
        Commands::Analyze { source, output_dir } => {
            let text = read_text(&source)?;
            let result = parse_transcript(&text, &config)?;
            let report = analyze_transcript(&result, config.topper_threshold);

            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("failed to create {}", output_dir.display()))?;
            write_json(output_dir.join("report.json"), &report)?;
            write_records(output_dir.join("students.csv"), &student_rows(&result))?;
            write_records(output_dir.join("departments.csv"), &department_rows(&report))?;

            for (department, analysis) in &report.departments {
                info!(
                    department = %department,
                    students = analysis.total_students,
                    regular = analysis.regular_students,
                    pass_percentage = analysis.regular.pass_percentage,
                    average_sgpa = analysis.regular.average_sgpa,
                    "Department analyzed"
                );
            }
            info!(output_dir = %output_dir.display(), "Analysis complete");
        }
        Commands::AnalyzeRecords {
            source,
            batch,
            output,
        } => {
            let content = std::fs::read_to_string(&source)
                .with_context(|| format!("failed to read {}", source.display()))?;
            let students: Vec<StudentRecord> = serde_json::from_str(&content)
                .with_context(|| format!("invalid student records in {}", source.display()))?;
            let analysis = analyze_department_with_threshold(&students, batch, config.topper_threshold);

            match output {
                Some(path) => {
                    write_json(&path, &analysis)?;
                    info!(path = %path.display(), students = students.len(), "Analysis written");
                }
                None => print_json(&analysis)?,
            }
        }
    }

    Ok(())
}

/// Loads the grading config from `--config`, then `GRADING_CONFIG_PATH`,
/// falling back to the built-in tables.
fn load_config(path: Option<&Path>) -> Result<GradingConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("GRADING_CONFIG_PATH").map(PathBuf::from));

    match path {
        Some(path) => GradingConfig::load(&path),
        None => {
            debug!("Using built-in grading config");
            Ok(GradingConfig::default())
        }
    }
}

#[tracing::instrument(fields(source = %path.display()))]
fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
