//! QBank Stats CLI
//!
//! Generates and inspects question-bank statistics, and queries the
//! question files they are built from.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use qbank_stats::commands::{
    display_version, execute_categories, execute_generate, execute_list, execute_show,
    show_stats, validate_args, validate_stats_file, GenerateArgs, ListArgs, QuestionSet,
    ShowQuestionArgs,
};
use qbank_stats::corpus::{PageRequest, QuestionFilter, Subject};
use qbank_stats::utils::config::{
    StatsConfig, DEFAULT_DATA_DIR, DEFAULT_LOOKUP_PATH, DEFAULT_OUTPUT_DIR,
};

/// QBank Stats - question corpus statistics
#[derive(Parser, Debug)]
#[command(name = "qbank-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing <PROGRAM>_<math|RW>.json files
    #[arg(long, global = true, env = "QBANK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Directory the statistics documents are written to
    #[arg(long, global = true, env = "QBANK_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Lookup document with mathLiveItems/readingLiveItems
    #[arg(long, global = true, env = "QBANK_LOOKUP", default_value = DEFAULT_LOOKUP_PATH)]
    lookup: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SubjectArg {
    Math,
    Rw,
}

impl From<SubjectArg> for Subject {
    fn from(arg: SubjectArg) -> Self {
        match arg {
            SubjectArg::Math => Subject::Math,
            SubjectArg::Rw => Subject::ReadingWriting,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate both statistics documents
    Generate {
        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Show simplified statistics, generating them if missing
    Show {
        /// Print the raw simplified JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a detailed statistics JSON file
    Validate {
        /// Path to question_stats.json (defaults to the output directory)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List questions of one program and subject
    Questions {
        #[arg(short, long, default_value = "SAT")]
        program: String,

        #[arg(short, long, value_enum)]
        subject: SubjectArg,

        /// Filter by difficulty (E, M, H)
        #[arg(long)]
        difficulty: Option<String>,

        /// Filter by skill description
        #[arg(long)]
        skill: Option<String>,

        /// Filter by primary class description
        #[arg(long)]
        primary_class: Option<String>,

        /// Number of questions to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Starting position (overrides --page when > 0)
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Page number
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Show one question by id
    Question {
        /// Question identifier
        id: String,

        #[arg(short, long, default_value = "SAT")]
        program: String,

        #[arg(short, long, value_enum)]
        subject: SubjectArg,

        /// Omit the rationale
        #[arg(long)]
        no_rationale: bool,
    },

    /// List distinct main categories (or skills) of a question set
    Categories {
        #[arg(short, long, default_value = "SAT")]
        program: String,

        #[arg(short, long, value_enum)]
        subject: SubjectArg,

        /// List skills instead of main categories
        #[arg(long)]
        skills: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = StatsConfig::new(cli.data_dir, cli.output_dir, cli.lookup);

    match cli.command {
        Commands::Generate { summary } => {
            let args = GenerateArgs {
                config,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_generate(args)?;
        }

        Commands::Show { json } => {
            show_stats(&config, json)?;
        }

        Commands::Validate { file } => {
            let path = file.unwrap_or_else(|| config.detailed_path());
            validate_stats_file(&path)?;
        }

        Commands::Questions {
            program,
            subject,
            difficulty,
            skill,
            primary_class,
            limit,
            offset,
            page,
        } => {
            let args = ListArgs {
                config,
                set: QuestionSet::new(program, subject.into()),
                filter: QuestionFilter {
                    difficulty,
                    skill,
                    primary_class,
                },
                page: PageRequest {
                    limit,
                    offset,
                    page,
                },
            };

            let result = execute_list(&args)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Question {
            id,
            program,
            subject,
            no_rationale,
        } => {
            let args = ShowQuestionArgs {
                config,
                set: QuestionSet::new(program, subject.into()),
                question_id: id,
                include_rationale: !no_rationale,
            };

            let view = execute_show(&args)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }

        Commands::Categories {
            program,
            subject,
            skills,
        } => {
            let set = QuestionSet::new(program, subject.into());
            for value in execute_categories(&config.data_dir, &set, skills)? {
                println!("{}", value);
            }
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
