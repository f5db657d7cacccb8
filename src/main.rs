use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcqdoc::export::{ensure_output_dir, write_text};
use mcqdoc::generate::{GeminiClient, build_prompt, generate_and_export};
use mcqdoc::sample::{BASE_QUESTION, SAMPLE_TEXT};
use mcqdoc::{Config, DocumentSink, Error, Layout, Result, TypstDocument};

const DEFAULT_CONFIG_PATH: &str = "mcqdoc.toml";

#[derive(Parser)]
#[command(name = "mcqdoc")]
#[command(about = "Turn tagged multiple-choice questions into PDF assessments")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./mcqdoc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a question file to PDF
    Render {
        /// Input question file
        input: PathBuf,

        /// Output file (defaults to input name with .pdf or .typ extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Layout: simple or professional (overrides config)
        #[arg(short, long)]
        layout: Option<Layout>,

        /// Write Typst markup instead of compiling to PDF
        #[arg(long)]
        typst: bool,
    },
    /// Copy a question file verbatim into the output directory
    ExportText {
        /// Input question file
        input: PathBuf,

        /// Output file (defaults to <out-dir>/questions_output.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print parsed questions as JSON
    Inspect {
        /// Input question file
        input: PathBuf,
    },
    /// Write the bundled sample as text and PDF
    Sample {
        /// Output directory (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Generate new questions with Gemini and export them
    Generate {
        /// Output directory (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Question the generated ones should resemble
        #[arg(long, default_value = BASE_QUESTION)]
        base_question: String,

        /// File name stem for the .txt and .pdf outputs
        #[arg(long, default_value = "gemini_generated")]
        stem: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::load(Path::new(DEFAULT_CONFIG_PATH)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Render {
            input,
            output,
            layout,
            typst,
        } => {
            let text = read_input(&input)?;
            let options = config.document.render_options(layout);
            let questions = mcqdoc::parse(&text);
            info!(questions = questions.len(), layout = %options.layout, "rendering");

            let mut doc = TypstDocument::new();
            mcqdoc::render(&questions, &options, &mut doc);

            let extension = if typst { "typ" } else { "pdf" };
            let output = output.unwrap_or_else(|| input.with_extension(extension));
            if typst {
                doc.save_typst(&output)?;
            } else {
                doc.save(&output)?;
            }
            println!("Created {}", output.display());
        }
        Commands::ExportText { input, output } => {
            let text = read_input(&input)?;
            let output = match output {
                Some(path) => path,
                None => {
                    ensure_output_dir(&config.output.dir)?;
                    config.output.dir.join("questions_output.txt")
                }
            };
            write_text(&output, &text)?;
            println!("Created {}", output.display());
        }
        Commands::Inspect { input } => {
            let text = read_input(&input)?;
            let questions = mcqdoc::parse(&text);
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        Commands::Sample { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.output.dir.clone());
            ensure_output_dir(&out_dir)?;

            let txt_path = out_dir.join("generated_questions_sample.txt");
            let pdf_path = out_dir.join("generated_questions_sample.pdf");
            write_text(&txt_path, SAMPLE_TEXT)?;
            mcqdoc::write_document(SAMPLE_TEXT, &pdf_path, &config.document.render_options(None))?;

            println!("Sample files created at: {}", out_dir.display());
            println!("To generate new questions with Gemini, run:");
            println!("   mcqdoc generate");
        }
        Commands::Generate {
            out_dir,
            base_question,
            stem,
        } => {
            let client = GeminiClient::from_env(&config.generator)?;
            let out_dir = out_dir.unwrap_or_else(|| config.output.dir.clone());
            ensure_output_dir(&out_dir)?;

            let (_, files) = generate_and_export(
                &client,
                &build_prompt(&base_question),
                &out_dir,
                &stem,
                &config.document.render_options(None),
            )?;
            println!("Created {}", files.text.display());
            println!("Created {}", files.document.display());
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
