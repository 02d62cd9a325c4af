use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use libstroke_core::{CharGuide, Difficulty, EvaluationMode, Glyph, GuidePack, Point};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libhangul::{decompose, letter, GuideBuilder, HangulConfig, JamoLetter, Lesson, DEFAULT_STAGES};

#[derive(Parser)]
#[command(name = "libhangul")]
#[command(about = "Stroke guides and stroke checking for Hangul handwriting practice")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the jamo of each syllable
    Decompose {
        text: String,
    },
    /// Print the stroke guides of a text as JSON
    Guide {
        text: String,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the glyph of one jamo letter as JSON
    Glyph {
        jamo: char,
        /// Use the final-consonant form
        #[arg(long = "final")]
        final_form: bool,
    },
    /// Judge a drawn stroke against one stroke of a syllable's guide
    Check {
        syllable: char,
        /// Zero-based stroke index
        #[arg(long)]
        stroke: usize,
        /// JSON file holding the drawn points as [[x, y], ...] in [0,1]
        #[arg(long)]
        candidate: PathBuf,
        /// Overrides the configured difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Take the template from a guide pack (.json or bincode) instead of
        /// building it
        #[arg(long)]
        pack: Option<PathBuf>,
    },
    /// List the stages of a lesson built from texts or unit files
    Lesson {
        /// Unit JSON files, one stage each; the default stages when omitted
        #[arg(long = "unit")]
        units: Vec<PathBuf>,
        /// Stage texts, used when no unit files are given
        texts: Vec<String>,
    },
    /// Write the effective configuration as TOML
    InitConfig {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write a guide pack for a text
    Export {
        text: String,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum ExportFormat {
    Json,
    Bincode,
}

fn load_config(path: Option<&Path>) -> Result<HangulConfig> {
    match path {
        Some(path) => HangulConfig::load_toml(path)
            .map_err(|e| anyhow!("loading config {}: {}", path.display(), e)),
        None => Ok(HangulConfig::default()),
    }
}

fn handle_decompose(text: &str) {
    for ch in text.chars() {
        let jamo = decompose(ch);
        match jamo.indices() {
            Some((i, m, f)) => println!("{} {} ({}, {}, {})", ch, jamo, i, m, f),
            None => println!("{} -", ch),
        }
    }
}

fn handle_guide(builder: &mut GuideBuilder, text: &str, pretty: bool) -> Result<()> {
    let guides = builder.guides_in_order(text);
    let json = if pretty {
        serde_json::to_string_pretty(&guides)?
    } else {
        serde_json::to_string(&guides)?
    };
    println!("{}", json);
    Ok(())
}

fn handle_glyph(config: &HangulConfig, jamo: char, final_form: bool) -> Result<()> {
    let resolver = config.resolver();
    let glyph: Glyph = match letter(jamo) {
        Some(JamoLetter::Vowel(medial)) => resolver.medial(medial),
        Some(JamoLetter::Consonant { initial, final_ }) => {
            if final_form {
                match final_ {
                    Some(f) => resolver.final_(f),
                    None => bail!("'{}' cannot be a final consonant", jamo),
                }
            } else {
                match initial {
                    Some(i) => resolver.initial(i),
                    None => bail!("'{}' only occurs as a final consonant", jamo),
                }
            }
        }
        None => bail!("'{}' is not a Hangul jamo letter", jamo),
    };
    println!("{}", serde_json::to_string_pretty(&glyph.strokes)?);
    Ok(())
}

fn load_pack(path: &Path) -> Result<GuidePack> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        GuidePack::load_json(path)
    } else {
        GuidePack::load_bincode(path)
    }
}

fn handle_check(
    builder: &mut GuideBuilder,
    syllable: char,
    stroke: usize,
    candidate: &Path,
    difficulty: Option<Difficulty>,
    pack: Option<&Path>,
) -> Result<()> {
    let guide: CharGuide = match pack {
        Some(path) => {
            let pack = load_pack(path)?;
            pack.get(&syllable.to_string()).cloned().with_context(|| {
                format!("'{}' is not in guide pack {}", syllable, path.display())
            })?
        }
        None => builder.guide(syllable),
    };
    let template = guide.stroke(stroke).with_context(|| {
        format!("'{}' has {} strokes, no stroke {}", syllable, guide.len(), stroke)
    })?;

    let content = fs::read_to_string(candidate)
        .with_context(|| format!("reading {}", candidate.display()))?;
    let points: Vec<Point> = serde_json::from_str(&content)
        .with_context(|| format!("parsing points in {}", candidate.display()))?;

    let base = builder.config().base();
    let difficulty = difficulty.unwrap_or(base.difficulty);
    let verdict = base
        .matcher()
        .evaluate(&points, &template.points, difficulty.threshold());

    println!(
        "{} stroke {}: {} (score {:.4}, similarity {:.1}%, threshold {:.2} [{}])",
        syllable,
        stroke,
        if verdict.accepted { "accepted" } else { "rejected" },
        verdict.score,
        verdict.similarity() * 100.0,
        difficulty.threshold(),
        difficulty,
    );
    Ok(())
}

fn handle_export(
    builder: &mut GuideBuilder,
    text: &str,
    output: &Path,
    format: ExportFormat,
) -> Result<()> {
    let pack = builder.pack(text, text);
    match format {
        ExportFormat::Json => pack.save_json(output)?,
        ExportFormat::Bincode => pack.save_bincode(output)?,
    }
    info!(guides = pack.len(), path = %output.display(), "wrote guide pack");
    Ok(())
}

fn handle_lesson(config: &HangulConfig, units: &[PathBuf], texts: &[String]) -> Result<()> {
    let mode = EvaluationMode::Discrete(config.base.difficulty);
    let lesson = if !units.is_empty() {
        Lesson::load_units(config, units, mode)?
    } else if !texts.is_empty() {
        Lesson::from_texts(config, texts, mode)
    } else {
        Lesson::from_texts(config, DEFAULT_STAGES, mode)
    };
    for (i, stage) in lesson.stages().iter().enumerate() {
        let strokes: Vec<String> = stage
            .guides
            .iter()
            .map(|(text, guide)| format!("{}:{}", text, guide.len()))
            .collect();
        println!("{}. {} [{}]", i + 1, stage.label, strokes.join(" "));
    }
    Ok(())
}

fn handle_init_config(config: &HangulConfig, output: &Path) -> Result<()> {
    config
        .save_toml(output)
        .map_err(|e| anyhow!("writing config {}: {}", output.display(), e))?;
    info!(path = %output.display(), "wrote configuration");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref())?;
    let mut builder = GuideBuilder::new(config.clone());

    match cli.command {
        Commands::Decompose { text } => handle_decompose(&text),
        Commands::Guide { text, pretty } => handle_guide(&mut builder, &text, pretty)?,
        Commands::Glyph { jamo, final_form } => handle_glyph(&config, jamo, final_form)?,
        Commands::Check {
            syllable,
            stroke,
            candidate,
            difficulty,
            pack,
        } => handle_check(
            &mut builder,
            syllable,
            stroke,
            &candidate,
            difficulty,
            pack.as_deref(),
        )?,
        Commands::Lesson { units, texts } => handle_lesson(&config, &units, &texts)?,
        Commands::InitConfig { output } => handle_init_config(&config, &output)?,
        Commands::Export {
            text,
            output,
            format,
        } => handle_export(&mut builder, &text, &output, format)?,
    }
    Ok(())
}
