use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use langwich_config::Config;
use langwich_core::{MatchKeys, SuggestionQuery};
use langwich_types::Field;

pub mod state;


use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "langwich")]
#[command(about = "Maintain word indices and query annotation suggestions")]
struct Args {
    /// Data tree root, overrides LANGWICH_DATA_DIR
    #[arg(long, short = 'd')]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the word index of a language
    Index { language: String },

    /// Import a text file as a new text
    Import {
        language: String,
        hash: String,
        file: PathBuf,
        #[arg(long, short = 't', default_value = "")]
        title: String,
    },

    /// Suggest values for fields of a word
    Suggest {
        language: String,
        word: String,
        /// Fields to collect (translation, base_translation, base, ...)
        #[arg(long = "field", short = 'f')]
        fields: Vec<Field>,
        /// Fields read on the target of pointer entries
        #[arg(long = "sub-field")]
        sub_fields: Vec<Field>,
        #[arg(long)]
        base: Option<String>,
        #[arg(long = "type")]
        word_type: Option<String>,
        /// Only entries of this text
        #[arg(long)]
        hash: Option<String>,
        /// Only entries at this word position
        #[arg(long)]
        index: Option<usize>,
        /// Seed values counted once
        #[arg(long)]
        include: Vec<String>,
        /// Print only the best candidate
        #[arg(long)]
        one: bool,
    },

    /// Infinitive or singular candidates from the rule set
    Inflect {
        language: String,
        word: String,
        #[arg(long)]
        singular: bool,
    },

    /// Whether a word uses only learner-friendly scripts
    Simple { language: String, word: String },

    /// List texts, optionally of one language
    Texts { language: Option<String> },

    /// All parts of a multipart text, by hash prefix
    Chain { hash_prefix: String },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,langwich=info".into());

    if std::env::var("LANGWICH_LOG_JSON").is_ok_and(|v| v == "1") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let mut state = AppState::new(config)?;
    run(&mut state, args.command)
}

fn run(state: &mut AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Index { language } => {
            let index = state.rebuild(&language)?;
            println!(
                "{language}: {} words, {} entries",
                index.word_count(),
                index.entry_count()
            );
        }
        Command::Import {
            language,
            hash,
            file,
            title,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let words = state.import(&language, &hash, &title, &text)?;
            println!("{hash}: {words} words");
        }
        Command::Suggest {
            language,
            word,
            fields,
            sub_fields,
            base,
            word_type,
            hash,
            index,
            include,
            one,
        } => {
            let query = build_query(word, fields, sub_fields, base, word_type, hash, index, include);
            let suggestions = state.suggest(&language, &query)?;
            if one {
                if let Some(best) = suggestions.best() {
                    println!("{best}");
                }
            } else {
                for candidate in suggestions.ranked() {
                    println!("{candidate}");
                }
            }
        }
        Command::Inflect {
            language,
            word,
            singular,
        } => {
            let candidates = if singular {
                state.rules.singularize(&word, &language)?
            } else {
                state.rules.infinitivize(&word, &language)?
            };
            println!("{}", serde_json::to_string(&candidates)?);
        }
        Command::Simple { language, word } => {
            println!("{}", state.rules.is_simple(&word, &language)?);
        }
        Command::Texts { language } => {
            let metadata = state.tree.load_metadata()?;
            for (hash, text) in metadata.iter() {
                if language
                    .as_deref()
                    .is_some_and(|l| !text.language.eq_ignore_ascii_case(l))
                {
                    continue;
                }
                println!("{hash}  {:<12} {}", text.language, text.title);
            }
        }
        Command::Chain { hash_prefix } => {
            let metadata = state.tree.load_metadata()?;
            let hash = metadata.find_by_prefix(&hash_prefix)?;
            for part in metadata.hash_chain(hash)? {
                println!("{part}");
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_query(
    word: String,
    fields: Vec<Field>,
    sub_fields: Vec<Field>,
    base: Option<String>,
    word_type: Option<String>,
    hash: Option<String>,
    index: Option<usize>,
    include: Vec<String>,
) -> SuggestionQuery {
    let mut query = SuggestionQuery::new(word).include(include);
    if !fields.is_empty() {
        query = query.search(&fields);
    }
    if !sub_fields.is_empty() {
        query = query.follow_pointers(&sub_fields);
    }
    if let Some(base) = base {
        query = query.base(base);
    }
    if let Some(word_type) = word_type {
        query = query.word_type(word_type);
    }

    let mut keys = MatchKeys::new();
    if let Some(hash) = hash {
        keys = keys.hash(hash);
    }
    if let Some(index) = index {
        keys = keys.index(index);
    }
    query.match_keys(keys)
}
