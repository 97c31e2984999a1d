use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;

use resource_locator::error::{LocatorError, Result};
use resource_locator::{
    LocatorConfig, ParsedFile, Project, SourceNode, TokenExtractor, TraversalPolicy, REGISTRY,
};

#[derive(Parser)]
#[command(name = "resource-locator")]
#[command(about = "Resolve path-like string literals in source code to project files")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Resolve the literal at line 12, column 18 (0-based byte offset)
    resource-locator resolve src/test/java/FooTest.java --line 12 --column 18

    # Same, against an explicit project root, as JSON
    resource-locator resolve FooTest.java --line 12 --column 18 --root ../proj --format json

    # Show the token a literal turns into
    resource-locator token FooTest.java --line 12 --column 18

    # Show every candidate and which one wins
    resource-locator candidates FooTest.java --line 12 --column 18
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Depth of the sub-walk inside each matching directory
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Entries visited before a scan gives up
    #[arg(long, global = true)]
    pub max_entries: Option<usize>,

    /// Wall-clock budget of a scan in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Skip unreadable directories instead of failing
    #[arg(long, global = true)]
    pub skip_unreadable: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the literal at a position to a single file
    Resolve {
        #[command(flatten)]
        at: Position,

        /// Project root to search (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the token extracted from the literal at a position
    Token {
        #[command(flatten)]
        at: Position,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the ranked candidates for the literal at a position
    Candidates {
        #[command(flatten)]
        at: Position,

        /// Project root to search (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
pub struct Position {
    /// Source file containing the literal
    pub file: PathBuf,

    /// 1-based line
    #[arg(long)]
    pub line: usize,

    /// 0-based byte column within the line
    #[arg(long)]
    pub column: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run(cli: Cli, cancel: CancellationToken) -> Result<()> {
    let overrides = Overrides {
        max_depth: cli.max_depth,
        max_entries: cli.max_entries,
        timeout_ms: cli.timeout_ms,
        skip_unreadable: cli.skip_unreadable,
    };

    match cli.command {
        Commands::Resolve { at, root, format } => resolve(&at, root, &overrides, format, cancel),
        Commands::Token { at, format } => print_token(&at, format),
        Commands::Candidates { at, root, format } => {
            list_candidates(&at, root, &overrides, format, cancel)
        }
    }
}

/// Command-line settings layered over the project's config file.
struct Overrides {
    max_depth: Option<usize>,
    max_entries: Option<usize>,
    timeout_ms: Option<u64>,
    skip_unreadable: bool,
}

impl Overrides {
    fn apply(&self, config: &mut LocatorConfig) {
        if let Some(max_depth) = self.max_depth {
            config.scan.max_depth = max_depth;
        }
        if let Some(max_entries) = self.max_entries {
            config.scan.max_entries = Some(max_entries);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.scan.timeout_ms = Some(timeout_ms);
        }
        if self.skip_unreadable {
            config.scan.on_traversal_error = TraversalPolicy::SkipSubtree;
        }
    }
}

fn open_project(root: Option<PathBuf>, overrides: &Overrides) -> Result<Project<resource_locator::FsContentIndex>> {
    let root = root.unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        return Err(LocatorError::FileNotFound(root.display().to_string()));
    }
    let mut config = LocatorConfig::load(&root)?;
    overrides.apply(&mut config);
    tracing::debug!("searching {} (max depth {})", root.display(), config.scan.max_depth);
    Ok(Project::with_config(&root, config))
}

fn parse(path: &Path) -> Result<ParsedFile> {
    resource_locator::Parser::new(REGISTRY.clone()).parse_file(path)
}

fn literal_at<'a>(parsed: &'a ParsedFile, at: &Position) -> Result<SourceNode<'a>> {
    parsed.literal_at(at.line, at.column).ok_or_else(|| {
        LocatorError::Parse(format!(
            "No literal at {}:{}:{}",
            at.file.display(),
            at.line,
            at.column
        ))
    })
}

fn resolve(
    at: &Position,
    root: Option<PathBuf>,
    overrides: &Overrides,
    format: OutputFormat,
    cancel: CancellationToken,
) -> Result<()> {
    let project = open_project(root, overrides)?;
    let parsed = parse(&at.file)?;
    let literal = literal_at(&parsed, at)?;

    let resource = project.resolve(&literal, cancel)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resource).unwrap_or_default());
        }
        OutputFormat::Text => {
            if let Some(resource) = resource {
                println!("{}", resource.path.display());
            }
        }
    }
    Ok(())
}

fn print_token(at: &Position, format: OutputFormat) -> Result<()> {
    let parsed = parse(&at.file)?;
    let literal = literal_at(&parsed, at)?;
    let token = TokenExtractor::new().extract(&literal);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "token": token });
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        }
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}

fn list_candidates(
    at: &Position,
    root: Option<PathBuf>,
    overrides: &Overrides,
    format: OutputFormat,
    cancel: CancellationToken,
) -> Result<()> {
    let project = open_project(root, overrides)?;
    let parsed = parse(&at.file)?;
    let literal = literal_at(&parsed, at)?;

    let resolution = project.explain(&literal, cancel)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&resolution).unwrap_or_default());
        return Ok(());
    }

    if resolution.token.is_empty() {
        println!("No token at {}:{}", at.line, at.column);
        return Ok(());
    }
    if resolution.candidates.is_empty() {
        println!("No candidates for {:?}", resolution.token);
        return Ok(());
    }

    println!("Candidates for {:?}:", resolution.token);
    let winner = resolution.winner.as_ref().map(|w| &w.file.path);
    for candidate in &resolution.candidates {
        let marker = if Some(&candidate.file.path) == winner { "*" } else { " " };
        println!("{} {:>3} {}", marker, candidate.score, candidate.file.path.display());
    }
    if resolution.winner.is_some() && resolution.resource.is_none() {
        println!("(winner could not be opened)");
    }
    Ok(())
}
