use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use json2sass::importer::{load_json_file, resolve_import, ImporterConfig};
use json2sass::postprocess::{is_css_file, BuildOutput, CleanCssOptions, CssPostProcessor};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "json2sass")]
#[command(version, about = "Turn JSON into SASS variables and clean up bundled CSS")]
#[command(long_about = "Turn JSON into SASS variables and clean up bundled CSS\n\n\
    Convert a JSON file to SASS variables:\n  \
    json2sass convert theme.json [-o theme.scss]\n\n\
    Resolve an import the way a SASS importer would:\n  \
    json2sass resolve theme.json --prev src/app.scss [-I dir]...\n\n\
    Rewrite the stylesheets of a build output directory:\n  \
    json2sass minify-css build/ [--options clean-css.json] [--dry-run]")]
struct Cli {
    /// Verbose output for debugging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a JSON file to SASS variable declarations
    Convert {
        /// Input .json file path
        input: PathBuf,

        /// Output .scss file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a `.json` import request against the search paths
    Resolve {
        /// Import request as written in the stylesheet
        request: String,

        /// Path of the stylesheet containing the import
        #[arg(long)]
        prev: PathBuf,

        /// Additional search root (repeatable)
        #[arg(short = 'I', long = "include-path")]
        include_path: Vec<PathBuf>,

        /// Additional search roots as a platform path list (`a:b` on Unix)
        #[arg(long)]
        include_paths: Option<String>,
    },

    /// Rewrite every .css file of a build output directory
    MinifyCss {
        /// Build output directory
        dir: PathBuf,

        /// Minifier options as JSON (default: built-in profile)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Report what would change without writing files
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Convert { input, output } => handle_convert(&input, output.as_deref()),
        Command::Resolve {
            request,
            prev,
            include_path,
            include_paths,
        } => {
            let mut config = include_paths
                .as_deref()
                .map(ImporterConfig::from_delimited)
                .unwrap_or_default();
            config.extend(include_path);
            handle_resolve(&request, &prev, &config)
        }
        Command::MinifyCss {
            dir,
            options,
            dry_run,
        } => handle_minify(&dir, options.as_deref(), dry_run),
    }
}

/// Convert one JSON file and write the SASS variables
fn handle_convert(input: &Path, output: Option<&Path>) -> Result<()> {
    debug!("Reading input file: {}", input.display());

    let json = load_json_file(input)?;
    let sass = json2sass::sass::transform_json(&json)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    match output {
        Some(path) => {
            debug!("Writing output to: {}", path.display());
            fs::write(path, format!("{}\n", sass))
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => println!("{}", sass),
    }

    Ok(())
}

/// Print the contents an importer would hand back to the SASS compiler
fn handle_resolve(request: &str, prev: &Path, config: &ImporterConfig) -> Result<()> {
    let Some(import) = resolve_import(request, prev, config)? else {
        bail!("\"{}\" is not a .json import", request);
    };

    match &import.resolved_path {
        Some(path) => debug!("Using {}", path.display()),
        None => debug!("No file found, emitting no variables"),
    }

    if !import.contents.is_empty() {
        println!("{}", import.contents);
    }
    Ok(())
}

/// Load a build directory, rewrite its stylesheets and write them back
fn handle_minify(dir: &Path, options_path: Option<&Path>, dry_run: bool) -> Result<()> {
    if !dir.is_dir() {
        bail!("Build output directory does not exist: {}", dir.display());
    }

    let options = match options_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file: {}", path.display()))?;
            CleanCssOptions::from_json(&text)
                .with_context(|| format!("Invalid options file: {}", path.display()))?
        }
        None => CleanCssOptions::default(),
    };

    let mut output = BuildOutput::from_dir(dir, "main")
        .with_context(|| format!("Failed to load build output: {}", dir.display()))?;

    let css_count = output.chunk_files().into_iter().filter(|f| is_css_file(f)).count();
    if css_count == 0 {
        info!("No .css files found in {}", dir.display());
        return Ok(());
    }

    let processor = CssPostProcessor::new(options);
    debug!("Minifier options: {:?}", processor.options());
    let report = processor.emit(&mut output, || debug!("Post-processing finished"))?;

    for asset in &report.rewritten {
        println!("{}: {} -> {} bytes", asset.name, asset.original_size, asset.size);
    }
    println!(
        "Rewrote {} file(s), saved {} bytes",
        report.rewritten.len(),
        report.saved_bytes()
    );

    if dry_run {
        return Ok(());
    }

    output
        .write_to_dir(dir, report.rewritten.iter().map(|a| a.name.as_str()))
        .with_context(|| format!("Failed to write stylesheets to {}", dir.display()))?;

    Ok(())
}
