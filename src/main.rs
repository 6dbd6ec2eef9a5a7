//! DNA codec command-line tool.
//!
//! Encodes files into DNA sequence sets and decodes them back, with optional
//! password encryption and synthesis-constraint checking.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dna_codec::constraints::{self, ConstraintPolicy};
use dna_codec::{decode, encode, probe, CodecConfig, EcLevel, EncodeMetadata};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "dna-codec")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Encode binary files into DNA sequences and back",
    long_about = "Converts files into DNA sequence sets with Reed-Solomon error \
                  correction and optional password-based AES-256-GCM encryption."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file into a directory of DNA sequence files
    Encode {
        /// Input file to encode
        input: PathBuf,

        /// Output directory (default: <input>.dna)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Sequence length in symbols (must be a multiple of 4)
        #[arg(long, default_value = "200")]
        base_length: usize,

        /// Error-correction level: basic or advanced
        #[arg(long, default_value = "basic")]
        level: String,

        /// Prompt for a password and encrypt the payload
        #[arg(long)]
        password: bool,

        /// Report synthesis-constraint violations after encoding
        #[arg(long)]
        check_constraints: bool,
    },

    /// Decode a directory or file of DNA sequences back into the original file
    Decode {
        /// Directory of sequence files, or a single file with one sequence per line
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Advisory error-correction level; chunk headers are authoritative
        #[arg(long, default_value = "basic")]
        level: String,

        /// Prompt for the decryption password
        #[arg(long)]
        password: bool,
    },

    /// Check sequences against synthesis constraints
    Check {
        /// Directory of sequence files, or a single file with one sequence per line
        input: PathBuf,
    },

    /// Show the metadata of an encoded directory
    Info {
        /// Directory produced by encode
        input: PathBuf,
    },

    /// Report codec health and version
    Health,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            base_length,
            level,
            password,
            check_constraints,
        } => cmd_encode(
            &input,
            output,
            base_length,
            &level,
            password,
            check_constraints,
        ),

        Commands::Decode {
            input,
            output,
            level,
            password,
        } => cmd_decode(&input, output, &level, password),

        Commands::Check { input } => cmd_check(&input),

        Commands::Info { input } => cmd_info(&input),

        Commands::Health => {
            println!("ok {}", probe());
            Ok(())
        }
    }
}

fn prompt_password(prompt: &str) -> String {
    rpassword::prompt_password(prompt).unwrap_or_else(|_| {
        eprint!("{}", prompt);
        io::stderr().flush().unwrap();
        let mut password = String::new();
        io::stdin().read_line(&mut password).unwrap();
        password.trim().to_string()
    })
}

fn cmd_encode(
    input: &Path,
    output: Option<PathBuf>,
    base_length: usize,
    level: &str,
    password: bool,
    check_constraints: bool,
) -> Result<()> {
    let level: EcLevel = level.parse()?;
    let config = CodecConfig::new(base_length, level);

    let password = if password {
        let password = prompt_password("Enter password: ");
        let confirm = prompt_password("Confirm password: ");
        if password != confirm {
            bail!("passwords do not match");
        }
        Some(password)
    } else {
        None
    };

    let payload = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let output_dir = output.unwrap_or_else(|| {
        let mut dir = input.as_os_str().to_owned();
        dir.push(".dna");
        PathBuf::from(dir)
    });

    let result = encode(&payload, password.as_deref(), &config)?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    for (i, sequence) in result.sequences.iter().enumerate() {
        let path = output_dir.join(format!("sequence_{}.txt", i));
        fs::write(&path, sequence).with_context(|| format!("writing {}", path.display()))?;
    }
    result.metadata.save(&output_dir)?;

    println!("Encoded {} bytes into {} sequences", payload.len(), result.sequences.len());
    println!("  Output:           {}", output_dir.display());
    println!("  Base length:      {}", result.metadata.base_length);
    println!("  Error correction: {}", result.metadata.error_correction);
    println!("  Encrypted:        {}", result.metadata.is_encrypted);

    if check_constraints {
        report_violations(&result.sequences);
    }

    Ok(())
}

fn cmd_decode(input: &Path, output: Option<PathBuf>, level: &str, password: bool) -> Result<()> {
    let level: EcLevel = level.parse()?;
    let password = password.then(|| prompt_password("Enter password: "));

    let sequences = read_sequences(input)?;
    let payload = decode(&sequences, password.as_deref(), level)?;

    match output {
        Some(path) => {
            fs::write(&path, &payload).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} bytes to {}", payload.len(), path.display());
        }
        None => {
            io::stdout().write_all(&payload)?;
        }
    }

    Ok(())
}

fn cmd_check(input: &Path) -> Result<()> {
    let sequences = read_sequences(input)?;
    report_violations(&sequences);
    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let metadata = EncodeMetadata::load(input)
        .with_context(|| format!("loading metadata from {}", input.display()))?;

    println!("DNA Codec Metadata");
    println!("==================");
    println!("Original size:    {} bytes", metadata.original_size);
    println!("Sequences:        {}", metadata.sequence_count);
    println!("Base length:      {}", metadata.base_length);
    println!("Error correction: {}", metadata.error_correction);
    println!("Encrypted:        {}", metadata.is_encrypted);
    println!("Payload SHA-256:  {}", metadata.payload_digest);

    Ok(())
}

fn report_violations(sequences: &[String]) {
    let violations = constraints::check_sequences(sequences, &ConstraintPolicy::default());
    if violations.is_empty() {
        println!("All {} sequences satisfy synthesis constraints", sequences.len());
    } else {
        println!("{} constraint violation(s):", violations.len());
        for violation in violations {
            println!("  sequence {}: {}", violation.sequence, violation.kind);
        }
    }
}

/// Read sequences from a directory of sequence files or a single file with
/// one sequence per line.
fn read_sequences(input: &Path) -> Result<Vec<String>> {
    let mut sequences = Vec::new();

    if input.is_dir() {
        for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.path().extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let content = fs::read_to_string(entry.path())
                .with_context(|| format!("reading {}", entry.path().display()))?;
            sequences.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            );
        }
    } else {
        let content =
            fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
        sequences.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }

    if sequences.is_empty() {
        bail!("no sequences found in {}", input.display());
    }

    Ok(sequences)
}
