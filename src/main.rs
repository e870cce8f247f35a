use atmc::compiler::encoder::Mnemonic;
use atmc::image::SongSummary;
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "atmc")]
#[command(version = "0.1.0")]
#[command(about = "ATM song text to bytecode assembler", long_about = None)]
struct Args {
    /// Input song text (reads from stdin if not specified)
    input: Option<PathBuf>,

    /// Output song image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a JSON summary of the compiled song
    #[arg(long)]
    json: bool,

    /// Include per-track bytes in the JSON summary
    #[arg(long, requires = "json")]
    bytes: bool,

    /// Only check that the song compiles
    #[arg(long)]
    check: bool,

    /// List instruction mnemonics
    #[arg(short = 'L', long)]
    list_mnemonics: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if args.list_mnemonics {
        for m in Mnemonic::ALL {
            println!("{:<18} {} arg(s)", m.keyword(), m.arg_count());
        }
        return Ok(());
    }

    let assembler = atmc::Assembler::new();
    let song = match &args.input {
        Some(path) => assembler.compile_file(path)?,
        None => assembler.compile_reader(std::io::stdin())?,
    };

    if args.check {
        return Ok(());
    }

    if args.json {
        let summary = SongSummary::new(&song, args.bytes);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    let image = song.to_image()?;
    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(&image)?;
        }
        None if !args.json => {
            std::io::stdout().write_all(&image)?;
        }
        None => {}
    }

    Ok(())
}
