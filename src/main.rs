use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

use qlabel::Result;
use qlabel::backend;
use qlabel::catalog::{DefaultCatalog, FormFactor};
use qlabel::printer::{PrintJob, Printer};
use qlabel::status::Status;

#[derive(Parser)]
#[command(name = "qlabel")]
#[command(about = "CLI for Brother QL Label Writers")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get status information from the printer
    Status(StatusArgs),
    /// Show the printer model and loaded media
    Info(InfoArgs),
    /// Send a prepared raster file to the printer
    Print(PrintArgs),
}

#[derive(Args)]
struct StatusArgs {
    /// Printer host: hostname.local (network) or vid:pid (USB)
    /// Examples: ql800.local, 192.168.1.100, 04f9:209b
    #[arg(short = 'H', long = "host", required = true)]
    host: String,

    /// Show verbose information
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Printer host: hostname.local (network) or vid:pid (USB)
    #[arg(short = 'H', long = "host", required = true)]
    host: String,
}

#[derive(Args)]
struct PrintArgs {
    /// Printer host: hostname.local (network) or vid:pid (USB)
    #[arg(short = 'H', long = "host", required = true)]
    host: String,

    /// Label media the raster data was rendered for, e.g. 62x29.
    /// When given, printing is refused unless the loaded media matches.
    #[arg(short = 'l', long = "label")]
    label: Option<String>,

    /// Raster file to print [default: stdin]
    raster_file: Option<PathBuf>,
}

fn print_status_report(status: &Status, verbose: bool) {
    if verbose {
        print!("  Hex:");
        for byte in status.raw() {
            print!(" {:02X}", byte);
        }
        println!();
        println!();
    }

    let errors = status.errors();
    if errors.is_empty() {
        println!("Status: OK - No errors");
    } else {
        println!("Status: ERROR");
        for error in &errors {
            println!("  - {}", error.description());
        }
    }

    println!("Model: {}", status.model().description());
    println!("Battery: {}", status.battery_level().description());
    println!("Media type: {}", status.media_type().description());
    println!("Media width: {} mm", status.media_width_mm());
    println!("Media length: {} mm", status.media_length());

    let (phase, number) = status.phase();
    match number {
        Some(number) => println!("Phase: {} ({})", phase.description(), number.description()),
        None => println!("Phase: {}", phase.description()),
    }

    if verbose {
        println!("Status type: {}", status.status_type().description());
        println!("Notification: {}", status.notification().description());
        println!("Tape color: {}", status.tape_color().description());
        println!("Text color: {}", status.text_color().description());
        println!("Hardware settings: 0x{:08X}", status.hardware_settings());
    }
}

fn handle_status_command(args: StatusArgs) -> Result<()> {
    let backend = backend::from_host(&args.host)?;
    let mut printer = Printer::new(backend);

    let status = printer.status()?;
    print_status_report(&status, args.verbose);

    Ok(())
}

fn handle_info_command(args: InfoArgs) -> Result<()> {
    let backend = backend::from_host(&args.host)?;
    let mut printer = Printer::new(backend);

    let (model, label) = printer.info(&DefaultCatalog, &DefaultCatalog)?;

    println!("Model: {}", model.identifier);
    match label {
        Some(label) => {
            match label.form_factor {
                FormFactor::Endless => {
                    println!("Media: {} ({} mm endless)", label.identifier, label.width_mm)
                }
                _ => println!(
                    "Media: {} ({} mm x {} mm)",
                    label.identifier, label.width_mm, label.length_mm
                ),
            }
            let (w, h) = label.dots_printable;
            println!("Printable dots: {} x {}", w, h);
        }
        None => println!("Media: none loaded"),
    }

    Ok(())
}

fn handle_print_command(args: PrintArgs) -> Result<()> {
    let data = match &args.raster_file {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };

    let backend = backend::from_host(&args.host)?;
    let mut printer = Printer::new(backend);

    match args.label {
        Some(label) => {
            let job = PrintJob::new(data, label);
            printer.print_job(&job, &DefaultCatalog, &DefaultCatalog)?;
        }
        None => printer.print(&data)?,
    }

    println!("Print completed");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status(args) => handle_status_command(args)?,
        Commands::Info(args) => handle_info_command(args)?,
        Commands::Print(args) => handle_print_command(args)?,
    }

    Ok(())
}
