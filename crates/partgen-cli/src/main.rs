//! partgen CLI - generate parametric parts in batches or one at a time.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use partgen::ir::{Document, KernelOp, NodeId};
use partgen::{
    build_solid, read_parts, run_batch, write_bom, BoltSpec, Config, GearSpec, IrKernel,
    PartRecord, PartSpec, ProfileGenerator,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "partgen")]
#[command(about = "Parametric washers, spacers, flanges, bolts and gears", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every part in a CSV part list and write a BOM
    Batch {
        /// CSV part list
        input: PathBuf,
        /// Directory for part documents and the BOM
        #[arg(long, default_value = "generated_parts")]
        out_dir: PathBuf,
    },
    /// Generate a hex-head bolt
    Bolt {
        /// Shaft diameter (mm)
        #[arg(long, default_value_t = 10.0)]
        diameter: f64,
        /// Shaft length (mm)
        #[arg(long, default_value_t = 50.0)]
        length: f64,
        /// Head width across flats (mm)
        #[arg(long, default_value_t = 17.0)]
        head_width: f64,
        /// Head height (mm)
        #[arg(long, default_value_t = 8.0)]
        head_height: f64,
        /// Output file (default: <name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate an involute spur gear
    Gear {
        /// Number of teeth
        #[arg(long, default_value_t = 20)]
        teeth: u32,
        /// Module (mm)
        #[arg(long, default_value_t = 2.0)]
        module: f64,
        /// Pressure angle (degrees)
        #[arg(long, default_value_t = 20.0)]
        pressure_angle: f64,
        /// Face width (mm)
        #[arg(long, default_value_t = 5.0)]
        thickness: f64,
        /// Bore diameter (mm), 0 for none
        #[arg(long, default_value_t = 5.0)]
        bore: f64,
        /// Backlash at the pitch circle (mm)
        #[arg(long, default_value_t = 0.05)]
        backlash: f64,
        /// Output file (default: <name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display information about a part document
    Info {
        /// Path to the document
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Batch { input, out_dir } => {
            batch(&input, &out_dir, &config)?;
        }
        Commands::Bolt {
            diameter,
            length,
            head_width,
            head_height,
            output,
        } => {
            let spec = PartSpec::Bolt(BoltSpec {
                bolt_diameter: diameter,
                bolt_length: length,
                head_width_across_flats: head_width,
                head_height,
            });
            single(spec, &config, output)?;
        }
        Commands::Gear {
            teeth,
            module,
            pressure_angle,
            thickness,
            bore,
            backlash,
            output,
        } => {
            let spec = PartSpec::Gear(GearSpec {
                num_teeth: teeth,
                module,
                pressure_angle_degrees: pressure_angle,
                thickness,
                bore_diameter: bore,
                backlash,
            });
            single(spec, &config, output)?;
        }
        Commands::Info { file } => {
            show_info(&file)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default = if verbose { "partgen=debug" } else { "partgen=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn batch(input: &Path, out_dir: &Path, config: &Config) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let rows = read_parts(file, &config.input)?;
    tracing::info!("Read {} rows from {}", rows.len(), input.display());
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Could not create folder {}", out_dir.display()))?;

    let mut kernel = IrKernel::new();
    let report = run_batch(
        &ProfileGenerator::new(config.profile),
        &mut kernel,
        rows,
        |kernel, record: &PartRecord, solid| {
            kernel.finish_part(solid, &record.name, record.quantity)?;
            let doc = kernel.export_part(solid, &record.name, record.quantity)?;
            let path = out_dir.join(format!("{}.json", record.name));
            fs::write(&path, doc.to_json()?)?;
            tracing::debug!("Exported {} to {:?}", record.name, path);
            Ok(())
        },
    );

    let bom_path = out_dir.join(&config.output.bom_file);
    let bom = File::create(&bom_path)
        .with_context(|| format!("Failed to create {}", bom_path.display()))?;
    write_bom(bom, &report.generated)?;
    tracing::info!("Wrote BOM to {:?}", bom_path);

    println!(
        "Generated {} parts in {}, BOM at {}",
        report.generated.len(),
        out_dir.display(),
        bom_path.display()
    );
    if !report.skipped.is_empty() {
        println!("Skipped {} rows:", report.skipped.len());
        for s in &report.skipped {
            match &s.name {
                Some(name) => println!("  line {}: {}: {}", s.line, name, s.error),
                None => println!("  line {}: {}", s.line, s.error),
            }
        }
    }
    Ok(())
}

fn single(spec: PartSpec, config: &Config, output: Option<PathBuf>) -> Result<()> {
    let record = PartRecord::new(spec, 1);
    let request = ProfileGenerator::new(config.profile).generate(&record.spec)?;
    tracing::debug!("{}: {}", record.name, record.spec.describe());

    let mut kernel = IrKernel::new();
    let solid = build_solid(&mut kernel, &request)?;
    kernel.finish_part(solid, &record.name, record.quantity)?;

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.json", record.name)));
    fs::write(&output, kernel.into_document().to_json()?)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Wrote {} to {:?}", record.name, output);
    println!("Wrote {} to {}", record.name, output.display());
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let json = fs::read_to_string(file)?;
    let doc = Document::from_json(&json)?;
    if doc.parts.is_empty() && doc.nodes.is_empty() {
        bail!("{} holds no parts", file.display());
    }

    let (mut extrudes, mut booleans, mut patterns) = (0, 0, 0);
    for node in doc.nodes.values() {
        match node.op {
            KernelOp::Extrude { .. } => extrudes += 1,
            KernelOp::Fuse { .. } | KernelOp::Cut { .. } => booleans += 1,
            KernelOp::CircularPattern { .. } => patterns += 1,
        }
    }

    println!("partgen document: {}", file.display());
    println!("  Version: {}", doc.version);
    println!("  Nodes: {}", doc.nodes.len());
    println!("    Extrusions: {}", extrudes);
    println!("    Booleans: {}", booleans);
    println!("    Patterns: {}", patterns);
    println!("  Parts: {}", doc.parts.len());

    for (i, part) in doc.parts.iter().enumerate() {
        let height = max_height(&doc, part.root);
        println!(
            "  {}: {} x{} (height {:.3} mm)",
            i + 1,
            part.name,
            part.quantity,
            height
        );
    }

    Ok(())
}

/// Top of the tallest extrusion under `root`.
fn max_height(doc: &Document, root: NodeId) -> f64 {
    doc.subgraph(root)
        .map(|sub| {
            sub.nodes
                .values()
                .filter_map(|n| match n.op {
                    KernelOp::Extrude {
                        height, z_offset, ..
                    } => Some(z_offset + height),
                    _ => None,
                })
                .fold(0.0, f64::max)
        })
        .unwrap_or(0.0)
}
