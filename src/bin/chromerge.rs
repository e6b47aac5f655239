use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chromerge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset of task bundles.
    Generate(GenerateArgs),
    /// Print one sampled task record as JSON, optionally writing its first/final frames.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output root; bundles are written under `<out>/<domain>_task/`.
    #[arg(long)]
    out: PathBuf,

    /// Number of tasks to generate.
    #[arg(long, default_value_t = 10)]
    num_samples: usize,

    /// Base random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Optional generator config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip ground-truth videos even if the config enables them.
    #[arg(long, default_value_t = false)]
    no_videos: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Random seed for the task.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Optional generator config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write `first_frame.png` and `final_frame.png` into.
    #[arg(long)]
    frames_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<chromerge::GeneratorConfig> {
    match path {
        Some(p) => chromerge::GeneratorConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(chromerge::GeneratorConfig::default()),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if args.no_videos {
        cfg.generate_videos = false;
    }

    let generator = chromerge::TaskGenerator::new(cfg)?;
    let opts = chromerge::DatasetOpts {
        out_dir: args.out.clone(),
        num_samples: args.num_samples,
        seed: args.seed,
        threads: args.threads,
    };
    let summary = chromerge::generate_dataset(&generator, &opts)?;

    eprintln!(
        "wrote {} tasks ({} with video) to {}",
        summary.written,
        summary.videos,
        summary.tasks_dir.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    cfg.generate_videos = false;
    let generator = chromerge::TaskGenerator::new(cfg)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let task = generator.sample_task(&mut rng);
    println!("{}", serde_json::to_string_pretty(&task)?);

    if let Some(dir) = args.frames_out {
        let compositor = generator.compositor();
        compositor
            .render_initial(&task)
            .save_png(&dir.join("first_frame.png"))?;
        compositor
            .render_final(&task)
            .save_png(&dir.join("final_frame.png"))?;
        eprintln!("wrote {}", dir.display());
    }
    Ok(())
}
