use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "brandpost", version)]
struct Cli {
    /// Log layout decisions at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a post job to JPEG.
    Render(RenderArgs),
    /// List the built-in canvas presets.
    Presets,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long, required_unless_present = "all_presets")]
    out: Option<PathBuf>,

    /// Override the job's preset (name or `WxH`).
    #[arg(long)]
    preset: Option<String>,

    /// Override the primary text.
    #[arg(long)]
    text: Option<String>,

    /// Override the occasion line.
    #[arg(long)]
    occasion: Option<String>,

    /// Override JPEG quality (1-100).
    #[arg(long)]
    quality: Option<u8>,

    /// Write the computed layout as JSON.
    #[arg(long)]
    dump_layout: Option<PathBuf>,

    /// Render every preset of the job's table into `--out-dir`.
    #[arg(long, requires = "out_dir", conflicts_with_all = ["out", "preset"])]
    all_presets: bool,

    /// Output directory for `--all-presets`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Worker threads for `--all-presets`.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_presets() -> anyhow::Result<()> {
    for e in brandpost::PresetTable::default().entries() {
        println!("{:<10} {}", e.name, e.label());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut job = brandpost::PostJob::from_path(&args.in_path)?;
    if let Some(p) = args.preset {
        job.preset = p;
    }
    if let Some(t) = args.text {
        job.text = t;
    }
    if let Some(o) = args.occasion {
        job.occasion = Some(o);
    }
    if let Some(q) = args.quality {
        job.quality = q;
    }

    let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    // Notices are logged at warn level as they are raised.
    let loaded = job.load(root)?;

    if args.all_presets {
        let dir = args
            .out_dir
            .context("--all-presets requires --out-dir")?;
        return render_all(&job, &loaded.request, &dir, args.threads);
    }

    let out = args.out.context("--out is required")?;
    let output = brandpost::render_post(&loaded.request)?;

    write_file(&out, &output.bytes)?;
    if let Some(p) = args.dump_layout {
        write_file(&p, output.plan.to_json()?.as_bytes())?;
    }

    eprintln!(
        "wrote {} ({}x{}, {} notice(s), fingerprint {:016x})",
        out.display(),
        output.canvas.width(),
        output.canvas.height(),
        loaded.notices.len() + output.notices.len(),
        output.fingerprint
    );
    Ok(())
}

fn render_all(
    job: &brandpost::PostJob,
    request: &brandpost::RenderRequest,
    dir: &Path,
    threads: Option<usize>,
) -> anyhow::Result<()> {
    let table = job.preset_table();
    let mut targets = Vec::new();
    let mut names = Vec::new();
    for e in table.entries() {
        targets.push(table.resolve(&e.name)?);
        names.push(e.name.clone());
    }

    let results = brandpost::render_presets(request, &targets, threads)?;
    let mut failed = 0usize;
    for (name, (_, res)) in names.iter().zip(results) {
        match res {
            Ok(output) => {
                let p = dir.join(format!("{name}.jpg"));
                write_file(&p, &output.bytes)?;
                eprintln!("wrote {}", p.display());
            }
            Err(e) => {
                failed += 1;
                eprintln!("error: preset '{name}': {e}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} preset(s) failed to render");
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
