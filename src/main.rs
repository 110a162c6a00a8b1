use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use sandpack_bridge::{
    BridgeOptions, CompileRequest, MemoryHost, MemoryTransport, MessageBus, OutboundMessage,
    PreviewBridge, SandboxBuilder, SandboxDescription, TemplateRegistry,
};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sandpack-bridge",
    version,
    about = "Normalize a project directory into bundler compile commands",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the compile command the bridge would send
    Compile(SourceArgs),
    /// Print the manifest active for the project
    Manifest(SourceArgs),
    /// Print the template the bundler would use
    Template(SourceArgs),
    /// Mount an in-memory frame, initialize it and print what it receives
    Simulate(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Project directory to load
    dir: PathBuf,

    /// Dependency hint, repeatable (e.g. react@^16.0.0)
    #[arg(long = "dep", value_name = "NAME@RANGE")]
    deps: Vec<String>,

    /// Entry file used when the project has no package.json
    #[arg(long)]
    entry: Option<String>,

    /// Template to use instead of inferring one
    #[arg(long)]
    template: Option<String>,

    /// Ask the bundler to skip evaluation
    #[arg(long)]
    skip_eval: bool,

    /// TOML file with bridge options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bundler location
    #[arg(long, env = "SANDPACK_BUNDLER_URL")]
    bundler_url: Option<String>,
}

impl SourceArgs {
    fn description(&self) -> Result<SandboxDescription> {
        let mut builder = SandboxBuilder::new()
            .ingest_dir(&self.dir)
            .with_context(|| format!("Failed to load {}", self.dir.display()))?;

        for dep in &self.deps {
            let (name, range) = parse_dependency(dep)?;
            builder = builder.dependency(name, range);
        }
        if let Some(entry) = &self.entry {
            builder = builder.entry(entry)?;
        }
        if let Some(template) = &self.template {
            builder = builder.template(template.clone());
        }

        Ok(builder.build())
    }

    fn options(&self) -> Result<BridgeOptions> {
        let mut options = match &self.config {
            Some(path) => BridgeOptions::from_path(path)?,
            None => BridgeOptions::default(),
        };
        if self.skip_eval {
            options.skip_eval = true;
        }
        if let Some(url) = &self.bundler_url {
            options.bundler_url = Some(url.clone());
        }
        Ok(options)
    }
}

/// Split `name@range`, keeping the leading `@` of scoped packages
fn parse_dependency(hint: &str) -> Result<(String, String)> {
    let (name, range) = match hint.rfind('@') {
        Some(at) if at > 0 => (&hint[..at], &hint[at + 1..]),
        _ => (hint, "latest"),
    };
    if name.is_empty() || range.is_empty() {
        bail!("Invalid dependency '{}', expected NAME@RANGE", hint);
    }
    Ok((name.to_string(), range.to_string()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Compile(args) => {
            let description = args.description()?;
            let options = args.options()?;
            let command = CompileRequest::prepare(&description, &TemplateRegistry::default())
                .into_command(options.skip_eval);
            println!("{:#}", OutboundMessage::Compile(command).to_value()?);
        }
        Command::Manifest(args) => {
            let request = CompileRequest::prepare(&args.description()?, &TemplateRegistry::default());
            println!("{}", request.manifest.to_json());
        }
        Command::Template(args) => {
            let request = CompileRequest::prepare(&args.description()?, &TemplateRegistry::default());
            println!("{}", request.template);
        }
        Command::Simulate(args) => simulate(&args)?,
    }

    Ok(())
}

fn simulate(args: &SourceArgs) -> Result<()> {
    let description = args.description()?;
    let options = args.options()?;

    let mut host = MemoryHost::new();
    let root = host.root();
    host.append_element(root, "div", Some("preview"));

    let bus = MessageBus::new();
    let transport = MemoryTransport::new();
    let mut bridge = PreviewBridge::new(
        &mut host,
        "#preview",
        description,
        &options,
        &bus,
        transport.clone(),
    )?;
    info!(
        files = bridge.description().file_count(),
        src = bridge.frame().src(),
        "frame mounted"
    );

    bus.post(json!({ "type": "initialized" }));
    bridge.pump()?;

    for (window, message) in transport.sent() {
        println!("{:#}", json!({ "target": window.raw(), "message": message }));
    }

    Ok(())
}
