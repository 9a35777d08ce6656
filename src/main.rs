use anyhow::{Context, Result};
use clap::Parser;
use nodedev::cli::{self, Command, OutputFormat};
use nodedev::output::{self, DeviceReport};
use nodedev::{Config, NodeDevice, Virsh};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse args early to get verbose flag for logging initialization
    let args = cli::Args::parse();

    // RUST_LOG wins over --verbose, e.g. RUST_LOG=nodedev::virsh=debug
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("nodedev=debug")
    } else {
        EnvFilter::new("nodedev=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    debug!("Logging initialized (verbose={})", args.verbose);

    let mut config = Config::from_env();
    if let Some(virsh) = &args.virsh {
        config = config.with_virsh_binary(virsh);
    }
    if let Some(uri) = &args.connect {
        config = config.with_connect_uri(uri);
    }
    config.validate()?;
    let virsh = Virsh::from_config(&config);

    let rendered = match &args.command {
        Command::List { cap } => {
            let names = nodedev::list_devices(&virsh, *cap)?;
            match args.format {
                OutputFormat::Json => output::format_json(&names)?,
                OutputFormat::Terminal => output::format_list_terminal(&names),
            }
        }
        Command::Show { device } => {
            let device = NodeDevice::from_dumpxml(device, &virsh)?;
            render_report(&device, args.format)?
        }
        Command::Inspect { file } => {
            let device = NodeDevice::from_file(file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            render_report(&device, args.format)?
        }
        Command::Values { device } => {
            let values = nodedev::key_to_value(device, &virsh)
                .with_context(|| format!("Failed to read values for {device}"))?;
            match args.format {
                OutputFormat::Json => output::format_json(&values)?,
                OutputFormat::Terminal => output::format_values_terminal(&values),
            }
        }
        Command::Paths { device } => {
            let paths = nodedev::key_to_sysfs_path(device, &virsh)
                .with_context(|| format!("Failed to derive sysfs paths for {device}"))?;
            match args.format {
                OutputFormat::Json => output::format_json(&paths)?,
                OutputFormat::Terminal => output::format_paths_terminal(&paths),
            }
        }
    };

    print!("{rendered}");
    if args.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn render_report(device: &NodeDevice, format: OutputFormat) -> Result<String> {
    let report = DeviceReport::from_device(device)?;
    Ok(match format {
        OutputFormat::Json => output::format_json(&report)?,
        OutputFormat::Terminal => output::format_report_terminal(&report),
    })
}
