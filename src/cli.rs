use crate::capability::CapabilityType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nodedev")]
#[command(about = "Inspect libvirt node devices and the sysfs files that back them")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (terminal, json)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// virsh binary to run (default: $NODEDEV_VIRSH or "virsh")
    #[arg(long, global = true)]
    pub virsh: Option<PathBuf>,

    /// libvirt connection URI (default: $LIBVIRT_DEFAULT_URI)
    #[arg(short = 'c', long, global = true)]
    pub connect: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List node devices known to libvirt
    List {
        /// Only devices with this capability type
        #[arg(long, value_parser = parse_capability_type)]
        cap: Option<CapabilityType>,
    },

    /// Show a device's capability fields and sysfs location
    Show {
        /// Node device name, e.g. pci_0000_00_1f_2
        device: String,
    },

    /// Print the cross-checkable values libvirt reports for a device
    Values {
        /// Node device name
        device: String,
    },

    /// Print the sysfs file backing each cross-checkable value
    Paths {
        /// Node device name
        device: String,
    },

    /// Show a device from a saved nodedev-dumpxml file instead of asking libvirt
    Inspect {
        /// Path to the XML file
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Terminal,
    /// JSON output for machine consumption
    Json,
}

fn parse_capability_type(value: &str) -> Result<CapabilityType, String> {
    value.parse().map_err(|_| {
        let known: Vec<&str> = CapabilityType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown capability type '{value}' (expected one of: {})", known.join(", "))
    })
}
