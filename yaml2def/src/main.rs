//! # yaml2def
//!
//! Def21 Routing Data to DEF Converter
//!

use clap::Parser;
use log::info;
use std::error::Error;

use def21::{DefRouting, SerializationFormat};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// Def21 Routing Data (YAML, JSON, or TOML) to DEF Converter
#[derive(Parser)]
struct ProgramOptions {
    /// Routing Input File. Format is inferred from its extension.
    #[clap(short = 'i', long, default_value = "")]
    input: String,
    /// DEF Output File
    #[clap(short = 'o', long, default_value = "")]
    def: String,
    /// Print a debug dump of each net to stdout
    #[clap(short, long)]
    print: bool,
    /// Verbose Output Mode
    #[clap(short, long)]
    verbose: bool,
}

/// The main entry point.
/// All logic is offloaded to `_main` for sake of testing.
fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    let level = if options.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    _main(&options)
}

/// All the real logic, with `ProgramOptions` argument for sake of testing
fn _main(options: &ProgramOptions) -> Result<(), Box<dyn Error>> {
    // Load the routing data, in whichever format its extension indicates
    let fmt = SerializationFormat::from_path(&options.input)?;
    let routing: DefRouting = fmt.open(&options.input)?;
    info!(
        "Loaded {} nets and {} special nets from {}",
        routing.nets.len(),
        routing.special_nets.len(),
        options.input
    );

    if options.print {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for net in routing.special_nets.iter().chain(routing.nets.iter()) {
            net.print(&mut out)?;
        }
    }

    // And write it as DEF
    routing.save_def(&options.def)?;
    if options.verbose {
        println!("wrote {:?}", &options.def);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use def21::SerdeFile;

    #[test]
    fn converts_resource_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let output_path = dir.path().join("routing.def");
        let options = ProgramOptions {
            input: resource("routing.yaml"),
            def: output_path.to_string_lossy().to_string(),
            print: true,
            verbose: false,
        };
        _main(&options)?;

        // Compare against writing the same data in-process
        let routing = DefRouting::open(resource("routing.yaml"), SerializationFormat::Yaml)?;
        let written = std::fs::read_to_string(&output_path)?;
        assert_eq!(written, routing.to_def_string()?);
        assert!(written.starts_with("VERSION 5.8 ;\nSPECIALNETS 1 ;\n"));
        assert!(written.contains("+ ROUTED M1 ( 0 0 ) ( 1000 0 ) VIA12\n"));
        Ok(())
    }
    #[test]
    fn converts_json() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("routing.json");
        let output_path = dir.path().join("routing.def");

        let routing = DefRouting::open(resource("routing.yaml"), SerializationFormat::Yaml)?;
        routing.save(SerializationFormat::Json, &input_path)?;

        let options = ProgramOptions {
            input: input_path.to_string_lossy().to_string(),
            def: output_path.to_string_lossy().to_string(),
            print: false,
            verbose: false,
        };
        _main(&options)?;
        assert_eq!(std::fs::read_to_string(&output_path)?, routing.to_def_string()?);
        Ok(())
    }
    #[test]
    fn rejects_unknown_formats() {
        let options = ProgramOptions {
            input: resource("routing.def"),
            def: String::new(),
            print: false,
            verbose: false,
        };
        assert!(_main(&options).is_err());
    }

    /// Grab the full path of resource-file `fname`
    fn resource(rname: &str) -> String {
        format!("{}/resources/{}", env!("CARGO_MANIFEST_DIR"), rname)
    }
}
