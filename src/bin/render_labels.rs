//! Render label PDFs from a JSON row file.
//!
//! Usage:
//!   cargo run --bin render_labels -- --rows rows.json --style biomass --symbology barcode
//!   cargo run --bin render_labels -- --rows rows.json --style qr --output-dir out/

use labelpress::{
    rows_from_json, FileStore, LabelAssembler, LabelStyle, RenderConfig, Symbology,
};
use std::path::PathBuf;
use std::process::ExitCode;

struct CliConfig {
    rows_path: PathBuf,
    style: LabelStyle,
    symbology: Symbology,
    output_dir: PathBuf,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut rows_path: Option<PathBuf> = None;
        let mut style = LabelStyle::Qr;
        let mut symbology = Symbology::QrCode;
        let mut output_dir = PathBuf::from("labels_pdf");

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--rows" => {
                    i += 1;
                    rows_path = args.get(i).map(PathBuf::from);
                },
                "--style" => {
                    i += 1;
                    let value = args.get(i).ok_or("--style needs a value")?;
                    style = value.parse().map_err(|e| format!("{}", e))?;
                },
                "--symbology" => {
                    i += 1;
                    let value = args.get(i).ok_or("--symbology needs a value")?;
                    symbology = value.parse().map_err(|e| format!("{}", e))?;
                },
                "--output-dir" => {
                    i += 1;
                    if let Some(dir) = args.get(i) {
                        output_dir = PathBuf::from(dir);
                    }
                },
                other => return Err(format!("unknown argument '{}'", other)),
            }
            i += 1;
        }

        Ok(Self {
            rows_path: rows_path.ok_or("--rows <file.json> is required")?,
            style,
            symbology,
            output_dir,
        })
    }
}

fn run(config: &CliConfig) -> labelpress::Result<()> {
    let json = std::fs::read_to_string(&config.rows_path)?;
    let rows = rows_from_json(&json)?;

    let store = FileStore::new(config.output_dir.clone())?;
    let assembler = LabelAssembler::new(RenderConfig::new());
    let handle = assembler.generate(&rows, config.style, config.symbology, &store)?;

    println!("rendered {} label(s) -> {}", rows.len(), handle.name());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match CliConfig::from_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!(
                "usage: render_labels --rows <file.json> [--style qr|biomass|line] \
                 [--symbology qr|barcode] [--output-dir <dir>]"
            );
            return ExitCode::FAILURE;
        },
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}
