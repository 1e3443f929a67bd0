use std::process;

use lumen_render::RenderOptions;
use lumen_tool::args::{Args, USAGE};
use lumen_tool::report;

fn load_options(args: &Args) -> RenderOptions {
    let mut options = match &args.config_path {
        Some(path) => {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", path.display(), e);
                    process::exit(1);
                }
            };
            match RenderOptions::from_ron_str(&text) {
                Ok(options) => {
                    log::info!("Loaded render options from {}", path.display());
                    options
                }
                Err(e) => {
                    eprintln!("{e}");
                    process::exit(1);
                }
            }
        }
        None => RenderOptions::default(),
    };

    // command line wins over the config file
    if args.names {
        options.abbrev = false;
    }
    if args.highlight.is_some() {
        options.highlight = args.highlight;
    }
    options
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if args.help {
        eprintln!("{USAGE}");
        process::exit(0);
    }

    if args.sequences.is_empty() && args.masks.is_empty() {
        log::warn!("Nothing to decode; pass --hex, --abbrev-seq, --pairs or --mask");
        eprintln!("{USAGE}");
        process::exit(1);
    }

    let options = load_options(&args);

    log::debug!("Decoding {} sequences", args.sequences.len());
    let decoded: Vec<_> = args
        .sequences
        .iter()
        .map(|seq| report::decode(seq, &options))
        .collect();

    if args.json {
        match report::to_json(&decoded) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize: {e}");
                process::exit(1);
            }
        }
    } else if !decoded.is_empty() {
        println!("{}", report::format_markdown(&decoded));
    }

    for mask in &args.masks {
        println!("{}", report::format_mask(*mask, options.abbrev));
    }
}
