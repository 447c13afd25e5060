//! ruleset-export: dump preset rulesets as JSON for editing, and check
//! edited files before handing them to the game.
//!
//! Usage:
//!   ruleset-export dump --variant tactical --output tactical.json
//!   ruleset-export dump --all --output rulesets/
//!   ruleset-export check my_rules.json

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};

use skyshield_core::enums::Variant;
use skyshield_sim::Ruleset;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "dump" => cmd_dump(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "ruleset-export: SKYSHIELD ruleset tool\n\
         \n\
         Commands:\n\
         \n\
         dump      Write preset rulesets as pretty JSON\n\
         \n\
           --variant <name>   classic, tactical, aerodynamic or elite (default: classic)\n\
           --all              Every preset; --output must be a directory\n\
           --output <path>    Output file or directory (default: stdout)\n\
         \n\
         check     Parse and validate ruleset files\n\
         \n\
           <path>...          One or more JSON files\n\
         \n\
         Examples:\n\
         \n\
           ruleset-export dump --variant elite --output elite.json\n\
           ruleset-export dump --all --output rulesets/\n\
           ruleset-export check rulesets/tactical.json\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn cmd_dump(args: &[String]) -> Result<()> {
    let output = flag_value(args, "--output").map(PathBuf::from);

    if args.iter().any(|a| a == "--all") {
        let dir = output.context("--all requires --output <directory>")?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed creating {}", dir.display()))?;
        for variant in Variant::ALL {
            let path = dir.join(format!("{}.json", variant.name()));
            write_preset(variant, Some(&path))?;
        }
        return Ok(());
    }

    let variant = match flag_value(args, "--variant") {
        Some(name) => name
            .parse::<Variant>()
            .with_context(|| format!("bad --variant '{name}'"))?,
        None => Variant::Classic,
    };
    write_preset(variant, output.as_deref())
}

fn write_preset(variant: Variant, path: Option<&Path>) -> Result<()> {
    let json = Ruleset::preset(variant)
        .to_json_pretty()
        .with_context(|| format!("failed encoding {variant} ruleset"))?;
    match path {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("failed writing {}", path.display()))?;
            eprintln!("Wrote {variant} ruleset to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("check needs at least one file");
    }
    for path in args {
        let ruleset =
            Ruleset::load(path).with_context(|| format!("{path} is not a valid ruleset"))?;
        println!("{path}: OK ({}, {})", ruleset.name, ruleset.variant);
    }
    Ok(())
}
