// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reg_search::*;

/// Finds the install location of an application by its display name.
#[derive(Parser)]
struct Args {
    /// (Part of) the display name of the application.
    #[arg(default_value = "7-Zip")]
    app_name: String,

    /// Search this SOFTWARE hive file instead of the live registry.
    #[arg(long, value_name = "FILE")]
    software_hive: Option<PathBuf>,
}

fn search(args: &Args) -> Result<Option<String>> {
    if let Some(software_hive) = &args.software_hive {
        let mut registry = OfflineRegistry::new();
        registry.mount_file("HKLM\\SOFTWARE", software_hive)?;
        return find_install_location(&registry, &args.app_name);
    }

    #[cfg(windows)]
    {
        find_install_location(&LiveRegistry::new(), &args.app_name)
    }

    #[cfg(not(windows))]
    {
        println!("The live registry is only available on Windows. Use --software-hive <FILE>.");
        Ok(None)
    }
}

/// Formats the outcome of a search, treating an empty install location as not found.
fn report(location: Option<&str>) -> String {
    match location {
        Some(location) if !location.is_empty() => format!("Found: {}", location),
        _ => "Not found.".to_string(),
    }
}

/// Shows warnings (such as an inaccessible registry key) unless `RUST_LOG` says otherwise.
fn logger() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
}

fn main() -> ExitCode {
    logger().init();
    let args = Args::parse();

    match search(&args) {
        Ok(location) => {
            println!("{}", report(location.as_deref()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
