// crates/apksplit-cli/src/main.rs

//! apksplit - configuration splits and split manifests from the command line.

use anyhow::{Context, Result};
use apksplit::{
    ConfigDescription, LogDiagnostics, ParamError, SplitOptions, Source,
    adjust_split_constraints_for_min_sdk, parse_config_filter_parameters, parse_split_parameter,
    parse_target_density_parameter,
};
use apksplit_xml::{
    AppInfo, ManifestError, extract_app_info_from_manifest, generate_split_manifest, load_xml_from_str,
    save_xml_to_string,
};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "apksplit", version, about)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a `--preferred-density` style argument to a density value.
    Density {
        /// A single density qualifier, e.g. `xhdpi`.
        arg: String,
    },

    /// Write the manifest of each resource-only split.
    SplitManifest {
        /// Package name of the base application.
        #[arg(long)]
        package: String,

        #[arg(long)]
        version_code: Option<u32>,

        #[arg(long)]
        revision_code: Option<u32>,

        /// Name of the feature split the configuration splits belong to.
        #[arg(long)]
        split_name: Option<String>,

        /// Version qualifiers at or below this are dropped from split names.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        min_sdk: i32,

        /// Separator between the output path and the configurations.
        #[arg(long)]
        separator: Option<char>,

        /// `path/to/output.apk:<config>[,<config>...]`
        #[arg(long = "split", required = true)]
        splits: Vec<String>,

        /// Directory for the generated manifests. Standard output when absent.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print the application identity declared by a manifest.
    AppInfo {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Check configurations against a `-c` style filter.
    Filter {
        /// Filter arguments, each a comma-separated list of configurations.
        #[arg(short = 'c', long = "configs", required = true)]
        filters: Vec<String>,

        /// Candidate configurations, e.g. `fr-xhdpi`.
        configs: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level(cli.verbose)),
    )
    .init();

    if let Err(e) = run(cli.command) {
        if !already_reported(&e) {
            log::error!("{:#}", e);
        }
        std::process::exit(1);
    }
}

/// Library errors that went through the diagnostics sink on their way out.
fn already_reported(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ParamError>().is_some()
        || e
            .downcast_ref::<ManifestError>()
            .is_some_and(|e| *e != ManifestError::EmptyDocument)
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(command: Commands) -> Result<()> {
    let mut diag = LogDiagnostics;

    match command {
        Commands::Density { arg } => {
            let density = parse_target_density_parameter(&arg, &mut diag)?;
            println!("{}", density);
        }
        Commands::SplitManifest {
            package,
            version_code,
            revision_code,
            split_name,
            min_sdk,
            separator,
            splits,
            out_dir,
        } => {
            let options = separator
                .map(|separator| SplitOptions { separator })
                .unwrap_or_default();

            let mut outputs = Vec::with_capacity(splits.len());
            let mut constraints = Vec::with_capacity(splits.len());
            for arg in &splits {
                let param = parse_split_parameter(arg, &options, &mut diag)?;
                outputs.push(param.output_path);
                constraints.push(param.constraints);
            }
            let constraints = adjust_split_constraints_for_min_sdk(min_sdk, &constraints);

            let app_info = AppInfo {
                package,
                version_code,
                revision_code,
                split_name,
                min_sdk_version: min_sdk,
            };

            if let Some(dir) = &out_dir {
                fs::create_dir_all(dir)
                    .with_context(|| format!("cannot create {}", dir.display()))?;
            }

            for (output, split) in outputs.iter().zip(&constraints) {
                let xml = save_xml_to_string(&generate_split_manifest(&app_info, split))?;
                match &out_dir {
                    Some(dir) => {
                        let path = dir.join(manifest_file_name(output));
                        fs::write(&path, xml)
                            .with_context(|| format!("cannot write {}", path.display()))?;
                        log::info!("{}: split config.{}", path.display(), split.joined_name());
                    }
                    None => println!("{}", xml),
                }
            }
        }
        Commands::AppInfo { file, json } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let doc = load_xml_from_str(&text, Source::new(file.display().to_string()))
                .with_context(|| format!("{}: failed to load XML", file.display()))?;
            let info = extract_app_info_from_manifest(&doc, &mut diag)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print_app_info(&info);
            }
        }
        Commands::Filter { filters, configs } => {
            let filter = parse_config_filter_parameters(filters.as_slice(), &mut diag)?;
            for text in &configs {
                let config = ConfigDescription::parse(text)?;
                let verdict = if filter.matches(&config) {
                    "match"
                } else {
                    "skip"
                };
                println!("{}\t{}", text, verdict);
            }
        }
    }
    Ok(())
}

/// `out/app-xhdpi.apk` writes `app-xhdpi.AndroidManifest.xml`.
fn manifest_file_name(output_path: &str) -> String {
    let stem = Path::new(output_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| output_path.to_string());
    format!("{}.AndroidManifest.xml", stem)
}

fn print_app_info(info: &AppInfo) {
    println!("package: {}", info.package);
    if let Some(version_code) = info.version_code {
        println!("versionCode: {}", version_code);
    }
    if let Some(revision_code) = info.revision_code {
        println!("revisionCode: {}", revision_code);
    }
    if let Some(split_name) = &info.split_name {
        println!("split: {}", split_name);
    }
    println!("minSdkVersion: {}", info.min_sdk_version);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_manifest_args() {
        let cli = Cli::try_parse_from([
            "apksplit",
            "-vv",
            "split-manifest",
            "--package",
            "com.example",
            "--min-sdk",
            "21",
            "--split",
            "out/a.apk:xhdpi",
            "--split",
            "out/b.apk:fr,de",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::SplitManifest {
            package,
            min_sdk,
            splits,
            separator,
            ..
        } = cli.command
        else {
            panic!("expected split-manifest");
        };
        assert_eq!(package, "com.example");
        assert_eq!(min_sdk, 21);
        assert_eq!(splits, vec!["out/a.apk:xhdpi", "out/b.apk:fr,de"]);
        assert_eq!(separator, None);
    }

    #[test]
    fn test_split_is_required() {
        assert!(Cli::try_parse_from(["apksplit", "split-manifest", "--package", "a"]).is_err());
    }

    #[test]
    fn test_filter_args() {
        let cli = Cli::try_parse_from(["apksplit", "filter", "-c", "en,fr", "-c", "hdpi", "fr", "de"])
            .unwrap();
        let Commands::Filter { filters, configs } = cli.command else {
            panic!("expected filter");
        };
        assert_eq!(filters, vec!["en,fr", "hdpi"]);
        assert_eq!(configs, vec!["fr", "de"]);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(5), "trace");
    }

    #[test]
    fn test_manifest_file_name() {
        assert_eq!(
            manifest_file_name("out/app-xhdpi.apk"),
            "app-xhdpi.AndroidManifest.xml"
        );
        assert_eq!(manifest_file_name("split"), "split.AndroidManifest.xml");
    }

    #[test]
    fn test_density_command() {
        assert!(run(Commands::Density { arg: "xhdpi".into() }).is_ok());
        assert!(run(Commands::Density { arg: "xhdpi-land".into() }).is_err());
    }

    #[test]
    fn test_reported_errors_are_logged_once() {
        let err = run(Commands::Density { arg: "xhdpi-land".into() }).unwrap_err();
        assert!(already_reported(&err));

        let err = run(Commands::Filter {
            filters: vec!["en,fr".into()],
            configs: vec!["not-a-config".into()],
        })
        .unwrap_err();
        assert!(!already_reported(&err));

        let err = run(Commands::AppInfo {
            file: PathBuf::from("does/not/exist/AndroidManifest.xml"),
            json: false,
        })
        .unwrap_err();
        assert!(!already_reported(&err));

        assert!(!already_reported(&anyhow::Error::new(ManifestError::EmptyDocument)));
        assert!(already_reported(&anyhow::Error::new(ManifestError::MissingPackage)));
    }
}
