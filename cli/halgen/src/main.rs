//! halgen — BUILD.gn generator for hardware abstraction layer trees.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::generate::GenerateOptions;
use manifest::HalgenManifest;

#[derive(Parser)]
#[command(name = "halgen", version, about = "Generate BUILD.gn for a hardware tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan source roots and write the static library declaration
    Generate {
        /// Target chip (e.g., rk2206)
        #[arg(long)]
        chip: Option<String>,
        /// Target board (e.g., TB-RK2206H0-A)
        #[arg(long)]
        board: Option<String>,
        /// Output file, relative to the current directory (default: BUILD.gn next to halgen.toml)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Sort directory entries by name
        #[arg(long)]
        sorted: bool,
        /// Print the generated file instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// List the known chip family
    Chips,
    /// Check whether a source path would be kept for a chip
    Check {
        /// Candidate source path, as it would appear in BUILD.gn
        path: String,
        /// Chip to check against (default: manifest target)
        #[arg(long)]
        chip: Option<String>,
    },
    /// Write a starter halgen.toml in the current directory
    Init,
}

fn main() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Generate {
            chip,
            board,
            output,
            sorted,
            stdout,
        } => {
            let output = resolve_output(&cwd, output);
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let options = GenerateOptions {
                chip: chip.as_deref(),
                board: board.as_deref(),
                output: output.as_deref(),
                sorted,
                stdout,
            };
            commands::generate::run(&project_dir, manifest.as_ref(), &options)
        }

        Commands::Chips => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            let manifest = manifest.unwrap_or_default();
            commands::chips::list(&manifest.chip_set(), &manifest.target.chip)
        }

        Commands::Check { path, chip } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            let manifest = manifest.unwrap_or_default();
            let chip = chip.unwrap_or_else(|| manifest.target.chip.clone());
            commands::chips::check(&manifest.chip_set(), &chip, &path)
        }

        Commands::Init => commands::init::run(&cwd),
    }
}

/// Anchor a user-supplied output path at the directory the command ran in.
fn resolve_output(cwd: &Path, output: Option<PathBuf>) -> Option<PathBuf> {
    output.map(|path| cwd.join(path))
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<HalgenManifest>, Option<PathBuf>)> {
    match HalgenManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use std::fs;

    use super::*;

    fn touch(base: &Path, rel: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    /// Full workflow: init → generate from a nested directory → inspect output.
    #[test]
    fn init_generate_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path();
        touch(project, "lib/hal/src/hal_uart.c");
        touch(project, "lib/bsp/RK2206/hal_bsp.c");
        touch(project, "lib/bsp/RK3568/hal_bsp.c");
        touch(project, "lib/CMSIS/Device/RK2206/system_rk2206.c");
        touch(project, "driver/foo_rk2206.c");
        touch(project, "driver/foo_rk3568.c");
        touch(project, "driver/foo.c");
        fs::create_dir_all(project.join("lz_hardware")).unwrap();

        // 1. Init
        commands::init::run(project).unwrap();

        // 2. Load from a nested directory, as the CLI would
        let (manifest, project_dir) =
            load_manifest_optional(&project.join("driver")).unwrap();
        let project_dir = project_dir.unwrap();
        assert_eq!(project_dir, project);

        // 3. Generate
        let options = GenerateOptions {
            sorted: true,
            ..GenerateOptions::default()
        };
        commands::generate::run(&project_dir, manifest.as_ref(), &options).unwrap();

        // 4. Inspect
        let text = fs::read_to_string(project.join("BUILD.gn")).unwrap();
        let expected_sources = "\
  sources = [
    \"./lib/hal/src/hal_uart.c\",
  ]
  sources += [
    \"./lib/bsp/RK2206/hal_bsp.c\",
  ]
  sources += [
    \"./lib/CMSIS/Device/RK2206/system_rk2206.c\",
  ]
  sources += [
    \"./driver/foo.c\",
    \"./driver/foo_rk2206.c\",
  ]
  sources += [
  ]
";
        assert!(text.contains(expected_sources), "unexpected output:\n{text}");
        assert!(text.starts_with("# Copyright (c) 2020-2021 Lockzhiner Electronics Co., Ltd.\n"));
        assert!(text.ends_with("    \"//third_party/musl/porting/liteos_m/kernel/include\",\n  ]\n}\n"));
    }

    /// `--output` given in a subdirectory lands in that subdirectory, not next
    /// to the manifest.
    #[test]
    fn output_flag_is_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path();
        touch(project, "src/foo.c");
        fs::write(
            project.join("halgen.toml"),
            "[[sources]]\npath = \"src\"\n",
        )
        .unwrap();
        let cwd = project.join("board");
        fs::create_dir_all(&cwd).unwrap();

        let output = resolve_output(&cwd, Some(PathBuf::from("BUILD.gn")));
        assert_eq!(output.as_deref(), Some(cwd.join("BUILD.gn").as_path()));

        let (manifest, project_dir) = load_manifest_optional(&cwd).unwrap();
        let options = GenerateOptions {
            output: output.as_deref(),
            ..GenerateOptions::default()
        };
        commands::generate::run(&project_dir.unwrap(), manifest.as_ref(), &options).unwrap();

        assert!(cwd.join("BUILD.gn").is_file());
        assert!(!project.join("BUILD.gn").exists());
        let text = fs::read_to_string(cwd.join("BUILD.gn")).unwrap();
        assert!(text.contains("    \"src/foo.c\",\n"));
    }

    #[test]
    fn absolute_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("out.gn");
        assert_eq!(
            resolve_output(Path::new("/somewhere/else"), Some(absolute.clone())),
            Some(absolute)
        );
        assert_eq!(resolve_output(dir.path(), None), None);
    }

    /// A manifest targeting another chip flips which files are kept.
    #[test]
    fn manifest_target_drives_filter() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path();
        touch(project, "src/foo_rk2206.c");
        touch(project, "src/foo_rk3568.c");
        touch(project, "src/foo.c");
        fs::write(
            project.join("halgen.toml"),
            r#"
[target]
chip = "rk3568"
board = "EVB1"

[output]
sorted = true

[[sources]]
path = "src"
"#,
        )
        .unwrap();

        let (manifest, project_dir) = load_manifest_optional(project).unwrap();
        commands::generate::run(
            &project_dir.unwrap(),
            manifest.as_ref(),
            &GenerateOptions::default(),
        )
        .unwrap();

        let text = fs::read_to_string(project.join("BUILD.gn")).unwrap();
        assert!(text.contains("  sources = [\n    \"src/foo.c\",\n    \"src/foo_rk3568.c\",\n  ]\n"));
        assert!(text.contains("\"./lib/CMSIS/Device/RK3568/Include\","));
        assert!(text.contains("import(\"//device/rockchip/rk3568/sdk_liteos/board.gni\")"));
    }
}
