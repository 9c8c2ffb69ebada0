//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, PrettyPrinter};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{dot_product, transpose_mat, Mat33, Vec3};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Resolve settings: config layers first, then command line flags.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(precision) = cli.precision {
        settings.precision = precision;
    }
    if let Some(width_buffer) = cli.width_buffer {
        settings.width_buffer = width_buffer;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let container = ServiceContainer::new(resolve_settings(cli)?);
    let printer = container.printer();

    match command {
        Commands::Vector { x, y, z } => {
            output::text(&printer.render_vector(&Vec3::new(*x, *y, *z)));
            Ok(())
        }
        Commands::Matrix { values, transpose } => _matrix(&printer, values, *transpose),
        Commands::Dot { values } => _dot(&printer, values),
        Commands::Render { file } => _render(&container, &printer, file),
        Commands::Chain { file, outline } => _chain(&container, &printer, file, *outline),
        Commands::Config { command } => _config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn vectors<const N: usize>(values: &[f64]) -> CliResult<[Vec3; N]> {
    if values.len() != N * 3 {
        return Err(CliError::InvalidArgs(format!(
            "expected {} values, got {}",
            N * 3,
            values.len()
        )));
    }
    let mut out = [Vec3::ZERO; N];
    for (v, chunk) in out.iter_mut().zip(values.chunks_exact(3)) {
        *v = Vec3::new(chunk[0], chunk[1], chunk[2]);
    }
    Ok(out)
}

#[instrument(level = "debug", skip(printer))]
fn _matrix(printer: &PrettyPrinter, values: &[f64], transpose: bool) -> CliResult<()> {
    let mut mat = Mat33::from_columns(vectors::<3>(values)?);
    if transpose {
        transpose_mat(&mut mat);
    }
    output::text(&printer.render_matrix(&mat));
    Ok(())
}

#[instrument(level = "debug", skip(printer))]
fn _dot(printer: &PrettyPrinter, values: &[f64]) -> CliResult<()> {
    let [a, b] = vectors::<2>(values)?;
    output::info(&printer.format_value(dot_product(&a, &b)));
    Ok(())
}

#[instrument(level = "debug", skip(container, printer))]
fn _render(container: &ServiceContainer, printer: &PrettyPrinter, file: &Path) -> CliResult<()> {
    output::text(&container.render.render_file(file, printer)?);
    Ok(())
}

#[instrument(level = "debug", skip(container, printer))]
fn _chain(
    container: &ServiceContainer,
    printer: &PrettyPrinter,
    file: &Path,
    outline: bool,
) -> CliResult<()> {
    let doc = container.render.load(file)?;
    let text = if outline {
        container.render.outline_chain(&doc)?
    } else {
        container.render.render_chain(&doc, printer)?
    };
    if text.is_empty() {
        output::detail(&format!("no chain in {}", file.display()));
    } else {
        output::text(&text);
    }
    Ok(())
}

fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(container.settings.as_ref()).map_err(|e| {
                ApplicationError::OperationFailed {
                    context: "serialize settings".to_string(),
                    source: Box::new(e),
                }
            })?;
            output::text(&text);
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"<no home directory>"),
            }
            output::action("local", &local_config_path(Path::new(".")).display());
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(Path::new("."))
            };
            init_config(container, &path, *force)
        }
    }
}

fn init_config(container: &ServiceContainer, path: &Path, force: bool) -> CliResult<()> {
    if container.fs.exists(path) && !force {
        return Err(CliError::Usage(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    container
        .fs
        .ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create parent of {}", path.display()), e))?;
    container
        .fs
        .write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::action("created", &path.display());
    Ok(())
}
