//! Archive CLI commands
//!
//! Browse the ledger by year and month, and export a year or a single
//! month as a printable archive document.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::display::format_archive;
use crate::error::LedgerResult;
use crate::export::DefinitionRenderer;
use crate::models::{ExportRequest, LogoImage};
use crate::reports::DocumentBuilder;
use crate::services::{ArchiveFilter, ArchiveService, Selection, SettingsService};

/// Archive subcommands
#[derive(Subcommand)]
pub enum ArchiveCommands {
    /// Years that have transactions
    Years,
    /// Months that have transactions
    Months,
    /// Show the archive, optionally filtered
    Show {
        /// Year or "All"
        #[arg(long, default_value = "All")]
        year: Selection,
        /// Month number or "All"
        #[arg(long, default_value = "All")]
        month: Selection,
    },
    /// Export a year, or one month of it, as an archive document
    Export {
        /// Year to export
        #[arg(long)]
        year: String,
        /// Single month to export
        #[arg(long)]
        month: Option<String>,
        /// Name printed in the letterhead
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// PNG or JPEG logo
        #[arg(long)]
        logo: Option<PathBuf>,
        /// Directory with the fonts to embed
        #[arg(long)]
        fonts_dir: Option<PathBuf>,
        /// Output directory, defaults to the archive directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an archive command
pub fn handle_archive_command(
    backend: &dyn Backend,
    paths: &LedgerPaths,
    cmd: ArchiveCommands,
) -> LedgerResult<()> {
    let settings = SettingsService::load(backend, paths)?;
    let service = ArchiveService::load(backend)?;
    let config = settings.report_config();

    match cmd {
        ArchiveCommands::Years => {
            for year in service.years() {
                println!("{}", year);
            }
        }

        ArchiveCommands::Months => {
            let t = settings.translator();
            for month in service.months() {
                let name = month
                    .parse::<u32>()
                    .map(|m| t.month_name(m))
                    .unwrap_or_else(|_| month.clone());
                println!("{}  {}", month, name);
            }
        }

        ArchiveCommands::Show { year, month } => {
            let view = service.view(&ArchiveFilter { year, month });
            print!("{}", format_archive(&view, &config));
        }

        ArchiveCommands::Export {
            year,
            month,
            name,
            address,
            postal_code,
            city,
            logo,
            fonts_dir,
            output,
        } => {
            let mut letterhead = settings.letterhead().to_letterhead()?;
            if let Some(name) = name {
                letterhead.name = name;
            }
            if let Some(address) = address {
                letterhead.address = address;
            }
            if let Some(postal_code) = postal_code {
                letterhead.postal_code = postal_code;
            }
            if let Some(city) = city {
                letterhead.city = city;
            }
            if let Some(path) = logo {
                letterhead.logo = Some(LogoImage::from_path(&path)?);
            }

            let scope = service.scope(&year, month.as_deref())?;
            let builder = DocumentBuilder::new(config);
            let mut renderer =
                DefinitionRenderer::new(fonts_dir.or_else(|| settings.settings().fonts_dir.clone()));
            let pdf_name = ExportRequest::new(scope.clone(), Vec::new()).file_name();
            let rendered = service.export(&mut renderer, &builder, scope, &letterhead)?;

            let dir = output.unwrap_or_else(|| paths.archive_dir());
            let path = rendered.write_to(&dir)?;
            println!(
                "{} {}",
                settings.translator().t("archive.exported"),
                path.display()
            );
            println!(
                "{} {}",
                settings.translator().t("archive.definition_note"),
                pdf_name
            );
        }
    }

    Ok(())
}
