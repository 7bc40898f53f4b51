//! Settings CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::config::settings::LetterheadDefaults;
use crate::error::LedgerResult;
use crate::i18n::Language;
use crate::models::{DateFormat, RoundingPolicy};
use crate::services::SettingsService;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings
    Show,
    /// Set the currency symbol
    Currency {
        /// Symbol printed before amounts, e.g. "€" or "$"
        symbol: String,
    },
    /// Set the interface language
    Language {
        /// One of en, de, ru, es, pl
        code: String,
    },
    /// Set the date display format
    DateFormat {
        /// dd/mm/yyyy or yyyy-mm-dd
        format: DateFormat,
    },
    /// Set the rounding policy for printed amounts
    Rounding {
        /// half-away-from-zero or half-even
        policy: RoundingPolicy,
    },
    /// Set letterhead defaults used by archive exports
    Letterhead {
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
        /// Forget the stored logo
        #[arg(long, conflicts_with = "logo")]
        clear_logo: bool,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    backend: &dyn Backend,
    paths: &LedgerPaths,
    cmd: SettingsCommands,
) -> LedgerResult<()> {
    let mut service = SettingsService::load(backend, paths)?;

    match cmd {
        SettingsCommands::Show => {
            let t = service.translator();
            let language = service.language();
            let format = service.date_format();
            println!("{}", t.t("settings.title"));
            println!("{}", "=".repeat(40));
            println!("{:<16} {}", t.t("settings.currency_label"), service.currency());
            println!(
                "{:<16} {} ({})",
                t.t("settings.language_label"),
                t.t(&format!("settings.language_options.{}", language.code())),
                language
            );
            println!(
                "{:<16} {}",
                t.t("settings.date_format_label"),
                t.t(&format!("settings.date_format_options.{}", format.key_suffix()))
            );
            println!("{:<16} {}", "Rounding", service.settings().rounding);

            let letterhead = service.letterhead();
            if !letterhead.name.is_empty() {
                println!("{:<16} {}", t.t("archive.full_name"), letterhead.name);
            }
            if !letterhead.address.is_empty() {
                println!("{:<16} {}", t.t("archive.address"), letterhead.address);
            }
            if !letterhead.postal_code.is_empty() || !letterhead.city.is_empty() {
                println!(
                    "{:<16} {} {}",
                    t.t("archive.city"),
                    letterhead.postal_code,
                    letterhead.city
                );
            }
            if let Some(logo) = &letterhead.logo_path {
                println!("{:<16} {}", "Logo", logo.display());
            }
        }
        SettingsCommands::Currency { symbol } => {
            service.set_currency(&symbol)?;
            println!("Currency set to {}", symbol.trim());
        }
        SettingsCommands::Language { code } => {
            let language: Language = service.set_language(&code)?;
            println!("Language set to {}", language);
        }
        SettingsCommands::DateFormat { format } => {
            service.set_date_format(format)?;
            println!("Date format set to {}", format);
        }
        SettingsCommands::Rounding { policy } => {
            service.set_rounding(policy)?;
            println!("Rounding set to {}", policy);
        }
        SettingsCommands::Letterhead {
            name,
            address,
            postal_code,
            city,
            logo,
            clear_logo,
        } => {
            let current = service.letterhead().clone();
            let logo_path = match (logo, clear_logo) {
                (_, true) => None,
                (Some(path), false) => Some(path),
                (None, false) => current.logo_path,
            };
            let updated = LetterheadDefaults {
                name: name.unwrap_or(current.name),
                address: address.unwrap_or(current.address),
                postal_code: postal_code.unwrap_or(current.postal_code),
                city: city.unwrap_or(current.city),
                logo_path,
            };
            // Fail now rather than at export time
            updated.to_letterhead()?;
            service.set_letterhead(updated)?;
            println!("Letterhead updated");
        }
    }

    Ok(())
}
