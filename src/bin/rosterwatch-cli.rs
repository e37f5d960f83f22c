#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use rosterwatch::{
    checksum, dates, diff_member_period, io,
    notification::{prepare_notice, HtmlTable, NoticeRenderer, PlainText},
    storage::{SnapshotStore, DEFAULT_LOOKBACK_DAYS},
    RosterDiff, ShiftCalendar,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de suivi de roster (snapshots CSV locaux)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher les postes d'un jour
    Day {
        #[arg(long)]
        csv: String,
        /// Jeton de date (DD/MM/YYYY, YYYY-MM-DD ou numéro de série)
        #[arg(long)]
        date: String,
    },

    /// Afficher les postes d'une personne sur toute la table
    Member {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        staff: String,
    },

    /// Afficher les postes d'une personne sur une période inclusive
    Period {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        staff: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        finish: String,
        /// Export CSV de la vue (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Détailler le poste d'une personne pour un jour (heures payables)
    Shift {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        staff: String,
    },

    /// Ajouter une personne à tous les jours, réexporter la grille
    AddMember {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        staff: String,
        /// Libellé par défaut ("Off" sinon)
        #[arg(long)]
        default: Option<String>,
        #[arg(long)]
        out: String,
    },

    /// Retirer une personne de tous les jours, réexporter la grille
    RemoveMember {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        staff: String,
        #[arg(long)]
        out: String,
    },

    /// Remplacer le poste d'une personne pour un jour
    UpdateShift {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        staff: String,
        #[arg(long)]
        shift: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        out: String,
    },

    /// Comparer deux snapshots pour une personne sur une période
    Diff {
        #[arg(long)]
        current: String,
        #[arg(long)]
        previous: String,
        #[arg(long)]
        staff: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        finish: String,
        /// Export JSON des lignes de changement (optionnel)
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Générer le corps de notification d'une personne
    Notify {
        #[arg(long)]
        current: String,
        #[arg(long)]
        previous: String,
        #[arg(long)]
        staff: String,
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        finish: String,
        /// Lien vers la version en ligne du roster (optionnel)
        #[arg(long)]
        roster_url: Option<String>,
        /// Rendu texte brut au lieu de la table HTML
        #[arg(long)]
        text: bool,
        /// Fichier de sortie
        #[arg(long)]
        out: String,
    },

    /// Archiver un snapshot daté, en le jetant s'il est identique au dernier
    Archive {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        dir: String,
        #[arg(long, default_value = "roster")]
        base_name: String,
        /// Date du snapshot (aujourd'hui sinon)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
        lookback_days: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Day { csv, date } => {
            let roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            for (staff, label) in roster.day(&date)? {
                println!("{staff} | {label}");
            }
            0
        }
        Commands::Member { csv, staff } => {
            let roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            for (date, label) in roster.member(&staff)? {
                println!("{date} | {label}");
            }
            0
        }
        Commands::Period {
            csv,
            staff,
            start,
            finish,
            out_csv,
        } => {
            let roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            let period = roster.member_period(&staff, &start, &finish)?;
            if let Some(path) = out_csv {
                io::export_period_csv(path, &period)?;
            }
            for (date, label) in &period {
                println!("{date} | {label}");
            }
            0
        }
        Commands::Shift { csv, date, staff } => {
            let roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            let shift = roster.shift(&date, &staff)?;
            println!("Date: {}", dates::date_key(shift.date));
            println!("Shift: {}", shift.label);
            println!("Start: {}", shift.start);
            println!("Finish: {}", shift.finish);
            println!("Worked: {}", fmt_hours(shift.worked));
            println!("Breaks: {}", fmt_hours(shift.breaks));
            println!("Payable: {}", fmt_hours(shift.payable));
            0
        }
        Commands::AddMember {
            csv,
            staff,
            default,
            out,
        } => {
            let mut roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            roster.add_member(&staff, default.as_deref());
            io::export_roster_csv(out, &roster)?;
            0
        }
        Commands::RemoveMember { csv, staff, out } => {
            let mut roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            let removed = roster.remove_member(&staff);
            if removed == 0 {
                eprintln!("{staff} was not on any day of the roster");
            }
            io::export_roster_csv(out, &roster)?;
            0
        }
        Commands::UpdateShift {
            csv,
            staff,
            shift,
            date,
            out,
        } => {
            let mut roster = io::load_roster_csv(csv, ShiftCalendar::default())?;
            roster.update_shift(&staff, &shift, &date)?;
            io::export_roster_csv(out, &roster)?;
            0
        }
        Commands::Diff {
            current,
            previous,
            staff,
            start,
            finish,
            out_json,
        } => {
            let cur = io::load_roster_csv(current, ShiftCalendar::default())?;
            let prev = io::load_roster_csv(previous, ShiftCalendar::default())?;
            let diff = diff_member_period(&cur, &prev, &staff, &start, &finish)?;
            match &diff {
                RosterDiff::Unchanged => {
                    println!("OK: no changes for {staff}");
                    0
                }
                RosterDiff::Changed(rows) => {
                    for row in rows {
                        println!(
                            "{} | {} → {}",
                            row.date_key,
                            row.previous.as_deref().unwrap_or("-"),
                            row.current.as_deref().unwrap_or("-"),
                        );
                    }
                    if let Some(path) = out_json {
                        let json = serde_json::to_string_pretty(rows)?;
                        std::fs::write(path, json)?;
                    }
                    // Code 2 = changements détectés
                    2
                }
            }
        }
        Commands::Notify {
            current,
            previous,
            staff,
            recipient,
            start,
            finish,
            roster_url,
            text,
            out,
        } => {
            let cur = io::load_roster_csv(current, ShiftCalendar::default())?;
            let prev = io::load_roster_csv(previous, ShiftCalendar::default())?;
            let diff = diff_member_period(&cur, &prev, &staff, &start, &finish)?;
            let renderer: &dyn NoticeRenderer = if text { &PlainText } else { &HtmlTable };
            let notice = prepare_notice(
                &staff,
                &recipient,
                &diff,
                roster_url.as_deref(),
                Utc::now().date_naive(),
                renderer,
            )?;
            std::fs::write(&out, &notice.body)?;
            println!(
                "Notice \"{}\" for {} ({}) written to {}",
                notice.subject, notice.staff, notice.recipient, out
            );
            0
        }
        Commands::Archive {
            csv,
            dir,
            base_name,
            date,
            lookback_days,
        } => {
            let date = match date {
                Some(token) => dates::normalize(&token)?,
                None => Utc::now().date_naive(),
            };
            let store = SnapshotStore::new(&dir, &base_name, "csv");
            let contents =
                std::fs::read(&csv).with_context(|| format!("reading snapshot {csv}"))?;
            let path = store.write(date, &contents)?;
            match store.latest_before(date, lookback_days) {
                Some(prev) if checksum::files_match(&path, &prev)? => {
                    // Identique au dernier : on jette le nouveau fichier.
                    std::fs::remove_file(&path)?;
                    println!("No changes since {}, snapshot dropped", prev.display());
                }
                _ => println!("Archived {}", path.display()),
            }
            0
        }
    };

    std::process::exit(code);
}

fn fmt_hours(d: Duration) -> String {
    format!("{}h{:02}", d.num_hours(), d.num_minutes().rem_euclid(60))
}
