#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use cantine::{
    io,
    model::{Ledger, MealShift, Reservation, StudentId, Token},
    registry::{BookingError, Registry, RegistryConfig},
    storage::{JsonStorage, Storage},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de réservation de repas (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du ledger
    #[arg(long, global = true, default_value = "ledger.json")]
    ledger: String,

    /// Capacité par service ; par défaut celle du ledger existant
    #[arg(long, global = true)]
    capacity: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Réserver un repas
    Book {
        #[arg(long)]
        student: String,
        /// AAAA-MM-JJ
        #[arg(long)]
        date: NaiveDate,
        /// lunch | dinner
        #[arg(long)]
        shift: MealShift,
    },

    /// Afficher une réservation
    Show {
        #[arg(long)]
        token: String,
    },

    /// Annuler une réservation active
    Cancel {
        #[arg(long)]
        token: String,
    },

    /// Valider le passage au self (une seule fois)
    CheckIn {
        #[arg(long)]
        token: String,
    },

    /// Lister et optionnellement exporter
    List {
        /// Filtre sur un jour (AAAA-MM-JJ)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Places restantes pour un jour
    Availability {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        shift: Option<MealShift>,
    },

    /// Réserver en masse depuis un CSV `student,date,shift`
    Import {
        #[arg(long)]
        csv: String,
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

    let storage = JsonStorage::open(&cli.ledger)?;
    let ledger = if storage.exists() {
        storage.load()?
    } else {
        Ledger {
            capacity_per_shift: RegistryConfig::default().capacity_per_shift,
            reservations: Vec::new(),
        }
    };
    let config = RegistryConfig::with_capacity(cli.capacity.unwrap_or(ledger.capacity_per_shift));
    let registry = Registry::restore(config, ledger)
        .with_context(|| format!("loading {}", storage.path().display()))?;

    let code = match cli.cmd {
        Commands::Book { student, date, shift } => {
            match registry.admit(&StudentId::new(student), date, shift) {
                Ok(token) => {
                    storage.save(&registry.snapshot())?;
                    println!("{token}");
                    0
                }
                Err(e) => rejected(e)?,
            }
        }
        Commands::Show { token } => {
            let r = registry.lookup(&Token::new(token))?;
            print_reservation(&r);
            0
        }
        Commands::Cancel { token } => {
            registry.cancel(&Token::new(token))?;
            storage.save(&registry.snapshot())?;
            0
        }
        Commands::CheckIn { token } => {
            registry.check_in(&Token::new(token))?;
            storage.save(&registry.snapshot())?;
            0
        }
        Commands::List { date, out_json, out_csv } => {
            let mut reservations = registry.reservations();
            if let Some(day) = date {
                reservations.retain(|r| r.date == day);
            }
            if let Some(path) = out_json {
                let ledger = Ledger {
                    capacity_per_shift: registry.capacity_per_shift(),
                    reservations: reservations.clone(),
                };
                io::export_ledger_json(path, &ledger)?;
            }
            if let Some(path) = out_csv {
                io::export_reservations_csv(path, &reservations)?;
            }
            for r in &reservations {
                print_reservation(r);
            }
            0
        }
        Commands::Availability { date, shift } => {
            let shifts = match shift {
                Some(s) => vec![s],
                None => MealShift::ALL.to_vec(),
            };
            for s in shifts {
                println!(
                    "{} {} | {}/{} remaining",
                    date.format("%Y-%m-%d"),
                    s,
                    registry.remaining(date, s),
                    registry.capacity_per_shift()
                );
            }
            0
        }
        Commands::Import { csv } => {
            let outcomes = io::import_bookings_csv(csv, &registry)?;
            storage.save(&registry.snapshot())?;
            let mut refused = 0usize;
            for o in &outcomes {
                match &o.result {
                    Ok(token) => println!("line {}: {}", o.line, token),
                    Err(e) => {
                        refused += 1;
                        eprintln!("line {}: cannot book: {e}", o.line);
                    }
                }
            }
            if refused > 0 {
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}

/// Refus d'admission → code 2 ; toute autre erreur remonte.
fn rejected(err: BookingError) -> Result<i32> {
    if err.is_rejection() {
        eprintln!("cannot book: {err}");
        Ok(2)
    } else {
        Err(err.into())
    }
}

fn print_reservation(r: &Reservation) {
    println!(
        "{} | {} | {} {} | {}",
        r.token,
        r.student,
        r.date.format("%Y-%m-%d"),
        r.shift,
        r.status
    );
}
