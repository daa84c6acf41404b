#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rotaplan::{
    calendar, io,
    model::{Role, Staff},
    scheduler::{FallbackPolicy, RotaOptions, Scheduler},
    storage::{JsonStorage, Storage},
    summary::{render_summary, TextSummary},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de rota d'accueil (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre du personnel
    AddStaff {
        #[arg(long)]
        name: String,
        /// "Health Sciences Front Desk", "Life Sciences Front Desk" ou "Other"
        #[arg(long)]
        role: String,
        /// Jours sur site, séparés par `;` (noms ou indices 0..4)
        #[arg(long)]
        office_days: Option<String>,
        /// Congés `YYYY-MM-DD` séparés par `,` ou `;`
        #[arg(long)]
        holidays: Option<String>,
    },

    /// Importer du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Définir les jours de fermeture de l'organisation
    SetClosures {
        /// Dates `YYYY-MM-DD` séparées par `,` ou `;` (liste vide pour effacer)
        #[arg(long, default_value = "")]
        dates: String,
    },

    /// Lister le roster courant
    List,

    /// Générer le rota d'un mois cible
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Politique de repli front desk: "generalist" ou "dedicated"
        #[arg(long, default_value = "generalist")]
        fallback: String,
        /// Graine du tirage d'égalité (tirée au sort et affichée sinon)
        #[arg(long)]
        seed: Option<u64>,
        /// Conserver les compteurs du fichier (équité multi-mois)
        #[arg(long)]
        carry_counters: bool,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        /// Export CSV des totaux par personne (optionnel)
        #[arg(long)]
        out_totals: Option<String>,
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

    let storage = JsonStorage::open(&cli.roster)?;
    let mut scheduler = match storage.load() {
        Ok(r) => {
            let mut s = Scheduler::new();
            *s.roster_mut() = r;
            s
        }
        Err(_) => Scheduler::new(),
    };

    let code = match cli.cmd {
        Commands::AddStaff {
            name,
            role,
            office_days,
            holidays,
        } => {
            let role: Role = role.parse().map_err(anyhow::Error::msg)?;
            let mut staff = Staff::new(name, role);
            if let Some(days) = office_days {
                staff.office_days = io::parse_office_days(&days)?;
            }
            if let Some(dates) = holidays {
                staff.holidays = io::parse_dates(&dates)?.into_iter().collect();
            }
            scheduler.add_staff(vec![staff]);
            scheduler.roster().validate()?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv)?;
            scheduler.add_staff(staff);
            scheduler.roster().validate()?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::SetClosures { dates } => {
            let dates = io::parse_dates(&dates)?;
            scheduler.set_closures(dates);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::List => {
            for s in &scheduler.roster().staff {
                let days: Vec<String> = s.office_days.iter().map(|d| d.to_string()).collect();
                println!(
                    "{} | {} | days [{}] | {} holiday(s) | count {}",
                    s.name,
                    s.role.as_str(),
                    days.join(","),
                    s.holidays.len(),
                    s.shift_count
                );
            }
            if !scheduler.roster().closures.is_empty() {
                let closures: Vec<String> = scheduler
                    .roster()
                    .closures
                    .iter()
                    .map(|d| d.to_string())
                    .collect();
                println!("closures: {}", closures.join(", "));
            }
            0
        }
        Commands::Generate {
            year,
            month,
            fallback,
            seed,
            carry_counters,
            out_csv,
            out_json,
            out_totals,
        } => {
            let policy = match fallback.to_ascii_lowercase().as_str() {
                "generalist" => FallbackPolicy::Generalist,
                "dedicated" => FallbackPolicy::Dedicated,
                other => bail!("unknown fallback policy: {other}"),
            };
            let opts = RotaOptions { fallback: policy };

            let dates = calendar::working_dates_in_month(year, month)?;
            if !carry_counters {
                scheduler.roster_mut().reset_counters();
            }

            let seed = seed.unwrap_or_else(rand::random::<u64>);
            let mut rng = SmallRng::seed_from_u64(seed);
            println!("seed: {seed}");

            let rota = scheduler.generate(&dates, opts, &mut rng)?;

            if let Some(path) = out_csv {
                io::export_rota_csv(path, &rota, scheduler.roster())?;
            }
            if let Some(path) = out_json {
                io::export_rota_json(path, &rota)?;
            }
            if let Some(path) = out_totals {
                io::export_totals_csv(path, &rota, scheduler.roster())?;
            }

            print!("{}", render_summary(&rota, scheduler.roster(), &TextSummary));
            storage.save(scheduler.roster())?;

            // Code 2 = WARNING/INCOMPLETE (créneaux restés sans candidat)
            if rota.unassigned_count() > 0 {
                2
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}
