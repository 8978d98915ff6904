//! HaloWarga - command line front end
//!
//! Runs the registry engine over snapshots saved from the portal API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use halowarga::models::{
    Announcement, Aspiration, CitizenRecord, EngineConfig, KasEntry, KasLevel, RecordId, UserScope,
    WireLabel,
};
use halowarga::services::{
    announcement, aspiration, district_options, ledger, sub_district_options, Dashboard,
    RegistryFilter, RegistryPage, RegistryRow, Selection, SortField,
};
use halowarga::utils::snapshot::{load_list, load_scope};

#[derive(Parser, Debug)]
#[command(name = "halowarga", version)]
#[command(about = "Registry access and household grouping for the HaloWarga portal")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "HALOWARGA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter, overrides the config (e.g. "debug")
    #[arg(long, env = "HALOWARGA_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, sort and group a registry snapshot for a user
    Registry {
        /// Registry snapshot (JSON list of warga)
        #[arg(long)]
        records: PathBuf,

        /// Session user saved from the login response; omitted = not logged in
        #[arg(long = "scope")]
        session: Option<PathBuf>,

        /// RW filter ("All" for everything)
        #[arg(long, default_value = "All")]
        rw: String,

        /// RT filter, only applied with an RW
        #[arg(long, default_value = "All")]
        rt: String,

        /// Search by name, NIK or KK number
        #[arg(long, short, default_value = "")]
        query: String,

        /// Column header clicks, in order (repeat a column to flip direction)
        #[arg(long = "sort")]
        sort_clicks: Vec<String>,

        /// Print the flat table instead of households
        #[arg(long)]
        flat: bool,

        /// Emit the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the RW/RT filter buttons present in a snapshot
    Territories {
        #[arg(long)]
        records: PathBuf,

        #[arg(long, default_value = "All")]
        rw: String,
    },

    /// Kas ledger totals
    Kas {
        #[arg(long)]
        entries: PathBuf,

        /// Kas book level: rt, rw or desa
        #[arg(long)]
        level: Option<String>,

        #[arg(long)]
        rw: Option<String>,

        #[arg(long)]
        rt: Option<String>,
    },

    /// Aspiration counters
    Aspirasi {
        #[arg(long)]
        items: PathBuf,
    },

    /// Public announcements, or one of them in full
    Info {
        #[arg(long)]
        items: PathBuf,

        /// Show a single announcement
        #[arg(long)]
        id: Option<String>,
    },

    /// Dashboard counters and population per RW (or per RT of one RW)
    Dashboard {
        #[arg(long)]
        records: PathBuf,

        #[arg(long)]
        kas: Option<PathBuf>,

        #[arg(long)]
        aspirasi: Option<PathBuf>,

        #[arg(long, default_value = "All")]
        rw: String,

        #[arg(long)]
        json: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level);

    tracing::info!("Starting HaloWarga v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Registry {
            records,
            session,
            rw,
            rt,
            query,
            sort_clicks,
            flat,
            json,
        } => {
            let records: Vec<CitizenRecord> = load_list(&records)?;
            let scope = session.as_deref().map(load_scope).transpose()?;
            match &scope {
                Some(scope) => tracing::info!("Acting as {}", describe_scope(scope)),
                None => tracing::info!("No session, registry is read-only"),
            }

            let mut filter = RegistryFilter::with_query(query);
            filter.select_district(rw.as_str());
            filter.select_sub_district(rt.as_str());

            let mut sort = config.initial_sort();
            for click in &sort_clicks {
                match SortField::from_key(click) {
                    Some(field) => sort.request(field),
                    None => tracing::warn!("Unknown sort column '{}', ignored", click),
                }
            }

            let page = RegistryPage::build(&records, scope.as_ref(), &filter, &sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else if flat || !config.registry.group_households {
                print_flat(&page);
            } else {
                print_grouped(&page);
            }
        }

        Command::Territories { records, rw } => {
            let records: Vec<CitizenRecord> = load_list(&records)?;
            let selected = Selection::parse(&rw);

            let rws: Vec<String> = district_options(&records).iter().map(ToString::to_string).collect();
            println!("RW: {}", rws.join(", "));

            if !selected.is_all() {
                let rts: Vec<String> = sub_district_options(&records, &selected)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("RT ({}): {}", selected, rts.join(", "));
            }
        }

        Command::Kas { entries, level, rw, rt } => {
            let entries: Vec<KasEntry> = load_list(&entries)?;
            let level = level.as_deref().map(KasLevel::from_wire);
            let book = ledger::filter_by_territory(&entries, level, rw.as_deref(), rt.as_deref());
            let summary = ledger::summarize(&book);

            println!("Transaksi   : {}", book.len());
            println!("Pemasukan   : {}", ledger::format_rupiah(summary.income));
            println!("Pengeluaran : {}", ledger::format_rupiah(summary.expense));
            println!("Saldo       : {}", ledger::format_rupiah(summary.balance));
        }

        Command::Aspirasi { items } => {
            let items: Vec<Aspiration> = load_list(&items)?;
            let open = items.iter().filter(|a| a.status.is_open()).count();
            println!("Total   : {}", items.len());
            println!("Pending : {}", aspiration::count_pending(&items));
            println!("Terbuka : {}", open);
        }

        Command::Info { items, id } => {
            let items: Vec<Announcement> = load_list(&items)?;
            match id {
                Some(id) => {
                    let id = match id.parse::<i64>() {
                        Ok(n) => RecordId::from(n),
                        Err(_) => RecordId::from(id.as_str()),
                    };
                    let info = announcement::find_by_id(&items, &id)?;
                    println!("[{}] {}", info.category.wire(), info.title);
                    println!("{} - Oleh: {}", info.date_label(), info.author);
                    println!();
                    println!("{}", info.content);
                }
                None => {
                    for info in &items {
                        println!(
                            "{:<6} {:<12} {:<16} {}",
                            info.id.to_string(),
                            info.category.wire(),
                            info.date_label(),
                            info.title
                        );
                    }
                }
            }
        }

        Command::Dashboard {
            records,
            kas,
            aspirasi,
            rw,
            json,
        } => {
            let records: Vec<CitizenRecord> = load_list(&records)?;
            let kas: Vec<KasEntry> = kas
                .as_deref()
                .map(load_list::<KasEntry>)
                .transpose()?
                .unwrap_or_default();
            let aspirations: Vec<Aspiration> = aspirasi
                .as_deref()
                .map(load_list::<Aspiration>)
                .transpose()?
                .unwrap_or_default();

            let dashboard = Dashboard::build(&records, &kas, &aspirations, &Selection::parse(&rw));
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print_dashboard(&dashboard);
            }
        }
    }

    Ok(())
}

fn row_line(row: &RegistryRow) -> String {
    let r = &row.record;
    let access = if row.permissions.is_read_only() {
        "Read Only"
    } else {
        "Edit/Hapus"
    };
    format!(
        "{:<18} {:<28} {:<16} {:<10} {:<11} {}",
        r.national_id,
        r.full_name,
        r.location_label(),
        r.gender.label(),
        r.residency_status.label(),
        access
    )
}

fn print_footer(page: &RegistryPage) {
    println!();
    println!(
        "Menampilkan {} data ({} dapat diubah) - {}",
        page.visible_count(),
        page.editable_count(),
        page.breadcrumb
    );
}

fn print_flat(page: &RegistryPage) {
    if page.is_empty() {
        println!("Tidak ada warga ditemukan di filter ini.");
        return;
    }

    for row in &page.rows {
        println!("{}", row_line(row));
    }
    print_footer(page);
}

fn print_grouped(page: &RegistryPage) {
    if page.is_empty() {
        println!("Tidak ada warga ditemukan di filter ini.");
        return;
    }

    for household in &page.households {
        println!("KK {} ({} anggota)", household.family_card_id, household.members.len());
        for (i, row) in household.members.iter().enumerate() {
            let relation = if i == 0 {
                "Kepala Keluarga"
            } else {
                row.record.relation().label()
            };
            println!("  {:<16} {}", relation, row_line(row));
        }
    }

    if !page.standalone.is_empty() {
        println!("Tanpa KK");
        for row in &page.standalone {
            println!("  {}", row_line(row));
        }
    }
    print_footer(page);
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("Total Warga      : {}", dashboard.stats.total_warga);
    println!("Saldo Kas        : {}", ledger::format_rupiah(dashboard.stats.saldo_kas));
    println!("Aspirasi Pending : {}", dashboard.stats.aspirasi_pending);
    println!();

    let prefix = match &dashboard.selected {
        Selection::All => {
            println!("Populasi per RW");
            "RW"
        }
        Selection::Only(rw) => {
            println!("Detail Populasi RW {}", rw);
            "RT"
        }
    };

    if dashboard.chart.is_empty() {
        println!("Belum ada data warga.");
        return;
    }

    let scale = dashboard.chart_scale();
    for bar in &dashboard.chart {
        let width = bar.count * 30 / scale;
        println!(
            "  {} {:<4} {:<30} {} Warga",
            prefix,
            bar.label,
            "#".repeat(width.max(1)),
            bar.count
        );
    }
}

fn describe_scope(scope: &UserScope) -> String {
    format!("{} ({})", scope.role.display_name(), scope.scope_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_scope_flag() {
        let cli = Cli::try_parse_from([
            "halowarga", "registry", "--records", "warga.json", "--scope", "user.json", "--sort", "rw",
        ])
        .unwrap();

        match cli.command {
            Command::Registry {
                session, sort_clicks, ..
            } => {
                assert_eq!(session, Some(PathBuf::from("user.json")));
                assert_eq!(sort_clicks, vec!["rw"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["halowarga", "registry", "--records", "w.json", "--session", "u.json"]).is_err());
    }

    #[test]
    fn test_dashboard_defaults() {
        let cli = Cli::try_parse_from(["halowarga", "dashboard", "--records", "warga.json"]).unwrap();
        match cli.command {
            Command::Dashboard { rw, kas, json, .. } => {
                assert_eq!(rw, "All");
                assert!(kas.is_none() && !json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
