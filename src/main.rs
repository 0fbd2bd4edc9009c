use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process;

use vair::activity::{Activity, ActivityKind};
use vair::catalog::{ActivityCatalog, Availability, FilterState, SortKey};
use vair::config::Config;
use vair::error::{CatalogError, ConfigError, VairError};
use vair::logging;
use vair::demo_data::demo_destinations;
use vair::pricing::{self, CabinClass, FareTable, FlightAddOn, FlightQuote, FlightRequest, TripType};
use vair::suggest::{self, Climate, SuggestRequest, Suggestion, Vibe};
use vair::utils::{format_dollars, pad_to_width, render_stars, truncate_string};
use vair::vr::{self, Headset, TimeSlot, VrActivity, VrRequest};

const TITLE_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "vair")]
#[command(about = "Plan activities and price flights for your trip", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Also write logs to this file under the vair data directory (rotated daily)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List activities on the Hub feed
    List {
        /// Availability filter (any, available, full)
        #[arg(short, long, default_value = "any")]
        availability: Availability,

        /// Only show activities rated at least this high
        #[arg(short = 'r', long)]
        min_rating: Option<f64>,

        /// Only show solo or group activities
        #[arg(short, long)]
        kind: Option<ActivityKind>,

        /// Sort order (recommended, rating-asc, rating-desc)
        #[arg(short, long, default_value = "recommended")]
        sort: SortKey,

        /// JSON file with activities to use instead of the demo set
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Verbose output
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Add an activity to your plan, reserving one spot per attempt
    Reserve {
        /// Activity id
        id: String,

        /// Number of spots to reserve in this session (default: 1)
        #[arg(short = 'n', long, default_value_t = 1)]
        times: usize,

        /// JSON file with activities to use instead of the demo set
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Verbose output
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Estimate a flight price
    Quote {
        /// Trip type (one-way, round-trip)
        #[arg(short, long, default_value = "round-trip")]
        trip: TripType,

        /// Cabin class (economy, premium, business, first)
        #[arg(short, long, default_value = "economy")]
        cabin: CabinClass,

        /// Number of passengers (1-9)
        #[arg(short, long, default_value_t = 1)]
        passengers: u32,

        /// Add-on (seat-selection, fast-security, extra-bag); repeatable, first one is free
        #[arg(short, long = "extra")]
        extras: Vec<FlightAddOn>,

        /// Override the one-way base fare per passenger
        #[arg(short, long)]
        base_fare: Option<f64>,

        /// Verbose output
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Price an in-flight VR experience
    VrQuote {
        /// Flight reference, e.g. "RYD123 → ULH"
        #[arg(short, long)]
        flight: String,

        /// Headset (own, rent)
        #[arg(short = 'H', long, default_value = "own")]
        headset: Headset,

        /// Time slot (first, middle, full)
        #[arg(short, long, default_value = "first")]
        slot: TimeSlot,

        /// VR activity (plan, movies, explore, games); repeatable, first one is included
        #[arg(short, long = "activity")]
        activities: Vec<VrActivity>,

        /// Verbose output
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Suggest a destination from your preferences
    Suggest {
        /// Preferred vibe (nature, city)
        #[arg(long)]
        vibe: Option<Vibe>,

        /// Preferred weather (cool, mild, warm, hot)
        #[arg(short, long)]
        weather: Option<Climate>,

        /// Number of days (default: 4)
        #[arg(short, long)]
        days: Option<u32>,

        /// Budget in riyals
        #[arg(short, long)]
        budget: Option<u32>,

        /// Verbose output
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration to disk
    Init,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let verbose = match &cli.command {
        Some(Commands::List { verbose, .. })
        | Some(Commands::Reserve { verbose, .. })
        | Some(Commands::Quote { verbose, .. })
        | Some(Commands::VrQuote { verbose, .. })
        | Some(Commands::Suggest { verbose, .. }) => *verbose,
        _ => false,
    };
    match &cli.log_file {
        Some(name) => logging::init_with_file(name, verbose)
            .map_err(|e| anyhow!("Failed to initialize file logging: {}", e))?,
        None => logging::init(verbose),
    }

    let config = load_config()?;

    match cli.command {
        Some(Commands::List {
            availability,
            min_rating,
            kind,
            sort,
            catalog,
            ..
        }) => {
            let filters = build_filters(availability, min_rating, kind, sort)?;
            let catalog = seed_catalog(&config, catalog)?;
            display_activities(&catalog, &filters);
        }
        Some(Commands::Reserve { id, times, catalog, .. }) => {
            let mut catalog = seed_catalog(&config, catalog)?;
            handle_reserve_command(&mut catalog, &id, times)?;
        }
        Some(Commands::Quote {
            trip,
            cabin,
            passengers,
            extras,
            base_fare,
            ..
        }) => {
            let mut fares = config.fares;
            if let Some(base_fare) = base_fare {
                fares.base_fare = base_fare;
            }
            let request = FlightRequest {
                trip,
                cabin,
                passengers,
                extras: extras.into_iter().collect(),
            };
            let quote = pricing::quote(&fares, &request)?;
            display_flight_quote(&fares, &request, &quote);
        }
        Some(Commands::VrQuote {
            flight,
            headset,
            slot,
            activities,
            ..
        }) => {
            let request = VrRequest {
                flight,
                headset,
                slot,
                activities: activities.into_iter().collect::<BTreeSet<_>>(),
            };
            let quote = vr::quote(&config.vr_prices, &request)?;
            println!("\n=== VR Booking ===");
            println!("Flight: {}", request.flight);
            println!("Headset: {} (+{})", request.headset.label(), format_dollars(quote.headset_fee.into()));
            println!("Time slot: {} (+{})", request.slot.label(), format_dollars(quote.slot_fee.into()));
            println!("Activities: {} (+{})", request.activities.len(), format_dollars(quote.activity_fee.into()));
            println!("Total: {}", format_dollars(quote.total.into()));
        }
        Some(Commands::Suggest {
            vibe,
            weather,
            days,
            budget,
            ..
        }) => {
            let request = SuggestRequest {
                vibe,
                weather,
                days,
                budget,
            };
            let suggestion = suggest::suggest(&demo_destinations(), &request)
                .ok_or_else(|| anyhow!("No destinations to choose from"))?;
            display_suggestion(&suggestion);
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                if let Some(path) = Config::get_config_path() {
                    println!("\nConfig file: {}", path.display());
                }
            }
            ConfigAction::Init => {
                let path = config.save()?;
                println!("Config written to {}", path.display());
            }
        },
        None => {
            println!("No command specified. Use --help for available commands.");
        }
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(VairError::Config(ConfigError::NoConfigDirectory)) => {
            tracing::warn!("No config directory available, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn build_filters(
    availability: Availability,
    min_rating: Option<f64>,
    kind: Option<ActivityKind>,
    sort: SortKey,
) -> Result<FilterState> {
    let filters = FilterState {
        availability,
        min_rating,
        kind,
        sort,
    };
    filters.validate()?;
    Ok(filters)
}

fn seed_catalog(config: &Config, catalog_override: Option<PathBuf>) -> Result<ActivityCatalog> {
    let mut config = config.clone();
    if catalog_override.is_some() {
        config.catalog_path = catalog_override;
    }
    Ok(config.seed_catalog()?)
}

fn handle_reserve_command(catalog: &mut ActivityCatalog, id: &str, times: usize) -> Result<()> {
    if times == 0 {
        return Err(anyhow!("Number of reservations must be at least 1"));
    }

    let mut last_error: Option<CatalogError> = None;
    for attempt in 1..=times {
        match catalog.reserve(id) {
            Ok(activity) => {
                println!(
                    "✅ Added to Plan: {} ({}/{}, {} left)",
                    activity.title,
                    activity.booked,
                    activity.capacity,
                    activity.spots_left()
                );
                last_error = None;
            }
            Err(e) => {
                match &e {
                    CatalogError::CapacityExceeded(_) => {
                        println!("❌ Fully booked: No spots left for this activity. (attempt {} of {})", attempt, times)
                    }
                    CatalogError::NotFound(_) => println!("❌ {}", e),
                }
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn status_label(activity: &Activity) -> &'static str {
    if activity.is_full() {
        "Full"
    } else {
        "Add to Plan"
    }
}

fn display_activities(catalog: &ActivityCatalog, filters: &FilterState) {
    let visible = catalog.visible(filters);

    println!("\n=== Activities ({}) ===", filters.sort);
    if filters.active_count() > 0 {
        println!("Active filters: {}", filters.active_count());
    }

    if visible.is_empty() {
        println!("\nNo activities match your filters.");
        println!("Try clearing filters or switching tabs.");
        return;
    }

    println!(
        "\n{} {:<16} {:<6} {:<12} {:<7} {}",
        pad_to_width("Title", TITLE_WIDTH),
        "Location",
        "Kind",
        "Rating",
        "Seats",
        "Status"
    );
    println!("{}", "-".repeat(TITLE_WIDTH + 60));

    for activity in &visible {
        let location = format!("{} {}", activity.flag(), activity.city);
        println!(
            "{} {} {:<6} {} {:<7} {}",
            pad_to_width(&truncate_string(&activity.title, TITLE_WIDTH), TITLE_WIDTH),
            pad_to_width(&location, 16),
            activity.kind,
            pad_to_width(&format!("{} {:.1}", render_stars(activity.rating), activity.rating), 12),
            format!("{}/{}", activity.booked, activity.capacity),
            status_label(activity)
        );
        println!("  id: {}", activity.id);
    }
}

fn display_flight_quote(fares: &FareTable, request: &FlightRequest, quote: &FlightQuote) {
    println!("\n=== Price breakdown ===");
    println!("{:<32} {:>8}", "Base fare (one-way per pax)", format_dollars(quote.base_fare));
    println!(
        "{:<32} {:>8}",
        format!("Trip type ({}, ×{})", request.trip.label(), request.trip.multiplier()),
        format_dollars(quote.trip_type_delta)
    );
    println!(
        "{:<32} {:>8}",
        format!("Cabin class ({}, ×{})", request.cabin, request.cabin.multiplier()),
        format_dollars(quote.cabin_delta)
    );
    println!("{:<32} {:>8}", "Subtotal per passenger", format_dollars(quote.per_passenger));
    println!(
        "{:<32} {:>8}",
        format!("Passengers × {}", quote.passengers),
        format_dollars(quote.flight_subtotal)
    );
    let extras: Vec<&str> = request.extras.iter().map(|e| e.label()).collect();
    println!(
        "{:<32} {:>8}",
        format!("Add-ons ({}; first free, +${} each)", extras.len(), fares.add_on_unit_price),
        format_dollars(quote.add_on_cost)
    );
    if !extras.is_empty() {
        println!("  {}", extras.join(", "));
    }
    println!("{}", "-".repeat(41));
    println!("{:<32} {:>8}", "Estimated total", format_dollars(quote.total));
    println!("Before taxes & carrier fees");
}

fn display_suggestion(suggestion: &Suggestion) {
    let destination = &suggestion.destination;
    let (low, high) = destination.budget_range;
    println!("\n=== Suggested for you ===");
    println!("{} {}, {}", destination.flag(), destination.name, destination.country);
    println!("Weather: {}   Vibe: {}", destination.climate, destination.vibe);
    println!("Days: {}", suggestion.days);
    println!("Typical budget: ﷼{}–{}", low, high);
    if let Some(budget) = suggestion.budget {
        println!("Your budget: ﷼{}", budget);
    }
}
