use clap::Parser;
use gtm_directory::config::cli::{Command, OutputFormat};
use gtm_directory::core::directory::{market_options, DirectoryPage};
use gtm_directory::core::fallback::sample_partners;
use gtm_directory::core::lead::format_selection;
use gtm_directory::core::loader::{load_partners, PartnerSource};
use gtm_directory::core::{ContactRequest, LeadSink, Partner, PartnerApplication, PartnerRepository};
use gtm_directory::utils::error::ErrorSeverity;
use gtm_directory::utils::logger;
use gtm_directory::utils::validation::{validate_range, Validate};
use gtm_directory::{
    CliConfig, DirectoryView, FilterState, PageItem, RegionCatalog, Result, Settings,
    SupabaseClient,
};
use serde::Serialize;
use std::io::Write;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gtm-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2, // retryable
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let settings = Settings::resolve(&cli)?;

    match cli.command {
        Command::Partners {
            markets,
            sort,
            page,
            format,
            min_rate,
            max_rate,
        } => {
            let (mut partners, source) = match SupabaseClient::from_config(&settings) {
                Ok(client) => load_partners(&client).await,
                Err(e) => {
                    tracing::warn!("{}", e);
                    (sample_partners(), PartnerSource::Fallback)
                }
            };
            if source == PartnerSource::Fallback {
                eprintln!("ℹ️  Showing sample partners; the backend is unavailable");
            }

            if min_rate.is_some() || max_rate.is_some() {
                let min = min_rate.unwrap_or(0.0);
                let max = max_rate.unwrap_or(f64::INFINITY);
                validate_range("min_rate", min, 0.0, max)?;
                partners.retain(|p| p.rate >= min && p.rate <= max);
            }

            let mut view = DirectoryView::new(partners, settings.page_size);
            view.set_filter(FilterState::new(
                markets,
                sort.unwrap_or(settings.default_sort),
            ));
            let landed = view.go_to(page);
            if landed != page {
                tracing::warn!("Page {} is out of range, showing page {}", page, landed);
            }

            let current = view.current();
            let mut out = std::io::stdout().lock();
            match format {
                OutputFormat::Table => print_table(&mut out, &current, &view)?,
                OutputFormat::Json => print_json(&mut out, &current)?,
                OutputFormat::Csv => print_csv(&mut out, &current)?,
            }
        }

        Command::Regions { toggles } => {
            print_regions(&settings.catalog, &toggles)?;
        }

        Command::Contact {
            first_name,
            last_name,
            company,
            email,
            regions,
            partner_id,
            partner_name,
        } => {
            let selection = settings.catalog.selection_from_identifiers(&regions)?;
            let request = ContactRequest {
                first_name,
                last_name,
                company_name: company,
                email,
                target_region: format_selection(&selection, &settings.catalog),
                partner_id,
                partner_name,
            };
            request.validate()?;

            let client = SupabaseClient::from_config(&settings)?;
            let receipt = client.submit_contact_request(&request).await?;
            tracing::info!("Contact request saved (id: {:?})", receipt.id);

            match &request.partner_name {
                Some(name) => println!(
                    "✅ Thank you, {}! We've received your introduction request for {}. Our team will contact you within 24 hours.",
                    request.first_name, name
                ),
                None => println!(
                    "✅ Thank you, {}! We've received your request. Our team will contact you within 24 hours.",
                    request.first_name
                ),
            }
        }

        Command::Apply {
            first_name,
            last_name,
            email,
            phone,
            linkedin,
            countries,
            experience,
            industry,
        } => {
            let selection = settings.catalog.selection_from_identifiers(&countries)?;
            let application = PartnerApplication {
                first_name,
                last_name,
                email,
                phone,
                linkedin,
                country: format_selection(&selection, &settings.catalog),
                experience,
                industry,
            };
            application.validate()?;

            let client = SupabaseClient::from_config(&settings)?;
            let receipt = client.submit_partner_application(&application).await?;
            tracing::info!("Partner application saved (id: {:?})", receipt.id);
            println!(
                "✅ Thank you, {}! We'll review your application and get back to you.",
                application.first_name
            );
        }

        Command::Hire { partner_id } => {
            let client = SupabaseClient::from_config(&settings)?;
            client.increment_hires(&partner_id).await?;
            println!("✅ Hire recorded for partner {}", partner_id);
        }
    }

    Ok(())
}

fn print_table<W: Write>(out: &mut W, page: &DirectoryPage<'_>, view: &DirectoryView) -> Result<()> {
    if page.total_count == 0 {
        if view.filter().selected_markets.is_empty() {
            writeln!(out, "No GTM partners found. Check back soon!")?;
        } else {
            writeln!(out, "No partners match the selected markets.")?;
            writeln!(out, "Available markets: {}", market_options(view.partners()).join(", "))?;
        }
        return Ok(());
    }

    writeln!(
        out,
        "{:<4} {:<28} {:>8} {:>6}  {:<3} MARKETS",
        "", "NAME", "RATE", "HIRES", "✓"
    )?;
    for partner in &page.partners {
        let markets: Vec<&str> = partner.markets.iter().take(5).map(String::as_str).collect();
        writeln!(
            out,
            "{:<4} {:<28} {:>8} {:>6}  {:<3} {}",
            partner.initials(),
            partner.name,
            format!("${}/hr", partner.rate),
            partner.hires,
            if partner.verified { "✓" } else { "" },
            markets.join(", ")
        )?;
    }

    let pages: Vec<String> = page
        .page_items()
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == page.current_page => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect();
    writeln!(
        out,
        "\n{} partners, sorted by {} | page {} of {}: {}",
        page.total_count,
        view.filter().sort_key,
        page.current_page,
        page.total_pages,
        pages.join(" ")
    )?;
    Ok(())
}

#[derive(Serialize)]
struct PageOutput<'a> {
    current_page: usize,
    total_pages: usize,
    total_count: usize,
    pages: Vec<PageItem>,
    partners: &'a [&'a Partner],
}

fn print_json<W: Write>(out: &mut W, page: &DirectoryPage<'_>) -> Result<()> {
    let output = PageOutput {
        current_page: page.current_page,
        total_pages: page.total_pages,
        total_count: page.total_count,
        pages: page.page_items(),
        partners: &page.partners,
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

fn print_csv<W: Write>(out: &mut W, page: &DirectoryPage<'_>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["id", "name", "rate", "hires", "verified", "markets"])?;
    for partner in &page.partners {
        let rate = partner.rate.to_string();
        let hires = partner.hires.to_string();
        let markets = partner.markets.join("|");
        writer.write_record([
            partner.id.as_str(),
            partner.name.as_str(),
            rate.as_str(),
            hires.as_str(),
            if partner.verified { "true" } else { "false" },
            markets.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_regions(catalog: &RegionCatalog, toggles: &[String]) -> Result<()> {
    if toggles.is_empty() {
        for group in catalog.groups() {
            println!("{}", group.name);
            println!("  {:<20} {}", group.aggregate.value, group.aggregate.label);
            for country in &group.countries {
                println!("    {:<18} {}", country.value, country.label);
            }
        }
        return Ok(());
    }

    let selection = catalog.selection_from_identifiers(toggles)?;
    println!("Selected: {}", selection.identifiers(catalog).join(", "));
    for (idx, group) in catalog.groups().iter().enumerate() {
        let chosen = selection.keys().filter(|k| k.group_index() == idx && !k.is_aggregate()).count();
        println!(
            "  {}: {}/{} countries{}",
            group.name,
            chosen,
            group.countries.len(),
            if catalog.is_fully_selected(&selection, idx) { " (full region)" } else { "" }
        );
    }
    println!("Target region: {}", format_selection(&selection, catalog));
    Ok(())
}
