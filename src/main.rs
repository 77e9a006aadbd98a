use bean_catalog::core::discovery::{count_attributes, render_chart, ChartScale};
use bean_catalog::core::recommend::{is_orangish, MatchLevel};
use bean_catalog::core::table::{
    filter_beans, render_grid, render_table, sort_beans, write_csv, Column, Pagination, ViewMode,
};
use bean_catalog::utils::{logger, validation::Validate};
use bean_catalog::{
    CatalogApi, CatalogClient, CliConfig, Command, Recommender, Result, ScoredCombination,
};
use clap::Parser;
use std::io::Write;
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const DICE_FACES: [&str; 6] = ["⚀", "⚁", "⚂", "⚃", "⚄", "⚅"];
const DICE_FRAME: Duration = Duration::from_millis(60);

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("Command failed: {} (category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    cli.validate()?;
    let config = cli.resolve()?;
    config.validate()?;
    tracing::debug!("Using catalog at {}", config.api.base_url);

    let client = CatalogClient::new(config.client_config())?;

    match &cli.command {
        Command::Health => {
            let health = client.health().await?;
            println!("status: {}", health.status);
        }
        Command::Beans {
            sort,
            filter,
            view,
            csv,
            ..
        } => {
            let pagination = cli
                .pagination(config.display.page_size)
                .unwrap_or_default();
            let page = client
                .list_beans(Some(pagination.limit()), Some(pagination.offset()))
                .await?;

            let mut beans = page.data;
            if let Some(sort) = sort {
                sort_beans(&mut beans, *sort);
            }
            let rows = filter_beans(&beans, filter.as_deref().unwrap_or(""));

            if *csv {
                write_csv(std::io::stdout().lock(), &rows, &Column::ALL)?;
                return Ok(());
            }
            match view {
                ViewMode::Table => println!("{}", render_table(&rows, &Column::LISTING)),
                ViewMode::Grid => println!("{}", render_grid(&rows)),
            }
            print_page_footer(&pagination, rows.len(), page.total);
        }
        Command::Colors { color_id } => {
            let colors = client.list_colors(color_id.as_deref()).await?;
            for color in &colors.data {
                let swatches: Vec<String> = color
                    .hex
                    .iter()
                    .map(|h| {
                        if is_orangish(h) {
                            format!("{}*", h)
                        } else {
                            h.clone()
                        }
                    })
                    .collect();
                println!(
                    "{:<16} {:<24} {}",
                    color.color_id,
                    color.color_description,
                    swatches.join(" ")
                );
            }
            println!("{} color(s), * marks orangish swatches", colors.total);
        }
        Command::Combinations => {
            let combinations = client.list_combinations().await?;
            for combo in &combinations.data {
                println!("{:>4}  {:<28} {}", combo.combination_id, combo.name, combo.tag_line());
            }
            println!("{} combination(s)", combinations.total);
        }
        Command::Discovery => {
            let beans = client.fetch_all_beans().await?;
            let bars = count_attributes(&beans).bars();
            let scale = ChartScale::for_bars(&bars, None);
            println!("Attributes across {} beans\n", beans.len());
            print!("{}", render_chart(&bars, &scale, 40));
        }
        Command::Recommend => {
            let result = Recommender::new(client).recommend().await?;
            if result.preferred_beans.is_empty() {
                println!("No beans match your taste yet.");
                return Ok(());
            }
            let preferred: Vec<_> = result.preferred_beans.iter().collect();
            println!("{}\n", render_grid(&preferred));
            println!("Combinations:");
            for combo in &result.combinations {
                print_scored(combo, MatchLevel::for_listing(combo.match_fraction));
            }
        }
        Command::Lottery => {
            let result = Recommender::new(client).recommend().await?;
            if result.combinations.is_empty() {
                println!("Nothing to roll for: no recommended combinations.");
                return Ok(());
            }
            if !config.display.skip_animations {
                roll_dice(&mut std::io::stdout(), DICE_FRAME).await?;
            }

            let mut rng = rand::thread_rng();
            let Some(picked) = result.lottery(&mut rng) else {
                return Ok(());
            };
            print_scored(picked, MatchLevel::for_lottery(picked.match_fraction));
            println!("{}", picked.combination.tag_line());
            let beans = result.beans_in(picked);
            println!("{}", render_table(&beans, &Column::LISTING));
        }
    }

    Ok(())
}

fn print_scored(combo: &ScoredCombination, level: MatchLevel) {
    println!(
        "  {} {}({}% match){}",
        combo.combination.name,
        level.ansi_color(),
        combo.match_percent(),
        RESET
    );
}

fn print_page_footer(pagination: &Pagination, shown: usize, total: u64) {
    println!(
        "\nPage {} of {} | Showing {} of {} Rows",
        pagination.page_index + 1,
        pagination.page_count(total).max(1),
        shown,
        total
    );
}

/// The pick happens once the roll completes. Each frame lasts a little
/// longer than the previous one.
async fn roll_dice<W: Write>(out: &mut W, frame: Duration) -> std::io::Result<()> {
    for (i, face) in DICE_FACES.iter().cycle().take(12).enumerate() {
        write!(out, "\r{} rolling...", face)?;
        out.flush()?;
        tokio::time::sleep(frame + frame / 6 * i as u32).await;
    }
    writeln!(out)
}
