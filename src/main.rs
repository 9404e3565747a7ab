use anyhow::Result;
use clap::{Parser, ValueEnum};
use dairy_analytics::{loader, reports};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "dairy-report")]
#[command(about = "Aggregated views over the Dairy Goods Sales Dataset")]
struct Args {
    /// Which dashboard view to print
    #[arg(value_enum)]
    report: Report,

    /// Path to the dataset CSV
    #[arg(short, long, default_value = "data/dairy_dataset.csv")]
    data: PathBuf,

    /// Row limit for ranked views
    #[arg(short, long, default_value_t = 5)]
    limit: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum Report {
    /// Headline revenue and price metrics
    Metrics,
    /// Monthly revenue trend
    Monthly,
    /// Revenue by location
    Locations,
    /// Farm size vs revenue per location
    Farms,
    /// Herd size vs revenue per location
    Cows,
    /// Revenue by sales channel
    Channels,
    /// Top products by revenue
    Products,
    /// Fastest-expiring product/brand pairs
    ShelfLife,
    /// Channel split for the top locations
    ChannelSplit,
    /// Channel revenue over time
    ChannelTrend,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Loading dataset from {}", args.data.display());
    let df = loader::load_dataset(&args.data)?;

    match args.report {
        Report::Metrics => {
            let metrics = reports::headline_metrics(&df)?;
            println!("Total revenue:      {:.2} EUR", metrics.total_revenue_eur);
            println!(
                "Total quantity:     {:.2} liters/kg",
                metrics.total_quantity_sold
            );
            println!("Avg unit price:     {:.2} EUR", metrics.avg_unit_price_eur);
            println!("Lowest unit price:  {:.2} EUR", metrics.min_unit_price_eur);
            println!("Highest unit price: {:.2} EUR", metrics.max_unit_price_eur);
        }
        Report::Monthly => println!("{}", reports::monthly_revenue(&df)?),
        Report::Locations => println!("{}", reports::revenue_by_location(&df)?),
        Report::Farms => println!("{}", reports::farm_stats(&df)?),
        Report::Cows => println!("{}", reports::cow_stats(&df)?),
        Report::Channels => println!("{}", reports::revenue_by_channel(&df)?),
        Report::Products => println!("{}", reports::top_products(&df, args.limit)?),
        Report::ShelfLife => println!("{}", reports::expiring_products(&df, args.limit)?),
        Report::ChannelSplit => {
            println!("{}", reports::channel_split_for_top_locations(&df, 3)?)
        }
        Report::ChannelTrend => println!("{}", reports::channel_revenue_over_time(&df)?),
    }

    Ok(())
}
