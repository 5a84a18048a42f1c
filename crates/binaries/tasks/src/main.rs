use app_state::{is_allowed_image_type, settings};
use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{bail, eyre};
use common_services::api::submissions::service::create_submission;
use common_services::database::stores::PlaceSubmissionStore;
use common_services::database::{get_db_pool, run_migrations};
use common_services::storage::{R2Client, StorageConfig};
use common_types::NewSubmission;
use gallery_engine::layout;
use serde_json::json;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about = "Maintenance tasks for the places gallery", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Upload a photo from disk and store it as an approved submission.
    Seed {
        #[clap(long)]
        file: PathBuf,
        #[clap(long)]
        place: String,
        #[clap(long)]
        city: String,
        #[clap(long)]
        country: String,
        #[clap(long)]
        story: Option<String>,
        #[clap(long)]
        name: Option<String>,
    },
    /// Print the scattered gallery layout as JSON.
    Layout {
        #[clap(long, default_value_t = 20)]
        count: usize,
        #[clap(long, default_value_t = 1.0)]
        progress: f32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;
    let args = Args::parse();

    match args.command {
        Command::Migrate => migrate().await,
        Command::Seed {
            file,
            place,
            city,
            country,
            story,
            name,
        } => {
            let submission = NewSubmission {
                place_name: place,
                city,
                country,
                name,
                why_special: story,
                photo_url: String::new(),
            };
            seed(file, submission).await
        }
        Command::Layout { count, progress } => print_layout(count, progress),
    }
}

async fn migrate() -> Result<()> {
    let settings = settings();
    let pool = get_db_pool(&settings.secrets.database_url, &settings.database, false).await?;
    run_migrations(&pool).await?;
    info!("Migrations applied.");
    Ok(())
}

async fn seed(file: PathBuf, mut submission: NewSubmission) -> Result<()> {
    let settings = settings();
    let content_type = mime_guess::from_path(&file)
        .first_raw()
        .ok_or_else(|| eyre!("Cannot tell the image type of {}", file.display()))?;
    if !is_allowed_image_type(content_type) {
        bail!("{} is not a supported image ({content_type})", file.display());
    }
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre!("Invalid file name: {}", file.display()))?
        .to_string();
    let bytes = tokio::fs::read(&file).await?;

    let pool = get_db_pool(&settings.secrets.database_url, &settings.database, true).await?;
    let storage = R2Client::new(
        StorageConfig::from_settings(&settings.storage, &settings.secrets)?,
        reqwest::Client::new(),
    );

    info!("Uploading {file_name} ({} bytes)", bytes.len());
    submission.photo_url = storage.put_object(&file_name, content_type, bytes).await?;

    let created = create_submission(&pool, submission).await?;
    let row = PlaceSubmissionStore::find_by_id(&pool, created.id)
        .await?
        .ok_or_else(|| eyre!("Submission {} vanished after insert", created.id))?;
    info!(
        "Seeded {} ({}, {}) as {} -> {}",
        row.place_name, row.city, row.country, row.id, row.photo_url
    );
    Ok(())
}

fn print_layout(count: usize, progress: f32) -> Result<()> {
    let placements: Vec<_> = (0..count)
        .map(|index| {
            let placement = layout(index, count, progress.clamp(0.0, 1.0));
            json!({
                "index": index,
                "position": [placement.position.x, placement.position.y, placement.position.z],
                "tiltDeg": placement.tilt.to_degrees(),
                "scale": placement.scale,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&placements)?);
    Ok(())
}
