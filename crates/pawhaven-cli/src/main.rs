//! PawHaven CLI: add and edit adoptable pets from the terminal.
//!
//! Reads the backend and Cloudinary settings from the environment (or `.env`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use pawhaven_api_client::Auth;
use pawhaven_cli::{error_json, init_tracing, print_json, report_json, PetFields, SessionArgs};
use pawhaven_core::models::{CategoryOption, UserRecord};
use pawhaven_core::{PipelineConfig, TracingNotifier};
use pawhaven_pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "pawhaven", about = "PawHaven pet submission CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pet categories a record can use
    Categories,
    /// Add a new pet: upload its picture, then create the record
    Submit {
        #[command(flatten)]
        session: SessionArgs,
        #[command(flatten)]
        fields: PetFields,
    },
    /// Edit an existing pet; omitted fields keep their stored values
    Update {
        /// Pet identifier
        id: String,
        #[command(flatten)]
        session: SessionArgs,
        #[command(flatten)]
        fields: PetFields,
    },
    /// Show a single pet by ID
    Get {
        /// Pet identifier
        id: String,
    },
    /// Persist a user record after sign-up
    RegisterUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        photo_url: Option<String>,
        /// Bearer token forwarded to the backend
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Commands::Categories = cli.command {
        return print_json(&CategoryOption::all());
    }

    let config = PipelineConfig::from_env().context(
        "Failed to load configuration. Set CLOUDINARY_CLOUD_NAME, CLOUDINARY_UPLOAD_PRESET and API_BASE_URL",
    )?;
    let pipeline = Pipeline::new(config, Arc::new(TracingNotifier))?;

    match cli.command {
        Commands::Categories => {}
        Commands::Submit { session, fields } => {
            let mut capture = pipeline.create_form(session.into_session());
            fields.apply_to(capture.form_mut())?;
            let report = capture.submit().await;
            print_json(&report_json(&report))?;
            if !report.is_success() {
                anyhow::bail!("Submission failed");
            }
        }
        Commands::Update {
            id,
            session,
            fields,
        } => {
            let mut capture = match pipeline.load_for_update(&id, session.into_session()).await {
                Ok(capture) => capture,
                Err(error) => {
                    print_json(&error_json(&error))?;
                    anyhow::bail!("Failed to load pet {}", id);
                }
            };
            fields.apply_to(capture.form_mut())?;
            let report = capture.submit().await;
            print_json(&report_json(&report))?;
            if !report.is_success() {
                anyhow::bail!("Update failed");
            }
        }
        Commands::Get { id } => match pipeline.api().get_pet(&id).await {
            Ok(pet) => print_json(&pet)?,
            Err(error) => {
                print_json(&error_json(&error))?;
                anyhow::bail!("Failed to load pet {}", id);
            }
        },
        Commands::RegisterUser {
            name,
            email,
            photo_url,
            token,
        } => {
            let mut user = UserRecord::new(name, email);
            if let Some(url) = photo_url {
                user = user.with_photo_url(url);
            }
            let auth = match token {
                Some(token) => Auth::Bearer(token),
                None => Auth::Anonymous,
            };
            match pipeline.api().with_auth(auth).register_user(&user).await {
                Ok(ack) => print_json(&ack)?,
                Err(error) => {
                    print_json(&error_json(&error))?;
                    anyhow::bail!("Failed to register user");
                }
            }
        }
    }

    Ok(())
}
