/// Reelvault - command-line client for the video bookmarking service
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reelvault_client::{BackendClient, BackendConfig};
use reelvault_core::embed::{display_thumbnail, playback_target, PlaybackTarget};
use reelvault_core::types::{ListId, NewVideo, Platform, UserId, VideoId};
use reelvault_core::DocumentStore;
use reelvault_library::VideoLibrary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "reelvault")]
#[command(about = "Bookmark and organize externally hosted videos", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        /// Optional display name for the profile
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Verify credentials and print the signed-in profile
    Login,
    /// Show the signed-in profile
    Profile,
    /// Add a video to the vault
    Add {
        /// Video title
        #[arg(long)]
        title: String,
        /// Video description
        #[arg(long)]
        description: String,
        /// Link to the externally hosted video
        #[arg(long)]
        url: String,
        /// Platform the link belongs to
        #[arg(long, value_enum)]
        platform: PlatformArg,
        /// Existing list to add the video to
        #[arg(long, conflicts_with = "new_list")]
        list: Option<String>,
        /// Create this list and add the video to it
        #[arg(long)]
        new_list: Option<String>,
    },
    /// Show all videos in the vault
    Videos,
    /// Show all lists
    Lists,
    /// Create an empty named list
    NewList {
        /// List title
        title: String,
    },
    /// Show one list and its snapshots
    ShowList {
        /// List id
        id: String,
    },
    /// Print the playback target for a video
    Play {
        /// Video id
        id: String,
    },
    /// Delete a video (snapshots in lists are left in place)
    RmVideo {
        /// Video id
        id: String,
    },
    /// Delete a list (its videos are left in place)
    RmList {
        /// List id
        id: String,
    },
    /// Follow the live videos subscription until interrupted
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Youtube,
    Instagram,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Youtube => Platform::YouTube,
            PlatformArg::Instagram => Platform::Instagram,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelvault=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    let mut backend_config = BackendConfig::new(&config.backend_url);
    if let Some(oembed_url) = &config.oembed_url {
        backend_config = backend_config.with_oembed_url(oembed_url);
    }
    let client = BackendClient::new(backend_config)?;

    match cli.command {
        Commands::Register { display_name } => {
            let (email, password) = config.credentials()?;
            let profile = client
                .sign_up(email, password, display_name.as_deref())
                .await?;
            println!("Account created for {} ({})", profile.label(), profile.id);
        }
        Commands::Login => {
            let profile = sign_in(&client, &config).await?;
            println!("Signed in as {} ({})", profile.label(), profile.id);
        }
        Commands::Profile => {
            sign_in(&client, &config).await?;
            let profile = client.current_user().await?;
            println!("{}", profile.label());
            println!("  id:    {}", profile.id);
            println!("  email: {}", profile.email);
        }
        Commands::Add {
            title,
            description,
            url,
            platform,
            list,
            new_list,
        } => {
            let profile = sign_in(&client, &config).await?;
            let library = library(&client).await?;

            let platform = Platform::from(platform);
            let classification = reelvault_core::classify_for(&url, platform)?;

            let list_id = match (list, new_list) {
                (Some(id), _) => Some(ListId::new(id)),
                (None, Some(name)) => Some(library.create_list(&profile.id, &name).await?),
                (None, None) => None,
            };

            let preview = client
                .thumbnails()
                .await
                .resolve_preview(&classification)
                .await
                .ok_or_else(|| anyhow!("the thumbnail could not be generated; check the URL"))?;

            let video_id = library
                .add_video(
                    &profile.id,
                    NewVideo {
                        title,
                        description,
                        source_url: url,
                        platform,
                    },
                    preview,
                    list_id.as_ref(),
                )
                .await?;

            match list_id {
                Some(list_id) => println!("Added video {video_id} to list {list_id}"),
                None => println!("Added video {video_id} (not in any list)"),
            }
        }
        Commands::Videos => {
            let profile = sign_in(&client, &config).await?;
            let library = library(&client).await?;

            let videos = library.videos_for(&profile.id).await?;
            if videos.is_empty() {
                println!("There are no videos in your vault");
            }
            for video in &videos {
                println!("{}  [{}]  {}", video.id, video.platform, video.title);
                println!("    {}", video.description);
                println!("    {}", display_thumbnail(video));
            }
        }
        Commands::Lists => {
            let profile = sign_in(&client, &config).await?;
            let library = library(&client).await?;

            let lists = library.lists_for(&profile.id).await?;
            if lists.is_empty() {
                println!("You have no lists yet");
            }
            for list in &lists {
                println!(
                    "{}  {}  ({} videos)",
                    list.id,
                    list.title,
                    list.videos.len()
                );
            }
        }
        Commands::NewList { title } => {
            let profile = sign_in(&client, &config).await?;
            let library = library(&client).await?;

            let list_id = library.create_list(&profile.id, &title).await?;
            println!("Created list {list_id}");
        }
        Commands::ShowList { id } => {
            let library = signed_in_library(&client, &config).await?;

            let list_id = ListId::new(id);
            let list = library
                .store()
                .get_list(&list_id)
                .await?
                .ok_or_else(|| anyhow!("list {list_id} does not exist"))?;

            println!("{} ({} videos)", list.title, list.videos.len());
            for snap in &list.videos {
                println!("  {}  [{}]  {}", snap.id, snap.platform, snap.title);
            }
        }
        Commands::Play { id } => {
            let (profile, library) = signed_in(&client, &config).await?;

            let video_id = VideoId::new(id);
            let videos = library.videos_for(&profile.id).await?;
            let video = videos
                .iter()
                .find(|v| v.id == video_id)
                .ok_or_else(|| anyhow!("video {video_id} is not in your vault"))?;

            match playback_target(video) {
                PlaybackTarget::Embed(url) => println!("embed  {url}"),
                PlaybackTarget::Player(url) => println!("player {url}"),
            }
        }
        Commands::RmVideo { id } => {
            let library = signed_in_library(&client, &config).await?;
            library.delete_video(&VideoId::new(id)).await?;
            println!("Video deleted (list snapshots are kept)");
        }
        Commands::RmList { id } => {
            let library = signed_in_library(&client, &config).await?;
            library.delete_list(&ListId::new(id)).await?;
            println!("List deleted (its videos are kept)");
        }
        Commands::Watch => {
            let (profile, library) = signed_in(&client, &config).await?;
            watch_videos(&library, &profile.id).await?;
        }
    }

    Ok(())
}

async fn sign_in(
    client: &BackendClient,
    config: &CliConfig,
) -> Result<reelvault_core::UserProfile> {
    let (email, password) = config.credentials()?;
    client
        .sign_in(email, password)
        .await
        .context("sign-in failed")
}

async fn library(
    client: &BackendClient,
) -> Result<VideoLibrary<reelvault_client::DocumentsClient>> {
    Ok(VideoLibrary::new(client.documents().await?))
}

async fn signed_in(
    client: &BackendClient,
    config: &CliConfig,
) -> Result<(
    reelvault_core::UserProfile,
    VideoLibrary<reelvault_client::DocumentsClient>,
)> {
    let profile = sign_in(client, config).await?;
    Ok((profile, library(client).await?))
}

async fn signed_in_library(
    client: &BackendClient,
    config: &CliConfig,
) -> Result<VideoLibrary<reelvault_client::DocumentsClient>> {
    sign_in(client, config).await?;
    library(client).await
}

async fn watch_videos(
    library: &VideoLibrary<reelvault_client::DocumentsClient>,
    owner: &UserId,
) -> Result<()> {
    let mut watch = library.watch_videos(owner).await?;

    println!("Watching your videos (Ctrl-C to stop)");
    for video in watch.current() {
        println!("{}  {}", video.id, video.title);
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = watch.changed() => match changed {
                Some(snapshot) => {
                    println!("-- {} video(s) --", snapshot.len());
                    for video in snapshot {
                        println!("{}  {}", video.id, video.title);
                    }
                }
                None => bail!("subscription ended unexpectedly"),
            },
        }
    }

    Ok(())
}
