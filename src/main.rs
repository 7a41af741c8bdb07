use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use raiplaysound_rss::series::DEFAULT_BASE_URL;
use raiplaysound_rss::{
    FetchOptions, NoopReporter, ProgressEvent, ProgressReporter, ReqwestClient,
    SharedProgressReporter, download_audio, download_rss,
};

// Emoji with fallback for terminals without Unicode support
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static DOWNLOAD: Emoji<'_, '_> = Emoji("📥 ", "[v] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Turn RaiPlay Sound audiobooks into podcast feeds, or download their audio
#[derive(Parser, Debug)]
#[command(name = "raiplaysound-rss")]
#[command(about = "Turn RaiPlay Sound audiobooks into podcast feeds, or download their audio")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Catalog base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum number of concurrent audio probes
    #[arg(short = 'c', long, global = true, default_value = "3")]
    concurrent: usize,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a podcast RSS feed for an audiobook
    DownloadRss {
        /// Audiobook name as it appears in the catalog URL
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        audiobook_name: String,

        /// Where to write the RSS document
        output_rss_path: PathBuf,
    },

    /// Download the audio of every episode of an audiobook
    DownloadAudio {
        /// Audiobook name as it appears in the catalog URL
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        audiobook_name: String,

        /// Directory receiving one file per episode
        output_dir: PathBuf,
    },
}

/// Progress reporter using indicatif for terminal output
struct IndicatifReporter {
    multi: MultiProgress,
    download_bar: Mutex<Option<ProgressBar>>,
    main_bar: ProgressBar,
}

impl IndicatifReporter {
    fn new() -> Self {
        let multi = MultiProgress::new();

        let main_style = ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let main_bar = multi.add(ProgressBar::new_spinner());
        main_bar.set_style(main_style);
        main_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            multi,
            download_bar: Mutex::new(None),
            main_bar,
        }
    }

    fn start_download_bar(&self, length: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "  {DOWNLOAD}[{{bar:30.cyan/blue}}] {{bytes}}/{{total_bytes}} {{wide_msg}}"
            ))
            .unwrap()
            .progress_chars("█▓░");

        let bar = self.multi.add(ProgressBar::new(length));
        bar.set_style(style);
        *self.download_bar.lock().unwrap() = Some(bar.clone());
        bar
    }

    fn take_download_bar(&self) -> Option<ProgressBar> {
        self.download_bar.lock().unwrap().take()
    }

    fn log(&self, line: String) {
        let _ = self.multi.println(line);
    }
}

impl ProgressReporter for IndicatifReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingSeries { url } => {
                self.main_bar
                    .set_message(format!("{SEARCH}Fetching catalog: {}", url.cyan()));
            }

            ProgressEvent::ProbingEpisode {
                episode_index,
                total_episodes,
                url,
            } => {
                self.main_bar.set_message(format!(
                    "{SEARCH}[{}/{}] Probing {}",
                    (episode_index + 1).to_string().cyan(),
                    total_episodes.to_string().cyan(),
                    url.dimmed()
                ));
            }

            ProgressEvent::SeriesLoaded {
                series_title,
                total_episodes,
            } => {
                self.log(format!(
                    "{HEADPHONES}{} • {} episodes",
                    series_title.bold().green(),
                    total_episodes.to_string().cyan()
                ));
            }

            ProgressEvent::FeedWritten { path, item_count } => {
                self.main_bar.finish_and_clear();
                println!(
                    "{SUCCESS}{} {} ({} items)",
                    "Feed written:".bold().green(),
                    path.cyan(),
                    item_count.to_string().cyan()
                );
            }

            ProgressEvent::DownloadStarting {
                episode_index,
                total_episodes,
                url,
                content_length,
            } => {
                self.log(format!(
                    "{DOWNLOAD}Downloading episode #{}: {}",
                    episode_index,
                    url.cyan()
                ));
                let bar = self.start_download_bar(content_length.unwrap_or(0));
                bar.set_message(format!(
                    "[{}/{}]",
                    (episode_index + 1).to_string().cyan(),
                    total_episodes.to_string().cyan()
                ));
            }

            ProgressEvent::DownloadProgress {
                bytes_downloaded,
                total_bytes,
                ..
            } => {
                if let Some(bar) = self.download_bar.lock().unwrap().as_ref() {
                    if let Some(total) = total_bytes {
                        bar.set_length(total);
                    }
                    bar.set_position(bytes_downloaded);
                }
            }

            ProgressEvent::DownloadCompleted {
                path,
                bytes_downloaded,
                ..
            } => {
                if let Some(bar) = self.take_download_bar() {
                    bar.set_position(bytes_downloaded);
                    bar.finish_and_clear();
                }
                self.log(format!("  {SUCCESS}{}", path.green()));
            }

            ProgressEvent::DownloadFailed {
                episode_index,
                error,
                ..
            } => {
                if let Some(bar) = self.take_download_bar() {
                    bar.abandon_with_message(format!(
                        "{FAILURE}#{} - {}",
                        episode_index,
                        error.red()
                    ));
                }
                self.main_bar.finish_and_clear();
            }

            ProgressEvent::DownloadsCompleted { downloaded_count } => {
                self.main_bar.finish_and_clear();
                println!(
                    "\n{PARTY}{} {} episodes downloaded",
                    "Download complete:".bold().green(),
                    downloaded_count.to_string().green().bold()
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            BOOKS,
            "raiplaysound-rss".bold().magenta(),
            "- Audiobooks as podcasts".dimmed()
        );
    }

    let client = ReqwestClient::new();

    let options = FetchOptions {
        base_url: args.base_url,
        max_concurrent_probes: args.concurrent,
    };

    let reporter: SharedProgressReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(IndicatifReporter::new())
    };

    match args.command {
        Command::DownloadRss {
            audiobook_name,
            output_rss_path,
        } => {
            download_rss(
                &client,
                &audiobook_name,
                &output_rss_path,
                &options,
                reporter,
            )
            .await
            .with_context(|| format!("Failed to build RSS feed for '{}'", audiobook_name))?;
        }

        Command::DownloadAudio {
            audiobook_name,
            output_dir,
        } => {
            download_audio(&client, &audiobook_name, &output_dir, &options, reporter)
                .await
                .with_context(|| format!("Failed to download audio for '{}'", audiobook_name))?;

            if !args.quiet {
                println!(
                    "\n{FOLDER}Output: {}\n",
                    output_dir.display().to_string().cyan()
                );
            }
        }
    }

    Ok(())
}
