use std::{path::PathBuf, time::Duration};

use clap::Parser;
use fake_user_agent::get_chrome_rua;
use log::LevelFilter;
use reqwest::{Client, ClientBuilder};
use smooth::{IsmParser, ManifestResult};

#[derive(Parser, Debug, Clone)]
#[clap(version = env!("SMOOTHDUMP_VERSION"), author)]
/// Expands an IIS Smooth Streaming manifest into the fragment URLs of every quality level.
pub struct SmoothDumpArgs {
    /// Debug output
    #[clap(long, alias = "debug")]
    verbose: bool,

    /// Timeout of the manifest request, in seconds
    #[clap(long, default_value = "60")]
    timeout: u64,

    /// Manifest URL used to resolve fragment URLs.
    ///
    /// Defaults to the manifest argument, or to the final URL after redirects when the manifest
    /// is fetched.
    #[clap(long, env = "SMOOTH_MANIFEST_URL")]
    url: Option<String>,

    /// Pretty print the JSON output
    #[clap(long)]
    pretty: bool,

    /// The output file to write the playlists to. If not specified, they will be written to stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Manifest file path or http(s) URL
    manifest: String,
}

impl SmoothDumpArgs {
    fn client(&self) -> anyhow::Result<Client> {
        Ok(ClientBuilder::new()
            .user_agent(get_chrome_rua())
            .timeout(Duration::from_secs(self.timeout))
            .build()?)
    }

    fn is_remote(&self) -> bool {
        self.manifest.starts_with("http://") || self.manifest.starts_with("https://")
    }

    /// Returns the manifest URL and the manifest text.
    async fn load(&self) -> anyhow::Result<(String, String)> {
        if self.is_remote() {
            log::info!("Fetching manifest from {}", self.manifest);
            let response = self
                .client()?
                .get(&self.manifest)
                .send()
                .await?
                .error_for_status()?;
            let final_url = response.url().to_string();
            let manifest = response.text().await?;

            Ok((self.url.clone().unwrap_or(final_url), manifest))
        } else {
            log::info!("Reading manifest from {}", self.manifest);
            let manifest = tokio::fs::read_to_string(&self.manifest).await?;

            Ok((self.url.clone().unwrap_or_else(|| self.manifest.clone()), manifest))
        }
    }

    async fn write(&self, result: &ManifestResult) -> anyhow::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };

        match &self.output {
            Some(output) => {
                tokio::fs::write(output, json).await?;
                log::info!("Playlists written to {}", output.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    // RUST_LOG takes precedence over --verbose
    builder.parse_default_env();
    builder.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = SmoothDumpArgs::parse();
    init_logger(args.verbose);

    let (manifest_url, manifest) = args.load().await?;

    let parser: IsmParser = IsmParser::default();
    let result = parser.parse_manifest(&manifest_url, &manifest)?;
    for playlist in &result.playlists {
        log::info!(
            "{} {} bps: {} segments",
            playlist.r#type,
            playlist.bitrate,
            playlist.segments.len()
        );
    }

    args.write(&result).await
}
