//! `marksnip` command line: clip one saved page into Markdown.
//!
//! The page is read from a file, or from stdin when the input is `-`. Without
//! `--output` the Markdown is printed; with it, the document and its images are
//! written below the given directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marksnip::{
    ConversionOptions, HttpFetcher, MarkdownClipper, OfflineFetcher, ResourceFetcher,
    SelectorExtractor, save_clipped_document,
};

#[derive(Parser)]
#[command(name = "marksnip")]
#[command(about = "Clip a web article into Markdown", long_about = None)]
struct Arguments {
    /// HTML file to convert, `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Address the page was loaded from; relative links resolve against it
    #[arg(short, long, value_name = "URL")]
    url: String,

    /// JSON file with conversion options
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Directory to write the document and its images into
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Never touch the network; images keep their remote URLs
    #[arg(long)]
    offline: bool,
}

impl Arguments {
    async fn run(self) -> Result<()> {
        let options = match &self.options {
            Some(path) => ConversionOptions::load(path)
                .await
                .with_context(|| format!("failed to load options from `{}`", path.display()))?,
            None => ConversionOptions::default(),
        };

        let html = self.read_input().await?;

        if self.offline {
            self.clip(&html, options, OfflineFetcher).await
        } else {
            self.clip(&html, options, HttpFetcher::default()).await
        }
    }

    async fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            let mut html = String::new();
            tokio::io::stdin()
                .read_to_string(&mut html)
                .await
                .context("failed to read HTML from stdin")?;
            return Ok(html);
        }
        tokio::fs::read_to_string(&self.input)
            .await
            .with_context(|| format!("failed to read file from `{}`", self.input.display()))
    }

    async fn clip<F>(&self, html: &str, options: ConversionOptions, fetcher: F) -> Result<()>
    where
        F: ResourceFetcher,
    {
        let clipper = MarkdownClipper::new(SelectorExtractor::new(), fetcher, options);
        let document = clipper
            .clip_str(html, &self.url)
            .await
            .context("failed to clip page")?;

        match &self.output {
            Some(dir) => {
                let path = save_clipped_document(&document, dir, clipper.fetcher())
                    .await
                    .with_context(|| format!("failed to save into `{}`", dir.display()))?;
                tracing::info!(path = %path.display(), images = document.image_list.len(), "saved clip");
                println!("{}", path.display());
            }
            None => println!("{}", document.markdown),
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marksnip=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    Arguments::parse().run().await
}
