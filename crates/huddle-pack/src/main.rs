#![forbid(unsafe_code)]

//! Deployment-time substitution pass for Huddle locale bundles.
//!
//! Reads a locale bundle (a directory holding `interface.html`,
//! `walkthrough.html`, `names.txt`, or the embedded reference locale),
//! verifies its integrity, resolves the placeholder tokens from a JSON
//! manifest, and writes the rewritten templates plus a machine-readable
//! rewrite report.
//!
//! A placeholder that matches nothing is a warning, not a failure: the
//! payload still ships, with whatever broken asset links that implies.
//! Integrity defects and I/O errors are failures.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use huddle_l10n::placeholder::{PlaceholderKey, RewriteReport, Substitutions, rewrite};
use huddle_l10n::{TemplateBundle, locales, verify_bundle};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "huddle-pack", version, about = "Resolve placeholder tokens in a locale bundle")]
struct Args {
    /// JSON manifest with substitution values.
    #[arg(long)]
    manifest: PathBuf,

    /// Directory holding interface.html, walkthrough.html and names.txt.
    /// Defaults to the embedded reference locale.
    #[arg(long)]
    locale_dir: Option<PathBuf>,

    /// Output directory for the rewritten bundle.
    #[arg(long)]
    out: PathBuf,
}

/// Substitution manifest, one optional field per placeholder key.
///
/// Field names are [`PlaceholderKey::manifest_name`] values; an absent
/// field leaves that token untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    asset_base: Option<String>,
    product_name: Option<String>,
    product_link: Option<String>,
    site_name: Option<String>,
}

impl Manifest {
    fn fields(&self) -> [(PlaceholderKey, Option<&String>); 4] {
        [
            (PlaceholderKey::AssetBase, self.asset_base.as_ref()),
            (PlaceholderKey::ProductName, self.product_name.as_ref()),
            (PlaceholderKey::ProductLink, self.product_link.as_ref()),
            (PlaceholderKey::SiteName, self.site_name.as_ref()),
        ]
    }

    fn into_substitutions(self) -> Result<Substitutions, Box<dyn std::error::Error>> {
        let mut subs = Substitutions::new();
        for (key, value) in self.fields() {
            if let Some(value) = value {
                subs.set(key, value.clone())?;
            }
        }
        Ok(subs)
    }
}

fn load_bundle(locale_dir: Option<&Path>) -> std::io::Result<TemplateBundle> {
    match locale_dir {
        Some(dir) => Ok(TemplateBundle::new(
            fs::read_to_string(dir.join("interface.html"))?,
            fs::read_to_string(dir.join("walkthrough.html"))?,
            fs::read_to_string(dir.join("names.txt"))?,
        )),
        None => Ok(locales::ru()),
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = load_bundle(args.locale_dir.as_deref())?;
    if let Err(errors) = verify_bundle(&bundle) {
        for error in &errors {
            tracing::error!(%error, "integrity check failed");
        }
        return Err(format!("bundle failed {} integrity check(s)", errors.len()).into());
    }

    let manifest: Manifest = serde_json::from_str(&fs::read_to_string(&args.manifest)?)?;
    let subs = manifest.into_substitutions()?;
    if subs.is_empty() {
        tracing::warn!("manifest supplies no substitution values; bundle copied as-is");
    }

    let (interface, interface_report) = rewrite(bundle.interface(), &subs);
    let (walkthrough, walkthrough_report) = rewrite(bundle.walkthrough(), &subs);

    let mut report = RewriteReport::default();
    report.absorb(&interface_report);
    report.absorb(&walkthrough_report);
    for key in report.misses() {
        // Non-blocking: the bundle ships, the asset links stay broken.
        tracing::warn!(key = %key, token = key.token(), "placeholder token not found in markup");
    }
    tracing::info!(replacements = report.total(), "rewrite complete");

    fs::create_dir_all(&args.out)?;
    fs::write(args.out.join("interface.html"), interface)?;
    fs::write(args.out.join("walkthrough.html"), walkthrough)?;
    // The name pool carries no placeholders; it ships verbatim.
    fs::write(args.out.join("names.txt"), bundle.names())?;
    fs::write(
        args.out.join("report.json"),
        serde_json::to_vec_pretty(&report)?,
    )?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "packaging failed");
            ExitCode::FAILURE
        }
    }
}
