use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::header::LINK;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use crate::component::{CatalogShape, Component};
use crate::error::ResolveError;
use crate::options::verbose;
use crate::resolve::CatalogSource;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const MAX_PAGES: usize = 50;

/// Fetches catalogs over HTTP. Paginated release listings are followed
/// through every `Link: rel="next"` page and returned as one array.
pub struct HttpSource {
    client: Client,
    overrides: BTreeMap<Component, String>,
}

impl HttpSource {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            overrides: BTreeMap::new(),
        })
    }

    /// Replaces the upstream catalog URL for `component`.
    pub fn with_override(mut self, component: Component, url: impl Into<String>) -> Self {
        self.overrides.insert(component, url.into());
        self
    }

    pub fn catalog_url(&self, component: Component) -> &str {
        self.overrides
            .get(&component)
            .map(String::as_str)
            .unwrap_or_else(|| component.catalog_url())
    }
}

impl HttpSource {
    /// One GET; returns the body and the next page's URL, if any.
    fn get_page(&self, component: Component, url: &str) -> Result<(Vec<u8>, Option<String>), ResolveError> {
        verbose::log(&format!("GET {}", url));

        let failed = |message: String| ResolveError::FetchFailed { component, message };

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(failed(format!("{} returned {}", url, status)));
        }

        let next = resp
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);

        let bytes = resp.bytes().map_err(|e| failed(e.to_string()))?;
        Ok((bytes.to_vec(), next))
    }

    fn fetch_all_pages(&self, component: Component, url: &str) -> Result<Vec<u8>, ResolveError> {
        let mut releases = Vec::new();
        let mut next = Some(url.to_string());
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                return Err(ResolveError::FetchFailed {
                    component,
                    message: format!("more than {} pages of releases", MAX_PAGES),
                });
            }
            pages += 1;

            let (body, following) = self.get_page(component, &url)?;
            append_page(component, &mut releases, &body)?;
            next = following;
        }

        verbose::log(&format!("Fetched {} {} releases over {} page(s)", releases.len(), component, pages));
        serde_json::to_vec(&Value::Array(releases)).map_err(|e| ResolveError::FetchFailed {
            component,
            message: e.to_string(),
        })
    }
}

impl CatalogSource for HttpSource {
    fn fetch(&self, component: Component) -> Result<Vec<u8>, ResolveError> {
        let url = self.catalog_url(component);
        match component.catalog_shape() {
            CatalogShape::GithubReleases => self.fetch_all_pages(component, url),
            CatalogShape::VersionList { .. } | CatalogShape::Manifest { .. } => {
                self.get_page(component, url).map(|(body, _)| body)
            }
        }
    }
}

/// The `rel="next"` target of an RFC 8288 `Link` header.
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim().strip_prefix('<')?.strip_suffix('>')?;
        parts
            .any(|param| param.trim() == "rel=\"next\"")
            .then(|| target.to_string())
    })
}

/// Adds one page of a release listing; a page that is not a JSON array
/// fails the whole catalog rather than leaving it partial.
fn append_page(component: Component, releases: &mut Vec<Value>, body: &[u8]) -> Result<(), ResolveError> {
    let malformed = |message: String| ResolveError::MalformedCatalog { component, message };
    match serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))? {
        Value::Array(page) => {
            releases.extend(page);
            Ok(())
        }
        _ => Err(malformed("expected an array of releases".to_string())),
    }
}

pub fn download_file(url: &str, dest_path: &Path) -> Result<()> {
    println!("Downloading from {}", url);

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;
    let mut resp = client.get(url)
        .send()
        .context("Failed to send request")?
        .error_for_status()
        .with_context(|| format!("Download of {} failed", url))?;

    let total_size = resp.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .context("Invalid progress bar template")?
        .progress_chars("#>-"));

    let mut file = File::create(dest_path)
        .with_context(|| format!("Failed to create {}", dest_path.display()))?;
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = resp.read(&mut buffer).context("Failed while reading the download")?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])?;
        pb.inc(read as u64);
    }
    pb.finish_with_message("Download complete");

    Ok(())
}
