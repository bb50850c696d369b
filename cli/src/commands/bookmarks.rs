use super::{AppContext, DogearCommand};
use crate::dry_run::DryRunHost;
use crate::output::colorize::{Colorize, ColorizeGroup, Palette};
use crate::progress;
use dogear::browser::SystemBrowser;
use dogear::error::Result;
use dogear::import_export::{self, NestingMode};
use dogear::models::group::{non_empty, total_urls};
use dogear::models::BookmarkGroup;
use dogear::query::QueryCompiler;
use dogear::tabs::{
    spawn_service, RandomColors, TabGroupOrchestrator, TabHost, TokioPacer,
};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

fn nesting_mode(ctx: &AppContext, flatten: bool) -> NestingMode {
    if flatten {
        NestingMode::Flatten
    } else {
        ctx.config.nesting
    }
}

fn read_groups(file: &Path, nesting: NestingMode) -> Result<Vec<BookmarkGroup>> {
    let groups = non_empty(import_export::parse_bookmark_file(file, nesting)?);
    log::debug!("{} groups in {}", groups.len(), file.display());
    Ok(groups)
}

#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub collection: String,
    pub output: Option<PathBuf>,
}

impl DogearCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let catalog = ctx.catalog()?;
        let collection = catalog.find_collection(&self.collection)?;
        let compiler = QueryCompiler::new(&ctx.config.search_engine);

        let target = self.output.clone().unwrap_or_else(|| PathBuf::from("."));
        let written = import_export::export_collection(&compiler, collection, &catalog.sites, &target)?;

        let links = compiler.compile_all(collection, &catalog.sites).len();
        eprintln!(
            "✓ Exported {} link(s) for '{}' to {}",
            links,
            collection.name,
            written.display()
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PreviewCommand {
    pub file: PathBuf,
    pub flatten: bool,
}

impl DogearCommand for PreviewCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let groups = read_groups(&self.file, nesting_mode(ctx, self.flatten))?;
        if groups.is_empty() {
            eprintln!("No bookmark groups found in {}", self.file.display());
            return Ok(());
        }

        let palette = Palette::new(ctx.nc);
        let rendered: Vec<String> = groups
            .iter()
            .map(|g| ColorizeGroup(g).render(palette))
            .collect();
        print!("{}", rendered.join("\n"));
        eprintln!(
            "{} group(s), {} URL(s)",
            groups.len(),
            total_urls(&groups)
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct OpenCommand {
    pub file: PathBuf,
    pub dry_run: bool,
    pub flatten: bool,
    pub seed: Option<u64>,
}

impl OpenCommand {
    /// Hand the groups to an orchestrator service over `host` and wait for its answer
    fn run_with<H: TabHost + 'static>(
        &self,
        ctx: &AppContext,
        host: H,
        groups: Vec<BookmarkGroup>,
    ) -> Result<()> {
        let colors = match self.seed {
            Some(seed) => RandomColors::seeded(seed),
            None => RandomColors::from_os_rng(),
        };
        let orchestrator = TabGroupOrchestrator::new(host, TokioPacer, Box::new(colors))
            .with_delay(ctx.config.pacing_delay());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        let spinner = self.spinner(&groups);

        let count = groups.len();
        let response = runtime.block_on(async move {
            let (mut handle, _service) = spawn_service(orchestrator);
            handle.create_bookmark_groups(groups).await
        })?;

        if response.success {
            finish(spinner, format!("✓ Opened {} group(s)", count));
            Ok(())
        } else {
            let message = response.error.unwrap_or_else(|| "unknown error".to_string());
            finish(spinner, format!("✗ {}", message));
            Err(dogear::DogearError::Host(message))
        }
    }

    /// No spinner for a dry run, its plan is printed to the same stream
    fn spinner(&self, groups: &[BookmarkGroup]) -> Option<ProgressBar> {
        if self.dry_run {
            return None;
        }
        Some(progress::spinner(format!(
            "Opening {} group(s), {} URL(s)",
            groups.len(),
            total_urls(groups)
        )))
    }
}

fn finish(spinner: Option<ProgressBar>, message: String) {
    match spinner {
        Some(spinner) => spinner.finish_with_message(message),
        None => eprintln!("\n{}", message),
    }
}

impl DogearCommand for OpenCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let groups = read_groups(&self.file, nesting_mode(ctx, self.flatten))?;
        if groups.is_empty() {
            eprintln!("No bookmark groups found in {}", self.file.display());
            return Ok(());
        }

        if self.dry_run {
            self.run_with(ctx, DryRunHost::new(Palette::new(ctx.nc)), groups)
        } else {
            self.run_with(ctx, SystemBrowser::new(), groups)
        }
    }
}
