use super::{AppContext, DogearCommand};
use crate::format::{emit, OutputFormat};
use crate::output::colorize::{Colorize, ColorizeQuery, Palette};
use dogear::error::Result;
use dogear::query::QueryCompiler;

#[derive(Debug, Clone)]
pub struct CollectionsCommand {
    pub format: Option<String>,
}

impl DogearCommand for CollectionsCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let catalog = ctx.catalog()?;
        if catalog.collections.is_empty() {
            eprintln!("No collections to display.");
            return Ok(());
        }

        let format = OutputFormat::from_option(self.format.as_deref());
        emit(&format.render_collections(&catalog.collections, ctx.nc)?);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SitesCommand {
    pub format: Option<String>,
}

impl DogearCommand for SitesCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let catalog = ctx.catalog()?;
        if catalog.sites.is_empty() {
            eprintln!("No sites to display.");
            return Ok(());
        }

        let format = OutputFormat::from_option(self.format.as_deref());
        emit(&format.render_sites(&catalog.sites, ctx.nc)?);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct QueryCommand {
    pub collection: String,
    pub site: Option<String>,
}

impl DogearCommand for QueryCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let catalog = ctx.catalog()?;
        let collection = catalog.find_collection(&self.collection)?;
        let sites = catalog.matching_sites(self.site.as_deref());

        let compiler = QueryCompiler::new(&ctx.config.search_engine);
        let queries = compiler.compile_all(collection, &sites);
        if queries.is_empty() {
            if collection.has_terms() {
                eprintln!("No sites match.");
            } else {
                eprintln!("Collection '{}' has no search terms.", collection.name);
            }
            return Ok(());
        }

        let palette = Palette::new(ctx.nc);
        for query in &queries {
            print!("{}", ColorizeQuery(query).render(palette));
        }
        Ok(())
    }
}
