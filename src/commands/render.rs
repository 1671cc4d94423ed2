use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    RenderArgs,
    config::Config,
    content::model::{Breadcrumb, BulletinDocument},
    locale::Localiser,
    mapper::{PageContext, create_bulletin_model},
    render::{Renderer, figure_function},
};

/// Render a bulletin document from disk, without contacting any service.
///
/// Resource tags are left as they are.
pub async fn run(args: &RenderArgs) -> Result<(), anyhow::Error> {
    let config = Config::load_from_arg(args.config_file.as_deref())?;
    super::init_tracing(config.debug);

    let bulletin: BulletinDocument = read_json(&args.bulletin).await?;
    let breadcrumbs: Vec<Breadcrumb> = match &args.breadcrumb {
        Some(path) => read_json(path).await?,
        None => Vec::new(),
    };

    let renderer = Renderer::new(&config.templates_dir, &config)?;
    let localiser = Localiser::embedded()?;

    let context = PageContext {
        language: args.lang.clone(),
        request_protocol: "https".to_string(),
        site_domain: config.site_domain.clone(),
        ..Default::default()
    };
    let model = create_bulletin_model(
        renderer.new_base_page(&args.lang),
        &bulletin,
        &breadcrumbs,
        &context,
        &localiser,
    );

    let html = renderer.build_page_with_functions(
        &args.template,
        &model,
        vec![("figure", figure_function(HashMap::new()))],
    )?;
    println!("{}", html);

    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&source)?)
}
