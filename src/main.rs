use log::{debug, error};
use std::env;

use recipe_portal::{consolidate, PortalConfig, Recipe, RecipeError, RecipeGenerator};

const USAGE: &str = "Usage:
  recipe-portal generate <recipe name>
  recipe-portal consolidate <recipes.json>...";

/// Read a file holding either one recipe or an array of recipes.
async fn read_recipes(path: &str) -> Result<Vec<Recipe>, RecipeError> {
    let content = tokio::fs::read_to_string(path).await?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(RecipeError::InvalidRecord)?;

    if value.is_array() {
        serde_json::from_value(value).map_err(RecipeError::InvalidRecord)
    } else {
        Ok(vec![
            serde_json::from_value(value).map_err(RecipeError::InvalidRecord)?
        ])
    }
}

async fn run(args: &[String]) -> Result<String, Box<dyn std::error::Error>> {
    let config = PortalConfig::load()?;
    debug!("{:#?}", config);

    match args.first().map(String::as_str) {
        Some("generate") => {
            let name = args[1..].join(" ");
            let generator = RecipeGenerator::from_config(&config)?;
            let recipe = generator.generate(&name).await?;
            Ok(serde_json::to_string_pretty(&recipe)?)
        }
        Some("consolidate") => {
            let mut recipes = Vec::new();
            for path in &args[1..] {
                recipes.extend(read_recipes(path).await?);
            }
            let list = consolidate(&recipes, config.max_recipes)?;
            Ok(serde_json::to_string_pretty(&list)?)
        }
        _ => Err(USAGE.into()),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            if let Some(raw) = e
                .downcast_ref::<RecipeError>()
                .and_then(RecipeError::raw_response)
            {
                debug!("Generated text that failed parsing: {}", raw);
            }
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
