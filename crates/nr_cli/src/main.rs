use std::path::PathBuf;

use clap::Parser;
use nr_core::{CompanyProfile, Config};
use nr_inference::ModelKind;
use nr_scrappers::{
    handle_command, init_logging, PipelineOptions, ResearchArgs, ResearchPipeline, SearchKind,
};
use nr_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Keyword news research with a three-stage report chain")]
pub struct Cli {
    /// Env file to load instead of searching for `.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    /// News-search source
    #[arg(long, value_enum, default_value_t = SearchKind::Tavily, global = true)]
    search: SearchKind,
    /// Text generator backing the report chain
    #[arg(long, value_enum, default_value_t = ModelKind::Chat, global = true)]
    model: ModelKind,
    /// Overrides GROQ_MODEL
    #[arg(long, global = true)]
    model_name: Option<String>,
    /// Company the expert and strategy stages are written for (overrides NR_COMPANY)
    #[arg(long, global = true)]
    company: Option<String>,
    /// Also search for "<keyword> <company>"
    #[arg(long, global = true)]
    augment_query: bool,
    /// Give the expert stage every article, not only company mentions
    #[arg(long, global = true)]
    no_company_filter: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the web front end
    Serve {
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Research one keyword and print the report
    Research(ResearchArgs),
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(name) = &self.model_name {
            config.model_name = name.trim().to_string();
        }
        if let Some(company) = &self.company {
            config.company = CompanyProfile::new(company.trim());
        }
        if let Commands::Serve { port: Some(port) } = &self.command {
            config.port = *port;
        }
    }

    fn options(&self, config: &Config) -> PipelineOptions {
        PipelineOptions {
            augment_query: self.augment_query,
            filter_expert_corpus: !self.no_company_filter,
            ..PipelineOptions::from_config(config)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env_file = Config::load_env(cli.env_file.as_deref())?;
    init_logging("info");
    if let Some(path) = env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    tracing::debug!("{:?}", config);

    let options = cli.options(&config);
    let pipeline = ResearchPipeline::from_config(&config, cli.search, cli.model, options)?;
    info!(
        "🧠 Pipeline ready (search: {}, model: {}, company: {})",
        cli.search, cli.model, config.company.name
    );

    match cli.command {
        Commands::Serve { .. } => nr_web::serve(AppState::new(pipeline), config.port).await?,
        Commands::Research(args) => handle_command(args, &pipeline).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_flags() {
        let cli = Cli::try_parse_from([
            "nr",
            "research",
            "비만 치료제",
            "--json",
            "--model",
            "dummy",
            "--company",
            "한미약품",
            "--augment-query",
        ])
        .unwrap();

        assert_eq!(cli.model, ModelKind::Dummy);
        assert_eq!(cli.search, SearchKind::Tavily);
        match &cli.command {
            Commands::Research(args) => {
                assert_eq!(args.keyword, "비만 치료제");
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.company.name, "한미약품");

        let options = cli.options(&config);
        assert!(options.augment_query);
        assert!(options.filter_expert_corpus);
        assert_eq!(options.company.name, "한미약품");
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::try_parse_from([
            "nr",
            "serve",
            "--port",
            "8080",
            "--no-company-filter",
            "--search",
            "naver",
            "--env-file",
            "deploy.env",
        ])
        .unwrap();
        assert_eq!(cli.search, SearchKind::Naver);
        assert_eq!(cli.env_file, Some(PathBuf::from("deploy.env")));
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.port, 8080);
        assert_eq!(cli.model, ModelKind::Chat);
        assert!(!cli.options(&config).filter_expert_corpus);
    }
}
