use brickyard::catalog::load_catalog;
use brickyard::form::{FormKind, contact_form, enquiry_form};
use brickyard::overlay::Overlays;
use brickyard::query::{CategoryFilter, Query, SortMode, filter_and_sort};
use brickyard::submit::{HttpTransport, LogComposer, SubmissionPipeline, SubmitPolicy, SystemComposer};
use brickyard::{config, generate, logging, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "brickyard")]
#[command(about = "Static site and form pipeline for a building materials catalog")]
#[command(long_about = "\
Static site and form pipeline for a building materials catalog

Content structure:

  content/
  ├── config.toml     # Site, contact, submission, listing and map settings (optional)
  └── catalog.toml    # Services and gallery images (optional, stock catalog otherwise)

Generated pages: index, services (plus one page per category and sort),
gallery, enquiry and contact. Overlays open from `#detail-<id>` and
`#image-<n>` anchors; `services.html#q=<term>` prefills the search and
`enquiry.html#service=<name>` prefills the enquiry form.

Run 'brickyard gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Debug-level diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the static site
    Build,
    /// Validate config and catalog without building
    Check,
    /// Filter and sort the catalog
    Search {
        /// Case-insensitive term matched against title, summary and description
        #[arg(default_value = "")]
        term: String,
        /// any, manufacturing, delivery, installation or technical
        #[arg(long, default_value = "any")]
        category: CategoryFilter,
        /// relevance or alpha
        #[arg(long, default_value = "relevance")]
        sort: SortMode,
    },
    /// Show the detail overlay content for a service id
    Show { id: String },
    /// Submit a form to the configured endpoint, falling back to mail
    Submit {
        /// enquiry or contact
        #[arg(value_parser = parse_form_kind)]
        form: FormKind,
        /// Field value as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Page fragment, e.g. "service=Stock%20Bricks"
        #[arg(long)]
        fragment: Option<String>,
        /// Open the mail fallback with the system handler
        #[arg(long)]
        open_mail: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_form_kind(s: &str) -> Result<FormKind, String> {
    FormKind::parse(s).ok_or_else(|| format!("unknown form '{s}' (expected enquiry or contact)"))
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{s}'"))
}

fn config_source(root: &std::path::Path) -> &'static str {
    if root.join("config.toml").exists() {
        "config.toml"
    } else {
        "stock defaults"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let catalog = load_catalog(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let pages = generate::generate(&catalog, &site_config, &cli.output)?;
            output::print_generate_output(&pages);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let catalog = load_catalog(&cli.source)?;
            output::print_check_output(&catalog, &site_config, config_source(&cli.source));
            println!("==> Content is valid");
        }
        Command::Search { term, category, sort } => {
            let catalog = load_catalog(&cli.source)?;
            let query = Query::new(term, category, sort);
            let results = filter_and_sort(&catalog, &query);
            output::print_search_output(&query, &results);
        }
        Command::Show { id } => {
            let catalog = load_catalog(&cli.source)?;
            let mut overlays = Overlays::default();
            if overlays.open_detail(&catalog, &id) {
                if let Some(content) = overlays.detail.content() {
                    output::print_detail(content);
                }
            } else {
                println!("No service with id '{id}'");
            }
        }
        Command::Submit {
            form: kind,
            fields,
            fragment,
            open_mail,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let catalog = load_catalog(&cli.source)?;
            let mut form = match kind {
                FormKind::Enquiry => {
                    let titles: Vec<&str> = catalog.services().iter().map(|s| s.title.as_str()).collect();
                    enquiry_form(&titles)
                }
                FormKind::Contact => contact_form(),
            };
            for (name, value) in fields {
                if !form.set(&name, value) {
                    return Err(format!("{} form has no field '{name}'", kind.id()).into());
                }
            }

            let policy = SubmitPolicy::from_config(&site_config);
            let transport = HttpTransport::new(&site_config.submission.endpoint)?;
            let runtime = tokio::runtime::Runtime::new()?;
            let outcome = if open_mail {
                let pipeline = SubmissionPipeline::new(transport, SystemComposer, &site_config.contact.email, policy);
                runtime.block_on(pipeline.submit(&mut form, fragment.as_deref()))
            } else {
                let pipeline = SubmissionPipeline::new(transport, LogComposer, &site_config.contact.email, policy);
                runtime.block_on(pipeline.submit(&mut form, fragment.as_deref()))
            };
            output::print_submit_outcome(&outcome);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
