use std::path::PathBuf;

use clap::error::ErrorKind;
use du2html::exporters::json;
use du2html::{read_du_file, Error, PageOptions, Renderer};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(clap::Parser, Debug)]
#[command(
    version,
    about = "Turn `du` output into a single HTML page for exploring the directory tree.",
    long_about = "Turn `du` output into a single HTML page for exploring the directory tree. \
                  The input holds one `<size><TAB><path>` entry per line, e.g. from `du -a > du.txt`."
)]
#[command(flatten_help = true)]
pub struct Args {
    /// Path to the `du` output.
    #[arg()]
    input: PathBuf,

    /// Where to write the HTML page.
    #[arg()]
    output: PathBuf,

    /// Page title and heading.
    #[arg(long)]
    title: Option<String>,

    /// Also print the tree data as JSON.
    #[arg(long)]
    dump_json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("{}", err.render());
            std::process::exit(1);
        }
    };

    run(args)
}

fn run(args: Args) -> Result<()> {
    log::info!("Processing {:?}", &args.input);
    let (tree, stats) = read_du_file(&args.input)?;
    log::info!(
        "{} lines accepted, {} skipped, {} nodes",
        stats.accepted,
        stats.skipped,
        tree.node_count()
    );
    if tree.is_empty() {
        log::warn!("no usable entries in {:?}", &args.input);
    }

    if args.dump_json {
        println!("{}", json::to_json_pretty(&json::project(&tree))?);
    }

    let mut options = PageOptions::default();
    if let Some(title) = args.title {
        options.title = title;
    }

    let page = Renderer::new()?.render_page(&tree, &options)?;
    std::fs::write(&args.output, &page).map_err(|source| Error::WriteOutput {
        path: args.output.clone(),
        source,
    })?;
    log::info!("Wrote {} bytes to {:?}", page.len(), &args.output);

    Ok(())
}
