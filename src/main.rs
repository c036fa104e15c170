#[macro_use]
extern crate log;

use std::io::{self, Write};

use clap::Parser;
use mimalloc::MiMalloc;
use omrun::{cli::Cli, config::Config, error::LoggerSnafu, logger::Logger, report, Error, Pipeline};
use omtensor::LoadedModel;
use snafu::ResultExt;

// mimalloc is an excellent general purpose allocator
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    let cli = Cli::parse();

    let result = run(&cli);
    let code = report::finish(&mut io::stdout(), &result);
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<(), Error> {
    let cfg = cli.resolve()?;

    let mut logger = Logger::new();
    if let Some(filter) = &cfg.log {
        logger = logger.with_filter(filter);
    }
    logger.init().context(LoggerSnafu)?;

    info!("omrun starting up...");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cfg.model {
        Some(path) => {
            let model = LoadedModel::open(path)?;
            info!("running {}", model.path().display());
            Pipeline::new(model, &cfg).run(&mut out)
        }
        None => run_linked(&cfg, &mut out),
    }
}

#[cfg(feature = "link")]
fn run_linked(cfg: &Config, out: &mut impl Write) -> Result<(), Error> {
    info!("running the linked-in model");
    Pipeline::new(omtensor::CompiledModel::new(), cfg).run(out)
}

#[cfg(not(feature = "link"))]
fn run_linked(_cfg: &Config, _out: &mut impl Write) -> Result<(), Error> {
    omrun::error::NoModelSnafu.fail()
}
