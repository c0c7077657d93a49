use clap::Parser;
use gpudex_app::CliArgs;

fn main() -> anyhow::Result<()> {
    gpudex_app::init_tracing();
    let args = CliArgs::parse();
    gpudex_app::run(&args)
}
