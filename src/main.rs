use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = smart_rename::cli::parse();
    app::run(args)
}
