use anyhow::Result;
use pocketbook::cli::{CliOptions, print_help};

#[tokio::main]
async fn main() -> Result<()> {
    let options = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n", e);
            print_help("pocketbook");
            std::process::exit(2);
        }
    };

    if options.show_help {
        print_help("pocketbook");
        return Ok(());
    }

    pocketbook::tui::run(options).await
}
