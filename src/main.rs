//! # Fax strip decoder
#![warn(missing_docs)]

use color_eyre::eyre;

mod cli;

use cli::opt::Options;

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    cli::run(&opt)
}
