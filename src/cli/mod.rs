use ccitt_engine::LogDiagnostics;
use color_eyre::eyre;
use env_logger::Env;
use fax_strip::{
    ascii_art::{ascii_art, UNICODE},
    Bilevel, ByteBudgetMode, ChunkFeeder, FeedStatus, Outcome, Raster, Scheme, StripDecoder,
};
use image::ImageFormat;
use log::{info, warn, LevelFilter};
use prettytable::{cell, format, row, Cell, Row, Table};

pub mod opt;

use opt::Options;

/// Set up CLI
pub fn init<T: clap::Parser>() -> color_eyre::Result<T> {
    color_eyre::install()?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("FAX_STRIP_LOG"))
        .init();
    let args = T::parse();
    Ok(args)
}

/// One call to the decoder
struct CallStat {
    supplied: usize,
    buffered: usize,
    rows: u32,
    result: &'static str,
}

fn print_stats(calls: &[CallStat]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["call", "chunk", "carried", "rows", "result"]);
    for (index, call) in calls.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&format!("{:4}", index)),
            Cell::new(&format!("{:6}", call.supplied)),
            Cell::new(&format!("{:6}", call.buffered)),
            Cell::new(&format!("{:5}", call.rows)),
            Cell::new(call.result),
        ]));
    }
    table.printstd();
}

/// Decode the file named in `opt`
pub fn run(opt: &Options) -> eyre::Result<()> {
    let input = std::fs::read(&opt.file)?;
    let config = opt.stream_config(input.len())?;
    info!(
        "Decoding {} ({} bytes) as {}, {}x{}",
        opt.file.display(),
        input.len(),
        Scheme(config.compression),
        config.width,
        config.height
    );

    let paper = if opt.invert { 0x00 } else { 0xFF };
    let mut raster = Raster::new(
        config.xoff + config.width,
        config.yoff + config.height,
        1,
        paper,
    );
    let placement = Bilevel::new(opt.invert);
    let mut decoder =
        StripDecoder::with_diagnostics(&config, placement, Box::new(LogDiagnostics))?;
    let mut calls = Vec::new();

    match config.budget {
        ByteBudgetMode::Bounded(_) => {
            let outcome = decoder.decode(&input, &mut raster)?;
            calls.push(CallStat {
                supplied: input.len(),
                buffered: 0,
                rows: decoder.rows(),
                result: match outcome {
                    Outcome::Done => "done",
                    Outcome::NeedMoreInput(_) => "more",
                },
            });
        }
        ByteBudgetMode::Streaming => {
            let mut feeder = ChunkFeeder::new();
            for chunk in input.chunks(opt.chunk.max(1)) {
                let buffered = feeder.buffered();
                let status = feeder.feed(&mut decoder, &mut raster, chunk)?;
                calls.push(CallStat {
                    supplied: chunk.len(),
                    buffered,
                    rows: decoder.rows(),
                    result: match status {
                        FeedStatus::Done => "done",
                        FeedStatus::Pending { .. } => "more",
                    },
                });
                if status == FeedStatus::Done {
                    break;
                }
            }
            if let Err(e) = feeder.finish(&decoder) {
                warn!("{}", e);
            }
        }
    }
    info!("Decoded {} of {} rows", decoder.rows(), decoder.height());

    if opt.stats {
        print_stats(&calls);
    }
    if opt.print {
        let mut art = String::new();
        ascii_art(&mut art, &raster, UNICODE)?;
        print!("{}", art);
    }
    if let Some(path) = &opt.out {
        let image = raster
            .into_gray_image()
            .ok_or_else(|| eyre::eyre!("Raster does not fit the image buffer"))?;
        image.save_with_format(path, ImageFormat::Png)?;
        info!("Saved {}", path.display());
    }
    Ok(())
}
