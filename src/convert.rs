use super::chart::LineChart;
use super::error::ConvertError;
use super::render::render_html;
use super::TimeRate;
use clap::{App, Arg};
use std::path::{Path, PathBuf};
use tracing::{info, trace};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Takes the two positional CLI arguments: input csv and output html.
pub fn parse_cli() -> (PathBuf, PathBuf) {
    let arg_csvin = Arg::with_name("input_file")
        .help("csv file with the 'Elapsed time (s)' and 'Requests per second' columns")
        .required(true)
        .index(1);
    let arg_htmlout = Arg::with_name("output_file")
        .help("html file to write the chart to")
        .required(true)
        .index(2);
    let cli_args = App::new("convert")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the requests per second as an interactive html chart")
        .arg(arg_csvin)
        .arg(arg_htmlout)
        .get_matches();
    // both are required, clap exits before reaching here when missing
    let csvin = PathBuf::from(cli_args.value_of("input_file").unwrap_or_default());
    let htmlout = PathBuf::from(cli_args.value_of("output_file").unwrap_or_default());
    (csvin, htmlout)
}

/// Reads the time series at `input`, and writes its line chart to `output`.
/// The document is rendered in memory first, the output file is only
/// created when the input loaded and rendered correctly.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<(), ConvertError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    info!("read data from {}", input.display());
    let timerate = TimeRate::from_csv(input)?;
    info!(rows = timerate.len(), "building line chart");
    trace!("loaded table:\n{}", timerate);
    let chart = LineChart::from_table(&timerate)?;
    let html = render_html(&chart)?;
    std::fs::write(output, &html).map_err(|source| ConvertError::WriteOutput {
        path: output.to_path_buf(),
        source,
    })?;
    info!(bytes = html.len(), "wrote chart to {}", output.display());
    Ok(())
}
