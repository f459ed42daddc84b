//! Extract command

use crate::app::{ExtractArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use sentichain_core::{Config, SentimentExtractor};
use std::io::Read;

pub fn run(args: ExtractArgs, config: Config, format: OutputFormat) -> Result<()> {
    let mut chain_config = config.sentiment;
    super::apply_overrides(&mut chain_config, &args.overrides)?;

    let response = if args.response == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.response
    };

    let extractor = SentimentExtractor::new(chain_config.label_mapping, chain_config.include_score);
    let result = extractor.extract(&response)?;

    print!("{}", output::format_sentiment(&result, format));
    Ok(())
}
