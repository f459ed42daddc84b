//! Analyze command

use crate::app::{AnalyzeArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use sentichain_core::{
    ChainInputs, ChatModel, Config, LlmChain, PromptTemplate, SentiChainError, SentimentChain,
    TracingTracker, VLLMClient,
};
use serde_json::Value;
use std::io::BufRead;
use std::sync::Arc;

pub async fn run(args: AnalyzeArgs, config: Config, format: OutputFormat, verbose: bool) -> Result<()> {
    let mut chain_config = config.sentiment.clone();
    super::apply_overrides(&mut chain_config, &args.overrides)?;

    if let Some(concurrency) = args.concurrency {
        chain_config.max_concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        chain_config.timeout_secs = Some(timeout);
    }
    chain_config.verbose |= verbose;

    let texts = collect_texts(args.texts, args.stdin)?;
    let batch = args.batch || texts.len() > 1;
    if batch {
        chain_config.batch_processing = true;
    }

    let prompt = PromptTemplate::new(chain_config.prompt_template.clone())?;
    let client = Arc::new(VLLMClient::new(config.llm_service.clone())?);
    let model = Arc::new(ChatModel::new(client.clone()));

    let mut chain = SentimentChain::new(LlmChain::new(model, prompt), chain_config)?;
    if verbose {
        chain = chain.with_tracker(Arc::new(TracingTracker));
    }

    let value = if batch {
        Value::Array(texts.into_iter().map(Value::String).collect())
    } else {
        Value::String(texts.into_iter().next().unwrap_or_default())
    };
    let mut inputs = ChainInputs::new();
    inputs.insert(chain.config().input_key.clone(), value);

    let result = chain.run(&inputs).await?;
    print!("{}", output::format_chain_output(&result, format));

    tracing::info!("LLM metrics: {:?}", client.metrics());
    tracing::info!("Response cache: {:?}", client.cache_stats());

    Ok(())
}

fn collect_texts(texts: Vec<String>, from_stdin: bool) -> Result<Vec<String>> {
    let mut all = texts;
    if from_stdin {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                all.push(line);
            }
        }
    }
    if all.is_empty() {
        return Err(SentiChainError::InvalidInput(
            "No text given; pass texts as arguments or use --stdin".to_string(),
        )
        .into());
    }
    Ok(all)
}
