// Basic sentiment analysis using SentiChain as a library
//
// Talks to the OpenAI-compatible service named by SENTICHAIN_LLM_URL
// (default http://localhost:8000) and SENTICHAIN_LLM_MODEL.

use sentichain_core::{
    ChainInputs, ChatModel, SentimentChain, SentimentChainOptions, TracingTracker,
};
use std::collections::HashMap;
use std::sync::Arc;

#[tokio::main]
async fn main() -> sentichain_core::Result<()> {
    println!("SentiChain Basic Sentiment Example\n");

    let model = Arc::new(ChatModel::from_env()?);
    let chain = SentimentChain::from_llm(
        model,
        SentimentChainOptions {
            label_mapping: HashMap::from([
                ("Positive".to_string(), "POS".to_string()),
                ("Negative".to_string(), "NEG".to_string()),
            ]),
            batch_processing: true,
            ..Default::default()
        },
    )?
    .with_tracker(Arc::new(TracingTracker));

    let single = chain
        .analyze("The new release fixed every crash I reported.")
        .await?;
    println!("Single: {}", serde_json::to_string_pretty(&single)?);

    let mut inputs = ChainInputs::new();
    inputs.insert(
        "question".to_string(),
        serde_json::json!([
            "Support never answered my ticket.",
            "It works. Nothing special.",
            "Best purchase this year!",
        ]),
    );
    let batch = chain.run(&inputs).await?;
    println!("Batch: {}", serde_json::to_string_pretty(&batch)?);

    Ok(())
}
