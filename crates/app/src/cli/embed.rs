use clap::Args;
use kindhope_app::{
    config::EmbeddingsConfig,
    embeddings::{EmbeddingClient, OpenAiEmbeddingClient},
};

#[derive(Debug, Args)]
pub(crate) struct EmbedArgs {
    /// Text to embed
    #[arg(long)]
    text: String,

    #[command(flatten)]
    embeddings: EmbeddingsConfig,
}

pub(crate) async fn run(args: EmbedArgs) -> Result<(), String> {
    let client = OpenAiEmbeddingClient::new(&args.embeddings);

    let vector = client
        .embed(&args.text)
        .await
        .map_err(|error| format!("failed to embed text: {error}"))?;

    println!("model: {}", args.embeddings.embeddings_model);
    println!("dimensions: {}", vector.len());
    println!(
        "head: {:?}",
        vector.iter().take(8).copied().collect::<Vec<f32>>()
    );

    Ok(())
}
