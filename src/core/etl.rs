use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct OutreachEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> OutreachEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting outreach run...");

        let sheet = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} leads", sheet.len());

        let result = self.pipeline.transform(sheet).await?;
        let summary = &result.summary;
        tracing::info!(
            total = summary.total,
            generated = summary.generated,
            failed = summary.failed,
            elapsed_secs = (summary.finished_at - summary.started_at).num_seconds(),
            "✉️ Drafted messages for {} of {} leads",
            summary.generated,
            summary.total
        );
        if summary.failed > 0 {
            tracing::warn!(
                "{} leads were left with empty message fields",
                summary.failed
            );
        }

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
