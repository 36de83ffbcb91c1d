use crate::core::gemini::GeminiClient;
use crate::core::prompt::build_prompt;
use crate::core::reply_parser::parse_reply;
use crate::core::retry::{GenerationError, TokioSleeper};
use crate::core::sheet::{read_leads, write_delimited, write_json};
use crate::core::{ConfigProvider, Pipeline, Sleeper, Storage};
use crate::domain::model::{
    Lead, LeadSheet, OutputFormat, OutputRow, OutreachResult, ParsedMessage, RunSummary,
};
use crate::utils::error::Result;
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use tracing::Instrument;
use zip::write::{FileOptions, ZipWriter};

pub struct OutreachPipeline<S: Storage, C: ConfigProvider, Z: Sleeper = TokioSleeper> {
    storage: S,
    config: C,
    client: GeminiClient,
    sleeper: Z,
}

impl<S: Storage, C: ConfigProvider> OutreachPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Self::with_sleeper(storage, config, TokioSleeper)
    }
}

impl<S: Storage, C: ConfigProvider, Z: Sleeper> OutreachPipeline<S, C, Z> {
    pub fn with_sleeper(storage: S, config: C, sleeper: Z) -> Result<Self> {
        let client = GeminiClient::new(
            config.api_endpoint(),
            config.api_key(),
            config.request_timeout(),
            config.retry_policy(),
        )?;
        Ok(Self {
            storage,
            config,
            client,
            sleeper,
        })
    }

    /// Drafts the message for one lead. Any call failure is handed back
    /// classified; the caller decides how to degrade.
    pub async fn generate_for(
        &self,
        lead: &Lead,
    ) -> std::result::Result<ParsedMessage, GenerationError> {
        let prompt = build_prompt(lead);
        let reply = self.client.generate(&prompt, &self.sleeper).await?;
        Ok(parse_reply(&reply))
    }

    fn output_file(&self, extension: &str) -> String {
        format!("{}.{}", self.config.output_name(), extension)
    }

    fn render(&self, format: OutputFormat, result: &OutreachResult) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Csv => write_delimited(result, b','),
            OutputFormat::Tsv => write_delimited(result, b'\t'),
            OutputFormat::Json => write_json(result),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, Z: Sleeper> Pipeline for OutreachPipeline<S, C, Z> {
    async fn extract(&self) -> Result<LeadSheet> {
        tracing::debug!("Reading leads from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let sheet = read_leads(&data)?;
        tracing::debug!("Input columns: {:?}", sheet.headers);
        Ok(sheet)
    }

    async fn transform(&self, sheet: LeadSheet) -> Result<OutreachResult> {
        let started_at = Utc::now();
        let total = sheet.len();
        let throttle = self.config.throttle_delay();
        let mut rows = Vec::with_capacity(total);
        let mut failed = 0;

        tracing::info!("Processing {} leads...", total);

        for (idx, row) in sheet.rows.into_iter().enumerate() {
            let span = tracing::info_span!("lead", row = idx + 1, name = %row.lead.name);

            let message = match self.generate_for(&row.lead).instrument(span.clone()).await {
                Ok(message) => {
                    span.in_scope(|| tracing::info!("✓ Processed: {}", row.lead.name));
                    message
                }
                Err(err) => {
                    failed += 1;
                    span.in_scope(|| {
                        tracing::error!("✗ Failed for {}: {}", row.lead.name, err)
                    });
                    ParsedMessage::default()
                }
            };

            rows.push(OutputRow { row, message });

            if idx + 1 < total {
                self.sleeper.sleep(throttle).await;
            }
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            total,
            generated: total - failed,
            failed,
        };

        Ok(OutreachResult {
            headers: sheet.headers,
            rows,
            summary,
        })
    }

    async fn load(&self, result: OutreachResult) -> Result<String> {
        let mut files = Vec::new();
        for format in self.config.output_formats() {
            let name = self.output_file(format.extension());
            let data = self.render(*format, &result)?;
            tracing::debug!("Rendered {} ({} bytes)", name, data.len());
            files.push((name, data));
        }

        let output_dir = Path::new(self.config.output_path());
        let mut primary = None;

        for (name, data) in &files {
            let path = output_dir.join(name);
            self.storage.write_file(&path.to_string_lossy(), data).await?;
            primary.get_or_insert(path);
        }

        if self.config.compress_output() {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            let path = output_dir.join(self.output_file("zip"));
            tracing::debug!("Writing ZIP bundle ({} bytes)", zip_data.len());
            self.storage
                .write_file(&path.to_string_lossy(), &zip_data)
                .await?;
            primary.get_or_insert(path);
        }

        Ok(primary
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default())
    }
}
