//! MCP (Model Context Protocol) server.
//!
//! Exposes statement analysis, success prediction, draft scoring and
//! draft comparison over stdio. Every tool delegates to
//! `appeal_lint_core`; this module only validates input size, applies
//! configured defaults, and serializes reports as JSON text.

use std::collections::BTreeMap;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use appeal_lint_core::AppealType;
use appeal_lint_core::catalog::DEFAULT_VIOLATION_TYPE;
use appeal_lint_core::config::Config;
use appeal_lint_core::{diff, predict, quality, statement};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_statement` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeStatementParams {
    /// The driver's statement.
    pub text: String,
    /// Violation type: parking, speeding, red_light, or general.
    pub violation_type: Option<String>,
}

/// Parameters for the `predict_success` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct PredictSuccessParams {
    /// Violation type: parking, speeding, red_light, or general.
    pub violation_type: Option<String>,
    /// Factor ids that apply to the case.
    #[serde(default)]
    pub factors: Vec<String>,
    /// Appeal dimension selections, e.g. {"evidence": "strong"}.
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
}

/// Parameters for the `score_quality` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreQualityParams {
    /// The appeal draft.
    pub text: String,
    /// Appeal type: procedural, factual, legal, or comprehensive.
    pub appeal_type: Option<String>,
}

/// Parameters for the `diff_texts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DiffTextsParams {
    /// The earlier draft.
    pub original: String,
    /// The revised draft.
    pub modified: String,
}

#[derive(Serialize)]
struct DiffOutput {
    runs: Vec<diff::DiffRun>,
    stats: diff::DiffStats,
}

/// MCP server for traffic-ticket appeal analysis.
#[derive(Clone)]
pub struct AppealServer {
    config: Config,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for AppealServer {
    fn default() -> Self {
        let config = Config::default();
        let max_input_bytes = config.input_limit();
        Self::new(config, max_input_bytes)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl AppealServer {
    /// Create a server that applies `config` defaults and the given input limit.
    pub fn new(config: Config, max_input_bytes: Option<usize>) -> Self {
        Self {
            config,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, field: &str, text: &str) -> Result<(), McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {field} is {} bytes (limit: {max} bytes)",
                    text.len()
                ),
                None,
            ));
        }
        Ok(())
    }

    fn violation_type<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.config.violation_type.as_deref())
            .unwrap_or(DEFAULT_VIOLATION_TYPE)
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Detect contestable issues in a driver's statement.
    #[tool(
        description = "Analyze a driver's statement for contestable issues. Returns detected issue categories with confidence and context snippets, an aggregate success probability in percent, and advice."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_statement(
        &self,
        Parameters(params): Parameters<AnalyzeStatementParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size("text", &params.text)?;
        let violation_type = self.violation_type(params.violation_type.as_deref());
        tracing::debug!(tool = "analyze_statement", violation_type, "executing MCP tool");

        let report = statement::analyze_statement_with(
            &params.text,
            violation_type,
            &self.config.match_options(),
        );

        tracing::info!(
            tool = "analyze_statement",
            issue_count = report.issues.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// Predict appeal success from case factors.
    #[tool(
        description = "Predict the probability an appeal succeeds from violation factors and appeal dimensions (evidence, timeliness, prior_record, witnesses). Returns a probability between 0.05 and 0.95, a likelihood tier, strengths, and weaknesses."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn predict_success(
        &self,
        Parameters(params): Parameters<PredictSuccessParams>,
    ) -> Result<CallToolResult, McpError> {
        let violation_type = self.violation_type(params.violation_type.as_deref());
        tracing::debug!(
            tool = "predict_success",
            violation_type,
            factors = params.factors.len(),
            "executing MCP tool"
        );

        let report = predict::predict_success(violation_type, &params.factors, params.dimensions);

        tracing::info!(
            tool = "predict_success",
            probability = report.probability,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// Score an appeal draft.
    #[tool(
        description = "Score an appeal letter draft on clarity, persuasiveness, professionalism, and relevance (1-5 each) with an overall score and up to three suggestions."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_quality(
        &self,
        Parameters(params): Parameters<ScoreQualityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size("text", &params.text)?;
        let appeal_type = params
            .appeal_type
            .as_deref()
            .or(self.config.appeal_type.as_deref())
            .unwrap_or(AppealType::DEFAULT.as_str());
        tracing::debug!(tool = "score_quality", appeal_type, "executing MCP tool");

        let report = quality::score_quality(&params.text, appeal_type);

        tracing::info!(
            tool = "score_quality",
            overall = report.metrics.as_ref().map(|m| m.overall),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// Compare two drafts word by word.
    #[tool(
        description = "Compare two drafts word by word. Returns runs classified as unchanged, added, or removed, plus token counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn diff_texts(
        &self,
        Parameters(params): Parameters<DiffTextsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size("original", &params.original)?;
        self.check_size("modified", &params.modified)?;
        tracing::debug!(tool = "diff_texts", "executing MCP tool");

        let runs = diff::diff_texts(&params.original, &params.modified);
        let stats = diff::summarize(&runs);

        tracing::info!(
            tool = "diff_texts",
            added = stats.added,
            removed = stats.removed,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &DiffOutput { runs, stats },
        )?)]))
    }
}

#[tool_handler]
impl ServerHandler for AppealServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Analyze ticket statements, predict appeal success, score and compare appeal drafts.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
