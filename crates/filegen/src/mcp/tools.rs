use filegen_core::{Gateway, GenerationCapability, GenerationRequest, Session};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

impl CallToolResult {
    fn text(text: String) -> Self {
        Self {
            content: vec![Content::Text { text }],
            is_error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            content: vec![Content::Text { text: message }],
            is_error: Some(true),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateFileArgs {
    #[serde(flatten)]
    request: GenerationRequest,
    output_dir: Option<PathBuf>,
    #[serde(default)]
    force: bool,
}

fn internal_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    }
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "filegen".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let types: Vec<&str> = filegen_core::FileCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect();

    let tools = vec![
        Tool {
            name: "generate_file".to_string(),
            description: "Generate the content of a file from a natural language description. Returns the document (filename, extension, content) as JSON. When output_dir is given the file is also written to <output_dir>/<filename><extension>.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "What the file should contain (e.g., 'A Python function to calculate the factorial of a number recursively')"
                    },
                    "filename": {
                        "type": "string",
                        "description": "Target filename without extension (e.g., 'factorial')"
                    },
                    "type": {
                        "type": "string",
                        "enum": types,
                        "description": "Target file type"
                    },
                    "output_dir": {
                        "type": "string",
                        "description": "Directory to write the file to (optional)"
                    },
                    "force": {
                        "type": "boolean",
                        "description": "Overwrite an existing file (default: false)"
                    }
                },
                "required": ["prompt", "filename", "type"]
            }),
        },
        Tool {
            name: "list_file_types".to_string(),
            description: "List the supported file types with their labels and extensions.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
    ];

    serde_json::to_value(ToolsList { tools }).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams =
        serde_json::from_value(params.unwrap_or(serde_json::Value::Null)).map_err(|e| {
            JsonRpcError {
                code: -32602,
                message: format!("Invalid params: {e}"),
                data: None,
            }
        })?;

    let result = match params.name.as_str() {
        "generate_file" => {
            handle_generate_file(params.arguments, &global.provider.gateway(), global).await?
        }
        "list_file_types" => {
            let json = serde_json::to_string_pretty(&crate::catalog::file_types_data())
                .map_err(internal_error)?;
            CallToolResult::text(json)
        }
        name => {
            return Err(JsonRpcError {
                code: -32602,
                message: format!("Unknown tool: {name}"),
                data: None,
            })
        }
    };

    serde_json::to_value(result).map_err(internal_error)
}

/// One generation per call, on a fresh session. Generation failures are tool
/// errors, not protocol errors.
async fn handle_generate_file<C: GenerationCapability>(
    arguments: Option<serde_json::Value>,
    gateway: &Gateway<C>,
    global: &crate::Global,
) -> Result<CallToolResult, JsonRpcError> {
    let args: GenerateFileArgs =
        serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
            JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: {e}"),
                data: None,
            }
        })?;

    if global.verbose {
        anstream::eprintln!(
            "Calling generate_file: filename='{}', type={}",
            args.request.filename,
            args.request.category
        );
    }

    // Generate on a fresh session
    let mut session = Session::new();
    let document = match session.submit(gateway, &args.request).await {
        Ok(document) => document,
        Err(e) => return Ok(CallToolResult::error(e.to_string())),
    };

    // Optionally write the file as well
    let path = match &args.output_dir {
        Some(dir) => match crate::output::save_document(document, dir, args.force).await {
            Ok(path) => Some(path),
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        },
        None => None,
    };

    let output = crate::output::DocumentOutput::new(document, path.as_deref());
    let json = serde_json::to_string_pretty(&output).map_err(internal_error)?;

    Ok(CallToolResult::text(json))
}
