//! External converter process engine.
//!
//! Spawns a configured converter command per request. The conversion
//! function name (`tex2svg`, `mathml2svg`, ...) is the first argument, the
//! serialized engine configuration and the per-request options follow, the
//! markup goes to the child's stdin, and the rendered SVG comes back on its
//! stdout. A non-zero exit surfaces the child's stderr text as a
//! conversion error.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use mathpipe_protocol::ConversionRequest;
use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{Engine, EngineError};

/// Engine backed by an external converter command.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    config: String,
}

impl CommandEngine {
    /// Initialize the engine with the assembled configuration.
    pub fn new(program: PathBuf, config: &Value) -> Result<Self, EngineError> {
        let config = serde_json::to_string(config)
            .map_err(|e| EngineError::Internal(format!("unserializable configuration: {}", e)))?;
        Ok(Self { program, config })
    }

    fn options(request: &ConversionRequest) -> Value {
        json!({
            "display": request.display,
            "em": request.layout.em,
            "ex": request.layout.ex,
            "containerWidth": request.layout.container_width,
            "lineWidth": request.layout.line_width,
            "cjkCharWidth": request.layout.cjk_width,
            "scale": 1,
        })
    }
}

#[async_trait]
impl Engine for CommandEngine {
    async fn convert(&self, request: &ConversionRequest) -> Result<String, EngineError> {
        let mut child = Command::new(&self.program)
            .arg(request.conversion_name())
            .arg("--config")
            .arg(&self.config)
            .arg("--options")
            .arg(Self::options(request).to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                EngineError::Internal(format!(
                    "failed to spawn {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(request.markup.as_bytes())
                .await
                .map_err(|e| EngineError::Internal(format!("failed to write markup: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| EngineError::Internal(format!("converter did not finish: {}", e)))?;

        if output.status.success() {
            let rendered = String::from_utf8(output.stdout)
                .map_err(|e| EngineError::Internal(format!("converter output not UTF-8: {}", e)))?;
            Ok(rendered.trim_end().to_string())
        } else {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if message.is_empty() {
                Err(EngineError::Internal(format!(
                    "converter exited with {}",
                    output.status
                )))
            } else {
                Err(EngineError::Conversion(message))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use mathpipe_protocol::{LayoutHints, SourceFormat, TargetFormat};
    use serde_json::Number;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn request(markup: &str) -> ConversionRequest {
        ConversionRequest {
            id: Number::from(1),
            from: SourceFormat::Tex,
            to: TargetFormat::Svg,
            markup: markup.to_string(),
            display: true,
            layout: LayoutHints::default(),
        }
    }

    fn script(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("converter.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "{}", body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn stdout_of_successful_converter_is_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(&dir, r#"printf '<svg>%s</svg>\n' "$(cat)""#);
        let engine = CommandEngine::new(program, &json!({"svg": {"scale": 1}})).unwrap();

        let rendered = engine.convert(&request("x^2")).await.unwrap();
        assert_eq!(rendered, "<svg>x^2</svg>");
    }

    #[tokio::test]
    async fn conversion_name_is_first_argument() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(&dir, r#"cat >/dev/null; printf '%s' "$1""#);
        let engine = CommandEngine::new(program, &json!({})).unwrap();

        let rendered = engine.convert(&request("x")).await.unwrap();
        assert_eq!(rendered, "tex2svg");
    }

    #[tokio::test]
    async fn failing_converter_surfaces_stderr_as_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(&dir, "cat >/dev/null; echo 'Undefined control sequence' >&2; exit 1");
        let engine = CommandEngine::new(program, &json!({})).unwrap();

        let error = engine.convert(&request("\\nope")).await.unwrap_err();
        match error {
            EngineError::Conversion(message) => {
                assert_eq!(message, "Undefined control sequence");
            }
            other => panic!("expected conversion error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_program_is_an_internal_error() {
        let engine =
            CommandEngine::new(PathBuf::from("/nonexistent/converter"), &json!({})).unwrap();
        let error = engine.convert(&request("x")).await.unwrap_err();
        assert!(matches!(error, EngineError::Internal(_)));
    }
}
